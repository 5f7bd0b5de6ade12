//! HTTP client for the server's v1 interface.

use async_trait::async_trait;
use tally_api::v1::{ApiError, ErrorBody, Todo, TodoDraft};
use uuid::Uuid;

use crate::controller::TodoService;

#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base: String,
}

impl Client {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

/// Decodes the structured error body, falling back to a transport failure
/// when the response is not in the expected shape.
async fn failure(response: reqwest::Response) -> ApiError {
    let status = response.status();

    match response.json::<ErrorBody>().await {
        Ok(body) => ApiError::from(body),
        Err(_) => ApiError::Transport(format!("unexpected response status {status}")),
    }
}

fn transport(error: reqwest::Error) -> ApiError {
    ApiError::Transport(error.to_string())
}

#[async_trait]
impl TodoService for Client {
    async fn list(&self) -> Result<Vec<Todo>, ApiError> {
        let response = self
            .http
            .get(self.url("/todos"))
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(failure(response).await);
        }

        response.json().await.map_err(transport)
    }

    async fn create(&self, draft: &TodoDraft) -> Result<Todo, ApiError> {
        let response = self
            .http
            .post(self.url("/todos"))
            .json(draft)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(failure(response).await);
        }

        response.json().await.map_err(transport)
    }

    async fn find(&self, id: Uuid) -> Result<Todo, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/todos/{id}")))
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(failure(response).await);
        }

        response.json().await.map_err(transport)
    }

    async fn update(&self, id: Uuid, draft: &TodoDraft) -> Result<Todo, ApiError> {
        let response = self
            .http
            .put(self.url(&format!("/todos/{id}")))
            .json(draft)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(failure(response).await);
        }

        response.json().await.map_err(transport)
    }

    async fn toggle(&self, id: Uuid) -> Result<Todo, ApiError> {
        let response = self
            .http
            .post(self.url(&format!("/todos/{id}/toggle")))
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(failure(response).await);
        }

        response.json().await.map_err(transport)
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url(&format!("/todos/{id}")))
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(failure(response).await);
        }

        Ok(())
    }
}
