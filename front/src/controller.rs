//! Local list state and the form mode machine.

use async_trait::async_trait;
use tally_api::v1::{ApiError, Todo, TodoDraft, Validate};
use uuid::Uuid;

/// The server operations the controller dispatches.
#[async_trait]
pub trait TodoService {
    async fn list(&self) -> Result<Vec<Todo>, ApiError>;
    async fn create(&self, draft: &TodoDraft) -> Result<Todo, ApiError>;
    async fn find(&self, id: Uuid) -> Result<Todo, ApiError>;
    async fn update(&self, id: Uuid, draft: &TodoDraft) -> Result<Todo, ApiError>;
    async fn toggle(&self, id: Uuid) -> Result<Todo, ApiError>;
    async fn delete(&self, id: Uuid) -> Result<(), ApiError>;
}

/// What the form is currently for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Create,
    Edit(Uuid),
}

/// The in-memory todo list plus the form mode, reconciled against server
/// responses.
///
/// A failed call leaves both the list and the mode exactly as they were;
/// nothing is committed optimistically.
pub struct Controller<S> {
    service: S,
    todos: Vec<Todo>,
    mode: Mode,
}

impl<S: TodoService> Controller<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            todos: Vec::new(),
            mode: Mode::Create,
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Replaces the local list with the server's.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        self.todos = self.service.list().await?;
        Ok(())
    }

    /// Fetches the record's current fields and enters edit mode; the
    /// returned draft seeds the form.
    pub async fn edit(&mut self, id: Uuid) -> Result<TodoDraft, ApiError> {
        let todo = self.service.find(id).await?;
        self.mode = Mode::Edit(id);

        Ok(TodoDraft {
            title: todo.title,
            description: todo.description,
        })
    }

    /// Leaves edit mode without touching anything.
    pub fn cancel(&mut self) {
        self.mode = Mode::Create;
    }

    /// Submits the form: creates in [`Mode::Create`], updates the record
    /// under edit otherwise. The draft is validated before anything is
    /// sent, with the same schema the server applies.
    pub async fn submit(&mut self, draft: TodoDraft) -> Result<(), ApiError> {
        draft.validate()?;

        match self.mode {
            Mode::Create => {
                let todo = self.service.create(&draft).await?;
                self.todos.push(todo);
            }
            Mode::Edit(id) => {
                let todo = self.service.update(id, &draft).await?;

                if let Some(entry) = self.todos.iter_mut().find(|entry| entry.id == id) {
                    *entry = todo;
                }

                self.mode = Mode::Create;
            }
        }

        Ok(())
    }

    /// Flips completion on the matching entry. Available in either mode;
    /// the mode is unchanged.
    pub async fn toggle(&mut self, id: Uuid) -> Result<(), ApiError> {
        let updated = self.service.toggle(id).await?;

        if let Some(entry) = self.todos.iter_mut().find(|entry| entry.id == id) {
            *entry = updated;
        }

        Ok(())
    }

    /// Removes the record and its local entry. Available in either mode;
    /// the mode is unchanged.
    pub async fn delete(&mut self, id: Uuid) -> Result<(), ApiError> {
        self.service.delete(id).await?;
        self.todos.retain(|entry| entry.id != id);
        Ok(())
    }
}
