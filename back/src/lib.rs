pub mod entity;
pub mod migration;
pub mod store;
pub mod v1;

use store::TodoStore;

/// Shared server state handed to every handler.
pub struct AppState {
    pub store: TodoStore,
}
