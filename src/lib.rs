pub mod actions;
pub mod api;
pub mod config;
pub mod errors;
pub mod forms;
pub mod models;
pub mod state;
pub mod storage;
pub mod ui;

pub use actions::App;
pub use api::ApiClient;
pub use config::{ClientConfig, Delays};
pub use errors::ApiError;
pub use state::{Route, UiState};
pub use storage::LocalStorage;
