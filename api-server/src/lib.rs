pub mod config;
pub mod error;
pub mod pipeline;
pub mod routes;
pub mod state;
pub mod tasks;

pub use config::Settings;
pub use routes::{api_router, app};
pub use state::AppState;
