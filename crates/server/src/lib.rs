//! manualgen HTTP service
//!
//! Accepts cover requests, fills the template on a blocking worker, writes the
//! result to the output directory and serves it back by name.

pub mod config;
pub mod errors;
pub mod routes;
pub mod state;
pub mod store;

pub use config::Config;
pub use errors::AppError;
pub use routes::build_router;
pub use state::AppState;
pub use store::{OutputStore, TempDirStore};
