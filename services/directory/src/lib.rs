//! User directory service: an in-memory user list mirrored to a flat JSON
//! file and exposed as a small CRUD API.

pub mod config;
pub mod directory;
pub mod error;
pub mod routes;
pub mod store;

pub use config::Config;
pub use directory::{Directory, DirectoryError};
pub use error::ApiError;
pub use routes::{build_router, AppState};
pub use store::{StoreError, UserStore};
