//! Client for the user directory service: HTTP calls, the screen state they
//! drive, and a terminal front-end over both.

pub mod api;
pub mod config;
pub mod error;
pub mod terminal;
pub mod view;

pub use api::{DirectoryApi, HttpDirectoryApi};
pub use config::Config;
pub use error::ClientError;
pub use view::{DirectoryView, Form};
