// Core client functionality for the Mars data analyzer:
// - Backend client and the trait the views are written against
// - Request/response data structures
// - View state for the analysis and ingest + chat screens
// - Configuration loading
// - Shared error types

pub mod client;
pub use client::*;

pub mod types;
pub use types::*;

pub mod view;
pub use view::*;

pub mod config;
pub use config::*;

pub mod errors;
pub use errors::*;
