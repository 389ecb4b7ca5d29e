// proxy module - authenticating gateway in front of the downstream API

pub mod config;
pub mod server;
pub mod token_manager;

pub mod common; // Response mapping and shared helpers
pub mod handlers; // API endpoint handlers
pub mod middleware; // Axum middleware
pub mod routes; // Declarative route table
pub mod upstream; // Upstream client

#[cfg(test)]
pub(crate) mod testing;

pub use config::ProxyConfig;
pub use server::{AppState, AxumServer};
pub use token_manager::TokenManager;
