// Middleware module - Axum middleware

pub mod auth;
pub mod cors;

pub use auth::auth_middleware;
pub use cors::preflight_middleware;
