pub mod config;
pub mod logger;
pub mod oauth;

pub use config::*;
pub use logger::*;
