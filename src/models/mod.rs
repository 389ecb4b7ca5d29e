pub mod config;
pub mod token;

pub use config::AppConfig;
pub use token::BearerToken;
