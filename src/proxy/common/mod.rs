pub mod response;
pub mod utils;
