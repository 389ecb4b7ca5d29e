// API endpoint handlers

pub mod forward;
pub mod users;
