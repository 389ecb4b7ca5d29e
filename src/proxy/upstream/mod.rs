pub mod client;

pub use client::{UpstreamBody, UpstreamClient};
