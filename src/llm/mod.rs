pub mod client;
pub mod config;
pub mod types;

pub use client::*;
pub use config::*;
pub use types::*;
