mod auth;
mod booking;
pub mod client;
mod rental;
pub mod types;

pub use client::*;
pub use types::*;
