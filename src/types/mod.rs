//! Shared types for DRY compliance.

pub mod patch;
mod response;
pub mod time;

pub use response::MessageResponse;
