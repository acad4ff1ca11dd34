//! REST client and data models for the media library backend.

mod library;
mod models;

pub use library::*;
pub use models::*;
