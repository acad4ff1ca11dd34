//! The components module contains all shared components for our app.

mod app;
mod app_view;
mod audio_preview;
mod icons;
mod pdf_preview;
mod video_preview;

pub use app::*;
pub use app_view::*;
pub use audio_preview::*;
pub use icons::*;
pub use pdf_preview::*;
pub use video_preview::*;
