//! Dioxus UI components for nuptial.
//!
//! Provides the page header with language and theme controls, the
//! floating decorations, the photo upload panel, and the toast stack.

mod decorations;
mod header;
mod toasts;
mod upload;

pub use decorations::Decorations;
pub use header::Header;
pub use toasts::Toasts;
pub use upload::PhotoUpload;
