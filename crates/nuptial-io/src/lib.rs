//! nuptial-io: Browser I/O and Dioxus component library.
//!
//! Sends upload batches with `fetch` (multipart webhook or per-object
//! storage requests), manages thumbnail object URLs, reads picked and
//! dropped files, and provides the UI components of the nuptial page.

pub mod components;
pub mod context;
pub mod endpoint;
pub mod fetch;
pub mod intake;
pub mod preview;
pub mod storage;
pub mod submit;
pub mod theme;
pub mod webhook;

pub use components::{Decorations, Header, PhotoUpload, Toasts};
pub use context::UiContext;
pub use endpoint::BrowserEndpoint;
