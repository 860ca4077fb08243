//! Browser-side theme and language plumbing.

use nuptial_core::{Language, Theme};

/// The theme the operating system prefers, via
/// `prefers-color-scheme`. Falls back to [`Theme::Light`].
#[must_use]
pub fn system_theme() -> Theme {
    let dark = web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .is_some_and(|query| query.matches());
    if dark { Theme::Dark } else { Theme::Light }
}

/// Set the `lang` attribute of the root `<html>` element.
pub fn set_document_language(language: Language) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root
        && let Err(e) = root.set_attribute("lang", language.code())
    {
        tracing::warn!(error = ?e, "failed to set document language");
    }
}
