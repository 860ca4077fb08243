//! Theme and language state shared by every component.

use dioxus::prelude::*;
use nuptial_core::{Language, MessageArg, Theme, Translator};

use crate::theme::set_document_language;

/// Handles to the page-wide theme and translator.
///
/// Created once by the root component and passed to each component as
/// a prop. Both fields are signals, so the value is `Copy` and reading
/// through it subscribes the calling component.
#[derive(Clone, Copy, PartialEq)]
pub struct UiContext {
    pub translator: Signal<Translator>,
    pub theme: Signal<Theme>,
}

impl UiContext {
    /// Translate `key` in the active language.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.translator.read().lookup(key)
    }

    /// Translate `key` with named arguments.
    #[must_use]
    pub fn t_with<N: AsRef<str>>(&self, key: &str, args: &[(N, MessageArg)]) -> String {
        self.translator.read().lookup_with(key, args)
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.translator.read().language()
    }

    pub fn set_language(self, language: Language) {
        let mut translator = self.translator;
        if translator.peek().language() == language {
            return;
        }
        translator.write().set_language(language);
        set_document_language(language);
        tracing::debug!(language = language.code(), "language switched");
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        *self.theme.read()
    }

    pub fn toggle_theme(self) {
        let mut theme = self.theme;
        theme.write().toggle();
    }
}
