//! Localization using Fluent.
//!
//! One `.ftl` resource per supported language is embedded at compile
//! time. [`Catalog`] holds the parsed bundles and is shared; a
//! [`Translator`] pairs the catalog with the active language and is what
//! components receive.
//!
//! Lookups never fail: a key missing from the active language (or one
//! that formats to nothing) comes back verbatim.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use serde::{Deserialize, Serialize};
use tracing::warn;
use unic_langid::{LanguageIdentifier, langid};

use crate::notification::MessageArg;

/// The closed set of UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Tr,
}

impl Language {
    /// All languages, in switcher order.
    pub const ALL: [Self; 2] = [Self::En, Self::Tr];

    /// Two-letter language code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Tr => "tr",
        }
    }

    /// Parse a language code (`en`, `TR`, `tr-TR`, ...).
    ///
    /// Only the primary subtag is considered. Returns `None` for
    /// unsupported languages.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code.trim().split(['-', '_']).next().unwrap_or_default();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(primary))
    }

    /// Label for the switcher button.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Tr => "TR",
        }
    }

    fn langid(self) -> LanguageIdentifier {
        match self {
            Self::En => langid!("en"),
            Self::Tr => langid!("tr"),
        }
    }

    const fn source(self) -> &'static str {
        match self {
            Self::En => include_str!("../i18n/en.ftl"),
            Self::Tr => include_str!("../i18n/tr.ftl"),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Parsed translation tables for every [`Language`].
pub struct Catalog {
    bundles: HashMap<Language, FluentBundle<FluentResource>>,
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("languages", &self.bundles.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Catalog {
    /// Parse the embedded resources.
    ///
    /// Syntax errors are logged; the entries that did parse are kept.
    #[must_use]
    pub fn load() -> Self {
        let bundles = Language::ALL
            .into_iter()
            .map(|lang| (lang, build_bundle(lang, lang.source())))
            .collect();
        Self { bundles }
    }

    /// Format `key` in `language`, or `None` if there is no such message.
    fn format(
        &self,
        language: Language,
        key: &str,
        args: Option<&FluentArgs<'_>>,
    ) -> Option<String> {
        let bundle = self.bundles.get(&language)?;
        let pattern = bundle.get_message(key)?.value()?;
        let mut errors = Vec::new();
        let value = bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            warn!(%language, key, ?errors, "translation formatted with errors");
        }
        Some(value.into_owned()).filter(|s| !s.is_empty())
    }
}

fn build_bundle(language: Language, source: &str) -> FluentBundle<FluentResource> {
    let resource = match FluentResource::try_new(source.to_owned()) {
        Ok(resource) => resource,
        Err((partial, errors)) => {
            warn!(%language, ?errors, "translation resource has syntax errors");
            partial
        }
    };
    let mut bundle = FluentBundle::new(vec![language.langid()]);
    // Toasts and buttons are plain text; bidi isolation marks would show
    // up as stray characters in some fonts.
    bundle.set_use_isolating(false);
    if let Err(errors) = bundle.add_resource(resource) {
        warn!(%language, ?errors, "duplicate translation entries");
    }
    bundle
}

/// The translation provider: a shared [`Catalog`] plus the active language.
#[derive(Debug, Clone)]
pub struct Translator {
    catalog: Rc<Catalog>,
    language: Language,
}

impl PartialEq for Translator {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.catalog, &other.catalog) && self.language == other.language
    }
}

impl Translator {
    #[must_use]
    pub const fn new(catalog: Rc<Catalog>, language: Language) -> Self {
        Self { catalog, language }
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Switch the active table.
    pub const fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Switch by language code. Unsupported codes are ignored and
    /// return `false`.
    pub fn set_language_code(&mut self, code: &str) -> bool {
        match Language::from_code(code) {
            Some(language) => {
                self.language = language;
                true
            }
            None => {
                warn!(code, "ignoring unsupported language code");
                false
            }
        }
    }

    /// The active language's text for `key`, or `key` itself.
    #[must_use]
    pub fn lookup(&self, key: &str) -> String {
        self.catalog
            .format(self.language, key, None)
            .unwrap_or_else(|| key.to_owned())
    }

    /// Like [`lookup`](Self::lookup), interpolating `args`.
    #[must_use]
    pub fn lookup_with<N: AsRef<str>>(&self, key: &str, args: &[(N, MessageArg)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            let value = match value {
                MessageArg::Count(n) => FluentValue::from(*n),
                MessageArg::Text(s) => FluentValue::from(s.as_str()),
            };
            fluent_args.set(name.as_ref(), value);
        }
        self.catalog
            .format(self.language, key, Some(&fluent_args))
            .unwrap_or_else(|| key.to_owned())
    }
}
