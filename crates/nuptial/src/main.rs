use std::rc::Rc;

use dioxus::prelude::*;
use nuptial_core::{AppConfig, Catalog, NotificationCenter, Translator};
use nuptial_io::theme::{set_document_language, system_theme};
use nuptial_io::{BrowserEndpoint, Decorations, Header, PhotoUpload, Toasts, UiContext};

fn main() {
    dioxus::launch(app);
}

/// Configuration baked in at build time.
///
/// `NUPTIAL_CONFIG` holds a full JSON configuration;
/// `NUPTIAL_WEBHOOK_URL` only overrides the webhook URL. An invalid
/// value is logged and the defaults are used instead.
fn load_config() -> AppConfig {
    let config_json = option_env!("NUPTIAL_CONFIG");
    let webhook_url = option_env!("NUPTIAL_WEBHOOK_URL");
    match AppConfig::from_build_env(config_json, webhook_url) {
        Ok(config) => {
            tracing::info!(
                endpoint = ?config.endpoint,
                timeout_ms = config.submit_timeout_ms,
                "configuration loaded"
            );
            config
        }
        Err(e) => {
            tracing::error!(error = %e, "invalid build configuration, using defaults");
            AppConfig::default()
        }
    }
}

/// Root application component.
///
/// Owns the theme, translator and notification state and composes the
/// page around the upload panel.
fn app() -> Element {
    let config = use_hook(|| Rc::new(load_config()));
    let endpoint = use_hook(|| Rc::new(BrowserEndpoint::from_config(&config.endpoint)));
    let catalog = use_hook(|| Rc::new(Catalog::load()));

    let language = config.language;
    let initial_theme = config.theme;
    let translator = use_signal(move || Translator::new(catalog, language));
    let theme = use_signal(move || initial_theme.unwrap_or_else(system_theme));
    let notifications = use_signal(NotificationCenter::new);
    let ui = UiContext { translator, theme };

    use_hook(move || set_document_language(language));

    rsx! {
        style { dangerous_inner_html: include_str!("../assets/style.css") }

        div { class: "page {ui.theme().css_class()}",
            Decorations { theme: ui.theme() }
            Header { ui }

            main { class: "content",
                h2 { class: "headline", {ui.t("upload-title")} }
                PhotoUpload {
                    ui,
                    endpoint,
                    timeout: config.submit_timeout(),
                    notifications,
                }
            }

            Toasts { ui, center: notifications }
        }
    }
}
