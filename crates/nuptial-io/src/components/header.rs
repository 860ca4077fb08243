//! Page header: logo, title, language buttons and theme toggle.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdCamera, LdMoon, LdSun};
use nuptial_core::Language;

use crate::context::UiContext;

#[component]
pub fn Header(ui: UiContext) -> Element {
    let active = ui.language();
    let dark = ui.theme().is_dark();

    rsx! {
        header { class: "site-header",
            div { class: "brand",
                span { class: "brand-logo",
                    Icon { icon: LdCamera, width: 28, height: 28 }
                }
                h1 { class: "brand-title", {ui.t("wedding-album")} }
            }

            nav { class: "header-controls",
                div {
                    class: "language-switch",
                    role: "group",
                    aria_label: ui.t("language-switch"),
                    for language in Language::ALL {
                        button {
                            key: "{language.code()}",
                            class: lang_button_class(language == active),
                            aria_pressed: "{language == active}",
                            onclick: move |_| ui.set_language(language),
                            {language.label()}
                        }
                    }
                }

                button {
                    class: "theme-toggle",
                    aria_label: ui.t("theme-toggle"),
                    onclick: move |_| ui.toggle_theme(),
                    if dark {
                        Icon { icon: LdSun, width: 20, height: 20 }
                    } else {
                        Icon { icon: LdMoon, width: 20, height: 20 }
                    }
                }
            }
        }
    }
}

const fn lang_button_class(active: bool) -> &'static str {
    if active { "lang-btn active" } else { "lang-btn" }
}
