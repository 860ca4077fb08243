//! Toast overlay for the notification center.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdX;
use gloo_timers::future::TimeoutFuture;
use nuptial_core::{Notification, NotificationCenter, NotificationId};

use crate::context::UiContext;

/// Renders the visible notifications of `center`, newest last.
#[component]
pub fn Toasts(ui: UiContext, center: Signal<NotificationCenter>) -> Element {
    let visible: Vec<Notification> = center.read().visible().cloned().collect();

    rsx! {
        div { class: "toasts", role: "status", aria_live: "polite",
            for notification in visible {
                Toast {
                    key: "{notification.id()}",
                    ui,
                    center,
                    notification,
                }
            }
        }
    }
}

/// One toast. Its auto-dismiss timer starts when it becomes visible and
/// is dropped with the component.
#[component]
fn Toast(ui: UiContext, center: Signal<NotificationCenter>, notification: Notification) -> Element {
    let id = notification.id();
    let severity = notification.severity();

    use_hook(move || {
        if let Some(after) = severity.auto_dismiss_after() {
            spawn(async move {
                TimeoutFuture::new(u32::try_from(after.as_millis()).unwrap_or(u32::MAX)).await;
                dismiss(center, id);
            });
        }
    });

    let title = ui.t_with(notification.title_key(), notification.args());
    let body = notification
        .body_key()
        .map(|key| ui.t_with(key, notification.args()));

    rsx! {
        div { class: "toast {severity.css_class()}",
            div { class: "toast-text",
                p { class: "toast-title", "{title}" }
                if let Some(body) = body {
                    p { class: "toast-body", "{body}" }
                }
            }
            button {
                class: "toast-close",
                aria_label: ui.t("notification-dismiss"),
                onclick: move |_| {
                    let mut center = center;
                    center.write().dismiss(id);
                },
                Icon { icon: LdX, width: 16, height: 16 }
            }
        }
    }
}

fn dismiss(mut center: Signal<NotificationCenter>, id: NotificationId) {
    if center.write().dismiss(id) {
        tracing::debug!(?id, "notification auto-dismissed");
    }
}
