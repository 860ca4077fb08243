//! Photo upload panel: drop zone, file picker, previews and submit.

use std::rc::Rc;
use std::time::Duration;

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdImagePlus, LdUpload, LdX};
use nuptial_core::{NotificationCenter, UploadWorkflow};
use tracing::debug;

use crate::context::UiContext;
use crate::endpoint::BrowserEndpoint;
use crate::intake::read_candidates;
use crate::preview::PreviewUrls;
use crate::submit::start_submission;

/// Props for the [`PhotoUpload`] component.
#[derive(Props, Clone, PartialEq)]
pub struct PhotoUploadProps {
    ui: UiContext,
    /// Where submitted batches go.
    endpoint: Rc<BrowserEndpoint>,
    /// Upper bound on one submission.
    timeout: Duration,
    /// Receives the outcome notification of each submission.
    notifications: Signal<NotificationCenter>,
}

/// Lets a guest pick or drop photos, review them, and submit them.
///
/// Non-image files are ignored. The staged list is kept when a
/// submission fails so the guest can retry.
#[component]
pub fn PhotoUpload(props: PhotoUploadProps) -> Element {
    let PhotoUploadProps {
        ui,
        endpoint,
        timeout,
        notifications,
    } = props;

    let mut workflow = use_signal(UploadWorkflow::new);
    let mut previews = use_signal(PreviewUrls::default);
    let mut dragging = use_signal(|| false);
    // Bumped to remount the file input, clearing its selection.
    let mut input_generation = use_signal(|| 0u64);

    use_effect(move || {
        previews.write().sync(workflow.read().files());
    });

    let stage = move |files: Vec<FileData>| async move {
        let candidates = read_candidates(files).await;
        let offered = candidates.len();
        let staged = workflow.write().stage_files(candidates);
        debug!(offered, staged, "files offered for staging");
    };

    // The input is remounted after every pick so choosing the same
    // file again still fires `change`.
    let handle_files = move |evt: FormEvent| async move {
        let files = evt.files();
        input_generation += 1;
        stage(files).await;
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        dragging.set(false);
        stage(evt.files()).await;
    };

    let submit = move |_| {
        start_submission(workflow, Rc::clone(&endpoint), timeout, move |resolution| {
            if resolution.resets_input() {
                let mut generation = input_generation;
                generation += 1;
            }
            let mut notifications = notifications;
            notifications.write().push(resolution.notification);
        });
    };

    let submitting = workflow.read().is_submitting();
    let can_submit = workflow.read().can_submit();
    let items: Vec<_> = {
        let previews = previews.read();
        workflow
            .read()
            .files()
            .iter()
            .map(|file| (file.clone(), previews.get(file.id()).map(str::to_owned)))
            .collect()
    };
    let preview_title = preview_heading(&ui.t("upload-preview"), items.len());
    let zone_class = if dragging() { "dropzone dragging" } else { "dropzone" };

    rsx! {
        section { class: "upload-card",
            div {
                class: zone_class,
                ondragover: move |evt| {
                    evt.prevent_default();
                    dragging.set(true);
                },
                ondragleave: move |_| dragging.set(false),
                ondrop: handle_drop,

                span { class: "dropzone-icon",
                    Icon { icon: LdImagePlus, width: 40, height: 40 }
                }
                p { class: "dropzone-text", {ui.t("upload-dragdrop")} }
                p { class: "dropzone-or", {ui.t("upload-or")} }
                label { class: "btn btn-secondary",
                    FileInput { generation: input_generation(), onchange: handle_files }
                    {ui.t("upload-choose")}
                }
            }

            if !items.is_empty() {
                div { class: "preview",
                    h2 { class: "preview-title", "{preview_title}" }
                    ul { class: "preview-grid",
                        for (file, url) in items {
                            li { key: "{file.id()}", class: "preview-item",
                                if let Some(url) = url {
                                    img { src: "{url}", alt: "{file.name()}" }
                                } else {
                                    div { class: "preview-placeholder" }
                                }
                                span { class: "preview-name", "{file.name()}" }
                                button {
                                    class: "preview-remove",
                                    aria_label: ui.t("upload-remove"),
                                    onclick: {
                                        let id = file.id();
                                        move |_| {
                                            workflow.write().unstage_id(id);
                                        }
                                    },
                                    Icon { icon: LdX, width: 14, height: 14 }
                                }
                            }
                        }
                    }
                }
            }

            button {
                class: "btn btn-primary submit",
                disabled: !can_submit,
                onclick: submit,
                if submitting {
                    span { class: "spinner", aria_hidden: "true" }
                    {ui.t("upload-uploading")}
                } else {
                    Icon { icon: LdUpload, width: 18, height: 18 }
                    {ui.t("upload-submit")}
                }
            }
        }
    }
}

/// Preview heading with the number of staged photos, e.g. "Preview (3)".
fn preview_heading(label: &str, count: usize) -> String {
    format!("{label} ({count})")
}

/// The hidden multi-file picker.
///
/// Keyed by `generation` in a position Dioxus diffs by key, so a new
/// generation replaces the element and drops its selection.
#[component]
fn FileInput(generation: u64, onchange: EventHandler<FormEvent>) -> Element {
    rsx! {
        for g in [generation] {
            input {
                key: "{g}",
                r#type: "file",
                accept: "image/*",
                multiple: true,
                class: "visually-hidden",
                onchange: move |evt| onchange.call(evt),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use dioxus::core::{Mutation, ScopeId, VirtualDom};

    use super::*;

    fn picker(generation: Rc<Cell<u64>>) -> Element {
        rsx! {
            FileInput { generation: generation.get(), onchange: move |_: FormEvent| {} }
        }
    }

    fn rerender(dom: &mut VirtualDom) -> Vec<Mutation> {
        dom.mark_dirty(ScopeId::APP);
        dom.render_immediate_to_vec().edits
    }

    fn replaces_node(edits: &[Mutation]) -> bool {
        edits.iter().any(|e| matches!(e, Mutation::ReplaceWith { .. }))
    }

    #[test]
    fn preview_heading_shows_the_count() {
        assert_eq!(preview_heading("Preview", 0), "Preview (0)");
        assert_eq!(preview_heading("Vorschau", 12), "Vorschau (12)");
    }

    #[test]
    fn new_generation_replaces_the_input() {
        let generation = Rc::new(Cell::new(0));
        let mut dom = VirtualDom::new_with_props(picker, Rc::clone(&generation));
        dom.rebuild_in_place();

        assert!(!replaces_node(&rerender(&mut dom)));

        generation.set(1);
        assert!(replaces_node(&rerender(&mut dom)));

        generation.set(2);
        assert!(replaces_node(&rerender(&mut dom)));
    }
}
