//! Floating butterflies, flowers and hearts behind the page content.

use dioxus::prelude::*;
use nuptial_core::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Butterfly,
    Flower,
    Heart,
}

/// Where one decoration sits and how it moves.
#[derive(Debug, Clone, Copy)]
struct Placement {
    kind: Kind,
    /// Percent of the viewport width from the left edge.
    left: u8,
    /// Percent of the viewport height from the top edge.
    top: u8,
    /// Edge length in pixels.
    size: u16,
    delay_s: f32,
    duration_s: f32,
}

const fn place(
    kind: Kind,
    left: u8,
    top: u8,
    size: u16,
    delay_s: f32,
    duration_s: f32,
) -> Placement {
    Placement {
        kind,
        left,
        top,
        size,
        delay_s,
        duration_s,
    }
}

impl Placement {
    /// Inline style positioning and timing this decoration.
    fn style(&self) -> String {
        format!(
            "left: {}%; top: {}%; width: {size}px; height: {size}px; \
             animation-delay: {}s; animation-duration: {}s;",
            self.left,
            self.top,
            self.delay_s,
            self.duration_s,
            size = self.size,
        )
    }
}

const HEART_PATH: &str =
    "M32 56 C10 40 4 28 10 18 C16 8 28 10 32 20 C36 10 48 8 54 18 C60 28 54 40 32 56 Z";

const PLACEMENTS: &[Placement] = &[
    place(Kind::Butterfly, 6, 12, 44, 0.0, 9.0),
    place(Kind::Flower, 88, 8, 52, 1.5, 12.0),
    place(Kind::Heart, 14, 68, 28, 0.8, 7.0),
    place(Kind::Butterfly, 80, 55, 36, 2.4, 10.0),
    place(Kind::Flower, 4, 88, 40, 3.1, 11.0),
    place(Kind::Heart, 92, 82, 24, 1.2, 8.0),
    place(Kind::Heart, 48, 4, 20, 4.0, 9.5),
    place(Kind::Butterfly, 62, 90, 30, 0.4, 13.0),
];

/// Fill colors for one theme: primary, secondary, accent.
struct Palette {
    primary: &'static str,
    secondary: &'static str,
    accent: &'static str,
}

const fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            primary: "#f4a6b8",
            secondary: "#f9d27a",
            accent: "#c9a0dc",
        },
        Theme::Dark => Palette {
            primary: "#b0587a",
            secondary: "#c8a24a",
            accent: "#7a5a9c",
        },
    }
}

/// Decorative layer. Ignores pointer events.
#[component]
pub fn Decorations(theme: Theme) -> Element {
    let colors = palette(theme);

    rsx! {
        div { class: "decorations", aria_hidden: "true",
            for (i, p) in PLACEMENTS.iter().enumerate() {
                div {
                    key: "{i}",
                    class: "decoration",
                    style: p.style(),
                    match p.kind {
                        Kind::Butterfly => rsx! {
                            svg { view_box: "0 0 64 64", width: "100%", height: "100%",
                                path {
                                    d: "M32 32 C20 8 2 12 8 30 C12 42 26 40 32 32 Z",
                                    fill: colors.primary,
                                }
                                path {
                                    d: "M32 32 C44 8 62 12 56 30 C52 42 38 40 32 32 Z",
                                    fill: colors.primary,
                                }
                                path {
                                    d: "M32 32 C24 44 14 58 24 56 C30 54 32 44 32 32 Z",
                                    fill: colors.accent,
                                }
                                path {
                                    d: "M32 32 C40 44 50 58 40 56 C34 54 32 44 32 32 Z",
                                    fill: colors.accent,
                                }
                            }
                        },
                        Kind::Flower => rsx! {
                            svg { view_box: "0 0 64 64", width: "100%", height: "100%",
                                for angle in [0, 72, 144, 216, 288] {
                                    ellipse {
                                        key: "{angle}",
                                        cx: "32",
                                        cy: "16",
                                        rx: "9",
                                        ry: "15",
                                        fill: colors.primary,
                                        transform: "rotate({angle} 32 32)",
                                    }
                                }
                                circle { cx: "32", cy: "32", r: "8", fill: colors.secondary }
                            }
                        },
                        Kind::Heart => rsx! {
                            svg { view_box: "0 0 64 64", width: "100%", height: "100%",
                                path {
                                    d: HEART_PATH,
                                    fill: colors.accent,
                                }
                            }
                        },
                    }
                }
            }
        }
    }
}
