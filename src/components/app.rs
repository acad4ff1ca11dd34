use crate::components::{
    tab_icon, tab_label, AudioPreview, Icon, LibraryTab, PdfPreview, VideoPreview,
};
use dioxus::prelude::*;

/// Top-level shell: header with the three library tabs, and whichever
/// preview widget the active tab selects. Tab switching is plain signal
/// state; there are no routes in this app.
#[component]
pub fn AppShell() -> Element {
    let mut active_tab = use_signal(|| LibraryTab::Audio);

    let body = match active_tab() {
        LibraryTab::Audio => rsx! {
            AudioPreview { filter_category_ids: None }
        },
        LibraryTab::Pdf => rsx! {
            PdfPreview { filter_category_ids: None }
        },
        LibraryTab::Video => rsx! {
            VideoPreview { filter_category_ids: None }
        },
    };

    rsx! {
        div { class: "app-shell",
            header { class: "app-header",
                h1 { class: "app-title", "Pustaka Media" }
                nav { class: "tab-bar",
                    for tab in [LibraryTab::Audio, LibraryTab::Pdf, LibraryTab::Video] {
                        button {
                            key: "{tab_label(&tab)}",
                            class: if active_tab() == tab { "tab-button active" } else { "tab-button" },
                            onclick: move |_| active_tab.set(tab),
                            Icon {
                                name: tab_icon(&tab).to_string(),
                                class: "icon-sm".to_string(),
                            }
                            span { "{tab_label(&tab)}" }
                        }
                    }
                }
            }
            main { class: "app-content", {body} }
        }
    }
}
