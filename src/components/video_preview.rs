//! Video library preview: grouped list on one side, the selected video
//! playing in a native player on the other.

use crate::api::{CategorySection, LibraryClient, VideoFile};
use crate::components::Icon;
use dioxus::prelude::*;

#[component]
pub fn VideoPreview(filter_category_ids: ReadOnlySignal<Option<Vec<u64>>>) -> Element {
    let sections = use_resource(move || {
        let filter = filter_category_ids();
        async move {
            LibraryClient::default()
                .get_video_sections(filter.as_deref())
                .await
        }
    });

    let selected = use_signal(|| None::<VideoFile>);

    let body = match sections() {
        None => rsx! {
            div { class: "loading-wrap",
                Icon { name: "loader".to_string(), class: "icon-lg".to_string() }
            }
        },
        Some(list) if list.is_empty() => rsx! {
            p { class: "empty-note", "Tidak ada video yang tersedia." }
        },
        Some(list) => rsx! {
            div { class: "video-layout",
                div { class: "category-list",
                    for section in list {
                        VideoCategorySection { key: "{section.id}", section, selected }
                    }
                }
                VideoPlayerPanel { selected }
            }
        },
    };

    rsx! {
        div { class: "preview-panel", {body} }
    }
}

#[component]
fn VideoCategorySection(
    section: CategorySection<VideoFile>,
    selected: Signal<Option<VideoFile>>,
) -> Element {
    let mut selected = selected;

    rsx! {
        section { class: "category-section",
            h3 { class: "category-name", "{section.name}" }
            div { class: "item-list",
                for item in section.items.clone() {
                    button {
                        key: "{item.id}",
                        class: if selected.read().as_ref().map(|v| v.id) == Some(item.id) { "media-row active" } else { "media-row" },
                        onclick: {
                            let item = item.clone();
                            move |_| selected.set(Some(item.clone()))
                        },
                        Icon { name: "video".to_string(), class: "icon-sm".to_string() }
                        span { class: "media-title", "{item.title}" }
                    }
                }
            }
        }
    }
}

#[component]
fn VideoPlayerPanel(selected: Signal<Option<VideoFile>>) -> Element {
    let body = match selected() {
        Some(video) => {
            let description = video.description.clone().unwrap_or_default();
            rsx! {
                div { class: "video-player",
                    h2 { class: "video-title", "{video.title}" }
                    video {
                        class: "video-element",
                        src: "{video.file_url}",
                        controls: true,
                    }
                    if !description.is_empty() {
                        p { class: "video-description", "{description}" }
                    }
                }
            }
        }
        None => rsx! {
            div { class: "video-player-empty",
                p { "Pilih video untuk diputar" }
            }
        },
    };

    rsx! {
        div { class: "video-player-panel", {body} }
    }
}
