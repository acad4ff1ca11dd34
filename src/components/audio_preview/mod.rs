//! Audio library preview: media grouped by category, with an inline
//! playback session that keeps at most one item audible.

mod controls;
pub(crate) mod session;
mod web_audio;

use crate::api::{AudioFile, CategorySection, LibraryClient};
use crate::components::Icon;
use crate::download::{spawn_download, DownloadPhase};
use crate::utils::{download_file_name, sleep_ms};
use controls::PlaybackControls;
use dioxus::logger::tracing::error;
use dioxus::prelude::*;
use session::{AudioSession, PlayRequest, Tick, POLL_INTERVAL_MS};
use std::collections::HashMap;
use web_audio::PlatformHandle;

pub(crate) type SharedSession = Signal<AudioSession<PlatformHandle>>;

#[component]
pub fn AudioPreview(filter_category_ids: ReadOnlySignal<Option<Vec<u64>>>) -> Element {
    let sections = use_resource(move || {
        let filter = filter_category_ids();
        async move {
            LibraryClient::default()
                .get_audio_sections(filter.as_deref())
                .await
        }
    });

    let session: SharedSession = use_signal(AudioSession::new);
    let mut expanded_overrides = use_signal(HashMap::<u64, bool>::new);
    let download_status = use_signal(|| None::<(u64, DownloadPhase)>);

    // A fresh fetch resets every category back to expanded.
    use_effect(move || {
        let _ = sections();
        expanded_overrides.set(HashMap::new());
    });

    let body = match sections() {
        None => rsx! {
            div { class: "loading-wrap",
                Icon { name: "loader".to_string(), class: "icon-lg".to_string() }
            }
        },
        Some(list) if list.is_empty() => rsx! {
            p { class: "empty-note", "Tidak ada audio yang tersedia." }
        },
        Some(list) => rsx! {
            div { class: "category-list",
                for section in list {
                    AudioCategorySection {
                        key: "{section.id}",
                        expanded: expanded_overrides.read().get(&section.id).copied().unwrap_or(true),
                        on_toggle: move |category_id: u64| {
                            let expanded = expanded_overrides
                                .peek()
                                .get(&category_id)
                                .copied()
                                .unwrap_or(true);
                            expanded_overrides.write().insert(category_id, !expanded);
                        },
                        section,
                        session,
                        download_status,
                    }
                }
            }
        },
    };

    rsx! {
        div { class: "preview-panel", {body} }
    }
}

#[component]
fn AudioCategorySection(
    section: CategorySection<AudioFile>,
    expanded: bool,
    on_toggle: EventHandler<u64>,
    session: SharedSession,
    download_status: Signal<Option<(u64, DownloadPhase)>>,
) -> Element {
    let category_id = section.id;
    let description = section.description.clone().unwrap_or_default();
    let chevron = if expanded {
        "chevron-down"
    } else {
        "chevron-right"
    };

    rsx! {
        section { class: "category-section",
            button {
                class: "category-header",
                onclick: move |_| on_toggle.call(category_id),
                Icon { name: chevron.to_string(), class: "icon-sm".to_string() }
                span { class: "category-name", "{section.name}" }
                span { class: "category-count", "{section.items.len()}" }
            }
            if !description.is_empty() {
                p { class: "category-description", "{description}" }
            }
            if expanded {
                div { class: "item-list",
                    for item in section.items.clone() {
                        AudioItemRow {
                            key: "{item.id}",
                            item,
                            session,
                            download_status,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn AudioItemRow(
    item: AudioFile,
    session: SharedSession,
    download_status: Signal<Option<(u64, DownloadPhase)>>,
) -> Element {
    let is_active = session.read().is_playing(item.id);
    let status = *download_status.read();

    let on_play = {
        let item = item.clone();
        move |_| start_playback(session, &item)
    };
    let on_download = {
        let item = item.clone();
        move |_| {
            spawn_download(
                download_status,
                item.id,
                item.file_url.clone(),
                download_file_name(&item.title, "mp3"),
                3_000,
                false,
            );
        }
    };

    let download_indicator = match status {
        Some((id, DownloadPhase::InProgress)) if id == item.id => rsx! {
            Icon { name: "loader".to_string(), class: "icon-sm download-status".to_string() }
        },
        Some((id, DownloadPhase::Completed)) if id == item.id => rsx! {
            Icon { name: "check".to_string(), class: "icon-sm download-status done".to_string() }
        },
        _ => rsx! {},
    };

    rsx! {
        div { class: if is_active { "media-row active" } else { "media-row" },
            div { class: "media-row-main",
                button {
                    class: "play-button",
                    aria_label: if is_active { "Pause" } else { "Play" },
                    onclick: on_play,
                    Icon {
                        name: (if is_active { "pause" } else { "play" }).to_string(),
                        class: "icon-sm".to_string(),
                    }
                }
                span { class: "media-title", "{item.title}" }
                {download_indicator}
                button {
                    class: "download-button",
                    aria_label: "Download",
                    onclick: on_download,
                    Icon { name: "download".to_string(), class: "icon-sm".to_string() }
                }
            }
            if is_active {
                PlaybackControls { session }
            }
        }
    }
}

/// Drive the session and, when a new item starts, spawn the progress
/// loop bound to the epoch the session handed out. A loop exits on the
/// first tick after its epoch goes stale, so switching items or
/// toggling off never leaves two loops sampling at once.
fn start_playback(mut session: SharedSession, item: &AudioFile) {
    let outcome = session
        .write()
        .request_play(item.id, &item.file_url, web_audio::open);
    match outcome {
        PlayRequest::Started { poll_epoch } => {
            spawn(async move {
                loop {
                    sleep_ms(POLL_INTERVAL_MS).await;
                    // Writing through the signal is what re-renders the
                    // progress UI each tick.
                    let tick = session.write().tick(poll_epoch);
                    match tick {
                        Tick::Progress { .. } => {}
                        Tick::Finished | Tick::Stale => break,
                    }
                }
            });
        }
        PlayRequest::Stopped => {}
        PlayRequest::Unavailable => error!("unable to start playback for \"{}\"", item.title),
    }
}
