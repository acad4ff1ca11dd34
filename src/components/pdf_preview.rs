//! PDF library preview: browse grouped PDFs, read one in an embedded
//! frame (the browser's native PDF viewer), or download it.

use crate::api::{CategorySection, LibraryClient, PdfFile};
use crate::components::Icon;
use crate::download::{spawn_download, DownloadPhase};
use crate::utils::download_file_name;
use dioxus::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PdfTab {
    Browse,
    Read,
}

#[component]
pub fn PdfPreview(filter_category_ids: ReadOnlySignal<Option<Vec<u64>>>) -> Element {
    let sections = use_resource(move || {
        let filter = filter_category_ids();
        async move {
            LibraryClient::default()
                .get_pdf_sections(filter.as_deref())
                .await
        }
    });

    let mut active_tab = use_signal(|| PdfTab::Browse);
    let reading = use_signal(|| None::<PdfFile>);
    let mut expanded_overrides = use_signal(HashMap::<u64, bool>::new);
    let download_status = use_signal(|| None::<(u64, DownloadPhase)>);

    use_effect(move || {
        let _ = sections();
        expanded_overrides.set(HashMap::new());
    });

    let on_read = {
        let mut reading = reading;
        move |pdf: PdfFile| {
            reading.set(Some(pdf));
            active_tab.set(PdfTab::Read);
        }
    };

    let browse_body = match sections() {
        None => rsx! {
            div { class: "loading-wrap",
                Icon { name: "loader".to_string(), class: "icon-lg".to_string() }
            }
        },
        Some(list) if list.is_empty() => rsx! {
            p { class: "empty-note", "Tidak ada PDF yang tersedia." }
        },
        Some(list) => rsx! {
            div { class: "category-list",
                for section in list {
                    PdfCategorySection {
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
                        on_read,
                        section,
                        reading,
                        download_status,
                    }
                }
            }
        },
    };

    let reader_body = match reading() {
        Some(pdf) => {
            let category_name = sections()
                .unwrap_or_default()
                .iter()
                .find(|section| section.id == pdf.category_id)
                .map(|section| section.name.clone())
                .unwrap_or_default();
            rsx! {
                div { class: "pdf-reader",
                    div { class: "pdf-reader-header",
                        h2 { class: "pdf-reader-title", "{pdf.title}" }
                        span { class: "pdf-reader-category", "{category_name}" }
                    }
                    iframe {
                        class: "pdf-frame",
                        src: "{pdf.file_url}#toolbar=1&navpanes=1&scrollbar=1&view=FitH",
                        title: "PDF Viewer - {pdf.title}",
                    }
                }
            }
        }
        None => rsx! {
            div { class: "pdf-reader-empty",
                p { class: "pdf-reader-empty-title", "Tidak ada PDF yang dipilih" }
                p { class: "pdf-reader-empty-hint", "Silakan pilih PDF untuk dibaca dari daftar" }
            }
        },
    };

    let has_selection = reading.read().is_some();
    let tab_body = match active_tab() {
        PdfTab::Browse => browse_body,
        PdfTab::Read => reader_body,
    };

    rsx! {
        div { class: "preview-panel",
            div { class: "tab-bar secondary",
                button {
                    class: if active_tab() == PdfTab::Browse { "tab-button active" } else { "tab-button" },
                    onclick: move |_| active_tab.set(PdfTab::Browse),
                    "Browse PDFs"
                }
                button {
                    class: if active_tab() == PdfTab::Read { "tab-button active" } else { "tab-button" },
                    disabled: !has_selection,
                    onclick: move |_| active_tab.set(PdfTab::Read),
                    "BACA PDF"
                }
            }
            {tab_body}
        }
    }
}

#[component]
fn PdfCategorySection(
    section: CategorySection<PdfFile>,
    expanded: bool,
    on_toggle: EventHandler<u64>,
    on_read: EventHandler<PdfFile>,
    reading: Signal<Option<PdfFile>>,
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
                        PdfItemRow {
                            key: "{item.id}",
                            item,
                            on_read,
                            reading,
                            download_status,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn PdfItemRow(
    item: PdfFile,
    on_read: EventHandler<PdfFile>,
    reading: Signal<Option<PdfFile>>,
    download_status: Signal<Option<(u64, DownloadPhase)>>,
) -> Element {
    let is_reading = reading
        .read()
        .as_ref()
        .map(|pdf| pdf.id == item.id)
        .unwrap_or(false);
    let status = *download_status.read();

    let on_open = {
        let item = item.clone();
        move |_| on_read.call(item.clone())
    };
    let on_download = {
        let item = item.clone();
        move |_| {
            spawn_download(
                download_status,
                item.id,
                item.file_url.clone(),
                download_file_name(&item.title, "pdf"),
                5_000,
                true,
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

    let cover = match item.cover_url.clone() {
        Some(cover_url) => rsx! {
            img { class: "pdf-cover", src: "{cover_url}", alt: "" }
        },
        None => rsx! {},
    };

    rsx! {
        div { class: if is_reading { "media-row active" } else { "media-row" },
            div { class: "media-row-main",
                {cover}
                span { class: "media-title", "{item.title}" }
                {download_indicator}
                button {
                    class: "read-button",
                    aria_label: "Read",
                    onclick: on_open,
                    Icon { name: "book-open".to_string(), class: "icon-sm".to_string() }
                }
                button {
                    class: "download-button",
                    aria_label: "Download",
                    onclick: on_download,
                    Icon { name: "download".to_string(), class: "icon-sm".to_string() }
                }
            }
        }
    }
}
