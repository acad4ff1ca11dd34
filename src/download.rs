//! Blob-download helper: re-fetches a media file and hands the bytes to
//! the browser as a save dialog via a temporary anchor element.

use crate::api::HTTP_CLIENT;
use crate::utils::sleep_ms;
use dioxus::logger::tracing::error;
use dioxus::prelude::*;

/// Transient per-item download status shown next to the media row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadPhase {
    InProgress,
    Completed,
}

/// Run a download in the background, tracking it in `status` so the row
/// can show a spinner and then a short-lived completion mark. The
/// completion mark clears itself after `clear_after_ms`, unless another
/// download has taken over the status slot in the meantime.
pub fn spawn_download(
    status: Signal<Option<(u64, DownloadPhase)>>,
    item_id: u64,
    url: String,
    file_name: String,
    clear_after_ms: u32,
    alert_on_failure: bool,
) {
    let mut status = status;
    spawn(async move {
        status.set(Some((item_id, DownloadPhase::InProgress)));
        match save_media_file(&url, &file_name).await {
            Ok(()) => {
                status.set(Some((item_id, DownloadPhase::Completed)));
                sleep_ms(clear_after_ms).await;
                let still_ours = matches!(
                    *status.peek(),
                    Some((id, DownloadPhase::Completed)) if id == item_id
                );
                if still_ours {
                    status.set(None);
                }
            }
            Err(err) => {
                error!("error downloading {file_name}: {err}");
                status.set(None);
                if alert_on_failure {
                    alert_download_failure();
                }
            }
        }
    });
}

#[cfg(target_arch = "wasm32")]
fn alert_download_failure() {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message("Gagal mengunduh file. Silakan coba lagi.");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn alert_download_failure() {}

/// Fetch `url` and trigger a browser save dialog for the payload.
///
/// Native builds have no save-dialog plumbing and report an error string
/// instead; the web build is the supported target for downloads.
pub async fn save_media_file(url: &str, file_name: &str) -> Result<(), String> {
    let response = HTTP_CLIENT
        .get(url)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.status().is_success() {
        return Err(format!("download failed with status {}", response.status()));
    }
    let bytes = response.bytes().await.map_err(|e| e.to_string())?;
    trigger_save(&bytes, file_name)
}

#[cfg(target_arch = "wasm32")]
fn trigger_save(bytes: &[u8], file_name: &str) -> Result<(), String> {
    use wasm_bindgen::JsCast;
    use web_sys::{Blob, HtmlAnchorElement, Url};

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "document is unavailable".to_string())?;
    let body = document
        .body()
        .ok_or_else(|| "document has no body".to_string())?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let blob =
        Blob::new_with_u8_array_sequence(parts.as_ref()).map_err(|e| format!("{e:?}"))?;
    let object_url = Url::create_object_url_with_blob(&blob).map_err(|e| format!("{e:?}"))?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("{e:?}"))?
        .dyn_into()
        .map_err(|_| "anchor element had an unexpected type".to_string())?;
    anchor.set_href(&object_url);
    anchor.set_download(file_name);

    let result = body
        .append_child(&anchor)
        .map(|_| anchor.click())
        .map_err(|e| format!("{e:?}"));

    // Always clean up the anchor and the object URL, success or not.
    let _ = body.remove_child(&anchor);
    let _ = Url::revoke_object_url(&object_url);
    result
}

#[cfg(not(target_arch = "wasm32"))]
fn trigger_save(_bytes: &[u8], _file_name: &str) -> Result<(), String> {
    Err("file downloads are only available in web builds".to_string())
}
