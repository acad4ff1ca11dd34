/// Utility helpers for Pustaka

/// Format a playback position in seconds as `m:ss` for display.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let total = seconds as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Build a save-dialog filename from a media title. Path separators and
/// other characters filesystems reject become underscores.
pub fn download_file_name(title: &str, extension: &str) -> String {
    let stem: String = title
        .chars()
        .map(|ch| {
            if matches!(ch, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || ch.is_control()
            {
                '_'
            } else {
                ch
            }
        })
        .collect();
    let stem = stem.trim();
    if stem.is_empty() {
        format!("media.{extension}")
    } else {
        format!("{stem}.{extension}")
    }
}

/// Await `ms` milliseconds on whichever timer source the target has.
#[cfg(target_arch = "wasm32")]
pub async fn sleep_ms(ms: u32) {
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep_ms(ms: u32) {
    tokio::time::sleep(std::time::Duration::from_millis(u64::from(ms))).await;
}
