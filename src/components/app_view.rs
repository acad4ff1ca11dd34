//! Defines the shared application view state.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryTab {
    Audio,
    Pdf,
    Video,
}

pub fn tab_label(tab: &LibraryTab) -> &'static str {
    match tab {
        LibraryTab::Audio => "Audio",
        LibraryTab::Pdf => "PDF",
        LibraryTab::Video => "Video",
    }
}

pub fn tab_icon(tab: &LibraryTab) -> &'static str {
    match tab {
        LibraryTab::Audio => "music",
        LibraryTab::Pdf => "file-text",
        LibraryTab::Video => "video",
    }
}
