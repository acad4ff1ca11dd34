use crate::api::models::*;
use dioxus::logger::tracing::{error, warn};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;

pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

const AUDIO_LIST_PATH: &str = "/api/audio?limit=100&sort=asc";
const PDF_LIST_PATH: &str = "/api/pdfs?sort=asc";
const VIDEO_LIST_PATH: &str = "/api/videos?sort=asc";
const CATEGORY_LIST_PATH: &str = "/api/categories";

/// Client for the media library REST endpoints.
///
/// The default instance issues same-origin requests, which is what the
/// web build wants; native builds can point it at a full base URL.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LibraryClient {
    base_url: String,
}

impl LibraryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str) -> Result<serde_json::Value, String> {
        let response = HTTP_CLIENT
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        response.json().await.map_err(|e| e.to_string())
    }

    pub async fn get_audio_files(&self) -> Result<Vec<AudioFile>, String> {
        let payload = self.get_json(AUDIO_LIST_PATH).await?;
        Ok(media_list_from_payload(payload, "audios"))
    }

    pub async fn get_pdf_files(&self) -> Result<Vec<PdfFile>, String> {
        let payload = self.get_json(PDF_LIST_PATH).await?;
        Ok(media_list_from_payload(payload, "pdfs"))
    }

    pub async fn get_video_files(&self) -> Result<Vec<VideoFile>, String> {
        let payload = self.get_json(VIDEO_LIST_PATH).await?;
        Ok(media_list_from_payload(payload, "videos"))
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>, String> {
        let payload = self.get_json(CATEGORY_LIST_PATH).await?;
        serde_json::from_value(payload).map_err(|e| e.to_string())
    }

    /// Fetch audio files and categories, joined into sections. Any fetch
    /// failure is logged and degrades to an empty list; no retries.
    pub async fn get_audio_sections(
        &self,
        filter_category_ids: Option<&[u64]>,
    ) -> Vec<CategorySection<AudioFile>> {
        let audios = match self.get_audio_files().await {
            Ok(list) => list,
            Err(err) => {
                error!("error fetching audio files: {err}");
                return Vec::new();
            }
        };
        self.sections_for(audios, filter_category_ids).await
    }

    pub async fn get_pdf_sections(
        &self,
        filter_category_ids: Option<&[u64]>,
    ) -> Vec<CategorySection<PdfFile>> {
        let pdfs = match self.get_pdf_files().await {
            Ok(list) => list,
            Err(err) => {
                error!("error fetching PDF files: {err}");
                return Vec::new();
            }
        };
        self.sections_for(pdfs, filter_category_ids).await
    }

    pub async fn get_video_sections(
        &self,
        filter_category_ids: Option<&[u64]>,
    ) -> Vec<CategorySection<VideoFile>> {
        let videos = match self.get_video_files().await {
            Ok(list) => list,
            Err(err) => {
                error!("error fetching video files: {err}");
                return Vec::new();
            }
        };
        self.sections_for(videos, filter_category_ids).await
    }

    async fn sections_for<T: CategoryItem + Clone>(
        &self,
        items: Vec<T>,
        filter_category_ids: Option<&[u64]>,
    ) -> Vec<CategorySection<T>> {
        let categories = match self.get_categories().await {
            Ok(list) => list,
            Err(err) => {
                error!("error fetching categories: {err}");
                return Vec::new();
            }
        };
        group_by_category(&items, &categories, filter_category_ids)
    }
}

/// The list endpoints answer either a bare array or a wrapper object
/// carrying the array under `key`. Anything else is logged and treated
/// as an empty list so the view degrades instead of erroring.
pub fn media_list_from_payload<T>(payload: serde_json::Value, key: &str) -> Vec<T>
where
    T: DeserializeOwned + CategoryItem,
{
    let list = match payload {
        serde_json::Value::Array(_) => payload,
        serde_json::Value::Object(mut map) => match map.remove(key) {
            Some(list @ serde_json::Value::Array(_)) => list,
            _ => {
                warn!("unexpected {key} payload shape");
                return Vec::new();
            }
        },
        _ => {
            warn!("unexpected {key} payload shape");
            return Vec::new();
        }
    };

    let mut items: Vec<T> = match serde_json::from_value(list) {
        Ok(items) => items,
        Err(err) => {
            error!("failed to decode {key} list: {err}");
            return Vec::new();
        }
    };
    // The backend is asked for ascending ids but is not trusted to comply.
    items.sort_by_key(|item| item.id());
    items
}

/// Partition media into their categories, honoring an optional category
/// filter and dropping categories that end up empty.
pub fn group_by_category<T: CategoryItem + Clone>(
    items: &[T],
    categories: &[Category],
    filter_category_ids: Option<&[u64]>,
) -> Vec<CategorySection<T>> {
    categories
        .iter()
        .filter(|category| filter_category_ids.is_none_or(|ids| ids.contains(&category.id)))
        .map(|category| CategorySection {
            id: category.id,
            name: category.name.clone(),
            description: category.description.clone(),
            items: items
                .iter()
                .filter(|item| item.category_id() == category.id)
                .cloned()
                .collect(),
        })
        .filter(|section| !section.items.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn audio(id: u64, category_id: u64) -> AudioFile {
        AudioFile {
            id,
            title: format!("audio {id}"),
            file_url: format!("https://cdn.example.com/a/{id}.mp3"),
            category_id,
            category_name: None,
        }
    }

    fn category(id: u64, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            description: None,
        }
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = LibraryClient::new("https://media.example.com/");
        assert_eq!(
            client.url(CATEGORY_LIST_PATH),
            "https://media.example.com/api/categories"
        );
    }

    #[test]
    fn default_client_issues_same_origin_paths() {
        let client = LibraryClient::default();
        assert_eq!(client.url(PDF_LIST_PATH), "/api/pdfs?sort=asc");
    }

    #[test]
    fn wrapped_payload_is_unwrapped() {
        let payload = json!({
            "audios": [
                { "id": 2, "title": "b", "fileUrl": "u2", "categoryId": 10 },
                { "id": 1, "title": "a", "fileUrl": "u1", "categoryId": 10 },
            ]
        });
        let items: Vec<AudioFile> = media_list_from_payload(payload, "audios");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[0].file_url, "u1");
    }

    #[test]
    fn bare_array_payload_is_accepted() {
        let payload = json!([
            { "id": 3, "title": "c", "fileUrl": "u3", "categoryId": 20 },
        ]);
        let items: Vec<AudioFile> = media_list_from_payload(payload, "audios");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category_id, 20);
    }

    #[test]
    fn malformed_payload_degrades_to_empty() {
        for payload in [
            json!("not a list"),
            json!(42),
            json!({ "audios": "nope" }),
            json!({ "other": [] }),
            json!(null),
        ] {
            let items: Vec<AudioFile> = media_list_from_payload(payload, "audios");
            assert!(items.is_empty());
        }
    }

    #[test]
    fn payload_is_sorted_by_id_ascending() {
        let payload = json!([
            { "id": 9, "fileUrl": "u9", "categoryId": 1 },
            { "id": 4, "fileUrl": "u4", "categoryId": 1 },
            { "id": 7, "fileUrl": "u7", "categoryId": 1 },
        ]);
        let items: Vec<AudioFile> = media_list_from_payload(payload, "audios");
        let ids: Vec<u64> = items.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![4, 7, 9]);
    }

    #[test]
    fn groups_items_and_drops_empty_categories() {
        let items = vec![audio(1, 10), audio(2, 10), audio(3, 20)];
        let categories = vec![category(10, "A"), category(20, "B"), category(30, "C")];

        let sections = group_by_category(&items, &categories, None);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].id, 10);
        assert_eq!(sections[0].name, "A");
        let ids: Vec<u64> = sections[0].items.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(sections[1].id, 20);
        assert_eq!(sections[1].items.len(), 1);
        assert_eq!(sections[1].items[0].id, 3);
    }

    #[test]
    fn category_filter_limits_sections() {
        let items = vec![audio(1, 10), audio(2, 20)];
        let categories = vec![category(10, "A"), category(20, "B")];

        let sections = group_by_category(&items, &categories, Some(&[20]));

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].id, 20);
    }

    #[test]
    fn empty_media_list_yields_no_sections() {
        let categories = vec![category(10, "A")];
        let sections = group_by_category::<AudioFile>(&[], &categories, None);
        assert!(sections.is_empty());
    }
}
