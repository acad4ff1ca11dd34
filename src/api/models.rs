use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AudioFile {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "fileUrl")]
    pub file_url: String,
    #[serde(default, alias = "categoryId")]
    pub category_id: u64,
    #[serde(default, alias = "categoryName")]
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PdfFile {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "coverUrl")]
    pub cover_url: Option<String>,
    #[serde(default, alias = "fileUrl")]
    pub file_url: String,
    #[serde(default, alias = "categoryId")]
    pub category_id: u64,
    #[serde(default, alias = "categoryName")]
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VideoFile {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "fileUrl")]
    pub file_url: String,
    #[serde(default, alias = "categoryId")]
    pub category_id: u64,
    #[serde(default, alias = "categoryName")]
    pub category_name: Option<String>,
}

/// A category as the backend reports it; items are joined client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Category {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One category with its media joined in, recomputed on every fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySection<T> {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub items: Vec<T>,
}

/// Media kinds that can be partitioned into library categories.
pub trait CategoryItem {
    fn id(&self) -> u64;
    fn category_id(&self) -> u64;
}

impl CategoryItem for AudioFile {
    fn id(&self) -> u64 {
        self.id
    }
    fn category_id(&self) -> u64 {
        self.category_id
    }
}

impl CategoryItem for PdfFile {
    fn id(&self) -> u64 {
        self.id
    }
    fn category_id(&self) -> u64 {
        self.category_id
    }
}

impl CategoryItem for VideoFile {
    fn id(&self) -> u64 {
        self.id
    }
    fn category_id(&self) -> u64 {
        self.category_id
    }
}
