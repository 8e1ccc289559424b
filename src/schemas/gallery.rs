use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGalleryItem {
    #[validate(length(min = 1))]
    pub image_url: String,
    pub caption: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateGalleryItem {
    #[validate(length(min = 1))]
    pub image_url: Option<String>,
    pub caption: Option<String>,
    pub sort_order: Option<i32>,
}

/// New ordering after a drag-and-drop in the admin UI
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderGallery {
    pub items: Vec<GalleryPosition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GalleryPosition {
    pub id: i64,
    pub sort_order: i32,
}
