//! External catalog (Google Books volumes API) types and the import mapping.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::book::{coerce_int, BookPayload, BookStatus};

/// Author used when the catalog does not list any
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Raw `GET /volumes` response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumesResponse {
    #[serde(default)]
    pub total_items: i64,
    #[serde(default)]
    pub items: Vec<Volume>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub id: String,
    #[serde(default)]
    pub volume_info: VolumeInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    pub description: Option<String>,
    pub image_links: Option<ImageLinks>,
    pub published_date: Option<String>,
    pub page_count: Option<Value>,
    #[serde(default)]
    pub industry_identifiers: Vec<IndustryIdentifier>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageLinks {
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: String,
}

/// One search hit, as shown on an explore result card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCandidate {
    /// Identifier in the external catalog
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub published_date: Option<String>,
    pub page_count: Option<i32>,
    #[serde(default)]
    pub industry_identifiers: Vec<IndustryIdentifier>,
}

impl From<Volume> for CatalogCandidate {
    fn from(volume: Volume) -> Self {
        let info = volume.volume_info;
        Self {
            id: volume.id,
            title: info.title,
            authors: info.authors,
            description: info.description,
            thumbnail: info.image_links.and_then(|links| links.thumbnail),
            published_date: info.published_date,
            page_count: info.page_count.as_ref().and_then(coerce_int),
            industry_identifiers: info.industry_identifiers,
        }
    }
}

impl CatalogCandidate {
    /// Authors joined for display, or [`UNKNOWN_AUTHOR`]
    pub fn author_line(&self) -> String {
        if self.authors.is_empty() {
            UNKNOWN_AUTHOR.to_string()
        } else {
            self.authors.join(", ")
        }
    }

    /// Year taken from the leading component of the publication date
    pub fn publish_year(&self) -> Option<i32> {
        let date = self.published_date.as_deref()?;
        let year = date.split('-').next()?;
        coerce_int(&Value::from(year))
    }

    /// First listed identifier, treated as the ISBN
    pub fn isbn(&self) -> Option<String> {
        self.industry_identifiers
            .first()
            .map(|id| id.identifier.clone())
    }

    /// Map this hit into a create request. Personal fields start empty and
    /// the status is always `want-to-read`.
    pub fn to_book_payload(&self) -> BookPayload {
        BookPayload {
            title: Some(self.title.clone()),
            author: Some(self.author_line()),
            description: self.description.clone(),
            rating: None,
            status: Some(BookStatus::WantToRead),
            review: None,
            cover_url: self.thumbnail.clone(),
            isbn: self.isbn(),
            publish_year: self.publish_year().map(Value::from),
            pages: self.page_count.map(Value::from),
        }
    }
}
