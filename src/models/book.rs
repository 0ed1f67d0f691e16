//! Book record model and the write payload accepted by the record service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppResult;

/// Reading progress of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum BookStatus {
    #[default]
    WantToRead,
    CurrentlyReading,
    Read,
}

impl BookStatus {
    pub const ALL: [BookStatus; 3] = [
        BookStatus::WantToRead,
        BookStatus::CurrentlyReading,
        BookStatus::Read,
    ];

    /// Wire and DB representation
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::WantToRead => "want-to-read",
            BookStatus::CurrentlyReading => "currently-reading",
            BookStatus::Read => "read",
        }
    }
}

/// Unknown values fall back to `want-to-read`.
impl From<&str> for BookStatus {
    fn from(s: &str) -> Self {
        match s {
            "currently-reading" => BookStatus::CurrentlyReading,
            "read" => BookStatus::Read,
            _ => BookStatus::WantToRead,
        }
    }
}

impl From<String> for BookStatus {
    fn from(s: String) -> Self {
        BookStatus::from(s.as_str())
    }
}

impl<'de> Deserialize<'de> for BookStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value.as_str().map(BookStatus::from).unwrap_or_default())
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub rating: Option<i32>,
    #[sqlx(try_from = "String")]
    pub status: BookStatus,
    pub review: Option<String>,
    pub cover_url: Option<String>,
    pub isbn: Option<String>,
    pub publish_year: Option<i32>,
    pub pages: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of create and update requests.
///
/// Numeric fields accept a number, a numeric string, an empty string or null;
/// they are coerced with [`coerce_int`] when turned into a [`NewBook`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    #[validate(required, length(min = 1))]
    pub title: Option<String>,
    #[validate(required, length(min = 1))]
    pub author: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub rating: Option<Value>,
    pub status: Option<BookStatus>,
    pub review: Option<String>,
    pub cover_url: Option<String>,
    pub isbn: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub publish_year: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub pages: Option<Value>,
}

/// Validated, coerced set of mutable fields written to the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub rating: Option<i32>,
    pub status: BookStatus,
    pub review: Option<String>,
    pub cover_url: Option<String>,
    pub isbn: Option<String>,
    pub publish_year: Option<i32>,
    pub pages: Option<i32>,
}

impl BookPayload {
    /// Check required fields and coerce everything else. Absent optional
    /// fields become `None`; the result is a full replacement of the record.
    pub fn into_new_book(self) -> AppResult<NewBook> {
        self.validate()?;

        Ok(NewBook {
            title: self.title.unwrap_or_default(),
            author: self.author.unwrap_or_default(),
            description: non_empty(self.description),
            rating: self.rating.as_ref().and_then(coerce_int),
            status: self.status.unwrap_or_default(),
            review: non_empty(self.review),
            cover_url: non_empty(self.cover_url),
            isbn: non_empty(self.isbn),
            publish_year: self.publish_year.as_ref().and_then(coerce_int),
            pages: self.pages.as_ref().and_then(coerce_int),
        })
    }
}

/// Lenient integer coercion shared by create and update.
///
/// Never fails: anything that does not start with an integer becomes `None`.
/// Strings are read like `parseInt`, so `"12abc"` is 12 and `"3.7"` is 3.
pub fn coerce_int(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .and_then(|i| i32::try_from(i).ok()),
        Value::String(s) => parse_leading_int(s),
        _ => None,
    }
}

fn parse_leading_int(s: &str) -> Option<i32> {
    let s = s.trim();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
