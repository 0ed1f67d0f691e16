//! View models for Bookshelf front ends.
//!
//! Each view owns its own transient state (loaded records, filter, busy
//! flags) and talks to the API only through [`BookshelfClient`]. Nothing here
//! is shared between views.

use std::collections::HashSet;

use serde_json::Value;

use crate::{
    client::BookshelfClient,
    models::{Book, BookPayload, BookStatus, CatalogCandidate},
};

/// Where a view wants to navigate after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List,
    Detail(i32),
}

/// Status filter of the list view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(BookStatus),
}

impl StatusFilter {
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => book.status == *status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub all: usize,
    pub want_to_read: usize,
    pub currently_reading: usize,
    pub read: usize,
}

impl StatusCounts {
    pub fn from_books(books: &[Book]) -> Self {
        books.iter().fold(
            StatusCounts {
                all: books.len(),
                ..Self::default()
            },
            |mut counts, book| {
                match book.status {
                    BookStatus::WantToRead => counts.want_to_read += 1,
                    BookStatus::CurrentlyReading => counts.currently_reading += 1,
                    BookStatus::Read => counts.read += 1,
                }
                counts
            },
        )
    }
}

/// "My library" list
#[derive(Debug, Default)]
pub struct ListView {
    books: Vec<Book>,
    filter: StatusFilter,
    pub loading: bool,
}

impl ListView {
    /// Build the view from an already fetched collection
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books,
            ..Self::default()
        }
    }

    /// Fetch all records once. A failed fetch renders an empty list.
    pub async fn load(client: &BookshelfClient) -> Self {
        let mut view = Self::default();
        view.refresh(client).await;
        view
    }

    pub async fn refresh(&mut self, client: &BookshelfClient) {
        self.loading = true;
        self.books = match client.list_books().await {
            Ok(books) => books,
            Err(e) => {
                tracing::error!("Error fetching books: {:#}", e);
                Vec::new()
            }
        };
        self.loading = false;
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    /// Change the filter without re-fetching
    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    pub fn visible(&self) -> Vec<&Book> {
        self.books.iter().filter(|b| self.filter.matches(b)).collect()
    }

    pub fn counts(&self) -> StatusCounts {
        StatusCounts::from_books(&self.books)
    }

    /// Delete after `confirm` agrees, then re-fetch the whole list.
    /// Returns false when the user declined.
    pub async fn delete(
        &mut self,
        client: &BookshelfClient,
        id: i32,
        confirm: impl FnOnce() -> bool,
    ) -> anyhow::Result<bool> {
        if !confirm() {
            return Ok(false);
        }
        client.delete_book(id).await?;
        self.refresh(client).await;
        Ok(true)
    }
}

/// Single book page
#[derive(Debug, Default)]
pub struct DetailView {
    pub book: Option<Book>,
}

impl DetailView {
    pub async fn load(client: &BookshelfClient, id: i32) -> anyhow::Result<Self> {
        Ok(Self {
            book: client.get_book(id).await?,
        })
    }

    /// Labelled values of the fields to render; empty optional fields are left out
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let Some(book) = &self.book else {
            return Vec::new();
        };

        let mut fields = vec![
            ("Title", book.title.clone()),
            ("Author", book.author.clone()),
            ("Status", book.status.to_string()),
        ];
        let optional = [
            ("Rating", book.rating.map(|r| format!("{}/5", r))),
            ("Description", book.description.clone()),
            ("Review", book.review.clone()),
            ("ISBN", book.isbn.clone()),
            ("Published", book.publish_year.map(|y| y.to_string())),
            ("Pages", book.pages.map(|p| p.to_string())),
            ("Cover", book.cover_url.clone()),
        ];
        fields.extend(
            optional
                .into_iter()
                .filter_map(|(label, value)| value.filter(|v| !v.is_empty()).map(|v| (label, v))),
        );
        fields
    }

    /// Delete after `confirm` agrees; on success go back to the list
    pub async fn delete(
        &mut self,
        client: &BookshelfClient,
        confirm: impl FnOnce() -> bool,
    ) -> anyhow::Result<Option<Route>> {
        let Some(book) = &self.book else {
            return Ok(None);
        };
        if !confirm() {
            return Ok(None);
        }
        client.delete_book(book.id).await?;
        self.book = None;
        Ok(Some(Route::List))
    }
}

/// Add / edit form. Every field is kept as typed text; the service coerces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub description: String,
    pub rating: String,
    pub status: String,
    pub review: String,
    pub cover_url: String,
    pub isbn: String,
    pub publish_year: String,
    pub pages: String,
    pub saving: bool,
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        fn text(value: Option<i32>) -> String {
            value.map(|v| v.to_string()).unwrap_or_default()
        }

        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.description.clone().unwrap_or_default(),
            rating: text(book.rating),
            status: book.status.to_string(),
            review: book.review.clone().unwrap_or_default(),
            cover_url: book.cover_url.clone().unwrap_or_default(),
            isbn: book.isbn.clone().unwrap_or_default(),
            publish_year: text(book.publish_year),
            pages: text(book.pages),
            saving: false,
        }
    }
}

impl BookForm {
    pub fn to_payload(&self) -> BookPayload {
        BookPayload {
            title: Some(self.title.clone()),
            author: Some(self.author.clone()),
            description: Some(self.description.clone()),
            rating: Some(Value::from(self.rating.as_str())),
            status: Some(BookStatus::from(self.status.as_str())),
            review: Some(self.review.clone()),
            cover_url: Some(self.cover_url.clone()),
            isbn: Some(self.isbn.clone()),
            publish_year: Some(Value::from(self.publish_year.as_str())),
            pages: Some(Value::from(self.pages.as_str())),
        }
    }

    /// Submit as a new book. On failure the form keeps its contents.
    pub async fn submit_create(&mut self, client: &BookshelfClient) -> anyhow::Result<Route> {
        self.saving = true;
        let result = client.create_book(&self.to_payload()).await;
        self.saving = false;
        result.map(|_| Route::List)
    }

    /// Submit as a full replacement of book `id`
    pub async fn submit_update(
        &mut self,
        client: &BookshelfClient,
        id: i32,
    ) -> anyhow::Result<Route> {
        self.saving = true;
        let result = client.update_book(id, &self.to_payload()).await;
        self.saving = false;
        result.map(|book| Route::Detail(book.id))
    }
}

/// Catalog search page
#[derive(Debug, Default)]
pub struct ExploreView {
    pub results: Vec<CatalogCandidate>,
    pub loading: bool,
    importing: HashSet<String>,
}

impl ExploreView {
    pub async fn search(&mut self, client: &BookshelfClient, query: &str) -> anyhow::Result<()> {
        if query.trim().is_empty() {
            return Ok(());
        }
        self.loading = true;
        let result = client.search_catalog(query).await;
        self.loading = false;
        self.results = result?;
        Ok(())
    }

    /// Whether the import button of this card is disabled
    pub fn is_importing(&self, candidate_id: &str) -> bool {
        self.importing.contains(candidate_id)
    }

    /// Mark a card busy. Returns the hit to import, or None when that card
    /// is already importing or is not on the page.
    pub fn begin_import(&mut self, candidate_id: &str) -> Option<CatalogCandidate> {
        if self.is_importing(candidate_id) {
            return None;
        }
        let candidate = self
            .results
            .iter()
            .find(|c| c.id == candidate_id)?
            .clone();
        self.importing.insert(candidate.id.clone());
        Some(candidate)
    }

    pub fn finish_import(&mut self, candidate_id: &str) {
        self.importing.remove(candidate_id);
    }

    /// Import one card and release its busy flag whatever the outcome
    pub async fn import(
        &mut self,
        client: &BookshelfClient,
        candidate_id: &str,
    ) -> anyhow::Result<Option<Book>> {
        let Some(candidate) = self.begin_import(candidate_id) else {
            return Ok(None);
        };
        let result = client.import(&candidate).await;
        self.finish_import(candidate_id);
        result.map(Some)
    }
}
