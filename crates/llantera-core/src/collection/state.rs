//! Page and request state held by a collection controller

use serde::Serialize;

use crate::models::{Entity, EntityId, PageResponse};

/// The page currently displayed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionPage<T> {
    pub items: Vec<T>,
    pub page_index: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_elements: u64,
    pub search_term: String,
}

impl<T> CollectionPage<T> {
    pub fn empty(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            page_index: 0,
            page_size,
            total_pages: 0,
            total_elements: 0,
            search_term: String::new(),
        }
    }

    /// Build the displayed page from a list response.
    ///
    /// The requested page size wins over the echoed one, and surplus items
    /// are cut so that `items.len() <= page_size` holds.
    pub fn from_response(response: PageResponse<T>, search_term: String, page_size: u32) -> Self {
        let mut items = response.items;
        items.truncate(page_size as usize);
        Self {
            items,
            page_index: response.page_index,
            page_size,
            total_pages: response.total_pages,
            total_elements: response.total_elements,
            search_term,
        }
    }

    /// Whether `page_index` is a page the server can return
    pub fn accepts_page(&self, page_index: i64) -> bool {
        if page_index < 0 {
            return false;
        }
        if self.total_elements > 0 && page_index >= i64::from(self.total_pages) {
            return false;
        }
        true
    }

    /// A non-first page that became empty after deletions.
    ///
    /// Views may react by stepping back; the controller does not.
    pub fn is_orphaned(&self) -> bool {
        self.items.is_empty() && self.page_index > 0
    }
}

impl<T: Entity> CollectionPage<T> {
    /// Show a newly created item at the end of the page.
    ///
    /// A full page keeps `items.len() <= page_size`; the item shows up on a
    /// later page after the next fetch.
    pub(crate) fn append(&mut self, item: T) -> bool {
        if self.items.len() >= self.page_size as usize {
            return false;
        }
        self.items.push(item);
        true
    }

    pub(crate) fn replace(&mut self, id: EntityId, item: T) -> bool {
        match self.items.iter_mut().find(|existing| existing.id() == Some(id)) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove(&mut self, id: EntityId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != Some(id));
        self.items.len() != before
    }
}

/// Loading/error state for the view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestState {
    pub loading: bool,
    pub error: Option<String>,
}

/// Everything a list view needs to render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionSnapshot<T> {
    pub page: CollectionPage<T>,
    pub request: RequestState,
}

impl<T> CollectionSnapshot<T> {
    pub fn items(&self) -> &[T] {
        &self.page.items
    }

    pub fn is_loading(&self) -> bool {
        self.request.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.request.error.as_deref()
    }

    pub fn is_orphaned_page(&self) -> bool {
        self.page.is_orphaned()
    }
}

/// What happened to a fetch result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page was replaced
    Applied,
    /// The request failed; `error` holds the message, items were kept
    Failed(String),
    /// A newer request was issued meanwhile; the result was dropped
    Superseded,
}

impl FetchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FetchOutcome::Applied)
    }
}
