//! Remote collection controller
//!
//! Keeps a list view in sync with a paginated, searchable remote collection.
//!
//! Ordering rules:
//! - every list request gets a sequence number when issued; a result is
//!   applied only if its number is still the highest issued, whatever order
//!   the responses arrive in
//! - `search` goes through a single-slot debounce timer: a new call cancels
//!   the pending one, and dropping the controller cancels it too
//! - mutations patch the displayed page optimistically; callers re-fetch to
//!   reconcile totals

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{oneshot, RwLock};
use tokio::task::JoinHandle;

use super::gateway::CollectionGateway;
use super::state::{CollectionPage, CollectionSnapshot, FetchOutcome, RequestState};
use crate::config::{ClientConfig, DEFAULT_DEBOUNCE_MS, MAX_PAGE_SIZE};
use crate::error::Result;
use crate::models::{Entity, EntityId, PageQuery};

/// Local check run before create/update reaches the gateway
pub type Validator<T> = fn(&T) -> Result<()>;

/// Generic list/search/paginate/mutate controller over a gateway
pub struct CollectionController<G: CollectionGateway> {
    inner: Arc<ControllerInner<G>>,
    debounce: Duration,
    validator: Option<Validator<G::Entity>>,
    pending_search: Mutex<Option<PendingSearch>>,
}

/// Debounce timer of the latest `search` call
struct PendingSearch {
    /// Sending or dropping cancels the timer if it has not fired yet
    cancel: oneshot::Sender<()>,
    task: JoinHandle<Option<FetchOutcome>>,
}

struct ControllerInner<G: CollectionGateway> {
    gateway: Arc<G>,
    state: RwLock<ControllerState<G::Entity>>,
}

struct ControllerState<T> {
    page: CollectionPage<T>,
    error: Option<String>,
    /// Term of the latest search/fetch, applied or not
    term: String,
    page_size: u32,
    issued_seq: u64,
    /// The highest issued fetch has not settled yet
    fetch_pending: bool,
    requests_in_flight: u32,
}

impl<T> ControllerState<T> {
    fn request_state(&self) -> RequestState {
        RequestState {
            loading: self.fetch_pending || self.requests_in_flight > 0,
            error: self.error.clone(),
        }
    }
}

impl<G: CollectionGateway> CollectionController<G> {
    pub fn new(gateway: Arc<G>, page_size: u32) -> Self {
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        Self {
            inner: Arc::new(ControllerInner {
                gateway,
                state: RwLock::new(ControllerState {
                    page: CollectionPage::empty(page_size),
                    error: None,
                    term: String::new(),
                    page_size,
                    issued_seq: 0,
                    fetch_pending: false,
                    requests_in_flight: 0,
                }),
            }),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            validator: None,
            pending_search: Mutex::new(None),
        }
    }

    /// Controller using the configured page size and debounce window
    pub fn from_config(gateway: Arc<G>, config: &ClientConfig) -> Self {
        Self::new(gateway, config.page_size).with_debounce(config.debounce())
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_validator(mut self, validator: Validator<G::Entity>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn gateway(&self) -> &G {
        &self.inner.gateway
    }

    /// Copy of the displayed page and request state
    pub async fn snapshot(&self) -> CollectionSnapshot<G::Entity> {
        let state = self.inner.state.read().await;
        CollectionSnapshot {
            page: state.page.clone(),
            request: state.request_state(),
        }
    }

    pub async fn request_state(&self) -> RequestState {
        self.inner.state.read().await.request_state()
    }

    pub async fn search_term(&self) -> String {
        self.inner.state.read().await.term.clone()
    }

    /// Record a new term and fetch page 0 once the debounce window passes
    /// without another call.
    pub async fn search(&self, term: impl Into<String>) {
        let term = term.into();
        let page_size = {
            let mut state = self.inner.state.write().await;
            state.term = term.clone();
            state.page_size
        };

        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();
        let inner = Arc::clone(&self.inner);
        let debounce = self.debounce;
        let task = tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(debounce) => {
                    Some(inner.fetch(term, 0, page_size).await)
                }
                _ = &mut cancel_rx => {
                    log::trace!("Debounced search for '{}' cancelled", term);
                    None
                }
            }
        });

        if let Ok(mut slot) = self.pending_search.lock() {
            let pending = PendingSearch {
                cancel: cancel_tx,
                task,
            };
            if let Some(previous) = slot.replace(pending) {
                let _ = previous.cancel.send(());
            }
        }
    }

    /// Wait for the pending debounced search, if any.
    ///
    /// Returns `None` when nothing was pending or the timer was cancelled.
    pub async fn settle_search(&self) -> Option<FetchOutcome> {
        let pending = self.pending_search.lock().ok()?.take()?;
        let PendingSearch { cancel, task } = pending;
        let outcome = task.await.ok().flatten();
        drop(cancel);
        outcome
    }

    /// Issue a list request; see the module docs for ordering.
    pub async fn fetch(&self, term: impl Into<String>, page_index: u32, page_size: u32) -> FetchOutcome {
        self.inner
            .fetch(term.into(), page_index, page_size.clamp(1, MAX_PAGE_SIZE))
            .await
    }

    /// Re-fetch the current term and page
    pub async fn refresh(&self) -> FetchOutcome {
        let (term, page_index, page_size) = {
            let state = self.inner.state.read().await;
            (state.term.clone(), state.page.page_index, state.page_size)
        };
        self.inner.fetch(term, page_index, page_size).await
    }

    /// Move to another page of the current term.
    ///
    /// Returns `None` without fetching when the index is out of range.
    pub async fn change_page(&self, new_page_index: i64) -> Option<FetchOutcome> {
        let (term, page_size, accepted) = {
            let state = self.inner.state.read().await;
            (
                state.term.clone(),
                state.page_size,
                state.page.accepts_page(new_page_index),
            )
        };

        let page_index = match u32::try_from(new_page_index) {
            Ok(index) if accepted => index,
            _ => {
                log::debug!("Ignoring page change to {}", new_page_index);
                return None;
            }
        };

        Some(self.inner.fetch(term, page_index, page_size).await)
    }

    /// Change the page size; always goes back to page 0
    pub async fn set_page_size(&self, page_size: u32) -> FetchOutcome {
        let term = self.inner.state.read().await.term.clone();
        self.inner
            .fetch(term, 0, page_size.clamp(1, MAX_PAGE_SIZE))
            .await
    }

    /// Load one entity, e.g. for an edit form
    pub async fn get(&self, id: EntityId) -> Result<G::Entity> {
        self.inner.begin_request().await;
        let result = self.inner.gateway.get_by_id(id).await;
        self.inner.finish_request(result.as_ref().err()).await;
        result
    }

    /// Create remotely, then append to the displayed page when it has room
    pub async fn create(&self, entity: &G::Entity) -> Result<G::Entity> {
        self.check(entity).await?;
        self.inner.begin_request().await;
        let result = self.inner.gateway.create(entity).await;

        let mut state = self.inner.state.write().await;
        state.requests_in_flight = state.requests_in_flight.saturating_sub(1);
        match result {
            Ok(created) => {
                log::info!("Created {} {}", self.inner.gateway.resource(), created.label());
                if !state.page.append(created.clone()) {
                    log::debug!("Page is full, {} not shown until the next fetch", created.label());
                }
                state.error = None;
                Ok(created)
            }
            Err(e) => {
                state.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Update remotely, then replace the matching item on the page
    pub async fn update(&self, id: EntityId, entity: &G::Entity) -> Result<G::Entity> {
        self.check(entity).await?;
        self.inner.begin_request().await;
        let result = self.inner.gateway.update(id, entity).await;

        let mut state = self.inner.state.write().await;
        state.requests_in_flight = state.requests_in_flight.saturating_sub(1);
        match result {
            Ok(updated) => {
                log::info!("Updated {} {}", self.inner.gateway.resource(), id);
                state.page.replace(id, updated.clone());
                state.error = None;
                Ok(updated)
            }
            Err(e) => {
                state.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Delete remotely, then drop the item from the page.
    ///
    /// Emptying a non-first page does not navigate; see
    /// [`CollectionSnapshot::is_orphaned_page`].
    pub async fn remove(&self, id: EntityId) -> Result<()> {
        self.inner.begin_request().await;
        let result = self.inner.gateway.delete(id).await;

        let mut state = self.inner.state.write().await;
        state.requests_in_flight = state.requests_in_flight.saturating_sub(1);
        match result {
            Ok(()) => {
                log::info!("Deleted {} {}", self.inner.gateway.resource(), id);
                state.page.remove(id);
                state.error = None;
                Ok(())
            }
            Err(e) => {
                state.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Update when the entity has an id, create otherwise
    pub async fn save(&self, entity: &G::Entity) -> Result<G::Entity> {
        match entity.id() {
            Some(id) => self.update(id, entity).await,
            None => self.create(entity).await,
        }
    }

    async fn check(&self, entity: &G::Entity) -> Result<()> {
        if let Some(validate) = self.validator {
            if let Err(e) = validate(entity) {
                self.inner.state.write().await.error = Some(e.user_message());
                return Err(e);
            }
        }
        Ok(())
    }
}

impl<G: CollectionGateway> ControllerInner<G> {
    async fn fetch(&self, term: String, page_index: u32, page_size: u32) -> FetchOutcome {
        let seq = {
            let mut state = self.state.write().await;
            state.issued_seq += 1;
            state.fetch_pending = true;
            state.term = term.clone();
            state.page_size = page_size;
            state.issued_seq
        };

        log::debug!(
            "Fetching {} #{}: term='{}' page={} size={}",
            self.gateway.resource(),
            seq,
            term,
            page_index,
            page_size
        );
        let query = PageQuery::new(term.clone(), page_index, page_size);
        let result = self.gateway.list(&query).await;

        let mut state = self.state.write().await;
        if seq != state.issued_seq {
            log::debug!(
                "Dropping stale {} response #{} (latest #{})",
                self.gateway.resource(),
                seq,
                state.issued_seq
            );
            return FetchOutcome::Superseded;
        }

        state.fetch_pending = false;
        match result {
            Ok(response) => {
                state.page = CollectionPage::from_response(response, term, page_size);
                state.error = None;
                FetchOutcome::Applied
            }
            Err(e) => {
                log::warn!("Fetching {} failed: {}", self.gateway.resource(), e);
                let message = e.user_message();
                state.error = Some(message.clone());
                FetchOutcome::Failed(message)
            }
        }
    }

    async fn begin_request(&self) {
        self.state.write().await.requests_in_flight += 1;
    }

    async fn finish_request(&self, error: Option<&crate::error::Error>) {
        let mut state = self.state.write().await;
        state.requests_in_flight = state.requests_in_flight.saturating_sub(1);
        if let Some(e) = error {
            state.error = Some(e.user_message());
        }
    }
}
