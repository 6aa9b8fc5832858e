use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::api::customers::{CustomerApi, RawPage};
use crate::error::{AppError, Result};
use crate::models::customer::{Customer, CustomerDraft, CustomerPage, CustomerRating, RatingUpdate};
use crate::models::interaction::{Interaction, NewInteraction};
use crate::models::query::QueryIntent;
use crate::validation::customer::validate_draft;

/// Orders overlapping list requests so only the most recently issued one
/// may update visible state.
///
/// Call `begin()` before issuing a request and `try_commit(ticket)` when
/// its response arrives; a `false` return means a newer request has
/// already committed and this response must be discarded.
#[derive(Debug, Default)]
pub struct ListSequencer {
    issued: AtomicU64,
    committed: AtomicU64,
}

impl ListSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next ticket. Tickets increase monotonically from 1.
    pub fn begin(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Attempts to commit the response for `ticket`. Succeeds iff no
    /// newer ticket has committed yet.
    pub fn try_commit(&self, ticket: u64) -> bool {
        self.committed.fetch_max(ticket, Ordering::SeqCst) < ticket
    }
}

/// Translates a `QueryIntent` into collaborator requests and normalizes
/// the results for display.
///
/// Filtering, sorting, and pagination are delegated to the collaborator in
/// full; the service never re-filters or re-sorts locally, so the counts
/// it reports are always the collaborator's counts.
#[derive(Clone)]
pub struct CustomerQueryService {
    api: CustomerApi,
    sequencer: Arc<ListSequencer>,
}

impl CustomerQueryService {
    pub fn new(api: CustomerApi) -> Self {
        Self {
            api,
            sequencer: Arc::new(ListSequencer::new()),
        }
    }

    /// Fetches one page of customers for the given intent.
    ///
    /// The intent is validated before anything is sent. A non-empty search
    /// term routes to the search capability; otherwise the plain listing
    /// capability is used with pagination honored.
    ///
    /// Callers whose requests may overlap (typing-driven re-queries,
    /// pollers) should use `list_latest`, which drops superseded responses.
    pub async fn list(&self, intent: &QueryIntent) -> Result<CustomerPage> {
        intent.validate()?;

        let raw = if intent.is_search() {
            tracing::debug!("🔍 Searching customers: {:?}", intent.search_term);
            self.api.search(intent).await?
        } else {
            tracing::debug!("📋 Listing customers: page {}", intent.page);
            self.api.list(intent).await?
        };

        Ok(Self::normalize(raw))
    }

    /// Like `list`, but safe to call from overlapping contexts: responses
    /// are ordered by issue time, and a response overtaken by a newer call
    /// comes back as `None` instead of a page. `None` means "discard, a
    /// fresher result has already been shown"; only `Some` pages may update
    /// visible state. Clones of the service share the same ordering.
    pub async fn list_latest(&self, intent: &QueryIntent) -> Result<Option<CustomerPage>> {
        let ticket = self.sequencer.begin();
        let page = self.list(intent).await?;

        if self.sequencer.try_commit(ticket) {
            Ok(Some(page))
        } else {
            tracing::debug!("⏱️ Discarding superseded list response");
            Ok(None)
        }
    }

    /// Fetches one customer by id.
    pub async fn fetch(&self, id: i64) -> Result<Customer> {
        self.api.fetch(id).await
    }

    /// Creates a customer record from a locally validated draft.
    pub async fn create(&self, draft: &CustomerDraft) -> Result<Customer> {
        validate_draft(draft)?;
        let customer = self.api.create(draft).await?;
        tracing::info!("✅ Customer created: {}", customer.id);
        Ok(customer)
    }

    /// Updates a customer record from a locally validated draft.
    pub async fn update(&self, id: i64, draft: &CustomerDraft) -> Result<Customer> {
        validate_draft(draft)?;
        let customer = self.api.update(id, draft).await?;
        tracing::info!("✅ Customer updated: {}", customer.id);
        Ok(customer)
    }

    /// Deletes one customer record. Irreversible and unconditional:
    /// obtaining user confirmation is the caller's responsibility, and any
    /// cached listing is the caller's to refresh (the service holds none).
    pub async fn remove(&self, id: i64) -> Result<()> {
        self.api.remove(id).await?;
        tracing::info!("🗑️ Customer deleted: {}", id);
        Ok(())
    }

    /// Lists the interactions logged against one customer.
    pub async fn interactions(&self, customer_id: i64) -> Result<Vec<Interaction>> {
        self.api.interactions(customer_id).await
    }

    /// Logs a new interaction against one customer.
    pub async fn add_interaction(
        &self,
        customer_id: i64,
        interaction: &NewInteraction,
    ) -> Result<Interaction> {
        let created = self.api.add_interaction(customer_id, interaction).await?;
        tracing::info!(
            "✅ Interaction logged for customer {}: {:?}",
            customer_id,
            created.kind
        );
        Ok(created)
    }

    /// Reads the rating for one customer. A customer that has never been
    /// rated reads back as a zero rating, not an error.
    pub async fn rating(&self, customer_id: i64) -> Result<CustomerRating> {
        match self.api.rating(customer_id).await {
            Ok(rating) => Ok(rating),
            Err(AppError::NotFound) => Ok(CustomerRating::default()),
            Err(e) => Err(e),
        }
    }

    /// Writes the rating for one customer. The update was clamped to
    /// [0, 5] at construction, so out-of-range values never reach the wire.
    pub async fn set_rating(
        &self,
        customer_id: i64,
        update: &RatingUpdate,
    ) -> Result<CustomerRating> {
        let rating = self.api.set_rating(customer_id, update).await?;
        tracing::info!(
            "⭐ Rating updated for customer {}: {}",
            customer_id,
            rating.rating
        );
        Ok(rating)
    }

    /// Fills in the totals the collaborator omitted. Record-level rating
    /// normalization happens at deserialization.
    fn normalize(raw: RawPage) -> CustomerPage {
        let total_items = raw.total.unwrap_or(raw.customers.len() as u64);
        let total_pages = raw.pages.unwrap_or(1);
        CustomerPage {
            customers: raw.customers,
            total_items,
            total_pages,
        }
    }
}
