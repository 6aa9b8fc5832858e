use serde::Deserialize;

use crate::api::client::{ApiClient, parse_json};
use crate::error::{AppError, Result};
use crate::models::customer::{Customer, CustomerDraft, CustomerRating, RatingUpdate};
use crate::models::interaction::{Interaction, NewInteraction};
use crate::models::query::QueryIntent;

/// The collaborator's `{ success, data }` envelope on customer payloads.
#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    #[allow(dead_code)]
    success: bool,
    data: T,
}

/// A listing envelope. `total` and `pages` are optional; the query service
/// fills in defaults when the collaborator omits them.
#[derive(Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    #[allow(dead_code)]
    success: bool,
    data: Vec<Customer>,
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    pages: Option<u64>,
}

/// One raw page of records plus whatever totals the collaborator provided.
pub struct RawPage {
    pub customers: Vec<Customer>,
    pub total: Option<u64>,
    pub pages: Option<u64>,
}

/// The customer collection endpoints.
#[derive(Clone)]
pub struct CustomerApi {
    client: ApiClient,
}

impl CustomerApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// GET the plain listing capability with page/sort/filter parameters.
    pub async fn list(&self, intent: &QueryIntent) -> Result<RawPage> {
        let params = intent.list_params();
        let body = self.client.get("/customers", &params).await?;
        let envelope: ListEnvelope = parse_json(&body)?;
        Ok(RawPage {
            customers: envelope.data,
            total: envelope.total,
            pages: envelope.pages,
        })
    }

    /// GET the full-text search capability (name/email/company).
    pub async fn search(&self, intent: &QueryIntent) -> Result<RawPage> {
        let params = intent.search_params();
        let body = self.client.get("/customers/search", &params).await?;
        let envelope: ListEnvelope = parse_json(&body)?;
        Ok(RawPage {
            customers: envelope.data,
            total: envelope.total,
            pages: envelope.pages,
        })
    }

    /// GET one customer by id.
    pub async fn fetch(&self, id: i64) -> Result<Customer> {
        let body = self.client.get(&format!("/customers/{}", id), &[]).await?;
        let envelope: Envelope<Customer> = parse_json(&body)?;
        Ok(envelope.data)
    }

    /// POST a new customer record.
    pub async fn create(&self, draft: &CustomerDraft) -> Result<Customer> {
        let body = self.client.post("/customers", to_body(draft)?).await?;
        let envelope: Envelope<Customer> = parse_json(&body)?;
        Ok(envelope.data)
    }

    /// PUT an update to one customer record.
    pub async fn update(&self, id: i64, draft: &CustomerDraft) -> Result<Customer> {
        let body = self
            .client
            .put(&format!("/customers/{}", id), to_body(draft)?)
            .await?;
        let envelope: Envelope<Customer> = parse_json(&body)?;
        Ok(envelope.data)
    }

    /// DELETE one customer record.
    pub async fn remove(&self, id: i64) -> Result<()> {
        self.client.delete(&format!("/customers/{}", id)).await?;
        Ok(())
    }

    /// GET the interactions logged against one customer.
    pub async fn interactions(&self, customer_id: i64) -> Result<Vec<Interaction>> {
        let body = self
            .client
            .get(&format!("/customers/{}/interactions", customer_id), &[])
            .await?;
        let envelope: Envelope<Vec<Interaction>> = parse_json(&body)?;
        Ok(envelope.data)
    }

    /// POST a new interaction for one customer.
    pub async fn add_interaction(
        &self,
        customer_id: i64,
        interaction: &NewInteraction,
    ) -> Result<Interaction> {
        let body = self
            .client
            .post(
                &format!("/customers/{}/interactions", customer_id),
                to_body(interaction)?,
            )
            .await?;
        let envelope: Envelope<Interaction> = parse_json(&body)?;
        Ok(envelope.data)
    }

    /// GET the rating singleton for one customer.
    pub async fn rating(&self, customer_id: i64) -> Result<CustomerRating> {
        let body = self
            .client
            .get(&format!("/customers/{}/rating", customer_id), &[])
            .await?;
        let envelope: Envelope<CustomerRating> = parse_json(&body)?;
        Ok(envelope.data)
    }

    /// PUT the rating singleton for one customer.
    pub async fn set_rating(
        &self,
        customer_id: i64,
        update: &RatingUpdate,
    ) -> Result<CustomerRating> {
        let body = self
            .client
            .put(&format!("/customers/{}/rating", customer_id), to_body(update)?)
            .await?;
        let envelope: Envelope<CustomerRating> = parse_json(&body)?;
        Ok(envelope.data)
    }
}

fn to_body<T: serde::Serialize>(payload: &T) -> Result<String> {
    sonic_rs::to_string(payload)
        .map_err(|e| AppError::Serialization(format!("Request serialization failed: {}", e)))
}
