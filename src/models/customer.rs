use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::interaction::Interaction;

/// The lifecycle stage of a customer record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    Lead,
    Prospect,
    Customer,
    Inactive,
}

impl CustomerStatus {
    /// The value sent on the wire for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Lead => "lead",
            CustomerStatus::Prospect => "prospect",
            CustomerStatus::Customer => "customer",
            CustomerStatus::Inactive => "inactive",
        }
    }
}

/// Deserializes a rating, defaulting absent/null to 0 and clamping to [0, 5].
fn rating_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.unwrap_or(0.0).clamp(0.0, 5.0))
}

/// Represents a customer record as returned by the collaborator.
///
/// Ratings are normalized at the boundary: a record with no review yet
/// arrives with `rating` absent or null, and is read back as 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// The unique identifier for the customer.
    pub id: i64,
    /// The customer's first name.
    pub first_name: String,
    /// The customer's last name.
    pub last_name: String,
    /// The customer's email address.
    pub email: String,
    /// The customer's phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// The company the customer belongs to.
    #[serde(default)]
    pub company: Option<String>,
    /// The customer's lifecycle stage.
    pub status: CustomerStatus,
    /// The most recent star rating, in [0, 5]. 0 means "not rated yet".
    #[serde(default, deserialize_with = "rating_or_zero")]
    pub rating: f64,
    /// The average of all ratings, in [0, 5].
    #[serde(default, deserialize_with = "rating_or_zero")]
    pub average_rating: f64,
    /// Interactions embedded in the record, when the collaborator includes them.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
    /// The timestamp when the record was created.
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    /// The timestamp when the record was last updated.
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Customer {
    /// The customer's display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The payload for creating or updating a customer record.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub status: CustomerStatus,
}

/// One page of customer records, with collection totals.
#[derive(Debug, Clone)]
pub struct CustomerPage {
    /// The normalized records for this page.
    pub customers: Vec<Customer>,
    /// The total number of matching records across all pages.
    pub total_items: u64,
    /// The total number of pages.
    pub total_pages: u64,
}

/// A star-rating update. The rating is clamped to [0, 5] at construction,
/// so an out-of-range value is never transmitted.
#[derive(Debug, Clone, Serialize)]
pub struct RatingUpdate {
    pub rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
}

impl RatingUpdate {
    /// Creates a rating update, clamping `rating` into [0, 5].
    pub fn new(rating: f64, review: Option<String>) -> Self {
        Self {
            rating: rating.clamp(0.0, 5.0),
            review,
        }
    }
}

/// The rating read back for one customer. A customer with no reviews yet
/// reads back as a zero rating, not an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerRating {
    #[serde(default, deserialize_with = "rating_or_zero")]
    pub rating: f64,
    #[serde(default)]
    pub review_id: Option<i64>,
    #[serde(default)]
    pub review_text: String,
    #[serde(default, deserialize_with = "rating_or_zero")]
    pub average_rating: f64,
}
