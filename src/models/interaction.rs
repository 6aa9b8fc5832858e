use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The kind of interaction logged against a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionType {
    Call,
    Email,
    Meeting,
    Note,
}

/// Represents one logged interaction with a customer.
///
/// Interactions are append-only: they are created by explicit user action
/// and never edited or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// The unique identifier for the interaction.
    pub id: i64,
    /// The customer this interaction belongs to.
    pub customer_id: i64,
    /// The kind of interaction.
    #[serde(rename = "type")]
    pub kind: InteractionType,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
    /// When the interaction took place.
    #[serde(default)]
    pub date: Option<NaiveDateTime>,
    /// The timestamp when the record was created.
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// The payload for logging a new interaction.
#[derive(Debug, Clone, Serialize)]
pub struct NewInteraction {
    #[serde(rename = "type")]
    pub kind: InteractionType,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDateTime>,
}
