use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::customer::CustomerStatus;

/// The largest page size the service will request.
pub const MAX_PER_PAGE: u32 = 100;

/// A status filter. `All` means unfiltered and is omitted from the wire
/// entirely, never sent as a literal `status=all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    All,
    Lead,
    Prospect,
    Customer,
    Inactive,
}

impl StatusFilter {
    /// The wire value for this filter, or `None` for `All`.
    pub fn wire_value(&self) -> Option<&'static str> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Lead => Some("lead"),
            StatusFilter::Prospect => Some("prospect"),
            StatusFilter::Customer => Some("customer"),
            StatusFilter::Inactive => Some("inactive"),
        }
    }
}

impl From<CustomerStatus> for StatusFilter {
    fn from(status: CustomerStatus) -> Self {
        match status {
            CustomerStatus::Lead => StatusFilter::Lead,
            CustomerStatus::Prospect => StatusFilter::Prospect,
            CustomerStatus::Customer => StatusFilter::Customer,
            CustomerStatus::Inactive => StatusFilter::Inactive,
        }
    }
}

/// The fields a customer listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    Company,
    CreatedAt,
    Rating,
    Email,
    Status,
}

impl SortField {
    /// The remote column this field sorts on. The collection has no single
    /// "name" column, so `Name` maps to `first_name`; no other field is
    /// renamed.
    pub fn wire_value(&self) -> &'static str {
        match self {
            SortField::Name => "first_name",
            SortField::Company => "company",
            SortField::CreatedAt => "created_at",
            SortField::Rating => "rating",
            SortField::Email => "email",
            SortField::Status => "status",
        }
    }
}

/// The direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn wire_value(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// A validated, structured description of "which customers to fetch,
/// filtered/sorted/paginated how". Constructed per request, not persisted.
#[derive(Debug, Clone)]
pub struct QueryIntent {
    /// Full-text search term across name, email, and company. Empty means
    /// plain listing.
    pub search_term: String,
    /// The status filter.
    pub status: StatusFilter,
    /// The sort field.
    pub sort_field: SortField,
    /// The sort direction.
    pub sort_direction: SortDirection,
    /// The 1-based page number.
    pub page: u32,
    /// The number of records per page.
    pub per_page: u32,
}

impl Default for QueryIntent {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            status: StatusFilter::All,
            sort_field: SortField::CreatedAt,
            sort_direction: SortDirection::Desc,
            page: 1,
            per_page: 10,
        }
    }
}

impl QueryIntent {
    /// True when this intent should route to the search capability rather
    /// than the plain listing capability.
    pub fn is_search(&self) -> bool {
        !self.search_term.trim().is_empty()
    }

    /// Validates the intent. Rejected intents never reach the wire.
    pub fn validate(&self) -> Result<()> {
        if self.page < 1 {
            return Err(AppError::Validation(
                "Page must be at least 1".to_string(),
            ));
        }

        if self.per_page < 1 {
            return Err(AppError::Validation(
                "Page size must be at least 1".to_string(),
            ));
        }

        if self.per_page > MAX_PER_PAGE {
            return Err(AppError::Validation(format!(
                "Page size must be at most {}",
                MAX_PER_PAGE
            )));
        }

        Ok(())
    }

    /// The query parameters for the plain listing capability.
    pub fn list_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
            ("sort_by", self.sort_field.wire_value().to_string()),
            ("sort_order", self.sort_direction.wire_value().to_string()),
        ];
        if let Some(status) = self.status.wire_value() {
            params.push(("status", status.to_string()));
        }
        params
    }

    /// The query parameters for the search capability. Status and sort are
    /// still forwarded; pagination is not part of the search contract.
    pub fn search_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("q", self.search_term.trim().to_string())];
        if let Some(status) = self.status.wire_value() {
            params.push(("status", status.to_string()));
        }
        params.push(("sort_by", self.sort_field.wire_value().to_string()));
        params.push(("sort_order", self.sort_direction.wire_value().to_string()));
        params
    }
}
