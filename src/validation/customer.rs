use crate::error::{AppError, Result};
use crate::models::customer::CustomerDraft;
use crate::validation::auth::validate_email;

/// Validates a customer draft before it is sent to the collaborator.
///
/// # Arguments
///
/// * `draft` - The draft to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the draft is valid.
pub fn validate_draft(draft: &CustomerDraft) -> Result<()> {
    if draft.first_name.trim().is_empty() {
        return Err(AppError::Validation(
            "First name cannot be empty".to_string(),
        ));
    }

    if draft.last_name.trim().is_empty() {
        return Err(AppError::Validation(
            "Last name cannot be empty".to_string(),
        ));
    }

    validate_email(&draft.email)?;

    Ok(())
}
