//! The moderation and role-elevation state machines.
//!
//! Transitions here compute the next state of an entity and validate their
//! preconditions; persistence happens afterwards through the repository, so
//! a failed transition never touches the store. Capability checks run
//! before any function in this module is called (see [`crate::policy`]).

use crate::{
    auth::AuthUser,
    error::ApiError,
    models::{NewsItem, NewsStatus, ReporterApplication, ReporterRequest, RequestStatus, Role},
};

/// initial_news_status
///
/// Admin submissions bypass moderation entirely and start `approved`;
/// everything else starts `pending`. This is an initial-state rule, not a
/// transition.
pub fn initial_news_status(author: &AuthUser) -> NewsStatus {
    if author.role == Role::Admin {
        NewsStatus::Approved
    } else {
        NewsStatus::Pending
    }
}

/// approve
///
/// Moves an item to `approved` from any prior state and clears the
/// rejection reason, including when re-approving a previously rejected
/// item. Calling on an already-approved item is allowed and leaves the
/// observable state unchanged.
pub fn approve(item: &mut NewsItem) {
    item.status = NewsStatus::Approved;
    item.rejection_reason.clear();
}

/// reject
///
/// Moves an item to `rejected` from any prior state, recording the reason.
/// An empty reason is a `ValidationError` and the item is left untouched.
pub fn reject(item: &mut NewsItem, reason: &str) -> Result<(), ApiError> {
    if reason.trim().is_empty() {
        return Err(ApiError::validation("Rejection reason is required."));
    }
    item.status = NewsStatus::Rejected;
    item.rejection_reason = reason.to_string();
    Ok(())
}

/// check_reporter_application
///
/// Preconditions for submitting a reporter request. Only `user`-role
/// accounts may apply; an existing request blocks a new one, with the
/// conflict message depending on its status. A rejected applicant stays
/// blocked permanently.
pub fn check_reporter_application(
    caller: &AuthUser,
    existing: Option<&ReporterRequest>,
    details: &ReporterApplication,
) -> Result<(), ApiError> {
    if caller.role != Role::User {
        return Err(ApiError::validation(
            "Only users can apply to become a reporter.",
        ));
    }
    if let Some(request) = existing {
        return Err(match request.status {
            RequestStatus::Pending => {
                ApiError::conflict("You already have a pending reporter request.")
            }
            RequestStatus::Approved => {
                ApiError::conflict("You are already approved as a reporter.")
            }
            RequestStatus::Rejected => {
                ApiError::conflict("Your request was rejected. Please contact admin.")
            }
        });
    }
    if details.phone_number.trim().is_empty() {
        return Err(ApiError::validation("Phone number is required."));
    }
    Ok(())
}
