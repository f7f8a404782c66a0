use crate::{
    auth::AuthUser,
    error::ApiError,
    models::{NewsItem, NewsStatus, Role, Task},
};

/// Capability
///
/// A named permission checked before a state transition is allowed. Every
/// protected operation names exactly one capability; the gate is evaluated
/// synchronously per request from the caller's resolved identity and keeps
/// no state between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Caller's role must be `admin`.
    Admin,
    /// Caller's role must be `reporter` or `admin`.
    ReporterOrAdmin,
}

/// require
///
/// The single policy-evaluation function consumed by every transition.
/// Returns `AuthorizationError` with a reason when the caller's role does
/// not satisfy the named capability.
pub fn require(caller: &AuthUser, capability: Capability) -> Result<(), ApiError> {
    match capability {
        Capability::Admin => {
            if caller.role == Role::Admin {
                Ok(())
            } else {
                Err(ApiError::authorization("Access denied. Admins only."))
            }
        }
        Capability::ReporterOrAdmin => {
            if caller.role == Role::Reporter || caller.role == Role::Admin {
                Ok(())
            } else {
                Err(ApiError::authorization(
                    "Access denied. Reporters or Admins only.",
                ))
            }
        }
    }
}

/// can_view_news
///
/// Visibility predicate for a single news item: an approved item is visible
/// to anyone; a pending or rejected item only to its author or an admin.
pub fn can_view_news(item: &NewsItem, caller: Option<&AuthUser>) -> bool {
    if item.status == NewsStatus::Approved {
        return true;
    }
    match caller {
        Some(user) => user.role == Role::Admin || user.id == item.author,
        None => false,
    }
}

/// require_task_assignee
///
/// Task status transitions require the caller to be the assigned reporter;
/// admins bypass the ownership check.
pub fn require_task_assignee(caller: &AuthUser, task: &Task) -> Result<(), ApiError> {
    if caller.role == Role::Admin || caller.id == task.assigned_to {
        Ok(())
    } else {
        Err(ApiError::authorization("This task is not assigned to you."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn caller(role: Role) -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            role,
        }
    }

    #[test]
    fn admin_capability_rejects_non_admin_roles() {
        assert!(require(&caller(Role::Admin), Capability::Admin).is_ok());
        assert!(require(&caller(Role::Reporter), Capability::Admin).is_err());
        assert!(require(&caller(Role::User), Capability::Admin).is_err());
    }

    #[test]
    fn reporter_or_admin_capability() {
        assert!(require(&caller(Role::Admin), Capability::ReporterOrAdmin).is_ok());
        assert!(require(&caller(Role::Reporter), Capability::ReporterOrAdmin).is_ok());
        assert!(require(&caller(Role::User), Capability::ReporterOrAdmin).is_err());
    }

    #[test]
    fn pending_news_is_hidden_from_anonymous_and_strangers() {
        let author = Uuid::new_v4();
        let item = NewsItem {
            author,
            status: NewsStatus::Pending,
            ..NewsItem::default()
        };

        assert!(!can_view_news(&item, None));
        assert!(!can_view_news(&item, Some(&caller(Role::User))));
        assert!(can_view_news(&item, Some(&caller(Role::Admin))));

        let owner = AuthUser {
            id: author,
            role: Role::Reporter,
        };
        assert!(can_view_news(&item, Some(&owner)));
    }

    #[test]
    fn approved_news_is_visible_to_everyone() {
        let item = NewsItem {
            status: NewsStatus::Approved,
            ..NewsItem::default()
        };
        assert!(can_view_news(&item, None));
    }

    #[test]
    fn task_transition_requires_assignee_or_admin() {
        let assignee = caller(Role::Reporter);
        let task = Task {
            assigned_to: assignee.id,
            ..Task::default()
        };

        assert!(require_task_assignee(&assignee, &task).is_ok());
        assert!(require_task_assignee(&caller(Role::Admin), &task).is_ok());
        assert!(require_task_assignee(&caller(Role::Reporter), &task).is_err());
    }
}
