/// Router Module Index
///
/// Routing is organised by access class so every endpoint's exposure is
/// visible at the module level rather than buried in handler bodies.

/// Routes accessible to all clients (anonymous, read-mostly). Data
/// handlers here must enforce the approved-only visibility rule at the
/// repository or policy layer.
pub mod public;

/// Routes protected by the `AuthUser` extractor middleware; any valid
/// session may call them.
pub mod authenticated;

/// Routes for the reporter workflow (submission, own-task management).
/// Authenticated, with the reporter-or-admin capability checked in the
/// handlers.
pub mod reporter;

/// Routes nested under `/admin`. Every handler checks the admin
/// capability before touching the repository.
pub mod admin;
