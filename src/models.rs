use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Status & Role Vocabularies ---

/// Role
///
/// The RBAC field on a user account. Role is mutable only through the
/// reporter-request approval transition (user -> reporter); admin accounts
/// are provisioned out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    #[default]
    User,
    Reporter,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Reporter => "reporter",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "user" => Ok(Self::User),
            "reporter" => Ok(Self::Reporter),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// NewsStatus
///
/// The moderation lifecycle of a news item. New submissions start `pending`
/// unless the author is an admin (admin submissions bypass moderation and
/// start `approved`). Only admin action moves an item to `approved` or
/// `rejected`; there is no path back to `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum NewsStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl NewsStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for NewsStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for NewsStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("unknown news status: {other}")),
        }
    }
}

/// RequestStatus
///
/// Lifecycle of a reporter request. `approved` is terminal and implies the
/// linked user's role was elevated; `rejected` is terminal and blocks
/// reapplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for RequestStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("unknown request status: {other}")),
        }
    }
}

/// TaskStatus
///
/// Assignment workflow for reporter tasks. Advanced only by the assigned
/// reporter or an admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown task status: {other}")),
        }
    }
}

/// ApplicationStatus
///
/// Job-application workflow. Values are capitalised on the wire
/// (`Pending`/`Approved`/`Rejected`), unlike the other status vocabularies;
/// the casing is preserved for compatibility with existing clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "PascalCase")]
#[ts(export)]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ApplicationStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "Pending" => Ok(Self::Pending),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            other => Err(format!("unknown application status: {other}")),
        }
    }
}

// --- Core Application Schemas (Mapped to Database) ---

/// User
///
/// Canonical identity record in the `users` table. Email is unique across
/// all users. The password hash never leaves the server: it is skipped on
/// serialization and excluded from the exported TypeScript type.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    #[schema(ignore)]
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub bio: String,
}

/// NewsItem
///
/// A submitted news article in the `news` table. The moderation fields
/// (`status`, `rejection_reason`) are mutated only through the moderation
/// state machine; `rejection_reason` is non-empty exactly when the item is
/// rejected.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct NewsItem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    // Reference to the submitting user, resolved by lookup.
    pub author: Uuid,
    // Loaded via a JOIN with `users` for list/detail responses.
    #[sqlx(default)]
    pub author_name: Option<String>,
    pub category: String,
    // Object keys / URLs for attached media; empty when absent.
    pub image: String,
    pub video: String,
    pub youtube_link: String,
    #[sqlx(try_from = "String")]
    pub status: NewsStatus,
    pub rejection_reason: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// ReporterRequest
///
/// A user's application for the reporter role, at most one per user.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct ReporterRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    // Applicant's username, joined in for the admin review queue.
    #[sqlx(default)]
    pub username: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: RequestStatus,
    pub phone_number: String,
    pub reason: String,
    pub experience: String,
    pub area_of_interest: String,
    pub location: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// Task
///
/// An assignment created by an admin for a specific reporter.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub assigned_to: Uuid,
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// Job
///
/// A job-board posting, managed by admins and listed publicly.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub location: String,
    pub company: String,
    pub posted_by: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// JobApplication
///
/// An application against a job posting. `resume` holds either an external
/// link or the object key of an uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct JobApplication {
    pub id: Uuid,
    pub job_id: Uuid,
    #[sqlx(default)]
    pub job_title: Option<String>,
    pub applicant_name: String,
    pub applicant_email: String,
    pub resume: String,
    #[sqlx(try_from = "String")]
    pub status: ApplicationStatus,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// Comment
///
/// A reader comment on a news item, enriched with the author's username via
/// a JOIN when listed.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Comment {
    pub id: Uuid,
    pub news_id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    #[sqlx(default)]
    pub author_name: Option<String>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// ContactMessage
///
/// A message submitted through the public contact form.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// SiteConfig
///
/// Singleton hero-section configuration for the public landing page.
/// Auto-created with defaults on first read.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[ts(export)]
pub struct SiteConfig {
    pub hero_image: String,
    pub hero_headline: String,
    pub hero_subheading: String,
    pub hero_cta_text: String,
    pub hero_cta_link: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            hero_image: "https://via.placeholder.com/1200x500".to_string(),
            hero_headline: "Top Stories of the Day".to_string(),
            hero_subheading: "Stay informed with the latest news and analysis.".to_string(),
            hero_cta_text: "Explore Top News".to_string(),
            hero_cta_link: "/category/National".to_string(),
        }
    }
}

// --- Request Payloads (Input Schemas) ---

/// RegisterRequest
///
/// Input for POST /register. Role is restricted to `user`/`reporter` at the
/// handler; admins are never self-registered.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
    pub bio: Option<String>,
}

/// LoginRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// LoginResponse
///
/// Output of a successful login: the signed bearer token plus the identity
/// fields the SPA caches.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
    pub user_id: Uuid,
    pub username: String,
}

/// UserProfile
///
/// API-facing view of a user account (GET /profile, GET /admin/users).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub bio: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            bio: user.bio,
            role: user.role,
        }
    }
}

/// NewUser
///
/// Internal repository input for user creation; built by the register
/// handler after hashing the password. Not an API schema.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub bio: String,
}

/// CreateNewsRequest
///
/// Input for POST /news. Media keys are the result of the presigned upload
/// flow; the youtube link is stored verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateNewsRequest {
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub youtube_link: Option<String>,
    pub image_key: Option<String>,
    pub video_key: Option<String>,
}

/// UpdateNewsRequest
///
/// Input for the admin edit endpoint. Title and description are mandatory
/// on every update; media keys replace the stored values only when present.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateNewsRequest {
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub youtube_link: Option<String>,
    pub image_key: Option<String>,
    pub video_key: Option<String>,
}

/// RejectNewsRequest
///
/// Input for the reject transition; the reason must be non-empty.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct RejectNewsRequest {
    pub rejection_reason: String,
}

/// ReporterApplication
///
/// Input for POST /apply-reporter. The phone number is required; the rest
/// is free-text context for the reviewing admin.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ReporterApplication {
    pub phone_number: String,
    pub reason: Option<String>,
    pub experience: Option<String>,
    pub area_of_interest: Option<String>,
    pub location: Option<String>,
}

/// CreateTaskRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Uuid,
}

/// UpdateTaskStatusRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateTaskStatusRequest {
    pub status: TaskStatus,
}

/// CreateJobRequest
///
/// Input for job creation and update; every field is required.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub location: String,
    pub company: String,
    pub posted_by: String,
}

/// JobApplicationRequest
///
/// Input for POST /jobs/{id}/apply. Either `resume` (an external link) or
/// `resume_key` (an uploaded object key) must be provided.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct JobApplicationRequest {
    pub applicant_name: String,
    pub applicant_email: String,
    pub resume: Option<String>,
    pub resume_key: Option<String>,
}

/// UpdateApplicationStatusRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateApplicationStatusRequest {
    pub status: ApplicationStatus,
}

/// CreateCommentRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateCommentRequest {
    pub text: String,
}

/// ContactRequest
///
/// Input for the public contact form; all fields are required.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// UpdateSiteConfigRequest
///
/// Partial update for the hero section; only provided fields are written.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateSiteConfigRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_headline: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_subheading: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_cta_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_cta_link: Option<String>,
}

/// PresignedUrlRequest
///
/// Input for requesting a short-lived upload URL. The MIME type constrains
/// the upload on the storage side.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, TS, Default)]
#[ts(export)]
pub struct PresignedUrlRequest {
    /// The original filename, used to derive the file extension.
    #[schema(example = "press_photo.jpg")]
    pub filename: String,
    /// The MIME type the storage service will require on the PUT.
    #[schema(example = "image/jpeg")]
    pub file_type: String,
}

/// PresignedUrlResponse
///
/// The temporary upload URL plus the object key to reference afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, TS, Default)]
#[ts(export)]
pub struct PresignedUrlResponse {
    pub upload_url: String,
    pub resource_key: String,
}

// --- Dashboard Schemas (Output) ---

/// AdminDashboardStats
///
/// Counters for the admin dashboard (GET /admin/stats).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct AdminDashboardStats {
    pub total_users: i64,
    pub total_news: i64,
    /// Items currently awaiting moderation.
    pub pending_news: i64,
    pub reporter_requests: i64,
    pub total_jobs: i64,
    pub total_applications: i64,
    pub total_messages: i64,
}
