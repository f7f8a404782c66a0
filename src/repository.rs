use crate::models::{
    AdminDashboardStats, ApplicationStatus, Comment, ContactMessage, ContactRequest,
    CreateJobRequest, CreateNewsRequest, CreateTaskRequest, Job, JobApplication, NewUser, NewsItem,
    NewsStatus, ReporterApplication, ReporterRequest, RequestStatus, Role, SiteConfig, Task,
    TaskStatus, UpdateNewsRequest, UpdateSiteConfigRequest, User, UserProfile,
};
use async_trait::async_trait;
use sqlx::{PgPool, query_builder::QueryBuilder};
use std::sync::Arc;
use uuid::Uuid;

/// Repository
///
/// Abstract contract for all persistence operations. Handlers depend only
/// on this trait, so the Postgres implementation can be replaced by an
/// in-memory double in tests.
///
/// Mutating methods return `Option`/`bool` rather than raw driver errors:
/// a `None`/`false` means the row did not exist (or the write failed, in
/// which case the error has already been logged). The state machines in
/// `moderation` decide *what* to write; this layer only persists.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Users ---
    async fn create_user(&self, user: NewUser) -> Option<User>;
    async fn get_user(&self, id: Uuid) -> Option<User>;
    async fn find_user_by_email(&self, email: &str) -> Option<User>;
    async fn list_users(&self) -> Vec<UserProfile>;

    // --- News ---
    // Initial status is decided by the moderation module, not here.
    async fn create_news(
        &self,
        req: CreateNewsRequest,
        author: Uuid,
        status: NewsStatus,
    ) -> Option<NewsItem>;
    /// Public listing: only approved items, newest first.
    async fn list_approved_news(&self, category: Option<String>) -> Vec<NewsItem>;
    async fn list_news_by_author(&self, author: Uuid) -> Vec<NewsItem>;
    /// Admin listing: every item regardless of status.
    async fn list_all_news(&self) -> Vec<NewsItem>;
    /// Retrieval without a visibility check; the caller applies the policy.
    async fn get_news(&self, id: Uuid) -> Option<NewsItem>;
    async fn update_news(&self, id: Uuid, req: UpdateNewsRequest) -> Option<NewsItem>;
    /// Persists a moderation transition. Last write wins: there is no
    /// version check, so concurrent transitions race freely.
    async fn set_news_status(
        &self,
        id: Uuid,
        status: NewsStatus,
        rejection_reason: String,
    ) -> Option<NewsItem>;
    async fn delete_news(&self, id: Uuid) -> bool;

    // --- Comments ---
    async fn add_comment(&self, news_id: Uuid, user_id: Uuid, text: String) -> Option<Comment>;
    async fn get_comments(&self, news_id: Uuid) -> Vec<Comment>;

    // --- Reporter Requests ---
    async fn create_reporter_request(
        &self,
        user_id: Uuid,
        details: ReporterApplication,
    ) -> Option<ReporterRequest>;
    /// Uniqueness lookup backing the one-request-per-user rule.
    async fn get_request_for_user(&self, user_id: Uuid) -> Option<ReporterRequest>;
    async fn list_reporter_requests(&self, status: Option<RequestStatus>) -> Vec<ReporterRequest>;
    /// Grants the reporter role and marks the request approved in a single
    /// transaction, so the two writes cannot diverge.
    async fn approve_reporter_request(&self, id: Uuid) -> Option<ReporterRequest>;
    /// Marks the request rejected; the user's role is left unchanged.
    async fn reject_reporter_request(&self, id: Uuid) -> Option<ReporterRequest>;
    async fn delete_reporter_request(&self, id: Uuid) -> bool;

    // --- Tasks ---
    async fn create_task(&self, req: CreateTaskRequest) -> Option<Task>;
    async fn list_tasks(&self) -> Vec<Task>;
    async fn list_tasks_for(&self, assigned_to: Uuid) -> Vec<Task>;
    async fn get_task(&self, id: Uuid) -> Option<Task>;
    async fn set_task_status(&self, id: Uuid, status: TaskStatus) -> Option<Task>;
    async fn delete_task(&self, id: Uuid) -> bool;

    // --- Jobs & Applications ---
    async fn create_job(&self, req: CreateJobRequest) -> Option<Job>;
    async fn list_jobs(&self) -> Vec<Job>;
    async fn update_job(&self, id: Uuid, req: CreateJobRequest) -> Option<Job>;
    async fn delete_job(&self, id: Uuid) -> bool;
    async fn create_application(
        &self,
        job_id: Uuid,
        applicant_name: String,
        applicant_email: String,
        resume: String,
    ) -> Option<JobApplication>;
    async fn list_applications(&self) -> Vec<JobApplication>;
    async fn set_application_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Option<JobApplication>;
    async fn delete_application(&self, id: Uuid) -> bool;

    // --- Contact Messages ---
    async fn create_message(&self, req: ContactRequest) -> Option<ContactMessage>;
    async fn list_messages(&self) -> Vec<ContactMessage>;
    async fn delete_message(&self, id: Uuid) -> bool;

    // --- Site Config ---
    /// Returns the singleton config, creating it with defaults on first read.
    async fn get_site_config(&self) -> SiteConfig;
    async fn update_site_config(&self, req: UpdateSiteConfigRequest) -> SiteConfig;

    // --- Dashboard ---
    async fn get_stats(&self) -> AdminDashboardStats;
}

/// RepositoryState
///
/// Shared handle to the persistence layer in the application state.
pub type RepositoryState = Arc<dyn Repository>;

// Shared SELECT lists. News and comments are always returned enriched with
// the author's username.
const NEWS_COLS: &str = "n.id, n.title, n.description, n.author, u.username AS author_name, \
     n.category, n.image, n.video, n.youtube_link, n.status, n.rejection_reason, \
     n.created_at, n.updated_at";

const REQUEST_COLS: &str = "r.id, r.user_id, u.username AS username, r.status, r.phone_number, \
     r.reason, r.experience, r.area_of_interest, r.location, r.created_at";

/// PostgresRepository
///
/// The concrete implementation backed by PostgreSQL. All queries use the
/// runtime-checked sqlx API; read failures are logged and degrade to
/// empty/`None` results rather than surfacing driver errors to handlers.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count(&self, sql: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(sql)
            .fetch_one(&self.pool)
            .await
            .unwrap_or(0)
    }

    /// Both writes of the role elevation inside one transaction: a failure
    /// of either leaves role and request status consistent.
    async fn approve_request_tx(&self, id: Uuid) -> Result<Option<ReporterRequest>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let user_id: Option<Uuid> =
            sqlx::query_scalar("SELECT user_id FROM reporter_requests WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(user_id) = user_id else {
            return Ok(None);
        };

        sqlx::query("UPDATE users SET role = $1 WHERE id = $2")
            .bind(Role::Reporter.as_str())
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let request = sqlx::query_as::<_, ReporterRequest>(
            "UPDATE reporter_requests SET status = $1 WHERE id = $2 \
             RETURNING id, user_id, status, phone_number, reason, experience, \
                       area_of_interest, location, created_at",
        )
        .bind(RequestStatus::Approved.as_str())
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(request)
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    // --- Users ---

    async fn create_user(&self, user: NewUser) -> Option<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, email, password_hash, role, bio) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, username, email, password_hash, role, bio",
        )
        .bind(Uuid::new_v4())
        .bind(user.username)
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.role.as_str())
        .bind(user.bio)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("create_user error: {:?}", e);
            None
        })
    }

    async fn get_user(&self, id: Uuid) -> Option<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, role, bio FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("get_user error: {:?}", e);
            None
        })
    }

    async fn find_user_by_email(&self, email: &str) -> Option<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, role, bio FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("find_user_by_email error: {:?}", e);
            None
        })
    }

    async fn list_users(&self) -> Vec<UserProfile> {
        sqlx::query_as::<_, UserProfile>(
            "SELECT id, username, email, bio, role FROM users ORDER BY username ASC",
        )
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("list_users error: {:?}", e);
            vec![]
        })
    }

    // --- News ---

    async fn create_news(
        &self,
        req: CreateNewsRequest,
        author: Uuid,
        status: NewsStatus,
    ) -> Option<NewsItem> {
        sqlx::query_as::<_, NewsItem>(
            "INSERT INTO news \
                 (id, title, description, author, category, image, video, youtube_link, \
                  status, rejection_reason, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, '', NOW(), NOW()) \
             RETURNING id, title, description, author, category, image, video, youtube_link, \
                       status, rejection_reason, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(req.title)
        .bind(req.description)
        .bind(author)
        .bind(req.category.unwrap_or_else(|| "General".to_string()))
        .bind(req.image_key.unwrap_or_default())
        .bind(req.video_key.unwrap_or_default())
        .bind(req.youtube_link.unwrap_or_default())
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("create_news error: {:?}", e);
            None
        })
    }

    /// Flexible public listing via QueryBuilder; the `status = 'approved'`
    /// restriction is part of the base query and never optional.
    async fn list_approved_news(&self, category: Option<String>) -> Vec<NewsItem> {
        let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(format!(
            "SELECT {NEWS_COLS} FROM news n JOIN users u ON n.author = u.id \
             WHERE n.status = 'approved' "
        ));

        if let Some(cat) = category {
            builder.push(" AND n.category = ");
            builder.push_bind(cat);
        }

        builder.push(" ORDER BY n.created_at DESC");

        builder
            .build_query_as::<NewsItem>()
            .fetch_all(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("list_approved_news error: {:?}", e);
                vec![]
            })
    }

    async fn list_news_by_author(&self, author: Uuid) -> Vec<NewsItem> {
        sqlx::query_as::<_, NewsItem>(&format!(
            "SELECT {NEWS_COLS} FROM news n JOIN users u ON n.author = u.id \
             WHERE n.author = $1 ORDER BY n.created_at DESC"
        ))
        .bind(author)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("list_news_by_author error: {:?}", e);
            vec![]
        })
    }

    async fn list_all_news(&self) -> Vec<NewsItem> {
        sqlx::query_as::<_, NewsItem>(&format!(
            "SELECT {NEWS_COLS} FROM news n JOIN users u ON n.author = u.id \
             ORDER BY n.created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("list_all_news error: {:?}", e);
            vec![]
        })
    }

    async fn get_news(&self, id: Uuid) -> Option<NewsItem> {
        sqlx::query_as::<_, NewsItem>(&format!(
            "SELECT {NEWS_COLS} FROM news n JOIN users u ON n.author = u.id WHERE n.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("get_news error: {:?}", e);
            None
        })
    }

    async fn update_news(&self, id: Uuid, req: UpdateNewsRequest) -> Option<NewsItem> {
        sqlx::query_as::<_, NewsItem>(
            "UPDATE news \
             SET title = $2, \
                 description = $3, \
                 category = $4, \
                 youtube_link = COALESCE($5, youtube_link), \
                 image = COALESCE($6, image), \
                 video = COALESCE($7, video), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, title, description, author, category, image, video, youtube_link, \
                       status, rejection_reason, created_at, updated_at",
        )
        .bind(id)
        .bind(req.title)
        .bind(req.description)
        .bind(req.category.unwrap_or_else(|| "General".to_string()))
        .bind(req.youtube_link)
        .bind(req.image_key)
        .bind(req.video_key)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("update_news error: {:?}", e);
            None
        })
    }

    async fn set_news_status(
        &self,
        id: Uuid,
        status: NewsStatus,
        rejection_reason: String,
    ) -> Option<NewsItem> {
        sqlx::query_as::<_, NewsItem>(
            "UPDATE news SET status = $2, rejection_reason = $3, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, title, description, author, category, image, video, youtube_link, \
                       status, rejection_reason, created_at, updated_at",
        )
        .bind(id)
        .bind(status.as_str())
        .bind(rejection_reason)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("set_news_status error: {:?}", e);
            None
        })
    }

    async fn delete_news(&self, id: Uuid) -> bool {
        match sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
        {
            Ok(res) => res.rows_affected() > 0,
            Err(e) => {
                tracing::error!("delete_news error: {:?}", e);
                false
            }
        }
    }

    // --- Comments ---

    async fn add_comment(&self, news_id: Uuid, user_id: Uuid, text: String) -> Option<Comment> {
        sqlx::query_as::<_, Comment>(
            "WITH inserted AS ( \
                 INSERT INTO comments (id, news_id, user_id, text, created_at) \
                 VALUES ($1, $2, $3, $4, NOW()) \
                 RETURNING id, news_id, user_id, text, created_at \
             ) \
             SELECT i.id, i.news_id, i.user_id, i.text, u.username AS author_name, i.created_at \
             FROM inserted i JOIN users u ON i.user_id = u.id",
        )
        .bind(Uuid::new_v4())
        .bind(news_id)
        .bind(user_id)
        .bind(text)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("add_comment error: {:?}", e);
            None
        })
    }

    async fn get_comments(&self, news_id: Uuid) -> Vec<Comment> {
        sqlx::query_as::<_, Comment>(
            "SELECT c.id, c.news_id, c.user_id, c.text, u.username AS author_name, c.created_at \
             FROM comments c JOIN users u ON c.user_id = u.id \
             WHERE c.news_id = $1 ORDER BY c.created_at DESC",
        )
        .bind(news_id)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("get_comments error: {:?}", e);
            vec![]
        })
    }

    // --- Reporter Requests ---

    async fn create_reporter_request(
        &self,
        user_id: Uuid,
        details: ReporterApplication,
    ) -> Option<ReporterRequest> {
        sqlx::query_as::<_, ReporterRequest>(
            "INSERT INTO reporter_requests \
                 (id, user_id, status, phone_number, reason, experience, area_of_interest, \
                  location, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW()) \
             RETURNING id, user_id, status, phone_number, reason, experience, \
                       area_of_interest, location, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(RequestStatus::Pending.as_str())
        .bind(details.phone_number)
        .bind(details.reason.unwrap_or_default())
        .bind(details.experience.unwrap_or_default())
        .bind(details.area_of_interest.unwrap_or_default())
        .bind(details.location.unwrap_or_default())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("create_reporter_request error: {:?}", e);
            None
        })
    }

    async fn get_request_for_user(&self, user_id: Uuid) -> Option<ReporterRequest> {
        sqlx::query_as::<_, ReporterRequest>(
            "SELECT id, user_id, status, phone_number, reason, experience, area_of_interest, \
                    location, created_at \
             FROM reporter_requests WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("get_request_for_user error: {:?}", e);
            None
        })
    }

    async fn list_reporter_requests(&self, status: Option<RequestStatus>) -> Vec<ReporterRequest> {
        let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(format!(
            "SELECT {REQUEST_COLS} FROM reporter_requests r JOIN users u ON r.user_id = u.id \
             WHERE TRUE "
        ));

        if let Some(status) = status {
            builder.push(" AND r.status = ");
            builder.push_bind(status.as_str());
        }

        builder.push(" ORDER BY r.created_at DESC");

        builder
            .build_query_as::<ReporterRequest>()
            .fetch_all(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("list_reporter_requests error: {:?}", e);
                vec![]
            })
    }

    async fn approve_reporter_request(&self, id: Uuid) -> Option<ReporterRequest> {
        match self.approve_request_tx(id).await {
            Ok(request) => request,
            Err(e) => {
                tracing::error!("approve_reporter_request error: {:?}", e);
                None
            }
        }
    }

    async fn reject_reporter_request(&self, id: Uuid) -> Option<ReporterRequest> {
        sqlx::query_as::<_, ReporterRequest>(
            "UPDATE reporter_requests SET status = $2 WHERE id = $1 \
             RETURNING id, user_id, status, phone_number, reason, experience, \
                       area_of_interest, location, created_at",
        )
        .bind(id)
        .bind(RequestStatus::Rejected.as_str())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("reject_reporter_request error: {:?}", e);
            None
        })
    }

    async fn delete_reporter_request(&self, id: Uuid) -> bool {
        match sqlx::query("DELETE FROM reporter_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
        {
            Ok(res) => res.rows_affected() > 0,
            Err(e) => {
                tracing::error!("delete_reporter_request error: {:?}", e);
                false
            }
        }
    }

    // --- Tasks ---

    async fn create_task(&self, req: CreateTaskRequest) -> Option<Task> {
        sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (id, title, description, assigned_to, status, created_at) \
             VALUES ($1, $2, $3, $4, $5, NOW()) \
             RETURNING id, title, description, assigned_to, status, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(req.title)
        .bind(req.description.unwrap_or_default())
        .bind(req.assigned_to)
        .bind(TaskStatus::Pending.as_str())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("create_task error: {:?}", e);
            None
        })
    }

    async fn list_tasks(&self) -> Vec<Task> {
        sqlx::query_as::<_, Task>(
            "SELECT id, title, description, assigned_to, status, created_at \
             FROM tasks ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("list_tasks error: {:?}", e);
            vec![]
        })
    }

    async fn list_tasks_for(&self, assigned_to: Uuid) -> Vec<Task> {
        sqlx::query_as::<_, Task>(
            "SELECT id, title, description, assigned_to, status, created_at \
             FROM tasks WHERE assigned_to = $1 ORDER BY created_at DESC",
        )
        .bind(assigned_to)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("list_tasks_for error: {:?}", e);
            vec![]
        })
    }

    async fn get_task(&self, id: Uuid) -> Option<Task> {
        sqlx::query_as::<_, Task>(
            "SELECT id, title, description, assigned_to, status, created_at \
             FROM tasks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("get_task error: {:?}", e);
            None
        })
    }

    async fn set_task_status(&self, id: Uuid, status: TaskStatus) -> Option<Task> {
        sqlx::query_as::<_, Task>(
            "UPDATE tasks SET status = $2 WHERE id = $1 \
             RETURNING id, title, description, assigned_to, status, created_at",
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("set_task_status error: {:?}", e);
            None
        })
    }

    async fn delete_task(&self, id: Uuid) -> bool {
        match sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
        {
            Ok(res) => res.rows_affected() > 0,
            Err(e) => {
                tracing::error!("delete_task error: {:?}", e);
                false
            }
        }
    }

    // --- Jobs & Applications ---

    async fn create_job(&self, req: CreateJobRequest) -> Option<Job> {
        sqlx::query_as::<_, Job>(
            "INSERT INTO jobs (id, title, description, requirements, location, company, \
                               posted_by, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, NOW()) \
             RETURNING id, title, description, requirements, location, company, posted_by, \
                       created_at",
        )
        .bind(Uuid::new_v4())
        .bind(req.title)
        .bind(req.description)
        .bind(req.requirements)
        .bind(req.location)
        .bind(req.company)
        .bind(req.posted_by)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("create_job error: {:?}", e);
            None
        })
    }

    async fn list_jobs(&self) -> Vec<Job> {
        sqlx::query_as::<_, Job>(
            "SELECT id, title, description, requirements, location, company, posted_by, \
                    created_at \
             FROM jobs ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("list_jobs error: {:?}", e);
            vec![]
        })
    }

    async fn update_job(&self, id: Uuid, req: CreateJobRequest) -> Option<Job> {
        sqlx::query_as::<_, Job>(
            "UPDATE jobs SET title = $2, description = $3, requirements = $4, location = $5, \
                             company = $6, posted_by = $7 \
             WHERE id = $1 \
             RETURNING id, title, description, requirements, location, company, posted_by, \
                       created_at",
        )
        .bind(id)
        .bind(req.title)
        .bind(req.description)
        .bind(req.requirements)
        .bind(req.location)
        .bind(req.company)
        .bind(req.posted_by)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("update_job error: {:?}", e);
            None
        })
    }

    async fn delete_job(&self, id: Uuid) -> bool {
        match sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
        {
            Ok(res) => res.rows_affected() > 0,
            Err(e) => {
                tracing::error!("delete_job error: {:?}", e);
                false
            }
        }
    }

    async fn create_application(
        &self,
        job_id: Uuid,
        applicant_name: String,
        applicant_email: String,
        resume: String,
    ) -> Option<JobApplication> {
        sqlx::query_as::<_, JobApplication>(
            "INSERT INTO job_applications \
                 (id, job_id, applicant_name, applicant_email, resume, status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, NOW()) \
             RETURNING id, job_id, applicant_name, applicant_email, resume, status, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(job_id)
        .bind(applicant_name)
        .bind(applicant_email)
        .bind(resume)
        .bind(ApplicationStatus::Pending.as_str())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("create_application error: {:?}", e);
            None
        })
    }

    async fn list_applications(&self) -> Vec<JobApplication> {
        sqlx::query_as::<_, JobApplication>(
            "SELECT a.id, a.job_id, j.title AS job_title, a.applicant_name, a.applicant_email, \
                    a.resume, a.status, a.created_at \
             FROM job_applications a JOIN jobs j ON a.job_id = j.id \
             ORDER BY a.created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("list_applications error: {:?}", e);
            vec![]
        })
    }

    async fn set_application_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Option<JobApplication> {
        sqlx::query_as::<_, JobApplication>(
            "UPDATE job_applications SET status = $2 WHERE id = $1 \
             RETURNING id, job_id, applicant_name, applicant_email, resume, status, created_at",
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("set_application_status error: {:?}", e);
            None
        })
    }

    async fn delete_application(&self, id: Uuid) -> bool {
        match sqlx::query("DELETE FROM job_applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
        {
            Ok(res) => res.rows_affected() > 0,
            Err(e) => {
                tracing::error!("delete_application error: {:?}", e);
                false
            }
        }
    }

    // --- Contact Messages ---

    async fn create_message(&self, req: ContactRequest) -> Option<ContactMessage> {
        sqlx::query_as::<_, ContactMessage>(
            "INSERT INTO messages (id, name, email, message, created_at) \
             VALUES ($1, $2, $3, $4, NOW()) \
             RETURNING id, name, email, message, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(req.name)
        .bind(req.email)
        .bind(req.message)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("create_message error: {:?}", e);
            None
        })
    }

    async fn list_messages(&self) -> Vec<ContactMessage> {
        sqlx::query_as::<_, ContactMessage>(
            "SELECT id, name, email, message, created_at FROM messages ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("list_messages error: {:?}", e);
            vec![]
        })
    }

    async fn delete_message(&self, id: Uuid) -> bool {
        match sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
        {
            Ok(res) => res.rows_affected() > 0,
            Err(e) => {
                tracing::error!("delete_message error: {:?}", e);
                false
            }
        }
    }

    // --- Site Config ---

    async fn get_site_config(&self) -> SiteConfig {
        let existing = sqlx::query_as::<_, SiteConfig>(
            "SELECT hero_image, hero_headline, hero_subheading, hero_cta_text, hero_cta_link \
             FROM site_config WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("get_site_config error: {:?}", e);
            None
        });

        if let Some(config) = existing {
            return config;
        }

        // First read: seed the singleton row with defaults.
        let defaults = SiteConfig::default();
        sqlx::query_as::<_, SiteConfig>(
            "INSERT INTO site_config \
                 (id, hero_image, hero_headline, hero_subheading, hero_cta_text, hero_cta_link) \
             VALUES (1, $1, $2, $3, $4, $5) \
             ON CONFLICT (id) DO NOTHING \
             RETURNING hero_image, hero_headline, hero_subheading, hero_cta_text, hero_cta_link",
        )
        .bind(&defaults.hero_image)
        .bind(&defaults.hero_headline)
        .bind(&defaults.hero_subheading)
        .bind(&defaults.hero_cta_text)
        .bind(&defaults.hero_cta_link)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("seed_site_config error: {:?}", e);
            None
        })
        .unwrap_or(defaults)
    }

    async fn update_site_config(&self, req: UpdateSiteConfigRequest) -> SiteConfig {
        // Make sure the singleton exists before the partial update.
        let current = self.get_site_config().await;

        sqlx::query_as::<_, SiteConfig>(
            "UPDATE site_config \
             SET hero_image = COALESCE($1, hero_image), \
                 hero_headline = COALESCE($2, hero_headline), \
                 hero_subheading = COALESCE($3, hero_subheading), \
                 hero_cta_text = COALESCE($4, hero_cta_text), \
                 hero_cta_link = COALESCE($5, hero_cta_link) \
             WHERE id = 1 \
             RETURNING hero_image, hero_headline, hero_subheading, hero_cta_text, hero_cta_link",
        )
        .bind(req.hero_image_key)
        .bind(req.hero_headline)
        .bind(req.hero_subheading)
        .bind(req.hero_cta_text)
        .bind(req.hero_cta_link)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("update_site_config error: {:?}", e);
            None
        })
        .unwrap_or(current)
    }

    // --- Dashboard ---

    async fn get_stats(&self) -> AdminDashboardStats {
        AdminDashboardStats {
            total_users: self.count("SELECT COUNT(*) FROM users").await,
            total_news: self.count("SELECT COUNT(*) FROM news").await,
            pending_news: self
                .count("SELECT COUNT(*) FROM news WHERE status = 'pending'")
                .await,
            reporter_requests: self.count("SELECT COUNT(*) FROM reporter_requests").await,
            total_jobs: self.count("SELECT COUNT(*) FROM jobs").await,
            total_applications: self.count("SELECT COUNT(*) FROM job_applications").await,
            total_messages: self.count("SELECT COUNT(*) FROM messages").await,
        }
    }
}
