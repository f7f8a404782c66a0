//! Shared test fixtures: a stateful in-memory repository standing in for
//! Postgres, plus helpers to build an `AppState` and seed records.

use async_trait::async_trait;
use chrono::Utc;
use newsdesk::{
    AppConfig, AppState, MockStorageService,
    auth::AuthUser,
    models::{
        AdminDashboardStats, ApplicationStatus, Comment, ContactMessage, ContactRequest,
        CreateJobRequest, CreateNewsRequest, CreateTaskRequest, Job, JobApplication, NewUser,
        NewsItem, NewsStatus, ReporterApplication, ReporterRequest, RequestStatus, Role,
        SiteConfig, Task, TaskStatus, UpdateNewsRequest, UpdateSiteConfigRequest, User,
        UserProfile,
    },
    repository::{Repository, RepositoryState},
    storage::StorageState,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Default)]
struct Store {
    users: HashMap<Uuid, User>,
    news: HashMap<Uuid, NewsItem>,
    requests: HashMap<Uuid, ReporterRequest>,
    tasks: HashMap<Uuid, Task>,
    jobs: HashMap<Uuid, Job>,
    applications: HashMap<Uuid, JobApplication>,
    comments: HashMap<Uuid, Comment>,
    messages: HashMap<Uuid, ContactMessage>,
    site_config: Option<SiteConfig>,
}

/// InMemoryRepo
///
/// Implements the full `Repository` contract over hash maps so handler
/// tests exercise real state transitions without a database. Writes mirror
/// the Postgres implementation's semantics, including the all-or-nothing
/// role elevation.
#[derive(Default)]
pub struct InMemoryRepo {
    store: Mutex<Store>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a user directly and returns the matching caller identity.
    pub fn seed_user(&self, role: Role) -> AuthUser {
        let user = User {
            id: Uuid::new_v4(),
            username: format!("user-{role}"),
            email: format!("{}@example.com", Uuid::new_v4().simple()),
            password_hash: String::new(),
            role,
            bio: String::new(),
        };
        let auth = AuthUser {
            id: user.id,
            role: user.role,
        };
        self.store.lock().unwrap().users.insert(user.id, user);
        auth
    }

    /// Inserts a news item in the given moderation state.
    pub fn seed_news(&self, author: Uuid, status: NewsStatus, rejection_reason: &str) -> NewsItem {
        let item = NewsItem {
            id: Uuid::new_v4(),
            title: "Flood warning issued".to_string(),
            description: "Rivers expected to crest overnight.".to_string(),
            author,
            status,
            rejection_reason: rejection_reason.to_string(),
            category: "National".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            ..NewsItem::default()
        };
        self.store.lock().unwrap().news.insert(item.id, item.clone());
        item
    }

    /// Inserts a task assigned to the given reporter.
    pub fn seed_task(&self, assigned_to: Uuid) -> Task {
        let task = Task {
            id: Uuid::new_v4(),
            title: "Cover the council meeting".to_string(),
            description: String::new(),
            assigned_to,
            status: TaskStatus::Pending,
            created_at: Utc::now(),
        };
        self.store.lock().unwrap().tasks.insert(task.id, task.clone());
        task
    }

    pub fn user_role(&self, id: Uuid) -> Option<Role> {
        self.store.lock().unwrap().users.get(&id).map(|u| u.role)
    }

    pub fn news_item(&self, id: Uuid) -> Option<NewsItem> {
        self.store.lock().unwrap().news.get(&id).cloned()
    }
}

#[async_trait]
impl Repository for InMemoryRepo {
    // --- Users ---

    async fn create_user(&self, user: NewUser) -> Option<User> {
        let record = User {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            bio: user.bio,
        };
        self.store
            .lock()
            .unwrap()
            .users
            .insert(record.id, record.clone());
        Some(record)
    }

    async fn get_user(&self, id: Uuid) -> Option<User> {
        self.store.lock().unwrap().users.get(&id).cloned()
    }

    async fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.store
            .lock()
            .unwrap()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned()
    }

    async fn list_users(&self) -> Vec<UserProfile> {
        self.store
            .lock()
            .unwrap()
            .users
            .values()
            .cloned()
            .map(UserProfile::from)
            .collect()
    }

    // --- News ---

    async fn create_news(
        &self,
        req: CreateNewsRequest,
        author: Uuid,
        status: NewsStatus,
    ) -> Option<NewsItem> {
        let item = NewsItem {
            id: Uuid::new_v4(),
            title: req.title,
            description: req.description,
            author,
            author_name: None,
            category: req.category.unwrap_or_else(|| "General".to_string()),
            image: req.image_key.unwrap_or_default(),
            video: req.video_key.unwrap_or_default(),
            youtube_link: req.youtube_link.unwrap_or_default(),
            status,
            rejection_reason: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.store
            .lock()
            .unwrap()
            .news
            .insert(item.id, item.clone());
        Some(item)
    }

    async fn list_approved_news(&self, category: Option<String>) -> Vec<NewsItem> {
        let mut items: Vec<NewsItem> = self
            .store
            .lock()
            .unwrap()
            .news
            .values()
            .filter(|n| n.status == NewsStatus::Approved)
            .filter(|n| category.as_ref().is_none_or(|c| &n.category == c))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
    }

    async fn list_news_by_author(&self, author: Uuid) -> Vec<NewsItem> {
        let mut items: Vec<NewsItem> = self
            .store
            .lock()
            .unwrap()
            .news
            .values()
            .filter(|n| n.author == author)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
    }

    async fn list_all_news(&self) -> Vec<NewsItem> {
        let mut items: Vec<NewsItem> =
            self.store.lock().unwrap().news.values().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
    }

    async fn get_news(&self, id: Uuid) -> Option<NewsItem> {
        self.store.lock().unwrap().news.get(&id).cloned()
    }

    async fn update_news(&self, id: Uuid, req: UpdateNewsRequest) -> Option<NewsItem> {
        let mut store = self.store.lock().unwrap();
        let item = store.news.get_mut(&id)?;
        item.title = req.title;
        item.description = req.description;
        item.category = req.category.unwrap_or_else(|| "General".to_string());
        if let Some(link) = req.youtube_link {
            item.youtube_link = link;
        }
        if let Some(image) = req.image_key {
            item.image = image;
        }
        if let Some(video) = req.video_key {
            item.video = video;
        }
        item.updated_at = Utc::now();
        Some(item.clone())
    }

    async fn set_news_status(
        &self,
        id: Uuid,
        status: NewsStatus,
        rejection_reason: String,
    ) -> Option<NewsItem> {
        let mut store = self.store.lock().unwrap();
        let item = store.news.get_mut(&id)?;
        item.status = status;
        item.rejection_reason = rejection_reason;
        item.updated_at = Utc::now();
        Some(item.clone())
    }

    async fn delete_news(&self, id: Uuid) -> bool {
        self.store.lock().unwrap().news.remove(&id).is_some()
    }

    // --- Comments ---

    async fn add_comment(&self, news_id: Uuid, user_id: Uuid, text: String) -> Option<Comment> {
        let mut store = self.store.lock().unwrap();
        let author_name = store.users.get(&user_id).map(|u| u.username.clone());
        let comment = Comment {
            id: Uuid::new_v4(),
            news_id,
            user_id,
            text,
            author_name,
            created_at: Utc::now(),
        };
        store.comments.insert(comment.id, comment.clone());
        Some(comment)
    }

    async fn get_comments(&self, news_id: Uuid) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self
            .store
            .lock()
            .unwrap()
            .comments
            .values()
            .filter(|c| c.news_id == news_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        comments
    }

    // --- Reporter Requests ---

    async fn create_reporter_request(
        &self,
        user_id: Uuid,
        details: ReporterApplication,
    ) -> Option<ReporterRequest> {
        let request = ReporterRequest {
            id: Uuid::new_v4(),
            user_id,
            username: None,
            status: RequestStatus::Pending,
            phone_number: details.phone_number,
            reason: details.reason.unwrap_or_default(),
            experience: details.experience.unwrap_or_default(),
            area_of_interest: details.area_of_interest.unwrap_or_default(),
            location: details.location.unwrap_or_default(),
            created_at: Utc::now(),
        };
        self.store
            .lock()
            .unwrap()
            .requests
            .insert(request.id, request.clone());
        Some(request)
    }

    async fn get_request_for_user(&self, user_id: Uuid) -> Option<ReporterRequest> {
        self.store
            .lock()
            .unwrap()
            .requests
            .values()
            .find(|r| r.user_id == user_id)
            .cloned()
    }

    async fn list_reporter_requests(&self, status: Option<RequestStatus>) -> Vec<ReporterRequest> {
        self.store
            .lock()
            .unwrap()
            .requests
            .values()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .cloned()
            .collect()
    }

    async fn approve_reporter_request(&self, id: Uuid) -> Option<ReporterRequest> {
        // Mirrors the transactional Postgres path: both writes or neither.
        let mut store = self.store.lock().unwrap();
        let user_id = store.requests.get(&id)?.user_id;
        if let Some(user) = store.users.get_mut(&user_id) {
            user.role = Role::Reporter;
        }
        let request = store.requests.get_mut(&id)?;
        request.status = RequestStatus::Approved;
        Some(request.clone())
    }

    async fn reject_reporter_request(&self, id: Uuid) -> Option<ReporterRequest> {
        let mut store = self.store.lock().unwrap();
        let request = store.requests.get_mut(&id)?;
        request.status = RequestStatus::Rejected;
        Some(request.clone())
    }

    async fn delete_reporter_request(&self, id: Uuid) -> bool {
        self.store.lock().unwrap().requests.remove(&id).is_some()
    }

    // --- Tasks ---

    async fn create_task(&self, req: CreateTaskRequest) -> Option<Task> {
        let task = Task {
            id: Uuid::new_v4(),
            title: req.title,
            description: req.description.unwrap_or_default(),
            assigned_to: req.assigned_to,
            status: TaskStatus::Pending,
            created_at: Utc::now(),
        };
        self.store
            .lock()
            .unwrap()
            .tasks
            .insert(task.id, task.clone());
        Some(task)
    }

    async fn list_tasks(&self) -> Vec<Task> {
        self.store.lock().unwrap().tasks.values().cloned().collect()
    }

    async fn list_tasks_for(&self, assigned_to: Uuid) -> Vec<Task> {
        self.store
            .lock()
            .unwrap()
            .tasks
            .values()
            .filter(|t| t.assigned_to == assigned_to)
            .cloned()
            .collect()
    }

    async fn get_task(&self, id: Uuid) -> Option<Task> {
        self.store.lock().unwrap().tasks.get(&id).cloned()
    }

    async fn set_task_status(&self, id: Uuid, status: TaskStatus) -> Option<Task> {
        let mut store = self.store.lock().unwrap();
        let task = store.tasks.get_mut(&id)?;
        task.status = status;
        Some(task.clone())
    }

    async fn delete_task(&self, id: Uuid) -> bool {
        self.store.lock().unwrap().tasks.remove(&id).is_some()
    }

    // --- Jobs & Applications ---

    async fn create_job(&self, req: CreateJobRequest) -> Option<Job> {
        let job = Job {
            id: Uuid::new_v4(),
            title: req.title,
            description: req.description,
            requirements: req.requirements,
            location: req.location,
            company: req.company,
            posted_by: req.posted_by,
            created_at: Utc::now(),
        };
        self.store.lock().unwrap().jobs.insert(job.id, job.clone());
        Some(job)
    }

    async fn list_jobs(&self) -> Vec<Job> {
        self.store.lock().unwrap().jobs.values().cloned().collect()
    }

    async fn update_job(&self, id: Uuid, req: CreateJobRequest) -> Option<Job> {
        let mut store = self.store.lock().unwrap();
        let job = store.jobs.get_mut(&id)?;
        job.title = req.title;
        job.description = req.description;
        job.requirements = req.requirements;
        job.location = req.location;
        job.company = req.company;
        job.posted_by = req.posted_by;
        Some(job.clone())
    }

    async fn delete_job(&self, id: Uuid) -> bool {
        self.store.lock().unwrap().jobs.remove(&id).is_some()
    }

    async fn create_application(
        &self,
        job_id: Uuid,
        applicant_name: String,
        applicant_email: String,
        resume: String,
    ) -> Option<JobApplication> {
        let application = JobApplication {
            id: Uuid::new_v4(),
            job_id,
            job_title: None,
            applicant_name,
            applicant_email,
            resume,
            status: ApplicationStatus::Pending,
            created_at: Utc::now(),
        };
        self.store
            .lock()
            .unwrap()
            .applications
            .insert(application.id, application.clone());
        Some(application)
    }

    async fn list_applications(&self) -> Vec<JobApplication> {
        self.store
            .lock()
            .unwrap()
            .applications
            .values()
            .cloned()
            .collect()
    }

    async fn set_application_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Option<JobApplication> {
        let mut store = self.store.lock().unwrap();
        let application = store.applications.get_mut(&id)?;
        application.status = status;
        Some(application.clone())
    }

    async fn delete_application(&self, id: Uuid) -> bool {
        self.store.lock().unwrap().applications.remove(&id).is_some()
    }

    // --- Contact Messages ---

    async fn create_message(&self, req: ContactRequest) -> Option<ContactMessage> {
        let message = ContactMessage {
            id: Uuid::new_v4(),
            name: req.name,
            email: req.email,
            message: req.message,
            created_at: Utc::now(),
        };
        self.store
            .lock()
            .unwrap()
            .messages
            .insert(message.id, message.clone());
        Some(message)
    }

    async fn list_messages(&self) -> Vec<ContactMessage> {
        self.store
            .lock()
            .unwrap()
            .messages
            .values()
            .cloned()
            .collect()
    }

    async fn delete_message(&self, id: Uuid) -> bool {
        self.store.lock().unwrap().messages.remove(&id).is_some()
    }

    // --- Site Config ---

    async fn get_site_config(&self) -> SiteConfig {
        let mut store = self.store.lock().unwrap();
        store
            .site_config
            .get_or_insert_with(SiteConfig::default)
            .clone()
    }

    async fn update_site_config(&self, req: UpdateSiteConfigRequest) -> SiteConfig {
        let mut store = self.store.lock().unwrap();
        let config = store.site_config.get_or_insert_with(SiteConfig::default);
        if let Some(image) = req.hero_image_key {
            config.hero_image = image;
        }
        if let Some(headline) = req.hero_headline {
            config.hero_headline = headline;
        }
        if let Some(subheading) = req.hero_subheading {
            config.hero_subheading = subheading;
        }
        if let Some(text) = req.hero_cta_text {
            config.hero_cta_text = text;
        }
        if let Some(link) = req.hero_cta_link {
            config.hero_cta_link = link;
        }
        config.clone()
    }

    // --- Dashboard ---

    async fn get_stats(&self) -> AdminDashboardStats {
        let store = self.store.lock().unwrap();
        AdminDashboardStats {
            total_users: store.users.len() as i64,
            total_news: store.news.len() as i64,
            pending_news: store
                .news
                .values()
                .filter(|n| n.status == NewsStatus::Pending)
                .count() as i64,
            reporter_requests: store.requests.len() as i64,
            total_jobs: store.jobs.len() as i64,
            total_applications: store.applications.len() as i64,
            total_messages: store.messages.len() as i64,
        }
    }
}

/// Builds an `AppState` over the shared in-memory repository and a mock
/// storage service.
pub fn test_state(repo: Arc<InMemoryRepo>) -> AppState {
    AppState {
        repo: repo as RepositoryState,
        storage: Arc::new(MockStorageService::new()) as StorageState,
        config: AppConfig::default(),
    }
}
