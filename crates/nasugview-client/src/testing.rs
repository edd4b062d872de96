//! In-memory [`Backend`] for screen tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use nasugview_net::{
    ApiReply, Backend, LoginRequest, LoginResponse, NetError, PhotoResponse, PhotoUpload,
    PostSubmission, PostsResponse, ReviewSubmission, ReviewsResponse, SignupRequest,
    UserReviewsResponse,
};

/// Replies for one endpoint: queued ones first, then the fallback forever.
pub struct Script<T> {
    queue: Mutex<VecDeque<Result<T, u16>>>,
    fallback: Mutex<Result<T, u16>>,
}

impl<T: Clone + Default> Default for Script<T> {
    fn default() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback: Mutex::new(Ok(T::default())),
        }
    }
}

impl<T: Clone> Script<T> {
    /// Always answer `reply` once the queue is empty.
    pub fn reply(&self, reply: T) {
        *self.fallback.lock().unwrap() = Ok(reply);
    }

    /// Always fail at the transport level once the queue is empty.
    pub fn fail(&self) {
        *self.fallback.lock().unwrap() = Err(503);
    }

    pub fn push(&self, reply: Result<T, u16>) {
        self.queue.lock().unwrap().push_back(reply);
    }

    fn next(&self) -> Result<T, NetError> {
        let reply = self
            .queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.lock().unwrap().clone());
        reply.map_err(NetError::Status)
    }
}

#[derive(Default)]
pub struct FakeBackend {
    pub login: Script<LoginResponse>,
    pub signup: Script<ApiReply>,
    pub photo: Script<PhotoResponse>,
    pub post: Script<ApiReply>,
    pub posts: Script<PostsResponse>,
    pub review: Script<ApiReply>,
    pub reviews: Script<ReviewsResponse>,
    pub user_reviews: Script<UserReviewsResponse>,

    pub calls: Mutex<Vec<&'static str>>,
    pub submitted_reviews: Mutex<Vec<ReviewSubmission>>,
    pub uploaded_photos: Mutex<Vec<PhotoUpload>>,
    pub uploaded_posts: Mutex<Vec<PostSubmission>>,
    pub review_queries: Mutex<Vec<String>>,

    /// When set, `submit_review` waits for a notification before replying.
    pub review_gate: Option<Arc<Notify>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn call_count(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| **c == endpoint)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, endpoint: &'static str) {
        self.calls.lock().unwrap().push(endpoint);
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn login(&self, _request: &LoginRequest) -> Result<LoginResponse, NetError> {
        self.record("login");
        self.login.next()
    }

    async fn signup(&self, _request: &SignupRequest) -> Result<ApiReply, NetError> {
        self.record("signup");
        self.signup.next()
    }

    async fn upload_photo(&self, upload: PhotoUpload) -> Result<PhotoResponse, NetError> {
        self.record("upload_photo");
        self.uploaded_photos.lock().unwrap().push(upload);
        self.photo.next()
    }

    async fn upload_post(&self, post: PostSubmission) -> Result<ApiReply, NetError> {
        self.record("upload_post");
        self.uploaded_posts.lock().unwrap().push(post);
        self.post.next()
    }

    async fn load_user_posts(&self, _username: &str) -> Result<PostsResponse, NetError> {
        self.record("load_user_posts");
        self.posts.next()
    }

    async fn submit_review(&self, review: ReviewSubmission) -> Result<ApiReply, NetError> {
        self.record("submit_review");
        self.submitted_reviews.lock().unwrap().push(review);
        if let Some(gate) = &self.review_gate {
            gate.notified().await;
        }
        self.review.next()
    }

    async fn get_reviews(&self, business_name: &str) -> Result<ReviewsResponse, NetError> {
        self.record("get_reviews");
        self.review_queries
            .lock()
            .unwrap()
            .push(business_name.to_string());
        self.reviews.next()
    }

    async fn load_user_reviews(&self, _username: &str) -> Result<UserReviewsResponse, NetError> {
        self.record("load_user_reviews");
        self.user_reviews.next()
    }
}

pub fn ok_reply() -> ApiReply {
    ApiReply {
        success: true,
        message: None,
    }
}

pub fn failed_reply(message: Option<&str>) -> ApiReply {
    ApiReply {
        success: false,
        message: message.map(str::to_string),
    }
}
