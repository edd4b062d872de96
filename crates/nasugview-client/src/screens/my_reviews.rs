//! The signed-in user's own reviews.

use std::sync::Arc;

use tracing::warn;

use nasugview_net::Backend;
use nasugview_shared::media::review_image_url;
use nasugview_shared::UserReview;

use crate::error::ClientError;
use crate::screens::accepted;
use crate::session::SessionManager;

pub const EMPTY_MESSAGE: &str = "Looks like you haven't left a review yet.";

pub struct MyReviewsScreen {
    backend: Arc<dyn Backend>,
    session: Arc<SessionManager>,
    base_url: String,
    reviews: Vec<UserReview>,
    loading: bool,
    refreshing: bool,
}

impl MyReviewsScreen {
    pub fn new(backend: Arc<dyn Backend>, session: Arc<SessionManager>, base_url: &str) -> Self {
        Self {
            backend,
            session,
            base_url: base_url.to_string(),
            reviews: Vec::new(),
            loading: false,
            refreshing: false,
        }
    }

    pub async fn load(&mut self) -> Result<(), ClientError> {
        self.loading = true;
        let result = self.fetch().await;
        self.loading = false;
        result
    }

    /// Pull-to-refresh.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.refreshing = true;
        let result = self.fetch().await;
        self.refreshing = false;
        result
    }

    async fn fetch(&mut self) -> Result<(), ClientError> {
        let username = self.session.username()?;
        let result = match self.backend.load_user_reviews(&username).await {
            Ok(reply) => accepted(reply),
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(reply) => {
                self.reviews = reply.reviews;
                Ok(())
            }
            Err(ClientError::Rejected { message }) => {
                warn!(%username, ?message, "No reviews returned");
                self.reviews.clear();
                Ok(())
            }
            Err(e) => {
                warn!(%username, error = %e, "Loading own reviews failed");
                Err(e)
            }
        }
    }

    pub fn reviews(&self) -> &[UserReview] {
        &self.reviews
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Shown instead of the list when there is nothing to list.
    pub fn empty_message(&self) -> Option<&'static str> {
        (!self.loading && self.reviews.is_empty()).then_some(EMPTY_MESSAGE)
    }

    pub fn image_url(&self, review: &UserReview) -> Option<String> {
        review
            .image_path
            .as_deref()
            .map(|path| review_image_url(&self.base_url, path))
    }
}

#[cfg(test)]
mod tests {
    use nasugview_net::UserReviewsResponse;
    use nasugview_shared::UserProfile;
    use nasugview_store::Database;

    use super::*;
    use crate::testing::FakeBackend;

    fn user_review(id: i64, image: Option<&str>) -> UserReview {
        UserReview {
            id,
            username: "ana".into(),
            business_name: "Len Wings".into(),
            excellent_rating: 4,
            service_rating: 5,
            comment: "Crispy".into(),
            created_at: "2025-06-22 12:00:00".into(),
            image_path: image.map(str::to_string),
        }
    }

    fn screen(backend: Arc<FakeBackend>) -> MyReviewsScreen {
        let session = Arc::new(SessionManager::new(Database::open_in_memory().unwrap()));
        session.sign_in(UserProfile::named("ana")).unwrap();
        MyReviewsScreen::new(backend, session, "http://h/NasugView")
    }

    #[tokio::test]
    async fn test_lists_reviews_with_image_urls() {
        let backend = FakeBackend::new();
        backend.user_reviews.reply(UserReviewsResponse {
            success: true,
            reviews: vec![user_review(1, Some("r1.jpg")), user_review(2, None)],
            message: None,
        });
        let mut screen = screen(backend.shared());

        screen.load().await.unwrap();
        assert_eq!(screen.reviews().len(), 2);
        assert_eq!(screen.empty_message(), None);
        assert_eq!(
            screen.image_url(&screen.reviews()[0]).as_deref(),
            Some("http://h/NasugView/reviews/r1.jpg")
        );
        assert_eq!(screen.image_url(&screen.reviews()[1]), None);
    }

    #[tokio::test]
    async fn test_empty_state() {
        let backend = FakeBackend::new();
        backend.user_reviews.push(Ok(UserReviewsResponse {
            success: true,
            reviews: vec![user_review(1, None)],
            message: None,
        }));
        backend.user_reviews.push(Ok(UserReviewsResponse {
            success: false,
            message: Some("No reviews found.".into()),
            ..Default::default()
        }));
        let mut screen = screen(backend.shared());

        screen.load().await.unwrap();
        screen.refresh().await.unwrap();
        assert!(!screen.is_refreshing());
        assert_eq!(
            screen.empty_message(),
            Some("Looks like you haven't left a review yet.")
        );
    }

    #[tokio::test]
    async fn test_network_failure_keeps_list() {
        let backend = FakeBackend::new();
        backend.user_reviews.push(Ok(UserReviewsResponse {
            success: true,
            reviews: vec![user_review(1, None)],
            message: None,
        }));
        backend.user_reviews.push(Err(503));
        let mut screen = screen(backend.shared());

        screen.load().await.unwrap();
        assert!(screen.refresh().await.is_err());
        assert_eq!(screen.reviews().len(), 1);
    }

    #[tokio::test]
    async fn test_needs_session() {
        let backend = FakeBackend::new().shared();
        let session = Arc::new(SessionManager::new(Database::open_in_memory().unwrap()));
        let mut screen = MyReviewsScreen::new(backend.clone(), session, "http://h");
        assert!(matches!(screen.load().await, Err(ClientError::NotSignedIn)));
        assert_eq!(backend.total_calls(), 0);
    }
}
