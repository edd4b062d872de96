//! Review composer.
//!
//! Methods take `&self` so a second tap on "Submit" can be observed while
//! the first request is still pending; that second tap is refused.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use nasugview_net::{Backend, ReviewSubmission};
use nasugview_shared::media::{image_extension, review_photo_name};
use nasugview_shared::validation::{RatingDimension, ReviewDraft};
use nasugview_shared::Business;

use crate::error::ClientError;
use crate::notice::{Notice, NoticeSlot, TITLE_ERROR, TITLE_FAILED};
use crate::screens::{accepted, lock_nav, read_attachment, SharedNavigator};
use crate::session::SessionManager;

pub const SUBMIT_REJECTED: &str = "Something went wrong.";
pub const SUBMIT_NETWORK: &str = "Network error. Please try again later.";

pub struct SubmitReviewScreen {
    business: &'static Business,
    backend: Arc<dyn Backend>,
    session: Arc<SessionManager>,
    nav: SharedNavigator,
    draft: Mutex<ReviewDraft>,
    notice: Mutex<NoticeSlot>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag however the submission ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SubmitReviewScreen {
    pub fn new(
        backend: Arc<dyn Backend>,
        session: Arc<SessionManager>,
        nav: SharedNavigator,
        business: &'static Business,
    ) -> Self {
        Self {
            business,
            backend,
            session,
            nav,
            draft: Mutex::new(ReviewDraft::default()),
            notice: Mutex::new(NoticeSlot::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    fn draft(&self) -> MutexGuard<'_, ReviewDraft> {
        self.draft.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notices(&self) -> MutexGuard<'_, NoticeSlot> {
        self.notice.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn business(&self) -> &'static Business {
        self.business
    }

    pub fn rate(&self, dimension: RatingDimension, stars: u8) -> Result<(), ClientError> {
        Ok(self.draft().rate(dimension, stars)?)
    }

    pub fn set_comment(&self, comment: impl Into<String>) {
        self.draft().comment = comment.into();
    }

    pub fn pick_image(&self, path: Option<PathBuf>) {
        self.draft().image = path;
    }

    pub fn current_draft(&self) -> ReviewDraft {
        self.draft().clone()
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notices().visible().cloned()
    }

    pub fn dismiss(&self) {
        self.notices().dismiss();
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validate, upload, then reset the form and go back one screen.
    /// The draft is kept on failure.
    pub async fn submit(&self) -> Result<(), ClientError> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            warn!(business = self.business.name, "Submit ignored, one is already pending");
            return Err(ClientError::Busy);
        }
        let _guard = InFlight(&self.in_flight);

        match self.try_submit().await {
            Ok(()) => {
                self.draft().reset();
                lock_nav(&self.nav).go_back();
                info!(business = self.business.name, "Review submitted");
                Ok(())
            }
            Err(e) => {
                let title = match &e {
                    ClientError::Rejected { .. } => TITLE_FAILED,
                    _ => TITLE_ERROR,
                };
                let message = e.user_message(SUBMIT_REJECTED, |_| SUBMIT_NETWORK.to_string());
                warn!(business = self.business.name, error = %e, "Review submission failed");
                self.notices().show(Notice::alert(title, message));
                Err(e)
            }
        }
    }

    async fn try_submit(&self) -> Result<(), ClientError> {
        let draft = self.current_draft();
        draft.validate()?;

        let username = self.session.username()?;

        let image = match &draft.image {
            Some(path) => {
                let ext = image_extension(path)?;
                Some(read_attachment(path, review_photo_name(&ext), &ext).await?)
            }
            None => None,
        };

        let submission = ReviewSubmission {
            username,
            business_name: self.business.name.to_string(),
            excellent_rating: draft.excellent_rating,
            service_rating: draft.service_rating,
            comment: draft.comment,
            image,
        };

        accepted(self.backend.submit_review(submission).await?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use nasugview_shared::fixtures::find_business;
    use nasugview_shared::UserProfile;
    use nasugview_store::Database;
    use tokio::sync::Notify;

    use super::*;
    use crate::navigation::{BusinessParams, Navigator, Route, TabsParams};
    use crate::testing::{failed_reply, ok_reply, FakeBackend};

    const BUSINESS: &str = "Len Wings";

    fn harness(backend: Arc<FakeBackend>) -> (SubmitReviewScreen, SharedNavigator) {
        let session = Arc::new(SessionManager::new(Database::open_in_memory().unwrap()));
        session.sign_in(UserProfile::named("ana")).unwrap();

        let mut nav = Navigator::default();
        nav.replace(Route::Tabs(TabsParams {
            profile: UserProfile::named("ana"),
        }))
        .unwrap();
        nav.navigate(Route::BusinessDetails(BusinessParams::new(BUSINESS)))
            .unwrap();
        nav.navigate(Route::Review(BusinessParams::new(BUSINESS)))
            .unwrap();
        nav.navigate(Route::SubmitReview(BusinessParams::new(BUSINESS)))
            .unwrap();
        let nav = Arc::new(Mutex::new(nav));

        let business = find_business(BUSINESS).unwrap();
        let screen = SubmitReviewScreen::new(backend, session, nav.clone(), business);
        (screen, nav)
    }

    fn fill(screen: &SubmitReviewScreen) {
        screen.rate(RatingDimension::ExcellentQuality, 5).unwrap();
        screen.rate(RatingDimension::GoodService, 4).unwrap();
        screen.set_comment("  Unli wings, sulit!  ");
    }

    #[tokio::test]
    async fn test_incomplete_form_never_sends() {
        let backend = FakeBackend::new().shared();
        let (screen, nav) = harness(backend.clone());

        screen.set_comment("Great");
        screen.rate(RatingDimension::GoodService, 4).unwrap();
        let err = screen.submit().await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));

        screen.rate(RatingDimension::ExcellentQuality, 3).unwrap();
        screen.set_comment("   ");
        screen.submit().await.unwrap_err();

        assert_eq!(backend.total_calls(), 0);
        assert_eq!(
            screen.notice().map(|n| n.message().to_string()).as_deref(),
            Some("Please rate all traits and write a comment.")
        );
        assert!(matches!(nav.lock().unwrap().current(), Route::SubmitReview(_)));
    }

    #[tokio::test]
    async fn test_success_resets_and_goes_back() {
        let backend = FakeBackend::new();
        backend.review.reply(ok_reply());
        let backend = backend.shared();
        let (screen, nav) = harness(backend.clone());
        fill(&screen);

        screen.submit().await.unwrap();

        assert_eq!(screen.current_draft(), ReviewDraft::default());
        assert_eq!(
            nav.lock().unwrap().current(),
            &Route::Review(BusinessParams::new(BUSINESS))
        );

        let sent = backend.submitted_reviews.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].username, "ana");
        assert_eq!(sent[0].business_name, BUSINESS);
        assert_eq!((sent[0].excellent_rating, sent[0].service_rating), (5, 4));
        assert_eq!(sent[0].comment, "  Unli wings, sulit!  ");
        assert!(sent[0].image.is_none());
    }

    #[tokio::test]
    async fn test_image_is_attached_as_photo_ext() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("DSC_0042.JPG");
        std::fs::write(&path, b"\xFF\xD8fake").unwrap();

        let backend = FakeBackend::new();
        backend.review.reply(ok_reply());
        let backend = backend.shared();
        let (screen, _) = harness(backend.clone());
        fill(&screen);
        screen.pick_image(Some(path));

        screen.submit().await.unwrap();

        let sent = backend.submitted_reviews.lock().unwrap();
        let image = sent[0].image.as_ref().unwrap();
        assert_eq!(image.file_name, "photo.jpg");
        assert_eq!(image.mime, "image/jpeg");
        assert_eq!(image.data, b"\xFF\xD8fake".to_vec());
    }

    #[tokio::test]
    async fn test_failures_keep_the_draft() {
        let backend = FakeBackend::new();
        backend.review.push(Ok(failed_reply(Some("You already reviewed this."))));
        backend.review.push(Ok(failed_reply(None)));
        backend.review.push(Err(503));
        let backend = backend.shared();
        let (screen, nav) = harness(backend.clone());
        fill(&screen);
        let filled = screen.current_draft();

        let expected = [
            ("Failed", "You already reviewed this."),
            ("Failed", "Something went wrong."),
            ("Error", "Network error. Please try again later."),
        ];
        for (title, message) in expected {
            screen.submit().await.unwrap_err();
            assert_eq!(
                screen.notice(),
                Some(Notice::Alert {
                    title: title.into(),
                    message: message.into()
                })
            );
            assert_eq!(screen.current_draft(), filled);
        }
        assert!(matches!(nav.lock().unwrap().current(), Route::SubmitReview(_)));
        assert!(!screen.is_submitting());
    }

    #[tokio::test]
    async fn test_second_submit_while_pending_is_refused() {
        let gate = Arc::new(Notify::new());
        let mut backend = FakeBackend::new();
        backend.review.reply(ok_reply());
        backend.review_gate = Some(gate.clone());
        let backend = backend.shared();
        let (screen, _) = harness(backend.clone());
        fill(&screen);

        let (first, second) = tokio::join!(screen.submit(), async {
            let second = screen.submit().await;
            gate.notify_one();
            second
        });

        assert!(first.is_ok());
        assert!(matches!(second, Err(ClientError::Busy)));
        assert_eq!(backend.call_count("submit_review"), 1);
        assert!(!screen.is_submitting());
    }

    #[tokio::test]
    async fn test_signed_out_cannot_submit() {
        let backend = FakeBackend::new().shared();
        let (screen, _) = harness(backend.clone());
        screen.session.sign_out().unwrap();
        fill(&screen);

        let err = screen.submit().await.unwrap_err();
        assert!(matches!(err, ClientError::NotSignedIn));
        assert_eq!(backend.total_calls(), 0);
    }
}
