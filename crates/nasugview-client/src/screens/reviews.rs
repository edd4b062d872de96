//! Review feed of one business: list, histogram, tag filter and the
//! background refresh.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::{debug, warn};

use nasugview_net::Backend;
use nasugview_shared::{Business, HistogramBar, RatingHistogram, Review, ReviewTag};

use crate::error::ClientError;
use crate::navigation::{BusinessParams, Route};
use crate::refresh::{spawn_refresh, RefreshHandle, RefreshPolicy};
use crate::screens::{accepted, lock_nav, SharedNavigator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Pull-to-refresh or first load; shows the refreshing indicator.
    Manual,
    /// Background tick; no indicator.
    Silent,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedState {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// The last fetch failed; whatever was loaded before is still shown.
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct ReviewFeed {
    pub state: FeedState,
    pub reviews: Vec<Review>,
    pub histogram: RatingHistogram,
    pub refreshing: bool,
}

type SharedFeed = Arc<Mutex<ReviewFeed>>;

fn lock_feed(feed: &Mutex<ReviewFeed>) -> MutexGuard<'_, ReviewFeed> {
    feed.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn fetch_into(
    backend: &dyn Backend,
    business_name: &str,
    feed: &Mutex<ReviewFeed>,
    mode: FetchMode,
) -> Result<(), ClientError> {
    if mode == FetchMode::Manual {
        let mut feed = lock_feed(feed);
        feed.state = FeedState::Loading;
        feed.refreshing = true;
    }

    let result = match backend.get_reviews(business_name).await {
        Ok(reply) => accepted(reply),
        Err(e) => Err(e.into()),
    };

    let mut feed = lock_feed(feed);
    if mode == FetchMode::Manual {
        feed.refreshing = false;
    }
    match result {
        Ok(reply) => {
            feed.histogram = reply.histogram();
            feed.reviews = reply.reviews;
            feed.state = FeedState::Loaded;
            Ok(())
        }
        Err(e) => {
            warn!(business = business_name, error = %e, ?mode, "Fetching reviews failed");
            if mode == FetchMode::Manual {
                feed.state = FeedState::Failed(e.to_string());
            }
            Err(e)
        }
    }
}

pub struct ReviewScreen {
    business: &'static Business,
    backend: Arc<dyn Backend>,
    feed: SharedFeed,
    tag: ReviewTag,
    refresh: Option<RefreshHandle>,
}

impl ReviewScreen {
    pub fn new(backend: Arc<dyn Backend>, business: &'static Business) -> Self {
        Self {
            business,
            backend,
            feed: SharedFeed::default(),
            tag: ReviewTag::All,
            refresh: None,
        }
    }

    pub fn business(&self) -> &'static Business {
        self.business
    }

    /// First load plus the background refresh.
    pub async fn mount(&mut self, policy: RefreshPolicy) -> Result<(), ClientError> {
        let first = self.fetch(FetchMode::Manual).await;
        self.start_refresh(policy);
        first
    }

    pub async fn fetch(&self, mode: FetchMode) -> Result<(), ClientError> {
        fetch_into(self.backend.as_ref(), self.business.name, &self.feed, mode).await
    }

    /// Pull-to-refresh.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        self.fetch(FetchMode::Manual).await
    }

    /// One-off load for a listing. A `success: false` reply means the
    /// business has no reviews yet; only transport and local errors fail.
    pub async fn load(&self) -> Result<(), ClientError> {
        match self.refresh().await {
            Err(ClientError::Rejected { message }) => {
                debug!(business = self.business.name, ?message, "No reviews found");
                Ok(())
            }
            other => other,
        }
    }

    fn start_refresh(&mut self, policy: RefreshPolicy) {
        let backend = self.backend.clone();
        let name = self.business.name;
        let feed: Weak<Mutex<ReviewFeed>> = Arc::downgrade(&self.feed);

        self.refresh = Some(spawn_refresh(policy, move || {
            let backend = backend.clone();
            let feed = feed.clone();
            async move {
                let Some(feed) = feed.upgrade() else {
                    return false;
                };
                fetch_into(backend.as_ref(), name, &feed, FetchMode::Silent)
                    .await
                    .is_ok()
            }
        }));
        debug!(business = name, period = ?policy.period, "review refresh started");
    }

    /// The screen lost focus.
    pub fn blur(&self) {
        if let Some(handle) = &self.refresh {
            handle.pause();
        }
    }

    pub fn focus(&self) {
        if let Some(handle) = &self.refresh {
            handle.resume();
        }
    }

    /// Stop the background refresh for good.
    pub fn unmount(&mut self) {
        if let Some(handle) = self.refresh.take() {
            handle.cancel();
        }
    }

    pub fn is_refreshing_in_background(&self) -> bool {
        self.refresh.as_ref().is_some_and(|h| !h.is_paused())
    }

    /// Changing the tag only re-filters what is already loaded.
    pub fn set_tag(&mut self, tag: ReviewTag) {
        self.tag = tag;
    }

    pub fn tag(&self) -> ReviewTag {
        self.tag
    }

    pub fn snapshot(&self) -> ReviewFeed {
        lock_feed(&self.feed).clone()
    }

    pub fn state(&self) -> FeedState {
        lock_feed(&self.feed).state.clone()
    }

    pub fn is_refreshing(&self) -> bool {
        lock_feed(&self.feed).refreshing
    }

    pub fn visible_reviews(&self) -> Vec<Review> {
        let feed = lock_feed(&self.feed);
        self.tag.apply(&feed.reviews).into_iter().cloned().collect()
    }

    pub fn histogram_bars(&self) -> Vec<HistogramBar> {
        lock_feed(&self.feed).histogram.bars()
    }

    /// "Write a review" button.
    pub fn write_review(&self, nav: &SharedNavigator) -> Result<(), ClientError> {
        lock_nav(nav).navigate(Route::SubmitReview(BusinessParams::new(self.business.name)))
    }
}
