//! Application state shared by every screen.
//!
//! [`AppState`] is built once at start-up. It owns the backend client, the
//! session manager and the navigator; screens are created from it on demand.

use std::sync::{Arc, Mutex};

use tracing::info;

use nasugview_net::{Backend, HttpBackend};
use nasugview_shared::fixtures::find_business;
use nasugview_shared::Business;
use nasugview_store::Database;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::navigation::{Navigator, Route, TabsParams};
use crate::screens::auth::{LoginScreen, SignupScreen};
use crate::screens::my_reviews::MyReviewsScreen;
use crate::screens::profile::ProfileScreen;
use crate::screens::reviews::ReviewScreen;
use crate::screens::submit_review::SubmitReviewScreen;
use crate::screens::{lock_nav, SharedNavigator};
use crate::session::{Session, SessionManager};

pub struct AppState {
    pub config: ClientConfig,
    pub backend: Arc<dyn Backend>,
    pub session: Arc<SessionManager>,
    pub nav: SharedNavigator,
}

impl AppState {
    /// Open the local database, build the HTTP client and restore any
    /// previous sign-in.
    pub fn open(config: ClientConfig) -> Result<Self, ClientError> {
        let db = match &config.data_dir {
            Some(dir) => Database::open_in(dir)?,
            None => Database::new()?,
        };
        let backend = Arc::new(HttpBackend::new(&config.base_url, config.http_timeout)?);
        Self::with_parts(config, backend, db)
    }

    pub fn with_parts(
        config: ClientConfig,
        backend: Arc<dyn Backend>,
        db: Database,
    ) -> Result<Self, ClientError> {
        let session = Arc::new(SessionManager::new(db));
        let initial = match session.restore()? {
            Session::SignedIn(profile) => Route::Tabs(TabsParams { profile }),
            Session::SignedOut => Route::Login,
        };
        info!(route = initial.name(), base_url = %config.base_url, "Client ready");

        Ok(Self {
            config,
            backend,
            session,
            nav: Arc::new(Mutex::new(Navigator::new(initial))),
        })
    }

    pub fn sign_out(&self) -> Result<(), ClientError> {
        self.session.sign_out()?;
        lock_nav(&self.nav).reset(Route::Login);
        Ok(())
    }

    pub fn login_screen(&self) -> LoginScreen {
        LoginScreen::new(self.backend.clone(), self.session.clone(), self.nav.clone())
    }

    pub fn signup_screen(&self) -> SignupScreen {
        SignupScreen::new(self.backend.clone(), self.session.clone(), self.nav.clone())
    }

    fn business(business_name: &str) -> Result<&'static Business, ClientError> {
        find_business(business_name)
            .ok_or_else(|| ClientError::Navigation(format!("unknown business {business_name:?}")))
    }

    pub fn review_screen(&self, business_name: &str) -> Result<ReviewScreen, ClientError> {
        Ok(ReviewScreen::new(
            self.backend.clone(),
            Self::business(business_name)?,
        ))
    }

    pub fn submit_review_screen(
        &self,
        business_name: &str,
    ) -> Result<SubmitReviewScreen, ClientError> {
        Ok(SubmitReviewScreen::new(
            self.backend.clone(),
            self.session.clone(),
            self.nav.clone(),
            Self::business(business_name)?,
        ))
    }

    pub fn my_reviews_screen(&self) -> MyReviewsScreen {
        MyReviewsScreen::new(self.backend.clone(), self.session.clone(), &self.config.base_url)
    }

    pub fn profile_screen(&self) -> ProfileScreen {
        ProfileScreen::new(self.backend.clone(), self.session.clone(), &self.config.base_url)
    }
}
