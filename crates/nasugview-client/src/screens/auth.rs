//! Login and sign-up.

use std::sync::Arc;

use tracing::{info, warn};

use nasugview_net::{Backend, LoginRequest, SignupRequest};
use nasugview_shared::validation::{LoginForm, SignupForm};
use nasugview_shared::UserProfile;

use crate::error::ClientError;
use crate::navigation::{Route, TabsParams};
use crate::notice::{Notice, NoticeSlot, TITLE_ERROR, TITLE_LOGIN_FAILED, TITLE_SUCCESS};
use crate::screens::{accepted, lock_nav, SharedNavigator};
use crate::session::SessionManager;

pub const LOGIN_REJECTED: &str = "Login failed";
pub const LOGIN_NETWORK: &str = "Network error";
pub const SIGNUP_NETWORK: &str = "Could not connect to the server.";

pub struct LoginScreen {
    backend: Arc<dyn Backend>,
    session: Arc<SessionManager>,
    nav: SharedNavigator,
    pub form: LoginForm,
    loading: bool,
    notice: NoticeSlot,
}

impl LoginScreen {
    pub fn new(
        backend: Arc<dyn Backend>,
        session: Arc<SessionManager>,
        nav: SharedNavigator,
    ) -> Self {
        Self {
            backend,
            session,
            nav,
            form: LoginForm::default(),
            loading: false,
            notice: NoticeSlot::default(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.visible()
    }

    pub fn dismiss(&mut self) {
        self.notice.dismiss();
    }

    /// On success the session is signed in and `Tabs` replaces the login
    /// screen.
    pub async fn submit(&mut self) -> Result<UserProfile, ClientError> {
        let result = self.try_login().await;
        if let Err(e) = &result {
            let message = e.user_message(LOGIN_REJECTED, |_| LOGIN_NETWORK.to_string());
            warn!(username = %self.form.username, error = %e, "Login failed");
            self.notice.show(Notice::alert(TITLE_LOGIN_FAILED, message));
        }
        result
    }

    async fn try_login(&mut self) -> Result<UserProfile, ClientError> {
        self.form.validate()?;

        let request = LoginRequest {
            username: self.form.username.clone(),
            password: self.form.password.clone(),
        };

        self.loading = true;
        let reply = self.backend.login(&request).await;
        self.loading = false;
        let reply = accepted(reply?)?;

        let profile = UserProfile {
            username: reply
                .username
                .filter(|u| !u.is_empty())
                .unwrap_or(request.username),
            profile_image: reply.profile_image,
            cover_image: reply.cover_image,
        };

        self.session.sign_in(profile.clone())?;
        lock_nav(&self.nav).replace(Route::Tabs(TabsParams {
            profile: profile.clone(),
        }))?;
        info!(username = %profile.username, "Logged in");
        Ok(profile)
    }

    pub fn open_signup(&self) -> Result<(), ClientError> {
        lock_nav(&self.nav).navigate(Route::Signup)
    }
}

pub struct SignupScreen {
    backend: Arc<dyn Backend>,
    session: Arc<SessionManager>,
    nav: SharedNavigator,
    pub form: SignupForm,
    notice: NoticeSlot,
}

impl SignupScreen {
    pub fn new(
        backend: Arc<dyn Backend>,
        session: Arc<SessionManager>,
        nav: SharedNavigator,
    ) -> Self {
        Self {
            backend,
            session,
            nav,
            form: SignupForm::default(),
            notice: NoticeSlot::default(),
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.visible()
    }

    /// On success the new account is signed in and `Tabs` replaces the
    /// sign-up screen.
    pub async fn submit(&mut self) -> Result<UserProfile, ClientError> {
        match self.try_signup().await {
            Ok((profile, message)) => {
                self.notice.show(Notice::alert(TITLE_SUCCESS, message));
                Ok(profile)
            }
            Err(e) => {
                // The backend sends its reason in `message`; there is no
                // local fallback for a silent rejection.
                let message = e.user_message("", |_| SIGNUP_NETWORK.to_string());
                warn!(username = %self.form.username, error = %e, "Signup failed");
                self.notice.show(Notice::alert(TITLE_ERROR, message));
                Err(e)
            }
        }
    }

    async fn try_signup(&mut self) -> Result<(UserProfile, String), ClientError> {
        self.form.validate()?;

        let request = SignupRequest {
            email: self.form.email.clone(),
            username: self.form.username.clone(),
            password: self.form.password.clone(),
        };
        let reply = accepted(self.backend.signup(&request).await?)?;

        let profile = UserProfile::named(request.username);
        self.session.sign_in(profile.clone())?;
        lock_nav(&self.nav).replace(Route::Tabs(TabsParams {
            profile: profile.clone(),
        }))?;
        info!(username = %profile.username, "Account created");

        Ok((profile, reply.message.unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use nasugview_net::{ApiReply, LoginResponse};
    use nasugview_store::Database;

    use super::*;
    use crate::navigation::Navigator;
    use crate::session::Session;
    use crate::testing::FakeBackend;

    fn harness(backend: Arc<FakeBackend>) -> (LoginScreen, Arc<SessionManager>, SharedNavigator) {
        let session = Arc::new(SessionManager::new(Database::open_in_memory().unwrap()));
        let nav = Arc::new(Mutex::new(Navigator::default()));
        let screen = LoginScreen::new(backend, session.clone(), nav.clone());
        (screen, session, nav)
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let backend = FakeBackend::new().shared();
        let (mut screen, _, _) = harness(backend.clone());
        screen.form.username = "ana".into();

        let err = screen.submit().await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(
            screen.notice().map(Notice::message),
            Some("Please enter both username and password.")
        );
        assert_eq!(backend.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_login_success_signs_in_and_replaces() {
        let backend = FakeBackend::new();
        backend.login.reply(LoginResponse {
            success: true,
            username: Some("ana".into()),
            profile_image: Some("uploads/ana.jpg".into()),
            cover_image: None,
            message: None,
        });
        let (mut screen, session, nav) = harness(backend.shared());
        screen.form = LoginForm {
            username: "ana".into(),
            password: "secret".into(),
        };

        let profile = screen.submit().await.unwrap();
        assert_eq!(profile.profile_image.as_deref(), Some("uploads/ana.jpg"));
        assert_eq!(session.username().unwrap(), "ana");

        let nav = nav.lock().unwrap();
        assert_eq!(nav.depth(), 1);
        assert_eq!(nav.current(), &Route::Home);
        assert!(screen.notice().is_none());
    }

    #[tokio::test]
    async fn test_login_rejection_messages() {
        let backend = FakeBackend::new();
        backend.login.push(Ok(LoginResponse {
            success: false,
            message: Some("Wrong password".into()),
            ..Default::default()
        }));
        backend.login.push(Ok(LoginResponse::default()));
        backend.login.push(Err(503));
        let (mut screen, session, _) = harness(backend.shared());
        screen.form = LoginForm {
            username: "ana".into(),
            password: "nope".into(),
        };

        screen.submit().await.unwrap_err();
        assert_eq!(screen.notice().map(Notice::message), Some("Wrong password"));

        screen.submit().await.unwrap_err();
        assert_eq!(screen.notice().map(Notice::message), Some("Login failed"));

        let err = screen.submit().await.unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
        assert_eq!(screen.notice().map(Notice::message), Some("Network error"));
        assert!(!screen.is_loading());

        assert_eq!(session.current(), Session::SignedOut);
    }

    fn signup_harness(backend: Arc<FakeBackend>) -> (SignupScreen, Arc<SessionManager>, SharedNavigator) {
        let session = Arc::new(SessionManager::new(Database::open_in_memory().unwrap()));
        let nav = Arc::new(Mutex::new(Navigator::default()));
        nav.lock().unwrap().navigate(Route::Signup).unwrap();
        let mut screen = SignupScreen::new(backend, session.clone(), nav.clone());
        screen.form = SignupForm {
            email: "ana@example.com".into(),
            username: "ana".into(),
            password: "secret".into(),
            confirm_password: "secret".into(),
        };
        (screen, session, nav)
    }

    #[tokio::test]
    async fn test_signup_password_mismatch_is_local() {
        let backend = FakeBackend::new().shared();
        let (mut screen, _, _) = signup_harness(backend.clone());
        screen.form.confirm_password = "other".into();

        screen.submit().await.unwrap_err();
        assert_eq!(
            screen.notice().map(Notice::message),
            Some("Passwords do not match.")
        );
        assert_eq!(backend.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_signup_success_routes_to_tabs() {
        let backend = FakeBackend::new();
        backend.signup.reply(ApiReply {
            success: true,
            message: Some("Account created!".into()),
        });
        let (mut screen, session, nav) = signup_harness(backend.shared());

        screen.submit().await.unwrap();
        assert_eq!(screen.notice().map(Notice::message), Some("Account created!"));
        assert_eq!(session.username().unwrap(), "ana");
        let nav = nav.lock().unwrap();
        assert_eq!(nav.current(), &Route::Home);
        assert_eq!(nav.depth(), 2);
    }

    #[tokio::test]
    async fn test_signup_failures() {
        let backend = FakeBackend::new();
        backend.signup.push(Ok(ApiReply {
            success: false,
            message: Some("Username taken".into()),
        }));
        backend.signup.push(Err(503));
        let (mut screen, session, _) = signup_harness(backend.shared());

        screen.submit().await.unwrap_err();
        assert_eq!(screen.notice().map(Notice::message), Some("Username taken"));

        screen.submit().await.unwrap_err();
        assert_eq!(
            screen.notice().map(Notice::message),
            Some("Could not connect to the server.")
        );
        assert_eq!(session.current(), Session::SignedOut);
    }
}
