//! Sign-up and sign-in forms
//!
//! Both forms run the same small state machine:
//!
//! ```text
//! Editing -> Submitting -> Succeeded
//!                      \-> Failed (still editable, values kept)
//! ```
//!
//! Each flow splits a submission into `begin_submit` (local validation,
//! produces the request) and `finish` (records the backend outcome and says
//! where to go next), so a UI can await the network call in between. The
//! `submit` helpers do all three steps for callers that can hold `&mut self`
//! across an await.

use std::time::Duration;

use crate::api::DocQueryApi;
use crate::routes::{Navigation, Route};
use crate::session::Session;
use crate::types::{AppError, Result, SignupRequest, TokenRequest, TokenResponse};

pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match!";
pub const MSG_FIELDS_REQUIRED: &str = "All fields are required.";
pub const MSG_SIGNUP_OK: &str = "User created successfully!";
pub const MSG_SIGNUP_FAILED: &str = "An error occurred";
pub const MSG_SIGNIN_OK: &str = "Login successful!";
pub const MSG_SIGNIN_FAILED: &str = "Invalid credentials or an error occurred";
const MSG_BUSY: &str = "A request is already in progress.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthPhase {
    #[default]
    Editing,
    Submitting,
    Succeeded,
    Failed,
}

impl AuthPhase {
    pub fn is_editable(self) -> bool {
        matches!(self, AuthPhase::Editing | AuthPhase::Failed)
    }
}

// ============= Forms =============

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    fn all_filled(&self) -> bool {
        [
            &self.full_name,
            &self.email,
            &self.password,
            &self.confirm_password,
        ]
        .iter()
        .all(|f| !f.is_empty())
    }

    pub fn passwords_match(&self) -> bool {
        self.password == self.confirm_password
    }

    pub fn is_valid(&self) -> bool {
        self.all_filled() && self.passwords_match()
    }

    /// Check the form and build the request. The mismatch check comes first
    /// so it gets its own message even when another field is empty.
    pub fn validate(&self) -> Result<SignupRequest> {
        if !self.passwords_match() {
            return Err(AppError::Validation(MSG_PASSWORD_MISMATCH.into()));
        }
        if !self.all_filled() {
            return Err(AppError::Validation(MSG_FIELDS_REQUIRED.into()));
        }
        Ok(SignupRequest {
            username: self.full_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub username_or_email: String,
    pub password: String,
}

impl SignInForm {
    pub fn is_valid(&self) -> bool {
        !self.username_or_email.is_empty() && !self.password.is_empty()
    }

    pub fn validate(&self) -> Result<TokenRequest> {
        if !self.is_valid() {
            return Err(AppError::Validation(MSG_FIELDS_REQUIRED.into()));
        }
        Ok(TokenRequest {
            username: self.username_or_email.clone(),
            password: self.password.clone(),
        })
    }
}

// ============= Sign up =============

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpFlow {
    pub form: SignUpForm,
    phase: AuthPhase,
    message: Option<String>,
    redirect_delay: Duration,
}

impl SignUpFlow {
    /// `redirect_delay` is how long the confirmation stays visible before
    /// moving to the sign-in page.
    pub fn new(redirect_delay: Duration) -> Self {
        Self {
            form: SignUpForm::default(),
            phase: AuthPhase::Editing,
            message: None,
            redirect_delay,
        }
    }

    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Apply an edit. Ignored while a submission is outstanding.
    pub fn edit(&mut self, f: impl FnOnce(&mut SignUpForm)) {
        if self.phase.is_editable() {
            f(&mut self.form);
            self.phase = AuthPhase::Editing;
        }
    }

    pub fn can_submit(&self) -> bool {
        self.phase.is_editable() && self.form.is_valid()
    }

    pub fn begin_submit(&mut self) -> Result<SignupRequest> {
        if !self.phase.is_editable() {
            return Err(AppError::Validation(MSG_BUSY.into()));
        }
        match self.form.validate() {
            Ok(request) => {
                self.phase = AuthPhase::Submitting;
                self.message = None;
                Ok(request)
            }
            Err(e) => {
                self.message = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Record the backend outcome. On success returns the delayed
    /// navigation to the sign-in page.
    pub fn finish(&mut self, outcome: Result<()>) -> Result<Navigation> {
        match outcome {
            Ok(()) => {
                tracing::info!("Account created");
                self.phase = AuthPhase::Succeeded;
                self.message = Some(MSG_SIGNUP_OK.into());
                Ok(Navigation::push(Route::SignIn).after(self.redirect_delay))
            }
            Err(e) => {
                tracing::warn!("Sign up failed: {}", e);
                self.phase = AuthPhase::Failed;
                self.message = Some(e.message_or(MSG_SIGNUP_FAILED));
                Err(e)
            }
        }
    }

    pub async fn submit<A>(&mut self, api: &A) -> Result<Navigation>
    where
        A: DocQueryApi + ?Sized,
    {
        let request = self.begin_submit()?;
        let outcome = api.signup(&request).await;
        self.finish(outcome)
    }
}

impl Default for SignUpFlow {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::config::DEFAULT_SIGNUP_REDIRECT_DELAY_MS))
    }
}

// ============= Sign in =============

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInFlow {
    pub form: SignInForm,
    phase: AuthPhase,
    message: Option<String>,
}

impl SignInFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn edit(&mut self, f: impl FnOnce(&mut SignInForm)) {
        if self.phase.is_editable() {
            f(&mut self.form);
            self.phase = AuthPhase::Editing;
        }
    }

    pub fn begin_submit(&mut self) -> Result<TokenRequest> {
        if !self.phase.is_editable() {
            return Err(AppError::Validation(MSG_BUSY.into()));
        }
        match self.form.validate() {
            Ok(request) => {
                self.phase = AuthPhase::Submitting;
                self.message = None;
                Ok(request)
            }
            Err(e) => {
                self.message = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Record the backend outcome. A token is written to `session` before
    /// the navigation to the upload page is returned. The password is kept
    /// on failure.
    pub fn finish(
        &mut self,
        outcome: Result<TokenResponse>,
        session: &Session,
    ) -> Result<Navigation> {
        let stored = outcome.and_then(|resp| session.set(&resp.access_token));
        match stored {
            Ok(()) => {
                tracing::info!("Signed in");
                self.phase = AuthPhase::Succeeded;
                self.message = Some(MSG_SIGNIN_OK.into());
                Ok(Navigation::push(Route::Upload))
            }
            Err(e) => {
                tracing::warn!("Sign in failed: {}", e);
                self.phase = AuthPhase::Failed;
                self.message = Some(MSG_SIGNIN_FAILED.into());
                Err(e)
            }
        }
    }

    pub async fn submit<A>(&mut self, api: &A, session: &Session) -> Result<Navigation>
    where
        A: DocQueryApi + ?Sized,
    {
        let request = self.begin_submit()?;
        let outcome = api.token(&request).await;
        self.finish(outcome, session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryTokenStore;

    fn filled() -> SignUpForm {
        SignUpForm {
            full_name: "A".into(),
            email: "a@x.com".into(),
            password: "p".into(),
            confirm_password: "p".into(),
        }
    }

    #[test]
    fn test_signup_form_validity() {
        assert!(filled().is_valid());
        assert!(!SignUpForm::default().is_valid());

        let mut form = filled();
        form.confirm_password = "q".into();
        assert!(!form.is_valid());
        assert_eq!(
            form.validate(),
            Err(AppError::Validation(MSG_PASSWORD_MISMATCH.into()))
        );

        let mut form = filled();
        form.email.clear();
        assert_eq!(
            form.validate(),
            Err(AppError::Validation(MSG_FIELDS_REQUIRED.into()))
        );
    }

    #[test]
    fn test_signup_request_mapping() {
        let req = filled().validate().unwrap();
        assert_eq!(req.username, "A");
        assert_eq!(req.email, "a@x.com");
        assert_eq!(req.confirm_password, "p");
    }

    #[test]
    fn test_signup_submit_enabled_only_when_complete() {
        let mut flow = SignUpFlow::default();
        assert!(!flow.can_submit());

        flow.edit(|f| f.full_name = "A".into());
        assert!(!flow.can_submit());

        flow.edit(|f| {
            f.email = "a@x.com".into();
            f.password = "p".into();
        });
        assert!(!flow.can_submit());

        flow.edit(|f| f.confirm_password = "p".into());
        assert!(flow.can_submit());

        flow.edit(|f| f.password.clear());
        assert!(!flow.can_submit());
    }

    #[test]
    fn test_signup_mismatch_stays_editing() {
        let mut flow = SignUpFlow::default();
        flow.edit(|f| *f = filled());
        flow.edit(|f| f.confirm_password = "different".into());
        assert!(!flow.can_submit());

        assert!(flow.begin_submit().is_err());
        assert_eq!(flow.phase(), AuthPhase::Editing);
        assert_eq!(flow.message(), Some(MSG_PASSWORD_MISMATCH));
        assert_eq!(flow.form.full_name, "A");
    }

    #[test]
    fn test_signup_success_navigates_after_delay() {
        let mut flow = SignUpFlow::new(Duration::from_millis(1500));
        flow.edit(|f| *f = filled());
        flow.begin_submit().unwrap();
        assert_eq!(flow.phase(), AuthPhase::Submitting);
        assert!(!flow.can_submit());

        let nav = flow.finish(Ok(())).unwrap();
        assert_eq!(nav.to, Route::SignIn);
        assert_eq!(nav.delay, Some(Duration::from_millis(1500)));
        assert_eq!(flow.message(), Some(MSG_SIGNUP_OK));
    }

    #[test]
    fn test_signup_failure_uses_backend_detail() {
        let mut flow = SignUpFlow::default();
        flow.edit(|f| *f = filled());
        flow.begin_submit().unwrap();

        let nav = flow.finish(Err(AppError::Backend {
            status: 400,
            detail: Some("Username or Email already registered".into()),
        }));
        assert!(nav.is_err());
        assert_eq!(flow.phase(), AuthPhase::Failed);
        assert!(flow.phase().is_editable());
        assert_eq!(flow.message(), Some("Username or Email already registered"));
        assert_eq!(flow.form, filled());

        flow.begin_submit().unwrap();
        let _ = flow.finish(Err(AppError::Network("connection refused".into())));
        assert_eq!(flow.message(), Some(MSG_SIGNUP_FAILED));
    }

    #[test]
    fn test_edits_ignored_while_submitting() {
        let mut flow = SignUpFlow::default();
        flow.edit(|f| *f = filled());
        flow.begin_submit().unwrap();
        flow.edit(|f| f.full_name = "B".into());
        assert_eq!(flow.form.full_name, "A");
        assert!(flow.begin_submit().is_err());
    }

    #[test]
    fn test_signin_success_stores_token() {
        let session = Session::init(MemoryTokenStore::default());
        let mut flow = SignInFlow::new();
        flow.edit(|f| {
            f.username_or_email = "a@x.com".into();
            f.password = "p".into();
        });
        let req = flow.begin_submit().unwrap();
        assert_eq!(req.username, "a@x.com");

        let nav = flow
            .finish(
                Ok(TokenResponse {
                    access_token: "jwt-1".into(),
                    token_type: Some("bearer".into()),
                }),
                &session,
            )
            .unwrap();
        assert_eq!(nav, Navigation::push(Route::Upload));
        assert_eq!(session.get().as_deref(), Some("jwt-1"));
        assert_eq!(flow.phase(), AuthPhase::Succeeded);
    }

    #[test]
    fn test_signin_failure_keeps_password() {
        let session = Session::init(MemoryTokenStore::default());
        let mut flow = SignInFlow::new();
        flow.edit(|f| {
            f.username_or_email = "a".into();
            f.password = "wrong".into();
        });
        flow.begin_submit().unwrap();

        let err = flow
            .finish(
                Err(AppError::Backend {
                    status: 401,
                    detail: Some("Invalid credentials".into()),
                }),
                &session,
            )
            .unwrap_err();
        assert_eq!(err.kind(), crate::types::ErrorKind::Backend);
        assert_eq!(flow.message(), Some(MSG_SIGNIN_FAILED));
        assert_eq!(flow.form.password, "wrong");
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_signin_empty_token_is_failure() {
        let session = Session::init(MemoryTokenStore::default());
        let mut flow = SignInFlow::new();
        flow.edit(|f| {
            f.username_or_email = "a".into();
            f.password = "p".into();
        });
        flow.begin_submit().unwrap();
        let result = flow.finish(
            Ok(TokenResponse {
                access_token: String::new(),
                token_type: None,
            }),
            &session,
        );
        assert!(result.is_err());
        assert_eq!(flow.phase(), AuthPhase::Failed);
        assert!(!session.is_authenticated());
    }
}
