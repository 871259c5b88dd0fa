//! Route table and authorization gate
//!
//! The set of client routes is static. Which of them need a signed-in
//! session is decided here, once, by [`AuthGate`]; pages do not repeat the
//! check.

use std::time::Duration;

use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    SignUp,
    SignIn,
    /// Document upload page, served at `/main`.
    Upload,
    Query,
    About,
    Help,
    Privacy,
    Terms,
    Contact,
}

impl Route {
    pub const ALL: [Route; 10] = [
        Route::Home,
        Route::SignUp,
        Route::SignIn,
        Route::Upload,
        Route::Query,
        Route::About,
        Route::Help,
        Route::Privacy,
        Route::Terms,
        Route::Contact,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::SignUp => "/signup",
            Route::SignIn => "/signin",
            Route::Upload => "/main",
            Route::Query => "/query",
            Route::About => "/about",
            Route::Help => "/help",
            Route::Privacy => "/privacy",
            Route::Terms => "/terms",
            Route::Contact => "/contact",
        }
    }

    /// Resolve a URL path, ignoring a trailing slash, query and fragment.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        Route::ALL.into_iter().find(|r| r.path() == path)
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Dashboard",
            Route::SignUp => "Sign Up",
            Route::SignIn => "Sign In",
            Route::Upload => "Upload Your Document",
            Route::Query => "Ask Your Question",
            Route::About => "About Us",
            Route::Help => "Support",
            Route::Privacy => "Privacy Policy",
            Route::Terms => "Terms of Service",
            Route::Contact => "Contact Us",
        }
    }

    pub fn requires_auth(self) -> bool {
        matches!(self, Route::Upload | Route::Query)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// A requested change of page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub to: Route,
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
    /// Wait this long before navigating.
    pub delay: Option<Duration>,
}

impl Navigation {
    pub fn push(to: Route) -> Self {
        Self {
            to,
            replace: false,
            delay: None,
        }
    }

    pub fn replace(to: Route) -> Self {
        Self {
            to,
            replace: true,
            delay: None,
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Outcome of checking a route against the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(Navigation),
}

/// Single gate wrapped around every protected route.
#[derive(Debug, Clone)]
pub struct AuthGate {
    session: Session,
}

impl AuthGate {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn check(&self, route: Route) -> Access {
        if route.requires_auth() && !self.session.is_authenticated() {
            tracing::debug!(%route, "Unauthenticated access, redirecting to sign in");
            Access::Redirect(Navigation::replace(Route::SignIn))
        } else {
            Access::Allow
        }
    }

    /// Target of the landing page's "Get Started" action.
    pub fn get_started(&self) -> Route {
        if self.session.is_authenticated() {
            Route::Upload
        } else {
            Route::SignUp
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryTokenStore;

    #[test]
    fn test_paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    #[test]
    fn test_from_path_normalises() {
        assert_eq!(Route::from_path("/main/"), Some(Route::Upload));
        assert_eq!(Route::from_path("/query?x=1"), Some(Route::Query));
        assert_eq!(Route::from_path(""), Some(Route::Home));
        assert_eq!(Route::from_path("/nope"), None);
    }

    #[test]
    fn test_gate_blocks_protected_routes_when_signed_out() {
        let gate = AuthGate::new(Session::init(MemoryTokenStore::default()));
        for route in [Route::Upload, Route::Query] {
            assert_eq!(
                gate.check(route),
                Access::Redirect(Navigation::replace(Route::SignIn))
            );
        }
        assert_eq!(gate.check(Route::SignUp), Access::Allow);
        assert_eq!(gate.check(Route::About), Access::Allow);
        assert_eq!(gate.get_started(), Route::SignUp);
    }

    #[test]
    fn test_gate_allows_after_sign_in() {
        let session = Session::init(MemoryTokenStore::default());
        let gate = AuthGate::new(session.clone());
        session.set("tok").unwrap();
        assert_eq!(gate.check(Route::Query), Access::Allow);
        assert_eq!(gate.get_started(), Route::Upload);
    }
}
