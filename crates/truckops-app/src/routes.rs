//! Route table mapping paths to screens

/// Every navigable screen in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Login,
    Signup,
    SetupDb,
    Dashboard,
    Renew,
    Loads,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Signup => "/signup",
            Route::SetupDb => "/setup_db",
            Route::Dashboard => "/dashboard",
            Route::Renew => "/renew",
            Route::Loads => "/loadsPage",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Route::Login),
            "/signup" => Some(Route::Signup),
            "/setup_db" => Some(Route::SetupDb),
            "/dashboard" => Some(Route::Dashboard),
            "/renew" => Some(Route::Renew),
            "/loadsPage" => Some(Route::Loads),
            _ => None,
        }
    }

    /// Screens that require a logged-in session.
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Dashboard | Route::Loads)
    }

    /// Where to land at process start: setup when the backend is not
    /// configured, login otherwise.
    pub fn initial(backend_configured: bool) -> Self {
        if backend_configured {
            Route::Login
        } else {
            Route::SetupDb
        }
    }

    /// Resolve a navigation request against the session state.
    /// Protected routes without a session fall back to login.
    pub fn resolve(self, has_session: bool) -> Self {
        if self.is_protected() && !has_session {
            Route::Login
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for route in [
            Route::Login,
            Route::Signup,
            Route::SetupDb,
            Route::Dashboard,
            Route::Renew,
            Route::Loads,
        ] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/unknown"), None);
    }

    #[test]
    fn unconfigured_backend_routes_to_setup() {
        assert_eq!(Route::initial(false), Route::SetupDb);
        assert_eq!(Route::initial(true), Route::Login);
    }

    #[test]
    fn protected_routes_need_a_session() {
        assert_eq!(Route::Dashboard.resolve(false), Route::Login);
        assert_eq!(Route::Loads.resolve(false), Route::Login);
        assert_eq!(Route::Dashboard.resolve(true), Route::Dashboard);
        assert_eq!(Route::Login.resolve(false), Route::Login);
        assert_eq!(Route::Renew.resolve(false), Route::Renew);
    }
}
