//! Login flag and route guard.
//!
//! The flag only gates navigation; no merge or commit operation reads it.

use crate::storage::{keys, LocalStore, StorageError};

pub fn login(store: &LocalStore) -> Result<(), StorageError> {
    store.set(keys::LOGGED_IN, "true")
}

pub fn logout(store: &LocalStore) -> Result<(), StorageError> {
    store.remove(keys::LOGGED_IN)?;
    Ok(())
}

pub fn is_logged_in(store: &LocalStore) -> Result<bool, StorageError> {
    Ok(store.get(keys::LOGGED_IN)?.as_deref() == Some("true"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Root,
    Login,
    Home,
    Profile(u32),
    Jobs,
    Network,
}

impl Route {
    /// Parse a URL path. Unknown paths yield `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Route::Root),
            "/login" => Some(Route::Login),
            "/home" => Some(Route::Home),
            "/jobs" => Some(Route::Jobs),
            "/network" => Some(Route::Network),
            other => other
                .strip_prefix("/profile/")
                .and_then(|id| id.parse().ok())
                .map(Route::Profile),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Root => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Home => "/home".to_string(),
            Route::Profile(id) => format!("/profile/{id}"),
            Route::Jobs => "/jobs".to_string(),
            Route::Network => "/network".to_string(),
        }
    }

    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            Route::Home | Route::Profile(_) | Route::Jobs | Route::Network
        )
    }
}

/// Where navigation to `route` actually lands.
pub fn resolve(route: Route, logged_in: bool) -> Route {
    match route {
        Route::Root | Route::Login if logged_in => Route::Home,
        Route::Root => Route::Login,
        r if r.requires_login() && !logged_in => Route::Login,
        r => r,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_flag() {
        let store = LocalStore::open_in_memory().unwrap();
        assert!(!is_logged_in(&store).unwrap());
        login(&store).unwrap();
        assert!(is_logged_in(&store).unwrap());
        logout(&store).unwrap();
        assert!(!is_logged_in(&store).unwrap());
        // Logging out twice is fine
        logout(&store).unwrap();
    }

    #[test]
    fn test_route_parse() {
        assert_eq!(Route::parse("/"), Some(Route::Root));
        assert_eq!(Route::parse("/home/"), Some(Route::Home));
        assert_eq!(Route::parse("/profile/101"), Some(Route::Profile(101)));
        assert_eq!(Route::parse("/jobs?q=rust"), Some(Route::Jobs));
        assert_eq!(Route::parse("/profile/abc"), None);
        assert_eq!(Route::parse("/signup"), None);
        assert_eq!(Route::Profile(7).path(), "/profile/7");
    }

    #[test]
    fn test_guard() {
        assert_eq!(resolve(Route::Root, false), Route::Login);
        assert_eq!(resolve(Route::Root, true), Route::Home);
        assert_eq!(resolve(Route::Login, true), Route::Home);
        assert_eq!(resolve(Route::Login, false), Route::Login);
        assert_eq!(resolve(Route::Profile(3), false), Route::Login);
        assert_eq!(resolve(Route::Profile(3), true), Route::Profile(3));
        assert_eq!(resolve(Route::Network, false), Route::Login);
        assert_eq!(resolve(Route::Jobs, true), Route::Jobs);
    }
}
