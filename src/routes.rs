//! Named routes and the authentication gate.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Signup,
    Profile,
    ProfileEdit,
    Vault,
    VaultTokenize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect(Route),
    NotFound,
}

impl Route {
    pub fn all() -> &'static [Route] {
        &[
            Route::Login,
            Route::Signup,
            Route::Profile,
            Route::ProfileEdit,
            Route::Vault,
            Route::VaultTokenize,
        ]
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::Profile => "/profile",
            Route::ProfileEdit => "/profile/edit",
            Route::Vault => "/vault",
            Route::VaultTokenize => "/vault/tokenize",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Login => "Sign In",
            Route::Signup => "Sign Up",
            Route::Profile => "Profile",
            Route::ProfileEdit => "Edit Profile",
            Route::Vault => "Vault",
            Route::VaultTokenize => "Tokenize Patent",
        }
    }

    pub fn requires_auth(self) -> bool {
        !matches!(self, Route::Login | Route::Signup)
    }

    /// Exact match, ignoring a trailing slash and any query or fragment.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = normalize(path);
        Route::all().iter().copied().find(|r| r.path() == path)
    }
}

fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

/// Decides what to show for `path`.
///
/// `/` always goes to the login page, and protected routes send signed-out
/// visitors there too.
pub fn resolve(path: &str, is_authenticated: bool) -> Resolution {
    let normalized = normalize(path);
    if normalized.is_empty() || normalized == "/" {
        return Resolution::Redirect(Route::Login);
    }
    match Route::from_path(normalized) {
        Some(route) if route.requires_auth() && !is_authenticated => {
            Resolution::Redirect(Route::Login)
        }
        Some(route) => Resolution::Render(route),
        None => Resolution::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for r in Route::all() {
            assert_eq!(Route::from_path(r.path()), Some(*r));
            assert!(!r.title().is_empty());
        }
        assert_eq!(Route::from_path("/vault/"), Some(Route::Vault));
        assert_eq!(Route::from_path("/vault?tab=mine#top"), Some(Route::Vault));
        assert_eq!(Route::from_path("/vault/tokenize/extra"), None);
    }

    #[test]
    fn root_always_redirects_to_login() {
        assert_eq!(resolve("/", false), Resolution::Redirect(Route::Login));
        assert_eq!(resolve("/", true), Resolution::Redirect(Route::Login));
        assert_eq!(resolve("", true), Resolution::Redirect(Route::Login));
    }

    #[test]
    fn protected_routes_need_a_session() {
        for r in [
            Route::Profile,
            Route::ProfileEdit,
            Route::Vault,
            Route::VaultTokenize,
        ] {
            assert_eq!(resolve(r.path(), false), Resolution::Redirect(Route::Login));
            assert_eq!(resolve(r.path(), true), Resolution::Render(r));
        }
    }

    #[test]
    fn public_routes_render_for_everyone() {
        for r in [Route::Login, Route::Signup] {
            assert_eq!(resolve(r.path(), false), Resolution::Render(r));
            assert_eq!(resolve(r.path(), true), Resolution::Render(r));
        }
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(resolve("/settings", true), Resolution::NotFound);
        assert_eq!(resolve("/settings", false), Resolution::NotFound);
    }
}
