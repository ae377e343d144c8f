//! Static route table
//!
//! The table is built once at startup and never mutated. It only answers one
//! question for the guard: does this path need an authenticated session?

use crate::config::RouteSettings;
use crate::error::{Error, Result};

/// One entry of the route table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pattern: String,
    view: &'static str,
    requires_auth: bool,
}

/// How the guard must treat a destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Needs an authenticated session
    Protected,
    /// Login or registration page
    AuthPage,
    /// Anything else; never triggers a session query
    Public,
}

impl RouteDescriptor {
    /// Create a descriptor. Patterns must be absolute; `:name` segments match
    /// exactly one non-empty path segment.
    pub fn new(pattern: &str, view: &'static str, requires_auth: bool) -> Result<Self> {
        if !pattern.starts_with('/') {
            return Err(Error::InvalidRoute(format!(
                "pattern must start with '/': {pattern}"
            )));
        }
        if segments(pattern).any(|seg| seg == ":") {
            return Err(Error::InvalidRoute(format!(
                "unnamed parameter segment in {pattern}"
            )));
        }
        Ok(Self {
            pattern: pattern.to_string(),
            view,
            requires_auth,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Name of the view mounted at this route
    pub const fn view(&self) -> &'static str {
        self.view
    }

    pub const fn requires_auth(&self) -> bool {
        self.requires_auth
    }

    /// Whether `path` (no query, no fragment) matches this pattern
    pub fn matches(&self, path: &str) -> bool {
        let mut expected = segments(&self.pattern);
        let mut actual = segments(path);
        loop {
            match (expected.next(), actual.next()) {
                (None, None) => return true,
                (Some(pat), Some(seg)) => {
                    let is_param = pat.starts_with(':');
                    if (is_param && seg.is_empty()) || (!is_param && pat != seg) {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }
}

/// Immutable set of routes known to the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
    login: String,
    register: String,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDescriptor>, settings: &RouteSettings) -> Self {
        Self {
            routes,
            login: normalize(&settings.login).to_string(),
            register: normalize(&settings.register).to_string(),
        }
    }

    /// The console's route table
    pub fn console(settings: &RouteSettings) -> Result<Self> {
        const PROTECTED: &[(&str, &str)] = &[
            ("/", "apps"),
            ("/apps", "apps"),
            ("/cards", "cards"),
            ("/app-settings", "app-settings"),
            ("/callback", "callback"),
            ("/api-docs", "api-docs"),
            ("/hook-management", "hook-management"),
            ("/hook-edit", "hook-edit"),
            ("/hook-edit/:id", "hook-edit"),
            ("/java-editor", "java-editor"),
        ];

        let mut routes = PROTECTED
            .iter()
            .map(|(pattern, view)| RouteDescriptor::new(pattern, view, true))
            .collect::<Result<Vec<_>>>()?;
        routes.push(RouteDescriptor::new(&settings.login, "login", false)?);
        routes.push(RouteDescriptor::new(&settings.register, "register", false)?);

        Ok(Self::new(routes, settings))
    }

    /// First descriptor matching the path component of `full_path`
    pub fn find(&self, full_path: &str) -> Option<&RouteDescriptor> {
        let path = path_of(full_path);
        self.routes.iter().find(|route| route.matches(path))
    }

    /// Classify a destination for the guard
    pub fn access(&self, full_path: &str) -> RouteAccess {
        if self.find(full_path).is_some_and(RouteDescriptor::requires_auth) {
            return RouteAccess::Protected;
        }
        let path = path_of(full_path);
        if path == self.login || path == self.register {
            RouteAccess::AuthPage
        } else {
            RouteAccess::Public
        }
    }
}

/// Path component of a full path: query and fragment stripped, one trailing
/// slash ignored except for the root
pub fn path_of(full_path: &str) -> &str {
    let end = full_path.find(['?', '#']).unwrap_or(full_path.len());
    normalize(&full_path[..end])
}

fn normalize(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => path,
    }
}

fn segments(path: &str) -> std::str::Split<'_, char> {
    path.trim_start_matches('/').split('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::console(&RouteSettings::default()).unwrap()
    }

    #[test]
    fn main_views_are_protected() {
        let table = table();
        for path in [
            "/",
            "/apps",
            "/cards",
            "/app-settings",
            "/callback",
            "/api-docs",
            "/hook-management",
            "/hook-edit",
            "/hook-edit/42",
            "/java-editor",
        ] {
            assert_eq!(table.access(path), RouteAccess::Protected, "{path}");
        }
    }

    #[test]
    fn login_and_register_are_auth_pages() {
        let table = table();
        assert_eq!(table.access("/login"), RouteAccess::AuthPage);
        assert_eq!(table.access("/register"), RouteAccess::AuthPage);
        assert_eq!(table.access("/login?redirect=%2Fcards"), RouteAccess::AuthPage);
        assert_eq!(table.access("/login/"), RouteAccess::AuthPage);
    }

    #[test]
    fn unknown_paths_are_public() {
        let table = table();
        assert_eq!(table.access("/about"), RouteAccess::Public);
        assert_eq!(table.access("/hook-edit/42/extra"), RouteAccess::Public);
        assert_eq!(table.access("/hook-edit//"), RouteAccess::Public);
    }

    #[test]
    fn query_and_fragment_do_not_affect_matching() {
        let table = table();
        assert_eq!(table.access("/cards?page=2"), RouteAccess::Protected);
        assert_eq!(table.access("/api-docs#auth"), RouteAccess::Protected);
        assert_eq!(table.find("/hook-edit/7?tab=code").unwrap().view(), "hook-edit");
    }

    #[test]
    fn parameter_segments_match_one_segment() {
        let route = RouteDescriptor::new("/hook-edit/:id", "hook-edit", true).unwrap();
        assert!(route.matches("/hook-edit/abc"));
        assert!(!route.matches("/hook-edit"));
        assert!(!route.matches("/hook-edit/"));
        assert!(!route.matches("/hook-edit/a/b"));
    }

    #[test]
    fn relative_patterns_are_rejected() {
        assert!(matches!(
            RouteDescriptor::new("apps", "apps", true),
            Err(Error::InvalidRoute(_))
        ));
        assert!(RouteDescriptor::new("/hook-edit/:", "hook-edit", true).is_err());
    }

    #[test]
    fn path_of_strips_query_fragment_and_trailing_slash() {
        assert_eq!(path_of("/apps/?x=1"), "/apps");
        assert_eq!(path_of("/"), "/");
        assert_eq!(path_of("/?redirect=/"), "/");
        assert_eq!(path_of("/cards#top"), "/cards");
    }
}
