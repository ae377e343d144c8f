//! Cookie string access

/// Read access to the document cookie string (`a=1; b=2`)
#[cfg_attr(test, mockall::automock)]
pub trait CookieJar {
    fn cookie_string(&self) -> Option<String>;
}

impl<J: CookieJar + ?Sized> CookieJar for Box<J> {
    fn cookie_string(&self) -> Option<String> {
        (**self).cookie_string()
    }
}

/// Jar for environments without a cookie store
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCookies;

impl CookieJar for NoCookies {
    fn cookie_string(&self) -> Option<String> {
        None
    }
}

/// Value of cookie `name` in a `document.cookie` style string.
///
/// Names match exactly (`XSRF-TOKEN` does not match `XSRF-TOKEN-OLD`). The
/// first occurrence wins and an empty value counts as absent.
pub fn read_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim_start)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}
