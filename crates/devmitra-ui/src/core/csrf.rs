//! CSRF token lookup for mutating requests.

use devmitra_api_models::CSRF_COOKIE;

/// Token attached as `X-CSRFToken` on every POST.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    /// Wrap a raw token, ignoring blank values.
    #[must_use]
    pub fn new(value: &str) -> Option<Self> {
        let value = value.trim();
        (!value.is_empty()).then(|| Self(value.to_string()))
    }

    /// Raw header value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Read cookie `name` from a `document.cookie` string, percent-decoding the value.
#[must_use]
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(name)?.strip_prefix('='))
        .map(|raw| {
            urlencoding::decode(raw).map_or_else(|_| raw.to_string(), std::borrow::Cow::into_owned)
        })
}

/// Resolve the token from the cookie, falling back to the hidden form field.
#[must_use]
pub fn resolve(cookies: &str, cookie_name: &str, form_field: Option<&str>) -> Option<CsrfToken> {
    cookie_value(cookies, cookie_name)
        .as_deref()
        .and_then(CsrfToken::new)
        .or_else(|| form_field.and_then(CsrfToken::new))
}

/// Resolve the token using the default cookie name.
#[must_use]
pub fn from_cookies(cookies: &str) -> Option<CsrfToken> {
    resolve(cookies, CSRF_COOKIE, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_lookup_matches_exact_name() {
        let cookies = "sessionid=abc; csrftoken_old=stale; csrftoken=t%2Bk%3D";
        assert_eq!(cookie_value(cookies, "csrftoken").as_deref(), Some("t+k="));
        assert_eq!(cookie_value(cookies, "missing"), None);
        assert_eq!(cookie_value("", "csrftoken"), None);
    }

    #[test]
    fn hidden_field_is_used_without_cookie() {
        let token = resolve("sessionid=abc", "csrftoken", Some(" field-token "));
        assert_eq!(token.map(|token| token.as_str().to_string()), Some("field-token".into()));
        assert_eq!(resolve("csrftoken=", "csrftoken", Some("  ")), None);
        assert_eq!(
            from_cookies("csrftoken=abc").map(|token| token.as_str().to_string()),
            Some("abc".to_string())
        );
    }
}
