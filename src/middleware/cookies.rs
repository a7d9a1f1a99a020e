use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use crate::types::AccessToken;

/// Default session cookie name.
pub const SESSION_COOKIE_NAME: &str = "threads_session";

/// Create session cookie carrying the bearer token.
pub(super) fn session_cookie(
    name: &str,
    token: &AccessToken,
    ttl_days: i64,
    secure: bool,
) -> Cookie<'static> {
    Cookie::build((name.to_string(), token.as_str().to_string()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/".to_string())
        .max_age(Duration::days(ttl_days))
        .build()
}

/// Create removal cookie for session.
pub(super) fn clear_session_cookie(name: &str) -> Cookie<'static> {
    Cookie::build((name.to_string(), ""))
        .path("/".to_string())
        .max_age(Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_flags() {
        let cookie = session_cookie(SESSION_COOKIE_NAME, &"long1".into(), 30, true);

        assert_eq!(cookie.name(), "threads_session");
        assert_eq!(cookie.value(), "long1");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(2_592_000)));
    }

    #[test]
    fn test_session_cookie_header() {
        let header = session_cookie(SESSION_COOKIE_NAME, &"tok".into(), 30, true).to_string();

        assert!(header.starts_with("threads_session=tok"));
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("SameSite=Lax"));
        assert!(header.contains("Secure"));
        assert!(header.contains("Max-Age=2592000"));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie(SESSION_COOKIE_NAME);

        assert_eq!(cookie.name(), "threads_session");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }
}
