//! Refresh-token cookie builders.
//!
//! The cookie carries only the refresh token; the access token travels in
//! the `Authorization` header and response bodies.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use time::{Duration, OffsetDateTime};

/// Cookie name for the refresh token.
pub const REFRESH_TOKEN: &str = "refreshToken";

/// Set the refresh-token cookie on the jar. The cookie expires together with
/// the stored token.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use praxis_api::cookie::{REFRESH_TOKEN, set_refresh_token_cookie};
///
/// let expires_at = chrono::Utc::now() + chrono::Duration::days(30);
/// let jar = set_refresh_token_cookie(CookieJar::new(), "value".to_owned(), expires_at, true);
/// let cookie = jar.get(REFRESH_TOKEN).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// assert!(cookie.expires_datetime().is_some());
/// ```
pub fn set_refresh_token_cookie(
    jar: CookieJar,
    value: String,
    expires_at: DateTime<Utc>,
    secure: bool,
) -> CookieJar {
    let expires = OffsetDateTime::from_unix_timestamp(expires_at.timestamp())
        .unwrap_or(OffsetDateTime::UNIX_EPOCH);
    let cookie = Cookie::build((REFRESH_TOKEN, value))
        .path("/")
        .expires(expires)
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Clear the refresh-token cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use praxis_api::cookie::{REFRESH_TOKEN, clear_refresh_token_cookie, set_refresh_token_cookie};
///
/// let expires_at = chrono::Utc::now() + chrono::Duration::days(30);
/// let jar = set_refresh_token_cookie(CookieJar::new(), "value".to_owned(), expires_at, false);
/// let jar = clear_refresh_token_cookie(jar, false);
/// let cookie = jar.get(REFRESH_TOKEN).unwrap();
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// assert_eq!(cookie.value(), "");
/// ```
pub fn clear_refresh_token_cookie(jar: CookieJar, secure: bool) -> CookieJar {
    let cookie = Cookie::build((REFRESH_TOKEN, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}
