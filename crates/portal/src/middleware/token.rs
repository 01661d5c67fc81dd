use axum::http::{HeaderMap, header};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use shared::domain::CachedPartnerCode;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const PARTNER_CODE_COOKIE: &str = "partner_code";

/// The persisted access token, from the session cookie or a bearer header.
pub fn stored_access_token(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    jar.get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| auth_value.strip_prefix("Bearer ").map(str::to_owned))
        })
        .filter(|token| !token.is_empty())
}

/// The browser's last known partner code. Malformed values are ignored.
pub fn cached_partner_code(jar: &CookieJar) -> Option<CachedPartnerCode> {
    jar.get(PARTNER_CODE_COOKIE)
        .and_then(|cookie| CachedPartnerCode::from_cookie_value(cookie.value()))
}

pub fn portal_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

/// Cookie that removes `name` from the browser.
pub fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, "")).path("/").build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use uuid::Uuid;

    #[test]
    fn cookie_wins_over_bearer_header() {
        let jar = CookieJar::new().add(Cookie::new(ACCESS_TOKEN_COOKIE, "from-cookie"));
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));

        assert_eq!(stored_access_token(&jar, &headers).as_deref(), Some("from-cookie"));
        assert_eq!(
            stored_access_token(&CookieJar::new(), &headers).as_deref(),
            Some("from-header")
        );
    }

    #[test]
    fn empty_token_counts_as_missing() {
        let jar = CookieJar::new().add(Cookie::new(ACCESS_TOKEN_COOKIE, ""));
        assert_eq!(stored_access_token(&jar, &HeaderMap::new()), None);
    }

    #[test]
    fn partner_code_cookie_is_parsed() {
        let partner_id = Uuid::new_v4();
        let cached = CachedPartnerCode::new(partner_id, "ABC123");
        let jar = CookieJar::new().add(Cookie::new(PARTNER_CODE_COOKIE, cached.to_cookie_value()));

        assert_eq!(cached_partner_code(&jar), Some(cached));

        let garbage = CookieJar::new().add(Cookie::new(PARTNER_CODE_COOKIE, "nonsense"));
        assert_eq!(cached_partner_code(&garbage), None);
    }
}
