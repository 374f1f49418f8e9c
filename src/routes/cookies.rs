use tower_cookies::{Cookie, Cookies};

use crate::auth::TokenPair;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

pub fn set_session_cookies(cookies: &Cookies, pair: &TokenPair) {
    cookies.add(session_cookie(ACCESS_TOKEN_COOKIE, pair.access_token.clone()));
    cookies.add(session_cookie(
        REFRESH_TOKEN_COOKIE,
        pair.refresh_token.clone(),
    ));
}

pub fn clear_session_cookies(cookies: &Cookies) {
    cookies.remove(session_cookie(ACCESS_TOKEN_COOKIE, String::new()));
    cookies.remove(session_cookie(REFRESH_TOKEN_COOKIE, String::new()));
}

fn session_cookie(name: &'static str, value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);
    cookie.set_http_only(true);
    cookie.set_secure(true);
    cookie.set_path("/");
    cookie
}

#[cfg(test)]
mod tests {
    use super::session_cookie;

    #[test]
    fn session_cookies_are_http_only_and_secure() {
        let cookie = session_cookie("accessToken", "token-value".to_string());

        assert_eq!(cookie.name(), "accessToken");
        assert_eq!(cookie.value(), "token-value");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }
}
