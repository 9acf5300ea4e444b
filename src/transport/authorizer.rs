use crate::transport::AccessTokenSource;
use reqwest::{
    cookie::{CookieStore, Jar},
    header::{HeaderValue, AUTHORIZATION, COOKIE, SET_COOKIE},
    Request, Response,
};
use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::error;
use url::Url;

/// Stamps outgoing requests with transport credentials and the bearer token.
///
/// The cookie jar plays the role of the browser's credential store: every
/// request carries the cookies the jar holds for its URL, authenticated or
/// not, so the refresh and logout calls reach the server with the `HttpOnly`
/// refresh cookie. The bearer header is present if and only if a token is held
/// when the request is authorized; credentials are checked for header safety
/// before they are stored, so the fallback in [`RequestAuthorizer::authorize`]
/// only logs.
#[derive(Clone)]
pub struct RequestAuthorizer {
    jar: Arc<Jar>,
    tokens: Arc<dyn AccessTokenSource>,
}

impl RequestAuthorizer {
    #[must_use]
    pub fn new(jar: Arc<Jar>, tokens: Arc<dyn AccessTokenSource>) -> Self {
        Self { jar, tokens }
    }

    /// Returns the request with cookies and, when a token is held, the
    /// `Authorization` header applied. Pure and synchronous.
    #[must_use]
    pub fn authorize(&self, mut request: Request) -> Request {
        let cookies = self.jar.cookies(request.url());
        let bearer = self.tokens.current_access_token().and_then(|token| {
            match HeaderValue::from_str(&format!("Bearer {}", token.expose_secret())) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    Some(value)
                }
                Err(_) => {
                    error!(
                        path = request.url().path(),
                        "held access token is not a valid header value, request sent without bearer"
                    );
                    None
                }
            }
        });

        let headers = request.headers_mut();
        if let Some(cookies) = cookies {
            headers.insert(COOKIE, cookies);
        }
        match bearer {
            Some(value) => {
                headers.insert(AUTHORIZATION, value);
            }
            None => {
                headers.remove(AUTHORIZATION);
            }
        }

        request
    }

    /// Records `Set-Cookie` headers from a response against the request URL.
    pub fn store_cookies(&self, response: &Response, url: &Url) {
        let mut set_cookies = response.headers().get_all(SET_COOKIE).iter();
        self.jar.set_cookies(&mut set_cookies, url);
    }
}
