use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::time::Duration;

use crate::error::BoxError;

/// HTTP verb used for an API call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    /// Arguments travel in the query string.
    #[default]
    Get,
    /// Arguments travel as a form-encoded body; the URL has no query string.
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// A fully assembled API request, described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Target URL, including the query string for GET.
    pub url: String,
    /// Form fields for POST, `None` for GET.
    pub form: Option<Vec<(String, String)>>,
    pub username: String,
    pub password: String,
    pub user_agent: String,
    /// `None` means no limit.
    pub connect_timeout: Option<Duration>,
    /// `None` means no limit.
    pub timeout: Option<Duration>,
}

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Sends an [`ApiRequest`] over the wire.
///
/// Any response the server produced, whatever its status, is `Ok`; `Err` is
/// reserved for connection, DNS, TLS and timeout failures.
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, BoxError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, BoxError> {
        (**self).send(request)
    }
}

/// Default transport backed by `reqwest::blocking`.
///
/// A fresh HTTP client is built per request so the timeouts in effect are
/// always the ones carried by the request. Redirects are not followed: a 3xx
/// is handed back like any other status.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpTransport;

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, BoxError> {
        let mut builder = HttpClient::builder()
            .user_agent(request.user_agent.as_str())
            .redirect(Policy::none())
            .timeout(request.timeout);
        if let Some(connect_timeout) = request.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        let http = builder.build()?;

        let req = match request.method {
            Method::Get => http.get(&request.url),
            Method::Post => http.post(&request.url),
        };
        let mut req = req.basic_auth(&request.username, Some(&request.password));
        if let Some(form) = &request.form {
            req = req.form(form);
        }

        let resp = req.send()?;
        let status = resp.status().as_u16();
        let body = resp.bytes()?.to_vec();
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_is_the_default_method() {
        assert_eq!(Method::default(), Method::Get);
        assert_eq!(Method::Post.as_str(), "POST");
    }

    #[test]
    fn unreachable_host_is_a_transport_error() {
        let request = ApiRequest {
            method: Method::Get,
            // Port 9 on loopback: nothing listens there in test environments.
            url: "http://127.0.0.1:9/api/2/sites/1/tags".to_string(),
            form: None,
            username: String::new(),
            password: String::new(),
            user_agent: "test".to_string(),
            connect_timeout: Some(Duration::from_secs(1)),
            timeout: Some(Duration::from_secs(1)),
        };
        assert!(HttpTransport.send(&request).is_err());
    }
}
