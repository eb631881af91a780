use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::args::Args;
use crate::config::load_config;
use crate::credentials::Credentials;
use crate::error::{PosterousError, Result};
use crate::transport::{ApiRequest, HttpTransport, Method, Transport};

/// Sites endpoint of the Posterous v2 API; `{site_id}/{path}` is appended per call.
pub const DEFAULT_BASE_URL: &str = "https://posterous.com/api/2/sites/";

/// Label sent as `User-Agent` on every request.
pub const USER_AGENT: &str = concat!("posterous-rs/", env!("CARGO_PKG_VERSION"));

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Client<T = HttpTransport> {
    credentials: Credentials,
    base_url: String,

    connect_timeout: u64,
    timeout: u64,

    transport: T,
}

impl Client<HttpTransport> {
    /// Creates a client over the default HTTP transport.
    ///
    /// Nothing is validated here: a missing site id or token surfaces as
    /// [`PosterousError::MissingSiteId`] / [`PosterousError::MissingToken`]
    /// on the first call.
    pub fn new(credentials: Credentials) -> Self {
        Self::with_transport(credentials, HttpTransport)
    }

    /// Creates a client from `POSTEROUS_*` environment variables and/or a
    /// `.posterousrc` file (see the crate docs for the lookup order).
    pub fn from_env() -> Result<Self> {
        let cfg = load_config()?;
        let client = Self::new(cfg.credentials());
        Ok(match cfg.url {
            Some(url) => client.with_base_url(url),
            None => client,
        })
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(credentials: Credentials, transport: T) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: DEFAULT_TIMEOUT_SECS,
            timeout: DEFAULT_TIMEOUT_SECS,
            transport,
        }
    }

    /// Overrides the sites endpoint, e.g. to point at a staging host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout = secs;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = secs;
        self
    }

    /// Connection-phase timeout in seconds; 0 disables it.
    pub fn connect_timeout(&self) -> u64 {
        self.connect_timeout
    }

    pub fn set_connect_timeout(&mut self, secs: u64) {
        self.connect_timeout = secs;
    }

    /// Whole-call timeout in seconds; 0 disables it.
    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    pub fn set_timeout(&mut self, secs: u64) {
        self.timeout = secs;
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Performs one API call and returns the decoded JSON body.
    ///
    /// `site_id` and `api_token` are always injected from the client's
    /// credentials, replacing any caller values under those keys. The call
    /// fails before any I/O if either is missing (site id checked first).
    /// Only a 200 response is decoded; a literal `null` body decodes to
    /// [`Value::Null`].
    pub fn execute(&self, path: &str, args: Option<Args>, method: Method) -> Result<Value> {
        let site_id = self
            .credentials
            .site_id()
            .ok_or(PosterousError::MissingSiteId)?;
        let api_token = self
            .credentials
            .api_token()
            .ok_or(PosterousError::MissingToken)?;

        let mut args = args.unwrap_or_default();
        args.set("site_id", site_id);
        args.set("api_token", api_token);

        let request = self.build_request(site_id, path, &args, method)?;

        tracing::debug!(
            target: "posterous::http",
            method = method.as_str(),
            path,
            params = args.len(),
            "sending request"
        );

        let resp = self
            .transport
            .send(&request)
            .map_err(PosterousError::Transport)?;

        tracing::debug!(target: "posterous::http", path, status = resp.status, "response received");

        if resp.status != 200 {
            tracing::warn!(target: "posterous::http", path, status = resp.status, "non-200 response");
            return Err(PosterousError::Http { code: resp.status });
        }

        serde_json::from_slice(&resp.body).map_err(PosterousError::InvalidJsonResponse)
    }

    fn build_request(
        &self,
        site_id: &str,
        path: &str,
        args: &Args,
        method: Method,
    ) -> Result<ApiRequest> {
        let mut url = Url::parse(&self.base_url).map_err(|source| PosterousError::InvalidUrl {
            url: self.base_url.clone(),
            source,
        })?;
        // The site id is one opaque segment: `/`, `?` and `#` in it are escaped.
        url.path_segments_mut()
            .map_err(|_| {
                PosterousError::Config(format!("base URL {} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .push(site_id)
            .extend(path.split('/'));

        let pairs = args.to_pairs();
        let form = match method {
            Method::Get => {
                url.query_pairs_mut().extend_pairs(&pairs);
                None
            }
            Method::Post => Some(pairs),
        };

        Ok(ApiRequest {
            method,
            url: url.into(),
            form,
            username: self.credentials.username.clone().unwrap_or_default(),
            password: self.credentials.password.clone().unwrap_or_default(),
            user_agent: USER_AGENT.to_string(),
            connect_timeout: limit(self.connect_timeout),
            timeout: limit(self.timeout),
        })
    }
}

/// Zero seconds means no limit.
fn limit(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
