use std::fmt;

/// Identity and basic-auth values a [`Client`](crate::Client) signs every request with.
///
/// Every field may be absent; `site_id` and `api_token` are only checked when a
/// call is made.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub site_id: Option<String>,
    pub api_token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(site_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            site_id: Some(site_id.into()),
            api_token: Some(api_token.into()),
            ..Self::default()
        }
    }

    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Site id, or `None` when unset or empty.
    pub fn site_id(&self) -> Option<&str> {
        non_empty(&self.site_id)
    }

    /// API token, or `None` when unset or empty.
    pub fn api_token(&self) -> Option<&str> {
        non_empty(&self.api_token)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// Token and password stay out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("site_id", &self.site_id)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
