//! Site API endpoints as static `(path, allow-list, method)` descriptors.

use serde_json::Value;

use crate::args::{Args, filter};
use crate::client::Client;
use crate::error::Result;
use crate::transport::{Method, Transport};

/// Fixed contract of one API operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Path below `{base}/{site_id}/`.
    pub path: &'static str,
    /// Argument names forwarded to the server; anything else is dropped.
    pub allowed_args: &'static [&'static str],
    pub method: Method,
}

/// Public posts of the site, optionally restricted to a tag.
pub const POSTS_BY_TAG: Endpoint = Endpoint {
    path: "posts/public",
    allowed_args: &["since_id", "page", "tag"],
    method: Method::Get,
};

pub const TAGS: Endpoint = Endpoint {
    path: "tags",
    allowed_args: &[],
    method: Method::Get,
};

/// All posts of the site, private ones included (needs basic auth).
pub const POSTS: Endpoint = Endpoint {
    path: "posts",
    allowed_args: &["since_id", "page"],
    method: Method::Get,
};

/// `post` is an object flattened to `post[title]`, `post[body]`, ...
pub const CREATE_POST: Endpoint = Endpoint {
    path: "posts",
    allowed_args: &["post", "media", "autopost"],
    method: Method::Post,
};

impl<T: Transport> Client<T> {
    /// Calls `endpoint`, forwarding only the arguments it allows.
    pub fn call(&self, endpoint: &Endpoint, args: Option<&Args>) -> Result<Value> {
        let args = args.map(|a| filter(a, endpoint.allowed_args));
        self.execute(endpoint.path, args, endpoint.method)
    }

    /// Public posts by tag. Accepts `since_id`, `page` and `tag`.
    ///
    /// ```no_run
    /// use posterous::{Args, Client, Credentials};
    ///
    /// let client = Client::new(Credentials::new("1234", "token"));
    /// let posts = client.list_posts_by_tag(&Args::new().with("tag", "news").with("page", 2))?;
    /// # Ok::<(), posterous::PosterousError>(())
    /// ```
    pub fn list_posts_by_tag(&self, args: &Args) -> Result<Value> {
        self.call(&POSTS_BY_TAG, Some(args))
    }

    pub fn list_tags(&self) -> Result<Value> {
        self.call(&TAGS, None)
    }

    pub fn list_posts(&self, args: &Args) -> Result<Value> {
        self.call(&POSTS, Some(args))
    }

    pub fn get_post(&self, post_id: u64) -> Result<Value> {
        self.execute(&format!("posts/{}", post_id), None, Method::Get)
    }

    pub fn create_post(&self, args: &Args) -> Result<Value> {
        self.call(&CREATE_POST, Some(args))
    }
}
