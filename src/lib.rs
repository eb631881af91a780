//! A small blocking Rust client for the Posterous v2 site API.
//!
//! Every call goes through one pipeline: drop arguments the endpoint does not
//! allow, inject `site_id` and `api_token`, send a GET (query string) or POST
//! (form body) with basic authentication, require HTTP 200, and decode the
//! body into a [`serde_json::Value`].
//!
//! ## Quick start
//! - Build a [`Client`] from explicit [`Credentials`], or from the environment
//!   (`POSTEROUS_SITE_ID`, `POSTEROUS_API_TOKEN`, `POSTEROUS_USERNAME`,
//!   `POSTEROUS_PASSWORD`, `POSTEROUS_API_URL`) and/or a `.posterousrc` file
//!   (`POSTEROUS_RC`, then the current directory, then your home directory).
//! - Call an endpoint method such as [`Client::list_posts_by_tag`].
//!
//! ```no_run
//! use posterous::{Args, Client, PosterousError};
//!
//! fn main() -> Result<(), PosterousError> {
//!     let client = Client::from_env()?;
//!     let tags = client.list_tags()?;
//!     let posts = client.list_posts_by_tag(&Args::new().with("tag", "news").with("page", 1))?;
//!     println!("{tags}\n{posts}");
//!     Ok(())
//! }
//! ```
//!
//! Requests can be routed through any [`Transport`]; the default is
//! [`HttpTransport`] over `reqwest::blocking`.

#![forbid(unsafe_code)]

mod args;
mod client;
mod config;
mod credentials;
mod endpoints;
mod error;
mod transport;

pub use args::{Args, filter};
pub use client::{Client, DEFAULT_BASE_URL, USER_AGENT};
pub use credentials::Credentials;
pub use endpoints::{CREATE_POST, Endpoint, POSTS, POSTS_BY_TAG, TAGS};
pub use error::{BoxError, PosterousError, Result};
pub use transport::{ApiRequest, HttpTransport, Method, RawResponse, Transport};
