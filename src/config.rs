use std::path::{Path, PathBuf};

use crate::credentials::Credentials;
use crate::error::{PosterousError, Result};

/// Values resolved from the environment and/or a `.posterousrc` file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct RcConfig {
    pub(crate) site_id: Option<String>,
    pub(crate) api_token: Option<String>,
    pub(crate) username: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) url: Option<String>,
}

impl RcConfig {
    fn is_complete(&self) -> bool {
        self.site_id.is_some()
            && self.api_token.is_some()
            && self.username.is_some()
            && self.password.is_some()
            && self.url.is_some()
    }

    /// Fills fields still unset from `other`.
    fn or(self, other: RcConfig) -> RcConfig {
        RcConfig {
            site_id: self.site_id.or(other.site_id),
            api_token: self.api_token.or(other.api_token),
            username: self.username.or(other.username),
            password: self.password.or(other.password),
            url: self.url.or(other.url),
        }
    }

    pub(crate) fn credentials(&self) -> Credentials {
        Credentials {
            site_id: self.site_id.clone(),
            api_token: self.api_token.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// Resolves configuration from (in order of precedence):
/// - environment variables `POSTEROUS_SITE_ID`, `POSTEROUS_API_TOKEN`,
///   `POSTEROUS_USERNAME`, `POSTEROUS_PASSWORD`, `POSTEROUS_API_URL`
/// - the first existing file among `POSTEROUS_RC`, `./.posterousrc`, `~/.posterousrc`
///
/// Missing values are not an error here; calls validate identity lazily.
pub(crate) fn load_config() -> Result<RcConfig> {
    let env = RcConfig {
        site_id: env_var("POSTEROUS_SITE_ID"),
        api_token: env_var("POSTEROUS_API_TOKEN"),
        username: env_var("POSTEROUS_USERNAME"),
        password: env_var("POSTEROUS_PASSWORD"),
        url: env_var("POSTEROUS_API_URL"),
    };
    if env.is_complete() {
        return Ok(env);
    }

    for rc_path in rc_candidates() {
        if rc_path.exists() {
            let file = read_rc(&rc_path).map_err(|e| {
                PosterousError::Config(format!(
                    "failed to read configuration file {}: {}",
                    rc_path.display(),
                    e
                ))
            })?;
            tracing::debug!(target: "posterous::config", path = %rc_path.display(), "loaded rc file");
            return Ok(env.or(file));
        }
    }

    Ok(env)
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

pub(crate) fn read_rc(path: &Path) -> std::io::Result<RcConfig> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_rc(&text))
}

pub(crate) fn parse_rc(text: &str) -> RcConfig {
    let mut cfg = RcConfig::default();

    // `api_token:` may be followed by its value on the next line.
    let mut pending_key: Option<&str> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(key) = pending_key.take() {
            if !line.contains(':') {
                assign(&mut cfg, key, strip_quotes(line));
                continue;
            }
        }

        if let Some((k, v)) = line.split_once(':') {
            let k = k.trim();
            let v = strip_quotes(v.trim());
            if v.is_empty() {
                pending_key = Some(k);
            } else {
                assign(&mut cfg, k, v);
            }
        }
    }

    cfg
}

fn assign(cfg: &mut RcConfig, key: &str, value: &str) {
    let slot = match key {
        "site_id" => &mut cfg.site_id,
        "api_token" => &mut cfg.api_token,
        "username" => &mut cfg.username,
        "password" => &mut cfg.password,
        "url" => &mut cfg.url,
        _ => return,
    };
    *slot = Some(value.to_string());
}

fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    ['"', '\'']
        .iter()
        .find_map(|q| s.strip_prefix(*q)?.strip_suffix(*q))
        .unwrap_or(s)
}

/// Where a `.posterousrc` may live, most specific first:
/// 1) `POSTEROUS_RC`, which when set is the only candidate
/// 2) the current working directory
/// 3) the home directory
fn rc_candidates() -> Vec<PathBuf> {
    if let Some(explicit) = std::env::var_os("POSTEROUS_RC") {
        return vec![PathBuf::from(explicit)];
    }

    [std::env::current_dir().ok(), dirs::home_dir()]
        .into_iter()
        .flatten()
        .map(|dir| dir.join(".posterousrc"))
        .collect()
}
