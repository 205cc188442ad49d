//! URL checker.
//!
//! Parsing is delegated to the `url` crate; this module layers the
//! protocol, host and component policies on top.

use serde::Deserialize;
use ::url::{Host, Url};

use super::host::{host_listed, is_fqdn};

/// Longest URL accepted, matching common browser limits.
const MAX_URL_LEN: usize = 2083;

/// Options understood by [`is_url`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UrlOptions {
    /// Accepted schemes when one is present.
    pub protocols: Vec<String>,
    /// Reject URLs without an explicit `scheme://`.
    pub require_protocol: bool,
    /// Reject schemes not listed in `protocols`.
    pub require_valid_protocol: bool,
    /// Reject URLs without a host.
    pub require_host: bool,
    /// Domain hosts must end in a top-level domain.
    pub require_tld: bool,
    /// Accept `_` in host labels.
    pub allow_underscores: bool,
    /// Accept a `?query` component.
    pub allow_query_components: bool,
    /// Accept a `#fragment` component.
    pub allow_fragments: bool,
    /// When non-empty, the only hosts accepted.
    pub host_whitelist: Vec<String>,
    /// Hosts that are always rejected.
    pub host_blacklist: Vec<String>,
}

impl Default for UrlOptions {
    fn default() -> Self {
        Self {
            protocols: vec!["http".into(), "https".into(), "ftp".into()],
            require_protocol: false,
            require_valid_protocol: true,
            require_host: true,
            require_tld: true,
            allow_underscores: false,
            allow_query_components: true,
            allow_fragments: true,
            host_whitelist: Vec::new(),
            host_blacklist: Vec::new(),
        }
    }
}

/// Returns true when `input` is a URL.
///
/// Without a scheme the input is read as `http://<input>` unless
/// `require_protocol` is set.
///
/// # Examples
///
/// ```
/// use shapeguard_validator::formats::{UrlOptions, is_url};
///
/// let defaults = UrlOptions::default();
/// assert!(is_url("https://example.com/path?q=1", &defaults));
/// assert!(is_url("example.com", &defaults));
/// assert!(!is_url("mailto:someone@example.com", &defaults));
/// assert!(!is_url("not a url", &defaults));
/// ```
pub fn is_url(input: &str, options: &UrlOptions) -> bool {
    if input.is_empty() || input.len() >= MAX_URL_LEN || input.chars().any(char::is_whitespace) {
        return false;
    }
    if !options.allow_fragments && input.contains('#') {
        return false;
    }
    if !options.allow_query_components && input.contains('?') {
        return false;
    }

    let candidate = match input.find("://") {
        Some(idx) => {
            let scheme = &input[..idx];
            if options.require_valid_protocol
                && !options
                    .protocols
                    .iter()
                    .any(|p| p.eq_ignore_ascii_case(scheme))
            {
                return false;
            }
            input.to_owned()
        }
        None if options.require_protocol || input.starts_with("//") => return false,
        None if input.contains(':') && !has_port_before_path(input) => return false,
        None => format!("http://{input}"),
    };

    let Ok(url) = Url::parse(&candidate) else {
        return false;
    };

    match url.host() {
        None => !options.require_host,
        Some(Host::Domain(domain)) => {
            if host_listed(&options.host_blacklist, domain) {
                return false;
            }
            if !options.host_whitelist.is_empty() {
                return host_listed(&options.host_whitelist, domain);
            }
            is_fqdn(domain, options.require_tld, options.allow_underscores)
        }
        Some(Host::Ipv4(_) | Host::Ipv6(_)) => {
            let host = url.host_str().unwrap_or_default();
            if host_listed(&options.host_blacklist, host) {
                return false;
            }
            options.host_whitelist.is_empty() || host_listed(&options.host_whitelist, host)
        }
    }
}

/// True for scheme-less inputs like `example.com:8080/path`, where the only
/// colon introduces a port.
fn has_port_before_path(input: &str) -> bool {
    let authority = input.split(['/', '?', '#']).next().unwrap_or_default();
    match authority.rsplit_once(':') {
        Some((host, port)) => {
            !host.is_empty()
                && !host.contains(':')
                && !port.is_empty()
                && port.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}
