//! Email address checker.

use std::sync::LazyLock;

use serde::Deserialize;

use super::host::{host_listed, is_fqdn, is_ip_literal};

static LOCAL_ATOM_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+$").expect("local-part atom regex is valid")
});

static QUOTED_LOCAL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r#"^"(?:[\x20\x21\x23-\x5b\x5d-\x7e]|\\[\x20-\x7e])*"$"#)
        .expect("quoted local-part regex is valid")
});

const MAX_ADDRESS_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;

/// Options understood by [`is_email`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmailOptions {
    /// Accept `Display Name <user@example.com>`.
    pub allow_display_name: bool,
    /// Only accept the display-name form.
    pub require_display_name: bool,
    /// The domain must end in a top-level domain.
    pub require_tld: bool,
    /// Skip the 64/254 byte length limits.
    pub ignore_max_length: bool,
    /// Accept IP literals such as `user@[127.0.0.1]` as the domain.
    pub allow_ip_domain: bool,
    /// Domains that are always rejected.
    pub host_blacklist: Vec<String>,
    /// When non-empty, the only domains accepted.
    pub host_whitelist: Vec<String>,
}

impl Default for EmailOptions {
    fn default() -> Self {
        Self {
            allow_display_name: false,
            require_display_name: false,
            require_tld: true,
            ignore_max_length: false,
            allow_ip_domain: false,
            host_blacklist: Vec::new(),
            host_whitelist: Vec::new(),
        }
    }
}

/// Returns true when `input` is an email address.
///
/// # Examples
///
/// ```
/// use shapeguard_validator::formats::{EmailOptions, is_email};
///
/// let defaults = EmailOptions::default();
/// assert!(is_email("user@example.com", &defaults));
/// assert!(!is_email("user@", &defaults));
/// assert!(!is_email("Jane <jane@example.com>", &defaults));
///
/// let named = EmailOptions { allow_display_name: true, ..EmailOptions::default() };
/// assert!(is_email("Jane <jane@example.com>", &named));
/// ```
pub fn is_email(input: &str, options: &EmailOptions) -> bool {
    let address = if options.allow_display_name || options.require_display_name {
        match split_display_name(input) {
            Some(address) => address,
            None if options.require_display_name => return false,
            None => input,
        }
    } else {
        input
    };

    if !options.ignore_max_length && address.len() > MAX_ADDRESS_LEN {
        return false;
    }

    let Some((local, domain)) = address.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }

    if host_listed(&options.host_blacklist, domain) {
        return false;
    }
    if !options.host_whitelist.is_empty() && !host_listed(&options.host_whitelist, domain) {
        return false;
    }

    if !options.ignore_max_length && local.len() > MAX_LOCAL_LEN {
        return false;
    }

    let domain_ok = is_fqdn(domain, options.require_tld, false)
        || (options.allow_ip_domain && is_ip_literal(domain));
    if !domain_ok {
        return false;
    }

    if local.starts_with('"') {
        return QUOTED_LOCAL_REGEX.is_match(local);
    }
    local.split('.').all(|atom| LOCAL_ATOM_REGEX.is_match(atom))
}

/// Extracts `addr` from `Name <addr>`, rejecting control characters in the name.
fn split_display_name(input: &str) -> Option<&str> {
    let inner = input.strip_suffix('>')?;
    let open = inner.find('<')?;
    let name = inner[..open].trim();
    if name.is_empty() || name.chars().any(char::is_control) {
        return None;
    }
    Some(&inner[open + 1..])
}
