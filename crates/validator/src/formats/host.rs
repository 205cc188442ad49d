//! Host name checks shared by the email and URL checkers.

use std::net::IpAddr;

/// Returns true when `host` is a fully qualified domain name.
///
/// A single trailing dot is accepted. Labels are 1-63 characters of
/// alphanumerics and `-` (plus `_` when allowed) and may not start or end
/// with `-`. With `require_tld`, there must be at least two labels and the
/// last one must be alphabetic (2+ chars) or a punycode `xn--` label.
pub(crate) fn is_fqdn(host: &str, require_tld: bool, allow_underscores: bool) -> bool {
    let host = host.strip_suffix('.').unwrap_or(host);
    if host.is_empty() || host.len() > 253 {
        return false;
    }

    let labels: Vec<&str> = host.split('.').collect();

    if require_tld {
        if labels.len() < 2 {
            return false;
        }
        let tld = labels[labels.len() - 1];
        let alphabetic = tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic);
        let punycode = tld.len() > 4
            && tld.get(..4).is_some_and(|p| p.eq_ignore_ascii_case("xn--"))
            && tld[4..].chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !alphabetic && !punycode {
            return false;
        }
    }

    labels.iter().all(|label| {
        let len = label.chars().count();
        (1..=63).contains(&len)
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|c| c.is_alphanumeric() || c == '-' || (allow_underscores && c == '_'))
    })
}

/// Returns true when `host` is an IPv4/IPv6 literal, optionally bracketed.
pub(crate) fn is_ip_literal(host: &str) -> bool {
    if let Some(inner) = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
        return inner.parse::<IpAddr>().is_ok();
    }
    host.parse::<IpAddr>().is_ok()
}

/// Case-insensitive membership test for host allow/deny lists.
pub(crate) fn host_listed(list: &[String], host: &str) -> bool {
    list.iter().any(|entry| entry.eq_ignore_ascii_case(host))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("example.com", true)]
    #[case("sub.example.co.uk", true)]
    #[case("example.com.", true)]
    #[case("xn--mller-kva.xn--p1ai", true)]
    #[case("localhost", false)]
    #[case("example.c", false)]
    #[case("example.123", false)]
    #[case("-bad.com", false)]
    #[case("bad-.com", false)]
    #[case("a..com", false)]
    #[case("under_score.com", false)]
    fn fqdn_with_tld(#[case] host: &str, #[case] expected: bool) {
        assert_eq!(is_fqdn(host, true, false), expected, "{host}");
    }

    #[test]
    fn fqdn_relaxed() {
        assert!(is_fqdn("localhost", false, false));
        assert!(is_fqdn("under_score.com", true, true));
    }

    #[test]
    fn ip_literals() {
        assert!(is_ip_literal("127.0.0.1"));
        assert!(is_ip_literal("[::1]"));
        assert!(is_ip_literal("::1"));
        assert!(!is_ip_literal("example.com"));
        assert!(!is_ip_literal("[example.com]"));
    }
}
