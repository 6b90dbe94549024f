use std::net::IpAddr;
use thiserror::Error;
use url::Url;

/// Errors that can occur during URL validation.
///
/// These errors cover both parsing failures and the network policy that keeps
/// the server from being used to reach internal hosts.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The URL string could not be parsed.
    #[error("Invalid URL format: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL has no host component (e.g. `http:///path`).
    #[error("URL has no host")]
    MissingHost,
    /// The URL points to a private/internal IP address.
    #[error("Private IP address not allowed: {0}")]
    PrivateIp(String),
    /// The URL points to localhost.
    #[error("Localhost not allowed")]
    Localhost,
}

/// Which hosts a validated URL may point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetworkPolicy {
    /// Only public hosts. Localhost and private ranges are rejected.
    #[default]
    PublicOnly,
    /// Any host, including loopback and RFC 1918 ranges. Used for local
    /// development and for tests that run against a mock server.
    AllowPrivate,
}

/// Validates a URL string before it is fetched.
///
/// Rejects:
/// - Strings that do not parse as absolute URLs
/// - Non-HTTP(S) schemes (e.g., `file://`, `ftp://`)
/// - URLs without a host
/// - Under [`NetworkPolicy::PublicOnly`]: localhost and private IP ranges
///   (RFC 1918, link-local, unique local IPv6)
///
/// # Examples
///
/// ```
/// use newsfeed_mcp::util::{validate_url, NetworkPolicy};
///
/// let url = validate_url("https://example.com/feed.xml", NetworkPolicy::PublicOnly).unwrap();
/// assert_eq!(url.host_str(), Some("example.com"));
///
/// assert!(validate_url("not-a-url", NetworkPolicy::PublicOnly).is_err());
/// assert!(validate_url("http://192.168.1.1/feed", NetworkPolicy::PublicOnly).is_err());
/// assert!(validate_url("http://192.168.1.1/feed", NetworkPolicy::AllowPrivate).is_ok());
/// ```
pub fn validate_url(url_str: &str, policy: NetworkPolicy) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    let host = url.host_str().ok_or(UrlValidationError::MissingHost)?;

    if policy == NetworkPolicy::AllowPrivate {
        return Ok(url);
    }

    if host.eq_ignore_ascii_case("localhost") {
        return Err(UrlValidationError::Localhost);
    }

    // Strip brackets from IPv6 addresses for parsing
    let host_for_parse = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);

    if let Ok(ip) = host_for_parse.parse::<IpAddr>() {
        if ip.is_loopback() {
            return Err(UrlValidationError::Localhost);
        }
        if is_private_ip(&ip) {
            return Err(UrlValidationError::PrivateIp(ip.to_string()));
        }
    }

    Ok(url)
}

fn is_private_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => {
            ipv4.is_private() || ipv4.is_loopback() || ipv4.is_link_local() || ipv4.is_unspecified()
        }
        IpAddr::V6(ipv6) => {
            if ipv6.is_loopback() || ipv6.is_unspecified() {
                return true;
            }
            let segments = ipv6.segments();
            // Unique Local (fc00::/7)
            let is_unique_local = (segments[0] & 0xfe00) == 0xfc00;
            // Link-Local (fe80::/10)
            let is_link_local = (segments[0] & 0xffc0) == 0xfe80;
            is_unique_local || is_link_local
        }
    }
}
