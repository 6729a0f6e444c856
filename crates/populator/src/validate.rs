use regex::Regex;
use std::sync::LazyLock;

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:http|ftp)s?://",
        r"(?P<host>",
        r"(?:[A-Z\d](?:[A-Z\d-]{0,61}[A-Z\d])?\.)+(?:[A-Z]{2,6}\.?|[A-Z\d-]{2,}\.?)",
        r"|localhost",
        r"|\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}",
        r")",
        r"(?::\d+)?",
        r"(?:/?|[/?]\S+)$",
    ))
    .expect("the url regex is valid")
});

/// Returns true if the target looks like a http(s) or ftp(s) url.
///
/// The host must be a domain name, `localhost`, or an IPv4 address. A host
/// made only of digits and dots must have four octets, none above 255.
/// Leading zeros are allowed. No network requests are made.
///
/// # Examples
///
/// ```
/// use stac_populator::url_validate;
///
/// assert!(url_validate("https://example.com"));
/// assert!(url_validate("ftp://localhost:21/path"));
/// assert!(!url_validate("not a url"));
/// assert!(!url_validate("http://999.999.999.999"));
/// ```
pub fn url_validate(target: &str) -> bool {
    let Some(captures) = URL_REGEX.captures(target) else {
        return false;
    };
    let host = captures
        .name("host")
        .map(|host| host.as_str().trim_end_matches('.'))
        .unwrap_or_default();
    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        let octets: Vec<&str> = host.split('.').collect();
        octets.len() == 4 && octets.iter().all(|octet| octet.parse::<u8>().is_ok())
    } else {
        true
    }
}
