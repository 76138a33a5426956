//! URL helpers: operation keys, hostnames and query stripping.

use url::Url;

/// Derive the operation key of a request: the last segment of the URL path.
///
/// `https://api.example.com/user/getUser?id=1` yields `getUser`. Distinct endpoints
/// sharing a trailing segment share a key. A trailing slash yields an empty key.
pub fn operation_key(url: &str) -> String {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_owned(),
        // Relative or malformed URL: take the raw text up to the query
        Err(_) => strip_query(url).to_owned(),
    };

    path.rsplit('/').next().unwrap_or_default().to_owned()
}

/// Hostname of an absolute URL, `None` when it cannot be parsed or has no host.
pub fn hostname(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed.host_str().map(str::to_owned)
}

/// URL without its query string.
pub fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://api.example.com/getUser", "getUser")]
    #[case("https://api.example.com/v1/user/getUser?id=1", "getUser")]
    #[case("https://api.example.com/v2/orders/getUser#top", "getUser")]
    #[case("https://api.example.com/list/", "")]
    #[case("https://api.example.com", "")]
    #[case("/api/getUser?x=1", "getUser")]
    #[case("getUser", "getUser")]
    fn test_operation_key(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(operation_key(url), expected);
    }

    #[rstest]
    fn test_operation_key_collides_on_shared_trailing_segment() {
        assert_eq!(
            operation_key("https://a.example.com/user/list"),
            operation_key("https://b.example.com/order/list")
        );
    }

    #[rstest]
    #[case("https://ads.example.com/track", Some("ads.example.com"))]
    #[case("http://API.Example.com:8080/x", Some("api.example.com"))]
    #[case("http://127.0.0.1:9222/json", Some("127.0.0.1"))]
    #[case("/relative/path", None)]
    #[case("data:text/plain,hello", None)]
    fn test_hostname(#[case] url: &str, #[case] expected: Option<&str>) {
        assert_eq!(hostname(url).as_deref(), expected);
    }

    #[rstest]
    #[case("https://www.example.com/home?from=ad", "https://www.example.com/home")]
    #[case("https://www.example.com/home", "https://www.example.com/home")]
    #[case("https://www.example.com/?a=1?b=2", "https://www.example.com/")]
    #[case("", "")]
    fn test_strip_query(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(strip_query(url), expected);
    }
}
