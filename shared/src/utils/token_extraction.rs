use axum::http::HeaderMap;

use super::jwt::extract_bearer_token;

// Extract Authorization header from request
pub fn extract_auth_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(|s| s.to_string())
}

// Bearer token from request headers, if any
pub fn bearer_from_headers(headers: &HeaderMap) -> Option<String> {
    extract_auth_header(headers).and_then(|h| extract_bearer_token(&h))
}

// Extract client IP from proxy headers
pub fn extract_client_ip(headers: &HeaderMap) -> Option<String> {
    ["x-forwarded-for", "x-real-ip", "cf-connecting-ip"]
        .iter()
        .filter_map(|name| headers.get(*name))
        .filter_map(|value| value.to_str().ok())
        .filter_map(|raw| raw.split(',').next())
        .map(|ip| ip.trim().to_string())
        .find(|ip| !ip.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_ip_prefers_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7, 10.0.0.1"));
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.9"));
        assert_eq!(extract_client_ip(&headers), Some("203.0.113.7".to_string()));
    }

    #[test]
    fn test_client_ip_falls_back_to_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.4"));
        assert_eq!(extract_client_ip(&headers), Some("198.51.100.4".to_string()));
        assert_eq!(extract_client_ip(&HeaderMap::new()), None);
    }

    #[test]
    fn test_bearer_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer tok.en.value"));
        assert_eq!(bearer_from_headers(&headers), Some("tok.en.value".to_string()));
    }
}
