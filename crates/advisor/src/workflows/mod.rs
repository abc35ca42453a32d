pub mod catalog;
pub mod recommendation;
pub mod roadmap;

use axum::http::HeaderMap;

/// Header populated by the upstream auth layer with the resolved user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Caller identity forwarded by the auth layer, if any.
pub fn caller_identity(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Join labels as "A", "A and B", "A, B and C".
pub(crate) fn human_list<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [head @ .., last] => {
            let head: Vec<&str> = head.iter().map(AsRef::as_ref).collect();
            format!("{} and {}", head.join(", "), last.as_ref())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn human_list_joins_with_commas_and_final_and() {
        assert_eq!(human_list::<&str>(&[]), "");
        assert_eq!(human_list(&["science"]), "science");
        assert_eq!(human_list(&["science", "arts"]), "science and arts");
        assert_eq!(
            human_list(&["Engineering", "Science", "Commerce"]),
            "Engineering, Science and Commerce"
        );
    }

    #[test]
    fn caller_identity_ignores_blank_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(caller_identity(&headers), None);

        headers.insert(USER_ID_HEADER, HeaderValue::from_static("  "));
        assert_eq!(caller_identity(&headers), None);

        headers.insert(USER_ID_HEADER, HeaderValue::from_static("user-42"));
        assert_eq!(caller_identity(&headers).as_deref(), Some("user-42"));
    }
}
