//! External dashboard link builder
//!
//! The dashboard itself is an external collaborator; this only produces the
//! opaque per-user URL.

/// Build the dashboard URL for a user
pub fn dashboard_url(base_url: &str, user: &str) -> String {
    format!("{}/u/{}", base_url.trim_end_matches('/'), user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_url_embeds_user() {
        assert_eq!(
            dashboard_url("https://dash.example", "42"),
            "https://dash.example/u/42"
        );
        // Trailing slash on the base does not double up
        assert_eq!(
            dashboard_url("https://dash.example/", "42"),
            "https://dash.example/u/42"
        );
    }
}
