/// Configuration constants for the GitLab REST API
pub mod api {
    /// Private token header name
    pub const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

    /// Default page size for list requests
    pub const DEFAULT_PAGE_SIZE: u32 = 100;

    /// Pagination response headers
    pub const HEADER_PAGE: &str = "x-page";
    pub const HEADER_TOTAL_PAGES: &str = "x-total-pages";
    pub const HEADER_NEXT_PAGE: &str = "x-next-page";
}

/// Streaming enumeration tuning
pub mod stream {
    /// Buffered items between a page producer and its consumer
    pub const ITEM_CHANNEL_CAPACITY: usize = 10;

    /// A producer reports at most one error
    pub const ERROR_CHANNEL_CAPACITY: usize = 1;
}

/// Configuration file and environment
pub mod settings {
    /// Config file name looked up in the home directory
    pub const FILE_NAME: &str = ".gitlab-api-client.yaml";

    /// Environment variables (clap `env` bindings)
    pub const ENV_API_URL: &str = "GITLAB_API_CLIENT_API_URL";
    pub const ENV_PRIVATE_TOKEN: &str = "GITLAB_API_CLIENT_PRIVATE_TOKEN";
    pub const ENV_TRUSTED_CERTIFICATES: &str = "GITLAB_API_CLIENT_TRUSTED_CERTIFICATES";
}

/// Default values for CLI
pub mod defaults {
    /// Default GitLab API URL
    pub const API_URL: &str = "https://gitlab.localhost/api/v4/";

    /// Default log level
    pub const LOG_LEVEL: &str = "warn";

    /// Visibility given to created groups and projects
    pub const VISIBILITY: &str = "public";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_url_is_v4() {
        assert!(defaults::API_URL.starts_with("https://"));
        assert!(defaults::API_URL.ends_with("/api/v4/"));
    }

    #[test]
    fn test_pagination_headers_lowercase() {
        for header in [api::HEADER_PAGE, api::HEADER_TOTAL_PAGES, api::HEADER_NEXT_PAGE] {
            assert_eq!(header, header.to_lowercase());
        }
    }

    #[test]
    fn test_settings_env_vars_share_prefix() {
        for var in [
            settings::ENV_API_URL,
            settings::ENV_PRIVATE_TOKEN,
            settings::ENV_TRUSTED_CERTIFICATES,
        ] {
            assert!(var.starts_with("GITLAB_API_CLIENT_"));
        }
    }
}
