use std::fmt;

/// Custom error type for GitLab operations
#[derive(Debug)]
pub enum GitlabError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// API returned a status outside 2xx
    Api { status: u16, message: String },
    /// User lookup returned no match
    UserNotFound(String),
    /// User lookup matched more than one account
    MultipleUsers(String),
    /// Repository tree returned an entry kind we cannot handle
    UnknownNodeType(String),
    /// Named project does not exist in the group
    ProjectNotFound { project: String, group: String },
    /// Tree listing requested without a branch or tag
    MissingRef,
    /// Tree listing requested at both a branch and a tag
    AmbiguousRef { branch: String, tag: String },
    /// Operation the tool does not support yet
    NotImplemented(String),
    /// Trusted certificate could not be loaded or parsed
    Certificate(String),
    /// JSON parsing error
    Json(String),
    /// Local I/O failure
    Io(String),
    /// Background enumeration task panicked or was torn down
    Task(String),
    /// Configuration error (flags, config file, log setup)
    Config(String),
    /// Error wrapped with the operation that produced it
    Context {
        context: String,
        source: Box<GitlabError>,
    },
}

impl fmt::Display for GitlabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitlabError::Http(e) => write!(f, "HTTP request failed: {}", e),
            GitlabError::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            GitlabError::UserNotFound(username) => {
                write!(f, "no users found for username '{}'", username)
            }
            GitlabError::MultipleUsers(username) => {
                write!(f, "multiple users found for username '{}'", username)
            }
            GitlabError::UnknownNodeType(kind) => write!(f, "unknown node type '{}'", kind),
            GitlabError::ProjectNotFound { project, group } => {
                write!(f, "project '{}' not found in group '{}'", project, group)
            }
            GitlabError::MissingRef => write!(f, "missing branch or tag"),
            GitlabError::AmbiguousRef { branch, tag } => {
                write!(f, "both branch '{}' and tag '{}' given", branch, tag)
            }
            GitlabError::NotImplemented(what) => write!(f, "{}: not implemented", what),
            GitlabError::Certificate(msg) => write!(f, "Certificate error: {}", msg),
            GitlabError::Json(msg) => write!(f, "JSON error: {}", msg),
            GitlabError::Io(msg) => write!(f, "I/O error: {}", msg),
            GitlabError::Task(msg) => write!(f, "Background task failed: {}", msg),
            GitlabError::Config(msg) => write!(f, "Configuration error: {}", msg),
            GitlabError::Context { context, source } => write!(f, "{}: {}", context, source),
        }
    }
}

impl std::error::Error for GitlabError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GitlabError::Http(e) => Some(e),
            GitlabError::Context { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl GitlabError {
    /// Status code of the innermost API error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            GitlabError::Api { status, .. } => Some(*status),
            GitlabError::Http(e) => e.status().map(|s| s.as_u16()),
            GitlabError::Context { source, .. } => source.status(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GitlabError {
    fn from(err: reqwest::Error) -> Self {
        GitlabError::Http(err)
    }
}

impl From<serde_json::Error> for GitlabError {
    fn from(err: serde_json::Error) -> Self {
        GitlabError::Json(err.to_string())
    }
}

impl From<std::io::Error> for GitlabError {
    fn from(err: std::io::Error) -> Self {
        GitlabError::Io(err.to_string())
    }
}

impl From<regex::Error> for GitlabError {
    fn from(err: regex::Error) -> Self {
        GitlabError::Config(format!("invalid pattern: {}", err))
    }
}

impl From<dialoguer::Error> for GitlabError {
    fn from(err: dialoguer::Error) -> Self {
        GitlabError::Io(err.to_string())
    }
}

/// Attach operation context to a failing result
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;

    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|source| GitlabError::Context {
            context: context.into(),
            source: Box::new(source),
        })
    }

    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|source| GitlabError::Context {
            context: f().into(),
            source: Box::new(source),
        })
    }
}

/// Result type alias for GitLab operations
pub type Result<T> = std::result::Result<T, GitlabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = GitlabError::Api {
            status: 404,
            message: "Not found".to_string(),
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("Not found"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        // Errors cross task boundaries on the stream error channel
        assert_send_sync::<GitlabError>();
    }

    #[test]
    fn test_user_errors_display() {
        assert_eq!(
            GitlabError::UserNotFound("jdoe".to_string()).to_string(),
            "no users found for username 'jdoe'"
        );
        assert_eq!(
            GitlabError::MultipleUsers("jdoe".to_string()).to_string(),
            "multiple users found for username 'jdoe'"
        );
    }

    #[test]
    fn test_project_not_found_display() {
        let err = GitlabError::ProjectNotFound {
            project: "api".to_string(),
            group: "backend".to_string(),
        };
        assert_eq!(err.to_string(), "project 'api' not found in group 'backend'");
    }

    #[test]
    fn test_context_chains_message() {
        let result: Result<()> = Err(GitlabError::Api {
            status: 500,
            message: "boom".to_string(),
        });
        let err = result.context("listing groups").unwrap_err();
        assert_eq!(
            err.to_string(),
            "listing groups: API error (status 500): boom"
        );
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_context_source() {
        use std::error::Error;
        let err = GitlabError::Context {
            context: "outer".to_string(),
            source: Box::new(GitlabError::MissingRef),
        };
        assert!(err.source().is_some());
        assert!(GitlabError::MissingRef.source().is_none());
    }

    #[test]
    fn test_from_regex_error() {
        let regex_err = regex::Regex::new("(").unwrap_err();
        let err: GitlabError = regex_err.into();
        match err {
            GitlabError::Config(msg) => assert!(msg.contains("invalid pattern")),
            _ => panic!("Expected GitlabError::Config"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GitlabError = io_err.into();
        match err {
            GitlabError::Io(msg) => assert!(msg.contains("file not found")),
            _ => panic!("Expected GitlabError::Io"),
        }
    }
}
