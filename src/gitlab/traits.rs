//! Common traits for GitLab resources

/// Common trait for named GitLab resources (groups, projects, branches, ...)
pub trait GitlabResource {
    /// Human-readable name, the field regex filters apply to
    fn name(&self) -> &str;

    /// Exact, case-sensitive name comparison
    ///
    /// Server-side `search` is a substring match, so callers needing one
    /// specific resource must still compare names themselves.
    fn has_name(&self, name: &str) -> bool {
        self.name() == name
    }
}
