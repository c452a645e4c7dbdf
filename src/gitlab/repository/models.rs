//! Repository data models

use serde::{Deserialize, Serialize};

use crate::error::{GitlabError, Result};
use crate::gitlab::traits::GitlabResource;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Branch {
    pub name: String,
}

impl GitlabResource for Branch {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Tag {
    pub name: String,
}

impl GitlabResource for Tag {
    fn name(&self) -> &str {
        &self.name
    }
}

/// One entry of a single directory listing
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TreeEntry {
    /// Object sha; the blob reference for files
    pub id: String,
    pub name: String,
    /// `tree`, `blob` or `commit` (submodule)
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub path: String,
}

/// A file reached by flattening the tree
#[derive(Debug, Clone, PartialEq)]
pub struct FileNode {
    /// Path from the repository root
    pub path: String,
    pub entry: TreeEntry,
}

impl FileNode {
    pub fn blob_id(&self) -> &str {
        &self.entry.id
    }
}

/// The ref a tree is listed at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefName {
    Branch(String),
    Tag(String),
}

impl RefName {
    /// Exactly one of branch or tag must be given
    pub fn from_parts(branch: Option<&str>, tag: Option<&str>) -> Result<Self> {
        match (branch, tag) {
            (Some(b), None) => Ok(RefName::Branch(b.to_string())),
            (None, Some(t)) => Ok(RefName::Tag(t.to_string())),
            (Some(b), Some(t)) => Err(GitlabError::AmbiguousRef {
                branch: b.to_string(),
                tag: t.to_string(),
            }),
            (None, None) => Err(GitlabError::MissingRef),
        }
    }

    /// The `(branch, tag)` pair this ref was built from
    pub fn parts(&self) -> (Option<&str>, Option<&str>) {
        match self {
            RefName::Branch(name) => (Some(name), None),
            RefName::Tag(name) => (None, Some(name)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RefName::Branch(name) | RefName::Tag(name) => name,
        }
    }
}

/// Count lines the way `wc -l` would, plus a final unterminated line
pub fn count_lines(content: &[u8]) -> usize {
    let newlines = content.iter().filter(|&&b| b == b'\n').count();
    match content.last().copied() {
        Some(b'\n') | None => newlines,
        Some(_) => newlines + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(b""), 0);
        assert_eq!(count_lines(b"one"), 1);
        assert_eq!(count_lines(b"one\n"), 1);
        assert_eq!(count_lines(b"one\ntwo"), 2);
        assert_eq!(count_lines(b"\n\n"), 2);
    }

    #[test]
    fn test_ref_name_requires_branch_or_tag() {
        assert!(matches!(
            RefName::from_parts(None, None),
            Err(GitlabError::MissingRef)
        ));
        assert_eq!(
            RefName::from_parts(None, Some("v1")).unwrap(),
            RefName::Tag("v1".to_string())
        );
        assert_eq!(RefName::from_parts(Some("main"), None).unwrap().as_str(), "main");
    }

    #[test]
    fn test_ref_name_rejects_branch_and_tag_together() {
        let err = RefName::from_parts(Some("main"), Some("v1")).unwrap_err();
        assert!(matches!(err, GitlabError::AmbiguousRef { .. }));
        assert_eq!(err.to_string(), "both branch 'main' and tag 'v1' given");
    }

    #[test]
    fn test_ref_name_parts_round_trip() {
        let tag = RefName::from_parts(None, Some("v1")).unwrap();
        assert_eq!(tag.parts(), (None, Some("v1")));
        let main = RefName::Branch("main".to_string());
        let (branch, tag) = main.parts();
        assert_eq!(RefName::from_parts(branch, tag).unwrap().as_str(), "main");
    }

    #[test]
    fn test_tree_entry_kind_renamed() {
        let entry: TreeEntry = serde_json::from_str(
            r#"{"id": "abc", "name": "src", "type": "tree", "path": "src", "mode": "040000"}"#,
        )
        .unwrap();
        assert_eq!(entry.kind, "tree");
    }
}
