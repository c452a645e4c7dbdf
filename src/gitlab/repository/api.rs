//! Repository API operations

use futures::future::{BoxFuture, FutureExt};
use log::{trace, warn};

use crate::error::{GitlabError, Result};
use crate::gitlab::pagination::ListOptions;
use crate::gitlab::{GitlabClient, Project};

use super::models::{Branch, FileNode, RefName, Tag, TreeEntry};

fn repository_path(project_id: u64, rest: &str) -> String {
    format!("/projects/{}/repository/{}", project_id, rest)
}

/// `parent/name`, or just `name` at the root
fn join_path(parent: &str, name: &str) -> String {
    let parent = parent.trim_end_matches('/');
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

impl GitlabClient {
    pub async fn list_branches(&self, project: &Project) -> Result<Vec<Branch>> {
        self.fetch_all_pages(
            &repository_path(project.id, "branches"),
            ListOptions::default(),
            &format!("list branches of project '{}'", project.name),
        )
        .await
    }

    pub async fn list_tags(&self, project: &Project) -> Result<Vec<Tag>> {
        self.fetch_all_pages(
            &repository_path(project.id, "tags"),
            ListOptions::default(),
            &format!("list tags of project '{}'", project.name),
        )
        .await
    }

    /// Entries of one directory at `git_ref` (all pages, not recursive)
    pub async fn list_tree_entries(
        &self,
        project: &Project,
        git_ref: &RefName,
        path: &str,
    ) -> Result<Vec<TreeEntry>> {
        let opts = ListOptions::default()
            .with_param("ref", git_ref.as_str())
            .with_param("path", path);
        self.fetch_all_pages(
            &repository_path(project.id, "tree"),
            opts,
            &format!(
                "list tree '{}' of project '{}' at '{}'",
                path,
                project.name,
                git_ref.as_str()
            ),
        )
        .await
    }

    /// Every file under `path`, depth first
    ///
    /// Directory contents are spliced in at the directory's position; the
    /// directories themselves are never returned. Entries of unknown kind
    /// (e.g. submodules) are logged and skipped.
    pub async fn list_tree(
        &self,
        project: &Project,
        git_ref: &RefName,
        path: &str,
    ) -> Result<Vec<FileNode>> {
        self.list_tree_at(project, git_ref, path.to_string()).await
    }

    fn list_tree_at<'a>(
        &'a self,
        project: &'a Project,
        git_ref: &'a RefName,
        path: String,
    ) -> BoxFuture<'a, Result<Vec<FileNode>>> {
        async move {
            trace!("Listing tree '{}' of '{}'", path, project.name);
            let entries = self.list_tree_entries(project, git_ref, &path).await?;

            let mut files = Vec::new();
            for entry in entries {
                let entry_path = join_path(&path, &entry.name);
                let kind = entry.kind.clone();
                match kind.as_str() {
                    "tree" => {
                        let children = self.list_tree_at(project, git_ref, entry_path).await?;
                        files.extend(children);
                    }
                    "blob" => files.push(FileNode {
                        path: entry_path,
                        entry,
                    }),
                    other => warn!(
                        "Skipping '{}' in project '{}': {}",
                        entry_path,
                        project.name,
                        GitlabError::UnknownNodeType(other.to_string())
                    ),
                }
            }
            Ok(files)
        }
        .boxed()
    }

    /// Raw content of a blob
    pub async fn raw_blob(&self, project: &Project, sha: &str) -> Result<Vec<u8>> {
        let url = self.url(&repository_path(project.id, &format!("blobs/{}/raw", sha)));
        trace!("GET {}", url);
        let response = self.get(&url).send().await?;
        let response = self
            .check_response(response, &format!("get blob '{}' of project '{}'", sha, project.name))
            .await?;
        Ok(response.bytes().await?.to_vec())
    }
}
