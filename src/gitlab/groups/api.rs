//! Group API operations

use log::{debug, info};

use crate::config::defaults;
use crate::error::Result;
use crate::gitlab::pagination::ListOptions;
use crate::gitlab::stream::PageStream;
use crate::gitlab::traits::GitlabResource;
use crate::gitlab::GitlabClient;

use super::models::{CreateGroup, Group};

const GROUPS: &str = "/groups";

impl GitlabClient {
    /// Get all groups visible to the token (with pagination)
    pub async fn list_groups(&self, opts: ListOptions) -> Result<Vec<Group>> {
        self.fetch_all_pages(GROUPS, opts, "list groups").await
    }

    /// Stream all groups from a background task
    pub fn enum_groups(&self) -> PageStream<Group> {
        self.stream_all_pages(GROUPS, ListOptions::default(), "list groups")
    }

    /// Get a group by numeric id or full path
    pub async fn get_group(&self, id_or_path: &str) -> Result<Group> {
        let path = format!("{}/{}", GROUPS, urlencoding::encode(id_or_path));
        self.get_json(&path, &format!("get group '{}'", id_or_path))
            .await
    }

    /// Create a public top-level group whose path equals its name
    pub async fn create_group(&self, name: &str) -> Result<Group> {
        let body = CreateGroup {
            name,
            path: name,
            visibility: defaults::VISIBILITY,
        };
        let group: Group = self
            .post_json(GROUPS, &body, &format!("create group '{}'", name))
            .await?;
        info!("Created group '{}' ({})", group.name, group.id);
        Ok(group)
    }

    /// Find a group by exact name among the server-side search results
    pub async fn find_group(&self, name: &str) -> Result<Option<Group>> {
        let candidates = self.list_groups(ListOptions::search(name)).await?;
        debug!("Search '{}' returned {} groups", name, candidates.len());
        Ok(candidates.into_iter().find(|g| g.has_name(name)))
    }

    /// Find the group by exact name, creating it when missing
    pub async fn find_or_create_group(&self, name: &str) -> Result<Group> {
        match self.find_group(name).await? {
            Some(group) => {
                info!("Using group '{}' ({})", group.name, group.id);
                Ok(group)
            }
            None => {
                info!("Creating group '{}'", name);
                self.create_group(name).await
            }
        }
    }
}
