//! Deploy key API operations

use log::info;

use crate::error::Result;
use crate::gitlab::pagination::ListOptions;
use crate::gitlab::{GitlabClient, Project};

use super::models::{AddDeployKey, DeployKey};

fn deploy_keys_path(project_id: u64) -> String {
    format!("/projects/{}/deploy_keys", project_id)
}

impl GitlabClient {
    pub async fn get_deploy_key(&self, project_id: u64, key_id: u64) -> Result<DeployKey> {
        self.get_json(
            &format!("{}/{}", deploy_keys_path(project_id), key_id),
            &format!("find deploy key {} in project {}", key_id, project_id),
        )
        .await
    }

    /// Get all deploy keys of a project (with pagination)
    pub async fn list_deploy_keys(&self, project_id: u64) -> Result<Vec<DeployKey>> {
        self.fetch_all_pages(
            &deploy_keys_path(project_id),
            ListOptions::default(),
            "list project deploy keys",
        )
        .await
    }

    /// Add a copy of `key` (material, title, push flag) to `project`
    pub async fn enable_deploy_key(&self, key: &DeployKey, project: &Project) -> Result<()> {
        let _: DeployKey = self
            .post_json(
                &deploy_keys_path(project.id),
                &AddDeployKey::from(key),
                &format!(
                    "add deploy key ({} {}) in project {}",
                    key.id, key.title, project.id
                ),
            )
            .await?;
        info!("Enabled deploy key '{}' on project '{}'", key.title, project.name);
        Ok(())
    }

    /// Delete the deploy key with `key.id` from `project`
    pub async fn disable_deploy_key(&self, key: &DeployKey, project: &Project) -> Result<()> {
        self.delete_path(
            &format!("{}/{}", deploy_keys_path(project.id), key.id),
            &format!(
                "delete deploy key ({} {}) in project {}",
                key.id, key.title, project.id
            ),
        )
        .await?;
        info!("Disabled deploy key '{}' on project '{}'", key.title, project.name);
        Ok(())
    }
}
