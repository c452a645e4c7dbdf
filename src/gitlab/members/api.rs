//! User and project member API operations

use std::collections::HashSet;

use log::{debug, info, warn};

use crate::error::{GitlabError, Result, ResultExt};
use crate::gitlab::pagination::ListOptions;
use crate::gitlab::{GitlabClient, Project};

use super::models::{AccessLevel, AddMember, ProjectMember, User};

fn members_path(project_id: u64) -> String {
    format!("/projects/{}/members", project_id)
}

impl GitlabClient {
    /// Resolve a username to exactly one user
    ///
    /// User search also matches names and emails, so an exact username hit
    /// wins over other candidates.
    pub async fn get_user(&self, username: &str) -> Result<User> {
        let page = self
            .fetch_page::<User>("/users", ListOptions::search(username), "list users")
            .await?;

        let mut candidates = page.items;
        if candidates
            .iter()
            .any(|u| u.username.eq_ignore_ascii_case(username))
        {
            candidates.retain(|u| u.username.eq_ignore_ascii_case(username));
        }

        match candidates.len() {
            0 => Err(GitlabError::UserNotFound(username.to_string())),
            1 => Ok(candidates.remove(0)),
            _ => Err(GitlabError::MultipleUsers(username.to_string())),
        }
    }

    /// Get all direct members of a project (with pagination)
    pub async fn list_project_members(&self, project: &Project) -> Result<Vec<ProjectMember>> {
        self.fetch_all_pages(
            &members_path(project.id),
            ListOptions::default(),
            &format!("list members of project '{}'", project.name),
        )
        .await
    }

    pub async fn add_member(&self, project: &Project, user: &User, level: AccessLevel) -> Result<()> {
        let body = AddMember {
            user_id: user.id,
            access_level: level.value(),
        };
        let _: ProjectMember = self
            .post_json(
                &members_path(project.id),
                &body,
                &format!("add '{}' to project '{}'", user.username, project.name),
            )
            .await?;
        info!(
            "Added user '{}' ({}) as {} of project '{}' ({})",
            user.username, user.id, level, project.name, project.id
        );
        Ok(())
    }

    /// Change the access level of an existing member
    pub async fn update_member(
        &self,
        project: &Project,
        user: &User,
        level: AccessLevel,
    ) -> Result<()> {
        let path = format!("{}/{}", members_path(project.id), user.id);
        let body = serde_json::json!({ "access_level": level.value() });
        let _: ProjectMember = self
            .put_json(
                &path,
                &body,
                &format!("update '{}' on project '{}'", user.username, project.name),
            )
            .await?;
        info!(
            "Set user '{}' ({}) to {} on project '{}'",
            user.username, user.id, level, project.name
        );
        Ok(())
    }

    pub async fn remove_member(&self, project: &Project, member: &ProjectMember) -> Result<()> {
        let path = format!("{}/{}", members_path(project.id), member.id);
        self.delete_path(
            &path,
            &format!("remove '{}' from project '{}'", member.username, project.name),
        )
        .await?;
        info!(
            "Removed member '{}' ({}) from project '{}'",
            member.username, member.id, project.name
        );
        Ok(())
    }

    /// Add every user with `level`; the first failure stops the remaining adds
    ///
    /// Adds made before the failure are kept.
    pub async fn add_members(
        &self,
        project: &Project,
        level: AccessLevel,
        users: &[User],
    ) -> Result<()> {
        for user in users {
            self.add_member(project, user, level)
                .await
                .with_context(|| format!("adding member '{}'", user.username))?;
        }
        Ok(())
    }

    /// Make `owners` the exact owner set of the project
    ///
    /// Missing owners are added (or promoted), then every other owner-level
    /// member is removed. Removals shift later members onto earlier pages,
    /// so a page is re-read after anything on it was removed and page
    /// metadata always comes from the latest response. A member still
    /// listed after its removal is deleted only once and then skipped.
    /// Returns the removed members.
    pub async fn replace_owners(
        &self,
        project: &Project,
        owners: &[User],
    ) -> Result<Vec<ProjectMember>> {
        let current = self
            .list_project_members(project)
            .await
            .context("listing project members")?;

        for owner in owners {
            let existing = current.iter().find(|m| m.id == owner.id);
            let result = match existing {
                None => self.add_member(project, owner, AccessLevel::Owner).await,
                Some(m) if m.access_level < AccessLevel::Owner.value() => {
                    self.update_member(project, owner, AccessLevel::Owner).await
                }
                Some(_) => {
                    debug!("'{}' already owns '{}'", owner.username, project.name);
                    Ok(())
                }
            };
            result.context("adding project owners")?;
        }

        let path = members_path(project.id);
        let context = format!("list members of project '{}'", project.name);
        let mut opts = ListOptions::default();
        let mut removed = Vec::new();
        let mut removed_ids = HashSet::new();

        loop {
            let page = self
                .fetch_page::<ProjectMember>(&path, opts.clone(), &context)
                .await
                .context("listing project members")?;

            let mut removed_here = 0;
            for member in &page.items {
                if member.access_level != AccessLevel::Owner.value()
                    || owners.iter().any(|o| o.id == member.id)
                {
                    continue;
                }
                if removed_ids.contains(&member.id) {
                    warn!(
                        "'{}' is still listed in '{}' after removal",
                        member.username, project.name
                    );
                    continue;
                }
                self.remove_member(project, member)
                    .await
                    .context("deleting project member")?;
                removed_ids.insert(member.id);
                removed.push(member.clone());
                removed_here += 1;
            }

            if removed_here > 0 {
                continue;
            }
            if !page.meta.has_more() {
                break;
            }
            opts.page = page.meta.next();
        }

        Ok(removed)
    }
}
