//! Project API operations

use log::{debug, info};

use crate::config::defaults;
use crate::error::{GitlabError, Result, ResultExt};
use crate::gitlab::members::AccessLevel;
use crate::gitlab::pagination::ListOptions;
use crate::gitlab::stream::{fan_out, PageSink, PageStream};
use crate::gitlab::traits::GitlabResource;
use crate::gitlab::{GitlabClient, Group};

use super::models::{CreateProject, Project};

fn group_projects_path(group_id: u64) -> String {
    format!("/groups/{}/projects", group_id)
}

impl GitlabClient {
    /// Get all projects of a group (with pagination)
    pub async fn list_group_projects(&self, group: &Group) -> Result<Vec<Project>> {
        self.fetch_all_pages(
            &group_projects_path(group.id),
            ListOptions::default(),
            &format!("list projects of group '{}'", group.name),
        )
        .await
    }

    /// Stream the projects of one group from a background task
    pub fn enum_group_projects(&self, group: &Group) -> PageStream<Project> {
        self.stream_all_pages(
            &group_projects_path(group.id),
            ListOptions::default(),
            &format!("list projects of group '{}'", group.name),
        )
    }

    /// Stream the projects of every group received on `groups`
    ///
    /// One nested page walk runs per group; every nested walk is drained
    /// before the output ends. Projects of different groups may interleave.
    pub fn enum_groups_projects(&self, groups: PageStream<Group>) -> PageStream<Project> {
        let client = self.clone();
        fan_out(groups, move |group: Group, sink: PageSink<Project>| {
            let client = client.clone();
            async move {
                debug!("Enumerating projects of group '{}' ({})", group.name, group.id);
                let fetch = client.pager(
                    group_projects_path(group.id),
                    format!("list projects of group '{}'", group.name),
                );
                sink.walk(ListOptions::default(), fetch).await
            }
        })
    }

    /// Stream the projects of all groups
    pub fn enum_all_groups_projects(&self) -> PageStream<Project> {
        self.enum_groups_projects(self.enum_groups())
    }

    /// Get the projects of all groups, one group after the other
    pub async fn list_all_groups_projects(&self) -> Result<Vec<Project>> {
        let groups = self
            .list_groups(ListOptions::default())
            .await
            .context("listing groups")?;

        let mut projects = Vec::new();
        for group in &groups {
            projects.extend(
                self.list_group_projects(group)
                    .await
                    .context("listing group projects")?,
            );
        }
        Ok(projects)
    }

    /// Create a public project in the given namespace
    pub async fn create_project(&self, name: &str, group: &Group) -> Result<Project> {
        let body = CreateProject {
            name,
            namespace_id: group.id,
            visibility: defaults::VISIBILITY,
        };
        let project: Project = self
            .post_json(
                "/projects",
                &body,
                &format!("create project '{}' in group '{}'", name, group.name),
            )
            .await?;
        info!(
            "Created project '{}' ({}) in group '{}' ({})",
            project.name, project.id, group.name, group.id
        );
        Ok(project)
    }

    pub async fn delete_project(&self, project: &Project) -> Result<()> {
        self.delete_path(
            &format!("/projects/{}", project.id),
            &format!("delete project '{}'", project.name),
        )
        .await
    }

    /// Ensure every named project exists in `group_name`
    ///
    /// Owners are resolved first and the group is created when missing.
    /// Projects already present (exact name) are left alone; new ones get
    /// every owner as maintainer. The first failure stops the batch.
    /// Returns the projects that were created.
    pub async fn create_projects(
        &self,
        owners: &[String],
        group_name: &str,
        names: &[String],
    ) -> Result<Vec<Project>> {
        let mut users = Vec::with_capacity(owners.len());
        for owner in owners {
            users.push(self.get_user(owner).await.context("getting user")?);
        }

        let group = self
            .find_or_create_group(group_name)
            .await
            .with_context(|| format!("resolving group '{}'", group_name))?;

        let existing = self
            .list_group_projects(&group)
            .await
            .context("listing group projects")?;

        let mut created: Vec<Project> = Vec::new();
        for name in names {
            if existing.iter().chain(created.iter()).any(|p| p.has_name(name)) {
                info!(
                    "Found existing project '{}' in group '{}' ({})",
                    name, group.name, group.id
                );
                continue;
            }

            let project = self
                .create_project(name, &group)
                .await
                .with_context(|| format!("creating project '{}' in group '{}'", name, group_name))?;

            self.add_members(&project, AccessLevel::Maintainer, &users)
                .await
                .with_context(|| format!("adding owners to project '{}'", name))?;

            created.push(project);
        }
        Ok(created)
    }

    /// Look up the named projects in a group by exact name
    ///
    /// Fails with `ProjectNotFound` on the first name without a match, so
    /// nothing is removed when any name is wrong.
    pub async fn find_group_projects(
        &self,
        group_path: &str,
        names: &[String],
    ) -> Result<(Group, Vec<Project>)> {
        let group = self
            .get_group(group_path)
            .await
            .with_context(|| format!("getting group '{}'", group_path))?;
        let projects = self
            .list_group_projects(&group)
            .await
            .with_context(|| format!("listing group '{}' projects", group_path))?;

        let found = names
            .iter()
            .map(|name| {
                projects
                    .iter()
                    .find(|p| p.has_name(name))
                    .cloned()
                    .ok_or_else(|| GitlabError::ProjectNotFound {
                        project: name.clone(),
                        group: group_path.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok((group, found))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn page(body: serde_json::Value, page: u32, total: u32) -> ResponseTemplate {
        let next = if page < total {
            (page + 1).to_string()
        } else {
            String::new()
        };
        ResponseTemplate::new(200)
            .set_body_json(body)
            .insert_header("x-page", page.to_string().as_str())
            .insert_header("x-total-pages", total.to_string().as_str())
            .insert_header("x-next-page", next.as_str())
    }

    fn group(id: u64, name: &str) -> Group {
        serde_json::from_value(serde_json::json!({"id": id, "name": name})).unwrap()
    }

    async fn mount_groups(server: &MockServer, groups: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/groups"))
            .respond_with(page(groups, 1, 1))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_enum_all_groups_projects_drains_every_group() {
        let mock_server = MockServer::start().await;

        mount_groups(
            &mock_server,
            serde_json::json!([{"id": 1, "name": "infra"}, {"id": 2, "name": "apps"}]),
        )
        .await;

        // Group 1 has two pages, group 2 a single page of three
        Mock::given(method("GET"))
            .and(path("/groups/1/projects"))
            .and(query_param("page", "1"))
            .respond_with(page(
                serde_json::json!([{"id": 10, "name": "a"}, {"id": 11, "name": "b"}]),
                1,
                2,
            ))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/groups/1/projects"))
            .and(query_param("page", "2"))
            .respond_with(page(serde_json::json!([{"id": 12, "name": "c"}]), 2, 2))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/groups/2/projects"))
            .respond_with(page(
                serde_json::json!([
                    {"id": 20, "name": "x"},
                    {"id": 21, "name": "y"},
                    {"id": 22, "name": "z"}
                ]),
                1,
                1,
            ))
            .mount(&mock_server)
            .await;

        let client = GitlabClient::test_client(&mock_server.uri());
        let results: Vec<Result<Project>> = client.enum_all_groups_projects().collect().await;

        let mut ids: Vec<u64> = results.into_iter().map(|r| r.unwrap().id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![10, 11, 12, 20, 21, 22]);
    }

    #[tokio::test]
    async fn test_enum_all_groups_projects_reports_nested_error_once() {
        let mock_server = MockServer::start().await;

        mount_groups(
            &mock_server,
            serde_json::json!([{"id": 1, "name": "infra"}, {"id": 2, "name": "apps"}]),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/groups/1/projects"))
            .respond_with(page(serde_json::json!([{"id": 10, "name": "a"}]), 1, 1))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/groups/2/projects"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = GitlabClient::test_client(&mock_server.uri());
        let results: Vec<Result<Project>> = client.enum_all_groups_projects().collect().await;

        let errors: Vec<_> = results.iter().filter(|r| r.is_err()).collect();
        assert_eq!(errors.len(), 1);
        assert!(results.last().unwrap().is_err());
    }

    #[tokio::test]
    async fn test_list_all_groups_projects() {
        let mock_server = MockServer::start().await;

        mount_groups(
            &mock_server,
            serde_json::json!([{"id": 1, "name": "infra"}, {"id": 2, "name": "apps"}]),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/groups/1/projects"))
            .respond_with(page(serde_json::json!([{"id": 10, "name": "a"}]), 1, 1))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/groups/2/projects"))
            .respond_with(page(serde_json::json!([{"id": 20, "name": "x"}]), 1, 1))
            .mount(&mock_server)
            .await;

        let client = GitlabClient::test_client(&mock_server.uri());
        let projects = client.list_all_groups_projects().await.unwrap();
        let ids: Vec<u64> = projects.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![10, 20]);
    }

    /// Group "infra" holding `existing` projects, user "jdoe" resolvable
    async fn mount_create_fixture(server: &MockServer, existing: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("search", "jdoe"))
            .respond_with(page(
                serde_json::json!([{"id": 7, "username": "jdoe", "name": "J Doe"}]),
                1,
                1,
            ))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/groups"))
            .and(query_param("search", "infra"))
            .respond_with(page(serde_json::json!([{"id": 3, "name": "infra"}]), 1, 1))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/groups/3/projects"))
            .respond_with(page(existing, 1, 1))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_create_projects_creates_missing_and_adds_maintainers() {
        let mock_server = MockServer::start().await;
        mount_create_fixture(&mock_server, serde_json::json!([{"id": 30, "name": "api"}])).await;

        Mock::given(method("POST"))
            .and(path("/projects"))
            .and(body_json(serde_json::json!({
                "name": "web",
                "namespace_id": 3,
                "visibility": "public"
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": 31, "name": "web"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/projects/31/members"))
            .and(body_json(serde_json::json!({"user_id": 7, "access_level": 40})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 7, "username": "jdoe", "access_level": 40
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = GitlabClient::test_client(&mock_server.uri());
        let created = client
            .create_projects(
                &["jdoe".to_string()],
                "infra",
                &["api".to_string(), "web".to_string(), "web".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(created.len(), 1);
        assert_eq!(created[0].name, "web");
    }

    #[tokio::test]
    async fn test_create_projects_is_idempotent() {
        let mock_server = MockServer::start().await;
        mount_create_fixture(
            &mock_server,
            serde_json::json!([{"id": 30, "name": "api"}, {"id": 31, "name": "web"}]),
        )
        .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = GitlabClient::test_client(&mock_server.uri());
        let created = client
            .create_projects(
                &["jdoe".to_string()],
                "infra",
                &["api".to_string(), "web".to_string()],
            )
            .await
            .unwrap();

        assert!(created.is_empty());
    }

    #[tokio::test]
    async fn test_create_projects_stops_on_first_failure() {
        let mock_server = MockServer::start().await;
        mount_create_fixture(&mock_server, serde_json::json!([])).await;

        Mock::given(method("POST"))
            .and(path("/projects"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"message": "name is invalid"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = GitlabClient::test_client(&mock_server.uri());
        let err = client
            .create_projects(&[], "infra", &["Bad Name".to_string(), "other".to_string()])
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(400));
        assert!(err.to_string().starts_with("creating project 'Bad Name' in group 'infra'"));
    }

    #[tokio::test]
    async fn test_find_group_projects_missing_name() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/groups/infra"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 3, "name": "infra"})),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/groups/3/projects"))
            .respond_with(page(serde_json::json!([{"id": 30, "name": "api"}]), 1, 1))
            .mount(&mock_server)
            .await;

        let client = GitlabClient::test_client(&mock_server.uri());

        let (group, found) = client
            .find_group_projects("infra", &["api".to_string()])
            .await
            .unwrap();
        assert_eq!(group.id, 3);
        assert_eq!(found[0].id, 30);

        let err = client
            .find_group_projects("infra", &["api".to_string(), "ghost".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GitlabError::ProjectNotFound { ref project, .. } if project == "ghost"
        ));
    }

    #[tokio::test]
    async fn test_delete_project() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/projects/30"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = GitlabClient::test_client(&mock_server.uri());
        let project: Project =
            serde_json::from_value(serde_json::json!({"id": 30, "name": "api"})).unwrap();
        client.delete_project(&project).await.unwrap();
    }

    #[tokio::test]
    async fn test_enum_group_projects_single_group() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/groups/5/projects"))
            .respond_with(page(serde_json::json!([{"id": 50, "name": "solo"}]), 1, 1))
            .mount(&mock_server)
            .await;

        let client = GitlabClient::test_client(&mock_server.uri());
        let projects = client
            .enum_group_projects(&group(5, "solo-group"))
            .try_collect()
            .await
            .unwrap();
        assert_eq!(projects.len(), 1);
    }
}
