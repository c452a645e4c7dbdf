//! Helpers shared by command handlers
//!
//! Name filters and the best-effort batch loop used by commands that touch
//! every project (member adds, deploy keys).

use std::future::Future;

use futures::StreamExt;
use log::info;
use regex::Regex;

use crate::error::Result;
use crate::gitlab::stream::PageStream;
use crate::gitlab::traits::GitlabResource;
use crate::gitlab::Project;
use crate::output::{OutcomeRecord, Printer, TallyRecord};

/// Optional regular expression over resource names
///
/// An absent, empty or whitespace-only pattern matches everything.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    pattern: Option<Regex>,
}

impl Filter {
    pub fn new(pattern: Option<&str>) -> Result<Self> {
        let pattern = match pattern.map(str::trim) {
            None | Some("") => None,
            Some(p) => Some(Regex::new(p)?),
        };
        Ok(Self { pattern })
    }

    pub fn is_set(&self) -> bool {
        self.pattern.is_some()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.pattern.as_ref().is_none_or(|re| re.is_match(name))
    }

    /// Match a resource by name, logging the skip otherwise
    pub fn accepts<R: GitlabResource + ?Sized>(&self, resource: &R, kind: &str) -> bool {
        let accepted = self.matches(resource.name());
        if !accepted {
            info!(
                "Skipped {} '{}' not matching '{}'",
                kind,
                resource.name(),
                self.pattern.as_ref().map(Regex::as_str).unwrap_or_default()
            );
        }
        accepted
    }
}

/// Counters printed at the end of a best-effort batch
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchTally {
    /// Every project received from the enumeration
    pub total: usize,
    /// Projects the operation succeeded on
    pub edited: usize,
    /// Projects skipped as non-public or where the operation failed
    pub not_edited: usize,
}

impl BatchTally {
    pub fn records(&self) -> [TallyRecord; 3] {
        [
            TallyRecord::new("total", self.total),
            TallyRecord::new("edit", self.edited),
            TallyRecord::new("notEdit", self.not_edited),
        ]
    }
}

/// Apply `op` to every public project in the stream, continuing past failures
///
/// Each attempt prints `name,ok` or `name,Fail <err>`. Projects rejected by
/// `filter` count toward the total only. An enumeration failure ends the
/// batch with that error once the already delivered projects are handled.
pub async fn apply_to_public_projects<F, Fut>(
    mut projects: PageStream<Project>,
    filter: &Filter,
    printer: &Printer,
    mut op: F,
) -> Result<BatchTally>
where
    F: FnMut(Project) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let mut tally = BatchTally::default();

    while let Some(next) = projects.next().await {
        let project = next?;
        tally.total += 1;

        if !filter.accepts(&project, "project") {
            continue;
        }
        if !project.is_public() {
            info!(
                "Skipped project '{}': not public ({})",
                project.name,
                project.visibility.as_deref().unwrap_or("unknown")
            );
            tally.not_edited += 1;
            continue;
        }

        let name = project.name.clone();
        match op(project).await {
            Ok(()) => {
                printer.emit(&OutcomeRecord::ok(&name));
                tally.edited += 1;
            }
            Err(e) => {
                printer.emit(&OutcomeRecord::failed(&name, &e));
                tally.not_edited += 1;
            }
        }
    }

    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::error::GitlabError;
    use crate::gitlab::stream::channel;

    fn project(id: u64, name: &str, visibility: &str) -> Project {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "path_with_namespace": format!("g/{}", name),
            "visibility": visibility
        }))
        .unwrap()
    }

    fn stream_of(projects: Vec<Project>, failure: Option<GitlabError>) -> PageStream<Project> {
        let (sink, stream) = channel();
        tokio::spawn(async move {
            for p in projects {
                sink.send(p).await;
            }
            if let Some(e) = failure {
                sink.fail(e);
            }
        });
        stream
    }

    #[test]
    fn test_filter_blank_matches_all() {
        for pattern in [None, Some(""), Some("   ")] {
            let filter = Filter::new(pattern).unwrap();
            assert!(!filter.is_set());
            assert!(filter.matches("anything"));
        }
    }

    #[test]
    fn test_filter_regex() {
        let filter = Filter::new(Some("^api-")).unwrap();
        assert!(filter.matches("api-gateway"));
        assert!(!filter.matches("web-api-x"));
    }

    #[test]
    fn test_filter_invalid_pattern_is_config_error() {
        let err = Filter::new(Some("([")).unwrap_err();
        assert!(matches!(err, GitlabError::Config(_)));
    }

    #[tokio::test]
    async fn test_apply_continues_past_failures() {
        let projects = vec![
            project(1, "api", "public"),
            project(2, "web", "public"),
            project(3, "secret", "private"),
            project(4, "docs", "public"),
            project(5, "tools", "public"),
        ];
        let filter = Filter::new(Some("^(api|web|secret|docs)$")).unwrap();
        let printer = Printer::new(OutputFormat::Csv, false);

        let mut attempted = Vec::new();
        let tally = apply_to_public_projects(stream_of(projects, None), &filter, &printer, |p| {
            attempted.push(p.id);
            let id = p.id;
            async move {
                if id == 2 {
                    Err(GitlabError::Api {
                        status: 409,
                        message: "exists".to_string(),
                    })
                } else {
                    Ok(())
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(attempted, vec![1, 2, 4]);
        assert_eq!(
            tally,
            BatchTally {
                total: 5,
                edited: 2,
                not_edited: 2,
            }
        );
    }

    #[tokio::test]
    async fn test_apply_surfaces_enumeration_error() {
        let failure = GitlabError::Api {
            status: 502,
            message: "bad gateway".to_string(),
        };
        let printer = Printer::new(OutputFormat::Csv, false);
        let mut attempted = 0;

        let result = apply_to_public_projects(
            stream_of(vec![project(1, "api", "public")], Some(failure)),
            &Filter::default(),
            &printer,
            |_| {
                attempted += 1;
                async { Ok::<(), GitlabError>(()) }
            },
        )
        .await;

        assert_eq!(attempted, 1);
        assert_eq!(result.unwrap_err().status(), Some(502));
    }

    #[test]
    fn test_tally_records_labels() {
        let tally = BatchTally {
            total: 3,
            edited: 1,
            not_edited: 2,
        };
        let labels: Vec<_> = tally.records().iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["total", "edit", "notEdit"]);
    }
}
