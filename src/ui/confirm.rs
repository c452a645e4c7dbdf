//! Confirmation prompt for destructive operations

use dialoguer::Confirm;

use crate::error::{GitlabError, Result};

/// Ask before deleting `names` from `group`
///
/// `assume_yes` skips the prompt. Batch mode never prompts, so without
/// `assume_yes` it refuses instead of guessing.
pub fn confirm_removal(names: &[String], group: &str, assume_yes: bool, batch: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    if batch {
        return Err(GitlabError::Config(
            "refusing to remove projects in batch mode without --yes".to_string(),
        ));
    }

    let confirmed = Confirm::new()
        .with_prompt(removal_prompt(names, group))
        .default(false)
        .interact()?;
    Ok(confirmed)
}

fn removal_prompt(names: &[String], group: &str) -> String {
    format!(
        "Remove {} project(s) from group '{}': {}?",
        names.len(),
        group,
        names.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["web".to_string(), "api".to_string()]
    }

    #[test]
    fn test_assume_yes_skips_prompt() {
        assert!(confirm_removal(&names(), "infra", true, true).unwrap());
        assert!(confirm_removal(&names(), "infra", true, false).unwrap());
    }

    #[test]
    fn test_batch_without_yes_refuses() {
        let err = confirm_removal(&names(), "infra", false, true).unwrap_err();
        assert!(matches!(err, GitlabError::Config(_)));
        assert!(err.to_string().contains("--yes"));
    }

    #[test]
    fn test_removal_prompt_lists_projects() {
        assert_eq!(
            removal_prompt(&names(), "infra"),
            "Remove 2 project(s) from group 'infra': web, api?"
        );
    }
}
