//! Commit filtering and grouping

use tracing::debug;

use crate::types::{Commit, ReleaseGroups};

/// Keep commits whose type is in `include_types`, plus every commit that
/// carries a breaking-change note. Input order is preserved.
pub fn filter_commits(commits: Vec<Commit>, include_types: &[String]) -> Vec<Commit> {
    let total = commits.len();

    let kept: Vec<Commit> = commits
        .into_iter()
        .filter(|commit| {
            commit.is_breaking()
                || commit
                    .commit_type
                    .as_ref()
                    .is_some_and(|t| include_types.contains(t))
        })
        .collect();

    debug!(total, kept = kept.len(), "Filtered commits");
    kept
}

/// Group commits by their resolved release tag.
///
/// Commits without a tag are skipped. Within each group the commits keep
/// their input order.
pub fn group_by_tag(commits: Vec<Commit>) -> ReleaseGroups {
    let mut groups = ReleaseGroups::new();

    for commit in commits {
        match commit.tag.clone() {
            Some(tag) => groups.entry(tag).or_default().push(commit),
            None => debug!(hash = %commit.hash, "Skipping commit without release"),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::*;
    use chronicle_core::ReleaseTag;

    fn types(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_filter_keeps_allowed_types() {
        let commits = vec![
            commit("a1", "feature", 3),
            commit("b2", "chore", 2),
            commit("c3", "bugfix", 1),
        ];

        let kept = filter_commits(commits, &types(&["feature", "bugfix"]));
        let hashes: Vec<&str> = kept.iter().map(|c| c.hash.as_str()).collect();
        assert_eq!(hashes, vec!["a1", "c3"]);
    }

    #[test]
    fn test_filter_keeps_breaking_commits_of_any_type() {
        let commits = vec![breaking(commit("a1", "refactor", 2)), commit("b2", "chore", 1)];

        let kept = filter_commits(commits, &types(&["feature"]));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].hash, "a1");
    }

    #[test]
    fn test_filter_drops_untyped_commits() {
        let mut untyped = commit("a1", "feature", 1);
        untyped.commit_type = None;

        assert!(filter_commits(vec![untyped], &types(&["feature"])).is_empty());
    }

    #[test]
    fn test_filter_empty_allow_list() {
        let commits = vec![commit("a1", "feature", 2), breaking(commit("b2", "chore", 1))];
        let kept = filter_commits(commits, &[]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].hash, "b2");
    }

    #[test]
    fn test_group_by_tag() {
        let commits = vec![
            tagged(commit("a1", "feature", 4), "v1.1.0"),
            tagged(commit("b2", "bugfix", 3), "v1.0.0"),
            commit("c3", "feature", 2),
            tagged(commit("d4", "feature", 1), "v1.1.0"),
        ];

        let groups = group_by_tag(commits);

        assert_eq!(groups.len(), 2);
        let newer: Vec<&str> = groups[&tag("v1.1.0")]
            .iter()
            .map(|c| c.hash.as_str())
            .collect();
        assert_eq!(newer, vec!["a1", "d4"]);
        assert_eq!(groups[&tag("v1.0.0")].len(), 1);
    }

    #[test]
    fn test_group_unreleased() {
        let commits = vec![commit("a1", "feature", 1).with_tag(ReleaseTag::Unreleased)];
        let groups = group_by_tag(commits);
        assert!(groups.contains_key(&ReleaseTag::Unreleased));
    }
}
