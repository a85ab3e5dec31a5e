//! Tag resolution across many commits

use futures::future::join_all;
use tracing::{debug, info, instrument, warn};

use chronicle_core::Result;
use chronicle_git::TagResolver;

use crate::limiter::QueryLimiter;
use crate::types::Commit;

/// Resolve the release tag of every commit, running at most
/// `limiter.limit()` lookups at once.
///
/// All lookups are started together and waited on as a whole. Commits whose
/// containing tag is not a version are dropped. When any lookup fails, the
/// remaining lookups still run to completion and the first failure (in
/// commit order) is returned.
#[instrument(skip_all, fields(commits = commits.len(), limit = limiter.limit()))]
pub async fn resolve_tags<R>(
    commits: Vec<Commit>,
    resolver: &R,
    limiter: &QueryLimiter,
) -> Result<Vec<Commit>>
where
    R: TagResolver + ?Sized,
{
    let lookups = commits.iter().map(|commit| {
        let hash = commit.hash.as_str();
        limiter.run(move || resolver.resolve(hash))
    });
    let outcomes = join_all(lookups).await;

    let mut resolved = Vec::with_capacity(commits.len());
    let mut first_error = None;

    for (commit, outcome) in commits.into_iter().zip(outcomes) {
        match outcome {
            Ok(Some(tag)) => resolved.push(commit.with_tag(tag)),
            Ok(None) => debug!(hash = %commit.hash, "Dropping commit outside a version tag"),
            Err(e) => {
                warn!(hash = %commit.hash, error = %e, "Tag lookup failed");
                first_error.get_or_insert(e);
            }
        }
    }

    if let Some(e) = first_error {
        return Err(e.into());
    }

    info!(resolved = resolved.len(), "Resolved release tags");
    Ok(resolved)
}


#[cfg(test)]
mod tests {
    use super::testing::FakeResolver;
    use super::*;
    use crate::types::fixtures::*;
    use chronicle_core::{ChronicleError, ReleaseTag};

    fn many(n: usize) -> Vec<Commit> {
        (0..n)
            .map(|i| commit(&format!("c{:02}", i), "feature", (n - i) as i64))
            .collect()
    }

    #[tokio::test]
    async fn test_resolves_every_commit() {
        let resolver = FakeResolver::new(&[("a1", "v1.1.0"), ("b2", "v1.0.0")]);
        let commits = vec![
            commit("c3", "feature", 3),
            commit("a1", "feature", 2),
            commit("b2", "bugfix", 1),
        ];

        let resolved = resolve_tags(commits, &resolver, &QueryLimiter::default())
            .await
            .unwrap();

        assert_eq!(resolved.len(), 3);
        assert_eq!(resolved[0].tag, Some(ReleaseTag::Unreleased));
        assert_eq!(resolved[1].tag, Some(tag("v1.1.0")));
        assert_eq!(resolved[2].tag, Some(tag("v1.0.0")));
    }

    #[tokio::test]
    async fn test_concurrency_never_exceeds_limit() {
        let resolver = FakeResolver::new(&[]);
        let limiter = QueryLimiter::new(5);

        let resolved = resolve_tags(many(23), &resolver, &limiter).await.unwrap();

        assert_eq!(resolved.len(), 23);
        assert_eq!(resolver.calls(), 23);
        assert!(resolver.peak() <= 5);
        assert_eq!(resolver.peak(), 5);
    }

    #[tokio::test]
    async fn test_custom_limit() {
        let resolver = FakeResolver::new(&[]);
        resolve_tags(many(10), &resolver, &QueryLimiter::new(2))
            .await
            .unwrap();
        assert_eq!(resolver.peak(), 2);
    }

    #[tokio::test]
    async fn test_drops_non_version_tags() {
        let resolver = FakeResolver::new(&[("a1", "nightly"), ("b2", "v1.0.0")]);
        let commits = vec![commit("a1", "feature", 2), commit("b2", "feature", 1)];

        let resolved = resolve_tags(commits, &resolver, &QueryLimiter::default())
            .await
            .unwrap();

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].hash, "b2");
    }

    #[tokio::test]
    async fn test_failures_release_slots_and_report_error() {
        let resolver = FakeResolver::new(&[]).failing(&["c00", "c01", "c02", "c03", "c04", "c05"]);
        let limiter = QueryLimiter::new(5);

        let err = resolve_tags(many(12), &resolver, &limiter)
            .await
            .unwrap_err();

        // Every lookup still ran even though the first slots all failed
        assert_eq!(resolver.calls(), 12);
        assert_eq!(limiter.in_flight(), 0);
        assert!(matches!(err, ChronicleError::Git(_)));
        assert!(err.to_string().contains("c00"));
    }

    #[tokio::test]
    async fn test_limiter_reusable_after_failure() {
        let limiter = QueryLimiter::new(1);
        let failing = FakeResolver::new(&[]).failing(&["c00"]);
        assert!(resolve_tags(many(3), &failing, &limiter).await.is_err());

        let resolver = FakeResolver::new(&[]);
        let resolved = resolve_tags(many(3), &resolver, &limiter).await.unwrap();
        assert_eq!(resolved.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_lookups() {
        let resolver = FakeResolver::new(&[]);
        let resolved = resolve_tags(Vec::new(), &resolver, &QueryLimiter::default())
            .await
            .unwrap();
        assert!(resolved.is_empty());
        assert_eq!(resolver.calls(), 0);
    }
}
