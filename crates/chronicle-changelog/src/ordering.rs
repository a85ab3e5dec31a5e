//! Release ordering

use chronicle_core::ReleaseTag;

/// Sort tags by version precedence, oldest first, with
/// [`ReleaseTag::Unreleased`] last. Duplicates are removed.
pub fn order_tags<I>(tags: I) -> Vec<ReleaseTag>
where
    I: IntoIterator<Item = ReleaseTag>,
{
    let mut ordered: Vec<ReleaseTag> = tags.into_iter().collect();
    ordered.sort();
    ordered.dedup();
    ordered
}
