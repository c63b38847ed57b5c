//! Split-point (merge base) search
//!
//! The split point of two branch tips is the first commit reachable from
//! the given tip that is also an ancestor of the current tip. Both walks
//! use an explicit breadth-first worklist over commit ids rather than
//! recursion, so stack depth stays bounded on long histories. Merge
//! commits contribute both parents to the frontier.

use crate::areas::database::Database;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashSet, VecDeque};

/// Collect the full ancestor-id set of a tip, tip included
pub fn ancestor_ids(database: &Database, tip: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
    let mut seen = HashSet::new();
    let mut frontier = VecDeque::from([tip.clone()]);

    while let Some(commit_id) = frontier.pop_front() {
        if !seen.insert(commit_id.clone()) {
            continue;
        }

        let commit = database.load_commit(&commit_id)?;
        frontier.extend(commit.parent().into_iter().cloned());
        frontier.extend(commit.parent2().into_iter().cloned());
    }

    Ok(seen)
}

/// Find the split point between the current tip and the given tip.
///
/// Breadth-first from `other`, stopping at the first commit whose id is
/// an ancestor of `head`. Fails only on a malformed graph, which cannot
/// occur while the root-commit invariant holds.
pub fn find_split_point(
    database: &Database,
    head: &ObjectId,
    other: &ObjectId,
) -> anyhow::Result<ObjectId> {
    let head_ancestors = ancestor_ids(database, head)?;

    let mut seen = HashSet::new();
    let mut frontier = VecDeque::from([other.clone()]);

    while let Some(commit_id) = frontier.pop_front() {
        if head_ancestors.contains(&commit_id) {
            return Ok(commit_id);
        }

        if !seen.insert(commit_id.clone()) {
            continue;
        }

        let commit = database.load_commit(&commit_id)?;
        frontier.extend(commit.parent().into_iter().cloned());
        frontier.extend(commit.parent2().into_iter().cloned());
    }

    anyhow::bail!("no common ancestor found between the current and given branches")
}
