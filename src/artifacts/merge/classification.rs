//! Per-file three-way classification
//!
//! Every filename in the union of the split, head, and other file
//! mappings is classified by comparing the blob ids the three commits
//! record for it. Absence is a distinct value, so additions and
//! deletions fall out of the same comparison.

use crate::artifacts::objects::object_id::ObjectId;

/// What the merge does with a single filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Keep head's version (or its absence); no staging needed
    Keep,
    /// Check out and stage the other branch's version
    TakeOther,
    /// The other branch deleted a file head left untouched: stage its
    /// removal and delete it from the working tree
    RemoveFile,
    /// Changed differently on both sides: synthesize conflict content,
    /// stage it, and raise the merge's conflict flag
    Conflict,
}

/// Classify one filename from the blob ids recorded at the split point,
/// the head tip, and the other tip
pub fn classify(
    split: Option<&ObjectId>,
    head: Option<&ObjectId>,
    other: Option<&ObjectId>,
) -> MergeAction {
    // both sides agree (same content or both absent)
    if head == other {
        return MergeAction::Keep;
    }

    // changed only in other, including deletion and addition there
    if split == head {
        return match other {
            Some(_) => MergeAction::TakeOther,
            None => MergeAction::RemoveFile,
        };
    }

    // changed only in head
    if split == other {
        return MergeAction::Keep;
    }

    MergeAction::Conflict
}

/// Synthesize conflict-marker content from the two sides' blob contents.
///
/// Absent sides contribute an empty body. The contents are concatenated
/// verbatim, with no separator newline added beyond the marker lines.
pub fn conflict_content(head: Option<&str>, other: Option<&str>) -> String {
    format!(
        "<<<<<<< HEAD\n{}=======\n{}>>>>>>>\n",
        head.unwrap_or(""),
        other.unwrap_or("")
    )
}
