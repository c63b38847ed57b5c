//! Commit object
//!
//! Commits are immutable snapshot records forming a DAG through parent
//! links. Each commit carries:
//! - A message and a timestamp
//! - A mapping from tracked filename to blob id
//! - A first parent (absent only for the root commit)
//! - An optional second parent (present only for merge commits)
//!
//! ## Format
//!
//! On disk (the id is the file name, not part of the record):
//! ```text
//! timestamp <unix-seconds> <timezone>
//! parent <parent-id>
//! parent2 <second-parent-id>
//! file <blob-id> <filename>
//!
//! <commit message>
//! ```
//!
//! A commit's id hashes the timestamp together with the message and the
//! staged add/remove sets, so two commits with identical content created
//! at different times get different ids. That is faithful behavior, not
//! an accident; tests inject the clock through `NIT_COMMIT_DATE`.

use crate::artifacts::objects::hash_parts;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::collections::{BTreeMap, BTreeSet};

/// Message of the root commit created by `init`
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Environment variable overriding the commit clock (for deterministic tests)
///
/// Accepts RFC 2822 or `%Y-%m-%d %H:%M:%S %z`.
pub const COMMIT_DATE_ENV: &str = "NIT_COMMIT_DATE";

/// Immutable commit record
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Content-derived id
    id: ObjectId,
    /// Commit message
    message: String,
    /// Wall-clock time the commit was created (epoch for the root commit)
    timestamp: chrono::DateTime<chrono::FixedOffset>,
    /// Tracked filename to blob id
    file_to_blob: BTreeMap<String, ObjectId>,
    /// First parent id (None only for the root commit)
    parent: Option<ObjectId>,
    /// Second parent id (Some only for merge commits)
    parent2: Option<ObjectId>,
}

impl Commit {
    /// Create the root commit: epoch timestamp, empty file mapping, no parents
    pub fn root() -> anyhow::Result<Self> {
        let timestamp = chrono::DateTime::from_timestamp(0, 0)
            .context("epoch timestamp out of range")?
            .fixed_offset();
        let id = Self::derive_id(&timestamp, ROOT_COMMIT_MESSAGE, &[], &[])?;

        Ok(Commit {
            id,
            message: ROOT_COMMIT_MESSAGE.to_string(),
            timestamp,
            file_to_blob: BTreeMap::new(),
            parent: None,
            parent2: None,
        })
    }

    /// Build a commit from its parent's file mapping and the staged sets.
    ///
    /// The mapping starts as a copy of the parent's, staged additions
    /// overwrite entries, and staged removals delete them. Precondition
    /// checks ("nothing to commit") belong to the caller.
    pub fn build(
        message: &str,
        parent: &Commit,
        parent2: Option<ObjectId>,
        additions: BTreeMap<String, ObjectId>,
        removals: &BTreeSet<String>,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> anyhow::Result<Self> {
        let added_names = additions.keys().map(String::as_str).collect::<Vec<_>>();
        let removed_names = removals.iter().map(String::as_str).collect::<Vec<_>>();
        let id = Self::derive_id(&timestamp, message, &added_names, &removed_names)?;

        let mut file_to_blob = parent.file_to_blob.clone();
        for (name, blob_id) in additions {
            file_to_blob.insert(name, blob_id);
        }
        for name in removals {
            file_to_blob.remove(name);
        }

        Ok(Commit {
            id,
            message: message.to_string(),
            timestamp,
            file_to_blob,
            parent: Some(parent.id.clone()),
            parent2,
        })
    }

    /// Hash the id over (timestamp, message, add set, remove set)
    fn derive_id(
        timestamp: &chrono::DateTime<chrono::FixedOffset>,
        message: &str,
        added_names: &[&str],
        removed_names: &[&str],
    ) -> anyhow::Result<ObjectId> {
        let added = added_names.join("\n");
        let removed = removed_names.join("\n");

        hash_parts(&[&timestamp.to_rfc2822(), message, &added, &removed])
    }

    /// Current commit timestamp, honoring the `NIT_COMMIT_DATE` override
    pub fn timestamp_now() -> chrono::DateTime<chrono::FixedOffset> {
        std::env::var(COMMIT_DATE_ENV)
            .ok()
            .and_then(|raw| {
                chrono::DateTime::parse_from_rfc2822(&raw)
                    .or_else(|_| chrono::DateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S %z"))
                    .ok()
            })
            .unwrap_or_else(|| chrono::Local::now().fixed_offset())
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the first line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Thu Jan 1 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn parent2(&self) -> Option<&ObjectId> {
        self.parent2.as_ref()
    }

    /// Whether this is a two-parent merge commit
    pub fn is_merge(&self) -> bool {
        self.parent2.is_some()
    }

    pub fn file_to_blob(&self) -> &BTreeMap<String, ObjectId> {
        &self.file_to_blob
    }

    pub fn tracks(&self, name: &str) -> bool {
        self.file_to_blob.contains_key(name)
    }

    pub fn blob_id(&self, name: &str) -> Option<&ObjectId> {
        self.file_to_blob.get(name)
    }

    pub fn tracked_files(&self) -> impl Iterator<Item = &String> {
        self.file_to_blob.keys()
    }

    /// Serialize the record into its on-disk text form
    pub fn serialize(&self) -> String {
        let mut lines = vec![format!(
            "timestamp {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )];

        if let Some(parent) = &self.parent {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        if let Some(parent2) = &self.parent2 {
            lines.push(format!("parent2 {}", parent2.as_ref()));
        }
        for (name, blob_id) in &self.file_to_blob {
            lines.push(format!("file {} {}", blob_id.as_ref(), name));
        }

        lines.push(String::new());
        lines.push(self.message.clone());

        lines.join("\n")
    }

    /// Parse a record back from its on-disk text form.
    ///
    /// The id is not stored inside the record; callers pass the id the
    /// record was filed under.
    pub fn deserialize(id: ObjectId, content: &str) -> anyhow::Result<Self> {
        let mut lines = content.lines();

        let timestamp_line = lines
            .next()
            .context("Invalid commit record: missing timestamp line")?;
        let raw_timestamp = timestamp_line
            .strip_prefix("timestamp ")
            .context("Invalid commit record: invalid timestamp line")?;
        let timestamp = chrono::DateTime::parse_from_str(raw_timestamp, "%s %z")
            .context("Invalid commit record: unparseable timestamp")?;

        let mut parent = None;
        let mut parent2 = None;
        let mut file_to_blob = BTreeMap::new();

        for line in lines.by_ref() {
            if line.is_empty() {
                break;
            }

            if let Some(raw) = line.strip_prefix("parent2 ") {
                parent2 = Some(ObjectId::try_parse(raw.to_string())?);
            } else if let Some(raw) = line.strip_prefix("parent ") {
                parent = Some(ObjectId::try_parse(raw.to_string())?);
            } else if let Some(raw) = line.strip_prefix("file ") {
                let (blob_id, name) = raw
                    .split_once(' ')
                    .context("Invalid commit record: invalid file line")?;
                file_to_blob.insert(name.to_string(), ObjectId::try_parse(blob_id.to_string())?);
            } else {
                anyhow::bail!("Invalid commit record: unexpected line {:?}", line);
            }
        }

        let message = lines.collect::<Vec<&str>>().join("\n");

        Ok(Commit {
            id,
            message,
            timestamp,
            file_to_blob,
            parent,
            parent2,
        })
    }
}
