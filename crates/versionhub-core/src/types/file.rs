//! File handles exposed by the user tree and the version store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored file, either the live copy in a user's tree or one of its
/// historical versions.
///
/// The handle never owns the bytes; `storage_path` is resolved against the
/// storage provider of whoever produced the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    /// Identity of this exact content, used to key previews.
    pub content_id: Uuid,
    /// Logical path relative to the owner's files root.
    pub path: String,
    /// File name (last path segment).
    pub name: String,
    /// Path within the storage provider.
    pub storage_path: String,
    /// MIME type of the content.
    pub mime_type: String,
    /// Content size in bytes.
    pub size_bytes: u64,
    /// Last modification time (the version timestamp for versions).
    pub modified_at: DateTime<Utc>,
}

impl FileNode {
    /// Build a file node, deriving its name and content identity.
    pub fn new(
        path: impl Into<String>,
        storage_path: impl Into<String>,
        mime_type: impl Into<String>,
        size_bytes: u64,
        modified_at: DateTime<Utc>,
    ) -> Self {
        let path = path.into();
        let storage_path = storage_path.into();
        let name = path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        let content_id = content_id_for(&storage_path, size_bytes, modified_at);

        Self {
            content_id,
            path,
            name,
            storage_path,
            mime_type: mime_type.into(),
            size_bytes,
            modified_at,
        }
    }
}

/// Content identity: stable for a given stored object until it is rewritten.
/// Size is part of the key: rewrites that keep the mtime (`cp -p`,
/// `rsync -a`) must still change it.
fn content_id_for(storage_path: &str, size_bytes: u64, modified_at: DateTime<Utc>) -> Uuid {
    let key = format!(
        "{storage_path}@{}#{size_bytes}",
        modified_at.timestamp_millis()
    );
    Uuid::new_v5(&Uuid::NAMESPACE_URL, key.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_name_from_path() {
        let node = FileNode::new(
            "docs/report.PDF",
            "u/files/docs/report.PDF",
            "application/pdf",
            3,
            at(1),
        );
        assert_eq!(node.name, "report.PDF");
    }

    #[test]
    fn test_content_id_tracks_storage_and_mtime() {
        let a = FileNode::new("a.png", "u/files/a.png", "image/png", 1, at(10));
        let same = FileNode::new("a.png", "u/files/a.png", "image/png", 1, at(10));
        let touched = FileNode::new("a.png", "u/files/a.png", "image/png", 1, at(11));
        let version = FileNode::new(
            "a.png",
            "u/files_versions/a.png.v10",
            "image/png",
            1,
            at(10),
        );

        assert_eq!(a.content_id, same.content_id);
        assert_ne!(a.content_id, touched.content_id);
        assert_ne!(a.content_id, version.content_id);
    }

    #[test]
    fn test_content_id_changes_when_rewritten_with_same_mtime() {
        let before = FileNode::new("a.png", "u/files/a.png", "image/png", 100, at(10));
        let after = FileNode::new("a.png", "u/files/a.png", "image/png", 250, at(10));

        assert_ne!(before.content_id, after.content_id);
    }
}
