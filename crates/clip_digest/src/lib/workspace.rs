use std::{
    fs::remove_dir_all,
    path::{Path, PathBuf},
};

use uuid::Uuid;

use crate::error::PipelineError;

/// Scratch directory scoped to a single request.
///
/// The upload and every derived artifact live here and nowhere else.
/// Dropping the workspace removes the directory, so artifacts never outlive
/// the request that produced them, whether it succeeded or failed.
#[derive(Debug)]
pub struct RequestWorkspace {
    dir: PathBuf,
}

impl RequestWorkspace {
    /// Creates a uniquely named directory under `root`.
    pub async fn create(root: &Path) -> Result<Self, PipelineError> {
        let dir = root.join(Uuid::new_v4().to_string());

        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            PipelineError::Upload(format!(
                "failed to create workspace {}: {e}",
                dir.display()
            ))
        })?;

        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path for a file inside this workspace.
    pub fn join(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

impl Drop for RequestWorkspace {
    fn drop(&mut self) {
        if self.dir.exists() {
            if let Err(e) = remove_dir_all(&self.dir) {
                tracing::warn!(error = ?e, path = ?self.dir, "Failed to clean up request workspace");
            } else {
                tracing::info!(path = ?self.dir, "Cleaned up request workspace");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_workspace_is_removed_on_drop() {
        let root = std::env::temp_dir().join("clip-digest-workspace-test");

        let workspace = RequestWorkspace::create(&root)
            .await
            .expect("workspace should be created");
        let dir = workspace.dir().to_path_buf();

        tokio::fs::write(workspace.join("upload.mp4"), b"fake video")
            .await
            .expect("write should succeed");
        assert!(dir.exists());

        drop(workspace);
        assert!(!dir.exists(), "workspace dir should be gone after drop");
    }

    #[tokio::test]
    async fn test_workspaces_do_not_collide() {
        let root = std::env::temp_dir().join("clip-digest-workspace-test");

        let a = RequestWorkspace::create(&root).await.expect("workspace a");
        let b = RequestWorkspace::create(&root).await.expect("workspace b");

        assert_ne!(a.dir(), b.dir(), "each request gets its own directory");
    }
}
