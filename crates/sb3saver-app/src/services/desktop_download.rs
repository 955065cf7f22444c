// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop download sink: native "save as" dialog, then an async file write.

use std::path::{Component, Path, PathBuf};

use futures::future::LocalBoxFuture;
use sb3saver_bridge::traits::DownloadSink;
use sb3saver_core::error::{Result, SaverError};
use sb3saver_core::{PROJECT_EXTENSION, ProjectArtifact, ProjectFilename};
use tracing::info;

/// Writes the archive where the user chooses, or into a fixed directory.
pub struct DesktopDownload {
    download_dir: Option<PathBuf>,
}

impl DesktopDownload {
    /// With `download_dir` set the dialog is skipped.
    pub fn new(download_dir: Option<PathBuf>) -> Self {
        Self { download_dir }
    }

    async fn target_path(&self, filename: &ProjectFilename) -> Result<PathBuf> {
        if let Some(dir) = &self.download_dir {
            return path_in(dir, filename);
        }

        rfd::AsyncFileDialog::new()
            .set_title("Save your project")
            .set_file_name(filename.as_str())
            .add_filter("Scratch 3 Project", &[PROJECT_EXTENSION])
            .save_file()
            .await
            .map(|handle| handle.path().to_path_buf())
            .ok_or(SaverError::DownloadCancelled)
    }

    async fn write(path: &Path, artifact: &ProjectArtifact) -> Result<()> {
        tokio::fs::write(path, artifact.as_bytes()).await?;
        info!(path = %path.display(), bytes = artifact.len(), "project written");
        Ok(())
    }
}

/// `dir/<filename>`, with separators in the title flattened to `_` so the
/// file always lands directly inside `dir`.
fn path_in(dir: &Path, filename: &ProjectFilename) -> Result<PathBuf> {
    let flat: String = filename
        .as_str()
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();

    let mut components = Path::new(&flat).components();
    let single = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    let path = dir.join(&flat);
    if !single || path.parent() != Some(dir) {
        return Err(SaverError::Download(format!(
            "'{filename}' cannot be used as a file name"
        )));
    }
    Ok(path)
}

impl DownloadSink for DesktopDownload {
    fn download<'a>(
        &'a self,
        filename: &'a ProjectFilename,
        artifact: &'a ProjectArtifact,
    ) -> LocalBoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let path = self.target_path(filename).await?;
            Self::write(&path, artifact).await
        })
    }
}
