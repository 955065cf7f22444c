// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-process project owner: holds the archive the user loaded and serves it
// back when the save button asks for it.

use std::cell::RefCell;

use futures::future::LocalBoxFuture;
use sb3saver_core::error::{Result, SaverError};
use sb3saver_core::{PROJECT_EXTENSION, ProjectArtifact, ProjectSaver};
use tracing::info;

/// Current project bytes, if any.
#[derive(Debug, Default)]
pub struct ProjectStore {
    current: RefCell<Option<Vec<u8>>>,
}

impl ProjectStore {
    /// Replace the current project.
    pub fn load(&self, bytes: Vec<u8>) {
        info!(bytes = bytes.len(), "project loaded");
        *self.current.borrow_mut() = Some(bytes);
    }
}

impl ProjectSaver for ProjectStore {
    fn save_project_sb3(&self) -> LocalBoxFuture<'_, Result<ProjectArtifact>> {
        Box::pin(async move {
            match self.current.borrow().as_ref() {
                Some(bytes) if bytes.is_empty() => {
                    Err(SaverError::Save("project archive is empty".into()))
                }
                Some(bytes) => Ok(ProjectArtifact::new(bytes.clone())),
                None => Err(SaverError::NoProjectLoaded),
            }
        })
    }
}

/// A project file picked by the user.
#[derive(Debug, Clone)]
pub struct PickedProject {
    /// File name without the `.sb3` extension.
    pub title: String,
    pub bytes: Vec<u8>,
}

/// Title for a picked file: its name minus a trailing `.sb3`.
pub fn title_from_file_name(file_name: &str) -> String {
    let suffix = format!(".{PROJECT_EXTENSION}");
    file_name
        .strip_suffix(suffix.as_str())
        .unwrap_or(file_name)
        .to_owned()
}

/// Ask the user for a `.sb3` file. `None` if the dialog was dismissed.
pub async fn pick_project_file() -> Option<PickedProject> {
    let handle = rfd::AsyncFileDialog::new()
        .set_title("Load a project")
        .add_filter("Scratch 3 Project", &[PROJECT_EXTENSION])
        .pick_file()
        .await?;

    let title = title_from_file_name(&handle.file_name());
    let bytes = handle.read().await;
    Some(PickedProject { title, bytes })
}
