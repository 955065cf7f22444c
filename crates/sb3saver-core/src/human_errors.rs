// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the save button.
//
// Every technical error is mapped to plain language with a clear suggestion.
// Severity drives how the status line is coloured.

use crate::error::SaverError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Worth trying again as-is.
    Transient,
    /// User must do something first (load a project, pick a folder).
    ActionRequired,
    /// Retrying will not help on this device.
    Permanent,
}

impl Severity {
    /// Status line colour.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Transient => "#b26a00",
            Self::ActionRequired => "#007aff",
            Self::Permanent => "#c62828",
        }
    }
}

/// A human-readable error with a plain message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    pub message: String,
    pub suggestion: String,
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `SaverError` into a `HumanError`.
pub fn humanize_error(err: &SaverError) -> HumanError {
    match err {
        SaverError::Save(detail) => HumanError {
            message: "We couldn't save your project.".into(),
            suggestion: format!("Wait a moment and try again. ({detail})"),
            retriable: true,
            severity: Severity::Transient,
        },

        SaverError::NoProjectLoaded => HumanError {
            message: "There is no project to save yet.".into(),
            suggestion: "Load a project first, then save it.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        SaverError::Download(detail) => HumanError {
            message: "Your project could not be downloaded.".into(),
            suggestion: format!("Check that your browser allows downloads, then try again. ({detail})"),
            retriable: true,
            severity: Severity::Transient,
        },

        SaverError::DownloadCancelled => HumanError {
            message: "Saving was cancelled.".into(),
            suggestion: "Press save again and choose where to put the file.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        SaverError::Bridge(detail) => HumanError {
            message: "The app could not receive your project.".into(),
            suggestion: format!("Update the app or save from a browser instead. ({detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        SaverError::InvalidLaunchUrl(detail) => HumanError {
            message: "The editor was opened with a broken link.".into(),
            suggestion: format!("Open the editor again from its normal address. ({detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        SaverError::Io(io_err) => humanize_io_error(io_err),

        SaverError::Serialization(detail) => HumanError {
            message: "Your project could not be packaged for the app.".into(),
            suggestion: format!("Try saving again. ({detail})"),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}

fn humanize_io_error(err: &std::io::Error) -> HumanError {
    match err.kind() {
        std::io::ErrorKind::PermissionDenied => HumanError {
            message: "We aren't allowed to write there.".into(),
            suggestion: "Pick a different folder, such as Documents or Downloads.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },
        std::io::ErrorKind::NotFound => HumanError {
            message: "That folder no longer exists.".into(),
            suggestion: "Pick a different folder and save again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },
        _ => HumanError {
            message: "Something went wrong while writing the file.".into(),
            suggestion: format!("Try again. ({err})"),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}
