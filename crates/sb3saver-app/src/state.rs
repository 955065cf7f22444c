// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state: reactive signals for the Dioxus UI.

use sb3saver_core::SaveReceipt;
use sb3saver_core::error::SaverError;
use sb3saver_core::human_errors::humanize_error;

/// One line of user feedback under the editor controls.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub text: String,
    pub detail: Option<String>,
    pub color: &'static str,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            detail: None,
            color: "#666",
        }
    }

    pub fn saved(receipt: &SaveReceipt) -> Self {
        if !receipt.delivered() {
            return Self::info(receipt.summary());
        }
        Self {
            text: receipt.summary(),
            detail: None,
            color: "#2e7d32",
        }
    }

    pub fn failed(err: &SaverError) -> Self {
        let human = humanize_error(err);
        Self {
            text: human.message,
            detail: Some(human.suggestion),
            color: human.severity.color(),
        }
    }
}

/// Shared state accessible to all pages via `use_context`.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// User-editable project title; drives the download filename.
    pub project_title: String,
    /// Number of save/deliver sequences still running.
    pub saves_in_flight: u32,
    /// Latest status message.
    pub status: Option<StatusLine>,
}

impl AppState {
    pub fn is_saving(&self) -> bool {
        self.saves_in_flight > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sb3saver_core::{BridgeChannel, DeliveryRoute, ProjectFilename, SaveRequestId};

    fn receipt(route: DeliveryRoute) -> SaveReceipt {
        SaveReceipt {
            request_id: SaveRequestId::new(),
            filename: ProjectFilename::from_title("Cat", ""),
            route,
            bytes: 2048,
            sha256: String::new(),
            finished_at: Utc::now(),
        }
    }

    #[test]
    fn delivered_receipt_is_green() {
        let line = StatusLine::saved(&receipt(DeliveryRoute::NativeBridge(BridgeChannel::WebKit)));
        assert_eq!(line.color, "#2e7d32");
    }

    #[test]
    fn unavailable_bridge_is_neutral() {
        let line = StatusLine::saved(&receipt(DeliveryRoute::BridgeUnavailable));
        assert_eq!(line, StatusLine::info("The app is not accepting projects here"));
    }
}
