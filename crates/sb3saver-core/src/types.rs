// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for saving and delivering a project archive.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::Result;

/// File extension of a project archive, without the leading dot.
pub const PROJECT_EXTENSION: &str = "sb3";

/// MIME type used when the archive is handed to the browser.
pub const PROJECT_MIME_TYPE: &str = "application/x.scratch.sb3";

/// Titles are cut to this many characters before the extension is appended.
pub const MAX_TITLE_CHARS: usize = 100;

/// Unique identifier for one trigger of the save/deliver sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SaveRequestId(pub Uuid);

impl SaveRequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SaveRequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SaveRequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serialized project produced by the project owner.
///
/// The bytes are opaque here: they are measured, fingerprinted, and encoded
/// for transport, never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectArtifact(Vec<u8>);

impl ProjectArtifact {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Standard padded base64, the encoding handed to native hosts.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }

    /// Lowercase hex SHA-256 of the archive bytes.
    pub fn sha256_hex(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.0);
        hex::encode(hasher.finalize())
    }
}

/// Download filename derived from the project title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectFilename(String);

impl ProjectFilename {
    /// Build `<title>.sb3`.
    ///
    /// An empty `title` falls back to `default_title`. Only the first
    /// [`MAX_TITLE_CHARS`] characters of the chosen title are kept.
    pub fn from_title(title: &str, default_title: &str) -> Self {
        let chosen = if title.is_empty() { default_title } else { title };
        let truncated: String = chosen.chars().take(MAX_TITLE_CHARS).collect();
        Self(format!("{truncated}.{PROJECT_EXTENSION}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectFilename {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payload of the native `appdownload` method.
///
/// Serialized as `{"filename": "...", "content": "<base64>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDownloadOptions {
    pub filename: String,
    pub content: String,
}

impl AppDownloadOptions {
    /// Encode an artifact for a native host.
    pub fn encode(filename: &ProjectFilename, artifact: &ProjectArtifact) -> Self {
        Self {
            filename: filename.as_str().to_owned(),
            content: artifact.to_base64(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Native messaging channel a bridge call went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BridgeChannel {
    /// `window.webkit.messageHandlers` (WKWebView hosts).
    WebKit,
    /// `window.JsBridgeHelper` (Android WebView hosts).
    Android,
}

impl BridgeChannel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::WebKit => "webkit",
            Self::Android => "android",
        }
    }
}

/// Where a saved project ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryRoute {
    /// Handed to the same-device download sink.
    BrowserDownload,
    /// Posted to the native host.
    NativeBridge(BridgeChannel),
    /// Native delivery was requested but the host exposes no `appdownload`.
    BridgeUnavailable,
}

/// Outcome of one completed save/deliver sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveReceipt {
    pub request_id: SaveRequestId,
    pub filename: ProjectFilename,
    pub route: DeliveryRoute,
    pub bytes: usize,
    pub sha256: String,
    pub finished_at: DateTime<Utc>,
}

impl SaveReceipt {
    /// Short status line for the UI.
    pub fn summary(&self) -> String {
        let size = size_label(self.bytes);
        match self.route {
            DeliveryRoute::BrowserDownload => format!("Saved {} ({size})", self.filename),
            DeliveryRoute::NativeBridge(channel) => {
                format!("Sent {} to the app via {} ({size})", self.filename, channel.label())
            }
            DeliveryRoute::BridgeUnavailable => "The app is not accepting projects here".to_string(),
        }
    }

    /// Whether the project actually left the editor.
    pub fn delivered(&self) -> bool {
        self.route != DeliveryRoute::BridgeUnavailable
    }
}

/// Byte count for humans: exact below 1 KiB, whole KiB rounded up above.
pub fn size_label(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} bytes")
    } else {
        format!("{} KB", bytes.div_ceil(1024))
    }
}

/// Owner of the project state that can serialize it to an archive.
pub trait ProjectSaver {
    /// Produce the current project as a `.sb3` archive.
    fn save_project_sb3(&self) -> LocalBoxFuture<'_, Result<ProjectArtifact>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_gets_extension() {
        let name = ProjectFilename::from_title("My Project", "Scratch Project");
        assert_eq!(name.as_str(), "My Project.sb3");
    }

    #[test]
    fn empty_title_uses_default() {
        let name = ProjectFilename::from_title("", "Scratch Project");
        assert_eq!(name.as_str(), "Scratch Project.sb3");
    }

    #[test]
    fn whitespace_title_is_kept() {
        let name = ProjectFilename::from_title("   ", "Scratch Project");
        assert_eq!(name.as_str(), "   .sb3");
    }

    #[test]
    fn long_title_is_truncated() {
        let title = "a".repeat(150);
        let name = ProjectFilename::from_title(&title, "Scratch Project");
        assert_eq!(name.as_str(), format!("{}.sb3", "a".repeat(100)));
    }

    #[test]
    fn exactly_max_title_is_untouched() {
        let title = "b".repeat(MAX_TITLE_CHARS);
        let name = ProjectFilename::from_title(&title, "x");
        assert_eq!(name.as_str(), format!("{title}.sb3"));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let title = "é".repeat(120);
        let name = ProjectFilename::from_title(&title, "x");
        assert_eq!(name.as_str().chars().count(), MAX_TITLE_CHARS + 4);
        assert!(name.as_str().ends_with(".sb3"));
    }

    #[test]
    fn long_default_title_is_truncated_too() {
        let default = "d".repeat(101);
        let name = ProjectFilename::from_title("", &default);
        assert_eq!(name.as_str(), format!("{}.sb3", "d".repeat(100)));
    }

    #[test]
    fn payload_json_has_filename_and_base64_content() {
        let artifact = ProjectArtifact::new(b"PK\x03\x04hello".to_vec());
        let filename = ProjectFilename::from_title("Cat", "");
        let json = AppDownloadOptions::encode(&filename, &artifact)
            .to_json()
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["filename"], "Cat.sb3");
        assert_eq!(obj["content"], "UEsDBGhlbGxv");
    }

    #[test]
    fn sha256_of_known_bytes() {
        let artifact = ProjectArtifact::new(b"hello".to_vec());
        assert_eq!(
            artifact.sha256_hex(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    fn receipt(route: DeliveryRoute, bytes: usize) -> SaveReceipt {
        SaveReceipt {
            request_id: SaveRequestId::new(),
            filename: ProjectFilename::from_title("Cat", ""),
            route,
            bytes,
            sha256: String::new(),
            finished_at: Utc::now(),
        }
    }

    #[test]
    fn receipt_summary_names_the_route() {
        let receipt = receipt(DeliveryRoute::NativeBridge(BridgeChannel::Android), 4096);
        assert_eq!(receipt.summary(), "Sent Cat.sb3 to the app via android (4 KB)");
        assert!(receipt.delivered());
    }

    #[test]
    fn small_projects_report_bytes() {
        let receipt = receipt(DeliveryRoute::BrowserDownload, 300);
        assert_eq!(receipt.summary(), "Saved Cat.sb3 (300 bytes)");
    }

    #[test]
    fn partial_kilobytes_round_up() {
        let receipt = receipt(DeliveryRoute::BrowserDownload, 1025);
        assert_eq!(receipt.summary(), "Saved Cat.sb3 (2 KB)");
    }

    #[test]
    fn unavailable_bridge_does_not_claim_a_save() {
        let receipt = receipt(DeliveryRoute::BridgeUnavailable, 4096);
        assert_eq!(receipt.summary(), "The app is not accepting projects here");
        assert!(!receipt.delivered());
    }
}
