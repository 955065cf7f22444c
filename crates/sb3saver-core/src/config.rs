// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application and launch configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, SaverError};

/// Query parameter that marks a page as embedded in the native app.
pub const APP_QUERY_PARAM: &str = "app";

/// Value of [`APP_QUERY_PARAM`] that selects native delivery.
pub const APP_QUERY_NATIVE: &str = "1";

/// In-process host channel installed on desktop builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulatedHost {
    WebKit,
    Android,
}

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaverConfig {
    /// Title used for the filename when the project title is empty.
    pub default_project_title: String,
    /// Launch URL on desktop builds. The web build reads the page location.
    pub launch_url: Option<String>,
    /// Pretend to be embedded in a native host (desktop only).
    pub simulated_host: Option<SimulatedHost>,
    /// Write downloads here instead of asking with a save dialog (desktop only).
    pub download_dir: Option<PathBuf>,
}

impl Default for SaverConfig {
    fn default() -> Self {
        Self {
            default_project_title: "Scratch Project".into(),
            launch_url: None,
            simulated_host: None,
            download_dir: None,
        }
    }
}

/// How the page was launched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostMode {
    /// Plain browser or desktop window: deliver with a file download.
    #[default]
    Browser,
    /// Embedded in the native app: deliver through the host bridge.
    NativeApp,
}

/// Launch-time configuration, computed once and passed explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchConfig {
    pub host_mode: HostMode,
}

impl LaunchConfig {
    /// Derive the launch configuration from a page URL.
    ///
    /// Anything that is not a parseable URL carrying `app=1` as its first
    /// `app` parameter yields [`HostMode::Browser`].
    pub fn from_url(href: &str) -> Self {
        Self::try_from_url(href).unwrap_or_default()
    }

    /// Like [`LaunchConfig::from_url`], but reports unparseable URLs.
    pub fn try_from_url(href: &str) -> Result<Self> {
        let url = Url::parse(href).map_err(|e| SaverError::InvalidLaunchUrl(format!("{href}: {e}")))?;
        let native = url
            .query_pairs()
            .find(|(key, _)| key == APP_QUERY_PARAM)
            .is_some_and(|(_, value)| value == APP_QUERY_NATIVE);

        Ok(Self {
            host_mode: if native { HostMode::NativeApp } else { HostMode::Browser },
        })
    }

    /// Launch configuration from an optional URL; `None` means browser mode.
    pub fn from_optional_url(href: Option<&str>) -> Self {
        href.map(Self::from_url).unwrap_or_default()
    }
}
