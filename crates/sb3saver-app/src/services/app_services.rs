// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer: resolves configuration, launch mode, host bridge,
// and download sink once at startup and hands them to the Dioxus UI.
//
// Host objects on the web are JS handles and therefore not `Send`, so shared
// pieces are `Rc`-wrapped; everything runs on the UI thread.

use std::rc::Rc;

use sb3saver_bridge::traits::DownloadSink;
use sb3saver_bridge::{HostBridge, platform_bridge};
use sb3saver_core::{LaunchConfig, ProjectFilename, SaverConfig};
use tracing::info;

use super::downloader::ProjectDownloader;
use super::project::ProjectStore;

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
#[derive(Clone)]
pub struct AppServices {
    config: Rc<SaverConfig>,
    launch: LaunchConfig,
    bridge: Rc<HostBridge>,
    sink: Rc<dyn DownloadSink>,
    project: Rc<ProjectStore>,
}

impl AppServices {
    /// Initialise all services. Call once at app startup.
    pub fn init() -> Self {
        let config = load_platform_config();
        let launch = launch_config(&config);
        let bridge = platform_bridge(config.simulated_host);
        let sink = download_sink(&config);

        info!(
            host_mode = ?launch.host_mode,
            bridge = bridge.channel_name(),
            "app services initialised"
        );

        Self::with_parts(config, launch, bridge, sink)
    }

    /// Assemble services from already-resolved parts.
    pub fn with_parts(
        config: SaverConfig,
        launch: LaunchConfig,
        bridge: HostBridge,
        sink: Rc<dyn DownloadSink>,
    ) -> Self {
        Self {
            config: Rc::new(config),
            launch,
            bridge: Rc::new(bridge),
            sink,
            project: Rc::new(ProjectStore::default()),
        }
    }

    pub fn config(&self) -> &SaverConfig {
        &self.config
    }

    pub fn launch(&self) -> LaunchConfig {
        self.launch
    }

    pub fn bridge(&self) -> &HostBridge {
        &self.bridge
    }

    pub fn project(&self) -> &ProjectStore {
        &self.project
    }

    /// Filename for the given title, falling back to the configured default.
    pub fn project_filename(&self, title: &str) -> ProjectFilename {
        ProjectFilename::from_title(title, &self.config.default_project_title)
    }

    /// A downloader wired to the current project, bridge, and sink.
    pub fn downloader(&self) -> ProjectDownloader {
        ProjectDownloader::new(
            self.project.clone(),
            self.bridge.clone(),
            self.sink.clone(),
            self.launch,
        )
    }
}

// -- Platform wiring ---------------------------------------------------------

#[cfg(not(target_arch = "wasm32"))]
fn load_platform_config() -> SaverConfig {
    let dir = super::data_dir::data_dir();
    load_config(&dir).unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
fn load_platform_config() -> SaverConfig {
    SaverConfig::default()
}

#[cfg(not(target_arch = "wasm32"))]
fn launch_config(config: &SaverConfig) -> LaunchConfig {
    LaunchConfig::from_optional_url(config.launch_url.as_deref())
}

#[cfg(target_arch = "wasm32")]
fn launch_config(_config: &SaverConfig) -> LaunchConfig {
    LaunchConfig::from_optional_url(sb3saver_bridge::web::location_href().as_deref())
}

#[cfg(not(target_arch = "wasm32"))]
fn download_sink(config: &SaverConfig) -> Rc<dyn DownloadSink> {
    Rc::new(super::desktop_download::DesktopDownload::new(
        config.download_dir.clone(),
    ))
}

#[cfg(target_arch = "wasm32")]
fn download_sink(_config: &SaverConfig) -> Rc<dyn DownloadSink> {
    Rc::new(sb3saver_bridge::web::BlobDownload)
}

// -- Config file persistence -------------------------------------------------

#[cfg(not(target_arch = "wasm32"))]
const CONFIG_FILE: &str = "config.json";

#[cfg(not(target_arch = "wasm32"))]
fn load_config(data_dir: &std::path::Path) -> Option<SaverConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            None
        }
    }
}
