// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Save-and-deliver sequence behind the "Save to your computer" button.
//
// One trigger asks the project owner for an archive, runs the completion
// callback, then delivers either through the host bridge (native app launch)
// or through the download sink. Each trigger is independent; two quick clicks
// run two sequences whose log lines are told apart by `request_id`.

use std::rc::Rc;

use chrono::Utc;
use sb3saver_bridge::traits::DownloadSink;
use sb3saver_bridge::{BridgeOutcome, HostBridge};
use sb3saver_core::error::Result;
use sb3saver_core::{
    AppDownloadOptions, DeliveryRoute, HostMode, LaunchConfig, ProjectFilename, ProjectSaver,
    SaveReceipt, SaveRequestId,
};
use tracing::{error, info, warn};

/// Everything one save needs, cheap to clone into a spawned task.
#[derive(Clone)]
pub struct ProjectDownloader {
    project: Rc<dyn ProjectSaver>,
    bridge: Rc<HostBridge>,
    sink: Rc<dyn DownloadSink>,
    launch: LaunchConfig,
}

impl ProjectDownloader {
    pub fn new(
        project: Rc<dyn ProjectSaver>,
        bridge: Rc<HostBridge>,
        sink: Rc<dyn DownloadSink>,
        launch: LaunchConfig,
    ) -> Self {
        Self {
            project,
            bridge,
            sink,
            launch,
        }
    }

    /// Save the project and deliver it as `filename`.
    ///
    /// `on_save_finished` runs once the archive exists and before delivery.
    /// A failed save is returned as an error; the callback does not run and
    /// nothing is delivered.
    pub async fn download_project(
        &self,
        filename: ProjectFilename,
        on_save_finished: Option<&dyn Fn()>,
    ) -> Result<SaveReceipt> {
        let request_id = SaveRequestId::new();
        info!(%request_id, %filename, mode = ?self.launch.host_mode, "saving project");

        let artifact = match self.project.save_project_sb3().await {
            Ok(artifact) => artifact,
            Err(e) => {
                error!(%request_id, error = %e, "project save failed");
                return Err(e);
            }
        };

        if let Some(callback) = on_save_finished {
            callback();
        }

        let route = match self.launch.host_mode {
            HostMode::NativeApp => {
                let options = AppDownloadOptions::encode(&filename, &artifact);
                match self.bridge.appdownload(&options) {
                    Ok(BridgeOutcome::Delivered(channel)) => DeliveryRoute::NativeBridge(channel),
                    Ok(BridgeOutcome::Unavailable) => {
                        warn!(%request_id, bridge = self.bridge.channel_name(), "launched as app but host has no appdownload");
                        DeliveryRoute::BridgeUnavailable
                    }
                    Err(e) => {
                        error!(%request_id, error = %e, "native delivery failed");
                        return Err(e);
                    }
                }
            }
            HostMode::Browser => {
                if let Err(e) = self.sink.download(&filename, &artifact).await {
                    error!(%request_id, error = %e, "download failed");
                    return Err(e);
                }
                DeliveryRoute::BrowserDownload
            }
        };

        let receipt = SaveReceipt {
            request_id,
            filename,
            route,
            bytes: artifact.len(),
            sha256: artifact.sha256_hex(),
            finished_at: Utc::now(),
        };
        info!(
            %request_id,
            route = ?receipt.route,
            bytes = receipt.bytes,
            sha256 = %receipt.sha256,
            "project delivered"
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use futures::future::LocalBoxFuture;
    use sb3saver_bridge::APPDOWNLOAD_METHOD;
    use sb3saver_bridge::stub::{RecordingHandlers, RecordingHelper};
    use sb3saver_core::{BridgeChannel, ProjectArtifact, SaverError};

    use super::*;

    type EventLog = Rc<RefCell<Vec<String>>>;

    struct FakeProject {
        bytes: Option<Vec<u8>>,
        log: EventLog,
    }

    impl ProjectSaver for FakeProject {
        fn save_project_sb3(&self) -> LocalBoxFuture<'_, Result<ProjectArtifact>> {
            Box::pin(async move {
                self.log.borrow_mut().push("save".into());
                self.bytes
                    .clone()
                    .map(ProjectArtifact::new)
                    .ok_or_else(|| SaverError::Save("vm refused".into()))
            })
        }
    }

    struct RecordingSink {
        log: EventLog,
    }

    impl DownloadSink for RecordingSink {
        fn download<'a>(
            &'a self,
            filename: &'a ProjectFilename,
            artifact: &'a ProjectArtifact,
        ) -> LocalBoxFuture<'a, Result<()>> {
            Box::pin(async move {
                self.log
                    .borrow_mut()
                    .push(format!("download {filename} {}", artifact.len()));
                Ok(())
            })
        }
    }

    struct Harness {
        log: EventLog,
        downloader: ProjectDownloader,
    }

    fn harness(bytes: Option<&[u8]>, bridge: HostBridge, href: &str) -> Harness {
        let log: EventLog = Rc::default();
        let project = FakeProject {
            bytes: bytes.map(<[u8]>::to_vec),
            log: log.clone(),
        };
        let sink = RecordingSink { log: log.clone() };
        let downloader = ProjectDownloader::new(
            Rc::new(project),
            Rc::new(bridge),
            Rc::new(sink),
            LaunchConfig::from_url(href),
        );
        Harness { log, downloader }
    }

    fn filename() -> ProjectFilename {
        ProjectFilename::from_title("My Project", "Scratch Project")
    }

    #[tokio::test]
    async fn browser_launch_downloads_and_skips_bridge() {
        let handlers = Rc::new(RecordingHandlers::new([APPDOWNLOAD_METHOD]));
        let bridge = HostBridge::WebKit {
            handlers: handlers.clone(),
            fallback: None,
        };
        let h = harness(Some(b"PK\x03\x04"), bridge, "https://editor.example/");

        let receipt = h.downloader.download_project(filename(), None).await.unwrap();

        assert_eq!(receipt.route, DeliveryRoute::BrowserDownload);
        assert_eq!(*h.log.borrow(), vec!["save", "download My Project.sb3 4"]);
        assert!(handlers.calls().is_empty());
    }

    #[tokio::test]
    async fn app_launch_uses_bridge_not_download() {
        let helper = Rc::new(RecordingHelper::new([APPDOWNLOAD_METHOD]));
        let bridge = HostBridge::Android(helper.clone());
        let h = harness(Some(b"hello"), bridge, "https://editor.example/?app=1");

        let receipt = h.downloader.download_project(filename(), None).await.unwrap();

        assert_eq!(receipt.route, DeliveryRoute::NativeBridge(BridgeChannel::Android));
        assert_eq!(*h.log.borrow(), vec!["save"]);

        let calls = helper.calls();
        assert_eq!(calls.len(), 1);
        let sent: AppDownloadOptions = serde_json::from_str(&calls[0].args[0]).unwrap();
        assert_eq!(sent.filename, "My Project.sb3");
        assert_eq!(sent.content, "aGVsbG8=");
    }

    #[tokio::test]
    async fn app_launch_without_host_is_quiet() {
        let h = harness(Some(b"hello"), HostBridge::Absent, "https://editor.example/?app=1");

        let receipt = h.downloader.download_project(filename(), None).await.unwrap();

        assert_eq!(receipt.route, DeliveryRoute::BridgeUnavailable);
        assert_eq!(*h.log.borrow(), vec!["save"]);
    }

    #[tokio::test]
    async fn callback_runs_after_save_and_before_delivery() {
        let h = harness(Some(b"abc"), HostBridge::Absent, "https://editor.example/");
        let log = h.log.clone();
        let finished = move || log.borrow_mut().push("finished".into());

        h.downloader
            .download_project(filename(), Some(&finished))
            .await
            .unwrap();

        assert_eq!(
            *h.log.borrow(),
            vec!["save", "finished", "download My Project.sb3 3"]
        );
    }

    #[tokio::test]
    async fn failed_save_skips_callback_and_delivery() {
        let h = harness(None, HostBridge::Absent, "https://editor.example/");
        let called = Cell::new(false);
        let finished = || called.set(true);

        let err = h
            .downloader
            .download_project(filename(), Some(&finished))
            .await
            .unwrap_err();

        assert!(matches!(err, SaverError::Save(_)));
        assert!(!called.get());
        assert_eq!(*h.log.borrow(), vec!["save"]);
    }

    #[tokio::test]
    async fn bridge_error_is_surfaced() {
        let handlers = Rc::new(RecordingHandlers::new([APPDOWNLOAD_METHOD]).failing("host threw"));
        let bridge = HostBridge::WebKit {
            handlers,
            fallback: None,
        };
        let h = harness(Some(b"abc"), bridge, "https://editor.example/?app=1");

        let err = h.downloader.download_project(filename(), None).await.unwrap_err();
        assert!(matches!(err, SaverError::Bridge(_)));
    }

    #[tokio::test]
    async fn receipt_fingerprints_the_archive() {
        let h = harness(Some(b"hello"), HostBridge::Absent, "https://editor.example/");

        let receipt = h.downloader.download_project(filename(), None).await.unwrap();

        assert_eq!(receipt.bytes, 5);
        assert_eq!(
            receipt.sha256,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[tokio::test]
    async fn each_trigger_gets_its_own_request_id() {
        let h = harness(Some(b"x"), HostBridge::Absent, "https://editor.example/");

        let first = h.downloader.download_project(filename(), None).await.unwrap();
        let second = h.downloader.download_project(filename(), None).await.unwrap();

        assert_ne!(first.request_id, second.request_id);
    }
}
