// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for host capabilities.
//
// A WebView host exposes native methods through one of two messaging
// channels. The traits below model each channel as the page sees it, so the
// same resolution logic runs against the real `window` objects on the web and
// against in-process recorders on desktop and in tests.

use futures::future::LocalBoxFuture;
use sb3saver_core::error::Result;
use sb3saver_core::{ProjectArtifact, ProjectFilename};

/// WKWebView-style registry of named message handlers
/// (`window.webkit.messageHandlers`).
pub trait MessageHandlerRegistry {
    /// Whether a handler called `name` is registered.
    fn has_handler(&self, name: &str) -> bool;

    /// Call `postMessage` on the named handler with `args`.
    fn post_message(&self, name: &str, args: &[String]) -> Result<()>;
}

/// Android-style helper object whose properties are callable methods
/// (`window.JsBridgeHelper`).
pub trait BridgeHelper {
    /// Whether the helper has a method called `name`.
    fn has_method(&self, name: &str) -> bool;

    /// Call the named method with `args`.
    fn invoke(&self, name: &str, args: &[String]) -> Result<()>;
}

/// Same-device file download (browser download prompt, desktop save dialog).
pub trait DownloadSink {
    /// Hand `artifact` to the user as a file called `filename`.
    fn download<'a>(
        &'a self,
        filename: &'a ProjectFilename,
        artifact: &'a ProjectArtifact,
    ) -> LocalBoxFuture<'a, Result<()>>;
}
