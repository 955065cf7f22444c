// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// sb3saver: WebView host bridge.
//
// A page embedded in a native app talks to its host through one of two
// messaging channels: WKWebView message handlers or an Android-style helper
// object. This crate detects which one is present, once, and hands the result
// to the UI as a `HostBridge` value together with the download sink used when
// no host is involved.

pub mod host;
pub mod stub;
pub mod traits;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use host::{APPDOWNLOAD_METHOD, BridgeMethod, BridgeOutcome, HostBridge};

use sb3saver_core::SimulatedHost;

/// Detect the host bridge for the current platform.
///
/// On the web this probes `window` for the WebKit and Android channels. Native
/// builds have no WebView host; `simulated` installs an in-process recorder
/// that accepts `appdownload` so the native path can still be exercised.
pub fn platform_bridge(simulated: Option<SimulatedHost>) -> HostBridge {
    #[cfg(target_arch = "wasm32")]
    {
        if simulated.is_some() {
            tracing::warn!("simulated host ignored on the web, probing window instead");
        }
        web::detect()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::rc::Rc;

        match simulated {
            Some(SimulatedHost::WebKit) => HostBridge::WebKit {
                handlers: Rc::new(stub::RecordingHandlers::new([APPDOWNLOAD_METHOD])),
                fallback: None,
            },
            Some(SimulatedHost::Android) => {
                HostBridge::Android(Rc::new(stub::RecordingHelper::new([APPDOWNLOAD_METHOD])))
            }
            None => HostBridge::Absent,
        }
    }
}
