// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Browser implementation of the host bridge via wasm-bindgen.
//
// The host objects are plain JS values reached through `js_sys::Reflect`, so a
// missing or non-object link anywhere on the path reads as "absent" instead of
// throwing.

#![cfg(target_arch = "wasm32")]

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use gloo_timers::callback::Timeout;
use js_sys::{Array, Function, Reflect, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use sb3saver_core::error::{Result, SaverError};
use sb3saver_core::{PROJECT_MIME_TYPE, ProjectArtifact, ProjectFilename};

use crate::host::HostBridge;
use crate::traits::{BridgeHelper, DownloadSink, MessageHandlerRegistry};

// ---------------------------------------------------------------------------
// JS helpers
// ---------------------------------------------------------------------------

/// Follow `path` from `root`, returning the value only if every link exists
/// and the final value is truthy.
fn get_in(root: &JsValue, path: &[&str]) -> Option<JsValue> {
    let mut current = root.clone();
    for key in path {
        if current.is_null() || current.is_undefined() {
            return None;
        }
        current = Reflect::get(&current, &JsValue::from_str(key)).ok()?;
    }
    current.is_truthy().then_some(current)
}

fn js_err(context: &str, value: JsValue) -> SaverError {
    let detail = value.as_string().unwrap_or_else(|| format!("{value:?}"));
    SaverError::Bridge(format!("{context}: {detail}"))
}

fn js_args(args: &[String]) -> Array {
    args.iter().map(|arg| JsValue::from_str(arg)).collect()
}

fn function_at(target: &JsValue, name: &str) -> Result<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .map_err(|e| js_err(name, e))?
        .dyn_into::<Function>()
        .map_err(|_| SaverError::Bridge(format!("'{name}' is not callable")))
}

fn window_value() -> Option<JsValue> {
    web_sys::window().map(JsValue::from)
}

// ---------------------------------------------------------------------------
// Channels
// ---------------------------------------------------------------------------

/// `window.webkit.messageHandlers`.
pub struct WebKitHandlers {
    registry: JsValue,
}

impl MessageHandlerRegistry for WebKitHandlers {
    fn has_handler(&self, name: &str) -> bool {
        get_in(&self.registry, &[name]).is_some()
    }

    fn post_message(&self, name: &str, args: &[String]) -> Result<()> {
        let handler = get_in(&self.registry, &[name])
            .ok_or_else(|| SaverError::Bridge(format!("webkit handler '{name}' disappeared")))?;
        let post = function_at(&handler, "postMessage")?;
        post.apply(&handler, &js_args(args))
            .map_err(|e| js_err("postMessage", e))?;
        Ok(())
    }
}

/// `window.JsBridgeHelper`.
pub struct JsBridgeHelper {
    helper: JsValue,
}

impl BridgeHelper for JsBridgeHelper {
    fn has_method(&self, name: &str) -> bool {
        get_in(&self.helper, &[name]).is_some()
    }

    fn invoke(&self, name: &str, args: &[String]) -> Result<()> {
        let method = function_at(&self.helper, name)?;
        method
            .apply(&self.helper, &js_args(args))
            .map_err(|e| js_err(name, e))?;
        Ok(())
    }
}

/// Probe `window` for both host channels.
pub fn detect() -> HostBridge {
    let Some(window) = window_value() else {
        return HostBridge::Absent;
    };
    detect_in(&window)
}

/// Probe `global` (normally `window`) for both host channels.
pub fn detect_in(global: &JsValue) -> HostBridge {
    let webkit = get_in(global, &["webkit", "messageHandlers"])
        .map(|registry| Rc::new(WebKitHandlers { registry }) as Rc<dyn MessageHandlerRegistry>);
    let android = get_in(global, &["JsBridgeHelper"])
        .map(|helper| Rc::new(JsBridgeHelper { helper }) as Rc<dyn BridgeHelper>);

    let bridge = HostBridge::from_globals(webkit, android);
    tracing::info!(bridge = bridge.channel_name(), "host bridge detected");
    bridge
}

/// Current page URL, if there is a page.
pub fn location_href() -> Option<String> {
    web_sys::window()?.location().href().ok()
}

// ---------------------------------------------------------------------------
// Browser download
// ---------------------------------------------------------------------------

/// Time the object URL stays alive after the click. WebKit starts reading the
/// blob asynchronously and aborts the download if the URL is already gone.
const REVOKE_DELAY_MS: u32 = 1_000;

/// Downloads through a temporary object URL and an anchor with `download`.
pub struct BlobDownload;

impl BlobDownload {
    fn save(filename: &str, bytes: &[u8]) -> std::result::Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("no document body"))?;

        let parts = Array::new();
        parts.push(&Uint8Array::from(bytes));
        let options = BlobPropertyBag::new();
        options.set_type(PROJECT_MIME_TYPE);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
        let url = Url::create_object_url_with_blob(&blob)?;

        let anchor = document
            .create_element("a")?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| JsValue::from_str("created element is not an anchor"))?;
        anchor.set_href(&url);
        anchor.set_download(filename);

        body.append_child(&anchor)?;
        anchor.click();
        anchor.remove();

        Timeout::new(REVOKE_DELAY_MS, move || {
            if let Err(e) = Url::revoke_object_url(&url) {
                tracing::warn!(error = ?e, "failed to revoke project object url");
            }
        })
        .forget();
        Ok(())
    }
}

impl DownloadSink for BlobDownload {
    fn download<'a>(
        &'a self,
        filename: &'a ProjectFilename,
        artifact: &'a ProjectArtifact,
    ) -> LocalBoxFuture<'a, Result<()>> {
        Box::pin(async move {
            Self::save(filename.as_str(), artifact.as_bytes()).map_err(|e| {
                let detail = e.as_string().unwrap_or_else(|| format!("{e:?}"));
                SaverError::Download(detail)
            })
        })
    }
}
