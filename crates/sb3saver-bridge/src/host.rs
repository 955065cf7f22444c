// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host bridge: which native messaging channel the page is embedded behind,
// and how a method name resolves to a callable on it.

use std::rc::Rc;

use sb3saver_core::error::Result;
use sb3saver_core::{AppDownloadOptions, BridgeChannel};

use crate::traits::{BridgeHelper, MessageHandlerRegistry};

/// Native method that receives a saved project.
pub const APPDOWNLOAD_METHOD: &str = "appdownload";

/// Native messaging channel detected once at startup.
#[derive(Clone, Default)]
pub enum HostBridge {
    /// Plain browser or desktop window. Every lookup misses.
    #[default]
    Absent,
    /// WKWebView message handlers. `fallback` is an Android-style helper that
    /// was also present; it answers methods the registry does not have.
    WebKit {
        handlers: Rc<dyn MessageHandlerRegistry>,
        fallback: Option<Rc<dyn BridgeHelper>>,
    },
    /// Android-style helper object.
    Android(Rc<dyn BridgeHelper>),
}

impl std::fmt::Debug for HostBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absent => f.write_str("HostBridge::Absent"),
            Self::WebKit { fallback, .. } => f
                .debug_struct("HostBridge::WebKit")
                .field("fallback", &fallback.is_some())
                .finish(),
            Self::Android(_) => f.write_str("HostBridge::Android"),
        }
    }
}

impl HostBridge {
    /// Build the bridge from whichever host objects were found.
    ///
    /// The WebKit registry takes priority; an Android helper found alongside
    /// it is kept as the fallback.
    pub fn from_globals(
        webkit: Option<Rc<dyn MessageHandlerRegistry>>,
        android: Option<Rc<dyn BridgeHelper>>,
    ) -> Self {
        match (webkit, android) {
            (Some(handlers), fallback) => Self::WebKit { handlers, fallback },
            (None, Some(helper)) => Self::Android(helper),
            (None, None) => Self::Absent,
        }
    }

    /// Short name for logs.
    pub fn channel_name(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::WebKit { .. } => "webkit",
            Self::Android(_) => "android",
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Resolve `name` to a callable native method.
    ///
    /// WebKit handlers are checked first, then the Android-style helper.
    /// Returns `None` when neither exposes the method.
    pub fn resolve_method<'a>(&'a self, name: &'a str) -> Option<BridgeMethod<'a>> {
        let target = match self {
            Self::Absent => None,
            Self::WebKit { handlers, fallback } => {
                if handlers.has_handler(name) {
                    Some(MethodTarget::WebKit(handlers.as_ref()))
                } else {
                    fallback
                        .as_deref()
                        .filter(|helper| helper.has_method(name))
                        .map(|helper| MethodTarget::Android(helper))
                }
            }
            Self::Android(helper) => helper
                .has_method(name)
                .then_some(MethodTarget::Android(helper.as_ref())),
        };

        target.map(|target| BridgeMethod { name, target })
    }

    /// Send a saved project to the native host.
    ///
    /// The options are JSON-encoded and passed as the single argument of the
    /// `appdownload` method. A host without that method is not an error: the
    /// call is skipped and [`BridgeOutcome::Unavailable`] is returned.
    pub fn appdownload(&self, options: &AppDownloadOptions) -> Result<BridgeOutcome> {
        let Some(method) = self.resolve_method(APPDOWNLOAD_METHOD) else {
            tracing::debug!(bridge = self.channel_name(), "appdownload not exposed by host, skipping");
            return Ok(BridgeOutcome::Unavailable);
        };

        let payload = options.to_json()?;
        method.call(vec![payload])?;
        Ok(BridgeOutcome::Delivered(method.channel()))
    }
}

enum MethodTarget<'a> {
    WebKit(&'a dyn MessageHandlerRegistry),
    Android(&'a dyn BridgeHelper),
}

/// A native method resolved against the host bridge.
pub struct BridgeMethod<'a> {
    name: &'a str,
    target: MethodTarget<'a>,
}

impl BridgeMethod<'_> {
    /// Channel the call will go through.
    pub fn channel(&self) -> BridgeChannel {
        match self.target {
            MethodTarget::WebKit(_) => BridgeChannel::WebKit,
            MethodTarget::Android(_) => BridgeChannel::Android,
        }
    }

    /// Forward `args` to the native method.
    ///
    /// WebKit handlers accept exactly one argument, so an empty argument list
    /// is sent as a single empty string.
    pub fn call(&self, mut args: Vec<String>) -> Result<()> {
        match self.target {
            MethodTarget::WebKit(handlers) => {
                if args.is_empty() {
                    args.push(String::new());
                }
                tracing::debug!(method = self.name, argc = args.len(), "posting to webkit handler");
                handlers.post_message(self.name, &args)
            }
            MethodTarget::Android(helper) => {
                tracing::debug!(method = self.name, argc = args.len(), "invoking android helper");
                helper.invoke(self.name, &args)
            }
        }
    }
}

/// What `appdownload` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeOutcome {
    /// The host received the payload on this channel.
    Delivered(BridgeChannel),
    /// The host exposes no `appdownload` method; nothing was sent.
    Unavailable,
}
