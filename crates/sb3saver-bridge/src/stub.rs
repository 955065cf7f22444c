// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-process host channels for desktop and CI builds where no WebView host
// exists.
//
// Both recorders keep every call they receive, so a desktop build configured
// with a simulated host can exercise the native delivery path end to end.

use std::cell::RefCell;
use std::collections::BTreeSet;

use sb3saver_core::error::{Result, SaverError};

use crate::traits::{BridgeHelper, MessageHandlerRegistry};

/// A call received by a recording channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: String,
    pub args: Vec<String>,
}

#[derive(Debug, Default)]
struct Recorder {
    methods: BTreeSet<String>,
    calls: RefCell<Vec<RecordedCall>>,
    failure: Option<String>,
}

impl Recorder {
    fn new<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            methods: methods.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    fn has(&self, name: &str) -> bool {
        self.methods.contains(name)
    }

    fn record(&self, channel: &str, name: &str, args: &[String]) -> Result<()> {
        if !self.has(name) {
            return Err(SaverError::Bridge(format!("{channel} has no method '{name}'")));
        }
        tracing::info!(
            channel,
            method = name,
            argc = args.len(),
            bytes = args.iter().map(String::len).sum::<usize>(),
            "simulated host received call"
        );
        self.calls.borrow_mut().push(RecordedCall {
            method: name.to_owned(),
            args: args.to_vec(),
        });
        match &self.failure {
            Some(message) => Err(SaverError::Bridge(message.clone())),
            None => Ok(()),
        }
    }
}

/// Recording stand-in for `window.webkit.messageHandlers`.
#[derive(Debug, Default)]
pub struct RecordingHandlers {
    inner: Recorder,
}

impl RecordingHandlers {
    /// Registry with a handler for each of `methods`.
    pub fn new<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner: Recorder::new(methods),
        }
    }

    /// Make every `postMessage` fail with `message` after recording it.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.inner.failure = Some(message.into());
        self
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.calls.borrow().clone()
    }
}

impl MessageHandlerRegistry for RecordingHandlers {
    fn has_handler(&self, name: &str) -> bool {
        self.inner.has(name)
    }

    fn post_message(&self, name: &str, args: &[String]) -> Result<()> {
        self.inner.record("webkit", name, args)
    }
}

/// Recording stand-in for `window.JsBridgeHelper`.
#[derive(Debug, Default)]
pub struct RecordingHelper {
    inner: Recorder,
}

impl RecordingHelper {
    /// Helper exposing each of `methods`.
    pub fn new<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner: Recorder::new(methods),
        }
    }

    /// Make every invocation fail with `message` after recording it.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.inner.failure = Some(message.into());
        self
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.calls.borrow().clone()
    }
}

impl BridgeHelper for RecordingHelper {
    fn has_method(&self, name: &str) -> bool {
        self.inner.has(name)
    }

    fn invoke(&self, name: &str, args: &[String]) -> Result<()> {
        self.inner.record("android", name, args)
    }
}
