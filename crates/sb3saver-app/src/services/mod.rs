// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer: bridges the Dioxus UI to the saver and host bridge crates.

pub mod app_services;
pub mod downloader;
pub mod project;

#[cfg(not(target_arch = "wasm32"))]
pub mod data_dir;
#[cfg(not(target_arch = "wasm32"))]
pub mod desktop_download;
