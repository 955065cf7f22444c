// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// sb3saver: save the block editor project to .sb3 or hand it to the host app.
//
// Entry point. Initialises logging, resolves services once, and launches the
// Dioxus UI.

mod components;
mod pages;
mod services;
mod state;

use dioxus::prelude::*;

use pages::editor::Editor;
use services::app_services::AppServices;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("sb3saver starting");

    dioxus::launch(app);
}

/// Root component.
fn app() -> Element {
    // Config, launch mode, and host bridge are resolved exactly once
    let svc = use_hook(AppServices::init);

    use_context_provider(|| svc.clone());
    use_context_provider(|| Signal::new(state::AppState::default()));

    rsx! {
        Editor {}
    }
}
