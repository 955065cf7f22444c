// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Project saver component.
//
// Renders nothing of its own. It hands its `render` function a class name and
// a `download_project` callback, so any control can become a save button:
//
//     Sb3Downloader {
//         render: move |(class_name, download_project): (String, Callback<()>)| rsx! {
//             button { class: "{class_name}", onclick: move |_| download_project.call(()), "Save" }
//         }
//     }

use dioxus::prelude::*;

use crate::services::app_services::AppServices;
use crate::state::{AppState, StatusLine};

/// `class_name` is passed through to `render` unchanged. `on_save_finished`
/// runs once the archive exists, before it is delivered.
#[component]
pub fn Sb3Downloader(
    #[props(default)] class_name: String,
    on_save_finished: Option<EventHandler<()>>,
    render: Callback<(String, Callback<()>), Element>,
) -> Element {
    let svc = use_context::<AppServices>();
    let mut state = use_context::<Signal<AppState>>();

    let download_project = use_callback(move |_: ()| {
        let downloader = svc.downloader();
        let filename = svc.project_filename(&state.read().project_title);
        state.write().saves_in_flight += 1;

        spawn(async move {
            let finished = move || {
                if let Some(handler) = on_save_finished {
                    handler.call(());
                }
            };
            let result = downloader.download_project(filename, Some(&finished)).await;

            let mut current = state.write();
            current.saves_in_flight = current.saves_in_flight.saturating_sub(1);
            current.status = Some(match result {
                Ok(receipt) => StatusLine::saved(&receipt),
                Err(e) => StatusLine::failed(&e),
            });
        });
    });

    render.call((class_name, download_project))
}
