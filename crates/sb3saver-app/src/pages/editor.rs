// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Editor page: project title, load, and "Save to your computer".

use dioxus::prelude::*;

use sb3saver_core::{HostMode, size_label};

use crate::components::sb3_downloader::Sb3Downloader;
use crate::services::app_services::AppServices;
use crate::services::project::pick_project_file;
use crate::state::{AppState, StatusLine};

#[component]
pub fn Editor() -> Element {
    let svc = use_context::<AppServices>();
    let mut state = use_context::<Signal<AppState>>();

    let default_title = svc.config().default_project_title.clone();
    let filename = svc.project_filename(&state.read().project_title);
    let delivery = match svc.launch().host_mode {
        HostMode::Browser => "Saves to this device".to_string(),
        HostMode::NativeApp => format!("Sends to the app ({})", svc.bridge().channel_name()),
    };

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 12px; max-width: 480px; margin: 0 auto; padding: 16px; font-family: system-ui, -apple-system, sans-serif;",
            h1 { "Project" }
            p { style: "color: #666; font-size: 14px; margin: 0;", "{delivery}" }

            label { style: "font-size: 14px; color: #333;", "Title" }
            input {
                style: "padding: 10px; border: 1px solid #ccc; border-radius: 8px; font-size: 16px;",
                placeholder: "{default_title}",
                value: "{state.read().project_title}",
                oninput: move |evt| state.write().project_title = evt.value(),
            }
            p { style: "color: #999; font-size: 12px; margin: 0;", "File name: {filename}" }

            div { style: "display: flex; gap: 8px;",
                button {
                    style: "flex: 1; padding: 12px; border-radius: 8px; border: 1px solid #007aff; color: #007aff; background: white;",
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            let svc = svc.clone();
                            spawn(async move {
                                let Some(picked) = pick_project_file().await else {
                                    return;
                                };
                                let size = size_label(picked.bytes.len());
                                svc.project().load(picked.bytes);
                                let mut current = state.write();
                                current.status = Some(StatusLine::info(format!("Loaded {} ({size})", picked.title)));
                                current.project_title = picked.title;
                            });
                        }
                    },
                    "Load from your computer"
                }

                Sb3Downloader {
                    class_name: "menu-item",
                    on_save_finished: move |_| {
                        state.write().status = Some(StatusLine::info("Project packaged, delivering..."));
                    },
                    render: move |(class_name, download_project): (String, Callback<()>)| rsx! {
                        button {
                            class: "{class_name}",
                            style: "flex: 1; padding: 12px; border-radius: 8px; border: none; background: #007aff; color: white;",
                            disabled: state.read().is_saving(),
                            onclick: move |_| download_project.call(()),
                            if state.read().is_saving() { "Saving..." } else { "Save to your computer" }
                        }
                    },
                }
            }

            if let Some(ref status) = state.read().status {
                div { style: "margin-top: 8px; text-align: center;",
                    p { style: "color: {status.color}; font-size: 14px; margin: 0;", "{status.text}" }
                    if let Some(ref detail) = status.detail {
                        p { style: "color: #666; font-size: 12px; margin-top: 4px;", "{detail}" }
                    }
                }
            }
        }
    }
}
