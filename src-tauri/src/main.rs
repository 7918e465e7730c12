#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_runtime;
mod app_types;
mod desktop_bridge_commands;
mod exit_flow;
mod external_browser;
mod launcher_actions;
mod launcher_ui;
mod logging;
mod preflight;
mod process_control;
mod runtime_paths;
mod shell_locale;
mod static_server;
mod terminal_launcher;
#[cfg(test)]
mod test_support;
mod window_actions;

pub(crate) use app_constants::*;
pub(crate) use app_types::{LauncherBridgeResult, LauncherState, LauncherView, StatusPayload};
pub(crate) use logging::{
    append_action_log, append_launcher_log, append_server_log, append_shutdown_log,
};

fn main() {
    app_runtime::run();
}
