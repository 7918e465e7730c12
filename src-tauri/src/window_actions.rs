use tauri::{AppHandle, Manager};

use crate::MAIN_WINDOW_LABEL;

pub fn show_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        log("show_main_window skipped: main window not found");
        return;
    };

    if let Err(error) = window.unminimize() {
        log(&format!("failed to unminimize main window: {error}"));
    }
    if let Err(error) = window.show() {
        log(&format!("failed to show main window: {error}"));
    }
    if let Err(error) = window.set_focus() {
        log(&format!("failed to focus main window: {error}"));
    }
}

pub fn set_main_window_title<F>(app_handle: &AppHandle, title: &str, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        log("set_main_window_title skipped: main window not found");
        return;
    };

    if let Err(error) = window.set_title(title) {
        log(&format!("failed to set main window title: {error}"));
    }
}
