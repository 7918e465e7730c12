use tauri::{AppHandle, Manager};

use crate::{append_launcher_log, LauncherBridgeResult, LauncherState, LauncherView};

fn bridge_result(result: Result<(), String>) -> LauncherBridgeResult {
    match result {
        Ok(()) => LauncherBridgeResult {
            ok: true,
            reason: None,
        },
        Err(error) => {
            append_launcher_log(&format!("bridge action rejected: {error}"));
            LauncherBridgeResult {
                ok: false,
                reason: Some(error),
            }
        }
    }
}

fn with_launcher_state<F>(app_handle: &AppHandle, action: F) -> LauncherBridgeResult
where
    F: FnOnce(&LauncherState) -> Result<(), String>,
{
    match app_handle.try_state::<LauncherState>() {
        Some(state) => bridge_result(action(&state)),
        None => bridge_result(Err("Launcher is not ready yet.".to_string())),
    }
}

#[tauri::command]
pub(crate) fn launcher_get_view(app_handle: AppHandle) -> Result<LauncherView, String> {
    app_handle
        .try_state::<LauncherState>()
        .map(|state| state.view())
        .ok_or_else(|| "Launcher is not ready yet.".to_string())
}

#[tauri::command]
pub(crate) fn launcher_open_schedule(app_handle: AppHandle) -> LauncherBridgeResult {
    with_launcher_state(&app_handle, |state| state.launcher().open_schedule())
}

#[tauri::command]
pub(crate) fn launcher_open_reminder(app_handle: AppHandle) -> LauncherBridgeResult {
    with_launcher_state(&app_handle, |state| state.launcher().open_reminder())
}

#[tauri::command]
pub(crate) fn launcher_view_schedule(app_handle: AppHandle) -> LauncherBridgeResult {
    with_launcher_state(&app_handle, |state| state.launcher().view_schedule())
}
