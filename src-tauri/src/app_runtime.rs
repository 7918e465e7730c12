use std::sync::Arc;

use tauri::{Manager, RunEvent, WindowEvent};

use crate::{
    append_launcher_log, append_shutdown_log, launcher_actions::Launcher,
    launcher_ui::TauriLauncherUi, logging, runtime_paths, shell_locale, window_actions,
    LauncherState, DEFAULT_SHELL_LOCALE, LAUNCHER_LOG_FILE, MAIN_WINDOW_LABEL,
};

pub(crate) fn run() {
    let log_path = logging::resolve_launcher_log_path(
        runtime_paths::default_launcher_root_dir(),
        LAUNCHER_LOG_FILE,
    );
    let log_init = logging::init_logging(&log_path);

    append_launcher_log("launcher process starting");
    match log_init {
        Ok(()) => append_launcher_log(&format!("launcher log path: {}", log_path.display())),
        Err(error) => append_launcher_log(&format!("file logging disabled: {error}")),
    }

    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app_handle, _args, _cwd| {
            append_launcher_log("second launch detected, focusing existing window");
            window_actions::show_main_window(app_handle, append_launcher_log);
        }))
        .plugin(tauri_plugin_dialog::init())
        .invoke_handler(tauri::generate_handler![
            crate::desktop_bridge_commands::launcher_get_view,
            crate::desktop_bridge_commands::launcher_open_schedule,
            crate::desktop_bridge_commands::launcher_open_reminder,
            crate::desktop_bridge_commands::launcher_view_schedule,
        ])
        .on_window_event(|window, event| {
            if window.label() != MAIN_WINDOW_LABEL {
                return;
            }

            if let WindowEvent::CloseRequested { api, .. } = event {
                let app_handle = window.app_handle();
                let Some(state) = app_handle.try_state::<LauncherState>() else {
                    return;
                };
                if state.is_quitting() {
                    return;
                }

                api.prevent_close();
                let exit_handle = app_handle.clone();
                state.launcher().request_exit(move || {
                    if let Some(state) = exit_handle.try_state::<LauncherState>() {
                        state.mark_quitting();
                    }
                    exit_handle.exit(0);
                });
            }
        })
        .setup(|app| {
            let app_handle = app.handle().clone();
            let locale = shell_locale::resolve_shell_locale(DEFAULT_SHELL_LOCALE);
            let texts = shell_locale::launcher_texts_for_locale(locale);
            let work_dir = runtime_paths::launcher_work_dir();
            append_launcher_log(&format!(
                "locale={} work_dir={}",
                texts.locale,
                work_dir.display()
            ));

            let ui = Arc::new(TauriLauncherUi::new(app_handle.clone()));
            let launcher = Launcher::with_system_defaults(work_dir, texts, ui);
            app.manage(LauncherState::new(launcher.clone()));

            window_actions::set_main_window_title(
                &app_handle,
                texts.window_title,
                append_launcher_log,
            );
            launcher.preflight();
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|_app_handle, event| {
            if let RunEvent::Exit = event {
                append_shutdown_log("launcher exiting; started services keep running");
            }
        });
}
