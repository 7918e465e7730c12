use tauri::{AppHandle, Emitter, Manager};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};

use crate::{append_launcher_log, LauncherState, StatusPayload, STATUS_EVENT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DialogKind {
    Info,
    Warning,
    Error,
}

impl From<DialogKind> for MessageDialogKind {
    fn from(kind: DialogKind) -> Self {
        match kind {
            DialogKind::Info => MessageDialogKind::Info,
            DialogKind::Warning => MessageDialogKind::Warning,
            DialogKind::Error => MessageDialogKind::Error,
        }
    }
}

pub(crate) type ConfirmCallback = Box<dyn FnOnce(bool) + Send + 'static>;

/// What the launcher needs from the window: a status line and dialogs.
pub(crate) trait LauncherUi: Send + Sync {
    fn set_status(&self, status: &str);

    /// Modal dialog; blocks the calling worker until dismissed. Never call
    /// from the UI thread.
    fn show_dialog(&self, kind: DialogKind, title: &str, message: &str);

    /// Dialog that returns immediately.
    fn notify(&self, kind: DialogKind, title: &str, message: &str);

    /// OK/Cancel prompt; `on_answer` receives `true` for OK.
    fn confirm(&self, title: &str, message: &str, on_answer: ConfirmCallback);
}

pub(crate) struct TauriLauncherUi {
    app_handle: AppHandle,
}

impl TauriLauncherUi {
    pub(crate) fn new(app_handle: AppHandle) -> Self {
        Self { app_handle }
    }
}

impl LauncherUi for TauriLauncherUi {
    fn set_status(&self, status: &str) {
        if let Some(state) = self.app_handle.try_state::<LauncherState>() {
            state.set_status(status);
        }
        let payload = StatusPayload {
            status: status.to_string(),
        };
        if let Err(error) = self.app_handle.emit(STATUS_EVENT, payload) {
            append_launcher_log(&format!("failed to emit status update: {error}"));
        }
    }

    fn show_dialog(&self, kind: DialogKind, title: &str, message: &str) {
        self.app_handle
            .dialog()
            .message(message)
            .title(title)
            .kind(kind.into())
            .blocking_show();
    }

    fn notify(&self, kind: DialogKind, title: &str, message: &str) {
        self.app_handle
            .dialog()
            .message(message)
            .title(title)
            .kind(kind.into())
            .show(|_| {});
    }

    fn confirm(&self, title: &str, message: &str, on_answer: ConfirmCallback) {
        self.app_handle
            .dialog()
            .message(message)
            .title(title)
            .kind(MessageDialogKind::Warning)
            .buttons(MessageDialogButtons::OkCancel)
            .show(on_answer);
    }
}
