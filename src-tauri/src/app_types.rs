use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use crate::launcher_actions::Launcher;

#[derive(Debug, Clone, serde::Serialize)]
pub(crate) struct StatusPayload {
    pub(crate) status: String,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LauncherView {
    pub(crate) locale: &'static str,
    pub(crate) title: &'static str,
    pub(crate) info: &'static str,
    pub(crate) schedule_label: &'static str,
    pub(crate) reminder_label: &'static str,
    pub(crate) view_label: &'static str,
    pub(crate) status: String,
}

#[derive(Debug, serde::Serialize)]
pub(crate) struct LauncherBridgeResult {
    pub(crate) ok: bool,
    pub(crate) reason: Option<String>,
}

/// Window-owned state: the launcher, the status line and the quit flag.
pub(crate) struct LauncherState {
    launcher: Launcher,
    status: Mutex<String>,
    quitting: AtomicBool,
}

impl LauncherState {
    pub(crate) fn new(launcher: Launcher) -> Self {
        let status = launcher.texts().status_ready.to_string();
        Self {
            launcher,
            status: Mutex::new(status),
            quitting: AtomicBool::new(false),
        }
    }

    pub(crate) fn launcher(&self) -> &Launcher {
        &self.launcher
    }

    pub(crate) fn status(&self) -> String {
        self.status
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub(crate) fn set_status(&self, status: &str) {
        let mut guard = self
            .status
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = status.to_string();
    }

    pub(crate) fn is_quitting(&self) -> bool {
        self.quitting.load(Ordering::Acquire)
    }

    pub(crate) fn mark_quitting(&self) {
        self.quitting.store(true, Ordering::Release);
    }

    pub(crate) fn view(&self) -> LauncherView {
        let texts = self.launcher.texts();
        LauncherView {
            locale: texts.locale,
            title: texts.window_title,
            info: texts.info,
            schedule_label: texts.button_schedule,
            reminder_label: texts.button_reminder,
            view_label: texts.button_view,
            status: self.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::harness;

    #[test]
    fn launcher_state_starts_ready_and_tracks_status() {
        let harness = harness("en-US", &[]);
        let state = LauncherState::new(harness.launcher.clone());
        assert_eq!(state.status(), "Ready");

        state.set_status("Starting web server...");
        assert_eq!(state.status(), "Starting web server...");
        assert_eq!(state.view().status, "Starting web server...");
    }

    #[test]
    fn launcher_state_quit_flag_is_sticky() {
        let harness = harness("en-US", &[]);
        let state = LauncherState::new(harness.launcher.clone());
        assert!(!state.is_quitting());
        state.mark_quitting();
        assert!(state.is_quitting());
    }

    #[test]
    fn launcher_view_serializes_with_camel_case_labels() {
        let harness = harness("zh-CN", &[]);
        let state = LauncherState::new(harness.launcher.clone());
        let value = serde_json::to_value(state.view()).expect("serialize view");
        assert_eq!(value["locale"], "zh-CN");
        assert_eq!(value["scheduleLabel"], "1. 日程操作");
        assert_eq!(value["viewLabel"], "3. 查看日程");
        assert_eq!(value["status"], "就绪");
    }
}
