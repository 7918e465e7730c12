//! The launcher's three actions, the startup pre-flight and the exit prompt.
//!
//! Every action runs on its own worker thread and walks
//! `idle -> running -> {succeeded | failed}`, reporting each step through
//! the shared status line. Errors end the action locally: status text plus
//! a dialog, never a panic or a propagated error.

use std::{path::PathBuf, sync::Arc, thread, time::Duration};

use crate::{
    append_action_log,
    exit_flow,
    external_browser::{parse_openable_url, BrowserOpener, SystemBrowser},
    launcher_ui::{DialogKind, LauncherUi},
    preflight,
    process_control::{DetachedSpawner, ServiceSpawner},
    shell_locale::LauncherTexts,
    static_server::{ScheduleServer, ServerExitHook, StaticFileServer},
    terminal_launcher::{SystemTerminal, TerminalLauncher},
    REMINDER_BINARY, REQUIRED_BINARIES, SCHEDULER_BINARY, SCHEDULE_SERVER_ADDR,
    SERVER_READY_GRACE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ActionKind {
    Schedule,
    Reminder,
    ViewSchedule,
}

impl ActionKind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            ActionKind::Schedule => "schedule",
            ActionKind::Reminder => "reminder",
            ActionKind::ViewSchedule => "view-schedule",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ActionOutcome {
    Succeeded,
    Failed,
}

pub(crate) struct LauncherParts {
    pub(crate) work_dir: PathBuf,
    pub(crate) texts: LauncherTexts,
    pub(crate) ui: Arc<dyn LauncherUi>,
    pub(crate) terminal: Arc<dyn TerminalLauncher>,
    pub(crate) spawner: Arc<dyn ServiceSpawner>,
    pub(crate) browser: Arc<dyn BrowserOpener>,
    pub(crate) server: Arc<dyn ScheduleServer>,
    pub(crate) ready_grace: Duration,
}

#[derive(Clone)]
pub(crate) struct Launcher {
    work_dir: PathBuf,
    texts: LauncherTexts,
    ui: Arc<dyn LauncherUi>,
    terminal: Arc<dyn TerminalLauncher>,
    spawner: Arc<dyn ServiceSpawner>,
    browser: Arc<dyn BrowserOpener>,
    server: Arc<dyn ScheduleServer>,
    ready_grace: Duration,
}

impl Launcher {
    pub(crate) fn from_parts(parts: LauncherParts) -> Self {
        Self {
            work_dir: parts.work_dir,
            texts: parts.texts,
            ui: parts.ui,
            terminal: parts.terminal,
            spawner: parts.spawner,
            browser: parts.browser,
            server: parts.server,
            ready_grace: parts.ready_grace,
        }
    }

    /// Launcher wired to this OS: its terminal, detached spawning, the
    /// system browser and the static server on the schedule port.
    pub(crate) fn with_system_defaults(
        work_dir: PathBuf,
        texts: LauncherTexts,
        ui: Arc<dyn LauncherUi>,
    ) -> Self {
        Self::from_parts(LauncherParts {
            server: Arc::new(StaticFileServer::new(work_dir.clone(), SCHEDULE_SERVER_ADDR)),
            terminal: Arc::new(SystemTerminal::detect()),
            spawner: Arc::new(DetachedSpawner),
            browser: Arc::new(SystemBrowser),
            work_dir,
            texts,
            ui,
            ready_grace: SERVER_READY_GRACE,
        })
    }

    pub(crate) fn texts(&self) -> &LauncherTexts {
        &self.texts
    }

    /// Warns once, without blocking, about required binaries that are
    /// missing. Returns the missing names.
    pub(crate) fn preflight(&self) -> Vec<&'static str> {
        let missing = preflight::missing_required_files(&self.work_dir, &REQUIRED_BINARIES);
        if missing.is_empty() {
            append_action_log("pre-flight: all required binaries present");
            return missing;
        }

        append_action_log(&format!("pre-flight: missing {}", missing.join(", ")));
        self.ui.notify(
            DialogKind::Warning,
            self.texts.missing_files_title,
            &self.texts.missing_files(&missing),
        );
        missing
    }

    pub(crate) fn open_schedule(&self) -> Result<(), String> {
        self.start_action(ActionKind::Schedule)
    }

    pub(crate) fn open_reminder(&self) -> Result<(), String> {
        self.start_action(ActionKind::Reminder)
    }

    pub(crate) fn view_schedule(&self) -> Result<(), String> {
        self.start_action(ActionKind::ViewSchedule)
    }

    /// Runs `kind` on a detached worker thread.
    pub(crate) fn start_action(&self, kind: ActionKind) -> Result<(), String> {
        let launcher = self.clone();
        thread::Builder::new()
            .name(format!("planalyze-{}", kind.as_str()))
            .spawn(move || {
                let outcome = launcher.run_action(kind);
                append_action_log(&format!("{} action finished: {:?}", kind.as_str(), outcome));
            })
            .map(|_| ())
            .map_err(|error| format!("Failed to start {} worker: {}", kind.as_str(), error))
    }

    pub(crate) fn run_action(&self, kind: ActionKind) -> ActionOutcome {
        append_action_log(&format!("{} action running", kind.as_str()));
        match kind {
            ActionKind::Schedule => self.run_open_schedule(),
            ActionKind::Reminder => self.run_open_reminder(),
            ActionKind::ViewSchedule => self.run_view_schedule(),
        }
    }

    fn fail(&self, status: &str, message: &str) -> ActionOutcome {
        append_action_log(&format!("action failed: {message}"));
        self.ui.set_status(status);
        self.ui
            .show_dialog(DialogKind::Error, self.texts.error_title, message);
        ActionOutcome::Failed
    }

    fn run_open_schedule(&self) -> ActionOutcome {
        self.ui.set_status(self.texts.status_schedule_opening);

        let launched = preflight::require_binary(&self.work_dir, SCHEDULER_BINARY)
            .and_then(|_| {
                self.terminal
                    .launch_in_terminal(SCHEDULER_BINARY, &self.work_dir)
            });
        match launched {
            Ok(()) => {
                self.ui.set_status(self.texts.status_schedule_opened);
                ActionOutcome::Succeeded
            }
            Err(error) => self.fail(
                self.texts.status_schedule_failed,
                &self.texts.execute_error(SCHEDULER_BINARY, &error),
            ),
        }
    }

    fn run_open_reminder(&self) -> ActionOutcome {
        self.ui.set_status(self.texts.status_reminder_starting);

        let spawned = preflight::require_binary(&self.work_dir, REMINDER_BINARY)
            .and_then(|program| self.spawner.spawn_detached(&program, &self.work_dir));
        match spawned {
            Ok(pid) => {
                append_action_log(&format!("reminder service running as pid {pid}"));
                self.ui.set_status(self.texts.status_reminder_started);
                self.ui.show_dialog(
                    DialogKind::Info,
                    self.texts.success_title,
                    self.texts.reminder_started,
                );
                ActionOutcome::Succeeded
            }
            Err(error) => self.fail(
                self.texts.status_reminder_failed,
                &self.texts.execute_error(REMINDER_BINARY, &error),
            ),
        }
    }

    fn server_exit_hook(&self) -> ServerExitHook {
        let ui = Arc::clone(&self.ui);
        let texts = self.texts;
        Box::new(move |result| match result {
            Ok(()) => ui.set_status(texts.status_http_exited),
            Err(error) => ui.set_status(&texts.http_error(&error)),
        })
    }

    fn run_view_schedule(&self) -> ActionOutcome {
        self.ui.set_status(self.texts.status_web_starting);

        let opened = self
            .server
            .ensure_started(self.server_exit_hook())
            .and_then(|start| {
                let addr = start.addr();
                if !self.server.wait_until_ready(addr, self.ready_grace) {
                    append_action_log(&format!(
                        "schedule server on {addr} not reachable after {}ms; opening browser anyway",
                        self.ready_grace.as_millis()
                    ));
                }
                let url = parse_openable_url(self.texts.view_url)?;
                self.browser.open_url(&url)
            });
        match opened {
            Ok(()) => {
                self.ui.set_status(self.texts.status_web_started);
                self.ui.show_dialog(
                    DialogKind::Info,
                    self.texts.success_title,
                    &self.texts.web_started(self.texts.view_url),
                );
                ActionOutcome::Succeeded
            }
            Err(error) => self.fail(self.texts.status_web_failed, &self.texts.web_error(&error)),
        }
    }

    /// Asks before exiting; `on_confirmed` runs only when the user agrees.
    pub(crate) fn request_exit<F>(&self, on_confirmed: F)
    where
        F: FnOnce() + Send + 'static,
    {
        exit_flow::confirm_exit(self.ui.as_ref(), &self.texts, on_confirmed);
    }
}
