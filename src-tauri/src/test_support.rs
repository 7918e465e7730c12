//! Recording fakes for the launcher's seams, shared by unit tests.

use std::{
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::Duration,
};

use tempfile::TempDir;
use url::Url;

use crate::{
    external_browser::BrowserOpener,
    launcher_actions::{Launcher, LauncherParts},
    launcher_ui::{ConfirmCallback, DialogKind, LauncherUi},
    process_control::ServiceSpawner,
    shell_locale::launcher_texts_for_locale,
    static_server::{ScheduleServer, ServerExitHook, ServerStart},
    terminal_launcher::TerminalLauncher,
    SCHEDULE_SERVER_ADDR,
};

fn locked<T: Clone>(mutex: &Mutex<T>) -> T {
    mutex.lock().expect("fake state lock").clone()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedDialog {
    pub(crate) kind: DialogKind,
    pub(crate) title: String,
    pub(crate) message: String,
    pub(crate) blocking: bool,
}

#[derive(Default)]
pub(crate) struct RecordingUi {
    statuses: Mutex<Vec<String>>,
    dialogs: Mutex<Vec<RecordedDialog>>,
    confirm_prompts: Mutex<Vec<(String, String)>>,
    confirm_answer: bool,
}

impl RecordingUi {
    pub(crate) fn answering(confirm_answer: bool) -> Self {
        Self {
            confirm_answer,
            ..Self::default()
        }
    }

    pub(crate) fn statuses(&self) -> Vec<String> {
        locked(&self.statuses)
    }

    pub(crate) fn last_status(&self) -> Option<String> {
        self.statuses().pop()
    }

    pub(crate) fn dialogs(&self) -> Vec<RecordedDialog> {
        locked(&self.dialogs)
    }

    pub(crate) fn confirm_prompts(&self) -> Vec<(String, String)> {
        locked(&self.confirm_prompts)
    }

    fn record_dialog(&self, kind: DialogKind, title: &str, message: &str, blocking: bool) {
        self.dialogs
            .lock()
            .expect("dialog lock")
            .push(RecordedDialog {
                kind,
                title: title.to_string(),
                message: message.to_string(),
                blocking,
            });
    }
}

impl LauncherUi for RecordingUi {
    fn set_status(&self, status: &str) {
        self.statuses
            .lock()
            .expect("status lock")
            .push(status.to_string());
    }

    fn show_dialog(&self, kind: DialogKind, title: &str, message: &str) {
        self.record_dialog(kind, title, message, true);
    }

    fn notify(&self, kind: DialogKind, title: &str, message: &str) {
        self.record_dialog(kind, title, message, false);
    }

    fn confirm(&self, title: &str, message: &str, on_answer: ConfirmCallback) {
        self.confirm_prompts
            .lock()
            .expect("confirm lock")
            .push((title.to_string(), message.to_string()));
        on_answer(self.confirm_answer);
    }
}

pub(crate) struct FakeTerminal {
    result: Result<(), String>,
    calls: Mutex<Vec<(String, PathBuf)>>,
}

impl FakeTerminal {
    pub(crate) fn calls(&self) -> Vec<(String, PathBuf)> {
        locked(&self.calls)
    }
}

impl TerminalLauncher for FakeTerminal {
    fn launch_in_terminal(&self, program: &str, cwd: &Path) -> Result<(), String> {
        self.calls
            .lock()
            .expect("terminal lock")
            .push((program.to_string(), cwd.to_path_buf()));
        self.result.clone()
    }
}

pub(crate) struct FakeSpawner {
    result: Result<u32, String>,
    calls: Mutex<Vec<(PathBuf, PathBuf)>>,
}

impl FakeSpawner {
    pub(crate) fn calls(&self) -> Vec<(PathBuf, PathBuf)> {
        locked(&self.calls)
    }
}

impl ServiceSpawner for FakeSpawner {
    fn spawn_detached(&self, program: &Path, cwd: &Path) -> Result<u32, String> {
        self.calls
            .lock()
            .expect("spawner lock")
            .push((program.to_path_buf(), cwd.to_path_buf()));
        self.result.clone()
    }
}

pub(crate) struct FakeBrowser {
    result: Result<(), String>,
    opened: Mutex<Vec<String>>,
}

impl FakeBrowser {
    pub(crate) fn opened(&self) -> Vec<String> {
        locked(&self.opened)
    }
}

impl BrowserOpener for FakeBrowser {
    fn open_url(&self, url: &Url) -> Result<(), String> {
        self.opened
            .lock()
            .expect("browser lock")
            .push(url.to_string());
        self.result.clone()
    }
}

pub(crate) struct FakeServer {
    start: Result<ServerStart, String>,
    ready: bool,
    start_calls: Mutex<usize>,
    exit_hooks: Mutex<Vec<ServerExitHook>>,
}

impl FakeServer {
    pub(crate) fn start_calls(&self) -> usize {
        locked(&self.start_calls)
    }

    /// Ends every "running" server with `result`.
    pub(crate) fn finish(&self, result: Result<(), String>) {
        let hooks = std::mem::take(&mut *self.exit_hooks.lock().expect("hook lock"));
        for hook in hooks {
            hook(result.clone());
        }
    }
}

impl ScheduleServer for FakeServer {
    fn ensure_started(&self, on_exit: ServerExitHook) -> Result<ServerStart, String> {
        *self.start_calls.lock().expect("start lock") += 1;
        if let Ok(ServerStart::Started(_)) = &self.start {
            self.exit_hooks.lock().expect("hook lock").push(on_exit);
        }
        self.start.clone()
    }

    fn wait_until_ready(&self, _addr: SocketAddr, _grace: Duration) -> bool {
        self.ready
    }
}

/// Knobs for the fakes before the launcher is assembled.
pub(crate) struct FakeConfig {
    pub(crate) terminal_result: Result<(), String>,
    pub(crate) spawner_result: Result<u32, String>,
    pub(crate) browser_result: Result<(), String>,
    pub(crate) server_start: Result<ServerStart, String>,
    pub(crate) server_ready: bool,
    pub(crate) confirm_answer: bool,
}

impl Default for FakeConfig {
    fn default() -> Self {
        let addr = SCHEDULE_SERVER_ADDR
            .parse()
            .expect("schedule server addr");
        Self {
            terminal_result: Ok(()),
            spawner_result: Ok(4242),
            browser_result: Ok(()),
            server_start: Ok(ServerStart::Started(addr)),
            server_ready: true,
            confirm_answer: false,
        }
    }
}

pub(crate) struct Harness {
    pub(crate) launcher: Launcher,
    pub(crate) ui: Arc<RecordingUi>,
    pub(crate) terminal: Arc<FakeTerminal>,
    pub(crate) spawner: Arc<FakeSpawner>,
    pub(crate) browser: Arc<FakeBrowser>,
    pub(crate) server: Arc<FakeServer>,
    work_dir: TempDir,
}

impl Harness {
    pub(crate) fn work_dir(&self) -> PathBuf {
        self.work_dir.path().to_path_buf()
    }
}

pub(crate) fn harness(locale: &str, binaries: &[&str]) -> Harness {
    harness_with(locale, binaries, |_| {})
}

/// Launcher over a temp working directory holding `binaries`, with every
/// outside effect replaced by a recording fake.
pub(crate) fn harness_with(
    locale: &str,
    binaries: &[&str],
    configure: impl FnOnce(&mut FakeConfig),
) -> Harness {
    let mut config = FakeConfig::default();
    configure(&mut config);

    let work_dir = tempfile::tempdir().expect("tempdir");
    for binary in binaries {
        fs::write(work_dir.path().join(binary), b"stub").expect("write binary stub");
    }

    let ui = Arc::new(RecordingUi::answering(config.confirm_answer));
    let terminal = Arc::new(FakeTerminal {
        result: config.terminal_result,
        calls: Mutex::new(Vec::new()),
    });
    let spawner = Arc::new(FakeSpawner {
        result: config.spawner_result,
        calls: Mutex::new(Vec::new()),
    });
    let browser = Arc::new(FakeBrowser {
        result: config.browser_result,
        opened: Mutex::new(Vec::new()),
    });
    let server = Arc::new(FakeServer {
        start: config.server_start,
        ready: config.server_ready,
        start_calls: Mutex::new(0),
        exit_hooks: Mutex::new(Vec::new()),
    });

    let launcher = Launcher::from_parts(LauncherParts {
        work_dir: work_dir.path().to_path_buf(),
        texts: launcher_texts_for_locale(locale),
        ui: ui.clone(),
        terminal: terminal.clone(),
        spawner: spawner.clone(),
        browser: browser.clone(),
        server: server.clone(),
        ready_grace: Duration::from_millis(10),
    });

    Harness {
        launcher,
        ui,
        terminal,
        spawner,
        browser,
        server,
        work_dir,
    }
}
