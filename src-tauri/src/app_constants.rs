use std::time::Duration;

pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
pub(crate) const STATUS_EVENT: &str = "launcher://status";
pub(crate) const DEFAULT_SHELL_LOCALE: &str = "en-US";

pub(crate) const SCHEDULER_BINARY: &str = "planalyze.exe";
pub(crate) const REMINDER_BINARY: &str = "server.exe";
pub(crate) const REQUIRED_BINARIES: [&str; 2] = [SCHEDULER_BINARY, REMINDER_BINARY];

pub(crate) const SCHEDULE_SERVER_ADDR: &str = "127.0.0.1:8000";
pub(crate) const VIEW_URL_EN: &str = "http://localhost:8000/index-en.html";
pub(crate) const VIEW_URL_ZH: &str = "http://localhost:8000";
pub(crate) const SERVER_READY_GRACE: Duration = Duration::from_secs(2);
pub(crate) const SERVER_READY_POLL: Duration = Duration::from_millis(100);

pub(crate) const LAUNCHER_ROOT_DIR_NAME: &str = ".planalyze";
pub(crate) const LAUNCHER_LOG_FILE: &str = "launcher.log";
pub(crate) const DEFAULT_LOG_FILTER: &str = "info";
