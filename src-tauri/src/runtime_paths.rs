use std::{env, path::PathBuf};

use crate::LAUNCHER_ROOT_DIR_NAME;

pub(crate) fn default_launcher_root_dir() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(LAUNCHER_ROOT_DIR_NAME))
}

/// Directory the launcher checks for its binaries and serves over HTTP.
pub(crate) fn launcher_work_dir() -> PathBuf {
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
