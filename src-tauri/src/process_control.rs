use std::{
    io,
    path::Path,
    process::{Command, Stdio},
    thread,
};

use crate::append_action_log;

/// Spawns a program that the launcher does not own or wait for.
pub(crate) trait ServiceSpawner: Send + Sync {
    fn spawn_detached(&self, program: &Path, cwd: &Path) -> Result<u32, String>;
}

/// Spawns `command` and hands the child to a reaper thread, so the exit
/// status is logged and no zombie is left behind.
pub(crate) fn spawn_reaped(mut command: Command, label: &str) -> io::Result<u32> {
    let mut child = command.spawn()?;
    let pid = child.id();
    let label = label.to_string();

    let reaper = thread::Builder::new()
        .name(format!("reap-{pid}"))
        .spawn(move || match child.wait() {
            Ok(status) => append_action_log(&format!("{label} (pid {pid}) exited: {status}")),
            Err(error) => {
                append_action_log(&format!("failed to wait for {label} (pid {pid}): {error}"))
            }
        });
    if let Err(error) = reaper {
        append_action_log(&format!("failed to start reaper for pid {pid}: {error}"));
    }

    Ok(pid)
}

#[derive(Debug, Default)]
pub(crate) struct DetachedSpawner;

impl ServiceSpawner for DetachedSpawner {
    fn spawn_detached(&self, program: &Path, cwd: &Path) -> Result<u32, String> {
        let mut command = Command::new(program);
        command.current_dir(cwd).stdin(Stdio::null());

        // Console programs get a console of their own instead of none.
        #[cfg(target_os = "windows")]
        {
            use std::os::windows::process::CommandExt;

            const CREATE_NEW_CONSOLE: u32 = 0x0000_0010;
            command.creation_flags(CREATE_NEW_CONSOLE);
        }

        let pid = spawn_reaped(command, &program.display().to_string()).map_err(|error| {
            format!(
                "Failed to spawn {} in {}: {}",
                program.display(),
                cwd.display(),
                error
            )
        })?;
        append_action_log(&format!("spawned {} detached as pid {}", program.display(), pid));
        Ok(pid)
    }
}
