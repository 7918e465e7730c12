use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::{append_action_log, process_control};

/// Opens a program inside a new interactive terminal session.
pub(crate) trait TerminalLauncher: Send + Sync {
    fn launch_in_terminal(&self, program: &str, cwd: &Path) -> Result<(), String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TerminalCommand {
    pub(crate) cmd: String,
    pub(crate) args: Vec<String>,
    /// Arguments are handed to the child verbatim (Windows `cmd` quoting).
    pub(crate) verbatim_args: bool,
}

impl TerminalCommand {
    pub(crate) fn to_command(&self, cwd: &Path) -> Command {
        let mut command = Command::new(&self.cmd);

        #[cfg(target_os = "windows")]
        {
            use std::os::windows::process::CommandExt;

            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            if self.verbatim_args {
                for arg in &self.args {
                    command.raw_arg(arg);
                }
            } else {
                command.args(&self.args);
            }
            command.creation_flags(CREATE_NO_WINDOW);
        }

        #[cfg(not(target_os = "windows"))]
        {
            command.args(&self.args);
        }

        command
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }

    pub(crate) fn debug_command(&self) -> Vec<String> {
        let mut parts = vec![self.cmd.clone()];
        parts.extend(self.args.clone());
        parts
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TerminalEmulator {
    GnomeTerminal,
    Konsole,
    Xfce4Terminal,
    XTerminalEmulator,
    Xterm,
}

impl TerminalEmulator {
    const SEARCH_ORDER: [TerminalEmulator; 5] = [
        TerminalEmulator::GnomeTerminal,
        TerminalEmulator::Konsole,
        TerminalEmulator::Xfce4Terminal,
        TerminalEmulator::XTerminalEmulator,
        TerminalEmulator::Xterm,
    ];

    pub(crate) fn binary(self) -> &'static str {
        match self {
            TerminalEmulator::GnomeTerminal => "gnome-terminal",
            TerminalEmulator::Konsole => "konsole",
            TerminalEmulator::Xfce4Terminal => "xfce4-terminal",
            TerminalEmulator::XTerminalEmulator => "x-terminal-emulator",
            TerminalEmulator::Xterm => "xterm",
        }
    }

    fn exec_flag(self) -> &'static str {
        match self {
            TerminalEmulator::GnomeTerminal => "--",
            TerminalEmulator::Xfce4Terminal => "-x",
            TerminalEmulator::Konsole
            | TerminalEmulator::XTerminalEmulator
            | TerminalEmulator::Xterm => "-e",
        }
    }

    /// First emulator found on `path_var`, falling back to gnome-terminal so
    /// the spawn error names a concrete program.
    pub(crate) fn detect(path_var: Option<OsString>) -> Self {
        Self::SEARCH_ORDER
            .into_iter()
            .find(|emulator| find_on_path(emulator.binary(), path_var.as_ref()).is_some())
            .unwrap_or(TerminalEmulator::GnomeTerminal)
    }
}

fn find_on_path(binary: &str, path_var: Option<&OsString>) -> Option<PathBuf> {
    env::split_paths(path_var?)
        .map(|dir| dir.join(binary))
        .find(|candidate| candidate.is_file())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TerminalFlavor {
    WindowsStart,
    MacTerminalApp,
    Emulator(TerminalEmulator),
}

#[derive(Debug)]
pub(crate) struct SystemTerminal {
    flavor: TerminalFlavor,
}

impl SystemTerminal {
    pub(crate) fn detect() -> Self {
        let flavor = if cfg!(target_os = "windows") {
            TerminalFlavor::WindowsStart
        } else if cfg!(target_os = "macos") {
            TerminalFlavor::MacTerminalApp
        } else {
            TerminalFlavor::Emulator(TerminalEmulator::detect(env::var_os("PATH")))
        };
        Self { flavor }
    }

    pub(crate) fn plan(&self, program: &str, cwd: &Path) -> Result<TerminalCommand, String> {
        match self.flavor {
            TerminalFlavor::WindowsStart => Ok(windows_start_plan(program, cwd)),
            TerminalFlavor::MacTerminalApp => mac_terminal_plan(program, cwd),
            TerminalFlavor::Emulator(emulator) => emulator_plan(emulator, program, cwd),
        }
    }
}

impl TerminalLauncher for SystemTerminal {
    fn launch_in_terminal(&self, program: &str, cwd: &Path) -> Result<(), String> {
        let plan = self.plan(program, cwd)?;
        append_action_log(&format!(
            "opening terminal for {} with command {:?}",
            program,
            plan.debug_command()
        ));
        process_control::spawn_reaped(plan.to_command(cwd), &plan.cmd)
            .map(|_| ())
            .map_err(|error| {
                format!(
                    "Failed to open terminal with command {:?}: {}",
                    plan.debug_command(),
                    error
                )
            })
    }
}

fn windows_start_plan(program: &str, cwd: &Path) -> TerminalCommand {
    TerminalCommand {
        cmd: "cmd".to_string(),
        args: vec![
            "/C".to_string(),
            "start".to_string(),
            "cmd".to_string(),
            "/K".to_string(),
            format!("\"cd /d \"{}\" && {}\"", cwd.display(), program),
        ],
        verbatim_args: true,
    }
}

fn shell_line(program: &str, cwd: &Path) -> Result<String, String> {
    let cwd = cwd.to_string_lossy();
    let quoted_cwd = shlex::try_quote(&cwd)
        .map_err(|error| format!("Cannot quote working directory {cwd}: {error}"))?;
    let local_program = format!("./{program}");
    let quoted_program = shlex::try_quote(&local_program)
        .map_err(|error| format!("Cannot quote program {program}: {error}"))?;
    Ok(format!("cd {quoted_cwd} && {quoted_program}"))
}

fn emulator_plan(
    emulator: TerminalEmulator,
    program: &str,
    cwd: &Path,
) -> Result<TerminalCommand, String> {
    // `exec bash` keeps the window open once the program returns.
    let line = format!("{}; exec bash", shell_line(program, cwd)?);
    Ok(TerminalCommand {
        cmd: emulator.binary().to_string(),
        args: vec![
            emulator.exec_flag().to_string(),
            "bash".to_string(),
            "-c".to_string(),
            line,
        ],
        verbatim_args: false,
    })
}

fn applescript_string(raw: &str) -> String {
    format!("\"{}\"", raw.replace('\\', "\\\\").replace('"', "\\\""))
}

fn mac_terminal_plan(program: &str, cwd: &Path) -> Result<TerminalCommand, String> {
    let line = shell_line(program, cwd)?;
    Ok(TerminalCommand {
        cmd: "osascript".to_string(),
        args: vec![
            "-e".to_string(),
            "tell application \"Terminal\"".to_string(),
            "-e".to_string(),
            "activate".to_string(),
            "-e".to_string(),
            format!("do script {}", applescript_string(&line)),
            "-e".to_string(),
            "end tell".to_string(),
        ],
        verbatim_args: false,
    })
}
