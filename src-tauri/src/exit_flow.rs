use crate::{append_shutdown_log, launcher_ui::LauncherUi, shell_locale::LauncherTexts};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExitDecision {
    Exit,
    StayOpen,
}

pub(crate) fn decide_exit(confirmed: bool) -> ExitDecision {
    if confirmed {
        ExitDecision::Exit
    } else {
        ExitDecision::StayOpen
    }
}

/// Prompts with the localized exit question. Started services are left
/// running either way.
pub(crate) fn confirm_exit<F>(ui: &dyn LauncherUi, texts: &LauncherTexts, on_confirmed: F)
where
    F: FnOnce() + Send + 'static,
{
    append_shutdown_log("exit requested, asking for confirmation");
    ui.confirm(
        texts.exit_title,
        texts.exit_confirm,
        Box::new(move |answer| match decide_exit(answer) {
            ExitDecision::Exit => {
                append_shutdown_log("exit confirmed");
                on_confirmed();
            }
            ExitDecision::StayOpen => append_shutdown_log("exit cancelled"),
        }),
    );
}
