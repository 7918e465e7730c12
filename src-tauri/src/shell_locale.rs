use std::env;

use crate::{VIEW_URL_EN, VIEW_URL_ZH};

#[derive(Debug, Clone, Copy)]
pub struct LauncherTexts {
    pub locale: &'static str,
    pub window_title: &'static str,
    pub info: &'static str,
    pub button_schedule: &'static str,
    pub button_reminder: &'static str,
    pub button_view: &'static str,
    pub status_ready: &'static str,
    pub missing_files_title: &'static str,
    pub missing_files_message: &'static str,
    pub missing_files_separator: &'static str,
    pub status_schedule_opening: &'static str,
    pub status_schedule_opened: &'static str,
    pub status_schedule_failed: &'static str,
    pub status_reminder_starting: &'static str,
    pub status_reminder_started: &'static str,
    pub status_reminder_failed: &'static str,
    pub status_web_starting: &'static str,
    pub status_web_started: &'static str,
    pub status_web_failed: &'static str,
    pub status_http_exited: &'static str,
    pub status_http_error: &'static str,
    pub success_title: &'static str,
    pub error_title: &'static str,
    pub execute_error: &'static str,
    pub reminder_started: &'static str,
    pub web_error: &'static str,
    pub web_started: &'static str,
    pub exit_title: &'static str,
    pub exit_confirm: &'static str,
    pub view_url: &'static str,
}

const EN_US_TEXTS: LauncherTexts = LauncherTexts {
    locale: "en-US",
    window_title: "Planalyze Schedule Management System",
    info: "Welcome to Planalyze! Please select the function you need:",
    button_schedule: "1. Schedule Operations",
    button_reminder: "2. Open Reminders",
    button_view: "3. View Schedule",
    status_ready: "Ready",
    missing_files_title: "Missing Files",
    missing_files_message: "The following files are missing:\n{files}\n\nPlease ensure these files are in the current directory.",
    missing_files_separator: ", ",
    status_schedule_opening: "Opening schedule operations...",
    status_schedule_opened: "Schedule operations opened",
    status_schedule_failed: "Error: Unable to open schedule operations",
    status_reminder_starting: "Starting reminder service...",
    status_reminder_started: "Reminder service started",
    status_reminder_failed: "Error: Unable to start reminder service",
    status_web_starting: "Starting web server...",
    status_web_started: "Web server started, browser opened",
    status_web_failed: "Error: Unable to start web server",
    status_http_exited: "HTTP server exited abnormally",
    status_http_error: "HTTP server error: {error}",
    success_title: "Success",
    error_title: "Error",
    execute_error: "Unable to execute {program}: {error}",
    reminder_started: "Reminder service started!",
    web_error: "Unable to start web server: {error}",
    web_started: "Web server started!\nBrowser will automatically open {url}",
    exit_title: "Exit",
    exit_confirm: "Are you sure you want to exit Planalyze?",
    view_url: VIEW_URL_EN,
};

const ZH_CN_TEXTS: LauncherTexts = LauncherTexts {
    locale: "zh-CN",
    window_title: "Planalyze 日程管理系统",
    info: "欢迎使用Planalyze！请选择您需要的功能：",
    button_schedule: "1. 日程操作",
    button_reminder: "2. 打开提醒",
    button_view: "3. 查看日程",
    status_ready: "就绪",
    missing_files_title: "文件缺失",
    missing_files_message: "以下文件不存在：\n{files}\n\n请确保这些文件在当前目录下。",
    missing_files_separator: "、",
    status_schedule_opening: "正在打开日程操作...",
    status_schedule_opened: "日程操作已打开",
    status_schedule_failed: "错误：无法打开日程操作",
    status_reminder_starting: "正在启动提醒服务...",
    status_reminder_started: "提醒服务已启动",
    status_reminder_failed: "错误：无法启动提醒服务",
    status_web_starting: "正在启动Web服务器...",
    status_web_started: "Web服务器已启动，浏览器已打开",
    status_web_failed: "错误：无法启动Web服务器",
    status_http_exited: "HTTP服务器异常退出",
    status_http_error: "HTTP服务器错误：{error}",
    success_title: "成功",
    error_title: "错误",
    execute_error: "无法执行{program}：{error}",
    reminder_started: "提醒服务已启动！",
    web_error: "无法启动Web服务器：{error}",
    web_started: "Web服务器已启动！\n浏览器将自动打开{url}",
    exit_title: "退出",
    exit_confirm: "确定要退出Planalyze吗？",
    view_url: VIEW_URL_ZH,
};

pub fn launcher_texts_for_locale(locale: &str) -> LauncherTexts {
    if locale == "zh-CN" {
        return ZH_CN_TEXTS;
    }

    EN_US_TEXTS
}

impl LauncherTexts {
    pub fn missing_files(&self, missing: &[&str]) -> String {
        render(
            self.missing_files_message,
            &[("files", &missing.join(self.missing_files_separator))],
        )
    }

    pub fn execute_error(&self, program: &str, error: &str) -> String {
        render(self.execute_error, &[("program", program), ("error", error)])
    }

    pub fn web_error(&self, error: &str) -> String {
        render(self.web_error, &[("error", error)])
    }

    pub fn web_started(&self, url: &str) -> String {
        render(self.web_started, &[("url", url)])
    }

    pub fn http_error(&self, error: &str) -> String {
        render(self.status_http_error, &[("error", error)])
    }
}

fn render(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |rendered, (key, value)| {
            rendered.replace(&format!("{{{key}}}"), value)
        })
}

pub fn resolve_shell_locale(default_shell_locale: &'static str) -> &'static str {
    for env_key in ["LC_ALL", "LC_MESSAGES", "LANG"] {
        if let Ok(value) = env::var(env_key) {
            if let Some(locale) = normalize_shell_locale(&value) {
                return locale;
            }
        }
    }

    default_shell_locale
}

pub(crate) fn normalize_shell_locale(raw: &str) -> Option<&'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw == "zh-CN" {
        return Some("zh-CN");
    }
    if raw == "en-US" {
        return Some("en-US");
    }

    let lowered = raw.to_ascii_lowercase();
    if lowered.starts_with("zh") {
        return Some("zh-CN");
    }
    if lowered.starts_with("en") {
        return Some("en-US");
    }
    None
}
