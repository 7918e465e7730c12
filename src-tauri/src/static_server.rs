//! Static-file HTTP server for the schedule view.
//!
//! Serves the launcher's working directory the way a minimal "serve this
//! folder" server does: `GET`/`HEAD` only, `index.html` for directories,
//! a plain listing otherwise. Request paths never leave the root.

use std::{
    io::ErrorKind,
    net::{SocketAddr, TcpListener as StdTcpListener, TcpStream},
    path::{Component, Path, PathBuf},
    sync::{Arc, Mutex},
    thread,
    time::{Duration, Instant},
};

use axum::{
    body::Body,
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};

use crate::{append_server_log, SERVER_READY_POLL};

pub(crate) type ServerExitHook = Box<dyn FnOnce(Result<(), String>) + Send + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ServerStart {
    Started(SocketAddr),
    AlreadyRunning(SocketAddr),
}

impl ServerStart {
    pub(crate) fn addr(self) -> SocketAddr {
        match self {
            ServerStart::Started(addr) | ServerStart::AlreadyRunning(addr) => addr,
        }
    }
}

/// Starts the schedule view server, or reports the one already running.
///
/// `on_exit` is only called for a server started by this call, once its
/// serve loop ends.
pub(crate) trait ScheduleServer: Send + Sync {
    fn ensure_started(&self, on_exit: ServerExitHook) -> Result<ServerStart, String>;

    fn wait_until_ready(&self, addr: SocketAddr, grace: Duration) -> bool {
        wait_for_listener(addr, grace, SERVER_READY_POLL)
    }
}

pub(crate) fn wait_for_listener(addr: SocketAddr, grace: Duration, poll: Duration) -> bool {
    let started = Instant::now();
    loop {
        if TcpStream::connect_timeout(&addr, poll).is_ok() {
            return true;
        }
        if started.elapsed() >= grace {
            return false;
        }
        thread::sleep(poll);
    }
}

#[derive(Debug)]
pub(crate) struct StaticFileServer {
    root: Arc<PathBuf>,
    bind_addr: String,
    running: Arc<Mutex<Option<SocketAddr>>>,
}

impl StaticFileServer {
    pub(crate) fn new(root: PathBuf, bind_addr: impl Into<String>) -> Self {
        Self {
            root: Arc::new(root),
            bind_addr: bind_addr.into(),
            running: Arc::new(Mutex::new(None)),
        }
    }
}

impl ScheduleServer for StaticFileServer {
    fn ensure_started(&self, on_exit: ServerExitHook) -> Result<ServerStart, String> {
        let mut running = self
            .running
            .lock()
            .map_err(|_| "Static server lock poisoned.".to_string())?;
        if let Some(addr) = *running {
            return Ok(ServerStart::AlreadyRunning(addr));
        }

        let listener = StdTcpListener::bind(self.bind_addr.as_str())
            .map_err(|error| format!("Failed to bind {}: {}", self.bind_addr, error))?;
        listener
            .set_nonblocking(true)
            .map_err(|error| format!("Failed to configure listener {}: {}", self.bind_addr, error))?;
        let addr = listener
            .local_addr()
            .map_err(|error| format!("Failed to read listener address: {error}"))?;

        append_server_log(&format!(
            "serving {} on http://{}",
            self.root.display(),
            addr
        ));
        let router = build_router(Arc::clone(&self.root));
        let running_handle = Arc::clone(&self.running);
        tauri::async_runtime::spawn(async move {
            let result = serve(listener, router).await;
            if let Ok(mut running) = running_handle.lock() {
                *running = None;
            }
            match &result {
                Ok(()) => append_server_log(&format!("server on {addr} stopped")),
                Err(error) => append_server_log(&format!("server on {addr} failed: {error}")),
            }
            on_exit(result);
        });

        *running = Some(addr);
        Ok(ServerStart::Started(addr))
    }
}

async fn serve(listener: StdTcpListener, router: Router) -> Result<(), String> {
    let listener = tokio::net::TcpListener::from_std(listener)
        .map_err(|error| format!("Failed to register listener: {error}"))?;
    axum::serve(listener, router)
        .await
        .map_err(|error| error.to_string())
}

fn build_router(root: Arc<PathBuf>) -> Router {
    Router::new().fallback(serve_static).with_state(root)
}

async fn serve_static(State(root): State<Arc<PathBuf>>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return plain_response(StatusCode::NOT_IMPLEMENTED, "Unsupported method");
    }
    let head_only = method == Method::HEAD;

    let Some(target) = resolve_request_path(&root, uri.path()) else {
        return plain_response(StatusCode::BAD_REQUEST, "Bad request path");
    };

    let metadata = match tokio::fs::metadata(&target).await {
        Ok(metadata) => metadata,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            return plain_response(StatusCode::NOT_FOUND, "File not found");
        }
        Err(error) => {
            append_server_log(&format!("failed to stat {}: {}", target.display(), error));
            return plain_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read file");
        }
    };

    if !metadata.is_dir() {
        return file_response(&target, head_only).await;
    }

    if !uri.path().ends_with('/') {
        let location = match uri.query() {
            Some(query) => format!("{}/?{}", uri.path(), query),
            None => format!("{}/", uri.path()),
        };
        return (
            StatusCode::MOVED_PERMANENTLY,
            [(header::LOCATION, location)],
        )
            .into_response();
    }

    for index in ["index.html", "index.htm"] {
        let candidate = target.join(index);
        if tokio::fs::metadata(&candidate)
            .await
            .map(|metadata| metadata.is_file())
            .unwrap_or(false)
        {
            return file_response(&candidate, head_only).await;
        }
    }

    listing_response(&target, uri.path(), head_only).await
}

/// Maps a request path onto `root`. Empty, `.`, `..` and multi-component
/// segments are dropped; `None` when the path is not valid percent-encoded
/// UTF-8.
pub(crate) fn resolve_request_path(root: &Path, raw_path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(raw_path).ok()?;
    let mut resolved = root.to_path_buf();
    for segment in decoded.split('/') {
        if segment.contains('\0') {
            continue;
        }
        let mut components = Path::new(segment).components();
        if let (Some(Component::Normal(part)), None) = (components.next(), components.next()) {
            resolved.push(part);
        }
    }
    Some(resolved)
}

pub(crate) fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "json" => "application/json",
        "txt" => "text/plain; charset=utf-8",
        "csv" => "text/csv; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "wasm" => "application/wasm",
        _ => "application/octet-stream",
    }
}

fn plain_response(status: StatusCode, message: &'static str) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        message,
    )
        .into_response()
}

fn body_response(content_type: &'static str, bytes: Vec<u8>, head_only: bool) -> Response {
    let length = bytes.len();
    let body = if head_only {
        Body::empty()
    } else {
        Body::from(bytes)
    };
    axum::http::Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, length)
        .header(header::CACHE_CONTROL, "no-cache")
        .body(body)
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

async fn file_response(path: &Path, head_only: bool) -> Response {
    match tokio::fs::read(path).await {
        Ok(bytes) => body_response(content_type_for(path), bytes, head_only),
        Err(error) if error.kind() == ErrorKind::NotFound => {
            plain_response(StatusCode::NOT_FOUND, "File not found")
        }
        Err(error) => {
            append_server_log(&format!("failed to read {}: {}", path.display(), error));
            plain_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read file")
        }
    }
}

async fn listing_response(dir: &Path, request_path: &str, head_only: bool) -> Response {
    let mut reader = match tokio::fs::read_dir(dir).await {
        Ok(reader) => reader,
        Err(error) => {
            append_server_log(&format!("failed to list {}: {}", dir.display(), error));
            return plain_response(StatusCode::NOT_FOUND, "No permission to list directory");
        }
    };

    let mut entries = Vec::new();
    loop {
        match reader.next_entry().await {
            Ok(Some(entry)) => {
                let is_dir = entry
                    .file_type()
                    .await
                    .map(|file_type| file_type.is_dir())
                    .unwrap_or(false);
                entries.push((entry.file_name().to_string_lossy().into_owned(), is_dir));
            }
            Ok(None) => break,
            Err(error) => {
                append_server_log(&format!("failed to list {}: {}", dir.display(), error));
                break;
            }
        }
    }

    let display_path = urlencoding::decode(request_path)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| request_path.to_string());
    let html = render_directory_listing(&display_path, &mut entries);
    body_response("text/html; charset=utf-8", html.into_bytes(), head_only)
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub(crate) fn render_directory_listing(display_path: &str, entries: &mut [(String, bool)]) -> String {
    entries.sort_by_key(|(name, _)| name.to_lowercase());
    let title = escape_html(display_path);

    let mut html = format!(
        "<!DOCTYPE HTML>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Directory listing for {title}</title>\n</head>\n<body>\n\
         <h1>Directory listing for {title}</h1>\n<hr>\n<ul>\n"
    );
    for (name, is_dir) in entries.iter() {
        let suffix = if *is_dir { "/" } else { "" };
        html.push_str(&format!(
            "<li><a href=\"{}{}\">{}{}</a></li>\n",
            urlencoding::encode(name),
            suffix,
            escape_html(name),
            suffix
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}
