//! HTTP server for the browser viewer
//!
//! `tfbs-explorer serve` → starts server, prints the URL, serves the viewer
//!
//! Requests are handled one at a time on the calling thread, which owns the
//! explorer session outright.

use crate::dataset::CellKey;
use crate::explorer::msg::Msg;
use crate::explorer::state::Phase;
use crate::explorer::Explorer;
use crate::render::{page, Scene, Size};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::Read;
use tiny_http::{Header, Method, Request, Response, Server};

#[derive(Serialize)]
struct ApiResponse<T> {
    ok: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn failure(error: String) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Session summary plus the surfaces rendered for one request
#[derive(Debug, Serialize)]
pub struct SceneResponse {
    pub title: String,
    pub tf_count: usize,
    pub tf_counts: Vec<usize>,
    pub phase: Phase,
    pub status: &'static str,
    pub pinned: Option<CellKey>,
    pub scene: Scene,
}

impl SceneResponse {
    fn new(explorer: &Explorer, scene: Scene) -> Self {
        let state = explorer.state();
        Self {
            title: explorer.dataset().title().to_string(),
            tf_count: state.tf_count,
            tf_counts: explorer.counts().values().to_vec(),
            phase: state.phase(),
            status: state.phase().status(),
            pinned: state.pinned.clone(),
            scene,
        }
    }
}

/// Optional heatmap size override for `/api/scene`
#[derive(Debug, Default, Deserialize)]
struct SceneQuery {
    width: Option<f64>,
    height: Option<f64>,
}

/// A response before it is handed to tiny_http
#[derive(Debug, PartialEq)]
struct Reply {
    status: u16,
    content_type: &'static str,
    body: String,
}

impl Reply {
    fn html(body: String) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=utf-8",
            body,
        }
    }

    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self {
                status,
                content_type: "application/json",
                body,
            },
            Err(e) => Self::error(500, format!("Serialization error: {}", e)),
        }
    }

    fn error(status: u16, message: String) -> Self {
        let body = serde_json::to_string(&ApiResponse::failure(message))
            .unwrap_or_else(|_| r#"{"ok":false,"data":null,"error":"internal error"}"#.to_string());
        Self {
            status,
            content_type: "application/json",
            body,
        }
    }

    fn not_found() -> Self {
        Self {
            status: 404,
            content_type: "text/plain",
            body: "Not found".to_string(),
        }
    }
}

/// Start the viewer server; blocks until the listener shuts down
pub fn start(explorer: Explorer, host: &str, port: u16) -> std::io::Result<()> {
    let addr = format!("{}:{}", host, port);
    let server = Server::http(&addr).map_err(|e| std::io::Error::other(e.to_string()))?;

    let url = format!("http://{}:{}", host, port);
    tracing::info!(%addr, "viewer listening");

    eprintln!("\n{}", "🧬 TFBS Explorer".green().bold());
    eprintln!("   Dataset: {}", explorer.dataset().title());
    eprintln!("   Viewer:  {}", url.cyan());
    eprintln!("   Press Ctrl+C to stop\n");

    let mut server_state = ServerState::new(explorer);
    for request in server.incoming_requests() {
        if let Err(e) = server_state.handle_request(request) {
            tracing::warn!(error = %e, "failed to answer request");
        }
    }

    Ok(())
}

struct ServerState {
    explorer: Explorer,
    viewer_html: String,
}

impl ServerState {
    fn new(explorer: Explorer) -> Self {
        let viewer_html = page::viewer(
            explorer.dataset().title(),
            explorer.counts(),
            explorer.state().tf_count,
        );
        Self {
            explorer,
            viewer_html,
        }
    }

    fn handle_request(&mut self, mut request: Request) -> std::io::Result<()> {
        let method = request.method().clone();
        let url = request.url().to_string();

        let mut body = String::new();
        let reply = if method == Method::Post {
            match request.as_reader().read_to_string(&mut body) {
                Ok(_) => self.route(&method, &url, &body),
                Err(e) => Reply::error(400, format!("Failed to read body: {}", e)),
            }
        } else {
            self.route(&method, &url, &body)
        };

        tracing::debug!(%method, %url, status = reply.status, "request");

        let mut response = Response::from_string(reply.body).with_status_code(reply.status);
        if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes()) {
            response = response.with_header(header);
        }
        request.respond(response)
    }

    fn route(&mut self, method: &Method, url: &str, body: &str) -> Reply {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));

        match (method, path) {
            // Serve viewer UI
            (&Method::Get, "/") | (&Method::Get, "/index.html") => {
                Reply::html(self.viewer_html.clone())
            }

            // Raw dataset document
            (&Method::Get, "/data.json") => Reply::json(200, self.explorer.dataset()),

            // API: every surface for the current state
            (&Method::Get, "/api/scene") => self.scene(query),

            // API: apply one interaction (POST /api/event)
            (&Method::Post, "/api/event") => self.event(body),

            // 404
            _ => Reply::not_found(),
        }
    }

    fn scene(&self, query: &str) -> Reply {
        let query: SceneQuery = match serde_urlencoded::from_str(query) {
            Ok(q) => q,
            Err(e) => return Reply::error(400, format!("Invalid query: {}", e)),
        };

        let scene = match (query.width, query.height) {
            (Some(width), Some(height)) if width > 0.0 && height > 0.0 => {
                let mut layout = self.explorer.state().layout.clone();
                layout.heatmap = Size::new(width, height);
                self.explorer.scene_at(layout)
            }
            _ => self.explorer.scene(),
        };
        Reply::json(200, &ApiResponse::success(SceneResponse::new(&self.explorer, scene)))
    }

    fn event(&mut self, body: &str) -> Reply {
        let msg: Msg = match serde_json::from_str(body) {
            Ok(m) => m,
            Err(e) => return Reply::error(400, format!("Invalid JSON: {}", e)),
        };
        tracing::debug!(?msg, "event");

        let scene = self.explorer.dispatch(msg);
        Reply::json(200, &ApiResponse::success(SceneResponse::new(&self.explorer, scene)))
    }
}
