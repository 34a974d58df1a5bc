use crate::chat::{ChatScreen, LoadFailure, LoadRequest, PromptAction};
use crate::error::SdkError;
use crate::navigation::NavigationAction;
use crate::surface::{PresentationStyle, PresentingSurface};
use crate::widget::escape_attr;
use async_trait::async_trait;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::info;

// Served ahead of the widget. Reports the client script's load outcome,
// drives the retry/close prompt, and routes clicked links through the
// navigation policy. Endpoints are addressed from the surface origin since
// `<base>` points relative URLs at the widget host.
const REPORTER_SCRIPT: &str = r#"(function () {
  var api = window.location.origin + "/api/chat";
  var failed = false;
  function post(path, body) {
    return fetch(api + path, {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify(body || {})
    });
  }
  window.addEventListener("error", function (event) {
    var el = event.target;
    if (!el || el.tagName !== "SCRIPT" || el.src.indexOf("/api/widget/client.js") === -1) return;
    failed = true;
    post("/failed", { phase: "committed", reason: "failed to load " + el.src })
      .then(function (res) { return res.json(); })
      .then(function (prompt) {
        var retry = window.confirm(prompt.title + "\n\n" + prompt.message + "\n\nOK to retry, Cancel to close.");
        return post("/prompt", { action: retry ? "retry" : "close" }).then(function () {
          if (retry) { window.location.reload(); } else { document.body.innerHTML = ""; }
        });
      });
  }, true);
  window.addEventListener("load", function () {
    if (!failed) { post("/loaded"); }
  });
  document.addEventListener("click", function (event) {
    var link = event.target.closest ? event.target.closest("a[href]") : null;
    if (!link) return;
    event.preventDefault();
    var url = link.href;
    post("/navigate", { kind: "link_activated", url: url })
      .then(function (res) { return res.json(); })
      .then(function (decision) {
        if (decision.decision === "open_externally") {
          window.open(decision.url, "_blank", "noopener");
        } else {
          window.location.assign(url);
        }
      });
  }, true);
})();"#;

/// Prepare a widget document for serving from the surface's own origin.
fn surface_document(request: &LoadRequest) -> String {
    let mut head = String::from("<head>");
    if let Some(base) = &request.base_url {
        head.push_str(&format!("\n    <base href=\"{}\">", escape_attr(base.as_str())));
    }
    head.push_str(&format!("\n    <script>\n{REPORTER_SCRIPT}\n    </script>"));
    request.html.replacen("<head>", &head, 1)
}

struct Presented {
    screen: ChatScreen,
    style: PresentationStyle,
    document: String,
}

/// Presenting surface that serves the chat document over HTTP, for desktop
/// hosts and local previews. The served page reports load results and link
/// clicks back through the `/api/chat/*` endpoints.
#[derive(Clone, Default)]
pub struct HttpSurface {
    presented: Arc<RwLock<Option<Presented>>>,
}

impl HttpSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(serve_chat))
            .route("/healthz", get(|| async { "ok" }))
            .route("/api/chat", get(chat_summary))
            .route("/api/chat/loaded", post(chat_loaded))
            .route("/api/chat/failed", post(chat_failed))
            .route("/api/chat/prompt", post(chat_prompt))
            .route("/api/chat/navigate", post(chat_navigate))
            .layer(TraceLayer::new_for_http())
            .with_state(self.clone())
    }
}

#[async_trait]
impl PresentingSurface for HttpSurface {
    async fn present(
        &self,
        screen: ChatScreen,
        request: LoadRequest,
        style: PresentationStyle,
    ) -> Result<(), SdkError> {
        info!(?style, base_url = %screen.base_url(), "chat presented on http surface");
        *self.presented.write().await = Some(Presented {
            screen,
            style,
            document: surface_document(&request),
        });
        Ok(())
    }
}

pub async fn run(addr: SocketAddr, surface: HttpSurface) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "serving chat surface");
    axum::serve(listener, surface.router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(?err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down chat surface");
}

fn nothing_presented() -> Response {
    (StatusCode::NOT_FOUND, SdkError::NothingPresented.to_string()).into_response()
}

async fn serve_chat(State(surface): State<HttpSurface>) -> Response {
    let guard = surface.presented.read().await;
    let Some(presented) = guard.as_ref() else {
        return nothing_presented();
    };
    if presented.screen.is_dismissed() {
        return (StatusCode::GONE, "chat was closed").into_response();
    }
    let mut resp = Html(presented.document.clone()).into_response();
    resp.headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    resp
}

async fn chat_summary(State(surface): State<HttpSurface>) -> Response {
    let guard = surface.presented.read().await;
    let Some(presented) = guard.as_ref() else {
        return nothing_presented();
    };
    let screen = &presented.screen;
    Json(json!({
        "title": screen.title(),
        "style": presented.style,
        "state": screen.state(),
        "loading": screen.is_loading(),
        "dismissed": screen.is_dismissed(),
        "base_url": screen.base_url(),
    }))
    .into_response()
}

async fn chat_loaded(State(surface): State<HttpSurface>) -> Response {
    let mut guard = surface.presented.write().await;
    let Some(presented) = guard.as_mut() else {
        return nothing_presented();
    };
    presented.screen.did_finish();
    StatusCode::NO_CONTENT.into_response()
}

async fn chat_failed(
    State(surface): State<HttpSurface>,
    Json(failure): Json<LoadFailure>,
) -> Response {
    let mut guard = surface.presented.write().await;
    let Some(presented) = guard.as_mut() else {
        return nothing_presented();
    };
    Json(presented.screen.did_fail(&failure)).into_response()
}

#[derive(Debug, Deserialize)]
struct PromptRequest {
    action: PromptAction,
}

async fn chat_prompt(
    State(surface): State<HttpSurface>,
    Json(body): Json<PromptRequest>,
) -> Response {
    let mut guard = surface.presented.write().await;
    let Some(presented) = guard.as_mut() else {
        return nothing_presented();
    };
    match presented.screen.resolve_prompt(body.action) {
        Ok(Some(request)) => {
            presented.document = surface_document(&request);
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

async fn chat_navigate(
    State(surface): State<HttpSurface>,
    Json(action): Json<NavigationAction>,
) -> Response {
    let guard = surface.presented.read().await;
    let Some(presented) = guard.as_ref() else {
        return nothing_presented();
    };
    Json(presented.screen.decide_navigation(&action)).into_response()
}
