//! Single-page web form.
//!
//! `GET /` shows the form, `POST /generate` renders the submitted JSON and
//! answers with the same page plus either a download link or an inline
//! error. Failures never change the status code, so the form stays usable.

pub mod views;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, DefaultBodyLimit, State},
    routing::{get, post},
    Form, Router,
};
use maud::Markup;
use serde::Deserialize;
use tracing::{info, warn};

use crate::download::DownloadLink;
use crate::options::GenerateOptions;

use views::Notice;

/// Largest form submission accepted, in bytes.
pub const MAX_FORM_BYTES: usize = 16 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub options: Arc<GenerateOptions>,
}

impl AppState {
    pub fn new(options: GenerateOptions) -> Self {
        Self {
            options: Arc::new(options),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(form_page))
        .route("/generate", post(generate_post))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_FORM_BYTES))
        .with_state(state)
}

/// Bind `address` and serve the form until the process stops.
pub async fn serve(address: SocketAddr, options: GenerateOptions) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(address).await?;
    info!(%address, schema = %options.schema, "serving question form");
    axum::serve(listener, router(AppState::new(options))).await
}

async fn form_page() -> Markup {
    views::page("", None)
}

async fn health() -> &'static str {
    "ok"
}

#[derive(Deserialize)]
struct GeneratePost {
    #[serde(default)]
    json: String,
}

async fn generate_post(
    State(state): State<AppState>,
    body: Result<Form<GeneratePost>, FormRejection>,
) -> Markup {
    // The body of a rejected submission is gone, so the textarea starts empty.
    let Form(body) = match body {
        Ok(form) => form,
        Err(rejection) => {
            warn!(
                status = %rejection.status(),
                "form submission rejected: {}",
                rejection.body_text()
            );
            let notice = Notice::Error(format!("Error: {}", rejection.body_text()));
            return views::page("", Some(&notice));
        }
    };

    let notice = match crate::generate(&body.json, &state.options) {
        Ok(bytes) => {
            info!(bytes = bytes.len(), "document generated");
            Notice::Success(DownloadLink::new(&bytes, state.options.file_name.as_str()))
        }
        Err(err) => {
            warn!(kind = ?err.kind(), "document generation failed: {}", err);
            Notice::Error(err.user_message())
        }
    };

    views::page(&body.json, Some(&notice))
}
