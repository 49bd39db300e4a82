use std::net::SocketAddr;

use anyhow::Context;
use axum::extract::{Path as AxumPath, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::cli::ServeArgs;
use crate::config::WhoApiConfig;
use crate::who::{WhoClient, WhoError};

#[derive(Clone)]
pub struct AppState {
    who: WhoClient,
}

impl AppState {
    pub fn new(who: WhoClient) -> Self {
        Self { who }
    }
}

pub async fn run(opts: ServeArgs) -> anyhow::Result<()> {
    let config = WhoApiConfig::from_env().context("load WHO API configuration")?;
    config.log_summary();

    let state = AppState::new(WhoClient::new(config, opts.language.clone()));
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", opts.host, opts.port)
        .parse()
        .context("parse host:port")?;

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/token", get(api_token))
        .route("/api/icd/:code", get(api_icd_detail))
        .layer(cors)
        .with_state(state)
}

async fn api_token(State(st): State<AppState>) -> Response {
    match st.who.request_token().await {
        Ok(token) => Json(token).into_response(),
        Err(e) => {
            tracing::error!("token exchange failed: {e}");
            who_error_response(e, "Failed to get WHO API token")
        }
    }
}

async fn api_icd_detail(State(st): State<AppState>, AxumPath(code): AxumPath<String>) -> Response {
    match st.who.lookup(&code).await {
        // Upstream bytes pass through untouched; re-serializing could reorder
        // or reformat the payload.
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("ICD lookup for {code} failed: {e}");
            who_error_response(e, "Failed to get ICD details")
        }
    }
}

fn who_error_response(err: WhoError, context: &str) -> Response {
    match err {
        WhoError::Upstream { status, body } => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, body).into_response()
        }
        WhoError::Transport(e) => {
            (StatusCode::INTERNAL_SERVER_ERROR, format!("{context}: {e}")).into_response()
        }
    }
}
