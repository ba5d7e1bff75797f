//! HTTP transport for the catalog navigator.

use axum::{extract::State, http::StatusCode, routing::{get, post}, Json, Router};
use serde::Deserialize;
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{Delivery, InboundEvent, OutboundMessage, Reply, ReplyTarget},
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::app_state::AppState;

/// Interaction bodies only carry a token and a reply target.
const MAX_BODY_BYTES: usize = 16 * 1024;

#[derive(Debug, Deserialize)]
pub(crate) struct StartRequest {
    pub(crate) reply_target: ReplyTarget,
}

pub(crate) fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/start", post(start))
        .route("/interactions", post(interaction))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz(
    State(state): State<AppState>,
) -> Result<&'static str, (StatusCode, Json<ApiError>)> {
    state.storage().health_check().await.map_err(|e| {
        error!(error = %e, "health check failed");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError::new(ErrorCode::Unavailable, e.to_string())),
        )
    })?;
    Ok("ok")
}

async fn start(
    State(state): State<AppState>,
    Json(req): Json<StartRequest>,
) -> Json<OutboundMessage> {
    info!(chat_id = req.reply_target.chat_id, "session started");
    Json(OutboundMessage {
        reply_target: req.reply_target,
        delivery: Delivery::Send,
        reply: Reply::Show(state.navigator.welcome()),
        toast: None,
    })
}

async fn interaction(
    State(state): State<AppState>,
    Json(event): Json<InboundEvent>,
) -> Json<OutboundMessage> {
    let reply = state.navigator.handle(&event.raw_token).await;
    let delivery = delivery_for(&reply, &event.reply_target);
    let toast = reply.toast_text().map(str::to_string);
    Json(OutboundMessage {
        reply_target: event.reply_target,
        delivery,
        reply,
        toast,
    })
}

/// Screens replace the pressed message when there is one; notices and
/// hand-offs never touch it.
pub(crate) fn delivery_for(reply: &Reply, target: &ReplyTarget) -> Delivery {
    match reply {
        Reply::Show(_) if target.message_id.is_some() => Delivery::Edit,
        Reply::Show(_) => Delivery::Send,
        Reply::Notice(_) | Reply::Intent(_) => Delivery::Toast,
    }
}
