//! Dialogflow v2 fulfillment endpoint.
//!
//! The response is composed synchronously; a watchlist write, when one is
//! due, is handed to the `WatchlistWriter` and not awaited.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use listo_core::fulfillment::slots::SlotSource;
use listo_core::{FulfillmentEngine, FulfillmentRequest, FulfillmentResponse, InterfaceError};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::writer::WatchlistWriter;

#[derive(Clone)]
pub struct WebhookState {
    engine: Arc<FulfillmentEngine>,
    writer: WatchlistWriter,
}

impl WebhookState {
    pub fn new(engine: FulfillmentEngine, writer: WatchlistWriter) -> Self {
        Self { engine: Arc::new(engine), writer }
    }
}

pub fn router(path: &str, state: WebhookState) -> Router {
    Router::new()
        .route(path, post(fulfill))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug)]
pub struct WebhookRejection(InterfaceError);

impl IntoResponse for WebhookRejection {
    fn into_response(self) -> Response {
        let status = match self.0 {
            InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        };
        (status, self.0.user_message()).into_response()
    }
}

pub async fn fulfill(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<FulfillmentResponse>, WebhookRejection> {
    debug!(
        event_name = "webhook.request.received",
        headers = ?headers,
        body = %String::from_utf8_lossy(&body),
        "dialogflow request"
    );

    let request = FulfillmentRequest::from_slice(&body).map_err(|error| {
        let interface = error.into_interface("unknown");
        warn!(
            event_name = "webhook.request.invalid",
            correlation_id = %interface.correlation_id(),
            error = %interface,
            "invalid webhook request"
        );
        WebhookRejection(interface)
    })?;

    let correlation_id = request.correlation_id().to_string();
    let fulfillment = state.engine.fulfill(&request);

    info!(
        event_name = "webhook.request.dispatched",
        correlation_id = %correlation_id,
        action = %request.action,
        handler = fulfillment.handler.as_str(),
        source = request.request_source.as_deref().unwrap_or("unknown"),
        "fulfillment handler selected"
    );

    if let Some(slots) = &fulfillment.slots {
        match &slots.thing_source {
            SlotSource::Parameters => {}
            SlotSource::OutputContext { name } => info!(
                event_name = "webhook.slot.context_fallback",
                correlation_id = %correlation_id,
                context = %name,
                "thing was not given in parameters but was found in an output context"
            ),
            SlotSource::Missing => info!(
                event_name = "webhook.slot.missing",
                correlation_id = %correlation_id,
                "thing was not given in parameters and not found in output contexts"
            ),
        }
        for ignored in &slots.ignored {
            warn!(
                event_name = "webhook.slot.ignored",
                correlation_id = %correlation_id,
                slot = ignored.slot,
                context = ignored.context.as_deref().unwrap_or("parameters"),
                "slot value is not a string and was ignored"
            );
        }
    }

    if let Some(entry) = fulfillment.entry {
        state.writer.submit(entry, &correlation_id);
    }

    debug!(
        event_name = "webhook.response.sent",
        correlation_id = %correlation_id,
        response = ?fulfillment.response,
        "response to dialogflow"
    );

    Ok(Json(fulfillment.response))
}
