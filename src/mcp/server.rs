use super::rpc::{
    JsonRpcRequest, JsonRpcResponse, RpcError, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR,
    PROTOCOL_VERSION,
};
use super::tools;
use crate::service::NewsService;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const SERVER_NAME: &str = env!("CARGO_PKG_NAME");
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP routes: the MCP endpoint on `/` and `/api/server`, plus `/health`.
pub fn router(service: NewsService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(status).post(rpc))
        .route("/api/server", get(status).post(rpc))
        .route("/health", get(|| async { "ok" }))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(service)
}

async fn status() -> Json<Value> {
    Json(json!({
        "status": "MCP Server Running",
        "tools": tools::names(),
        "message": "POST JSON-RPC 2.0 requests to this endpoint",
        "protocolVersion": PROTOCOL_VERSION,
    }))
}

async fn rpc(State(service): State<NewsService>, body: Bytes) -> Response {
    match handle_message(&service, &body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Parses one JSON-RPC message and dispatches it.
///
/// Returns `None` for notifications, which get no response body.
pub async fn handle_message(service: &NewsService, body: &[u8]) -> Option<JsonRpcResponse> {
    let value: Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(error = %e, "Unparsable JSON-RPC body");
            return Some(JsonRpcResponse::failure(
                Value::Null,
                RpcError::new(PARSE_ERROR, "Parse error"),
            ));
        }
    };

    let id = value.get("id").cloned().unwrap_or(Value::Null);
    match serde_json::from_value::<JsonRpcRequest>(value) {
        Ok(request) => handle_request(service, request).await,
        Err(e) => {
            tracing::debug!(error = %e, "Malformed JSON-RPC request");
            Some(JsonRpcResponse::failure(
                id,
                RpcError::new(INVALID_REQUEST, "Invalid Request"),
            ))
        }
    }
}

pub async fn handle_request(
    service: &NewsService,
    request: JsonRpcRequest,
) -> Option<JsonRpcResponse> {
    if request.is_notification() {
        tracing::debug!(method = %request.method, "Notification received");
        return None;
    }

    let id = request.id.unwrap_or(Value::Null);
    tracing::debug!(method = %request.method, id = %id, "Dispatching request");

    let result = match request.method.as_str() {
        "initialize" => Ok(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": { "name": SERVER_NAME, "version": SERVER_VERSION },
        })),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({ "tools": tools::definitions() })),
        "tools/call" => tools::call(service, request.params).await,
        _ => Err(RpcError::new(METHOD_NOT_FOUND, "Method not found")),
    };

    Some(match result {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(error) => {
            tracing::debug!(code = error.code, message = %error.message, "Request failed");
            JsonRpcResponse::failure(id, error)
        }
    })
}
