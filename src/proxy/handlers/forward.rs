// Generic forwarding handler, one instance per route table entry
use std::collections::HashMap;

use axum::{
    body::Body,
    extract::{Extension, Path, RawQuery, State},
    http::{header, HeaderMap},
    routing::{delete, get, patch, post, MethodRouter},
};

use crate::error::{AppError, AppResult};
use crate::models::BearerToken;
use crate::proxy::common::response::JsonPassthrough;
use crate::proxy::routes::{RouteEntry, Verb};
use crate::proxy::server::AppState;
use crate::proxy::upstream::UpstreamBody;

/// Method router that forwards `entry` downstream
pub fn route_for(entry: &'static RouteEntry) -> MethodRouter<AppState> {
    let handler = move |State(state): State<AppState>,
                        Extension(token): Extension<BearerToken>,
                        params: Option<Path<HashMap<String, String>>>,
                        RawQuery(query): RawQuery,
                        headers: HeaderMap,
                        body: Body| async move {
        // Parameterless routes carry no path params
        let params = params.map(|Path(p)| p).unwrap_or_default();
        forward(&state, entry, &token, &params, query.as_deref(), &headers, body).await
    };

    match entry.verb {
        Verb::Get => get(handler),
        Verb::Post => post(handler),
        Verb::Patch => patch(handler),
        Verb::Delete => delete(handler),
    }
}

async fn forward(
    state: &AppState,
    entry: &RouteEntry,
    token: &BearerToken,
    params: &HashMap<String, String>,
    query: Option<&str>,
    headers: &HeaderMap,
    body: Body,
) -> AppResult<JsonPassthrough> {
    let remote = entry.render(params)?;

    let body = if entry.verb.carries_body() {
        let bytes = axum::body::to_bytes(body, state.max_body_bytes)
            .await
            .map_err(|e| AppError::Body(e.to_string()))?;
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Some(UpstreamBody {
            bytes,
            content_type,
        })
    } else {
        None
    };

    let text = state
        .upstream
        .request(entry.verb, &remote, query, &token.value, body)
        .await?;

    Ok(JsonPassthrough(text))
}
