use axum::{
    extract::{OriginalUri, Path, State},
    http::StatusCode,
    Extension, Json,
};
use percent_encoding::percent_decode_str;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{CatalogResponse, MetaResponse, StreamResponse, CATALOG_ID, CONTENT_TYPE},
    services::addon,
};

use super::AppState;

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// `GET /catalog/{type}/{catalog_id}/search={text}.json`
pub async fn catalog(
    Path((content_type, catalog_id, _extra)): Path<(String, String, String)>,
    OriginalUri(uri): OriginalUri,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<CatalogResponse>> {
    if content_type != CONTENT_TYPE || catalog_id != CATALOG_ID {
        return Err(AppError::NotFound(format!(
            "catalog {}/{}",
            content_type, catalog_id
        )));
    }

    // The decoded path parameter can't tell an encoded '&' from a separator, so
    // the extras are parsed from the raw segment.
    let raw_extra = uri.path().rsplit('/').next().unwrap_or_default();
    let search = search_extra(raw_extra)
        .ok_or_else(|| AppError::InvalidInput("catalog requires a search extra".to_string()))?;

    tracing::info!(request_id = %request_id, search = %search, "Catalog search");

    Ok(Json(addon::catalog(&search)))
}

/// `GET /meta/{type}/{id}.json`
pub async fn meta(
    Path((_content_type, id)): Path<(String, String)>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<MetaResponse>> {
    let id = resource_id(&id);
    tracing::debug!(request_id = %request_id, id = %id, "Meta lookup");

    Ok(Json(addon::meta(id)?))
}

/// `GET /stream/{type}/{id}.json`
pub async fn stream(
    State(state): State<AppState>,
    Path((_content_type, id)): Path<(String, String)>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<StreamResponse>> {
    let id = resource_id(&id);
    tracing::info!(request_id = %request_id, id = %id, "Stream lookup");

    let response = addon::stream(
        state.provider.as_ref(),
        &state.cache,
        id,
        state.stream_cache_max_age,
    )
    .await?;

    tracing::info!(
        request_id = %request_id,
        streams = response.streams.len(),
        "Stream lookup completed"
    );

    Ok(Json(response))
}

/// Strips the `.json` suffix the add-on protocol appends to resource ids
fn resource_id(segment: &str) -> &str {
    segment.strip_suffix(".json").unwrap_or(segment)
}

/// Extracts the `search` value from a raw `key=value&...` extras segment
fn search_extra(segment: &str) -> Option<String> {
    resource_id(segment).split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == "search").then(|| {
            percent_decode_str(&value.replace('+', " "))
                .decode_utf8_lossy()
                .into_owned()
        })
    })
}
