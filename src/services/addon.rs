/// Add-on resource handlers
///
/// Catalog, meta and stream lookups, independent of how the add-on host reaches
/// them. The catalog item id is the only state passed between the three: it
/// carries the encoded search text from the catalog to the meta and stream
/// requests.
use crate::{
    cache::ResponseCache,
    cached,
    error::{AppError, AppResult, SearchError},
    models::{CatalogResponse, MetaDetail, MetaPreview, MetaResponse, Stream, StreamResponse},
    services::{
        id_codec,
        normalize::normalize,
        providers::{encode_query, SearchProvider},
    },
};

/// Lists the single synthetic item for a search
pub fn catalog(search: &str) -> CatalogResponse {
    CatalogResponse {
        metas: vec![MetaPreview::search_item(id_codec::item_id(search))],
    }
}

/// Describes a catalog item, named after the query it carries
pub fn meta(id: &str) -> AppResult<MetaResponse> {
    let query = id_codec::query_from_id(id)?;
    Ok(MetaResponse {
        meta: MetaDetail::for_query(id.to_string(), query),
    })
}

/// Looks up streams for a catalog item, from cache or from the provider
pub async fn stream(
    provider: &dyn SearchProvider,
    cache: &ResponseCache,
    id: &str,
    cache_max_age: u64,
) -> AppResult<StreamResponse> {
    let streams = lookup_streams(provider, cache, id).await?;
    Ok(StreamResponse {
        streams,
        cache_max_age: Some(cache_max_age),
    })
}

async fn lookup_streams(
    provider: &dyn SearchProvider,
    cache: &ResponseCache,
    id: &str,
) -> AppResult<Vec<Stream>> {
    cached!(cache, id.to_string(), async {
        let query = id_codec::query_from_id(id)?;
        let streams = search_with_fallback(provider, &query).await?;
        Ok::<_, AppError>(streams)
    })
}

/// Searches for `query`, retrying once with the normalized query on failure
///
/// The retry only happens when normalization changes the query; otherwise the
/// first error is returned as is.
pub async fn search_with_fallback(
    provider: &dyn SearchProvider,
    query: &str,
) -> Result<Vec<Stream>, SearchError> {
    match provider.search(&encode_query(query)).await {
        Ok(streams) => Ok(streams),
        Err(err) => {
            let normalized = normalize(query);
            if normalized == query {
                tracing::info!(query = %query, error = %err, provider = provider.name(), "Search failed");
                return Err(err);
            }

            tracing::info!(
                query = %query,
                normalized = %normalized,
                error = %err,
                provider = provider.name(),
                "Search failed, retrying with normalized query"
            );
            provider.search(&encode_query(&normalized)).await
        }
    }
}
