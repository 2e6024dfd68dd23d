/// Serve a value from a [`ResponseCache`](crate::cache::ResponseCache) or compute and store it.
///
/// Checks the cache for `$key`. On a hit the cached value is returned as `Ok`.
/// On a miss `$block` is awaited; an `Err` propagates through `?` and nothing is
/// stored, an `Ok` value is stored under `$key` and returned.
///
/// # Example
/// ```rust,ignore
/// let streams = cached!(state.cache, id.to_string(), async move {
///     search_with_fallback(provider, &query).await
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $block:expr) => {{
        let key: String = $key;
        if let Some(cached) = $cache.get(&key).await {
            Ok(cached)
        } else {
            let value = $block.await?;
            $cache.put(key, Clone::clone(&value)).await;
            Ok(value)
        }
    }};
}
