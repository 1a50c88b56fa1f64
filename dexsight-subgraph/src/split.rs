//! Chunked execution of aliased queries.

use std::future::Future;

use dexsight_core::DexError;
use serde_json::{Map, Value};

/// Default number of items rendered into one aliased document.
pub const DEFAULT_CHUNK: usize = 100;

/// Run `run` over consecutive slices of `items`, one slice at a time, and merge
/// the top-level keys of every response.
///
/// Stops after the slice that exhausts `items`, or early when a response has
/// fewer keys than the slice size. Later keys overwrite earlier ones.
///
/// # Errors
/// Propagates the first failing chunk; returns `DexError::Data` when a
/// response is not a JSON object.
pub async fn split_query<T, F, Fut>(
    items: &[T],
    chunk: usize,
    mut run: F,
) -> Result<Map<String, Value>, DexError>
where
    F: FnMut(&[T]) -> Fut,
    Fut: Future<Output = Result<Value, DexError>>,
{
    let chunk = chunk.max(1);
    let mut merged = Map::new();
    let mut skip = 0;
    while skip < items.len() {
        let end = (skip + chunk).min(items.len());
        let Value::Object(found) = run(&items[skip..end]).await? else {
            return Err(DexError::Data("aliased query returned a non-object".into()));
        };
        let short = found.len() < chunk;
        merged.extend(found);
        if short {
            break;
        }
        skip = end;
    }
    Ok(merged)
}
