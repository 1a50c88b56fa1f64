use dexsight_core::DexError;

/// Join a collection of tasks and apply an optional request-level deadline.
///
/// On expiry returns `DexError::RequestTimeout` for `capability`; tasks still
/// pending are dropped.
///
/// # Errors
/// Only the deadline can fail the join itself; task outputs are returned as-is.
pub async fn join_with_deadline<I, F, T>(
    tasks: I,
    deadline: Option<std::time::Duration>,
    capability: &'static str,
) -> Result<Vec<T>, DexError>
where
    I: IntoIterator<Item = F>,
    F: core::future::Future<Output = T>,
{
    crate::core::with_request_deadline(deadline, capability, futures::future::join_all(tasks)).await
}
