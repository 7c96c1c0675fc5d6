use std::future::Future;
use std::time::Duration;

/// Awaits `call`, bounded by `deadline` when one is configured.
///
/// On expiry the error built by `on_timeout` (given the deadline in whole
/// seconds) is returned and the call is dropped.
pub(crate) async fn with_deadline<T, E, F>(
    deadline: Option<Duration>,
    call: F,
    on_timeout: impl FnOnce(u64) -> E,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    match deadline {
        Some(limit) => match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => Err(on_timeout(limit.as_secs())),
        },
        None => call.await,
    }
}
