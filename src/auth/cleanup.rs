//! Background cleanup worker for expired sessions.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::store::SessionStore;

/// Run a single cleanup cycle.
fn cleanup_once(sessions: &SessionStore) -> usize {
    let count = sessions.purge_expired();
    if count > 0 {
        tracing::info!(expired_sessions = count, "Cleaned up expired sessions");
    }
    count
}

/// Run the cleanup worker.
/// Cleans up immediately on start, then at the given interval, until the
/// cancellation token fires.
pub async fn run_cleanup_worker(
    sessions: SessionStore,
    interval: Duration,
    shutdown: CancellationToken,
) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Starting session cleanup worker"
    );

    cleanup_once(&sessions);

    let mut ticker = tokio::time::interval(interval);
    ticker.tick().await; // Skip the first immediate tick (we already ran cleanup)

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                cleanup_once(&sessions);
            }
            () = shutdown.cancelled() => {
                tracing::info!("Session cleanup worker shutting down");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_once_removes_expired() {
        let sessions = SessionStore::new("secret", Duration::ZERO, false);
        let _ = sessions.login(None);
        let _ = sessions.login(None);

        assert_eq!(cleanup_once(&sessions), 2);
        assert_eq!(cleanup_once(&sessions), 0);
    }

    #[tokio::test]
    async fn test_worker_stops_on_cancel() {
        let sessions = SessionStore::new("secret", Duration::ZERO, false);
        let _ = sessions.login(None);
        let shutdown = CancellationToken::new();

        let handle = tokio::spawn(run_cleanup_worker(
            sessions.clone(),
            Duration::from_secs(3600),
            shutdown.clone(),
        ));

        shutdown.cancel();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("worker should stop")
            .unwrap();

        assert!(sessions.is_empty());
    }
}
