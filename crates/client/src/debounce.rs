//! Debouncing for search-term changes.
//!
//! A burst of changes collapses into one: the latest value is emitted only
//! after [`SEARCH_DEBOUNCE`] of quiet. Debouncing bounds recomputation of the
//! visible list; it does not cancel anything already in flight.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

/// Quiet period before a search term is applied.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Forward the latest value from `input` once it has been quiet for `quiet`.
///
/// When `input` closes, a pending value is flushed immediately and the
/// returned receiver closes after it.
#[must_use]
pub fn debounce<T: Send + 'static>(
    mut input: mpsc::Receiver<T>,
    quiet: Duration,
) -> mpsc::Receiver<T> {
    let (tx, rx) = mpsc::channel(1);

    tokio::spawn(async move {
        let mut pending: Option<(T, Instant)> = None;

        loop {
            let deadline = pending.as_ref().map(|(_, deadline)| *deadline);
            let received = match deadline {
                Some(deadline) => {
                    tokio::select! {
                        value = input.recv() => value,
                        () = sleep_until(deadline) => {
                            if let Some((value, _)) = pending.take()
                                && tx.send(value).await.is_err()
                            {
                                return;
                            }
                            continue;
                        }
                    }
                }
                None => input.recv().await,
            };

            match received {
                Some(value) => pending = Some((value, Instant::now() + quiet)),
                None => {
                    if let Some((value, _)) = pending.take() {
                        let _ = tx.send(value).await;
                    }
                    return;
                }
            }
        }
    });

    rx
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tokio::time::advance;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_latest() {
        let (tx, input) = mpsc::channel(8);
        let mut output = debounce(input, SEARCH_DEBOUNCE);

        for term in ["o", "ov", "ove", "over"] {
            tx.send(term).await.unwrap();
            advance(Duration::from_millis(100)).await;
        }

        assert_eq!(output.recv().await, Some("over"));
        drop(tx);
        assert_eq!(output.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_before_quiet_period() {
        let (tx, input) = mpsc::channel(8);
        let mut output = debounce(input, SEARCH_DEBOUNCE);

        tx.send("soup").await.unwrap();
        advance(Duration::from_millis(299)).await;
        assert!(output.try_recv().is_err());

        advance(Duration::from_millis(2)).await;
        assert_eq!(output.recv().await, Some("soup"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_pauses_emit_separately() {
        let (tx, input) = mpsc::channel(8);
        let mut output = debounce(input, SEARCH_DEBOUNCE);

        tx.send("tea").await.unwrap();
        assert_eq!(output.recv().await, Some("tea"));

        tx.send("cake").await.unwrap();
        assert_eq!(output.recv().await, Some("cake"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_flushes_pending_value() {
        let (tx, input) = mpsc::channel(8);
        let mut output = debounce(input, Duration::from_secs(60));

        tx.send("pie").await.unwrap();
        drop(tx);
        assert_eq!(output.recv().await, Some("pie"));
        assert_eq!(output.recv().await, None);
    }
}
