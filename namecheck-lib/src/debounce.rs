//! Debounced values.
//!
//! `Debouncer::push` records every change of a rapidly-changing value;
//! `DebouncedReceiver::settled` yields the latest value once no new change
//! has arrived for the quiet period. The interactive session uses this to
//! run a search only after input stops changing.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Sending half: records value changes.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<(T, Instant)>,
}

/// Receiving half: yields settled values.
#[derive(Debug)]
pub struct DebouncedReceiver<T> {
    rx: mpsc::UnboundedReceiver<(T, Instant)>,
    pending: Option<(T, Instant)>,
    quiet: Duration,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet period.
    pub fn new(quiet: Duration) -> (Self, DebouncedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self { tx },
            DebouncedReceiver {
                rx,
                pending: None,
                quiet,
            },
        )
    }

    /// Record a new value, restarting the quiet period.
    ///
    /// Returns `false` if the receiver is gone.
    pub fn push(&self, value: T) -> bool {
        self.tx.send((value, Instant::now())).is_ok()
    }
}

impl<T> DebouncedReceiver<T> {
    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Wait for the next settled value.
    ///
    /// Resolves once the most recent value has been unchanged for the quiet
    /// period. When every `Debouncer` is dropped, a pending value is flushed
    /// immediately and `None` is returned afterwards.
    ///
    /// Cancel safe: a value received before the future is dropped is kept
    /// for the next call.
    pub async fn settled(&mut self) -> Option<T> {
        loop {
            if self.pending.is_none() {
                self.pending = Some(self.rx.recv().await?);
            }

            let deadline = match &self.pending {
                Some((_, at)) => *at + self.quiet,
                None => continue,
            };

            tokio::select! {
                biased;
                next = self.rx.recv() => match next {
                    Some(newer) => self.pending = Some(newer),
                    None => return self.pending.take().map(|(value, _)| value),
                },
                _ = tokio::time::sleep_until(deadline) => {
                    return self.pending.take().map(|(value, _)| value);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(600);

    #[tokio::test(start_paused = true)]
    async fn test_burst_settles_to_last_value() {
        let (debouncer, mut settled) = Debouncer::new(QUIET);
        let start = Instant::now();

        tokio::spawn(async move {
            for value in ["t", "te", "tes", "test"] {
                debouncer.push(value.to_string());
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            // Keep the sender alive past the quiet period.
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        assert_eq!(settled.settled().await.as_deref(), Some("test"));
        // Last push at 300ms, so settle at 900ms.
        assert!(start.elapsed() >= Duration::from_millis(900));
        assert!(start.elapsed() < Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_settle_separately() {
        let (debouncer, mut settled) = Debouncer::new(QUIET);

        debouncer.push(1);
        debouncer.push(2);
        assert_eq!(settled.settled().await, Some(2));

        tokio::time::sleep(Duration::from_secs(1)).await;
        debouncer.push(3);
        assert_eq!(settled.settled().await, Some(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_flushes_then_ends() {
        let (debouncer, mut settled) = Debouncer::new(QUIET);
        let start = Instant::now();
        debouncer.push("pending");
        drop(debouncer);

        assert_eq!(settled.settled().await, Some("pending"));
        assert!(start.elapsed() < QUIET);
        assert_eq!(settled.settled().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_wait_keeps_value() {
        let (debouncer, mut settled) = Debouncer::new(QUIET);
        debouncer.push("kept");

        let early = tokio::time::timeout(Duration::from_millis(100), settled.settled()).await;
        assert!(early.is_err());

        assert_eq!(settled.settled().await, Some("kept"));
        assert_eq!(settled.quiet_period(), QUIET);
    }

    #[test]
    fn test_push_after_receiver_dropped() {
        let (debouncer, settled) = Debouncer::<u8>::new(QUIET);
        drop(settled);
        assert!(!debouncer.push(1));
    }
}
