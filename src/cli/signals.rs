//! Ctrl-C handling while the microphone is open

use std::time::Instant;

use tokio::time::{interval, sleep, Duration as TokioDuration};

use crate::domain::recording::Duration;

/// Why a timed recording window ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingStop {
    /// The configured duration ran out
    Elapsed,
    /// The user pressed Ctrl-C
    Interrupted,
}

/// Wait until `duration` has passed or Ctrl-C arrives, whichever is first.
/// `on_tick(elapsed_ms, total_ms)` is called every 100ms.
pub async fn wait_recording_window<F>(duration: Duration, on_tick: F) -> RecordingStop
where
    F: Fn(u64, u64),
{
    let total_ms = duration.as_millis();
    let start = Instant::now();
    let deadline = sleep(duration.as_std());
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(deadline, ctrl_c);
    let mut ticker = interval(TokioDuration::from_millis(100));

    loop {
        tokio::select! {
            _ = &mut deadline => {
                on_tick(total_ms, total_ms);
                return RecordingStop::Elapsed;
            }
            result = &mut ctrl_c => {
                if let Err(e) = result {
                    tracing::warn!(error = %e, "failed to listen for Ctrl-C");
                    // Fall back to waiting out the duration
                    (&mut deadline).await;
                    return RecordingStop::Elapsed;
                }
                return RecordingStop::Interrupted;
            }
            _ = ticker.tick() => {
                let elapsed = (start.elapsed().as_millis() as u64).min(total_ms);
                on_tick(elapsed, total_ms);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[tokio::test]
    async fn short_window_elapses_and_reports_completion() {
        let last = AtomicU64::new(0);
        let stop = wait_recording_window(Duration::from_millis(250), |elapsed, total| {
            assert_eq!(total, 250);
            assert!(elapsed <= total);
            last.store(elapsed, Ordering::SeqCst);
        })
        .await;

        assert_eq!(stop, RecordingStop::Elapsed);
        assert_eq!(last.load(Ordering::SeqCst), 250);
    }
}
