//! Background score decay: a stoppable periodic task owned by the engine.
//!
//! The only state shared with the frame thread is the score counter and the
//! simulation-running flag, both atomics; no locking is needed. The thread
//! sleeps in short slices so a stop request is honored promptly, then is
//! joined, so teardown never leaves a runaway timer behind.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use metroline_logic::constants::{SCORE_DECAY_AMOUNT, SCORE_DECAY_INTERVAL};

/// Slice length for the responsive stop check.
const STOP_POLL: Duration = Duration::from_millis(100);

/// Handle to the decay thread. Stopping (or dropping) signals the thread
/// and joins it.
pub struct ScoreDecay {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ScoreDecay {
    /// Spawn the decay thread with the default interval and amount.
    pub fn spawn(score: Arc<AtomicI32>, running: Arc<AtomicBool>) -> Self {
        Self::spawn_with(score, running, SCORE_DECAY_INTERVAL, SCORE_DECAY_AMOUNT)
    }

    /// Spawn the decay thread. Every `interval` it subtracts `amount` from
    /// `score`, clamping at zero, but only while `running` is true.
    pub fn spawn_with(
        score: Arc<AtomicI32>,
        running: Arc<AtomicBool>,
        interval: Duration,
        amount: i32,
    ) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            while !stop_flag.load(Ordering::Relaxed) {
                // Sleep in slices so stop requests don't wait a full interval.
                let mut slept = Duration::ZERO;
                while slept < interval && !stop_flag.load(Ordering::Relaxed) {
                    let slice = STOP_POLL.min(interval - slept);
                    thread::sleep(slice);
                    slept += slice;
                }
                if stop_flag.load(Ordering::Relaxed) {
                    break;
                }

                if running.load(Ordering::Relaxed) {
                    decay_score(&score, amount);
                }
            }
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Signal the thread to stop and wait for it to exit.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ScoreDecay {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Subtract `amount` from the shared score without letting it go negative.
pub fn decay_score(score: &AtomicI32, amount: i32) {
    let _ = score.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |s| {
        Some((s - amount).max(0))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decay_clamps_at_zero() {
        let score = AtomicI32::new(5);
        decay_score(&score, 2);
        assert_eq!(score.load(Ordering::Relaxed), 3);
        decay_score(&score, 2);
        decay_score(&score, 2);
        assert_eq!(score.load(Ordering::Relaxed), 0);
        decay_score(&score, 2);
        assert_eq!(score.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_thread_decays_while_running() {
        let score = Arc::new(AtomicI32::new(7));
        let running = Arc::new(AtomicBool::new(true));
        let mut decay = ScoreDecay::spawn_with(
            Arc::clone(&score),
            Arc::clone(&running),
            Duration::from_millis(10),
            3,
        );

        thread::sleep(Duration::from_millis(300));
        decay.stop();

        // 7 -> 4 -> 1 -> 0, then pinned at the clamp
        assert_eq!(score.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_no_decay_while_paused() {
        let score = Arc::new(AtomicI32::new(100));
        let running = Arc::new(AtomicBool::new(false));
        let mut decay = ScoreDecay::spawn_with(
            Arc::clone(&score),
            Arc::clone(&running),
            Duration::from_millis(10),
            5,
        );

        thread::sleep(Duration::from_millis(100));
        decay.stop();

        assert_eq!(score.load(Ordering::Relaxed), 100);
    }

    #[test]
    fn test_score_never_negative_under_toggling() {
        let score = Arc::new(AtomicI32::new(4));
        let running = Arc::new(AtomicBool::new(true));
        let mut decay = ScoreDecay::spawn_with(
            Arc::clone(&score),
            Arc::clone(&running),
            Duration::from_millis(5),
            3,
        );

        for i in 0..40 {
            running.store(i % 2 == 0, Ordering::Relaxed);
            thread::sleep(Duration::from_millis(5));
            assert!(score.load(Ordering::Relaxed) >= 0);
        }
        decay.stop();
        assert!(score.load(Ordering::Relaxed) >= 0);
    }

    #[test]
    fn test_stop_joins_promptly() {
        let score = Arc::new(AtomicI32::new(10));
        let running = Arc::new(AtomicBool::new(true));
        // Long interval: a stop must not wait for it.
        let mut decay = ScoreDecay::spawn_with(
            Arc::clone(&score),
            Arc::clone(&running),
            Duration::from_secs(60),
            1,
        );

        let started = std::time::Instant::now();
        decay.stop();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(score.load(Ordering::Relaxed), 10);
    }
}
