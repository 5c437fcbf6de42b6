//! The artificial "thinking" pause applied before returning a local answer.
//!
//! The pause is a presentation choice only. It never changes the answer text.

use crate::constants::{
    DEFAULT_THINKING_DELAY_MAX_MS, DEFAULT_THINKING_DELAY_MIN_MS, MAX_THINKING_DELAY_MS,
};
use crate::{AssistError, AssistResult};
use rand::Rng;
use std::time::Duration;

/// Uniformly distributed delay in `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThinkingDelay {
    min: Duration,
    max: Duration,
}

impl ThinkingDelay {
    /// Creates a delay band.
    ///
    /// # Errors
    ///
    /// Returns [`AssistError::InvalidInput`] if `min > max` or `max` exceeds the upper limit.
    pub fn new(min: Duration, max: Duration) -> AssistResult<Self> {
        if min > max {
            return Err(AssistError::InvalidInput(format!(
                "thinking delay min ({min:?}) is greater than max ({max:?})"
            )));
        }
        if max > Duration::from_millis(MAX_THINKING_DELAY_MS) {
            return Err(AssistError::InvalidInput(format!(
                "thinking delay max ({max:?}) exceeds {MAX_THINKING_DELAY_MS} ms"
            )));
        }
        Ok(Self { min, max })
    }

    /// No pause at all.
    pub fn none() -> Self {
        Self {
            min: Duration::ZERO,
            max: Duration::ZERO,
        }
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    pub fn is_none(&self) -> bool {
        self.max.is_zero()
    }

    /// Draws one duration from the band.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let ms = rng.gen_range(self.min.as_millis() as u64..=self.max.as_millis() as u64);
        Duration::from_millis(ms)
    }

    /// Sleeps for one sampled duration.
    pub async fn pause(&self) {
        if self.is_none() {
            return;
        }
        let duration = self.sample(&mut rand::thread_rng());
        tracing::debug!("thinking for {:?}", duration);
        tokio::time::sleep(duration).await;
    }
}

impl Default for ThinkingDelay {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(DEFAULT_THINKING_DELAY_MIN_MS),
            max: Duration::from_millis(DEFAULT_THINKING_DELAY_MAX_MS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn samples_stay_within_band() {
        let delay = ThinkingDelay::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let d = delay.sample(&mut rng);
            assert!(d >= delay.min() && d <= delay.max(), "{d:?} out of band");
        }
    }

    #[test]
    fn fixed_band_returns_exact_value() {
        let delay =
            ThinkingDelay::new(Duration::from_millis(800), Duration::from_millis(800)).expect("band");
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(delay.sample(&mut rng), Duration::from_millis(800));
    }

    #[test]
    fn rejects_inverted_band() {
        let err = ThinkingDelay::new(Duration::from_secs(3), Duration::from_secs(1))
            .expect_err("inverted band");
        assert!(matches!(err, AssistError::InvalidInput(_)));
    }

    #[test]
    fn rejects_excessive_max() {
        assert!(ThinkingDelay::new(Duration::ZERO, Duration::from_secs(60)).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn pause_waits_at_least_min() {
        let delay = ThinkingDelay::new(Duration::from_millis(1_500), Duration::from_millis(2_500))
            .expect("band");
        let start = tokio::time::Instant::now();
        delay.pause().await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(1_500));
        assert!(elapsed <= Duration::from_millis(2_600));
    }

    #[tokio::test(start_paused = true)]
    async fn none_does_not_wait() {
        let start = tokio::time::Instant::now();
        ThinkingDelay::none().pause().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
