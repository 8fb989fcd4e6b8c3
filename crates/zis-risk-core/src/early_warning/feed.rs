use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::types::Percent;

#[cfg(feature = "simulation")]
use rand::{rngs::StdRng, Rng, SeedableRng};
#[cfg(feature = "simulation")]
use rust_decimal::Decimal;

/// Latest RHA and ACR readings, both percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioReadings {
    /// Amil Rights Ratio.
    pub rha: Percent,
    /// Idle Cash Ratio.
    pub acr: Percent,
}

impl Default for RatioReadings {
    fn default() -> Self {
        RatioReadings {
            rha: dec!(14.8),
            acr: dec!(8.5),
        }
    }
}

/// Source of periodic ratio readings. The evaluator only ever sees the
/// readings, so a real metrics feed can replace the simulated one.
pub trait RatioFeed {
    fn next_reading(&mut self) -> RatioReadings;
}

/// Always reports the same readings.
#[derive(Debug, Clone)]
pub struct FixedRatioFeed(pub RatioReadings);

impl RatioFeed for FixedRatioFeed {
    fn next_reading(&mut self) -> RatioReadings {
        self.0
    }
}

/// Push-driven feed: readings pushed by an external source are handed out in
/// order; once drained, the last reading repeats.
#[derive(Debug, Clone)]
pub struct ReplayRatioFeed {
    queue: VecDeque<RatioReadings>,
    last: RatioReadings,
}

impl ReplayRatioFeed {
    pub fn new(initial: RatioReadings) -> Self {
        ReplayRatioFeed {
            queue: VecDeque::new(),
            last: initial,
        }
    }

    pub fn push(&mut self, readings: RatioReadings) {
        self.queue.push_back(readings);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl RatioFeed for ReplayRatioFeed {
    fn next_reading(&mut self) -> RatioReadings {
        if let Some(next) = self.queue.pop_front() {
            self.last = next;
        }
        self.last
    }
}

/// Bounded random walk standing in for the live metrics source.
///
/// Each tick moves RHA by up to ±0.15 within [10, 20] and ACR by up to ±0.20
/// within [5, 15].
#[cfg(feature = "simulation")]
#[derive(Debug, Clone)]
pub struct SimulatedRatioFeed {
    current: RatioReadings,
    rng: StdRng,
}

#[cfg(feature = "simulation")]
impl SimulatedRatioFeed {
    const RHA_BOUNDS: (Decimal, Decimal) = (dec!(10), dec!(20));
    const ACR_BOUNDS: (Decimal, Decimal) = (dec!(5), dec!(15));
    /// Half-widths of the per-tick step, in thousandths of a percent.
    const RHA_STEP_MILLIS: i64 = 150;
    const ACR_STEP_MILLIS: i64 = 200;

    pub fn new(seed: Option<u64>) -> Self {
        Self::starting_at(RatioReadings::default(), seed)
    }

    pub fn starting_at(initial: RatioReadings, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        SimulatedRatioFeed {
            current: initial,
            rng,
        }
    }

    fn step(&mut self, value: Decimal, half_width: i64, bounds: (Decimal, Decimal)) -> Decimal {
        let delta = Decimal::new(self.rng.gen_range(-half_width..=half_width), 3);
        (value + delta).max(bounds.0).min(bounds.1)
    }
}

#[cfg(feature = "simulation")]
impl RatioFeed for SimulatedRatioFeed {
    fn next_reading(&mut self) -> RatioReadings {
        let rha = self.step(self.current.rha, Self::RHA_STEP_MILLIS, Self::RHA_BOUNDS);
        let acr = self.step(self.current.acr, Self::ACR_STEP_MILLIS, Self::ACR_BOUNDS);
        self.current = RatioReadings { rha, acr };
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_feed_repeats() {
        let mut feed = FixedRatioFeed(RatioReadings::default());
        assert_eq!(feed.next_reading(), feed.next_reading());
    }

    #[test]
    fn test_replay_feed_drains_then_holds_last() {
        let mut feed = ReplayRatioFeed::new(RatioReadings::default());
        assert_eq!(feed.next_reading().rha, dec!(14.8));
        feed.push(RatioReadings { rha: dec!(11), acr: dec!(9) });
        feed.push(RatioReadings { rha: dec!(13), acr: dec!(12) });
        assert_eq!(feed.pending(), 2);
        assert_eq!(feed.next_reading().rha, dec!(11));
        assert_eq!(feed.next_reading().acr, dec!(12));
        assert_eq!(feed.next_reading().acr, dec!(12));
    }

    #[cfg(feature = "simulation")]
    #[test]
    fn test_simulated_feed_stays_in_bounds() {
        let mut feed = SimulatedRatioFeed::starting_at(
            RatioReadings { rha: dec!(19.95), acr: dec!(5.05) },
            Some(42),
        );
        let mut prev = RatioReadings { rha: dec!(19.95), acr: dec!(5.05) };
        for _ in 0..500 {
            let r = feed.next_reading();
            assert!(r.rha >= dec!(10) && r.rha <= dec!(20));
            assert!(r.acr >= dec!(5) && r.acr <= dec!(15));
            assert!((r.rha - prev.rha).abs() <= dec!(0.15));
            assert!((r.acr - prev.acr).abs() <= dec!(0.2));
            prev = r;
        }
    }

    #[cfg(feature = "simulation")]
    #[test]
    fn test_simulated_feed_is_reproducible_with_seed() {
        let mut a = SimulatedRatioFeed::new(Some(7));
        let mut b = SimulatedRatioFeed::new(Some(7));
        for _ in 0..10 {
            assert_eq!(a.next_reading(), b.next_reading());
        }
    }
}
