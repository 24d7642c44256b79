//! Bonus box sequence
//!
//! A timed three-phase event that suspends normal play and hands the character
//! a new variant:
//!
//! 1. Reveal: the box appears, no candidate yet
//! 2. Randomize: a random candidate is shown every churn tick
//! 3. Settle: the final pick is shown, then committed
//!
//! Phase is derived from wall-clock time since the event began, so the
//! duration does not depend on frame rate.

use rand::Rng;
use serde::Serialize;

use super::variant::Variant;
use crate::tuning::TimingTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BonusPhase {
    Reveal,
    Randomize,
    Settle,
}

fn draw<R: Rng>(rng: &mut R) -> Variant {
    Variant::ALL[rng.random_range(0..Variant::ALL.len())]
}

/// A running bonus event
#[derive(Debug, Clone, Serialize)]
pub struct BonusEvent {
    /// Stage that earned the bonus
    pub stage: u32,
    pub phase: BonusPhase,
    /// Currently displayed candidate (cosmetic)
    pub candidate: Option<Variant>,
    /// The award, drawn once when Randomize ends
    pub chosen: Option<Variant>,
    started_ms: f64,
    next_churn_ms: f64,
}

impl BonusEvent {
    pub fn begin(stage: u32, now_ms: f64) -> Self {
        Self {
            stage,
            phase: BonusPhase::Reveal,
            candidate: None,
            chosen: None,
            started_ms: now_ms,
            next_churn_ms: now_ms,
        }
    }

    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        (now_ms - self.started_ms).max(0.0)
    }

    /// Advance to `now_ms`. Returns the awarded variant once Settle has run
    /// its full duration.
    pub fn update<R: Rng>(&mut self, now_ms: f64, timing: &TimingTuning, rng: &mut R) -> Option<Variant> {
        let elapsed = self.elapsed_ms(now_ms);
        let randomize_at = timing.reveal_ms;
        let settle_at = randomize_at + timing.randomize_ms;
        let done_at = settle_at + timing.settle_ms;

        if self.phase == BonusPhase::Reveal && elapsed >= randomize_at {
            self.phase = BonusPhase::Randomize;
            self.next_churn_ms = self.started_ms + randomize_at;
        }

        if self.phase == BonusPhase::Randomize {
            if elapsed >= settle_at {
                // Fresh draw, independent of whatever was on display
                let chosen = draw(rng);
                self.chosen = Some(chosen);
                self.candidate = Some(chosen);
                self.phase = BonusPhase::Settle;
                log::debug!("Bonus box settled on {:?}", chosen);
            } else if now_ms >= self.next_churn_ms {
                self.candidate = Some(draw(rng));
                while self.next_churn_ms <= now_ms {
                    self.next_churn_ms += timing.churn_ms;
                }
            }
        }

        if self.phase == BonusPhase::Settle && elapsed >= done_at {
            return self.chosen;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn timing() -> TimingTuning {
        TimingTuning::default()
    }

    #[test]
    fn test_phases_follow_wall_clock() {
        let t = timing();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut event = BonusEvent::begin(10, 1000.0);

        assert_eq!(event.update(1500.0, &t, &mut rng), None);
        assert_eq!(event.phase, BonusPhase::Reveal);
        assert!(event.candidate.is_none());

        assert_eq!(event.update(1000.0 + 800.0, &t, &mut rng), None);
        assert_eq!(event.phase, BonusPhase::Randomize);
        assert!(event.candidate.is_some());
        assert!(event.chosen.is_none());

        assert_eq!(event.update(1000.0 + 1800.0, &t, &mut rng), None);
        assert_eq!(event.phase, BonusPhase::Settle);
        let chosen = event.chosen.expect("chosen at settle");
        assert_eq!(event.candidate, Some(chosen));

        assert_eq!(event.update(1000.0 + 2799.0, &t, &mut rng), None);
        assert_eq!(event.update(1000.0 + 2800.0, &t, &mut rng), Some(chosen));
    }

    #[test]
    fn test_large_time_jump_still_draws() {
        let t = timing();
        let mut rng = Pcg32::seed_from_u64(8);
        let mut event = BonusEvent::begin(20, 0.0);
        let award = event.update(10_000.0, &t, &mut rng);
        assert!(award.is_some());
        assert_eq!(award, event.chosen);
    }

    #[test]
    fn test_churn_redraws_on_tick() {
        let t = timing();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut event = BonusEvent::begin(10, 0.0);
        let mut draws = 0;
        let mut now = 0.0;
        while now < 1800.0 {
            let before = event.next_churn_ms;
            event.update(now, &t, &mut rng);
            if event.next_churn_ms != before && event.phase == BonusPhase::Randomize {
                draws += 1;
            }
            now += 1000.0 / 60.0;
        }
        // 1000 ms of randomizing at a 100 ms tick
        assert!((9..=11).contains(&draws), "draws {draws}");
    }

    #[test]
    fn test_every_variant_can_be_awarded() {
        let t = timing();
        let mut seen = std::collections::HashSet::new();
        for seed in 0..64 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut event = BonusEvent::begin(10, 0.0);
            if let Some(v) = event.update(1e6, &t, &mut rng) {
                seen.insert(v);
            }
        }
        assert_eq!(seen.len(), Variant::ALL.len());
    }
}
