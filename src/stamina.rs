// --- File: stamina.rs ---
use crate::config::SprintConfig;

// Sprint bookkeeping for a creature. Cooldown is an explicit state rather
// than a pair of timestamps compared in several places: speed is back to
// base, but re-entry stays blocked until the cooldown end passes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SprintState {
    Normal,
    Sprinting { since_ms: u64 },
    Cooldown { until_ms: u64 },
}

impl SprintState {
    // Timer-driven transitions, run once per tick before steering.
    // Sprinting expires into Cooldown after the sprint duration; Cooldown
    // decays into Normal once `now` is past its end.
    pub fn advance(&mut self, now_ms: u64, config: &SprintConfig) {
        match *self {
            SprintState::Sprinting { since_ms }
                if now_ms.saturating_sub(since_ms) >= config.duration_ms =>
            {
                *self = SprintState::Cooldown {
                    until_ms: now_ms + config.cooldown_ms,
                };
            }
            SprintState::Cooldown { until_ms } if now_ms > until_ms => {
                *self = SprintState::Normal;
            }
            _ => {}
        }
    }

    // Edge-triggered entry: only a Normal creature can start a sprint.
    // Callers run `advance` first so an elapsed cooldown has already decayed.
    pub fn try_start(&mut self, now_ms: u64) -> bool {
        if matches!(self, SprintState::Normal) {
            *self = SprintState::Sprinting { since_ms: now_ms };
            true
        } else {
            false
        }
    }

    pub fn is_sprinting(&self) -> bool {
        matches!(self, SprintState::Sprinting { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SprintConfig {
        SprintConfig {
            multiplier: 1.6,
            duration_ms: 1500,
            cooldown_ms: 3000,
        }
    }

    #[test]
    fn sprint_runs_for_its_duration_then_cools_down() {
        let config = config();
        let mut state = SprintState::Normal;
        assert!(state.try_start(1000));
        assert!(state.is_sprinting());

        // Still sprinting just before the duration elapses.
        state.advance(2499, &config);
        assert!(state.is_sprinting());

        // Expires into cooldown at duration end: 2500 + 3000.
        state.advance(2500, &config);
        assert_eq!(state, SprintState::Cooldown { until_ms: 5500 });

        // Cooldown holds until its end passes, then decays to Normal.
        state.advance(5500, &config);
        assert_eq!(state, SprintState::Cooldown { until_ms: 5500 });
        state.advance(5501, &config);
        assert_eq!(state, SprintState::Normal);
    }

    #[test]
    fn restart_attempts_mid_sprint_and_mid_cooldown_are_noops() {
        let config = config();
        let mut state = SprintState::Normal;
        assert!(state.try_start(0));
        assert!(!state.try_start(100));
        assert_eq!(state, SprintState::Sprinting { since_ms: 0 });

        state.advance(1500, &config);
        assert!(!state.try_start(1600));
        assert_eq!(state, SprintState::Cooldown { until_ms: 4500 });

        state.advance(4501, &config);
        assert!(state.try_start(4501));
    }
}
// --- End of File: stamina.rs ---
