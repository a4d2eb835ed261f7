// --- File: entity.rs ---
use crate::config::{SpeciesConfig, SprintConfig};
use crate::stamina::SprintState;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::FRAC_1_SQRT_2;

// Everything the world places on the plane: a center position and a
// bounding-square edge length. Relations between entities are never stored;
// they are recomputed from positions every tick.
pub trait Entity {
    fn position(&self) -> Vec2;
    fn size(&self) -> f32;

    // Axis-aligned bounding-box overlap (strict, touching edges don't count).
    fn overlaps<E: Entity + ?Sized>(&self, other: &E) -> bool {
        let delta = (self.position() - other.position()).abs();
        let reach = (self.size() + other.size()) * 0.5;
        delta.x < reach && delta.y < reach
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Species {
    Prey,
    Predator,
}

// The idle exploration headings: wandering always follows one of the four
// diagonal unit vectors until the next resample.
pub const WANDER_DIRECTIONS: [Vec2; 4] = [
    Vec2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    Vec2::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
    Vec2::new(-FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    Vec2::new(-FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
];

#[derive(Debug, Copy, Clone)]
pub struct Plant {
    pub position: Vec2,
    pub size: f32,
    pub last_growth_ms: u64,
}

impl Entity for Plant {
    fn position(&self) -> Vec2 {
        self.position
    }
    fn size(&self) -> f32 {
        self.size
    }
}

// Static cover; never added or removed after world initialization.
#[derive(Debug, Copy, Clone)]
pub struct Obstacle {
    pub position: Vec2,
    pub size: f32,
}

impl Entity for Obstacle {
    fn position(&self) -> Vec2 {
        self.position
    }
    fn size(&self) -> f32 {
        self.size
    }
}

// Shared record for both mobile species; behavior is selected by the
// `species` tag in the world's update passes.
#[derive(Debug, Copy, Clone)]
pub struct Creature {
    pub species: Species,
    pub position: Vec2,
    pub size: f32,
    pub sight_range: f32,
    pub base_speed: f32,
    // Equals base_speed outside a sprint, base_speed * multiplier inside.
    pub current_speed: f32,
    // Always unit length.
    pub direction: Vec2,
    pub spawned_at_ms: u64,
    pub lifetime_ms: u64,
    // Resets to 0 when the reproduction threshold is reached.
    pub eaten_count: u32,
    pub sprint: SprintState,
    pub last_wander_ms: u64,
}

impl Creature {
    pub fn spawn<R: Rng + ?Sized>(
        species: Species,
        position: Vec2,
        now_ms: u64,
        config: &SpeciesConfig,
        rng: &mut R,
    ) -> Self {
        Self {
            species,
            position,
            size: config.size,
            sight_range: config.sight_range,
            base_speed: config.speed,
            current_speed: config.speed,
            direction: WANDER_DIRECTIONS[rng.gen_range(0..WANDER_DIRECTIONS.len())],
            spawned_at_ms: now_ms,
            lifetime_ms: config.lifetime_ms,
            eaten_count: 0,
            sprint: SprintState::Normal,
            last_wander_ms: now_ms,
        }
    }

    pub fn expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.spawned_at_ms) > self.lifetime_ms
    }

    // Run once per tick, before steering, so the speed used by movement and
    // separation reflects the current sprint state.
    pub fn update_stamina(&mut self, now_ms: u64, config: &SprintConfig) {
        self.sprint.advance(now_ms, config);
        self.current_speed = if self.sprint.is_sprinting() {
            self.base_speed * config.multiplier
        } else {
            self.base_speed
        };
    }

    // Edge-triggered: a no-op while already sprinting or cooling down.
    pub fn try_sprint(&mut self, now_ms: u64, config: &SprintConfig) {
        if self.sprint.try_start(now_ms) {
            self.current_speed = self.base_speed * config.multiplier;
        }
    }

    // Point the creature at a target; a zero-length vector leaves the
    // direction untouched (divide-by-zero guard).
    pub fn steer_towards(&mut self, target: Vec2) {
        let to_target = target - self.position;
        if to_target.length_squared() > 0.0 {
            self.direction = to_target.normalize();
        }
    }

    pub fn steer_away_from(&mut self, threat: Vec2) {
        let away = self.position - threat;
        if away.length_squared() > 0.0 {
            self.direction = away.normalize();
        }
    }

    // Idle fallback: keep the current heading, resample a diagonal after the
    // wander interval elapses.
    pub fn wander<R: Rng + ?Sized>(&mut self, now_ms: u64, interval_ms: u64, rng: &mut R) {
        if now_ms.saturating_sub(self.last_wander_ms) > interval_ms {
            self.last_wander_ms = now_ms;
            self.direction = WANDER_DIRECTIONS[rng.gen_range(0..WANDER_DIRECTIONS.len())];
        }
    }
}

impl Entity for Creature {
    fn position(&self) -> Vec2 {
        self.position
    }
    fn size(&self) -> f32 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn test_prey(position: Vec2) -> Creature {
        let config = SimulationConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        Creature::spawn(Species::Prey, position, 0, &config.prey, &mut rng)
    }

    #[test]
    fn bounding_boxes_overlap_only_when_closer_than_half_sizes() {
        let a = test_prey(Vec2::new(100.0, 100.0));
        let mut b = test_prey(Vec2::new(111.0, 100.0));
        assert!(a.overlaps(&b)); // 11 < (12 + 12) / 2
        b.position.x = 112.0;
        assert!(!a.overlaps(&b)); // touching edges don't count
        b.position = Vec2::new(100.0, 130.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn steering_produces_unit_directions_and_skips_degenerate_targets() {
        let mut prey = test_prey(Vec2::new(50.0, 50.0));
        prey.steer_towards(Vec2::new(80.0, 10.0));
        assert!((prey.direction.length() - 1.0).abs() < 1e-5);

        let before = prey.direction;
        prey.steer_towards(prey.position); // zero-distance target
        assert_eq!(prey.direction, before);
        prey.steer_away_from(prey.position);
        assert_eq!(prey.direction, before);
    }

    #[test]
    fn wander_resamples_only_after_the_interval() {
        let mut prey = test_prey(Vec2::new(0.0, 0.0));
        let mut rng = StdRng::seed_from_u64(1);
        let before = prey.direction;

        prey.wander(500, 1000, &mut rng);
        assert_eq!(prey.direction, before);
        assert_eq!(prey.last_wander_ms, 0);

        prey.wander(1001, 1000, &mut rng);
        assert_eq!(prey.last_wander_ms, 1001);
        assert!(WANDER_DIRECTIONS.contains(&prey.direction));
    }

    #[test]
    fn lifetime_is_a_countdown_from_spawn() {
        let mut prey = test_prey(Vec2::new(0.0, 0.0));
        prey.spawned_at_ms = 2000;
        prey.lifetime_ms = 1000;
        assert!(!prey.expired(2000));
        assert!(!prey.expired(3000));
        assert!(prey.expired(3001));
    }
}
// --- End of File: entity.rs ---
