// --- File: config.rs ---
use crate::constants::*;
use crate::entity::Species;

// Per-species tuning. `size` is the bounding-square edge; `speed` is the
// per-tick displacement outside a sprint.
#[derive(Debug, Clone)]
pub struct SpeciesConfig {
    pub size: f32,
    pub sight_range: f32,
    pub speed: f32,
    pub lifetime_ms: u64,
    pub reproduce_threshold: u32,
}

// Sprint tuning shared by both creature species.
#[derive(Debug, Clone)]
pub struct SprintConfig {
    pub multiplier: f32,
    pub duration_ms: u64,
    pub cooldown_ms: u64,
}

impl Default for SprintConfig {
    fn default() -> Self {
        Self {
            multiplier: SPRINT_MULTIPLIER,
            duration_ms: SPRINT_DURATION_MS,
            cooldown_ms: SPRINT_COOLDOWN_MS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub world_width: f32,
    pub world_height: f32,
    pub plant_size: f32,
    pub obstacle_size: f32,
    pub prey: SpeciesConfig,
    pub predator: SpeciesConfig,
    pub sprint: SprintConfig,
    pub initial_plants: usize,
    pub initial_preys: usize,
    pub initial_predators: usize,
    pub initial_obstacles: usize,
    pub max_plants: usize,
    pub plant_growth_interval_ms: u64,
    pub wander_interval_ms: u64,
    pub reproduce_jitter: f32,
    pub plant_placement_attempts: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            plant_size: PLANT_SIZE,
            obstacle_size: OBSTACLE_SIZE,
            prey: SpeciesConfig {
                size: PREY_SIZE,
                sight_range: SIGHT_RANGE,
                speed: PREY_SPEED,
                lifetime_ms: PREY_LIFETIME_MS,
                reproduce_threshold: PLANTS_EATEN_TO_REPRODUCE,
            },
            predator: SpeciesConfig {
                size: PREDATOR_SIZE,
                sight_range: SIGHT_RANGE,
                speed: PREDATOR_SPEED,
                lifetime_ms: PREDATOR_LIFETIME_MS,
                reproduce_threshold: PREYS_EATEN_TO_REPRODUCE,
            },
            sprint: SprintConfig::default(),
            initial_plants: INITIAL_PLANT_COUNT,
            initial_preys: INITIAL_PREY_COUNT,
            initial_predators: INITIAL_PREDATOR_COUNT,
            initial_obstacles: INITIAL_OBSTACLE_COUNT,
            max_plants: MAX_PLANTS,
            plant_growth_interval_ms: PLANT_GROWTH_INTERVAL_MS,
            wander_interval_ms: WANDER_INTERVAL_MS,
            reproduce_jitter: REPRODUCE_JITTER,
            plant_placement_attempts: PLANT_PLACEMENT_ATTEMPTS,
        }
    }
}

impl SimulationConfig {
    pub fn species(&self, species: Species) -> &SpeciesConfig {
        match species {
            Species::Prey => &self.prey,
            Species::Predator => &self.predator,
        }
    }

    // Used to size spatial grid cells so a single query never needs to scan
    // more than the rings covering one sight radius.
    pub fn max_sight_range(&self) -> f32 {
        self.prey.sight_range.max(self.predator.sight_range)
    }
}
// --- End of File: config.rs ---
