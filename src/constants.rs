// --- Global Simulation Defaults ---
// These seed `SimulationConfig::default()`; everything here can be overridden
// per-world through the config structs.

pub const WORLD_WIDTH: f32 = 1200.0;
pub const WORLD_HEIGHT: f32 = 800.0;

// Bounding-square edge lengths.
pub const PLANT_SIZE: f32 = 8.0;
pub const PREY_SIZE: f32 = 12.0;
pub const PREDATOR_SIZE: f32 = 16.0;
pub const OBSTACLE_SIZE: f32 = 20.0;

pub const INITIAL_PLANT_COUNT: usize = 500;
pub const INITIAL_PREY_COUNT: usize = 2;
pub const INITIAL_PREDATOR_COUNT: usize = 5;
pub const INITIAL_OBSTACLE_COUNT: usize = 25;

// Hard cap on plant growth, enforced at plant level and again by the world.
pub const MAX_PLANTS: usize = 500;

pub const PREY_LIFETIME_MS: u64 = 10_000;
pub const PREDATOR_LIFETIME_MS: u64 = 150_000;

pub const PLANTS_EATEN_TO_REPRODUCE: u32 = 8;
pub const PREYS_EATEN_TO_REPRODUCE: u32 = 5;

pub const SIGHT_RANGE: f32 = 150.0;

// Displacement per tick while not sprinting.
pub const PREY_SPEED: f32 = 3.0;
pub const PREDATOR_SPEED: f32 = 3.2;

pub const WANDER_INTERVAL_MS: u64 = 1000;
pub const PLANT_GROWTH_INTERVAL_MS: u64 = 1000;

// Offspring appear within this per-axis offset of the parent.
pub const REPRODUCE_JITTER: f32 = 20.0;

pub const SPRINT_MULTIPLIER: f32 = 1.6;
pub const SPRINT_DURATION_MS: u64 = 1500;
pub const SPRINT_COOLDOWN_MS: u64 = 3000;

// Bound on rejection sampling when placing a new plant; a saturated map
// skips the growth cycle instead of spinning forever.
pub const PLANT_PLACEMENT_ATTEMPTS: u32 = 32;
