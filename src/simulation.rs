// --- File: simulation.rs ---
use crate::config::SimulationConfig;
use crate::entity::{Creature, Entity, Obstacle, Plant, Species};
use crate::spatial::{self, SpatialGrid};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

pub type SimRng = StdRng;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EntityKind {
    Plant,
    Prey,
    Predator,
    Obstacle,
}

// Read-only snapshot of one entity, the drawing/stats seam for a renderer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EntityView {
    pub kind: EntityKind,
    pub position: Vec2,
    pub size: f32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PopulationCounts {
    pub plants: usize,
    pub preys: usize,
    pub predators: usize,
    pub obstacles: usize,
}

// The whole simulation state: four disjoint collections plus the per-tick
// bookkeeping. Mid-pass spawns and removals go through deferred buffers so a
// pass always iterates a consistent snapshot: removals are recorded in an
// index set consulted by every later lookup in the same tick (an eaten plant
// or prey is observed gone immediately), and both are applied to the
// collections only after the pass.
pub struct World {
    pub plants: Vec<Plant>,
    pub preys: Vec<Creature>,
    pub predators: Vec<Creature>,
    pub obstacles: Vec<Obstacle>,
    config: SimulationConfig,
    seed: u64,
    rng: SimRng,
    plant_grid: SpatialGrid,
    obstacle_grid: SpatialGrid,
    spawned_plants: Vec<Plant>,
    spawned_preys: Vec<Creature>,
    spawned_predators: Vec<Creature>,
    removed_plants: HashSet<usize>,
    removed_preys: HashSet<usize>,
    removed_predators: HashSet<usize>,
}

impl World {
    pub fn new(config: SimulationConfig, seed: u64) -> Self {
        // Cell size covers one sight radius, so a query scans one ring.
        let cell_size = config.max_sight_range();
        let mut world = Self {
            plants: Vec::with_capacity(config.initial_plants),
            preys: Vec::new(),
            predators: Vec::new(),
            obstacles: Vec::new(),
            seed,
            rng: SimRng::seed_from_u64(seed),
            plant_grid: SpatialGrid::new(cell_size),
            obstacle_grid: SpatialGrid::new(cell_size),
            spawned_plants: Vec::new(),
            spawned_preys: Vec::new(),
            spawned_predators: Vec::new(),
            removed_plants: HashSet::new(),
            removed_preys: HashSet::new(),
            removed_predators: HashSet::new(),
            config,
        };
        world.seed_population();
        world
    }

    // Re-seed from a fresh configuration.
    pub fn reset(&mut self, config: SimulationConfig, seed: u64) {
        self.config = config;
        self.seed = seed;
        self.restart();
    }

    // Same config, same seed: reproduces the initial population exactly.
    pub fn restart(&mut self) {
        log::info!("restarting simulation (seed {})", self.seed);
        self.rng = SimRng::seed_from_u64(self.seed);
        self.plants.clear();
        self.preys.clear();
        self.predators.clear();
        self.obstacles.clear();
        self.spawned_plants.clear();
        self.spawned_preys.clear();
        self.spawned_predators.clear();
        self.removed_plants.clear();
        self.removed_preys.clear();
        self.removed_predators.clear();
        self.seed_population();
    }

    fn seed_population(&mut self) {
        for _ in 0..self.config.initial_plants {
            let Some(position) = self.sample_plant_position() else {
                break;
            };
            let size = self.config.plant_size;
            self.plants.push(Plant {
                position,
                size,
                last_growth_ms: 0,
            });
        }
        for _ in 0..self.config.initial_preys {
            let position = self.random_position(self.config.prey.size);
            let prey = Creature::spawn(Species::Prey, position, 0, &self.config.prey, &mut self.rng);
            self.preys.push(prey);
        }
        for _ in 0..self.config.initial_predators {
            let position = self.random_position(self.config.predator.size);
            let predator = Creature::spawn(
                Species::Predator,
                position,
                0,
                &self.config.predator,
                &mut self.rng,
            );
            self.predators.push(predator);
        }
        for _ in 0..self.config.initial_obstacles {
            let position = self.random_position(self.config.obstacle_size);
            let size = self.config.obstacle_size;
            self.obstacles.push(Obstacle { position, size });
        }
        // Obstacles never move; their grid is built once per (re)seed.
        self.obstacle_grid.rebuild(&self.obstacles);
    }

    // Advance the simulation by one tick. `now_ms` comes from the caller's
    // monotonic clock; the core never reads wall time itself.
    pub fn tick(&mut self, now_ms: u64) {
        self.plant_grid.rebuild(&self.plants);
        self.grow_plants(now_ms);
        self.update_preys(now_ms);
        self.update_predators(now_ms);
        self.flush_mutations();
    }

    // --- Plant growth ---

    fn grow_plants(&mut self, now_ms: u64) {
        let interval = self.config.plant_growth_interval_ms;
        for i in 0..self.plants.len() {
            if now_ms.saturating_sub(self.plants[i].last_growth_ms) <= interval {
                continue;
            }
            self.plants[i].last_growth_ms = now_ms;
            // Plant-level cap check, counting spawns staged this tick.
            if self.plants.len() + self.spawned_plants.len() >= self.config.max_plants {
                continue;
            }
            if let Some(position) = self.sample_plant_position() {
                let size = self.config.plant_size;
                self.spawned_plants.push(Plant {
                    position,
                    size,
                    last_growth_ms: now_ms,
                });
            }
        }
    }

    // Rejection sampling for an overlap-free plant spot, with a bounded
    // retry count so a saturated map skips the growth cycle instead of
    // spinning forever.
    fn sample_plant_position(&mut self) -> Option<Vec2> {
        let size = self.config.plant_size;
        for _ in 0..self.config.plant_placement_attempts {
            let candidate = Plant {
                position: self.random_position(size),
                size,
                last_growth_ms: 0,
            };
            let clear = self
                .plants
                .iter()
                .chain(self.spawned_plants.iter())
                .all(|existing| !candidate.overlaps(existing));
            if clear {
                return Some(candidate.position);
            }
        }
        log::warn!(
            "no overlap-free spot for a plant after {} attempts, skipping growth",
            self.config.plant_placement_attempts
        );
        None
    }

    // --- Creature passes ---

    fn update_preys(&mut self, now_ms: u64) {
        let interval = self.config.wander_interval_ms;
        let threshold = self.config.prey.reproduce_threshold;
        for i in 0..self.preys.len() {
            if self.removed_preys.contains(&i) {
                continue;
            }
            if self.preys[i].expired(now_ms) {
                self.removed_preys.insert(i);
                continue;
            }
            let mut prey = self.preys[i];
            prey.update_stamina(now_ms, &self.config.sprint);

            // Priority steering: fleeing beats foraging beats wandering.
            if let Some(threat) = spatial::nearest_within(
                prey.position,
                &self.predators,
                prey.sight_range,
                |j| !self.removed_predators.contains(&j),
            ) {
                prey.steer_away_from(self.predators[threat].position);
                prey.try_sprint(now_ms, &self.config.sprint);
            } else if let Some(food) = self.plant_grid.nearest_within(
                prey.position,
                &self.plants,
                prey.sight_range,
                |j| !self.removed_plants.contains(&j),
            ) {
                prey.steer_towards(self.plants[food].position);
            } else {
                prey.wander(now_ms, interval, &mut self.rng);
            }
            prey.position += prey.direction * prey.current_speed;

            self.avoid_obstacles(&mut prey);
            self.separate(&mut prey, i, Species::Prey);
            self.wrap(&mut prey);

            // Feeding re-queries after the move; contact is a center
            // distance under the eater's own size.
            if let Some(food) = self.plant_grid.nearest_within(
                prey.position,
                &self.plants,
                prey.sight_range,
                |j| !self.removed_plants.contains(&j),
            ) {
                if prey.position.distance(self.plants[food].position) < prey.size {
                    self.removed_plants.insert(food);
                    prey.eaten_count += 1;
                    if prey.eaten_count >= threshold {
                        prey.eaten_count = 0;
                        let child = self.offspring_of(&prey, now_ms);
                        self.spawned_preys.push(child);
                    }
                }
            }
            self.preys[i] = prey;
        }
    }

    fn update_predators(&mut self, now_ms: u64) {
        let interval = self.config.wander_interval_ms;
        let threshold = self.config.predator.reproduce_threshold;
        for i in 0..self.predators.len() {
            if self.removed_predators.contains(&i) {
                continue;
            }
            if self.predators[i].expired(now_ms) {
                self.removed_predators.insert(i);
                continue;
            }
            let mut predator = self.predators[i];
            predator.update_stamina(now_ms, &self.config.sprint);

            if let Some(target) = spatial::nearest_within(
                predator.position,
                &self.preys,
                predator.sight_range,
                |j| !self.removed_preys.contains(&j),
            ) {
                predator.steer_towards(self.preys[target].position);
                predator.try_sprint(now_ms, &self.config.sprint);
            } else {
                predator.wander(now_ms, interval, &mut self.rng);
            }
            predator.position += predator.direction * predator.current_speed;

            self.avoid_obstacles(&mut predator);
            self.separate(&mut predator, i, Species::Predator);
            self.wrap(&mut predator);

            if let Some(target) = spatial::nearest_within(
                predator.position,
                &self.preys,
                predator.sight_range,
                |j| !self.removed_preys.contains(&j),
            ) {
                if predator.position.distance(self.preys[target].position) < predator.size {
                    // Marked gone immediately: a second predator reaching the
                    // same prey this pass must observe it already removed.
                    self.removed_preys.insert(target);
                    predator.eaten_count += 1;
                    if predator.eaten_count >= threshold {
                        predator.eaten_count = 0;
                        let child = self.offspring_of(&predator, now_ms);
                        self.spawned_predators.push(child);
                    }
                }
            }
            self.predators[i] = predator;
        }
    }

    // --- Displacement corrections ---

    // Repulsion from the nearest obstacle in sight, applied every tick one
    // is in range, on top of the primary move.
    fn avoid_obstacles(&self, creature: &mut Creature) {
        if let Some(nearest) = self.obstacle_grid.nearest_within(
            creature.position,
            &self.obstacles,
            creature.sight_range,
            |_| true,
        ) {
            let away = creature.position - self.obstacles[nearest].position;
            if away.length_squared() > 0.0 {
                creature.position += away.normalize() * creature.base_speed;
            }
        }
    }

    // Pairwise same-species separation: one push per overlapping neighbor
    // per tick. Coincident centers give no direction to push along.
    fn separate(&self, creature: &mut Creature, index: usize, species: Species) {
        let (flock, removed) = match species {
            Species::Prey => (&self.preys, &self.removed_preys),
            Species::Predator => (&self.predators, &self.removed_predators),
        };
        for (j, other) in flock.iter().enumerate() {
            if j == index || removed.contains(&j) {
                continue;
            }
            if creature.overlaps(other) {
                let away = creature.position - other.position;
                if away.length_squared() > 0.0 {
                    creature.position += away.normalize() * creature.base_speed;
                }
            }
        }
    }

    fn wrap(&self, creature: &mut Creature) {
        let half = creature.size * 0.5;
        creature.position.x = wrap_axis(creature.position.x, half, self.config.world_width);
        creature.position.y = wrap_axis(creature.position.y, half, self.config.world_height);
    }

    // --- Spawning ---

    fn offspring_of(&mut self, parent: &Creature, now_ms: u64) -> Creature {
        let jitter = self.config.reproduce_jitter;
        let offset = Vec2::new(
            self.rng.gen_range(-jitter..=jitter),
            self.rng.gen_range(-jitter..=jitter),
        );
        Creature::spawn(
            parent.species,
            parent.position + offset,
            now_ms,
            self.config.species(parent.species),
            &mut self.rng,
        )
    }

    // --- End-of-tick flush ---

    fn flush_mutations(&mut self) {
        drain_removed(&mut self.plants, &mut self.removed_plants);
        drain_removed(&mut self.preys, &mut self.removed_preys);
        drain_removed(&mut self.predators, &mut self.removed_predators);
        self.plants.append(&mut self.spawned_plants);
        self.preys.append(&mut self.spawned_preys);
        self.predators.append(&mut self.spawned_predators);
        // World-level backstop for the plant cap.
        if self.plants.len() > self.config.max_plants {
            log::warn!(
                "plant population {} exceeds the cap {}, truncating",
                self.plants.len(),
                self.config.max_plants
            );
            self.plants.truncate(self.config.max_plants);
        }
    }

    // --- Read access ---

    pub fn population_counts(&self) -> PopulationCounts {
        PopulationCounts {
            plants: self.plants.len(),
            preys: self.preys.len(),
            predators: self.predators.len(),
            obstacles: self.obstacles.len(),
        }
    }

    // Combined view over all four collections, in their insertion order.
    pub fn view(&self) -> Vec<EntityView> {
        let mut entities = Vec::with_capacity(
            self.plants.len() + self.preys.len() + self.predators.len() + self.obstacles.len(),
        );
        entities.extend(self.plants.iter().map(|plant| EntityView {
            kind: EntityKind::Plant,
            position: plant.position,
            size: plant.size,
        }));
        entities.extend(self.preys.iter().map(|prey| EntityView {
            kind: EntityKind::Prey,
            position: prey.position,
            size: prey.size,
        }));
        entities.extend(self.predators.iter().map(|predator| EntityView {
            kind: EntityKind::Predator,
            position: predator.position,
            size: predator.size,
        }));
        entities.extend(self.obstacles.iter().map(|obstacle| EntityView {
            kind: EntityKind::Obstacle,
            position: obstacle.position,
            size: obstacle.size,
        }));
        entities
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn random_position(&mut self, size: f32) -> Vec2 {
        let half = size * 0.5;
        Vec2::new(
            self.rng.gen_range(half..=self.config.world_width - half),
            self.rng.gen_range(half..=self.config.world_height - half),
        )
    }
}

// Torus topology: once the bounding box has fully left an edge the entity
// reappears flush against the opposite one.
fn wrap_axis(center: f32, half: f32, extent: f32) -> f32 {
    if center - half > extent {
        -half
    } else if center + half < 0.0 {
        extent + half
    } else {
        center
    }
}

// Ordered removal: `swap_remove` would be cheaper but would break the stable
// insertion-order iteration the tick passes rely on.
fn drain_removed<T>(items: &mut Vec<T>, removed: &mut HashSet<usize>) {
    if removed.is_empty() {
        return;
    }
    let mut index = 0;
    items.retain(|_| {
        let keep = !removed.contains(&index);
        index += 1;
        keep
    });
    removed.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_config() -> SimulationConfig {
        SimulationConfig {
            initial_plants: 0,
            initial_preys: 0,
            initial_predators: 0,
            initial_obstacles: 0,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn wrap_axis_teleports_only_fully_exited_boxes() {
        // Box [1198, 1210] still straddles the right edge.
        assert_eq!(wrap_axis(1204.0, 6.0, 1200.0), 1204.0);
        // Box [1201, 1213] is fully out and reappears flush on the left.
        assert_eq!(wrap_axis(1207.0, 6.0, 1200.0), -6.0);
        // And the mirror image on the other side.
        assert_eq!(wrap_axis(-7.0, 6.0, 1200.0), 1206.0);
        assert_eq!(wrap_axis(-5.0, 6.0, 1200.0), -5.0);
    }

    #[test]
    fn repeated_wrapping_stays_on_plane() {
        let extent = 1200.0;
        let half = 6.0;
        let mut center = 1195.0;
        for _ in 0..10_000 {
            center = wrap_axis(center + 3.0, half, extent);
            assert!(center + half >= 0.0 && center - half <= extent + 3.0);
        }
    }

    #[test]
    fn drain_removed_preserves_insertion_order() {
        let mut items = vec!["a", "b", "c", "d", "e"];
        let mut removed: HashSet<usize> = [1, 3].into_iter().collect();
        drain_removed(&mut items, &mut removed);
        assert_eq!(items, vec!["a", "c", "e"]);
        assert!(removed.is_empty());
    }

    #[test]
    fn growth_stops_at_the_plant_cap() {
        let mut config = empty_config();
        config.initial_plants = 3;
        config.max_plants = 5;
        config.plant_growth_interval_ms = 10;
        let mut world = World::new(config, 9);

        let mut now_ms = 0;
        for _ in 0..50 {
            now_ms += 100;
            world.tick(now_ms);
            assert!(world.plants.len() <= 5);
        }
        assert_eq!(world.plants.len(), 5);
    }

    #[test]
    fn growth_on_a_saturated_map_terminates_and_skips() {
        // A 40x40 map can only hold a handful of 8x8 plants; the cap is far
        // above what fits, so placement exhausts its retry budget.
        let mut config = empty_config();
        config.world_width = 40.0;
        config.world_height = 40.0;
        config.initial_plants = 30;
        config.max_plants = 100;
        config.plant_growth_interval_ms = 10;
        let mut world = World::new(config, 3);
        let seeded = world.plants.len();
        assert!(seeded < 30);

        for tick in 1..=20 {
            world.tick(tick * 100);
        }
        assert!(world.plants.len() <= 100);
    }

    #[test]
    fn view_and_counts_cover_all_collections() {
        let mut config = empty_config();
        config.initial_plants = 4;
        config.initial_preys = 2;
        config.initial_predators = 1;
        config.initial_obstacles = 3;
        let world = World::new(config, 5);

        let counts = world.population_counts();
        assert_eq!(counts.plants, 4);
        assert_eq!(counts.preys, 2);
        assert_eq!(counts.predators, 1);
        assert_eq!(counts.obstacles, 3);

        let view = world.view();
        assert_eq!(view.len(), 10);
        assert_eq!(view.iter().filter(|e| e.kind == EntityKind::Prey).count(), 2);
        assert_eq!(
            view.iter().filter(|e| e.kind == EntityKind::Obstacle).count(),
            3
        );
    }
}
// --- End of File: simulation.rs ---
