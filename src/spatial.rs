// --- File: spatial.rs ---
use crate::entity::Entity;
use glam::Vec2;
use std::collections::HashMap;

// Spatial queries over a population of positioned entities. Distances are
// straight-line Euclidean between centers; there is deliberately no
// wrap-around shortcut, so entities near opposite edges are far apart even
// though movement wraps. All lookups use strict `< radius` and break ties by
// the earliest index in iteration order, so results are reproducible and the
// grid below agrees exactly with the exhaustive scan.

pub type GridKey = (i32, i32);

// Exhaustive definition of detection: indices of all candidates within
// `radius` of the origin. The engine's hot paths go through `nearest_within`
// and `SpatialGrid`; this is the reference contract they are verified
// against below.
pub fn detect<E: Entity>(origin: Vec2, candidates: &[E], radius: f32) -> Vec<usize> {
    let radius_sq = radius * radius;
    candidates
        .iter()
        .enumerate()
        .filter(|(_, candidate)| (candidate.position() - origin).length_squared() < radius_sq)
        .map(|(index, _)| index)
        .collect()
}

// Nearest live candidate within `radius`. `alive` filters out entries that
// were removed earlier in the same pass.
pub fn nearest_within<E: Entity>(
    origin: Vec2,
    candidates: &[E],
    radius: f32,
    mut alive: impl FnMut(usize) -> bool,
) -> Option<usize> {
    let radius_sq = radius * radius;
    let mut best: Option<(f32, usize)> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        if !alive(index) {
            continue;
        }
        let dist_sq = (candidate.position() - origin).length_squared();
        if dist_sq < radius_sq && best.is_none_or(|(best_sq, _)| dist_sq < best_sq) {
            best = Some((dist_sq, index));
        }
    }
    best.map(|(_, index)| index)
}

// Uniform grid over a collection, keyed by floor(position / cell_size).
// Worth it for the populations in the hundreds (plants, obstacles); the
// creature collections stay small enough that the plain scan wins.
pub struct SpatialGrid {
    cell_size: f32,
    buckets: HashMap<GridKey, Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size: cell_size.max(1.0),
            buckets: HashMap::new(),
        }
    }

    #[inline]
    fn cell(&self, position: Vec2) -> GridKey {
        (
            (position.x / self.cell_size).floor() as i32,
            (position.y / self.cell_size).floor() as i32,
        )
    }

    // Clear-and-rebuild against the current state of the collection; bucket
    // entries are slice indices into it.
    pub fn rebuild<E: Entity>(&mut self, items: &[E]) {
        self.buckets.clear();
        for (index, item) in items.iter().enumerate() {
            self.buckets
                .entry(self.cell(item.position()))
                .or_default()
                .push(index);
        }
    }

    // Same contract as the free `nearest_within`, served from the buckets.
    // Scans every ring of cells the query disc can touch, so the result set
    // is identical to the exhaustive scan; the (distance, index) comparison
    // keeps ties independent of bucket enumeration order.
    pub fn nearest_within<E: Entity>(
        &self,
        origin: Vec2,
        items: &[E],
        radius: f32,
        mut alive: impl FnMut(usize) -> bool,
    ) -> Option<usize> {
        let radius_sq = radius * radius;
        let rings = (radius / self.cell_size).ceil() as i32;
        let (center_x, center_y) = self.cell(origin);
        let mut best: Option<(f32, usize)> = None;
        for dx in -rings..=rings {
            for dy in -rings..=rings {
                let Some(bucket) = self.buckets.get(&(center_x + dx, center_y + dy)) else {
                    continue;
                };
                for &index in bucket {
                    if !alive(index) {
                        continue;
                    }
                    let dist_sq = (items[index].position() - origin).length_squared();
                    if dist_sq >= radius_sq {
                        continue;
                    }
                    let better = match best {
                        None => true,
                        Some((best_sq, best_index)) => {
                            dist_sq < best_sq || (dist_sq == best_sq && index < best_index)
                        }
                    };
                    if better {
                        best = Some((dist_sq, index));
                    }
                }
            }
        }
        best.map(|(_, index)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Plant;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn plant(x: f32, y: f32) -> Plant {
        Plant {
            position: Vec2::new(x, y),
            size: 8.0,
            last_growth_ms: 0,
        }
    }

    #[test]
    fn detect_uses_strict_euclidean_distance() {
        let plants = vec![plant(0.0, 0.0), plant(10.0, 0.0), plant(0.0, 9.9), plant(8.0, 6.0)];
        let found = detect(Vec2::ZERO, &plants, 10.0);
        // Exactly at the radius is out of range; 8-6-10 triangle is too.
        assert_eq!(found, vec![0, 2]);
    }

    #[test]
    fn detect_ignores_the_wrap_shortcut() {
        // Adjacent across the seam of a 1200-wide world, but 1190 apart
        // in plane distance.
        let plants = vec![plant(1195.0, 400.0)];
        assert!(detect(Vec2::new(5.0, 400.0), &plants, 150.0).is_empty());
    }

    #[test]
    fn nearest_breaks_ties_by_iteration_order_and_honors_the_filter() {
        let plants = vec![plant(10.0, 0.0), plant(-10.0, 0.0), plant(3.0, 0.0)];
        assert_eq!(nearest_within(Vec2::ZERO, &plants, 50.0, |_| true), Some(2));
        // Equidistant pair: first in iteration order wins.
        assert_eq!(
            nearest_within(Vec2::ZERO, &plants, 50.0, |index| index != 2),
            Some(0)
        );
        assert_eq!(nearest_within(Vec2::ZERO, &plants, 3.0, |_| true), None);
    }

    #[test]
    fn grid_lookup_matches_the_exhaustive_scan() {
        let mut rng = StdRng::seed_from_u64(42);
        let plants: Vec<Plant> = (0..400)
            .map(|_| plant(rng.gen_range(0.0..1200.0), rng.gen_range(0.0..800.0)))
            .collect();

        let mut grid = SpatialGrid::new(150.0);
        grid.rebuild(&plants);

        for _ in 0..200 {
            let origin = Vec2::new(rng.gen_range(-50.0..1250.0), rng.gen_range(-50.0..850.0));
            for radius in [8.0, 150.0, 400.0] {
                assert_eq!(
                    grid.nearest_within(origin, &plants, radius, |_| true),
                    nearest_within(origin, &plants, radius, |_| true),
                );
            }
        }
    }

    #[test]
    fn grid_respects_the_alive_filter() {
        let plants = vec![plant(5.0, 5.0), plant(20.0, 5.0)];
        let mut grid = SpatialGrid::new(100.0);
        grid.rebuild(&plants);
        assert_eq!(grid.nearest_within(Vec2::ZERO, &plants, 100.0, |_| true), Some(0));
        assert_eq!(
            grid.nearest_within(Vec2::ZERO, &plants, 100.0, |index| index != 0),
            Some(1)
        );
    }
}
// --- End of File: spatial.rs ---
