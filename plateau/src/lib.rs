#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative plateau state for the Mars rover mission simulator.
//!
//! The [`Plateau`] owns the grid dimensions, the obstacle and sample sets,
//! and the registry of rovers that finished their turn. It is the single
//! source of truth for "is this coordinate occupied or out of bounds".
//! Hazards and samples are seeded through an injected [`LocationSource`].

mod locations;

use std::collections::BTreeSet;

use mars_rover_core::{Coordinate, RoverId, RoverSnapshot, Size, ValidationError};
use tracing::debug;

pub use locations::{FixedLocations, LocationSource, RandomLocations};

const CELLS_PER_SEEDED_ITEM: usize = 10;

/// Number of samples and obstacles requested while seeding a plateau.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedingConfig {
    sample_count: usize,
    obstacle_count: usize,
}

impl SeedingConfig {
    /// Creates a configuration with explicit sample and obstacle counts.
    #[must_use]
    pub const fn new(sample_count: usize, obstacle_count: usize) -> Self {
        Self {
            sample_count,
            obstacle_count,
        }
    }

    /// Scales both counts with the grid: one of each per ten cells.
    #[must_use]
    pub fn proportional(size: Size) -> Self {
        let count = size.cell_count() / CELLS_PER_SEEDED_ITEM;
        Self::new(count, count)
    }

    /// Number of samples requested by [`Plateau::seed_samples`].
    #[must_use]
    pub const fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Number of obstacles requested by [`Plateau::seed_obstacles`].
    #[must_use]
    pub const fn obstacle_count(&self) -> usize {
        self.obstacle_count
    }
}

/// Bounded rectangular grid hosting rovers, obstacles, and samples.
#[derive(Clone, Debug)]
pub struct Plateau {
    size: Size,
    seeding: SeedingConfig,
    obstacles: BTreeSet<Coordinate>,
    samples: BTreeSet<Coordinate>,
    rovers: Vec<RoverSnapshot>,
    next_rover_id: u32,
}

impl Plateau {
    /// Creates a plateau using the proportional seeding configuration.
    ///
    /// Fails with [`ValidationError::InvalidPlateauSize`] unless both
    /// dimensions are positive.
    pub fn new(width: i32, height: i32) -> Result<Self, ValidationError> {
        let size = validated_size(width, height)?;
        Ok(Self::with_size(size, SeedingConfig::proportional(size)))
    }

    /// Creates a plateau that seeds the provided number of samples and obstacles.
    pub fn with_seeding(
        width: i32,
        height: i32,
        seeding: SeedingConfig,
    ) -> Result<Self, ValidationError> {
        let size = validated_size(width, height)?;
        Ok(Self::with_size(size, seeding))
    }

    fn with_size(size: Size, seeding: SeedingConfig) -> Self {
        Self {
            size,
            seeding,
            obstacles: BTreeSet::new(),
            samples: BTreeSet::new(),
            rovers: Vec::new(),
            next_rover_id: 0,
        }
    }

    /// Dimensions of the plateau.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Seeding configuration applied by the seeding calls.
    #[must_use]
    pub const fn seeding(&self) -> SeedingConfig {
        self.seeding
    }

    /// Reports whether the coordinate lies on the plateau.
    #[must_use]
    pub const fn contains(&self, coordinate: Coordinate) -> bool {
        self.size.contains(coordinate)
    }

    /// Requests sample locations from `source` and stores them.
    ///
    /// The whole batch is rejected, leaving the plateau untouched, if any
    /// coordinate is out of bounds or already holds a sample or obstacle.
    pub fn seed_samples<S>(&mut self, source: &mut S) -> Result<(), ValidationError>
    where
        S: LocationSource + ?Sized,
    {
        let batch = self.request_batch(source, self.seeding.sample_count)?;
        debug!(count = batch.len(), "seeded samples");
        self.samples.extend(batch);
        Ok(())
    }

    /// Requests obstacle locations from `source` and stores them.
    ///
    /// Obstacles never land on existing samples or obstacles.
    pub fn seed_obstacles<S>(&mut self, source: &mut S) -> Result<(), ValidationError>
    where
        S: LocationSource + ?Sized,
    {
        let batch = self.request_batch(source, self.seeding.obstacle_count)?;
        debug!(count = batch.len(), "seeded obstacles");
        self.obstacles.extend(batch);
        Ok(())
    }

    fn request_batch<S>(
        &self,
        source: &mut S,
        count: usize,
    ) -> Result<Vec<Coordinate>, ValidationError>
    where
        S: LocationSource + ?Sized,
    {
        if count == 0 {
            return Ok(Vec::new());
        }

        let is_taken = |coordinate: Coordinate| self.is_taken(coordinate);
        let generated = source.generate(count, self.size, &is_taken);

        let mut accepted = Vec::with_capacity(count);
        for coordinate in generated.into_iter().take(count) {
            if !self.contains(coordinate) {
                return Err(ValidationError::LocationOutOfBounds);
            }
            if self.is_taken(coordinate) || accepted.contains(&coordinate) {
                return Err(ValidationError::LocationTaken);
            }
            accepted.push(coordinate);
        }
        Ok(accepted)
    }

    fn is_taken(&self, coordinate: Coordinate) -> bool {
        self.is_obstacle(coordinate) || self.is_sample(coordinate)
    }

    /// Reports whether the coordinate holds an obstacle.
    #[must_use]
    pub fn is_obstacle(&self, coordinate: Coordinate) -> bool {
        self.obstacles.contains(&coordinate)
    }

    /// Reports whether the coordinate holds an uncollected sample.
    #[must_use]
    pub fn is_sample(&self, coordinate: Coordinate) -> bool {
        self.samples.contains(&coordinate)
    }

    /// Reports whether any registered rover stands on the coordinate.
    #[must_use]
    pub fn is_occupied_by_rover(&self, coordinate: Coordinate) -> bool {
        self.occupant(coordinate).is_some()
    }

    /// Reports whether a registered rover other than `rover` stands on the coordinate.
    #[must_use]
    pub fn is_occupied_by_other_rover(&self, coordinate: Coordinate, rover: RoverId) -> bool {
        self.rovers
            .iter()
            .any(|snapshot| snapshot.position == coordinate && snapshot.id != rover)
    }

    /// Returns the first registered rover standing on the coordinate, if any.
    #[must_use]
    pub fn occupant(&self, coordinate: Coordinate) -> Option<RoverId> {
        self.rovers
            .iter()
            .find(|snapshot| snapshot.position == coordinate)
            .map(|snapshot| snapshot.id)
    }

    /// Obstacle coordinates in ascending order.
    pub fn obstacles(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.obstacles.iter().copied()
    }

    /// Uncollected sample coordinates in ascending order.
    pub fn samples(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.samples.iter().copied()
    }

    /// Number of samples still waiting to be collected.
    #[must_use]
    pub fn remaining_samples(&self) -> usize {
        self.samples.len()
    }

    /// Removes the sample at the coordinate, returning whether one was present.
    pub fn collect_sample(&mut self, coordinate: Coordinate) -> bool {
        self.samples.remove(&coordinate)
    }

    /// Hands out the identifier for the next rover constructed on this plateau.
    pub fn allocate_rover_id(&mut self) -> RoverId {
        let id = RoverId::new(self.next_rover_id);
        self.next_rover_id = self.next_rover_id.saturating_add(1);
        id
    }

    /// Adds the rover to the occupant registry without validating its position.
    ///
    /// Registering an id that is already present replaces its snapshot.
    pub fn register_rover(&mut self, snapshot: RoverSnapshot) {
        debug!(
            rover = snapshot.id.get(),
            x = snapshot.position.x(),
            y = snapshot.position.y(),
            "registered rover"
        );
        match self.rovers.iter_mut().find(|existing| existing.id == snapshot.id) {
            Some(existing) => *existing = snapshot,
            None => self.rovers.push(snapshot),
        }
    }

    /// Registered rovers in registration order.
    #[must_use]
    pub fn rovers(&self) -> &[RoverSnapshot] {
        &self.rovers
    }
}

fn validated_size(width: i32, height: i32) -> Result<Size, ValidationError> {
    if width <= 0 || height <= 0 {
        return Err(ValidationError::InvalidPlateauSize);
    }
    Ok(Size::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proportional_seeding_scales_with_cells() {
        assert_eq!(
            SeedingConfig::proportional(Size::new(5, 5)),
            SeedingConfig::new(2, 2)
        );
        assert_eq!(
            SeedingConfig::proportional(Size::new(3, 3)),
            SeedingConfig::new(0, 0)
        );
    }

    #[test]
    fn rover_ids_are_sequential() {
        let mut plateau = Plateau::new(2, 2).expect("valid plateau");
        assert_eq!(plateau.allocate_rover_id(), RoverId::new(0));
        assert_eq!(plateau.allocate_rover_id(), RoverId::new(1));
    }

    #[test]
    fn zero_count_skips_the_location_source() {
        let mut plateau =
            Plateau::with_seeding(3, 3, SeedingConfig::new(0, 0)).expect("valid plateau");
        let mut source = FixedLocations::new([Coordinate::new(9, 9)]);
        plateau.seed_samples(&mut source).expect("nothing requested");
        assert_eq!(source.remaining(), 1);
    }
}
