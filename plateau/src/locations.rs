//! Location sources used to seed plateaus with samples and obstacles.

use std::collections::{BTreeSet, VecDeque};

use mars_rover_core::{Coordinate, Size};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Capability that proposes coordinates for seeding a plateau.
///
/// Implementations are not trusted: the plateau validates every returned
/// coordinate for bounds and uniqueness and rejects the batch otherwise.
pub trait LocationSource {
    /// Produces up to `count` coordinates for a plateau of `size`.
    ///
    /// `is_taken` reports coordinates that already hold a sample or obstacle.
    fn generate(
        &mut self,
        count: usize,
        size: Size,
        is_taken: &dyn Fn(Coordinate) -> bool,
    ) -> Vec<Coordinate>;
}

/// Deterministic source that replays a fixed coordinate sequence.
///
/// Every call hands out the next `count` coordinates, ignoring plateau
/// state, which makes seeding outcomes reproducible in tests.
#[derive(Clone, Debug, Default)]
pub struct FixedLocations {
    queue: VecDeque<Coordinate>,
}

impl FixedLocations {
    /// Creates a source that yields the provided coordinates in order.
    #[must_use]
    pub fn new(coordinates: impl IntoIterator<Item = Coordinate>) -> Self {
        Self {
            queue: coordinates.into_iter().collect(),
        }
    }

    /// Number of coordinates not yet handed out.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl LocationSource for FixedLocations {
    fn generate(
        &mut self,
        count: usize,
        _size: Size,
        _is_taken: &dyn Fn(Coordinate) -> bool,
    ) -> Vec<Coordinate> {
        let available = count.min(self.queue.len());
        self.queue.drain(..available).collect()
    }
}

/// Grids up to this many cells are always enumerated in full.
const FULL_SCAN_CELL_LIMIT: usize = 4096;

/// Random draws allowed per requested location before falling back to a scan.
const DRAWS_PER_LOCATION: usize = 32;

/// Seeded pseudo-random source that avoids occupied coordinates.
///
/// Small or crowded grids are enumerated and sampled without replacement.
/// Large sparse grids are sampled by drawing cells and rejecting taken ones,
/// so the cost follows `count` rather than the plateau area.
#[derive(Clone, Debug)]
pub struct RandomLocations {
    rng: ChaCha8Rng,
}

impl RandomLocations {
    /// Creates a reproducible source from the provided seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a source seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    fn scan(
        &mut self,
        count: usize,
        size: Size,
        is_taken: &dyn Fn(Coordinate) -> bool,
    ) -> Vec<Coordinate> {
        let free: Vec<Coordinate> = size
            .coordinates()
            .filter(|coordinate| !is_taken(*coordinate))
            .collect();
        free.choose_multiple(&mut self.rng, count).copied().collect()
    }

    fn draw(
        &mut self,
        count: usize,
        size: Size,
        is_taken: &dyn Fn(Coordinate) -> bool,
    ) -> Vec<Coordinate> {
        let mut chosen = BTreeSet::new();
        let mut picked = Vec::with_capacity(count);
        let mut draws = count.saturating_mul(DRAWS_PER_LOCATION);

        while picked.len() < count && draws > 0 {
            draws -= 1;
            let candidate = Coordinate::new(
                self.rng.gen_range(0..size.width()),
                self.rng.gen_range(0..size.height()),
            );
            if !is_taken(candidate) && chosen.insert(candidate) {
                picked.push(candidate);
            }
        }

        if picked.len() < count {
            let missing = count - picked.len();
            let taken_or_chosen =
                |coordinate: Coordinate| is_taken(coordinate) || chosen.contains(&coordinate);
            picked.extend(self.scan(missing, size, &taken_or_chosen));
        }
        picked
    }
}

impl LocationSource for RandomLocations {
    fn generate(
        &mut self,
        count: usize,
        size: Size,
        is_taken: &dyn Fn(Coordinate) -> bool,
    ) -> Vec<Coordinate> {
        let cells = size.cell_count();
        if count == 0 || cells == 0 {
            return Vec::new();
        }
        if cells <= FULL_SCAN_CELL_LIMIT || count.saturating_mul(2) >= cells {
            self.scan(count, size, is_taken)
        } else {
            self.draw(count, size, is_taken)
        }
    }
}
