use std::collections::BTreeSet;

use mars_rover_core::{Coordinate, Size};
use mars_rover_plateau::{LocationSource, Plateau, RandomLocations, SeedingConfig};

#[test]
fn random_locations_are_distinct_and_in_bounds() {
    let size = Size::new(6, 4);
    let mut source = RandomLocations::seeded(7);

    let generated = source.generate(10, size, &|_: Coordinate| false);

    assert_eq!(generated.len(), 10);
    let unique: BTreeSet<_> = generated.iter().copied().collect();
    assert_eq!(unique.len(), generated.len(), "locations must be distinct");
    assert!(generated.iter().all(|coordinate| size.contains(*coordinate)));
}

#[test]
fn random_locations_avoid_taken_cells() {
    let size = Size::new(3, 3);
    let blocked = Coordinate::new(1, 1);
    let mut source = RandomLocations::seeded(11);

    let generated = source.generate(9, size, &|coordinate: Coordinate| coordinate == blocked);

    assert_eq!(generated.len(), 8, "only free cells can be proposed");
    assert!(!generated.contains(&blocked));
}

#[test]
fn random_seeding_is_deterministic_for_same_seed() {
    let seed_plateau = |seed: u64| {
        let mut plateau =
            Plateau::with_seeding(8, 8, SeedingConfig::new(5, 5)).expect("valid plateau");
        let mut source = RandomLocations::seeded(seed);
        plateau.seed_samples(&mut source).expect("samples seed");
        plateau.seed_obstacles(&mut source).expect("obstacles seed");
        (
            plateau.samples().collect::<Vec<_>>(),
            plateau.obstacles().collect::<Vec<_>>(),
        )
    };

    assert_eq!(seed_plateau(42), seed_plateau(42));
}

#[test]
fn random_seeding_keeps_samples_and_obstacles_disjoint() {
    let mut plateau =
        Plateau::with_seeding(4, 4, SeedingConfig::new(8, 8)).expect("valid plateau");
    let mut source = RandomLocations::seeded(3);

    plateau.seed_samples(&mut source).expect("samples seed");
    plateau.seed_obstacles(&mut source).expect("obstacles seed");

    let samples: BTreeSet<_> = plateau.samples().collect();
    let obstacles: BTreeSet<_> = plateau.obstacles().collect();
    assert_eq!(samples.len(), 8);
    assert_eq!(obstacles.len(), 8);
    assert!(samples.is_disjoint(&obstacles));
}

#[test]
fn random_locations_on_huge_plateau_do_not_enumerate_the_grid() {
    let size = Size::new(1_000_000, 1_000_000);
    let mut source = RandomLocations::seeded(5);

    let generated = source.generate(1, size, &|_: Coordinate| false);

    assert_eq!(generated.len(), 1);
    assert!(size.contains(generated[0]));
}

#[test]
fn random_locations_on_large_plateau_skip_taken_cells() {
    let size = Size::new(200, 200);
    let mut source = RandomLocations::seeded(9);

    let generated = source.generate(50, size, &|coordinate: Coordinate| coordinate.x() < 100);

    assert_eq!(generated.len(), 50);
    let unique: BTreeSet<_> = generated.iter().copied().collect();
    assert_eq!(unique.len(), 50, "locations must be distinct");
    assert!(generated
        .iter()
        .all(|coordinate| coordinate.x() >= 100 && size.contains(*coordinate)));
}

#[test]
fn random_locations_fill_a_crowded_large_plateau() {
    let size = Size::new(100, 100);
    let free = Coordinate::new(42, 17);
    let mut source = RandomLocations::seeded(13);

    let generated = source.generate(3, size, &|coordinate: Coordinate| coordinate != free);

    assert_eq!(generated, vec![free], "only the single free cell is available");
}
