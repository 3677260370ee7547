#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Mars rover mission simulator.
//!
//! This crate defines the value types that connect the ingestion adapter,
//! the authoritative plateau, and the rover movement system. Adapters turn
//! mission files into [`Instruction`] records, the plateau stores hazards,
//! samples and [`RoverSnapshot`] registrations keyed by [`Coordinate`], and
//! every rejected precondition is reported through [`ValidationError`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Location of a single plateau cell expressed as x and y coordinates.
///
/// Coordinates are signed so that tentative positions one step beyond the
/// plateau edge, as well as malformed negative inputs, remain representable
/// until validation rejects them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    x: i32,
    y: i32,
}

impl Coordinate {
    /// Creates a new plateau coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal component, growing toward the east.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component, growing toward the north.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the neighbouring coordinate one cell away in `direction`.
    ///
    /// Yields `None` only when the step would overflow the integer range.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.offset();
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    /// Computes the Manhattan distance between two coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: Coordinate) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal headings available to rovers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Heading toward increasing y.
    #[serde(rename = "N")]
    North,
    /// Heading toward increasing x.
    #[serde(rename = "E")]
    East,
    /// Heading toward decreasing y.
    #[serde(rename = "S")]
    South,
    /// Heading toward decreasing x.
    #[serde(rename = "W")]
    West,
}

impl Direction {
    /// All headings in clockwise order starting from north.
    pub const CLOCKWISE: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Heading obtained after a 90° counter-clockwise rotation.
    #[must_use]
    pub const fn turn_left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    /// Heading obtained after a 90° clockwise rotation.
    #[must_use]
    pub const fn turn_right(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Single-letter compass code used by mission files.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'W',
        }
    }

    const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl TryFrom<char> for Direction {
    type Error = ValidationError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'N' => Ok(Self::North),
            'E' => Ok(Self::East),
            'S' => Ok(Self::South),
            'W' => Ok(Self::West),
            _ => Err(ValidationError::InvalidDirection),
        }
    }
}

impl FromStr for Direction {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Self::try_from(letter),
            _ => Err(ValidationError::InvalidDirection),
        }
    }
}

/// Single token of a rover movement program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Rotate 90° counter-clockwise without moving.
    #[serde(rename = "L")]
    Left,
    /// Rotate 90° clockwise without moving.
    #[serde(rename = "R")]
    Right,
    /// Advance one cell along the current heading.
    #[serde(rename = "M")]
    Forward,
}

impl Move {
    /// Parses a movement string such as `LMLMLMLMM` into tokens.
    ///
    /// An empty string produces an empty program. Any character outside
    /// `L`, `R` and `M` rejects the whole string.
    pub fn parse_sequence(movement: &str) -> Result<Vec<Move>, ValidationError> {
        movement.chars().map(Move::try_from).collect()
    }

    /// Single-letter code used by mission files.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Left => 'L',
            Self::Right => 'R',
            Self::Forward => 'M',
        }
    }
}

impl TryFrom<char> for Move {
    type Error = ValidationError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'L' => Ok(Self::Left),
            'R' => Ok(Self::Right),
            'M' => Ok(Self::Forward),
            _ => Err(ValidationError::InvalidMovement),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Dimensions of a plateau measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    width: i32,
    height: i32,
}

impl Size {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Reports whether the coordinate lies within `[0, width) × [0, height)`.
    #[must_use]
    pub const fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.x() >= 0
            && coordinate.x() < self.width
            && coordinate.y() >= 0
            && coordinate.y() < self.height
    }

    /// Total number of cells covered by the size, zero for degenerate sizes.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let width = usize::try_from(self.width).unwrap_or(0);
        let height = usize::try_from(self.height).unwrap_or(0);
        width.saturating_mul(height)
    }

    /// Iterator over every coordinate of the grid in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> {
        let width = self.width.max(0);
        let height = self.height.max(0);
        (0..height).flat_map(move |y| (0..width).map(move |x| Coordinate::new(x, y)))
    }
}

/// Unique identifier assigned to a rover by its plateau.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoverId(u32);

impl RoverId {
    /// Creates a new rover identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Immutable record of a rover stored in the plateau's occupant registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoverSnapshot {
    /// Identifier allocated to the rover by the plateau.
    pub id: RoverId,
    /// Cell the rover occupies.
    pub position: Coordinate,
    /// Heading the rover faces.
    pub direction: Direction,
}

/// Starting state and program for one rover, produced by ingestion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    x: i32,
    y: i32,
    direction: Direction,
    movement: String,
}

impl Instruction {
    /// Creates a new instruction record.
    #[must_use]
    pub fn new(x: i32, y: i32, direction: Direction, movement: impl Into<String>) -> Self {
        Self {
            x,
            y,
            direction,
            movement: movement.into(),
        }
    }

    /// Starting x coordinate.
    #[must_use]
    pub const fn position_x(&self) -> i32 {
        self.x
    }

    /// Starting y coordinate.
    #[must_use]
    pub const fn position_y(&self) -> i32 {
        self.y
    }

    /// Starting heading.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Raw movement string, validated when handed to a rover.
    #[must_use]
    pub fn movement(&self) -> &str {
        &self.movement
    }
}

/// Coarse classification of a [`ValidationError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed construction, seeding or program input.
    Input,
    /// A movement that would leave the plateau.
    Boundary,
    /// A movement onto an obstacle or another rover.
    Collision,
}

/// Every rejected precondition in the simulator, each with a fixed message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum ValidationError {
    /// Plateau width or height was zero or negative.
    #[error("Plateau width and height must be greater than zero.")]
    InvalidPlateauSize,
    /// Rover starting position lies outside the plateau.
    #[error("Rover position is outside of the plateau.")]
    PositionOutOfBounds,
    /// Rover starting position holds an obstacle or another rover.
    #[error("Rover position is already occupied.")]
    PositionOccupied,
    /// Heading was not one of `N`, `E`, `S` or `W`.
    #[error("Direction must be one of N, E, S or W.")]
    InvalidDirection,
    /// Movement program contained a token other than `L`, `R` or `M`.
    #[error("Movement must only contain L, R or M.")]
    InvalidMovement,
    /// Location source produced a coordinate outside the plateau.
    #[error("Generated location is outside of the plateau.")]
    LocationOutOfBounds,
    /// Location source produced a coordinate that is already a sample or obstacle.
    #[error("Generated location is already taken.")]
    LocationTaken,
    /// Rover was asked to change or run its program after leaving the idle state.
    #[error("Rover has already executed its movement.")]
    AlreadyExecuted,
    /// Forward move would leave the plateau.
    #[error("Watch out! You are leaving the plateau.")]
    OutOfBounds,
    /// Forward move would hit an obstacle or another rover.
    #[error("Watch out! You hit obstacle.")]
    Collision,
}

impl ValidationError {
    /// Classifies the error into input, boundary or collision failures.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfBounds => ErrorKind::Boundary,
            Self::Collision => ErrorKind::Collision,
            _ => ErrorKind::Input,
        }
    }
}
