#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that drives a single rover across a plateau.
//!
//! A [`Rover`] owns its position, heading, basket and movement program but
//! never the plateau it stands on: every operation that consults hazards or
//! occupants borrows the [`Plateau`] for the duration of the call.

use mars_rover_core::{
    Coordinate, Direction, Instruction, Move, RoverId, RoverSnapshot, ValidationError,
};
use mars_rover_plateau::Plateau;
use tracing::{debug, info, warn};

/// Lifecycle of a rover's movement program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoverState {
    /// Constructed, program not yet executed.
    Idle,
    /// Executing its program.
    Running,
    /// Stopped on an illegal move; terminal.
    Halted,
    /// Consumed every token without error; terminal.
    Completed,
}

impl RoverState {
    /// Reports whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Halted | Self::Completed)
    }
}

/// Mobile agent that executes a movement program on a plateau.
#[derive(Clone, Debug)]
pub struct Rover {
    id: RoverId,
    position: Coordinate,
    direction: Direction,
    basket: Vec<Coordinate>,
    movement: Vec<Move>,
    executed: usize,
    state: RoverState,
}

impl Rover {
    /// Places a new idle rover at `(x, y)` facing `direction`.
    ///
    /// Fails with [`ValidationError::PositionOutOfBounds`] when the
    /// coordinate lies outside the plateau and with
    /// [`ValidationError::PositionOccupied`] when it holds an obstacle or a
    /// registered rover.
    pub fn new(
        x: i32,
        y: i32,
        direction: Direction,
        plateau: &mut Plateau,
    ) -> Result<Self, ValidationError> {
        let position = Coordinate::new(x, y);
        if !plateau.contains(position) {
            return Err(ValidationError::PositionOutOfBounds);
        }
        if plateau.is_obstacle(position) || plateau.is_occupied_by_rover(position) {
            return Err(ValidationError::PositionOccupied);
        }

        let id = plateau.allocate_rover_id();
        debug!(rover = id.get(), %position, %direction, "placed rover");
        Ok(Self {
            id,
            position,
            direction,
            basket: Vec::new(),
            movement: Vec::new(),
            executed: 0,
            state: RoverState::Idle,
        })
    }

    /// Places a rover and loads its program from an ingestion record.
    pub fn from_instruction(
        instruction: &Instruction,
        plateau: &mut Plateau,
    ) -> Result<Self, ValidationError> {
        let mut rover = Self::new(
            instruction.position_x(),
            instruction.position_y(),
            instruction.direction(),
            plateau,
        )?;
        rover.set_movement(instruction.movement())?;
        Ok(rover)
    }

    /// Replaces the pending program with the parsed `movement` string.
    ///
    /// The previous program is kept when parsing fails.
    pub fn set_movement(&mut self, movement: &str) -> Result<(), ValidationError> {
        if self.state != RoverState::Idle {
            return Err(ValidationError::AlreadyExecuted);
        }
        self.movement = Move::parse_sequence(movement)?;
        Ok(())
    }

    /// Executes the stored program against `plateau`, token by token.
    ///
    /// The first illegal forward move halts the rover and is returned; the
    /// rover keeps the position and heading it had before that move.
    pub fn go(&mut self, plateau: &mut Plateau) -> Result<(), ValidationError> {
        if self.state != RoverState::Idle {
            return Err(ValidationError::AlreadyExecuted);
        }

        self.state = RoverState::Running;
        while let Some(&step) = self.movement.get(self.executed) {
            if let Err(error) = self.apply(step, plateau) {
                self.state = RoverState::Halted;
                warn!(
                    rover = self.id.get(),
                    step = self.executed,
                    position = %self.position,
                    %error,
                    "rover halted"
                );
                return Err(error);
            }
            self.executed += 1;
        }

        self.state = RoverState::Completed;
        info!(
            rover = self.id.get(),
            position = %self.position,
            direction = %self.direction,
            samples = self.basket.len(),
            "rover completed movement"
        );
        Ok(())
    }

    fn apply(&mut self, step: Move, plateau: &mut Plateau) -> Result<(), ValidationError> {
        match step {
            Move::Left => self.direction = self.direction.turn_left(),
            Move::Right => self.direction = self.direction.turn_right(),
            Move::Forward => self.advance(plateau)?,
        }
        debug!(
            rover = self.id.get(),
            %step,
            position = %self.position,
            direction = %self.direction,
            "rover step"
        );
        Ok(())
    }

    fn advance(&mut self, plateau: &mut Plateau) -> Result<(), ValidationError> {
        let target = self
            .position
            .step(self.direction)
            .ok_or(ValidationError::OutOfBounds)?;

        if plateau.is_obstacle(target) || plateau.is_occupied_by_other_rover(target, self.id) {
            return Err(ValidationError::Collision);
        }
        if !plateau.contains(target) {
            return Err(ValidationError::OutOfBounds);
        }

        self.position = target;
        if plateau.collect_sample(target) {
            debug!(rover = self.id.get(), sample = %target, "collected sample");
            self.basket.push(target);
        }
        Ok(())
    }

    /// Identifier allocated by the plateau.
    #[must_use]
    pub const fn id(&self) -> RoverId {
        self.id
    }

    /// Current cell.
    #[must_use]
    pub const fn position(&self) -> Coordinate {
        self.position
    }

    /// Current heading.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Samples collected so far, in collection order.
    #[must_use]
    pub fn basket(&self) -> &[Coordinate] {
        &self.basket
    }

    /// Loaded movement program.
    #[must_use]
    pub fn movement(&self) -> &[Move] {
        &self.movement
    }

    /// Number of tokens applied successfully.
    #[must_use]
    pub const fn executed_steps(&self) -> usize {
        self.executed
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> RoverState {
        self.state
    }

    /// Immutable record suitable for [`Plateau::register_rover`].
    #[must_use]
    pub const fn snapshot(&self) -> RoverSnapshot {
        RoverSnapshot {
            id: self.id,
            position: self.position,
            direction: self.direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_program_parse_keeps_previous_program() {
        let mut plateau = Plateau::new(3, 3).expect("valid plateau");
        let mut rover = Rover::new(0, 0, Direction::North, &mut plateau).expect("placed");
        rover.set_movement("MR").expect("valid program");

        assert_eq!(
            rover.set_movement("MQ"),
            Err(ValidationError::InvalidMovement)
        );
        assert_eq!(rover.movement(), &[Move::Forward, Move::Right]);
    }

    #[test]
    fn terminal_states() {
        assert!(!RoverState::Idle.is_terminal());
        assert!(!RoverState::Running.is_terminal());
        assert!(RoverState::Halted.is_terminal());
        assert!(RoverState::Completed.is_terminal());
    }
}
