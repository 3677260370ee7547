#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Sequential mission runner that drives rovers across a shared plateau.
//!
//! Rovers are processed strictly in ingestion order. Each rover executes its
//! whole program before the next one is constructed, so a rover only sees
//! the rovers registered strictly before it.

use mars_rover_core::{Coordinate, Direction, Instruction, RoverId, Size, ValidationError};
use mars_rover_plateau::{LocationSource, Plateau};
use mars_rover_system_movement::Rover;
use serde::{ser::SerializeStruct, Serialize, Serializer};
use tracing::{info, warn};

/// Behaviour of the runner once a rover fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FailurePolicy {
    /// Stop at the first rejected or halted rover.
    #[default]
    Abort,
    /// Report the failure and continue with the next instruction.
    Continue,
}

/// Configuration parameters required to construct the mission runner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MissionConfig {
    register_rovers: bool,
    failure_policy: FailurePolicy,
}

impl MissionConfig {
    /// Creates a new configuration.
    ///
    /// With `register_rovers` set, every placed rover joins the plateau's
    /// occupant registry once its turn ends, halted rovers included.
    #[must_use]
    pub const fn new(register_rovers: bool, failure_policy: FailurePolicy) -> Self {
        Self {
            register_rovers,
            failure_policy,
        }
    }

    /// Reports whether finished rovers are registered on the plateau.
    #[must_use]
    pub const fn register_rovers(&self) -> bool {
        self.register_rovers
    }

    /// Policy applied after a failed rover.
    #[must_use]
    pub const fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self::new(true, FailurePolicy::Abort)
    }
}

/// Observable result of a rover that was placed on the plateau.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RoverSummary {
    /// Identifier allocated by the plateau.
    pub id: RoverId,
    /// Final cell.
    pub position: Coordinate,
    /// Final heading.
    pub direction: Direction,
    /// Number of samples in the basket.
    pub collected: usize,
}

impl RoverSummary {
    fn of(rover: &Rover) -> Self {
        Self {
            id: rover.id(),
            position: rover.position(),
            direction: rover.direction(),
            collected: rover.basket().len(),
        }
    }
}

/// Outcome of one instruction record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RoverOutcome {
    /// Rover consumed its whole program.
    Completed(RoverSummary),
    /// Rover stopped on an illegal move; the summary holds its last legal state.
    Halted {
        /// State before the failing move.
        summary: RoverSummary,
        /// Reason the move was rejected.
        #[serde(serialize_with = "serialize_error")]
        error: ValidationError,
    },
    /// Rover could not be placed or its program could not be loaded.
    Rejected {
        /// Reason the instruction was rejected.
        #[serde(serialize_with = "serialize_error")]
        error: ValidationError,
    },
}

/// Writes an error as its variant code, kind, and fixed user-facing message.
fn serialize_error<S>(error: &ValidationError, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut state = serializer.serialize_struct("ValidationError", 3)?;
    state.serialize_field("code", error)?;
    state.serialize_field("kind", &error.kind())?;
    state.serialize_field("message", &error.to_string())?;
    state.end()
}

impl RoverOutcome {
    /// Error that ended the rover's turn, if any.
    #[must_use]
    pub const fn error(&self) -> Option<ValidationError> {
        match self {
            Self::Completed(_) => None,
            Self::Halted { error, .. } | Self::Rejected { error } => Some(*error),
        }
    }

    /// Summary of the rover, absent for rejected instructions.
    #[must_use]
    pub const fn summary(&self) -> Option<RoverSummary> {
        match self {
            Self::Completed(summary) | Self::Halted { summary, .. } => Some(*summary),
            Self::Rejected { .. } => None,
        }
    }
}

/// Aggregated results of a mission run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MissionReport {
    /// Dimensions of the plateau the mission ran on.
    pub size: Size,
    /// One outcome per attempted instruction, in ingestion order.
    pub outcomes: Vec<RoverOutcome>,
    /// Whether instructions were skipped after a failure.
    pub aborted: bool,
    /// Samples left on the plateau after the run.
    pub remaining_samples: usize,
}

impl MissionReport {
    /// First error reported by any rover.
    #[must_use]
    pub fn first_error(&self) -> Option<ValidationError> {
        self.outcomes.iter().find_map(RoverOutcome::error)
    }

    /// Reports whether every attempted rover completed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.first_error().is_none()
    }
}

/// Pure system that runs instruction records against a plateau in order.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mission {
    config: MissionConfig,
}

impl Mission {
    /// Creates a new mission runner using the supplied configuration.
    #[must_use]
    pub const fn new(config: MissionConfig) -> Self {
        Self { config }
    }

    /// Seeds samples and then obstacles from the same location source.
    pub fn seed<S>(&self, plateau: &mut Plateau, source: &mut S) -> Result<(), ValidationError>
    where
        S: LocationSource + ?Sized,
    {
        plateau.seed_samples(source)?;
        plateau.seed_obstacles(source)
    }

    /// Executes every instruction in order, honouring the failure policy.
    pub fn run(&self, plateau: &mut Plateau, instructions: &[Instruction]) -> MissionReport {
        let mut outcomes = Vec::with_capacity(instructions.len());
        let mut aborted = false;

        for (index, instruction) in instructions.iter().enumerate() {
            let outcome = self.drive(plateau, instruction);
            let failed = outcome.error().is_some();
            outcomes.push(outcome);

            if failed && self.config.failure_policy == FailurePolicy::Abort {
                aborted = index + 1 < instructions.len();
                break;
            }
        }

        MissionReport {
            size: plateau.size(),
            outcomes,
            aborted,
            remaining_samples: plateau.remaining_samples(),
        }
    }

    fn drive(&self, plateau: &mut Plateau, instruction: &Instruction) -> RoverOutcome {
        let mut rover = match Rover::from_instruction(instruction, plateau) {
            Ok(rover) => rover,
            Err(error) => {
                warn!(
                    x = instruction.position_x(),
                    y = instruction.position_y(),
                    %error,
                    "rejected rover instruction"
                );
                return RoverOutcome::Rejected { error };
            }
        };

        let result = rover.go(plateau);
        if self.config.register_rovers {
            plateau.register_rover(rover.snapshot());
        }

        let summary = RoverSummary::of(&rover);
        match result {
            Ok(()) => {
                info!(rover = summary.id.get(), "rover finished turn");
                RoverOutcome::Completed(summary)
            }
            Err(error) => RoverOutcome::Halted { summary, error },
        }
    }
}
