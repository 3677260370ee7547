use mars_rover_core::{Coordinate, Direction, Instruction, ValidationError};
use mars_rover_plateau::{FixedLocations, Plateau, SeedingConfig};
use mars_rover_system_mission::{FailurePolicy, Mission, MissionConfig, RoverOutcome};

fn kata_instructions() -> Vec<Instruction> {
    vec![
        Instruction::new(1, 2, Direction::North, "LMLMLMLMM"),
        Instruction::new(3, 3, Direction::East, "MMRMMRMRRM"),
    ]
}

#[test]
fn runs_rovers_in_ingestion_order() {
    let mut plateau = Plateau::new(6, 6).expect("valid plateau");
    let report = Mission::default().run(&mut plateau, &kata_instructions());

    assert!(report.is_success());
    assert!(!report.aborted);
    let finals: Vec<_> = report
        .outcomes
        .iter()
        .map(|outcome| {
            let summary = outcome.summary().expect("rover placed");
            (summary.position, summary.direction)
        })
        .collect();
    assert_eq!(
        finals,
        vec![
            (Coordinate::new(1, 3), Direction::North),
            (Coordinate::new(5, 1), Direction::East),
        ]
    );
    assert_eq!(plateau.rovers().len(), 2, "finished rovers are registered");
}

#[test]
fn later_rover_collides_with_registered_rover() {
    let mut plateau = Plateau::new(5, 5).expect("valid plateau");
    let instructions = vec![
        Instruction::new(1, 2, Direction::North, "LMLMLMLMM"),
        Instruction::new(1, 2, Direction::North, "M"),
    ];

    let report = Mission::default().run(&mut plateau, &instructions);

    assert_eq!(report.first_error(), Some(ValidationError::Collision));
    match report.outcomes[1] {
        RoverOutcome::Halted { summary, error } => {
            assert_eq!(error.to_string(), "Watch out! You hit obstacle.");
            assert_eq!(summary.position, Coordinate::new(1, 2));
        }
        other => panic!("expected halted rover, got {other:?}"),
    }
}

#[test]
fn disabled_registration_lets_rovers_overlap() {
    let mut plateau = Plateau::new(5, 5).expect("valid plateau");
    let instructions = vec![
        Instruction::new(1, 2, Direction::North, "LMLMLMLMM"),
        Instruction::new(1, 2, Direction::North, "M"),
    ];
    let mission = Mission::new(MissionConfig::new(false, FailurePolicy::Abort));

    let report = mission.run(&mut plateau, &instructions);

    assert!(report.is_success());
    assert!(plateau.rovers().is_empty());
}

#[test]
fn abort_policy_skips_remaining_instructions() {
    let mut plateau = Plateau::new(5, 5).expect("valid plateau");
    let instructions = vec![
        Instruction::new(7, 7, Direction::North, "M"),
        Instruction::new(0, 0, Direction::North, "M"),
    ];

    let report = Mission::default().run(&mut plateau, &instructions);

    assert_eq!(report.outcomes.len(), 1);
    assert!(report.aborted);
    assert_eq!(
        report.outcomes[0],
        RoverOutcome::Rejected {
            error: ValidationError::PositionOutOfBounds
        }
    );
}

#[test]
fn continue_policy_reports_every_instruction() {
    let mut plateau = Plateau::new(5, 5).expect("valid plateau");
    let instructions = vec![
        Instruction::new(0, 0, Direction::South, "M"),
        Instruction::new(2, 2, Direction::North, "MZ"),
        Instruction::new(0, 1, Direction::South, "M"),
    ];
    let mission = Mission::new(MissionConfig::new(true, FailurePolicy::Continue));

    let report = mission.run(&mut plateau, &instructions);

    assert_eq!(report.outcomes.len(), 3);
    assert!(!report.aborted);
    assert_eq!(report.outcomes[0].error(), Some(ValidationError::OutOfBounds));
    assert_eq!(
        report.outcomes[1].error(),
        Some(ValidationError::InvalidMovement)
    );
    assert_eq!(
        report.outcomes[2].error(),
        Some(ValidationError::Collision),
        "halted rover still stands on its last legal cell"
    );
}

#[test]
fn seeding_and_collection_update_report() {
    let mut plateau =
        Plateau::with_seeding(5, 5, SeedingConfig::new(2, 1)).expect("valid plateau");
    let mut source = FixedLocations::new([
        Coordinate::new(1, 1),
        Coordinate::new(2, 2),
        Coordinate::new(4, 4),
    ]);
    let mission = Mission::default();
    mission.seed(&mut plateau, &mut source).expect("seeding succeeds");

    let report = mission.run(
        &mut plateau,
        &[Instruction::new(1, 2, Direction::North, "LMLMLMLMM")],
    );

    assert_eq!(report.remaining_samples, 1);
    let summary = report.outcomes[0].summary().expect("rover placed");
    assert_eq!(summary.collected, 1);
    assert!(plateau.is_obstacle(Coordinate::new(4, 4)));
}

#[test]
fn serialized_failures_carry_kind_and_message() {
    let mut plateau = Plateau::new(5, 5).expect("valid plateau");
    let instructions = vec![
        Instruction::new(0, 0, Direction::South, "M"),
        Instruction::new(9, 9, Direction::North, "M"),
    ];
    let mission = Mission::new(MissionConfig::new(true, FailurePolicy::Continue));

    let report = mission.run(&mut plateau, &instructions);
    let value = serde_json::to_value(&report).expect("report serializes");

    let halted = &value["outcomes"][0];
    assert_eq!(halted["outcome"], "halted");
    assert_eq!(halted["error"]["code"], "OutOfBounds");
    assert_eq!(halted["error"]["kind"], "boundary");
    assert_eq!(
        halted["error"]["message"],
        "Watch out! You are leaving the plateau."
    );
    let rejected = &value["outcomes"][1];
    assert_eq!(rejected["outcome"], "rejected");
    assert_eq!(rejected["error"]["kind"], "input");
    assert_eq!(
        rejected["error"]["message"],
        "Rover position is outside of the plateau."
    );
}
