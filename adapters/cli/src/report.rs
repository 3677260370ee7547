use std::io::{self, Write};

use mars_rover_system_mission::{MissionReport, RoverOutcome, RoverSummary};

/// Writes one line per attempted rover.
///
/// Completed rovers print `X Y D samples=N`; halted rovers append the error
/// to their last legal state; rejected instructions print only the error.
pub(crate) fn write_text<W: Write>(report: &MissionReport, out: &mut W) -> io::Result<()> {
    for outcome in &report.outcomes {
        match outcome {
            RoverOutcome::Completed(summary) => writeln!(out, "{}", summary_line(summary))?,
            RoverOutcome::Halted { summary, error } => {
                writeln!(out, "{} error: {error}", summary_line(summary))?;
            }
            RoverOutcome::Rejected { error } => writeln!(out, "error: {error}")?,
        }
    }
    Ok(())
}

/// Writes the whole report as pretty-printed JSON.
pub(crate) fn write_json<W: Write>(report: &MissionReport, out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}

fn summary_line(summary: &RoverSummary) -> String {
    format!(
        "{} {} {} samples={}",
        summary.position.x(),
        summary.position.y(),
        summary.direction,
        summary.collected
    )
}

#[cfg(test)]
mod tests {
    use mars_rover_core::{Coordinate, Direction, RoverId, Size, ValidationError};

    use super::*;

    fn report() -> MissionReport {
        let summary = RoverSummary {
            id: RoverId::new(0),
            position: Coordinate::new(1, 3),
            direction: Direction::North,
            collected: 0,
        };
        MissionReport {
            size: Size::new(5, 5),
            outcomes: vec![
                RoverOutcome::Completed(summary),
                RoverOutcome::Halted {
                    summary: RoverSummary {
                        id: RoverId::new(1),
                        position: Coordinate::new(1, 2),
                        ..summary
                    },
                    error: ValidationError::Collision,
                },
                RoverOutcome::Rejected {
                    error: ValidationError::PositionOutOfBounds,
                },
            ],
            aborted: false,
            remaining_samples: 0,
        }
    }

    #[test]
    fn text_report_lists_each_rover() {
        let mut buffer = Vec::new();
        write_text(&report(), &mut buffer).expect("write to memory");

        assert_eq!(
            String::from_utf8(buffer).expect("utf8"),
            "1 3 N samples=0\n\
             1 2 N samples=0 error: Watch out! You hit obstacle.\n\
             error: Rover position is outside of the plateau.\n"
        );
    }

    #[test]
    fn json_report_uses_compass_letters() {
        let mut buffer = Vec::new();
        write_json(&report(), &mut buffer).expect("write to memory");

        let value: serde_json::Value = serde_json::from_slice(&buffer).expect("valid json");
        assert_eq!(value["outcomes"][0]["outcome"], "completed");
        assert_eq!(value["outcomes"][0]["direction"], "N");
        assert_eq!(value["outcomes"][1]["error"]["code"], "Collision");
        assert_eq!(value["outcomes"][1]["error"]["kind"], "collision");
        assert_eq!(
            value["outcomes"][1]["error"]["message"],
            "Watch out! You hit obstacle."
        );
        assert_eq!(
            value["outcomes"][2]["error"]["message"],
            "Rover position is outside of the plateau."
        );
    }
}
