use mars_rover_core::{Direction, Instruction, ValidationError};
use thiserror::Error;

/// Marker that starts a comment line in a mission file.
const COMMENT_PREFIX: char = '#';

/// Plateau dimensions and rover instructions read from a mission file.
///
/// ```text
/// 5 5
/// 1 2 N
/// LMLMLMLMM
/// ```
///
/// The header holds the plateau width and height. Every rover contributes a
/// position line (`X Y D`) followed by a movement line. Blank lines and lines
/// starting with `#` are skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MissionPlan {
    /// Plateau width as written in the header.
    pub(crate) width: i32,
    /// Plateau height as written in the header.
    pub(crate) height: i32,
    /// Rover instructions in file order.
    pub(crate) instructions: Vec<Instruction>,
}

impl MissionPlan {
    /// Parses a mission file using the format described on [`MissionPlan`].
    pub(crate) fn parse(contents: &str) -> Result<Self, MissionFileError> {
        let mut lines = contents
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with(COMMENT_PREFIX));

        let (header_line, header) = lines.next().ok_or(MissionFileError::Empty)?;
        let (width, height) = parse_header(header_line, header)?;

        let mut instructions = Vec::new();
        while let Some((position_line, position)) = lines.next() {
            let (x, y, direction) = parse_position(position_line, position)?;
            let (_, movement) = lines.next().ok_or(MissionFileError::MissingMovement {
                line: position_line,
            })?;
            instructions.push(Instruction::new(x, y, direction, movement));
        }

        Ok(Self {
            width,
            height,
            instructions,
        })
    }
}

/// Errors that can occur while reading a mission file.
#[derive(Debug, PartialEq, Eq, Error)]
pub(crate) enum MissionFileError {
    /// The file contained no header line.
    #[error("mission file is empty")]
    Empty,
    /// The header did not hold two integers.
    #[error("line {line}: expected plateau width and height, got '{content}'")]
    InvalidHeader {
        /// One-based line number.
        line: usize,
        /// Offending line content.
        content: String,
    },
    /// A position line did not hold two integers and a heading.
    #[error("line {line}: expected rover position 'X Y D', got '{content}'")]
    InvalidPosition {
        /// One-based line number.
        line: usize,
        /// Offending line content.
        content: String,
    },
    /// A position line named an unknown heading.
    #[error("line {line}: invalid rover heading")]
    InvalidDirection {
        /// One-based line number.
        line: usize,
        /// Validation failure raised by the heading parser.
        #[source]
        source: ValidationError,
    },
    /// A position line was the last line of the file.
    #[error("line {line}: rover position is not followed by a movement line")]
    MissingMovement {
        /// One-based line number of the orphaned position line.
        line: usize,
    },
}

fn parse_header(line: usize, header: &str) -> Result<(i32, i32), MissionFileError> {
    let invalid = || MissionFileError::InvalidHeader {
        line,
        content: header.to_owned(),
    };
    let fields: Vec<&str> = header.split_whitespace().collect();
    let [width, height] = fields.as_slice() else {
        return Err(invalid());
    };
    let width = width.parse::<i32>().map_err(|_| invalid())?;
    let height = height.parse::<i32>().map_err(|_| invalid())?;
    Ok((width, height))
}

fn parse_position(line: usize, position: &str) -> Result<(i32, i32, Direction), MissionFileError> {
    let invalid = || MissionFileError::InvalidPosition {
        line,
        content: position.to_owned(),
    };
    let fields: Vec<&str> = position.split_whitespace().collect();
    let [x, y, direction] = fields.as_slice() else {
        return Err(invalid());
    };
    let x = x.parse::<i32>().map_err(|_| invalid())?;
    let y = y.parse::<i32>().map_err(|_| invalid())?;
    let direction = direction
        .parse::<Direction>()
        .map_err(|source| MissionFileError::InvalidDirection { line, source })?;
    Ok((x, y, direction))
}
