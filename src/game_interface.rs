// Types of the judge's text protocol, one `FromStr` per line shape.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::challenge_consts::{MAX_RICHNESS, MAX_TREE_SIZE, NUM_DIRECTIONS};

pub type CellId = usize;
pub type Direction = usize;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected} fields, got {got} in {line:?}")]
    FieldCount { expected: usize, got: usize, line: String },
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    #[error("value {value} out of range for {what}")]
    OutOfRange { what: &'static str, value: i64 },
    #[error("unknown action {0:?}")]
    UnknownAction(String),
}

fn fields(line: &str, expected: usize) -> Result<Vec<&str>, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != expected {
        return Err(ParseError::FieldCount {
            expected, got: fields.len(), line: line.to_string()
        });
    }
    Ok(fields)
}

pub fn parse_number<T: FromStr>(field: &str) -> Result<T, ParseError> {
    field.trim().parse::<T>()
        .map_err(|_| ParseError::InvalidNumber(field.trim().to_string()))
}

/// Parses a line holding exactly `N` whitespace separated integers.
pub fn parse_numbers<const N: usize>(line: &str) -> Result<[i64; N], ParseError> {
    let fields = fields(line, N)?;
    array_init::try_array_init(|i| parse_number::<i64>(fields[i]))
}

fn flag(value: i64) -> bool {
    value != 0
}

/// One line of the initial block: `index richness neigh0 .. neigh5`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellInput {
    pub index: CellId,
    pub richness: u8,
    pub neighbors: [Option<CellId>; NUM_DIRECTIONS],
}

impl FromStr for CellInput {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let values = parse_numbers::<8>(line)?;
        if values[0] < 0 {
            return Err(ParseError::OutOfRange { what: "cell index", value: values[0] });
        }
        if !(0..=MAX_RICHNESS as i64).contains(&values[1]) {
            return Err(ParseError::OutOfRange { what: "richness", value: values[1] });
        }
        let neighbors = array_init::array_init(|d| {
            let neighbor = values[2 + d];
            if neighbor < 0 { None } else { Some(neighbor as CellId) }
        });
        Ok(CellInput {
            index: values[0] as CellId,
            richness: values[1] as u8,
            neighbors,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tree {
    pub cell: CellId,
    pub size: u8,
    pub is_mine: bool,
    pub is_dormant: bool,
}

impl Tree {
    pub fn is_seed(&self) -> bool {
        self.size == 0
    }
}

impl FromStr for Tree {
    type Err = ParseError;

    /// `cellIndex size isMine isDormant`
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let values = parse_numbers::<4>(line)?;
        if values[0] < 0 {
            return Err(ParseError::OutOfRange { what: "tree cell", value: values[0] });
        }
        if !(0..=MAX_TREE_SIZE as i64).contains(&values[1]) {
            return Err(ParseError::OutOfRange { what: "tree size", value: values[1] });
        }
        Ok(Tree {
            cell: values[0] as CellId,
            size: values[1] as u8,
            is_mine: flag(values[2]),
            is_dormant: flag(values[3]),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerState {
    pub sun: u32,
    pub score: u32,
}

/// Everything the judge sends for one turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Turn {
    pub day: u8,
    pub nutrients: u32,
    pub me: PlayerState,
    pub opponent: PlayerState,
    pub opponent_is_waiting: bool,
    pub trees: Vec<Tree>,
    pub actions: Vec<Action>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Wait,
    Seed,
    Grow,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeedAction {
    pub source: CellId,
    pub target: CellId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Wait,
    Seed(SeedAction),
    Grow { cell: CellId },
    Complete { cell: CellId },
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Wait => ActionKind::Wait,
            Action::Seed(_) => ActionKind::Seed,
            Action::Grow { .. } => ActionKind::Grow,
            Action::Complete { .. } => ActionKind::Complete,
        }
    }

    /// Cell the action acts upon, the seeded cell for SEED.
    pub fn target(&self) -> Option<CellId> {
        match self {
            Action::Wait => None,
            Action::Seed(seed) => Some(seed.target),
            Action::Grow { cell } | Action::Complete { cell } => Some(*cell),
        }
    }

    pub fn cells(&self) -> impl Iterator<Item=CellId> {
        let (first, second) = match self {
            Action::Wait => (None, None),
            Action::Seed(seed) => (Some(seed.source), Some(seed.target)),
            Action::Grow { cell } | Action::Complete { cell } => (Some(*cell), None),
        };
        first.into_iter().chain(second)
    }
}

impl FromStr for Action {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let keyword = tokens.next().unwrap_or("");
        let mut cell = || -> Result<CellId, ParseError> {
            let token = tokens.next()
                .ok_or_else(|| ParseError::UnknownAction(line.to_string()))?;
            parse_number::<CellId>(token)
        };
        match keyword {
            "WAIT" => Ok(Action::Wait),
            "SEED" => {
                let source = cell()?;
                let target = cell()?;
                Ok(Action::Seed(SeedAction { source, target }))
            },
            "GROW" => Ok(Action::Grow { cell: cell()? }),
            "COMPLETE" => Ok(Action::Complete { cell: cell()? }),
            _ => Err(ParseError::UnknownAction(line.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Wait => write!(f, "WAIT"),
            Action::Seed(SeedAction { source, target }) => write!(f, "SEED {source} {target}"),
            Action::Grow { cell } => write!(f, "GROW {cell}"),
            Action::Complete { cell } => write!(f, "COMPLETE {cell}"),
        }
    }
}
