use arrayvec::ArrayVec;
use thiserror::Error;

use crate::challenge_consts::{MAX_CELLS, NUM_DIRECTIONS};
use crate::game_interface::{CellId, CellInput, Direction};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("board has {0} cells, at most {MAX_CELLS} are supported")]
    TooManyCells(usize),
    #[error("cell {0} is missing or listed twice")]
    MissingCell(CellId),
    #[error("cell {cell} has out of range neighbor {neighbor}")]
    NeighborOutOfRange { cell: CellId, neighbor: CellId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub index: CellId,
    // 0 if the cell is unusable, 1-3 for usable cells
    pub richness: u8,
    // neighbors[direction], None past the edge of the board
    pub neighbors: [Option<CellId>; NUM_DIRECTIONS],
}

/// The hexagonal board, fixed for the whole game.
///
/// Index 0 is the center cell, the next cells spiral outwards. Directions are
/// numbered 0 (east) to 5 (south-east), counter-clockwise.
#[derive(Debug, Clone)]
pub struct Board {
    cells: ArrayVec<Cell, MAX_CELLS>,
}

impl Board {
    pub fn new(inputs: Vec<CellInput>) -> Result<Self, Error> {
        if inputs.len() > MAX_CELLS {
            return Err(Error::TooManyCells(inputs.len()));
        }
        let num_cells = inputs.len();
        let mut slots: Vec<Option<Cell>> = vec![None; num_cells];
        for input in inputs {
            match slots.get_mut(input.index) {
                Some(slot @ None) => {
                    *slot = Some(Cell {
                        index: input.index,
                        richness: input.richness,
                        neighbors: input.neighbors,
                    });
                },
                _ => return Err(Error::MissingCell(input.index)),
            }
        }
        let mut cells = ArrayVec::new();
        for (index, slot) in slots.into_iter().enumerate() {
            let cell = slot.ok_or(Error::MissingCell(index))?;
            if let Some(&neighbor) = cell.neighbors.iter().flatten()
                .find(|&&neighbor| neighbor >= num_cells) {
                return Err(Error::NeighborOutOfRange { cell: index, neighbor });
            }
            cells.push(cell);
        }
        Ok(Board { cells })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: CellId) -> bool {
        cell < self.cells.len()
    }

    pub fn cells(&self) -> impl Iterator<Item=&Cell> {
        self.cells.iter()
    }

    #[inline]
    pub fn cell(&self, cell: CellId) -> &Cell {
        &self.cells[cell]
    }

    #[inline]
    pub fn richness(&self, cell: CellId) -> u8 {
        self.cells[cell].richness
    }

    pub fn is_usable(&self, cell: CellId) -> bool {
        self.richness(cell) > 0
    }

    #[inline]
    pub fn neighbor(&self, cell: CellId, direction: Direction) -> Option<CellId> {
        self.cells[cell].neighbors[direction % NUM_DIRECTIONS]
    }

    pub fn are_neighbors(&self, a: CellId, b: CellId) -> bool {
        self.cells[a].neighbors.contains(&Some(b))
    }

    /// Cells 1..=length steps away from `origin` along `direction`, stopping
    /// at the edge of the board.
    pub fn ray(&self, origin: CellId, direction: Direction, length: u8)
        -> impl Iterator<Item=CellId> + '_ {
        let mut current = Some(origin);
        (0..length).map_while(move |_| {
            current = current.and_then(|cell| self.neighbor(cell, direction));
            current
        })
    }
}
