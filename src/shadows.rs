// Shadow projection. A tree of size s shadows the s cells that follow it
// along the sun direction. Seeds cast no shadow.

use log::debug;
use std::fmt;

use crate::board::Board;
use crate::challenge_consts::NUM_DIRECTIONS;
use crate::game_interface::{CellId, Direction, Tree};

pub const ALL_DIRECTIONS: [Direction; NUM_DIRECTIONS] = [0, 1, 2, 3, 4, 5];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shadow {
    // Shadowed cell.
    pub cell: CellId,
    pub origin: CellId,
    pub size: u8,
    pub direction: Direction,
}

/// Shadows falling on each cell, for one or more sun directions.
///
/// Casting a single direction gives the shadows of one day. Casting all six
/// gives the footprint of a whole sun cycle: every cell that some tree will
/// shadow during the next six days.
#[derive(Debug, Clone, Default)]
pub struct ShadowMap {
    // shadows[cell]
    shadows: Vec<Vec<Shadow>>,
}

impl ShadowMap {
    pub fn cast<'a>(board: &Board, trees: impl IntoIterator<Item=&'a Tree>,
                    directions: &[Direction]) -> Self {
        let mut shadows = vec![Vec::new(); board.len()];
        for tree in trees.into_iter().filter(|tree| !tree.is_seed()) {
            for &direction in directions {
                for cell in board.ray(tree.cell, direction, tree.size) {
                    shadows[cell].push(Shadow {
                        cell, origin: tree.cell, size: tree.size, direction,
                    });
                }
            }
        }
        let map = ShadowMap { shadows };
        debug!("Shadows for directions {directions:?}: {map}");
        map
    }

    pub fn at(&self, cell: CellId) -> &[Shadow] {
        self.shadows.get(cell).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_shadowed(&self, cell: CellId) -> bool {
        !self.at(cell).is_empty()
    }

    /// Whether a tree of `size` on `cell` would be blocked from the sun, i.e.
    /// shadowed by a tree at least as big.
    pub fn is_spooky(&self, cell: CellId, size: u8) -> bool {
        self.at(cell).iter().any(|shadow| shadow.size >= size)
    }

    /// Total number of shadows over the board.
    pub fn len(&self) -> usize {
        self.shadows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for ShadowMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (cell, shadows) in self.shadows.iter().enumerate() {
            if shadows.is_empty() {
                continue;
            }
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{cell}<-")?;
            for (i, shadow) in shadows.iter().enumerate() {
                if i > 0 {
                    write!(f, "/")?;
                }
                write!(f, "{}({})", shadow.origin, shadow.size)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{make_board, tree};

    #[test]
    fn test_cast_single_direction() {
        let board = make_board();
        let trees = [tree(0, 2, true), tree(2, 1, false)];
        let map = ShadowMap::cast(&board, &trees, &[0]);
        // Center tree shadows 1 and 7 eastwards, cell 2's tree shadows 8.
        assert!(map.is_shadowed(1));
        assert!(map.is_shadowed(7));
        assert!(map.is_shadowed(8));
        assert!(!map.is_shadowed(19));
        assert!(!map.is_shadowed(0));
        assert_eq!(map.len(), 3);
        assert_eq!(map.at(7), &[Shadow { cell: 7, origin: 0, size: 2, direction: 0 }]);
    }

    #[test]
    fn test_seeds_cast_no_shadow() {
        let board = make_board();
        let map = ShadowMap::cast(&board, &[tree(0, 0, true)], &ALL_DIRECTIONS);
        assert!(map.is_empty());
    }

    #[test]
    fn test_sun_cycle_footprint() {
        let board = make_board();
        let map = ShadowMap::cast(&board, &[tree(0, 1, true)], &ALL_DIRECTIONS);
        for cell in 1..=6 {
            assert!(map.is_shadowed(cell), "cell {cell}");
        }
        assert_eq!(map.len(), 6);
        let big = ShadowMap::cast(&board, &[tree(0, 3, true)], &ALL_DIRECTIONS);
        // Three cells along each of the six directions from the center.
        assert_eq!(big.len(), 18);
    }

    #[test]
    fn test_spooky_needs_equal_or_bigger_shadow() {
        let board = make_board();
        let map = ShadowMap::cast(&board, &[tree(0, 2, true)], &[0]);
        assert!(map.is_spooky(1, 1));
        assert!(map.is_spooky(1, 2));
        assert!(!map.is_spooky(1, 3));
        assert!(!map.is_spooky(19, 1));
    }

    #[test]
    fn test_display_lists_origins() {
        let board = make_board();
        let map = ShadowMap::cast(&board, &[tree(0, 1, true)], &[3]);
        assert_eq!(map.to_string(), "4<-0(1)");
    }
}
