// Fixed parameters of the game. The board and turn count never change.

pub const MAX_CELLS: usize = 37;
pub const NUM_DIRECTIONS: usize = 6;

// Days are numbered 0..=LAST_DAY.
pub const NUM_DAYS: u8 = 24;
pub const LAST_DAY: u8 = NUM_DAYS - 1;

pub const MAX_TREE_SIZE: u8 = 3;
pub const MAX_RICHNESS: u8 = 3;

// Base sun cost to grow into size 1, 2 and 3, before the per-tree surcharge.
pub const GROW_BASE_COSTS: [u32; MAX_TREE_SIZE as usize] = [1, 3, 7];
pub const COMPLETE_COST: u32 = 4;

// Score bonus when completing on a cell of richness 0..=3.
pub const RICHNESS_BONUS: [u32; MAX_RICHNESS as usize + 1] = [0, 0, 2, 4];

// Leftover sun converts to score at the end of the game.
pub const SUN_PER_POINT: u32 = 3;
