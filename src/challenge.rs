use crate::challenge_consts::{
    COMPLETE_COST, GROW_BASE_COSTS, MAX_TREE_SIZE, NUM_DIRECTIONS, RICHNESS_BONUS, SUN_PER_POINT,
};
use crate::game_interface::Direction;

pub fn sun_direction(day: u8) -> Direction {
    day as Direction % NUM_DIRECTIONS
}

/// Sun cost to grow a tree of `current_size` by one, given how many trees of
/// the next size the player already owns. None for fully grown trees.
pub fn grow_cost(current_size: u8, owned_of_next_size: usize) -> Option<u32> {
    if current_size >= MAX_TREE_SIZE {
        return None;
    }
    Some(GROW_BASE_COSTS[current_size as usize] + owned_of_next_size as u32)
}

pub fn seed_cost(owned_seeds: usize) -> u32 {
    owned_seeds as u32
}

pub fn complete_cost() -> u32 {
    COMPLETE_COST
}

/// Points scored by completing a tree on a cell of `richness`.
pub fn completion_points(nutrients: u32, richness: u8) -> u32 {
    nutrients + RICHNESS_BONUS[(richness as usize).min(RICHNESS_BONUS.len() - 1)]
}

/// Score at the end of the game, once leftover sun is converted.
pub fn final_score(score: u32, sun: u32) -> u32 {
    score + sun / SUN_PER_POINT
}
