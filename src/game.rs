// The game state, rebuilt from the judge's snapshot at every turn.

use log::debug;
use thiserror::Error;

use crate::board::Board;
use crate::challenge;
use crate::challenge_consts::{LAST_DAY, NUM_DIRECTIONS};
use crate::game_interface::{Action, CellId, Direction, PlayerState, SeedAction, Tree, Turn};
use crate::shadows::ShadowMap;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("tree on unknown cell {0}")]
    UnknownTreeCell(CellId),
    #[error("more than one tree on cell {0}")]
    DuplicateTree(CellId),
    #[error("legal action {0} references an unknown cell")]
    UnknownActionCell(Action),
}

/// Legal actions of the turn, grouped by kind, each group in judge order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegalActions {
    pub can_wait: bool,
    pub seeds: Vec<SeedAction>,
    pub grows: Vec<CellId>,
    pub completes: Vec<CellId>,
}

impl LegalActions {
    pub fn from_actions(actions: &[Action]) -> Self {
        let mut legal = LegalActions::default();
        for action in actions {
            match *action {
                Action::Wait => legal.can_wait = true,
                Action::Seed(seed) => legal.seeds.push(seed),
                Action::Grow { cell } => legal.grows.push(cell),
                Action::Complete { cell } => legal.completes.push(cell),
            }
        }
        legal
    }

    pub fn contains(&self, action: &Action) -> bool {
        match action {
            Action::Wait => self.can_wait,
            Action::Seed(seed) => self.seeds.contains(seed),
            Action::Grow { cell } => self.grows.contains(cell),
            Action::Complete { cell } => self.completes.contains(cell),
        }
    }

    pub fn len(&self) -> usize {
        self.can_wait as usize + self.seeds.len() + self.grows.len() + self.completes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trees of each owner standing in a set of shadow rays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShadowCounts {
    pub mine: u32,
    pub opp: u32,
}

/// How shadows change when a tree goes from one size to another.
///
/// `mine` counts own trees newly shadowed, plus one if the tree itself
/// becomes spooky (minus one if it stops being spooky). `opp` counts
/// opponent trees newly shadowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShadowDelta {
    pub mine: i32,
    pub opp: i32,
}

#[derive(Debug, Clone)]
pub struct Game {
    pub board: Board,
    // the game lasts 24 days: 0-23
    pub day: u8,
    // base score gained from the next COMPLETE action
    pub nutrients: u32,
    pub me: PlayerState,
    pub opponent: PlayerState,
    // whether the opponent is asleep until the next day
    pub opponent_is_waiting: bool,
    pub legal: LegalActions,
    // Shadows of the current sun direction.
    pub shadows: ShadowMap,
    // trees[cell]
    trees: Vec<Option<Tree>>,
}

impl Game {
    pub fn new(board: Board) -> Self {
        let trees = vec![None; board.len()];
        Game {
            board,
            day: 0,
            nutrients: 0,
            me: PlayerState::default(),
            opponent: PlayerState::default(),
            opponent_is_waiting: false,
            legal: LegalActions::default(),
            shadows: ShadowMap::default(),
            trees,
        }
    }

    /// Replaces the per-turn state with the judge's snapshot.
    pub fn update(&mut self, turn: Turn) -> Result<(), Error> {
        let mut trees = vec![None; self.board.len()];
        for tree in turn.trees {
            match trees.get_mut(tree.cell) {
                None => return Err(Error::UnknownTreeCell(tree.cell)),
                Some(Some(_)) => return Err(Error::DuplicateTree(tree.cell)),
                Some(slot) => *slot = Some(tree),
            }
        }
        if let Some(action) = turn.actions.iter()
            .find(|action| action.cells().any(|cell| !self.board.contains(cell))) {
            return Err(Error::UnknownActionCell(*action));
        }

        self.day = turn.day;
        self.nutrients = turn.nutrients;
        self.me = turn.me;
        self.opponent = turn.opponent;
        self.opponent_is_waiting = turn.opponent_is_waiting;
        self.legal = LegalActions::from_actions(&turn.actions);
        self.trees = trees;
        self.shadows = self.cast_shadows(&[self.sun_direction()]);
        debug!("Legal actions: {:?}", self.legal);
        Ok(())
    }

    pub fn sun_direction(&self) -> Direction {
        challenge::sun_direction(self.day)
    }

    /// Direction of the sun at the next collection, at the start of tomorrow.
    pub fn tomorrow_sun_direction(&self) -> Direction {
        (self.sun_direction() + 1) % NUM_DIRECTIONS
    }

    pub fn days_left(&self) -> u8 {
        LAST_DAY.saturating_sub(self.day)
    }

    pub fn tree(&self, cell: CellId) -> Option<&Tree> {
        self.trees.get(cell).and_then(Option::as_ref)
    }

    pub fn trees(&self) -> impl Iterator<Item=&Tree> {
        self.trees.iter().flatten()
    }

    pub fn my_trees(&self) -> impl Iterator<Item=&Tree> {
        self.trees().filter(|tree| tree.is_mine)
    }

    pub fn count_my_trees(&self) -> usize {
        self.my_trees().count()
    }

    pub fn count_my_trees_of_size(&self, size: u8) -> usize {
        self.my_trees().filter(|tree| tree.size == size).count()
    }

    pub fn count_my_seeds(&self) -> usize {
        self.count_my_trees_of_size(0)
    }

    /// Sun needed to grow one of our trees of `current_size`.
    pub fn grow_cost(&self, current_size: u8) -> Option<u32> {
        let owned_of_next_size = self.count_my_trees_of_size(current_size.saturating_add(1));
        challenge::grow_cost(current_size, owned_of_next_size)
    }

    pub fn seed_cost(&self) -> u32 {
        challenge::seed_cost(self.count_my_seeds())
    }

    pub fn completion_points(&self, cell: CellId) -> u32 {
        challenge::completion_points(self.nutrients, self.board.richness(cell))
    }

    pub fn cast_shadows(&self, directions: &[Direction]) -> ShadowMap {
        ShadowMap::cast(&self.board, self.trees(), directions)
    }

    /// Trees that a tree of `size` on `origin` would shadow along the given
    /// directions.
    pub fn shadow_counts(&self, origin: CellId, size: u8, directions: &[Direction])
        -> ShadowCounts {
        let mut counts = ShadowCounts::default();
        for &direction in directions {
            for cell in self.board.ray(origin, direction, size) {
                match self.tree(cell) {
                    Some(tree) if tree.is_mine => counts.mine += 1,
                    Some(_) => counts.opp += 1,
                    None => {},
                }
            }
        }
        counts
    }

    /// Shadow change when a tree on `origin` goes from `from_size` to
    /// `to_size`, judged against `shadows` for its own spookiness.
    pub fn shadow_delta(&self, origin: CellId, from_size: u8, to_size: u8,
                        shadows: &ShadowMap, directions: &[Direction]) -> ShadowDelta {
        let before = self.shadow_counts(origin, from_size, directions);
        let after = self.shadow_counts(origin, to_size, directions);
        let spooky = |size| shadows.is_spooky(origin, size) as i32;
        ShadowDelta {
            mine: (after.mine as i32 + spooky(to_size)) - (before.mine as i32 + spooky(from_size)),
            opp: after.opp as i32 - before.opp as i32,
        }
    }

    /// Sun a player would collect if the sun shone from `direction` on the
    /// current trees.
    pub fn sun_income(&self, is_mine: bool, direction: Direction) -> u32 {
        let shadows = self.cast_shadows(&[direction]);
        self.trees()
            .filter(|tree| tree.is_mine == is_mine)
            .filter(|tree| !shadows.is_spooky(tree.cell, tree.size))
            .map(|tree| tree.size as u32)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shadows::ALL_DIRECTIONS;
    use crate::test_support::{make_game, make_transcript_games, tree, turn};

    #[test]
    fn test_update_from_transcript() {
        let games = make_transcript_games(include_str!("../games/1001.txt"));
        assert_eq!(games.len(), 5);
        let game = &games[1];
        assert_eq!(game.day, 1);
        assert_eq!(game.me.sun, 4);
        assert_eq!(game.count_my_trees(), 3);
        assert_eq!(game.count_my_seeds(), 1);
        assert_eq!(game.tree(9), Some(&Tree { cell: 9, size: 0, is_mine: true, is_dormant: false }));
        assert!(game.tree(0).is_none());
        assert!(game.legal.can_wait);
        assert_eq!(game.legal.grows, vec![21, 30, 9]);
        assert_eq!(game.legal.len(), 11);
        assert_eq!(game.sun_direction(), 1);
        assert_eq!(game.tomorrow_sun_direction(), 2);
    }

    #[test]
    fn test_update_replaces_previous_turn() {
        let mut game = make_game(0, &[tree(0, 1, true)], &["WAIT", "GROW 0"]);
        game.update(turn(3, &[tree(4, 2, false)], &["WAIT"])).unwrap();
        assert!(game.tree(0).is_none());
        assert_eq!(game.tree(4).map(|tree| tree.size), Some(2));
        assert!(game.legal.grows.is_empty());
        assert_eq!(game.day, 3);
    }

    #[test]
    fn test_update_rejects_unknown_cells() {
        let mut game = make_game(0, &[], &["WAIT"]);
        assert_eq!(game.update(turn(0, &[tree(40, 1, true)], &[])),
                   Err(Error::UnknownTreeCell(40)));
        assert_eq!(game.update(turn(0, &[tree(3, 1, true), tree(3, 2, false)], &[])),
                   Err(Error::DuplicateTree(3)));
        assert_eq!(game.update(turn(0, &[], &["GROW 37"])),
                   Err(Error::UnknownActionCell(Action::Grow { cell: 37 })));
    }

    #[test]
    fn test_legal_actions_contains() {
        let game = make_game(0, &[tree(0, 1, true)], &["WAIT", "SEED 0 1", "GROW 0"]);
        assert!(game.legal.contains(&Action::Wait));
        assert!(game.legal.contains(&"SEED 0 1".parse().unwrap()));
        assert!(!game.legal.contains(&"SEED 0 2".parse().unwrap()));
        assert!(!game.legal.contains(&Action::Complete { cell: 0 }));
    }

    #[test]
    fn test_costs_count_only_own_trees() {
        let game = make_game(0, &[
            tree(0, 1, true), tree(1, 1, true), tree(2, 1, false), tree(3, 0, true),
            tree(4, 0, false),
        ], &["WAIT"]);
        assert_eq!(game.grow_cost(0), Some(3));
        assert_eq!(game.grow_cost(1), Some(3));
        assert_eq!(game.grow_cost(3), None);
        assert_eq!(game.grow_cost(u8::MAX), None);
        assert_eq!(game.seed_cost(), 1);
    }

    #[test]
    fn test_shadow_counts() {
        // Center tree, with trees east of it on the first two cells.
        let game = make_game(0, &[
            tree(0, 2, true), tree(1, 1, true), tree(7, 1, false), tree(4, 1, false),
        ], &["WAIT"]);
        assert_eq!(game.shadow_counts(0, 1, &[0]), ShadowCounts { mine: 1, opp: 0 });
        assert_eq!(game.shadow_counts(0, 2, &[0]), ShadowCounts { mine: 1, opp: 1 });
        assert_eq!(game.shadow_counts(0, 2, &ALL_DIRECTIONS), ShadowCounts { mine: 1, opp: 2 });
    }

    #[test]
    fn test_shadow_delta_includes_own_spookiness() {
        // Sun shines westwards: the opponent tree on 1 shadows 0 and 4.
        let game = make_game(3, &[tree(1, 2, false), tree(0, 1, true), tree(4, 1, false)], &["WAIT"]);
        let shadows = game.cast_shadows(&[3]);
        assert!(shadows.is_spooky(0, 2));
        assert!(!shadows.is_spooky(0, 3));
        // Growing 0 from 2 to 3 frees it from the shadow.
        let delta = game.shadow_delta(0, 2, 3, &shadows, &[3]);
        assert_eq!(delta, ShadowDelta { mine: -1, opp: 0 });
        // Growing 0 from 1 to 2 stays spooky and shadows nothing new.
        let delta = game.shadow_delta(0, 1, 2, &shadows, &[3]);
        assert_eq!(delta, ShadowDelta { mine: 0, opp: 0 });
    }

    #[test]
    fn test_sun_income() {
        // Day 0 sun shines eastwards: the tree on 0 shadows 1.
        let game = make_game(0, &[tree(0, 2, true), tree(1, 1, false), tree(3, 3, true)], &["WAIT"]);
        assert_eq!(game.sun_income(true, 0), 5);
        assert_eq!(game.sun_income(false, 0), 0);
        // Westwards, the tree on 1 shadows 0 but is too small to block it.
        assert_eq!(game.sun_income(true, 3), 5);
        assert_eq!(game.sun_income(false, 3), 1);
    }

    #[test]
    fn test_completion_points_and_days_left() {
        let mut game = make_game(21, &[tree(0, 3, true), tree(19, 3, true)], &["WAIT"]);
        game.nutrients = 18;
        assert_eq!(game.completion_points(0), 22);
        assert_eq!(game.completion_points(19), 18);
        assert_eq!(game.days_left(), 2);
    }
}
