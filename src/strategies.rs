// Successive iterations of the decision heuristic. Each one picks a single
// action among the judge's legal list, or waits.
//
// 1. FirstLegalStrategy:    grow, else complete, else seed, first listed
// 2. RichestCellStrategy:   late completes, biggest grows, richest seeds
// 3. LeastShadowedStrategy: richest sunny seeds, least shadowed grows
// 4. SunCycleStrategy:      same ideas against a whole sun cycle of shadows

use itertools::Itertools;
use log::{debug, info};
use std::cmp::Reverse;
use std::time::Instant;

use crate::game::{Game, ShadowDelta};
use crate::game_interface::{Action, CellId, SeedAction};
use crate::shadows::{ShadowMap, ALL_DIRECTIONS};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub action: Action,
    // Shown as the in-game message.
    pub reason: &'static str,
}

impl Decision {
    pub fn new(action: Action, reason: &'static str) -> Self {
        Decision { action, reason }
    }

    pub fn wait(reason: &'static str) -> Self {
        Decision::new(Action::Wait, reason)
    }

    /// Line to send to the judge.
    pub fn command(&self, with_message: bool) -> String {
        if with_message && !self.reason.is_empty() {
            format!("{} {}", self.action, self.reason)
        } else {
            self.action.to_string()
        }
    }
}

pub trait Strategy {
    // Name to display for this strategy.
    fn name(&self) -> &str;

    // Implementation of the strategy.
    fn do_decide(&mut self, game: &Game) -> Decision;

    // Wrapper to do_decide, to log timing and the decision.
    fn decide(&mut self, game: &Game) -> Decision {
        let start = Instant::now();
        let decision = self.do_decide(game);
        debug!("Strategy {} took {:?}", self.name(), start.elapsed());
        info!("Strategy {} chose {} ({})", self.name(), decision.action, decision.reason);
        decision
    }
}

fn tree_size(game: &Game, cell: CellId) -> u8 {
    game.tree(cell).map_or(0, |tree| tree.size)
}

// First of the richest cells, in judge order.
fn richest(game: &Game, cells: impl Iterator<Item=CellId>) -> Option<CellId> {
    cells.min_by_key(|&cell| Reverse(game.board.richness(cell)))
}

fn richest_seed<'a>(game: &Game, seeds: impl Iterator<Item=&'a SeedAction>)
    -> Option<SeedAction> {
    seeds.copied().min_by_key(|seed| Reverse(game.board.richness(seed.target)))
}

/// First iteration: grow if you can, complete if you can, plant if you can.
pub struct FirstLegalStrategy {
}

impl Strategy for FirstLegalStrategy {
    fn name(&self) -> &str {
        "first-legal"
    }

    fn do_decide(&mut self, game: &Game) -> Decision {
        let legal = &game.legal;
        if let Some(&cell) = legal.grows.first() {
            Decision::new(Action::Grow { cell }, "grow")
        } else if let Some(&cell) = legal.completes.first() {
            Decision::new(Action::Complete { cell }, "complete")
        } else if let Some(&seed) = legal.seeds.first() {
            Decision::new(Action::Seed(seed), "seed")
        } else {
            Decision::wait("nothing to do")
        }
    }
}

/// Second iteration: richness decides everything. Completes are held back
/// until the last days, and grows go to the trees closest to completion.
pub struct RichestCellStrategy {
    tuning: Tuning,
}

impl RichestCellStrategy {
    pub fn new(tuning: Tuning) -> Self {
        RichestCellStrategy { tuning }
    }
}

impl Strategy for RichestCellStrategy {
    fn name(&self) -> &str {
        "richest-cell"
    }

    fn do_decide(&mut self, game: &Game) -> Decision {
        let legal = &game.legal;
        if game.day > self.tuning.complete_after_day {
            if let Some(cell) = richest(game, legal.completes.iter().copied()) {
                return Decision::new(Action::Complete { cell }, "harvest richest");
            }
        }
        let biggest = legal.grows.iter().copied().min_by_key(|&cell| {
            (Reverse(tree_size(game, cell)), Reverse(game.board.richness(cell)))
        });
        if let Some(cell) = biggest {
            return Decision::new(Action::Grow { cell }, "grow biggest");
        }
        if game.count_my_seeds() < self.tuning.max_seeds {
            if let Some(seed) = richest_seed(game, legal.seeds.iter()) {
                return Decision::new(Action::Seed(seed), "seed richest");
            }
        }
        Decision::wait("saving sun")
    }
}

/// Third iteration: looks at tomorrow's shadows. Seeds go to the richest
/// cell out of the shade and grows to the tree that shadows its own side the
/// least.
pub struct LeastShadowedStrategy {
    tuning: Tuning,
}

impl LeastShadowedStrategy {
    pub fn new(tuning: Tuning) -> Self {
        LeastShadowedStrategy { tuning }
    }
}

impl Strategy for LeastShadowedStrategy {
    fn name(&self) -> &str {
        "least-shadowed"
    }

    fn do_decide(&mut self, game: &Game) -> Decision {
        let legal = &game.legal;
        let directions = [game.tomorrow_sun_direction()];
        let shadows = game.cast_shadows(&directions);

        if game.day > self.tuning.complete_after_day {
            if let Some(cell) = richest(game, legal.completes.iter().copied()) {
                return Decision::new(Action::Complete { cell }, "harvest richest");
            }
        }
        if game.count_my_seeds() < self.tuning.max_seeds {
            let sunny = legal.seeds.iter().filter(|seed| !shadows.is_shadowed(seed.target));
            if let Some(seed) = richest_seed(game, sunny) {
                return Decision::new(Action::Seed(seed), "seed sunny cell");
            }
        }
        let least_shadowed = legal.grows.iter().copied().min_by_key(|&cell| {
            let size = tree_size(game, cell);
            let delta = game.shadow_delta(cell, size, size + 1, &shadows, &directions);
            (delta.mine, Reverse(delta.opp), game.grow_cost(size))
        });
        if let Some(cell) = least_shadowed {
            return Decision::new(Action::Grow { cell }, "grow least shadowed");
        }
        Decision::wait("saving sun")
    }
}

/// Fourth iteration: every shadow question is asked against the whole sun
/// cycle, so a tree is judged by everything it will shade over six days.
pub struct SunCycleStrategy {
    tuning: Tuning,
}

impl SunCycleStrategy {
    pub fn new(tuning: Tuning) -> Self {
        SunCycleStrategy { tuning }
    }

    fn choose_seed(&self, game: &Game, footprint: &ShadowMap) -> Option<Decision> {
        let legal = &game.legal;
        if legal.seeds.is_empty() {
            return None;
        }
        // Seed shadow free cells first.
        let free = legal.seeds.iter().filter(|seed| !footprint.is_shadowed(seed.target));
        if let Some(seed) = richest_seed(game, free) {
            return Some(Decision::new(Action::Seed(seed), "seed sunny cell"));
        }

        if game.day > self.tuning.seed_after_day
            && game.count_my_seeds() < self.tuning.max_seeds
            && game.count_my_trees() < self.tuning.max_trees_for_seeding {
            // Rank as if the seed had already grown into a small tree.
            let best = legal.seeds.iter().copied().min_by_key(|seed| {
                let delta = Self::delta(game, footprint, seed.target, 1);
                (Reverse(game.board.richness(seed.target)), delta.mine, Reverse(delta.opp))
            });
            if let Some(seed) = best {
                return Some(Decision::new(Action::Seed(seed), "seed least shadowed"));
            }
        }

        // Everything was harvested, rebuild wherever.
        if game.count_my_trees() == 1 {
            return Some(Decision::new(Action::Seed(legal.seeds[0]), "replant"));
        }
        None
    }

    fn choose_late_complete(&self, game: &Game) -> Option<Decision> {
        let completes = &game.legal.completes;
        if completes.is_empty() || game.day <= self.tuning.complete_after_day {
            return None;
        }
        let harvestable = completes.iter().copied().find(|&cell| {
            let counts = game.shadow_counts(cell, tree_size(game, cell), &ALL_DIRECTIONS);
            counts.mine > counts.opp || counts.opp < self.tuning.opp_shadow_tolerance
        });
        Some(match harvestable {
            Some(cell) => Decision::new(Action::Complete { cell }, "harvest"),
            None => Decision::new(Action::Complete { cell: completes[0] }, "harvest anyway"),
        })
    }

    fn choose_grow(&self, game: &Game, footprint: &ShadowMap) -> Option<Decision> {
        let ranked = game.legal.grows.iter().copied()
            .sorted_by_key(|&cell| {
                let delta = Self::delta(game, footprint, cell, tree_size(game, cell));
                (delta.mine, Reverse(delta.opp))
            })
            .collect_vec();
        let preferred = ranked.iter().copied()
            .find(|&cell| tree_size(game, cell) == self.tuning.preferred_grow_size);
        match preferred {
            Some(cell) => Some(Decision::new(Action::Grow { cell }, "grow preferred size")),
            None => ranked.first()
                .map(|&cell| Decision::new(Action::Grow { cell }, "grow least shadowed")),
        }
    }

    fn choose_early_complete(&self, game: &Game) -> Option<Decision> {
        if game.count_my_trees() <= 1
            || game.count_my_trees_of_size(3) < self.tuning.large_trees_before_completing {
            return None;
        }
        // Harvest the tree whose removal frees most of our own trees.
        game.legal.completes.iter().copied()
            .max_by_key(|&cell| {
                let counts = game.shadow_counts(cell, tree_size(game, cell), &ALL_DIRECTIONS);
                (counts.mine, counts.opp)
            })
            .map(|cell| Decision::new(Action::Complete { cell }, "free own trees"))
    }

    fn delta(game: &Game, footprint: &ShadowMap, cell: CellId, size: u8) -> ShadowDelta {
        game.shadow_delta(cell, size, size + 1, footprint, &ALL_DIRECTIONS)
    }
}

impl Strategy for SunCycleStrategy {
    fn name(&self) -> &str {
        "sun-cycle"
    }

    fn do_decide(&mut self, game: &Game) -> Decision {
        let footprint = game.cast_shadows(&ALL_DIRECTIONS);
        self.choose_seed(game, &footprint)
            .or_else(|| self.choose_late_complete(game))
            .or_else(|| self.choose_grow(game, &footprint))
            .or_else(|| self.choose_early_complete(game))
            .unwrap_or_else(|| Decision::wait("saving sun"))
    }
}

/// Every iteration, oldest first.
pub fn all_strategies(tuning: &Tuning) -> Vec<Box<dyn Strategy>> {
    vec![
        Box::new(FirstLegalStrategy {}),
        Box::new(RichestCellStrategy::new(tuning.clone())),
        Box::new(LeastShadowedStrategy::new(tuning.clone())),
        Box::new(SunCycleStrategy::new(tuning.clone())),
    ]
}
