use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::Reverse;
use hashbrown::HashMap;

use crate::*;

/// Which cells count as one step away.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Connectivity {
    /// 8-connected, diagonal steps cost the same as orthogonal ones. Searched with the Chebyshev
    /// heuristic, Manhattan distance would overestimate here.
    #[default]
    Moore,
    /// 4-connected, searched with the Manhattan heuristic.
    Orthogonal,
}

impl Connectivity {
    pub fn neighbors(self, coords: Coord2, bounds: Coord2) -> NeighborIter {
        match self {
            Self::Moore => NeighborIter::moore(coords, bounds),
            Self::Orthogonal => NeighborIter::orthogonal(coords, bounds),
        }
    }

    /// Admissible and consistent distance estimate for this movement model.
    pub fn heuristic(self, from: Coord2, to: Coord2) -> u32 {
        match self {
            Self::Moore => chebyshev(from, to),
            Self::Orthogonal => manhattan(from, to),
        }
    }
}

/// A* shortest paths on an obstacle-free grid with unit step cost.
///
/// Open-list ties on f-score are broken by insertion order, so results are reproducible.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PathFinder {
    size: Coord2,
    connectivity: Connectivity,
}

impl PathFinder {
    pub fn new(size: Coord2) -> Self {
        Self {
            size,
            connectivity: Connectivity::default(),
        }
    }

    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Shortest path from `start` to `goal`, both inclusive. Empty when either end is outside the
    /// grid.
    pub fn find_path(&self, start: Coord2, goal: Coord2) -> Vec<Coord2> {
        self.find_path_with(start, goal, |_| true)
    }

    /// Like [`PathFinder::find_path`] but only steps onto cells accepted by `passable`. The start
    /// cell is never checked. Empty when no path exists.
    pub fn find_path_with(
        &self,
        start: Coord2,
        goal: Coord2,
        mut passable: impl FnMut(Coord2) -> bool,
    ) -> Vec<Coord2> {
        if !in_bounds(start, self.size) || !in_bounds(goal, self.size) {
            return Vec::new();
        }

        let mut open = BinaryHeap::new();
        let mut came_from: HashMap<Coord2, Coord2> = HashMap::new();
        let mut g_score: HashMap<Coord2, u32> = HashMap::new();
        let mut sequence: u64 = 0;
        let mut expanded = 0usize;

        g_score.insert(start, 0);
        open.push(Reverse((self.connectivity.heuristic(start, goal), sequence, start, 0)));

        while let Some(Reverse((_, _, current, current_g))) = open.pop() {
            if current == goal {
                log::trace!("path search expanded {} nodes", expanded);
                return reconstruct_path(&came_from, current);
            }

            // stale entry, a cheaper route to `current` was queued after this one
            if g_score.get(&current).is_some_and(|&best| current_g > best) {
                continue;
            }
            expanded += 1;

            for neighbor in self.connectivity.neighbors(current, self.size) {
                if !passable(neighbor) {
                    continue;
                }

                let tentative_g = current_g + 1;
                if g_score.get(&neighbor).is_none_or(|&known| tentative_g < known) {
                    came_from.insert(neighbor, current);
                    g_score.insert(neighbor, tentative_g);
                    sequence += 1;
                    let f_score = tentative_g + self.connectivity.heuristic(neighbor, goal);
                    open.push(Reverse((f_score, sequence, neighbor, tentative_g)));
                }
            }
        }

        log::trace!("no path after expanding {} nodes", expanded);
        Vec::new()
    }
}

fn reconstruct_path(came_from: &HashMap<Coord2, Coord2>, mut current: Coord2) -> Vec<Coord2> {
    let mut path = alloc::vec![current];
    while let Some(&previous) = came_from.get(&current) {
        current = previous;
        path.push(current);
    }
    path.reverse();
    path
}
