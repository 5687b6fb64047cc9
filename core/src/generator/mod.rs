use alloc::collections::BTreeSet;
use rand::Rng;

use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}

/// Picks `mine_count` distinct cell indices uniformly from `0..total_cells`.
pub fn place_mines<R: Rng + ?Sized>(
    rng: &mut R,
    total_cells: CellCount,
    mine_count: CellCount,
) -> Result<BTreeSet<CellCount>> {
    if mine_count > total_cells {
        return Err(ConfigError::TooManyMines {
            requested: mine_count.into(),
            available: total_cells,
        }
        .into());
    }

    let indices = rand::seq::index::sample(rng, total_cells.into(), mine_count.into());
    Ok(indices
        .into_iter()
        .map(|index| index as CellCount)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn places_exactly_the_requested_number_of_distinct_mines() {
        let mut rng = SmallRng::seed_from_u64(7);

        for mine_count in [0, 1, 13, 40, 99] {
            let mines = place_mines(&mut rng, 99, mine_count).unwrap();
            assert_eq!(mines.len(), usize::from(mine_count));
            assert!(mines.iter().all(|&index| index < 99));
        }
    }

    #[test]
    fn rejects_more_mines_than_cells() {
        let mut rng = SmallRng::seed_from_u64(7);

        assert_eq!(
            place_mines(&mut rng, 4, 5),
            Err(GameError::InvalidConfiguration(ConfigError::TooManyMines {
                requested: 5,
                available: 4,
            }))
        );
    }
}
