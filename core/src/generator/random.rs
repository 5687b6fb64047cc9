use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Purely random generation, every layout with the configured mine count is equally likely.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        config.validate()?;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mine_indices = place_mines(&mut rng, config.total_cells(), config.mines)?;
        let layout = MineLayout::from_mine_indices(config.size, &mine_indices)?;

        // double check mine count
        if layout.mine_count() != config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines
            );
        }
        log::debug!(
            "generated {}x{} layout with {} mines from seed {}",
            config.rows(),
            config.cols(),
            layout.mine_count(),
            self.seed
        );
        Ok(layout)
    }
}
