use serde::{Deserialize, Serialize};

use super::stat::{Level, LEVEL_RANGE};

/// Where a species sits in its evolution chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvolutionStage {
    /// Does not evolve from anything.
    Base,
    /// Evolves from something and can still evolve.
    Middle,
    /// Evolves from something and cannot evolve further.
    Final,
}

impl EvolutionStage {
    pub fn new(evolves_from: bool, evolves_to: bool) -> Self {
        match (evolves_from, evolves_to) {
            (false, _) => Self::Base,
            (true, true) => Self::Middle,
            (true, false) => Self::Final,
        }
    }
}

const SUGGESTED_LEVEL: Level = 50;

/// A reasonable starting level for a species at `stage`.
pub fn suggested_level(stage: EvolutionStage) -> Level {
    match stage {
        EvolutionStage::Base => SUGGESTED_LEVEL.saturating_sub(30).max(*LEVEL_RANGE.start()),
        EvolutionStage::Middle => SUGGESTED_LEVEL,
        EvolutionStage::Final => SUGGESTED_LEVEL + 20,
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn stages() {
        assert_eq!(suggested_level(EvolutionStage::new(false, true)), 20);
        assert_eq!(suggested_level(EvolutionStage::new(false, false)), 20);
        assert_eq!(suggested_level(EvolutionStage::new(true, true)), 50);
        assert_eq!(suggested_level(EvolutionStage::new(true, false)), 70);
    }
}
