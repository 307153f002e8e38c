use crate::config::StrategyConfig;
use crate::error::Result;
use crate::escape::{EscapeEnvironment, EscapeStrategy, TopNDiversionEscape};
use crate::explore::{BestNodeExplore, ExplorationEnvironment, ExploreStrategy};

/// Owns one strategy per phase and hands each phase to it.
///
/// Every call builds its per-run state (exploration graph, escape map) from
/// scratch, so one `Explorer` can drive any number of runs.
pub struct Explorer {
    explore_strategy: Box<dyn ExploreStrategy>,
    escape_strategy: Box<dyn EscapeStrategy>,
}

impl Explorer {
    /// Build an explorer with the default strategies for `config`.
    pub fn new(config: StrategyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_strategies(
            Box::new(BestNodeExplore::new(config.explore)),
            Box::new(TopNDiversionEscape::new(config.escape)),
        ))
    }

    pub fn with_strategies(
        explore_strategy: Box<dyn ExploreStrategy>,
        escape_strategy: Box<dyn EscapeStrategy>,
    ) -> Self {
        Self {
            explore_strategy,
            escape_strategy,
        }
    }

    /// Find the target of the exploration phase.
    pub fn explore(&self, env: &mut dyn ExplorationEnvironment) -> Result<()> {
        tracing::debug!(strategy = self.explore_strategy.name(), "exploring");
        self.explore_strategy.explore(env)
    }

    /// Reach the exit of the escape phase.
    pub fn escape(&self, env: &mut dyn EscapeEnvironment) -> Result<()> {
        tracing::debug!(strategy = self.escape_strategy.name(), "escaping");
        self.escape_strategy.escape(env)
    }
}

impl Default for Explorer {
    fn default() -> Self {
        Self::with_strategies(
            Box::<BestNodeExplore>::default(),
            Box::<TopNDiversionEscape>::default(),
        )
    }
}

impl std::fmt::Debug for Explorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Explorer")
            .field("explore_strategy", &self.explore_strategy.name())
            .field("escape_strategy", &self.escape_strategy.name())
            .finish()
    }
}
