use crate::{
    breeding::{BlendCrossover, Crossover, GaussianMutation, Mutation},
    error::{GeneticError, Result},
    evaluation::Challenge,
    selection::{SelectionStrategy, TournamentSelection},
};

use super::EvolutionLauncher;

/// Assembles an [`EvolutionLauncher`] from its operators.
///
/// Only the challenge is mandatory. Unset operators fall back to their
/// defaults: blend crossover with alpha 0.5, Gaussian mutation with sigma 0.1
/// and per-gene probability 0.2, and tournament selection of size 3.
#[derive(Debug, Clone)]
pub struct EvolutionLauncherBuilder<
    Chall,
    Cross = BlendCrossover,
    Mut = GaussianMutation,
    Select = TournamentSelection,
> where
    Chall: Challenge,
    Cross: Crossover + Default,
    Mut: Mutation + Default,
    Select: SelectionStrategy + Default,
{
    challenge: Option<Chall>,
    crossover: Option<Cross>,
    mutation: Option<Mut>,
    selection: Option<Select>,
}

impl<Chall, Cross, Mut, Select> EvolutionLauncherBuilder<Chall, Cross, Mut, Select>
where
    Chall: Challenge,
    Cross: Crossover + Default,
    Mut: Mutation + Default,
    Select: SelectionStrategy + Default,
{
    pub fn new() -> Self {
        Self {
            challenge: None,
            crossover: None,
            mutation: None,
            selection: None,
        }
    }

    pub fn with_challenge(mut self, challenge: Chall) -> Self {
        self.challenge = Some(challenge);
        self
    }

    pub fn with_crossover(mut self, crossover: Cross) -> Self {
        self.crossover = Some(crossover);
        self
    }

    pub fn with_mutation(mut self, mutation: Mut) -> Self {
        self.mutation = Some(mutation);
        self
    }

    pub fn with_selection_strategy(mut self, selection: Select) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn build(self) -> Result<EvolutionLauncher<Chall, Cross, Mut, Select>> {
        let challenge = self
            .challenge
            .ok_or_else(|| GeneticError::Configuration("Challenge not specified".to_string()))?;

        Ok(EvolutionLauncher::new(
            challenge,
            self.crossover.unwrap_or_default(),
            self.mutation.unwrap_or_default(),
            self.selection.unwrap_or_default(),
        ))
    }
}

impl<Chall, Cross, Mut, Select> Default for EvolutionLauncherBuilder<Chall, Cross, Mut, Select>
where
    Chall: Challenge,
    Cross: Crossover + Default,
    Mut: Mutation + Default,
    Select: SelectionStrategy + Default,
{
    fn default() -> Self {
        Self::new()
    }
}
