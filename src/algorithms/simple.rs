//! Generational GA with tournament selection.
//!
//! Every generation the next population is bred from the current, fully
//! evaluated one into a second buffer. The buffers are then swapped and the new
//! population is scored in full before anything reads it again.

use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use rand::Rng;
use rand::prelude::SeedableRng;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use crate::config::{EvolutionConfig, check_mutation_rate};
use crate::error::ConfigError;
use crate::{Evaluator, Evolver, GenerationStats, Genotype, Loss, Phenotype};

/// Default number of contestants per tournament.
pub const DEFAULT_TOURNAMENT_SIZE: usize = 3;

/// How the next generation is filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementStrategy {
    /// Every slot is a freshly bred child.
    #[default]
    FullReplacement,
    /// Slot 0 keeps the current best candidate unchanged; the rest are bred.
    Elitist,
}

impl fmt::Display for ReplacementStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullReplacement => write!(f, "full_replacement"),
            Self::Elitist => write!(f, "elitist"),
        }
    }
}

impl FromStr for ReplacementStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" | "full_replacement" | "full-replacement" => Ok(Self::FullReplacement),
            "elitist" | "elitism" => Ok(Self::Elitist),
            other => Err(format!("unknown replacement strategy: {other}")),
        }
    }
}

/// Outcome of [`SimpleGA::run`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "G: Genotype")]
pub struct RunSummary<G: Genotype> {
    /// Best candidate of the final population.
    pub best: Phenotype<G>,
    /// One entry per evolved generation.
    pub history: Vec<GenerationStats>,
}

/// Index of the lowest-loss candidate. The first one found wins ties.
pub fn best_index<G: Genotype>(population: &[Phenotype<G>]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (index, candidate) in population.iter().enumerate() {
        match best {
            Some(current) if candidate.fitness >= population[current].fitness => {}
            _ => best = Some(index),
        }
    }
    best
}

/// Draws `size` candidates uniformly with replacement and returns the one
/// with the lowest loss. Only a strictly lower loss displaces an earlier draw.
///
/// `population` must not be empty.
pub fn tournament_select<'a, G: Genotype, R: Rng>(
    population: &'a [Phenotype<G>],
    size: usize,
    rng: &mut R,
) -> &'a Phenotype<G> {
    let mut winner = &population[rng.random_range(0..population.len())];
    for _ in 1..size {
        let contender = &population[rng.random_range(0..population.len())];
        if contender.fitness < winner.fitness {
            winner = contender;
        }
    }
    winner
}

/// Scores every candidate against `evaluator`, overwriting its fitness.
pub fn evaluate_population<G: Genotype, E: Evaluator<G>>(
    population: &mut [Phenotype<G>],
    evaluator: &E,
) {
    for p in population {
        p.fitness = evaluator.evaluate(&p.genotype);
    }
}

/// Best and truncated-average loss of an evaluated population.
pub fn summarize<G: Genotype>(
    population: &[Phenotype<G>],
    generation: usize,
) -> GenerationStats {
    let best = population.iter().map(|p| p.fitness).min().unwrap_or(0);
    let total: u64 = population.iter().map(|p| u64::from(p.fitness)).sum();
    let average = total.checked_div(population.len() as u64).unwrap_or(0);
    GenerationStats {
        generation,
        best,
        average: Loss::try_from(average).unwrap_or(Loss::MAX),
    }
}

pub struct SimpleGA<G: Genotype> {
    population: Vec<Phenotype<G>>,
    next: Vec<Phenotype<G>>,
    mutation_rate: f32,
    tournament_size: usize,
    strategy: ReplacementStrategy,
    evaluated: bool,
    generation: usize,
    rng: Pcg64,
}

impl<G: Genotype> SimpleGA<G> {
    pub fn new(
        initial_pop: Vec<G>,
        mutation_rate: f32,
        strategy: ReplacementStrategy,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(
            initial_pop,
            mutation_rate,
            strategy,
            Pcg64::seed_from_u64(seed),
        )
    }

    /// Like [`SimpleGA::new`], continuing from an existing generator.
    pub fn with_rng(
        initial_pop: Vec<G>,
        mutation_rate: f32,
        strategy: ReplacementStrategy,
        rng: Pcg64,
    ) -> Result<Self, ConfigError> {
        if initial_pop.is_empty() {
            return Err(ConfigError::EmptyPopulation);
        }
        check_mutation_rate(mutation_rate)?;

        let pop_size = initial_pop.len();
        let population = initial_pop
            .into_iter()
            .map(Phenotype::unevaluated)
            .collect();

        Ok(Self {
            population,
            next: Vec::with_capacity(pop_size),
            mutation_rate,
            tournament_size: DEFAULT_TOURNAMENT_SIZE,
            strategy,
            evaluated: false,
            generation: 0,
            rng,
        })
    }

    /// Generates `pop_size` genotypes with `generate`, drawing from the same
    /// generator that later drives selection and variation.
    pub fn initialize<F>(
        pop_size: usize,
        mutation_rate: f32,
        strategy: ReplacementStrategy,
        mut rng: Pcg64,
        mut generate: F,
    ) -> Result<Self, ConfigError>
    where
        F: FnMut(&mut Pcg64) -> G,
    {
        let initial_pop = (0..pop_size).map(|_| generate(&mut rng)).collect();
        Self::with_rng(initial_pop, mutation_rate, strategy, rng)
    }

    /// Builds an engine from a validated config.
    pub fn from_config<F>(
        config: &EvolutionConfig,
        seed: u64,
        generate: F,
    ) -> Result<Self, ConfigError>
    where
        F: FnMut(&mut Pcg64) -> G,
    {
        config.validate()?;
        Self::initialize(
            config.population_size,
            config.mutation_rate,
            config.strategy,
            Pcg64::seed_from_u64(seed),
            generate,
        )?
        .with_tournament_size(config.tournament_size)
    }

    pub fn with_tournament_size(mut self, size: usize) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::InvalidTournamentSize);
        }
        self.tournament_size = size;
        Ok(self)
    }

    pub fn pop_size(&self) -> usize {
        self.population.len()
    }

    pub fn mutation_rate(&self) -> f32 {
        self.mutation_rate
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    pub fn strategy(&self) -> ReplacementStrategy {
        self.strategy
    }

    /// Generations evolved so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Whether every fitness reflects the current genotypes.
    pub fn is_evaluated(&self) -> bool {
        self.evaluated
    }

    /// Scores the whole current population.
    pub fn evaluate<E: Evaluator<G>>(&mut self, evaluator: &E) {
        evaluate_population(&mut self.population, evaluator);
        self.evaluated = true;
    }

    /// Best candidate of the current population.
    pub fn best(&self) -> &Phenotype<G> {
        // The population is never empty after construction.
        let index = best_index(&self.population).unwrap_or(0);
        &self.population[index]
    }

    /// Best and average loss of the current population.
    pub fn stats(&self) -> GenerationStats {
        summarize(&self.population, self.generation)
    }

    /// One child: two tournaments, crossover, then mutation.
    fn breed(&mut self) -> Phenotype<G> {
        let p_a = tournament_select(&self.population, self.tournament_size, &mut self.rng);
        let p_b = tournament_select(&self.population, self.tournament_size, &mut self.rng);
        let mut child_dna = p_a.genotype.crossover(&p_b.genotype, &mut self.rng);
        child_dna.mutate(&mut self.rng, self.mutation_rate);
        Phenotype::unevaluated(child_dna)
    }

    /// Evaluates the initial population if needed, then evolves
    /// `generations` generations, handing each summary to `on_generation`.
    ///
    /// Stops at the first error returned by the callback.
    pub fn run<E, F, Error>(
        &mut self,
        evaluator: &E,
        generations: usize,
        mut on_generation: F,
    ) -> Result<RunSummary<G>, Error>
    where
        E: Evaluator<G>,
        F: FnMut(&GenerationStats) -> Result<(), Error>,
    {
        info!(
            "Evolving {} candidates for {} generations ({} strategy, mutation rate {})",
            self.pop_size(),
            generations,
            self.strategy,
            self.mutation_rate
        );
        if !self.evaluated {
            self.evaluate(evaluator);
        }

        let mut history = Vec::new();
        for _ in 0..generations {
            let stats = self.step(evaluator);
            on_generation(&stats)?;
            history.push(stats);
        }

        let best = self.best().clone();
        info!(
            "Best total loss after {} generations: {}",
            generations, best.fitness
        );
        Ok(RunSummary { best, history })
    }
}

impl<G: Genotype> Evolver<G> for SimpleGA<G> {
    fn step<E: Evaluator<G>>(&mut self, evaluator: &E) -> GenerationStats {
        // Selection must only ever see scored candidates.
        if !self.evaluated {
            self.evaluate(evaluator);
        }

        let pop_size = self.population.len();
        self.next.clear();
        if self.strategy == ReplacementStrategy::Elitist {
            let elite = self.best().clone();
            self.next.push(elite);
        }
        while self.next.len() < pop_size {
            let child = self.breed();
            self.next.push(child);
        }

        std::mem::swap(&mut self.population, &mut self.next);
        self.evaluated = false;
        self.evaluate(evaluator);

        let stats = summarize(&self.population, self.generation);
        debug!(
            "generation {}: best {} average {}",
            stats.generation, stats.best, stats.average
        );
        self.generation += 1;
        stats
    }

    fn population(&self) -> &[Phenotype<G>] {
        &self.population
    }
}
