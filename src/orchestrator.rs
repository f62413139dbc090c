//! The retry loop tying scaling, generation, validation and persistence together.

use std::collections::BTreeSet;
use std::num::NonZero;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use log::{debug, info, warn};

use crate::error::GenerationError;
use crate::generator;
use crate::level::{GeneratedLevelData, PairId, StoredGeneratedLevel};
use crate::params::{GenerationParameters, PlayerProgression};
use crate::pathfind::PathfindingAdapter;
use crate::random::RandomProvider;
use crate::scaler::scale_parameters;
use crate::store::LevelStore;
use crate::template::TemplateProvider;
use crate::validator;

/// How many layouts are generated before a request fails with
/// [`UnsolvableLevel`](GenerationError::UnsolvableLevel).
pub const MAX_GENERATION_RETRIES: usize = 5;

/// A caller-driven cancellation signal, checked between retry iterations.
///
/// Cancellation never interrupts a pathfind in flight; it stops an abandoned request before it
/// starts another costly attempt. No partial state is exposed on cancellation.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Construct a live token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Safe to call from another thread.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The retry loop's phases. One generation request walks
/// `Generating -> Validating -> (terminal | Retrying -> Generating)` until it either promotes a
/// verified level or exhausts the retry budget.
enum AttemptState {
    Generating { attempt: usize },
    Validating { attempt: usize, candidate: GeneratedLevelData },
    Retrying { attempt: usize },
    Exhausted,
}

/// Runs generation requests end to end: scales parameters once, then generates and validates
/// candidate layouts under fresh seeds until one verifies or the retry budget runs out, and hands
/// the verified result to the persistence collaborator.
///
/// One orchestrator may serve many requests, but a single request is a strictly sequential
/// computation; concurrent requests need their own [`RandomProvider`] instances.
pub struct GenerationOrchestrator<TP, P, S>
where
    TP: TemplateProvider,
    P: PathfindingAdapter,
    S: LevelStore,
{
    base: GenerationParameters,
    templates: TP,
    pathfinder: P,
    store: S,
}

// a timestamp plus random suffix; retry seeds are deliberately fresh draws, so only the finally
// accepted seed is reproducible (matching observed behavior, not a derivation from the first seed)
fn draw_seed() -> String {
    format!("{:x}-{:08x}", Utc::now().timestamp_millis(), rand::random::<u32>())
}

impl<TP, P, S> GenerationOrchestrator<TP, P, S>
where
    TP: TemplateProvider,
    P: PathfindingAdapter,
    S: LevelStore,
{
    /// Construct an orchestrator from its collaborators and the unscaled base parameters.
    pub fn new(base: GenerationParameters, templates: TP, pathfinder: P, store: S) -> Self {
        Self {
            base,
            templates,
            pathfinder,
            store,
        }
    }

    /// The store this orchestrator persists into.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Generate a level for the given progression, verify it, and record it.
    ///
    /// `level_id` becomes the stored record's identifier when supplied; otherwise a fresh UUID is
    /// generated. Returns the verified level data; its reproduction data (seed, parameters,
    /// solutions) is persisted before returning. On any failure nothing is persisted.
    pub fn generate_and_record_level<R: RandomProvider>(
        &mut self,
        progression: &PlayerProgression,
        level_id: Option<String>,
        random: &mut R,
        cancel: &CancelToken,
    ) -> Result<GeneratedLevelData, GenerationError> {
        // scaled once per request, not re-scaled per retry
        let parameters = scale_parameters(&self.base, progression);
        parameters.validate()?;

        let mut level_id = level_id;
        let mut state = AttemptState::Generating { attempt: 1 };

        loop {
            state = match state {
                AttemptState::Generating { attempt } => {
                    if cancel.is_cancelled() {
                        debug!("generation cancelled before attempt {attempt}");
                        return Err(GenerationError::Cancelled);
                    }

                    let seed = draw_seed();
                    random.initialize(&seed);
                    let template = self.templates.select(&parameters, random)?;
                    let candidate = generator::generate(&parameters, &seed, &template, random)?;

                    AttemptState::Validating { attempt, candidate }
                }
                AttemptState::Validating { attempt, mut candidate } => {
                    let solutions = validator::find_solution_paths(&candidate, &self.pathfinder)?;

                    let required = candidate.required_pair_ids();
                    let solved: BTreeSet<NonZero<PairId>> =
                        solutions.iter().map(|solution| solution.pair_id).collect();

                    if solved == required {
                        candidate.solutions = solutions;
                        info!(
                            "attempt {attempt} verified seed {:?}: {} pairs solved",
                            candidate.seed,
                            required.len(),
                        );

                        let stored = StoredGeneratedLevel::promote(&candidate, level_id.take());
                        self.store.save(&stored)?;

                        return Ok(candidate);
                    }

                    debug!(
                        "attempt {attempt} rejected seed {:?}: {}/{} pairs solved",
                        candidate.seed,
                        solved.len(),
                        required.len(),
                    );
                    AttemptState::Retrying { attempt }
                }
                AttemptState::Retrying { attempt } => {
                    if attempt >= MAX_GENERATION_RETRIES {
                        AttemptState::Exhausted
                    } else {
                        AttemptState::Generating { attempt: attempt + 1 }
                    }
                }
                AttemptState::Exhausted => {
                    warn!("no solvable layout after {MAX_GENERATION_RETRIES} attempts");
                    return Err(GenerationError::UnsolvableLevel {
                        attempts: MAX_GENERATION_RETRIES,
                        parameters,
                    });
                }
            }
        }
    }
}
