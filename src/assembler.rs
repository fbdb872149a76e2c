use crate::builder::GroupBuilder;
use crate::catalog::Difficulty;
use crate::history::HistoryStore;
use crate::puzzle::{Group, Puzzle};
use crate::resolver::RelationSource;
use rand::Rng;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

/// Whole-puzzle rebuild ceiling.
pub const ASSEMBLY_ATTEMPTS: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssembleError {
    #[error("no internally valid puzzle after {attempts} assembly passes")]
    Exhausted { attempts: usize },
}

/// An accepted puzzle. `fresh` is false when the retry ceiling forced
/// acceptance of a candidate that repeats recent history.
#[derive(Debug, Clone)]
pub struct AssembledPuzzle {
    pub puzzle: Puzzle,
    pub fresh: bool,
}

/// Assembles full puzzles: one group per tier built independently, cross-
/// group and history checks applied afterwards, bounded rebuilds on any
/// failure. Owns the history store and updates it on acceptance.
pub struct PuzzleAssembler<S, H> {
    builder: GroupBuilder<S>,
    history: H,
}

impl<S: RelationSource, H: HistoryStore> PuzzleAssembler<S, H> {
    pub fn new(source: S, history: H) -> Self {
        Self {
            builder: GroupBuilder::new(source),
            history,
        }
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Builds and accepts a puzzle. Freshness degrades gracefully: after the
    /// rebuild ceiling, a history-repeating candidate is accepted rather
    /// than failing the player, and only the absence of any internally
    /// valid candidate surfaces as an error.
    pub fn assemble<R: Rng>(&mut self, rng: &mut R) -> Result<AssembledPuzzle, AssembleError> {
        let no_themes = HashSet::new();
        let no_words = HashSet::new();
        let mut stale: Option<Puzzle> = None;

        for pass in 0..ASSEMBLY_ATTEMPTS {
            // The four builds are independent; every cross-group constraint
            // is checked after all of them complete.
            let groups: [Group; 4] = Difficulty::ALL
                .map(|tier| self.builder.build(tier, &no_themes, &no_words, &mut *rng));
            let Some(candidate) = internally_valid(groups) else {
                debug!(pass, "candidate failed cross-group validation");
                continue;
            };
            if self.collides_with_history(&candidate) {
                debug!(pass, "candidate repeats recent history");
                stale = Some(candidate);
                continue;
            }
            self.accept(&candidate);
            return Ok(AssembledPuzzle {
                puzzle: candidate,
                fresh: true,
            });
        }

        match stale {
            Some(puzzle) => {
                warn!(
                    passes = ASSEMBLY_ATTEMPTS,
                    "accepting history-repeating puzzle"
                );
                self.accept(&puzzle);
                Ok(AssembledPuzzle {
                    puzzle,
                    fresh: false,
                })
            }
            None => Err(AssembleError::Exhausted {
                attempts: ASSEMBLY_ATTEMPTS,
            }),
        }
    }

    fn collides_with_history(&self, puzzle: &Puzzle) -> bool {
        puzzle
            .theme_keys()
            .iter()
            .any(|key| self.history.contains_theme(key))
            || puzzle
                .content_keys()
                .iter()
                .any(|key| self.history.contains_words(key))
    }

    fn accept(&mut self, puzzle: &Puzzle) {
        self.history
            .record(&puzzle.theme_keys(), &puzzle.content_keys());
    }
}

/// Post-hoc cross-group validation: distinct themes and sixteen pairwise
/// distinct words (`Puzzle::new` enforces the latter).
fn internally_valid(groups: [Group; 4]) -> Option<Puzzle> {
    let themes: HashSet<String> = groups.iter().map(Group::theme_key).collect();
    if themes.len() != groups.len() {
        return None;
    }
    Puzzle::new(groups).ok()
}
