//! Engine for a "group four related items" word puzzle: puzzle generation
//! (curated themes, external relation lookup, bounded retries, repeat
//! avoidance) and the play-session state machine (guesses, mistake budget,
//! timing, reveal sequencing).
//!
//! Rendering, animation curves and HTTP transport internals are external
//! collaborators; the optional `web` feature exposes the puzzle-fetch JSON
//! API and the optional `cli` feature a command-line front end.

pub mod assembler;
pub mod builder;
pub mod catalog;
pub mod history;
pub mod puzzle;
pub mod resolver;
pub mod session;
#[cfg(feature = "web")]
pub mod web;

pub use assembler::{ASSEMBLY_ATTEMPTS, AssembleError, AssembledPuzzle, PuzzleAssembler};
pub use builder::{BUILD_ATTEMPTS, BuildError, GroupBuilder};
pub use catalog::{Difficulty, normalize_theme};
pub use history::{FileHistory, HistoryStore, MAX_HISTORY_ENTRIES, MemoryHistory};
pub use puzzle::{Group, GroupError, Puzzle, PuzzleError};
pub use resolver::{
    LookupError, NoLookup, RelationSource, ResolveError, WordResolver, fallback_words,
};
pub use session::{GuessOutcome, Phase, RevealTiming, STARTING_MISTAKES, Session};
