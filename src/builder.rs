use crate::catalog::{Difficulty, normalize_theme};
use crate::puzzle::Group;
use crate::resolver::{RelationSource, WordResolver, fallback_words};
use lru::LruCache;
use parking_lot::Mutex;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::num::NonZeroUsize;
use thiserror::Error;
use tracing::{debug, warn};

/// Total resolution attempts per build, across theme and query-shape
/// changes.
pub const BUILD_ATTEMPTS: usize = 6;
const QUERY_SHAPES: usize = 3;
const CACHE_CAPACITY: usize = 256;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("every {difficulty} theme is excluded")]
    NoThemesAvailable { difficulty: Difficulty },
    #[error("no usable words for {difficulty} after {attempts} attempts (last theme {theme:?})")]
    Exhausted {
        difficulty: Difficulty,
        attempts: usize,
        theme: String,
    },
}

/// One step of the retry policy: a theme in display form and the query shape
/// to try it with. `advance` is a pure transition so the ceiling and the
/// between-attempt mutation are testable without randomness.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BuildState {
    theme: String,
    shape: usize,
    attempt: usize,
}

impl BuildState {
    fn start(theme: String) -> Self {
        Self {
            theme,
            shape: 0,
            attempt: 0,
        }
    }

    fn query(&self) -> String {
        match self.shape {
            0 => self.theme.clone(),
            1 => format!("{} examples", self.theme),
            _ => format!("common {}", self.theme),
        }
    }

    /// Next attempt: the same theme through its remaining query shapes, then
    /// `next_theme`. `None` once the budget is spent or no theme is left.
    fn advance(self, next_theme: Option<String>) -> Option<Self> {
        let attempt = self.attempt + 1;
        if attempt >= BUILD_ATTEMPTS {
            return None;
        }
        if self.shape + 1 < QUERY_SHAPES {
            return Some(Self {
                theme: self.theme,
                shape: self.shape + 1,
                attempt,
            });
        }
        next_theme.map(|theme| Self {
            theme,
            shape: 0,
            attempt,
        })
    }
}

/// Builds one difficulty tier's group: random theme, resolver, validation,
/// bounded retries. Successful groups are kept in a read-through LRU cache
/// keyed by `(difficulty, normalized theme)`.
pub struct GroupBuilder<S> {
    resolver: WordResolver<S>,
    cache: Mutex<LruCache<(Difficulty, String), Group>>,
}

impl<S: RelationSource> GroupBuilder<S> {
    pub fn new(source: S) -> Self {
        Self {
            resolver: WordResolver::new(source),
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(CACHE_CAPACITY).expect("nonzero cache capacity"),
            )),
        }
    }

    /// Strict build: fails with `BuildError` once the attempt budget is
    /// spent. `excluded_themes` holds normalized theme keys to skip;
    /// `excluded_words` holds words (any case) the group must not reuse.
    pub fn try_build<R: Rng>(
        &self,
        difficulty: Difficulty,
        excluded_themes: &HashSet<String>,
        excluded_words: &HashSet<String>,
        rng: &mut R,
    ) -> Result<Group, BuildError> {
        let excluded_words: HashSet<String> =
            excluded_words.iter().map(|w| w.to_lowercase()).collect();
        let mut tried: HashSet<String> = excluded_themes.clone();

        let Some(first) = pick_theme(difficulty, &tried, rng) else {
            return Err(BuildError::NoThemesAvailable { difficulty });
        };
        tried.insert(normalize_theme(&first));
        let mut state = BuildState::start(first);

        loop {
            if let Some(group) = self.attempt(difficulty, &state, &excluded_words, rng) {
                return Ok(group);
            }
            let next_theme = if state.shape + 1 >= QUERY_SHAPES {
                let picked = pick_theme(difficulty, &tried, rng);
                if let Some(theme) = &picked {
                    tried.insert(normalize_theme(theme));
                }
                picked
            } else {
                None
            };
            let attempts = state.attempt + 1;
            let theme = state.theme.clone();
            match state.advance(next_theme) {
                Some(next) => state = next,
                None => {
                    return Err(BuildError::Exhausted {
                        difficulty,
                        attempts,
                        theme,
                    });
                }
            }
        }
    }

    /// Build that never fails: on exhaustion the group is substituted with
    /// the generic fallback words, titled with the last attempted theme.
    pub fn build<R: Rng>(
        &self,
        difficulty: Difficulty,
        excluded_themes: &HashSet<String>,
        excluded_words: &HashSet<String>,
        rng: &mut R,
    ) -> Group {
        match self.try_build(difficulty, excluded_themes, excluded_words, rng) {
            Ok(group) => group,
            Err(err) => {
                warn!(%difficulty, error = %err, "substituting generic fallback group");
                let theme = match &err {
                    BuildError::Exhausted { theme, .. } => theme.clone(),
                    BuildError::NoThemesAvailable { .. } => difficulty.themes()[0].to_string(),
                };
                let words = fallback_words(&theme);
                Group::new(difficulty, normalize_theme(&theme), words)
                    .expect("fallback words satisfy the group invariants")
            }
        }
    }

    fn attempt<R: Rng>(
        &self,
        difficulty: Difficulty,
        state: &BuildState,
        excluded_words: &HashSet<String>,
        rng: &mut R,
    ) -> Option<Group> {
        let theme_key = normalize_theme(&state.theme);
        if state.shape == 0 {
            let mut cache = self.cache.lock();
            if let Some(group) = cache.get(&(difficulty, theme_key.clone())) {
                if group.words().iter().all(|w| !excluded_words.contains(&w.to_lowercase())) {
                    return Some(group.clone());
                }
            }
        }

        let words = match self.resolver.resolve(&state.query(), rng) {
            Ok(words) => words,
            Err(err) => {
                debug!(theme = %state.theme, shape = state.shape, error = %err, "attempt failed");
                return None;
            }
        };
        if words.iter().any(|w| excluded_words.contains(&w.to_lowercase())) {
            debug!(theme = %state.theme, "resolved words collide with exclusions");
            return None;
        }
        match Group::new(difficulty, theme_key.clone(), words) {
            Ok(group) => {
                self.cache
                    .lock()
                    .put((difficulty, theme_key), group.clone());
                Some(group)
            }
            Err(err) => {
                debug!(theme = %state.theme, error = %err, "resolved words failed validation");
                None
            }
        }
    }
}

fn pick_theme<R: Rng>(
    difficulty: Difficulty,
    skip: &HashSet<String>,
    rng: &mut R,
) -> Option<String> {
    let available: Vec<&str> = difficulty
        .themes()
        .iter()
        .copied()
        .filter(|t| !skip.contains(&normalize_theme(t)))
        .collect();
    available.choose(rng).map(|t| (*t).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::LookupError;
    use crate::resolver::testing::ScriptedSource;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(11)
    }

    /// Every medium theme except "word homophones", normalized. Pinning the
    /// pool to a single non-curated theme makes the retry path
    /// deterministic.
    fn all_but_homophones() -> HashSet<String> {
        Difficulty::Medium
            .themes()
            .iter()
            .map(|t| normalize_theme(t))
            .filter(|k| k != "WORD HOMOPHONES")
            .collect()
    }

    #[test]
    fn advance_walks_shapes_then_changes_theme() {
        let state = BuildState::start("colors".into());
        assert_eq!(state.query(), "colors");
        let state = state.advance(None).unwrap();
        assert_eq!(state.query(), "colors examples");
        let state = state.advance(None).unwrap();
        assert_eq!(state.query(), "common colors");
        let state = state.advance(Some("days".into())).unwrap();
        assert_eq!(state.query(), "days");
        assert_eq!(state.attempt, 3);
    }

    #[test]
    fn advance_stops_at_the_budget() {
        let mut state = BuildState::start("colors".into());
        let mut attempts = 1;
        while let Some(next) = state.advance(Some("days".into())) {
            state = next;
            attempts += 1;
        }
        assert_eq!(attempts, BUILD_ATTEMPTS);
    }

    #[test]
    fn builds_from_the_external_source() {
        let source = ScriptedSource::with_synonyms(
            "word homophones",
            &["there", "their", "hear", "here", "know"],
        );
        let builder = GroupBuilder::new(source);
        let group = builder
            .try_build(
                Difficulty::Medium,
                &all_but_homophones(),
                &HashSet::new(),
                &mut rng(),
            )
            .unwrap();
        assert_eq!(group.title(), "WORD HOMOPHONES");
        assert_eq!(group.words().len(), 4);
    }

    #[test]
    fn retries_with_mutated_queries() {
        let mut source = ScriptedSource::empty();
        source
            .synonyms
            .push(("word homophones".into(), Err(LookupError::Unavailable)));
        source.synonyms.push((
            "word homophones examples".into(),
            Ok(vec!["there".into(), "their".into(), "hear".into(), "here".into()]),
        ));
        let builder = GroupBuilder::new(source);
        let group = builder
            .try_build(
                Difficulty::Medium,
                &all_but_homophones(),
                &HashSet::new(),
                &mut rng(),
            )
            .unwrap();
        assert_eq!(group.title(), "WORD HOMOPHONES");
    }

    #[test]
    fn excluded_words_fail_the_attempt() {
        let source = ScriptedSource::with_synonyms(
            "word homophones",
            &["there", "their", "hear", "here"],
        );
        let builder = GroupBuilder::new(source);
        let excluded_words: HashSet<String> = ["THERE".to_string()].into();
        let err = builder
            .try_build(
                Difficulty::Medium,
                &all_but_homophones(),
                &excluded_words,
                &mut rng(),
            )
            .unwrap_err();
        assert!(matches!(err, BuildError::Exhausted { .. }));
    }

    #[test]
    fn exhaustion_substitutes_the_generic_fallback() {
        let builder = GroupBuilder::new(crate::resolver::NoLookup);
        let group = builder.build(
            Difficulty::Medium,
            &all_but_homophones(),
            &HashSet::new(),
            &mut rng(),
        );
        assert_eq!(group.title(), "WORD HOMOPHONES");
        assert_eq!(group.words()[0], "EXAMPLE OF WORD HOMOPHONES");
        assert_eq!(group.words()[3], "KIND OF WORD HOMOPHONES");
    }

    #[test]
    fn no_available_theme_fails_before_resolving() {
        let builder = GroupBuilder::new(crate::resolver::NoLookup);
        let everything: HashSet<String> = Difficulty::Easy
            .themes()
            .iter()
            .map(|t| normalize_theme(t))
            .collect();
        let err = builder
            .try_build(Difficulty::Easy, &everything, &HashSet::new(), &mut rng())
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::NoThemesAvailable {
                difficulty: Difficulty::Easy
            }
        );
    }

    #[test]
    fn cache_short_circuits_repeat_resolution() {
        struct Counting {
            inner: ScriptedSource,
            calls: Arc<AtomicUsize>,
        }
        impl RelationSource for Counting {
            fn synonyms(&self, term: &str) -> Result<Vec<String>, LookupError> {
                self.calls.fetch_add(1, Ordering::SeqCst);
                self.inner.synonyms(term)
            }
            fn related(&self, term: &str) -> Result<Vec<String>, LookupError> {
                self.inner.related(term)
            }
        }
        let calls = Arc::new(AtomicUsize::new(0));
        let source = Counting {
            inner: ScriptedSource::with_synonyms(
                "word homophones",
                &["there", "their", "hear", "here"],
            ),
            calls: Arc::clone(&calls),
        };
        let builder = GroupBuilder::new(source);
        let excluded = all_but_homophones();
        let mut rng = rng();
        let first = builder
            .try_build(Difficulty::Medium, &excluded, &HashSet::new(), &mut rng)
            .unwrap();
        let calls_after_first = calls.load(Ordering::SeqCst);
        let second = builder
            .try_build(Difficulty::Medium, &excluded, &HashSet::new(), &mut rng)
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), calls_after_first);
    }
}
