use crate::catalog::{curated_words, lookup_query, normalize_theme};
use crate::puzzle::WORDS_PER_GROUP;
use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::{debug, warn};

const CANDIDATE_MIN_CHARS: usize = 3;
const CANDIDATE_MAX_CHARS: usize = 15;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("relation lookup unavailable")]
    Unavailable,
    #[error("relation lookup failed: {0}")]
    Failed(String),
}

/// External word-relation service, reduced to its two query shapes: direct
/// synonyms of a term, and broader related meanings. Implementations own
/// their transport and must bound each call with a timeout; both queries are
/// treated as unreliable and may return too few results or fail outright.
pub trait RelationSource {
    fn synonyms(&self, term: &str) -> Result<Vec<String>, LookupError>;
    fn related(&self, term: &str) -> Result<Vec<String>, LookupError>;
}

/// A source with no backing service. Every query reports unavailable, so
/// resolution runs on curated data alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLookup;

impl RelationSource for NoLookup {
    fn synonyms(&self, _term: &str) -> Result<Vec<String>, LookupError> {
        Err(LookupError::Unavailable)
    }

    fn related(&self, _term: &str) -> Result<Vec<String>, LookupError> {
        Err(LookupError::Unavailable)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("not enough valid words for theme {theme:?} ({found} usable)")]
    InsufficientWords { theme: String, found: usize },
}

/// Resolves a theme name to exactly four distinct words, each longer than
/// two characters: curated table first, external relation lookup second.
pub struct WordResolver<S> {
    source: S,
}

impl<S: RelationSource> WordResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn resolve<R: Rng>(
        &self,
        theme: &str,
        rng: &mut R,
    ) -> Result<[String; WORDS_PER_GROUP], ResolveError> {
        let key = normalize_theme(theme);
        if let Some(entries) = curated_words(&key) {
            // Curated hits never fall through to the external lookup.
            let usable: Vec<&str> = entries
                .iter()
                .copied()
                .filter(|w| w.chars().count() > 2)
                .collect();
            if usable.len() < WORDS_PER_GROUP {
                return Err(ResolveError::InsufficientWords {
                    theme: key,
                    found: usable.len(),
                });
            }
            let picked: Vec<String> = usable
                .choose_multiple(rng, WORDS_PER_GROUP)
                .map(|w| (*w).to_string())
                .collect();
            return Ok(to_quad(picked));
        }

        let query = lookup_query(theme);
        let mut candidates = self.query_candidates(&query, QueryKind::Synonyms);
        if candidates.len() < WORDS_PER_GROUP {
            for word in self.query_candidates(&query, QueryKind::Related) {
                if !candidates.contains(&word) {
                    candidates.push(word);
                }
            }
        }
        debug!(theme = %key, candidates = candidates.len(), "external resolution");
        if candidates.len() < WORDS_PER_GROUP {
            return Err(ResolveError::InsufficientWords {
                theme: key,
                found: candidates.len(),
            });
        }
        let picked: Vec<String> = candidates
            .choose_multiple(rng, WORDS_PER_GROUP)
            .cloned()
            .collect();
        Ok(to_quad(picked))
    }

    fn query_candidates(&self, query: &str, kind: QueryKind) -> Vec<String> {
        let result = match kind {
            QueryKind::Synonyms => self.source.synonyms(query),
            QueryKind::Related => self.source.related(query),
        };
        match result {
            Ok(words) => filter_candidates(words),
            Err(err) => {
                // Lookup failures never escape the resolver; they degrade to
                // an empty candidate list and the caller's fallback chain.
                warn!(%query, ?kind, error = %err, "relation lookup failed");
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum QueryKind {
    Synonyms,
    Related,
}

/// Last-resort words for a theme whose resolution failed. Only the Group
/// Builder produces these; the resolver itself never invents words.
pub fn fallback_words(theme: &str) -> [String; WORDS_PER_GROUP] {
    let subject = normalize_theme(&lookup_query(theme));
    ["EXAMPLE", "INSTANCE", "TYPE", "KIND"].map(|kind| format!("{kind} OF {subject}"))
}

fn filter_candidates(words: Vec<String>) -> Vec<String> {
    let mut kept = Vec::new();
    for word in words {
        let upper = word.trim().to_uppercase();
        if !is_single_token(&upper) {
            continue;
        }
        let chars = upper.chars().count();
        if !(CANDIDATE_MIN_CHARS..=CANDIDATE_MAX_CHARS).contains(&chars) {
            continue;
        }
        if !kept.contains(&upper) {
            kept.push(upper);
        }
    }
    kept
}

fn is_single_token(word: &str) -> bool {
    !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '(' | ')'))
}

fn to_quad(picked: Vec<String>) -> [String; WORDS_PER_GROUP] {
    picked.try_into().expect("sampled exactly four words")
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Scripted relation source for tests: fixed answers per query shape.
    pub struct ScriptedSource {
        pub synonyms: Vec<(String, Result<Vec<String>, LookupError>)>,
        pub related: Vec<(String, Result<Vec<String>, LookupError>)>,
    }

    impl ScriptedSource {
        pub fn empty() -> Self {
            Self {
                synonyms: Vec::new(),
                related: Vec::new(),
            }
        }

        pub fn with_synonyms(term: &str, words: &[&str]) -> Self {
            let mut source = Self::empty();
            source.synonyms.push((
                term.to_string(),
                Ok(words.iter().map(|w| w.to_string()).collect()),
            ));
            source
        }
    }

    impl RelationSource for ScriptedSource {
        fn synonyms(&self, term: &str) -> Result<Vec<String>, LookupError> {
            lookup(&self.synonyms, term)
        }

        fn related(&self, term: &str) -> Result<Vec<String>, LookupError> {
            lookup(&self.related, term)
        }
    }

    fn lookup(
        table: &[(String, Result<Vec<String>, LookupError>)],
        term: &str,
    ) -> Result<Vec<String>, LookupError> {
        for (key, result) in table {
            if key == term {
                return match result {
                    Ok(words) => Ok(words.clone()),
                    Err(LookupError::Unavailable) => Err(LookupError::Unavailable),
                    Err(LookupError::Failed(msg)) => Err(LookupError::Failed(msg.clone())),
                };
            }
        }
        Ok(Vec::new())
    }
}
