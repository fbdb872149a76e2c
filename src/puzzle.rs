use crate::catalog::{Difficulty, normalize_theme};
use thiserror::Error;

pub const WORDS_PER_GROUP: usize = 4;
pub const GROUPS_PER_PUZZLE: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupError {
    #[error("group {title:?} repeats the word {word:?}")]
    DuplicateWord { title: String, word: String },
    #[error("group {title:?} contains the too-short word {word:?}")]
    ShortWord { title: String, word: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("expected the {expected} group in position {position}, found {found}")]
    TierOrder {
        position: usize,
        expected: Difficulty,
        found: Difficulty,
    },
    #[error("word {word:?} appears in more than one group")]
    OverlappingWord { word: String },
}

/// One difficulty tier's set of four related words. Immutable once
/// constructed; `new` enforces the word invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    difficulty: Difficulty,
    title: String,
    words: [String; WORDS_PER_GROUP],
}

impl Group {
    /// Builds a group after checking that all four words are pairwise
    /// distinct (case-insensitively) and longer than two characters.
    pub fn new(
        difficulty: Difficulty,
        title: impl Into<String>,
        words: [String; WORDS_PER_GROUP],
    ) -> Result<Self, GroupError> {
        let title = title.into();
        for (i, word) in words.iter().enumerate() {
            if word.chars().count() <= 2 {
                return Err(GroupError::ShortWord {
                    title,
                    word: word.clone(),
                });
            }
            let lowered = word.to_lowercase();
            if words[..i].iter().any(|seen| seen.to_lowercase() == lowered) {
                return Err(GroupError::DuplicateWord {
                    title,
                    word: word.clone(),
                });
            }
        }
        Ok(Self {
            difficulty,
            title,
            words,
        })
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Display title, as shown on the solution bar.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn words(&self) -> &[String; WORDS_PER_GROUP] {
        &self.words
    }

    pub fn color(&self) -> &'static str {
        self.difficulty.color()
    }

    pub fn contains(&self, word: &str) -> bool {
        let lowered = word.to_lowercase();
        self.words.iter().any(|w| w.to_lowercase() == lowered)
    }

    /// Normalized form of the title, the key used for history comparisons.
    pub fn theme_key(&self) -> String {
        normalize_theme(&self.title)
    }

    /// Order-independent identity of the group's content: the normalized
    /// words, sorted and joined. Two groups with the same four words share a
    /// key regardless of word order or theme title.
    pub fn content_key(&self) -> String {
        let mut keys: Vec<String> = self.words.iter().map(|w| normalize_theme(w)).collect();
        keys.sort();
        keys.join("|")
    }
}

/// A full round: one group per difficulty in tier order, sixteen pairwise
/// distinct words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    groups: [Group; GROUPS_PER_PUZZLE],
}

impl Puzzle {
    pub fn new(groups: [Group; GROUPS_PER_PUZZLE]) -> Result<Self, PuzzleError> {
        for (position, (group, expected)) in groups.iter().zip(Difficulty::ALL).enumerate() {
            if group.difficulty() != expected {
                return Err(PuzzleError::TierOrder {
                    position,
                    expected,
                    found: group.difficulty(),
                });
            }
        }
        let mut seen = std::collections::HashSet::new();
        for group in &groups {
            for word in group.words() {
                if !seen.insert(word.to_lowercase()) {
                    return Err(PuzzleError::OverlappingWord { word: word.clone() });
                }
            }
        }
        Ok(Self { groups })
    }

    pub fn groups(&self) -> &[Group; GROUPS_PER_PUZZLE] {
        &self.groups
    }

    pub fn group(&self, difficulty: Difficulty) -> &Group {
        &self.groups[Difficulty::ALL
            .iter()
            .position(|&d| d == difficulty)
            .expect("every difficulty has a slot")]
    }

    /// All sixteen words in tier order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().flat_map(|g| g.words().iter().map(String::as_str))
    }

    pub fn theme_keys(&self) -> Vec<String> {
        self.groups.iter().map(Group::theme_key).collect()
    }

    pub fn content_keys(&self) -> Vec<String> {
        self.groups.iter().map(Group::content_key).collect()
    }
}

#[cfg(test)]
pub(crate) fn sample_puzzle() -> Puzzle {
    fn group(difficulty: Difficulty, title: &str, words: [&str; 4]) -> Group {
        Group::new(difficulty, title, words.map(str::to_string)).expect("valid test group")
    }
    Puzzle::new([
        group(
            Difficulty::Easy,
            "MAKE HAPPY",
            ["DELIGHT", "PLEASE", "SUIT", "TICKLE"],
        ),
        group(Difficulty::Medium, "EVADE", ["DODGE", "DUCK", "SHAKE", "SKIRT"]),
        group(
            Difficulty::Hard,
            "COMMON VIDEO GAME FEATURES",
            ["BOSS", "HEALTH", "LEVEL", "POWER-UP"],
        ),
        group(
            Difficulty::Extreme,
            "MOTHER ___",
            ["EARTH", "GOOSE", "MAY I", "SUPERIOR"],
        ),
    ])
    .expect("valid test puzzle")
}
