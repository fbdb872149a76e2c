use crate::puzzle::{GROUPS_PER_PUZZLE, Group, Puzzle, WORDS_PER_GROUP};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::VecDeque;
use std::time::Duration;

pub const STARTING_MISTAKES: u8 = 4;

/// Coarse session phase. `Lost` still accepts the forced-reveal actions;
/// both terminal phases are only left by building a new [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Won,
    Lost,
}

/// Result of a submitted guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The four chosen words are exactly one unfound group; its reveal has
    /// been scheduled.
    Matched { title: String },
    /// Three of the chosen words belong to a single unfound group.
    OneAway,
    Miss,
    /// Submitted with other than four selected; nothing changed.
    Incomplete,
    /// Guessing is unavailable: terminal phase, or a reveal is in flight.
    Blocked,
}

/// Timing contract for the reveal wave. The concrete constants belong to
/// the rendering collaborator; the state machine only needs reveals to be
/// awaited before [`Session::complete_reveal`] is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTiming {
    pub base_delay: Duration,
    pub stagger: Duration,
    pub wave: Duration,
    pub post_pause: Duration,
    /// Pause between consecutive forced reveals.
    pub inter_group_pause: Duration,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(300),
            stagger: Duration::from_millis(200),
            wave: Duration::from_millis(600),
            post_pause: Duration::from_millis(300),
            inter_group_pause: Duration::from_millis(400),
        }
    }
}

impl RevealTiming {
    /// Wall time for revealing `cards` cards: base delay, a stagger per
    /// additional card, the wave itself, and the trailing pause.
    pub fn total(&self, cards: usize) -> Duration {
        self.base_delay + self.stagger * cards.saturating_sub(1) as u32 + self.wave + self.post_pause
    }
}

/// A group animating out of the board. Board indices are captured at
/// schedule time for the renderer; the board itself shrinks only when the
/// reveal completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReveal {
    pub group: Group,
    pub board_indices: Vec<usize>,
}

/// Live state of one play-through. Owns the board, selection, found groups,
/// mistake budget and clock; the puzzle is read-only input.
#[derive(Debug)]
pub struct Session {
    puzzle: Puzzle,
    board: Vec<String>,
    selection: Vec<usize>,
    found: Vec<Group>,
    mistakes_remaining: u8,
    elapsed_seconds: u64,
    success_time: Option<u64>,
    failure_time: Option<u64>,
    pending: Option<PendingReveal>,
    reveal_queue: VecDeque<Group>,
    revealing: bool,
}

impl Session {
    /// Loading → Playing: the board is a random permutation of the sixteen
    /// words, four mistakes remain, the clock reads zero.
    pub fn new<R: Rng>(puzzle: Puzzle, rng: &mut R) -> Self {
        let mut board: Vec<String> = puzzle.words().map(str::to_string).collect();
        board.shuffle(rng);
        Self {
            puzzle,
            board,
            selection: Vec::new(),
            found: Vec::new(),
            mistakes_remaining: STARTING_MISTAKES,
            elapsed_seconds: 0,
            success_time: None,
            failure_time: None,
            pending: None,
            reveal_queue: VecDeque::new(),
            revealing: false,
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn board(&self) -> &[String] {
        &self.board
    }

    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    pub fn found_groups(&self) -> &[Group] {
        &self.found
    }

    pub fn mistakes_remaining(&self) -> u8 {
        self.mistakes_remaining
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Completion time, fixed at the instant the fourth group was found.
    pub fn success_time(&self) -> Option<u64> {
        self.success_time
    }

    /// Loss time, fixed at the instant the mistake budget ran out.
    pub fn failure_time(&self) -> Option<u64> {
        self.failure_time
    }

    pub fn pending_reveal(&self) -> Option<&PendingReveal> {
        self.pending.as_ref()
    }

    /// Whether a reveal (player-earned or forced) is in flight. At most one
    /// is ever animating; new reveals are refused until it completes.
    pub fn is_revealing(&self) -> bool {
        self.revealing
    }

    pub fn reveal_queue_len(&self) -> usize {
        self.reveal_queue.len()
    }

    pub fn phase(&self) -> Phase {
        if self.failure_time.is_some() {
            Phase::Lost
        } else if self.success_time.is_some() {
            Phase::Won
        } else {
            Phase::Playing
        }
    }

    /// One clock tick. The counter advances only while playing and freezes
    /// the instant a terminal phase is entered.
    pub fn tick(&mut self) {
        if self.phase() == Phase::Playing {
            self.elapsed_seconds += 1;
        }
    }

    /// Toggles a board position in or out of the selection. A fifth
    /// simultaneous selection is a no-op, as is any input in a terminal
    /// phase. Returns whether the selection changed.
    pub fn toggle(&mut self, position: usize) -> bool {
        if self.phase() != Phase::Playing || position >= self.board.len() {
            return false;
        }
        if let Some(at) = self.selection.iter().position(|&p| p == position) {
            self.selection.remove(at);
            return true;
        }
        if self.selection.len() < WORDS_PER_GROUP {
            self.selection.push(position);
            return true;
        }
        false
    }

    pub fn deselect_all(&mut self) {
        self.selection.clear();
    }

    /// Reshuffles the remaining board and clears the selection. Refused
    /// while a reveal is in flight so the pending board indices stay valid.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        if self.revealing {
            return;
        }
        self.board.shuffle(rng);
        self.selection.clear();
    }

    /// Evaluates the current selection as a guess.
    pub fn submit(&mut self) -> GuessOutcome {
        if self.phase() != Phase::Playing || self.revealing {
            return GuessOutcome::Blocked;
        }
        if self.selection.len() != WORDS_PER_GROUP {
            return GuessOutcome::Incomplete;
        }
        let chosen: Vec<String> = self
            .selection
            .iter()
            .map(|&p| self.board[p].to_lowercase())
            .collect();

        if let Some(group) = self.unfound_match(&chosen).cloned() {
            let title = group.title().to_string();
            self.pending = Some(PendingReveal {
                group,
                board_indices: std::mem::take(&mut self.selection),
            });
            self.revealing = true;
            return GuessOutcome::Matched { title };
        }

        self.mistakes_remaining = self.mistakes_remaining.saturating_sub(1);
        let outcome = if self.one_away(&chosen) {
            GuessOutcome::OneAway
        } else {
            GuessOutcome::Miss
        };
        self.selection.clear();
        if self.mistakes_remaining == 0 && self.found.len() < GROUPS_PER_PUZZLE {
            // First write wins; the clock freezes here.
            self.failure_time.get_or_insert(self.elapsed_seconds);
        }
        outcome
    }

    /// Finishes the in-flight reveal after the renderer has awaited
    /// [`RevealTiming::total`]: the group joins the found list in discovery
    /// order, its words leave the board, and a completed fourth group
    /// records the win time.
    pub fn complete_reveal(&mut self) -> Option<Group> {
        let pending = self.pending.take()?;
        self.revealing = false;
        self.board.retain(|word| !pending.group.contains(word));
        self.selection.clear();
        self.found.push(pending.group.clone());
        if self.found.len() == GROUPS_PER_PUZZLE
            && self.failure_time.is_none()
            && self.success_time.is_none()
        {
            self.success_time = Some(self.elapsed_seconds);
        }
        Some(pending.group)
    }

    /// After a loss, queues every unfound group for disclosure in tier
    /// order. Returns how many were queued; zero outside the lost phase or
    /// when a forced reveal is already underway.
    pub fn begin_forced_reveal(&mut self) -> usize {
        if self.phase() != Phase::Lost || self.revealing || !self.reveal_queue.is_empty() {
            return 0;
        }
        for group in self.puzzle.groups().clone() {
            if !self.found.iter().any(|f| f.title() == group.title()) {
                self.reveal_queue.push_back(group);
            }
        }
        self.reveal_queue.len()
    }

    /// Starts the next queued forced reveal. Refused while another reveal is
    /// animating: the reveal timeline is strictly serial.
    pub fn start_next_forced_reveal(&mut self) -> Option<&PendingReveal> {
        if self.revealing {
            return None;
        }
        let group = self.reveal_queue.pop_front()?;
        let board_indices = self
            .board
            .iter()
            .enumerate()
            .filter(|(_, word)| group.contains(word))
            .map(|(i, _)| i)
            .collect();
        self.pending = Some(PendingReveal {
            group,
            board_indices,
        });
        self.revealing = true;
        self.pending.as_ref()
    }

    fn unfound_match(&self, chosen_lowercase: &[String]) -> Option<&Group> {
        self.puzzle.groups().iter().find(|group| {
            !self.is_found(group)
                && group
                    .words()
                    .iter()
                    .all(|word| chosen_lowercase.contains(&word.to_lowercase()))
        })
    }

    fn one_away(&self, chosen_lowercase: &[String]) -> bool {
        self.puzzle.groups().iter().any(|group| {
            !self.is_found(group)
                && group
                    .words()
                    .iter()
                    .filter(|word| chosen_lowercase.contains(&word.to_lowercase()))
                    .count()
                    == WORDS_PER_GROUP - 1
        })
    }

    fn is_found(&self, group: &Group) -> bool {
        self.found.iter().any(|f| f.title() == group.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::sample_puzzle;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(5)
    }

    fn session() -> Session {
        Session::new(sample_puzzle(), &mut rng())
    }

    fn select(session: &mut Session, words: &[&str]) {
        for word in words {
            let position = session
                .board()
                .iter()
                .position(|w| w.eq_ignore_ascii_case(word))
                .unwrap_or_else(|| panic!("{word} not on board"));
            assert!(session.toggle(position));
        }
    }

    fn find_group(session: &mut Session, words: &[&str]) {
        select(session, words);
        assert!(matches!(session.submit(), GuessOutcome::Matched { .. }));
        session.complete_reveal().unwrap();
    }

    #[test]
    fn new_session_shuffles_all_sixteen_words() {
        let s = session();
        assert_eq!(s.board().len(), 16);
        assert_eq!(s.mistakes_remaining(), STARTING_MISTAKES);
        assert_eq!(s.phase(), Phase::Playing);
        let mut board: Vec<String> = s.board().to_vec();
        let mut words: Vec<String> = s.puzzle().words().map(str::to_string).collect();
        board.sort();
        words.sort();
        assert_eq!(board, words);
    }

    #[test]
    fn fifth_selection_is_a_no_op() {
        let mut s = session();
        for position in 0..4 {
            assert!(s.toggle(position));
        }
        assert!(!s.toggle(4));
        assert_eq!(s.selection().len(), 4);
        // Deselecting still works at the cap.
        assert!(s.toggle(0));
        assert_eq!(s.selection().len(), 3);
    }

    #[test]
    fn incomplete_submission_changes_nothing() {
        let mut s = session();
        s.toggle(0);
        s.toggle(1);
        s.toggle(2);
        assert_eq!(s.submit(), GuessOutcome::Incomplete);
        assert_eq!(s.selection().len(), 3);
        assert_eq!(s.mistakes_remaining(), STARTING_MISTAKES);
    }

    #[test]
    fn matching_the_evade_group_costs_no_mistakes() {
        let mut s = session();
        select(&mut s, &["DODGE", "DUCK", "SHAKE", "SKIRT"]);
        let outcome = s.submit();
        assert_eq!(
            outcome,
            GuessOutcome::Matched {
                title: "EVADE".into()
            }
        );
        assert!(s.is_revealing());
        assert!(s.selection().is_empty());
        assert_eq!(s.mistakes_remaining(), STARTING_MISTAKES);

        let revealed = s.complete_reveal().unwrap();
        assert_eq!(revealed.title(), "EVADE");
        assert_eq!(s.found_groups().len(), 1);
        assert_eq!(s.board().len(), 12);
        assert!(!s.board().iter().any(|w| w == "DODGE"));
    }

    #[test]
    fn three_overlap_signals_one_away_and_costs_one_mistake() {
        let mut s = session();
        select(&mut s, &["DODGE", "DUCK", "SHAKE", "EARTH"]);
        assert_eq!(s.submit(), GuessOutcome::OneAway);
        assert_eq!(s.mistakes_remaining(), STARTING_MISTAKES - 1);
        assert!(s.selection().is_empty());
    }

    #[test]
    fn scattered_miss_is_a_plain_miss() {
        let mut s = session();
        select(&mut s, &["DODGE", "DUCK", "BOSS", "EARTH"]);
        assert_eq!(s.submit(), GuessOutcome::Miss);
        assert_eq!(s.mistakes_remaining(), STARTING_MISTAKES - 1);
    }

    #[test]
    fn submitting_while_revealing_is_blocked() {
        let mut s = session();
        select(&mut s, &["DODGE", "DUCK", "SHAKE", "SKIRT"]);
        assert!(matches!(s.submit(), GuessOutcome::Matched { .. }));
        select(&mut s, &["BOSS", "HEALTH", "LEVEL", "POWER-UP"]);
        assert_eq!(s.submit(), GuessOutcome::Blocked);
        s.complete_reveal();
        assert_eq!(s.found_groups().len(), 1);
    }

    #[test]
    fn four_misses_enter_the_lost_phase_with_a_frozen_clock() {
        let mut s = session();
        for _ in 0..3 {
            s.tick();
        }
        for _ in 0..4 {
            select(&mut s, &["DODGE", "DUCK", "BOSS", "EARTH"]);
            s.submit();
        }
        assert_eq!(s.mistakes_remaining(), 0);
        assert_eq!(s.phase(), Phase::Lost);
        assert_eq!(s.failure_time(), Some(3));

        s.tick();
        s.tick();
        assert_eq!(s.elapsed_seconds(), 3, "clock freezes at loss");
        assert_eq!(s.failure_time(), Some(3));

        select_nothing_happens(&mut s);
    }

    fn select_nothing_happens(s: &mut Session) {
        assert!(!s.toggle(0));
        assert_eq!(s.submit(), GuessOutcome::Blocked);
        assert_eq!(s.mistakes_remaining(), 0);
    }

    #[test]
    fn forced_reveal_discloses_remaining_groups_in_tier_order() {
        let mut s = session();
        find_group(&mut s, &["DODGE", "DUCK", "SHAKE", "SKIRT"]);
        for _ in 0..4 {
            select(&mut s, &["DELIGHT", "PLEASE", "SUIT", "EARTH"]);
            s.submit();
        }
        assert_eq!(s.phase(), Phase::Lost);

        assert_eq!(s.begin_forced_reveal(), 3);
        assert_eq!(s.begin_forced_reveal(), 0, "queueing twice is refused");

        let mut disclosed = Vec::new();
        while s.reveal_queue_len() > 0 || s.pending_reveal().is_some() {
            assert!(s.start_next_forced_reveal().is_some());
            assert!(
                s.start_next_forced_reveal().is_none(),
                "only one reveal may be in flight"
            );
            disclosed.push(s.complete_reveal().unwrap().title().to_string());
        }
        assert_eq!(
            disclosed,
            vec!["MAKE HAPPY", "COMMON VIDEO GAME FEATURES", "MOTHER ___"]
        );
        assert_eq!(s.found_groups().len(), 4);
        assert_eq!(s.mistakes_remaining(), 0);
        assert_eq!(s.phase(), Phase::Lost);
        assert_eq!(s.success_time(), None);
        assert!(s.board().is_empty());
    }

    #[test]
    fn forced_reveal_is_unavailable_while_playing() {
        let mut s = session();
        assert_eq!(s.begin_forced_reveal(), 0);
    }

    #[test]
    fn winning_captures_the_time_once() {
        let mut s = session();
        s.tick();
        s.tick();
        find_group(&mut s, &["DODGE", "DUCK", "SHAKE", "SKIRT"]);
        find_group(&mut s, &["DELIGHT", "PLEASE", "SUIT", "TICKLE"]);
        s.tick();
        find_group(&mut s, &["BOSS", "HEALTH", "LEVEL", "POWER-UP"]);
        find_group(&mut s, &["EARTH", "GOOSE", "MAY I", "SUPERIOR"]);

        assert_eq!(s.phase(), Phase::Won);
        assert_eq!(s.success_time(), Some(3));
        assert_eq!(s.found_groups()[0].title(), "EVADE");
        assert_eq!(s.found_groups()[1].title(), "MAKE HAPPY");

        s.tick();
        assert_eq!(s.elapsed_seconds(), 3, "clock freezes at win");
        assert_eq!(s.success_time(), Some(3), "first write wins");
        assert_eq!(s.submit(), GuessOutcome::Blocked);
    }

    #[test]
    fn shuffle_keeps_words_and_clears_selection() {
        let mut s = session();
        s.toggle(0);
        let mut before: Vec<String> = s.board().to_vec();
        s.shuffle(&mut SmallRng::seed_from_u64(99));
        assert!(s.selection().is_empty());
        let mut after: Vec<String> = s.board().to_vec();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn shuffle_is_refused_mid_reveal() {
        let mut s = session();
        select(&mut s, &["DODGE", "DUCK", "SHAKE", "SKIRT"]);
        s.submit();
        let before: Vec<String> = s.board().to_vec();
        s.shuffle(&mut SmallRng::seed_from_u64(99));
        assert_eq!(s.board(), &before[..]);
    }

    #[test]
    fn reveal_timing_matches_the_wave_contract() {
        let timing = RevealTiming::default();
        assert_eq!(timing.total(4), Duration::from_millis(1800));
        assert_eq!(timing.total(1), Duration::from_millis(1200));
    }
}
