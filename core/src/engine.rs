use alloc::vec::Vec;
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Incorrect guesses a session may absorb before it is lost.
pub const MAX_MISTAKES: u8 = 4;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Outcome of the selection and shuffle operations.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveOutcome {
    NoChange,
    Changed,
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Outcome of submitting a full selection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GuessOutcome {
    NoChange,
    Solved { won: bool },
    Missed { one_away: bool, lost: bool },
}

impl GuessOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn is_one_away(self) -> bool {
        matches!(self, Self::Missed { one_away: true, .. })
    }
}

/// One submitted selection, recorded verbatim. `category_color` is present
/// exactly when the guess was correct.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Guess {
    pub words: [Word; GROUP_SIZE],
    pub correct: bool,
    pub category_color: Option<CategoryColor>,
}

/// State machine for one play-through of a puzzle.
///
/// All operations are synchronous; an operation whose guard fails declines
/// with a `NoChange` outcome instead of erroring. Once the session is won or
/// lost, only `reset` is accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEngine {
    puzzle: Puzzle,
    remaining_words: Vec<Word>,
    selected_words: SmallVec<[Word; GROUP_SIZE]>,
    mistakes_remaining: u8,
    solved: Vec<usize>,
    status: GameStatus,
    is_shuffling: bool,
    guess_history: Vec<Guess>,
}

impl GameEngine {
    pub fn new<R: Rng + ?Sized>(puzzle: Puzzle, rng: &mut R) -> Self {
        let pool: Vec<Word> = puzzle.word_pool().cloned().collect();
        Self {
            remaining_words: shuffled(&pool, rng),
            selected_words: SmallVec::new(),
            mistakes_remaining: MAX_MISTAKES,
            solved: Vec::new(),
            status: GameStatus::InProgress,
            is_shuffling: false,
            guess_history: Vec::new(),
            puzzle,
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Unsolved words in their current display order.
    pub fn remaining_words(&self) -> &[Word] {
        &self.remaining_words
    }

    pub fn selected_words(&self) -> &[Word] {
        &self.selected_words
    }

    pub fn is_selected(&self, word: &str) -> bool {
        self.selected_words.iter().any(|w| w.as_str() == word)
    }

    pub fn mistakes_remaining(&self) -> u8 {
        self.mistakes_remaining
    }

    /// Solved categories in solve order.
    pub fn solved_categories(&self) -> impl Iterator<Item = &Category> {
        self.solved.iter().map(|&ix| &self.puzzle.categories()[ix])
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn is_shuffling(&self) -> bool {
        self.is_shuffling
    }

    pub fn guess_history(&self) -> &[Guess] {
        &self.guess_history
    }

    /// Selects `word` if fewer than four words are selected, deselects it if
    /// it already is. Unknown words and a fifth selection are no-ops.
    pub fn toggle_select(&mut self, word: &str) -> MoveOutcome {
        use MoveOutcome::*;

        if !self.accepts_moves() {
            return NoChange;
        }

        if let Some(ix) = self.selected_words.iter().position(|w| w.as_str() == word) {
            self.selected_words.remove(ix);
            return Changed;
        }

        if self.selected_words.len() >= GROUP_SIZE {
            return NoChange;
        }

        match self.remaining_words.iter().find(|w| w.as_str() == word) {
            Some(word) => {
                self.selected_words.push(word.clone());
                Changed
            }
            None => NoChange,
        }
    }

    /// Evaluates the current four-word selection. No-op unless exactly four
    /// words are selected and no shuffle is in flight.
    pub fn submit(&mut self) -> GuessOutcome {
        if !self.accepts_moves() || self.selected_words.len() != GROUP_SIZE {
            return GuessOutcome::NoChange;
        }

        let verdict = evaluate(&self.selected_words, self.puzzle.categories(), &self.solved);
        let selection = core::mem::take(&mut self.selected_words);
        let words: [Word; GROUP_SIZE] = selection
            .into_inner()
            .expect("selection is capped at four words");

        match verdict {
            Evaluation::Exact(ix) => {
                let color = self.puzzle.categories()[ix].color;
                self.remaining_words.retain(|w| !words.contains(w));
                self.solved.push(ix);
                self.guess_history.push(Guess {
                    words,
                    correct: true,
                    category_color: Some(color),
                });

                let won = self.remaining_words.is_empty();
                if won {
                    self.status = GameStatus::Won;
                }
                log::debug!(
                    "category solved, {} words left",
                    self.remaining_words.len()
                );
                GuessOutcome::Solved { won }
            }
            Evaluation::OneAway | Evaluation::Miss => {
                self.mistakes_remaining -= 1;
                self.guess_history.push(Guess {
                    words,
                    correct: false,
                    category_color: None,
                });

                let lost = self.mistakes_remaining == 0;
                if lost {
                    self.status = GameStatus::Lost;
                }
                GuessOutcome::Missed {
                    one_away: matches!(verdict, Evaluation::OneAway),
                    lost,
                }
            }
        }
    }

    /// Phase one of a shuffle: locks input and clears the selection. The
    /// caller reorders the board with [`complete_shuffle`](Self::complete_shuffle)
    /// once its transition delay has elapsed.
    pub fn begin_shuffle(&mut self) -> MoveOutcome {
        use MoveOutcome::*;

        if !self.accepts_moves() {
            return NoChange;
        }

        self.is_shuffling = true;
        self.selected_words.clear();
        Changed
    }

    /// Phase two of a shuffle: reorders the remaining words and unlocks input.
    pub fn complete_shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> MoveOutcome {
        use MoveOutcome::*;

        if !self.is_shuffling {
            log::warn!("shuffle completion without a shuffle in flight");
            return NoChange;
        }

        self.remaining_words = shuffled(&self.remaining_words, rng);
        self.is_shuffling = false;
        Changed
    }

    pub fn deselect_all(&mut self) -> MoveOutcome {
        use MoveOutcome::*;

        if !self.accepts_moves() || self.selected_words.is_empty() {
            return NoChange;
        }

        self.selected_words.clear();
        Changed
    }

    /// Discards the session and starts over on the same puzzle. Always
    /// accepted, even mid-shuffle or after the game has ended.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::new(self.puzzle.clone(), rng);
    }

    fn accepts_moves(&self) -> bool {
        !self.is_shuffling && !self.status.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const YELLOW: [&str; 4] = ["NETFLIX", "TIKTOK", "TWITTER", "LINKEDIN"];
    const GREEN: [&str; 4] = ["PICKLE", "BASE", "DODGE", "VOLLEY"];
    const BLUE: [&str; 4] = ["HIKE", "RUN", "SNAP", "DRIVE"];
    const PURPLE: [&str; 4] = ["TURNOVER", "DATE", "APPLE", "JAM"];
    // one word from each category, so no near-miss hint can fire
    const SPREAD: [&str; 4] = ["NETFLIX", "PICKLE", "HIKE", "TURNOVER"];

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    fn game() -> GameEngine {
        GameEngine::new(Puzzle::builtin(), &mut rng())
    }

    fn select(game: &mut GameEngine, words: [&str; 4]) {
        for word in words {
            assert!(game.toggle_select(word).has_update());
        }
    }

    fn sorted(words: &[Word]) -> Vec<Word> {
        let mut words = words.to_vec();
        words.sort();
        words
    }

    fn assert_words_accounted_for(game: &GameEngine) {
        let solved: usize = game.solved_categories().count() * GROUP_SIZE;
        assert_eq!(game.remaining_words().len() + solved, 16);
    }

    #[test]
    fn fresh_game_holds_the_full_shuffled_pool() {
        let game = game();

        assert_eq!(game.remaining_words().len(), 16);
        assert_eq!(
            sorted(game.remaining_words()),
            sorted(&game.puzzle().word_pool().cloned().collect::<Vec<_>>())
        );
        assert_eq!(game.mistakes_remaining(), MAX_MISTAKES);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(game.selected_words().is_empty());
        assert!(game.guess_history().is_empty());
        assert!(!game.is_shuffling());
    }

    #[test]
    fn toggle_select_caps_the_selection_at_four_words() {
        let mut game = game();

        select(&mut game, YELLOW);
        assert_eq!(game.toggle_select("PICKLE"), MoveOutcome::NoChange);
        assert_eq!(game.selected_words().len(), 4);
    }

    #[test]
    fn toggle_select_deselects_on_a_second_tap() {
        let mut game = game();

        assert!(game.toggle_select("JAM").has_update());
        assert!(game.is_selected("JAM"));
        assert!(game.toggle_select("JAM").has_update());
        assert!(!game.is_selected("JAM"));
    }

    #[test]
    fn toggle_select_ignores_words_not_on_the_board() {
        let mut game = game();

        assert_eq!(game.toggle_select("ZEBRA"), MoveOutcome::NoChange);

        select(&mut game, YELLOW);
        game.submit();
        assert_eq!(game.toggle_select("NETFLIX"), MoveOutcome::NoChange);
        assert!(game.selected_words().is_empty());
    }

    #[test]
    fn submit_requires_a_full_selection() {
        let mut game = game();

        select(&mut game, ["HIKE", "RUN", "SNAP", "DRIVE"]);
        assert!(game.toggle_select("DRIVE").has_update());

        assert_eq!(game.submit(), GuessOutcome::NoChange);
        assert_eq!(game.mistakes_remaining(), MAX_MISTAKES);
        assert!(game.guess_history().is_empty());
    }

    #[test]
    fn exact_selection_solves_the_category() {
        let mut game = game();

        select(&mut game, YELLOW);
        let outcome = game.submit();

        assert_eq!(outcome, GuessOutcome::Solved { won: false });
        assert_eq!(game.remaining_words().len(), 12);
        assert_eq!(game.mistakes_remaining(), MAX_MISTAKES);
        assert!(game.selected_words().is_empty());
        assert_words_accounted_for(&game);

        let solved: Vec<_> = game.solved_categories().collect();
        assert_eq!(solved.len(), 1);
        assert_eq!(solved[0].name, "APPS TO WASTE TIME");
        assert_eq!(solved[0].color, CategoryColor::Yellow);
        assert!(!game.remaining_words().iter().any(|w| w == "NETFLIX"));

        assert_eq!(game.guess_history().len(), 1);
        let guess = &game.guess_history()[0];
        assert!(guess.correct);
        assert_eq!(guess.category_color, Some(CategoryColor::Yellow));
    }

    #[test]
    fn near_miss_reports_one_away_and_costs_a_mistake() {
        let mut game = game();

        select(&mut game, ["HIKE", "RUN", "SNAP", "NETFLIX"]);
        let outcome = game.submit();

        assert_eq!(
            outcome,
            GuessOutcome::Missed {
                one_away: true,
                lost: false
            }
        );
        assert!(outcome.is_one_away());
        assert_eq!(game.mistakes_remaining(), 3);
        assert_eq!(game.remaining_words().len(), 16);
        assert!(!game.guess_history()[0].correct);
        assert_eq!(game.guess_history()[0].category_color, None);
    }

    #[test]
    fn spread_selection_is_a_plain_miss() {
        let mut game = game();

        select(&mut game, SPREAD);
        let outcome = game.submit();

        assert_eq!(
            outcome,
            GuessOutcome::Missed {
                one_away: false,
                lost: false
            }
        );
        assert_eq!(game.mistakes_remaining(), 3);
    }

    #[test]
    fn four_misses_lose_the_game() {
        let mut game = game();

        for expected_left in [3, 2, 1] {
            select(&mut game, SPREAD);
            let outcome = game.submit();
            assert_eq!(
                outcome,
                GuessOutcome::Missed {
                    one_away: false,
                    lost: false
                }
            );
            assert_eq!(game.mistakes_remaining(), expected_left);
        }

        select(&mut game, SPREAD);
        let outcome = game.submit();

        assert_eq!(
            outcome,
            GuessOutcome::Missed {
                one_away: false,
                lost: true
            }
        );
        assert_eq!(game.mistakes_remaining(), 0);
        assert_eq!(game.status(), GameStatus::Lost);
        assert!(game.is_finished());
        assert!(!game.status().is_won());
        assert_eq!(game.guess_history().len(), 4);
    }

    #[test]
    fn solving_all_categories_wins_even_with_misses_between() {
        let mut game = game();

        select(&mut game, GREEN);
        assert_eq!(game.submit(), GuessOutcome::Solved { won: false });
        assert_words_accounted_for(&game);

        select(&mut game, ["HIKE", "RUN", "SNAP", "NETFLIX"]);
        assert!(game.submit().is_one_away());
        assert_words_accounted_for(&game);

        select(&mut game, PURPLE);
        assert_eq!(game.submit(), GuessOutcome::Solved { won: false });

        select(&mut game, BLUE);
        assert_eq!(game.submit(), GuessOutcome::Solved { won: false });

        select(&mut game, YELLOW);
        assert_eq!(game.submit(), GuessOutcome::Solved { won: true });

        assert_eq!(game.status(), GameStatus::Won);
        assert!(game.status().is_won());
        assert!(game.remaining_words().is_empty());
        assert_eq!(game.mistakes_remaining(), 3);
        assert_eq!(game.solved_categories().count(), 4);
        assert_words_accounted_for(&game);
    }

    #[test]
    fn shuffle_locks_input_until_completed() {
        let mut game = game();

        assert!(game.toggle_select("JAM").has_update());
        assert!(game.begin_shuffle().has_update());

        assert!(game.is_shuffling());
        assert!(game.selected_words().is_empty());
        assert_eq!(game.toggle_select("JAM"), MoveOutcome::NoChange);
        assert_eq!(game.submit(), GuessOutcome::NoChange);
        assert_eq!(game.begin_shuffle(), MoveOutcome::NoChange);
        assert_eq!(game.deselect_all(), MoveOutcome::NoChange);

        let before = sorted(game.remaining_words());
        assert!(game.complete_shuffle(&mut rng()).has_update());

        assert!(!game.is_shuffling());
        assert_eq!(sorted(game.remaining_words()), before);
        assert_words_accounted_for(&game);
    }

    #[test]
    fn complete_shuffle_without_begin_is_a_no_op() {
        let mut game = game();
        let before = game.remaining_words().to_vec();

        assert_eq!(game.complete_shuffle(&mut rng()), MoveOutcome::NoChange);
        assert_eq!(game.remaining_words(), &before[..]);
    }

    #[test]
    fn deselect_all_clears_a_nonempty_selection_only() {
        let mut game = game();

        assert_eq!(game.deselect_all(), MoveOutcome::NoChange);

        select(&mut game, ["DATE", "APPLE", "JAM", "TURNOVER"]);
        assert!(game.deselect_all().has_update());
        assert!(game.selected_words().is_empty());
    }

    #[test]
    fn reset_restores_a_fresh_session() {
        let mut game = game();

        select(&mut game, SPREAD);
        game.submit();
        select(&mut game, GREEN);
        game.submit();

        game.reset(&mut rng());

        assert_eq!(game.mistakes_remaining(), MAX_MISTAKES);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.remaining_words().len(), 16);
        assert!(game.solved_categories().next().is_none());
        assert!(game.guess_history().is_empty());
        assert!(game.selected_words().is_empty());
    }

    #[test]
    fn finished_game_rejects_every_move_but_reset() {
        let mut game = game();
        for _ in 0..4 {
            select(&mut game, SPREAD);
            game.submit();
        }
        assert!(game.is_finished());

        assert_eq!(game.toggle_select("JAM"), MoveOutcome::NoChange);
        assert_eq!(game.submit(), GuessOutcome::NoChange);
        assert_eq!(game.begin_shuffle(), MoveOutcome::NoChange);
        assert_eq!(game.deselect_all(), MoveOutcome::NoChange);

        game.reset(&mut rng());
        assert!(!game.is_finished());
    }

    #[test]
    fn engine_survives_a_serde_round_trip() {
        let mut game = game();

        select(&mut game, GREEN);
        game.submit();
        select(&mut game, ["HIKE", "RUN", "SNAP", "NETFLIX"]);
        game.submit();
        assert!(game.toggle_select("JAM").has_update());

        let encoded = serde_json::to_string(&game).unwrap();
        let decoded: GameEngine = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, game);
    }
}
