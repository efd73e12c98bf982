use crate::{Category, Word, GROUP_SIZE};

/// Verdict on a submitted four-word selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Evaluation {
    /// The selection equals (as a set) the word set of the category at this index.
    Exact(usize),
    /// Not a match, but an unsolved category shares exactly three words with it.
    OneAway,
    Miss,
}

/// Decides what a selection of exactly four distinct words amounts to.
///
/// `solved` holds the indices of already-solved categories; only the others
/// are considered for the one-away hint. The first qualifying category in
/// definition order wins, so at most one hint results per submission.
/// Pure: no state is touched here, the caller decides what changes.
pub fn evaluate(selected: &[Word], categories: &[Category], solved: &[usize]) -> Evaluation {
    if selected.len() == GROUP_SIZE {
        let exact = categories
            .iter()
            .position(|category| category.words.iter().all(|w| selected.contains(w)));
        if let Some(ix) = exact {
            return Evaluation::Exact(ix);
        }
    }

    let one_away = categories
        .iter()
        .enumerate()
        .filter(|(ix, _)| !solved.contains(ix))
        .any(|(_, category)| overlap(selected, category) == GROUP_SIZE - 1);

    if one_away {
        Evaluation::OneAway
    } else {
        Evaluation::Miss
    }
}

fn overlap(selected: &[Word], category: &Category) -> usize {
    selected
        .iter()
        .filter(|word| category.contains(word.as_str()))
        .count()
}
