use alloc::string::String;

use crate::{Category, Guess};

/// Site-identifying first line of the shareable result block.
pub const SHARE_HEADER: &str = "olafdsouza.com/connections";

/// Glyph for a word no category claims. Cannot happen with the builtin
/// puzzle, but a degenerate history must still render.
const NEUTRAL_GLYPH: &str = "⬜";

/// Renders the full guess history as the compact emoji grid offered to the
/// share and copy actions: one line per guess, one glyph per word.
pub fn share_text(history: &[Guess], categories: &[Category]) -> String {
    let mut out = String::from(SHARE_HEADER);

    for guess in history {
        out.push('\n');
        match guess.category_color {
            Some(color) if guess.correct => {
                for _ in &guess.words {
                    out.push_str(color.glyph());
                }
            }
            _ => {
                for word in &guess.words {
                    let glyph = categories
                        .iter()
                        .find(|category| category.contains(word.as_str()))
                        .map_or(NEUTRAL_GLYPH, |category| category.color.glyph());
                    out.push_str(glyph);
                }
            }
        }
    }

    out
}
