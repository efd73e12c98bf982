#![no_std]

extern crate alloc;

use alloc::collections::BTreeSet;
use alloc::string::String;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use evaluate::*;
pub use shuffle::*;
pub use summary::*;

mod engine;
mod error;
mod evaluate;
mod shuffle;
mod summary;

/// A single tile word. The builtin content is upper-case; comparisons are exact.
pub type Word = String;

/// Number of words in a category, and in a complete selection.
pub const GROUP_SIZE: usize = 4;

/// Number of categories in a puzzle.
pub const CATEGORY_COUNT: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryColor {
    Yellow,
    Green,
    Blue,
    Purple,
}

impl CategoryColor {
    /// Lower-case name, also used as the CSS class of the reveal banner.
    pub const fn name(self) -> &'static str {
        use CategoryColor::*;
        match self {
            Yellow => "yellow",
            Green => "green",
            Blue => "blue",
            Purple => "purple",
        }
    }

    /// Emoji glyph used in the shareable result grid.
    pub const fn glyph(self) -> &'static str {
        use CategoryColor::*;
        match self {
            Yellow => "🟨",
            Green => "🟩",
            Blue => "🟦",
            Purple => "🟪",
        }
    }
}

/// A named group of four words sharing a hidden theme; the unit of a correct guess.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub color: CategoryColor,
    pub words: [Word; GROUP_SIZE],
}

impl Category {
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w.as_str() == word)
    }
}

/// The complete definition of one game: four categories with disjoint word sets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    categories: [Category; CATEGORY_COUNT],
}

impl Puzzle {
    pub fn new(categories: [Category; CATEGORY_COUNT]) -> Result<Self> {
        let mut words = BTreeSet::new();
        let mut colors = BTreeSet::new();

        for category in &categories {
            if !colors.insert(category.color.name()) {
                return Err(GameError::DuplicateColor);
            }
            for word in &category.words {
                if !words.insert(word.as_str()) {
                    return Err(GameError::DuplicateWord);
                }
            }
        }

        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn total_words(&self) -> usize {
        self.categories.len() * GROUP_SIZE
    }

    /// Every word of every category, in definition order.
    pub fn word_pool(&self) -> impl Iterator<Item = &Word> {
        self.categories
            .iter()
            .flat_map(|category| category.words.iter())
    }

    pub fn category_of(&self, word: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.contains(word))
    }

    /// The fixed puzzle shipped with the site.
    pub fn builtin() -> Self {
        use CategoryColor::*;

        fn category(name: &str, color: CategoryColor, words: [&str; GROUP_SIZE]) -> Category {
            Category {
                name: String::from(name),
                color,
                words: words.map(String::from),
            }
        }

        Self::new([
            category(
                "APPS TO WASTE TIME",
                Yellow,
                ["NETFLIX", "TIKTOK", "TWITTER", "LINKEDIN"],
            ),
            category(
                "SPORTS ENDING IN -BALL",
                Green,
                ["PICKLE", "BASE", "DODGE", "VOLLEY"],
            ),
            category("FOOTBALL TERMS", Blue, ["HIKE", "RUN", "SNAP", "DRIVE"]),
            category("YUMMY FOODS", Purple, ["TURNOVER", "DATE", "APPLE", "JAM"]),
        ])
        .expect("builtin puzzle is valid")
    }
}
