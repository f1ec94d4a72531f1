// src/analytics/mod.rs
//! Content measurement for posts: word counts and reading time.

use crate::algebras::RichTextRenderer;
use crate::constants::WORDS_PER_MINUTE;
use crate::model::Section;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static WORD_CHARACTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\w").expect("Failed to compile word regex - this is a bug in the code")
});

const NO_BREAK_SPACE: char = '\u{00A0}';

/// Estimated time to read a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadingTime {
    pub words: usize,
    pub minutes: u32,
}

impl ReadingTime {
    pub fn from_word_count(words: usize) -> Self {
        let minutes = words.div_ceil(WORDS_PER_MINUTE);
        Self {
            words,
            minutes: u32::try_from(minutes).unwrap_or(u32::MAX),
        }
    }
}

impl fmt::Display for ReadingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.minutes)
    }
}

/// Counts the words of `text`.
///
/// No-break spaces count as ordinary spaces, the text is split on single
/// spaces, and tokens without any letter, digit or underscore are dropped.
pub fn count_words(text: &str) -> usize {
    let normalized = text.replace(NO_BREAK_SPACE, " ");
    normalized
        .split(' ')
        .filter(|token| WORD_CHARACTER.is_match(token))
        .count()
}

/// Measures headings and bodies of `sections` in order.
pub fn measure_reading_time<R>(sections: &[Section], renderer: &R) -> ReadingTime
where
    R: RichTextRenderer + ?Sized,
{
    let words = sections
        .iter()
        .map(|section| {
            let body_words: usize = section
                .body
                .iter()
                .map(|block| count_words(&renderer.as_plain_text(block)))
                .sum();
            count_words(&section.heading) + body_words
        })
        .sum();

    ReadingTime::from_word_count(words)
}

/// Minutes needed to read `sections` at 200 words per minute, rounded up.
pub fn estimate_reading_minutes<R>(sections: &[Section], renderer: &R) -> u32
where
    R: RichTextRenderer + ?Sized,
{
    measure_reading_time(sections, renderer).minutes
}
