// src/formatting/dates.rs
//! Brazilian Portuguese date display for post metadata.

use chrono::{DateTime, Datelike, Timelike, Utc};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

fn month_abbreviation(date: &DateTime<Utc>) -> &'static str {
    MONTH_ABBREVIATIONS[date.month0() as usize]
}

/// Formats a publication date as `25 mar 2021`.
pub fn format_publication_date(date: &DateTime<Utc>) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        month_abbreviation(date),
        date.year()
    )
}

/// Like [`format_publication_date`], with `""` for a missing date.
pub fn format_optional_date(date: Option<&DateTime<Utc>>) -> String {
    date.map(format_publication_date).unwrap_or_default()
}

/// The note shown under an edited post: `* editado em 25 mar 2021, às 15:49`.
pub fn format_edit_note(edited_at: &DateTime<Utc>) -> String {
    format!(
        "* editado em {}, às {:02}:{:02}",
        format_publication_date(edited_at),
        edited_at.hour(),
        edited_at.minute()
    )
}
