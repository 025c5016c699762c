//! Article dates. Articles carry their publish date as a `YYYY-MM-DD` prefix
//! on the file name; [`format_date`] turns that prefix into display text.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::fmt::Write;
use std::sync::OnceLock;

static DATE_PREFIX: OnceLock<Regex> = OnceLock::new();

fn date_prefix_regex() -> &'static Regex {
    DATE_PREFIX.get_or_init(|| {
        // the pattern is a literal; failing to compile it is a programming error
        Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2})").unwrap()
    })
}

/// Returns the leading `YYYY-MM-DD` of `file_name`, if it has one.
pub fn date_prefix(file_name: &str) -> Option<&str> {
    date_prefix_regex()
        .captures(file_name)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Formats the ISO date `iso` (`YYYY-MM-DD`) according to `pattern`. In the
/// pattern, `Y` is the 4-digit year, `m` the 2-digit month, and `d` the
/// 2-digit day. Every other character is copied as-is.
pub fn format_date(iso: &str, pattern: &str) -> Result<String> {
    let date = NaiveDate::parse_from_str(iso, "%Y-%m-%d").map_err(|err| Error::Parse {
        date: iso.to_owned(),
        err,
    })?;

    let mut out = String::with_capacity(pattern.len() + 4);
    for c in pattern.chars() {
        // writing to a String never fails
        let _ = match c {
            'Y' => write!(out, "{:04}", date.year()),
            'm' => write!(out, "{:02}", date.month()),
            'd' => write!(out, "{:02}", date.day()),
            c => {
                out.push(c);
                Ok(())
            }
        };
    }
    Ok(out)
}

/// The result of a fallible date operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error handling an article date.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a date prefix is not a real calendar date (e.g.,
    /// `2024-02-30`).
    #[error("invalid date `{date}`: {err}")]
    Parse {
        date: String,
        #[source]
        err: chrono::ParseError,
    },
}
