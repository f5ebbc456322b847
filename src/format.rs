/*
* Clockwise Formatting Module
* Author: Jannis Krija (https://github.com/cipher-shad0w)
*
* This module converts second counts into display strings and parses
* user-entered durations like "1h30m", "05:30" or "90" back into seconds.
*/

use thiserror::Error;

/// Errors produced while parsing a duration entered by the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseTimeError {
    #[error("duration is empty")]
    Empty,

    #[error("'{0}' is not a number")]
    InvalidNumber(String),

    #[error("expected MM:SS or HH:MM:SS, got {0} parts")]
    InvalidColonFormat(usize),

    #[error("no amount found before a unit (use e.g. 5m, 1h30m, 45s)")]
    MissingAmount,

    #[error("duration is too large")]
    Overflow,
}

/// Format seconds as `HH:MM:SS`, or `MM:SS` when `show_hours` is false
///
/// Neither the hour field nor (without hours) the minute field wraps.
pub fn format_time(seconds: u64, show_hours: bool) -> String {
    let secs = seconds % 60;

    if show_hours {
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", seconds / 60, secs)
    }
}

/// Format seconds in natural form, e.g. "1h 5m" or "30s"
pub fn format_time_natural(seconds: u64) -> String {
    if seconds == 0 {
        return "0s".to_string();
    }

    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    let mut parts = Vec::with_capacity(3);
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if secs > 0 || parts.is_empty() {
        parts.push(format!("{}s", secs));
    }

    parts.join(" ")
}

/// Parse a user-entered duration into seconds
///
/// Accepted forms, checked in this order:
/// - unit form: `1h30m`, `45s`, `2m 10s`
/// - colon form: `MM:SS` or `HH:MM:SS`
/// - plain seconds: `90`
pub fn parse_time_input(text: &str) -> Result<u64, ParseTimeError> {
    let text = text.trim().to_lowercase();

    if text.is_empty() {
        return Err(ParseTimeError::Empty);
    }

    if text.contains(['h', 'm', 's']) {
        parse_with_units(&text)
    } else if text.contains(':') {
        parse_colon_form(&text)
    } else {
        parse_number(&text)
    }
}

/// Sum every `<digits><unit>` pair; other characters are skipped
fn parse_with_units(text: &str) -> Result<u64, ParseTimeError> {
    let mut total: u64 = 0;
    let mut digits = String::new();
    let mut matched = false;

    for c in text.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }

        let multiplier = match c {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            // Spaces and other letters neither end nor break a pair
            _ => continue,
        };

        if !digits.is_empty() {
            let amount = parse_number(&digits)?;
            total = amount
                .checked_mul(multiplier)
                .and_then(|seconds| total.checked_add(seconds))
                .ok_or(ParseTimeError::Overflow)?;
            matched = true;
        }
        digits.clear();
    }

    if matched {
        Ok(total)
    } else {
        Err(ParseTimeError::MissingAmount)
    }
}

fn parse_colon_form(text: &str) -> Result<u64, ParseTimeError> {
    let parts: Vec<&str> = text.split(':').collect();

    let (hours, minutes, seconds) = match parts.as_slice() {
        [minutes, seconds] => (0, parse_number(minutes)?, parse_number(seconds)?),
        [hours, minutes, seconds] => (
            parse_number(hours)?,
            parse_number(minutes)?,
            parse_number(seconds)?,
        ),
        _ => return Err(ParseTimeError::InvalidColonFormat(parts.len())),
    };

    hours
        .checked_mul(3600)
        .and_then(|total| minutes.checked_mul(60).and_then(|m| total.checked_add(m)))
        .and_then(|total| total.checked_add(seconds))
        .ok_or(ParseTimeError::Overflow)
}

fn parse_number(text: &str) -> Result<u64, ParseTimeError> {
    let text = text.trim();
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseTimeError::InvalidNumber(text.to_string()));
    }
    text.parse().map_err(|_| ParseTimeError::Overflow)
}
