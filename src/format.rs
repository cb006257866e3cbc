use chrono::{DateTime, NaiveDate, NaiveTime};

use crate::model::DocumentKind;

pub const PLACEHOLDER: &str = "\u{2014}";

pub fn or_placeholder(s: &str) -> &str {
    if s.trim().is_empty() { PLACEHOLDER } else { s }
}

/// Parse the calendar date at the start of an ISO date or datetime string.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let head = s.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// `2025-03-14` → `Mar 14, 2025`. Unparseable input is shown as given.
pub fn display_date(s: &str) -> String {
    match parse_iso_date(s) {
        Some(date) => format_date(date),
        None => s.trim().to_string(),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Clock time as `7:05 AM`. Accepts `HH:MM`, `HH:MM:SS` or an RFC 3339
/// timestamp (shown in its own offset); anything else is shown as given.
pub fn display_time(s: &str) -> String {
    let s = s.trim();
    let time = NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.time()));
    match time {
        Some(t) => t.format("%-I:%M %p").to_string(),
        None => s.to_string(),
    }
}

/// US dollar amount with thousands separators: `1234.5` → `$1,234.50`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let (dollars, cents) = (cents / 100, cents % 100);

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && (dollars > 0 || cents > 0) { "-" } else { "" };
    format!("{sign}${grouped}.{cents:02}")
}

pub fn format_hours(hours: f64) -> String {
    format!("{hours:.2}")
}

/// Lower-case, collapse every run of characters outside `[a-z0-9]` into one
/// hyphen, trim hyphens at both ends.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }
    if slug.is_empty() {
        slug.push_str("untitled");
    }
    slug
}

/// `<doctype>-<slug>-<date-or-"draft">.pdf`
pub fn document_filename(kind: DocumentKind, primary_name: &str, iso_date: &str) -> String {
    let date = parse_iso_date(iso_date)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "draft".to_string());
    format!("{}-{}-{}.pdf", kind.slug(), slugify(primary_name), date)
}
