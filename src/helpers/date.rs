//! Date helper functions

use chrono::{DateTime, Datelike, TimeZone};

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_PT: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Format a date using Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "YYYY-MM-DD") // -> "2024-01-15"
/// ```
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    // Convert Moment.js format to chrono format
    let chrono_format = moment_to_chrono_format(format);
    date.format(&chrono_format).to_string()
}

/// Format a publication date for display in the configured language.
///
/// Matches the long date style of `Date.toLocaleDateString`: day,
/// full month name, year. Language tags are matched on their primary
/// subtag, so "pt-br" and "pt" format the same way; unknown languages
/// fall back to English.
///
/// # Examples
/// ```ignore
/// localized_date(&date, "pt-br") // -> "15 de março de 2021"
/// localized_date(&date, "en")    // -> "March 15, 2021"
/// ```
pub fn localized_date<Tz: TimeZone>(date: &DateTime<Tz>, language: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let primary = language
        .split(['-', '_'])
        .next()
        .unwrap_or("en")
        .to_ascii_lowercase();
    let month = date.month0() as usize;

    match primary.as_str() {
        "pt" => format!("{:02} de {} de {}", date.day(), MONTHS_PT[month], date.year()),
        "es" => format!("{:02} de {} de {}", date.day(), MONTHS_ES[month], date.year()),
        _ => format!("{} {:02}, {}", MONTHS_EN[month], date.day(), date.year()),
    }
}

/// Generate a <time> HTML element with a localized display value
pub fn time_tag<Tz: TimeZone>(date: &DateTime<Tz>, language: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let datetime = date.format("%Y-%m-%dT%H:%M:%S%:z").to_string();
    format!(
        r#"<time datetime="{}">{}</time>"#,
        datetime,
        localized_date(date, language)
    )
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Process from longest to shortest patterns within each category
    let replacements = [
        // Year (process first as they're uppercase)
        ("YYYY", "%Y"),
        ("YY", "%y"),
        // Month (uppercase M)
        ("MMMM", "%B"), // Full month name
        ("MMM", "%b"),  // Abbreviated month name
        ("MM", "%m"),   // Two-digit month
        // Day of month (uppercase D)
        ("DD", "%d"),
        // Hour 24h / 12h
        ("HH", "%H"),
        ("hh", "%I"),
        // Minute (lowercase m after we've processed MM)
        ("mm", "%M"),
        // Second
        ("ss", "%S"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}
