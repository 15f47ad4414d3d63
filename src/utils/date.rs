use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// First calendar day of the month containing `d`.
pub fn month_start(d: NaiveDate) -> NaiveDate {
    d.with_day(1).unwrap_or(d)
}

pub fn format_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn format_month(d: NaiveDate) -> String {
    d.format("%Y-%m").to_string()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse `YYYY-MM` (or any full date) into the first day of that month.
pub fn parse_month(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
        return Some(d);
    }
    parse_date_like(s).map(month_start)
}

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Slash and dash dates are read month-first; day-first only matches when the
/// leading field cannot be a month.
const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
];

/// Interpret free text as a calendar date.
///
/// Accepts ISO dates and timestamps, `MM/DD/YYYY` (or `DD/MM/YYYY` when the
/// first field exceeds 12), `YYYY-MM`, and month-name headers such as
/// `Jan-2024` or `ene 2024`.
pub fn parse_date_like(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS.iter() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    for fmt in DATE_FORMATS.iter() {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    // YYYY-MM / YYYY/MM
    for sep in ['-', '/'] {
        if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}{sep}01"), &format!("%Y{sep}%m{sep}%d"))
        {
            return Some(d);
        }
    }

    parse_month_name(s)
}

/// True when the header text has the shape of a date, whether or not it parses.
pub fn looks_like_date(s: &str) -> bool {
    static NUMERIC: OnceLock<Regex> = OnceLock::new();

    let numeric = NUMERIC.get_or_init(|| {
        Regex::new(r"^(\d{4}[-/.]\d{1,2}([-/.]\d{1,2})?|\d{1,2}[-/.]\d{1,2}[-/.]\d{2,4})([ T].*)?$")
            .expect("valid date regex")
    });

    let s = s.trim();
    numeric.is_match(s) || split_month_name(s).is_some()
}

fn month_number(name: &str) -> Option<u32> {
    let m = match name {
        "jan" | "january" | "ene" | "enero" => 1,
        "feb" | "february" | "febrero" => 2,
        "mar" | "march" | "marzo" => 3,
        "apr" | "april" | "abr" | "abril" => 4,
        "may" | "mayo" => 5,
        "jun" | "june" | "junio" => 6,
        "jul" | "july" | "julio" => 7,
        "aug" | "august" | "ago" | "agosto" => 8,
        "sep" | "sept" | "september" | "septiembre" | "setiembre" => 9,
        "oct" | "october" | "octubre" => 10,
        "nov" | "november" | "noviembre" => 11,
        "dec" | "december" | "dic" | "diciembre" => 12,
        _ => return None,
    };
    Some(m)
}

/// `Jan-2024`, `enero 2024`, `Sep./24` → (month, year text).
fn split_month_name(s: &str) -> Option<(u32, String)> {
    let lower = s.trim().to_lowercase();
    let (name, year) = lower.split_once(['-', ' ', '/'])?;
    let month = month_number(name.trim_end_matches('.'))?;
    let year = year.trim();
    if (2..=4).contains(&year.len()) && year.chars().all(|c| c.is_ascii_digit()) {
        Some((month, year.to_string()))
    } else {
        None
    }
}

fn parse_month_name(s: &str) -> Option<NaiveDate> {
    let (month, year) = split_month_name(s)?;
    let year: i32 = year.parse().ok()?;
    let year = if year < 100 { 2000 + year } else { year };
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Convert an Excel serial day number (1900 date system) into a date.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}
