//! Publish-date derivation from localized date text
//!
//! Scraped posts carry their date as display text such as `12 במרץ 2023` or
//! `3 באוק` (the year is omitted for the current year). [`DateDeriver`]
//! turns that text into a calendar date using a per-locale [`MonthTable`]
//! and a configurable fallback year for year-less dates.

use chrono::{DateTime, Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static DAY_MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,2})\s+(\p{L}+)(?:.*?(\d{4}))?").expect("date pattern compiles")
});

/// Month names for one locale, matched on their first three characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthTable {
    pub locale: String,
    /// Prefix glued to month names in running text (Hebrew `ב`, "in").
    pub preposition: Option<String>,
    prefixes: Vec<(String, u32)>,
}

const HEBREW_MONTHS: [&str; 12] = [
    "ינואר", "פברואר", "מרץ", "אפריל", "מאי", "יוני", "יולי", "אוגוסט", "ספטמבר", "אוקטובר",
    "נובמבר", "דצמבר",
];

const ENGLISH_MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

impl MonthTable {
    fn from_names(locale: &str, preposition: Option<&str>, names: &[&str; 12]) -> Self {
        MonthTable {
            locale: locale.to_string(),
            preposition: preposition.map(str::to_string),
            prefixes: names
                .iter()
                .zip(1..)
                .map(|(name, number)| (prefix3(name), number))
                .collect(),
        }
    }

    pub fn hebrew() -> Self {
        Self::from_names("he", Some("ב"), &HEBREW_MONTHS)
    }

    pub fn english() -> Self {
        Self::from_names("en", None, &ENGLISH_MONTHS)
    }

    /// Table for a locale code, if one is known.
    pub fn for_locale(locale: &str) -> Option<Self> {
        match locale {
            "he" => Some(Self::hebrew()),
            "en" => Some(Self::english()),
            _ => None,
        }
    }

    /// Month number for a word such as `במרץ`, `March` or `mar`.
    pub fn month(&self, word: &str) -> Option<u32> {
        let lowered = word.to_lowercase();
        let lookup = |candidate: &str| {
            let key = prefix3(candidate);
            self.prefixes
                .iter()
                .find(|(prefix, _)| *prefix == key)
                .map(|(_, number)| *number)
        };
        if let Some(found) = lookup(&lowered) {
            return Some(found);
        }
        let stripped = self
            .preposition
            .as_deref()
            .and_then(|p| lowered.strip_prefix(p))
            .filter(|rest| !rest.is_empty())?;
        lookup(stripped)
    }
}

fn prefix3(word: &str) -> String {
    word.chars().take(3).collect()
}

/// Year used when the date text has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackYear {
    Current,
    /// The scrape timestamp's year, or the current year when unknown.
    #[default]
    Scrape,
    Fixed(i32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateDeriver {
    pub table: MonthTable,
    pub fallback_year: FallbackYear,
}

impl Default for DateDeriver {
    fn default() -> Self {
        DateDeriver {
            table: MonthTable::hebrew(),
            fallback_year: FallbackYear::default(),
        }
    }
}

impl DateDeriver {
    pub fn new(table: MonthTable, fallback_year: FallbackYear) -> Self {
        DateDeriver {
            table,
            fallback_year,
        }
    }

    /// Derive a date from display text. Never fails: text that cannot be
    /// read as a valid date yields `today`.
    pub fn derive(&self, text: &str, scraped_at: Option<&str>, today: NaiveDate) -> NaiveDate {
        self.parse(text, scraped_at, today).unwrap_or_else(|| {
            if !text.trim().is_empty() {
                log::debug!("unreadable date text {text:?}, using {today}");
            }
            today
        })
    }

    fn parse(&self, text: &str, scraped_at: Option<&str>, today: NaiveDate) -> Option<NaiveDate> {
        for caps in DAY_MONTH_YEAR.captures_iter(text) {
            let Some(month) = self.table.month(&caps[2]) else {
                continue;
            };
            let day: u32 = caps[1].parse().ok()?;
            let year = match caps.get(3) {
                Some(year) => year.as_str().parse().ok()?,
                None => self.fallback(scraped_at, today),
            };
            return NaiveDate::from_ymd_opt(year, month, day);
        }
        None
    }

    fn fallback(&self, scraped_at: Option<&str>, today: NaiveDate) -> i32 {
        match self.fallback_year {
            FallbackYear::Current => today.year(),
            FallbackYear::Scrape => scraped_at.and_then(year_of).unwrap_or(today.year()),
            FallbackYear::Fixed(year) => year,
        }
    }
}

/// Year of an RFC 3339 timestamp.
pub fn year_of(stamp: &str) -> Option<i32> {
    DateTime::parse_from_rfc3339(stamp).ok().map(|dt| dt.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_hebrew_month_lookup() {
        let table = MonthTable::hebrew();
        assert_eq!(table.month("במרץ"), Some(3));
        assert_eq!(table.month("ביוני"), Some(6));
        assert_eq!(table.month("דצמבר"), Some(12));
        assert_eq!(table.month("שלום"), None);
    }

    #[test]
    fn test_english_month_lookup() {
        let table = MonthTable::english();
        assert_eq!(table.month("March"), Some(3));
        assert_eq!(table.month("sep"), Some(9));
        assert_eq!(MonthTable::for_locale("fr"), None);
    }

    #[test]
    fn test_full_hebrew_date() {
        let d = DateDeriver::default();
        assert_eq!(d.derive("12 במרץ 2023", None, today()), ymd(2023, 3, 12));
        assert_eq!(d.derive("פורסם 3 באוק׳, 2021 · 2 דקות", None, today()), ymd(2021, 10, 3));
    }

    #[test]
    fn test_year_less_date_uses_scrape_year() {
        let d = DateDeriver::default();
        let stamp = Some("2023-10-01T12:00:00.000Z");
        assert_eq!(d.derive("5 בינו׳", stamp, today()), ymd(2023, 1, 5));
        // No timestamp falls through to the current year
        assert_eq!(d.derive("5 בינו׳", None, today()), ymd(2025, 1, 5));
    }

    #[test]
    fn test_year_less_date_with_current_and_fixed_years() {
        let stamp = Some("2023-10-01T12:00:00Z");
        let current = DateDeriver::new(MonthTable::hebrew(), FallbackYear::Current);
        assert_eq!(current.derive("5 במאי", stamp, today()), ymd(2025, 5, 5));
        let fixed = DateDeriver::new(MonthTable::hebrew(), FallbackYear::Fixed(2024));
        assert_eq!(fixed.derive("5 במאי", stamp, today()), ymd(2024, 5, 5));
    }

    #[test]
    fn test_invalid_and_unreadable_fall_back_to_today() {
        let d = DateDeriver::default();
        assert_eq!(d.derive("31 בפברואר 2023", None, today()), today());
        assert_eq!(d.derive("לפני שעתיים", None, today()), today());
        assert_eq!(d.derive("", None, today()), today());
    }

    #[test]
    fn test_english_dates() {
        let d = DateDeriver::new(MonthTable::english(), FallbackYear::Current);
        assert_eq!(d.derive("Posted 7 July 2022", None, today()), ymd(2022, 7, 7));
    }
}
