//! Calcul calendaire (grégorien proleptique, sans fuseau horaire).
//!
//! Les mois sont indexés à partir de 0 (0 = janvier). Un mois hors de
//! `0..12` déborde sur l'année voisine : `(2025, 12)` est janvier 2026,
//! `(2025, -1)` est décembre 2024.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::fmt;

/// Mois normalisé.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month0: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: i32) -> Self {
        let total = i64::from(year) * 12 + i64::from(month);
        let year = total.div_euclid(12);
        let year = i32::try_from(year).unwrap_or(if year < 0 { i32::MIN } else { i32::MAX });
        Self {
            year,
            month0: total.rem_euclid(12) as u32,
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Mois indexé à partir de 0.
    pub fn month0(&self) -> u32 {
        self.month0
    }

    /// Mois indexé à partir de 1.
    pub fn month(&self) -> u32 {
        self.month0 + 1
    }

    pub fn days(&self) -> u32 {
        match self.month() {
            4 | 6 | 9 | 11 => 30,
            2 if is_leap_year(self.year) => 29,
            2 => 28,
            _ => 31,
        }
    }

    /// `None` si l'année sort de la plage représentable par chrono.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month(), 1)
    }

    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month(), day)
    }

    /// Dates du mois, dans l'ordre croissant.
    pub fn dates(&self) -> Vec<NaiveDate> {
        (1..=self.days()).filter_map(|d| self.date(d)).collect()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month0
    }

    pub fn prev(&self) -> Self {
        Self::new(self.year, self.month0 as i32 - 1)
    }

    pub fn next(&self) -> Self {
        Self::new(self.year, self.month0 as i32 + 1)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.year, self.month())
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Nombre de jours du mois (mois indexé à partir de 0, normalisé).
pub fn days_in_month(year: i32, month: i32) -> u32 {
    YearMonth::new(year, month).days()
}

/// Jour de la semaine d'une date (mois indexé à partir de 0). Un jour hors du
/// mois déborde comme le mois : le jour 0 est la veille du 1er.
pub fn day_of_week(year: i32, month: i32, day: i32) -> Option<Weekday> {
    let first = YearMonth::new(year, month).first_day()?;
    first
        .checked_add_signed(Duration::days(i64::from(day) - 1))
        .map(|d| d.weekday())
}

pub fn weekday_symbol(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}
