//! Statistiques mensuelles et rendu texte de la grille (impression).

use crate::calendar::{weekday_symbol, YearMonth};
use crate::model::{DayMarks, DayStatus, Schedule, ShiftCode, StaffId, STAFF};
use crate::scheduler::validate_day;
use chrono::{Datelike, NaiveDate};
use std::fmt::Write;

/// Compteurs d'une personne sur un mois.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaffStats {
    pub work_a: u32,
    pub work_b: u32,
    pub short: u32,
    pub paid_leave: u32,
    /// A + B
    pub total_work: u32,
}

pub fn staff_stats(schedule: &Schedule, month: YearMonth, staff: StaffId) -> StaffStats {
    let mut stats = StaffStats::default();
    for date in month.dates() {
        match schedule.code(date, staff) {
            ShiftCode::WorkA => stats.work_a += 1,
            ShiftCode::WorkB => stats.work_b += 1,
            ShiftCode::ShortShift => stats.short += 1,
            ShiftCode::PaidLeave => stats.paid_leave += 1,
            _ => {}
        }
    }
    stats.total_work = stats.work_a + stats.work_b;
    stats
}

/// Nombre de personnes en A ou B ce jour-là.
pub fn working_count(schedule: &Schedule, date: NaiveDate) -> usize {
    STAFF
        .iter()
        .filter(|s| schedule.code(date, s.id).is_work_ab())
        .count()
}

/// Marque d'en-tête : `H` férié, `X` fermé, `!` binôme en conflit.
pub fn day_flags(schedule: &Schedule, marks: &DayMarks, date: NaiveDate) -> String {
    let mut flags = String::new();
    match marks.status(date) {
        DayStatus::Closed => flags.push('X'),
        DayStatus::Holiday => flags.push('H'),
        DayStatus::Normal => {}
    }
    if !validate_day(schedule, date).valid {
        flags.push('!');
    }
    flags
}

pub fn render_month(schedule: &Schedule, marks: &DayMarks, month: YearMonth) -> String {
    let dates = month.dates();
    let mut out = String::new();

    let _ = writeln!(out, "{month}");

    let _ = write!(out, "{:<6}", "Name");
    for date in &dates {
        let _ = write!(out, "{:>4}", date.day());
    }
    let _ = writeln!(out, " |{:>4}{:>4}{:>4}{:>4}{:>4}", "A", "B", "S", "Work", "PL");

    let _ = write!(out, "{:<6}", "");
    for date in &dates {
        let _ = write!(out, "{:>4}", weekday_symbol(date.weekday()));
    }
    let _ = writeln!(out, " |");

    let _ = write!(out, "{:<6}", "");
    for date in &dates {
        let _ = write!(out, "{:>4}", day_flags(schedule, marks, *date));
    }
    let _ = writeln!(out, " |");

    for staff in STAFF.iter() {
        let _ = write!(out, "{:<6}", staff.name);
        for date in &dates {
            let _ = write!(out, "{:>4}", schedule.code(*date, staff.id).label());
        }
        let stats = staff_stats(schedule, month, staff.id);
        let _ = writeln!(
            out,
            " |{:>4}{:>4}{:>4}{:>4}{:>4}",
            stats.work_a, stats.work_b, stats.short, stats.total_work, stats.paid_leave
        );
    }

    let _ = write!(out, "{:<6}", "Total");
    for date in &dates {
        let _ = write!(out, "{:>4}", working_count(schedule, *date));
    }
    let _ = writeln!(out, " |");

    out
}
