use super::{util, PairConflict, Validation};
use crate::calendar::YearMonth;
use crate::model::{Schedule, ShiftCode, StaffId, PAIRS};
use chrono::NaiveDate;

pub(super) fn validate_day(schedule: &Schedule, date: NaiveDate) -> Validation {
    PAIRS
        .into_iter()
        .find(|pair| same_work_shift(schedule, date, *pair).is_some())
        .map(|pair| Validation::conflict(format!("Warning: {} have same shift", util::pair_label(pair))))
        .unwrap_or_else(Validation::ok)
}

pub(super) fn validate_month(schedule: &Schedule, month: YearMonth) -> Vec<PairConflict> {
    let mut out = Vec::new();

    for date in month.dates() {
        for pair in PAIRS {
            if let Some(code) = same_work_shift(schedule, date, pair) {
                out.push(PairConflict { date, pair, code });
            }
        }
    }

    out
}

/// Seules les collisions A/A et B/B comptent.
fn same_work_shift(
    schedule: &Schedule,
    date: NaiveDate,
    (a, b): (StaffId, StaffId),
) -> Option<ShiftCode> {
    let code_a = schedule.get(date, a)?;
    let code_b = schedule.get(date, b)?;
    (code_a == code_b && code_a.is_work_ab()).then_some(code_a)
}
