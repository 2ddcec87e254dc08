use super::{util, PairCounts, ShiftTally, ShopRules};
use crate::calendar::YearMonth;
use crate::model::{DayAssignments, DayMarks, Schedule, ShiftCode, StaffId, PAIRS};
use chrono::{Datelike, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace, warn};

pub(super) fn generate<R: Rng + ?Sized>(
    month: YearMonth,
    schedule: &Schedule,
    marks: &DayMarks,
    rules: &ShopRules,
    rng: &mut R,
) -> Schedule {
    let mut out = schedule.clone();
    if month.first_day().is_none() {
        warn!(%month, "month out of calendar range, schedule left untouched");
        return out;
    }

    let mut counts = PairCounts::from_schedule(&out);
    debug!(%month, days = month.days(), "generating roster");

    for date in month.dates() {
        counts = assign_day(&mut out, date, marks, rules, counts, rng);
    }

    out
}

fn assign_day<R: Rng + ?Sized>(
    schedule: &mut Schedule,
    date: NaiveDate,
    marks: &DayMarks,
    rules: &ShopRules,
    mut counts: PairCounts,
    rng: &mut R,
) -> PairCounts {
    let weekday = date.weekday();
    let day = schedule.day_mut(date);

    if util::is_shop_closed(date, weekday, marks, rules) {
        for staff in StaffId::ALL {
            if day.get(staff) != Some(ShiftCode::ManualClosed) {
                day.set(staff, ShiftCode::ShopClosed);
            }
        }
        trace!(%date, %weekday, "shop closed");
        return counts;
    }

    for staff in StaffId::ALL {
        if day.get(staff) == Some(ShiftCode::ShopClosed) {
            day.unset(staff);
        }
    }

    let available: Vec<StaffId> = StaffId::ALL
        .into_iter()
        .filter(|s| !matches!(day.get(*s), Some(ShiftCode::PaidLeave | ShiftCode::ManualClosed)))
        .collect();

    if available.contains(&StaffId::M) {
        let short = rules.short_shift_weekdays.contains(&weekday) && !marks.is_holiday(date);
        let code = if short {
            ShiftCode::ShortShift
        } else {
            ShiftCode::WorkB
        };
        day.set(StaffId::M, code);
    }

    for (rep, partner) in PAIRS {
        if !is_free(day, &available, rep) || !is_free(day, &available, partner) {
            continue;
        }
        let (rep_code, partner_code) = pick_pair_shifts(counts.get(rep), rng);
        day.set(rep, rep_code);
        day.set(partner, partner_code);
        counts.record(rep, rep_code);
    }

    let mut tally = ShiftTally::default();
    for (_, code) in day.iter() {
        tally.record(code);
    }

    let mut pending: Vec<StaffId> = available
        .iter()
        .copied()
        .filter(|s| day.get(*s).is_none())
        .collect();
    pending.shuffle(rng);

    for staff in pending {
        let code = if tally.work_a <= tally.work_b {
            ShiftCode::WorkA
        } else {
            ShiftCode::WorkB
        };
        day.set(staff, code);
        tally.record(code);
    }

    trace!(%date, %weekday, a = tally.work_a, b = tally.work_b, "day assigned");
    counts
}

fn is_free(day: &DayAssignments, available: &[StaffId], staff: StaffId) -> bool {
    available.contains(&staff) && day.get(staff).is_none()
}

/// Le représentant prend l'horaire qu'il a le moins fait ; à égalité, pile ou face.
fn pick_pair_shifts<R: Rng + ?Sized>(history: ShiftTally, rng: &mut R) -> (ShiftCode, ShiftCode) {
    let rep_takes_a = if history.work_a > history.work_b {
        false
    } else if history.work_b > history.work_a {
        true
    } else {
        rng.gen_bool(0.5)
    };
    if rep_takes_a {
        (ShiftCode::WorkA, ShiftCode::WorkB)
    } else {
        (ShiftCode::WorkB, ShiftCode::WorkA)
    }
}
