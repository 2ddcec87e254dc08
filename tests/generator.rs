#![forbid(unsafe_code)]
use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shiftbook::{generate, DayMarks, Schedule, ShiftCode, ShopRules, StaffId, YearMonth, PAIRS};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn april(schedule: &Schedule, marks: &DayMarks, seed: u64) -> Schedule {
    generate(2025, 3, schedule, marks, &ShopRules::default(), &mut rng(seed))
}

#[test]
fn regular_closed_weekday_closes_everyone() {
    let out = april(&Schedule::new(), &DayMarks::new(), 1);
    // 2025-04-01 est un mardi
    for staff in StaffId::ALL {
        assert_eq!(out.get(d(2025, 4, 1), staff), Some(ShiftCode::ShopClosed));
        assert_eq!(out.get(d(2025, 4, 7), staff), Some(ShiftCode::ShopClosed));
    }
}

#[test]
fn manual_closed_survives_closed_day() {
    let mut schedule = Schedule::new();
    schedule.set(d(2025, 4, 1), StaffId::K, ShiftCode::ManualClosed);
    schedule.set(d(2025, 4, 1), StaffId::U, ShiftCode::PaidLeave);

    let out = april(&schedule, &DayMarks::new(), 2);
    assert_eq!(out.get(d(2025, 4, 1), StaffId::K), Some(ShiftCode::ManualClosed));
    assert_eq!(out.get(d(2025, 4, 1), StaffId::U), Some(ShiftCode::ShopClosed));
}

#[test]
fn wednesday_gives_short_shift_and_opposite_pairs() {
    let out = april(&Schedule::new(), &DayMarks::new(), 3);
    let wed = d(2025, 4, 2);
    assert_eq!(out.get(wed, StaffId::M), Some(ShiftCode::ShortShift));
    for (a, b) in PAIRS {
        let ca = out.get(wed, a).unwrap();
        let cb = out.get(wed, b).unwrap();
        assert!(ca.is_work_ab());
        assert_eq!(Some(cb), ca.opposite());
    }
}

#[test]
fn holiday_and_weekend_give_m_work_b() {
    let mut marks = DayMarks::new();
    marks.toggle(d(2025, 4, 3));
    let out = april(&Schedule::new(), &marks, 4);
    assert_eq!(out.get(d(2025, 4, 3), StaffId::M), Some(ShiftCode::WorkB));
    assert_eq!(out.get(d(2025, 4, 4), StaffId::M), Some(ShiftCode::ShortShift));
    assert_eq!(out.get(d(2025, 4, 5), StaffId::M), Some(ShiftCode::WorkB));
    assert_eq!(out.get(d(2025, 4, 6), StaffId::M), Some(ShiftCode::WorkB));
}

#[test]
fn paid_leave_unpairs_the_partner() {
    let mut schedule = Schedule::new();
    schedule.set(d(2025, 4, 2), StaffId::U, ShiftCode::PaidLeave);

    for seed in 0..10 {
        let out = april(&schedule, &DayMarks::new(), seed);
        assert_eq!(out.get(d(2025, 4, 2), StaffId::U), Some(ShiftCode::PaidLeave));
        // m en S, k/t en A+B : i complète avec A
        assert_eq!(out.get(d(2025, 4, 2), StaffId::I), Some(ShiftCode::WorkA));
    }
}

#[test]
fn existing_work_code_is_kept_and_partner_balances_the_day() {
    let mut schedule = Schedule::new();
    schedule.set(d(2025, 4, 2), StaffId::U, ShiftCode::WorkA);

    for seed in 0..10 {
        let out = april(&schedule, &DayMarks::new(), seed);
        assert_eq!(out.get(d(2025, 4, 2), StaffId::U), Some(ShiftCode::WorkA));
        assert_eq!(out.get(d(2025, 4, 2), StaffId::I), Some(ShiftCode::WorkB));
    }
}

#[test]
fn explicit_off_is_not_overwritten() {
    let mut schedule = Schedule::new();
    schedule.set(d(2025, 4, 5), StaffId::T, ShiftCode::Off);

    let out = april(&schedule, &DayMarks::new(), 5);
    assert_eq!(out.get(d(2025, 4, 5), StaffId::T), Some(ShiftCode::Off));
    assert!(out.code(d(2025, 4, 5), StaffId::K).is_work_ab());
}

#[test]
fn pair_history_drives_fairness() {
    let mut schedule = Schedule::new();
    for day in [8, 9, 10] {
        schedule.set(d(2025, 3, day), StaffId::U, ShiftCode::WorkA);
        schedule.set(d(2025, 3, day), StaffId::I, ShiftCode::WorkB);
    }

    let out = april(&schedule, &DayMarks::new(), 6);
    for day in [2, 3, 4] {
        assert_eq!(out.get(d(2025, 4, day), StaffId::U), Some(ShiftCode::WorkB));
        assert_eq!(out.get(d(2025, 4, day), StaffId::I), Some(ShiftCode::WorkA));
    }
}

#[test]
fn closed_date_then_reopened_is_reassigned() {
    let sat = d(2025, 4, 5);
    let mut marks = DayMarks::new();
    marks.toggle(sat);
    marks.toggle(sat);
    assert!(marks.is_closed(sat));

    let closed = april(&Schedule::new(), &marks, 7);
    for staff in StaffId::ALL {
        assert_eq!(closed.get(sat, staff), Some(ShiftCode::ShopClosed));
    }

    marks.toggle(sat);
    let reopened = april(&closed, &marks, 7);
    for staff in StaffId::ALL {
        let code = reopened.code(sat, staff);
        assert_ne!(code, ShiftCode::ShopClosed);
        assert!(code.is_work_ab(), "{staff} got {code}");
    }
}

#[test]
fn other_months_and_input_are_untouched() {
    let mut schedule = Schedule::new();
    schedule.set(d(2025, 3, 31), StaffId::M, ShiftCode::PaidLeave);
    schedule.set(d(2025, 5, 1), StaffId::U, ShiftCode::WorkA);
    let before = schedule.clone();

    let out = april(&schedule, &DayMarks::new(), 8);
    assert_eq!(schedule, before);
    assert_eq!(out.day(d(2025, 3, 31)), before.day(d(2025, 3, 31)));
    assert_eq!(out.day(d(2025, 5, 1)), before.day(d(2025, 5, 1)));
    assert_eq!(out.len(), before.len() + 30);
}

#[test]
fn same_seed_same_roster() {
    let a = april(&Schedule::new(), &DayMarks::new(), 42);
    let b = april(&Schedule::new(), &DayMarks::new(), 42);
    assert_eq!(a, b);
}

#[test]
fn month_number_rolls_over() {
    let out = generate(
        2024,
        15,
        &Schedule::new(),
        &DayMarks::new(),
        &ShopRules::default(),
        &mut rng(9),
    );
    assert_eq!(out.get(d(2025, 4, 1), StaffId::U), Some(ShiftCode::ShopClosed));
    assert_eq!(out.len(), 30);
}

#[test]
fn custom_rules_change_closed_weekdays() {
    let rules = ShopRules {
        closed_weekdays: vec![Weekday::Sun],
        ..ShopRules::default()
    };
    let out = generate(2025, 3, &Schedule::new(), &DayMarks::new(), &rules, &mut rng(10));
    assert!(out.code(d(2025, 4, 1), StaffId::U).is_work_ab());
    assert_eq!(out.get(d(2025, 4, 6), StaffId::U), Some(ShiftCode::ShopClosed));
}

/// Vérifie les invariants sur tout le mois, avec des saisies manuelles.
#[test]
fn invariants_hold_across_seeds_and_reruns() {
    let mut schedule = Schedule::new();
    schedule.set(d(2025, 4, 3), StaffId::U, ShiftCode::PaidLeave);
    schedule.set(d(2025, 4, 4), StaffId::K, ShiftCode::ManualClosed);
    schedule.set(d(2025, 4, 8), StaffId::M, ShiftCode::ManualClosed);
    schedule.set(d(2025, 4, 12), StaffId::T, ShiftCode::PaidLeave);
    schedule.set(d(2025, 4, 12), StaffId::M, ShiftCode::PaidLeave);
    schedule.set(d(2025, 4, 19), StaffId::I, ShiftCode::ShopClosed);

    let mut marks = DayMarks::new();
    marks.toggle(d(2025, 4, 10));
    marks.toggle(d(2025, 4, 17));
    marks.toggle(d(2025, 4, 17));

    let month = YearMonth::new(2025, 3);
    let rules = ShopRules::default();

    for seed in 0..20 {
        let once = april(&schedule, &marks, seed);
        let twice = april(&once, &marks, seed + 100);
        for (before, after) in [(&schedule, &once), (&once, &twice)] {
            for date in month.dates() {
                let weekday = date.weekday();
                let closed = marks.is_closed(date) || rules.closed_weekdays.contains(&weekday);
                for staff in StaffId::ALL {
                    let pre = before.get(date, staff);
                    let post = after.code(date, staff);
                    if closed {
                        if pre == Some(ShiftCode::ManualClosed) {
                            assert_eq!(post, ShiftCode::ManualClosed);
                        } else {
                            assert_eq!(post, ShiftCode::ShopClosed);
                        }
                        continue;
                    }
                    assert_ne!(post, ShiftCode::ShopClosed, "{date} {staff}");
                    if matches!(pre, Some(ShiftCode::PaidLeave | ShiftCode::ManualClosed)) {
                        assert_eq!(Some(post), pre);
                    }
                }
                if closed {
                    continue;
                }

                let m_pre = before.get(date, StaffId::M);
                if !matches!(m_pre, Some(ShiftCode::PaidLeave | ShiftCode::ManualClosed)) {
                    let short = matches!(weekday, Weekday::Wed | Weekday::Thu | Weekday::Fri)
                        && !marks.is_holiday(date);
                    let expected = if short {
                        ShiftCode::ShortShift
                    } else {
                        ShiftCode::WorkB
                    };
                    assert_eq!(after.code(date, StaffId::M), expected, "{date}");
                }

                for (a, b) in PAIRS {
                    let unset = |s| matches!(before.get(date, s), None | Some(ShiftCode::ShopClosed));
                    if unset(a) && unset(b) {
                        let ca = after.code(date, a);
                        assert!(ca.is_work_ab());
                        assert_eq!(ca.opposite(), Some(after.code(date, b)), "{date}");
                    }
                }
            }
        }
    }
}

#[test]
fn scheduler_session_generates_edits_and_resets() {
    use shiftbook::{DayStatus, RosterState, Scheduler};

    let mut state = RosterState::default();
    state.schedule.set(d(2025, 4, 2), StaffId::U, ShiftCode::PaidLeave);
    let mut session = Scheduler::with_state(state).with_rules(ShopRules::default());

    assert_eq!(session.toggle_day(d(2025, 4, 3)), DayStatus::Holiday);
    session.generate(YearMonth::new(2025, 3), &mut rng(11));
    assert!(session.validate_month(YearMonth::new(2025, 3)).is_empty());
    assert_eq!(
        session.state().schedule.get(d(2025, 4, 3), StaffId::M),
        Some(ShiftCode::WorkB)
    );

    session.edit_cell(d(2025, 4, 4), StaffId::K, ShiftCode::WorkA);
    session.state_mut().schedule.set(d(2025, 4, 4), StaffId::T, ShiftCode::WorkA);
    assert!(!session.validate_day(d(2025, 4, 4)).valid);

    session.reset();
    let state = session.into_state();
    assert!(state.schedule.is_empty());
    assert!(state.marks.is_holiday(d(2025, 4, 3)));
}
