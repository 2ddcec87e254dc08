use super::ShopRules;
use crate::model::{DayMarks, StaffId, STAFF};
use chrono::{NaiveDate, Weekday};

pub(super) fn is_shop_closed(
    date: NaiveDate,
    weekday: Weekday,
    marks: &DayMarks,
    rules: &ShopRules,
) -> bool {
    marks.is_closed(date) || rules.closed_weekdays.contains(&weekday)
}

pub(super) fn staff_name(id: StaffId) -> &'static str {
    STAFF
        .iter()
        .find(|s| s.id == id)
        .map(|s| s.name)
        .unwrap_or_else(|| id.as_str())
}

pub(super) fn pair_label((a, b): (StaffId, StaffId)) -> String {
    format!("{} & {}", staff_name(a), staff_name(b))
}
