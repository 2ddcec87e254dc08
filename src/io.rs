use crate::calendar::YearMonth;
use crate::model::{date_key, DayMarks, Schedule, STAFF};
use crate::report::{day_flags, staff_stats, working_count};
use csv::WriterBuilder;
use std::fs;
use std::path::Path;

/// Export JSON du planning complet (jolie mise en forme)
pub fn export_schedule_json<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(schedule)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV d'un mois : une colonne par date, une ligne par personne, puis
/// une ligne `flags` (H/X/!) et une ligne `total`.
pub fn export_month_csv<P: AsRef<Path>>(
    path: P,
    schedule: &Schedule,
    marks: &DayMarks,
    month: YearMonth,
) -> anyhow::Result<()> {
    let dates = month.dates();
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;

    let mut header = vec!["staff".to_string()];
    header.extend(dates.iter().map(|d| date_key(*d)));
    header.extend(["A", "B", "S", "work", "PL"].map(String::from));
    w.write_record(&header)?;

    let mut flags = vec!["flags".to_string()];
    flags.extend(dates.iter().map(|d| day_flags(schedule, marks, *d)));
    flags.extend(std::iter::repeat(String::new()).take(5));
    w.write_record(&flags)?;

    for staff in STAFF.iter() {
        let stats = staff_stats(schedule, month, staff.id);
        let mut row = vec![staff.id.as_str().to_string()];
        row.extend(dates.iter().map(|d| schedule.code(*d, staff.id).as_str().to_string()));
        row.extend(
            [
                stats.work_a,
                stats.work_b,
                stats.short,
                stats.total_work,
                stats.paid_leave,
            ]
            .map(|n| n.to_string()),
        );
        w.write_record(&row)?;
    }

    let mut totals = vec!["total".to_string()];
    totals.extend(dates.iter().map(|d| working_count(schedule, *d).to_string()));
    totals.extend(std::iter::repeat(String::new()).take(5));
    w.write_record(&totals)?;

    w.flush()?;
    Ok(())
}
