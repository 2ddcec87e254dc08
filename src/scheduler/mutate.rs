use crate::model::{Schedule, ShiftCode, StaffId};
use chrono::NaiveDate;
use tracing::debug;

/// Pose un code ; un A/B posé sur un membre de binôme donne l'horaire opposé
/// au partenaire.
pub(super) fn edit_cell(schedule: &mut Schedule, date: NaiveDate, staff: StaffId, code: ShiftCode) {
    let day = schedule.day_mut(date);
    day.set(staff, code);

    if let (Some(partner), Some(opposite)) = (staff.partner(), code.opposite()) {
        day.set(partner, opposite);
        debug!(%date, %staff, %partner, %code, "partner set to opposite shift");
    }
}
