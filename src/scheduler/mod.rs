mod assignment;
mod conflicts;
mod mutate;
mod types;
mod util;

pub use types::{PairConflict, PairCounts, ShiftTally, ShopRules, Validation};

use crate::calendar::YearMonth;
use crate::model::{DayMarks, DayStatus, RosterState, Schedule, ShiftCode, StaffId};
use chrono::NaiveDate;
use rand::Rng;

/// Remplit le mois `(year, month)` (mois indexé à partir de 0, normalisé) et
/// renvoie le planning fusionné. Les entrées hors du mois sont conservées
/// telles quelles ; l'entrée n'est pas modifiée.
///
/// Le tirage au sort (égalité d'historique d'un binôme, ordre des personnes
/// restantes) passe par `rng` : deux appels identiques peuvent donner deux
/// répartitions A/B différentes, toutes valides.
pub fn generate<R: Rng + ?Sized>(
    year: i32,
    month: i32,
    schedule: &Schedule,
    marks: &DayMarks,
    rules: &ShopRules,
    rng: &mut R,
) -> Schedule {
    assignment::generate(YearMonth::new(year, month), schedule, marks, rules, rng)
}

/// Vérifie les binômes u/i puis k/t ; seul le premier conflit est rapporté.
pub fn validate_day(schedule: &Schedule, date: NaiveDate) -> Validation {
    conflicts::validate_day(schedule, date)
}

/// Tous les conflits de binôme du mois.
pub fn validate_month(schedule: &Schedule, month: YearMonth) -> Vec<PairConflict> {
    conflicts::validate_month(schedule, month)
}

pub fn edit_cell(schedule: &mut Schedule, date: NaiveDate, staff: StaffId, code: ShiftCode) {
    mutate::edit_cell(schedule, date, staff, code)
}

/// Scheduler : encapsule l'état persisté d'une session
#[derive(Debug, Default)]
pub struct Scheduler {
    state: RosterState,
    rules: ShopRules,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: RosterState) -> Self {
        Self {
            state,
            rules: ShopRules::default(),
        }
    }

    pub fn with_rules(mut self, rules: ShopRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn state(&self) -> &RosterState {
        &self.state
    }
    pub fn state_mut(&mut self) -> &mut RosterState {
        &mut self.state
    }
    pub fn into_state(self) -> RosterState {
        self.state
    }

    pub fn generate<R: Rng + ?Sized>(&mut self, month: YearMonth, rng: &mut R) {
        self.state.schedule = assignment::generate(
            month,
            &self.state.schedule,
            &self.state.marks,
            &self.rules,
            rng,
        );
    }

    pub fn validate_day(&self, date: NaiveDate) -> Validation {
        validate_day(&self.state.schedule, date)
    }

    pub fn validate_month(&self, month: YearMonth) -> Vec<PairConflict> {
        validate_month(&self.state.schedule, month)
    }

    pub fn edit_cell(&mut self, date: NaiveDate, staff: StaffId, code: ShiftCode) {
        edit_cell(&mut self.state.schedule, date, staff, code)
    }

    pub fn toggle_day(&mut self, date: NaiveDate) -> DayStatus {
        self.state.marks.toggle(date)
    }

    /// Vide le planning ; les jours fériés et fermés sont conservés.
    pub fn reset(&mut self) {
        self.state.schedule.clear();
    }
}
