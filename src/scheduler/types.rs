use crate::model::{Schedule, ShiftCode, StaffId, PAIRS};
use chrono::{NaiveDate, Weekday};
use std::collections::BTreeMap;

/// Règles calendaires de la boutique
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopRules {
    /// Jours de fermeture hebdomadaire.
    pub closed_weekdays: Vec<Weekday>,
    /// Jours où m prend l'horaire court (hors jours fériés).
    pub short_shift_weekdays: Vec<Weekday>,
}

impl Default for ShopRules {
    fn default() -> Self {
        Self {
            closed_weekdays: vec![Weekday::Mon, Weekday::Tue],
            short_shift_weekdays: vec![Weekday::Wed, Weekday::Thu, Weekday::Fri],
        }
    }
}

/// Nombre de A et de B.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftTally {
    pub work_a: u32,
    pub work_b: u32,
}

impl ShiftTally {
    pub fn record(&mut self, code: ShiftCode) {
        match code {
            ShiftCode::WorkA => self.work_a += 1,
            ShiftCode::WorkB => self.work_b += 1,
            _ => {}
        }
    }
}

/// Historique A/B du représentant de chaque binôme, sur tout le planning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairCounts {
    counts: BTreeMap<StaffId, ShiftTally>,
}

impl PairCounts {
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let mut out = Self::default();
        for (_, day) in schedule.iter() {
            for (rep, _) in PAIRS {
                if let Some(code) = day.get(rep) {
                    out.record(rep, code);
                }
            }
        }
        out
    }

    pub fn get(&self, representative: StaffId) -> ShiftTally {
        self.counts.get(&representative).copied().unwrap_or_default()
    }

    pub fn record(&mut self, representative: StaffId, code: ShiftCode) {
        self.counts.entry(representative).or_default().record(code);
    }
}

/// Résultat de la validation d'une journée.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub message: Option<String>,
}

impl Validation {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// Binôme sur le même horaire un jour donné.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairConflict {
    pub date: NaiveDate,
    pub pair: (StaffId, StaffId),
    pub code: ShiftCode,
}
