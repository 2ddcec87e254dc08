#![forbid(unsafe_code)]
//! Shiftbook — planning mensuel d'une boutique de cinq personnes.
//!
//! - Génération gloutonne du mois : binômes en horaires opposés, équité A/B.
//! - Fermetures hebdomadaires (lundi, mardi) et exceptionnelles, jours fériés.
//! - Validation des binômes, statistiques, rendu texte et export CSV.
//! - Persistance clé → valeur (JSON) ; une valeur illisible repart à vide.

pub mod calendar;
pub mod io;
pub mod model;
pub mod report;
pub mod scheduler;
pub mod storage;

pub use calendar::{day_of_week, days_in_month, weekday_symbol, YearMonth};
pub use model::{
    DayAssignments, DayMarks, DayStatus, RosterError, RosterState, Schedule, ShiftCode, Staff,
    StaffId, PAIRS, STAFF,
};
pub use report::{render_month, staff_stats, working_count, StaffStats};
pub use scheduler::{
    edit_cell, generate, validate_day, validate_month, PairConflict, PairCounts, Scheduler,
    ShopRules, Validation,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, RosterStore};
