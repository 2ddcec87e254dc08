use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{btree_map, BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("unknown staff id: {0}")]
    UnknownStaff(String),
    #[error("unknown shift code: {0}")]
    UnknownShiftCode(String),
    #[error("invalid date key (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),
}

/// Identifiant d'un membre du personnel (code d'une lettre).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffId {
    U,
    I,
    K,
    T,
    M,
}

impl StaffId {
    pub const ALL: [StaffId; 5] = [StaffId::U, StaffId::I, StaffId::K, StaffId::T, StaffId::M];

    pub fn as_str(&self) -> &'static str {
        match self {
            StaffId::U => "u",
            StaffId::I => "i",
            StaffId::K => "k",
            StaffId::T => "t",
            StaffId::M => "m",
        }
    }

    /// Partenaire de binôme (u↔i, k↔t), `None` pour m.
    pub fn partner(&self) -> Option<StaffId> {
        match self {
            StaffId::U => Some(StaffId::I),
            StaffId::I => Some(StaffId::U),
            StaffId::K => Some(StaffId::T),
            StaffId::T => Some(StaffId::K),
            StaffId::M => None,
        }
    }
}

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaffId {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "u" => Ok(StaffId::U),
            "i" => Ok(StaffId::I),
            "k" => Ok(StaffId::K),
            "t" => Ok(StaffId::T),
            "m" => Ok(StaffId::M),
            other => Err(RosterError::UnknownStaff(other.to_string())),
        }
    }
}

/// Membre du personnel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Staff {
    pub id: StaffId,
    pub name: &'static str,
}

/// Effectif fixe de la boutique, dans l'ordre d'affichage.
pub const STAFF: [Staff; 5] = [
    Staff { id: StaffId::U, name: "U" },
    Staff { id: StaffId::I, name: "I" },
    Staff { id: StaffId::K, name: "K" },
    Staff { id: StaffId::T, name: "T" },
    Staff { id: StaffId::M, name: "M" },
];

/// Binômes qui doivent travailler en horaires opposés. Le premier membre
/// porte le compteur d'équité du binôme.
pub const PAIRS: [(StaffId, StaffId); 2] = [(StaffId::U, StaffId::I), (StaffId::K, StaffId::T)];

/// Code de service pour une personne un jour donné.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftCode {
    #[serde(rename = "A")]
    WorkA,
    #[serde(rename = "B")]
    WorkB,
    /// Horaire court, réservé à m.
    #[serde(rename = "S")]
    ShortShift,
    #[serde(rename = "-")]
    Off,
    #[serde(rename = "PL")]
    PaidLeave,
    /// Fermeture saisie à la main, jamais écrasée par la génération.
    #[serde(rename = "Closed", alias = "Cls")]
    ManualClosed,
    /// Fermeture posée par la génération.
    #[serde(rename = "ShopClosed")]
    ShopClosed,
}

impl ShiftCode {
    pub const ALL: [ShiftCode; 7] = [
        ShiftCode::WorkA,
        ShiftCode::WorkB,
        ShiftCode::ShortShift,
        ShiftCode::Off,
        ShiftCode::PaidLeave,
        ShiftCode::ManualClosed,
        ShiftCode::ShopClosed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftCode::WorkA => "A",
            ShiftCode::WorkB => "B",
            ShiftCode::ShortShift => "S",
            ShiftCode::Off => "-",
            ShiftCode::PaidLeave => "PL",
            ShiftCode::ManualClosed => "Closed",
            ShiftCode::ShopClosed => "ShopClosed",
        }
    }

    /// Libellé court pour la grille.
    pub fn label(&self) -> &'static str {
        match self {
            ShiftCode::ManualClosed => "Cls",
            ShiftCode::ShopClosed => "X",
            other => other.as_str(),
        }
    }

    pub fn is_work_ab(&self) -> bool {
        matches!(self, ShiftCode::WorkA | ShiftCode::WorkB)
    }

    /// A ↔ B ; les autres codes n'ont pas d'opposé.
    pub fn opposite(&self) -> Option<ShiftCode> {
        match self {
            ShiftCode::WorkA => Some(ShiftCode::WorkB),
            ShiftCode::WorkB => Some(ShiftCode::WorkA),
            _ => None,
        }
    }
}

impl fmt::Display for ShiftCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftCode {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        match raw {
            "A" | "a" => Ok(ShiftCode::WorkA),
            "B" | "b" => Ok(ShiftCode::WorkB),
            "S" | "s" => Ok(ShiftCode::ShortShift),
            "-" | "off" | "Off" => Ok(ShiftCode::Off),
            "PL" | "pl" => Ok(ShiftCode::PaidLeave),
            "Closed" | "Cls" | "cls" => Ok(ShiftCode::ManualClosed),
            "ShopClosed" | "X" => Ok(ShiftCode::ShopClosed),
            other => Err(RosterError::UnknownShiftCode(other.to_string())),
        }
    }
}

/// Codes d'une journée. Une entrée absente se lit comme `Off`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayAssignments(BTreeMap<StaffId, ShiftCode>);

impl DayAssignments {
    /// Code explicitement posé, s'il existe.
    pub fn get(&self, staff: StaffId) -> Option<ShiftCode> {
        self.0.get(&staff).copied()
    }

    /// Code effectif (`Off` par défaut).
    pub fn code(&self, staff: StaffId) -> ShiftCode {
        self.get(staff).unwrap_or(ShiftCode::Off)
    }

    pub fn set(&mut self, staff: StaffId, code: ShiftCode) {
        self.0.insert(staff, code);
    }

    pub fn unset(&mut self, staff: StaffId) -> Option<ShiftCode> {
        self.0.remove(&staff)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StaffId, ShiftCode)> + '_ {
        self.0.iter().map(|(id, code)| (*id, *code))
    }
}

/// Planning complet : date → codes du jour. L'historique n'est jamais purgé.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    days: BTreeMap<NaiveDate, DayAssignments>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayAssignments> {
        self.days.get(&date)
    }

    pub fn day_mut(&mut self, date: NaiveDate) -> &mut DayAssignments {
        self.days.entry(date).or_default()
    }

    pub fn get(&self, date: NaiveDate, staff: StaffId) -> Option<ShiftCode> {
        self.day(date).and_then(|d| d.get(staff))
    }

    pub fn code(&self, date: NaiveDate, staff: StaffId) -> ShiftCode {
        self.get(date, staff).unwrap_or(ShiftCode::Off)
    }

    pub fn set(&mut self, date: NaiveDate, staff: StaffId, code: ShiftCode) {
        self.day_mut(date).set(staff, code);
    }

    pub fn clear(&mut self) {
        self.days.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, NaiveDate, DayAssignments> {
        self.days.iter()
    }
}

/// Statut d'une date dans le cycle Normal → Férié → Fermé → Normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayStatus {
    Normal,
    Holiday,
    Closed,
}

/// Dates fériées et dates de fermeture exceptionnelle (ensembles disjoints).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayMarks {
    holidays: BTreeSet<NaiveDate>,
    closed: BTreeSet<NaiveDate>,
}

impl DayMarks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construit à partir de deux listes ; une date présente dans les deux
    /// est considérée fermée.
    pub fn from_sets<H, C>(holidays: H, closed: C) -> Self
    where
        H: IntoIterator<Item = NaiveDate>,
        C: IntoIterator<Item = NaiveDate>,
    {
        let closed: BTreeSet<NaiveDate> = closed.into_iter().collect();
        let holidays = holidays
            .into_iter()
            .filter(|d| !closed.contains(d))
            .collect();
        Self { holidays, closed }
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    pub fn is_closed(&self, date: NaiveDate) -> bool {
        self.closed.contains(&date)
    }

    pub fn status(&self, date: NaiveDate) -> DayStatus {
        if self.is_closed(date) {
            DayStatus::Closed
        } else if self.is_holiday(date) {
            DayStatus::Holiday
        } else {
            DayStatus::Normal
        }
    }

    /// Fait avancer la date d'un cran dans le cycle et renvoie le nouveau statut.
    pub fn toggle(&mut self, date: NaiveDate) -> DayStatus {
        match self.status(date) {
            DayStatus::Normal => {
                self.holidays.insert(date);
                DayStatus::Holiday
            }
            DayStatus::Holiday => {
                self.holidays.remove(&date);
                self.closed.insert(date);
                DayStatus::Closed
            }
            DayStatus::Closed => {
                self.closed.remove(&date);
                DayStatus::Normal
            }
        }
    }

    pub fn holidays(&self) -> &BTreeSet<NaiveDate> {
        &self.holidays
    }

    pub fn closed(&self) -> &BTreeSet<NaiveDate> {
        &self.closed
    }
}

/// Tout ce qui est persisté entre deux sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterState {
    pub schedule: Schedule,
    pub marks: DayMarks,
}

/// Parse une clé de date `YYYY-MM-DD`.
pub fn parse_date_key(raw: &str) -> Result<NaiveDate, RosterError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| RosterError::InvalidDate(raw.to_string()))
}

/// Clé de date `YYYY-MM-DD`.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
