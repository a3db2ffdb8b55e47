use crate::macros::impl_text_value;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Day of the week a class meeting recurs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Error returned when a day name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown weekday {0:?}")]
pub struct ParseWeekdayError(pub String);

impl Weekday {
    /// Monday first, matching `Weekday::index`
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Accepted spellings. The schedule import writes Spanish day names,
    /// with or without accents.
    const NAMES: [(Self, &'static [&'static str]); 7] = [
        (Self::Monday, &["MONDAY", "LUNES"]),
        (Self::Tuesday, &["TUESDAY", "MARTES"]),
        (Self::Wednesday, &["WEDNESDAY", "MIÉRCOLES", "MIERCOLES"]),
        (Self::Thursday, &["THURSDAY", "JUEVES"]),
        (Self::Friday, &["FRIDAY", "VIERNES"]),
        (Self::Saturday, &["SATURDAY", "SÁBADO", "SABADO"]),
        (Self::Sunday, &["SUNDAY", "DOMINGO"]),
    ];

    /// Days since Monday (Monday = 0, Sunday = 6)
    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn as_str(self) -> &'static str {
        Self::NAMES[self.index() as usize].1[0]
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        Self::ALL[day.num_days_from_monday() as usize]
    }
}

impl FromStr for Weekday {
    type Err = ParseWeekdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();

        Self::NAMES
            .iter()
            .find(|(_, names)| names.contains(&upper.as_str()))
            .map(|&(day, _)| day)
            .ok_or_else(|| ParseWeekdayError(s.to_string()))
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl_text_value!(Weekday);
