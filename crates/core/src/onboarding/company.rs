//! Company profile and operating hours

use crate::validation::validators::validate_required;
use crate::validation::{Validate, ValidationErrors};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Day of the week, keyed the way the booking backend names them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    #[serde(rename = "seg")]
    Monday,
    #[serde(rename = "ter")]
    Tuesday,
    #[serde(rename = "qua")]
    Wednesday,
    #[serde(rename = "qui")]
    Thursday,
    #[serde(rename = "sex")]
    Friday,
    #[serde(rename = "sab")]
    Saturday,
    #[serde(rename = "dom")]
    Sunday,
}

impl Weekday {
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Monday => "seg",
            Self::Tuesday => "ter",
            Self::Wednesday => "qua",
            Self::Thursday => "qui",
            Self::Friday => "sex",
            Self::Saturday => "sab",
            Self::Sunday => "dom",
        }
    }

    /// Short display label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monday => "Seg",
            Self::Tuesday => "Ter",
            Self::Wednesday => "Qua",
            Self::Thursday => "Qui",
            Self::Friday => "Sex",
            Self::Saturday => "Sáb",
            Self::Sunday => "Dom",
        }
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.key() == s)
            .ok_or_else(|| format!("unknown weekday '{s}'"))
    }
}

/// Wall-clock time with minute precision, written `HH:MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    pub const fn hour(self) -> u8 {
        self.hour
    }

    pub const fn minute(self) -> u8 {
        self.minute
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid time '{s}', expected HH:MM");
        let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
        if hour.len() != 2 || minute.len() != 2 {
            return Err(invalid());
        }
        let hour = hour.parse().map_err(|_| invalid())?;
        let minute = minute.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).ok_or_else(invalid)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// First onboarding step: who the business is and when it is open
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub name: String,
    pub description: String,
    pub address: String,
    pub opening_time: TimeOfDay,
    pub closing_time: TimeOfDay,
    pub operating_days: Vec<Weekday>,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            address: String::new(),
            opening_time: TimeOfDay { hour: 6, minute: 0 },
            closing_time: TimeOfDay {
                hour: 17,
                minute: 0,
            },
            operating_days: Vec::new(),
        }
    }
}

impl CompanyProfile {
    /// Add `day` if absent, remove it if present
    pub fn toggle_day(&mut self, day: Weekday) {
        if let Some(pos) = self.operating_days.iter().position(|d| *d == day) {
            self.operating_days.remove(pos);
        } else {
            self.operating_days.push(day);
        }
    }

    pub fn is_open_on(&self, day: Weekday) -> bool {
        self.operating_days.contains(&day)
    }
}

impl Validate for CompanyProfile {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(
            "name",
            validate_required(&self.name, "Informe o nome do estabelecimento"),
        );
        errors.check(
            "address",
            validate_required(&self.address, "Informe o endereço"),
        );
        if self.closing_time <= self.opening_time {
            errors.add(
                "closingTime",
                "O horário de fim deve ser depois do início",
            );
        }
        if self.operating_days.is_empty() {
            errors.add("operatingDays", "Selecione pelo menos um dia");
        }
        errors.into_result()
    }
}
