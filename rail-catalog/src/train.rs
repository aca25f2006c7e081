use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Service class of a train. Only affects how the train is labelled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrainKind {
    Local,
    Express,
}

impl TrainKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            TrainKind::Local => "Local Train",
            TrainKind::Express => "Express Train",
        }
    }
}

/// Coach class requested by the passenger
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CoachType {
    General,
    #[serde(rename = "3AC")]
    ThreeAc,
    #[serde(rename = "2AC")]
    TwoAc,
}

impl CoachType {
    pub const ALL: [CoachType; 3] = [CoachType::General, CoachType::ThreeAc, CoachType::TwoAc];

    pub fn label(&self) -> &'static str {
        match self {
            CoachType::General => "General",
            CoachType::ThreeAc => "3AC",
            CoachType::TwoAc => "2AC",
        }
    }
}

impl fmt::Display for CoachType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CoachType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CoachType::ALL
            .into_iter()
            .find(|coach| coach.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CatalogError::UnknownCoachType(wanted.to_string()))
    }
}

/// A scheduled train on the route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Train {
    pub number: u32,
    pub name: String,
    pub kind: TrainKind,
    /// Price of one seat in whole rupees, identical for every coach type
    pub coach_price: i64,
    pub departures: Vec<NaiveTime>,
}

impl Train {
    pub fn new(
        number: u32,
        name: impl Into<String>,
        kind: TrainKind,
        coach_price: i64,
        departures: Vec<NaiveTime>,
    ) -> Self {
        Self {
            number,
            name: name.into(),
            kind,
            coach_price,
            departures,
        }
    }

    /// One-line summary, e.g. `Express Train - Name: X, Capacity: 1000`
    pub fn describe(&self, capacity: u32) -> String {
        format!("{} - Name: {}, Capacity: {}", self.kind.display_name(), self.name, capacity)
    }

    /// Departure slots formatted the way passengers type them (`9:00`, `15:20`)
    pub fn departure_labels(&self) -> Vec<String> {
        self.departures
            .iter()
            .map(|t| t.format("%-H:%M").to_string())
            .collect()
    }

    /// Resolve user input to one of this train's departure slots
    pub fn departure_at(&self, input: &str) -> Result<NaiveTime, CatalogError> {
        let raw = input.trim();
        let time = NaiveTime::parse_from_str(raw, "%H:%M")
            .map_err(|_| CatalogError::InvalidTimeFormat(raw.to_string()))?;

        if self.departures.contains(&time) {
            Ok(time)
        } else {
            Err(CatalogError::NoDeparture {
                train: self.number,
                time: raw.to_string(),
            })
        }
    }
}

/// Time-table of the trains serving the route
#[derive(Debug, Clone)]
pub struct TrainCatalog {
    trains: Vec<Train>,
}

impl TrainCatalog {
    pub fn new(trains: Vec<Train>) -> Self {
        Self { trains }
    }

    pub fn find(&self, number: u32) -> Result<&Train, CatalogError> {
        self.trains
            .iter()
            .find(|t| t.number == number)
            .ok_or(CatalogError::UnknownTrain(number))
    }

    pub fn numbers(&self) -> Vec<u32> {
        self.trains.iter().map(|t| t.number).collect()
    }
}

impl Default for TrainCatalog {
    fn default() -> Self {
        let express = |number: u32, name: &str, slots: [(u32, u32); 3]| {
            let departures = slots
                .iter()
                .filter_map(|&(h, m)| NaiveTime::from_hms_opt(h, m, 0))
                .collect();
            Train::new(number, name, TrainKind::Express, 1800, departures)
        };

        Self::new(vec![
            express(16525, "Kanyakumari Cape Express", [(9, 0), (15, 20), (19, 20)]),
            express(16526, "Kochvl-Mysore Express", [(9, 30), (14, 45), (18, 30)]),
            express(12677, "Ernakulam Intercity Express", [(10, 0), (16, 15), (20, 0)]),
        ])
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Invalid train number: {0}")]
    UnknownTrain(u32),

    #[error("Enter time in the correct format (HH:mm), got '{0}'")]
    InvalidTimeFormat(String),

    #[error("No train {train} available at {time}")]
    NoDeparture {
        train: u32,
        time: String,
    },

    #[error("Unknown coach type: '{0}' (expected General, 3AC or 2AC)")]
    UnknownCoachType(String),
}
