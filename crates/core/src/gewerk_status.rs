//! Gewerk status labels.
//!
//! Stored as plain text in the database; unknown or missing values are
//! normalized to `Geplant` at the read boundary, matching the fortschritt
//! default of 0.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle status of a gewerk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GewerkStatus {
    Geplant,
    InArbeit,
    Fertig,
    Abgenommen,
}

impl GewerkStatus {
    /// The German label as stored in the database and shown to users.
    pub fn as_str(&self) -> &'static str {
        match self {
            GewerkStatus::Geplant => "Geplant",
            GewerkStatus::InArbeit => "In Arbeit",
            GewerkStatus::Fertig => "Fertig",
            GewerkStatus::Abgenommen => "Abgenommen",
        }
    }

    /// Parse an exact label, rejecting anything else.
    pub fn parse(label: &str) -> Result<Self, CoreError> {
        match label {
            "Geplant" => Ok(GewerkStatus::Geplant),
            "In Arbeit" => Ok(GewerkStatus::InArbeit),
            "Fertig" => Ok(GewerkStatus::Fertig),
            "Abgenommen" => Ok(GewerkStatus::Abgenommen),
            other => Err(CoreError::Validation(format!(
                "Unbekannter Gewerk-Status '{other}'. Erlaubt: Geplant, In Arbeit, Fertig, Abgenommen"
            ))),
        }
    }

    /// Read-boundary normalization: unknown labels fall back to `Geplant`.
    pub fn parse_or_default(label: &str) -> Self {
        Self::parse(label).unwrap_or(GewerkStatus::Geplant)
    }
}

impl std::fmt::Display for GewerkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate a fortschritt percentage.
pub fn validate_fortschritt(fortschritt: i32) -> Result<(), CoreError> {
    if (0..=100).contains(&fortschritt) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Fortschritt muss zwischen 0 und 100 liegen, nicht {fortschritt}"
        )))
    }
}
