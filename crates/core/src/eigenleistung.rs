//! Eigenleistung (self-performed work) audit history.
//!
//! Every toggle of the eigenleistung flag on a gewerk appends an audit
//! entry. The history is bounded: only the most recent entries are kept,
//! older ones are dropped silently (no archival).

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Maximum number of history entries kept per gewerk.
pub const HISTORIE_LIMIT: usize = 10;

/// One audit entry in a gewerk's eigenleistung history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorieEintrag {
    /// When the flag was changed.
    pub datum: Timestamp,
    /// Who changed it.
    pub von: String,
    /// The new flag value.
    pub wert: bool,
    pub kommentar: Option<String>,
}

/// Append `eintrag` to `historie`, keeping at most [`HISTORIE_LIMIT`]
/// entries. The oldest entries are dropped first.
pub fn append_eintrag(
    mut historie: Vec<HistorieEintrag>,
    eintrag: HistorieEintrag,
) -> Vec<HistorieEintrag> {
    historie.push(eintrag);
    if historie.len() > HISTORIE_LIMIT {
        let overflow = historie.len() - HISTORIE_LIMIT;
        historie.drain(..overflow);
    }
    historie
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn eintrag(n: i64) -> HistorieEintrag {
        HistorieEintrag {
            datum: Utc.timestamp_opt(1_700_000_000 + n, 0).unwrap(),
            von: format!("user-{n}"),
            wert: n % 2 == 0,
            kommentar: None,
        }
    }

    #[test]
    fn append_to_empty_history() {
        let historie = append_eintrag(Vec::new(), eintrag(1));
        assert_eq!(historie.len(), 1);
        assert_eq!(historie[0].von, "user-1");
    }

    #[test]
    fn history_is_bounded_at_limit() {
        let mut historie = Vec::new();
        for n in 0..HISTORIE_LIMIT as i64 {
            historie = append_eintrag(historie, eintrag(n));
        }
        assert_eq!(historie.len(), HISTORIE_LIMIT);
    }

    #[test]
    fn eleventh_entry_drops_the_oldest() {
        let mut historie = Vec::new();
        for n in 0..=HISTORIE_LIMIT as i64 {
            historie = append_eintrag(historie, eintrag(n));
        }
        assert_eq!(historie.len(), HISTORIE_LIMIT);
        // Entry 0 is gone, entries 1..=10 remain in order.
        assert_eq!(historie[0].von, "user-1");
        assert_eq!(historie.last().unwrap().von, "user-10");
    }

    #[test]
    fn entries_keep_insertion_order() {
        let mut historie = Vec::new();
        for n in 0..3 {
            historie = append_eintrag(historie, eintrag(n));
        }
        let von: Vec<&str> = historie.iter().map(|e| e.von.as_str()).collect();
        assert_eq!(von, ["user-0", "user-1", "user-2"]);
    }
}
