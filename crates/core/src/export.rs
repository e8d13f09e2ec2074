//! CSV export of the eigenleistung checklist.
//!
//! Produces one row per (phase, gewerk) pair with the eigenleistung flag
//! and the newest history entry. All fields are double-quoted; booleans
//! render as the German literals "Ja"/"Nein".

use csv::{QuoteStyle, WriterBuilder};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Column headers of the export, in order.
const HEADER: [&str; 6] = [
    "Projekt",
    "Phase",
    "Gewerk",
    "Eigenleistung",
    "Zuletzt geändert",
    "Von",
];

/// One export row: a gewerk inside its phase.
#[derive(Debug, Clone)]
pub struct ExportRow {
    pub phase: String,
    pub gewerk: String,
    pub eigenleistung: bool,
    /// Timestamp of the newest history entry, if any.
    pub zuletzt_geaendert: Option<Timestamp>,
    /// Actor of the newest history entry, if any.
    pub von: Option<String>,
}

/// Render the eigenleistung checklist as CSV text.
///
/// Header row is `Projekt,Phase,Gewerk,Eigenleistung,Zuletzt geändert,Von`;
/// one data row per (phase, gewerk) pair in the given order.
pub fn eigenleistung_csv(projekt: &str, rows: &[ExportRow]) -> Result<String, CoreError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer
        .write_record(HEADER)
        .map_err(|e| CoreError::Internal(format!("CSV-Export fehlgeschlagen: {e}")))?;

    for row in rows {
        let eigenleistung = if row.eigenleistung { "Ja" } else { "Nein" };
        let datum = row
            .zuletzt_geaendert
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let von = row.von.as_deref().unwrap_or_default();

        writer
            .write_record([projekt, &row.phase, &row.gewerk, eigenleistung, &datum, von])
            .map_err(|e| CoreError::Internal(format!("CSV-Export fehlgeschlagen: {e}")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Internal(format!("CSV-Export fehlgeschlagen: {e}")))?;
    String::from_utf8(bytes).map_err(|e| CoreError::Internal(format!("CSV-Export fehlgeschlagen: {e}")))
}
