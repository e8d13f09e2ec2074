//! Default phase catalog for new projects.
//!
//! A fixed, ordered checklist of 7 construction phases with their typical
//! gewerke. Every seeded gewerk starts at fortschritt 0, status Geplant,
//! eigenleistung false.

/// One phase in the default catalog.
#[derive(Debug, Clone, Copy)]
pub struct DefaultPhase {
    pub name: &'static str,
    pub beschreibung: &'static str,
    /// 1-based display and aggregation order.
    pub reihenfolge: i32,
    pub gewerke: &'static [DefaultGewerk],
}

/// One gewerk in the default catalog.
#[derive(Debug, Clone, Copy)]
pub struct DefaultGewerk {
    pub name: &'static str,
    pub kategorie: &'static str,
}

/// The hardcoded default catalog: 7 phases, ordered.
pub const DEFAULT_PHASEN: &[DefaultPhase] = &[
    DefaultPhase {
        name: "Grundstück & Planung",
        beschreibung: "Genehmigungen, Gutachten und Vorbereitung des Grundstücks",
        reihenfolge: 1,
        gewerke: &[
            DefaultGewerk { name: "Baugenehmigung", kategorie: "Planung" },
            DefaultGewerk { name: "Vermessung", kategorie: "Planung" },
            DefaultGewerk { name: "Baugrundgutachten", kategorie: "Planung" },
        ],
    },
    DefaultPhase {
        name: "Erdarbeiten & Fundament",
        beschreibung: "Aushub, Bodenplatte und Abdichtung",
        reihenfolge: 2,
        gewerke: &[
            DefaultGewerk { name: "Erdaushub", kategorie: "Tiefbau" },
            DefaultGewerk { name: "Bodenplatte", kategorie: "Tiefbau" },
            DefaultGewerk { name: "Abdichtung", kategorie: "Tiefbau" },
        ],
    },
    DefaultPhase {
        name: "Rohbau",
        beschreibung: "Tragende Konstruktion bis zur Decke über dem letzten Geschoss",
        reihenfolge: 3,
        gewerke: &[
            DefaultGewerk { name: "Mauerwerk", kategorie: "Rohbau" },
            DefaultGewerk { name: "Betondecken", kategorie: "Rohbau" },
            DefaultGewerk { name: "Schornstein", kategorie: "Rohbau" },
            DefaultGewerk { name: "Gerüstbau", kategorie: "Rohbau" },
        ],
    },
    DefaultPhase {
        name: "Dach",
        beschreibung: "Dachstuhl, Eindeckung und Entwässerung",
        reihenfolge: 4,
        gewerke: &[
            DefaultGewerk { name: "Dachstuhl", kategorie: "Zimmerei" },
            DefaultGewerk { name: "Dacheindeckung", kategorie: "Dachdeckerei" },
            DefaultGewerk { name: "Dachentwässerung", kategorie: "Klempnerei" },
        ],
    },
    DefaultPhase {
        name: "Gebäudehülle",
        beschreibung: "Fenster, Fassade und Dämmung",
        reihenfolge: 5,
        gewerke: &[
            DefaultGewerk { name: "Fenster und Außentüren", kategorie: "Ausbau" },
            DefaultGewerk { name: "Fassade", kategorie: "Ausbau" },
            DefaultGewerk { name: "Wärmedämmung", kategorie: "Ausbau" },
        ],
    },
    DefaultPhase {
        name: "Innenausbau",
        beschreibung: "Haustechnik und Innenausbau",
        reihenfolge: 6,
        gewerke: &[
            DefaultGewerk { name: "Elektroinstallation", kategorie: "Haustechnik" },
            DefaultGewerk { name: "Sanitärinstallation", kategorie: "Haustechnik" },
            DefaultGewerk { name: "Heizung", kategorie: "Haustechnik" },
            DefaultGewerk { name: "Estrich", kategorie: "Ausbau" },
            DefaultGewerk { name: "Innenputz", kategorie: "Ausbau" },
            DefaultGewerk { name: "Trockenbau", kategorie: "Ausbau" },
        ],
    },
    DefaultPhase {
        name: "Fertigstellung",
        beschreibung: "Oberflächen, Endreinigung und Abnahme",
        reihenfolge: 7,
        gewerke: &[
            DefaultGewerk { name: "Maler- und Tapezierarbeiten", kategorie: "Ausbau" },
            DefaultGewerk { name: "Bodenbeläge", kategorie: "Ausbau" },
            DefaultGewerk { name: "Innentüren", kategorie: "Ausbau" },
            DefaultGewerk { name: "Endreinigung", kategorie: "Abnahme" },
            DefaultGewerk { name: "Abnahme", kategorie: "Abnahme" },
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_seven_phases() {
        assert_eq!(DEFAULT_PHASEN.len(), 7);
    }

    #[test]
    fn reihenfolge_is_one_based_and_sequential() {
        for (i, phase) in DEFAULT_PHASEN.iter().enumerate() {
            assert_eq!(phase.reihenfolge, i as i32 + 1);
        }
    }

    #[test]
    fn every_phase_has_gewerke() {
        for phase in DEFAULT_PHASEN {
            assert!(!phase.gewerke.is_empty(), "{} has no gewerke", phase.name);
        }
    }
}
