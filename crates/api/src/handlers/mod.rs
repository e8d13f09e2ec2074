pub mod document;
pub mod eigenleistung;
pub mod gewerk;
pub mod phase;
