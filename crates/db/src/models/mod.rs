pub mod document;
pub mod gewerk;
pub mod phase;
