pub mod document_repo;
pub mod gewerk_repo;
pub mod phase_repo;

pub use document_repo::DocumentRepo;
pub use gewerk_repo::GewerkRepo;
pub use phase_repo::PhaseRepo;
