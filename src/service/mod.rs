pub mod analysis;
pub mod document;
pub mod report;
pub mod risk;
pub mod session;

pub use analysis::{AnalysisService, CompletedAnalysis};
pub use document::DocumentUpload;
pub use session::Session;
