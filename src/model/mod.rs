pub mod analysis;
pub mod config;
pub mod highlights;
pub mod risk;

pub use analysis::*;
pub use config::Config;
pub use highlights::{ClauseAssessment, HighlightsRequest, HighlightsResponse};
pub use risk::*;
