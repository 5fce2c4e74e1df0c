//! Wire contracts of the analyze and ask endpoints

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response of the document-analysis endpoint. The namespace identifies the
/// analyzed document for follow-up highlights and question calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeDocumentResponse {
    pub namespace: String,
    pub summary: DocumentSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Term name to clause text, e.g. "Governing Law", "Confidentiality".
    pub important_contract_terms: HashMap<String, String>,
    pub key_data_points: KeyDataPoints,
    pub legal_terms_glossary: HashMap<String, String>,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyDataPoints {
    pub contract_period: ContractPeriod,
    pub financial_terms: Vec<String>,
    pub key_deadlines: Vec<String>,
    pub parties_involved: Vec<Party>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractPeriod {
    pub start_date: String,
    pub end_date: String,
    pub term_description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AskQuestionRequest {
    pub query: String,
    pub namespace: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AskQuestionResponse {
    pub answer: String,
}

/// Error body the backend returns on non-success status codes.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}
