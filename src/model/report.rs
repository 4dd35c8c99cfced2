//! Input and output shapes for the relevance-ranking pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A document listed in the ranking input payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRef {
    /// File name, resolved against the documents base directory
    pub filename: String,
}

/// Persona section of the ranking input payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    /// The persona role, e.g. "Travel Planner"
    pub role: String,
}

/// Job-to-be-done section of the ranking input payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// The task description
    pub task: String,
}

/// The full ranking input payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankInput {
    /// Documents to pool candidate blocks from, in listed order
    pub documents: Vec<DocumentRef>,
    /// Persona driving the query
    pub persona: Persona,
    /// Task driving the query
    pub job_to_be_done: Job,
}

impl RankInput {
    /// Parse an input payload from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidInput(e.to_string()))
    }

    /// The query string embedded alongside the candidate blocks.
    pub fn query(&self) -> String {
        format!("As a {}, {}", self.persona.role, self.job_to_be_done.task)
    }
}

/// One candidate text block: a single page's text from one document.
#[derive(Debug, Clone, PartialEq)]
pub struct PageBlockText {
    /// Source document file name
    pub document: String,
    /// 1-based page number
    pub page_number: u32,
    /// Page text, trimmed, newlines collapsed to spaces
    pub text: String,
}

/// A candidate block tagged with its similarity score.
#[derive(Debug, Clone)]
pub struct ScoredBlock {
    /// The underlying block
    pub block: PageBlockText,
    /// Cosine similarity against the query, in [-1, 1]
    pub score: f32,
}

/// Metadata section of the ranking report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Input document file names, in listed order
    pub input_documents: Vec<String>,
    /// Persona role string
    pub persona: String,
    /// Task string
    pub job_to_be_done: String,
    /// ISO-8601 timestamp of when the report was produced
    pub processing_timestamp: String,
}

/// One entry of `extracted_sections`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedSection {
    /// Source document file name
    pub document: String,
    /// Crude section title: block text up to the first ". ", capped at 80 chars
    pub section_title: String,
    /// 1-based importance rank
    pub importance_rank: u32,
    /// 1-based page number
    pub page_number: u32,
}

/// One entry of `subsection_analysis`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    /// Source document file name
    pub document: String,
    /// Block text truncated to 1000 chars
    pub refined_text: String,
    /// 1-based page number
    pub page_number: u32,
}

/// The full ranking report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelevanceReport {
    /// Report metadata
    pub metadata: ReportMetadata,
    /// Top-K sections by similarity, rank ascending
    pub extracted_sections: Vec<ExtractedSection>,
    /// Longer text excerpts for the same top-K sections
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_input_parse() {
        let json = r#"{
            "documents": [{"filename": "a.pdf"}, {"filename": "b.pdf"}],
            "persona": {"role": "Analyst"},
            "job_to_be_done": {"task": "summarize quarterly trends"}
        }"#;
        let input = RankInput::from_json(json).unwrap();
        assert_eq!(input.documents.len(), 2);
        assert_eq!(input.persona.role, "Analyst");
        assert_eq!(
            input.query(),
            "As a Analyst, summarize quarterly trends"
        );
    }

    #[test]
    fn test_rank_input_malformed_payload() {
        let result = RankInput::from_json(r#"{"documents": "not an array"}"#);
        assert!(matches!(result, Err(crate::error::Error::InvalidInput(_))));
    }

    #[test]
    fn test_report_field_names() {
        let report = RelevanceReport {
            metadata: ReportMetadata {
                input_documents: vec!["a.pdf".to_string()],
                persona: "Analyst".to_string(),
                job_to_be_done: "task".to_string(),
                processing_timestamp: "2024-01-01T00:00:00Z".to_string(),
            },
            extracted_sections: vec![ExtractedSection {
                document: "a.pdf".to_string(),
                section_title: "Intro".to_string(),
                importance_rank: 1,
                page_number: 1,
            }],
            subsection_analysis: vec![],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"extracted_sections\""));
        assert!(json.contains("\"importance_rank\":1"));
        assert!(json.contains("\"processing_timestamp\""));
        assert!(json.contains("\"subsection_analysis\":[]"));
    }
}
