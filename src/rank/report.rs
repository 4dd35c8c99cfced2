//! Relevance report assembly.

use chrono::Local;

use crate::model::{
    ExtractedSection, RankInput, RelevanceReport, ReportMetadata, ScoredBlock, SubsectionAnalysis,
};

const SECTION_TITLE_MAX: usize = 80;
const REFINED_TEXT_MAX: usize = 1000;

/// Assemble the output report from ranked blocks.
///
/// Ranks are 1-based in ranked order. Section titles are a crude guess:
/// the block text up to its first sentence boundary, capped at 80
/// characters. Refined text is the block text capped at 1000 characters.
pub fn build_report(input: &RankInput, ranked: &[ScoredBlock]) -> RelevanceReport {
    let mut extracted = Vec::with_capacity(ranked.len());
    let mut analysis = Vec::with_capacity(ranked.len());

    for (i, scored) in ranked.iter().enumerate() {
        let block = &scored.block;
        extracted.push(ExtractedSection {
            document: block.document.clone(),
            section_title: section_title(&block.text),
            importance_rank: (i + 1) as u32,
            page_number: block.page_number,
        });
        analysis.push(SubsectionAnalysis {
            document: block.document.clone(),
            refined_text: truncate_chars(&block.text, REFINED_TEXT_MAX),
            page_number: block.page_number,
        });
    }

    RelevanceReport {
        metadata: ReportMetadata {
            input_documents: input.documents.iter().map(|d| d.filename.clone()).collect(),
            persona: input.persona.role.clone(),
            job_to_be_done: input.job_to_be_done.task.clone(),
            processing_timestamp: Local::now().to_rfc3339(),
        },
        extracted_sections: extracted,
        subsection_analysis: analysis,
    }
}

/// Text up to the first ". ", capped at 80 characters.
fn section_title(text: &str) -> String {
    let first = text.split(". ").next().unwrap_or(text);
    truncate_chars(first, SECTION_TITLE_MAX)
}

/// Truncate to at most `max` characters, on a char boundary.
fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentRef, Job, PageBlockText, Persona};

    fn input() -> RankInput {
        RankInput {
            documents: vec![
                DocumentRef {
                    filename: "a.pdf".to_string(),
                },
                DocumentRef {
                    filename: "b.pdf".to_string(),
                },
            ],
            persona: Persona {
                role: "Travel Planner".to_string(),
            },
            job_to_be_done: Job {
                task: "plan a 4-day trip".to_string(),
            },
        }
    }

    fn scored(doc: &str, page: u32, text: &str, score: f32) -> ScoredBlock {
        ScoredBlock {
            block: PageBlockText {
                document: doc.to_string(),
                page_number: page,
                text: text.to_string(),
            },
            score,
        }
    }

    #[test]
    fn test_report_ranks_and_metadata() {
        let ranked = vec![
            scored("b.pdf", 3, "Coastal towns. Nice and Antibes.", 0.9),
            scored("a.pdf", 1, "Packing tips. Bring sunscreen.", 0.7),
        ];
        let report = build_report(&input(), &ranked);

        assert_eq!(report.metadata.input_documents, vec!["a.pdf", "b.pdf"]);
        assert_eq!(report.metadata.persona, "Travel Planner");
        assert!(!report.metadata.processing_timestamp.is_empty());

        assert_eq!(report.extracted_sections.len(), 2);
        assert_eq!(report.extracted_sections[0].importance_rank, 1);
        assert_eq!(report.extracted_sections[0].document, "b.pdf");
        assert_eq!(report.extracted_sections[0].section_title, "Coastal towns");
        assert_eq!(report.extracted_sections[1].importance_rank, 2);

        assert_eq!(report.subsection_analysis.len(), 2);
        assert_eq!(report.subsection_analysis[0].page_number, 3);
    }

    #[test]
    fn test_section_title_caps_at_80() {
        let long = "word ".repeat(40);
        let title = section_title(&long);
        assert_eq!(title.chars().count(), 80);
    }

    #[test]
    fn test_section_title_without_sentence_boundary() {
        assert_eq!(section_title("No boundary here"), "No boundary here");
    }

    #[test]
    fn test_refined_text_caps_at_1000_chars() {
        let text = "é".repeat(1200);
        let ranked = vec![scored("a.pdf", 1, &text, 1.0)];
        let report = build_report(&input(), &ranked);
        assert_eq!(
            report.subsection_analysis[0].refined_text.chars().count(),
            1000
        );
    }

    #[test]
    fn test_empty_ranked_set() {
        let report = build_report(&input(), &[]);
        assert!(report.extracted_sections.is_empty());
        assert!(report.subsection_analysis.is_empty());
    }
}
