//! Fixed prompt template for the match assessment

use crate::error::{AnalyzerError, Result};

/// System and user messages for one chat-completion request. Both document
/// texts are embedded verbatim, never truncated.
#[derive(Debug, Clone)]
pub struct AnalysisPrompt {
    pub system: String,
    pub user: String,
}

#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub system: String,
    pub user_template: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            system: SYSTEM_INSTRUCTION.to_string(),
            user_template: USER_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    /// Builds the analysis prompt. Empty or whitespace-only input is rejected
    /// here so no model call is wasted on it.
    pub fn build(&self, job_description: &str, resume: &str) -> Result<AnalysisPrompt> {
        if job_description.trim().is_empty() {
            return Err(AnalyzerError::InvalidInput(
                "job description text is empty".to_string(),
            ));
        }
        if resume.trim().is_empty() {
            return Err(AnalyzerError::InvalidInput(
                "resume text is empty".to_string(),
            ));
        }

        Ok(AnalysisPrompt {
            system: self.system.clone(),
            user: self
                .user_template
                .replace("{job}", job_description)
                .replace("{resume}", resume),
        })
    }
}

const SYSTEM_INSTRUCTION: &str =
    "You are a professional Resume Analyzer. Provide accurate, objective analysis.";

// The four labeled lines in this directive are load-bearing:
// analysis::parser matches on these exact prefixes, so the template and the
// parser must change in lockstep.
const USER_TEMPLATE: &str = r#"Analyze the match between this job description and resume. Provide a percentage match and detailed analysis.

**Job Description:**
{job}

**Resume:**
{resume}

Please provide your analysis in exactly this format:
Matched Percentage: [number between 0-100]
Reason: [Brief explanation of why this percentage was assigned, highlighting key matching and missing elements]
Skills To Improve: [Specific skills the candidate should develop to better match this role]
Keywords: [Comma-separated list of matching keywords found in both documents]"#;
