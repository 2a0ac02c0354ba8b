//! MCP Tool implementations for codebleu.
//!
//! This module defines the tools that are exposed via MCP, allowing LLMs
//! to score generated code against a reference.

use codebleu::evaluator::{CodeEvaluator, EvaluationRequest};
use codebleu::language::{KeywordCatalog, Language};
use codebleu::scoring::ScoringConfig;
use codebleu::verdict::QualityTier;
use rmcp::{
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;

/// Request parameters for `evaluate_code` tool.
#[derive(Debug, serde::Deserialize, JsonSchema)]
pub struct EvaluateCodeRequest {
    /// The generated code to evaluate.
    #[schemars(description = "The generated code to evaluate")]
    pub generated: String,
    /// The reference code to compare against.
    #[schemars(description = "The reference (expected) code to compare against")]
    pub reference: String,
    /// Language tag (default: "python").
    #[schemars(description = "Language of both snippets: python, cpp, java or javascript")]
    #[serde(default = "default_language")]
    pub language: String,
    /// Use the strict profile.
    #[schemars(
        description = "Use the strict profile (BLEU-4, operator overlap, identifier penalty)"
    )]
    #[serde(default)]
    pub strict: bool,
}

fn default_language() -> String {
    codebleu::constants::DEFAULT_LANGUAGE.to_owned()
}

/// Request parameters for `assess_quality` tool.
#[derive(Debug, serde::Deserialize, JsonSchema)]
pub struct AssessQualityRequest {
    /// Composite score in `[0, 1]`.
    #[schemars(description = "Composite similarity score between 0.0 and 1.0")]
    pub score: f64,
}

/// Request parameters for `list_languages` tool.
#[derive(Debug, Default, serde::Deserialize, JsonSchema)]
pub struct ListLanguagesRequest {
    /// Include the keyword lists.
    #[schemars(description = "Include the full keyword list of each language")]
    #[serde(default)]
    pub include_keywords: bool,
}

/// The main MCP server struct for codebleu.
#[derive(Debug, Clone)]
pub struct CodeBleuServer {
    default_evaluator: CodeEvaluator,
    strict_evaluator: CodeEvaluator,
    #[allow(dead_code)]
    tool_router: ToolRouter<Self>,
}

impl CodeBleuServer {
    /// Creates a new codebleu MCP server instance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            default_evaluator: CodeEvaluator::default(),
            strict_evaluator: CodeEvaluator::new(ScoringConfig::strict()),
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for CodeBleuServer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!(r#"{{"error": "Serialization error: {e}"}}"#))
}

#[tool_router]
#[allow(clippy::unused_self, clippy::unnecessary_wraps)]
impl CodeBleuServer {
    /// Score generated code against a reference snippet.
    ///
    /// # Errors
    ///
    /// Never returns a protocol error; blank input yields an error result.
    #[tool(
        description = "Score generated code against reference code with a CodeBLEU-style metric.\n\
        Returns JSON with compositeScore, ngramMatch, weightedNgramMatch, syntaxMatch,\n\
        dataflowMatch (all 0.0-1.0), a quality tier (Excellent/Good/Fair/Poor/Very Poor)\n\
        and ordered recommendations."
    )]
    pub fn evaluate_code(
        &self,
        params: Parameters<EvaluateCodeRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;
        let evaluator = if req.strict {
            &self.strict_evaluator
        } else {
            &self.default_evaluator
        };
        let request = EvaluationRequest::new(req.generated, req.reference, req.language);
        match evaluator.evaluate_request(&request) {
            Ok(report) => Ok(CallToolResult::success(vec![Content::text(to_json(
                &report,
            ))])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Invalid request: {e}"
            ))])),
        }
    }

    /// Map a composite score to its quality tier.
    ///
    /// # Errors
    ///
    /// Never returns a protocol error; out-of-range scores yield an error result.
    #[tool(
        description = "Map a composite similarity score (0.0-1.0) to its quality tier.\n\
        Tiers: Excellent (>=0.8), Good (>=0.6), Fair (>=0.4), Poor (>=0.2), Very Poor (<0.2)."
    )]
    pub fn assess_quality(
        &self,
        params: Parameters<AssessQualityRequest>,
    ) -> Result<CallToolResult, McpError> {
        let score = params.0.score;
        if !(0.0..=1.0).contains(&score) {
            return Ok(CallToolResult::error(vec![Content::text(format!(
                "Score must be between 0.0 and 1.0, got {score}"
            ))]));
        }
        let tier = QualityTier::from_score(score);
        let body = serde_json::json!({
            "score": score,
            "quality": tier,
            "qualityDescription": tier.description(),
        });
        Ok(CallToolResult::success(vec![Content::text(to_json(&body))]))
    }

    /// List the languages with keyword support.
    ///
    /// # Errors
    ///
    /// Never returns a protocol error.
    #[tool(
        description = "List the languages with keyword-aware scoring. Unknown language tags\n\
        are still accepted and scored without keyword weighting."
    )]
    pub fn list_languages(
        &self,
        params: Parameters<ListLanguagesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let catalog = KeywordCatalog::shared();
        let languages: Vec<serde_json::Value> = Language::KNOWN
            .iter()
            .map(|lang| {
                let keywords = catalog.sorted_keywords(*lang);
                if params.0.include_keywords {
                    serde_json::json!({
                        "language": lang,
                        "keywordCount": keywords.len(),
                        "keywords": keywords,
                    })
                } else {
                    serde_json::json!({
                        "language": lang,
                        "keywordCount": keywords.len(),
                    })
                }
            })
            .collect();
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &languages,
        ))]))
    }
}

#[rmcp::tool_handler]
impl ServerHandler for CodeBleuServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "codebleu scores generated code against reference code.\n\n\
                 TOOLS AVAILABLE:\n\
                 • evaluate_code - Composite score, sub-scores, quality tier, recommendations\n\
                 • assess_quality - Quality tier for a composite score\n\
                 • list_languages - Languages with keyword-aware scoring\n\n\
                 COMMON TASKS:\n\
                 • 'How close is this to the expected solution?' → evaluate_code\n\
                 • 'Is 0.65 good?' → assess_quality"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
