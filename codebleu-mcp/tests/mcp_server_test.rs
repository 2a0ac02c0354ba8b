//! Integration tests for the MCP server.
//!
//! This module specifically tests the public API of the MCP server tools.

use codebleu_mcp::tools::{
    AssessQualityRequest, CodeBleuServer, EvaluateCodeRequest, ListLanguagesRequest,
};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::ServerHandler;

const REFERENCE: &str = "def add(a, b):\n    return a + b\n";

fn first_text(result: &rmcp::model::CallToolResult) -> String {
    result
        .content
        .first()
        .map(|content| format!("{content:?}"))
        .unwrap_or_default()
}

#[test]
#[allow(clippy::expect_used)]
fn test_evaluate_code_identical() {
    let server = CodeBleuServer::new();
    let params = Parameters(EvaluateCodeRequest {
        generated: REFERENCE.to_owned(),
        reference: REFERENCE.to_owned(),
        language: "python".to_owned(),
        strict: false,
    });
    let result = server.evaluate_code(params);

    assert!(result.is_ok(), "Result should be Ok");
    let call_result = result.expect("Evaluation failed");
    assert!(!call_result.content.is_empty(), "Should have content");

    let text = first_text(&call_result);
    assert!(text.contains("compositeScore"));
    assert!(text.contains("Excellent"));
    assert!(text.contains("Ready for production use"));
}

#[test]
#[allow(clippy::expect_used)]
fn test_evaluate_code_renamed_parameters() {
    let server = CodeBleuServer::new();
    let params = Parameters(EvaluateCodeRequest {
        generated: "def add(x, y):\n    return x + y\n".to_owned(),
        reference: REFERENCE.to_owned(),
        language: "python".to_owned(),
        strict: false,
    });
    let call_result = server.evaluate_code(params).expect("Evaluation failed");
    let text = first_text(&call_result);
    assert!(text.contains("Fair"), "unexpected response: {text}");
    assert!(text.contains("variable usage consistency"));
}

#[test]
#[allow(clippy::expect_used)]
fn test_evaluate_code_strict_profile() {
    let server = CodeBleuServer::new();
    let params = Parameters(EvaluateCodeRequest {
        generated: "def add(x, y):\n    return x + y\n".to_owned(),
        reference: REFERENCE.to_owned(),
        language: "python".to_owned(),
        strict: true,
    });
    let call_result = server.evaluate_code(params).expect("Evaluation failed");
    let text = first_text(&call_result);
    assert!(text.contains("Very Poor"), "unexpected response: {text}");
}

#[test]
#[allow(clippy::expect_used)]
fn test_evaluate_code_blank_input() {
    let server = CodeBleuServer::new();
    let params = Parameters(EvaluateCodeRequest {
        generated: "   ".to_owned(),
        reference: REFERENCE.to_owned(),
        language: "python".to_owned(),
        strict: false,
    });
    let result = server.evaluate_code(params);

    assert!(result.is_ok(), "Blank input is a tool error, not a protocol error");
    let call_result = result.expect("Should return error result");
    let text = first_text(&call_result);
    assert!(
        text.contains("Both generated and reference code are required"),
        "Response should explain the rejection"
    );
}

#[test]
#[allow(clippy::expect_used)]
fn test_evaluate_code_default_language() {
    let request: EvaluateCodeRequest =
        serde_json::from_str(r#"{"generated": "x = 1", "reference": "x = 1"}"#)
            .expect("valid request");
    assert_eq!(request.language, "python");
    assert!(!request.strict);
}

#[test]
#[allow(clippy::expect_used)]
fn test_assess_quality_boundaries() {
    let server = CodeBleuServer::new();
    for (score, tier) in [(0.8, "Excellent"), (0.6, "Good"), (0.4, "Fair"), (0.2, "Poor")] {
        let call_result = server
            .assess_quality(Parameters(AssessQualityRequest { score }))
            .expect("Assessment failed");
        let text = first_text(&call_result);
        assert!(text.contains(tier), "{score} should be {tier}: {text}");
    }
    let call_result = server
        .assess_quality(Parameters(AssessQualityRequest { score: 0.1 }))
        .expect("Assessment failed");
    assert!(first_text(&call_result).contains("Complete Rewrite Recommended"));
}

#[test]
#[allow(clippy::expect_used)]
fn test_assess_quality_out_of_range() {
    let server = CodeBleuServer::new();
    let call_result = server
        .assess_quality(Parameters(AssessQualityRequest { score: 1.5 }))
        .expect("Should return error result");
    assert!(first_text(&call_result).contains("between 0.0 and 1.0"));
}

#[test]
#[allow(clippy::expect_used)]
fn test_list_languages() {
    let server = CodeBleuServer::new();
    let call_result = server
        .list_languages(Parameters(ListLanguagesRequest {
            include_keywords: true,
        }))
        .expect("Listing failed");
    let text = first_text(&call_result);
    for lang in ["python", "cpp", "java", "javascript"] {
        assert!(text.contains(lang), "missing {lang}");
    }
    assert!(text.contains("lambda"));
}

#[test]
fn test_server_creation() {
    let server = CodeBleuServer::new();
    let info = server.get_info();
    assert!(info.instructions.is_some());
    assert!(info.capabilities.tools.is_some());
}
