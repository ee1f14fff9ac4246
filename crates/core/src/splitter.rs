//! Best-effort parser for model replies.
//!
//! The model is asked for an explanation section and one fenced html block,
//! but nothing guarantees it complies. Every lookup here has an explicit
//! "not found" result (an empty string) and the splitter never fails.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The two fragments pulled out of a model reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedOutput {
    /// Text of the explanation section, trimmed. Empty when the label is absent.
    pub explanation: String,
    /// Contents of the first html fence, trimmed. Empty when no fence is found.
    pub code: String,
}

impl ParsedOutput {
    /// Whether there is a snippet worth putting in a preview frame.
    pub fn is_renderable(&self) -> bool {
        !self.code.is_empty()
    }
}

/// Regex matching a section label at the start of a line.
///
/// Accepts the usual markdown decoration models add around a label:
/// `[code]`, `code`, `## Code`, `**Code:**`, `2. [code]`, `### 1. Code`.
/// Text may follow on the same line when the label is bracketed or ends in a
/// colon; a bare label word must fill its line. The match ends right after
/// the label and its decoration.
fn label_regex(label: &str) -> Regex {
    Regex::new(&format!(
        r"(?mi)^[ \t]*(?:#{{1,6}}[ \t]*)?(?:\d+[.)][ \t]*)?(?:#{{1,6}}[ \t]*)?[*_]{{0,2}}[ \t]*(?:\[[ \t]*{label}[ \t]*\][*_]{{0,2}}[ \t]*:?[*_]{{0,2}}|{label}[*_]{{0,2}}[ \t]*:[*_]{{0,2}}|{label}[*_]{{0,2}}[ \t]*\r?$)"
    ))
    .unwrap()
}

/// Regex matching the first fenced block tagged as html, non-greedy across lines.
fn html_fence_regex() -> Regex {
    Regex::new(r"(?is)```html\b(.*?)```").unwrap()
}

/// Extract the first html fenced block, trimmed. Empty when there is none.
pub fn extract_code(text: &str) -> String {
    html_fence_regex()
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Extract the explanation section, trimmed.
///
/// Starts right after the explanation label, keeping any text on the same
/// line, and stops at the earliest of the code label, the opening of the first html fence, or the end of text.
/// Empty when the explanation label is absent.
pub fn extract_explanation(text: &str) -> String {
    let Some(label) = label_regex("explanation").find(text) else {
        return String::new();
    };
    let start = label.end();

    let code_label = label_regex("code")
        .find_at(text, start)
        .map(|m| m.start());
    let fence = html_fence_regex()
        .find_at(text, start)
        .map(|m| m.start());

    let end = [code_label, fence]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(text.len());

    text[start..end].trim().to_string()
}

/// Split a model reply into its explanation and its html snippet.
pub fn split_response(text: &str) -> ParsedOutput {
    ParsedOutput {
        explanation: extract_explanation(text),
        code: extract_code(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_labels() {
        let parsed = split_response("explanation\nHello\ncode\n```html\n<b>hi</b>\n```");
        assert_eq!(parsed.explanation, "Hello");
        assert_eq!(parsed.code, "<b>hi</b>");
        assert!(parsed.is_renderable());
    }

    #[test]
    fn test_bracketed_labels() {
        let response = "Sure!\n\n[explanation]\nI want a clock.\nPlease make it tick.\n\n[code]\n```html\n<html><body>tick</body></html>\n```\nHave fun!";
        let parsed = split_response(response);
        assert_eq!(parsed.explanation, "I want a clock.\nPlease make it tick.");
        assert_eq!(parsed.code, "<html><body>tick</body></html>");
    }

    #[test]
    fn test_decorated_labels() {
        let response = "## Explanation\nMake a piano.\n\n**Code:**\n```HTML\n<div>piano</div>\n```";
        let parsed = split_response(response);
        assert_eq!(parsed.explanation, "Make a piano.");
        assert_eq!(parsed.code, "<div>piano</div>");
    }

    #[test]
    fn test_numbered_labels() {
        let response = "1. [explanation]\nA quiz app.\n2. [code]\n```html\n<p>quiz</p>\n```";
        let parsed = split_response(response);
        assert_eq!(parsed.explanation, "A quiz app.");
        assert_eq!(parsed.code, "<p>quiz</p>");
    }

    #[test]
    fn test_bracketed_label_with_text_on_same_line() {
        let parsed = split_response(
            "[explanation] I want a clock that ticks.\n[code]\n```html\n<b>t</b>\n```",
        );
        assert_eq!(parsed.explanation, "I want a clock that ticks.");
        assert_eq!(parsed.code, "<b>t</b>");
    }

    #[test]
    fn test_bold_colon_label_with_text_on_same_line() {
        let parsed = split_response("**Explanation:** I want a clock.\n\n**Code:**\n```html\n<b>t</b>\n```");
        assert_eq!(parsed.explanation, "I want a clock.");
        assert_eq!(parsed.code, "<b>t</b>");
    }

    #[test]
    fn test_bracketed_colon_label_with_text_on_same_line() {
        let parsed = split_response("1. [explanation]: I want a clock.\n2. [code]: ```html\n<b>t</b>\n```");
        assert_eq!(parsed.explanation, "I want a clock.");
        assert_eq!(parsed.code, "<b>t</b>");
    }

    #[test]
    fn test_heading_before_number() {
        let parsed = split_response("### 1. Explanation\nI want a clock.\n### 2. Code\n```html\n<b>t</b>\n```");
        assert_eq!(parsed.explanation, "I want a clock.");
        assert_eq!(parsed.code, "<b>t</b>");
    }

    #[test]
    fn test_bare_label_word_starting_a_sentence_is_not_a_label() {
        let parsed = split_response("Explanation of the app follows.\n```html\n<i>x</i>\n```");
        assert_eq!(parsed.explanation, "");
    }

    #[test]
    fn test_explanation_stops_at_fence_without_code_label() {
        let response = "[explanation]\nA drum kit.\n```html\n<button>boom</button>\n```";
        let parsed = split_response(response);
        assert_eq!(parsed.explanation, "A drum kit.");
        assert_eq!(parsed.code, "<button>boom</button>");
    }

    #[test]
    fn test_explanation_runs_to_end_without_code() {
        let parsed = split_response("[explanation]\nOnly words here.\n");
        assert_eq!(parsed.explanation, "Only words here.");
        assert_eq!(parsed.code, "");
        assert!(!parsed.is_renderable());
    }

    #[test]
    fn test_missing_explanation_label_degrades_to_empty() {
        let parsed = split_response("Here you go:\n```html\n<i>x</i>\n```");
        assert_eq!(parsed.explanation, "");
        assert_eq!(parsed.code, "<i>x</i>");
    }

    #[test]
    fn test_label_word_inside_sentence_is_not_a_label() {
        let parsed = split_response("This explanation has no label line.\n```html\n<i>x</i>\n```");
        assert_eq!(parsed.explanation, "");
    }

    #[test]
    fn test_no_fence_yields_empty_code() {
        let parsed = split_response("[explanation]\nHi\n[code]\n<b>not fenced</b>");
        assert_eq!(parsed.explanation, "Hi");
        assert_eq!(parsed.code, "");
        assert!(!parsed.is_renderable());
    }

    #[test]
    fn test_only_first_fence_is_captured() {
        let response = "[explanation]\nTwo blocks.\n[code]\n```html\n<p>one</p>\n```\nand\n```html\n<p>two</p>\n```";
        assert_eq!(split_response(response).code, "<p>one</p>");
    }

    #[test]
    fn test_stray_backticks_before_fence() {
        let response = "[explanation]\nUse `onclick` and ``double`` ticks.\n[code]\n```html\n<a>ok</a>\n```";
        let parsed = split_response(response);
        assert_eq!(parsed.explanation, "Use `onclick` and ``double`` ticks.");
        assert_eq!(parsed.code, "<a>ok</a>");
    }

    #[test]
    fn test_untagged_fence_is_ignored() {
        let parsed = split_response("[explanation]\nx\n```js\nalert(1)\n```");
        assert_eq!(parsed.code, "");
    }

    #[test]
    fn test_html_prefixed_tag_is_not_html() {
        assert_eq!(extract_code("```htmlbars\n{{x}}\n```"), "");
    }

    #[test]
    fn test_crlf_line_endings() {
        let parsed = split_response("[explanation]\r\nHello\r\n[code]\r\n```html\r\n<b>hi</b>\r\n```");
        assert_eq!(parsed.explanation, "Hello");
        assert_eq!(parsed.code, "<b>hi</b>");
    }

    #[test]
    fn test_resplitting_parsed_code_is_not_a_no_op() {
        let parsed = split_response("explanation\nHello\ncode\n```html\n<b>hi</b>\n```");
        let again = split_response(&parsed.code);
        assert_eq!(again.code, "");
        assert_eq!(again.explanation, "");
    }

    #[test]
    fn test_empty_response() {
        assert_eq!(split_response(""), ParsedOutput::default());
        assert_eq!(split_response("   \n "), ParsedOutput::default());
    }
}
