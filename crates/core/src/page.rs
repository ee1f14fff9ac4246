//! HTML rendering of the playground page.
//!
//! The page is rebuilt from scratch for every request out of the submitted
//! form and the outcome of that one click. User and model text is always
//! escaped; the generated snippet only ever reaches the browser through the
//! `srcdoc` attribute of a sandboxed frame.

use crate::idea::{IdeaField, IdeaForm};
use crate::outcome::{Outcome, RenderRequest};
use html_escape::{encode_safe, encode_text};

pub const PAGE_TITLE: &str = "Kids' Vibe Coding Playground";

/// Height of the preview frame in pixels.
pub const PREVIEW_HEIGHT: u32 = 500;

const STYLE: &str = r#"
body { background-color: #f0faff; font-family: system-ui, sans-serif; margin: 0; padding: 24px; }
.main-title { color: #2E86C1; text-align: center; font-size: 35px; font-weight: bold; }
.columns { display: grid; grid-template-columns: 1fr 1.2fr; gap: 32px; }
label { display: block; font-weight: 600; margin-top: 12px; }
input, textarea { width: 100%; box-sizing: border-box; padding: 8px; border-radius: 8px; border: 1px solid #aac; }
textarea { min-height: 96px; }
button { margin-top: 16px; padding: 10px 18px; border-radius: 10px; border: 0; background: #FF8C00; color: white; font-size: 16px; cursor: pointer; }
button[disabled] { opacity: 0.6; cursor: progress; }
.vibe-card { background-color: #ffffff; padding: 15px; border-radius: 15px; border-left: 5px solid #FF8C00; white-space: pre-wrap; }
.banner { padding: 12px; border-radius: 10px; margin-bottom: 12px; }
.warning { background: #fff4d6; }
.error { background: #ffe1e1; }
.info { background: #e1f0ff; }
iframe { width: 100%; border: 1px solid #ccd; border-radius: 10px; background: white; }
footer { margin-top: 32px; text-align: center; color: #667; font-size: 13px; }
"#;

/// Disables the button while the single in-flight request runs.
const SUBMIT_SCRIPT: &str = r#"
document.getElementById("idea-form").addEventListener("submit", function () {
  var button = document.getElementById("generate");
  button.disabled = true;
  button.textContent = "The AI wizard is coding your app...";
});
"#;

/// Inputs for one render of the page.
#[derive(Debug, Clone)]
pub struct PageView<'a> {
    /// Values to put back into the inputs.
    pub form: &'a IdeaForm,
    /// `None` before the first click.
    pub outcome: Option<&'a Outcome>,
    /// Model name shown in the footer.
    pub model: &'a str,
}

fn placeholder(field: IdeaField) -> &'static str {
    match field {
        IdeaField::Topic => "e.g. Compliment sticker board",
        IdeaField::Features => {
            "e.g. When I press the button a star appears and a happy song plays"
        }
        IdeaField::Style => "e.g. Yellow and sky blue",
    }
}

fn render_field(form: &IdeaForm, field: IdeaField, index: usize) -> String {
    let name = field.name();
    let label = format!("{}. {}", index + 1, encode_text(field.label()));
    let value = form.value(field);
    let placeholder = encode_safe(placeholder(field));

    match field {
        IdeaField::Features => format!(
            r#"<label for="{name}">{label}</label><textarea id="{name}" name="{name}" placeholder="{placeholder}">{}</textarea>"#,
            encode_text(value)
        ),
        _ => format!(
            r#"<label for="{name}">{label}</label><input type="text" id="{name}" name="{name}" placeholder="{placeholder}" value="{}">"#,
            encode_safe(value)
        ),
    }
}

fn render_form(form: &IdeaForm) -> String {
    let fields: Vec<String> = IdeaField::ALL
        .iter()
        .enumerate()
        .map(|(index, field)| render_field(form, *field, index))
        .collect();

    format!(
        r#"<h2>💡 Fill in your imagination</h2>
<form id="idea-form" method="post" action="/">
{}
<button id="generate" type="submit">Make my magic app ✨</button>
</form>"#,
        fields.join("\n")
    )
}

fn banner(class: &str, text: &str) -> String {
    format!(r#"<div class="banner {class}">{}</div>"#, encode_text(text))
}

fn render_explanation(explanation: &str) -> String {
    let body = if explanation.is_empty() {
        "Your spell is still being written!"
    } else {
        explanation
    };

    format!(
        r#"<h2>📝 Coding magic spell for a friend</h2>
<div class="vibe-card">{}</div>
{}"#,
        encode_text(body),
        banner(
            "info",
            "Copy the spell above into an AI coding agent and you can build this app for real!"
        )
    )
}

fn render_preview(code: &str) -> String {
    format!(
        r#"<h2>🎮 Live preview</h2>
<iframe title="preview" sandbox="allow-scripts" height="{PREVIEW_HEIGHT}" srcdoc="{}"></iframe>"#,
        encode_safe(code)
    )
}

fn render_code(code: &str) -> String {
    format!(
        r#"<details><summary>💻 Peek at the real code</summary><pre><code class="language-html">{}</code></pre></details>"#,
        encode_text(code)
    )
}

/// Render the explanation, and the preview and code only when there is code.
pub fn render_result(request: &RenderRequest) -> String {
    match &request.code {
        Some(code) => format!(
            "{}\n<hr>\n{}\n{}",
            render_preview(code),
            render_explanation(&request.explanation),
            render_code(code)
        ),
        None => format!(
            "{}\n{}",
            banner(
                "info",
                "The AI did not send back any code to preview. Press the button to try again."
            ),
            render_explanation(&request.explanation)
        ),
    }
}

fn render_output(outcome: Option<&Outcome>) -> String {
    let Some(outcome) = outcome else {
        return banner(
            "info",
            "Fill in all three boxes and press the button to make your app.",
        );
    };

    match outcome {
        Outcome::Warning { missing } => banner("warning", &missing.to_string()),
        Outcome::Failed { error } => banner("error", &error.notice()),
        Outcome::NoRenderable { .. } | Outcome::Displayed { .. } => {
            render_result(&outcome.render_request())
        }
    }
}

/// Render the full playground page.
pub fn render_page(view: &PageView<'_>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<h1 class="main-title">🚀 {title}</h1>
<div class="columns">
<section>
{form}
</section>
<section>
{output}
</section>
</div>
<footer>Powered by {model} | Cheering on every kid's first coding adventure!</footer>
<script>{SUBMIT_SCRIPT}</script>
</body>
</html>
"#,
        title = encode_text(PAGE_TITLE),
        form = render_form(view.form),
        output = render_output(view.outcome),
        model = encode_text(view.model),
    )
}
