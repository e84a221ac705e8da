//! Comment and dangling-comma stripping for JSON-like files.
//!
//! Settings and marker files written by hand tend to carry `//` comments and
//! trailing commas that strict JSON parsers reject. The functions here remove
//! both while leaving string literals untouched. With `preserve_lines` the
//! newlines inside removed comments, and the whitespace in front of a removed
//! comma, are kept so parser error positions still point at the right line.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static LINE_PRESERVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r?\n").expect("LINE_PRESERVE_RE is a valid static regex pattern")
});

static CPP_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)(?P<comments>/\*[^*]*\*+(?:[^/*][^*]*\*+)*/|\s*//[^\r\n]*)|(?P<code>"(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*'|.[^/"']*)"#,
    )
    .expect("CPP_COMMENT_RE is a valid static regex pattern")
});

static PY_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)(?P<comments>\s*[#][^\r\n]*)|(?P<code>"{3}(?:\\.|[^\\])*"{3}|'{3}(?:\\.|[^\\])*'{3}|"(?:\\.|[^"\\])*"|'(?:\\.|[^'])*'|.[^#"']*)"#,
    )
    .expect("PY_COMMENT_RE is a valid static regex pattern")
});

static DANGLING_COMMA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)(?P<square_comma>,(?P<square_ws>\s*)(?P<square_bracket>\]))|(?P<curly_comma>,(?P<curly_ws>\s*)(?P<curly_bracket>\}))|(?P<code>"(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*'|.[^,"']*)"#,
    )
    .expect("DANGLING_COMMA_RE is a valid static regex pattern")
});

/// Comment syntax to strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `//` line comments and `/* */` block comments (C, C++, JSON)
    CLike,
    /// `#` line comments with single, double, and triple quoted strings
    Python,
}

impl CommentStyle {
    /// Resolve a style by its conventional name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "c" | "cpp" | "json" => Some(CommentStyle::CLike),
            "python" => Some(CommentStyle::Python),
            _ => None,
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            CommentStyle::CLike => &CPP_COMMENT_RE,
            CommentStyle::Python => &PY_COMMENT_RE,
        }
    }
}

/// Remove comments from `text`, leaving string literals intact.
pub fn strip_comments(text: &str, style: CommentStyle, preserve_lines: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for caps in style.pattern().captures_iter(text) {
        if let Some(code) = caps.name("code") {
            out.push_str(code.as_str());
        } else if preserve_lines && let Some(comment) = caps.name("comments") {
            for newline in LINE_PRESERVE_RE.find_iter(comment.as_str()) {
                out.push_str(newline.as_str());
            }
        }
    }
    out
}

/// Remove commas that directly precede a closing `]` or `}`.
pub fn strip_dangling_commas(text: &str, preserve_lines: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for caps in DANGLING_COMMA_RE.captures_iter(text) {
        if let Some(code) = caps.name("code") {
            out.push_str(code.as_str());
        } else {
            out.push_str(&closing_bracket(&caps, preserve_lines));
        }
    }
    out
}

fn closing_bracket(caps: &Captures<'_>, preserve_lines: bool) -> String {
    let (ws, bracket) = if caps.name("square_comma").is_some() {
        (caps.name("square_ws"), caps.name("square_bracket"))
    } else {
        (caps.name("curly_ws"), caps.name("curly_bracket"))
    };
    let bracket = bracket.map(|m| m.as_str()).unwrap_or_default();
    if preserve_lines {
        format!("{}{}", ws.map(|m| m.as_str()).unwrap_or_default(), bracket)
    } else {
        bracket.to_string()
    }
}

/// Strip comments and dangling commas so `text` parses as strict JSON.
pub fn sanitize_json(text: &str, preserve_lines: bool) -> String {
    strip_dangling_commas(
        &strip_comments(text, CommentStyle::CLike, preserve_lines),
        preserve_lines,
    )
}
