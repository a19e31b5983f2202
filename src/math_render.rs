//! Rendering boundary for generated text.
//!
//! Generated questions carry LaTeX-style notation (`\frac{a}{b}`, `\mu`).
//! A host that can typeset math plugs in a [`MathRenderer`]; without one,
//! or when the renderer fails, content degrades to plain text with line
//! breaks turned into `<br/>`.

use tracing::warn;

/// Typesets LaTeX-like notation into display markup.
pub trait MathRenderer {
    type Error: std::fmt::Display;

    /// `display_mode` asks for a centred block rather than inline math.
    fn render(&self, latex: &str, display_mode: bool) -> Result<String, Self::Error>;
}

/// Content kind: pure math (a formula, a final answer) or prose that may
/// embed notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Math,
    Prose,
}

/// Strip stray `$` delimiters the generator was told not to emit.
pub fn strip_delimiters(content: &str) -> String {
    content.replace('$', "")
}

/// Plain-text fallback.
pub fn plain_text(content: &str) -> String {
    strip_delimiters(content).replace('\n', "<br/>")
}

/// Render `content`, falling back to [`plain_text`] when there is no
/// renderer, nothing to typeset, or the renderer fails.
pub fn render_math<R: MathRenderer>(content: &str, renderer: Option<&R>, kind: ContentKind) -> String {
    if content.is_empty() {
        return String::new();
    }
    let Some(renderer) = renderer else {
        return plain_text(content);
    };
    let clean = strip_delimiters(content);
    if kind == ContentKind::Math || clean.contains('\\') {
        match renderer.render(&clean, true) {
            Ok(markup) => return markup,
            Err(e) => warn!(error = %e, "math rendering failed, using plain text"),
        }
    }
    plain_text(&clean)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Wraps input in a marker so tests can see it was typeset.
    struct Bracket;

    impl MathRenderer for Bracket {
        type Error = String;
        fn render(&self, latex: &str, display_mode: bool) -> Result<String, String> {
            Ok(format!("[{}{latex}]", if display_mode { "D:" } else { "" }))
        }
    }

    struct Failing;

    impl MathRenderer for Failing {
        type Error = String;
        fn render(&self, _: &str, _: bool) -> Result<String, String> {
            Err("parse error".into())
        }
    }

    #[test]
    fn no_renderer_is_plain_text() {
        let out = render_math::<Bracket>("$\\mu$ = 5\nso", None, ContentKind::Math);
        assert_eq!(out, "\\mu = 5<br/>so");
    }

    #[test]
    fn math_goes_through_renderer() {
        let out = render_math("E(X) = np", Some(&Bracket), ContentKind::Math);
        assert_eq!(out, "[D:E(X) = np]");
    }

    #[test]
    fn prose_with_notation_goes_through_renderer() {
        let out = render_math("Find \\sigma", Some(&Bracket), ContentKind::Prose);
        assert_eq!(out, "[D:Find \\sigma]");
    }

    #[test]
    fn plain_prose_skips_renderer() {
        let out = render_math("A bag has\n5 balls.", Some(&Bracket), ContentKind::Prose);
        assert_eq!(out, "A bag has<br/>5 balls.");
    }

    #[test]
    fn renderer_failure_falls_back() {
        let out = render_math("\\frac{1}{2}", Some(&Failing), ContentKind::Math);
        assert_eq!(out, "\\frac{1}{2}");
    }

    #[test]
    fn empty_content_renders_empty() {
        assert_eq!(render_math("", Some(&Bracket), ContentKind::Math), "");
    }
}
