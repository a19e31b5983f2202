//! Blueprint instantiation: fill `{{name}}` placeholders in a question
//! template.
//!
//! Only identifier-shaped names (`[A-Za-z_][A-Za-z0-9_]*`) count as
//! placeholders, so LaTeX groups such as `x^{{2}}` pass through untouched.
//! `{{context}}` falls back to a narrative drawn from the blueprint's library
//! when the caller does not supply one.

use std::collections::BTreeMap;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::training_engine::models::BlueprintOutput;

pub const CONTEXT_PLACEHOLDER: &str = "context";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstantiatedQuestion {
    pub text: String,
    /// Narrative used for `{{context}}`, if any.
    pub context: Option<String>,
    /// Placeholders with no value, left verbatim in `text`.
    pub unresolved: Vec<String>,
}

/// A `{{name}}` occurrence: byte range of the whole token and the name.
struct Token<'a> {
    start: usize,
    end: usize,
    name: &'a str,
}

fn is_placeholder_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn tokens(template: &str) -> Vec<Token<'_>> {
    let mut found = Vec::new();
    let mut cursor = 0;
    while let Some(open) = template[cursor..].find("{{") {
        let start = cursor + open;
        let Some(close) = template[start + 2..].find("}}") else {
            break;
        };
        let end = start + 2 + close + 2;
        let name = template[start + 2..end - 2].trim();
        if is_placeholder_name(name) {
            found.push(Token { start, end, name });
            cursor = end;
        } else {
            cursor = start + 1;
        }
    }
    found
}

/// Distinct placeholder names in order of first appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for token in tokens(template) {
        if !names.iter().any(|n| n == token.name) {
            names.push(token.name.to_string());
        }
    }
    names
}

/// Fill the blueprint's template from `values`.
///
/// `seed` fixes the narrative choice for `{{context}}`; `None` draws from
/// entropy.
pub fn instantiate(
    blueprint: &BlueprintOutput,
    values: &BTreeMap<String, String>,
    seed: Option<u64>,
) -> InstantiatedQuestion {
    let template = blueprint.question_template.as_str();
    let mut rng: StdRng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };

    let context = values.get(CONTEXT_PLACEHOLDER).cloned().or_else(|| {
        blueprint.narrative_library.choose(&mut rng).cloned()
    });

    let mut text = String::with_capacity(template.len());
    let mut unresolved: Vec<String> = Vec::new();
    let mut last = 0;
    for token in tokens(template) {
        text.push_str(&template[last..token.start]);
        let value = if token.name == CONTEXT_PLACEHOLDER {
            context.as_deref()
        } else {
            values.get(token.name).map(String::as_str)
        };
        match value {
            Some(v) => text.push_str(v),
            None => {
                text.push_str(&template[token.start..token.end]);
                if !unresolved.iter().any(|n| n == token.name) {
                    unresolved.push(token.name.to_string());
                }
            }
        }
        last = token.end;
    }
    text.push_str(&template[last..]);

    InstantiatedQuestion { text, context, unresolved }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blueprint(template: &str) -> BlueprintOutput {
        BlueprintOutput {
            question_template: template.into(),
            narrative_library: vec![
                "A factory tests light bulbs.".into(),
                "A clinic records waiting times.".into(),
                "A farmer weighs apples.".into(),
            ],
            sympy_code: String::new(),
            stack_prt_logic: String::new(),
        }
    }

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn lists_placeholders_once_in_order() {
        let t = "{{context}} X ~ N({{mu}}, {{ sigma }}^2). Find P(X > {{mu}}).";
        assert_eq!(placeholders(t), vec!["context", "mu", "sigma"]);
    }

    #[test]
    fn latex_double_braces_are_not_placeholders() {
        assert!(placeholders(r"\frac{{1}}{2} + x^{{2}}").is_empty());
        assert!(placeholders("{{ unterminated").is_empty());
    }

    #[test]
    fn fills_values_and_reports_missing() {
        let bp = blueprint("X ~ B({{n}}, {{p}}). Find P(X = {{k}}).");
        let q = instantiate(&bp, &values(&[("n", "10"), ("p", "0.3")]), Some(1));
        assert_eq!(q.text, "X ~ B(10, 0.3). Find P(X = {{k}}).");
        assert_eq!(q.unresolved, vec!["k"]);
    }

    #[test]
    fn context_comes_from_library_deterministically() {
        let bp = blueprint("{{context}} Find the mean.");
        let a = instantiate(&bp, &BTreeMap::new(), Some(42));
        let b = instantiate(&bp, &BTreeMap::new(), Some(42));
        assert_eq!(a, b);
        let ctx = a.context.unwrap();
        assert!(bp.narrative_library.contains(&ctx));
        assert!(a.text.starts_with(&ctx));
        assert!(a.unresolved.is_empty());
    }

    #[test]
    fn explicit_context_wins() {
        let bp = blueprint("{{context}}!");
        let q = instantiate(&bp, &values(&[("context", "Given")]), None);
        assert_eq!(q.text, "Given!");
    }

    #[test]
    fn empty_library_leaves_context_unresolved() {
        let mut bp = blueprint("{{context}} Find E(X).");
        bp.narrative_library.clear();
        let q = instantiate(&bp, &BTreeMap::new(), Some(3));
        assert_eq!(q.context, None);
        assert_eq!(q.unresolved, vec!["context"]);
    }
}
