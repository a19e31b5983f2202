//! Prompt text and response schemas sent to the content service.
//!
//! Schemas use the provider's OpenAPI subset (`OBJECT`, `ARRAY`, `STRING`,
//! `NUMBER`) and mirror the wire types in `training_engine::models`.

use serde_json::{json, Value};

use crate::training_engine::models::StatTopic;

/// Number of practice questions requested per topic.
pub const QUESTIONS_PER_TOPIC: usize = 3;

pub const BLUEPRINT_SYSTEM_INSTRUCTION: &str = "\
You are an expert Cambridge A-Level Statistics EdTech Architect.
Your goal is to generate a procedural question blueprint that follows the Cambridge/UK A-Level syllabus (9709 S1 and S2).

Strictly adhere to these requirements:
1. QUESTION TEMPLATE: Provide a LaTeX question with placeholders like {{mu}}, {{sigma}}, {{n}}, {{context}}.
2. NARRATIVE LIBRARY: Provide 5 distinct professional/educational contexts.
3. SYMPY BACKEND: Python code using 'sympy.stats' for exact results.
4. STACK PRT LOGIC: Maxima code for the Potential Response Tree.

Response MUST be a JSON object with the fields questionTemplate, narrativeLibrary, sympyCode and stackPrtLogic.";

pub const QUESTION_SYSTEM_INSTRUCTION: &str = "\
You are a senior examiner for A-Level Statistics. You provide solutions in pure mathematical \
notation as they would appear in a textbook or mark scheme.";

pub fn blueprint_prompt(topic: StatTopic) -> String {
    format!(
        "Generate a comprehensive procedural question blueprint for the Cambridge A-Level \
         Statistics topic: {topic}.\n\
         Focus on high-rigor exam standards. Ensure SymPy logic is functional."
    )
}

pub fn questions_prompt(topic: StatTopic, objectives: &[&str]) -> String {
    let focus = objectives.join(", ");
    format!(
        "Generate {QUESTIONS_PER_TOPIC} distinct Cambridge A-Level Statistics exam-style questions for: {topic}.\n\
         \n\
         THEMATIC FOCUS: {focus}.\n\
         \n\
         VISUAL CHART RULES:\n\
         - ONLY include 'distParams' if the question is specifically about the Normal, Binomial, or Poisson distribution.\n\
         - For 'Permutations & Combinations' or 'Representation of Data', you MUST OMIT 'distParams' entirely.\n\
         \n\
         EXAM-READY NOTATION:\n\
         - NO computer characters: Never use '*' for times, use '\\times'. Never use '^' for powers, use 'x^{{2}}'. \
         Never use '/' for fractions, use '\\frac{{a}}{{b}}'.\n\
         - NO tech delimiters: Do not use '$' or '$$' in any field.\n\
         - USE official symbols: P(A | B), μ, σ, Σ, and Φ.\n\
         \n\
         Output JSON format strictly."
    )
}

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn number() -> Value {
    json!({ "type": "NUMBER" })
}

pub fn blueprint_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "questionTemplate": string(),
            "narrativeLibrary": { "type": "ARRAY", "items": string() },
            "sympyCode":        string(),
            "stackPrtLogic":    string(),
        },
        "required": ["questionTemplate", "narrativeLibrary", "sympyCode", "stackPrtLogic"]
    })
}

pub fn questions_schema() -> Value {
    let step = json!({
        "type": "OBJECT",
        "properties": {
            "label":       string(),
            "math":        string(),
            "explanation": string(),
        },
        "required": ["label", "math", "explanation"]
    });

    let sub_question = json!({
        "type": "OBJECT",
        "properties": {
            "id":                 string(),
            "part":               { "type": "STRING", "enum": ["a", "b", "c", "d"] },
            "text":               string(),
            "marks":              number(),
            "stepByStepSolution": { "type": "ARRAY", "items": step },
            "finalAnswer":        string(),
        },
        "required": ["id", "part", "text", "marks", "stepByStepSolution", "finalAnswer"]
    });

    let dist_params = json!({
        "type": "OBJECT",
        "properties": {
            "type":       { "type": "STRING", "enum": ["normal", "binomial", "poisson"] },
            "mu":         number(),
            "sigma":      number(),
            "n":          number(),
            "p":          number(),
            "lambda":     number(),
            "threshold":  number(),
            "comparison": { "type": "STRING", "enum": ["greater", "less"] },
        },
        "required": ["type"]
    });

    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id":                    string(),
                "context":               string(),
                "questionHeader":        string(),
                "subQuestions":          { "type": "ARRAY", "items": sub_question },
                "simplifiedExplanation": string(),
                "distParams":            dist_params,
            },
            "required": ["id", "context", "questionHeader", "subQuestions", "simplifiedExplanation"]
        }
    })
}
