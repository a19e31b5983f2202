//! Live generation round trip against the Gemini API.
//!
//! Run with:
//!   GEMINI_API_KEY=... cargo run --example generate -- "S2: The Poisson Distribution"
//!
//! Optional environment:
//!   GEMINI_ENDPOINT, GEMINI_BLUEPRINT_MODEL, GEMINI_QUESTION_MODEL,
//!   GEMINI_TIMEOUT_MS, RUST_LOG (defaults to `info`)
//!
//! Mastery is kept in `./statarch_mastery.json`, so repeated runs accumulate.

use std::collections::BTreeMap;

use stat_drill_gen::{
    render_math, training_engine::template::instantiate, ContentKind, ErrorKind, GeminiClient,
    JsonFileStore, MasteryTracker, MathRenderer, StatTopic, StudySession,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Terminal output has no typesetter.
struct NoRenderer;

impl MathRenderer for NoRenderer {
    type Error = std::convert::Infallible;
    fn render(&self, latex: &str, _: bool) -> Result<String, Self::Error> {
        Ok(latex.to_string())
    }
}

fn text(content: &str) -> String {
    render_math::<NoRenderer>(content, None, ContentKind::Prose).replace("<br/>", "\n      ")
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let topic = match std::env::args().nth(1) {
        Some(id) => match StatTopic::from_id(&id) {
            Some(topic) => topic,
            None => {
                error!(%id, "unknown topic id");
                for t in StatTopic::ALL {
                    eprintln!("  {t}");
                }
                std::process::exit(2);
            }
        },
        None => StatTopic::NormalDistribution,
    };

    let client = match GeminiClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "could not build content client");
            std::process::exit(1);
        }
    };
    let tracker = MasteryTracker::load(JsonFileStore::in_dir("."));
    let session = StudySession::new(client, tracker);

    info!(%topic, mastery = session.mastery(topic), "requesting blueprint and questions");
    let generated = match session.generate(topic).await {
        Ok(generated) => generated,
        Err(e) => {
            let hint = match e.kind() {
                ErrorKind::MalformedGenerationPayload => "the service answered in an unexpected shape",
                ErrorKind::Superseded                 => "a newer request replaced this one",
                ErrorKind::GenerationFailed           => "check GEMINI_API_KEY and connectivity",
            };
            error!(error = %e, hint, "generation failed");
            std::process::exit(1);
        }
    };

    println!();
    println!("══ {} ══  request {}  mastery {}  ({})",
        topic, generated.tag.id, generated.mastery, session.mastery_status(topic));

    if let Some(blueprint) = session.blueprint() {
        let question = instantiate(&blueprint, &BTreeMap::new(), None);
        println!();
        println!("  BLUEPRINT");
        println!("    {}", text(&question.text));
        if !question.unresolved.is_empty() {
            println!("    placeholders: {}", question.unresolved.join(", "));
        }
    }

    for q in session.questions() {
        println!();
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("  [{}] {}", q.id, q.context);
        println!("    {}", text(&q.question_header));
        for sub in &q.sub_questions {
            println!("    ({}) {}  [{} marks]", sub.part, text(&sub.text), sub.marks);
            for step in &sub.step_by_step_solution {
                println!("        {}: {}", step.label, text(&step.math));
            }
            println!("        Answer: {}", text(&sub.final_answer));
        }
        if let Some(series) = session.chart(&q.id) {
            let header = series.spec.map(|s| s.to_string()).unwrap_or_default();
            let region = series.region.map(|r| format!("  {r} ≈ {:.4}", series.highlighted_total()));
            println!("    Chart: {header}, {} points{}", series.points.len(), region.unwrap_or_default());
        }
    }
    println!();
}
