//! The syllabus table: every topic, what it covers, and the prompt the
//! generation service would receive for it.
//!
//! Run with:
//!   cargo run --example syllabus
//!   cargo run --example syllabus -- S2      (one paper only)
//!   cargo run --example syllabus -- json    (machine-readable table)
//!
//! Each block shows:
//!   • Icon, id and description
//!   • The syllabus objectives that steer question generation
//!   • The thematic focus line of the question prompt

use stat_drill_gen::{
    content_service::prompts::questions_prompt,
    training_engine::topics::{all_topics, topics_for},
    Paper, PaperFilter, TopicConfig,
};

// ── display helpers ───────────────────────────────────────────────────────────

fn divider(ch: char, n: usize) { println!("{}", ch.to_string().repeat(n)); }

/// Word-wrap `text` at ~60 columns with a four-space indent.
fn print_wrapped(text: &str) {
    let mut line = String::from("    ");
    for word in text.split_whitespace() {
        if line.len() + word.len() + 1 > 64 {
            println!("{line}");
            line = format!("    {word}");
        } else {
            if line.len() > 4 { line.push(' '); }
            line.push_str(word);
        }
    }
    if !line.trim().is_empty() { println!("{line}"); }
}

fn print_topic(config: &TopicConfig) {
    divider('═', 66);
    println!("  {}  {}   ({})", config.icon, config.id, config.paper);
    divider('─', 66);

    println!();
    println!("  WHAT THIS COVERS");
    print_wrapped(config.description);

    println!();
    println!("  OBJECTIVES");
    for objective in config.syllabus_objectives {
        println!("    • {objective}");
    }

    println!();
    println!("  PROMPT FOCUS");
    let prompt = questions_prompt(config.id, config.syllabus_objectives);
    if let Some(focus) = prompt.lines().find(|l| l.starts_with("THEMATIC FOCUS")) {
        print_wrapped(focus);
    }
    println!();
}

fn main() {
    let arg = std::env::args().nth(1).unwrap_or_default();

    if arg.eq_ignore_ascii_case("json") {
        let table: Vec<&TopicConfig> = all_topics().collect();
        match serde_json::to_string_pretty(&table) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("failed to serialize syllabus: {e}"),
        }
        return;
    }

    let filter = match arg.to_ascii_uppercase().as_str() {
        "S1" => PaperFilter::Only(Paper::S1),
        "S2" => PaperFilter::Only(Paper::S2),
        _    => PaperFilter::All,
    };

    println!();
    for config in topics_for(filter) {
        print_topic(config);
    }
}
