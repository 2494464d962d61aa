//! Shared fixtures for integration tests and benchmarks

#![allow(dead_code)]

use caption_core::{Composition, FontType, Group, Line, Transcript, Word};
use caption_renderer::RenderContext;
use std::sync::Arc;

pub use caption_renderer::metrics::test_support::FixedAdvanceMeasurer;

/// Route library logs to the test harness, `RUST_LOG=debug` to see them
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Context over a 1080x1920 portrait video at 30 fps
pub fn context(duration_in_frames: u32) -> RenderContext {
    init_logging();
    RenderContext::with_measurer(
        Composition::new(1080, 1920, 30.0, duration_in_frames),
        Arc::new(FixedAdvanceMeasurer),
    )
}

/// Line whose words are spread evenly from `start`, `step` seconds apart
pub fn line(id: &str, font_type: FontType, start: f64, step: f64, words: &[&str]) -> Line {
    let end = start + step * words.len() as f64;
    Line {
        id: id.to_string(),
        start_time: start,
        end_time: end,
        font_type,
        words: words
            .iter()
            .enumerate()
            .map(|(i, text)| Word {
                id: format!("{id}-{i}"),
                text: (*text).to_string(),
                start_time: start + step * i as f64,
                end_time: start + step * (i + 1) as f64,
            })
            .collect(),
    }
}

/// Group spanning `start..end`
pub fn group(id: &str, start: f64, end: f64, lines: Vec<Line>) -> Group {
    Group {
        id: id.to_string(),
        start_time: start,
        end_time: end,
        lines,
    }
}

/// A few screens of captions with mixed slots and an empty group
pub fn sample_transcript() -> Transcript {
    Transcript::new(vec![
        group(
            "intro",
            0.0,
            2.0,
            vec![
                line("a", FontType::Bold, 0.0, 0.3, &["WELCOME", "BACK"]),
                line("b", FontType::Thin, 0.6, 0.3, &["to", "the", "show"]),
            ],
        ),
        group("pause", 2.5, 2.8, Vec::new()),
        group(
            "body",
            3.0,
            7.5,
            vec![
                line("c", FontType::Normal, 3.0, 0.25, &["today", "we", "talk", "about"]),
                line("d", FontType::Bold, 4.0, 0.4, &["RUST"]),
                line("e", FontType::Italic, 4.5, 0.2, &["and", "why", "it", "matters", "so", "much"]),
            ],
        ),
    ])
}
