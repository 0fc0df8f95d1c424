//! Text rendering of analysis results for the terminal

use colored::*;

use crate::domain::analysis::{emotion_emoji, MediaPreview, RecommendedItem};
use crate::domain::view::{final_banner, visible_rows, ModalityRow, ResultsView};

/// Width of a confidence bar in cells
const BAR_WIDTH: usize = 20;

/// Uppercase the first character (`text` -> `Text`)
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `[██████░░░░] 75%` style bar for a 0-100 percentage
pub fn percent_bar(percent: u8) -> String {
    let percent = percent.min(100) as usize;
    let filled = (percent * BAR_WIDTH + 50) / 100;
    let empty = BAR_WIDTH - filled;

    format!(
        "[{}{}] {:>3}%",
        "█".repeat(filled).cyan(),
        "░".repeat(empty),
        percent
    )
}

pub fn banner_line(view: &ResultsView) -> String {
    let banner = final_banner(&view.outcome.fusion);
    format!(
        "{} {}  {}",
        emotion_emoji(&view.outcome.fusion.final_emotion),
        banner.emotion.bold(),
        percent_bar(banner.percent)
    )
}

pub fn row_line(row: &ModalityRow) -> String {
    format!(
        "  {} {:<6} {:<10} {}",
        row.emoji,
        capitalize(row.label),
        row.emotion,
        percent_bar(row.percent)
    )
}

/// One-line card: `1. Title (1994) · Drama · ★ 9.3`
pub fn card_line(number: usize, item: &RecommendedItem) -> String {
    let mut line = format!("{:>2}. {}", number, item.title.bold());
    if !item.year.is_empty() {
        line.push_str(&format!(" ({})", item.year));
    }
    if !item.genre.is_empty() {
        line.push_str(&format!(" · {}", item.genre));
    }
    if !item.rating.is_empty() {
        line.push_str(&format!(" · {} {}", "★".yellow(), item.rating));
    }
    line
}

/// Detail view of a single recommendation
pub fn detail_lines(item: &RecommendedItem) -> Vec<String> {
    let mut lines = vec![item.title.bold().to_string()];

    let mut push = |label: &str, value: String| {
        if !value.is_empty() {
            lines.push(format!("  {:<8} {}", format!("{}:", label).dimmed(), value));
        }
    };

    push("Year", item.year.to_string());
    push("Genre", item.genre.clone());
    push("Rating", item.rating.to_string());
    push("Poster", item.thumbnail_url.clone());
    if let Some(description) = &item.description {
        push("About", description.clone());
    }

    lines
}

/// The full results block: banner, individual rows, numbered cards
pub fn results_lines(view: &ResultsView) -> Vec<String> {
    let mut lines = vec![banner_line(view), String::new()];

    lines.push("Individual analysis".underline().to_string());
    lines.extend(
        visible_rows(&view.outcome.fusion, view.provided)
            .iter()
            .map(row_line),
    );

    lines.push(String::new());
    lines.push("Recommended for you".underline().to_string());
    lines.extend(
        view.outcome
            .recommendations
            .iter()
            .enumerate()
            .map(|(i, item)| card_line(i + 1, item)),
    );

    lines
}

pub fn preview_line(preview: &MediaPreview) -> String {
    format!("{} {} ({})", preview.kind.as_str(), preview.name, preview.size)
}
