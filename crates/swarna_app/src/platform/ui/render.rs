use std::fmt::Write as _;

use swarna_core::{
    AlgorithmMode, AppViewModel, DetailView, EvaluationPanel, ResultCardView, ScoreBar,
    SearchPhase,
};

use super::constants::*;

/// Renders the search page: mode tabs, result page and evaluation panel.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", render_tabs(view.active_mode));
    if !view.query.is_empty() {
        let _ = writeln!(out, "Kueri: {}", view.query);
    }

    match view.phase {
        SearchPhase::Idle => {
            let _ = writeln!(out, "{HINT_IDLE}");
        }
        SearchPhase::Searching => {
            let _ = writeln!(out, "{SEARCHING}");
        }
        SearchPhase::Results | SearchPhase::Empty | SearchPhase::Degraded => {
            render_results(&mut out, view);
        }
    }

    render_evaluation(&mut out, &view.evaluation);
    out
}

fn render_tabs(active: AlgorithmMode) -> String {
    AlgorithmMode::ALL
        .iter()
        .map(|mode| {
            if *mode == active {
                format!("[{}]", mode.label())
            } else {
                format!(" {} ", mode.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_results(out: &mut String, view: &AppViewModel) {
    if view.offline {
        let _ = writeln!(out, "{OFFLINE_NOTE}");
    }
    if view.total_results == 0 {
        let _ = writeln!(out, "{NO_RESULTS}");
        return;
    }

    let _ = writeln!(out, "Menampilkan {} hasil", view.total_results);
    for (position, card) in view.cards.iter().enumerate() {
        render_card(out, position + 1, card);
    }
    let _ = writeln!(
        out,
        "Halaman {} / {}",
        view.page_index + 1,
        view.page_count
    );
}

fn render_card(out: &mut String, position: usize, card: &ResultCardView) {
    let _ = writeln!(
        out,
        "{position}. {} [{}] (id {})",
        card.title, card.category_label, card.id
    );
    if !card.description.is_empty() {
        let _ = writeln!(out, "   {}", truncate(&card.description, DESCRIPTION_PREVIEW));
    }
    for bar in &card.scores {
        let _ = writeln!(out, "   {}", render_bar(bar));
    }
}

fn render_evaluation(out: &mut String, panel: &EvaluationPanel) {
    match panel {
        EvaluationPanel::Hidden => {}
        EvaluationPanel::Loading { query } => {
            let _ = writeln!(out, "Evaluasi \"{query}\": memuat...");
        }
        EvaluationPanel::Failed { query } => {
            let _ = writeln!(out, "Evaluasi \"{query}\": {EVALUATION_FAILED}");
        }
        EvaluationPanel::Loaded {
            query,
            relevant_count,
            rows,
        } => {
            let _ = writeln!(
                out,
                "Evaluasi \"{query}\" ({relevant_count} dokumen relevan)"
            );
            let _ = writeln!(
                out,
                "{:<8} {:>10} {:>10} {:>10} {:>9}",
                "", "Precision", "Recall", "F1", "Waktu(s)"
            );
            for row in rows {
                let _ = writeln!(
                    out,
                    "{:<8} {:>10} {:>10} {:>10} {:>9}",
                    row.label, row.precision, row.recall, row.f1, row.runtime
                );
            }
        }
    }
}

/// Renders the detail page for one record.
pub fn render_detail(detail: &DetailView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", detail.title);
    let _ = writeln!(out, "Kategori: {}", detail.category_label);
    if let Some(region) = &detail.origin_region {
        let _ = writeln!(out, "Asal daerah: {region}");
    }
    if let Some(note) = &detail.usage_note {
        let _ = writeln!(out, "Cara main: {note}");
    }
    if !detail.description.is_empty() {
        let _ = writeln!(out, "{}", detail.description);
    }
    if !detail.image_url.is_empty() {
        let _ = writeln!(out, "Gambar: {}", detail.image_url);
    }
    if let Some(link) = &detail.external_link {
        let _ = writeln!(out, "Selengkapnya: {link}");
    }
    for bar in &detail.scores {
        let _ = writeln!(out, "{:<8} {:.6}  {}", bar.label, bar.raw, meter(bar.percent));
    }
    let _ = writeln!(out, "{BACK_HINT}");
    out
}

fn render_bar(bar: &ScoreBar) -> String {
    format!("{:<8} {} {:>5.1}%", bar.label, meter(bar.percent), bar.percent)
}

fn meter(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push_str("...");
    cut
}
