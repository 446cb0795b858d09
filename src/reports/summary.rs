//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use crate::pipeline::AssessmentReport;
use crate::scoring::{Band, Gap};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

fn score_color(ratio: f64) -> &'static str {
    if ratio >= 0.75 {
        "green"
    } else if ratio >= 0.5 {
        "yellow"
    } else {
        "red"
    }
}

fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Format a full assessment report for terminal output.
#[must_use]
pub fn format_report_summary(report: &AssessmentReport, colored: bool) -> String {
    let color = |text: &str, name: &str| ansi_color(text, name, colored);
    let mut lines = Vec::new();

    lines.push(color("Readiness Assessment", "bold"));
    lines.push(color(&"─".repeat(40), "dim"));

    let overall = &report.overall;
    let mut overall_line = format!(
        "{}  {}",
        color("Overall:", "cyan"),
        color(&percent(overall.latest), score_color(overall.latest)),
    );
    if let Some(baseline) = overall.baseline {
        let delta = overall.latest - baseline;
        overall_line.push_str(&format!(
            " (baseline {}, {}{:.1}pp)",
            percent(baseline),
            if delta >= 0.0 { "+" } else { "" },
            delta * 100.0
        ));
    }
    lines.push(overall_line);

    lines.push(format!(
        "{}  {} ({} of {} in-scope questions answered)",
        color("Completion:", "cyan"),
        percent(report.completion_ratio),
        report.answered_count,
        report.in_scope_count
    ));
    if report.preview {
        lines.push(color("Preview run: baseline not updated", "dim"));
    } else if report.baseline_captured {
        lines.push(color("Baseline captured on this run", "dim"));
    }
    lines.push(String::new());

    lines.push(color("Themes:", "bold"));
    for theme in &report.themes {
        let mut line = format!(
            "  {:<24} {}",
            theme.theme,
            color(&percent(theme.latest), score_color(theme.latest))
        );
        if let Some(baseline) = theme.baseline {
            line.push_str(&format!(" (baseline {})", percent(baseline)));
        }
        line.push_str(&format!("  [{}/{}]", theme.answered, theme.in_scope));
        lines.push(line);
    }
    lines.push(String::new());

    if report.gaps.is_empty() {
        lines.push(color("No gaps - all in-scope controls fully satisfied", "green"));
    } else {
        lines.push(format!(
            "{} {} open, {} on the roadmap",
            color("Gaps:", "bold"),
            report.gaps.len(),
            report.roadmap.len()
        ));
        lines.push(String::new());
        lines.push(color("Next steps:", "bold"));
        lines.extend(roadmap_lines(&report.roadmap, 5, colored));
    }

    lines.join("\n")
}

/// Format a roadmap on its own for terminal output.
#[must_use]
pub fn format_roadmap_summary(roadmap: &[Gap], colored: bool) -> String {
    let color = |text: &str, name: &str| ansi_color(text, name, colored);
    let mut lines = Vec::new();
    lines.push(color("Remediation Roadmap", "bold"));
    lines.push(color(&"─".repeat(40), "dim"));
    if roadmap.is_empty() {
        lines.push(color("Nothing to do", "green"));
    } else {
        lines.extend(roadmap_lines(roadmap, roadmap.len(), colored));
    }
    lines.join("\n")
}

fn roadmap_lines(roadmap: &[Gap], limit: usize, colored: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for gap in roadmap.iter().take(limit) {
        let band_color = match gap.band {
            Band::QuickWin => "red",
            Band::Medium => "yellow",
            Band::LongTerm => "dim",
        };
        lines.push(format!(
            "  {} {} - {} ({}, {:.1}-{:.1} wks)",
            ansi_color(&format!("[{}]", gap.band.name()), band_color, colored),
            gap.id,
            gap.title,
            gap.severity_label.name(),
            gap.effort.time.min,
            gap.effort.time.max
        ));
        if !gap.action.is_empty() {
            lines.push(format!("      {}", ansi_color(&gap.action, "dim", colored)));
        }
    }
    if roadmap.len() > limit {
        lines.push(ansi_color(
            &format!("  ... and {} more", roadmap.len() - limit),
            "dim",
            colored,
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::MemoryBaselineStore;
    use crate::model::{builtin_catalogue, OrganisationProfile};
    use crate::pipeline::run_assessment;
    use crate::scoring::EvaluateOptions;

    fn report() -> AssessmentReport {
        let store = MemoryBaselineStore::default();
        run_assessment(
            &builtin_catalogue(),
            &[],
            &OrganisationProfile::default(),
            &EvaluateOptions::default(),
            &store,
            true,
        )
        .unwrap()
    }

    #[test]
    fn test_summary_without_color_has_no_escapes() {
        let output = format_report_summary(&report(), false);
        assert!(!output.contains("\x1b["));
        assert!(output.contains("Overall:"));
        assert!(output.contains("Completion:"));
        assert!(output.contains("Themes:"));
    }

    #[test]
    fn test_summary_with_color_has_escapes() {
        let output = format_report_summary(&report(), true);
        assert!(output.contains("\x1b["));
    }

    #[test]
    fn test_roadmap_summary_lists_every_gap() {
        let report = report();
        let output = format_roadmap_summary(&report.roadmap, false);
        for gap in &report.roadmap {
            assert!(output.contains(&gap.id), "missing {}", gap.id);
        }
    }

    #[test]
    fn test_empty_roadmap() {
        let output = format_roadmap_summary(&[], false);
        assert!(output.contains("Nothing to do"));
    }
}
