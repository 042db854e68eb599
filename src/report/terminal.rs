use owo_colors::OwoColorize;

use crate::report::annotation::{InsightReport, Severity, Verdict};

/// Render a report to the terminal with colors
pub fn render(report: &InsightReport) {
    println!();
    println!(
        "{}  remora v{} — {} ({} annotations)",
        "🔍".bold(),
        report.version,
        report.title,
        report.annotations.len(),
    );
    println!();

    if report.annotations.is_empty() {
        println!("  {}  No findings to report!", "✅".bold());
        println!();
        return;
    }

    for annotation in &report.annotations {
        let severity_display = format!(" {} ", annotation.severity);
        let severity_colored = match annotation.severity {
            Severity::Critical => severity_display.on_red().white().bold().to_string(),
            Severity::High => severity_display.on_yellow().black().bold().to_string(),
            Severity::Medium => severity_display.on_blue().white().bold().to_string(),
            Severity::Low => severity_display.on_white().black().to_string(),
        };

        println!(
            "  {}  {}:{}",
            severity_colored,
            annotation.path.dimmed(),
            annotation.line.to_string().dimmed(),
        );
        println!("           {}", annotation.summary.bold());
        println!("           {}", annotation.rule_id.dimmed());
        println!();
    }

    // Summary block
    println!("  {}", "─".repeat(50).dimmed());
    for line in report.summary.lines() {
        println!("  {line}");
    }
    println!();

    let verdict_colored = match report.verdict {
        Verdict::Passed => format!(" {} ", report.verdict).on_green().white().bold().to_string(),
        Verdict::Failed => format!(" {} ", report.verdict).on_red().white().bold().to_string(),
    };
    println!("  {verdict_colored}");
    println!();
}
