//! Shared output formatting for audit reports.

use anyhow::Result;
use ros_audit_core::{AuditReport, Finding, FindingKind, Severity};
use std::io::IsTerminal;

use crate::OutputFormat;

const SEPARATOR_WIDTH: usize = 30;

/// Print an audit report in the specified format.
pub fn print(report: &AuditReport, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_text(report, std::io::stdout().is_terminal()),
        OutputFormat::Json => render_json(report)?,
        OutputFormat::Compact => render_compact(report),
    };
    println!("{rendered}");
    Ok(())
}

/// ANSI escapes, or nothing when output is not a terminal.
struct Palette {
    enabled: bool,
}

impl Palette {
    const CYAN: &'static str = "\x1b[36m";
    const RED: &'static str = "\x1b[1;31m";
    const YELLOW: &'static str = "\x1b[1;33m";
    const GREEN: &'static str = "\x1b[1;32m";
    const WHITE: &'static str = "\x1b[1;37m";
    const RESET: &'static str = "\x1b[0m";

    fn paint(&self, color: &str, text: &str) -> String {
        if self.enabled {
            format!("{color}{text}{}", Self::RESET)
        } else {
            text.to_string()
        }
    }
}

/// Sectioned report: a dashed rule and `[+] <Section>:` heading per section.
pub fn render_text(report: &AuditReport, color: bool) -> String {
    let palette = Palette { enabled: color };
    let mut out = Vec::new();

    for section in report.sections() {
        out.push(palette.paint(Palette::CYAN, &"-".repeat(SEPARATOR_WIDTH)));
        out.push(palette.paint(Palette::CYAN, &format!("[+] {}:", section.label)));
        for finding in section.findings {
            push_finding(&mut out, &palette, finding);
        }
    }

    let (warnings, infos, oks) = report.count_by_severity();
    let summary_color = if warnings > 0 {
        Palette::YELLOW
    } else {
        Palette::GREEN
    };
    out.push(palette.paint(
        summary_color,
        &format!(
            "Found {warnings} warning(s), {infos} info(s), {oks} ok in {} rule(s)",
            report.rules_evaluated
        ),
    ));
    out.join("\n")
}

fn push_finding(out: &mut Vec<String>, palette: &Palette, finding: &Finding) {
    let labeled = |label: &str, label_color: &str, text: &str, text_color: &str| {
        format!(
            "{} {}",
            palette.paint(label_color, label),
            palette.paint(text_color, text)
        )
    };

    match (finding.severity, finding.kind) {
        (Severity::Warning, _) => out.extend(
            finding
                .lines()
                .map(|line| labeled("[!] Warning:", Palette::RED, line, Palette::YELLOW)),
        ),
        (_, FindingKind::Advice) => out.push(labeled(
            "[!] Recommendation:",
            Palette::GREEN,
            &finding.message,
            Palette::GREEN,
        )),
        (severity, _) => {
            let color = if severity == Severity::Ok {
                Palette::GREEN
            } else {
                Palette::WHITE
            };
            out.extend(
                finding
                    .lines()
                    .map(|line| palette.paint(color, &format!("[*] {line}"))),
            );
        }
    }

    if let Some(impact) = &finding.impact {
        out.push(labeled("[*] Impact:", Palette::WHITE, impact, Palette::YELLOW));
    }
    if let Some(recommendation) = &finding.recommendation {
        out.push(labeled(
            "[*] Recommendation:",
            Palette::GREEN,
            recommendation,
            Palette::GREEN,
        ));
    }
}

/// Pretty-printed JSON of the whole report.
pub fn render_json(report: &AuditReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// One line per finding: `<severity> [<code>] <section>: <message>`.
pub fn render_compact(report: &AuditReport) -> String {
    report
        .findings
        .iter()
        .map(|f| {
            let mut line = format!("{} [{}] {}: {}", f.severity, f.code, f.section, f.message);
            for detail in &f.details {
                line.push_str("; ");
                line.push_str(detail);
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
