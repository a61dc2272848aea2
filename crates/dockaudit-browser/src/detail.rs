//! Builds the right-pane content for one finding: header and metadata rows,
//! the wrapped description, and each fix with its formatted instructions.

use crate::highlight::highlight_config_line;
use crate::text::{truncate, visible_len, wrap};
use crate::theme;
use dockaudit_core::Finding;

const FENCE: &str = "```";
const SNIPPET_INDENT: &str = "  ";

/// Flatten a block of remediation text into display lines. Fence-marker
/// lines toggle snippet mode and are discarded; snippet and indented lines
/// are highlighted and truncated verbatim (configuration layout must
/// survive), prose lines are word-wrapped, and blank lines stay as single
/// empty lines. The output length depends on content and width.
pub fn format_instructions(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    let mut in_snippet = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with(FENCE) {
            in_snippet = !in_snippet;
            continue;
        }
        if trimmed.is_empty() {
            out.push(String::new());
            continue;
        }

        let indented = line.starts_with(' ') || line.starts_with('\t');
        if in_snippet || indented {
            out.push(fit_config_line(line, width));
        } else {
            out.extend(wrap(line, width));
        }
    }

    out
}

fn fit_config_line(line: &str, width: usize) -> String {
    let styled = highlight_config_line(line);
    if visible_len(&styled) <= width {
        return styled;
    }
    format!("{}{}", truncate(&styled, width), theme::RESET)
}

/// Assemble the full detail line sequence for one finding at the given pane
/// width. Rebuilt on every render; never cached across findings.
pub fn build_detail(finding: &Finding, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    lines.push(format!(
        "{}{} {}{}{}{}",
        theme::severity_style(finding.severity),
        theme::severity_icon(finding.severity),
        theme::RESET,
        theme::BOLD,
        finding.title,
        theme::RESET,
    ));
    lines.push(metadata_row("ID", &finding.id));
    lines.push(metadata_row("Category", &finding.category));
    if let Some(location) = &finding.location {
        let shown = match finding.line {
            Some(line) => format!("{location}:{line}"),
            None => location.clone(),
        };
        lines.push(metadata_row("Location", &shown));
    }

    lines.push(String::new());
    lines.push(format!("{}Description{}", theme::HEADER, theme::RESET));
    lines.extend(wrap(&finding.message, width));

    for fix in &finding.fixes {
        lines.push(String::new());
        let tagged = format!(
            "{}[{}]{} {}",
            theme::fix_kind_style(fix.kind),
            fix.kind,
            theme::RESET,
            fix.description,
        );
        lines.extend(wrap(&tagged, width));

        if let Some(instructions) = &fix.instructions {
            lines.push(String::new());
            let inner = width.saturating_sub(SNIPPET_INDENT.len()).max(1);
            for row in format_instructions(instructions, inner) {
                if row.is_empty() {
                    lines.push(row);
                } else {
                    lines.push(format!("{SNIPPET_INDENT}{row}"));
                }
            }
        }
    }

    lines
}

fn metadata_row(label: &str, value: &str) -> String {
    format!("{}{label}:{} {value}", theme::MUTED, theme::RESET)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockaudit_core::{Fix, FixKind, Severity};

    fn sample_finding() -> Finding {
        Finding {
            id: "DA2044".to_string(),
            severity: Severity::Warning,
            title: "Container runs without memory limit".to_string(),
            message: "Set a memory limit so a misbehaving container cannot \
                      starve the host of memory."
                .to_string(),
            category: "compose".to_string(),
            location: Some("docker-compose.yml".to_string()),
            line: Some(23),
            fixes: vec![Fix {
                description: "Add a deploy.resources limit".to_string(),
                kind: FixKind::Manual,
                instructions: Some(
                    "Add the limit under the service:\n\
                     ```\n\
                     deploy:\n\
                     \x20 resources:\n\
                     \x20   limits:\n\
                     ```\n\
                     Then restart the stack."
                        .to_string(),
                ),
            }],
        }
    }

    #[test]
    fn fenced_lines_stay_verbatim_and_prose_wraps() {
        let text = "```\nmem_limit: 512m\nrestart: always\ncpus: 0.5\n```\n\
                    This sentence is plain prose and should be wrapped at the pane width.";
        let lines = format_instructions(text, 20);

        // Three snippet lines, unwrapped, each within the pane width.
        assert!(lines[0].contains("mem_limit"));
        assert!(lines[1].contains("restart"));
        assert!(lines[2].contains("cpus"));
        for line in &lines[..3] {
            assert!(visible_len(line) <= 20);
        }

        // Prose follows and wraps into several short lines.
        assert!(lines.len() > 4);
        for line in &lines[3..] {
            assert!(visible_len(line) <= 20);
        }
    }

    #[test]
    fn fence_markers_are_discarded() {
        let lines = format_instructions("```\nkey: value\n```", 40);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("key"));
    }

    #[test]
    fn indented_lines_count_as_snippets_outside_fences() {
        let text = "Use this override:\n  replicas: 3";
        let lines = format_instructions(text, 40);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains(theme::CFG_KEY));
    }

    #[test]
    fn blank_lines_survive_in_both_modes() {
        let lines = format_instructions("a\n\n```\nk: v\n\nk2: v2\n```", 40);
        assert_eq!(lines[1], "");
        assert_eq!(lines[3], "");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn overlong_snippet_lines_truncate_instead_of_wrapping() {
        let text = format!("```\nvolumes: {}\n```", "a".repeat(60));
        let lines = format_instructions(&text, 20);
        assert_eq!(lines.len(), 1);
        assert_eq!(visible_len(&lines[0]), 20);
        assert!(lines[0].ends_with(theme::RESET));
    }

    #[test]
    fn detail_sequence_follows_the_pane_layout() {
        let finding = sample_finding();
        let lines = build_detail(&finding, 60);

        assert!(lines[0].contains(&finding.title));
        assert!(lines[1].contains("DA2044"));
        assert!(lines[2].contains("compose"));
        assert!(lines[3].contains("docker-compose.yml:23"));
        assert_eq!(lines[4], "");
        assert!(lines[5].contains("Description"));

        let fix_row = lines
            .iter()
            .position(|line| line.contains("[manual]"))
            .expect("fix tag row");
        assert!(lines[fix_row].contains("Add a deploy.resources limit"));
        // Blank separator, then two-column indented instructions.
        assert_eq!(lines[fix_row + 1], "");
        assert!(lines[fix_row + 2].starts_with("  "));
    }

    #[test]
    fn location_row_is_omitted_without_a_location() {
        let mut finding = sample_finding();
        finding.location = None;
        finding.line = None;
        let lines = build_detail(&finding, 60);
        assert!(!lines.iter().any(|line| line.contains("Location")));
        assert_eq!(lines[3], "");
    }

    #[test]
    fn wrapped_and_snippet_rows_stay_within_the_pane_width() {
        let finding = sample_finding();
        let lines = build_detail(&finding, 30);
        let description_start = 6;
        for line in &lines[description_start..] {
            assert!(visible_len(line) <= 30, "overwide row: {line:?}");
        }
    }
}
