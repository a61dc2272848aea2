//! Render engine: turns the current navigation state into one full-screen,
//! escape-annotated frame string and writes it in a single pass. Every frame
//! is rebuilt from scratch; rows are padded to the full terminal width so a
//! repaint overwrites the previous frame without diffing.

use crate::detail::build_detail;
use crate::state::{App, Screen};
use crate::text::{center, pad, truncate, visible_len};
use crate::theme;
use anyhow::Result;
use crossterm::{cursor, queue};
use std::io::Write;

const DIVIDER: &str = " │ ";
const DIVIDER_WIDTH: usize = 3;
const CHROME_ROWS: usize = 4;

const MAIN_HINTS: &str = "↑/↓ move · enter/→ open · q quit";
const RESULTS_HINTS: &str = "↑/↓ select · shift+↑/↓ scroll · pgup/pgdn page · c copy · ←/esc back";

/// Compose and write one frame. The single externally visible effect is one
/// buffered write followed by a flush.
pub fn render(app: &mut App, out: &mut impl Write) -> Result<()> {
    let (width, height) = crossterm::terminal::size()?;
    let frame = compose_frame(app, width as usize, height as usize);
    queue!(out, cursor::MoveTo(0, 0))?;
    out.write_all(frame.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Build the full frame for the given terminal dimensions. Public so the
/// layout can be exercised without a terminal. Dimensions clamp to 1 so
/// truncation and padding never see invalid bounds.
pub fn compose_frame(app: &mut App, width: usize, height: usize) -> String {
    let width = width.max(1);
    let height = height.max(1);
    let viewport = height.saturating_sub(CHROME_ROWS).max(1);

    let left_width = (width / 3)
        .clamp(20, 40)
        .min(width.saturating_sub(10))
        .max(1);
    let right_width = width
        .saturating_sub(left_width + DIVIDER_WIDTH)
        .max(1);

    if app.screen == Screen::Results {
        app.ensure_result_visible(viewport);
    }

    let left = left_rows(app, viewport, left_width);
    let right = right_rows(app, viewport, right_width);

    let mut rows = Vec::with_capacity(height);
    rows.push(fit(&center(&banner(app), width), width));
    rows.push(rule(width));
    for i in 0..viewport {
        let left_cell = left.get(i).map(String::as_str).unwrap_or("");
        let right_cell = right.get(i).map(String::as_str).unwrap_or("");
        let row = format!(
            "{}{}{}{}{}",
            fit(left_cell, left_width),
            theme::RULE,
            DIVIDER,
            theme::RESET,
            fit(right_cell, right_width),
        );
        rows.push(fit(&row, width));
    }
    rows.push(rule(width));
    rows.push(fit(&footer(app), width));

    rows.truncate(height);
    rows.join("\r\n")
}

fn banner(app: &App) -> String {
    format!(
        "{}dockaudit{} {}·{} {} {}checks:{} {}",
        theme::HEADER,
        theme::RESET,
        theme::MUTED,
        theme::RESET,
        app.scan_dir,
        theme::MUTED,
        theme::RESET,
        app.scope,
    )
}

fn rule(width: usize) -> String {
    format!("{}{}{}", theme::RULE, "─".repeat(width), theme::RESET)
}

fn footer(app: &App) -> String {
    if let Some(message) = &app.flash_message {
        return format!("{}{message}{}", theme::BOLD, theme::RESET);
    }
    let hints = match app.screen {
        Screen::Main => MAIN_HINTS,
        Screen::Results => RESULTS_HINTS,
    };
    format!("{}{hints}{}", theme::MUTED, theme::RESET)
}

fn left_rows(app: &App, viewport: usize, width: usize) -> Vec<String> {
    match app.screen {
        Screen::Main => app
            .categories
            .iter()
            .enumerate()
            .take(viewport)
            .map(|(idx, category)| {
                let label = format!(
                    "{} {} ({})",
                    theme::severity_icon(category.severity),
                    category.severity,
                    category.len(),
                );
                if idx == app.category_index {
                    selected_cell(&label, width)
                } else {
                    format!(
                        " {}{}{} {} ({})",
                        theme::severity_style(category.severity),
                        theme::severity_icon(category.severity),
                        theme::RESET,
                        category.severity,
                        category.len(),
                    )
                }
            })
            .collect(),
        Screen::Results => {
            let Some(category) = app.categories.get(app.category_index) else {
                return Vec::new();
            };
            (app.result_scroll..category.len())
                .take(viewport)
                .map(|position| {
                    let title = app
                        .finding_in_category(category, position)
                        .map(|finding| finding.title.as_str())
                        .unwrap_or("");
                    if position == app.result_index {
                        selected_cell(title, width)
                    } else {
                        format!(" {title}")
                    }
                })
                .collect()
        }
    }
}

fn right_rows(app: &mut App, viewport: usize, width: usize) -> Vec<String> {
    match app.screen {
        Screen::Main => {
            // Live preview of the selected category: title lines only.
            let Some(category) = app.categories.get(app.category_index) else {
                return Vec::new();
            };
            (0..category.len())
                .take(viewport)
                .map(|position| {
                    let finding = app.finding_in_category(category, position);
                    match finding {
                        Some(finding) => format!(
                            "{}{}{} {}",
                            theme::severity_style(finding.severity),
                            theme::severity_icon(finding.severity),
                            theme::RESET,
                            finding.title,
                        ),
                        None => String::new(),
                    }
                })
                .collect()
        }
        Screen::Results => {
            let Some(finding) = app.selected_finding() else {
                return Vec::new();
            };
            let detail = build_detail(finding, width);
            app.clamp_detail_scroll(detail.len(), viewport);
            detail
                .into_iter()
                .skip(app.detail_scroll)
                .take(viewport)
                .collect()
        }
    }
}

fn selected_cell(label: &str, width: usize) -> String {
    format!(
        "{}{}{}",
        theme::SELECTED,
        pad(&format!(" {label}"), width),
        theme::RESET,
    )
}

/// Fit content to exactly `width` visible columns: pad when short, truncate
/// (with a trailing reset for any open styling) when long.
fn fit(s: &str, width: usize) -> String {
    if visible_len(s) > width {
        format!("{}{}", truncate(s, width), theme::RESET)
    } else {
        pad(s, width)
    }
}
