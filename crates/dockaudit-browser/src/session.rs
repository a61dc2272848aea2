//! Session driver: owns the terminal mode for the lifetime of one browse
//! session, wires input and resize events into the state machine and the
//! renderer, and guarantees the restore sequence runs on every exit path.

use crate::state::{App, Screen};
use crate::ui;
use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use dockaudit_core::Finding;
use std::io;
use std::time::{Duration, Instant};

const INPUT_POLL: Duration = Duration::from_millis(250);
const FLASH_CLEAR: Duration = Duration::from_secs(2);

/// Context labels shown in the header row.
pub struct BrowseOptions {
    pub scan_dir: String,
    pub scope: String,
}

/// Injected collaborators for the copy key. Both operations are fallible
/// and both failures degrade to a flash message, never to an error return.
pub trait CopyHooks {
    /// Pull the embedded code blocks out of concatenated fix instructions.
    fn extract_code(&self, instructions: &str) -> Result<String>;
    /// Place the extracted code on the system clipboard.
    fn write_clipboard(&self, payload: &str) -> Result<()>;
}

/// Run one interactive browse session over the given findings. Returns
/// immediately, without touching the terminal, when there is nothing to
/// show. The caller keeps ownership of the findings throughout.
pub fn run(findings: &[Finding], options: BrowseOptions, hooks: &dyn CopyHooks) -> Result<()> {
    if findings.is_empty() {
        return Ok(());
    }

    let mut app = App::new(findings, options.scan_dir, options.scope);
    let mut stdout = io::stdout();
    setup_terminal(&mut stdout)?;
    let result = run_loop(&mut app, &mut stdout, hooks);
    restore_terminal(&mut stdout)?;
    result
}

fn setup_terminal(out: &mut io::Stdout) -> Result<()> {
    enable_raw_mode()?;
    execute!(out, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;
    Ok(())
}

fn restore_terminal(out: &mut io::Stdout) -> Result<()> {
    execute!(out, cursor::Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

fn run_loop(app: &mut App, out: &mut io::Stdout, hooks: &dyn CopyHooks) -> Result<()> {
    // The flash clear is a deadline checked inside the loop, not a spawned
    // callback: when the loop exits the deadline dies with it, so a stale
    // clear can never repaint after the terminal is restored.
    let mut flash_deadline: Option<Instant> = None;

    ui::render(app, out)?;

    loop {
        let timeout = flash_deadline
            .map(|deadline| {
                deadline
                    .saturating_duration_since(Instant::now())
                    .min(INPUT_POLL)
            })
            .unwrap_or(INPUT_POLL);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                    if is_copy_request(app, &key) {
                        handle_copy(app, hooks);
                        flash_deadline = Some(Instant::now() + FLASH_CLEAR);
                    } else {
                        app.handle_key(key);
                    }
                    ui::render(app, out)?;
                }
                Event::Resize(_, _) => {
                    ui::render(app, out)?;
                }
                _ => {}
            }
        }

        if let Some(deadline) = flash_deadline {
            if Instant::now() >= deadline {
                app.clear_flash();
                flash_deadline = None;
                ui::render(app, out)?;
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn is_copy_request(app: &App, key: &KeyEvent) -> bool {
    app.screen == Screen::Results
        && key.code == KeyCode::Char('c')
        && !key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Concatenate the current finding's fix instructions, run them through the
/// injected extractor and clipboard writer, and surface the outcome as a
/// flash message. Navigation state is never touched.
fn handle_copy(app: &mut App, hooks: &dyn CopyHooks) {
    let Some(finding) = app.selected_finding() else {
        return;
    };

    let blocks: Vec<&str> = finding
        .fixes
        .iter()
        .filter_map(|fix| fix.instructions.as_deref())
        .collect();
    if blocks.is_empty() {
        app.set_flash("No fix instructions to copy");
        return;
    }

    let combined = blocks.join("\n\n");
    let outcome = hooks
        .extract_code(&combined)
        .and_then(|code| hooks.write_clipboard(&code).map(|_| code));

    match outcome {
        Ok(code) => {
            let lines = code.lines().count();
            app.set_flash(format!("Copied {lines} line(s) to clipboard"));
        }
        Err(err) => app.set_flash(format!("Copy failed: {err}")),
    }
}
