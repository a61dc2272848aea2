//! Navigation state for one browse session: which screen is active, the
//! selected indices, and the two independent scroll offsets. Mutated only
//! in response to input events; the finding set itself is immutable.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dockaudit_core::{group_by_severity, Category, Finding};

pub const DETAIL_PAGE_STEP: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Main,
    Results,
}

pub struct App<'a> {
    pub findings: &'a [Finding],
    pub categories: Vec<Category>,
    pub screen: Screen,
    pub category_index: usize,
    pub result_index: usize,
    pub result_scroll: usize,
    pub detail_scroll: usize,
    pub detail_max_scroll: usize,
    pub flash_message: Option<String>,
    pub should_quit: bool,
    pub scan_dir: String,
    pub scope: String,
}

impl<'a> App<'a> {
    pub fn new(findings: &'a [Finding], scan_dir: String, scope: String) -> Self {
        Self {
            findings,
            categories: group_by_severity(findings),
            screen: Screen::Main,
            category_index: 0,
            result_index: 0,
            result_scroll: 0,
            detail_scroll: 0,
            detail_max_scroll: 0,
            flash_message: None,
            should_quit: false,
            scan_dir,
            scope,
        }
    }

    pub fn selected_category(&self) -> &Category {
        &self.categories[self.category_index]
    }

    /// The finding under the cursor on the Results screen; also the preview
    /// source while still on Main.
    pub fn selected_finding(&self) -> Option<&'a Finding> {
        let category = self.categories.get(self.category_index)?;
        let finding_idx = *category.members.get(self.result_index)?;
        self.findings.get(finding_idx)
    }

    pub fn finding_in_category(&self, category: &Category, position: usize) -> Option<&'a Finding> {
        category
            .members
            .get(position)
            .and_then(|idx| self.findings.get(*idx))
    }

    pub fn set_flash(&mut self, message: impl Into<String>) {
        self.flash_message = Some(message.into());
    }

    pub fn clear_flash(&mut self) {
        self.flash_message = None;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Main => self.handle_main_key(key),
            Screen::Results => self.handle_results_key(key),
        }
    }

    fn handle_main_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_category(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_category(1),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => self.enter_results(),
            KeyCode::Left
            | KeyCode::Char('h')
            | KeyCode::Backspace
            | KeyCode::Esc
            | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        let shifted = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Up if shifted => self.scroll_detail(-1),
            KeyCode::Down if shifted => self.scroll_detail(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_result(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_result(1),
            KeyCode::PageUp => self.scroll_detail(-(DETAIL_PAGE_STEP as isize)),
            KeyCode::PageDown => self.scroll_detail(DETAIL_PAGE_STEP as isize),
            KeyCode::Left
            | KeyCode::Char('h')
            | KeyCode::Backspace
            | KeyCode::Esc
            | KeyCode::Char('q') => self.leave_results(),
            _ => {}
        }
    }

    fn move_category(&mut self, delta: isize) {
        self.category_index = step_clamped(self.category_index, delta, self.categories.len());
    }

    fn enter_results(&mut self) {
        self.screen = Screen::Results;
        self.result_index = 0;
        self.result_scroll = 0;
        self.detail_scroll = 0;
    }

    /// Back to Main. The category selection is preserved; the per-result
    /// state is reset anyway the next time Results is entered.
    fn leave_results(&mut self) {
        self.screen = Screen::Main;
    }

    fn move_result(&mut self, delta: isize) {
        let len = self
            .categories
            .get(self.category_index)
            .map(Category::len)
            .unwrap_or(0);
        self.result_index = step_clamped(self.result_index, delta, len);
        self.detail_scroll = 0;
    }

    fn scroll_detail(&mut self, delta: isize) {
        let next = self.detail_scroll.saturating_add_signed(delta);
        self.detail_scroll = next.min(self.detail_max_scroll);
    }

    /// Clamp the detail scroll against the freshly built detail line count.
    /// Called by the renderer once per frame, before windowing.
    pub fn clamp_detail_scroll(&mut self, line_count: usize, viewport: usize) {
        self.detail_max_scroll = line_count.saturating_sub(viewport.max(1));
        self.detail_scroll = self.detail_scroll.min(self.detail_max_scroll);
    }

    /// Keep the selected result inside the visible window with the minimal
    /// scroll adjustment. Must hold after every transition.
    pub fn ensure_result_visible(&mut self, viewport: usize) {
        let viewport = viewport.max(1);
        if self.result_index < self.result_scroll {
            self.result_scroll = self.result_index;
        } else if self.result_index >= self.result_scroll + viewport {
            self.result_scroll = self.result_index + 1 - viewport;
        }
    }
}

fn step_clamped(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    current
        .saturating_add_signed(delta)
        .min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockaudit_core::Severity;

    fn finding(id: &str, severity: Severity) -> Finding {
        Finding {
            id: id.to_string(),
            severity,
            title: format!("finding {id}"),
            message: "message".to_string(),
            category: "general".to_string(),
            location: None,
            line: None,
            fixes: Vec::new(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn shifted(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::SHIFT)
    }

    fn sample_findings() -> Vec<Finding> {
        vec![
            finding("E1", Severity::Error),
            finding("E2", Severity::Error),
            finding("W1", Severity::Warning),
        ]
    }

    fn app(findings: &[Finding]) -> App<'_> {
        App::new(findings, "/srv/app".to_string(), "all".to_string())
    }

    #[test]
    fn builds_two_categories_in_severity_order() {
        let findings = sample_findings();
        let app = app(&findings);
        assert_eq!(app.categories.len(), 2);
        assert_eq!(app.categories[0].severity, Severity::Error);
        assert_eq!(app.categories[0].len(), 2);
        assert_eq!(app.categories[1].severity, Severity::Warning);
    }

    #[test]
    fn category_selection_clamps_without_wraparound() {
        let findings = sample_findings();
        let mut app = app(&findings);

        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.category_index, 1);
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.category_index, 1);

        app.handle_key(key(KeyCode::Char('k')));
        assert_eq!(app.category_index, 0);
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.category_index, 0);
    }

    #[test]
    fn entering_results_resets_selection_and_scrolls() {
        let findings = sample_findings();
        let mut app = app(&findings);
        app.result_index = 7;
        app.result_scroll = 3;
        app.detail_scroll = 9;

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.screen, Screen::Results);
        assert_eq!(app.result_index, 0);
        assert_eq!(app.result_scroll, 0);
        assert_eq!(app.detail_scroll, 0);
    }

    #[test]
    fn leaving_results_preserves_the_category_selection() {
        let findings = sample_findings();
        let mut app = app(&findings);
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Esc));

        assert_eq!(app.screen, Screen::Main);
        assert_eq!(app.category_index, 1);
        assert!(!app.should_quit);
    }

    #[test]
    fn result_movement_clamps_and_resets_detail_scroll() {
        let findings = sample_findings();
        let mut app = app(&findings);
        app.handle_key(key(KeyCode::Enter));

        app.detail_max_scroll = 10;
        app.handle_key(shifted(KeyCode::Down));
        app.handle_key(shifted(KeyCode::Down));
        assert_eq!(app.detail_scroll, 2);
        assert_eq!(app.result_index, 0);

        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.result_index, 1);
        assert_eq!(app.detail_scroll, 0);

        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.result_index, 1, "clamped at the last finding");
    }

    #[test]
    fn page_keys_move_detail_scroll_in_steps_of_five() {
        let findings = sample_findings();
        let mut app = app(&findings);
        app.handle_key(key(KeyCode::Enter));
        app.detail_max_scroll = 8;

        app.handle_key(key(KeyCode::PageDown));
        assert_eq!(app.detail_scroll, 5);
        app.handle_key(key(KeyCode::PageDown));
        assert_eq!(app.detail_scroll, 8, "clamped at max scroll");
        app.handle_key(key(KeyCode::PageUp));
        assert_eq!(app.detail_scroll, 3);
        app.handle_key(key(KeyCode::PageUp));
        assert_eq!(app.detail_scroll, 0);
    }

    #[test]
    fn quit_keys_end_the_session_from_main_only() {
        let findings = sample_findings();
        let mut app = app(&findings);
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('q')));
        assert_eq!(app.screen, Screen::Main);
        assert!(!app.should_quit);

        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_force_quits_from_both_screens() {
        let findings = sample_findings();
        let mut app = app(&findings);
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn unbound_keys_change_nothing() {
        let findings = sample_findings();
        let mut app = app(&findings);
        app.handle_key(key(KeyCode::Char('z')));
        app.handle_key(key(KeyCode::F(5)));
        assert_eq!(app.screen, Screen::Main);
        assert_eq!(app.category_index, 0);
        assert!(!app.should_quit);
    }

    #[test]
    fn keep_selected_visible_after_any_movement() {
        let findings: Vec<Finding> = (0..10)
            .map(|i| finding(&format!("E{i}"), Severity::Error))
            .collect();
        let mut app = app(&findings);
        app.handle_key(key(KeyCode::Enter));

        let viewport = 4;
        for _ in 0..9 {
            app.handle_key(key(KeyCode::Down));
            app.ensure_result_visible(viewport);
            assert!(app.result_index >= app.result_scroll);
            assert!(app.result_index < app.result_scroll + viewport);
        }
        assert_eq!(app.result_scroll, 6);

        for _ in 0..9 {
            app.handle_key(key(KeyCode::Up));
            app.ensure_result_visible(viewport);
            assert!(app.result_index >= app.result_scroll);
            assert!(app.result_index < app.result_scroll + viewport);
        }
        assert_eq!(app.result_scroll, 0);
    }

    #[test]
    fn detail_scroll_stays_bounded_after_clamping() {
        let findings = sample_findings();
        let mut app = app(&findings);
        app.handle_key(key(KeyCode::Enter));
        app.detail_max_scroll = 20;
        app.detail_scroll = 18;

        app.clamp_detail_scroll(12, 8);
        assert_eq!(app.detail_max_scroll, 4);
        assert_eq!(app.detail_scroll, 4);

        app.clamp_detail_scroll(5, 8);
        assert_eq!(app.detail_max_scroll, 0);
        assert_eq!(app.detail_scroll, 0);
    }
}
