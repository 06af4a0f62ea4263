use std::sync::Arc;
use std::time::Duration;

use smoothscroll_core::scroll::{
    AnimatorState, Clock, Interaction, ScrollAnimator, SystemClock, TickOutcome, Viewport,
};
use smoothscroll_core::AppConfig;
use tracing::debug;

use crate::document::{Document, DocumentViewport};
use crate::input::Action;
use crate::theme::Theme;

/// Current input mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Typing a search query
    Search(String),
}

/// Pager state: the document, its viewport and the animator that scrolls it
pub struct App<C: Clock = SystemClock> {
    pub document: Document,
    pub viewport: DocumentViewport,
    pub animator: ScrollAnimator<C>,
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub mode: Mode,
    pub last_search: Option<String>,
    pub pending_key: Option<char>,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl App<SystemClock> {
    pub fn new(document: Document, config: Arc<AppConfig>, theme: Theme) -> Self {
        let mut app = Self::with_clock(document, config, SystemClock::new());
        app.theme = theme;
        app
    }
}

impl<C: Clock> App<C> {
    pub fn with_clock(document: Document, config: Arc<AppConfig>, clock: C) -> Self {
        let viewport = DocumentViewport::new(document.len());
        let animator = ScrollAnimator::from_config_with_clock(&config.scroll, clock);
        Self {
            document,
            viewport,
            animator,
            config,
            theme: Theme::default(),
            mode: Mode::Normal,
            last_search: None,
            pending_key: None,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, Mode::Search(_))
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    pub fn animator_state(&self) -> AnimatorState {
        self.animator.state()
    }

    /// Called by the document widget with the visible height
    pub fn set_viewport_height(&mut self, height: u16) {
        if self.viewport.height() != height {
            self.viewport.set_height(height);
        }
    }

    /// How long the event loop may block before the next animation step
    pub fn next_timeout(&self, idle: Duration) -> Duration {
        self.animator
            .time_until_next_tick()
            .map_or(idle, |wait| wait.min(idle))
    }

    /// Advance the animation if a step is due
    pub fn on_tick(&mut self) -> TickOutcome {
        self.animator.poll(&mut self.viewport)
    }

    /// Mouse wheel: the user takes over, cancelling any animation
    pub fn on_wheel(&mut self, notches: i32) {
        self.animator.handle_interaction(Interaction::Wheel);
        self.viewport
            .scroll_by(notches * self.config.ui.scroll_lines as i32);
    }

    /// Horizontal wheel: pans the view; still a wheel interaction
    pub fn on_pan(&mut self, notches: i32) {
        self.animator.handle_interaction(Interaction::Wheel);
        self.viewport.pan_by(notches * 4);
    }

    /// Mouse press: treated like a touch start
    pub fn on_press(&mut self) {
        self.animator.handle_interaction(Interaction::TouchStart);
    }

    /// Manual line scrolling; locks the animator like a wheel notch
    pub fn scroll_lines(&mut self, lines: i32) {
        self.animator.lock_scrolling();
        self.viewport.scroll_by(lines);
    }

    /// Where chained jumps start from: the running animation's target, or
    /// the current position when idle
    fn jump_base(&self) -> f64 {
        match (self.animator.state(), self.animator.current_run()) {
            (AnimatorState::Animating, Some(run)) => run.target_offset,
            _ => self.viewport.scroll_y().round(),
        }
    }

    /// Animate to the given first visible line
    pub fn animate_to(&mut self, line: f64) {
        let target = line.clamp(0.0, self.viewport.max_scroll());
        debug!(target, "Animated jump");
        self.animator.scroll_to_target(&mut self.viewport, target);
    }

    fn animate_by(&mut self, lines: f64) {
        let target = self.jump_base() + lines;
        self.animate_to(target);
    }

    fn page(&self) -> f64 {
        self.viewport.height().max(1) as f64
    }

    fn half_page(&self) -> f64 {
        (self.viewport.height() / 2).max(1) as f64
    }

    pub fn jump_to_top(&mut self) {
        self.animate_to(0.0);
    }

    pub fn jump_to_bottom(&mut self) {
        self.animate_to(self.viewport.max_scroll());
    }

    pub fn next_section(&mut self) {
        let from = self.jump_base() as usize;
        match self.document.heading_after(from) {
            Some(line) => self.animate_to(line as f64),
            None => self.set_status("No more sections"),
        }
    }

    pub fn prev_section(&mut self) {
        let from = self.jump_base() as usize;
        match self.document.heading_before(from) {
            Some(line) => self.animate_to(line as f64),
            None => self.set_status("Already at first section"),
        }
    }

    fn jump_to_match(&mut self, forward: bool) {
        let Some(query) = self.last_search.clone() else {
            self.set_status("No previous search");
            return;
        };
        let from = self.jump_base() as usize;
        match self.document.find(&query, from, forward) {
            Some(line) => self.animate_to(line as f64),
            None => self.set_status(format!("Pattern not found: {}", query)),
        }
    }

    fn submit_search(&mut self, query: String) {
        if query.is_empty() {
            return;
        }
        self.last_search = Some(query);
        self.jump_to_match(true);
    }

    /// Apply an input action
    pub fn handle_action(&mut self, action: Action) {
        if action != Action::PendingG {
            self.pending_key = None;
        }
        if action != Action::None && !self.is_input_mode() {
            self.status_message = None;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::LineDown => self.scroll_lines(self.config.ui.scroll_lines as i32),
            Action::LineUp => self.scroll_lines(-(self.config.ui.scroll_lines as i32)),
            Action::HalfPageDown => self.animate_by(self.half_page()),
            Action::HalfPageUp => self.animate_by(-self.half_page()),
            Action::PageDown => self.animate_by(self.page()),
            Action::PageUp => self.animate_by(-self.page()),
            Action::JumpToTop => self.jump_to_top(),
            Action::JumpToBottom => self.jump_to_bottom(),
            Action::PendingG => self.pending_key = Some('g'),
            Action::NextSection => self.next_section(),
            Action::PrevSection => self.prev_section(),
            Action::StartSearch => self.mode = Mode::Search(String::new()),
            Action::NextMatch => self.jump_to_match(true),
            Action::PrevMatch => self.jump_to_match(false),
            Action::InputChar(c) => {
                if let Mode::Search(query) = &mut self.mode {
                    query.push(c);
                }
            }
            Action::Backspace => {
                if let Mode::Search(query) = &mut self.mode {
                    if query.pop().is_none() {
                        self.mode = Mode::Normal;
                    }
                }
            }
            Action::Confirm => {
                if let Mode::Search(query) = std::mem::replace(&mut self.mode, Mode::Normal) {
                    self.submit_search(query);
                }
            }
            Action::Cancel => self.mode = Mode::Normal,
            Action::None => {}
        }
    }
}
