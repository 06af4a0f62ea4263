use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use smoothscroll_core::scroll::{AnimatorState, Clock};

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render<C: Clock>(frame: &mut Frame, area: Rect, app: &App<C>) {
        let theme = &app.theme;
        let bar = Style::default().fg(theme.fg0).bg(theme.bg2);

        if let Mode::Search(query) = &app.mode {
            let line = Line::from(vec![
                Span::styled("/", bar.add_modifier(Modifier::BOLD)),
                Span::styled(query.clone(), bar),
                Span::styled(" ".repeat(area.width as usize), bar),
            ]);
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        let (state_str, state_color) = match app.animator_state() {
            AnimatorState::Idle => ("IDLE", theme.grey2),
            AnimatorState::Animating => ("SCROLL", theme.animating),
            AnimatorState::Locked => ("MANUAL", theme.locked),
        };

        let left = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            format!(" {}", app.document.title)
        };
        let left_style = if app.status_message.is_some() {
            bar.fg(theme.error)
        } else {
            bar
        };

        let position = format!(
            " {}/{} {:>3}% ",
            (app.viewport.top_line() + 1).min(app.document.len().max(1)),
            app.document.len(),
            app.viewport.percent(),
        );
        let state = format!(" {} ", state_str);

        let used = left.width() + position.width() + state.width();
        let padding = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(left, left_style),
            Span::styled(" ".repeat(padding), bar),
            Span::styled(position, bar.fg(theme.grey2)),
            Span::styled(
                state,
                Style::default()
                    .fg(theme.bg0)
                    .bg(state_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
