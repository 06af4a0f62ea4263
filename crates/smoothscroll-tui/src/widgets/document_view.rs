use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use smoothscroll_core::scroll::Clock;

use crate::app::App;

pub struct DocumentWidget;

impl DocumentWidget {
    pub fn render<C: Clock>(frame: &mut Frame, area: Rect, app: &mut App<C>) {
        app.set_viewport_height(area.height);

        let top = app.viewport.top_line();
        let bottom = (top + area.height as usize).min(app.document.len());
        let show_numbers = app.config.ui.show_line_numbers;
        let gutter_width = app.document.len().max(1).to_string().len();
        let query = app.last_search.as_ref().map(|q| q.to_lowercase());

        let lines: Vec<Line> = app.document.lines()[top.min(bottom)..bottom]
            .iter()
            .enumerate()
            .map(|(offset, text)| {
                let idx = top + offset;
                let mut style = Style::default().fg(app.theme.fg0);
                if app.document.is_heading(idx) {
                    style = style.fg(app.theme.heading).add_modifier(Modifier::BOLD);
                }
                if let Some(q) = &query {
                    if !q.is_empty() && text.to_lowercase().contains(q.as_str()) {
                        style = style.fg(app.theme.search_match);
                    }
                }

                let mut spans = Vec::with_capacity(2);
                if show_numbers {
                    spans.push(Span::styled(
                        format!("{:>width$} ", idx + 1, width = gutter_width),
                        Style::default().fg(app.theme.grey0),
                    ));
                }
                spans.push(Span::styled(text.as_str(), style));
                Line::from(spans)
            })
            .collect();

        let paragraph = Paragraph::new(lines)
            .style(Style::default().bg(app.theme.bg0))
            .scroll((0, app.viewport.top_column()));
        frame.render_widget(paragraph, area);
    }
}
