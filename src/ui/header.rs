use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ui::theme::Theme;

pub const TITLE: &str = " sysdash ";

/// Product name on the left, `FPS: n` on the right when `fps` is given.
pub fn render(frame: &mut Frame, area: Rect, fps: Option<u32>, theme: &Theme) {
    if area.is_empty() {
        return;
    }

    let title = Line::from(Span::styled(
        TITLE,
        Style::default()
            .fg(theme.title_fg)
            .bg(theme.title_bg)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(title), area);

    if let Some(fps) = fps {
        let counter = Line::from(Span::styled(
            format!("FPS: {fps} "),
            Style::default().fg(theme.fps_fg),
        ))
        .right_aligned();
        frame.render_widget(Paragraph::new(counter), area);
    }
}
