use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::{DashboardSettings, key_label};
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, settings: &DashboardSettings, theme: &Theme) {
    if area.is_empty() {
        return;
    }
    let bg_style = Style::default().bg(theme.statusbar_bg);

    let quit = key_label(settings.quit_key);
    let mut spans = Vec::new();
    spans.extend(pill_spans(&quit, "Quit", theme));
    spans.extend(pill_spans("Ctrl+C", "Quit", theme));
    spans.push(Span::styled(
        format!("  refresh {}", refresh_label(settings.tick_interval)),
        Style::default().fg(theme.muted),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

fn refresh_label(interval: Duration) -> String {
    let ms = interval.as_millis();
    if ms % 1000 == 0 {
        format!("{}s", ms / 1000)
    } else {
        format!("{ms}ms")
    }
}

fn pill_spans<'a>(key: &str, desc: &str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {desc}"), Style::default().fg(theme.pill_desc_fg)),
    ]
}
