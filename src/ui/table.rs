use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

use crate::format::truncate_unicode;
use crate::rank::RankedView;
use crate::system::process::ProcessRecord;
use crate::ui::layout::visible_table_rows;
use crate::ui::theme::{Theme, band_for};

/// Display columns reserved for the process name.
pub const NAME_WIDTH: usize = 20;
const PID_WIDTH: usize = 7;
const PERCENT_WIDTH: usize = 7;

/// Ranked processes as a title, a column header and one row per process.
pub struct ProcessTable<'a> {
    view: &'a RankedView,
    max_rows: usize,
    theme: &'a Theme,
}

impl<'a> ProcessTable<'a> {
    pub fn new(view: &'a RankedView, max_rows: usize, theme: &'a Theme) -> Self {
        ProcessTable {
            view,
            max_rows,
            theme,
        }
    }
}

pub fn header_row() -> String {
    format!(
        "{:>pid$} {} {:>pct$} {:>pct$}",
        "PID",
        pad_to_width("NAME", NAME_WIDTH),
        "CPU%",
        "RAM%",
        pid = PID_WIDTH,
        pct = PERCENT_WIDTH,
    )
}

pub fn format_row(record: &ProcessRecord) -> String {
    let name = truncate_unicode(&record.name, NAME_WIDTH);
    format!(
        "{:>pid$} {} {:>pct$.1} {:>pct$.1}",
        record.pid,
        pad_to_width(&name, NAME_WIDTH),
        record.cpu_percent,
        record.ram_percent,
        pid = PID_WIDTH,
        pct = PERCENT_WIDTH,
    )
}

// `format!` pads by char count, which is wrong for wide glyphs.
fn pad_to_width(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(pad))
}

impl Widget for ProcessTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let width = area.width as usize;

        buf.set_stringn(
            area.x,
            area.y,
            self.view.metric.title(),
            width,
            Style::default()
                .fg(self.theme.section_fg)
                .add_modifier(Modifier::BOLD),
        );
        if area.height < 2 {
            return;
        }
        buf.set_stringn(
            area.x,
            area.y + 1,
            header_row(),
            width,
            Style::default()
                .fg(self.theme.table_header_fg)
                .add_modifier(Modifier::BOLD),
        );

        if self.view.is_empty() {
            if area.height > 2 {
                buf.set_stringn(
                    area.x,
                    area.y + 2,
                    "no data",
                    width,
                    Style::default().fg(self.theme.muted),
                );
            }
            return;
        }

        let visible = visible_table_rows(area.height, self.view.len(), self.max_rows);
        for (i, record) in self.view.rows.iter().take(visible).enumerate() {
            let band = band_for(record.peak_percent() as f64);
            buf.set_stringn(
                area.x,
                area.y + 2 + i as u16,
                format_row(record),
                width,
                Style::default().fg(self.theme.band_color(band)),
            );
        }
    }
}
