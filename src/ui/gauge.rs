use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::format::{NOT_AVAILABLE, format_gigabytes, format_percent};
use crate::system::snapshot::MetricsSnapshot;
use crate::ui::theme::{Theme, band_for};

/// Number of track cells to fill for a 0-100 reading. Out-of-range values are
/// clamped for the fill only.
pub fn filled_cells(track_width: u16, value: f64) -> u16 {
    let clamped = if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    };
    (track_width as f64 * clamped / 100.0).floor() as u16
}

/// A label row above a `[####    ]` bar coloured by band.
pub struct BandGauge<'a> {
    label: String,
    value: Option<f64>,
    theme: &'a Theme,
}

impl<'a> BandGauge<'a> {
    pub fn new(title: &str, reading: Option<(f64, String)>, theme: &'a Theme) -> Self {
        match reading {
            Some((value, detail)) => BandGauge {
                label: format!("{title}: {detail}"),
                value: Some(value),
                theme,
            },
            None => BandGauge {
                label: format!("{title}: {NOT_AVAILABLE}"),
                value: None,
                theme,
            },
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

pub fn memory_gauge<'a>(snapshot: &MetricsSnapshot, theme: &'a Theme) -> BandGauge<'a> {
    let reading = snapshot.memory.map(|mem| {
        let percent = mem.used_percent();
        let detail = format!(
            "Total: {} Used: {} Free: {} ({})",
            format_gigabytes(mem.total),
            format_gigabytes(mem.used),
            format_gigabytes(mem.free),
            format_percent(percent)
        );
        (percent, detail)
    });
    BandGauge::new("Memory", reading, theme)
}

pub fn cpu_gauge<'a>(snapshot: &MetricsSnapshot, theme: &'a Theme) -> BandGauge<'a> {
    let reading = snapshot.cpu_percent.map(|cpu| {
        let cpu = cpu as f64;
        (cpu, format_percent(cpu))
    });
    BandGauge::new("CPU", reading, theme)
}

impl Widget for BandGauge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        buf.set_stringn(
            area.x,
            area.y,
            &self.label,
            area.width as usize,
            Style::default().fg(self.theme.label_fg),
        );

        if area.height < 2 || area.width < 2 {
            return;
        }
        let y = area.y + 1;
        let track_width = area.width - 2;
        let filled = self.value.map(|v| filled_cells(track_width, v)).unwrap_or(0);
        let fill_color = self
            .value
            .map(|v| self.theme.band_color(band_for(v)))
            .unwrap_or(self.theme.gauge_unfilled);

        buf.set_string(area.x, y, "[", Style::default());
        for i in 0..track_width {
            let bg = if i < filled {
                fill_color
            } else {
                self.theme.gauge_unfilled
            };
            if let Some(cell) = buf.cell_mut((area.x + 1 + i, y)) {
                cell.set_char(' ');
                cell.set_style(Style::default().bg(bg));
            }
        }
        buf.set_string(area.x + area.width - 1, y, "]", Style::default());
    }
}
