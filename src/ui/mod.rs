pub mod gauge;
pub mod header;
pub mod layout;
pub mod network;
pub mod statusbar;
pub mod table;
pub mod theme;

use ratatui::Frame;

use crate::config::DashboardSettings;
use crate::rank::RankedView;
use crate::system::snapshot::MetricsSnapshot;
use crate::ui::gauge::{cpu_gauge, memory_gauge};
use crate::ui::layout::DashboardLayout;
use crate::ui::table::ProcessTable;
use crate::ui::theme::Theme;

/// Everything one frame shows. Borrowed for the duration of a single draw.
pub struct DashboardView<'a> {
    pub snapshot: &'a MetricsSnapshot,
    pub ranked_ram: &'a RankedView,
    pub ranked_cpu: &'a RankedView,
    pub fps: Option<u32>,
    pub settings: &'a DashboardSettings,
    pub theme: &'a Theme,
}

pub fn render(frame: &mut Frame, view: &DashboardView) -> DashboardLayout {
    let _render_span = tracing::debug_span!("ui.render").entered();

    let layout = DashboardLayout::compute(frame.area(), view.snapshot.interfaces.len());
    let theme = view.theme;
    let fps = view.fps.filter(|_| view.settings.show_fps);

    header::render(frame, layout.header, fps, theme);
    frame.render_widget(memory_gauge(view.snapshot, theme), layout.memory_gauge);
    frame.render_widget(cpu_gauge(view.snapshot, theme), layout.cpu_gauge);

    let buf = frame.buffer_mut();
    network::render_network(view.snapshot, layout.network, buf, theme);
    network::render_interfaces(&view.snapshot.interfaces, layout.interfaces, buf, theme);
    network::render_uptime(view.snapshot, layout.uptime, buf, theme);

    let max_rows = view.settings.max_table_rows;
    frame.render_widget(
        ProcessTable::new(view.ranked_ram, max_rows, theme),
        layout.ram_table,
    );
    frame.render_widget(
        ProcessTable::new(view.ranked_cpu, max_rows, theme),
        layout.cpu_table,
    );

    statusbar::render(frame, layout.statusbar, view.settings, theme);
    layout
}
