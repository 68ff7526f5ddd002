use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::format::{NOT_AVAILABLE, format_megabytes, format_uptime};
use crate::system::provider::{InterfaceStats, NetCounters};
use crate::system::snapshot::MetricsSnapshot;
use crate::ui::layout::INTERFACE_LIMIT;
use crate::ui::theme::Theme;

pub fn network_line(totals: Option<&NetCounters>) -> String {
    match totals {
        Some(net) => format!(
            "Network - rx: {}  tx: {}",
            format_megabytes(net.bytes_received),
            format_megabytes(net.bytes_sent)
        ),
        None => format!("Network: {NOT_AVAILABLE}"),
    }
}

pub fn interface_line(iface: &InterfaceStats) -> String {
    let c = &iface.counters;
    let mut line = format!(
        "{} - rx: {}, tx: {}, packets: {} rx, {} tx",
        iface.name,
        format_megabytes(c.bytes_received),
        format_megabytes(c.bytes_sent),
        c.packets_received,
        c.packets_sent
    );
    for addr in &iface.addresses {
        line.push_str(", ip: ");
        line.push_str(addr);
    }
    line
}

pub fn uptime_line(snapshot: &MetricsSnapshot) -> String {
    match snapshot.uptime {
        Some(uptime) => format!("Uptime: {}", format_uptime(uptime)),
        None => format!("Uptime: {NOT_AVAILABLE}"),
    }
}

pub fn render_network(snapshot: &MetricsSnapshot, area: Rect, buf: &mut Buffer, theme: &Theme) {
    if area.is_empty() {
        return;
    }
    let style = if snapshot.network.is_some() {
        Style::default().fg(theme.network_fg)
    } else {
        Style::default().fg(theme.muted)
    };
    buf.set_stringn(
        area.x,
        area.y,
        network_line(snapshot.network.as_ref()),
        area.width as usize,
        style,
    );
}

/// "Interfaces:" followed by up to `INTERFACE_LIMIT` interface lines.
pub fn render_interfaces(
    interfaces: &[InterfaceStats],
    area: Rect,
    buf: &mut Buffer,
    theme: &Theme,
) {
    if area.is_empty() {
        return;
    }
    let width = area.width as usize;
    buf.set_stringn(
        area.x,
        area.y,
        "Interfaces:",
        width,
        Style::default()
            .fg(theme.section_fg)
            .add_modifier(Modifier::BOLD),
    );

    let room = area.height.saturating_sub(1) as usize;
    if room == 0 {
        return;
    }
    if interfaces.is_empty() {
        buf.set_stringn(
            area.x,
            area.y + 1,
            "no interfaces",
            width,
            Style::default().fg(theme.muted),
        );
        return;
    }
    for (i, iface) in interfaces
        .iter()
        .take(INTERFACE_LIMIT.min(room))
        .enumerate()
    {
        buf.set_stringn(
            area.x,
            area.y + 1 + i as u16,
            interface_line(iface),
            width,
            Style::default().fg(theme.interface_fg),
        );
    }
}

pub fn render_uptime(snapshot: &MetricsSnapshot, area: Rect, buf: &mut Buffer, theme: &Theme) {
    if area.is_empty() {
        return;
    }
    buf.set_stringn(
        area.x,
        area.y,
        uptime_line(snapshot),
        area.width as usize,
        Style::default().fg(theme.uptime_fg),
    );
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::system::provider::fake::interface;

    #[test]
    fn interface_line_lists_every_address() {
        let iface = interface("eth0", 2_500_000, 1_250_000, &["10.0.0.2", "fe80::1"]);
        insta::assert_snapshot!(
            interface_line(&iface),
            @"eth0 - rx: 2.50MB, tx: 1.25MB, packets: 2500 rx, 1250 tx, ip: 10.0.0.2, ip: fe80::1"
        );
    }

    #[test]
    fn missing_totals_and_uptime_show_placeholders() {
        assert_eq!(network_line(None), "Network: not available");
        let snapshot = MetricsSnapshot::default();
        assert_eq!(uptime_line(&snapshot), "Uptime: not available");
    }

    #[test]
    fn totals_use_decimal_megabytes() {
        let net = NetCounters {
            bytes_received: 2_500_000,
            bytes_sent: 1_250_000,
            ..NetCounters::default()
        };
        assert_eq!(network_line(Some(&net)), "Network - rx: 2.50MB  tx: 1.25MB");
    }

    #[test]
    fn uptime_is_days_hours_minutes_seconds() {
        let snapshot = MetricsSnapshot {
            uptime: Some(Duration::from_secs(93_784)),
            ..MetricsSnapshot::default()
        };
        assert_eq!(uptime_line(&snapshot), "Uptime: 1d 02h 03m 04s");
    }

    #[test]
    fn interface_block_caps_at_three() {
        let ifaces: Vec<_> = (0..5)
            .map(|i| interface(&format!("if{i}"), 0, 0, &[]))
            .collect();
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        render_interfaces(&ifaces, area, &mut buf, &Theme::dark());

        let text: Vec<String> = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf.cell((x, y)).unwrap().symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect();
        assert_eq!(text[0], "Interfaces:");
        assert!(text[3].starts_with("if2 - "));
        assert_eq!(text[4], "");
    }

    #[test]
    fn no_interfaces_placeholder() {
        let area = Rect::new(0, 0, 20, 2);
        let mut buf = Buffer::empty(area);
        render_interfaces(&[], area, &mut buf, &Theme::dark());
        let second: String = (0..13).map(|x| buf.cell((x, 1)).unwrap().symbol()).collect();
        assert_eq!(second, "no interfaces");
    }
}
