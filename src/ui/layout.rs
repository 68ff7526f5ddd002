use ratatui::layout::Rect;

/// At most this many interfaces are listed, however many exist.
pub const INTERFACE_LIMIT: usize = 3;
/// Title row plus column-header row above every table.
pub const TABLE_HEADER_ROWS: u16 = 2;
pub const GAUGE_ROWS: u16 = 2;

/// Screen regions for one frame. Recomputed on every render from the current
/// viewport; regions never overlap and never leave the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    pub header: Rect,
    pub memory_gauge: Rect,
    pub cpu_gauge: Rect,
    pub network: Rect,
    pub interfaces: Rect,
    pub uptime: Rect,
    pub ram_table: Rect,
    pub cpu_table: Rect,
    pub statusbar: Rect,
}

impl DashboardLayout {
    pub fn compute(area: Rect, interface_count: usize) -> Self {
        // Heading line plus one row per listed interface, or one "none" row.
        let interface_rows = 1 + interface_count.clamp(1, INTERFACE_LIMIT) as u16;

        let mut rows = Rows::new(area);
        // Claimed first so the key hints survive on short terminals.
        let statusbar = rows.take_bottom(1);
        let header = rows.take(1);
        let memory_gauge = rows.take(GAUGE_ROWS);
        rows.skip(1);
        let cpu_gauge = rows.take(GAUGE_ROWS);
        rows.skip(1);
        let network = rows.take(1);
        let interfaces = rows.take(interface_rows);
        let uptime = rows.take(1);
        rows.skip(1);
        let tables = rows.rest();

        let (ram_table, cpu_table) = split_columns(tables);

        DashboardLayout {
            header,
            memory_gauge,
            cpu_gauge,
            network,
            interfaces,
            uptime,
            ram_table,
            cpu_table,
            statusbar,
        }
    }

    pub fn regions(&self) -> [Rect; 9] {
        [
            self.header,
            self.memory_gauge,
            self.cpu_gauge,
            self.network,
            self.interfaces,
            self.uptime,
            self.ram_table,
            self.cpu_table,
            self.statusbar,
        ]
    }
}

/// How many process rows fit in a table region of `height` rows.
pub fn visible_table_rows(height: u16, available: usize, max_rows: usize) -> usize {
    let room = height.saturating_sub(TABLE_HEADER_ROWS) as usize;
    available.min(max_rows).min(room)
}

/// Two side-by-side halves with a one-column gutter.
fn split_columns(area: Rect) -> (Rect, Rect) {
    let left_width = area.width / 2;
    let left = Rect::new(area.x, area.y, left_width, area.height);
    let right_x = area.x + left_width + 1.min(area.width - left_width);
    let right_width = area.width - (right_x - area.x);
    let right = Rect::new(right_x, area.y, right_width, area.height);
    (left, right)
}

/// Top-down row allocator that hands out whatever height is left.
struct Rows {
    x: u16,
    width: u16,
    top: u16,
    bottom: u16,
}

impl Rows {
    fn new(area: Rect) -> Self {
        Rows {
            x: area.x,
            width: area.width,
            top: area.y,
            bottom: area.y + area.height,
        }
    }

    fn take(&mut self, height: u16) -> Rect {
        let height = height.min(self.bottom - self.top);
        let rect = Rect::new(self.x, self.top, self.width, height);
        self.top += height;
        rect
    }

    fn skip(&mut self, height: u16) {
        let _ = self.take(height);
    }

    fn take_bottom(&mut self, height: u16) -> Rect {
        let height = height.min(self.bottom - self.top);
        self.bottom -= height;
        Rect::new(self.x, self.bottom, self.width, height)
    }

    fn rest(&mut self) -> Rect {
        self.take(self.bottom - self.top)
    }
}
