use ratatui::style::Color;

/// Severity band of a 0-100 reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Nominal,
    Warning,
    Alert,
}

/// `> 80` is Alert, `> 50` is Warning, anything else Nominal.
pub fn band_for(value: f64) -> Band {
    if value > 80.0 {
        Band::Alert
    } else if value > 50.0 {
        Band::Warning
    } else {
        Band::Nominal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSupport {
    Auto,
    Truecolor,
    Color256,
    Mono,
}

impl ColorSupport {
    pub fn from_config_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "truecolor" | "24bit" => ColorSupport::Truecolor,
            "256" | "256color" => ColorSupport::Color256,
            "mono" | "monochrome" => ColorSupport::Mono,
            _ => ColorSupport::Auto,
        }
    }
}

pub fn detect_color_support() -> ColorSupport {
    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorSupport::Truecolor;
    }

    let term = std::env::var("TERM").unwrap_or_default().to_lowercase();
    if term == "dumb" {
        return ColorSupport::Mono;
    }
    ColorSupport::Color256
}

pub fn resolve_color_support(config: &str) -> ColorSupport {
    let parsed = ColorSupport::from_config_str(config);
    if parsed == ColorSupport::Auto {
        detect_color_support()
    } else {
        parsed
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub title_fg: Color,
    pub title_bg: Color,
    pub label_fg: Color,
    pub section_fg: Color,
    pub network_fg: Color,
    pub interface_fg: Color,
    pub uptime_fg: Color,
    pub fps_fg: Color,
    pub table_header_fg: Color,
    pub gauge_unfilled: Color,
    pub nominal: Color,
    pub warning: Color,
    pub alert: Color,
    pub statusbar_bg: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub muted: Color,
}

impl Theme {
    pub fn from_config(theme_name: &str, support: ColorSupport) -> Self {
        if support == ColorSupport::Mono {
            return Self::mono();
        }
        let mut theme = match theme_name.to_lowercase().as_str() {
            "light" => Self::light(),
            "mono" | "monochrome" => Self::mono(),
            _ => Self::dark(),
        };
        theme.apply_color_support(support);
        theme
    }

    pub fn band_color(&self, band: Band) -> Color {
        match band {
            Band::Nominal => self.nominal,
            Band::Warning => self.warning,
            Band::Alert => self.alert,
        }
    }

    fn apply_color_support(&mut self, support: ColorSupport) {
        let map = |c: Color| adapt_color(c, support);

        self.title_fg = map(self.title_fg);
        self.title_bg = map(self.title_bg);
        self.label_fg = map(self.label_fg);
        self.section_fg = map(self.section_fg);
        self.network_fg = map(self.network_fg);
        self.interface_fg = map(self.interface_fg);
        self.uptime_fg = map(self.uptime_fg);
        self.fps_fg = map(self.fps_fg);
        self.table_header_fg = map(self.table_header_fg);
        self.gauge_unfilled = map(self.gauge_unfilled);
        self.nominal = map(self.nominal);
        self.warning = map(self.warning);
        self.alert = map(self.alert);
        self.statusbar_bg = map(self.statusbar_bg);
        self.pill_key_bg = map(self.pill_key_bg);
        self.pill_key_fg = map(self.pill_key_fg);
        self.pill_desc_fg = map(self.pill_desc_fg);
        self.muted = map(self.muted);
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            title_fg: Color::Black,
            title_bg: Color::Green,
            label_fg: Color::Yellow,
            section_fg: Color::Yellow,
            network_fg: Color::Green,
            interface_fg: Color::Rgb(96, 165, 250),
            uptime_fg: Color::Gray,
            fps_fg: Color::Rgb(135, 135, 215),
            table_header_fg: Color::Green,
            gauge_unfilled: Color::DarkGray,
            nominal: Color::Green,
            warning: Color::Yellow,
            alert: Color::Red,
            statusbar_bg: Color::DarkGray,
            pill_key_bg: Color::Yellow,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            muted: Color::DarkGray,
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            title_fg: Color::White,
            title_bg: Color::Blue,
            label_fg: Color::Rgb(120, 90, 0),
            section_fg: Color::Rgb(120, 90, 0),
            network_fg: Color::Rgb(0, 120, 0),
            interface_fg: Color::Rgb(70, 130, 180),
            uptime_fg: Color::DarkGray,
            fps_fg: Color::Rgb(90, 90, 170),
            table_header_fg: Color::Rgb(0, 120, 0),
            gauge_unfilled: Color::Rgb(200, 200, 200),
            nominal: Color::Rgb(60, 160, 60),
            warning: Color::Rgb(200, 150, 0),
            alert: Color::Rgb(200, 60, 60),
            statusbar_bg: Color::Rgb(220, 220, 220),
            pill_key_bg: Color::Blue,
            pill_key_fg: Color::White,
            pill_desc_fg: Color::Black,
            muted: Color::Gray,
        }
    }

    pub fn mono() -> Self {
        Theme {
            name: "mono",
            title_fg: Color::Black,
            title_bg: Color::White,
            label_fg: Color::White,
            section_fg: Color::White,
            network_fg: Color::White,
            interface_fg: Color::Gray,
            uptime_fg: Color::Gray,
            fps_fg: Color::Gray,
            table_header_fg: Color::White,
            gauge_unfilled: Color::DarkGray,
            nominal: Color::Gray,
            warning: Color::White,
            alert: Color::White,
            statusbar_bg: Color::Black,
            pill_key_bg: Color::White,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            muted: Color::DarkGray,
        }
    }
}

fn adapt_color(color: Color, support: ColorSupport) -> Color {
    match support {
        ColorSupport::Truecolor | ColorSupport::Auto => color,
        ColorSupport::Color256 => match color {
            Color::Rgb(r, g, b) => Color::Indexed(rgb_to_ansi256(r, g, b)),
            _ => color,
        },
        ColorSupport::Mono => match color {
            Color::Rgb(r, g, b) => {
                let luminance = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
                if luminance > 128.0 {
                    Color::White
                } else {
                    Color::Black
                }
            }
            Color::White | Color::Black | Color::Gray | Color::DarkGray => color,
            _ => Color::White,
        },
    }
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    let r = (r as f32 / 255.0 * 5.0).round() as u8;
    let g = (g as f32 / 255.0 * 5.0).round() as u8;
    let b = (b as f32 / 255.0 * 5.0).round() as u8;
    16 + 36 * r + 6 * g + b
}
