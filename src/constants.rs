use ratatui::style::Color;

pub const TIME_SETTINGS: TimeSettings = TimeSettings {
    tick_ms: 1000,
    target_fps: 24,
};

pub const URGENCY: UrgencySettings = UrgencySettings {
    soon_window_secs: 15 * 60,
};

pub const DARK_PALETTE: Palette = Palette {
    now: Color::Rgb(239, 68, 68),
    soon: Color::Rgb(245, 158, 11),
    later: Color::Gray,
    text: Color::White,
    muted: Color::DarkGray,
    border: Color::White,
    highlight_bg: Color::Rgb(40, 40, 40),
};

pub const LIGHT_PALETTE: Palette = Palette {
    now: Color::Rgb(220, 38, 38),
    soon: Color::Rgb(217, 119, 6),
    later: Color::Rgb(156, 163, 175),
    text: Color::Black,
    muted: Color::Rgb(107, 114, 128),
    border: Color::Black,
    highlight_bg: Color::Rgb(229, 231, 235),
};

pub const FILE_NAMES: FileNames = FileNames {
    catalog: "catalog.json",
    settings: "settings.json",
    log: "timegate.log",
};

pub struct TimeSettings {
    pub tick_ms: u64,
    pub target_fps: u64,
}

pub struct UrgencySettings {
    pub soon_window_secs: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub now: Color,
    pub soon: Color,
    pub later: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub highlight_bg: Color,
}

pub struct FileNames {
    pub catalog: &'static str,
    pub settings: &'static str,
    pub log: &'static str,
}
