use twofold_core::Tile;

const EMPTY_BACKGROUND: &str = "#cdc1b4";
const DARK_TEXT: &str = "#776e65";
const LIGHT_TEXT: &str = "#f9f6f2";
const BEYOND_BACKGROUND: &str = "#3c3a32";

/// Inline style of a single grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct TileStyle {
    pub background: &'static str,
    pub color: &'static str,
    pub font_size: &'static str,
}

impl TileStyle {
    pub(crate) const fn for_value(value: Tile) -> Self {
        Self {
            background: background(value),
            color: text_color(value),
            font_size: font_size(value),
        }
    }

    pub(crate) fn css(&self) -> String {
        format!(
            "background-color: {}; color: {}; font-size: {};",
            self.background, self.color, self.font_size
        )
    }
}

pub(crate) fn tile_class(value: Tile) -> String {
    match value {
        0 => "tile-empty".to_string(),
        value => format!("tile-{}", value),
    }
}

const fn background(value: Tile) -> &'static str {
    match value {
        0 => EMPTY_BACKGROUND,
        2 => "#eee4da",
        4 => "#ede0c8",
        8 => "#f2b179",
        16 => "#f59563",
        32 => "#f67c5f",
        64 => "#f65e3b",
        128 => "#edcf72",
        256 => "#edcc61",
        512 => "#edc850",
        1024 => "#edc53f",
        2048 => "#edc22e",
        4096 => "#ee5a52",
        8192 => "#ed4c61",
        16384 => "#f2b179",
        _ => BEYOND_BACKGROUND,
    }
}

const fn text_color(value: Tile) -> &'static str {
    if value <= 4 { DARK_TEXT } else { LIGHT_TEXT }
}

const fn font_size(value: Tile) -> &'static str {
    match value {
        1000.. => "28px",
        100.. => "32px",
        _ => "35px",
    }
}
