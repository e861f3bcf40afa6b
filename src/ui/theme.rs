use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub dim: String,
    pub accent: String,
    pub border: String,
    pub header_bg: String,
    pub header_fg: String,
    pub success: String,
    pub error: String,
    pub warning: String,
    pub gold: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        // User themes take precedence over bundled ones
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("floe")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path)
                && let Ok(theme) = toml::from_str::<Theme>(&content)
            {
                return Some(theme);
            }
        }

        let filename = format!("{name}.toml");
        if let Some(file) = ThemeAssets::get(&filename)
            && let Ok(content) = std::str::from_utf8(file.data.as_ref())
            && let Ok(theme) = toml::from_str::<Theme>(content)
        {
            return Some(theme);
        }

        None
    }

}

impl Default for Theme {
    fn default() -> Self {
        Self::load("arctic-night").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#0f1c2e".to_string(),
            fg: "#dceefb".to_string(),
            dim: "#557191".to_string(),
            accent: "#7fd1e8".to_string(),
            border: "#2c4a6b".to_string(),
            header_bg: "#16304d".to_string(),
            header_fg: "#dceefb".to_string(),
            success: "#9fe6b0".to_string(),
            error: "#f2959f".to_string(),
            warning: "#f5d491".to_string(),
            gold: "#f0c75e".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6
            && let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            )
        {
            return Color::Rgb(r, g, b);
        }
        Color::White
    }

    pub fn bg(&self) -> Color {
        Self::parse_color(&self.bg)
    }
    pub fn fg(&self) -> Color {
        Self::parse_color(&self.fg)
    }
    pub fn dim(&self) -> Color {
        Self::parse_color(&self.dim)
    }
    pub fn accent(&self) -> Color {
        Self::parse_color(&self.accent)
    }
    pub fn border(&self) -> Color {
        Self::parse_color(&self.border)
    }
    pub fn header_bg(&self) -> Color {
        Self::parse_color(&self.header_bg)
    }
    pub fn header_fg(&self) -> Color {
        Self::parse_color(&self.header_fg)
    }
    pub fn success(&self) -> Color {
        Self::parse_color(&self.success)
    }
    pub fn error(&self) -> Color {
        Self::parse_color(&self.error)
    }
    pub fn warning(&self) -> Color {
        Self::parse_color(&self.warning)
    }
    pub fn gold(&self) -> Color {
        Self::parse_color(&self.gold)
    }
}
