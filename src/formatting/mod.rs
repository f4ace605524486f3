use crate::risk::RiskLevel;
use colored::*;
use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmojiMode {
    Auto,
    Always,
    Never,
}

impl EmojiMode {
    pub fn should_use_emoji(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingConfig {
    pub color: ColorMode,
    pub emoji: EmojiMode,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            emoji: EmojiMode::Auto,
        }
    }
}

impl FormattingConfig {
    pub fn new(color: ColorMode, emoji: EmojiMode) -> Self {
        Self { color, emoji }
    }

    pub fn from_env() -> Self {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Apply NO_COLOR, CLICOLOR and CLICOLOR_FORCE from a variable lookup.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // https://no-color.org
        if lookup("NO_COLOR").is_some() {
            config.color = ColorMode::Never;
        }
        if lookup("CLICOLOR").as_deref() == Some("0") {
            config.color = ColorMode::Never;
        }
        if lookup("CLICOLOR_FORCE").as_deref() == Some("1") {
            config.color = ColorMode::Always;
        }

        config
    }

    /// ASCII-only, no colors, no emoji
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
            emoji: EmojiMode::Never,
        }
    }
}

pub struct ColoredFormatter {
    use_color: bool,
    use_emoji: bool,
}

impl ColoredFormatter {
    pub fn new(config: FormattingConfig) -> Self {
        let use_color = config.color.should_use_color();
        colored::control::set_override(use_color);

        Self {
            use_color,
            use_emoji: config.emoji.should_use_emoji(),
        }
    }

    pub fn uses_color(&self) -> bool {
        self.use_color
    }

    pub fn header(&self, text: &str) -> String {
        if self.use_color {
            text.blue().bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        if self.use_color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.use_color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    /// Color text by risk tier: green, yellow (the dashboard's orange), red.
    pub fn risk(&self, level: RiskLevel, text: &str) -> String {
        if !self.use_color {
            return text.to_string();
        }
        match level {
            RiskLevel::Low => text.green().to_string(),
            RiskLevel::Moderate => text.yellow().to_string(),
            RiskLevel::High => text.red().bold().to_string(),
        }
    }

    pub fn risk_marker(&self, level: RiskLevel) -> &'static str {
        match (self.use_emoji, level) {
            (true, RiskLevel::Low) => "🟢",
            (true, RiskLevel::Moderate) => "🟡",
            (true, RiskLevel::High) => "🔴",
            (false, RiskLevel::Low) => "[LOW]",
            (false, RiskLevel::Moderate) => "[MOD]",
            (false, RiskLevel::High) => "[HIGH]",
        }
    }
}

fn detect_color_support() -> bool {
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    std::io::stdout().is_terminal()
}
