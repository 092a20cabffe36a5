use std::fmt;
use std::str::FromStr;

use crate::application::app_error::AppError;

pub const DEFAULT_FONT_FAMILY: &str = "inter";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonStyle {
    #[default]
    Solid,
    Outline,
    Gradient,
}

impl ButtonStyle {
    pub const ALL: [ButtonStyle; 3] = [ButtonStyle::Solid, ButtonStyle::Outline, ButtonStyle::Gradient];

    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonStyle::Solid => "solid",
            ButtonStyle::Outline => "outline",
            ButtonStyle::Gradient => "gradient",
        }
    }

    /// Stored values are not trusted: anything unknown renders as solid.
    pub fn from_stored(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            ButtonStyle::Solid => "bg-purple-600 hover:bg-purple-700 text-white",
            ButtonStyle::Outline => "bg-transparent border border-purple-600 text-purple-600 hover:bg-purple-600/10",
            ButtonStyle::Gradient => {
                "bg-gradient-to-r from-purple-600 to-blue-600 hover:from-purple-700 hover:to-blue-700 text-white"
            }
        }
    }
}

impl FromStr for ButtonStyle {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "solid" => Ok(ButtonStyle::Solid),
            "outline" => Ok(ButtonStyle::Outline),
            "gradient" => Ok(ButtonStyle::Gradient),
            other => Err(AppError::InvalidButtonStyle(other.to_string())),
        }
    }
}

impl fmt::Display for ButtonStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageBackground {
    #[default]
    Black,
    DarkGray,
    Purple,
    Blue,
    Gradient,
}

impl PageBackground {
    pub const ALL: [PageBackground; 5] = [
        PageBackground::Black,
        PageBackground::DarkGray,
        PageBackground::Purple,
        PageBackground::Blue,
        PageBackground::Gradient,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            PageBackground::Black => "bg-black",
            PageBackground::DarkGray => "bg-zinc-900",
            PageBackground::Purple => "bg-purple-900",
            PageBackground::Blue => "bg-blue-900",
            PageBackground::Gradient => "bg-gradient-to-br from-purple-900 to-blue-900",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PageBackground::Black => "Black",
            PageBackground::DarkGray => "Dark Gray",
            PageBackground::Purple => "Purple",
            PageBackground::Blue => "Blue",
            PageBackground::Gradient => "Gradient",
        }
    }

    pub fn from_stored(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for PageBackground {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|bg| bg.token() == value)
            .ok_or_else(|| AppError::InvalidPageBackground(value.to_string()))
    }
}

impl fmt::Display for PageBackground {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Theme as stored. Every field may be missing independently.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThemeSettings {
    pub page_background: Option<String>,
    pub button_style: Option<String>,
    pub font_family: Option<String>,
}

impl ThemeSettings {
    pub fn new(page_background: PageBackground, button_style: ButtonStyle, font_family: impl Into<String>) -> Self {
        Self {
            page_background: Some(page_background.token().to_string()),
            button_style: Some(button_style.as_str().to_string()),
            font_family: Some(font_family.into()),
        }
    }

    /// Rejects values outside the known palettes. Missing fields pass.
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(bg) = &self.page_background {
            bg.parse::<PageBackground>()?;
        }
        if let Some(style) = &self.button_style {
            style.parse::<ButtonStyle>()?;
        }
        Ok(())
    }

    pub fn merge(&mut self, other: ThemeSettings) {
        if other.page_background.is_some() {
            self.page_background = other.page_background;
        }
        if other.button_style.is_some() {
            self.button_style = other.button_style;
        }
        if other.font_family.is_some() {
            self.font_family = other.font_family;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.page_background.is_none() && self.button_style.is_none() && self.font_family.is_none()
    }
}
