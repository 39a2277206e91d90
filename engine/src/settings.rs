use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::str::FromStr;

/// A color value as it appears in settings files and palettes.
///
/// Colors are kept as the text the user or the theme service supplied
/// (`"#1e1e2e"`, `"#fff"`, `"white"`). Syntax checks live with the editor,
/// which is the only place a color is typed in by hand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The fixed, named color fields of [`Settings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorField {
    Foreground,
    Background,
    Highlight,
    Selected,
    Comment,
    LastModified,
    AllModified,
    AccentText,
}

impl ColorField {
    pub const ALL: [ColorField; 8] = [
        ColorField::Foreground,
        ColorField::Background,
        ColorField::Highlight,
        ColorField::Selected,
        ColorField::Comment,
        ColorField::LastModified,
        ColorField::AllModified,
        ColorField::AccentText,
    ];

    /// The JSON key this field is stored under.
    pub fn key(self) -> &'static str {
        match self {
            ColorField::Foreground => "foreground",
            ColorField::Background => "background",
            ColorField::Highlight => "highlight",
            ColorField::Selected => "selected",
            ColorField::Comment => "comment",
            ColorField::LastModified => "lastModified",
            ColorField::AllModified => "allModified",
            ColorField::AccentText => "accentText",
        }
    }
}

impl Display for ColorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when a string names no known color field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown color field '{0}'")]
pub struct UnknownColorField(pub String);

impl FromStr for ColorField {
    type Err = UnknownColorField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept both the JSON key and its snake_case spelling
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        ColorField::ALL
            .into_iter()
            .find(|field| field.key().to_lowercase() == normalized)
            .ok_or_else(|| UnknownColorField(s.to_string()))
    }
}

/// The full user-configurable state edited by the settings editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    // === Fixed color roles ===
    pub foreground: Color,
    pub background: Color,
    pub highlight: Color,
    pub selected: Color,
    pub comment: Color,
    pub last_modified: Color,
    pub all_modified: Color,
    pub accent_text: Color,

    // === General-purpose accents ===
    pub accent_colors: Vec<Color>,

    // === Non-color settings ===
    pub feature_flags: BTreeMap<String, bool>,
    pub backend_url: String,
}

impl Settings {
    pub fn color(&self, field: ColorField) -> &Color {
        match field {
            ColorField::Foreground => &self.foreground,
            ColorField::Background => &self.background,
            ColorField::Highlight => &self.highlight,
            ColorField::Selected => &self.selected,
            ColorField::Comment => &self.comment,
            ColorField::LastModified => &self.last_modified,
            ColorField::AllModified => &self.all_modified,
            ColorField::AccentText => &self.accent_text,
        }
    }

    pub fn set_color(&mut self, field: ColorField, color: Color) {
        let slot = match field {
            ColorField::Foreground => &mut self.foreground,
            ColorField::Background => &mut self.background,
            ColorField::Highlight => &mut self.highlight,
            ColorField::Selected => &mut self.selected,
            ColorField::Comment => &mut self.comment,
            ColorField::LastModified => &mut self.last_modified,
            ColorField::AllModified => &mut self.all_modified,
            ColorField::AccentText => &mut self.accent_text,
        };
        *slot = color;
    }

    pub fn feature_enabled(&self, name: &str) -> bool {
        self.feature_flags.get(name).copied().unwrap_or(false)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            foreground: "#cdd6f4".into(),
            background: "#1e1e2e".into(),
            highlight: "#f9e2af".into(),
            selected: "#89b4fa".into(),
            comment: "#6c7086".into(),
            last_modified: "#a6e3a1".into(),
            all_modified: "#fab387".into(),
            accent_text: "#11111b".into(),
            accent_colors: vec![
                "#f38ba8".into(),
                "#94e2d5".into(),
                "#cba6f7".into(),
                "#74c7ec".into(),
            ],
            feature_flags: BTreeMap::new(),
            backend_url: String::new(),
        }
    }
}
