use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaletteError {
    #[error("Unknown hue '{0}'")]
    UnknownHue(String),
    #[error("Unknown shade '{0}'")]
    UnknownShade(String),
    #[error("Color token must look like 'blue-300', got '{0}'")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hue {
    Slate,
    Gray,
    Zinc,
    Neutral,
    Stone,
    Red,
    Orange,
    Amber,
    Yellow,
    Lime,
    Green,
    Emerald,
    Teal,
    Cyan,
    Sky,
    Blue,
    Indigo,
    Violet,
    Purple,
    Fuchsia,
    Pink,
    Rose,
}

impl Hue {
    pub const ALL: [Hue; 22] = [
        Hue::Slate, Hue::Gray, Hue::Zinc, Hue::Neutral, Hue::Stone, Hue::Red,
        Hue::Orange, Hue::Amber, Hue::Yellow, Hue::Lime, Hue::Green, Hue::Emerald,
        Hue::Teal, Hue::Cyan, Hue::Sky, Hue::Blue, Hue::Indigo, Hue::Violet,
        Hue::Purple, Hue::Fuchsia, Hue::Pink, Hue::Rose,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Hue::Slate => "slate",
            Hue::Gray => "gray",
            Hue::Zinc => "zinc",
            Hue::Neutral => "neutral",
            Hue::Stone => "stone",
            Hue::Red => "red",
            Hue::Orange => "orange",
            Hue::Amber => "amber",
            Hue::Yellow => "yellow",
            Hue::Lime => "lime",
            Hue::Green => "green",
            Hue::Emerald => "emerald",
            Hue::Teal => "teal",
            Hue::Cyan => "cyan",
            Hue::Sky => "sky",
            Hue::Blue => "blue",
            Hue::Indigo => "indigo",
            Hue::Violet => "violet",
            Hue::Purple => "purple",
            Hue::Fuchsia => "fuchsia",
            Hue::Pink => "pink",
            Hue::Rose => "rose",
        }
    }

    /// The 500 shade of the hue.
    fn base_rgb(self) -> (u8, u8, u8) {
        match self {
            Hue::Slate => (0x64, 0x74, 0x8b),
            Hue::Gray => (0x6b, 0x72, 0x80),
            Hue::Zinc => (0x71, 0x71, 0x7a),
            Hue::Neutral => (0x73, 0x73, 0x73),
            Hue::Stone => (0x78, 0x71, 0x6c),
            Hue::Red => (0xef, 0x44, 0x44),
            Hue::Orange => (0xf9, 0x73, 0x16),
            Hue::Amber => (0xf5, 0x9e, 0x0b),
            Hue::Yellow => (0xea, 0xb3, 0x08),
            Hue::Lime => (0x84, 0xcc, 0x16),
            Hue::Green => (0x22, 0xc5, 0x5e),
            Hue::Emerald => (0x10, 0xb9, 0x81),
            Hue::Teal => (0x14, 0xb8, 0xa6),
            Hue::Cyan => (0x06, 0xb6, 0xd4),
            Hue::Sky => (0x0e, 0xa5, 0xe9),
            Hue::Blue => (0x3b, 0x82, 0xf6),
            Hue::Indigo => (0x63, 0x66, 0xf1),
            Hue::Violet => (0x8b, 0x5c, 0xf6),
            Hue::Purple => (0xa8, 0x55, 0xf7),
            Hue::Fuchsia => (0xd9, 0x46, 0xef),
            Hue::Pink => (0xec, 0x48, 0x99),
            Hue::Rose => (0xf4, 0x3f, 0x5e),
        }
    }

    pub fn next(self) -> Hue {
        let idx = Self::ALL.iter().position(|h| *h == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Hue {
        let idx = Self::ALL.iter().position(|h| *h == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl FromStr for Hue {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|hue| hue.as_str() == s)
            .ok_or_else(|| PaletteError::UnknownHue(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shade {
    S50,
    S100,
    S200,
    S300,
    S400,
    S500,
    S600,
    S700,
    S800,
    S900,
}

impl Shade {
    pub const ALL: [Shade; 10] = [
        Shade::S50, Shade::S100, Shade::S200, Shade::S300, Shade::S400,
        Shade::S500, Shade::S600, Shade::S700, Shade::S800, Shade::S900,
    ];

    pub fn value(self) -> u16 {
        match self {
            Shade::S50 => 50,
            Shade::S100 => 100,
            Shade::S200 => 200,
            Shade::S300 => 300,
            Shade::S400 => 400,
            Shade::S500 => 500,
            Shade::S600 => 600,
            Shade::S700 => 700,
            Shade::S800 => 800,
            Shade::S900 => 900,
        }
    }

    pub fn lighter(self) -> Shade {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[idx.saturating_sub(1)]
    }

    pub fn darker(self) -> Shade {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1).min(Self::ALL.len() - 1)]
    }

    /// Percent mixed towards white (positive) or black (negative).
    fn mix(self) -> i32 {
        match self {
            Shade::S50 => 95,
            Shade::S100 => 85,
            Shade::S200 => 70,
            Shade::S300 => 50,
            Shade::S400 => 25,
            Shade::S500 => 0,
            Shade::S600 => -15,
            Shade::S700 => -30,
            Shade::S800 => -45,
            Shade::S900 => -60,
        }
    }
}

impl FromStr for Shade {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u16 = s.parse().map_err(|_| PaletteError::UnknownShade(s.to_string()))?;
        Self::ALL
            .iter()
            .copied()
            .find(|shade| shade.value() == value)
            .ok_or_else(|| PaletteError::UnknownShade(s.to_string()))
    }
}

/// A palette entry. The string form (`"blue-300"`) is only a rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorToken {
    pub hue: Hue,
    pub shade: Shade,
}

impl ColorToken {
    pub const fn new(hue: Hue, shade: Shade) -> Self {
        Self { hue, shade }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        let (r, g, b) = self.hue.base_rgb();
        let mix = self.shade.mix();
        let channel = |c: u8| -> u8 {
            let c = c as i32;
            let mixed = if mix >= 0 {
                c + (255 - c) * mix / 100
            } else {
                c * (100 + mix) / 100
            };
            mixed.clamp(0, 255) as u8
        };
        (channel(r), channel(g), channel(b))
    }

    pub fn hex(self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Light shades need dark text on top of them.
    pub fn is_light(self) -> bool {
        self.shade <= Shade::S300
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.hue.as_str(), self.shade.value())
    }
}

impl FromStr for ColorToken {
    type Err = PaletteError;

    /// Also accepts the role-prefixed form used by older data files
    /// (`bg-blue-300`, `border-orange-500`, `text-red-500`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = ["bg-", "border-", "text-"]
            .iter()
            .find_map(|prefix| trimmed.strip_prefix(prefix))
            .unwrap_or(trimmed);

        let (hue, shade) = bare
            .rsplit_once('-')
            .ok_or_else(|| PaletteError::Malformed(s.to_string()))?;

        Ok(Self { hue: hue.parse()?, shade: shade.parse()? })
    }
}

impl TryFrom<String> for ColorToken {
    type Error = PaletteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColorToken> for String {
    fn from(token: ColorToken) -> Self {
        token.to_string()
    }
}

/// Serde helper for colors that may be blank (`""` on disk).
pub mod optional_token {
    use super::ColorToken;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<ColorToken>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(token) => serializer.serialize_str(&token.to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<ColorToken>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => text.parse().map(Some).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_token() {
        let token: ColorToken = "blue-300".parse().unwrap();
        assert_eq!(token, ColorToken::new(Hue::Blue, Shade::S300));
    }

    #[test]
    fn parses_role_prefixed_tokens() {
        assert_eq!(
            "bg-green-300".parse::<ColorToken>().unwrap(),
            ColorToken::new(Hue::Green, Shade::S300)
        );
        assert_eq!(
            "border-orange-500".parse::<ColorToken>().unwrap(),
            ColorToken::new(Hue::Orange, Shade::S500)
        );
        assert_eq!(
            "text-red-500".parse::<ColorToken>().unwrap(),
            ColorToken::new(Hue::Red, Shade::S500)
        );
    }

    #[test]
    fn rejects_unknown_hue_and_shade() {
        assert_eq!(
            "mauve-300".parse::<ColorToken>(),
            Err(PaletteError::UnknownHue("mauve".to_string()))
        );
        assert_eq!(
            "blue-950".parse::<ColorToken>(),
            Err(PaletteError::UnknownShade("950".to_string()))
        );
        assert!(matches!("blue".parse::<ColorToken>(), Err(PaletteError::Malformed(_))));
    }

    #[test]
    fn display_is_bare_token() {
        assert_eq!(ColorToken::new(Hue::Rose, Shade::S50).to_string(), "rose-50");
    }

    #[test]
    fn base_shade_matches_palette_hex() {
        assert_eq!(ColorToken::new(Hue::Blue, Shade::S500).hex(), "#3b82f6");
    }

    #[test]
    fn lighter_shades_are_brighter() {
        let light = ColorToken::new(Hue::Green, Shade::S100).rgb();
        let dark = ColorToken::new(Hue::Green, Shade::S900).rgb();
        assert!(light.0 > dark.0 && light.1 > dark.1 && light.2 > dark.2);
    }

    #[test]
    fn hue_cycling_wraps() {
        assert_eq!(Hue::Rose.next(), Hue::Slate);
        assert_eq!(Hue::Slate.prev(), Hue::Rose);
    }

    #[test]
    fn shade_stepping_saturates() {
        assert_eq!(Shade::S50.lighter(), Shade::S50);
        assert_eq!(Shade::S900.darker(), Shade::S900);
        assert_eq!(Shade::S300.darker(), Shade::S400);
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&ColorToken::new(Hue::Amber, Shade::S200)).unwrap();
        assert_eq!(json, "\"amber-200\"");
    }
}
