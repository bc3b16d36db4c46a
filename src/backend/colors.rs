use anyhow::Context;
use core::fmt::{self, Display};
use core::str::FromStr;
use log::{debug, warn};
use serde::de::Error;
use serde::Deserialize;
use std::{fs, io, path::Path};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseColorError {
    #[error("color must start with `#`")]
    MissingHash,
    #[error("color must have exactly 6 hex digits, got {0}")]
    InvalidLength(usize),
    #[error("invalid hex digit in color")]
    InvalidDigit,
}

/// An opaque 24-bit color, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Scale lightness and saturation by `factor`, the same way GTK's css `shade()` does.
    #[must_use]
    pub fn shade(self, factor: f64) -> Self {
        let (hue, lightness, saturation) = self.to_hls();
        Self::from_hls(
            hue,
            (lightness * factor).clamp(0., 1.),
            (saturation * factor).clamp(0., 1.),
        )
    }

    #[allow(clippy::float_cmp)]
    fn to_hls(self) -> (f64, f64, f64) {
        let red = f64::from(self.red) / 255.;
        let green = f64::from(self.green) / 255.;
        let blue = f64::from(self.blue) / 255.;

        let max = red.max(green).max(blue);
        let min = red.min(green).min(blue);
        let lightness = (max + min) / 2.;

        if max == min {
            return (0., lightness, 0.);
        }

        let delta = max - min;
        let saturation = if lightness <= 0.5 {
            delta / (max + min)
        } else {
            delta / (2. - max - min)
        };

        let sector = if red == max {
            (green - blue) / delta
        } else if green == max {
            2. + (blue - red) / delta
        } else {
            4. + (red - green) / delta
        };
        let mut hue = sector * 60.;
        if hue < 0. {
            hue += 360.;
        }

        (hue, lightness, saturation)
    }

    fn from_hls(hue: f64, lightness: f64, saturation: f64) -> Self {
        if saturation == 0. {
            let value = to_channel(lightness);
            return Self::new(value, value, value);
        }

        let m2 = if lightness <= 0.5 {
            lightness * (1. + saturation)
        } else {
            lightness + saturation - lightness * saturation
        };
        let m1 = 2. * lightness - m2;

        Self::new(
            to_channel(hue_to_component(m1, m2, hue + 120.)),
            to_channel(hue_to_component(m1, m2, hue)),
            to_channel(hue_to_component(m1, m2, hue - 120.)),
        )
    }
}

fn hue_to_component(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(360.);
    if hue < 60. {
        m1 + (m2 - m1) * hue / 60.
    } else if hue < 180. {
        m2
    } else if hue < 240. {
        m1 + (m2 - m1) * (240. - hue) / 60.
    } else {
        m1
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(value: f64) -> u8 {
    (value * 255.).round().clamp(0., 255.) as u8
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').ok_or(ParseColorError::MissingHash)?;
        if hex.len() != 6 {
            return Err(ParseColorError::InvalidLength(hex.len()));
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidDigit);
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ParseColorError::InvalidDigit)
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let color = String::deserialize(deserializer)?;
        color.parse().map_err(D::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub accent: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::new(0x28, 0x2a, 0x36),
            foreground: Color::new(0xf8, 0xf8, 0xf2),
            accent: Color::new(0xbd, 0x93, 0xf9),
        }
    }
}

// Subset of pywal's `colors.json`, everything else is ignored
#[derive(Debug, Deserialize)]
struct RawColors {
    special: RawSpecial,
    colors: RawNumbered,
}

#[derive(Debug, Deserialize)]
struct RawSpecial {
    background: Color,
    foreground: Color,
}

#[derive(Debug, Deserialize)]
struct RawNumbered {
    color4: Color,
}

impl From<RawColors> for Palette {
    fn from(raw: RawColors) -> Self {
        Self {
            background: raw.special.background,
            foreground: raw.special.foreground,
            accent: raw.colors.color4,
        }
    }
}

impl Palette {
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let raw: RawColors = serde_json::from_str(content).context("Invalid color scheme")?;
        Ok(raw.into())
    }
}

/// Load the palette from pywal's cache, falling back to the default one on any error.
pub fn load(path: Option<&Path>) -> Palette {
    let Some(path) = path else {
        debug!("No color scheme location, using the default palette");
        return Palette::default();
    };

    match read(path) {
        Ok(palette) => {
            debug!("Loaded palette from {}", path.display());
            palette
        }
        Err(e) => {
            if e
                .downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
            {
                debug!("{} does not exist, using the default palette", path.display());
            } else {
                warn!("Cannot load palette, using the default one: {e:?}");
            }
            Palette::default()
        }
    }
}

fn read(path: &Path) -> anyhow::Result<Palette> {
    let content = fs::read_to_string(path)?;
    Palette::from_json(&content).with_context(|| format!("Cannot parse {}", path.display()))
}
