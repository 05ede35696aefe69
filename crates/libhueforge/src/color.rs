use palette::{FromColor, Hsl, Srgb};
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::{Error, Result};

/// An sRGB color with 8 bits per channel.
///
/// This is the only stored representation. Hex strings and HSL triples are
/// derived on demand, so a palette never carries two views that disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Color { red, green, blue }
    }

    /// Parses `#rrggbb` or the `#rgb` shorthand. Hex digits may be upper case.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor(hex.to_string());

        let digits = hex.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let expanded = match digits.len() {
            // #rgb -> #rrggbb
            3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => digits.to_string(),
            _ => return Err(invalid()),
        };

        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());

        Ok(Color::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    pub fn rgb_string(&self) -> String {
        format!("rgb({}, {}, {})", self.red, self.green, self.blue)
    }

    pub fn to_hsl(&self) -> HslColor {
        rgb_to_hsl(*self)
    }

    pub(crate) fn to_srgb(self) -> Srgb {
        Srgb::new(self.red, self.green, self.blue).into_format::<f32>()
    }

    pub(crate) fn channels(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Color::from_hex(s)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Color::from_hex(&value)
    }
}

/// HSL view of a [Color].
///
/// Hue is in degrees `[0, 360)`, saturation and lightness in percent. The
/// components keep their fractional part so that converting back lands
/// within one unit of the source color; use [HslColor::rounded] for the
/// integer form shown to users, which is lossy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslColor {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl HslColor {
    pub fn rounded(&self) -> (u16, u8, u8) {
        (
            (self.hue.round() as u16) % 360,
            self.saturation.round().clamp(0., 100.) as u8,
            self.lightness.round().clamp(0., 100.) as u8,
        )
    }

    pub fn to_rgb(&self) -> Color {
        hsl_to_rgb(self.hue, self.saturation, self.lightness)
    }
}

impl Display for HslColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, s, l) = self.rounded();
        write!(f, "hsl({}, {}%, {}%)", h, s, l)
    }
}

/// Standard HSL to RGB conversion.
///
/// Hue wraps modulo 360, saturation and lightness are clamped to `[0, 100]`.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> Color {
    let hsl: Hsl = Hsl::new(
        hue.rem_euclid(360.),
        saturation.clamp(0., 100.) / 100.,
        lightness.clamp(0., 100.) / 100.,
    );
    let srgb: Srgb = Srgb::from_color(hsl);

    Color::new(
        to_channel(srgb.red),
        to_channel(srgb.green),
        to_channel(srgb.blue),
    )
}

/// Standard RGB to HSL conversion. Grays get a hue and saturation of zero.
pub fn rgb_to_hsl(color: Color) -> HslColor {
    let hsl: Hsl = Hsl::from_color(color.to_srgb());

    if color.red == color.green && color.green == color.blue {
        return HslColor {
            hue: 0.,
            saturation: 0.,
            lightness: hsl.lightness * 100.,
        };
    }

    HslColor {
        hue: hsl.hue.into_positive_degrees() % 360.,
        saturation: hsl.saturation * 100.,
        lightness: hsl.lightness * 100.,
    }
}

pub(crate) fn to_channel(value: f32) -> u8 {
    (value * 255.).round().clamp(0., 255.) as u8
}
