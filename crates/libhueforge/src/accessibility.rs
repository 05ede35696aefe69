use std::fmt::{self, Display};
use std::str::FromStr;

use crate::{Color, Error, Result};

pub const AA_NORMAL: f64 = 4.5;
pub const AAA_NORMAL: f64 = 7.;
pub const AA_LARGE: f64 = 3.;

/// WCAG relative luminance of a color, in `[0, 1]`.
pub fn relative_luminance(color: Color) -> f64 {
    let [r, g, b] = color.channels().map(|c| {
        let c = c as f64 / 255.;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    });

    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// WCAG contrast ratio between two colors, from 1 to 21. Argument order does not matter.
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let lum_a = relative_luminance(a);
    let lum_b = relative_luminance(b);

    let lighter = lum_a.max(lum_b);
    let darker = lum_a.min(lum_b);

    (lighter + 0.05) / (darker + 0.05)
}

/// Contrast ratio of a foreground/background pair graded against the WCAG thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastReport {
    pub foreground: Color,
    pub background: Color,
    pub ratio: f64,
}

impl ContrastReport {
    pub fn new(foreground: Color, background: Color) -> Self {
        ContrastReport {
            foreground,
            background,
            ratio: contrast_ratio(foreground, background),
        }
    }

    pub fn aa_normal(&self) -> bool {
        self.ratio >= AA_NORMAL
    }

    pub fn aaa_normal(&self) -> bool {
        self.ratio >= AAA_NORMAL
    }

    pub fn aa_large(&self) -> bool {
        self.ratio >= AA_LARGE
    }

    /// `(label, passed)` for each grade, in the order they are usually shown.
    pub fn grades(&self) -> [(&'static str, bool); 3] {
        [
            ("AA Normal", self.aa_normal()),
            ("AAA Normal", self.aaa_normal()),
            ("AA Large", self.aa_large()),
        ]
    }

    /// The ratio formatted as `4.50:1`.
    pub fn ratio_label(&self) -> String {
        format!("{:.2}:1", self.ratio)
    }
}

/// Kinds of color vision deficiency the simulator can preview.
///
/// The matrices are a simplified two-channel approximation. Good enough for
/// a quick visual check of a palette, not for accessibility certification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deficiency {
    #[default]
    Normal,
    Protanopia,
    Deuteranopia,
    Tritanopia,
}

impl Deficiency {
    pub const ALL: [Deficiency; 4] = [
        Deficiency::Normal,
        Deficiency::Protanopia,
        Deficiency::Deuteranopia,
        Deficiency::Tritanopia,
    ];

    pub fn simulate(self, color: Color) -> Color {
        simulate_deficiency(color, self)
    }
}

impl Display for Deficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Deficiency::Normal => "normal",
            Deficiency::Protanopia => "protanopia",
            Deficiency::Deuteranopia => "deuteranopia",
            Deficiency::Tritanopia => "tritanopia",
        };

        write!(f, "{}", name)
    }
}

impl FromStr for Deficiency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Deficiency::ALL
            .into_iter()
            .find(|d| d.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownDeficiency(s.to_string()))
    }
}

/// Approximates how a color is perceived with the given deficiency.
///
/// Every output channel is computed from the original channels, then rounded
/// and clamped.
pub fn simulate_deficiency(color: Color, deficiency: Deficiency) -> Color {
    let [r, g, b] = color.channels().map(f64::from);

    let (r2, g2, b2) = match deficiency {
        Deficiency::Normal => return color,
        // Red-blind
        Deficiency::Protanopia => (0.567 * r + 0.433 * g, 0.558 * g + 0.442 * b, b),
        // Green-blind
        Deficiency::Deuteranopia => (0.625 * r + 0.375 * g, 0.7 * g + 0.3 * b, b),
        // Blue-blind
        Deficiency::Tritanopia => (r, 0.95 * g + 0.05 * b, 0.433 * b + 0.567 * r),
    };

    let channel = |v: f64| v.clamp(0., 255.).round() as u8;

    Color::new(channel(r2), channel(g2), channel(b2))
}

pub fn simulate_palette(colors: &[Color], deficiency: Deficiency) -> Vec<Color> {
    colors
        .iter()
        .map(|c| simulate_deficiency(*c, deficiency))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hex(s: &str) -> Color {
        Color::from_hex(s).unwrap()
    }

    #[test]
    fn luminance_of_extremes() {
        assert_eq!(relative_luminance(Color::BLACK), 0.);
        assert!((relative_luminance(Color::WHITE) - 1.).abs() < 1e-12);
    }

    #[test]
    fn white_on_black_is_21() {
        let ratio = contrast_ratio(Color::WHITE, Color::BLACK);
        assert!((ratio - 21.).abs() < 1e-9, "got {}", ratio);
    }

    #[test]
    fn contrast_with_itself_is_one() {
        for color in [Color::BLACK, Color::WHITE, hex("#667eea"), hex("#808080")] {
            assert_eq!(contrast_ratio(color, color), 1.);
        }
    }

    #[test]
    fn contrast_is_symmetric() {
        let colors = [hex("#667eea"), hex("#764ba2"), hex("#f093fb"), hex("#123456")];

        for a in colors {
            for b in colors {
                assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
            }
        }
    }

    #[test]
    fn grades_against_wcag_thresholds() {
        let report = ContrastReport::new(Color::BLACK, Color::WHITE);
        assert!(report.aa_normal() && report.aaa_normal() && report.aa_large());
        assert_eq!(report.ratio_label(), "21.00:1");

        // #777777 on white sits just under 4.5
        let report = ContrastReport::new(hex("#777777"), Color::WHITE);
        assert!(!report.aa_normal());
        assert!(!report.aaa_normal());
        assert!(report.aa_large());
        assert_eq!(report.ratio_label(), "4.48:1");
    }

    #[test]
    fn normal_vision_is_identity() {
        let color = hex("#f093fb");
        assert_eq!(simulate_deficiency(color, Deficiency::Normal), color);
    }

    #[test]
    fn simulates_protanopia_on_pure_red() {
        // r' = 0.567 * 255 = 144.585
        assert_eq!(
            simulate_deficiency(Color::new(255, 0, 0), Deficiency::Protanopia),
            Color::new(145, 0, 0)
        );
    }

    #[test]
    fn simulates_deuteranopia_on_pure_red() {
        // r' = 0.625 * 255 = 159.375
        assert_eq!(
            simulate_deficiency(Color::new(255, 0, 0), Deficiency::Deuteranopia),
            Color::new(159, 0, 0)
        );
    }

    #[test]
    fn simulates_tritanopia_on_pure_blue() {
        // g' = 0.05 * 255 = 12.75, b' = 0.433 * 255 = 110.415
        assert_eq!(
            simulate_deficiency(Color::new(0, 0, 255), Deficiency::Tritanopia),
            Color::new(0, 13, 110)
        );
    }

    #[test]
    fn white_stays_white() {
        for deficiency in Deficiency::ALL {
            assert_eq!(simulate_deficiency(Color::WHITE, deficiency), Color::WHITE);
        }
    }

    #[test]
    fn parses_deficiency_names() {
        assert_eq!("Protanopia".parse::<Deficiency>().unwrap(), Deficiency::Protanopia);
        assert_eq!("tritanopia".parse::<Deficiency>().unwrap(), Deficiency::Tritanopia);
        assert!(matches!(
            "achromatopsia".parse::<Deficiency>(),
            Err(Error::UnknownDeficiency(_))
        ));
    }
}
