//! Palette generation from color harmony rules.
//!
//! Each scheme derives its hues from a single base hue drawn from the random
//! source. Given the same draws the output is fully deterministic, which is
//! how the tests pin exact colors down.

use rand::Rng;
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::color::hsl_to_rgb;
use crate::{Color, Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HarmonyScheme {
    #[default]
    Random,
    Monochromatic,
    Complementary,
    Triadic,
    Analogous,
    SplitComplementary,
}

impl HarmonyScheme {
    pub const ALL: [HarmonyScheme; 6] = [
        HarmonyScheme::Random,
        HarmonyScheme::Monochromatic,
        HarmonyScheme::Complementary,
        HarmonyScheme::Triadic,
        HarmonyScheme::Analogous,
        HarmonyScheme::SplitComplementary,
    ];

    pub fn generate<R: Rng + ?Sized>(self, rng: &mut R) -> Vec<Color> {
        generate(self, rng)
    }
}

impl Display for HarmonyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HarmonyScheme::Random => "random",
            HarmonyScheme::Monochromatic => "monochromatic",
            HarmonyScheme::Complementary => "complementary",
            HarmonyScheme::Triadic => "triadic",
            HarmonyScheme::Analogous => "analogous",
            HarmonyScheme::SplitComplementary => "splitComplementary",
        };

        write!(f, "{}", name)
    }
}

impl FromStr for HarmonyScheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().replace(['-', '_'], "");

        HarmonyScheme::ALL
            .into_iter()
            .find(|scheme| scheme.to_string().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| Error::UnknownScheme(s.to_string()))
    }
}

pub fn generate<R: Rng + ?Sized>(scheme: HarmonyScheme, rng: &mut R) -> Vec<Color> {
    match scheme {
        HarmonyScheme::Random => random(rng),
        HarmonyScheme::Monochromatic => monochromatic(base_hue(rng)),
        HarmonyScheme::Complementary => complementary(base_hue(rng)),
        HarmonyScheme::Triadic => triadic(base_hue(rng)),
        HarmonyScheme::Analogous => analogous(rng),
        HarmonyScheme::SplitComplementary => split_complementary(base_hue(rng)),
    }
}

/// A color with a random hue, saturation in `[40, 90)` and lightness in `[30, 70)`.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    let hue = rng.gen_range(0..360);
    let saturation = rng.gen_range(40..90);
    let lightness = rng.gen_range(30..70);

    hsl(hue as f32, saturation as f32, lightness as f32)
}

fn base_hue<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen_range(0..360) as f32
}

fn hsl(hue: f32, saturation: f32, lightness: f32) -> Color {
    hsl_to_rgb(hue % 360., saturation, lightness)
}

fn random<R: Rng + ?Sized>(rng: &mut R) -> Vec<Color> {
    let count = rng.gen_range(3..=6);
    (0..count).map(|_| random_color(rng)).collect()
}

fn monochromatic(base: f32) -> Vec<Color> {
    (0..5)
        .map(|i| hsl(base, 60. + 8. * i as f32, 20. + 15. * i as f32))
        .collect()
}

fn complementary(base: f32) -> Vec<Color> {
    let complement = base + 180.;

    vec![
        hsl(base, 70., 50.),
        hsl(complement, 70., 50.),
        hsl(base, 50., 30.),
        hsl(complement, 50., 70.),
    ]
}

fn triadic(base: f32) -> Vec<Color> {
    vec![
        hsl(base, 70., 50.),
        hsl(base + 120., 70., 50.),
        hsl(base + 240., 70., 50.),
    ]
}

fn analogous<R: Rng + ?Sized>(rng: &mut R) -> Vec<Color> {
    let base = base_hue(rng);

    (0..5)
        .map(|i| {
            let saturation = rng.gen_range(60.0..80.0);
            let lightness = rng.gen_range(40.0..70.0);
            hsl(base + 30. * i as f32, saturation, lightness)
        })
        .collect()
}

fn split_complementary(base: f32) -> Vec<Color> {
    vec![
        hsl(base, 70., 50.),
        hsl(base + 150., 70., 50.),
        hsl(base + 210., 70., 50.),
        hsl(base, 40., 70.),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Palette;
    use pretty_assertions::assert_eq;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Every draw returns the low end of its range, so the base hue is 0.
    fn zeros() -> StepRng {
        StepRng::new(0, 0)
    }

    fn hues(colors: &[Color]) -> Vec<u16> {
        colors.iter().map(|c| c.to_hsl().rounded().0).collect()
    }

    #[test]
    fn scheme_sizes() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let random = generate(HarmonyScheme::Random, &mut rng).len();
            assert!((3..=6).contains(&random), "random produced {}", random);

            assert_eq!(generate(HarmonyScheme::Monochromatic, &mut rng).len(), 5);
            assert_eq!(generate(HarmonyScheme::Analogous, &mut rng).len(), 5);
            assert_eq!(generate(HarmonyScheme::Complementary, &mut rng).len(), 4);
            assert_eq!(generate(HarmonyScheme::SplitComplementary, &mut rng).len(), 4);
            assert_eq!(generate(HarmonyScheme::Triadic, &mut rng).len(), 3);
        }
    }

    #[test]
    fn every_scheme_fits_in_a_palette() {
        let mut rng = StdRng::seed_from_u64(42);

        for scheme in HarmonyScheme::ALL {
            for _ in 0..20 {
                assert!(Palette::new(scheme.generate(&mut rng)).is_ok());
            }
        }
    }

    #[test]
    fn triadic_from_a_red_base() {
        assert_eq!(
            generate(HarmonyScheme::Triadic, &mut zeros()),
            vec![
                Color::new(217, 38, 38),
                Color::new(38, 217, 38),
                Color::new(38, 38, 217),
            ]
        );
    }

    #[test]
    fn complementary_pairs_opposite_hues() {
        let colors = generate(HarmonyScheme::Complementary, &mut zeros());

        assert_eq!(colors[0], Color::new(217, 38, 38));
        assert_eq!(colors[1], Color::new(38, 217, 217));
        assert_eq!(hues(&colors), vec![0, 180, 0, 180]);
        assert_eq!(colors[2].to_hsl().rounded(), (0, 50, 30));
        assert_eq!(colors[3].to_hsl().rounded(), (180, 50, 70));
    }

    #[test]
    fn split_complementary_hues() {
        let colors = generate(HarmonyScheme::SplitComplementary, &mut zeros());
        assert_eq!(hues(&colors), vec![0, 150, 210, 0]);
        assert_eq!(colors[3].to_hsl().rounded(), (0, 40, 70));
    }

    #[test]
    fn monochromatic_keeps_one_hue_and_gets_lighter() {
        let colors = generate(HarmonyScheme::Monochromatic, &mut zeros());
        let lightness: Vec<u8> = colors.iter().map(|c| c.to_hsl().rounded().2).collect();

        assert_eq!(lightness, vec![20, 35, 50, 65, 80]);
        assert!(hues(&colors).iter().all(|h| *h == 0));
    }

    #[test]
    fn analogous_steps_by_thirty_degrees() {
        let colors = generate(HarmonyScheme::Analogous, &mut zeros());
        assert_eq!(hues(&colors), vec![0, 30, 60, 90, 120]);

        for color in colors {
            let (_, s, l) = color.to_hsl().rounded();
            assert!((59..=80).contains(&s), "saturation {}", s);
            assert!((39..=70).contains(&l), "lightness {}", l);
        }
    }

    #[test]
    fn random_uses_the_smallest_count_on_low_draws() {
        let colors = generate(HarmonyScheme::Random, &mut zeros());
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[0], hsl_to_rgb(0., 40., 30.));
    }

    #[test]
    fn random_colors_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..200 {
            let (_, s, l) = random_color(&mut rng).to_hsl().rounded();
            assert!((39..=90).contains(&s), "saturation {}", s);
            assert!((29..=70).contains(&l), "lightness {}", l);
        }
    }

    #[test]
    fn parses_scheme_names() {
        assert_eq!(
            "splitComplementary".parse::<HarmonyScheme>().unwrap(),
            HarmonyScheme::SplitComplementary
        );
        assert_eq!(
            "split-complementary".parse::<HarmonyScheme>().unwrap(),
            HarmonyScheme::SplitComplementary
        );
        assert_eq!("Triadic".parse::<HarmonyScheme>().unwrap(), HarmonyScheme::Triadic);
        assert!(matches!(
            "tetradic".parse::<HarmonyScheme>(),
            Err(Error::UnknownScheme(_))
        ));
    }
}
