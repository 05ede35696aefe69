use std::ops::Deref;

use crate::{Color, Error, Result};

/// An ordered list of colors holding between [Palette::MIN_COLORS] and
/// [Palette::MAX_COLORS] entries.
///
/// Every mutation checks the bounds before touching the list, so a rejected
/// call leaves the palette exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub const MIN_COLORS: usize = 2;
    pub const MAX_COLORS: usize = 10;

    pub fn new(colors: Vec<Color>) -> Result<Self> {
        if colors.len() < Self::MIN_COLORS {
            return Err(Error::MinimumSize {
                min: Self::MIN_COLORS,
            });
        }
        if colors.len() > Self::MAX_COLORS {
            return Err(Error::Capacity {
                max: Self::MAX_COLORS,
            });
        }

        Ok(Palette { colors })
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn is_full(&self) -> bool {
        self.colors.len() >= Self::MAX_COLORS
    }

    pub fn push(&mut self, color: Color) -> Result<()> {
        if self.is_full() {
            return Err(Error::Capacity {
                max: Self::MAX_COLORS,
            });
        }

        self.colors.push(color);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Color> {
        if self.colors.len() <= Self::MIN_COLORS {
            return Err(Error::MinimumSize {
                min: Self::MIN_COLORS,
            });
        }
        self.check_index(index)?;

        Ok(self.colors.remove(index))
    }

    /// Moves the color at `from` so it ends up at `to`.
    ///
    /// The color is removed first and then inserted, so every color between
    /// the two indices shifts by one.
    pub fn move_color(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_index(from)?;
        self.check_index(to)?;

        let color = self.colors.remove(from);
        self.colors.insert(to, color);
        Ok(())
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.colors.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.colors.len(),
            });
        }

        Ok(())
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            colors: vec![
                Color::new(0x66, 0x7e, 0xea),
                Color::new(0x76, 0x4b, 0xa2),
                Color::new(0xf0, 0x93, 0xfb),
            ],
        }
    }
}

impl Deref for Palette {
    type Target = [Color];

    fn deref(&self) -> &[Color] {
        &self.colors
    }
}

impl TryFrom<Vec<Color>> for Palette {
    type Error = Error;

    fn try_from(colors: Vec<Color>) -> Result<Self> {
        Palette::new(colors)
    }
}

impl From<Palette> for Vec<Color> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grays(n: u8) -> Vec<Color> {
        (0..n).map(|i| Color::new(i * 20, i * 20, i * 20)).collect()
    }

    #[test]
    fn enforces_bounds_on_construction() {
        assert!(matches!(Palette::new(grays(1)), Err(Error::MinimumSize { min: 2 })));
        assert!(matches!(Palette::new(grays(11)), Err(Error::Capacity { max: 10 })));
        assert_eq!(Palette::new(grays(2)).unwrap().len(), 2);
        assert_eq!(Palette::new(grays(10)).unwrap().len(), 10);
    }

    #[test]
    fn push_rejects_an_eleventh_color() {
        let mut palette = Palette::new(grays(10)).unwrap();
        let before = palette.clone();

        assert!(matches!(palette.push(Color::WHITE), Err(Error::Capacity { .. })));
        assert_eq!(palette, before);
    }

    #[test]
    fn remove_keeps_two_colors() {
        let mut palette = Palette::new(grays(2)).unwrap();

        assert!(matches!(palette.remove(0), Err(Error::MinimumSize { .. })));
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn move_color_uses_splice_semantics() {
        let mut palette = Palette::new(grays(4)).unwrap();
        let original = grays(4);

        palette.move_color(0, 2).unwrap();
        assert_eq!(
            palette.colors(),
            &[original[1], original[2], original[0], original[3]]
        );

        palette.move_color(3, 0).unwrap();
        assert_eq!(
            palette.colors(),
            &[original[3], original[1], original[2], original[0]]
        );
    }

    #[test]
    fn move_color_checks_indices() {
        let mut palette = Palette::new(grays(3)).unwrap();
        assert!(matches!(
            palette.move_color(0, 3),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn deserialization_validates_length() {
        assert!(serde_json::from_str::<Palette>(r##"["#ffffff"]"##).is_err());
        assert_eq!(
            serde_json::from_str::<Palette>(r##"["#ffffff", "#000000"]"##).unwrap(),
            Palette::new(vec![Color::WHITE, Color::BLACK]).unwrap()
        );
    }
}
