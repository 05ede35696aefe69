use indexmap::IndexMap;
use std::path::Path;

use crate::{Color, Error, Result};

/// Only every nth pixel is sampled.
pub const SAMPLE_STRIDE: usize = 10;
/// Pixels with a lower alpha are treated as transparent and skipped.
pub const ALPHA_THRESHOLD: u8 = 128;
/// Width of the per-channel quantization buckets.
pub const BUCKET_SIZE: u8 = 32;
pub const MAX_EXTRACTED_COLORS: usize = 8;

/// A decoded image as row-major RGBA bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width as usize * height as usize * 4 != data.len() {
            return Err(Error::InvalidPixelBuffer {
                width,
                height,
                len: data.len(),
            });
        }

        Ok(PixelBuffer {
            width,
            height,
            data,
        })
    }

    /// Decodes an encoded image (PNG or JPEG).
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes).map_err(Error::Decode)?;
        Ok(Self::from_rgba(image.to_rgba8()))
    }

    pub fn open(path: &Path) -> Result<Self> {
        let image = image::open(path).map_err(Error::Decode)?;
        Ok(Self::from_rgba(image.to_rgba8()))
    }

    fn from_rgba(image: image::RgbaImage) -> Self {
        let (width, height) = image.dimensions();

        PixelBuffer {
            width,
            height,
            data: image.into_raw(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data
            .chunks_exact(4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }
}

/// Ranks the colors of an image by how often they occur.
///
/// Near-duplicate colors are merged by quantizing each channel down to a
/// multiple of [BUCKET_SIZE]. Buckets with equal counts keep the order in
/// which they were first seen. Returns at most [MAX_EXTRACTED_COLORS] colors,
/// and possibly fewer than a palette needs.
pub fn extract_dominant_colors(pixels: &PixelBuffer) -> Vec<Color> {
    let mut counts: IndexMap<Color, usize> = IndexMap::new();

    for [r, g, b, a] in pixels.pixels().step_by(SAMPLE_STRIDE) {
        if a < ALPHA_THRESHOLD {
            continue;
        }

        *counts
            .entry(Color::new(quantize(r), quantize(g), quantize(b)))
            .or_insert(0) += 1;
    }

    let mut ranked: Vec<(Color, usize)> = counts.into_iter().collect();
    // Stable, so ties stay in first-seen order
    ranked.sort_by(|(_, a), (_, b)| b.cmp(a));

    log::debug!(
        "Sampled {} buckets from a {}x{} image",
        ranked.len(),
        pixels.width,
        pixels.height
    );

    ranked
        .into_iter()
        .take(MAX_EXTRACTED_COLORS)
        .map(|(color, _)| color)
        .collect()
}

fn quantize(value: u8) -> u8 {
    (value / BUCKET_SIZE) * BUCKET_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> PixelBuffer {
        let data = rgba.repeat((width * height) as usize);
        PixelBuffer::new(width, height, data).unwrap()
    }

    /// Builds a buffer where sampled pixel `i` (every tenth) gets `colors[i]`.
    fn sampled(colors: &[[u8; 4]]) -> PixelBuffer {
        let mut data = Vec::new();
        for rgba in colors {
            for _ in 0..SAMPLE_STRIDE {
                data.extend_from_slice(rgba);
            }
        }

        PixelBuffer::new((colors.len() * SAMPLE_STRIDE) as u32, 1, data).unwrap()
    }

    #[test]
    fn rejects_mismatched_buffers() {
        assert!(matches!(
            PixelBuffer::new(2, 2, vec![0; 15]),
            Err(Error::InvalidPixelBuffer { .. })
        ));
    }

    #[test]
    fn single_color_image_yields_its_bucket() {
        let pixels = solid(20, 20, [200, 100, 50, 255]);
        assert_eq!(extract_dominant_colors(&pixels), vec![Color::new(192, 96, 32)]);
    }

    #[test]
    fn transparent_pixels_are_ignored() {
        assert!(extract_dominant_colors(&solid(10, 10, [255, 0, 0, 127])).is_empty());

        let pixels = sampled(&[[255, 0, 0, 0], [0, 0, 255, 128]]);
        assert_eq!(extract_dominant_colors(&pixels), vec![Color::new(0, 0, 224)]);
    }

    #[test]
    fn near_duplicates_share_a_bucket() {
        let pixels = sampled(&[[10, 20, 30, 255], [31, 0, 1, 255], [32, 0, 0, 255]]);

        assert_eq!(
            extract_dominant_colors(&pixels),
            vec![Color::new(0, 0, 0), Color::new(32, 0, 0)]
        );
    }

    #[test]
    fn only_every_tenth_pixel_is_sampled() {
        // Nine white pixels after every black one are never looked at
        let mut data = Vec::new();
        for _ in 0..10 {
            data.extend_from_slice(&[0, 0, 0, 255]);
            for _ in 1..SAMPLE_STRIDE {
                data.extend_from_slice(&[255, 255, 255, 255]);
            }
        }
        let pixels = PixelBuffer::new(100, 1, data).unwrap();

        assert_eq!(extract_dominant_colors(&pixels), vec![Color::BLACK]);
    }

    #[test]
    fn ranks_by_frequency_and_keeps_first_seen_order_on_ties() {
        let red = [255, 0, 0, 255];
        let green = [0, 255, 0, 255];
        let blue = [0, 0, 255, 255];

        let pixels = sampled(&[green, red, blue, red, blue, green, red]);

        assert_eq!(
            extract_dominant_colors(&pixels),
            vec![
                Color::new(224, 0, 0),
                Color::new(0, 224, 0),
                Color::new(0, 0, 224),
            ]
        );
    }

    #[test]
    fn returns_at_most_eight_colors() {
        let colors: Vec<[u8; 4]> = (0..12u8)
            .map(|i| [(i % 8) * 32, (i / 8) * 32, 0, 255])
            .collect();
        let pixels = sampled(&colors);

        assert_eq!(extract_dominant_colors(&pixels).len(), MAX_EXTRACTED_COLORS);
    }

    #[test]
    fn decodes_png_bytes() {
        let image = image::RgbaImage::from_pixel(4, 4, image::Rgba([40, 80, 120, 255]));
        let mut bytes = std::io::Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();

        let pixels = PixelBuffer::decode(bytes.get_ref()).unwrap();
        assert_eq!((pixels.width(), pixels.height()), (4, 4));
        assert_eq!(extract_dominant_colors(&pixels), vec![Color::new(32, 64, 96)]);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(matches!(
            PixelBuffer::decode(b"definitely not an image"),
            Err(Error::Decode(_))
        ));
    }
}
