use rand::Rng;
use std::fmt::{self, Display};

use crate::harmony::random_color;
use crate::{Color, Error, Result};

pub const MIN_STOPS: usize = 2;
pub const DEFAULT_DIRECTION: &str = "to right";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
    Conic,
}

impl GradientKind {
    /// Unknown names fall back to a linear gradient.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "radial" => GradientKind::Radial,
            "conic" => GradientKind::Conic,
            _ => GradientKind::Linear,
        }
    }
}

impl Display for GradientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GradientKind::Linear => "linear",
            GradientKind::Radial => "radial",
            GradientKind::Conic => "conic",
        };

        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientStop {
    pub color: Color,
    /// Percentage along the gradient, `[0, 100]`.
    pub position: u8,
}

impl GradientStop {
    /// Positions outside `[0, 100]` are clamped.
    pub fn new(color: Color, position: i32) -> Self {
        GradientStop {
            color,
            position: clamp_position(position),
        }
    }
}

/// A CSS gradient.
///
/// Stops are kept sorted by position after every edit. The sort is stable,
/// so stops sharing a position stay in the order they were added, and
/// indices passed to the stop editors refer to that sorted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient {
    stops: Vec<GradientStop>,
    kind: GradientKind,
    direction: String,
}

impl Default for Gradient {
    fn default() -> Self {
        Gradient {
            stops: vec![
                GradientStop::new(Color::new(0x66, 0x7e, 0xea), 0),
                GradientStop::new(Color::new(0x76, 0x4b, 0xa2), 100),
            ],
            kind: GradientKind::Linear,
            direction: DEFAULT_DIRECTION.to_string(),
        }
    }
}

impl Gradient {
    pub fn new(stops: Vec<GradientStop>, kind: GradientKind, direction: &str) -> Result<Self> {
        if stops.len() < MIN_STOPS {
            return Err(Error::GradientStops { min: MIN_STOPS });
        }

        let mut gradient = Gradient {
            stops,
            kind,
            direction: direction.to_string(),
        };
        gradient.sort_stops();

        Ok(gradient)
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    pub fn kind(&self) -> GradientKind {
        self.kind
    }

    pub fn direction(&self) -> &str {
        &self.direction
    }

    pub fn set_kind(&mut self, kind: GradientKind) {
        self.kind = kind;
    }

    pub fn set_direction(&mut self, direction: &str) {
        self.direction = direction.trim().to_string();
    }

    pub fn add_stop(&mut self, color: Color, position: i32) {
        self.stops.push(GradientStop::new(color, position));
        self.sort_stops();
    }

    /// Adds a random color at a random position.
    pub fn add_random_stop<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let position = rng.gen_range(0..=100);
        let color = random_color(rng);
        self.add_stop(color, position);
    }

    /// Fails while the gradient has fewer than three stops, since at least
    /// two must remain.
    pub fn remove_stop(&mut self, index: usize) -> Result<GradientStop> {
        if self.stops.len() <= MIN_STOPS {
            return Err(Error::GradientStops { min: MIN_STOPS });
        }
        self.check_index(index)?;

        Ok(self.stops.remove(index))
    }

    pub fn set_stop_color(&mut self, index: usize, color: Color) -> Result<()> {
        self.check_index(index)?;
        self.stops[index].color = color;
        Ok(())
    }

    pub fn set_stop_position(&mut self, index: usize, position: i32) -> Result<()> {
        self.check_index(index)?;

        let clamped = clamp_position(position);
        if i32::from(clamped) != position {
            log::debug!("Clamped gradient stop position {} to {}", position, clamped);
        }

        self.stops[index].position = clamped;
        self.sort_stops();
        Ok(())
    }

    /// The gradient as a CSS `<image>` value, e.g.
    /// `linear-gradient(to right, #667eea 0%, #764ba2 100%)`.
    pub fn render(&self) -> String {
        let mut stops = self.stops.clone();
        stops.sort_by_key(|s| s.position);

        let stops = stops
            .iter()
            .map(|stop| format!("{} {}%", stop.color.to_hex(), stop.position))
            .collect::<Vec<_>>()
            .join(", ");

        match self.kind {
            GradientKind::Linear => format!("linear-gradient({}, {})", self.direction, stops),
            GradientKind::Radial => format!("radial-gradient(circle, {})", stops),
            GradientKind::Conic => format!("conic-gradient(from 0deg, {})", stops),
        }
    }

    /// A CSS declaration ready to be pasted into a stylesheet.
    pub fn css(&self) -> String {
        format!("background: {};", self.render())
    }

    fn sort_stops(&mut self) {
        self.stops.sort_by_key(|s| s.position);
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.stops.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.stops.len(),
            });
        }

        Ok(())
    }
}

fn clamp_position(position: i32) -> u8 {
    position.clamp(0, 100) as u8
}
