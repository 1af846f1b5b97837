//! Background presets for the timer surfaces.
//!
//! Presets are opaque to the timer core: the engine only resolves the
//! selected index to a [`GradientPreset`], and [`resolve_background`] turns
//! that preset into a [`Background`] for the rendering collaborator.

mod image;

pub use image::{FsImageLoader, ImageLoader, LoadedImage, MockImageLoader};

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Index of the preset used when the selection is out of range ("Ocean Depth").
pub const DEFAULT_PRESET_INDEX: usize = 10;

// ============================================================================
// Color
// ============================================================================

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Fully transparent color.
    pub const CLEAR: Color = Color::rgba(0, 0, 0, 0);

    /// Opaque black.
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rgb`, `#rrggbb` or `#aarrggbb`.
    ///
    /// Anything else yields opaque black rather than an error.
    pub fn from_hex(hex: &str) -> Self {
        let digits: String = hex.chars().filter(char::is_ascii_alphanumeric).collect();
        let Ok(value) = u32::from_str_radix(&digits, 16) else {
            return Self::BLACK;
        };
        let byte = |shift: u32| ((value >> shift) & 0xFF) as u8;

        match digits.len() {
            3 => {
                let nibble = |shift: u32| (((value >> shift) & 0xF) * 17) as u8;
                Self::rgba(nibble(8), nibble(4), nibble(0), 255)
            }
            6 => Self::rgba(byte(16), byte(8), byte(0), 255),
            8 => Self::rgba(byte(16), byte(8), byte(0), byte(24)),
            _ => Self::BLACK,
        }
    }

    /// Returns the same color with the given opacity (0.0-1.0).
    pub fn with_opacity(self, opacity: f64) -> Self {
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a: alpha, ..self }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.a, self.r, self.g, self.b)
        }
    }
}

// ============================================================================
// GradientPreset
// ============================================================================

/// How a preset is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientKind {
    /// Transparent background
    None,
    /// User-selected image
    Image,
    /// 3x3 mesh gradient
    Mesh,
    /// Linear gradient along `angle`
    Linear,
}

impl GradientKind {
    /// Returns the string representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            GradientKind::None => "none",
            GradientKind::Image => "image",
            GradientKind::Mesh => "mesh",
            GradientKind::Linear => "linear",
        }
    }
}

/// A named background preset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientPreset {
    pub name: &'static str,
    pub colors: Vec<Color>,
    /// Gradient angle in degrees
    pub angle: f64,
    pub kind: GradientKind,
}

impl GradientPreset {
    fn new(name: &'static str, hex: &[&str], kind: GradientKind) -> Self {
        Self {
            name,
            colors: hex.iter().map(|h| Color::from_hex(h)).collect(),
            angle: 0.0,
            kind,
        }
    }
}

/// Returns every preset in picker order.
pub fn gradient_presets() -> Vec<GradientPreset> {
    use GradientKind::{Image, Mesh};

    let clear = |name: &'static str| GradientPreset {
        name,
        colors: vec![Color::CLEAR],
        angle: 0.0,
        kind: GradientKind::None,
    };

    vec![
        clear("None (Transparent)"),
        GradientPreset {
            kind: Image,
            ..clear("Custom Image")
        },
        GradientPreset::new(
            "Love, Harmony & Peace",
            &[
                "#ffff00", "#e6a64a", "#c54b8c", "#e6a64a", "#c54b8c", "#d47a6e", "#c54b8c",
                "#d47a6e", "#c54b8c",
            ],
            Mesh,
        ),
        GradientPreset::new(
            "Harmony & Creative",
            &[
                "#f5deb3", "#faef5a", "#ffff00", "#faef5a", "#e6a64a", "#c54b8c", "#ffff00",
                "#c54b8c", "#c54b8c",
            ],
            Mesh,
        ),
        GradientPreset::new(
            "Focus & Achievements",
            &[
                "#00ffff", "#00bfff", "#007fff", "#00bfff", "#7654a7", "#eb284f", "#007fff",
                "#eb284f", "#eb284f",
            ],
            Mesh,
        ),
        GradientPreset::new(
            "Focus, Achievements & Creative",
            &[
                "#f5deb3", "#7aefe1", "#00ffff", "#7aefe1", "#007fff", "#7654a7", "#00ffff",
                "#007fff", "#eb284f",
            ],
            Mesh,
        ),
        GradientPreset::new(
            "Freedom & Deep Thinking",
            &[
                "#ccccff", "#d08cc6", "#c54b8c", "#d08cc6", "#d8396e", "#eb284f", "#c54b8c",
                "#eb284f", "#eb284f",
            ],
            Mesh,
        ),
        GradientPreset::new(
            "Freedom, Thinking & Creative",
            &[
                "#f5deb3", "#e0d5d9", "#ccccff", "#e0d5d9", "#c54b8c", "#d8396e", "#ccccff",
                "#c54b8c", "#eb284f",
            ],
            Mesh,
        ),
        GradientPreset::new(
            "Degrade Negative Thoughts",
            &[
                "#b22222", "#c17791", "#ccccff", "#c17791", "#c54b8c", "#e2a647", "#ccccff",
                "#c54b8c", "#ffff00",
            ],
            Mesh,
        ),
        GradientPreset::new(
            "Cosmic Dream",
            &[
                "#1a1a2e", "#16213e", "#0f3460", "#533483", "#e94560", "#0f3460", "#1a1a2e",
                "#533483", "#16213e",
            ],
            Mesh,
        ),
        GradientPreset::new(
            "Ocean Depth",
            &[
                "#0077b6", "#00b4d8", "#023e8a", "#0096c7", "#48cae4", "#0077b6", "#023e8a",
                "#00b4d8", "#90e0ef",
            ],
            Mesh,
        ),
        GradientPreset::new(
            "Sunset Glow",
            &[
                "#ff6b6b", "#ffd93d", "#ff8c42", "#ff6b6b", "#ffd93d", "#ff8c42", "#c44569",
                "#f8b500", "#ff6348",
            ],
            Mesh,
        ),
        GradientPreset::new(
            "Blossom",
            &[
                "#ff9a9e", "#fecfef", "#fad0c4", "#fbc2eb", "#a18cd1", "#fad0c4", "#ff9a9e",
                "#fecfef", "#fbc2eb",
            ],
            Mesh,
        ),
        GradientPreset::new(
            "Northern Lights",
            &[
                "#0f0c29", "#302b63", "#24243e", "#00d9ff", "#00ff87", "#302b63", "#0f0c29",
                "#24243e", "#00d9ff",
            ],
            Mesh,
        ),
        GradientPreset::new(
            "Ember",
            &[
                "#f12711", "#f5af19", "#c33764", "#f12711", "#ff6b35", "#f5af19", "#c33764",
                "#f12711", "#f5af19",
            ],
            Mesh,
        ),
    ]
}

/// Resolves a preset index, clamping anything out of range to the default.
pub fn preset_at(index: i64) -> GradientPreset {
    let mut presets = gradient_presets();
    let index = usize::try_from(index)
        .ok()
        .filter(|i| *i < presets.len())
        .unwrap_or(DEFAULT_PRESET_INDEX);
    presets.swap_remove(index)
}

// ============================================================================
// Background
// ============================================================================

/// What the rendering collaborator should draw behind the timer.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Background {
    /// Nothing; the surface is transparent
    #[default]
    None,
    /// A loaded image file
    Image(PathBuf),
    /// 3x3 mesh gradient, row-major
    Mesh(Box<[Color; 9]>),
    /// Linear gradient
    Linear { colors: Vec<Color>, angle: f64 },
    /// Flat placeholder color
    Solid(Color),
}

/// Placeholder drawn when the custom image cannot be loaded.
pub const IMAGE_PLACEHOLDER: Color = Color::rgba(0, 0, 0, 77);

/// Turns a preset into a concrete background.
///
/// `Image` presets go through `loader`; a missing or unreadable image
/// becomes [`IMAGE_PLACEHOLDER`]. Mesh presets without exactly nine colors
/// degrade to a linear gradient.
pub fn resolve_background(
    preset: &GradientPreset,
    image_path: &str,
    loader: &dyn ImageLoader,
) -> Background {
    match preset.kind {
        GradientKind::None => Background::None,
        GradientKind::Image => {
            if image_path.is_empty() {
                return Background::Solid(IMAGE_PLACEHOLDER);
            }
            match loader.load(image_path.as_ref()) {
                Some(image) => Background::Image(image.path),
                None => {
                    tracing::debug!(path = image_path, "Custom image unavailable, using placeholder");
                    Background::Solid(IMAGE_PLACEHOLDER)
                }
            }
        }
        GradientKind::Mesh => match <[Color; 9]>::try_from(preset.colors.as_slice()) {
            Ok(grid) => Background::Mesh(Box::new(grid)),
            Err(_) => Background::Linear {
                colors: preset.colors.clone(),
                angle: preset.angle,
            },
        },
        GradientKind::Linear => match preset.colors.as_slice() {
            [single] => Background::Solid(*single),
            colors => Background::Linear {
                colors: colors.to_vec(),
                angle: preset.angle,
            },
        },
    }
}
