//! Floor-plan geometry: affine transforms, rotation extraction and snapping.
//!
//! Every user edit lands on a 5px grid and a 15° angle step. Snapping always
//! rounds *down* (towards negative infinity for positions).

use std::fmt;
use std::num::ParseFloatError;

use serde::{Deserialize, Serialize};

use crate::lenient;

/// Angle step, in degrees, that rotations snap to.
pub const ANGLE_STEP: i32 = 15;

/// Grid step, in pixels, that positions snap to.
pub const GRID_STEP: i32 = 5;

/// A 2D affine transform in CSS `matrix(a, b, c, d, e, f)` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Pure rotation by `degrees` (clockwise on screen, as CSS `rotate()`).
    #[must_use]
    pub fn rotation(degrees: i32) -> Self {
        let (sin, cos) = f64::from(degrees).to_radians().sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Parse a computed CSS `transform` value.
    ///
    /// Returns `Ok(None)` for the `none` sentinel. Accepts `matrix(...)` and
    /// `rotate(<n>deg)`.
    ///
    /// # Errors
    ///
    /// Returns [`TransformParseError`] for any other syntax.
    pub fn parse_css(value: &str) -> Result<Option<Self>, TransformParseError> {
        let value = value.trim();
        if value.is_empty() || value == "none" {
            return Ok(None);
        }
        if let Some(args) = function_args(value, "matrix") {
            let parts = args
                .split(',')
                .map(|part| part.trim().parse::<f64>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(TransformParseError::Component)?;
            let [a, b, c, d, e, f] = parts[..] else {
                return Err(TransformParseError::Arity(parts.len()));
            };
            return Ok(Some(Self { a, b, c, d, e, f }));
        }
        if let Some(args) = function_args(value, "rotate") {
            let degrees = args.trim().trim_end_matches("deg").trim();
            let degrees: f64 = degrees.parse().map_err(TransformParseError::Component)?;
            let (sin, cos) = degrees.to_radians().sin_cos();
            return Ok(Some(Self {
                a: cos,
                b: sin,
                c: -sin,
                d: cos,
                e: 0.0,
                f: 0.0,
            }));
        }
        Err(TransformParseError::Syntax(value.to_string()))
    }

    /// Render as a CSS `matrix(...)` value.
    #[must_use]
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "matrix({}, {}, {}, {}, {}, {})",
            self.a, self.b, self.c, self.d, self.e, self.f
        )
    }
}

fn function_args<'a>(value: &'a str, name: &str) -> Option<&'a str> {
    value
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

/// Errors from [`Transform::parse_css`].
#[derive(Debug, thiserror::Error)]
pub enum TransformParseError {
    #[error("unsupported transform syntax `{0}`")]
    Syntax(String),

    #[error("matrix needs 6 components, got {0}")]
    Arity(usize),

    #[error("invalid transform component")]
    Component(#[source] ParseFloatError),
}

/// Rotation of `transform` in whole degrees, normalized and snapped.
///
/// `None` stands for the "no transform" sentinel and yields `0`, as does the
/// identity.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn angle_from_transform(transform: Option<&Transform>) -> i32 {
    let Some(t) = transform else {
        return 0;
    };
    let degrees = t.b.atan2(t.a).to_degrees().round() as i32;
    let degrees = if degrees < 0 { degrees + 360 } else { degrees };
    snap_angle(degrees)
}

/// Round `degrees` down to a multiple of [`ANGLE_STEP`] within `[0, 360)`.
#[must_use]
pub fn snap_angle(degrees: i32) -> i32 {
    let normalized = degrees.rem_euclid(360);
    normalized - normalized % ANGLE_STEP
}

/// Round both coordinates down to a multiple of [`GRID_STEP`].
#[must_use]
pub fn snap_position(x: i32, y: i32) -> (i32, i32) {
    (snap_coordinate(x), snap_coordinate(y))
}

fn snap_coordinate(value: i32) -> i32 {
    value - value.rem_euclid(GRID_STEP)
}

/// Persisted geometry of a wall, construction piece, decoration or device.
///
/// `texture` selects the sprite; walls and devices carry none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    #[serde(deserialize_with = "lenient::int")]
    pub x: i32,
    #[serde(deserialize_with = "lenient::int")]
    pub y: i32,
    #[serde(deserialize_with = "lenient::int")]
    pub rotation: i32,
    #[serde(deserialize_with = "lenient::size")]
    pub width: u32,
    #[serde(deserialize_with = "lenient::size")]
    pub height: u32,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub texture: Option<String>,
}

impl Placement {
    /// Untextured placement at `(x, y)` with the given size and no rotation.
    #[must_use]
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            rotation: 0,
            width,
            height,
            texture: None,
        }
    }

    /// Attach a sprite texture.
    #[must_use]
    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }

    /// Copy with position and rotation snapped to the grid and angle step.
    #[must_use]
    pub fn snapped(mut self) -> Self {
        (self.x, self.y) = snap_position(self.x, self.y);
        self.rotation = snap_angle(self.rotation);
        self
    }
}
