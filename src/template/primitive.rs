use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::foundation::error::KinemaError;

/// The closed set of motion primitives understood by the GPU executor.
///
/// Discriminants are the wire ids written into row channel 0 of the encoded buffer; they are
/// versioned together with the buffer layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Primitive {
    /// Sinusoidal displacement along an axis.
    Oscillate = 0,
    /// Continuous rotation about a pivot.
    Rotate = 1,
    /// Rotation with a growing or shrinking radius.
    Spiral = 2,
    /// Travelling wave along the part.
    Wave = 3,
    /// Circular path around a center.
    Orbit = 4,
    /// Rhythmic scale change.
    Pulse = 5,
    /// Slow pendulum-like lean.
    Sway = 6,
    /// High-frequency noise.
    Jitter = 7,
    /// Vertical bounce.
    Bob = 8,
    /// Fast low-amplitude flapping.
    Flutter = 9,
    /// Outward explosion, holds the final spread.
    Burst = 10,
    /// Random dispersal, holds the final positions.
    Scatter = 11,
    /// Inward implosion toward a point.
    Collapse = 12,
    /// Reassembly into the rest shape.
    Reform = 13,
    /// Fade-out dispersal.
    Dissolve = 14,
}

impl Primitive {
    /// Every primitive, indexed by id.
    pub const ALL: [Primitive; 15] = [
        Primitive::Oscillate,
        Primitive::Rotate,
        Primitive::Spiral,
        Primitive::Wave,
        Primitive::Orbit,
        Primitive::Pulse,
        Primitive::Sway,
        Primitive::Jitter,
        Primitive::Bob,
        Primitive::Flutter,
        Primitive::Burst,
        Primitive::Scatter,
        Primitive::Collapse,
        Primitive::Reform,
        Primitive::Dissolve,
    ];

    /// Wire id (0..=14).
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Look up a primitive by wire id.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Canonical lowercase name used in templates.
    pub fn name(self) -> &'static str {
        match self {
            Self::Oscillate => "oscillate",
            Self::Rotate => "rotate",
            Self::Spiral => "spiral",
            Self::Wave => "wave",
            Self::Orbit => "orbit",
            Self::Pulse => "pulse",
            Self::Sway => "sway",
            Self::Jitter => "jitter",
            Self::Bob => "bob",
            Self::Flutter => "flutter",
            Self::Burst => "burst",
            Self::Scatter => "scatter",
            Self::Collapse => "collapse",
            Self::Reform => "reform",
            Self::Dissolve => "dissolve",
        }
    }

    /// Look up a primitive by name (case-insensitive, surrounding whitespace ignored).
    pub fn from_name(name: &str) -> Option<Self> {
        NAME_TO_PRIMITIVE
            .get(name.trim().to_ascii_lowercase().as_str())
            .copied()
    }

    /// One-shot primitives run for a bounded duration and hold their final state.
    pub fn is_one_shot(self) -> bool {
        matches!(
            self,
            Self::Burst | Self::Scatter | Self::Collapse | Self::Reform | Self::Dissolve
        )
    }
}

static NAME_TO_PRIMITIVE: LazyLock<HashMap<&'static str, Primitive>> =
    LazyLock::new(|| Primitive::ALL.iter().map(|p| (p.name(), *p)).collect());

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Primitive {
    type Err = KinemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| KinemaError::unknown_primitive(s))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/primitive.rs"]
mod tests;
