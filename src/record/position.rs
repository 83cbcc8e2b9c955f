//! Galactic and battle-board coordinates.

use serde::de::{self, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Galactic map position.
///
/// Only used to label where a deep-space battle happened. It never keys the
/// battle board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    /// X coordinate in light years.
    pub x: f64,
    /// Y coordinate in light years.
    pub y: f64,
}

impl Vector {
    /// Create a new galactic position.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A cell on the battle board.
///
/// The server sends board coordinates as plain JSON numbers; `3` and `3.0`
/// are both accepted, `3.5` is rejected.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GridPosition {
    /// Column.
    #[serde(deserialize_with = "integral")]
    pub x: i32,
    /// Row.
    #[serde(deserialize_with = "integral")]
    pub y: i32,
}

impl GridPosition {
    /// Create a new board position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

fn integral<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return Err(de::Error::custom(format!(
            "board coordinate {value} is not an integer"
        )));
    }
    #[allow(clippy::cast_possible_truncation)]
    let coord = value as i32;
    Ok(coord)
}

/// Read an optional board position, treating anything malformed as absent.
///
/// Used for the `from`/`to` fields of an action: a broken destination must
/// leave the token where it was rather than reject the whole record.
pub(crate) fn lenient_position<'de, D>(deserializer: D) -> Result<Option<GridPosition>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Valid(GridPosition),
        Invalid(IgnoredAny),
    }

    Ok(match Option::<Lenient>::deserialize(deserializer)? {
        Some(Lenient::Valid(position)) => Some(position),
        Some(Lenient::Invalid(_)) | None => None,
    })
}
