//! Camera angle identifiers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of one camera feed among the N synchronized feeds of a run.
///
/// Ordering follows the index, so the lowest angle wins every tie.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct AngleId(pub usize);

impl AngleId {
    /// Get the inner index.
    pub fn index(self) -> usize {
        self.0
    }

    /// Iterate over all angle ids of a run with `count` angles.
    pub fn all(count: usize) -> impl Iterator<Item = AngleId> {
        (0..count).map(AngleId)
    }
}

impl fmt::Display for AngleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for AngleId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}
