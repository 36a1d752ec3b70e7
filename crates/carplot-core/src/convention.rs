use serde::{Deserialize, Serialize};

use crate::error::PlotError;
use crate::types::Vec2;

/// Which local axis maps to the first screen axis.
///
/// `ZUp` hands `(x, y)` to the renderer unchanged. `ZDown` swaps the two
/// channels, which is how a z-down (SAE) body frame reads on a y-up plot.
/// One diagram uses exactly one convention for every primitive.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisConvention {
    ZUp,
    ZDown,
}

impl AxisConvention {
    /// Accepts the `z_up = 1 / -1` integer flag used by plotting scripts.
    pub fn from_sign(sign: i32) -> Result<Self, PlotError> {
        match sign {
            1 => Ok(Self::ZUp),
            -1 => Ok(Self::ZDown),
            other => Err(PlotError::UnknownConvention(other)),
        }
    }

    pub fn sign(self) -> i32 {
        match self {
            Self::ZUp => 1,
            Self::ZDown => -1,
        }
    }

    /// Maps a world point to renderer channels.
    #[inline]
    pub fn apply(self, p: Vec2) -> Vec2 {
        match self {
            Self::ZUp => p,
            Self::ZDown => Vec2::new(p.y, p.x),
        }
    }
}

impl Default for AxisConvention {
    fn default() -> Self { Self::ZDown }
}

impl TryFrom<i32> for AxisConvention {
    type Error = PlotError;
    fn try_from(sign: i32) -> Result<Self, Self::Error> { Self::from_sign(sign) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_round_trip() {
        assert_eq!(AxisConvention::from_sign(1).unwrap(), AxisConvention::ZUp);
        assert_eq!(AxisConvention::from_sign(-1).unwrap(), AxisConvention::ZDown);
        assert_eq!(AxisConvention::ZDown.sign(), -1);
    }

    #[test]
    fn unknown_sign_is_rejected() {
        assert_eq!(AxisConvention::from_sign(0), Err(PlotError::UnknownConvention(0)));
        assert!(AxisConvention::try_from(2).is_err());
    }

    #[test]
    fn z_down_swaps_channels() {
        let p = Vec2::new(1.5, -2.0);
        assert_eq!(AxisConvention::ZUp.apply(p), p);
        assert_eq!(AxisConvention::ZDown.apply(p), Vec2::new(-2.0, 1.5));
    }
}
