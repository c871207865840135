use std::fmt;

/// The 16 points of the compass rose, clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassPoint {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

const SECTOR_DEGREES: f64 = 22.5;

/// Each point paired with its bearing; 0..360 in 22.5° steps.
pub const COMPASS_TABLE: [(CompassPoint, f64); 16] = [
    (CompassPoint::N, 0.0),
    (CompassPoint::NNE, 22.5),
    (CompassPoint::NE, 45.0),
    (CompassPoint::ENE, 67.5),
    (CompassPoint::E, 90.0),
    (CompassPoint::ESE, 112.5),
    (CompassPoint::SE, 135.0),
    (CompassPoint::SSE, 157.5),
    (CompassPoint::S, 180.0),
    (CompassPoint::SSW, 202.5),
    (CompassPoint::SW, 225.0),
    (CompassPoint::WSW, 247.5),
    (CompassPoint::W, 270.0),
    (CompassPoint::WNW, 292.5),
    (CompassPoint::NW, 315.0),
    (CompassPoint::NNW, 337.5),
];

impl CompassPoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NNE => "NNE",
            CompassPoint::NE => "NE",
            CompassPoint::ENE => "ENE",
            CompassPoint::E => "E",
            CompassPoint::ESE => "ESE",
            CompassPoint::SE => "SE",
            CompassPoint::SSE => "SSE",
            CompassPoint::S => "S",
            CompassPoint::SSW => "SSW",
            CompassPoint::SW => "SW",
            CompassPoint::WSW => "WSW",
            CompassPoint::W => "W",
            CompassPoint::WNW => "WNW",
            CompassPoint::NW => "NW",
            CompassPoint::NNW => "NNW",
        }
    }

    pub fn degrees(&self) -> f64 {
        COMPASS_TABLE
            .iter()
            .find(|(point, _)| point == self)
            .map(|(_, deg)| *deg)
            .unwrap_or_default()
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a bearing in degrees to the nearest compass point.
///
/// The bearing is normalized into `[0, 360)` first, so negative and
/// over-rotated values are accepted. A bearing exactly halfway between two
/// points resolves to the lower one (11.25 is `N`, 33.75 is `NNE`).
pub fn resolve_direction(bearing: f64) -> CompassPoint {
    if !bearing.is_finite() {
        tracing::warn!(bearing, "non-finite wind bearing, reporting as N");
        return CompassPoint::N;
    }

    let bearing = bearing.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    let bearing = if bearing >= 360.0 { 0.0 } else { bearing };

    let lo_idx = ((bearing / SECTOR_DEGREES) as usize).min(COMPASS_TABLE.len() - 1);
    let (lo_point, lo_deg) = COMPASS_TABLE[lo_idx];
    let hi_deg = lo_deg + SECTOR_DEGREES;

    if bearing - lo_deg <= hi_deg - bearing {
        lo_point
    } else {
        // past NNW the next entry is north again
        COMPASS_TABLE[(lo_idx + 1) % COMPASS_TABLE.len()].0
    }
}
