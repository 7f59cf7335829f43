//! Fundamental geometric and simulation types.
//!
//! Headings are in degrees, 0 = +x axis, increasing toward +y.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Stable ship identity. Allocated by the engine, never reused in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShipId(pub u32);

impl std::fmt::Display for ShipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 2D position in world units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.as_vec().distance(other.as_vec())
    }

    /// Bearing to another position in degrees, normalized to [0, 360).
    pub fn bearing_to(&self, other: &Position) -> f64 {
        let d = other.as_vec() - self.as_vec();
        normalize_heading(d.y.atan2(d.x).to_degrees())
    }

    /// Position reached by travelling `distance` along `heading_deg`.
    pub fn advanced(&self, heading_deg: f64, distance: f64) -> Position {
        (self.as_vec() + heading_vector(heading_deg) * distance).into()
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.advance_by(self.dt());
    }

    /// Advance by one tick lasting `dt` seconds.
    pub fn advance_by(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Normalize any angle in degrees into [0, 360).
pub fn normalize_heading(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let h = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

/// Signed shortest turn from `from` to `to`, in (-180, 180].
pub fn heading_delta(from: f64, to: f64) -> f64 {
    let d = normalize_heading(to - from);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Unit vector for a heading in degrees.
pub fn heading_vector(degrees: f64) -> DVec2 {
    let r = degrees.to_radians();
    DVec2::new(r.cos(), r.sin())
}
