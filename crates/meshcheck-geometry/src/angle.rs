use std::f64::consts::{FRAC_PI_2, PI};

/// A plain radian measure.
///
/// No normalization is applied: values may grow past a full turn and callers
/// clamp where a range matters (camera elevation, for instance).
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle {
    radians: f64,
}

impl Angle {
    pub const ZERO: Self = Self::from_radians(0.0);
    pub const QUARTER_TURN: Self = Self::from_radians(FRAC_PI_2);
    pub const HALF_TURN: Self = Self::from_radians(PI);

    pub const fn from_radians(radians: f64) -> Self {
        Self { radians }
    }

    pub fn from_degrees(degrees: f64) -> Self {
        Self::from_radians(degrees.to_radians())
    }

    pub const fn radians(self) -> f64 {
        self.radians
    }

    pub fn degrees(self) -> f64 {
        self.radians.to_degrees()
    }

    pub fn sin(self) -> f64 {
        self.radians.sin()
    }

    pub fn cos(self) -> f64 {
        self.radians.cos()
    }

    pub fn tan(self) -> f64 {
        self.radians.tan()
    }

    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self::from_radians(self.radians.clamp(min.radians, max.radians))
    }
}

impl std::ops::Add for Angle {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::from_radians(self.radians + other.radians)
    }
}

impl std::ops::Sub for Angle {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::from_radians(self.radians - other.radians)
    }
}

impl std::ops::Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::from_radians(-self.radians)
    }
}

impl From<Angle> for cgmath::Rad<f64> {
    fn from(angle: Angle) -> Self {
        cgmath::Rad(angle.radians)
    }
}

impl From<cgmath::Rad<f64>> for Angle {
    fn from(rad: cgmath::Rad<f64>) -> Self {
        Self::from_radians(rad.0)
    }
}

impl std::fmt::Display for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}°", self.degrees())
    }
}
