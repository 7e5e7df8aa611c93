use core::iter::FusedIterator;
use core::ops::{Add, Mul};

use rt_core::Point2i;

/// Signed fixed-point number with 16 fractional bits, stored in 64 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Fixed16(i64);

impl Fixed16 {
    pub const FRAC_BITS: u32 = 16;
    pub const ONE: Self = Self(1 << Self::FRAC_BITS);
    pub const HALF: Self = Self(1 << (Self::FRAC_BITS - 1));

    pub const fn from_int(v: i32) -> Self {
        Self((v as i64) << Self::FRAC_BITS)
    }

    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i64 {
        self.0
    }

    /// `num / den`, truncated toward zero. `den` must be nonzero.
    pub const fn ratio(num: i32, den: i32) -> Self {
        Self(((num as i64) << Self::FRAC_BITS) / den as i64)
    }

    /// Largest integer not above the value.
    pub const fn floor(self) -> i64 {
        self.0 >> Self::FRAC_BITS
    }
}

impl Add for Fixed16 {
    type Output = Fixed16;

    fn add(self, rhs: Fixed16) -> Fixed16 {
        Fixed16(self.0 + rhs.0)
    }
}

impl Mul<i64> for Fixed16 {
    type Output = Fixed16;

    fn mul(self, rhs: i64) -> Fixed16 {
        Fixed16(self.0 * rhs)
    }
}

/// Lattice points of the digital segment between two vertices, both ends
/// included.
///
/// One point is produced per unit step along the dominant axis (x on ties).
/// The minor coordinate at step `k` is `floor(minor0 + 1/2 + k * inc)`, and
/// the last point is exactly the segment end.
#[derive(Debug, Clone)]
pub struct DigitalLine {
    start: Point2i,
    end: Point2i,
    x_major: bool,
    major_sign: i32,
    minor_origin: Fixed16,
    inc: Fixed16,
    steps: i64,
    k: i64,
}

pub fn interpolate(start: Point2i, end: Point2i) -> DigitalLine {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let x_major = dx.abs() >= dy.abs();

    let (d_major, d_minor, minor0) = if x_major {
        (dx, dy, start.y)
    } else {
        (dy, dx, start.x)
    };

    let steps = d_major.abs();
    let inc = if steps == 0 {
        Fixed16::default()
    } else {
        Fixed16::ratio(d_minor, steps)
    };

    DigitalLine {
        start,
        end,
        x_major,
        major_sign: d_major.signum(),
        minor_origin: Fixed16::from_int(minor0) + Fixed16::HALF,
        inc,
        steps: steps as i64,
        k: 0,
    }
}

impl Iterator for DigitalLine {
    type Item = Point2i;

    fn next(&mut self) -> Option<Point2i> {
        if self.k > self.steps {
            return None;
        }

        let k = self.k;
        self.k += 1;

        if k == self.steps {
            return Some(self.end);
        }

        let minor = (self.minor_origin + self.inc * k).floor() as i32;
        let step = self.major_sign * k as i32;
        Some(if self.x_major {
            Point2i::new(self.start.x + step, minor)
        } else {
            Point2i::new(minor, self.start.y + step)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.steps + 1 - self.k).max(0) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for DigitalLine {}

impl FusedIterator for DigitalLine {}
