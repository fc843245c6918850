/*!
    Rational number type for time bases and frame rates.
*/

use std::fmt;

/**
    A rational number represented as a numerator and denominator.

    Used for stream time bases (e.g., 1/90000 for MPEG-TS) and frame rates
    (e.g., 24000/1001 for 23.976 fps).
*/
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    pub num: i32,
    pub den: i32,
}

impl Rational {
    /**
        Create a new rational number.

        # Panics

        Panics if `den` is zero.
    */
    #[inline]
    pub const fn new(num: i32, den: i32) -> Self {
        assert!(den != 0, "denominator cannot be zero");
        Self { num, den }
    }

    /**
        Create a rational number, returning `None` for the `x/0` and `0/x`
        values FFmpeg uses to mean "unknown".
    */
    #[inline]
    pub const fn known(num: i32, den: i32) -> Option<Self> {
        if num == 0 || den == 0 {
            None
        } else {
            Some(Self { num, den })
        }
    }

    /**
        Convert to f64.
    */
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl From<(i32, i32)> for Rational {
    fn from((num, den): (i32, i32)) -> Self {
        Self::new(num, den)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "denominator cannot be zero")]
    fn zero_denominator_panics() {
        Rational::new(1, 0);
    }

    #[test]
    fn known_rejects_unknown_values() {
        assert_eq!(Rational::known(0, 0), None);
        assert_eq!(Rational::known(0, 1), None);
        assert_eq!(Rational::known(25, 0), None);
        assert_eq!(Rational::known(25, 1), Some(Rational::new(25, 1)));
    }

    #[test]
    fn to_f64_conversion() {
        assert_eq!(Rational::new(1, 2).to_f64(), 0.5);
        assert_eq!(Rational::new(24000, 1001).to_f64(), 24000.0 / 1001.0);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Rational::new(1, 90000)), "1/90000");
        let r: Rational = (30000, 1001).into();
        assert_eq!(format!("{r:?}"), "30000/1001");
    }
}
