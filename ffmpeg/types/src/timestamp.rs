/*!
    Timestamp types for media timing.
*/

use std::time::Duration;

use crate::Rational;

/**
    Presentation or decode timestamp in time_base units.

    This is the raw value from the media stream; the stream's time base is
    needed to turn it into wall-clock time.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pts(pub i64);

impl From<i64> for Pts {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/**
    Duration in time_base units.

    Like [`Pts`], but semantically a span rather than a point in time.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MediaDuration(pub i64);

impl MediaDuration {
    /**
        Convert this duration to a std Duration using the given time base.

        Negative values are clamped to zero.
    */
    #[inline]
    pub fn to_duration(self, time_base: Rational) -> Duration {
        ticks_to_duration(self.0, time_base)
    }
}

impl From<i64> for MediaDuration {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

fn ticks_to_duration(ticks: i64, time_base: Rational) -> Duration {
    if ticks <= 0 || time_base.den == 0 {
        return Duration::ZERO;
    }
    let seconds = ticks as f64 * time_base.to_f64();
    Duration::from_secs_f64(seconds.max(0.0))
}
