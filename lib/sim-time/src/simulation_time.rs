/*!
Values for working with a simulated duration. Use
[`EmulatedTime`](crate::emulated_time::EmulatedTime) to represent an instant
in time.
*/

use std::time::Duration;

use crate::emulated_time;

/// A duration in simulation time: nanoseconds since the simulation began.
#[derive(Copy, Clone, Eq, PartialEq, Debug, PartialOrd, Ord, Hash, Default)]
pub struct SimulationTime(u64);

/// Reserved so that `SIMULATION_START + SimulationTime::MAX` is still a
/// representable [`EmulatedTime`](crate::emulated_time::EmulatedTime).
pub const SIMTIME_MAX: u64 = emulated_time::EMUTIME_MAX_NANOS - emulated_time::SIMULATION_START_NANOS;
pub const SIMTIME_MIN: u64 = 0;

pub const SIMTIME_ONE_NANOSECOND: u64 = 1;
pub const SIMTIME_ONE_MICROSECOND: u64 = 1_000;
pub const SIMTIME_ONE_MILLISECOND: u64 = 1_000_000;
pub const SIMTIME_ONE_SECOND: u64 = 1_000_000_000;
pub const SIMTIME_ONE_MINUTE: u64 = 60_000_000_000;
pub const SIMTIME_ONE_HOUR: u64 = 3_600_000_000_000;

impl SimulationTime {
    /// Largest representable duration. Callers that scan for a minimum next
    /// event time use this as the "no event anywhere" sentinel.
    pub const MAX: SimulationTime = SimulationTime(SIMTIME_MAX);
    pub const ZERO: SimulationTime = SimulationTime(0);
    pub const SECOND: SimulationTime = SimulationTime(SIMTIME_ONE_SECOND);
    pub const MILLISECOND: SimulationTime = SimulationTime(SIMTIME_ONE_MILLISECOND);
    pub const MICROSECOND: SimulationTime = SimulationTime(SIMTIME_ONE_MICROSECOND);
    pub const NANOSECOND: SimulationTime = SimulationTime(SIMTIME_ONE_NANOSECOND);

    /// Convert a [`Duration`] to a [`SimulationTime`]. This function exists as
    /// a `const` alternative to `SimulationTime::try_from(duration)`. Panics
    /// if the duration is too large.
    pub const fn from_duration(val: Duration) -> Self {
        let val = val.as_nanos();
        if val > SIMTIME_MAX as u128 {
            panic!("Duration is larger than SIMTIME_MAX");
        }

        Self(val as u64)
    }

    pub const fn from_raw_nanos(val: u64) -> Option<Self> {
        if val > SIMTIME_MAX {
            None
        } else {
            Some(Self(val))
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn as_secs(&self) -> u64 {
        self.0 / SIMTIME_ONE_SECOND
    }

    pub fn as_millis(&self) -> u64 {
        self.0 / SIMTIME_ONE_MILLISECOND
    }

    pub fn as_micros(&self) -> u64 {
        self.0 / SIMTIME_ONE_MICROSECOND
    }

    pub fn as_nanos(&self) -> u128 {
        self.0.into()
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(sum) => Self::from_raw_nanos(sum),
            None => None,
        }
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn checked_mul(self, other: u64) -> Option<Self> {
        match self.0.checked_mul(other) {
            Some(product) => Self::from_raw_nanos(product),
            None => None,
        }
    }

    pub fn checked_div(self, other: u64) -> Option<Self> {
        self.0.checked_div(other).map(Self)
    }

    pub fn checked_rem(self, other: Self) -> Option<Self> {
        self.0.checked_rem(other.0).map(Self)
    }

    pub fn saturating_add(self, other: Self) -> Self {
        Self(std::cmp::min(self.0.saturating_add(other.0), SIMTIME_MAX))
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    pub fn saturating_mul(self, other: u64) -> Self {
        Self(std::cmp::min(self.0.saturating_mul(other), SIMTIME_MAX))
    }

    pub fn try_from_secs(s: u64) -> Option<Self> {
        Self::SECOND.checked_mul(s)
    }

    pub fn from_secs(s: u64) -> Self {
        Self::try_from_secs(s).unwrap()
    }

    pub fn try_from_millis(s: u64) -> Option<Self> {
        Self::MILLISECOND.checked_mul(s)
    }

    pub fn from_millis(s: u64) -> Self {
        Self::try_from_millis(s).unwrap()
    }

    pub fn try_from_micros(s: u64) -> Option<Self> {
        Self::MICROSECOND.checked_mul(s)
    }

    pub fn from_micros(s: u64) -> Self {
        Self::try_from_micros(s).unwrap()
    }

    pub fn try_from_nanos(s: u64) -> Option<Self> {
        Self::from_raw_nanos(s)
    }

    pub fn from_nanos(s: u64) -> Self {
        Self::try_from_nanos(s).unwrap()
    }

    pub fn subsec_millis(&self) -> u32 {
        (self.as_millis() % 1_000).try_into().unwrap()
    }

    pub fn subsec_micros(&self) -> u32 {
        (self.as_micros() % 1_000_000).try_into().unwrap()
    }

    pub fn subsec_nanos(&self) -> u32 {
        (self.0 % 1_000_000_000).try_into().unwrap()
    }
}

impl std::ops::Add<SimulationTime> for SimulationTime {
    type Output = SimulationTime;

    fn add(self, other: Self) -> Self::Output {
        self.checked_add(other).unwrap()
    }
}

impl std::ops::AddAssign<SimulationTime> for SimulationTime {
    fn add_assign(&mut self, rhs: SimulationTime) {
        *self = *self + rhs;
    }
}

impl std::ops::Sub<SimulationTime> for SimulationTime {
    type Output = SimulationTime;

    fn sub(self, other: Self) -> Self::Output {
        self.checked_sub(other).unwrap()
    }
}

impl std::ops::SubAssign<SimulationTime> for SimulationTime {
    fn sub_assign(&mut self, rhs: SimulationTime) {
        *self = *self - rhs;
    }
}

impl std::ops::Mul<u32> for SimulationTime {
    type Output = SimulationTime;

    fn mul(self, other: u32) -> Self::Output {
        self.checked_mul(other.into()).unwrap()
    }
}

impl std::ops::MulAssign<u32> for SimulationTime {
    fn mul_assign(&mut self, rhs: u32) {
        *self = self.checked_mul(rhs.into()).unwrap();
    }
}

impl std::ops::Div<u32> for SimulationTime {
    type Output = SimulationTime;

    fn div(self, other: u32) -> Self::Output {
        self.checked_div(other.into()).unwrap()
    }
}

impl std::ops::DivAssign<u32> for SimulationTime {
    fn div_assign(&mut self, rhs: u32) {
        *self = self.checked_div(rhs.into()).unwrap();
    }
}

impl std::ops::Rem<SimulationTime> for SimulationTime {
    type Output = SimulationTime;

    fn rem(self, other: SimulationTime) -> Self::Output {
        self.checked_rem(other).unwrap()
    }
}

impl std::convert::TryFrom<Duration> for SimulationTime {
    type Error = ();

    fn try_from(val: Duration) -> Result<Self, Self::Error> {
        let val = val.as_nanos();
        if val > SIMTIME_MAX.into() {
            Err(())
        } else {
            Ok(Self(val.try_into().unwrap()))
        }
    }
}

impl std::convert::From<SimulationTime> for Duration {
    fn from(val: SimulationTime) -> Duration {
        Duration::from_nanos(val.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts() {
        let sim_time = 5 * SIMTIME_ONE_MINUTE + 7 * SIMTIME_ONE_MILLISECOND;
        let rust_time = SimulationTime::from_nanos(sim_time);

        assert_eq!(rust_time.as_secs(), 5 * 60);
        assert_eq!(rust_time.as_millis(), 5 * 60 * 1_000 + 7);
    }

    #[test]
    fn test_ordering_follows_magnitude() {
        assert!(SimulationTime::ZERO < SimulationTime::NANOSECOND);
        assert!(SimulationTime::MILLISECOND < SimulationTime::SECOND);
        assert!(SimulationTime::from_secs(10) < SimulationTime::MAX);
    }

    #[test]
    fn test_arithmetic() {
        let a = SimulationTime::from_millis(1_500);
        let b = SimulationTime::from_millis(500);

        assert_eq!(a + b, SimulationTime::from_secs(2));
        assert_eq!(a - b, SimulationTime::SECOND);
        assert_eq!(b * 3, a);
        assert_eq!(a / 3, b);
        assert_eq!(a % SimulationTime::SECOND, b);
    }

    #[test]
    fn test_saturating() {
        assert_eq!(
            SimulationTime::MAX.saturating_add(SimulationTime::SECOND),
            SimulationTime::MAX
        );
        assert_eq!(
            SimulationTime::ZERO.saturating_sub(SimulationTime::SECOND),
            SimulationTime::ZERO
        );
        assert_eq!(SimulationTime::MAX.saturating_mul(2), SimulationTime::MAX);
    }

    #[test]
    fn test_checked_overflow() {
        assert_eq!(SimulationTime::MAX.checked_add(SimulationTime::NANOSECOND), None);
        assert_eq!(SimulationTime::ZERO.checked_sub(SimulationTime::NANOSECOND), None);
        assert_eq!(SimulationTime::from_raw_nanos(SIMTIME_MAX + 1), None);
    }

    #[test]
    fn test_duration_round_trip() {
        let duration = Duration::from_nanos(123_456_789);
        let sim_time = SimulationTime::try_from(duration).unwrap();

        assert_eq!(sim_time, SimulationTime::from_nanos(123_456_789));
        assert_eq!(Duration::from(sim_time), duration);
    }
}
