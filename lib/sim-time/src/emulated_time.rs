/*!
Deals with instances of time in a simulation.
*/

use crate::simulation_time::{self, SimulationTime};

/// An instant in time (analogous to `std::time::Instant`) in the simulation.
// Internally represented as nanoseconds since the Unix Epoch.
#[derive(Copy, Clone, Eq, PartialEq, Debug, PartialOrd, Ord, Hash)]
pub struct EmulatedTime(u64);

/// Seconds from the epoch to January 1st, 2000 at 12:00am UTC. Simulations
/// start at this point so that applications observe a plausible recent date.
pub const SIMULATION_START_SEC: u64 = 946684800u64;

pub const SIMULATION_START_NANOS: u64 = SIMULATION_START_SEC * simulation_time::SIMTIME_ONE_SECOND;

/// The largest representable instant. `u64::MAX` itself stays reserved so an
/// out-of-band "invalid" encoding remains available to serialized forms.
pub const EMUTIME_MAX_NANOS: u64 = u64::MAX - 1;
pub const EMUTIME_MIN_NANOS: u64 = 0u64;

impl EmulatedTime {
    /// The start time of the simulation - 00:00:00 UTC on 1 January, 2000.
    pub const SIMULATION_START: Self = Self(SIMULATION_START_NANOS);
    /// The Unix epoch (00:00:00 UTC on 1 January 1970)
    pub const UNIX_EPOCH: Self = Self(0);

    pub const MAX: Self = Self(EMUTIME_MAX_NANOS);
    pub const MIN: Self = Self(EMUTIME_MIN_NANOS);

    /// Get the instant corresponding to `val` time units since the simulation began.
    pub fn from_abs_simtime(val: SimulationTime) -> Self {
        Self::SIMULATION_START + val
    }

    /// Convert to the SimulationTime since the simulation began.
    pub fn to_abs_simtime(self) -> SimulationTime {
        self.duration_since(&Self::SIMULATION_START)
    }

    /// Returns the duration since `earlier`, or panics if `earlier` is after
    /// `self`, or if the difference can't be represented as SimulationTime.
    pub fn duration_since(&self, earlier: &EmulatedTime) -> SimulationTime {
        self.checked_duration_since(earlier).unwrap()
    }

    /// Returns the duration since `earlier`, or `None` if `earlier` is after `self`.
    pub fn checked_duration_since(&self, earlier: &EmulatedTime) -> Option<SimulationTime> {
        let d = self.0.checked_sub(earlier.0)?;
        SimulationTime::from_raw_nanos(d)
    }

    /// Returns the duration since `earlier`, or 0 if `earlier` is after `self`.
    pub fn saturating_duration_since(&self, earlier: &EmulatedTime) -> SimulationTime {
        self.checked_duration_since(earlier)
            .unwrap_or(SimulationTime::ZERO)
    }

    pub fn checked_add(&self, duration: SimulationTime) -> Option<EmulatedTime> {
        let sum = self.0.checked_add(duration.as_nanos().try_into().ok()?)?;
        if sum > EMUTIME_MAX_NANOS {
            None
        } else {
            Some(Self(sum))
        }
    }

    pub fn checked_sub(&self, duration: SimulationTime) -> Option<EmulatedTime> {
        let nanos: u64 = duration.as_nanos().try_into().ok()?;
        self.0.checked_sub(nanos).map(Self)
    }

    pub fn saturating_add(&self, duration: SimulationTime) -> EmulatedTime {
        match self.checked_add(duration) {
            Some(later) => later,
            None => EmulatedTime::MAX,
        }
    }

    pub fn saturating_sub(&self, duration: SimulationTime) -> EmulatedTime {
        match self.checked_sub(duration) {
            Some(earlier) => earlier,
            None => EmulatedTime::MIN,
        }
    }
}

impl std::ops::Add<SimulationTime> for EmulatedTime {
    type Output = EmulatedTime;

    fn add(self, other: SimulationTime) -> Self {
        self.checked_add(other).unwrap()
    }
}

impl std::ops::AddAssign<SimulationTime> for EmulatedTime {
    fn add_assign(&mut self, rhs: SimulationTime) {
        *self = *self + rhs;
    }
}

impl std::ops::Sub<SimulationTime> for EmulatedTime {
    type Output = EmulatedTime;

    fn sub(self, other: SimulationTime) -> Self {
        self.checked_sub(other).unwrap()
    }
}

impl std::ops::SubAssign<SimulationTime> for EmulatedTime {
    fn sub_assign(&mut self, rhs: SimulationTime) {
        *self = self.checked_sub(rhs).unwrap();
    }
}

impl std::ops::Sub<EmulatedTime> for EmulatedTime {
    type Output = SimulationTime;

    fn sub(self, other: EmulatedTime) -> Self::Output {
        self.duration_since(&other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_abs_simtime() {
        assert_eq!(
            EmulatedTime::from_abs_simtime(SimulationTime::ZERO),
            EmulatedTime::SIMULATION_START
        );

        assert_eq!(
            EmulatedTime::from_abs_simtime(SimulationTime::SECOND),
            EmulatedTime::SIMULATION_START + SimulationTime::SECOND
        );
    }

    #[test]
    fn test_to_abs_simtime() {
        assert_eq!(
            EmulatedTime::SIMULATION_START.to_abs_simtime(),
            SimulationTime::ZERO
        );

        assert_eq!(
            (EmulatedTime::SIMULATION_START + SimulationTime::SECOND).to_abs_simtime(),
            SimulationTime::SECOND
        );
    }

    #[test]
    fn test_duration_since() {
        let early = EmulatedTime::UNIX_EPOCH + SimulationTime::SECOND;
        let late = EmulatedTime::UNIX_EPOCH + SimulationTime::from_secs(3);

        assert_eq!(late.duration_since(&early), SimulationTime::from_secs(2));
        assert_eq!(early.checked_duration_since(&late), None);
        assert_eq!(
            early.saturating_duration_since(&late),
            SimulationTime::ZERO
        );
    }

    #[test]
    fn test_checked_bounds() {
        assert_eq!(EmulatedTime::MAX.checked_add(SimulationTime::NANOSECOND), None);
        assert_eq!(EmulatedTime::MIN.checked_sub(SimulationTime::NANOSECOND), None);
        assert_eq!(
            EmulatedTime::MAX.saturating_add(SimulationTime::SECOND),
            EmulatedTime::MAX
        );
        assert_eq!(
            EmulatedTime::MIN.saturating_sub(SimulationTime::SECOND),
            EmulatedTime::MIN
        );
    }

    #[test]
    fn test_simulation_start_at_max_simtime() {
        // the sentinel duration must still map to a representable instant
        assert_eq!(
            EmulatedTime::from_abs_simtime(SimulationTime::MAX),
            EmulatedTime::MAX
        );
    }
}
