#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerLevel {
    On,
    Standby,
    Suspend,
    Off,
}

/// Per-state DPMS timeouts, in seconds as the server reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DpmsTimeouts {
    pub standby: u16,
    pub suspend: u16,
    pub off: u16,
}

/// Power state of an enabled DPMS-capable display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DpmsStatus {
    pub level: PowerLevel,
    pub timeouts: DpmsTimeouts,
}

impl DpmsStatus {
    /// Time the server has spent reaching the current power level, in milliseconds.
    pub fn correction_millis(&self) -> u64 {
        let standby = u64::from(self.timeouts.standby);
        let suspend = u64::from(self.timeouts.suspend);
        let off = u64::from(self.timeouts.off);

        let seconds = match self.level {
            PowerLevel::On => 0,
            PowerLevel::Standby => standby,
            PowerLevel::Suspend => standby + suspend,
            PowerLevel::Off => standby + suspend + off,
        };

        seconds * 1000
    }
}

/// Adds back the time the X server drops from the screensaver idle counter
/// while the display sits in a DPMS power-saving state.
///
/// See https://bugs.freedesktop.org/show_bug.cgi?id=6439. The correction is
/// only applied when the raw value is below it, so a value that already
/// contains it is returned as is.
pub fn compensate(raw_millis: u64, dpms: Option<&DpmsStatus>) -> u64 {
    let Some(status) = dpms else {
        return raw_millis;
    };

    let correction = status.correction_millis();
    if raw_millis < correction {
        trace!("Adding {correction}ms for DPMS level {:?}", status.level);
        raw_millis + correction
    } else {
        raw_millis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TIMEOUTS: DpmsTimeouts = DpmsTimeouts {
        standby: 10,
        suspend: 20,
        off: 30,
    };

    fn status(level: PowerLevel) -> DpmsStatus {
        DpmsStatus {
            level,
            timeouts: TIMEOUTS,
        }
    }

    #[rstest]
    #[case(PowerLevel::On, 500, 500)]
    #[case(PowerLevel::Standby, 500, 10_500)]
    #[case(PowerLevel::Suspend, 500, 30_500)]
    #[case(PowerLevel::Off, 500, 60_500)]
    #[case(PowerLevel::Standby, 10_000, 10_000)]
    #[case(PowerLevel::Suspend, 29_999, 59_999)]
    #[case(PowerLevel::Off, 75_000, 75_000)]
    fn adds_back_power_saving_time(
        #[case] level: PowerLevel,
        #[case] raw: u64,
        #[case] expected: u64,
    ) {
        assert_eq!(expected, compensate(raw, Some(&status(level))));
    }

    #[rstest]
    fn never_decreases(
        #[values(PowerLevel::On, PowerLevel::Standby, PowerLevel::Suspend, PowerLevel::Off)]
        level: PowerLevel,
        #[values(0, 1, 9_999, 10_000, 45_000, 60_001, u64::from(u32::MAX))] raw: u64,
    ) {
        assert!(compensate(raw, Some(&status(level))) >= raw);
    }

    #[rstest]
    fn applies_once_per_sample(
        #[values(PowerLevel::On, PowerLevel::Standby, PowerLevel::Suspend, PowerLevel::Off)]
        level: PowerLevel,
    ) {
        let status = status(level);
        let corrected = compensate(500, Some(&status));

        assert_eq!(corrected, compensate(corrected, Some(&status)));
    }

    #[rstest]
    fn passes_through_without_dpms(#[values(0, 500, 10_000, u64::MAX)] raw: u64) {
        assert_eq!(raw, compensate(raw, None));
    }

    #[rstest]
    fn zero_timeouts_add_nothing() {
        let status = DpmsStatus {
            level: PowerLevel::Off,
            timeouts: DpmsTimeouts::default(),
        };

        assert_eq!(0, status.correction_millis());
        assert_eq!(0, compensate(0, Some(&status)));
    }

    #[rstest]
    fn largest_timeouts_fit() {
        let status = DpmsStatus {
            level: PowerLevel::Off,
            timeouts: DpmsTimeouts {
                standby: u16::MAX,
                suspend: u16::MAX,
                off: u16::MAX,
            },
        };

        assert_eq!(3 * u64::from(u16::MAX) * 1000, status.correction_millis());
    }
}
