//! Host side model of the servo travel extender consuming the generated header.
//!
//! A receiver pulse within `[IN_MIN_TICKS, IN_MAX_TICKS]` is captured as timer ticks, stretched
//! around `MID_TICKS` so that the 180 degree input range drives a 270 degree servo, limited to
//! `[OUT_MIN_TICKS, OUT_MAX_TICKS]` and finally split into overflow count and compare value of
//! the 8-bit timer.

use core::cmp;

use serde::Serialize;

use crate::error::Error;
use crate::pulse::{Pulse, PulseSet};

/// Sweep step of the bench test mode, in ticks per frame.
pub const SWEEP_STEP: u16 = 2;

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct TickTable {
    #[serde(rename = "IN_MIN_TICKS")]
    pub in_min: u16,
    #[serde(rename = "IN_MAX_TICKS")]
    pub in_max: u16,
    #[serde(rename = "MID_TICKS")]
    pub mid: u16,
    #[serde(rename = "OUT_MIN_TICKS")]
    pub out_min: u16,
    #[serde(rename = "OUT_MAX_TICKS")]
    pub out_max: u16,
}

fn narrow(pulse: &Pulse) -> Result<u16, Error> {
    let ticks = pulse.ticks();
    u16::try_from(ticks).map_err(|_| Error::TickRange { name: pulse.name, ticks })
}

impl TryFrom<&PulseSet> for TickTable {
    type Error = Error;

    fn try_from(pulses: &PulseSet) -> Result<Self, Error> {
        let table = Self {
            in_min: narrow(&pulses.in_min)?,
            in_max: narrow(&pulses.in_max)?,
            mid: narrow(&pulses.mid)?,
            out_min: narrow(&pulses.out_min)?,
            out_max: narrow(&pulses.out_max)?,
        };
        let t = &table;
        if !(t.in_min <= t.mid && t.mid <= t.in_max && t.out_min <= t.out_max) {
            return Err(Error::Unordered);
        }
        Ok(table)
    }
}

/// Overflow count and output compare value of the 8-bit timer for a 16-bit tick count.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct TimerSetting {
    pub overflows: u8,
    pub compare: u8,
}

impl From<u16> for TimerSetting {
    fn from(ticks: u16) -> Self {
        Self { overflows: (ticks >> 8) as u8, compare: (ticks & 0xFF) as u8 }
    }
}

impl TimerSetting {
    pub fn ticks(self) -> u16 {
        (self.overflows as u16) << 8 | self.compare as u16
    }
}

/// Scales by roughly 2.666 without multiplication overflow or floating point.
pub fn scale(value: u16) -> u16 {
    value.saturating_mul(2).saturating_add(2 * (value / 3))
}

#[derive(Copy, Clone, Debug)]
pub struct Extender {
    table: TickTable,
}

impl Extender {
    pub fn new(table: TickTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &TickTable {
        &self.table
    }

    /// Rejects pulses outside the receiver range.
    pub fn accept(&self, ticks: u16) -> Option<u16> {
        (self.table.in_min..=self.table.in_max).contains(&ticks).then(|| ticks)
    }

    pub fn expand(&self, ticks: u16) -> u16 {
        let t = &self.table;
        let half = t.mid.saturating_sub(t.in_min);
        let position = ticks.saturating_sub(t.in_min);
        match position.cmp(&half) {
            cmp::Ordering::Greater => t.mid.saturating_add(scale(position - half)),
            cmp::Ordering::Less => t.mid.saturating_sub(scale(half - position)),
            cmp::Ordering::Equal => t.mid,
        }
    }

    /// Limits to the maximum ratings of the servo.
    pub fn clamp(&self, ticks: u16) -> u16 {
        cmp::max(cmp::min(ticks, self.table.out_max), self.table.out_min)
    }

    pub fn convert(&self, ticks: u16) -> Option<TimerSetting> {
        let ticks = match self.accept(ticks) {
            Some(ticks) => ticks,
            None => {
                trace!("Drop pulse of {} ticks", ticks);
                return None;
            }
        };
        let output = self.clamp(self.expand(ticks));
        trace!("Pulse of {} ticks extended to {} ticks", ticks, output);
        Some(TimerSetting::from(output))
    }

    /// Endless input sweep between the receiver limits, starting upward from the mid point.
    pub fn sweep(&self) -> Sweep {
        Sweep { ticks: self.table.mid, rising: true, min: self.table.in_min, max: self.table.in_max }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Sweep {
    ticks: u16,
    rising: bool,
    min: u16,
    max: u16,
}

impl Iterator for Sweep {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        if self.rising && self.ticks >= self.max {
            self.rising = false;
        }
        if !self.rising && self.ticks <= self.min {
            self.rising = true;
        }
        self.ticks = match self.rising {
            true => self.ticks.saturating_add(SWEEP_STEP),
            false => self.ticks.saturating_sub(SWEEP_STEP),
        };
        Some(self.ticks)
    }
}

mod test {
    #[cfg(test)]
    fn extender() -> super::Extender {
        use super::{Extender, TickTable};
        use crate::pulse::PulseSet;

        Extender::new(TickTable::try_from(&PulseSet::default()).unwrap())
    }

    #[test]
    fn test_tick_table() {
        use super::TickTable;
        use crate::pulse::PulseSet;

        let table = TickTable::try_from(&PulseSet::default()).unwrap();
        let expected = TickTable { in_min: 1130, in_max: 2260, mid: 1695, out_min: 621, out_max: 2994 };
        assert_eq!(table, expected);
    }

    #[test]
    fn test_tick_table_out_of_range() {
        use fixed_point::FixedPoint;

        use super::TickTable;
        use crate::pulse::{Pulse, PulseSet};
        use crate::Error;

        let pulses = PulseSet { out_min: Pulse::new("OUT_MIN", FixedPoint(-1000)), ..Default::default() };
        match TickTable::try_from(&pulses) {
            Err(Error::TickRange { name, ticks }) => assert_eq!((name, ticks), ("OUT_MIN", -11)),
            other => panic!("Unexpected {:?}", other),
        }

        let pulses = PulseSet { in_max: Pulse::new("IN_MAX", FixedPoint(6000000)), ..Default::default() };
        match TickTable::try_from(&pulses) {
            Err(Error::TickRange { name, ticks }) => assert_eq!((name, ticks), ("IN_MAX", 67800)),
            other => panic!("Unexpected {:?}", other),
        }
    }

    #[test]
    fn test_tick_table_unordered() {
        use super::TickTable;
        use crate::pulse::{PulseSet, IN_MAX, MID};
        use crate::Error;

        let pulses = PulseSet { in_max: MID, mid: IN_MAX, ..Default::default() };
        assert!(matches!(TickTable::try_from(&pulses), Err(Error::Unordered)));
    }

    #[test]
    fn test_serialize_tick_table() {
        use serde_json::json;

        use super::{TickTable, TimerSetting};
        use crate::pulse::PulseSet;

        let table = TickTable::try_from(&PulseSet::default()).unwrap();
        let expected = json!({
            "IN_MIN_TICKS": 1130,
            "IN_MAX_TICKS": 2260,
            "MID_TICKS": 1695,
            "OUT_MIN_TICKS": 621,
            "OUT_MAX_TICKS": 2994,
        });
        assert_eq!(expected, serde_json::to_value(&table).unwrap());

        let setting = TimerSetting::from(1695);
        assert_eq!(json!({"overflows": 6, "compare": 159}), serde_json::to_value(&setting).unwrap());
    }

    #[test]
    fn test_scale() {
        use super::scale;

        assert_eq!(scale(0), 0);
        assert_eq!(scale(1), 2);
        assert_eq!(scale(3), 8);
        assert_eq!(scale(300), 800);
        assert_eq!(scale(565), 1506);
        assert_eq!(scale(u16::MAX), u16::MAX);
    }

    #[test]
    fn test_accept() {
        let extender = extender();
        assert_eq!(extender.accept(1129), None);
        assert_eq!(extender.accept(1130), Some(1130));
        assert_eq!(extender.accept(2260), Some(2260));
        assert_eq!(extender.accept(2261), None);
        assert_eq!(extender.accept(0), None);
    }

    #[test]
    fn test_expand() {
        let extender = extender();
        assert_eq!(extender.expand(1695), 1695);
        assert_eq!(extender.expand(1795), 1961);
        assert_eq!(extender.expand(1595), 1429);
        assert_eq!(extender.expand(1130), 189);
        assert_eq!(extender.expand(2260), 3201);
        assert_eq!(extender.expand(1129), 189); // below IN_MIN_TICKS, same as 1130
        assert_eq!(extender.clamp(extender.expand(1128)), 621);
    }

    #[test]
    fn test_clamp() {
        let extender = extender();
        assert_eq!(extender.clamp(189), 621);
        assert_eq!(extender.clamp(1695), 1695);
        assert_eq!(extender.clamp(3201), 2994);
    }

    #[test]
    fn test_convert() {
        use super::TimerSetting;

        let extender = extender();
        assert_eq!(extender.convert(1695), Some(TimerSetting { overflows: 6, compare: 159 }));
        assert_eq!(extender.convert(1130), Some(TimerSetting { overflows: 2, compare: 109 }));
        assert_eq!(extender.convert(2260), Some(TimerSetting { overflows: 11, compare: 178 }));
        assert_eq!(extender.convert(1000), None);
        assert_eq!(extender.convert(3000), None);
    }

    #[test]
    fn test_timer_setting() {
        use super::TimerSetting;

        assert_eq!(TimerSetting::from(0), TimerSetting::default());
        assert_eq!(TimerSetting::from(255), TimerSetting { overflows: 0, compare: 255 });
        assert_eq!(TimerSetting::from(256), TimerSetting { overflows: 1, compare: 0 });
        assert_eq!(TimerSetting { overflows: 8, compare: 206 }.ticks(), 2254);
        for ticks in [621, 1130, 1695, 2994] {
            assert_eq!(TimerSetting::from(ticks).ticks(), ticks);
        }
    }

    #[test]
    fn test_sweep() {
        use std::vec::Vec;

        let extender = extender();
        let first: Vec<u16> = extender.sweep().take(3).collect();
        assert_eq!(first, [1697, 1699, 1701]);

        let values: Vec<u16> = extender.sweep().take(2000).collect();
        assert_eq!(values.iter().max(), Some(&2261));
        assert_eq!(values.iter().min(), Some(&1129));
        assert!(values.windows(2).all(|w| w[0].abs_diff(w[1]) == 2));
        for &ticks in values.iter() {
            let output = extender.clamp(extender.expand(ticks));
            assert!((621..=2994).contains(&output));
        }
    }
}
