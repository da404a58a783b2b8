use core::fmt::{self, Display};

use fixed_point::fixed;

use crate::ticks::{to_ticks, Millis};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pulse {
    pub name: &'static str,
    pub width: Millis,
}

impl Pulse {
    pub const fn new(name: &'static str, width: Millis) -> Self {
        Self { name, width }
    }

    pub fn ticks(&self) -> i64 {
        to_ticks(self.width)
    }

    pub fn define_name(&self) -> DefineName {
        DefineName(self.name)
    }
}

/// `<NAME>_TICKS`, as it appears in the generated header.
#[derive(Copy, Clone, Debug)]
pub struct DefineName(&'static str);

impl Display for DefineName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}_TICKS", self.0)
    }
}

pub const IN_MIN: Pulse = Pulse::new("IN_MIN", fixed!(1000.0, 2));
pub const IN_MAX: Pulse = Pulse::new("IN_MAX", fixed!(2000.0, 2));
pub const MID: Pulse = Pulse::new("MID", fixed!(1500.0, 2));
pub const OUT_MIN: Pulse = Pulse::new("OUT_MIN", fixed!(550.0, 2));
pub const OUT_MAX: Pulse = Pulse::new("OUT_MAX", fixed!(2650.0, 2));

/// Accepted receiver pulses and the pulse limits of the 270 degree servo.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PulseSet {
    pub in_min: Pulse,
    pub in_max: Pulse,
    pub mid: Pulse,
    pub out_min: Pulse,
    pub out_max: Pulse,
}

impl Default for PulseSet {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl PulseSet {
    pub const DEFAULT: Self =
        Self { in_min: IN_MIN, in_max: IN_MAX, mid: MID, out_min: OUT_MIN, out_max: OUT_MAX };

    /// Header order.
    pub fn iter(&self) -> impl Iterator<Item = &Pulse> {
        [&self.in_min, &self.in_max, &self.mid, &self.out_min, &self.out_max].into_iter()
    }
}

mod test {
    #[test]
    fn test_default_pulses() {
        use std::vec::Vec;

        use super::PulseSet;

        let pulses = PulseSet::default();
        let names: Vec<&str> = pulses.iter().map(|p| p.name).collect();
        assert_eq!(names, ["IN_MIN", "IN_MAX", "MID", "OUT_MIN", "OUT_MAX"]);
        let ticks: Vec<i64> = pulses.iter().map(|p| p.ticks()).collect();
        assert_eq!(ticks, [1130, 2260, 1695, 621, 2994]);
    }

    #[test]
    fn test_define_name() {
        use std::string::ToString;

        use super::{MID, OUT_MAX};

        assert_eq!(MID.define_name().to_string(), "MID_TICKS");
        assert_eq!(OUT_MAX.define_name().to_string(), "OUT_MAX_TICKS");
    }

    #[test]
    fn test_pulse_width() {
        use fixed_point::FixedPoint;

        use super::{IN_MIN, OUT_MIN};

        assert_eq!(IN_MIN.width, FixedPoint::<i32, 2>(100000));
        assert_eq!(OUT_MIN.width, FixedPoint::<i32, 2>(55000));
    }
}
