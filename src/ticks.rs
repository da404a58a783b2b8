use fixed_point::{fixed, FixedPoint};

/// Pulse width in milliseconds with two decimal digits.
pub type Millis = FixedPoint<i32, 2>;

/// Timer clock source prescaler of the 8-bit timer, clk_io/8.
pub const PRESCALER: u8 = 8;

/// Ticks per millisecond of pulse width.
///
/// Nominally 1.2 at the prescaled timer clock, but 1.13 measures better. Probably the overhead of
/// simulating a 16-bit counter with an 8-bit counter. Not verified on real hardware.
pub const SCALE: FixedPoint<i32, 2> = fixed!(1.13, 2);

/// Converts a pulse width to timer ticks, truncating toward zero.
///
/// Exact for every `i32` raw value and decimal length, a saturated divisor still truncates to 0.
pub const fn to_ticks<const D: u8>(pulse_ms: FixedPoint<i32, D>) -> i64 {
    let product = pulse_ms.0 as i64 * SCALE.0 as i64;
    let divisor = 10_i64.saturating_pow(D as u32).saturating_mul(100);
    product / divisor
}

mod test {
    #[test]
    fn test_to_ticks() {
        use fixed_point::FixedPoint;

        use super::to_ticks;

        assert_eq!(to_ticks(FixedPoint::<i32, 0>(1000)), 1130);
        assert_eq!(to_ticks(FixedPoint::<i32, 0>(2000)), 2260);
        assert_eq!(to_ticks(FixedPoint::<i32, 0>(1500)), 1695);
        assert_eq!(to_ticks(FixedPoint::<i32, 0>(550)), 621);
        assert_eq!(to_ticks(FixedPoint::<i32, 0>(2650)), 2994);
        assert_eq!(to_ticks(FixedPoint::<i32, 0>(0)), 0);
    }

    #[test]
    fn test_to_ticks_truncate() {
        use core::str::FromStr;

        use fixed_point::FixedPoint;

        use super::{to_ticks, Millis};

        assert_eq!(to_ticks(FixedPoint::<i32, 0>(-10)), -11);
        assert_eq!(to_ticks(FixedPoint::<i32, 0>(-1)), -1);
        assert_eq!(to_ticks(Millis::from_str("0.88").unwrap()), 0); // 0.9944
        assert_eq!(to_ticks(Millis::from_str("0.89").unwrap()), 1); // 1.0057
        assert_eq!(to_ticks(Millis::from_str("-0.89").unwrap()), -1);
        assert_eq!(to_ticks(Millis::from_str("1500.5").unwrap()), 1695); // 1695.565
        assert_eq!(to_ticks(FixedPoint::<i32, 3>(1_500_999)), 1696); // 1696.128
    }

    #[test]
    fn test_to_ticks_decimal_length() {
        use fixed_point::FixedPoint;

        use super::to_ticks;

        for ms in [-250, 0, 550, 1000, 2650] {
            let expected = to_ticks(FixedPoint::<i32, 0>(ms));
            assert_eq!(to_ticks(FixedPoint::<i32, 1>(ms * 10)), expected);
            assert_eq!(to_ticks(FixedPoint::<i32, 2>(ms * 100)), expected);
            assert_eq!(to_ticks(FixedPoint::<i32, 3>(ms * 1000)), expected);
        }
    }

    #[test]
    fn test_to_ticks_large() {
        use fixed_point::FixedPoint;

        use super::to_ticks;

        assert_eq!(to_ticks(FixedPoint::<i32, 0>(2_000_000_000)), 2_260_000_000);
        assert_eq!(to_ticks(FixedPoint::<i32, 0>(i32::MIN)), -2_426_656_522); // -2426656522.24
        assert_eq!(to_ticks(FixedPoint::<i32, 18>(i32::MAX)), 0);
        assert_eq!(to_ticks(FixedPoint::<i32, 19>(i32::MAX)), 0);
        assert_eq!(to_ticks(FixedPoint::<i32, 255>(i32::MIN)), 0);
    }

    #[test]
    fn test_to_ticks_deterministic() {
        use super::{to_ticks, Millis};

        let pulse = Millis::default();
        let first = to_ticks(pulse);
        for _ in 0..10 {
            assert_eq!(to_ticks(pulse), first);
        }
    }

    #[test]
    fn test_to_ticks_monotonic() {
        use fixed_point::FixedPoint;

        use super::to_ticks;

        let mut previous = to_ticks(FixedPoint::<i32, 2>(0));
        for raw in 1..300_000 {
            let ticks = to_ticks(FixedPoint::<i32, 2>(raw));
            assert!(previous <= ticks, "{} ticks before {} ticks at {}", previous, ticks, raw);
            previous = ticks;
        }
    }
}
