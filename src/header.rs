use core::fmt::{self, Display, Write};

use crate::pulse::PulseSet;

pub const DISCLAIMER: &str = "/* This file is generated - do not change it manually! */";
pub const GUARD: &str = "__ppm_ticks__";

/// Generated C header with the tick count of every pulse, guarded against multiple inclusion.
#[derive(Copy, Clone, Debug)]
pub struct Header<'a> {
    guard: &'a str,
    pulses: &'a PulseSet,
}

impl Default for Header<'static> {
    fn default() -> Self {
        Self { guard: GUARD, pulses: &PulseSet::DEFAULT }
    }
}

impl<'a> Header<'a> {
    pub fn new(guard: &'a str, pulses: &'a PulseSet) -> Self {
        Self { guard, pulses }
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> fmt::Result {
        writeln!(w, "{}", DISCLAIMER)?;
        writeln!(w, "#ifndef {}", self.guard)?;
        writeln!(w, "#define {}", self.guard)?;
        for pulse in self.pulses.iter() {
            let ticks = pulse.ticks();
            debug!("{} ms of {} is {} ticks", pulse.width, pulse.name, ticks);
            writeln!(w, "#define {} {}", pulse.define_name(), ticks)?;
        }
        writeln!(w, "#endif")
    }
}

impl<'a> Display for Header<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_to(f)
    }
}

/// Writes the whole header, nothing is written on formatting failure.
#[cfg(feature = "std")]
pub fn emit<W: std::io::Write>(header: &Header, mut w: W) -> Result<(), crate::Error> {
    let mut text = String::new();
    header.write_to(&mut text).map_err(|_| std::io::Error::from(std::io::ErrorKind::Other))?;
    w.write_all(text.as_bytes())?;
    w.flush()?;
    trace!("Header of {} bytes written", text.len());
    Ok(())
}

mod test {
    #[test]
    fn test_write_header() -> core::fmt::Result {
        use std::string::String;

        use indoc::indoc;

        use super::Header;

        let mut buf = String::new();
        Header::default().write_to(&mut buf)?;
        let expected = indoc! {"
            /* This file is generated - do not change it manually! */
            #ifndef __ppm_ticks__
            #define __ppm_ticks__
            #define IN_MIN_TICKS 1130
            #define IN_MAX_TICKS 2260
            #define MID_TICKS 1695
            #define OUT_MIN_TICKS 621
            #define OUT_MAX_TICKS 2994
            #endif
        "};
        assert_eq!(expected, buf);
        Ok(())
    }

    #[test]
    fn test_display_header() {
        use std::string::ToString;
        use std::vec::Vec;

        use super::Header;

        let text = Header::default().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[1], "#ifndef __ppm_ticks__");
        assert_eq!(lines[2], "#define __ppm_ticks__");
        assert_eq!(lines[8], "#endif");
        assert!(text.ends_with("#endif\n"));
    }

    #[test]
    fn test_custom_pulses() {
        use std::string::ToString;

        use fixed_point::FixedPoint;

        use super::Header;
        use crate::pulse::{Pulse, PulseSet};

        let pulses = PulseSet {
            out_min: Pulse::new("OUT_MIN", FixedPoint(50000)),
            out_max: Pulse::new("OUT_MAX", FixedPoint(-1000)),
            ..Default::default()
        };
        let text = Header::new("__servo__", &pulses).to_string();
        assert!(text.contains("#ifndef __servo__\n#define __servo__\n"));
        assert!(text.contains("#define OUT_MIN_TICKS 565\n"));
        assert!(text.contains("#define OUT_MAX_TICKS -11\n"));
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_emit() {
        use super::{emit, Header};

        let mut buf: Vec<u8> = Vec::new();
        emit(&Header::default(), &mut buf).unwrap();
        assert_eq!(buf, Header::default().to_string().into_bytes());
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_emit_closed_stream() {
        use std::io;

        use super::{emit, Header};
        use crate::Error;

        struct Closed;

        impl io::Write for Closed {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::from(io::ErrorKind::BrokenPipe))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        match emit(&Header::default(), Closed) {
            Err(Error::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("Unexpected {:?}", other),
        }
    }
}
