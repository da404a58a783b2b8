use derive_more::{Display, From};

#[derive(Debug, Display, From)]
pub enum Error {
    #[cfg(feature = "std")]
    #[display(fmt = "Write header failed: {}", _0)]
    Io(std::io::Error),
    #[from(ignore)]
    #[display(fmt = "{} of {} ticks not representable by 16-bit timer", name, ticks)]
    TickRange { name: &'static str, ticks: i64 },
    #[from(ignore)]
    #[display(fmt = "Pulses not ordered, expect IN_MIN <= MID <= IN_MAX and OUT_MIN <= OUT_MAX")]
    Unordered,
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
