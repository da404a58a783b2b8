#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
extern crate log;
extern crate fixed_point;
extern crate serde;

pub mod error;
pub mod extender;
pub mod header;
pub mod pulse;
pub mod ticks;

pub use error::Error;
pub use header::Header;
pub use pulse::{Pulse, PulseSet};
pub use ticks::{to_ticks, Millis};

#[cfg(all(test, not(feature = "std")))]
extern crate std;

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;
