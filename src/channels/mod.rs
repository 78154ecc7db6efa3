//! Channel implementations

#[cfg(feature = "console")]
pub mod console;

#[cfg(feature = "console")]
pub use console::{BufferedConsole, ConsoleChannel, ConsoleOutput, ConsoleTarget, StdConsole};

pub use crate::core::Channel;
