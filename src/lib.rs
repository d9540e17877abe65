#![cfg_attr(not(test), no_std)]
//! Driver for the Analog Devices ADXL343/ADXL344/ADXL345/ADXL346 accelerometers.
//!
//! The driver keeps a write-through cache of the device registers, dispatches interrupt
//! sources to registered handlers, streams FIFO bursts into self-describing buffers and
//! decodes those buffers into physical units.

#[macro_use]
mod log;

mod error;

pub mod cache;
pub mod config;
pub mod decoder;
pub mod device;
pub mod fifo;
pub mod interface;
pub mod params;
pub mod registers;
pub mod rtio;
pub mod sensor;
pub mod trigger;

pub use crate::device::Adxl34x;
pub use crate::error::{Error, Result};
