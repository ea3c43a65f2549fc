//! `#![no_std]` driver for the Analog Devices ADXL345 digital 3-axis MEMS
//! accelerometer, built on the `embedded-hal` 1.0 bus traits.
//!
//! The ADXL345 exposes a register-mapped control interface over I2C or
//! 4-wire SPI. This crate provides typed register definitions, a validated
//! [`Config`](config::Config), and a high-level [`Adxl345`] driver covering
//! measurement, power modes, offset calibration, tap/activity/inactivity/
//! free-fall detection, interrupt routing, and the on-chip FIFO.
//!
//! # Example
//!
//! ```rust,ignore
//! use adxl345::{Adxl345, config::Config};
//! use adxl345::interface::i2c::SlaveAddr;
//! use adxl345::params::{DataRate, Range};
//!
//! let config = Config::new()
//!     .data_rate(DataRate::Hz100)
//!     .range(Range::G4)
//!     .build();
//!
//! let mut accel = Adxl345::new_i2c(i2c, SlaveAddr::Default, config);
//! accel.init(&mut delay)?;
//! accel.start_measurement()?;
//!
//! let [x, y, z] = accel.read_xyz_mg()?;
//! ```

#![no_std]

#[cfg(test)]
extern crate std;

mod error;
#[macro_use]
mod log;

pub mod config;
pub mod device;
pub mod fifo;
pub mod interface;
pub mod params;
pub mod registers;

pub use crate::device::Adxl345;
pub use crate::error::{Error, Result};
