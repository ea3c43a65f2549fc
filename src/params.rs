//! Strongly typed parameter enumerations for the ADXL345 driver.
//!
//! These enums map directly to datasheet field encodings and are used across
//! [`Config`](crate::config::Config) and the high-level driver APIs. Prefer these
//! types over raw integers to keep configuration values valid and explicit.
//!
//! # Examples
//!
//! ```rust
//! use adxl345::params::{DataRate, PowerMode, Range};
//!
//! let rate = DataRate::Hz100;
//! let range = Range::G4;
//! let mode = PowerMode::Normal;
//! let _ = (rate, range, mode);
//! ```

use modular_bitfield::prelude::Specifier;

/// Output data rate selections encoded in `BW_RATE[3:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 4]
pub enum DataRate {
    /// 0.10 Hz output data rate.
    Hz0_10 = 0b0000,
    /// 0.20 Hz output data rate.
    Hz0_20 = 0b0001,
    /// 0.39 Hz output data rate.
    Hz0_39 = 0b0010,
    /// 0.78 Hz output data rate.
    Hz0_78 = 0b0011,
    /// 1.56 Hz output data rate.
    Hz1_56 = 0b0100,
    /// 3.13 Hz output data rate.
    Hz3_13 = 0b0101,
    /// 6.25 Hz output data rate.
    Hz6_25 = 0b0110,
    /// 12.5 Hz output data rate.
    Hz12_5 = 0b0111,
    /// 25 Hz output data rate.
    Hz25 = 0b1000,
    /// 50 Hz output data rate.
    Hz50 = 0b1001,
    /// 100 Hz output data rate (power-on default).
    Hz100 = 0b1010,
    /// 200 Hz output data rate.
    Hz200 = 0b1011,
    /// 400 Hz output data rate.
    Hz400 = 0b1100,
    /// 800 Hz output data rate.
    Hz800 = 0b1101,
    /// 1600 Hz output data rate.
    Hz1600 = 0b1110,
    /// 3200 Hz output data rate.
    Hz3200 = 0b1111,
}

impl DataRate {
    /// Returns the ODR in millihertz as an integer value.
    pub const fn millihz(self) -> u32 {
        match self {
            Self::Hz0_10 => 100,
            Self::Hz0_20 => 200,
            Self::Hz0_39 => 390,
            Self::Hz0_78 => 780,
            Self::Hz1_56 => 1_560,
            Self::Hz3_13 => 3_130,
            Self::Hz6_25 => 6_250,
            Self::Hz12_5 => 12_500,
            Self::Hz25 => 25_000,
            Self::Hz50 => 50_000,
            Self::Hz100 => 100_000,
            Self::Hz200 => 200_000,
            Self::Hz400 => 400_000,
            Self::Hz800 => 800_000,
            Self::Hz1600 => 1_600_000,
            Self::Hz3200 => 3_200_000,
        }
    }

    /// Returns `true` when low-power operation is defined for this rate.
    ///
    /// The reduced-power state machine only runs between 12.5 Hz and 400 Hz.
    pub const fn supports_low_power(self) -> bool {
        let mhz = self.millihz();
        mhz >= 12_500 && mhz <= 400_000
    }
}

/// Power draw selection bit (`BW_RATE.LOW_POWER`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 1]
pub enum PowerMode {
    /// Normal operation (full noise performance).
    Normal = 0,
    /// Reduced power operation (higher noise).
    LowPower = 1,
}

/// Sleep-mode reading frequencies encoded in `POWER_CTL[1:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 2]
pub enum WakeupRate {
    /// 8 readings per second while asleep.
    Hz8 = 0b00,
    /// 4 readings per second while asleep.
    Hz4 = 0b01,
    /// 2 readings per second while asleep.
    Hz2 = 0b10,
    /// 1 reading per second while asleep.
    Hz1 = 0b11,
}

impl WakeupRate {
    /// Returns the sleep-mode sampling frequency in hertz.
    pub const fn hz(self) -> u32 {
        match self {
            Self::Hz8 => 8,
            Self::Hz4 => 4,
            Self::Hz2 => 2,
            Self::Hz1 => 1,
        }
    }
}

/// Measurement ranges encoded in `DATA_FORMAT[1:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 2]
pub enum Range {
    /// ±2 g range.
    G2 = 0b00,
    /// ±4 g range.
    G4 = 0b01,
    /// ±8 g range.
    G8 = 0b10,
    /// ±16 g range.
    G16 = 0b11,
}

impl Range {
    /// Returns the full-scale magnitude in g.
    pub const fn max_g(self) -> u8 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }

    /// Returns the output sensitivity in LSB per g for this range and
    /// resolution.
    ///
    /// Full resolution keeps a fixed 4 mg/LSB (256 LSB/g) scale by growing
    /// the sample width with the range; 10-bit mode halves the sensitivity
    /// each time the range doubles.
    pub const fn lsb_per_g(self, resolution: Resolution) -> i32 {
        match (resolution, self) {
            (Resolution::Full, _) | (Resolution::TenBit, Self::G2) => 256,
            (Resolution::TenBit, Self::G4) => 128,
            (Resolution::TenBit, Self::G8) => 64,
            (Resolution::TenBit, Self::G16) => 32,
        }
    }
}

/// Output resolution bit (`DATA_FORMAT.FULL_RES`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 1]
pub enum Resolution {
    /// Fixed 10-bit output, range-dependent scale factor.
    TenBit = 0,
    /// Full resolution, constant 4 mg/LSB scale factor.
    Full = 1,
}

/// Interrupt output polarity bit (`DATA_FORMAT.INT_INVERT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 1]
pub enum InterruptPolarity {
    /// Interrupt pins drive high when active.
    ActiveHigh = 0,
    /// Interrupt pins drive low when active.
    ActiveLow = 1,
}

/// Physical interrupt pin selection used by `INT_MAP` and `FIFO_CTL.TRIGGER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 1]
pub enum InterruptPin {
    /// Route to the INT1 pin.
    Int1 = 0,
    /// Route to the INT2 pin.
    Int2 = 1,
}

/// FIFO operating modes encoded in `FIFO_CTL[7:6]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 2]
pub enum FifoMode {
    /// FIFO disabled; bypassed.
    Bypass = 0b00,
    /// Collect until full, then stop.
    Fifo = 0b01,
    /// Streaming mode (circular buffer holding the latest samples).
    Stream = 0b10,
    /// Hold the samples surrounding a trigger event.
    Trigger = 0b11,
}

/// AC/DC coupling selection for activity and inactivity detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 1]
pub enum Coupling {
    /// Compare samples directly against the threshold.
    Dc = 0,
    /// Compare against a reference captured at detection start.
    Ac = 1,
}

/// Measurement axis selector for single-axis reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// X axis (`DATAX0`/`DATAX1`).
    X,
    /// Y axis (`DATAY0`/`DATAY1`).
    Y,
    /// Z axis (`DATAZ0`/`DATAZ1`).
    Z,
}

impl Axis {
    /// Returns the address of the low data byte for this axis.
    pub const fn data_register(self) -> u8 {
        match self {
            Self::X => crate::registers::REG_DATAX0,
            Self::Y => crate::registers::REG_DATAY0,
            Self::Z => crate::registers::REG_DATAZ0,
        }
    }
}

/// Axis participation mask for tap, activity, and inactivity detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisMask {
    /// Include the X axis.
    pub x: bool,
    /// Include the Y axis.
    pub y: bool,
    /// Include the Z axis.
    pub z: bool,
}

impl AxisMask {
    /// Mask selecting all three axes.
    pub const fn all() -> Self {
        Self {
            x: true,
            y: true,
            z: true,
        }
    }

    /// Mask selecting no axis.
    pub const fn none() -> Self {
        Self {
            x: false,
            y: false,
            z: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_power_window_covers_12_5_to_400_hz() {
        assert!(!DataRate::Hz6_25.supports_low_power());
        assert!(DataRate::Hz12_5.supports_low_power());
        assert!(DataRate::Hz400.supports_low_power());
        assert!(!DataRate::Hz800.supports_low_power());
    }

    #[test]
    fn wakeup_rate_reports_sleep_sampling_frequency() {
        assert_eq!(WakeupRate::Hz8.hz(), 8);
        assert_eq!(WakeupRate::Hz4.hz(), 4);
        assert_eq!(WakeupRate::Hz2.hz(), 2);
        assert_eq!(WakeupRate::Hz1.hz(), 1);
    }

    /// In 10-bit mode the output always spans 1024 codes, so sensitivity
    /// times full scale is constant.
    #[test]
    fn ten_bit_sensitivity_tracks_full_scale() {
        for range in [Range::G2, Range::G4, Range::G8, Range::G16] {
            assert_eq!(
                range.lsb_per_g(Resolution::TenBit) * range.max_g() as i32,
                512
            );
        }
    }
}
