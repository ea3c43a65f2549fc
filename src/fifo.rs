//! FIFO configuration and drain utilities.

use crate::error::Result;
use crate::interface::Adxl345Interface;
use crate::params::{FifoMode, InterruptPin};
use crate::registers::{FifoCtl, FifoStatus, REG_DATAX0};

/// FIFO buffer depth in sample frames.
pub const FIFO_DEPTH: usize = 32;

// Bytes per buffered X/Y/Z sample frame.
const FRAME_BYTES: usize = 6;

/// Programming for the `FIFO_CTL` register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FifoConfig {
    /// FIFO operating mode.
    pub mode: FifoMode,
    /// Pin the trigger event is taken from (trigger mode only).
    pub trigger: InterruptPin,
    /// Watermark level in samples, or retention depth in trigger mode.
    /// Only the low five bits are significant.
    pub samples: u8,
}

impl FifoConfig {
    /// Creates a new FIFO configuration.
    pub const fn new(mode: FifoMode, trigger: InterruptPin, samples: u8) -> Self {
        Self {
            mode,
            trigger,
            samples,
        }
    }

    /// Encodes the configuration as a `FIFO_CTL` register value.
    pub fn to_register(self) -> FifoCtl {
        FifoCtl::new()
            .with_samples(self.samples & 0x1F)
            .with_trigger(self.trigger)
            .with_mode(self.mode)
    }
}

impl Default for FifoConfig {
    fn default() -> Self {
        Self {
            mode: FifoMode::Bypass,
            trigger: InterruptPin::Int1,
            samples: 0,
        }
    }
}

/// Decoded snapshot of the `FIFO_STATUS` register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FifoSnapshot {
    /// Number of sample frames currently buffered (up to [`FIFO_DEPTH`]).
    pub entries: u8,
    /// A FIFO trigger event has occurred.
    pub triggered: bool,
}

impl FifoSnapshot {
    /// Builds a snapshot from the raw FIFO_STATUS bitfield.
    pub fn from_register(status: FifoStatus) -> Self {
        Self {
            entries: status.entries(),
            triggered: status.fifo_trig(),
        }
    }
}

/// Pops buffered sample frames into the provided slice.
///
/// Each frame is consumed with a 6-byte burst starting at `DATAX0`; the
/// FIFO advances once per completed burst. The caller is responsible for
/// bounding the slice by the buffered entry count.
pub fn drain_samples<IFACE>(
    interface: &mut IFACE,
    frames: &mut [[i16; 3]],
) -> Result<usize, IFACE::Error>
where
    IFACE: Adxl345Interface,
{
    for frame in frames.iter_mut() {
        let mut raw = [0u8; FRAME_BYTES];
        interface.read_many(REG_DATAX0, &mut raw)?;

        frame[0] = i16::from_le_bytes([raw[0], raw[1]]);
        frame[1] = i16::from_le_bytes([raw[2], raw[3]]);
        frame[2] = i16::from_le_bytes([raw[4], raw[5]]);
    }

    Ok(frames.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_encodes_fifo_ctl() {
        let config = FifoConfig::new(FifoMode::Stream, InterruptPin::Int1, 16);
        assert_eq!(u8::from(config.to_register()), 0b1001_0000);
    }

    #[test]
    fn config_masks_watermark_to_five_bits() {
        let config = FifoConfig::new(FifoMode::Fifo, InterruptPin::Int1, 0xFF);
        assert_eq!(u8::from(config.to_register()), 0b0101_1111);
    }

    #[test]
    fn snapshot_decodes_entries_and_trigger() {
        let snapshot = FifoSnapshot::from_register(FifoStatus::from(0b1000_0010));
        assert_eq!(snapshot.entries, 2);
        assert!(snapshot.triggered);
    }
}
