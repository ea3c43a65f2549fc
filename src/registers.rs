//! Register map definitions for the ADXL345 accelerometer.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{
    Coupling, DataRate, FifoMode, InterruptPin, InterruptPolarity, PowerMode, Range, Resolution,
    WakeupRate,
};

/// Register address of `DEVID`.
pub const REG_DEVID: u8 = 0x00;
/// Register address of `THRESH_TAP`.
pub const REG_THRESH_TAP: u8 = 0x1D;
/// Register address of `OFSX`.
pub const REG_OFSX: u8 = 0x1E;
/// Register address of `OFSY`.
pub const REG_OFSY: u8 = 0x1F;
/// Register address of `OFSZ`.
pub const REG_OFSZ: u8 = 0x20;
/// Register address of `DUR`.
pub const REG_DUR: u8 = 0x21;
/// Register address of `LATENT`.
pub const REG_LATENT: u8 = 0x22;
/// Register address of `WINDOW`.
pub const REG_WINDOW: u8 = 0x23;
/// Register address of `THRESH_ACT`.
pub const REG_THRESH_ACT: u8 = 0x24;
/// Register address of `THRESH_INACT`.
pub const REG_THRESH_INACT: u8 = 0x25;
/// Register address of `TIME_INACT`.
pub const REG_TIME_INACT: u8 = 0x26;
/// Register address of `ACT_INACT_CTL`.
pub const REG_ACT_INACT_CTL: u8 = 0x27;
/// Register address of `THRESH_FF`.
pub const REG_THRESH_FF: u8 = 0x28;
/// Register address of `TIME_FF`.
pub const REG_TIME_FF: u8 = 0x29;
/// Register address of `TAP_AXES`.
pub const REG_TAP_AXES: u8 = 0x2A;
/// Register address of `ACT_TAP_STATUS`.
pub const REG_ACT_TAP_STATUS: u8 = 0x2B;
/// Register address of `BW_RATE`.
pub const REG_BW_RATE: u8 = 0x2C;
/// Register address of `POWER_CTL`.
pub const REG_POWER_CTL: u8 = 0x2D;
/// Register address of `INT_ENABLE`.
pub const REG_INT_ENABLE: u8 = 0x2E;
/// Register address of `INT_MAP`.
pub const REG_INT_MAP: u8 = 0x2F;
/// Register address of `INT_SOURCE`.
pub const REG_INT_SOURCE: u8 = 0x30;
/// Register address of `DATA_FORMAT`.
pub const REG_DATA_FORMAT: u8 = 0x31;
/// Register address of `DATAX0`.
pub const REG_DATAX0: u8 = 0x32;
/// Register address of `DATAX1`.
pub const REG_DATAX1: u8 = 0x33;
/// Register address of `DATAY0`.
pub const REG_DATAY0: u8 = 0x34;
/// Register address of `DATAY1`.
pub const REG_DATAY1: u8 = 0x35;
/// Register address of `DATAZ0`.
pub const REG_DATAZ0: u8 = 0x36;
/// Register address of `DATAZ1`.
pub const REG_DATAZ1: u8 = 0x37;
/// Register address of `FIFO_CTL`.
pub const REG_FIFO_CTL: u8 = 0x38;
/// Register address of `FIFO_STATUS`.
pub const REG_FIFO_STATUS: u8 = 0x39;

/// Fixed device identification byte returned by `DEVID`.
pub const EXPECTED_DEVID: u8 = 0xE5;

/// Access permissions encoded for each register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAccess {
    /// Read-only register.
    ReadOnly,
    /// Read/write register.
    ReadWrite,
}

/// Minimal metadata exposed by every register value type.
pub trait Register {
    /// Raw storage backing the register payload.
    type Raw: Copy;
    /// Register address as documented in the datasheet.
    const ADDRESS: u8;
    /// Access permission classification.
    const ACCESS: RegisterAccess;
    /// Optional reset/default value defined by the datasheet.
    const RESET_VALUE: Option<Self::Raw>;
}

/// Bitfield representation of the `BW_RATE` register (address `0x2C`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BwRate {
    // Output data rate selection (bits 3:0).
    pub rate: DataRate,
    // Reduced power operation flag (bit 4).
    pub low_power: PowerMode,
    #[skip]
    __: B3,
}

impl From<u8> for BwRate {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<BwRate> for u8 {
    fn from(value: BwRate) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `POWER_CTL` register (address `0x2D`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerCtl {
    // Sleep-mode reading frequency (bits 1:0).
    pub wakeup: WakeupRate,
    // Sleep mode flag (bit 2).
    pub sleep: bool,
    // Measurement mode flag (bit 3); cleared means standby.
    pub measure: bool,
    // Auto-sleep enable flag (bit 4); only honoured with link set.
    pub auto_sleep: bool,
    // Serialized activity/inactivity detection (bit 5).
    pub link: bool,
    #[skip]
    __: B2,
}

impl From<u8> for PowerCtl {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<PowerCtl> for u8 {
    fn from(value: PowerCtl) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `DATA_FORMAT` register (address `0x31`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataFormat {
    // Measurement range selection (bits 1:0).
    pub range: Range,
    // Left-justified (MSB) output flag (bit 2).
    pub justify: bool,
    // Full-resolution output flag (bit 3).
    pub full_res: Resolution,
    #[skip]
    __: B1,
    // Interrupt polarity inversion (bit 5).
    pub int_invert: InterruptPolarity,
    // 3-wire SPI selection (bit 6).
    pub spi_3wire: bool,
    // Self-test force enable (bit 7).
    pub self_test: bool,
}

impl From<u8> for DataFormat {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<DataFormat> for u8 {
    fn from(value: DataFormat) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `ACT_INACT_CTL` register (address `0x27`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActInactCtl {
    // Inactivity detection axis enables (bits 2:0, Z first).
    pub inact_z: bool,
    pub inact_y: bool,
    pub inact_x: bool,
    // Inactivity coupling selection (bit 3).
    pub inact_coupling: Coupling,
    // Activity detection axis enables (bits 6:4, Z first).
    pub act_z: bool,
    pub act_y: bool,
    pub act_x: bool,
    // Activity coupling selection (bit 7).
    pub act_coupling: Coupling,
}

impl From<u8> for ActInactCtl {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<ActInactCtl> for u8 {
    fn from(value: ActInactCtl) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `TAP_AXES` register (address `0x2A`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapAxes {
    // Tap detection axis enables (bits 2:0, Z first).
    pub tap_z: bool,
    pub tap_y: bool,
    pub tap_x: bool,
    // Suppress double tap if acceleration exceeds THRESH_TAP between taps (bit 3).
    pub suppress: bool,
    #[skip]
    __: B4,
}

impl From<u8> for TapAxes {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<TapAxes> for u8 {
    fn from(value: TapAxes) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `ACT_TAP_STATUS` register (address `0x2B`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActTapStatus {
    // First axis involved in the latest tap event (bits 2:0, Z first).
    pub tap_z_source: bool,
    pub tap_y_source: bool,
    pub tap_x_source: bool,
    // Device is in sleep mode (bit 3).
    pub asleep: bool,
    // First axis involved in the latest activity event (bits 6:4, Z first).
    pub act_z_source: bool,
    pub act_y_source: bool,
    pub act_x_source: bool,
    #[skip]
    __: B1,
}

impl From<u8> for ActTapStatus {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<ActTapStatus> for u8 {
    fn from(value: ActTapStatus) -> Self {
        value.into_bytes()[0]
    }
}

/// Shared bit layout of the `INT_ENABLE`, `INT_MAP`, and `INT_SOURCE`
/// registers (addresses `0x2E`–`0x30`).
///
/// The same mask is used to enable interrupts, route them to a pin, and
/// decode which sources fired, so no single [`Register`] impl applies.
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptFlags {
    // FIFO overrun (bit 0).
    pub overrun: bool,
    // FIFO watermark reached (bit 1).
    pub watermark: bool,
    // Free-fall detected (bit 2).
    pub free_fall: bool,
    // Inactivity detected (bit 3).
    pub inactivity: bool,
    // Activity detected (bit 4).
    pub activity: bool,
    // Double tap detected (bit 5).
    pub double_tap: bool,
    // Single tap detected (bit 6).
    pub single_tap: bool,
    // New sample available (bit 7).
    pub data_ready: bool,
}

impl InterruptFlags {
    /// Returns `true` when no flag is set.
    pub fn is_empty(self) -> bool {
        u8::from(self) == 0
    }

    /// Returns `true` when every flag set in `other` is also set here.
    pub fn contains(self, other: Self) -> bool {
        let raw = u8::from(other);
        u8::from(self) & raw == raw
    }
}

impl From<u8> for InterruptFlags {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<InterruptFlags> for u8 {
    fn from(value: InterruptFlags) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `FIFO_CTL` register (address `0x38`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FifoCtl {
    // Watermark sample count, or trigger retention depth (bits 4:0).
    pub samples: B5,
    // Trigger event pin selection (bit 5).
    pub trigger: InterruptPin,
    // FIFO operating mode (bits 7:6).
    pub mode: FifoMode,
}

impl From<u8> for FifoCtl {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<FifoCtl> for u8 {
    fn from(value: FifoCtl) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `FIFO_STATUS` register (address `0x39`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FifoStatus {
    // Number of buffered sample frames (bits 5:0).
    pub entries: B6,
    #[skip]
    __: B1,
    // A trigger event has occurred (bit 7).
    pub fifo_trig: bool,
}

impl From<u8> for FifoStatus {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<FifoStatus> for u8 {
    fn from(value: FifoStatus) -> Self {
        value.into_bytes()[0]
    }
}

impl Register for BwRate {
    type Raw = u8;
    const ADDRESS: u8 = REG_BW_RATE;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x0A);
}

impl Register for PowerCtl {
    type Raw = u8;
    const ADDRESS: u8 = REG_POWER_CTL;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for DataFormat {
    type Raw = u8;
    const ADDRESS: u8 = REG_DATA_FORMAT;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for ActInactCtl {
    type Raw = u8;
    const ADDRESS: u8 = REG_ACT_INACT_CTL;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for TapAxes {
    type Raw = u8;
    const ADDRESS: u8 = REG_TAP_AXES;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for ActTapStatus {
    type Raw = u8;
    const ADDRESS: u8 = REG_ACT_TAP_STATUS;
    const ACCESS: RegisterAccess = RegisterAccess::ReadOnly;
    const RESET_VALUE: Option<Self::Raw> = None;
}

impl Register for FifoCtl {
    type Raw = u8;
    const ADDRESS: u8 = REG_FIFO_CTL;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for FifoStatus {
    type Raw = u8;
    const ADDRESS: u8 = REG_FIFO_STATUS;
    const ACCESS: RegisterAccess = RegisterAccess::ReadOnly;
    const RESET_VALUE: Option<Self::Raw> = None;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates that BW_RATE bitfields match the datasheet layout.
    #[test]
    fn bw_rate_layout_matches_datasheet() {
        let reg = BwRate::new()
            .with_rate(DataRate::Hz12_5)
            .with_low_power(PowerMode::LowPower);

        assert_eq!(u8::from(reg), 0b0001_0111);
        let decoded = BwRate::from(0x0A);
        assert_eq!(decoded.rate(), DataRate::Hz100);
        assert_eq!(decoded.low_power(), PowerMode::Normal);
    }

    /// Ensures POWER_CTL encodes and decodes as expected across all fields.
    #[test]
    fn power_ctl_roundtrip() {
        let power = PowerCtl::new()
            .with_wakeup(WakeupRate::Hz1)
            .with_measure(true)
            .with_auto_sleep(true)
            .with_link(true);

        assert_eq!(u8::from(power), 0b0011_1011);
        let decoded = PowerCtl::from(u8::from(power));
        assert_eq!(decoded.wakeup(), WakeupRate::Hz1);
        assert!(decoded.measure());
        assert!(!decoded.sleep());
        assert!(decoded.auto_sleep());
        assert!(decoded.link());
    }

    #[test]
    fn data_format_layout_matches_datasheet() {
        let format = DataFormat::new()
            .with_range(Range::G16)
            .with_full_res(Resolution::Full)
            .with_int_invert(InterruptPolarity::ActiveLow)
            .with_self_test(true);

        assert_eq!(u8::from(format), 0b1010_1011);
        let decoded = DataFormat::from(u8::from(format));
        assert_eq!(decoded.range(), Range::G16);
        assert_eq!(decoded.full_res(), Resolution::Full);
        assert_eq!(decoded.int_invert(), InterruptPolarity::ActiveLow);
        assert!(!decoded.spi_3wire());
        assert!(decoded.self_test());
    }

    #[test]
    fn act_inact_ctl_axis_bits() {
        let ctl = ActInactCtl::new()
            .with_act_x(true)
            .with_act_coupling(Coupling::Ac)
            .with_inact_z(true);

        assert_eq!(u8::from(ctl), 0b1100_0001);
    }

    #[test]
    fn tap_axes_layout_matches_datasheet() {
        let axes = TapAxes::new().with_tap_x(true).with_suppress(true);
        assert_eq!(u8::from(axes), 0b0000_1100);

        let decoded = TapAxes::from(0b0000_0011);
        assert!(decoded.tap_z());
        assert!(decoded.tap_y());
        assert!(!decoded.tap_x());
        assert!(!decoded.suppress());
    }

    #[test]
    fn interrupt_flags_match_datasheet_bits() {
        assert_eq!(u8::from(InterruptFlags::new().with_data_ready(true)), 0x80);
        assert_eq!(u8::from(InterruptFlags::new().with_single_tap(true)), 0x40);
        assert_eq!(u8::from(InterruptFlags::new().with_double_tap(true)), 0x20);
        assert_eq!(u8::from(InterruptFlags::new().with_activity(true)), 0x10);
        assert_eq!(u8::from(InterruptFlags::new().with_inactivity(true)), 0x08);
        assert_eq!(u8::from(InterruptFlags::new().with_free_fall(true)), 0x04);
        assert_eq!(u8::from(InterruptFlags::new().with_watermark(true)), 0x02);
        assert_eq!(u8::from(InterruptFlags::new().with_overrun(true)), 0x01);
    }

    #[test]
    fn interrupt_flags_contains() {
        let source = InterruptFlags::from(0b0101_0000);
        assert!(source.contains(InterruptFlags::new().with_activity(true)));
        assert!(!source.contains(InterruptFlags::new().with_data_ready(true)));
        assert!(!InterruptFlags::from(0).contains(source));
        assert!(InterruptFlags::from(0).is_empty());
    }

    #[test]
    fn fifo_ctl_roundtrip() {
        let ctl = FifoCtl::new()
            .with_samples(16)
            .with_trigger(InterruptPin::Int2)
            .with_mode(FifoMode::Stream);

        assert_eq!(u8::from(ctl), 0b1011_0000);
        let decoded = FifoCtl::from(u8::from(ctl));
        assert_eq!(decoded.samples(), 16);
        assert_eq!(decoded.trigger(), InterruptPin::Int2);
        assert_eq!(decoded.mode(), FifoMode::Stream);
    }

    #[test]
    fn fifo_status_decodes_entries_and_trigger() {
        let status = FifoStatus::from(0b1010_0001);
        assert_eq!(status.entries(), 33);
        assert!(status.fifo_trig());
    }
}
