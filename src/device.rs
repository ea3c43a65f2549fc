//! High-level ADXL345 device driver implementation.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fifo::{self, FifoConfig, FifoSnapshot};
use crate::interface::i2c::{I2cInterface, SlaveAddr};
use crate::interface::spi::SpiInterface;
use crate::interface::Adxl345Interface;
use crate::params::{Axis, AxisMask, Coupling, InterruptPin, WakeupRate};
use crate::registers::{
    ActInactCtl,
    ActTapStatus,
    BwRate,
    DataFormat,
    FifoStatus,
    InterruptFlags,
    PowerCtl,
    TapAxes,
    EXPECTED_DEVID,
    REG_ACT_INACT_CTL,
    REG_ACT_TAP_STATUS,
    REG_BW_RATE,
    REG_DATAX0,
    REG_DATA_FORMAT,
    REG_DEVID,
    REG_DUR,
    REG_FIFO_CTL,
    REG_FIFO_STATUS,
    REG_INT_ENABLE,
    REG_INT_MAP,
    REG_INT_SOURCE,
    REG_OFSX,
    REG_POWER_CTL,
    REG_TAP_AXES,
    REG_THRESH_ACT,
    REG_THRESH_FF,
    REG_THRESH_INACT,
    REG_THRESH_TAP,
};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiDevice;

// ADXL345 datasheet power-up to standby turn-on time (microseconds).
const POWER_UP_TO_STANDBY_DELAY_US: u32 = 1_400;
// Number of consecutive bytes spanning X, Y, Z axis samples.
const RAW_AXIS_BYTES: usize = 6;

/// High-level synchronous driver for the ADXL345 accelerometer.
pub struct Adxl345<IFACE> {
    interface: IFACE,
    config: Config,
}

/// Decoded view of the `ACT_TAP_STATUS` register with explicit flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionStatus {
    /// ACT_TAP_STATUS[6] ACT_X source.
    pub act_x: bool,
    /// ACT_TAP_STATUS[5] ACT_Y source.
    pub act_y: bool,
    /// ACT_TAP_STATUS[4] ACT_Z source.
    pub act_z: bool,
    /// ACT_TAP_STATUS[3] ASLEEP.
    pub asleep: bool,
    /// ACT_TAP_STATUS[2] TAP_X source.
    pub tap_x: bool,
    /// ACT_TAP_STATUS[1] TAP_Y source.
    pub tap_y: bool,
    /// ACT_TAP_STATUS[0] TAP_Z source.
    pub tap_z: bool,
}

impl MotionStatus {
    /// Builds a status view from the raw ACT_TAP_STATUS bitfield.
    pub fn from_register(status: ActTapStatus) -> Self {
        Self {
            act_x: status.act_x_source(),
            act_y: status.act_y_source(),
            act_z: status.act_z_source(),
            asleep: status.asleep(),
            tap_x: status.tap_x_source(),
            tap_y: status.tap_y_source(),
            tap_z: status.tap_z_source(),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MotionStatus {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "MotionStatus {{\n    ACT_X: {},\n    ACT_Y: {},\n    ACT_Z: {},\n    ASLEEP: {},\n    TAP_X: {},\n    TAP_Y: {},\n    TAP_Z: {}\n}}",
            self.act_x,
            self.act_y,
            self.act_z,
            self.asleep,
            self.tap_x,
            self.tap_y,
            self.tap_z
        );
    }
}

impl<IFACE> Adxl345<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided bus interface.
    pub fn new(interface: IFACE, config: Config) -> Self {
        Self { interface, config }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> (IFACE, Config) {
        (self.interface, self.config)
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }
}

impl<I2C> Adxl345<I2cInterface<I2C>>
where
    I2C: I2c,
{
    // ==================================================================
    // == I2C Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for I2C transports.
    pub fn new_i2c(i2c: I2C, address: SlaveAddr, config: Config) -> Self {
        Self::new(I2cInterface::new(i2c, address), config)
    }

    /// Releases the driver, returning the I2C bus and configuration.
    pub fn release_i2c(self) -> (I2C, Config) {
        let (iface, config) = self.release();
        (iface.release(), config)
    }
}

impl<SPI> Adxl345<SpiInterface<SPI>>
where
    SPI: SpiDevice,
{
    // ==================================================================
    // == SPI Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for SPI transports.
    pub fn new_spi(spi: SPI, config: Config) -> Self {
        Self::new(SpiInterface::new(spi), config)
    }

    /// Releases the driver, returning the SPI device and configuration.
    pub fn release_spi(self) -> (SPI, Config) {
        let (iface, config) = self.release();
        (iface.release(), config)
    }
}

impl<IFACE, CommE> Adxl345<IFACE>
where
    IFACE: Adxl345Interface<Error = CommE>,
{
    // ==================================================================
    // == Initialization & Global Configuration =========================
    // ==================================================================
    /// Initializes the sensor using the current configuration.
    ///
    /// Waits the datasheet power-up-to-standby turn-on time, verifies the
    /// device identification byte, forces standby, and programs the rate,
    /// power, and data-format registers. The device is left in standby;
    /// call [`start_measurement`](Self::start_measurement) to begin
    /// sampling.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), CommE> {
        self.config.validate().map_err(|_| Error::InvalidConfig)?;

        delay.delay_us(POWER_UP_TO_STANDBY_DELAY_US);
        self.check_id()?;
        self.standby()?;
        self.configure(self.config)?;
        debug!("adxl345 initialized");
        Ok(())
    }

    /// Applies a new configuration to the device.
    ///
    /// Register programming order follows the datasheet recommendation:
    /// `BW_RATE`, then `POWER_CTL` with the inactivity window, then
    /// `DATA_FORMAT`.
    pub fn configure(&mut self, config: Config) -> Result<(), CommE> {
        config.validate().map_err(|_| Error::InvalidConfig)?;

        self.apply_rate_config(&config)?;
        self.apply_power_ctl_config(&config)?;
        self.apply_data_format_config(&config)?;

        self.config = config;
        Ok(())
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a mutable reference to the active configuration.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    // ==================================================================
    // == Identification & Status =======================================
    // ==================================================================
    /// Reads the identification register and returns the raw byte.
    pub fn device_id(&mut self) -> Result<u8, CommE> {
        self.interface.read_register(REG_DEVID).map_err(Error::from)
    }

    /// Verifies the identification register against the fixed `0xE5` value.
    pub fn check_id(&mut self) -> Result<(), CommE> {
        let id = self.device_id()?;
        if id != EXPECTED_DEVID {
            return Err(Error::DeviceIdMismatch);
        }
        Ok(())
    }

    /// Returns a decoded view of the `ACT_TAP_STATUS` register.
    ///
    /// Tap source bits stay latched until `INT_SOURCE` is read.
    pub fn motion_status(&mut self) -> Result<MotionStatus, CommE> {
        let raw = self
            .interface
            .read_register(REG_ACT_TAP_STATUS)
            .map_err(Error::from)?;

        Ok(MotionStatus::from_register(ActTapStatus::from(raw)))
    }

    // ==================================================================
    // == Power Modes ===================================================
    // ==================================================================
    /// Enters measurement mode, leaving sleep if it was active.
    pub fn start_measurement(&mut self) -> Result<(), CommE> {
        self.update_power_ctl(|power| {
            power.set_measure(true);
            power.set_sleep(false);
        })?;
        Ok(())
    }

    /// Enters standby mode, clearing the sleep and measure flags.
    ///
    /// Standby is also the required intermediate step when leaving sleep
    /// mode, so the sequence standby then measure never serves a stale
    /// sample.
    pub fn standby(&mut self) -> Result<(), CommE> {
        self.update_power_ctl(|power| {
            power.set_measure(false);
            power.set_sleep(false);
        })?;
        Ok(())
    }

    /// Enters sleep mode, sampling at the supplied wakeup rate.
    pub fn sleep(&mut self, wakeup: WakeupRate) -> Result<(), CommE> {
        self.update_power_ctl(|power| {
            power.set_sleep(true);
            power.set_measure(false);
            power.set_wakeup(wakeup);
        })?;
        Ok(())
    }

    // ==================================================================
    // == Calibration ===================================================
    // ==================================================================
    /// Programs the per-axis offset registers (15.6 mg/LSB).
    ///
    /// The device should be in standby while offsets change.
    pub fn set_offsets(&mut self, x: i8, y: i8, z: i8) -> Result<(), CommE> {
        self.interface
            .write_many(REG_OFSX, &[x as u8, y as u8, z as u8])
            .map_err(Error::from)
    }

    // ==================================================================
    // == Data Acquisition ==============================================
    // ==================================================================
    /// Reads a single axis as a raw little-endian sample.
    pub fn read_axis(&mut self, axis: Axis) -> Result<i16, CommE> {
        let mut raw = [0u8; 2];
        self.interface
            .read_many(axis.data_register(), &mut raw)
            .map_err(Error::from)?;

        Ok(i16::from_le_bytes(raw))
    }

    /// Reads a raw acceleration triplet in one multi-byte burst.
    ///
    /// A single burst guarantees all six data bytes belong to the same
    /// sample.
    pub fn read_xyz_raw(&mut self) -> Result<[i16; 3], CommE> {
        let mut raw = [0u8; RAW_AXIS_BYTES];
        self.interface
            .read_many(REG_DATAX0, &mut raw)
            .map_err(Error::from)?;

        let x = i16::from_le_bytes([raw[0], raw[1]]);
        let y = i16::from_le_bytes([raw[2], raw[3]]);
        let z = i16::from_le_bytes([raw[4], raw[5]]);

        Ok([x, y, z])
    }

    /// Returns acceleration scaled in milli-g.
    pub fn read_xyz_mg(&mut self) -> Result<[i32; 3], CommE> {
        let raw = self.read_xyz_raw()?;
        let lsb_per_g = self.config.lsb_per_g();

        Ok([
            raw[0] as i32 * 1000 / lsb_per_g,
            raw[1] as i32 * 1000 / lsb_per_g,
            raw[2] as i32 * 1000 / lsb_per_g,
        ])
    }

    /// Returns acceleration in g.
    pub fn read_xyz_g(&mut self) -> Result<[f32; 3], CommE> {
        let raw = self.read_xyz_raw()?;
        let lsb_per_g = self.config.lsb_per_g() as f32;

        Ok([
            raw[0] as f32 / lsb_per_g,
            raw[1] as f32 / lsb_per_g,
            raw[2] as f32 / lsb_per_g,
        ])
    }

    // ==================================================================
    // == Tap Detection =================================================
    // ==================================================================
    /// Selects the axes participating in tap detection.
    pub fn set_tap_axes(&mut self, axes: AxisMask, suppress: bool) -> Result<(), CommE> {
        let reg = TapAxes::new()
            .with_tap_x(axes.x)
            .with_tap_y(axes.y)
            .with_tap_z(axes.z)
            .with_suppress(suppress);

        self.interface
            .write_register(REG_TAP_AXES, u8::from(reg))
            .map_err(Error::from)
    }

    /// Programs the single-tap threshold (62.5 mg/LSB) and maximum event
    /// duration (625 us/LSB).
    pub fn configure_single_tap(&mut self, threshold: u8, duration: u8) -> Result<(), CommE> {
        self.interface
            .write_register(REG_THRESH_TAP, threshold)
            .map_err(Error::from)?;
        self.interface
            .write_register(REG_DUR, duration)
            .map_err(Error::from)
    }

    /// Programs double-tap detection: threshold (62.5 mg/LSB), duration
    /// (625 us/LSB), latency and window (both 1.25 ms/LSB).
    pub fn configure_double_tap(
        &mut self,
        threshold: u8,
        duration: u8,
        latent: u8,
        window: u8,
    ) -> Result<(), CommE> {
        self.interface
            .write_register(REG_THRESH_TAP, threshold)
            .map_err(Error::from)?;

        // DUR, LATENT, and WINDOW are consecutive registers.
        self.interface
            .write_many(REG_DUR, &[duration, latent, window])
            .map_err(Error::from)
    }

    // ==================================================================
    // == Activity / Inactivity / Free-Fall =============================
    // ==================================================================
    /// Programs activity detection: coupling, threshold (62.5 mg/LSB), and
    /// participating axes.
    pub fn configure_activity(
        &mut self,
        coupling: Coupling,
        threshold: u8,
        axes: AxisMask,
    ) -> Result<(), CommE> {
        self.update_act_inact_ctl(|ctl| {
            ctl.set_act_coupling(coupling);
            ctl.set_act_x(axes.x);
            ctl.set_act_y(axes.y);
            ctl.set_act_z(axes.z);
        })?;

        self.interface
            .write_register(REG_THRESH_ACT, threshold)
            .map_err(Error::from)
    }

    /// Programs inactivity detection: coupling, threshold (62.5 mg/LSB),
    /// qualification time (1 s/LSB), and participating axes.
    pub fn configure_inactivity(
        &mut self,
        coupling: Coupling,
        threshold: u8,
        time: u8,
        axes: AxisMask,
    ) -> Result<(), CommE> {
        self.update_act_inact_ctl(|ctl| {
            ctl.set_inact_coupling(coupling);
            ctl.set_inact_x(axes.x);
            ctl.set_inact_y(axes.y);
            ctl.set_inact_z(axes.z);
        })?;

        // THRESH_INACT and TIME_INACT are consecutive registers.
        self.interface
            .write_many(REG_THRESH_INACT, &[threshold, time])
            .map_err(Error::from)
    }

    /// Programs free-fall detection: threshold (62.5 mg/LSB) and minimum
    /// time below it (5 ms/LSB).
    pub fn configure_free_fall(&mut self, threshold: u8, time: u8) -> Result<(), CommE> {
        self.interface
            .write_many(REG_THRESH_FF, &[threshold, time])
            .map_err(Error::from)
    }

    // ==================================================================
    // == Interrupts ====================================================
    // ==================================================================
    /// Enables the interrupt sources set in `mask`, leaving others as-is.
    pub fn enable_interrupts(&mut self, mask: InterruptFlags) -> Result<(), CommE> {
        let mask = u8::from(mask);
        self.rmw_register(REG_INT_ENABLE, |current| current | mask)?;
        Ok(())
    }

    /// Disables the interrupt sources set in `mask`, leaving others as-is.
    pub fn disable_interrupts(&mut self, mask: InterruptFlags) -> Result<(), CommE> {
        let mask = u8::from(mask);
        self.rmw_register(REG_INT_ENABLE, |current| current & !mask)?;
        Ok(())
    }

    /// Routes the interrupt sources in `mask` to the given pin.
    ///
    /// The affected sources are masked in `INT_ENABLE` while the routing
    /// changes so a configuration glitch cannot assert a pin, then enabled
    /// once the new mapping is in place.
    pub fn map_interrupts(&mut self, pin: InterruptPin, mask: InterruptFlags) -> Result<(), CommE> {
        let mask = u8::from(mask);

        let enabled = self
            .interface
            .read_register(REG_INT_ENABLE)
            .map_err(Error::from)?;
        self.interface
            .write_register(REG_INT_ENABLE, enabled & !mask)
            .map_err(Error::from)?;

        self.rmw_register(REG_INT_MAP, |current| match pin {
            InterruptPin::Int1 => current & !mask,
            InterruptPin::Int2 => current | mask,
        })?;

        self.interface
            .write_register(REG_INT_ENABLE, enabled | mask)
            .map_err(Error::from)
    }

    /// Reads `INT_SOURCE`, clearing the latched event bits.
    pub fn interrupt_source(&mut self) -> Result<InterruptFlags, CommE> {
        let raw = self
            .interface
            .read_register(REG_INT_SOURCE)
            .map_err(Error::from)?;

        Ok(InterruptFlags::from(raw))
    }

    // ==================================================================
    // == Self-Test =====================================================
    // ==================================================================
    /// Applies or removes the electrostatic self-test force.
    pub fn set_self_test(&mut self, enabled: bool) -> Result<(), CommE> {
        self.update_data_format(|format| format.set_self_test(enabled))?;
        Ok(())
    }

    // ==================================================================
    // == FIFO ==========================================================
    // ==================================================================
    /// Programs the `FIFO_CTL` register.
    pub fn configure_fifo(&mut self, config: FifoConfig) -> Result<(), CommE> {
        self.interface
            .write_register(REG_FIFO_CTL, u8::from(config.to_register()))
            .map_err(Error::from)
    }

    /// Returns the buffered entry count and trigger flag.
    pub fn fifo_status(&mut self) -> Result<FifoSnapshot, CommE> {
        let raw = self
            .interface
            .read_register(REG_FIFO_STATUS)
            .map_err(Error::from)?;

        Ok(FifoSnapshot::from_register(FifoStatus::from(raw)))
    }

    /// Drains buffered sample frames into the provided slice.
    ///
    /// Reads at most the currently buffered entry count and returns the
    /// number of frames written.
    pub fn read_fifo_samples(&mut self, frames: &mut [[i16; 3]]) -> Result<usize, CommE> {
        let status = self.fifo_status()?;
        let count = (status.entries as usize).min(frames.len());
        fifo::drain_samples(&mut self.interface, &mut frames[..count])?;
        Ok(count)
    }

    // ==================================================================
    // == Internal Configuration Helpers ================================
    // ==================================================================

    fn apply_rate_config(&mut self, config: &Config) -> Result<(), CommE> {
        let (rate, power_mode) = (config.data_rate, config.power_mode);
        let raw = self.rmw_register(REG_BW_RATE, |current| {
            let mut bw = BwRate::from(current);
            bw.set_rate(rate);
            bw.set_low_power(power_mode);
            u8::from(bw)
        })?;
        trace!("BW_RATE programmed: {=u8:#x}", raw);
        Ok(())
    }

    fn apply_power_ctl_config(&mut self, config: &Config) -> Result<(), CommE> {
        let auto_sleep = config.auto_sleep;

        self.update_power_ctl(|power| match auto_sleep {
            Some(sleep_cfg) => {
                power.set_wakeup(sleep_cfg.wakeup);
                power.set_auto_sleep(true);
                // The auto-sleep state machine requires linked detection.
                power.set_link(true);
            }
            None => {
                power.set_auto_sleep(false);
                power.set_link(false);
            }
        })?;

        if let Some(sleep_cfg) = auto_sleep {
            self.interface
                .write_many(
                    REG_THRESH_INACT,
                    &[sleep_cfg.inactivity_threshold, sleep_cfg.inactivity_time],
                )
                .map_err(Error::from)?;
        }

        Ok(())
    }

    fn apply_data_format_config(&mut self, config: &Config) -> Result<(), CommE> {
        let (range, resolution, polarity) = (config.range, config.resolution, config.int_polarity);
        self.update_data_format(|format| {
            format.set_range(range);
            format.set_full_res(resolution);
            format.set_int_invert(polarity);
        })?;
        Ok(())
    }

    fn rmw_register<F>(&mut self, address: u8, mutate: F) -> Result<u8, CommE>
    where
        F: FnOnce(u8) -> u8,
    {
        let current = self
            .interface
            .read_register(address)
            .map_err(Error::from)?;

        let updated = mutate(current);
        if updated != current {
            self.interface
                .write_register(address, updated)
                .map_err(Error::from)?;
        }

        Ok(updated)
    }

    fn update_power_ctl<F>(&mut self, mutate: F) -> Result<PowerCtl, CommE>
    where
        F: FnOnce(&mut PowerCtl),
    {
        let raw = self.rmw_register(REG_POWER_CTL, |current| {
            let mut power = PowerCtl::from(current);
            mutate(&mut power);
            u8::from(power)
        })?;

        Ok(PowerCtl::from(raw))
    }

    fn update_data_format<F>(&mut self, mutate: F) -> Result<DataFormat, CommE>
    where
        F: FnOnce(&mut DataFormat),
    {
        let raw = self.rmw_register(REG_DATA_FORMAT, |current| {
            let mut format = DataFormat::from(current);
            mutate(&mut format);
            u8::from(format)
        })?;

        Ok(DataFormat::from(raw))
    }

    fn update_act_inact_ctl<F>(&mut self, mutate: F) -> Result<ActInactCtl, CommE>
    where
        F: FnOnce(&mut ActInactCtl),
    {
        let raw = self.rmw_register(REG_ACT_INACT_CTL, |current| {
            let mut ctl = ActInactCtl::from(current);
            mutate(&mut ctl);
            u8::from(ctl)
        })?;

        Ok(ActInactCtl::from(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AutoSleepConfig;
    use crate::params::{DataRate, FifoMode, InterruptPolarity, PowerMode, Range, Resolution};
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    const ADDR: u8 = 0x53;

    fn device(expectations: &[I2cTransaction], config: Config) -> Adxl345<I2cInterface<I2cMock>> {
        Adxl345::new_i2c(I2cMock::new(expectations), SlaveAddr::Default, config)
    }

    fn finish(device: Adxl345<I2cInterface<I2cMock>>) {
        device.release_i2c().0.done();
    }

    #[test]
    fn init_with_default_config_programs_data_format_only() {
        let expectations = [
            // DEVID check.
            I2cTransaction::write_read(ADDR, std::vec![0x00], std::vec![0xE5]),
            // Standby: POWER_CTL already clear, no write needed.
            I2cTransaction::write_read(ADDR, std::vec![0x2D], std::vec![0x00]),
            // BW_RATE already at the 100 Hz reset value.
            I2cTransaction::write_read(ADDR, std::vec![0x2C], std::vec![0x0A]),
            // POWER_CTL untouched without auto-sleep.
            I2cTransaction::write_read(ADDR, std::vec![0x2D], std::vec![0x00]),
            // DATA_FORMAT gains the full-resolution bit.
            I2cTransaction::write_read(ADDR, std::vec![0x31], std::vec![0x00]),
            I2cTransaction::write(ADDR, std::vec![0x31, 0x08]),
        ];
        let mut accel = device(&expectations, Config::default());

        accel.init(&mut NoopDelay::new()).unwrap();
        finish(accel);
    }

    #[test]
    fn init_programs_rate_power_and_inactivity_window() {
        let config = Config::new()
            .data_rate(DataRate::Hz12_5)
            .power_mode(PowerMode::LowPower)
            .range(Range::G16)
            .resolution(Resolution::TenBit)
            .int_polarity(InterruptPolarity::ActiveLow)
            .auto_sleep(AutoSleepConfig {
                wakeup: WakeupRate::Hz8,
                inactivity_threshold: 3,
                inactivity_time: 5,
            })
            .build();

        let expectations = [
            I2cTransaction::write_read(ADDR, std::vec![0x00], std::vec![0xE5]),
            // Standby.
            I2cTransaction::write_read(ADDR, std::vec![0x2D], std::vec![0x00]),
            // BW_RATE: 12.5 Hz + LOW_POWER.
            I2cTransaction::write_read(ADDR, std::vec![0x2C], std::vec![0x0A]),
            I2cTransaction::write(ADDR, std::vec![0x2C, 0x17]),
            // POWER_CTL: AUTO_SLEEP + LINK, 8 Hz wakeup.
            I2cTransaction::write_read(ADDR, std::vec![0x2D], std::vec![0x00]),
            I2cTransaction::write(ADDR, std::vec![0x2D, 0x30]),
            // Inactivity threshold and time burst.
            I2cTransaction::write(ADDR, std::vec![0x25, 3, 5]),
            // DATA_FORMAT: ±16 g, 10-bit, active-low interrupts.
            I2cTransaction::write_read(ADDR, std::vec![0x31], std::vec![0x00]),
            I2cTransaction::write(ADDR, std::vec![0x31, 0x23]),
        ];
        let mut accel = device(&expectations, config);

        accel.init(&mut NoopDelay::new()).unwrap();
        finish(accel);
    }

    #[test]
    fn init_rejects_wrong_device_id() {
        let expectations = [I2cTransaction::write_read(
            ADDR,
            std::vec![0x00],
            std::vec![0x00],
        )];
        let mut accel = device(&expectations, Config::default());

        assert_eq!(
            accel.init(&mut NoopDelay::new()),
            Err(Error::DeviceIdMismatch)
        );
        finish(accel);
    }

    #[test]
    fn init_rejects_invalid_config_before_touching_bus() {
        let config = Config::new()
            .power_mode(PowerMode::LowPower)
            .data_rate(DataRate::Hz3200)
            .build();
        let mut accel = device(&[], config);

        assert_eq!(accel.init(&mut NoopDelay::new()), Err(Error::InvalidConfig));
        finish(accel);
    }

    #[test]
    fn start_measurement_sets_measure_and_clears_sleep() {
        let expectations = [
            I2cTransaction::write_read(ADDR, std::vec![0x2D], std::vec![0x04]),
            I2cTransaction::write(ADDR, std::vec![0x2D, 0x08]),
        ];
        let mut accel = device(&expectations, Config::default());

        accel.start_measurement().unwrap();
        finish(accel);
    }

    #[test]
    fn sleep_sets_rate_and_clears_measure() {
        let expectations = [
            I2cTransaction::write_read(ADDR, std::vec![0x2D], std::vec![0x08]),
            I2cTransaction::write(ADDR, std::vec![0x2D, 0x07]),
        ];
        let mut accel = device(&expectations, Config::default());

        accel.sleep(WakeupRate::Hz1).unwrap();
        finish(accel);
    }

    #[test]
    fn set_offsets_issues_single_burst() {
        let expectations = [I2cTransaction::write(
            ADDR,
            std::vec![0x1E, 0x10, 0xF0, 0x05],
        )];
        let mut accel = device(&expectations, Config::default());

        accel.set_offsets(0x10, -16, 0x05).unwrap();
        finish(accel);
    }

    #[test]
    fn read_xyz_raw_decodes_little_endian_pairs() {
        let expectations = [I2cTransaction::write_read(
            ADDR,
            std::vec![0x32],
            std::vec![0x00, 0x01, 0x00, 0xFF, 0xFF, 0xFF],
        )];
        let mut accel = device(&expectations, Config::default());

        assert_eq!(accel.read_xyz_raw().unwrap(), [256, -256, -1]);
        finish(accel);
    }

    #[test]
    fn read_xyz_mg_scales_by_resolution() {
        // Full resolution: 256 LSB/g regardless of range.
        let expectations = [I2cTransaction::write_read(
            ADDR,
            std::vec![0x32],
            std::vec![0x00, 0x01, 0x00, 0xFF, 0x40, 0x00],
        )];
        let mut accel = device(&expectations, Config::default());

        assert_eq!(accel.read_xyz_mg().unwrap(), [1000, -1000, 250]);
        finish(accel);
    }

    #[test]
    fn read_axis_targets_the_axis_registers() {
        let expectations = [I2cTransaction::write_read(
            ADDR,
            std::vec![0x36],
            std::vec![0x02, 0x01],
        )];
        let mut accel = device(&expectations, Config::default());

        assert_eq!(accel.read_axis(Axis::Z).unwrap(), 0x0102);
        finish(accel);
    }

    #[test]
    fn set_tap_axes_writes_full_register() {
        // TAP_AXES: SUPPRESS | TAP_X | TAP_Z.
        let expectations = [I2cTransaction::write(ADDR, std::vec![0x2A, 0x0D])];
        let mut accel = device(&expectations, Config::default());

        accel
            .set_tap_axes(
                AxisMask {
                    x: true,
                    y: false,
                    z: true,
                },
                true,
            )
            .unwrap();
        finish(accel);
    }

    #[test]
    fn configure_single_tap_writes_threshold_then_duration() {
        let expectations = [
            I2cTransaction::write(ADDR, std::vec![0x1D, 0x30]),
            I2cTransaction::write(ADDR, std::vec![0x21, 0x10]),
        ];
        let mut accel = device(&expectations, Config::default());

        accel.configure_single_tap(0x30, 0x10).unwrap();
        finish(accel);
    }

    #[test]
    fn configure_double_tap_bursts_timing_registers() {
        let expectations = [
            I2cTransaction::write(ADDR, std::vec![0x1D, 0x30]),
            I2cTransaction::write(ADDR, std::vec![0x21, 0x10, 0x50, 0xF0]),
        ];
        let mut accel = device(&expectations, Config::default());

        accel.configure_double_tap(0x30, 0x10, 0x50, 0xF0).unwrap();
        finish(accel);
    }

    #[test]
    fn configure_activity_writes_ctl_and_threshold() {
        let expectations = [
            I2cTransaction::write_read(ADDR, std::vec![0x27], std::vec![0x00]),
            I2cTransaction::write(ADDR, std::vec![0x27, 0xC0]),
            I2cTransaction::write(ADDR, std::vec![0x24, 0x20]),
        ];
        let mut accel = device(&expectations, Config::default());

        accel
            .configure_activity(
                Coupling::Ac,
                0x20,
                AxisMask {
                    x: true,
                    y: false,
                    z: false,
                },
            )
            .unwrap();
        finish(accel);
    }

    #[test]
    fn configure_inactivity_preserves_activity_bits() {
        let expectations = [
            I2cTransaction::write_read(ADDR, std::vec![0x27], std::vec![0xC0]),
            I2cTransaction::write(ADDR, std::vec![0x27, 0xC7]),
            I2cTransaction::write(ADDR, std::vec![0x25, 0x08, 0x02]),
        ];
        let mut accel = device(&expectations, Config::default());

        accel
            .configure_inactivity(Coupling::Dc, 0x08, 0x02, AxisMask::all())
            .unwrap();
        finish(accel);
    }

    #[test]
    fn configure_free_fall_bursts_threshold_and_time() {
        let expectations = [I2cTransaction::write(ADDR, std::vec![0x28, 0x07, 0x14])];
        let mut accel = device(&expectations, Config::default());

        accel.configure_free_fall(0x07, 0x14).unwrap();
        finish(accel);
    }

    #[test]
    fn enable_interrupts_preserves_other_bits() {
        let expectations = [
            I2cTransaction::write_read(ADDR, std::vec![0x2E], std::vec![0x80]),
            I2cTransaction::write(ADDR, std::vec![0x2E, 0xC0]),
        ];
        let mut accel = device(&expectations, Config::default());

        accel
            .enable_interrupts(InterruptFlags::new().with_single_tap(true))
            .unwrap();
        finish(accel);
    }

    #[test]
    fn map_interrupts_masks_sources_while_rerouting() {
        let expectations = [
            I2cTransaction::write_read(ADDR, std::vec![0x2E], std::vec![0xC0]),
            I2cTransaction::write(ADDR, std::vec![0x2E, 0x80]),
            I2cTransaction::write_read(ADDR, std::vec![0x2F], std::vec![0x00]),
            I2cTransaction::write(ADDR, std::vec![0x2F, 0x40]),
            I2cTransaction::write(ADDR, std::vec![0x2E, 0xC0]),
        ];
        let mut accel = device(&expectations, Config::default());

        accel
            .map_interrupts(
                InterruptPin::Int2,
                InterruptFlags::new().with_single_tap(true),
            )
            .unwrap();
        finish(accel);
    }

    #[test]
    fn interrupt_source_decodes_flags() {
        let expectations = [I2cTransaction::write_read(
            ADDR,
            std::vec![0x30],
            std::vec![0x84],
        )];
        let mut accel = device(&expectations, Config::default());

        let source = accel.interrupt_source().unwrap();
        assert!(source.data_ready());
        assert!(source.free_fall());
        assert!(!source.single_tap());
        finish(accel);
    }

    #[test]
    fn motion_status_decodes_sources() {
        let expectations = [I2cTransaction::write_read(
            ADDR,
            std::vec![0x2B],
            std::vec![0b0100_1001],
        )];
        let mut accel = device(&expectations, Config::default());

        let status = accel.motion_status().unwrap();
        assert!(status.act_x);
        assert!(status.asleep);
        assert!(status.tap_z);
        assert!(!status.act_y);
        finish(accel);
    }

    #[test]
    fn self_test_toggles_data_format_bit() {
        let expectations = [
            I2cTransaction::write_read(ADDR, std::vec![0x31], std::vec![0x08]),
            I2cTransaction::write(ADDR, std::vec![0x31, 0x88]),
            I2cTransaction::write_read(ADDR, std::vec![0x31], std::vec![0x88]),
            I2cTransaction::write(ADDR, std::vec![0x31, 0x08]),
        ];
        let mut accel = device(&expectations, Config::default());

        accel.set_self_test(true).unwrap();
        accel.set_self_test(false).unwrap();
        finish(accel);
    }

    #[test]
    fn read_fifo_samples_honours_entry_count() {
        let expectations = [
            I2cTransaction::write_read(ADDR, std::vec![0x39], std::vec![0x02]),
            I2cTransaction::write_read(
                ADDR,
                std::vec![0x32],
                std::vec![0x01, 0x00, 0x02, 0x00, 0x03, 0x00],
            ),
            I2cTransaction::write_read(
                ADDR,
                std::vec![0x32],
                std::vec![0x04, 0x00, 0x05, 0x00, 0x06, 0x00],
            ),
        ];
        let mut accel = device(&expectations, Config::default());

        let mut frames = [[0i16; 3]; fifo::FIFO_DEPTH];
        let count = accel.read_fifo_samples(&mut frames).unwrap();
        assert_eq!(count, 2);
        assert_eq!(frames[0], [1, 2, 3]);
        assert_eq!(frames[1], [4, 5, 6]);
        finish(accel);
    }

    #[test]
    fn configure_fifo_writes_fifo_ctl() {
        let expectations = [I2cTransaction::write(ADDR, std::vec![0x38, 0x90])];
        let mut accel = device(&expectations, Config::default());

        accel
            .configure_fifo(FifoConfig::new(FifoMode::Stream, InterruptPin::Int1, 16))
            .unwrap();
        finish(accel);
    }
}
