//! Configuration primitives for the ADXL345 driver.

use crate::params::{DataRate, InterruptPolarity, PowerMode, Range, Resolution, WakeupRate};

/// Auto-sleep behaviour programmed alongside `POWER_CTL`.
///
/// When enabled the device drops to the sleep sampling rate after the
/// inactivity condition holds for `inactivity_time` seconds, and wakes on
/// activity. The driver also sets the link bit, which the auto-sleep state
/// machine requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoSleepConfig {
    /// Sampling frequency while asleep.
    pub wakeup: WakeupRate,
    /// Inactivity threshold (62.5 mg/LSB, must be non-zero).
    pub inactivity_threshold: u8,
    /// Inactivity qualification time (1 s/LSB).
    pub inactivity_time: u8,
}

/// User-facing configuration for the ADXL345 sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Output data rate selection.
    pub data_rate: DataRate,
    /// Normal or reduced power operation.
    pub power_mode: PowerMode,
    /// Measurement range selection.
    pub range: Range,
    /// Output resolution selection.
    pub resolution: Resolution,
    /// Interrupt pin polarity.
    pub int_polarity: InterruptPolarity,
    /// Auto-sleep programming, if requested.
    pub auto_sleep: Option<AutoSleepConfig>,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration is valid according to datasheet rules.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if matches!(self.power_mode, PowerMode::LowPower) && !self.data_rate.supports_low_power() {
            return Err(ConfigError::LowPowerRateUnsupported);
        }

        if let Some(auto_sleep) = &self.auto_sleep {
            if auto_sleep.inactivity_threshold == 0 {
                return Err(ConfigError::ZeroInactivityThreshold);
            }
        }

        Ok(())
    }

    /// Returns the output sensitivity in LSB per g for this configuration.
    pub const fn lsb_per_g(&self) -> i32 {
        self.range.lsb_per_g(self.resolution)
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the output data rate.
    pub fn data_rate(mut self, data_rate: DataRate) -> Self {
        self.config.data_rate = data_rate;
        self
    }

    /// Selects normal or reduced power operation.
    pub fn power_mode(mut self, power_mode: PowerMode) -> Self {
        self.config.power_mode = power_mode;
        self
    }

    /// Overrides the measurement range.
    pub fn range(mut self, range: Range) -> Self {
        self.config.range = range;
        self
    }

    /// Overrides the output resolution.
    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.config.resolution = resolution;
        self
    }

    /// Sets the interrupt pin polarity.
    pub fn int_polarity(mut self, polarity: InterruptPolarity) -> Self {
        self.config.int_polarity = polarity;
        self
    }

    /// Enables auto-sleep with the provided parameters.
    pub fn auto_sleep(mut self, auto_sleep: AutoSleepConfig) -> Self {
        self.config.auto_sleep = Some(auto_sleep);
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_rate: DataRate::Hz100,
            power_mode: PowerMode::Normal,
            range: Range::G2,
            resolution: Resolution::Full,
            int_polarity: InterruptPolarity::ActiveHigh,
            auto_sleep: None,
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Reduced power operation is only defined between 12.5 Hz and 400 Hz.
    LowPowerRateUnsupported,
    /// Auto-sleep was requested with an inactivity threshold of zero.
    ZeroInactivityThreshold,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn low_power_rejects_rates_outside_window() {
        let config = Config::new()
            .power_mode(PowerMode::LowPower)
            .data_rate(DataRate::Hz800)
            .build();
        assert_eq!(
            config.validate(),
            Err(ConfigError::LowPowerRateUnsupported)
        );

        let config = Config::new()
            .power_mode(PowerMode::LowPower)
            .data_rate(DataRate::Hz6_25)
            .build();
        assert_eq!(
            config.validate(),
            Err(ConfigError::LowPowerRateUnsupported)
        );

        let config = Config::new()
            .power_mode(PowerMode::LowPower)
            .data_rate(DataRate::Hz400)
            .build();
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn auto_sleep_requires_nonzero_threshold() {
        let config = Config::new()
            .auto_sleep(AutoSleepConfig {
                wakeup: WakeupRate::Hz8,
                inactivity_threshold: 0,
                inactivity_time: 5,
            })
            .build();
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroInactivityThreshold)
        );
    }

    #[test]
    fn scale_follows_range_in_ten_bit_mode() {
        let config = Config::new()
            .resolution(Resolution::TenBit)
            .range(Range::G16)
            .build();
        assert_eq!(config.lsb_per_g(), 32);

        let config = Config::new().range(Range::G16).build();
        assert_eq!(config.lsb_per_g(), 256);
    }
}
