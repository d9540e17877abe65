//! Unit tests for sample fetch, attributes and power management

use crate::common::{ready_driver, MockError};
use adxl34x::config::InitConfig;
use adxl34x::params::{OutputDataRate, Range};
use adxl34x::registers::{REG_BW_RATE, REG_DATA_FORMAT, REG_OFSX, REG_OFSY, REG_OFSZ};
use adxl34x::sensor::{PmAction, PmState, SensorAttribute, SensorChannel, SensorValue};
use adxl34x::Error;

#[test]
fn test_sample_fetch_and_channel_get() {
    let (mut driver, bus, _) = ready_driver(0xE5, InitConfig::new().range(Range::G8).build());
    bus.push_frames(&[[1000, -500, 2000]]);

    driver.sample_fetch(SensorChannel::AccelXyz).unwrap();
    assert_eq!(driver.raw_sample(), [1000, -500, 2000]);

    let mut values = [SensorValue::default(); 3];
    assert_eq!(driver.channel_get(SensorChannel::AccelXyz, &mut values), Ok(3));
    // 1000 * 15.6 mg = 152.98374 m/s²
    assert_eq!(values[0], SensorValue { val1: 152, val2: 983_740 });
    assert_eq!(values[1], SensorValue { val1: -76, val2: -491_870 });

    let mut single = [SensorValue::default(); 1];
    assert_eq!(driver.channel_get(SensorChannel::AccelZ, &mut single), Ok(1));
    assert_eq!(single[0].val1, 305);
}

#[test]
fn test_channel_get_rejects_foreign_channel_and_short_output() {
    let (driver, _, _) = ready_driver(0xE5, InitConfig::default());

    let mut values = [SensorValue::default(); 2];
    assert_eq!(
        driver.channel_get(SensorChannel::DieTemp, &mut values),
        Err(Error::NotSupported)
    );
    assert_eq!(
        driver.channel_get(SensorChannel::AccelXyz, &mut values),
        Err(Error::InvalidConfig)
    );
}

#[test]
fn test_sample_fetch_while_suspended() {
    let (mut driver, bus, _) = ready_driver(0xE5, InitConfig::default());
    driver.pm_action(PmAction::Suspend).unwrap();
    assert_eq!(driver.pm_state(), PmState::Suspended);
    bus.clear_operations();

    assert_eq!(driver.sample_fetch(SensorChannel::AccelX), Err(Error::NotReady));
    assert_eq!(
        driver.attr_get(SensorChannel::AccelX, SensorAttribute::FullScale),
        Err(Error::NotReady)
    );
    assert!(bus.operations().is_empty());

    driver.pm_action(PmAction::Resume).unwrap();
    assert!(driver.sample_fetch(SensorChannel::All).is_ok());
}

#[test]
fn test_sample_fetch_rejects_foreign_channel() {
    let (mut driver, _, _) = ready_driver(0xE5, InitConfig::default());

    assert_eq!(
        driver.sample_fetch(SensorChannel::GyroXyz),
        Err(Error::NotSupported)
    );
}

#[test]
fn test_sampling_frequency_round_trip() {
    let (mut driver, bus, _) = ready_driver(0xE5, InitConfig::default());

    driver
        .attr_set(
            SensorChannel::AccelXyz,
            SensorAttribute::SamplingFrequency,
            SensorValue { val1: 300, val2: 0 },
        )
        .unwrap();

    assert_eq!(bus.register(REG_BW_RATE), 0x0C);
    assert_eq!(driver.config().bw_rate.rate(), OutputDataRate::Hz400);
    assert_eq!(
        driver.attr_get(SensorChannel::AccelXyz, SensorAttribute::SamplingFrequency),
        Ok(SensorValue { val1: 400, val2: 0 })
    );
}

#[test]
fn test_full_scale_selects_covering_range() {
    let (mut driver, bus, _) = ready_driver(0xE5, InitConfig::default());

    // 5 g
    driver
        .attr_set(
            SensorChannel::AccelXyz,
            SensorAttribute::FullScale,
            SensorValue { val1: 49, val2: 33_250 },
        )
        .unwrap();

    assert_eq!(bus.register(REG_DATA_FORMAT) & 0x03, 0x02);
    assert_eq!(driver.range(), Range::G8);
    assert_eq!(
        driver.attr_get(SensorChannel::AccelX, SensorAttribute::FullScale),
        Ok(SensorValue { val1: 78, val2: 453_200 })
    );
}

#[test]
fn test_offset_per_axis_and_all_axes() {
    let (mut driver, bus, _) = ready_driver(0xE5, InitConfig::default());
    let two_lsb = SensorValue { val1: 0, val2: 306_000 };

    driver
        .attr_set(SensorChannel::AccelY, SensorAttribute::Offset, two_lsb)
        .unwrap();
    assert_eq!(bus.register(REG_OFSY), 2);
    assert_eq!(bus.register(REG_OFSX), 0);

    let minus_one = SensorValue { val1: 0, val2: -152_984 };
    driver
        .attr_set(SensorChannel::AccelXyz, SensorAttribute::Offset, minus_one)
        .unwrap();
    assert_eq!(bus.register(REG_OFSX), 0xFF);
    assert_eq!(bus.register(REG_OFSY), 0xFF);
    assert_eq!(bus.register(REG_OFSZ), 0xFF);

    assert_eq!(
        driver.attr_get(SensorChannel::AccelZ, SensorAttribute::Offset),
        Ok(SensorValue { val1: 0, val2: -152_984 })
    );
}

#[test]
fn test_offset_failure_still_attempts_every_axis() {
    let (mut driver, bus, _) = ready_driver(0xE5, InitConfig::default());
    bus.fail_writes_to(REG_OFSX);

    let result = driver.attr_set(
        SensorChannel::AccelXyz,
        SensorAttribute::Offset,
        SensorValue { val1: 1, val2: 0 },
    );

    assert_eq!(result, Err(Error::Interface(MockError)));
    assert_eq!(bus.register(REG_OFSY), 6);
    assert_eq!(bus.register(REG_OFSZ), 6);
}

#[test]
fn test_unsupported_attributes() {
    let (mut driver, bus, _) = ready_driver(0xE5, InitConfig::default());
    let value = SensorValue { val1: 1, val2: 0 };

    assert_eq!(
        driver.attr_set(SensorChannel::AccelX, SensorAttribute::Oversampling, value),
        Err(Error::NotSupported)
    );
    assert_eq!(
        driver.attr_set(SensorChannel::DieTemp, SensorAttribute::SamplingFrequency, value),
        Err(Error::NotSupported)
    );
    assert_eq!(
        driver.attr_get(SensorChannel::AccelXyz, SensorAttribute::Offset),
        Err(Error::NotSupported)
    );
    assert!(bus.operations().is_empty());
}
