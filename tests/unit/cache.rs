//! Unit tests for the register cache

use crate::common::{create_driver, ready_driver, MockError, Operation};
use adxl34x::config::{Config, InitConfig};
use adxl34x::params::{FifoMode, OutputDataRate, Range};
use adxl34x::registers::{
    BwRate, DataFormat, FifoCtl, OrientConf, PowerCtl, TapDuration, ThreshTap, REG_DUR,
    REG_FIFO_CTL, REG_ORIENT_CONF, REG_POWER_CTL, REG_THRESH_TAP,
};
use adxl34x::Error;

#[test]
fn test_set_then_cached_get_returns_value() {
    let (mut driver, bus, _) = ready_driver(0xE5, InitConfig::default());

    driver.set_thresh_tap(ThreshTap(40)).unwrap();
    bus.clear_operations();

    assert_eq!(driver.get_thresh_tap(true).unwrap(), ThreshTap(40));
    assert!(bus.operations().is_empty(), "cached get must not touch the bus");
    assert_eq!(bus.register(REG_THRESH_TAP), 40);
}

#[test]
fn test_equal_set_issues_one_write() {
    let (mut driver, bus, _) = ready_driver(0xE5, InitConfig::default());

    let format = DataFormat::new().with_range(Range::G4).with_full_res(true);
    driver.set_data_format(format).unwrap();
    driver.set_data_format(format).unwrap();

    assert_eq!(bus.write_count(), 1);
}

#[test]
fn test_set_equal_to_cache_is_silent() {
    let (mut driver, bus, _) = ready_driver(0xE5, InitConfig::default());

    let current = driver.get_bw_rate(true).unwrap();
    driver.set_bw_rate(current).unwrap();

    assert!(bus.operations().is_empty());
}

#[test]
fn test_failed_write_keeps_cache() {
    let (mut driver, bus, _) = ready_driver(0xE5, InitConfig::default());
    bus.fail_writes_to(REG_THRESH_TAP);

    let result = driver.set_thresh_tap(ThreshTap(99));

    assert_eq!(result, Err(Error::Interface(MockError)));
    assert_eq!(driver.get_thresh_tap(true).unwrap(), ThreshTap(0));
    assert_eq!(bus.register(REG_THRESH_TAP), 0);
}

#[test]
fn test_load_refreshes_cache() {
    let (mut driver, bus, _) = ready_driver(0xE5, InitConfig::default());
    bus.set_register(REG_DUR, 0x30);

    assert_eq!(driver.get_dur(true).unwrap(), TapDuration(0));
    assert_eq!(driver.get_dur(false).unwrap(), TapDuration(0x30));
    assert_eq!(driver.get_dur(true).unwrap(), TapDuration(0x30));
    assert_eq!(bus.reads_of(REG_DUR), 1);
}

#[test]
fn test_failed_load_keeps_cache() {
    let (mut driver, bus, _) = ready_driver(0xE5, InitConfig::default());
    driver.set_dur(TapDuration(5)).unwrap();
    bus.set_register(REG_DUR, 9);
    bus.fail_next_read();

    assert!(driver.get_dur(false).is_err());
    assert_eq!(driver.config().dur, TapDuration(5));
}

#[test]
fn test_reserved_bits_are_dropped_on_load() {
    let (mut driver, bus, _) = ready_driver(0xE5, InitConfig::default());
    bus.set_register(REG_POWER_CTL, 0xC8);

    let power = driver.get_power_ctl(false).unwrap();

    assert!(power.measure());
    assert_eq!(u8::from(power), 0x08);
}

#[test]
fn test_devid_is_read_once() {
    let (mut driver, bus, _) = create_driver(0xE6, InitConfig::default());

    assert_eq!(driver.get_devid().unwrap(), 0xE6);
    assert_eq!(driver.get_devid().unwrap(), 0xE6);

    assert_eq!(bus.reads_of(0x00), 1);
}

#[test]
fn test_orient_conf_unavailable_on_adxl345() {
    let (mut driver, bus, _) = ready_driver(0xE5, InitConfig::default());

    assert_eq!(driver.get_orient_conf(false), Err(Error::AddressNotAvailable));
    assert_eq!(driver.get_orient_conf(true), Err(Error::AddressNotAvailable));
    assert_eq!(
        driver.set_orient_conf(OrientConf::new().with_int_orient(true)),
        Err(Error::AddressNotAvailable)
    );
    assert_eq!(driver.get_orient(), Err(Error::AddressNotAvailable));
    assert_eq!(driver.get_tap_sign(), Err(Error::AddressNotAvailable));

    assert!(bus.operations().is_empty(), "gated registers must not reach the bus");
}

#[test]
fn test_orient_conf_available_on_adxl346() {
    let (mut driver, bus, _) = ready_driver(0xE6, InitConfig::default());

    let conf = OrientConf::new().with_int_orient(true).with_divisor(3);
    driver.set_orient_conf(conf).unwrap();

    assert_eq!(bus.writes_to(REG_ORIENT_CONF), vec![0x83]);
    assert_eq!(driver.get_orient_conf(true).unwrap(), conf);
    assert!(driver.get_orient().is_ok());
}

#[test]
fn test_get_configuration_skips_orient_conf_on_adxl345() {
    let (mut driver, bus, _) = ready_driver(0xE5, InitConfig::default());

    driver.get_configuration().unwrap();

    assert_eq!(bus.read_count(), 20);
    assert_eq!(bus.reads_of(REG_ORIENT_CONF), 0);
}

#[test]
fn test_configure_is_best_effort() {
    let (mut driver, bus, _) = ready_driver(0xE5, InitConfig::default());
    bus.fail_writes_to(REG_THRESH_TAP);

    let target = Config {
        thresh_tap: ThreshTap(50),
        dur: TapDuration(16),
        bw_rate: BwRate::new().with_rate(OutputDataRate::Hz800),
        fifo_ctl: FifoCtl::new().with_mode(FifoMode::Fifo).with_samples(8),
        ..*driver.config()
    };
    let result = driver.configure(&target);

    assert_eq!(result, Err(Error::Interface(MockError)));
    // Everything after the failing register was still attempted.
    assert_eq!(bus.writes_to(REG_DUR), vec![16]);
    assert_eq!(bus.writes_to(REG_FIFO_CTL), vec![0x48]);
    assert_eq!(driver.config().thresh_tap, ThreshTap(0));
    assert_eq!(driver.config().bw_rate.rate(), OutputDataRate::Hz800);
}

#[test]
fn test_configure_only_writes_differences() {
    let (mut driver, bus, _) = ready_driver(0xE5, InitConfig::default());

    let target = Config {
        power_ctl: PowerCtl::new().with_measure(true).with_link(true),
        ..*driver.config()
    };
    driver.configure(&target).unwrap();

    assert_eq!(
        bus.operations(),
        vec![Operation::Write {
            address: REG_POWER_CTL,
            value: 0x28
        }]
    );
}

#[test]
fn test_init_rejects_unknown_devid() {
    let (mut driver, bus, _) = create_driver(0x42, InitConfig::default());

    assert_eq!(driver.init(), Err(Error::DeviceIdMismatch(0x42)));
    assert_eq!(driver.config().devid, 0);
    assert_eq!(bus.write_count(), 0);
}

#[test]
fn test_init_rejects_invalid_watermark() {
    let (mut driver, bus, _) = create_driver(0xE5, InitConfig::new().fifo_watermark(0).build());

    assert_eq!(driver.init(), Err(Error::InvalidConfig));
    assert!(bus.operations().is_empty());
}

#[test]
fn test_init_programs_start_up_registers() {
    let init = InitConfig::new()
        .range(Range::G16)
        .odr(OutputDataRate::Hz200)
        .fifo_watermark(10)
        .build();
    let (mut driver, bus, _) = create_driver(0xE6, init);

    driver.init().unwrap();

    assert_eq!(bus.register(0x31) & 0x03, 0x03);
    assert_eq!(bus.register(0x2C), 0x0B);
    assert_eq!(bus.register(REG_FIFO_CTL), 0x8A);
    assert_eq!(bus.register(REG_POWER_CTL), 0x08);
    assert_eq!(bus.fifo_reads(), 32);
}
