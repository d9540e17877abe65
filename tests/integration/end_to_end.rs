//! Capture through the streaming producer, then decode the buffer

use crate::common::{assert_close, ready_driver, MockRequest, Outcome};
use adxl34x::config::InitConfig;
use adxl34x::decoder::{
    decode, get_frame_count, get_size_info, has_trigger, F64Frames, F64Reading, Q31Frames,
    Q31Reading, ValueFrames,
};
use adxl34x::params::Range;
use adxl34x::registers::{REG_FIFO_STATUS, REG_INT_SOURCE};
use adxl34x::rtio::{StreamOptions, Streamer};
use adxl34x::sensor::{ChannelSpec, SensorChannel, SensorValue, TriggerKind};

const G: f64 = 9.80665;

fn capture_three_frames() -> Vec<u8> {
    let init = InitConfig::new().range(Range::G8).fifo_watermark(3).build();
    let (mut driver, bus, _) = ready_driver(0xE6, init);
    let mut streamer = Streamer::new();
    let xyz = [ChannelSpec::new(SensorChannel::AccelXyz)];
    let (request, completion) = MockRequest::streaming(&xyz, StreamOptions::default());
    streamer.submit(&mut driver, request, 0);

    bus.push_frames(&[[1000, -500, 2000]; 3]);
    bus.set_register(REG_FIFO_STATUS, 3);
    bus.set_register(REG_INT_SOURCE, 0x02);
    streamer.handle_interrupt(&mut driver, 5_000_000).unwrap();

    match completion.outcome() {
        Some(Outcome::Ok { frames: 3, data }) => data,
        other => panic!("unexpected completion {:?}", other),
    }
}

#[test]
fn test_captured_buffer_decodes_to_si_units() {
    let buf = capture_three_frames();
    let xyz = ChannelSpec::new(SensorChannel::AccelXyz);
    assert_eq!(get_frame_count(&buf, xyz), Ok(3));

    let mut readings = [F64Reading::default(); 3];
    let mut frames = F64Frames::new(&mut readings);
    assert_eq!(decode(&buf, xyz, 3, &mut frames), Ok(3));
    assert_eq!(frames.header.base_timestamp_ns, 5_000_000);
    assert_eq!(frames.header.reading_count, 3);

    let expected_x = 1000.0 * 156.0 / 10000.0 * G;
    assert_close(readings[0].x, expected_x, 0.001);
    assert_close(readings[0].y, -500.0 * 156.0 / 10000.0 * G, 0.001);
    assert_close(readings[2].z, 2000.0 * 156.0 / 10000.0 * G, 0.001);
}

#[test]
fn test_captured_buffer_in_every_representation() {
    let buf = capture_three_frames();

    let mut values = [SensorValue::default(); 3];
    let mut flat = ValueFrames::new(&mut values);
    let x_only = ChannelSpec::new(SensorChannel::AccelX);
    assert_eq!(decode(&buf, x_only, 10, &mut flat), Ok(3));
    for value in values {
        assert_eq!(value, SensorValue { val1: 152, val2: 983_740 });
    }

    let mut q31 = [Q31Reading::default(); 2];
    let mut fixed = Q31Frames::new(&mut q31);
    let xyz = ChannelSpec::new(SensorChannel::AccelXyz);
    assert_eq!(decode(&buf, xyz, 3, &mut fixed), Ok(2));
    assert_eq!(fixed.header.shift, 7);
    let y = f64::from(q31[0].y) * 128.0 / 2_147_483_648.0;
    assert_close(y, -500.0 * 156.0 / 10000.0 * G, 0.001);
    // Beyond ±128 m/s² the fixed-point value saturates.
    assert_eq!(q31[0].z, i32::MAX);

    let info = get_size_info::<F64Frames<'_>>(SensorChannel::AccelXyz);
    assert_eq!(info.frame_size, 24);
}

#[test]
fn test_captured_buffer_keeps_trigger_snapshot() {
    let buf = capture_three_frames();

    assert!(has_trigger(&buf, TriggerKind::FifoWatermark));
    assert!(has_trigger(&buf, TriggerKind::DataReady));
    assert!(!has_trigger(&buf, TriggerKind::Tap));
}
