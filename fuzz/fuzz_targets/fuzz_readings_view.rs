//! Fuzz target: `ReadingsView::compose`
//!
//! Builds readings from arbitrary bytes (including NaN / infinite
//! temperatures) and checks that composing the display frame never panics
//! and never produces more rows than the panel has.
//!
//! cargo fuzz run fuzz_readings_view

#![no_main]

use hazardmon::hazard::{self, HazardState};
use hazardmon::presenter::{MAX_BODY_LINES, ReadingsView};
use hazardmon::sensors::SensorReading;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 13 {
        return;
    }
    let temp = f32::from_le_bytes([data[3], data[4], data[5], data[6]]);
    let humidity = f32::from_le_bytes([data[7], data[8], data[9], data[10]]);
    let reading = SensorReading {
        flame_detected: data[0] & 1 != 0,
        smoke_level: u16::from_le_bytes([data[1], data[2]]),
        temperature_c: (data[11] & 1 != 0).then_some(temp),
        humidity_pct: (data[11] & 2 != 0).then_some(humidity),
    };
    let threshold = u16::from(data[12]) * 16;
    let hazard = hazard::classify(&reading, threshold);

    let view = ReadingsView::compose(hazard, &reading, data[0] & 2 != 0, Some(data[12] as i8));
    assert!(view.body.len() <= MAX_BODY_LINES);
    if hazard != HazardState::Normal {
        assert!(view.header.is_none());
        assert_eq!(view.body.len(), 1);
    }
});
