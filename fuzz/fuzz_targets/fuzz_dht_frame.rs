//! Fuzz target: DHT11 frame decoding
//!
//! Feeds arbitrary 40-pulse captures and raw 5-byte frames through
//! `frame_from_pulses` / `decode_frame` and verifies:
//! - No panics under any input
//! - A frame is only accepted when its checksum byte matches
//! - Accepted humidity is within 0–100 %
//!
//! cargo fuzz run fuzz_dht_frame

#![no_main]

use hazardmon::error::SensorError;
use hazardmon::sensors::dht11::{decode_frame, frame_from_pulses};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 5 {
        return;
    }

    // Raw frame path.
    let frame: [u8; 5] = [data[0], data[1], data[2], data[3], data[4]];
    check(frame);

    // Pulse-capture path: one byte per bit, scaled to plausible µs.
    if data.len() >= 45 {
        let mut pulses = [0u32; 40];
        for (slot, b) in pulses.iter_mut().zip(&data[5..45]) {
            *slot = u32::from(*b);
        }
        check(frame_from_pulses(&pulses));
    }
});

fn check(frame: [u8; 5]) {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    match decode_frame(frame) {
        Ok(sample) => {
            assert_eq!(sum, frame[4], "accepted a frame with a bad checksum");
            assert!((0.0..=100.0).contains(&sample.humidity_pct));
            assert!(sample.temperature_c.is_finite());
        }
        Err(SensorError::ChecksumMismatch) => assert_ne!(sum, frame[4]),
        Err(_) => {}
    }
}
