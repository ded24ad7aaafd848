//! Sensor subsystem — individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and produces one [`SensorReading`] per
//! monitoring cycle.

pub mod dht11;
pub mod flame;
pub mod smoke;

use dht11::Dht11Sensor;
use flame::FlameSensor;
use smoke::SmokeSensor;

/// One cycle's worth of sensor data.
///
/// Flame and smoke always carry a value; temperature and humidity are
/// `None` when the DHT transaction failed this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorReading {
    /// True if the flame sensor output is asserted.
    pub flame_detected: bool,
    /// Raw smoke ADC value (0 – 4095).
    pub smoke_level: u16,
    /// Ambient temperature (°C).
    pub temperature_c: Option<f32>,
    /// Relative humidity (%).
    pub humidity_pct: Option<f32>,
}

/// Aggregates all sensor drivers.
pub struct SensorHub {
    pub flame: FlameSensor,
    pub smoke: SmokeSensor,
    pub climate: Dht11Sensor,
}

impl SensorHub {
    /// Construct a new hub.  Pass in pre-built drivers (built in main
    /// where peripheral ownership is established).
    pub fn new(flame: FlameSensor, smoke: SmokeSensor, climate: Dht11Sensor) -> Self {
        Self {
            flame,
            smoke,
            climate,
        }
    }

    /// Read every sensor and return a unified reading.
    ///
    /// A failed DHT transaction only blanks temperature and humidity; flame
    /// and smoke are always reported so alerting never stalls.
    pub fn read_all(&mut self, now_ms: u64) -> SensorReading {
        SensorReading {
            flame_detected: self.flame.read(),
            smoke_level: self.smoke.read(),
            temperature_c: self.climate.temperature(now_ms),
            humidity_pct: self.climate.humidity(now_ms),
        }
    }
}
