//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                  |
//! |----------------|--------------------|------------------------------|
//! | `display`      | DisplayPort        | Serial log (text frames)     |
//! | `firebase`     | TelemetrySink      | Realtime database over HTTPS |
//! | `hardware`     | SensorPort         | ESP32 ADC, GPIO, DHT11       |
//! |                | ActuatorPort       | LED GPIOs, LEDC buzzer       |
//! | `log_sink`     | EventSink          | Serial log output            |
//! | `time`         | ClockPort          | ESP32 system timer, FreeRTOS |
//! | `wifi`         | NetworkPort        | ESP-IDF WiFi STA             |

pub mod display;
pub mod firebase;
pub mod hardware;
pub mod log_sink;
pub mod time;
pub mod wifi;
