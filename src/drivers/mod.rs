//! Actuator drivers, hardware initialisation, and the task watchdog.

pub mod buzzer;
pub mod hw_init;
pub mod indicator_led;
pub mod watchdog;
