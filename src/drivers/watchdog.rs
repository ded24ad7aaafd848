//! Task Watchdog Timer (TWDT) driver.
//!
//! Resets the device if the monitoring loop stalls.  The loop feeds it once
//! per cycle; the longest blocking stretch of a cycle (fire pattern plus
//! the connection-error hold) is capped at 5 s by `SystemConfig::validate`.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use log::{info, warn};

pub const WATCHDOG_TIMEOUT_MS: u32 = 10_000;

pub struct Watchdog {
    subscribed: bool,
}

impl Watchdog {
    /// Configure the TWDT and subscribe the calling task.
    #[cfg(target_os = "espidf")]
    pub fn new(timeout_ms: u32) -> Self {
        // SAFETY: called once from the main task during bootstrap.
        unsafe {
            let cfg = esp_task_wdt_config_t {
                timeout_ms,
                idle_core_mask: 0,
                trigger_panic: true,
            };
            let ret = esp_task_wdt_reconfigure(&cfg);
            if ret != ESP_OK {
                warn!("Watchdog: reconfigure returned {} (may already be configured)", ret);
            }

            let ret = esp_task_wdt_add(core::ptr::null_mut());
            let subscribed = ret == ESP_OK;
            if subscribed {
                info!("Watchdog: subscribed ({} ms timeout, panic on trigger)", timeout_ms);
            } else {
                warn!("Watchdog: failed to subscribe ({})", ret);
            }
            Self { subscribed }
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(timeout_ms: u32) -> Self {
        if timeout_ms == 0 {
            warn!("Watchdog(sim): zero timeout, disabled");
            return Self { subscribed: false };
        }
        info!("Watchdog(sim): {} ms timeout, no-op feed", timeout_ms);
        Self { subscribed: true }
    }

    /// Feed the watchdog.  Must be called at least once per timeout window.
    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        if self.subscribed {
            // SAFETY: the calling task was subscribed in new().
            unsafe {
                esp_task_wdt_reset();
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.subscribed
    }
}
