// High-Frequency Clock (HFXO)
//
// Das Radio braucht den externen 32 MHz Quarz, der interne RC-Oszillator
// ist für 2 Mbps zu ungenau.

use defmt::{error, info};
use embassy_nrf::pac;
use esb_core::{ClockError, ClockService};

use crate::config::HFCLK_START_MAX_POLLS;

/// HFCLK-Steuerung über die CLOCK Register
pub struct HfClock {
    _private: (),
}

impl HfClock {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Default for HfClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockService for HfClock {
    fn start_high_frequency_clock(&mut self) -> Result<(), ClockError> {
        let r = pac::CLOCK;

        r.events_hfclkstarted().write_value(0);
        r.tasks_hfclkstart().write_value(1);

        for _ in 0..HFCLK_START_MAX_POLLS {
            if r.events_hfclkstarted().read() != 0 {
                info!("HFCLK started");
                return Ok(());
            }
        }

        error!("HFCLK did not start after {} polls", HFCLK_START_MAX_POLLS);
        Err(ClockError::Timeout)
    }
}
