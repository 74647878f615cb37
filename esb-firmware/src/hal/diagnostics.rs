// Diagnose-Backend und Idle-Wait für die Hauptschleife

use esb_core::{Diagnostics, EventWait};

/// defmt über RTT
///
/// defmt-rtt schreibt jeden Log-Eintrag sofort in den RTT-Ringpuffer,
/// es gibt also nie etwas zurückgestaut zu verarbeiten.
pub struct RttDiagnostics;

impl Diagnostics for RttDiagnostics {
    fn flush(&mut self) {
        defmt::flush();
    }

    fn process_one(&mut self) -> bool {
        false
    }
}

/// Schläft mit WFE bis zum nächsten Event (z.B. RADIO Interrupt)
pub struct Wfe;

impl EventWait for Wfe {
    fn wait_for_event(&mut self) {
        cortex_m::asm::wfe();
    }
}
