// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von cortex-m-rt bereitgestellt)
#![no_main]

use cortex_m_rt::entry;
use embassy_nrf::bind_interrupts;

// defmt Transport über RTT und Panic-Handler (hält den Knoten an)
use {defmt_rtt as _, panic_probe as _};

use esb_rgb_receiver::hal::{EsbRadio, HfClock, RttDiagnostics, Wfe, esb_radio, init_indicator};
use esb_rgb_receiver::{BoardSession, ReceiveHandler};

bind_interrupts!(struct Irqs {
    RADIO => esb_radio::InterruptHandler;
});

/// Main Entry Point
///
/// Reihenfolge: LED-Pins → HFCLK → Radio konfigurieren → Empfang starten.
/// Danach nur noch Idle-Schleife, alle Arbeit passiert im RADIO Interrupt.
#[entry]
fn main() -> ! {
    let p = embassy_nrf::init(Default::default());

    // LEDs zuerst: alle aus, bevor das Radio irgendetwas meldet
    let indicator = init_indicator(p.P0_22, p.P0_23, p.P0_24);

    let radio = EsbRadio::new(p.RADIO, Irqs);
    let mut session: BoardSession = BoardSession::new(HfClock::new(), radio);

    // Fehler beim Hochfahren sind fatal: panic-probe hält den Knoten an
    if let Err(e) = session.bring_up(ReceiveHandler::new(indicator)) {
        defmt::panic!("Bring-up failed in {}: {}", session.state(), e);
    }

    session.run(&mut RttDiagnostics, &mut Wfe)
}
