//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.
//!
//! # Implementierungen
//! - **Production:** `esb-firmware` (nRF52840 Register)
//! - **Testing:** Mocks in `esb-tests`

use crate::error::{ClockError, RadioError};
use crate::types::{
    BaseAddressSlot, EventKind, EventOutcome, IndicatorState, RadioConfig, ReceivedPayload,
};

/// Dreifarbige Anzeige
///
/// Muss aus dem Interrupt-Kontext aufrufbar sein: kein Blocking, keine Allokation.
pub trait IndicatorDriver {
    /// Schaltet genau eine Farbe logisch an (oder alle aus bei `Off`)
    fn set_indicator(&mut self, color: IndicatorState);
}

/// Quelle für empfangene Pakete (Empfangs-FIFO des Radios)
pub trait PayloadSource {
    /// Kopiert das nächste anstehende Paket in `slot`
    ///
    /// # Fehlerbehandlung
    /// Gibt `RadioError::NoPayload` zurück wenn nichts ansteht
    fn read_rx_payload(&mut self, slot: &mut ReceivedPayload) -> Result<(), RadioError>;
}

/// Empfänger für Link-Layer Events
///
/// Wird vom Radio-Subsystem pro Event genau einmal aufgerufen, nie parallel
/// zu sich selbst. `source` ist nur während des Aufrufs gültig.
pub trait EventHandler {
    fn on_event<S: PayloadSource + ?Sized>(&mut self, event: EventKind, source: &mut S)
    -> EventOutcome;
}

/// Radio-Subsystem (ESB)
///
/// Die Reihenfolge ist fest: `init` → Basis-Adressen → Prefixe → `start_receive`.
pub trait RadioSubsystem {
    /// Handler, der nach `init` alle Events bekommt
    type Handler: EventHandler;

    fn init(&mut self, config: &RadioConfig, handler: Self::Handler) -> Result<(), RadioError>;

    fn set_base_address(
        &mut self,
        slot: BaseAddressSlot,
        address: [u8; 4],
    ) -> Result<(), RadioError>;

    /// Ein Prefix-Byte pro Pipe, maximal 8
    fn set_prefixes(&mut self, prefixes: &[u8]) -> Result<(), RadioError>;

    /// Startet den kontinuierlichen Empfang
    fn start_receive(&mut self) -> Result<(), RadioError>;
}

/// High-Frequency Clock
pub trait ClockService {
    /// Startet den HF-Takt und wartet bis er stabil läuft
    fn start_high_frequency_clock(&mut self) -> Result<(), ClockError>;
}

/// Diagnose-Ausgabe (Log-Backend)
pub trait Diagnostics {
    /// Gepufferte Ausgabe rausschreiben
    fn flush(&mut self);

    /// Einen gepufferten Log-Eintrag verarbeiten
    ///
    /// Gibt `false` zurück wenn nichts mehr ansteht.
    fn process_one(&mut self) -> bool;
}

/// Kooperatives Warten auf das nächste Hardware-Event (WFE)
pub trait EventWait {
    fn wait_for_event(&mut self);
}
