// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
//
// Pin-Zuordnung der RGB-LED: siehe hal/board.rs (P0.22/P0.23/P0.24).
//
// Die Radio-Konstanten (Adressen, Bitrate, Payload-Länge) sind Teil des
// Protokolls und liegen in esb_core::RadioConfig.

use embassy_nrf::interrupt::Priority;

// ============================================================================
// Clock Konfiguration
// ============================================================================

/// Maximale Anzahl Polls auf EVENTS_HFCLKSTARTED
/// Der Quarz braucht typisch ~360 µs; bei 64 MHz ist das weit darunter
pub const HFCLK_START_MAX_POLLS: u32 = 1_000_000;

// ============================================================================
// ESB Radio Konfiguration
// ============================================================================

/// Anzahl Pakete im Empfangs-FIFO
pub const RX_FIFO_SIZE: usize = 8;

/// Interrupt-Priorität des RADIO Interrupts
/// Höher als alles andere, die Ack-Umschaltung ist zeitkritisch
pub const RADIO_IRQ_PRIORITY: Priority = Priority::P1;
