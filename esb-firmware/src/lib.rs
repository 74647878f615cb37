// Library-Root: Hardware-Anbindung des ESB-Empfängers
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;

// Re-exports von esb-core
pub use esb_core::{
    EventKind, IndicatorState, RadioConfig, ReceiveHandler, SessionDriver, SessionError,
    SessionState,
};

/// Session-Typ des Boards: HFXO + ESB-Radio
pub type BoardSession = SessionDriver<hal::HfClock, hal::EsbRadio<'static>>;
