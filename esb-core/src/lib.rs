//! ESB Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert die Traits für Radio, Clock und Indicator, die reine
//! Mapping-Logik sowie den Event-Klassifizierer und den Session-Ablauf
//! eines Enhanced ShockBurst (ESB) Empfängers.

#![no_std]

// Muss als erstes Modul kommen, damit die Log-Makros überall sichtbar sind
#[macro_use]
mod log;

pub mod address;
pub mod classifier;
pub mod configurator;
pub mod error;
pub mod indicator;
pub mod logic;
pub mod prx;
pub mod session;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use classifier::ReceiveHandler;
pub use configurator::{configure, configure_and_start};
pub use error::{ClockError, ConfigError, ConfigStep, DrainError, RadioError, SessionError};
pub use indicator::RgbIndicator;
pub use logic::{indicator_for_payload, indicator_from_byte};
pub use prx::{PacketFormat, PacketHeader, PrxQueue, RxOutcome};
pub use session::{IdleStep, SessionDriver, SessionState};
pub use traits::{
    ClockService, Diagnostics, EventHandler, EventWait, IndicatorDriver, PayloadSource,
    RadioSubsystem,
};
pub use types::{
    BaseAddressSlot, Bitrate, Crc, EventKind, EventOutcome, IndicatorState, Mode, Protocol,
    RadioConfig, ReceivedPayload, TxPower,
};
