//! Fehler-Typen für Radio, Clock und Session

use core::fmt;

/// Fehler des Radio-Subsystems
///
/// Entspricht den Fehlercodes der ESB-Bibliothek.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioError {
    /// Radio wurde noch nicht mit `init()` konfiguriert
    NotInitialized,
    /// Radio ist gerade aktiv (RX/TX läuft)
    Busy,
    /// Ungültiger Parameter (z.B. zu viele Prefixe)
    InvalidParam,
    /// Keine Payload im Empfangs-FIFO
    NoPayload,
}

/// Schritt der Radio-Konfiguration, der fehlgeschlagen ist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigStep {
    Init,
    BaseAddress0,
    BaseAddress1,
    Prefixes,
    StartReceive,
}

impl ConfigStep {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigStep::Init => "init",
            ConfigStep::BaseAddress0 => "address-0",
            ConfigStep::BaseAddress1 => "address-1",
            ConfigStep::Prefixes => "prefixes",
            ConfigStep::StartReceive => "start-receive",
        }
    }
}

/// Konfigurationsfehler beim Start - immer fatal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigError {
    pub step: ConfigStep,
    pub cause: RadioError,
}

impl ConfigError {
    pub fn new(step: ConfigStep, cause: RadioError) -> Self {
        Self { step, cause }
    }
}

/// Receive-Complete ohne verwertbare Payload (wird verschluckt)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrainError {
    /// Nichts im FIFO (spurious Event)
    NoPayload,
    /// Payload kürzer als 2 Bytes
    TooShort,
    /// Payload länger als der Slot
    TooLong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// HFCLK meldet sich nicht als gestartet
    Timeout,
}

/// Fataler Fehler beim Hochfahren des Knotens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionError {
    Clock(ClockError),
    Configuration(ConfigError),
}

impl From<ClockError> for SessionError {
    fn from(e: ClockError) -> Self {
        SessionError::Clock(e)
    }
}

impl From<ConfigError> for SessionError {
    fn from(e: ConfigError) -> Self {
        SessionError::Configuration(e)
    }
}

impl fmt::Display for RadioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            RadioError::NotInitialized => "radio not initialized",
            RadioError::Busy => "radio busy",
            RadioError::InvalidParam => "invalid parameter",
            RadioError::NoPayload => "no payload pending",
        };
        f.write_str(msg)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.step.as_str(), self.cause)
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Clock(ClockError::Timeout) => f.write_str("hfclk start timed out"),
            SessionError::Configuration(e) => write!(f, "configuration error: {}", e),
        }
    }
}

impl core::error::Error for RadioError {}
impl core::error::Error for ConfigError {}
impl core::error::Error for SessionError {}
