//! Core Types für den ESB-Empfänger
//!
//! Datenstrukturen ohne Hardware-Dependencies

use heapless::Vec;
use rgb::RGB;

use crate::error::DrainError;

/// Maximale Payload-Länge eines ESB-Pakets (Bytes)
pub const MAX_PAYLOAD_LEN: usize = 32;

/// Anzahl der logischen Empfangs-Pipes
pub const PIPE_COUNT: usize = 8;

/// Zustand der dreifarbigen Anzeige
///
/// Wird bei jedem Receive-Complete Event neu berechnet, nie gespeichert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndicatorState {
    #[default]
    Off,
    Red,
    Green,
    Blue,
}

impl IndicatorState {
    /// Mappt einen Index 0..=3 auf den Zustand; alles andere ist `Off`
    pub fn from_index(index: u8) -> Self {
        match index {
            1 => Self::Red,
            2 => Self::Green,
            3 => Self::Blue,
            _ => Self::Off,
        }
    }

    /// Logischer Zustand der drei Leitungen (`true` = an)
    ///
    /// Höchstens ein Kanal ist `true`. Die Polarität der Hardware
    /// spielt hier keine Rolle.
    pub fn lines(self) -> RGB<bool> {
        match self {
            Self::Off => RGB::new(false, false, false),
            Self::Red => RGB::new(true, false, false),
            Self::Green => RGB::new(false, true, false),
            Self::Blue => RGB::new(false, false, true),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Off => "Aus",
            Self::Red => "Rot",
            Self::Green => "Grün",
            Self::Blue => "Blau",
        }
    }
}

/// Link-Layer Event vom Radio-Subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    TransmitSuccess,
    TransmitFailed,
    ReceiveComplete,
    /// Unbekannte Event-IDs (vorwärtskompatibel, wird ignoriert)
    Unknown,
}

/// Was der Klassifizierer mit einem Event gemacht hat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// TX-Events: nur geloggt
    Logged,
    /// Anzeige wurde auf diesen Zustand gesetzt
    IndicatorUpdated(IndicatorState),
    /// Receive-Complete ohne verwertbare Payload
    Skipped(DrainError),
    Ignored,
}

/// ESB Protokoll-Variante
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    /// Feste Payload-Länge
    Esb,
    /// Dynamic Payload Length
    EsbDpl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bitrate {
    Mbps1,
    Mbps2,
    Kbps250,
}

/// Rolle im ESB-Protokoll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Primary Transmitter
    Ptx,
    /// Primary Receiver
    Prx,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crc {
    Off,
    Crc8,
    Crc16,
}

/// Sendeleistung in dBm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxPower {
    Neg4Dbm,
    ZeroDbm,
    Pos4Dbm,
}

/// Slot für die beiden 4-Byte Basis-Adressen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseAddressSlot {
    /// Basis für Pipe 0
    Zero,
    /// Basis für Pipes 1-7
    One,
}

/// Radio-Konfiguration für die gesamte Session
///
/// Wird einmal beim Start gebaut und danach nicht mehr verändert.
/// Die Konstanten sind der "Vertrag" mit den Gegenstellen auf denselben
/// Adressen und müssen exakt so bleiben.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioConfig {
    /// Payload-Länge bei fester Länge (`Protocol::Esb`); DPL erlaubt bis `MAX_PAYLOAD_LEN`
    pub payload_length: u8,
    pub protocol: Protocol,
    pub bitrate: Bitrate,
    pub mode: Mode,
    pub crc: Crc,
    pub tx_power: TxPower,
    /// `false`: jedes Paket wird von der Hardware quittiert (ohne Ack-Payload)
    pub selective_auto_ack: bool,
    /// RF-Kanal: 2400 MHz + Kanal
    pub rf_channel: u8,
    /// Adresslänge inkl. Prefix-Byte (3..=5)
    pub address_length: u8,
    pub base_address_0: [u8; 4],
    pub base_address_1: [u8; 4],
    pub prefixes: [u8; PIPE_COUNT],
    /// Bitmaske der aktiven Empfangs-Pipes
    pub rx_pipes_enabled: u8,
}

impl RadioConfig {
    pub const PAYLOAD_LENGTH: u8 = 8;
    pub const RF_CHANNEL: u8 = 2;
    pub const BASE_ADDRESS_0: [u8; 4] = [0xE7, 0xE7, 0xE7, 0xE7];
    pub const BASE_ADDRESS_1: [u8; 4] = [0xC2, 0xC2, 0xC2, 0xC2];
    pub const PREFIXES: [u8; PIPE_COUNT] = [0xE7, 0xC2, 0xC3, 0xC4, 0xC5, 0xC6, 0xC7, 0xC8];

    /// Feste Empfänger-Konfiguration (PRX, DPL, 2 Mbps)
    pub fn receiver() -> Self {
        Self {
            payload_length: Self::PAYLOAD_LENGTH,
            protocol: Protocol::EsbDpl,
            bitrate: Bitrate::Mbps2,
            mode: Mode::Prx,
            crc: Crc::Crc16,
            tx_power: TxPower::ZeroDbm,
            selective_auto_ack: false,
            rf_channel: Self::RF_CHANNEL,
            address_length: 5,
            base_address_0: Self::BASE_ADDRESS_0,
            base_address_1: Self::BASE_ADDRESS_1,
            prefixes: Self::PREFIXES,
            rx_pipes_enabled: 0xFF,
        }
    }

    pub fn base_address(&self, slot: BaseAddressSlot) -> [u8; 4] {
        match slot {
            BaseAddressSlot::Zero => self.base_address_0,
            BaseAddressSlot::One => self.base_address_1,
        }
    }
}

/// Empfangene Payload inkl. Metadaten
///
/// Gehört exklusiv dem Klassifizierer und ist nur während eines
/// Event-Aufrufs gültig. Vor jedem Drain wird der Slot neu "scharf" gemacht.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceivedPayload {
    pub data: Vec<u8, MAX_PAYLOAD_LEN>,
    /// Pipe, auf der das Paket ankam
    pub pipe: u8,
    /// RSSI als positiver Wert (-dBm)
    pub rssi: u8,
    /// Paket-ID (2 Bit) zur Duplikat-Erkennung
    pub pid: u8,
}

impl ReceivedPayload {
    pub const fn new() -> Self {
        Self {
            data: Vec::new(),
            pipe: 0,
            rssi: 0,
            pid: 0,
        }
    }

    /// Setzt den Slot vor dem nächsten Drain zurück
    pub fn rearm(&mut self) {
        self.data.clear();
        self.pipe = 0;
        self.rssi = 0;
        self.pid = 0;
    }

    /// Füllt den Slot; zu lange Daten werden abgelehnt
    pub fn fill(&mut self, data: &[u8], pipe: u8, rssi: u8, pid: u8) -> Result<(), DrainError> {
        self.rearm();
        self.data
            .extend_from_slice(data)
            .map_err(|_| DrainError::TooLong)?;
        self.pipe = pipe;
        self.rssi = rssi;
        self.pid = pid;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for IndicatorState {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.name())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EventKind {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            EventKind::TransmitSuccess => defmt::write!(fmt, "TransmitSuccess"),
            EventKind::TransmitFailed => defmt::write!(fmt, "TransmitFailed"),
            EventKind::ReceiveComplete => defmt::write!(fmt, "ReceiveComplete"),
            EventKind::Unknown => defmt::write!(fmt, "Unknown"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ReceivedPayload {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "ReceivedPayload {{ pipe: {}, rssi: -{} dBm, pid: {}, data: {=[u8]:x} }}",
            self.pipe,
            self.rssi,
            self.pid,
            self.data.as_slice()
        )
    }
}
