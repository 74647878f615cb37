//! Empfangspfad eines ESB Primary Receivers (PRX)
//!
//! Hardware-unabhängiger Teil des Radio-Treibers: Paketformat aus der
//! Konfiguration ableiten, Paket-Header dekodieren, Duplikate pro Pipe
//! erkennen und empfangene Pakete bis zum Drain puffern.
//!
//! Der Firmware-Treiber liest nur noch Register aus und reicht die Werte
//! an [`PrxQueue::on_packet`] weiter.

use heapless::Deque;

use crate::error::{DrainError, RadioError};
use crate::traits::PayloadSource;
use crate::types::{MAX_PAYLOAD_LEN, PIPE_COUNT, Protocol, RadioConfig, ReceivedPayload};

/// Paket im RAM: `[LENGTH][S1][PAYLOAD...]`
pub const PACKET_HEADER_LEN: usize = 2;

/// Größe des DMA-Puffers für ein vollständiges Paket
pub const PACKET_BUF_LEN: usize = PACKET_HEADER_LEN + MAX_PAYLOAD_LEN;

// S1 = [PID (2 Bit)][NO_ACK (1 Bit)]
const PID_MASK: u8 = 0x03;
const NO_ACK_BIT: u8 = 0x01;

// ============================================================================
// Paketformat (PCNF0 / PCNF1)
// ============================================================================

/// Feldlängen des On-Air Pakets
///
/// Im DPL-Modus bestimmt der Sender die Länge, das Radio akzeptiert bis
/// `MAX_PAYLOAD_LEN`. `payload_length` gilt nur für feste Länge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PacketFormat {
    /// Länge des LENGTH-Felds in Bit
    pub length_bits: u8,
    /// Länge des S1-Felds in Bit
    pub s1_bits: u8,
    pub max_len: u8,
    pub static_len: u8,
    /// Länge der Basis-Adresse in Bytes
    pub base_len: u8,
}

impl PacketFormat {
    pub fn for_config(config: &RadioConfig) -> Result<Self, RadioError> {
        if !(3..=5).contains(&config.address_length)
            || usize::from(config.payload_length) > MAX_PAYLOAD_LEN
        {
            return Err(RadioError::InvalidParam);
        }

        let base_len = config.address_length - 1;
        let format = match config.protocol {
            Protocol::EsbDpl => Self {
                length_bits: 6,
                s1_bits: 3,
                max_len: MAX_PAYLOAD_LEN as u8,
                static_len: 0,
                base_len,
            },
            Protocol::Esb => Self {
                length_bits: 0,
                s1_bits: 1,
                max_len: config.payload_length,
                static_len: config.payload_length,
                base_len,
            },
        };
        Ok(format)
    }
}

// ============================================================================
// Paket-Header
// ============================================================================

/// Dekodierter `[LENGTH][S1]` Header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PacketHeader {
    /// Payload-Länge, auf `MAX_PAYLOAD_LEN` begrenzt
    pub len: usize,
    pub pid: u8,
    pub no_ack: bool,
    /// S1-Byte wie empfangen (wird im Ack gespiegelt)
    pub s1: u8,
}

impl PacketHeader {
    pub fn parse(packet: &[u8]) -> Result<Self, DrainError> {
        let [len, s1, ..] = *packet else {
            return Err(DrainError::TooShort);
        };
        Ok(Self {
            len: usize::from(len).min(MAX_PAYLOAD_LEN),
            pid: (s1 >> 1) & PID_MASK,
            no_ack: s1 & NO_ACK_BIT != 0,
            s1,
        })
    }

    /// Header des Acks: keine Payload, S1 unverändert
    pub fn ack(&self) -> [u8; PACKET_HEADER_LEN] {
        [0, self.s1]
    }
}

// ============================================================================
// Duplikat-Erkennung
// ============================================================================

/// Letztes angenommenes Paket einer Pipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastPacket {
    pub pid: u8,
    pub crc: u32,
}

/// Merkt sich PID + CRC des letzten Pakets pro Pipe
///
/// Geht das Ack verloren, wiederholt der Sender mit gleicher PID und
/// gleichem CRC. So ein Paket wird erneut quittiert, aber nicht gemeldet.
#[derive(Debug, Clone)]
pub struct DuplicateFilter {
    last: [Option<LastPacket>; PIPE_COUNT],
}

impl DuplicateFilter {
    pub const fn new() -> Self {
        Self {
            last: [None; PIPE_COUNT],
        }
    }

    pub fn is_duplicate(&self, pipe: u8, pid: u8, crc: u32) -> bool {
        self.last
            .get(usize::from(pipe))
            .copied()
            .flatten()
            .is_some_and(|last| last.pid == pid && last.crc == crc)
    }

    pub fn record(&mut self, pipe: u8, pid: u8, crc: u32) {
        if let Some(slot) = self.last.get_mut(usize::from(pipe)) {
            *slot = Some(LastPacket { pid, crc });
        }
    }

    pub fn reset(&mut self) {
        self.last = [None; PIPE_COUNT];
    }
}

impl Default for DuplicateFilter {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Empfangs-FIFO
// ============================================================================

/// Was mit einem empfangenen Paket passiert ist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxOutcome {
    /// Neu, liegt im FIFO bereit
    Queued,
    /// Wiederholung des letzten Pakets auf dieser Pipe
    Duplicate,
    /// FIFO voll, Paket verworfen
    FifoFull,
    /// Puffer kürzer als der Header verspricht
    Malformed,
}

/// Duplikat-Filter plus FIFO der noch nicht gelesenen Pakete
pub struct PrxQueue<const N: usize> {
    filter: DuplicateFilter,
    packets: Deque<ReceivedPayload, N>,
}

impl<const N: usize> PrxQueue<N> {
    pub const fn new() -> Self {
        Self {
            filter: DuplicateFilter::new(),
            packets: Deque::new(),
        }
    }

    /// Verwirft alle Pakete und vergisst die letzten PIDs
    pub fn reset(&mut self) {
        self.filter.reset();
        self.packets.clear();
    }

    pub fn len(&self) -> usize {
        self.packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    /// Nimmt ein CRC-geprüftes Paket `[LENGTH][S1][PAYLOAD...]` an
    pub fn on_packet(&mut self, packet: &[u8], pipe: u8, crc: u32, rssi: u8) -> RxOutcome {
        let Ok(header) = PacketHeader::parse(packet) else {
            return RxOutcome::Malformed;
        };
        let Some(data) = packet.get(PACKET_HEADER_LEN..PACKET_HEADER_LEN + header.len) else {
            return RxOutcome::Malformed;
        };

        if self.filter.is_duplicate(pipe, header.pid, crc) {
            debug!("Duplicate packet on pipe {} (pid {})", pipe, header.pid);
            return RxOutcome::Duplicate;
        }

        let mut payload = ReceivedPayload::new();
        if payload.fill(data, pipe, rssi, header.pid).is_err() {
            return RxOutcome::Malformed;
        }
        if self.packets.push_back(payload).is_err() {
            warn!("RX FIFO full, packet dropped");
            return RxOutcome::FifoFull;
        }

        self.filter.record(pipe, header.pid, crc);
        RxOutcome::Queued
    }
}

impl<const N: usize> Default for PrxQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PayloadSource for PrxQueue<N> {
    fn read_rx_payload(&mut self, slot: &mut ReceivedPayload) -> Result<(), RadioError> {
        let packet = self.packets.pop_front().ok_or(RadioError::NoPayload)?;
        *slot = packet;
        Ok(())
    }
}
