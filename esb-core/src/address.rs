//! Adress-Kodierung für die RADIO-Register
//!
//! ESB überträgt Adressen LSBit-first (nRF24L01-kompatibel), der nRF52
//! RADIO-Block sendet MSBit-first. Jedes Byte wird daher bitweise gespiegelt.

use crate::error::RadioError;
use crate::types::PIPE_COUNT;

/// Wert für das BASE0/BASE1 Register
pub fn encode_base_address(address: [u8; 4]) -> u32 {
    u32::from_be_bytes(address.map(u8::reverse_bits))
}

/// Werte für PREFIX0 (Pipes 0-3) und PREFIX1 (Pipes 4-7)
///
/// Fehlende Pipes werden mit 0 aufgefüllt.
pub fn encode_prefixes(prefixes: &[u8]) -> Result<(u32, u32), RadioError> {
    if prefixes.len() > PIPE_COUNT {
        return Err(RadioError::InvalidParam);
    }

    let mut table = [0u8; PIPE_COUNT];
    table[..prefixes.len()].copy_from_slice(prefixes);
    let table = table.map(u8::reverse_bits);

    let prefix0 = u32::from_le_bytes([table[0], table[1], table[2], table[3]]);
    let prefix1 = u32::from_le_bytes([table[4], table[5], table[6], table[7]]);
    Ok((prefix0, prefix1))
}

/// Bitmaske der Pipes, für die ein Prefix gesetzt wurde
pub fn pipe_mask(prefix_count: usize) -> u8 {
    match prefix_count {
        0 => 0,
        n if n >= PIPE_COUNT => 0xFF,
        n => (1u8 << n) - 1,
    }
}
