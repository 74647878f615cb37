//! Pure Business Logic Functions
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

use crate::error::DrainError;
use crate::types::IndicatorState;

/// Position des Anzeige-Bytes in der Payload
pub const INDICATOR_BYTE_INDEX: usize = 1;

/// Mappt ein empfangenes Byte auf den Anzeige-Zustand: `b % 4`
///
/// # Beispiele
///
/// ```
/// # use esb_core::{indicator_from_byte, IndicatorState};
/// assert_eq!(indicator_from_byte(0x01), IndicatorState::Red);
/// assert_eq!(indicator_from_byte(0x06), IndicatorState::Green); // 6 % 4 = 2
/// ```
pub fn indicator_from_byte(byte: u8) -> IndicatorState {
    IndicatorState::from_index(byte % 4)
}

/// Anzeige-Zustand für eine Payload (nur Byte 1 zählt)
///
/// Zu kurze Payloads werden abgelehnt statt außerhalb der Grenzen zu lesen.
pub fn indicator_for_payload(data: &[u8]) -> Result<IndicatorState, DrainError> {
    data.get(INDICATOR_BYTE_INDEX)
        .copied()
        .map(indicator_from_byte)
        .ok_or(DrainError::TooShort)
}
