//! Event-Klassifizierer und Receive-Drain
//!
//! Wird beim Radio als Event-Handler registriert. Läuft im Interrupt-Kontext,
//! deshalb kein Blocking und keine Allokation.

use crate::error::DrainError;
use crate::logic::indicator_for_payload;
use crate::traits::{EventHandler, IndicatorDriver, PayloadSource};
use crate::types::{EventKind, EventOutcome, ReceivedPayload};

/// Handler eines reinen Empfängers
///
/// Besitzt die Anzeige und den Payload-Slot. Beides wird nur innerhalb
/// von `on_event()` angefasst.
pub struct ReceiveHandler<I> {
    indicator: I,
    slot: ReceivedPayload,
}

impl<I: IndicatorDriver> ReceiveHandler<I> {
    pub const fn new(indicator: I) -> Self {
        Self {
            indicator,
            slot: ReceivedPayload::new(),
        }
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    fn drain<S: PayloadSource + ?Sized>(&mut self, source: &mut S) -> EventOutcome {
        self.slot.rearm();

        if let Err(e) = source.read_rx_payload(&mut self.slot) {
            debug!("RX drain failed: {}", e);
            return EventOutcome::Skipped(DrainError::NoPayload);
        }

        match indicator_for_payload(&self.slot.data) {
            Ok(state) => {
                self.indicator.set_indicator(state);
                info!(
                    "Receiving packet: {=u8:#04x} (pipe {})",
                    self.slot.data[1],
                    self.slot.pipe
                );
                EventOutcome::IndicatorUpdated(state)
            }
            Err(e) => {
                warn!("RX payload too short: {} bytes", self.slot.len());
                EventOutcome::Skipped(e)
            }
        }
    }
}

impl<I: IndicatorDriver> EventHandler for ReceiveHandler<I> {
    fn on_event<S: PayloadSource + ?Sized>(
        &mut self,
        event: EventKind,
        source: &mut S,
    ) -> EventOutcome {
        match event {
            EventKind::TransmitSuccess => {
                info!("TX SUCCESS EVENT");
                EventOutcome::Logged
            }
            EventKind::TransmitFailed => {
                info!("TX FAILED EVENT");
                EventOutcome::Logged
            }
            EventKind::ReceiveComplete => {
                info!("RX RECEIVED EVENT");
                self.drain(source)
            }
            EventKind::Unknown => EventOutcome::Ignored,
        }
    }
}
