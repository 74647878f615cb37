//! Session Driver Loop
//!
//! Zustandsmaschine des Knotens:
//! `ClockStarting` → `Configuring` → `Receiving` → `Idling`.
//! Fehler beim Hochfahren sind fatal, einen Recovery-Pfad gibt es nicht.

use crate::configurator::configure_and_start;
use crate::error::SessionError;
use crate::traits::{ClockService, Diagnostics, EventWait, RadioSubsystem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    ClockStarting,
    Configuring,
    Receiving,
    Idling,
}

/// Ergebnis eines Idle-Durchlaufs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleStep {
    /// Ein Log-Eintrag wurde verarbeitet, sofort weiter
    ProcessedLog,
    /// Nichts zu tun, CPU hat auf das nächste Event gewartet
    Waited,
}

pub struct SessionDriver<C, R> {
    clock: C,
    radio: R,
    state: SessionState,
}

impl<C: ClockService, R: RadioSubsystem> SessionDriver<C, R> {
    pub fn new(clock: C, radio: R) -> Self {
        Self {
            clock,
            radio,
            state: SessionState::ClockStarting,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn radio(&self) -> &R {
        &self.radio
    }

    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }

    /// Startet Clock und Radio und geht in den Empfangsmodus
    ///
    /// Bei einem Fehler bleibt der Zustand auf dem fehlgeschlagenen Schritt
    /// stehen. Der Aufrufer muss den Knoten anhalten.
    pub fn bring_up(&mut self, handler: R::Handler) -> Result<(), SessionError> {
        if self.state != SessionState::ClockStarting {
            warn!("bring_up called in state {}", self.state);
        }

        self.state = SessionState::ClockStarting;
        if let Err(e) = self.clock.start_high_frequency_clock() {
            error!("HFCLK start failed: {}", e);
            return Err(e.into());
        }

        self.state = SessionState::Configuring;
        if let Err(e) = configure_and_start(&mut self.radio, handler) {
            error!("ESB configuration failed at {}: {}", e.step.as_str(), e.cause);
            return Err(e.into());
        }

        self.state = SessionState::Receiving;
        info!("Enhanced ShockBurst receiver started");
        Ok(())
    }

    /// Ein Durchlauf der Idle-Schleife
    ///
    /// Log-Puffer leeren, dann entweder einen Eintrag verarbeiten oder
    /// bis zum nächsten Hardware-Event schlafen.
    pub fn idle_once<D: Diagnostics, W: EventWait>(
        &mut self,
        diagnostics: &mut D,
        waiter: &mut W,
    ) -> IdleStep {
        self.state = SessionState::Idling;

        diagnostics.flush();
        if diagnostics.process_one() {
            IdleStep::ProcessedLog
        } else {
            waiter.wait_for_event();
            IdleStep::Waited
        }
    }

    /// Idle-Schleife; läuft bis zum Hardware-Reset
    pub fn run<D: Diagnostics, W: EventWait>(&mut self, diagnostics: &mut D, waiter: &mut W) -> ! {
        loop {
            self.idle_once(diagnostics, waiter);
        }
    }
}
