//! Mock-Hardware für die Host-Tests
//!
//! Wird von allen Test-Dateien per `mod common;` eingebunden.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, OutputPin};
use esb_core::{
    BaseAddressSlot, ClockError, ClockService, ConfigStep, Diagnostics, EventHandler, EventKind,
    EventOutcome, EventWait, IndicatorDriver, IndicatorState, PayloadSource, RadioConfig,
    RadioError, RadioSubsystem, ReceivedPayload,
};

// ============================================================================
// Mock GPIO Pin
// ============================================================================

#[derive(Debug, Default)]
pub struct MockPin {
    /// Aktueller Pegel (true = high)
    pub high: bool,
    /// Anzahl der Schreibzugriffe
    pub writes: usize,
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        self.writes += 1;
        Ok(())
    }
}

/// Logisch "an" bei active-low Verdrahtung
pub fn is_lit(pin: &MockPin) -> bool {
    !pin.high
}

// ============================================================================
// Gemeinsame Leitungen (für Übergänge zwischen Farben)
// ============================================================================

/// Zustand aller drei Leitungen, nach jedem Schreibzugriff geprüft
#[derive(Debug)]
pub struct LineBus {
    /// Pegel pro Leitung (true = high = aus)
    pub high: [bool; 3],
    /// Höchste Zahl gleichzeitig leuchtender Leitungen seit dem letzten Reset
    pub max_lit: usize,
}

impl LineBus {
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            high: [true; 3],
            max_lit: 0,
        }))
    }

    pub fn lit(&self) -> usize {
        self.high.iter().filter(|high| !**high).count()
    }

    pub fn reset_max(&mut self) {
        self.max_lit = self.lit();
    }
}

pub struct BusPin {
    line: usize,
    bus: Rc<RefCell<LineBus>>,
}

impl BusPin {
    pub fn new(line: usize, bus: &Rc<RefCell<LineBus>>) -> Self {
        Self {
            line,
            bus: Rc::clone(bus),
        }
    }

    fn write(&mut self, high: bool) {
        let mut bus = self.bus.borrow_mut();
        bus.high[self.line] = high;
        let lit = bus.lit();
        bus.max_lit = bus.max_lit.max(lit);
    }
}

impl ErrorType for BusPin {
    type Error = Infallible;
}

impl OutputPin for BusPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true);
        Ok(())
    }
}

// ============================================================================
// Mock Indicator
// ============================================================================

#[derive(Debug, Default)]
pub struct MockIndicator {
    pub current: IndicatorState,
    pub history: Vec<IndicatorState>,
}

impl MockIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn showing(state: IndicatorState) -> Self {
        Self {
            current: state,
            history: Vec::new(),
        }
    }
}

impl IndicatorDriver for MockIndicator {
    fn set_indicator(&mut self, color: IndicatorState) {
        self.current = color;
        self.history.push(color);
    }
}

// ============================================================================
// Mock Radio
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RadioCall {
    Init,
    SetBaseAddress(BaseAddressSlot, [u8; 4]),
    SetPrefixes(Vec<u8>),
    StartReceive,
}

/// Empfangs-FIFO des Mock-Radios
#[derive(Debug, Default)]
pub struct MockFifo {
    pub pending: VecDeque<Vec<u8>>,
    pub reads: usize,
}

impl PayloadSource for MockFifo {
    fn read_rx_payload(&mut self, slot: &mut ReceivedPayload) -> Result<(), RadioError> {
        self.reads += 1;
        let data = self.pending.pop_front().ok_or(RadioError::NoPayload)?;
        slot.fill(&data, 0, 42, 0).map_err(|_| RadioError::InvalidParam)
    }
}

pub struct MockRadio<H> {
    pub calls: Vec<RadioCall>,
    /// Simuliere Fehler bei diesem Konfigurations-Schritt
    pub fail_at: Option<ConfigStep>,
    pub config: Option<RadioConfig>,
    pub handler: Option<H>,
    pub fifo: MockFifo,
    pub receiving: bool,
}

impl<H: EventHandler> MockRadio<H> {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            fail_at: None,
            config: None,
            handler: None,
            fifo: MockFifo::default(),
            receiving: false,
        }
    }

    pub fn failing_at(step: ConfigStep) -> Self {
        let mut radio = Self::new();
        radio.fail_at = Some(step);
        radio
    }

    /// Legt ein Paket in den Empfangs-FIFO
    pub fn queue_packet(&mut self, data: &[u8]) {
        self.fifo.pending.push_back(data.to_vec());
    }

    /// Simuliert ein Hardware-Event (wie der RADIO Interrupt)
    pub fn fire(&mut self, event: EventKind) -> Option<EventOutcome> {
        self.handler
            .as_mut()
            .map(|handler| handler.on_event(event, &mut self.fifo))
    }

    /// Paket empfangen + Receive-Complete auslösen
    pub fn receive(&mut self, data: &[u8]) -> Option<EventOutcome> {
        self.queue_packet(data);
        self.fire(EventKind::ReceiveComplete)
    }

    fn check(&self, step: ConfigStep) -> Result<(), RadioError> {
        if self.fail_at == Some(step) {
            return Err(RadioError::Busy);
        }
        Ok(())
    }
}

impl<H: EventHandler> RadioSubsystem for MockRadio<H> {
    type Handler = H;

    fn init(&mut self, config: &RadioConfig, handler: H) -> Result<(), RadioError> {
        self.calls.push(RadioCall::Init);
        self.check(ConfigStep::Init)?;
        self.config = Some(config.clone());
        self.handler = Some(handler);
        Ok(())
    }

    fn set_base_address(
        &mut self,
        slot: BaseAddressSlot,
        address: [u8; 4],
    ) -> Result<(), RadioError> {
        self.calls.push(RadioCall::SetBaseAddress(slot, address));
        if self.config.is_none() {
            return Err(RadioError::NotInitialized);
        }
        match slot {
            BaseAddressSlot::Zero => self.check(ConfigStep::BaseAddress0),
            BaseAddressSlot::One => self.check(ConfigStep::BaseAddress1),
        }
    }

    fn set_prefixes(&mut self, prefixes: &[u8]) -> Result<(), RadioError> {
        self.calls.push(RadioCall::SetPrefixes(prefixes.to_vec()));
        if prefixes.len() > 8 {
            return Err(RadioError::InvalidParam);
        }
        self.check(ConfigStep::Prefixes)
    }

    fn start_receive(&mut self) -> Result<(), RadioError> {
        self.calls.push(RadioCall::StartReceive);
        if self.config.is_none() {
            return Err(RadioError::NotInitialized);
        }
        self.check(ConfigStep::StartReceive)?;
        self.receiving = true;
        Ok(())
    }
}

/// Erwartete Aufruf-Reihenfolge einer erfolgreichen Konfiguration
pub fn expected_calls() -> Vec<RadioCall> {
    vec![
        RadioCall::Init,
        RadioCall::SetBaseAddress(BaseAddressSlot::Zero, [0xE7, 0xE7, 0xE7, 0xE7]),
        RadioCall::SetBaseAddress(BaseAddressSlot::One, [0xC2, 0xC2, 0xC2, 0xC2]),
        RadioCall::SetPrefixes(vec![0xE7, 0xC2, 0xC3, 0xC4, 0xC5, 0xC6, 0xC7, 0xC8]),
        RadioCall::StartReceive,
    ]
}

// ============================================================================
// Mock Clock / Diagnostics / Waiter
// ============================================================================

#[derive(Debug, Default)]
pub struct MockClock {
    pub starts: usize,
    pub fail: bool,
}

impl ClockService for MockClock {
    fn start_high_frequency_clock(&mut self) -> Result<(), ClockError> {
        self.starts += 1;
        if self.fail {
            return Err(ClockError::Timeout);
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MockDiagnostics {
    /// Anzahl gepufferter Log-Einträge
    pub queued: usize,
    pub log: Vec<&'static str>,
}

impl Diagnostics for MockDiagnostics {
    fn flush(&mut self) {
        self.log.push("flush");
    }

    fn process_one(&mut self) -> bool {
        self.log.push("process");
        if self.queued == 0 {
            return false;
        }
        self.queued -= 1;
        true
    }
}

#[derive(Debug, Default)]
pub struct MockWaiter {
    pub waits: usize,
}

impl EventWait for MockWaiter {
    fn wait_for_event(&mut self) {
        self.waits += 1;
    }
}
