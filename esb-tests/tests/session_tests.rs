//! Integration Tests für den Session-Ablauf (Clock → Radio → Idle)

mod common;

use common::{MockClock, MockDiagnostics, MockIndicator, MockRadio, MockWaiter, expected_calls};
use esb_core::{
    ClockError, ConfigStep, EventOutcome, IdleStep, IndicatorState, RadioError, ReceiveHandler,
    SessionDriver, SessionError, SessionState,
};

type TestSession = SessionDriver<MockClock, MockRadio<ReceiveHandler<MockIndicator>>>;

fn session(clock: MockClock, radio: MockRadio<ReceiveHandler<MockIndicator>>) -> TestSession {
    SessionDriver::new(clock, radio)
}

fn handler() -> ReceiveHandler<MockIndicator> {
    ReceiveHandler::new(MockIndicator::new())
}

// ============================================================================
// Tests: bring_up()
// ============================================================================

#[test]
fn test_new_session_starts_with_clock() {
    let session = session(MockClock::default(), MockRadio::new());
    assert_eq!(session.state(), SessionState::ClockStarting);
}

#[test]
fn test_bring_up_reaches_receiving() {
    let mut session = session(MockClock::default(), MockRadio::new());

    session.bring_up(handler()).unwrap();

    assert_eq!(session.state(), SessionState::Receiving);
    assert_eq!(session.radio().calls, expected_calls());
    assert!(session.radio().receiving);
}

#[test]
fn test_clock_failure_halts_before_radio() {
    let clock = MockClock {
        fail: true,
        ..Default::default()
    };
    let mut session = session(clock, MockRadio::new());

    let result = session.bring_up(handler());

    assert_eq!(result, Err(SessionError::Clock(ClockError::Timeout)));
    assert_eq!(session.state(), SessionState::ClockStarting);
    assert!(session.radio().calls.is_empty());
}

#[test]
fn test_configuration_failure_is_fatal() {
    let mut session = session(
        MockClock::default(),
        MockRadio::failing_at(ConfigStep::BaseAddress1),
    );

    let result = session.bring_up(handler());

    match result {
        Err(SessionError::Configuration(e)) => {
            assert_eq!(e.step, ConfigStep::BaseAddress1);
            assert_eq!(e.cause, RadioError::Busy);
        }
        other => panic!("Expected configuration error, got {:?}", other),
    }
    assert_eq!(session.state(), SessionState::Configuring);
    assert!(!session.radio().receiving);
}

#[test]
fn test_clock_started_exactly_once() {
    let mut session = session(MockClock::default(), MockRadio::new());
    session.bring_up(handler()).unwrap();

    let mut diagnostics = MockDiagnostics::default();
    let mut waiter = MockWaiter::default();
    session.idle_once(&mut diagnostics, &mut waiter);
    session.idle_once(&mut diagnostics, &mut waiter);

    // Clock wird nur beim Hochfahren gestartet, nie in der Idle-Schleife
    assert_eq!(session.clock().starts, 1);
    assert_eq!(session.radio().calls.len(), 5);
}

// ============================================================================
// Tests: idle_once()
// ============================================================================

#[test]
fn test_idle_without_logs_waits_for_event() {
    let mut session = session(MockClock::default(), MockRadio::new());
    session.bring_up(handler()).unwrap();

    let mut diagnostics = MockDiagnostics::default();
    let mut waiter = MockWaiter::default();

    let step = session.idle_once(&mut diagnostics, &mut waiter);

    assert_eq!(step, IdleStep::Waited);
    assert_eq!(session.state(), SessionState::Idling);
    assert_eq!(waiter.waits, 1);
    assert_eq!(diagnostics.log, vec!["flush", "process"]);
}

#[test]
fn test_idle_processes_logs_before_sleeping() {
    let mut session = session(MockClock::default(), MockRadio::new());
    session.bring_up(handler()).unwrap();

    let mut diagnostics = MockDiagnostics {
        queued: 2,
        ..Default::default()
    };
    let mut waiter = MockWaiter::default();

    assert_eq!(
        session.idle_once(&mut diagnostics, &mut waiter),
        IdleStep::ProcessedLog
    );
    assert_eq!(
        session.idle_once(&mut diagnostics, &mut waiter),
        IdleStep::ProcessedLog
    );
    assert_eq!(waiter.waits, 0);

    assert_eq!(
        session.idle_once(&mut diagnostics, &mut waiter),
        IdleStep::Waited
    );
    assert_eq!(waiter.waits, 1);
}

#[test]
fn test_events_handled_while_idling() {
    let mut session = session(MockClock::default(), MockRadio::new());
    session.bring_up(handler()).unwrap();

    let mut diagnostics = MockDiagnostics::default();
    let mut waiter = MockWaiter::default();
    session.idle_once(&mut diagnostics, &mut waiter);

    // Interrupt während WFE: Paket kommt an
    let outcome = session.radio_mut().receive(&[0x10, 0x03, 0, 0, 0, 0, 0, 0]);
    assert_eq!(
        outcome,
        Some(EventOutcome::IndicatorUpdated(IndicatorState::Blue))
    );

    session.idle_once(&mut diagnostics, &mut waiter);
    assert_eq!(session.state(), SessionState::Idling);
    assert_eq!(waiter.waits, 2);
}
