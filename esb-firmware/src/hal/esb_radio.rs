// Enhanced ShockBurst PRX-Treiber für den nRF52840 RADIO-Block
//
// Nur der Empfänger-Teil von ESB: Pakete empfangen, automatisch
// quittieren (Ack ohne Payload) und jedes neue Paket per Receive-Complete
// an den registrierten Handler melden. Paketformat, Header, Duplikate und
// FIFO kommen aus `esb_core::prx`, hier bleibt nur der Registerzugriff.
//
// Der Zustand liegt in einer static hinter einem Critical-Section-Mutex,
// weil der RADIO Interrupt und der Main-Thread beide darauf zugreifen.

use core::cell::{RefCell, UnsafeCell};

use defmt::{debug, info, warn};
use embassy_nrf::interrupt::typelevel::{Binding, Interrupt};
use embassy_nrf::pac::radio::vals;
use embassy_nrf::{Peri, interrupt, pac, peripherals};
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use esb_core::address::{encode_base_address, encode_prefixes, pipe_mask};
use esb_core::prx::{PACKET_BUF_LEN, PacketFormat, PacketHeader, PrxQueue, RxOutcome};
use esb_core::{
    BaseAddressSlot, Bitrate, Crc, EventHandler, EventKind, RadioConfig, RadioError,
    RadioSubsystem, TxPower,
};

use super::board::BoardHandler;
use crate::config::{RADIO_IRQ_PRIORITY, RX_FIFO_SIZE};

// ============================================================================
// DMA-Buffer
// ============================================================================

/// Buffer, in den der RADIO-Block per EasyDMA schreibt/liest
///
/// Zugriff nur wenn das Radio DISABLED ist (im DISABLED Interrupt).
struct DmaBuffer(UnsafeCell<[u8; PACKET_BUF_LEN]>);

// Safety: Zugriff nur aus dem RADIO Interrupt bzw. vor dessen Aktivierung
unsafe impl Sync for DmaBuffer {}

impl DmaBuffer {
    const fn new() -> Self {
        Self(UnsafeCell::new([0; PACKET_BUF_LEN]))
    }

    fn ptr(&self) -> u32 {
        self.0.get() as u32
    }
}

static RX_BUFFER: DmaBuffer = DmaBuffer::new();
static ACK_BUFFER: DmaBuffer = DmaBuffer::new();

// ============================================================================
// Treiber-Zustand
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
enum Phase {
    /// `init()` noch nicht gelaufen
    Uninitialized,
    /// Konfiguriert, Radio aus
    Idle,
    /// Wartet auf ein Paket
    Rx,
    /// Sendet das Ack für das letzte Paket
    TxAck,
}

struct State {
    phase: Phase,
    config: Option<RadioConfig>,
    handler: Option<BoardHandler>,
    queue: PrxQueue<RX_FIFO_SIZE>,
}

impl State {
    const fn new() -> Self {
        Self {
            phase: Phase::Uninitialized,
            config: None,
            handler: None,
            queue: PrxQueue::new(),
        }
    }
}

static STATE: Mutex<CriticalSectionRawMutex, RefCell<State>> =
    Mutex::new(RefCell::new(State::new()));

fn regs() -> pac::radio::Radio {
    pac::RADIO
}

// Gemeinsame Shorts plus die Umschaltung nach DISABLED (RX → Ack bzw. Ack → RX)
fn set_shorts(disabled_txen: bool, disabled_rxen: bool) {
    regs().shorts().write(|w| {
        w.set_ready_start(true);
        w.set_end_disable(true);
        w.set_address_rssistart(true);
        w.set_disabled_rssistop(true);
        w.set_disabled_txen(disabled_txen);
        w.set_disabled_rxen(disabled_rxen);
    });
}

fn apply_config(config: &RadioConfig) -> Result<(), RadioError> {
    let format = PacketFormat::for_config(config)?;
    let r = regs();

    let mode = match config.bitrate {
        Bitrate::Mbps1 => vals::Mode::NRF_1MBIT,
        Bitrate::Mbps2 => vals::Mode::NRF_2MBIT,
        // NRF_250KBIT ist auf dem nRF52840 nicht mehr unterstützt
        Bitrate::Kbps250 => return Err(RadioError::InvalidParam),
    };

    r.power().write(|w| w.set_power(true));
    r.mode().write(|w| w.set_mode(mode));

    r.pcnf0().write(|w| {
        w.set_lflen(format.length_bits);
        w.set_s0len(false);
        w.set_s1len(format.s1_bits);
    });
    r.pcnf1().write(|w| {
        w.set_maxlen(format.max_len);
        w.set_statlen(format.static_len);
        w.set_balen(format.base_len);
        w.set_endian(vals::Endian::BIG);
        w.set_whiteen(false);
    });

    match config.crc {
        Crc::Off => r.crccnf().write(|w| w.set_len(vals::Len::DISABLED)),
        Crc::Crc8 => {
            r.crccnf().write(|w| {
                w.set_len(vals::Len::ONE);
                w.set_skipaddr(vals::Skipaddr::INCLUDE);
            });
            r.crcinit().write(|w| w.set_crcinit(0xFF));
            r.crcpoly().write(|w| w.set_crcpoly(0x107));
        }
        Crc::Crc16 => {
            r.crccnf().write(|w| {
                w.set_len(vals::Len::TWO);
                w.set_skipaddr(vals::Skipaddr::INCLUDE);
            });
            r.crcinit().write(|w| w.set_crcinit(0xFFFF));
            r.crcpoly().write(|w| w.set_crcpoly(0x1_1021));
        }
    }

    let power = match config.tx_power {
        TxPower::Neg4Dbm => vals::Txpower::NEG4_DBM,
        TxPower::ZeroDbm => vals::Txpower::_0_DBM,
        TxPower::Pos4Dbm => vals::Txpower::POS4_DBM,
    };
    r.txpower().write(|w| w.set_txpower(power));

    r.frequency().write(|w| {
        w.set_frequency(config.rf_channel);
        w.set_map(vals::Map::DEFAULT);
    });

    Ok(())
}

// Empfang (neu) starten; bricht ein laufendes Ack ab
fn restart_rx() {
    let r = regs();

    r.intenclr().write(|w| w.set_disabled(true));
    set_shorts(false, false);
    r.events_disabled().write_value(0);
    r.tasks_disable().write_value(1);
    while r.events_disabled().read() == 0 {}
    r.events_disabled().write_value(0);

    r.packetptr().write_value(RX_BUFFER.ptr());
    set_shorts(true, false);
    r.intenset().write(|w| w.set_disabled(true));
    r.tasks_rxen().write_value(1);
}

// ============================================================================
// Öffentliche API
// ============================================================================

/// ESB-Empfänger auf dem RADIO Peripheral
///
/// Selbst nur ein Handle; der eigentliche Zustand liegt in `STATE`.
pub struct EsbRadio<'d> {
    _radio: Peri<'d, peripherals::RADIO>,
}

impl<'d> EsbRadio<'d> {
    /// Übernimmt das RADIO Peripheral
    ///
    /// # Parameter
    /// - `radio`: RADIO Peripheral
    /// - `_irq`: Interrupt-Binding (erstellt mit `bind_interrupts!`)
    pub fn new(
        radio: Peri<'d, peripherals::RADIO>,
        _irq: impl Binding<interrupt::typelevel::RADIO, InterruptHandler> + 'd,
    ) -> Self {
        Self { _radio: radio }
    }

    fn with_idle<T>(
        f: impl FnOnce(&mut State) -> Result<T, RadioError>,
    ) -> Result<T, RadioError> {
        STATE.lock(|cell| {
            let mut state = cell.borrow_mut();
            match state.phase {
                Phase::Uninitialized => Err(RadioError::NotInitialized),
                Phase::Rx | Phase::TxAck => Err(RadioError::Busy),
                Phase::Idle => f(&mut state),
            }
        })
    }
}

impl RadioSubsystem for EsbRadio<'_> {
    type Handler = BoardHandler;

    fn init(&mut self, config: &RadioConfig, handler: BoardHandler) -> Result<(), RadioError> {
        STATE.lock(|cell| {
            let mut state = cell.borrow_mut();
            if matches!(state.phase, Phase::Rx | Phase::TxAck) {
                return Err(RadioError::Busy);
            }

            apply_config(config)?;

            state.config = Some(config.clone());
            state.handler = Some(handler);
            state.queue.reset();
            state.phase = Phase::Idle;
            Ok(())
        })?;

        interrupt::typelevel::RADIO::unpend();
        interrupt::typelevel::RADIO::set_priority(RADIO_IRQ_PRIORITY);
        // Safety: Handler ist per Binding registriert, Zustand ist initialisiert
        unsafe { interrupt::typelevel::RADIO::enable() };

        debug!("ESB radio initialized");
        Ok(())
    }

    fn set_base_address(
        &mut self,
        slot: BaseAddressSlot,
        address: [u8; 4],
    ) -> Result<(), RadioError> {
        Self::with_idle(|_| {
            let value = encode_base_address(address);
            match slot {
                BaseAddressSlot::Zero => regs().base0().write_value(value),
                BaseAddressSlot::One => regs().base1().write_value(value),
            }
            Ok(())
        })
    }

    fn set_prefixes(&mut self, prefixes: &[u8]) -> Result<(), RadioError> {
        Self::with_idle(|state| {
            let (prefix0, prefix1) = encode_prefixes(prefixes)?;
            let enabled = state
                .config
                .as_ref()
                .map_or(0xFF, |config| config.rx_pipes_enabled);

            let r = regs();
            r.prefix0().write_value(pac::radio::regs::Prefix0(prefix0));
            r.prefix1().write_value(pac::radio::regs::Prefix1(prefix1));
            r.rxaddresses()
                .write_value(pac::radio::regs::Rxaddresses(u32::from(
                    pipe_mask(prefixes.len()) & enabled,
                )));
            Ok(())
        })
    }

    fn start_receive(&mut self) -> Result<(), RadioError> {
        Self::with_idle(|state| {
            let r = regs();

            r.events_ready().write_value(0);
            r.events_end().write_value(0);
            r.events_disabled().write_value(0);

            r.packetptr().write_value(RX_BUFFER.ptr());
            // DISABLED → TXEN: Ack-Umschaltung in Hardware
            set_shorts(true, false);
            r.intenset().write(|w| w.set_disabled(true));

            state.phase = Phase::Rx;
            r.tasks_rxen().write_value(1);
            info!("ESB receive started");
            Ok(())
        })
    }
}

// ============================================================================
// Interrupt Handler
// ============================================================================

/// RADIO Interrupt Handler (binden mit `bind_interrupts!`)
pub struct InterruptHandler {
    _private: (),
}

impl interrupt::typelevel::Handler<interrupt::typelevel::RADIO> for InterruptHandler {
    unsafe fn on_interrupt() {
        let r = regs();
        if r.events_disabled().read() == 0 {
            return;
        }
        r.events_disabled().write_value(0);

        STATE.lock(|cell| {
            let mut state = cell.borrow_mut();
            match state.phase {
                Phase::Rx => on_rx_disabled(&mut state),
                Phase::TxAck => on_ack_sent(&mut state),
                other => warn!("RADIO interrupt in phase {}", other),
            }
        });
    }
}

// Paket empfangen, Radio rampt bereits auf TX (Short DISABLED → TXEN)
fn on_rx_disabled(state: &mut State) {
    let r = regs();

    if r.crcstatus().read().crcstatus() != vals::Crcstatus::CRCOK {
        restart_rx();
        return;
    }

    // Safety: Radio ist DISABLED, der RX-Buffer wird gerade nicht beschrieben
    let rx = unsafe { &*RX_BUFFER.0.get() };
    let Ok(header) = PacketHeader::parse(rx) else {
        restart_rx();
        return;
    };

    // Ack ohne Payload, S1 (PID/NO_ACK) gespiegelt
    // Safety: ACK_BUFFER wird nur hier beschrieben, TX startet erst nach dem Ramp-Up
    unsafe {
        let ack = &mut *ACK_BUFFER.0.get();
        ack[..2].copy_from_slice(&header.ack());
    }
    let pipe = r.rxmatch().read().rxmatch();
    r.txaddress().write(|w| w.set_txaddress(pipe));
    r.packetptr().write_value(ACK_BUFFER.ptr());
    set_shorts(false, true);
    state.phase = Phase::TxAck;

    let crc = r.rxcrc().read().rxcrc();
    let rssi = r.rssisample().read().rssisample();
    match state.queue.on_packet(rx, pipe, crc, rssi) {
        RxOutcome::Queued => {}
        other => {
            debug!("RX packet not reported: {}", other);
            return;
        }
    }

    let State { handler, queue, .. } = state;
    if let Some(handler) = handler.as_mut() {
        handler.on_event(EventKind::ReceiveComplete, queue);
    }
}

// Ack ist raus, Radio rampt bereits auf RX (Short DISABLED → RXEN)
fn on_ack_sent(state: &mut State) {
    regs().packetptr().write_value(RX_BUFFER.ptr());
    set_shorts(true, false);
    state.phase = Phase::Rx;
}
