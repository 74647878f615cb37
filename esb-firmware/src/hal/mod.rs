// Hardware Abstraction Layer (HAL) Module
//
// nRF52840-Implementierungen der Traits aus esb-core.
// Die Logik selbst (Klassifizierer, Konfiguration, Session) liegt dort
// und wird auf dem Host getestet.

pub mod board;
pub mod clock;
pub mod diagnostics;
pub mod esb_radio;

pub use board::{BoardHandler, BoardIndicator, init_indicator};
pub use clock::HfClock;
pub use diagnostics::{RttDiagnostics, Wfe};
pub use esb_radio::{EsbRadio, InterruptHandler};
