// Board-Initialisierung: RGB-LED an P0.22 (rot), P0.23 (grün), P0.24 (blau)
//
// Die LED hat eine gemeinsame Anode, die Pins sind also active-low.
// Initialpegel ist high (LED aus), bevor das Radio irgendetwas tut.

use embassy_nrf::gpio::{Level, Output, OutputDrive};
use embassy_nrf::{Peri, peripherals};
use esb_core::{ReceiveHandler, RgbIndicator};

/// RGB-Anzeige des Boards
pub type BoardIndicator = RgbIndicator<Output<'static>, Output<'static>, Output<'static>>;

/// Event-Handler, der beim Radio registriert wird
pub type BoardHandler = ReceiveHandler<BoardIndicator>;

/// Konfiguriert die LED-Pins als Ausgänge und schaltet alle Farben aus
pub fn init_indicator(
    red: Peri<'static, peripherals::P0_22>,
    green: Peri<'static, peripherals::P0_23>,
    blue: Peri<'static, peripherals::P0_24>,
) -> BoardIndicator {
    let red = Output::new(red, Level::High, OutputDrive::Standard);
    let green = Output::new(green, Level::High, OutputDrive::Standard);
    let blue = Output::new(blue, Level::High, OutputDrive::Standard);

    RgbIndicator::new(red, green, blue)
}
