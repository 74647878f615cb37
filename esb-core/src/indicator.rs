//! RGB-Anzeige an drei GPIO-Leitungen
//!
//! Die Leitungen sind active-low (LED an = Pin low). Die Invertierung
//! passiert ausschließlich hier; nach außen gilt "Rot" = rote Leitung an.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;

use crate::traits::IndicatorDriver;
use crate::types::IndicatorState;

/// Anzeige-Treiber für eine RGB-LED mit gemeinsamer Anode
///
/// Die Pins müssen bereits als Ausgänge konfiguriert sein.
pub struct RgbIndicator<R, G, B> {
    red: R,
    green: G,
    blue: B,
}

impl<R, G, B> RgbIndicator<R, G, B>
where
    R: OutputPin<Error = Infallible>,
    G: OutputPin<Error = Infallible>,
    B: OutputPin<Error = Infallible>,
{
    /// Übernimmt die Pins und schaltet alle Farben aus
    pub fn new(red: R, green: G, blue: B) -> Self {
        let mut indicator = Self { red, green, blue };
        indicator.set_indicator(IndicatorState::Off);
        indicator
    }

    /// Gibt die Pins wieder frei
    pub fn release(self) -> (R, G, B) {
        (self.red, self.green, self.blue)
    }
}

impl<R, G, B> IndicatorDriver for RgbIndicator<R, G, B>
where
    R: OutputPin<Error = Infallible>,
    G: OutputPin<Error = Infallible>,
    B: OutputPin<Error = Infallible>,
{
    fn set_indicator(&mut self, color: IndicatorState) {
        // Erst alle aus, dann die neue Farbe an: nie zwei Farben gleichzeitig
        drive(&mut self.red, false);
        drive(&mut self.green, false);
        drive(&mut self.blue, false);

        let lines = color.lines();
        if lines.r {
            drive(&mut self.red, true);
        }
        if lines.g {
            drive(&mut self.green, true);
        }
        if lines.b {
            drive(&mut self.blue, true);
        }
    }
}

// active-low
fn drive<P: OutputPin<Error = Infallible>>(pin: &mut P, on: bool) {
    let Ok(()) = pin.set_state((!on).into());
}
