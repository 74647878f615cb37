//! Radio Session Configurator
//!
//! Einmalige Konfiguration des Radios als ESB-Empfänger. Jeder Schritt
//! bricht beim ersten Fehler ab, es gibt keinen Retry. Ein halb
//! konfiguriertes Radio geht nie in den Empfangsmodus.

use crate::error::{ConfigError, ConfigStep};
use crate::traits::RadioSubsystem;
use crate::types::{BaseAddressSlot, RadioConfig};

/// Konfiguriert das Radio und registriert `handler` als Event-Empfänger
///
/// Ablauf: `init` → Basis-Adresse 0 → Basis-Adresse 1 → Prefix-Tabelle.
/// Der Empfang wird hier NICHT gestartet.
pub fn configure<R: RadioSubsystem>(radio: &mut R, handler: R::Handler) -> Result<(), ConfigError> {
    let config = RadioConfig::receiver();

    radio
        .init(&config, handler)
        .map_err(|e| ConfigError::new(ConfigStep::Init, e))?;

    radio
        .set_base_address(BaseAddressSlot::Zero, config.base_address_0)
        .map_err(|e| ConfigError::new(ConfigStep::BaseAddress0, e))?;

    radio
        .set_base_address(BaseAddressSlot::One, config.base_address_1)
        .map_err(|e| ConfigError::new(ConfigStep::BaseAddress1, e))?;

    radio
        .set_prefixes(&config.prefixes)
        .map_err(|e| ConfigError::new(ConfigStep::Prefixes, e))?;

    info!(
        "ESB configured: channel {}, {} byte payload",
        config.rf_channel,
        config.payload_length
    );
    Ok(())
}

/// Wie [`configure`], startet danach den kontinuierlichen Empfang
pub fn configure_and_start<R: RadioSubsystem>(
    radio: &mut R,
    handler: R::Handler,
) -> Result<(), ConfigError> {
    configure(radio, handler)?;

    radio
        .start_receive()
        .map_err(|e| ConfigError::new(ConfigStep::StartReceive, e))
}
