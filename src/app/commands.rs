//! Outbound commands to the inverter module (MI).
//!
//! The controller emits these as typed values; the link adapter on the
//! other side of [`InverterPort`](super::ports::InverterPort) turns them
//! into `(mnemonic, value)` pairs on the wire.

/// Command set understood by the inverter module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InverterCommand {
    /// Unit powered on.
    Start,
    /// Unit powered off — also sent when a drain cycle completes.
    Stop,
    /// Inverter output frequency setpoint (Hz).
    Velocidade(u8),
    /// Exhaust mode on/off.
    Exaustao(bool),
    /// Water pump on/off.
    Bomba(bool),
    /// Louvre swing on/off.
    Swing(bool),
    /// Request the start of a condensate drain cycle.
    SolicitarDreno,
}

impl InverterCommand {
    /// Wire mnemonic, as the inverter module expects it.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Stop => "STOP",
            Self::Velocidade(_) => "VELOCIDADE",
            Self::Exaustao(_) => "EXAUSTAO",
            Self::Bomba(_) => "BOMBA",
            Self::Swing(_) => "SWING",
            Self::SolicitarDreno => "SOLICITAR_DRENO",
        }
    }

    /// Wire value paired with the mnemonic.
    pub fn value(&self) -> i32 {
        match self {
            Self::Start | Self::SolicitarDreno => 1,
            Self::Stop => 0,
            Self::Velocidade(hz) => i32::from(*hz),
            Self::Exaustao(on) | Self::Bomba(on) | Self::Swing(on) => i32::from(*on),
        }
    }
}
