//! Battle plan enums and action types as they appear on the wire.
//!
//! Tactic and target fields are strings on the wire and the server is free
//! to add new values. Each enum keeps an `Unrecognized` variant holding the
//! raw string so a record from a newer server still loads and re-serializes
//! unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! wire_string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident (default $default:ident) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $wire:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
            /// A value this build does not know, kept verbatim.
            Unrecognized(String),
        }

        impl $name {
            /// The wire string for this value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Unrecognized(raw) => raw,
                }
            }

            /// Whether this is one of the known values.
            #[must_use]
            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Unrecognized(_))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                match raw.as_str() {
                    $($wire => Self::$variant,)+
                    _ => Self::Unrecognized(raw),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Unrecognized(raw) => raw,
                    known => known.as_str().to_owned(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_string_enum! {
    /// How a token behaves once battle is joined.
    pub enum BattleTactic (default MaximizeDamage) {
        /// Leave the battle at the first opportunity.
        Disengage => "Disengage",
        /// Leave only if fired upon.
        DisengageIfChallenged => "DisengageIfChallenged",
        /// Keep out of enemy range where possible.
        MinimizeDamageToSelf => "MinimizeDamageToSelf",
        /// Maximize damage dealt minus damage taken.
        MaximizeNetDamage => "MaximizeNetDamage",
        /// Maximize the ratio of damage dealt to damage taken.
        MaximizeDamageRatio => "MaximizeDamageRatio",
        /// Maximize damage dealt.
        MaximizeDamage => "MaximizeDamage",
    }
}

wire_string_enum! {
    /// What kind of enemy a token prefers to fire upon.
    pub enum BattleTarget (default None) {
        /// No preference. Serialized as the empty string.
        None => "",
        /// Any enemy.
        Any => "Any",
        /// Starbases.
        Starbase => "Starbase",
        /// Armed ships.
        ArmedShips => "ArmedShips",
        /// Bombers and freighters.
        BombersFreighters => "BombersFreighters",
        /// Unarmed ships.
        UnarmedShips => "UnarmedShips",
        /// Fuel transports.
        FuelTransports => "FuelTransports",
        /// Freighters.
        Freighters => "Freighters",
    }
}

wire_string_enum! {
    /// Which players a token treats as hostile.
    pub enum BattleAttackWho (default Enemies) {
        /// Declared enemies only.
        Enemies => "Enemies",
        /// Enemies and neutral players.
        EnemiesAndNeutrals => "EnemiesAndNeutrals",
        /// Everyone but the owner.
        Everyone => "Everyone",
    }
}

/// Kind of a logged battle action. Numeric on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum TokenActionType {
    /// Generic weapons fire.
    Fire,
    /// Beam weapon fire.
    BeamFire,
    /// Torpedo salvo.
    TorpedoFire,
    /// Token moved on the board.
    Move,
    /// Token fled the battle.
    RanAway,
    /// A type code this build does not know.
    Other(u8),
}

impl TokenActionType {
    /// Whether the action changes the token's board position.
    #[must_use]
    pub const fn is_move(self) -> bool {
        matches!(self, Self::Move)
    }
}

impl From<u8> for TokenActionType {
    fn from(code: u8) -> Self {
        match code {
            0 => Self::Fire,
            1 => Self::BeamFire,
            2 => Self::TorpedoFire,
            3 => Self::Move,
            4 => Self::RanAway,
            other => Self::Other(other),
        }
    }
}

impl From<TokenActionType> for u8 {
    fn from(kind: TokenActionType) -> Self {
        match kind {
            TokenActionType::Fire => 0,
            TokenActionType::BeamFire => 1,
            TokenActionType::TorpedoFire => 2,
            TokenActionType::Move => 3,
            TokenActionType::RanAway => 4,
            TokenActionType::Other(code) => code,
        }
    }
}

impl fmt::Display for TokenActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fire => f.write_str("Fire"),
            Self::BeamFire => f.write_str("BeamFire"),
            Self::TorpedoFire => f.write_str("TorpedoFire"),
            Self::Move => f.write_str("Move"),
            Self::RanAway => f.write_str("RanAway"),
            Self::Other(code) => write!(f, "Other({code})"),
        }
    }
}
