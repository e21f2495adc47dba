//! Label vocabularies produced by the classifiers and consumed by the
//! evaluation engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Implements `as_str`, `Display` and `FromStr` over the kebab-case names
macro_rules! label_strings {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Canonical label string
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().replace('_', "-").as_str() {
                    $($name => Ok(Self::$variant),)+
                    other => Err(Error::InvalidInput(format!(
                        "Unknown {} label: {other}",
                        stringify!($ty)
                    ))),
                }
            }
        }
    };
}

/// Ground-truth transportation modes, the evaluation vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportMode {
    Walking,
    Cycling,
    Bus,
    Car,
    Train,
}

impl TransportMode {
    /// Every mode, in matrix order
    pub const ALL: [Self; 5] = [Self::Walking, Self::Cycling, Self::Bus, Self::Car, Self::Train];

    /// Row/column position in a confusion matrix
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Walking => 0,
            Self::Cycling => 1,
            Self::Bus => 2,
            Self::Car => 3,
            Self::Train => 4,
        }
    }
}

label_strings!(TransportMode {
    Walking => "walking",
    Cycling => "cycling",
    Bus => "bus",
    Car => "car",
    Train => "train",
});

/// Output of the speed-bucket classifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpeedMode {
    Walking,
    Cycling,
    BusOrCar,
    Train,
    Unknown,
}

impl SpeedMode {
    /// The matching evaluation mode, `None` for `BusOrCar` and `Unknown`
    #[must_use]
    pub fn transport_mode(self) -> Option<TransportMode> {
        match self {
            Self::Walking => Some(TransportMode::Walking),
            Self::Cycling => Some(TransportMode::Cycling),
            Self::Train => Some(TransportMode::Train),
            Self::BusOrCar | Self::Unknown => None,
        }
    }
}

label_strings!(SpeedMode {
    Walking => "walking",
    Cycling => "cycling",
    BusOrCar => "bus-or-car",
    Train => "train",
    Unknown => "unknown",
});

/// Output of the stop-pattern classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleMode {
    Bus,
    Car,
}

impl From<VehicleMode> for TransportMode {
    fn from(mode: VehicleMode) -> Self {
        match mode {
            VehicleMode::Bus => Self::Bus,
            VehicleMode::Car => Self::Car,
        }
    }
}

label_strings!(VehicleMode {
    Bus => "bus",
    Car => "car",
});

/// Output of the heading-change classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteKind {
    FixedRoute,
    VariableRoute,
    Uncertain,
}

label_strings!(RouteKind {
    FixedRoute => "fixed-route",
    VariableRoute => "variable-route",
    Uncertain => "uncertain",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_strings() {
        assert_eq!(SpeedMode::BusOrCar.to_string(), "bus-or-car");
        assert_eq!(RouteKind::FixedRoute.as_str(), "fixed-route");
        assert_eq!("Bus_Or_Car".parse::<SpeedMode>().unwrap(), SpeedMode::BusOrCar);
        assert_eq!(" train ".parse::<TransportMode>().unwrap(), TransportMode::Train);
        assert!("bus-or-car".parse::<TransportMode>().is_err());
    }

    #[test]
    fn test_matrix_indices_match_order() {
        for (i, mode) in TransportMode::ALL.iter().enumerate() {
            assert_eq!(mode.index(), i);
        }
    }

    #[test]
    fn test_serde_names_match_display() {
        let json = serde_json::to_string(&SpeedMode::BusOrCar).unwrap();
        assert_eq!(json, "\"bus-or-car\"");
        let mode: TransportMode = serde_json::from_str("\"cycling\"").unwrap();
        assert_eq!(mode, TransportMode::Cycling);
    }
}
