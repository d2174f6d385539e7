use serde::{Deserialize, Serialize};

/// Security classification advertised by an access point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Security {
    Open,
    Wep,
    Wpa,
    Wpa2,
    Wpa3,
    Enterprise,
    Unknown,
}

impl Security {
    pub fn label(&self) -> &'static str {
        match self {
            Security::Open => "open",
            Security::Wep => "WEP",
            Security::Wpa => "WPA",
            Security::Wpa2 => "WPA2",
            Security::Wpa3 => "WPA3",
            Security::Enterprise => "EAP",
            Security::Unknown => "?",
        }
    }
}

/// Management frame subtypes the pipeline cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagementSubtype {
    Beacon,
    ProbeRequest,
    ProbeResponse,
    Other(u8),
}

/// Classified frame produced by the first decode step: subtype plus the
/// management body following the MAC header.
#[derive(Debug)]
pub struct ParsedFrame<'a> {
    pub subtype: ManagementSubtype,
    pub bssid: [u8; 6],
    pub body: &'a [u8],
}

/// Fully decoded beacon contents.
///
/// A hidden network still carries an SSID element on the air; `hidden_ssid`
/// marks the name as suppressed rather than absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeaconRecord {
    pub bssid: [u8; 6],
    pub ssid: String,
    pub hidden_ssid: bool,
    pub channel: u8,
    pub security: Security,
    pub wps: bool,
}

#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("frame truncated: {0}")]
    Truncated(&'static str),
    #[error("not a beacon frame")]
    NotBeacon,
    #[error("malformed element: {0}")]
    Malformed(String),
}

/// External 802.11 decoder boundary.
///
/// `decode_frame` classifies raw capture bytes; `parse_beacon` extracts the
/// advertised network attributes from a classified frame. Implementations
/// must not retain the input slices.
pub trait BeaconDecoder: Send {
    fn decode_frame<'a>(&self, bytes: &'a [u8]) -> Result<ParsedFrame<'a>, DecodeError>;
    fn parse_beacon(&self, frame: &ParsedFrame<'_>) -> Result<BeaconRecord, DecodeError>;
}
