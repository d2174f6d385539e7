use sweepcore::decode::{
    BeaconDecoder, BeaconRecord, DecodeError, ManagementSubtype, ParsedFrame, Security,
};

const MAC_HEADER_LEN: usize = 24;
const FIXED_PARAMS_LEN: usize = 12;

const ELEMENT_SSID: u8 = 0;
const ELEMENT_DS_PARAMS: u8 = 3;
const ELEMENT_RSN: u8 = 48;
const ELEMENT_VENDOR: u8 = 221;

const CAPABILITY_PRIVACY: u16 = 1 << 4;

const MICROSOFT_OUI: [u8; 3] = [0x00, 0x50, 0xf2];
const VENDOR_TYPE_WPA: u8 = 1;
const VENDOR_TYPE_WPS: u8 = 4;

const AKM_EAP: u8 = 1;
const AKM_PSK: u8 = 2;
const AKM_SAE: u8 = 8;

/// Beacon decoder over the standard management frame wire layout.
///
/// Stands in for the external 802.11 parsing library the embedded build
/// links against; the survey core consumes it only through the
/// `BeaconDecoder` trait.
#[derive(Debug, Default)]
pub struct AirframeDecoder;

impl AirframeDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl BeaconDecoder for AirframeDecoder {
    fn decode_frame<'a>(&self, bytes: &'a [u8]) -> Result<ParsedFrame<'a>, DecodeError> {
        if bytes.len() < MAC_HEADER_LEN {
            return Err(DecodeError::Truncated("mac header"));
        }

        let frame_control = bytes[0];
        if frame_control & 0x03 != 0 {
            return Err(DecodeError::Malformed("unknown protocol version".into()));
        }
        if (frame_control >> 2) & 0x03 != 0 {
            return Err(DecodeError::Malformed("not a management frame".into()));
        }

        let subtype = match frame_control >> 4 {
            8 => ManagementSubtype::Beacon,
            4 => ManagementSubtype::ProbeRequest,
            5 => ManagementSubtype::ProbeResponse,
            other => ManagementSubtype::Other(other),
        };

        // Third address field carries the BSSID for management frames.
        let mut bssid = [0u8; 6];
        bssid.copy_from_slice(&bytes[16..22]);

        Ok(ParsedFrame {
            subtype,
            bssid,
            body: &bytes[MAC_HEADER_LEN..],
        })
    }

    fn parse_beacon(&self, frame: &ParsedFrame<'_>) -> Result<BeaconRecord, DecodeError> {
        if frame.subtype != ManagementSubtype::Beacon {
            return Err(DecodeError::NotBeacon);
        }
        if frame.body.len() < FIXED_PARAMS_LEN {
            return Err(DecodeError::Truncated("beacon fixed parameters"));
        }

        let capability = u16::from_le_bytes([frame.body[10], frame.body[11]]);
        let privacy = capability & CAPABILITY_PRIVACY != 0;

        let mut ssid: Option<String> = None;
        let mut hidden = false;
        let mut channel = 0u8;
        let mut rsn_security: Option<Security> = None;
        let mut wpa_vendor = false;
        let mut wps = false;

        let mut elements = &frame.body[FIXED_PARAMS_LEN..];
        while !elements.is_empty() {
            if elements.len() < 2 {
                return Err(DecodeError::Truncated("tagged element header"));
            }
            let id = elements[0];
            let len = elements[1] as usize;
            if elements.len() < 2 + len {
                return Err(DecodeError::Truncated("tagged element body"));
            }
            let data = &elements[2..2 + len];

            match id {
                ELEMENT_SSID => {
                    // Hidden networks ship the element with zero length or
                    // all NUL bytes; the name exists but is suppressed.
                    if data.is_empty() || data.iter().all(|&b| b == 0) {
                        hidden = true;
                        ssid = Some(String::new());
                    } else {
                        ssid = Some(String::from_utf8_lossy(data).into_owned());
                    }
                }
                ELEMENT_DS_PARAMS => {
                    if let Some(&ch) = data.first() {
                        channel = ch;
                    }
                }
                ELEMENT_RSN => {
                    rsn_security = Some(classify_rsn(data));
                }
                ELEMENT_VENDOR => {
                    if data.len() >= 4 && data[..3] == MICROSOFT_OUI {
                        match data[3] {
                            VENDOR_TYPE_WPA => wpa_vendor = true,
                            VENDOR_TYPE_WPS => wps = true,
                            _ => {}
                        }
                    }
                }
                _ => {}
            }
            elements = &elements[2 + len..];
        }

        let ssid = ssid.ok_or_else(|| DecodeError::Malformed("missing ssid element".into()))?;

        let security = match rsn_security {
            Some(security) => security,
            None if wpa_vendor => Security::Wpa,
            None if privacy => Security::Wep,
            None => Security::Open,
        };

        Ok(BeaconRecord {
            bssid: frame.bssid,
            ssid,
            hidden_ssid: hidden,
            channel,
            security,
            wps,
        })
    }
}

/// Classifies an RSN element by its first AKM suite. Short or odd RSN data
/// stays `Unknown` rather than failing the whole beacon.
fn classify_rsn(data: &[u8]) -> Security {
    // version(2) + group cipher(4) + pairwise count(2) + suites(4n)
    if data.len() < 8 {
        return Security::Unknown;
    }
    let pairwise_count = u16::from_le_bytes([data[6], data[7]]) as usize;
    let akm_offset = 8 + pairwise_count * 4;
    if data.len() < akm_offset + 2 {
        return Security::Unknown;
    }
    let akm_count = u16::from_le_bytes([data[akm_offset], data[akm_offset + 1]]) as usize;
    if akm_count == 0 || data.len() < akm_offset + 2 + 4 {
        return Security::Unknown;
    }
    let suite = &data[akm_offset + 2..akm_offset + 6];
    match suite[3] {
        AKM_EAP => Security::Enterprise,
        AKM_PSK => Security::Wpa2,
        AKM_SAE => Security::Wpa3,
        _ => Security::Wpa2,
    }
}
