use sweepcore::decode::Security;

/// Everything needed to fabricate one network's beacon on the wire.
#[derive(Debug, Clone)]
pub struct BeaconTemplate {
    pub bssid: [u8; 6],
    pub ssid: String,
    pub hidden: bool,
    pub channel: u8,
    pub security: Security,
    pub wps: bool,
}

fn push_element(out: &mut Vec<u8>, id: u8, data: &[u8]) {
    out.push(id);
    out.push(data.len() as u8);
    out.extend_from_slice(data);
}

fn rsn_element(akm_type: u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(20);
    data.extend_from_slice(&[0x01, 0x00]); // version
    data.extend_from_slice(&[0x00, 0x0f, 0xac, 0x04]); // group cipher CCMP
    data.extend_from_slice(&[0x01, 0x00]); // pairwise count
    data.extend_from_slice(&[0x00, 0x0f, 0xac, 0x04]); // pairwise CCMP
    data.extend_from_slice(&[0x01, 0x00]); // akm count
    data.extend_from_slice(&[0x00, 0x0f, 0xac, akm_type]);
    data
}

/// Serializes a template into valid beacon frame bytes.
pub fn build_beacon(template: &BeaconTemplate) -> Vec<u8> {
    let mut out = Vec::with_capacity(128);

    // Frame control: management / beacon.
    out.extend_from_slice(&[0x80, 0x00]);
    out.extend_from_slice(&[0x00, 0x00]); // duration
    out.extend_from_slice(&[0xff; 6]); // destination: broadcast
    out.extend_from_slice(&template.bssid); // source
    out.extend_from_slice(&template.bssid); // bssid
    out.extend_from_slice(&[0x00, 0x00]); // sequence control

    out.extend_from_slice(&[0x00; 8]); // timestamp
    out.extend_from_slice(&[0x64, 0x00]); // beacon interval, 100 TU

    let mut capability: u16 = 0x0001; // ESS
    if template.security != Security::Open {
        capability |= 1 << 4; // privacy
    }
    out.extend_from_slice(&capability.to_le_bytes());

    if template.hidden {
        push_element(&mut out, 0, &[]);
    } else {
        push_element(&mut out, 0, template.ssid.as_bytes());
    }
    push_element(&mut out, 3, &[template.channel]);

    match template.security {
        Security::Wpa2 => push_element(&mut out, 48, &rsn_element(0x02)),
        Security::Wpa3 => push_element(&mut out, 48, &rsn_element(0x08)),
        Security::Enterprise => push_element(&mut out, 48, &rsn_element(0x01)),
        Security::Wpa => {
            push_element(&mut out, 221, &[0x00, 0x50, 0xf2, 0x01, 0x01, 0x00]);
        }
        // WEP and open show up through the capability bit alone.
        Security::Wep | Security::Open | Security::Unknown => {}
    }

    if template.wps {
        push_element(&mut out, 221, &[0x00, 0x50, 0xf2, 0x04, 0x10, 0x4a]);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beacon_layout_places_bssid_at_third_address() {
        let template = BeaconTemplate {
            bssid: [1, 2, 3, 4, 5, 6],
            ssid: "x".to_string(),
            hidden: false,
            channel: 11,
            security: Security::Open,
            wps: false,
        };
        let bytes = build_beacon(&template);
        assert_eq!(bytes[0], 0x80);
        assert_eq!(&bytes[16..22], &[1, 2, 3, 4, 5, 6]);
        // SSID element directly after the fixed parameters.
        assert_eq!(bytes[36], 0);
        assert_eq!(bytes[37], 1);
        assert_eq!(bytes[38], b'x');
    }

    #[test]
    fn hidden_template_emits_zero_length_ssid_element() {
        let template = BeaconTemplate {
            bssid: [9; 6],
            ssid: "ignored".to_string(),
            hidden: true,
            channel: 1,
            security: Security::Open,
            wps: false,
        };
        let bytes = build_beacon(&template);
        assert_eq!(bytes[36], 0);
        assert_eq!(bytes[37], 0);
        // Next element is the DS parameter set.
        assert_eq!(bytes[38], 3);
    }
}
