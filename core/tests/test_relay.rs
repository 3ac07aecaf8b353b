// Relay + server pairs: split, role checks, re-encoding.

#[cfg(test)]
mod tests {
    use dnsstamp_core::prelude::*;

    const ODOH_RELAY: &str = "hQcAAAAAAAAAB1s6OjFdOjGCq80CASMPZG9oLmV4YW1wbGUuY29tBi9yZWxheQ";
    const ODOH_TARGET: &str = "BQcAAAAAAAAAEG9kb2guZXhhbXBsZS5jb20HL3RhcmdldA";
    const DNSCRYPT_RELAY: &str = "gQw1MS4xNS43MC4xNjc";
    const DNSCRYPT_SERVER: &str =
        "AQcAAAAAAAAACTEyNy4wLjAuMSDDhGvyS56TymQnTA7GfB7MXgJP_KzS10AZNQ6B_lRq5BkyLmRuc2NyeXB0LWNlcnQubG9jYWxob3N0";

    fn pair(relay: &str, server: &str) -> String {
        format!("sdns://{}/{}", relay, server)
    }

    fn assert_malformed(s: &str) {
        let err = RelayAndServerStamp::from_sdns(s).unwrap_err();
        assert!(matches!(err, StampError::MalformedPair { .. }), "{:?} -> {:?}", s, err);
    }

// ## 1️⃣ Decoding valid pairs

    #[test]
    fn odoh_pair_decodes_and_reencodes() {
        let s = pair(ODOH_RELAY, ODOH_TARGET);
        let p = RelayAndServerStamp::from_sdns(&s).unwrap();

        assert_eq!(p.relay.protocol(), StampProtocol::ODoHRelay);
        assert_eq!(p.server.protocol(), StampProtocol::ODoHTarget);
        match &p.relay {
            Stamp::ODoHRelay(r) => {
                assert_eq!(r.address, "[::1]:1");
                assert_eq!(r.hashes, vec![vec![0xABu8, 0xCD], vec![0x01u8, 0x23]]);
                assert_eq!(r.hostname, "doh.example.com");
                assert_eq!(r.path, "/relay");
            }
            other => panic!("unexpected relay {:?}", other),
        }
        match &p.server {
            Stamp::ODoHTarget(t) => {
                assert_eq!(t.hostname, "odoh.example.com");
                assert_eq!(t.path, "/target");
            }
            other => panic!("unexpected server {:?}", other),
        }

        assert_eq!(p.to_sdns().unwrap(), s);
    }

    #[test]
    fn dnscrypt_pair_injects_relay_default_port() {
        let s = pair(DNSCRYPT_RELAY, DNSCRYPT_SERVER);
        let p: RelayAndServerStamp = s.parse().unwrap();

        assert_eq!(p.relay.server_address(), Some("51.15.70.167:443"));
        assert_eq!(p.relay.props(), StampProps::empty());
        assert_eq!(p.server.provider_name(), Some("2.dnscrypt-cert.localhost"));
        assert_eq!(p.to_sdns().unwrap(), s);
    }

    #[test]
    fn server_half_may_repeat_scheme() {
        let with_scheme = format!("sdns://{}/sdns://{}", ODOH_RELAY, ODOH_TARGET);
        let p = RelayAndServerStamp::from_sdns(&with_scheme).unwrap();
        let plain = RelayAndServerStamp::from_sdns(&pair(ODOH_RELAY, ODOH_TARGET)).unwrap();
        assert_eq!(p, plain);
        assert_eq!(p.to_sdns().unwrap(), pair(ODOH_RELAY, ODOH_TARGET));
    }

    #[test]
    fn new_then_encode_matches_parse() {
        let relay = Stamp::from_sdns(&format!("sdns://{}", ODOH_RELAY)).unwrap();
        let server = Stamp::from_sdns(&format!("sdns://{}", ODOH_TARGET)).unwrap();
        let p = RelayAndServerStamp::new(relay, server).unwrap();
        assert_eq!(p.to_sdns().unwrap(), pair(ODOH_RELAY, ODOH_TARGET));
    }

// ## 2️⃣ Rejections

    #[test]
    fn missing_scheme_is_malformed() {
        assert_malformed(&format!("{}/{}", ODOH_RELAY, ODOH_TARGET));
        assert_malformed(&format!("https://{}/{}", ODOH_RELAY, ODOH_TARGET));
    }

    #[test]
    fn single_stamp_is_not_a_pair() {
        assert_malformed(&format!("sdns://{}", ODOH_TARGET));
    }

    #[test]
    fn swapped_roles_rejected() {
        assert_malformed(&pair(ODOH_TARGET, ODOH_RELAY));
        assert_malformed(&pair(DNSCRYPT_SERVER, DNSCRYPT_RELAY));
    }

    #[test]
    fn two_relays_rejected() {
        assert_malformed(&pair(DNSCRYPT_RELAY, ODOH_RELAY));
    }

    #[test]
    fn extra_separator_rejected() {
        assert_malformed(&format!("sdns://{}/{}/{}", ODOH_RELAY, ODOH_TARGET, ODOH_TARGET));
    }

    #[test]
    fn garbage_halves_rejected() {
        assert_malformed(&pair("!!!", ODOH_TARGET));
        assert_malformed(&pair(ODOH_RELAY, "!!!"));
        // valid base64, but the record is truncated
        assert_malformed(&pair(ODOH_RELAY, "AAAA"));
        assert_malformed(&pair("", ODOH_TARGET));
        assert_malformed(&pair(ODOH_RELAY, ""));
    }

    #[test]
    fn new_checks_roles() {
        let relay = Stamp::from_sdns(&format!("sdns://{}", DNSCRYPT_RELAY)).unwrap();
        let server = Stamp::from_sdns(&format!("sdns://{}", DNSCRYPT_SERVER)).unwrap();

        assert!(RelayAndServerStamp::new(relay.clone(), server.clone()).is_ok());
        assert!(matches!(
            RelayAndServerStamp::new(server.clone(), relay.clone()),
            Err(StampError::MalformedPair { .. })
        ));
        assert!(matches!(
            RelayAndServerStamp::new(relay.clone(), relay),
            Err(StampError::MalformedPair { .. })
        ));
    }
}
