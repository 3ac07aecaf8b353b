// StampBuilder field checks and the legacy DNSCrypt constructor.

#[cfg(test)]
mod tests {
    use dnsstamp_core::{prelude::*, stamp::parse_legacy_public_key};

    const PK1_COLONS: &str =
        "C3:84:6B:F2:4B:9E:93:CA:64:27:4C:0E:C6:7C:1E:CC:5E:02:4F:FC:AC:D2:D7:40:19:35:0E:81:FE:54:6A:E4";

    fn all_props() -> StampProps {
        StampProps::DNSSEC | StampProps::NO_LOG | StampProps::NO_FILTER
    }

// ## 1️⃣ Builder success paths

    #[test]
    fn builder_dnscrypt_matches_vector() {
        let key = parse_legacy_public_key(PK1_COLONS).unwrap();
        let s = StampBuilder::new(StampProtocol::DnsCrypt)
            .props(all_props())
            .address("127.0.0.1")
            .public_key(key.to_vec())
            .provider_name("2.dnscrypt-cert.localhost")
            .build_sdns()
            .unwrap();
        assert_eq!(
            s,
            "sdns://AQcAAAAAAAAACTEyNy4wLjAuMSDDhGvyS56TymQnTA7GfB7MXgJP_KzS10AZNQ6B_lRq5BkyLmRuc2NyeXB0LWNlcnQubG9jYWxob3N0"
        );
    }

    #[test]
    fn builder_doq_with_bootstrap() {
        let mut b = StampBuilder::new(StampProtocol::DoQ);
        b.enable(StampProps::DNSSEC)
            .enable(StampProps::NO_LOG)
            .address("9.9.9.9")
            .hostname("dns.quad9.net")
            .hash(vec![0x11u8; 32])
            .bootstrap_ips(["9.9.9.9", "149.112.112.112", "2620:fe::fe"]);

        let stamp = b.build().unwrap();
        assert_eq!(stamp.protocol(), StampProtocol::DoQ);
        assert_eq!(stamp.props(), StampProps::DNSSEC | StampProps::NO_LOG);
        assert_eq!(stamp.hashes().len(), 1);
        assert_eq!(stamp.bootstrap_ips().len(), 3);

        let decoded = Stamp::from_sdns(&stamp.to_sdns().unwrap()).unwrap();
        assert_eq!(decoded.server_address(), Some("9.9.9.9:853"));
    }

    #[test]
    fn builder_odoh_target_and_relay() {
        let target = StampBuilder::new(StampProtocol::ODoHTarget)
            .props(all_props())
            .hostname("odoh.example.com")
            .path("/target")
            .build_sdns()
            .unwrap();
        assert_eq!(target, "sdns://BQcAAAAAAAAAEG9kb2guZXhhbXBsZS5jb20HL3RhcmdldA");

        let relay = StampBuilder::new(StampProtocol::ODoHRelay)
            .props(all_props())
            .address("[::1]:1")
            .hashes([vec![0xABu8, 0xCD], vec![0x01u8, 0x23]])
            .hostname("doh.example.com")
            .path("/relay")
            .build_sdns()
            .unwrap();
        assert_eq!(relay, "sdns://hQcAAAAAAAAAB1s6OjFdOjGCq80CASMPZG9oLmV4YW1wbGUuY29tBi9yZWxheQ");
    }

    #[test]
    fn builder_doh_address_defaults_to_empty() {
        let stamp = StampBuilder::new(StampProtocol::DoH)
            .hostname("doh.example.com")
            .path("/dns-query")
            .build()
            .unwrap();
        assert_eq!(stamp.server_address(), Some(""));
    }

// ## 2️⃣ Builder failure paths

    fn field_of(err: StampError) -> &'static str {
        match err {
            StampError::InvalidField { field, .. } => field,
            other => panic!("expected InvalidField, got {:?}", other),
        }
    }

    #[test]
    fn dnscrypt_key_length_enforced() {
        for len in [0usize, 31, 33, 64] {
            let err = StampBuilder::new(StampProtocol::DnsCrypt)
                .address("127.0.0.1")
                .public_key(vec![0u8; len])
                .provider_name("2.dnscrypt-cert.localhost")
                .build()
                .unwrap_err();
            assert_eq!(field_of(err), "public key");
        }
    }

    #[test]
    fn required_fields_enforced() {
        let err = StampBuilder::new(StampProtocol::DoH).path("/dns-query").build().unwrap_err();
        assert_eq!(field_of(err), "hostname");

        let err = StampBuilder::new(StampProtocol::DoT).hostname("dns.quad9.net").build().unwrap_err();
        assert_eq!(field_of(err), "server address");

        let err = StampBuilder::new(StampProtocol::DnsCrypt)
            .address("127.0.0.1")
            .provider_name("2.dnscrypt-cert.localhost")
            .build()
            .unwrap_err();
        assert_eq!(field_of(err), "public key");

        let err = StampBuilder::new(StampProtocol::Plain).build().unwrap_err();
        assert_eq!(field_of(err), "server address");
    }

    #[test]
    fn foreign_fields_rejected() {
        let err = StampBuilder::new(StampProtocol::DoH)
            .hostname("doh.example.com")
            .public_key(vec![0u8; 32])
            .build()
            .unwrap_err();
        assert_eq!(field_of(err), "public key");

        let err = StampBuilder::new(StampProtocol::DnsCryptRelay)
            .address("51.15.70.167")
            .props(StampProps::NO_LOG)
            .build()
            .unwrap_err();
        assert_eq!(field_of(err), "properties");

        let err = StampBuilder::new(StampProtocol::ODoHTarget)
            .address("1.2.3.4")
            .hostname("odoh.example.com")
            .build()
            .unwrap_err();
        assert_eq!(field_of(err), "server address");

        let err = StampBuilder::new(StampProtocol::DoT)
            .address("9.9.9.9")
            .hostname("dns.quad9.net")
            .path("/nope")
            .build()
            .unwrap_err();
        assert_eq!(field_of(err), "path");

        let err = StampBuilder::new(StampProtocol::ODoHRelay)
            .hostname("doh.example.com")
            .bootstrap_ip("9.9.9.9")
            .build()
            .unwrap_err();
        assert_eq!(field_of(err), "bootstrap ips");

        let err = StampBuilder::new(StampProtocol::Plain)
            .address("8.8.8.8")
            .hash(vec![1u8, 2, 3])
            .build()
            .unwrap_err();
        assert_eq!(field_of(err), "hashes");
    }

// ## 3️⃣ Legacy DNSCrypt entries

    #[test]
    fn legacy_key_with_and_without_colons() {
        let a = parse_legacy_public_key(PK1_COLONS).unwrap();
        let b = parse_legacy_public_key(&PK1_COLONS.replace(':', "")).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[0], 0xC3);
        assert_eq!(a[31], 0xE4);
    }

    #[test]
    fn legacy_key_rejects_bad_input() {
        assert!(parse_legacy_public_key("zz").is_err());
        assert!(parse_legacy_public_key("C3:84").is_err());
    }

    #[test]
    fn legacy_bare_ip_gets_port_443() {
        let stamp = DnsCryptStamp::from_legacy(
            "212.47.228.136",
            PK1_COLONS,
            "2.dnscrypt-cert.fr.dnscrypt.org",
            StampProps::DNSSEC,
        )
        .unwrap();
        assert_eq!(stamp.address, "212.47.228.136:443");

        let v6 = DnsCryptStamp::from_legacy("2001:db8::53", PK1_COLONS, "2.dnscrypt-cert.x", StampProps::empty())
            .unwrap();
        assert_eq!(v6.address, "[2001:db8::53]:443");

        let explicit = DnsCryptStamp::from_legacy("1.2.3.4:5353", PK1_COLONS, "2.dnscrypt-cert.x", StampProps::empty())
            .unwrap();
        assert_eq!(explicit.address, "1.2.3.4:5353");
    }

    #[test]
    fn legacy_requires_address_and_provider() {
        let err = DnsCryptStamp::from_legacy("", PK1_COLONS, "2.dnscrypt-cert.x", StampProps::empty()).unwrap_err();
        assert_eq!(field_of(err), "server address");

        let err = DnsCryptStamp::from_legacy("1.2.3.4", PK1_COLONS, "", StampProps::empty()).unwrap_err();
        assert_eq!(field_of(err), "provider name");
    }

    #[test]
    fn legacy_stamp_roundtrips() {
        let stamp = Stamp::DnsCrypt(
            DnsCryptStamp::from_legacy("212.47.228.136", PK1_COLONS, "2.dnscrypt-cert.fr.dnscrypt.org", all_props())
                .unwrap(),
        );
        let s = stamp.to_sdns().unwrap();
        let decoded = Stamp::from_sdns(&s).unwrap();
        assert_eq!(decoded, stamp);
        assert_eq!(decoded.to_sdns().unwrap(), s);
    }
}
