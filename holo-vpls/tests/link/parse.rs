use const_addrs::{ip4, ip6};
use holo_utils::assert_eq_hex;
use holo_utils::mpls::Label;
use holo_vpls::error::{LabelDirection, TtlError};

use super::*;

static SCENARIO: Lazy<(Vec<&str>, VplsLink)> = Lazy::new(|| {
    (
        vec![
            "id", "42", "input", "100", "output", "200", "ttl", "64", "vlan",
            "5", "via", "10.0.0.1",
        ],
        VplsLink {
            id: Some(42),
            in_label: Some(Label::new(100)),
            out_label: Some(Label::new(200)),
            oif: None,
            ttl: Some(64),
            vlan_id: Some(5),
            nexthop: Some(NextHop::Ipv4(ip4!("10.0.0.1"))),
        },
    )
});

#[test]
fn test_parse_scenario() {
    let (ref args, ref link) = *SCENARIO;
    assert_eq!(parse(args).unwrap(), *link);
}

#[test]
fn test_encode_scenario() {
    let (ref args, _) = *SCENARIO;
    let expected = [
        rta(VplsAttr::Id, &42u32.to_ne_bytes()),
        rta(VplsAttr::InLabel, &100u32.to_ne_bytes()),
        rta(VplsAttr::OutLabel, &200u32.to_ne_bytes()),
        rta(VplsAttr::Ttl, &[64]),
        rta(VplsAttr::VlanId, &[5]),
        rta(VplsAttr::Nh, &[10, 0, 0, 1]),
    ]
    .concat();
    assert_eq_hex!(expected, encode(args));
}

#[test]
fn test_parse_labels() {
    for value in [0, 1, 16, 0x7FFFF, 1048575] {
        let value_str = value.to_string();
        let value_str = value_str.as_str();
        let link = parse(&["input", value_str, "output", value_str]).unwrap();
        assert_eq!(link.in_label, Some(Label::new(value)));
        assert_eq!(link.out_label, Some(Label::new(value)));

        let bytes = encode(&["input", value_str]);
        assert_eq_hex!(rta(VplsAttr::InLabel, &value.to_ne_bytes()), bytes);
    }
}

#[test]
fn test_parse_labels_out_of_range() {
    for value in ["1048576", "0x100000", "0x80000001", "4294967295"] {
        assert_eq!(
            parse(&["input", value]),
            Err(ParseError::InvalidLabel(
                LabelDirection::Input,
                value.to_owned()
            ))
        );
        assert_eq!(
            parse(&["output", value]),
            Err(ParseError::InvalidLabel(
                LabelDirection::Output,
                value.to_owned()
            ))
        );
    }

    let error = parse(&["id", "1", "output", "1048576"]).unwrap_err();
    assert_eq!(
        error.to_string(),
        "argument \"1048576\" is wrong: invalid output label"
    );
}

#[test]
fn test_parse_labels_malformed() {
    assert_eq!(
        parse(&["input", "label"]),
        Err(ParseError::InvalidLabel(
            LabelDirection::Input,
            "label".to_owned()
        ))
    );
    assert_eq!(
        parse(&["output", "4294967296"]),
        Err(ParseError::InvalidLabel(
            LabelDirection::Output,
            "4294967296".to_owned()
        ))
    );
}

#[test]
fn test_parse_ttl() {
    for ttl in [1u8, 64, 255] {
        let ttl_str = ttl.to_string();
        let link = parse(&["ttl", ttl_str.as_str()]).unwrap();
        assert_eq!(link.ttl, Some(ttl));
        assert_eq_hex!(
            rta(VplsAttr::Ttl, &[ttl]),
            encode(&["ttl", ttl_str.as_str()])
        );
    }

    assert_eq!(parse(&["hoplimit", "32"]).unwrap().ttl, Some(32));
    assert_eq!(parse(&["ttl", "inherit"]).unwrap().ttl, None);
    assert!(encode(&["ttl", "inherit"]).is_empty());
    assert_eq!(parse(&["ttl", "64", "ttl", "inherit"]).unwrap().ttl, None);
}

#[test]
fn test_parse_ttl_invalid() {
    assert_eq!(
        parse(&["ttl", "0"]),
        Err(ParseError::InvalidTtl("0".to_owned(), TtlError::Zero))
    );
    assert_eq!(
        parse(&["ttl", "256"]),
        Err(ParseError::InvalidTtl("256".to_owned(), TtlError::TooLarge))
    );
    assert_eq!(
        parse(&["ttl", "inherits"]),
        Err(ParseError::InvalidTtl(
            "inherits".to_owned(),
            TtlError::Malformed
        ))
    );

    let error = parse(&["ttl", "256"]).unwrap_err();
    assert_eq!(
        error.to_string(),
        "argument \"256\" is wrong: TTL must be <= 255"
    );
    let error = parse(&["ttl", "x"]).unwrap_err();
    assert_eq!(error.to_string(), "argument \"x\" is wrong: invalid TTL");
}

#[test]
fn test_parse_vlan() {
    for vlan_id in [0u8, 5, 255] {
        let vlan_str = vlan_id.to_string();
        let link = parse(&["vlan", vlan_str.as_str()]).unwrap();
        assert_eq!(link.vlan_id, Some(vlan_id));
        assert_eq_hex!(
            rta(VplsAttr::VlanId, &[vlan_id]),
            encode(&["vlan", vlan_str.as_str()])
        );
    }

    assert_eq!(
        parse(&["vlan", "256"]),
        Err(ParseError::InvalidVlan("256".to_owned()))
    );
    assert_eq!(
        parse(&["vlan", "-1"]),
        Err(ParseError::InvalidVlan("-1".to_owned()))
    );
}

#[test]
fn test_parse_id() {
    assert_eq!(parse(&["id", "0"]).unwrap().id, Some(0));
    assert_eq!(parse(&["id", "16777215"]).unwrap().id, Some(16777215));
    // Values beyond 24 bits are accepted.
    assert_eq!(parse(&["id", "4294967295"]).unwrap().id, Some(u32::MAX));
    assert_eq!(
        parse(&["id", "4294967296"]),
        Err(ParseError::InvalidId("4294967296".to_owned()))
    );
    assert_eq!(
        parse(&["id", "forty-two"]),
        Err(ParseError::InvalidId("forty-two".to_owned()))
    );
    assert_eq!(parse(&["id", "1", "id", "2"]).unwrap().id, Some(2));
}

#[test]
fn test_parse_numeric_radix() {
    assert_eq!(parse(&["id", "0x2a"]).unwrap().id, Some(42));
    assert_eq!(parse(&["id", "052"]).unwrap().id, Some(42));
    assert_eq!(parse(&["vlan", "0xff"]).unwrap().vlan_id, Some(255));
    assert_eq!(
        parse(&["input", "0xFFFFF"]).unwrap().in_label,
        Some(Label::new(1048575))
    );
}

#[test]
fn test_parse_nexthop_priority() {
    let link = parse(&["via", "10.0.0.1", "via", "2001:db8::1"]).unwrap();
    assert_eq!(link.nexthop, Some(NextHop::Ipv4(ip4!("10.0.0.1"))));

    let link = parse(&["via", "2001:db8::1", "via", "10.0.0.1"]).unwrap();
    assert_eq!(link.nexthop, Some(NextHop::Ipv4(ip4!("10.0.0.1"))));

    let bytes = encode(&["via", "2001:db8::1", "via", "10.0.0.1"]);
    assert_eq_hex!(rta(VplsAttr::Nh, &[10, 0, 0, 1]), bytes);
}

#[test]
fn test_parse_nexthop_ipv6() {
    let link = parse(&["via", "2001:db8::1"]).unwrap();
    let addr = ip6!("2001:db8::1");
    assert_eq!(link.nexthop, Some(NextHop::Ipv6(addr)));
    assert_eq_hex!(
        rta(VplsAttr::Nh6, &addr.octets()),
        encode(&["via", "2001:db8::1"])
    );
}

#[test]
fn test_parse_nexthop_last_wins() {
    let link = parse(&["via", "10.0.0.1", "via", "10.0.0.2"]).unwrap();
    assert_eq!(link.nexthop, Some(NextHop::Ipv4(ip4!("10.0.0.2"))));
}

#[test]
fn test_parse_nexthop_unspecified() {
    assert_eq!(parse(&["via", "::"]).unwrap().nexthop, None);
    assert!(encode(&["via", "::"]).is_empty());
    assert_eq!(parse(&["via", "0.0.0.0"]).unwrap().nexthop, None);

    // An unspecified IPv4 next-hop doesn't hide the IPv6 one.
    let link = parse(&["via", "0.0.0.0", "via", "2001:db8::1"]).unwrap();
    assert_eq!(link.nexthop, Some(NextHop::Ipv6(ip6!("2001:db8::1"))));
}

#[test]
fn test_parse_nexthop_invalid() {
    for addr in ["10.0.0", "10.0.0.256", "2001:db8::g", "gateway"] {
        assert_eq!(
            parse(&["via", addr]),
            Err(ParseError::InvalidAddress(addr.to_owned()))
        );
    }
}

#[test]
fn test_parse_dev() {
    let link = parse(&["dev", "eth1"]).unwrap();
    assert_eq!(link.oif, Some(3));
    assert_eq_hex!(
        rta(VplsAttr::Oif, &3u32.to_ne_bytes()),
        encode(&["dev", "eth1"])
    );

    assert_eq!(
        parse(&["dev", "eth9"]),
        Err(ParseError::InvalidDevice("eth9".to_owned()))
    );
}

#[test]
fn test_parse_unknown_option() {
    assert_eq!(
        parse(&["id", "1", "frobnicate"]),
        Err(ParseError::UnknownOption("frobnicate".to_owned()))
    );
    assert_eq!(
        parse(&[""]),
        Err(ParseError::UnknownOption("".to_owned()))
    );

    let error = parse(&["frobnicate"]).unwrap_err();
    assert_eq!(error.to_string(), "vpls: unknown command \"frobnicate\"?");
}

#[test]
fn test_parse_help() {
    assert_eq!(parse(&["help"]), Err(ParseError::HelpRequested));
    assert_eq!(parse(&["id", "1", "he"]), Err(ParseError::HelpRequested));
    // The first error wins.
    assert_eq!(
        parse(&["id", "x", "help"]),
        Err(ParseError::InvalidId("x".to_owned()))
    );
}

#[test]
fn test_parse_incomplete() {
    assert_eq!(parse(&["id"]), Err(ParseError::IncompleteCommand("id")));
    assert_eq!(
        parse(&["id", "1", "hoplimit"]),
        Err(ParseError::IncompleteCommand("ttl"))
    );
}

#[test]
fn test_parse_abbreviations() {
    let link = parse(&[
        "i", "7", "in", "16", "o", "17", "v", "10.0.0.1", "vl", "9", "d",
        "eth0", "t", "3", "h", "4",
    ])
    .unwrap();
    assert_eq!(
        link,
        VplsLink {
            id: Some(7),
            in_label: Some(Label::new(16)),
            out_label: Some(Label::new(17)),
            oif: Some(2),
            ttl: Some(4),
            vlan_id: Some(9),
            nexthop: Some(NextHop::Ipv4(ip4!("10.0.0.1"))),
        }
    );
}

#[test]
fn test_parse_empty() {
    assert_eq!(parse(&[]).unwrap(), VplsLink::default());
    assert!(encode(&[]).is_empty());
}
