//! Wire round trips for every known header kind

use rvoip_sip_headers::prelude::*;

/// Header lines already in canonical rendering order
const CANONICAL_LINES: &[&str] = &[
    "Accept: application/sdp, text/html;level=1;q=0.5",
    "Accept-Encoding: gzip;q=1, identity",
    "Accept-Language: da, en-gb;q=0.8, en;q=0.7",
    "Alert-Info: <http://www.example.com/sounds/moo.wav>",
    "Allow: INVITE, ACK, OPTIONS, CANCEL, BYE",
    "Allow-Events: presence, dialog",
    "Authentication-Info: nextnonce=\"47364c23432d2e131a5fb210812c\", qop=auth",
    "Authorization: Digest nonce=\"84a4cc6f3082121f32b42a2187831a9e\", realm=\"atlanta.com\", response=\"7587245234b3434cc3412213e5f113a5432\", uri=\"sip:bob@biloxi.com\", username=\"alice\"",
    "Call-ID: a84b4c76e66710@pc33.atlanta.com",
    "Call-Info: <http://wwww.example.com/alice/photo.jpg>;purpose=icon",
    "Contact: \"Mr. Watson\" <sip:watson@worcester.bell-telephone.com>;q=0.7;expires=3600",
    "Contact: *",
    "Content-Disposition: session;handling=required",
    "Content-Encoding: gzip",
    "Content-Language: fr, en",
    "Content-Length: 349",
    "Content-Type: application/sdp",
    "CSeq: 4711 INVITE",
    "Date: Sat, 13 Nov 2010 23:29:00 GMT",
    "Error-Info: <sip:not-in-service-recording@atlanta.com>",
    "Event: presence;id=1",
    "Expires: 7200",
    "From: \"Alice\" <sip:alice@atlanta.com>;tag=1928301774",
    "In-Reply-To: 70710@saturn.bell-tel.com, 17320@saturn.bell-tel.com",
    "Max-Forwards: 70",
    "MIME-Version: 1.0",
    "Min-Expires: 60",
    "Min-SE: 90",
    "Organization: Boxes by Bob",
    "Path: <sip:P3.EXAMPLEHOME.COM;lr>, <sip:P1.EXAMPLEVISITED.COM;lr>",
    "Priority: emergency",
    "Proxy-Authenticate: Digest nonce=\"f84f1cec41e6cbe5aea9c8e88d359\", realm=\"atlanta.com\"",
    "Proxy-Authorization: Digest realm=\"atlanta.com\", username=\"alice\"",
    "Proxy-Require: foo",
    "RAck: 776656 1 INVITE",
    "Reason: SIP;cause=200;text=\"Call completed elsewhere\"",
    "Record-Route: <sip:server10.biloxi.com;lr>, <sip:bigbox3.site3.atlanta.com;lr>",
    "Refer-To: <sip:bob@biloxi.com>",
    "Referred-By: <sip:alice@atlanta.com>;cid=\"20398823.2UWQFN309shb3@atlanta.com\"",
    "Reply-To: \"Bob\" <sip:bob@biloxi.com>",
    "Require: 100rel",
    "Retry-After: 18000 (in a meeting);duration=3600",
    "Route: <sip:bigbox3.site3.atlanta.com;lr>",
    "RSeq: 988789",
    "Server: HomeServer v2",
    "Session-Expires: 4000;refresher=uac",
    "SIP-ETag: dx200xyz",
    "SIP-If-Match: dx200xyz",
    "Subject: Need more boxes",
    "Subscription-State: active;expires=60",
    "Supported: 100rel, timer",
    "Timestamp: 54.5 1.25",
    "To: <sip:bob@biloxi.com>;tag=a6c85cf",
    "Unsupported: foo",
    "User-Agent: Softphone Beta1.5",
    "Via: SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bK776asdhds, SIP/2.0/TCP 192.0.2.4:5060;branch=z9hG4bKnashds8;received=192.0.2.1",
    "Warning: 307 isi.edu \"Session parameter 'foo' not understood\"",
    "WWW-Authenticate: Digest algorithm=MD5, nonce=\"84a4cc6f3082121f32b42a2187831a9e\", qop=\"auth\", realm=\"atlanta.com\"",
];

#[test]
fn test_every_kind_round_trips() {
    for line in CANONICAL_LINES {
        let header = parse_header(line).unwrap_or_else(|e| panic!("{}: {}", line, e));
        assert!(
            !header.name().is_other(),
            "{} parsed as an extension header",
            line
        );
        assert!(header.is_valid(), "{} is not valid", line);
        assert_eq!(&header.render(), line);

        let reparsed = parse_header(&header.render()).unwrap();
        assert_eq!(reparsed, header, "{} changed across a round trip", line);
    }
}

#[test]
fn test_every_known_name_is_covered() {
    let mut names: Vec<HeaderName> = CANONICAL_LINES
        .iter()
        .map(|line| parse_header(line).unwrap().name())
        .collect();
    names.dedup();
    assert_eq!(names.len(), 57);
}

#[test]
fn test_compact_rendering_round_trips() {
    for line in CANONICAL_LINES {
        let header = parse_header(line).unwrap();
        let compact = header.render_with(&RenderOptions::compact());
        if let Some(short) = header.name().compact_str() {
            assert!(compact.starts_with(&format!("{}: ", short)), "{}", compact);
        } else {
            assert_eq!(&compact, line);
        }
        assert_eq!(parse_header(&compact).unwrap(), header);
    }
}

#[test]
fn test_accept_language_scenario() {
    let input = "Accept-Language: da, en-gb;q=0.8, en;q=0.7";
    let header = parse_header(input).unwrap();
    assert_eq!(header.render(), input);

    let TypedHeader::AcceptLanguage(list) = &header else {
        panic!("expected Accept-Language, got {:?}", header);
    };
    assert_eq!(list.best_match(["en", "da"]), Some("da"));
}

#[test]
fn test_folded_extension_header_is_verbatim() {
    let header = parse_header("X-Custom: abc\r\n\tqwe").unwrap();
    assert_eq!(header.name(), HeaderName::Other("X-Custom".into()));
    assert_eq!(header.render_value(), "abc\r\n\tqwe");
    assert_eq!(header.render(), "X-Custom: abc\r\n\tqwe");
}

#[test]
fn test_noncanonical_input_normalizes() {
    let cases = [
        ("call-id: 1234@host", "Call-ID: 1234@host"),
        ("i: 1234@host", "Call-ID: 1234@host"),
        ("CONTENT-LENGTH:0", "Content-Length: 0"),
        (
            "f: Alice <sip:alice@atlanta.com> ;tag=88sja8x",
            "From: \"Alice\" <sip:alice@atlanta.com>;tag=88sja8x",
        ),
        (
            "t: sip:bob@biloxi.com;tag=x",
            "To: <sip:bob@biloxi.com>;tag=x",
        ),
        (
            "Contact: <sip:a@b>;expires=60;q=0.5",
            "Contact: <sip:a@b>;q=0.5;expires=60",
        ),
        ("Subscription-State: terminated;reason=timeout\r\n", "Subscription-State: terminated;reason=timeout"),
    ];
    for (input, expected) in cases {
        assert_eq!(parse_header(input).unwrap().render(), expected, "{}", input);
    }
}

#[test]
fn test_default_q_rendering() {
    let opts = RenderOptions {
        default_q: true,
        ..RenderOptions::default()
    };
    let header = parse_header("Accept-Encoding: gzip, identity;q=0.5").unwrap();
    assert_eq!(header.render_value_with(&opts), "gzip;q=1, identity;q=0.5");
    assert_eq!(header.render_value(), "gzip, identity;q=0.5");
}

/// Accept keeps parameters after the first `q` as accept-params, so a
/// `charset` placed after `q` is not part of the media range.
#[test]
fn test_accept_q_separator_quirk() {
    let header = parse_header("Accept: text/plain;q=0.9;charset=utf-8;format=flowed").unwrap();
    let TypedHeader::Accept(accept) = &header else {
        panic!("expected Accept");
    };
    let range = &accept.0[0];
    assert!(range.media_params.is_empty());
    assert_eq!(range.accept_params.len(), 3);
    assert_eq!(range.accept_params.last("format"), Some("flowed"));
    assert_eq!(
        header.render_value(),
        "text/plain;q=0.9;charset=utf-8;format=flowed"
    );
}

#[test]
fn test_equality_rules() {
    let eq = |a: &str, b: &str| parse_header(a).unwrap() == parse_header(b).unwrap();

    // tokens fold case, quoted strings do not
    assert!(eq("Supported: Timer", "Supported: timer"));
    assert!(eq("Event: presence;id=ABC", "Event: PRESENCE;id=abc"));
    assert!(!eq(
        "Reason: SIP;text=\"Busy\"",
        "Reason: SIP;text=\"busy\""
    ));

    // a special parameter present on one side only makes headers differ
    assert!(!eq("To: <sip:b@x>;tag=1", "To: <sip:b@x>"));
    // any other one-sided parameter is tolerated
    assert!(eq("To: <sip:b@x>;foo=1", "To: <sip:b@x>"));
    assert!(eq("To: <sip:b@x>", "To: <sip:b@x>;foo=1"));

    // display names do not take part
    assert!(eq("From: Alice <sip:a@x>", "From: <sip:a@x>"));
    // parameter order does not matter
    assert!(eq(
        "Via: SIP/2.0/UDP h;branch=z9hG4bK1;received=1.2.3.4",
        "Via: SIP/2.0/UDP h;received=1.2.3.4;branch=z9hG4bK1"
    ));
    assert!(eq("Timestamp: 54", "Timestamp: 54.0"));
}

#[test]
fn test_zero_padded_warn_code_round_trips() {
    let header = parse_header("Warning: 000 isi.edu \"x\"").unwrap();
    assert_eq!(header.render(), "Warning: 000 isi.edu \"x\"");
    assert_eq!(parse_header(&header.render()).unwrap(), header);
}

#[test]
fn test_parse_errors() {
    assert!(matches!(parse_header(""), Err(Error::EmptyInput)));
    assert!(matches!(parse_header("\r\n"), Err(Error::EmptyInput)));
    for bad in [
        "Max-Forwards: seventy",
        "CSeq: 1",
        "Via: SIP/2.0/UDP",
        "Content-Type: text",
        "Require:",
        "From: no uri here",
        "Warning: 30 isi.edu \"x\"",
        ": value",
    ] {
        assert!(
            matches!(parse_header(bad), Err(Error::MalformedInput(_))),
            "{} should be malformed",
            bad
        );
    }
}

#[test]
fn test_parse_headers_block() {
    let block = "Via: SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bK776asdhds\r\n\
                 Max-Forwards: 70\r\n\
                 Subject: lunch\r\n\
                 \ttomorrow\r\n\
                 \r\n";
    let headers = parse_headers(block).unwrap();
    assert_eq!(headers.len(), 3);
    assert_eq!(headers[2].name(), HeaderName::Subject);
    assert!(headers[2].is_valid());
    assert_eq!(headers[2].render_value(), "lunch tomorrow");
    assert_eq!(headers[2], parse_header("Subject: lunch tomorrow").unwrap());
}

#[test]
fn test_folded_values_survive_round_trips() {
    let lines = [
        (
            "From: Alice\r\n Smith <sip:alice@atlanta.com>;tag=1",
            "From: \"Alice Smith\" <sip:alice@atlanta.com>;tag=1",
        ),
        (
            "Contact: Bob \r\n\t Jones <sip:bob@biloxi.com>, <sip:bob@192.0.2.4>",
            "Contact: \"Bob Jones\" <sip:bob@biloxi.com>, <sip:bob@192.0.2.4>",
        ),
        ("Organization: Boxes\r\n by Bob", "Organization: Boxes by Bob"),
        ("User-Agent: Softphone\r\n\tBeta1.5", "User-Agent: Softphone Beta1.5"),
    ];
    for (folded, rendered) in lines {
        let header = parse_header(folded).unwrap();
        assert!(header.is_valid(), "{}", folded);
        assert_eq!(header.render(), rendered);

        let reparsed = parse_header(&header.render()).unwrap();
        assert_eq!(reparsed, header);
        assert_eq!(reparsed.render(), rendered);

        let bytes = to_json(Some(&header)).unwrap();
        assert_eq!(from_json(&bytes).unwrap(), Some(header));
    }
}
