//! JSON envelope encoding and decoding

use rvoip_sip_headers::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct StoredDialog {
    call_id: TypedHeader,
    #[serde(with = "rvoip_sip_headers::json::lenient", default)]
    remote_target: Option<TypedHeader>,
}

#[test]
fn test_json_round_trip() {
    for line in [
        "From: \"Alice\" <sip:alice@atlanta.com>;tag=1928301774",
        "Via: SIP/2.0/TCP [2001:db8::1]:5061;branch=z9hG4bK74bf9",
        "Accept-Language: da, en-gb;q=0.8, en;q=0.7",
        "X-Custom: abc\r\n\tqwe",
        "Supported:",
    ] {
        let header = parse_header(line).unwrap();
        let bytes = to_json(Some(&header)).unwrap();
        let decoded = from_json(&bytes).unwrap().expect("header present");
        assert_eq!(decoded, header, "{}", line);
        assert_eq!(decoded.render(), header.render());
    }
}

#[test]
fn test_envelope_shape() {
    let header = parse_header("i: f81d4fae-7dec-11d0-a765-00a0c91e6bf6@foo.bar.com").unwrap();
    let value: serde_json::Value = serde_json::from_slice(&to_json(Some(&header)).unwrap()).unwrap();
    assert_eq!(value["name"], "Call-ID");
    assert_eq!(value["value"], "f81d4fae-7dec-11d0-a765-00a0c91e6bf6@foo.bar.com");
}

#[test]
fn test_malformed_json_is_an_error() {
    assert!(matches!(from_json(b"{not json"), Err(Error::Json(_))));
    assert!(matches!(from_json(b"42"), Err(Error::NotHeaderEnvelope(_))));
    assert!(matches!(
        from_json(br#"{"name":1,"value":"x"}"#),
        Err(Error::NotHeaderEnvelope(_))
    ));
    assert!(matches!(
        from_json(br#"{"name":"Max-Forwards","value":"many"}"#),
        Err(Error::MalformedInput(_))
    ));
}

#[test]
fn test_type_mismatch() {
    let to = parse_header("To: <sip:bob@biloxi.com>").unwrap();
    let bytes = to_json(Some(&to)).unwrap();
    let err = from_json_as(&bytes, &HeaderName::From).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unexpected header type: got To, expected From"
    );
    assert_eq!(from_json_as(&bytes, &HeaderName::To).unwrap(), Some(to));
    assert_eq!(from_json_as(b"null", &HeaderName::To).unwrap(), None);
}

#[test]
fn test_embedded_in_structs() {
    let dialog = StoredDialog {
        call_id: parse_header("Call-ID: 3848276298220188511@atlanta.example.com").unwrap(),
        remote_target: Some(parse_header("Contact: <sip:bob@192.0.2.4>").unwrap()),
    };
    let text = serde_json::to_string(&dialog).unwrap();
    let back: StoredDialog = serde_json::from_str(&text).unwrap();
    assert_eq!(back.call_id, dialog.call_id);
    assert_eq!(back.remote_target, dialog.remote_target);

    let legacy: StoredDialog = serde_json::from_str(
        r#"{"call_id":{"name":"Call-ID","value":"abc@host"},"remote_target":"sip:bob@192.0.2.4"}"#,
    )
    .unwrap();
    assert!(legacy.remote_target.is_none());

    let bad = serde_json::from_str::<StoredDialog>(r#"{"call_id":"abc@host"}"#);
    assert!(bad.is_err());
}
