use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn hex_decoding() {
    assert_eq!(
        decode_base(b"48656C6C6F", Base::Sixteen, None).as_deref(),
        Some(&b"Hello"[..])
    );
    assert_eq!(
        decode_base(b"48 65\n6c 6c 6f}", Base::Sixteen, Some(b'}')).as_deref(),
        Some(&b"Hello"[..])
    );
    assert_eq!(decode_base(b"", Base::Sixteen, None), Some(vec![]));
}

#[test]
fn hex_rejects() {
    assert_eq!(decode_base(b"ABC", Base::Sixteen, None), None);
    assert_eq!(decode_base(b"AG", Base::Sixteen, None), None);
}

#[test]
fn delimiter_stops_decoding() {
    assert_eq!(
        decode_base(b"FF} trailing", Base::Sixteen, Some(b'}')),
        Some(vec![0xFF])
    );
}

#[test]
fn bit_decoding() {
    assert_eq!(
        decode_base(b"01000001 01000010", Base::Two, None),
        Some(b"AB".to_vec())
    );
    assert_eq!(decode_base(b"0100", Base::Two, None), None);
    assert_eq!(decode_base(b"01000002", Base::Two, None), None);
}

#[test]
fn base64_decoding() {
    assert_eq!(decode_base(b"SGVsbG8=", Base::SixtyFour, None), Some(b"Hello".to_vec()));
    assert_eq!(decode_base(b"SGVsbA==", Base::SixtyFour, None), Some(b"Hell".to_vec()));
    assert_eq!(decode_base(b"SGVs", Base::SixtyFour, None), Some(b"Hel".to_vec()));
    assert_eq!(decode_base(b"SGVsbA", Base::SixtyFour, None), Some(b"Hell".to_vec()));
}

#[test]
fn base64_rejects() {
    assert_eq!(decode_base(b"S", Base::SixtyFour, None), None);
    assert_eq!(decode_base(b"SG=V", Base::SixtyFour, None), None);
    assert_eq!(decode_base(b"SGVsbA=", Base::SixtyFour, None), None);
    assert_eq!(decode_base(b"SG*s", Base::SixtyFour, None), None);
}

#[test]
fn encoding() {
    let plain = EncodeOptions::default();
    assert_eq!(encode_base(b"Hello", Base::Sixteen, plain), "48656C6C6F");
    assert_eq!(encode_base(b"A", Base::Two, plain), "01000001");
    assert_eq!(encode_base(b"Hello", Base::SixtyFour, plain), "SGVsbG8=");
    assert_eq!(encode_base(b"Hell", Base::SixtyFour, plain), "SGVsbA==");
}

#[test]
fn encoding_line_breaks() {
    let options = EncodeOptions {
        line_break_every: Some(4),
    };
    assert_eq!(encode_base(b"Hello", Base::Sixteen, options), "4865\n6C6C\n6F");
}

#[test]
fn binary_literals() {
    assert_eq!(parse_binary(b"#{48656C6C6F}"), Some(b"Hello".to_vec()));
    assert_eq!(parse_binary(b"16#{FF}"), Some(vec![0xFF]));
    assert_eq!(parse_binary(b"2#{11111111}"), Some(vec![0xFF]));
    assert_eq!(parse_binary(b"64#{/w==}"), Some(vec![0xFF]));
    assert_eq!(parse_binary(b"#{}"), Some(vec![]));
}

#[test]
fn binary_literal_rejects() {
    assert_eq!(parse_binary(b"8#{12}"), None);
    assert_eq!(parse_binary(b"#{F}"), None);
    assert_eq!(parse_binary(b"#{FF}{}"), None);
    assert_eq!(parse_binary(b"#{FF"), None);
}

proptest! {
    #[test]
    fn decode_inverts_encode(bytes in proptest::collection::vec(any::<u8>(), 0..64), width in 1usize..20) {
        let options = EncodeOptions { line_break_every: Some(width) };
        for base in [Base::Two, Base::Sixteen, Base::SixtyFour] {
            let text = encode_base(&bytes, base, options);
            prop_assert_eq!(decode_base(text.as_bytes(), base, None), Some(bytes.clone()));
        }
    }
}
