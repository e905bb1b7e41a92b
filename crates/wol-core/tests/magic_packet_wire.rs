//! Integration tests for the magic packet codec.
//!
//! These tests exercise the public API the way the sender uses it: text in,
//! 102 wire bytes out.  They check the frame layout for a spread of valid
//! address spellings and confirm that invalid text never yields a frame.

use wol_core::{CodecError, MacAddress, MagicPacket, MAGIC_PACKET_LEN};

/// Builds a frame and checks the layout against the expected address bytes.
fn assert_frame(text: &str, expected: [u8; 6]) {
    let bytes = MagicPacket::build(text)
        .unwrap_or_else(|e| panic!("{text:?} must build: {e}"))
        .to_bytes();

    assert_eq!(bytes.len(), MAGIC_PACKET_LEN);
    assert_eq!(&bytes[..6], &[0xFF; 6], "header of {text:?}");
    for (idx, chunk) in bytes[6..].chunks_exact(6).enumerate() {
        assert_eq!(chunk, &expected, "repetition {idx} of {text:?}");
    }
}

#[test]
fn test_frame_layout_for_valid_spellings() {
    let cases: [(&str, [u8; 6]); 6] = [
        ("e0:d5:5e:6e:30:c9", [0xE0, 0xD5, 0x5E, 0x6E, 0x30, 0xC9]),
        ("E0:D5:5E:6E:30:C9", [0xE0, 0xD5, 0x5E, 0x6E, 0x30, 0xC9]),
        ("e0-d5-5e-6e-30-c9", [0xE0, 0xD5, 0x5E, 0x6E, 0x30, 0xC9]),
        ("00:00:00:00:00:00", [0x00; 6]),
        ("01-23-45-67-89-AB", [0x01, 0x23, 0x45, 0x67, 0x89, 0xAB]),
        ("fE:dC:bA:98:76:54", [0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54]),
    ];

    for (text, expected) in cases {
        assert_frame(text, expected);
    }
}

#[test]
fn test_imac_payload_matches_reference_bytes() {
    // Arrange: the sample device shipped in the example registry.
    let mut expected = vec![0xFF; 6];
    for _ in 0..16 {
        expected.extend_from_slice(&[0xE0, 0xD5, 0x5E, 0x6E, 0x30, 0xC9]);
    }

    // Act
    let bytes = MagicPacket::build("e0:d5:5e:6e:30:c9").unwrap().to_bytes();

    // Assert
    assert_eq!(bytes.to_vec(), expected);
}

#[test]
fn test_invalid_text_fails_with_invalid_mac() {
    let cases = ["", "iMac", "e0:d5:5e:6e:30", "e0:d5:5e:6e:30:zz", "e0_d5_5e_6e_30_c9"];

    for text in cases {
        assert_eq!(
            MagicPacket::build(text),
            Err(CodecError::InvalidMac(text.to_string())),
            "{text:?}"
        );
    }
}

#[test]
fn test_packet_from_parsed_address_matches_build() {
    let mac: MacAddress = "e0:d5:5e:6e:30:c9".parse().unwrap();

    assert_eq!(
        MagicPacket::new(mac).to_bytes(),
        MagicPacket::build("E0-D5-5E-6E-30-C9").unwrap().to_bytes()
    );
}
