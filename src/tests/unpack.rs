use crate::{Error, Unpack};

#[test]
fn pops_big_endian_scalars() {
    let bytes = [
        0xAB, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E,
    ];
    let mut unpack = Unpack::new(&bytes);
    assert_eq!(unpack.pop_u8().unwrap(), 0xAB);
    assert_eq!(unpack.pop_u16().unwrap(), 0x0102);
    assert_eq!(unpack.pop_u32().unwrap(), 0x0304_0506);
    assert_eq!(unpack.pop_u64().unwrap(), 0x0708_090A_0B0C_0D0E);
    assert!(unpack.is_empty());
    unpack.finish().unwrap();
}

#[test]
fn short_read_consumes_nothing() {
    let bytes = [0x12, 0x34];
    let mut unpack = Unpack::new(&bytes);

    let err = unpack.pop_u32().unwrap_err();
    assert_eq!(
        err,
        Error::ShortRead {
            needed: 4,
            available: 2
        }
    );
    assert!(err.is_read_side());
    assert_eq!(unpack.remaining(), 2);
    assert_eq!(unpack.pop_u16().unwrap(), 0x1234);
}

#[test]
fn empty_input_fails_every_pop() {
    let mut unpack = Unpack::new(&[]);
    assert!(unpack.pop_u8().is_err());
    assert!(unpack.pop_bool().is_err());
    assert!(unpack.pop_string().is_err());
    unpack.finish().unwrap();
}

#[test]
fn peek_does_not_advance() {
    let bytes = [0, 0, 0, 5, 0xFF];
    let mut unpack = Unpack::new(&bytes);
    assert_eq!(unpack.peek_u32().unwrap(), 5);
    assert_eq!(unpack.peek_u16().unwrap(), 0);
    assert_eq!(unpack.peek_u8().unwrap(), 0);
    assert_eq!(unpack.remaining(), 5);
    assert_eq!(unpack.pop_u32().unwrap(), 5);
    assert_eq!(unpack.peek_u8().unwrap(), 0xFF);
    assert!(unpack.peek_u64().is_err());
}

#[test]
fn finish_reports_trailing_bytes() {
    let bytes = [0, 0, 0, 1, 0xAA, 0xBB];
    let mut unpack = Unpack::new(&bytes);
    assert_eq!(unpack.pop_u32().unwrap(), 1);
    assert_eq!(
        unpack.finish().unwrap_err(),
        Error::TrailingData { remaining: 2 }
    );
}

#[test]
fn signed_float_and_bool() {
    let bytes = [
        0xFF, 0xFF, 0xFE, 0x80, 0x00, 0x00, 0x00, 0x3F, 0x80, 0x00, 0x00, 0x02, 0x00,
    ];
    let mut unpack = Unpack::new(&bytes);
    assert_eq!(unpack.pop_i8().unwrap(), -1);
    assert_eq!(unpack.pop_i16().unwrap(), -2);
    assert_eq!(unpack.pop_i32().unwrap(), i32::MIN);
    assert_eq!(unpack.pop_f32().unwrap(), 1.0);
    // Any non-zero byte decodes as true.
    assert!(unpack.pop_bool().unwrap());
    assert!(!unpack.pop_bool().unwrap());
}

#[test]
fn string_views_borrow_the_input() {
    let bytes = [0, 2, b'o', b'k', 0, 0, 0, 1, b'!'];
    let mut unpack = Unpack::new(&bytes);

    let short = unpack.pop_str().unwrap();
    assert_eq!(short, "ok");
    assert_eq!(short.as_ptr(), bytes[2..].as_ptr());

    let long = unpack.pop_bytes32().unwrap();
    assert_eq!(long, b"!");
    assert_eq!(long.as_ptr(), bytes[8..].as_ptr());
    unpack.finish().unwrap();
}

#[test]
fn owned_string_and_vec_copies() {
    let bytes = [0, 1, b'a', 0, 0, 0, 2, b'b', b'c', 0, 1, 0xFF, 0, 0, 0, 0];
    let mut unpack = Unpack::new(&bytes);
    assert_eq!(unpack.pop_string().unwrap(), "a");
    assert_eq!(unpack.pop_string32().unwrap(), "bc");
    assert_eq!(unpack.pop_vec16().unwrap(), vec![0xFF]);
    assert_eq!(unpack.pop_vec32().unwrap(), Vec::<u8>::new());
    assert!(unpack.is_empty());
}

#[test]
fn truncated_string_body_is_atomic() {
    let bytes = [0, 5, b'a', b'b'];
    let mut unpack = Unpack::new(&bytes);
    assert_eq!(
        unpack.pop_str().unwrap_err(),
        Error::ShortRead {
            needed: 5,
            available: 2
        }
    );
    assert_eq!(unpack.remaining(), 4);
}

#[test]
fn invalid_utf8_is_rejected() {
    let bytes = [0, 3, b'a', 0xC3, 0x28];
    let mut unpack = Unpack::new(&bytes);
    assert_eq!(
        unpack.pop_str().unwrap_err(),
        Error::InvalidUtf8 { valid_up_to: 1 }
    );

    let mut raw = Unpack::new(&bytes);
    assert_eq!(raw.pop_bytes16().unwrap(), &[b'a', 0xC3, 0x28]);
}

#[test]
fn fetch_and_reset() {
    let first = [1, 2, 3];
    let second = [4];
    let mut unpack = Unpack::new(&first);

    assert_eq!(unpack.fetch(2, true).unwrap(), &[1, 2]);
    assert_eq!(unpack.fetch(2, false).unwrap(), &[1, 2]);
    assert_eq!(unpack.data(), &[3]);
    assert!(unpack.fetch(2, false).is_err());

    unpack.reset(&second);
    assert_eq!(unpack.pop_u8().unwrap(), 4);
}

#[test]
fn copies_are_independent_cursors() {
    let bytes = [0, 1, 0, 2];
    let mut unpack = Unpack::new(&bytes);
    let mut lookahead = unpack;
    assert_eq!(lookahead.pop_u16().unwrap(), 1);
    assert_eq!(lookahead.pop_u16().unwrap(), 2);
    assert_eq!(unpack.pop_u16().unwrap(), 1);
}
