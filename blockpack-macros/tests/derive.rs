//! Integration tests for the Marshallable derive.

use blockpack::{Error, Marshallable, bytes_to_object, object_to_bytes, try_bytes_to_object};

fn round_trip<T: Marshallable + Default>(value: &T) -> (Vec<u8>, T) {
    let bytes = object_to_bytes(value).unwrap();
    let mut decoded = T::default();
    try_bytes_to_object(&bytes, &mut decoded).unwrap();
    (bytes, decoded)
}

// =============================================================================
// Struct tests
// =============================================================================

#[derive(Marshallable, Debug, Default, PartialEq)]
struct UnitStruct;

#[test]
fn test_derive_unit_struct() {
    let (bytes, decoded) = round_trip(&UnitStruct);
    assert!(bytes.is_empty());
    assert_eq!(decoded, UnitStruct);
}

#[derive(Marshallable, Debug, Default, PartialEq)]
struct SimpleStruct {
    a: u32,
    b: u16,
}

#[test]
fn test_derive_simple_struct() {
    let value = SimpleStruct {
        a: 0x12345678,
        b: 0xABCD,
    };
    let (bytes, decoded) = round_trip(&value);
    assert_eq!(bytes, [0x12, 0x34, 0x56, 0x78, 0xAB, 0xCD]);
    assert_eq!(decoded, value);
}

#[derive(Marshallable, Debug, Default, PartialEq)]
struct TupleStruct(u32, String);

#[test]
fn test_derive_tuple_struct() {
    let value = TupleStruct(42, "id".into());
    let (bytes, decoded) = round_trip(&value);
    assert_eq!(bytes, [0, 0, 0, 42, 0, 2, b'i', b'd']);
    assert_eq!(decoded, value);
}

#[derive(Marshallable, Debug, Default, PartialEq)]
struct Login {
    uid: u32,
    name: String,
    #[blockpack(long)]
    motd: String,
    groups: Vec<u16>,
    #[blockpack(skip)]
    session_cache: u64,
}

#[test]
fn test_derive_field_attributes() {
    let value = Login {
        uid: 1,
        name: "ab".into(),
        motd: "hi".into(),
        groups: vec![7],
        session_cache: 99,
    };
    let bytes = object_to_bytes(&value).unwrap();
    assert_eq!(
        bytes,
        [
            0, 0, 0, 1, // uid
            0, 2, b'a', b'b', // name
            0, 0, 0, 2, b'h', b'i', // motd
            0, 0, 0, 1, 0, 7, // groups
        ]
    );

    let mut decoded = Login {
        session_cache: 5,
        ..Login::default()
    };
    assert!(bytes_to_object(&bytes, &mut decoded));
    assert_eq!(decoded.name, "ab");
    assert_eq!(decoded.motd, "hi");
    assert_eq!(decoded.groups, [7]);
    // Skipped fields are left as they were.
    assert_eq!(decoded.session_cache, 5);
}

/// Has no `Default`, so it can only be decoded in place.
#[derive(Marshallable, Debug, PartialEq)]
struct Counter {
    hits: u64,
}

#[derive(Marshallable, Debug, PartialEq)]
struct Page {
    path: String,
    #[blockpack(nested)]
    counter: Counter,
    flag: bool,
}

#[test]
fn test_derive_nested_in_place() {
    let value = Page {
        path: "/".into(),
        counter: Counter { hits: 3 },
        flag: true,
    };
    let bytes = object_to_bytes(&value).unwrap();
    assert_eq!(bytes.len(), 3 + 8 + 1);

    let mut decoded = Page {
        path: String::new(),
        counter: Counter { hits: 0 },
        flag: false,
    };
    try_bytes_to_object(&bytes, &mut decoded).unwrap();
    assert_eq!(decoded, value);
}

#[derive(Marshallable, Debug, Default, PartialEq)]
struct Roster {
    owner: SimpleStruct,
    members: Vec<TupleStruct>,
}

#[test]
fn test_derive_records_in_containers() {
    let value = Roster {
        owner: SimpleStruct { a: 1, b: 2 },
        members: vec![TupleStruct(3, "c".into()), TupleStruct(4, String::new())],
    };
    let (bytes, decoded) = round_trip(&value);
    assert_eq!(bytes.len(), 6 + 4 + (4 + 3) + (4 + 2));
    assert_eq!(decoded, value);
}

#[test]
fn test_derive_truncated_input() {
    let bytes = object_to_bytes(&SimpleStruct { a: 1, b: 2 }).unwrap();
    let mut decoded = SimpleStruct::default();
    let err = try_bytes_to_object(&bytes[..5], &mut decoded).unwrap_err();
    assert!(matches!(err, Error::ShortRead { .. }));
}

// =============================================================================
// Enum tests
// =============================================================================

#[derive(Marshallable, Debug, Default, PartialEq)]
enum UnitEnum {
    #[default]
    A,
    B,
    C,
}

#[test]
fn test_derive_unit_enum() {
    for (i, value) in [UnitEnum::A, UnitEnum::B, UnitEnum::C].iter().enumerate() {
        let (bytes, decoded) = round_trip(value);
        assert_eq!(bytes, [i as u8]);
        assert_eq!(&decoded, value);
    }
}

#[derive(Marshallable, Debug, Default, PartialEq)]
enum TupleEnum {
    #[default]
    Empty,
    Single(u32),
    Double(u16, u8),
}

#[test]
fn test_derive_tuple_enum() {
    let (bytes, decoded) = round_trip(&TupleEnum::Single(0x12345678));
    assert_eq!(bytes, [1, 0x12, 0x34, 0x56, 0x78]);
    assert_eq!(decoded, TupleEnum::Single(0x12345678));

    let (bytes, decoded) = round_trip(&TupleEnum::Double(0xABCD, 0x42));
    assert_eq!(bytes, [2, 0xAB, 0xCD, 0x42]);
    assert_eq!(decoded, TupleEnum::Double(0xABCD, 0x42));
}

#[derive(Marshallable, Debug, Default, PartialEq)]
#[repr(u16)]
enum StructEnum {
    #[default]
    Empty,
    Point {
        x: i32,
        y: i32,
    },
    Named {
        id: u8,
        #[blockpack(long)]
        label: String,
        #[blockpack(skip)]
        scratch: Vec<u8>,
    },
}

#[test]
fn test_derive_struct_enum() {
    let (bytes, decoded) = round_trip(&StructEnum::Point { x: -10, y: 20 });
    assert_eq!(bytes.len(), 2 + 4 + 4);
    assert_eq!(&bytes[..2], &[0, 1]);
    assert_eq!(decoded, StructEnum::Point { x: -10, y: 20 });

    let value = StructEnum::Named {
        id: 42,
        label: "n".into(),
        scratch: vec![1, 2, 3],
    };
    let bytes = object_to_bytes(&value).unwrap();
    assert_eq!(bytes, [0, 2, 42, 0, 0, 0, 1, b'n']);

    let mut decoded = StructEnum::default();
    try_bytes_to_object(&bytes, &mut decoded).unwrap();
    assert_eq!(
        decoded,
        StructEnum::Named {
            id: 42,
            label: "n".into(),
            scratch: Vec::new(),
        }
    );
}

#[test]
fn test_derive_enum_invalid_discriminant() {
    let mut decoded = UnitEnum::default();
    let err = try_bytes_to_object(&[255], &mut decoded).unwrap_err();
    assert!(matches!(err, Error::InvalidData { .. }));
    assert!(!bytes_to_object(&[3], &mut decoded));
}

#[derive(Marshallable, Debug, Default, PartialEq)]
#[repr(u8)]
enum Sparse {
    #[default]
    Low = 5,
    High = 200,
}

#[test]
fn test_derive_enum_writes_position_not_discriminant() {
    let (bytes, decoded) = round_trip(&Sparse::High);
    assert_eq!(bytes, [1]);
    assert_eq!(decoded, Sparse::High);
    assert_eq!(object_to_bytes(&Sparse::Low).unwrap(), [0]);
}

#[derive(Marshallable, Debug, Default, PartialEq)]
struct Tally {
    count: u32,
}

#[derive(Marshallable, Debug, Default, PartialEq)]
enum Event {
    #[default]
    Idle,
    Counted(#[blockpack(nested)] Tally),
}

#[test]
fn test_derive_nested_in_enum_variant() {
    let (bytes, decoded) = round_trip(&Event::Counted(Tally { count: 9 }));
    assert_eq!(bytes, [1, 0, 0, 0, 9]);
    assert_eq!(decoded, Event::Counted(Tally { count: 9 }));
}
