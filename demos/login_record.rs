use std::collections::BTreeMap;

use blockpack::{GrowableBuffer, Marshallable, Pack, Unpack, bytes_to_object, object_to_bytes};

#[derive(Marshallable, Debug, Default, PartialEq)]
struct Login {
    uid: u32,
    name: String,
    #[blockpack(long)]
    banner: String,
    roles: BTreeMap<String, u8>,
}

fn main() {
    let login = Login {
        uid: 1001,
        name: String::from("ada"),
        banner: String::from("welcome back"),
        roles: [(String::from("admin"), 1)].into_iter().collect(),
    };

    let bytes = object_to_bytes(&login).unwrap();
    println!("serialized: {bytes:02x?} ({} bytes)", bytes.len());

    let mut decoded = Login::default();
    assert!(bytes_to_object(&bytes, &mut decoded));
    println!("deserialized: {decoded:?}");
    assert_eq!(login, decoded);

    // Frame the record with a length written after the fact.
    let mut buffer = GrowableBuffer::new();
    let mut pack = Pack::new(&mut buffer);
    let len_at = pack.position();
    pack.push_u32(0).unwrap().write(&login).unwrap();
    let body = (pack.size() - 4) as u32;
    pack.replace_u32(len_at, body).unwrap();

    let mut unpack = Unpack::new(buffer.data());
    let len = unpack.pop_u32().unwrap();
    let frame = unpack.fetch(len as usize, false).unwrap();
    println!("framed: {len} byte body, {} bytes left", unpack.remaining());
    assert_eq!(frame, &bytes[..]);
}
