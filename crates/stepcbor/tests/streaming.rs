//! Properties of decoding input which arrives in pieces.

use proptest::{collection::vec, prelude::*};
use stepcbor::{ByteCursor, DebugListener, Decoder, Event, EventLog, Feeder, Status};

fn decode_whole(input: &[u8]) -> (Vec<Event>, Status) {
    let mut decoder = Decoder::new(EventLog::new());
    let status = decoder.run(&mut ByteCursor::new(input));
    (decoder.into_listener().into_events(), status)
}

fn decode_chunked(input: &[u8], chunk_sizes: &[usize]) -> (Vec<Event>, Status) {
    let mut feeder = Feeder::new(Decoder::new(EventLog::new()));
    let mut status = feeder.feed(&[]);
    let mut rest = input;
    for size in chunk_sizes.iter().cycle() {
        if rest.is_empty() {
            break;
        }
        let (chunk, tail) = rest.split_at((*size).min(rest.len()));
        status = feeder.feed(chunk);
        rest = tail;
    }
    (feeder.into_decoder().into_listener().into_events(), status)
}

fn render_chunked(input: &[u8], chunk_size: usize) -> String {
    let mut feeder = Feeder::new(Decoder::new(DebugListener::new(String::new())));
    for chunk in input.chunks(chunk_size) {
        feeder.feed(chunk);
    }
    feeder.into_decoder().into_listener().finish().unwrap()
}

/// Encodes a byte string header with the shortest argument.
fn byte_str_header(len: usize) -> Vec<u8> {
    let len = u32::try_from(len).unwrap();
    match len {
        0..24 => vec![0x40 | u8::try_from(len).unwrap()],
        24..=0xff => vec![0x58, u8::try_from(len).unwrap()],
        0x100..=0xffff => {
            let mut header = vec![0x59];
            header.extend_from_slice(&u16::try_from(len).unwrap().to_be_bytes());
            header
        }
        _ => {
            let mut header = vec![0x5a];
            header.extend_from_slice(&len.to_be_bytes());
            header
        }
    }
}

/// Arbitrary well-formed items: unsigned and negative integers, strings,
/// container headers, tags, and simple values.
fn item() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        any::<u64>().prop_map(|v| {
            let mut out = vec![0x1b];
            out.extend_from_slice(&v.to_be_bytes());
            out
        }),
        any::<u32>().prop_map(|v| {
            let mut out = vec![0x3a];
            out.extend_from_slice(&v.to_be_bytes());
            out
        }),
        (0_u8..24).prop_map(|v| vec![v]),
        (0_u8..24).prop_map(|v| vec![0x20 | v]),
        vec(any::<u8>(), 0..300).prop_map(|payload| {
            let mut out = byte_str_header(payload.len());
            out.extend_from_slice(&payload);
            out
        }),
        "[a-z]{0,40}".prop_map(|text| {
            let mut out = byte_str_header(text.len());
            out[0] |= 0x20;
            out.extend_from_slice(text.as_bytes());
            out
        }),
        (0_u8..24).prop_map(|len| vec![0x80 | len]),
        (0_u8..24).prop_map(|len| vec![0xa0 | len]),
        any::<u16>().prop_map(|num| {
            let mut out = vec![0xd9];
            out.extend_from_slice(&num.to_be_bytes());
            out
        }),
        any::<u8>().prop_map(|code| vec![0xf8, code]),
    ]
}

proptest! {
    #[test]
    fn test_chunking_invariance(
        items in vec(item(), 0..16),
        chunk_sizes in vec(1_usize..8, 1..8),
    ) {
        let input = items.concat();
        let (whole, whole_status) = decode_whole(&input);
        let (chunked, chunked_status) = decode_chunked(&input, &chunk_sizes);
        let (byte_by_byte, _) = decode_chunked(&input, &[1]);

        prop_assert_eq!(whole_status, Status::Suspended(1));
        prop_assert_eq!(chunked_status, Status::Suspended(1));
        prop_assert_eq!(whole.len(), items.len());
        prop_assert_eq!(&whole, &chunked);
        prop_assert_eq!(&whole, &byte_by_byte);
    }

    #[test]
    fn test_chunking_invariance_arbitrary_bytes(
        input in vec(any::<u8>(), 0..256),
        chunk_sizes in vec(1_usize..8, 1..8),
    ) {
        let (whole, whole_status) = decode_whole(&input);
        let (chunked, chunked_status) = decode_chunked(&input, &chunk_sizes);

        prop_assert_eq!(whole_status, chunked_status);
        prop_assert_eq!(whole, chunked);
    }

    #[test]
    fn test_error_lines_independent_of_chunks(
        input in vec(any::<u8>(), 0..256),
        chunk_size in 1_usize..8,
    ) {
        let whole = render_chunked(&input, input.len().max(1));
        let chunked = render_chunked(&input, chunk_size);
        prop_assert_eq!(whole, chunked);
    }

    #[test]
    fn test_byte_string_offsets(
        payload in vec(any::<u8>(), 0..70_000),
        trailing in vec(any::<u8>(), 0..4),
    ) {
        let header = byte_str_header(payload.len());
        let mut input = header.clone();
        input.extend_from_slice(&payload);
        input.extend_from_slice(&trailing);

        let mut decoder = Decoder::new(EventLog::new());
        let mut cursor = ByteCursor::new(&input);

        let status = decoder.step(&mut cursor);
        prop_assert_eq!(cursor.byte_offset(), header.len());
        if payload.len() > stepcbor::DEFAULT_MAX_PAYLOAD_LEN {
            prop_assert_eq!(status, Status::Errored);
            prop_assert!(decoder.is_errored());
        } else {
            prop_assert_eq!(status, Status::Consumed);
            prop_assert_eq!(decoder.step(&mut cursor), Status::Consumed);
            prop_assert_eq!(cursor.byte_offset(), header.len() + payload.len());
            prop_assert_eq!(
                decoder.listener().events(),
                [Event::ByteString(payload.into())]
            );
        }
    }

    #[test]
    fn test_no_progress_after_error(
        prefix in vec(item(), 0..8),
        minor in 28_u8..32,
        major in 0_u8..8,
        suffix in vec(any::<u8>(), 0..64),
    ) {
        let mut input = prefix.concat();
        let error_offset = input.len() + 1;
        input.push((major << 5) | minor);
        input.extend_from_slice(&suffix);

        let mut decoder = Decoder::new(EventLog::new());
        let mut cursor = ByteCursor::new(&input);
        prop_assert_eq!(decoder.run(&mut cursor), Status::Errored);
        prop_assert_eq!(cursor.byte_offset(), error_offset);

        let events = decoder.listener().events().len();
        for _ in 0..4 {
            prop_assert_eq!(decoder.step(&mut cursor), Status::Errored);
        }
        prop_assert_eq!(cursor.byte_offset(), error_offset);
        prop_assert_eq!(decoder.listener().events().len(), events);
    }
}

#[test]
fn test_byte_by_byte_suspension_counts() {
    let input = [0x5a, 0x00, 0x00, 0x00, 0x03, 0x61, 0x62, 0x63];
    let mut feeder = Feeder::new(Decoder::new(EventLog::new()));
    let statuses = input
        .iter()
        .map(|b| feeder.feed(std::slice::from_ref(b)))
        .collect::<Vec<_>>();
    assert_eq!(
        statuses,
        [
            Status::Suspended(4),
            Status::Suspended(3),
            Status::Suspended(2),
            Status::Suspended(1),
            Status::Suspended(3),
            Status::Suspended(2),
            Status::Suspended(1),
            Status::Suspended(1),
        ]
    );
    assert_eq!(
        feeder.decoder().listener().events(),
        [Event::ByteString(b"abc".to_vec().into())]
    );
}
