//! The `StreamBuffer` contract, checked identically on every source kind.

use winbuf::{BufferConfig, BufferError, ByteOrder, RootBuffer, StreamBuffer};

use crate::common::{create_temp_file, noise};

/// Runs `check` against a buffer over `content` for each source kind:
/// array, wrapped slice, file, and small-window variants of each.
fn for_each_source(content: &[u8], order: ByteOrder, check: impl Fn(&str, &mut dyn StreamBuffer)) {
    let small_window = BufferConfig {
        window_size: 4,
        window_in_memory: true,
    };

    let mut array = RootBuffer::open_over_array(content.to_vec(), order);
    check("array", &mut array);

    let mut wrapped = RootBuffer::open_over_buffer(content, order);
    check("wrapped", &mut wrapped);

    let mut windowed_array =
        RootBuffer::open_over_array_with_config(content.to_vec(), order, &small_window).unwrap();
    check("windowed array", &mut windowed_array);

    let mut windowed_wrapped =
        RootBuffer::open_over_buffer_with_config(content, order, &small_window).unwrap();
    check("windowed wrapped", &mut windowed_wrapped);

    let file = create_temp_file(content);
    let mut file_buf = RootBuffer::open_path(file.path(), order).unwrap();
    check("file", &mut file_buf);

    let mut small_file =
        RootBuffer::open_over_file_with_config(file.reopen().unwrap(), order, &small_window)
            .unwrap();
    check("small-window file", &mut small_file);
}

const SAMPLE: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

#[test]
fn sequential_bytes_in_storage_order() {
    let content = noise(37, 7);
    for order in [ByteOrder::Big, ByteOrder::Little] {
        for_each_source(&content, order, |kind, buf| {
            for (i, expected) in content.iter().enumerate() {
                assert_eq!(buf.position(), i as u64, "{kind}");
                assert_eq!(buf.get_u8().unwrap(), *expected, "{kind} offset {i}");
            }
            assert_eq!(buf.position(), content.len() as u64);
            assert!(!buf.has_remaining());
        });
    }
}

#[test]
fn big_endian_decoding() {
    for_each_source(&SAMPLE, ByteOrder::Big, |kind, buf| {
        assert_eq!(buf.get_u32().unwrap(), 0x01020304, "{kind}");
        buf.set_position(0).unwrap();
        assert_eq!(buf.get_u64().unwrap(), 0x0102030405060708, "{kind}");
        buf.set_position(0).unwrap();
        assert_eq!(buf.get_u16().unwrap(), 0x0102, "{kind}");
        assert_eq!(buf.get_char().unwrap(), 0x0304, "{kind}");
    });
}

#[test]
fn little_endian_decoding() {
    for_each_source(&SAMPLE, ByteOrder::Little, |kind, buf| {
        assert_eq!(buf.get_u32().unwrap(), 0x04030201, "{kind}");
        buf.set_position(0).unwrap();
        assert_eq!(buf.get_u64().unwrap(), 0x0807060504030201, "{kind}");
        buf.set_position(6).unwrap();
        assert_eq!(buf.get_u16().unwrap(), 0x0807, "{kind}");
    });
}

#[test]
fn set_position_bounds() {
    for_each_source(&SAMPLE, ByteOrder::Big, |kind, buf| {
        assert_eq!(buf.capacity(), 8);
        buf.set_position(8).unwrap();
        assert_eq!(buf.position(), 8);

        let err = buf.set_position(9).unwrap_err();
        assert!(
            matches!(err, BufferError::OutOfRange { requested: 9, capacity: 8 }),
            "{kind}: {err}"
        );
        assert!(err.is_eof());
        assert_eq!(buf.position(), 8, "{kind}");
        assert_eq!(buf.remaining(), 0);
    });
}

#[test]
fn underflow_leaves_position() {
    for_each_source(&SAMPLE, ByteOrder::Big, |kind, buf| {
        buf.set_position(8).unwrap();
        let err = buf.get_u8().unwrap_err();
        assert!(
            matches!(err, BufferError::Underflow { needed: 1, remaining: 0 }),
            "{kind}: {err}"
        );
        assert_eq!(buf.position(), 8, "{kind}");
    });
}

#[test]
fn partial_availability_is_still_underflow() {
    for_each_source(&SAMPLE, ByteOrder::Big, |kind, buf| {
        buf.set_position(5).unwrap();
        assert!(matches!(buf.get_u64(), Err(BufferError::Underflow { .. })), "{kind}");
        assert!(matches!(buf.get_u32(), Err(BufferError::Underflow { .. })), "{kind}");
        assert_eq!(buf.position(), 5, "{kind}");

        let mut dst = [0u8; 4];
        assert!(matches!(buf.get(&mut dst), Err(BufferError::Underflow { .. })), "{kind}");
        assert_eq!(dst, [0; 4], "{kind}: nothing decoded");
        assert_eq!(buf.position(), 5, "{kind}");

        // The three bytes that are there can still be read.
        assert_eq!(buf.get_u16().unwrap(), 0x0607, "{kind}");
        assert_eq!(buf.get_u8().unwrap(), 8, "{kind}");
    });
}

#[test]
fn bulk_get_into_part_of_destination() {
    for_each_source(&SAMPLE, ByteOrder::Little, |kind, buf| {
        buf.set_position(2).unwrap();
        let mut dst = [0xffu8; 8];
        buf.get(&mut dst[3..7]).unwrap();
        assert_eq!(dst, [0xff, 0xff, 0xff, 3, 4, 5, 6, 0xff], "{kind}");
        assert_eq!(buf.position(), 6, "{kind}");

        // Zero-length reads succeed anywhere, including the end.
        buf.set_position(8).unwrap();
        buf.get(&mut []).unwrap();
        assert_eq!(buf.position(), 8);
    });
}

#[test]
fn signed_values() {
    let content = [0xff, 0xfe, 0xff, 0xff, 0xff, 0x80, 0x00, 0x00, 0x00];
    for_each_source(&content, ByteOrder::Big, |kind, buf| {
        assert_eq!(buf.get_i8().unwrap(), -1, "{kind}");
        assert_eq!(buf.get_i16().unwrap(), -257, "{kind}");
        assert_eq!(buf.get_i16().unwrap(), -1, "{kind}");
        assert_eq!(buf.get_i32().unwrap(), i32::MIN, "{kind}");
    });
}

#[test]
fn mixed_reads_match_slice_model() {
    let content = noise(4099, 42);
    for order in [ByteOrder::Big, ByteOrder::Little] {
        for_each_source(&content, order, |kind, buf| {
            let mut at = 0usize;
            let mut step = 0usize;
            while content.len() - at >= 8 {
                match step % 5 {
                    0 => {
                        let raw: [u8; 8] = content[at..at + 8].try_into().unwrap();
                        assert_eq!(buf.get_u64().unwrap(), order.decode_u64(raw), "{kind}");
                        at += 8;
                    }
                    1 => {
                        let raw: [u8; 4] = content[at..at + 4].try_into().unwrap();
                        assert_eq!(buf.get_u32().unwrap(), order.decode_u32(raw), "{kind}");
                        at += 4;
                    }
                    2 => {
                        let raw: [u8; 2] = content[at..at + 2].try_into().unwrap();
                        assert_eq!(buf.get_u16().unwrap(), order.decode_u16(raw), "{kind}");
                        at += 2;
                    }
                    3 => {
                        assert_eq!(buf.get_u8().unwrap(), content[at], "{kind}");
                        at += 1;
                    }
                    _ => {
                        let mut dst = [0u8; 7];
                        buf.get(&mut dst).unwrap();
                        assert_eq!(&dst[..], &content[at..at + 7], "{kind}");
                        at += 7;
                    }
                }
                assert_eq!(buf.position(), at as u64, "{kind}");
                step += 1;
            }
            assert_eq!(buf.get_vec(content.len() - at).unwrap(), &content[at..]);
        });
    }
}

#[test]
fn empty_source() {
    for_each_source(&[], ByteOrder::Big, |kind, buf| {
        assert_eq!(buf.capacity(), 0, "{kind}");
        assert!(!buf.has_remaining());
        buf.set_position(0).unwrap();
        assert!(matches!(buf.set_position(1), Err(BufferError::OutOfRange { .. })));
        assert!(matches!(buf.get_u8(), Err(BufferError::Underflow { .. })));
        assert_eq!(buf.wrap_subsection(0).unwrap().capacity(), 0);
    });
}
