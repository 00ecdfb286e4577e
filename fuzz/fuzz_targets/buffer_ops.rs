#![no_main]
use libfuzzer_sys::fuzz_target;
use winbuf::{BufferConfig, ByteOrder, RootBuffer, StreamBuffer};

// Replays an operation stream against a windowed buffer and checks every
// result against a plain slice.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let config = BufferConfig {
        window_size: 1 << (data[0] % 9),
        window_in_memory: true,
    };
    let order = if data[1] & 1 == 0 { ByteOrder::Big } else { ByteOrder::Little };
    let (content, ops) = data[2..].split_at((data.len() - 2) / 2);

    let mut buf = RootBuffer::open_over_array_with_config(content.to_vec(), order, &config).unwrap();
    let mut model = 0usize;

    for op in ops.chunks(2) {
        let arg = op.get(1).copied().unwrap_or(0) as usize;
        let width = match op[0] % 6 {
            0 => {
                let target = arg % (content.len() + 2);
                let ok = buf.set_position(target as u64).is_ok();
                assert_eq!(ok, target <= content.len());
                if ok {
                    model = target;
                }
                continue;
            }
            1 => 1,
            2 => 2,
            3 => 4,
            4 => 8,
            _ => arg % 16,
        };

        let mut got = vec![0u8; width];
        let result = buf.get(&mut got);
        if model + width <= content.len() {
            result.unwrap();
            assert_eq!(&got[..], &content[model..model + width]);
            model += width;
        } else {
            assert!(result.unwrap_err().is_eof());
        }
        assert_eq!(buf.position(), model as u64);
    }
});
