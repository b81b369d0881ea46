use image::{Rgba, RgbaImage};
use lsb_eot::{
    StegoError, capacity, check_capacity, constants::TERMINATOR, decode, encode,
};
use rand::{RngCore, SeedableRng, rngs::StdRng};

/// 用固定种子生成随机像素的载体，Alpha 故意设为非 255 以便检查重写。
fn seeded_carrier(width: u32, height: u32, seed: u64) -> RgbaImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut raw = vec![0u8; (width * height * 4) as usize];
    rng.fill_bytes(&mut raw);

    RgbaImage::from_fn(width, height, |x, y| {
        let i = ((y * width + x) * 4) as usize;
        Rgba([raw[i], raw[i + 1], raw[i + 2], 128])
    })
}

/// 用固定种子生成不含结束标记字节的随机数据。
fn seeded_payload(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut payload = vec![0u8; len];
    rng.fill_bytes(&mut payload);
    payload
        .into_iter()
        .map(|byte| if byte == TERMINATOR { 0x05 } else { byte })
        .collect()
}

#[test]
fn capacity_follows_three_bits_per_pixel() {
    assert_eq!(capacity(10, 10), 36);
    assert_eq!(capacity(1, 1), -1);
    assert_eq!(capacity(0, 100), -1);
    assert_eq!(capacity(100, 0), -1);
    assert_eq!(capacity(3, 1), 0);
    assert_eq!(capacity(800, 600), 179_999);
}

#[test]
fn capacity_does_not_overflow_on_huge_dimensions() {
    let expected = (u128::from(u32::MAX) * u128::from(u32::MAX) * 3 / 8) as i64 - 1;
    assert_eq!(capacity(u32::MAX, u32::MAX), expected);
    assert!(capacity(u32::MAX, u32::MAX) > 0);
    assert_eq!(capacity(u32::MAX, 1), (u64::from(u32::MAX) * 3 / 8) as i64 - 1);
}

#[test]
fn check_capacity_reports_both_sizes() {
    assert_eq!(check_capacity(10, 10, 36), Ok(36));
    assert_eq!(
        check_capacity(10, 10, 37),
        Err(StegoError::CapacityExceeded {
            payload: 37,
            capacity: 36
        })
    );
    assert_eq!(
        check_capacity(1, 1, 0),
        Err(StegoError::DegenerateImage {
            width: 1,
            height: 1
        })
    );
}

#[test]
fn check_capacity_accepts_huge_images() {
    let available = check_capacity(u32::MAX, u32::MAX, 1_000).unwrap();
    assert!(available >= 1_000);
}

#[test]
fn round_trip_restores_payload() {
    let carrier = seeded_carrier(64, 48, 1);
    for (len, seed) in [(1, 10), (17, 11), (500, 12)] {
        let payload = seeded_payload(len, seed);
        let doctored = encode(&carrier, &payload).unwrap();
        assert_eq!(decode(&doctored).unwrap(), payload);
    }
}

#[test]
fn round_trip_at_exact_capacity() {
    for (width, height) in [(10, 10), (7, 3), (3, 1)] {
        let carrier = seeded_carrier(width, height, 2);
        let full = capacity(width, height) as usize;
        let payload = seeded_payload(full, 3);

        let doctored = encode(&carrier, &payload).unwrap();
        assert_eq!(decode(&doctored).unwrap(), payload);
    }
}

#[test]
fn empty_payload_only_embeds_terminator() {
    let carrier = seeded_carrier(4, 4, 4);
    let doctored = encode(&carrier, &[]).unwrap();
    assert_eq!(decode(&doctored).unwrap(), Vec::<u8>::new());

    // 8 位结束标记占用前 3 个像素 (9 个通道中的 8 个)。
    let touched = 3;
    for (index, (before, after)) in carrier.pixels().zip(doctored.pixels()).enumerate() {
        if index >= touched {
            assert_eq!(before.0[..3], after.0[..3]);
        }
    }
}

#[test]
fn bits_are_written_lsb_first_in_rgb_order() {
    let carrier = RgbaImage::from_pixel(4, 2, Rgba([0xF0, 0xF0, 0xF0, 0]));
    let doctored = encode(&carrier, &[0b0000_0001]).unwrap();

    let lsbs: Vec<u8> = doctored
        .pixels()
        .flat_map(|pixel| [pixel.0[0] & 1, pixel.0[1] & 1, pixel.0[2] & 1])
        .collect();

    // 数据字节 0x01，随后是结束标记 0x04：均为低位在前。
    let expected_message = [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0];
    assert_eq!(&lsbs[..16], &expected_message);
    assert!(lsbs[16..].iter().all(|&bit| bit == 0));

    // 高 7 位保持不变。
    assert!(doctored.pixels().all(|pixel| pixel.0[..3].iter().all(|&c| c & 0xFE == 0xF0)));
}

#[test]
fn pixels_after_message_are_untouched() {
    let carrier = seeded_carrier(32, 32, 5);
    let pristine = carrier.clone();
    let payload = b"short message".to_vec();

    let doctored = encode(&carrier, &payload).unwrap();
    assert_eq!(carrier, pristine, "encode must not modify its input");

    let message_bits = (payload.len() + 1) * 8;
    let touched = message_bits.div_ceil(3);

    for (index, (before, after)) in carrier.pixels().zip(doctored.pixels()).enumerate() {
        assert_eq!(after.0[3], 255, "alpha must be opaque at pixel {index}");
        if index >= touched {
            assert_eq!(before.0[..3], after.0[..3], "pixel {index} changed");
        } else {
            for channel in 0..3 {
                assert_eq!(before.0[channel] & 0xFE, after.0[channel] & 0xFE);
            }
        }
    }
}

#[test]
fn oversized_payload_is_rejected() {
    let carrier = seeded_carrier(10, 10, 6);
    let payload = seeded_payload(capacity(10, 10) as usize + 1, 7);

    assert_eq!(
        encode(&carrier, &payload),
        Err(StegoError::CapacityExceeded {
            payload: 37,
            capacity: 36
        })
    );
}

#[test]
fn degenerate_image_is_rejected() {
    let carrier = seeded_carrier(1, 1, 8);
    assert_eq!(
        encode(&carrier, &[]),
        Err(StegoError::DegenerateImage {
            width: 1,
            height: 1
        })
    );

    let empty = RgbaImage::new(0, 0);
    assert!(matches!(
        encode(&empty, &[]),
        Err(StegoError::DegenerateImage { .. })
    ));
}

#[test]
fn reserved_byte_is_rejected() {
    let carrier = seeded_carrier(16, 16, 9);
    assert_eq!(
        encode(&carrier, b"ab\x04cd"),
        Err(StegoError::ReservedByte { offset: 2 })
    );
}

#[test]
fn decoded_payload_never_ends_with_terminator() {
    let carrier = seeded_carrier(20, 20, 13);
    let payload = seeded_payload(100, 14);
    let recovered = decode(&encode(&carrier, &payload).unwrap()).unwrap();
    assert_ne!(recovered.last(), Some(&TERMINATOR));
}

#[test]
fn grid_without_terminator_fails_to_decode() {
    // 随机高位，最低位全部置 1：每个字节都是 0xFF，永远不会出现结束标记。
    let carrier = seeded_carrier(20, 20, 15);
    let ones = RgbaImage::from_fn(20, 20, |x, y| {
        let Rgba([r, g, b, a]) = *carrier.get_pixel(x, y);
        Rgba([r | 1, g | 1, b | 1, a])
    });

    assert_eq!(
        decode(&ones),
        Err(StegoError::TerminatorNotFound { bytes_read: 150 })
    );
}

#[test]
fn empty_grid_fails_to_decode() {
    assert_eq!(
        decode(&RgbaImage::new(0, 0)),
        Err(StegoError::TerminatorNotFound { bytes_read: 0 })
    );
}
