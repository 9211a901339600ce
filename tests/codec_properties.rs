use image::{Rgba, RgbaImage, imageops};
use lsb_seal::{
    Carrier, CodecPolicy, Payload, PayloadKind, StegoError, Verification, capacity,
    compute_file_hash, decode_payload, encode_hash, encode_message, verify,
};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// 用给定种子生成随机像素的载体 (Alpha 通道也是随机的)
fn noise_carrier(rng: &mut StdRng, width: u32, height: u32) -> Carrier {
    let mut pixels = vec![0u8; (width * height * 4) as usize];
    rng.fill_bytes(&mut pixels);
    Carrier::new(width, height, pixels).expect("buffer length matches dimensions")
}

/// 随机尺寸与随机载荷的往返测试
#[test]
fn random_messages_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x5EA1);
    let policy = CodecPolicy::default();

    for _ in 0..50 {
        let width = rng.random_range(4..40);
        let height = rng.random_range(4..40);
        let cover = noise_carrier(&mut rng, width, height);

        let limit = capacity(width, height);
        if limit == 0 {
            continue;
        }
        let len = rng.random_range(1..=limit);
        let message: String = (0..len)
            .map(|_| char::from(rng.random_range(b' '..=b'~')))
            .collect();

        let doctored = encode_message(&cover, &message, &policy).unwrap();
        let payload = decode_payload(&doctored, &policy).unwrap();
        assert_eq!(payload.content(), message);

        // 每个通道最多变化 1，Alpha 不变
        for (before, after) in cover.pixels().chunks_exact(4).zip(doctored.pixels().chunks_exact(4)) {
            assert_eq!(before[3], after[3]);
            for channel in 0..3 {
                assert!(before[channel].abs_diff(after[channel]) <= 1);
            }
        }
    }
}

/// 随机噪声图像不会被误认为含有数据，也不会导致崩溃
#[test]
fn noise_carrier_is_rejected() {
    let mut rng = StdRng::seed_from_u64(7);
    let policy = CodecPolicy::default();

    for _ in 0..16 {
        let cover = noise_carrier(&mut rng, 64, 64);
        let err = decode_payload(&cover, &policy).unwrap_err();
        assert!(
            matches!(err, StegoError::InvalidHeader { .. }),
            "unexpected error: {err:?}"
        );
    }
}

/// 所有最低位为 1 的载体，其长度头远超上限
#[test]
fn saturated_header_is_invalid() {
    let cover = Carrier::new(8, 8, vec![0xFF; 8 * 8 * 4]).unwrap();
    let err = decode_payload(&cover, &CodecPolicy::default()).unwrap_err();
    assert!(matches!(err, StegoError::InvalidHeader { declared: u32::MAX }));
}

/// 裁掉载体下半部分后，读取会在载荷中途耗尽
#[test]
fn cropped_carrier_is_truncated() {
    let policy = CodecPolicy::default();
    let cover = RgbaImage::from_pixel(20, 20, Rgba([120, 60, 200, 255]));
    let message = "m".repeat(100);

    let doctored =
        RgbaImage::try_from(encode_message(&Carrier::from(cover), &message, &policy).unwrap())
            .unwrap();
    let cropped = imageops::crop_imm(&doctored, 0, 0, 20, 7).to_image();

    let err = decode_payload(&Carrier::from(cropped), &policy).unwrap_err();
    assert!(matches!(
        err,
        StegoError::Truncated {
            declared: 800,
            available: 388
        }
    ));
}

/// 隐藏空输入的哈希，提取后用于校验原文件与被修改的文件
#[test]
fn sealed_hash_verifies_original_only() {
    let policy = CodecPolicy::default();
    let mut rng = StdRng::seed_from_u64(42);
    let cover = noise_carrier(&mut rng, 24, 24);

    let digest = compute_file_hash(b"");
    assert_eq!(digest, EMPTY_SHA256);

    let doctored = encode_hash(&cover, &digest, &policy).unwrap();
    let payload = decode_payload(&doctored, &policy).unwrap();
    assert_eq!(payload, Payload::Hash(EMPTY_SHA256.to_owned()));
    assert_eq!(payload.kind(), PayloadKind::Hash);

    assert_eq!(verify(payload.content(), b""), Verification::Match);
    assert_eq!(verify(payload.content(), b"\x01"), Verification::Mismatch);
}

/// 任意文件内容都能通过自身哈希的校验
#[test]
fn verification_is_symmetric() {
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..20 {
        let mut file = vec![0u8; rng.random_range(0..5000)];
        rng.fill_bytes(&mut file);
        let digest = compute_file_hash(&file);
        assert_eq!(verify(&digest, &file), Verification::Match);

        file.push(0);
        assert_eq!(verify(&digest, &file), Verification::Mismatch);
    }
}
