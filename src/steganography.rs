//! # 像素通道编解码模块
//!
//! 按行优先顺序遍历像素，每个像素只访问 R、G、B 三个通道，
//! 每个通道的最低有效位承载一位数据。写入与读取使用完全相同的遍历顺序，
//! 这一顺序就是编码端与解码端之间唯一的约定。

use crate::capacity::capacity;
use crate::constants::{BITS_PER_BYTE, CHANNELS_PER_PIXEL, HEADER_BITS, USABLE_CHANNELS};
use crate::error::{Result, StegoError};
use image::RgbaImage;

/// 承载隐藏数据的 RGBA 像素缓冲区。
///
/// 不变式：`pixels.len() == width * height * 4`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carrier {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Carrier {
    /// 用原始 RGBA 数据构造载体。
    ///
    /// # Errors
    ///
    /// 缓冲区长度与 `width × height × 4` 不一致时返回 [`StegoError::InvalidCarrier`]。
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS_PER_PIXEL));

        if expected != Some(pixels.len()) {
            return Err(StegoError::InvalidCarrier {
                width,
                height,
                expected: expected.unwrap_or(usize::MAX),
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// 可用于隐写的 RGB 通道总数。
    pub fn slots(&self) -> usize {
        self.pixels.len() / CHANNELS_PER_PIXEL * USABLE_CHANNELS
    }
}

impl From<RgbaImage> for Carrier {
    /// `RgbaImage` 的底层缓冲区可能比图像本身更长，多余的部分会被截掉。
    fn from(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let mut pixels = image.into_raw();
        pixels.truncate(width as usize * height as usize * CHANNELS_PER_PIXEL);

        Self {
            width,
            height,
            pixels,
        }
    }
}

impl TryFrom<Carrier> for RgbaImage {
    type Error = StegoError;

    fn try_from(carrier: Carrier) -> Result<Self> {
        let Carrier {
            width,
            height,
            pixels,
        } = carrier;
        let actual = pixels.len();

        RgbaImage::from_raw(width, height, pixels).ok_or(StegoError::InvalidCarrier {
            width,
            height,
            expected: width as usize * height as usize * CHANNELS_PER_PIXEL,
            actual,
        })
    }
}

/// 将位流写入载体副本的 RGB 通道最低有效位，返回修改后的副本。
///
/// 原载体不会被修改。容量不足时在任何修改发生之前失败，
/// 所以不存在只写了一部分的输出。
///
/// # Errors
///
/// 位流长度超过载体的 RGB 通道总数时返回 [`StegoError::CapacityExceeded`]，
/// 其中的字节数与 [`capacity`] 一致：都不含 32 位长度头。
pub fn write_bits(carrier: &Carrier, bits: &[bool]) -> Result<Carrier> {
    if bits.len() > carrier.slots() {
        return Err(StegoError::CapacityExceeded {
            required: bits.len().saturating_sub(HEADER_BITS).div_ceil(BITS_PER_BYTE),
            available: capacity(carrier.width, carrier.height),
        });
    }

    let mut doctored = carrier.clone();
    doctored
        .pixels
        .chunks_exact_mut(CHANNELS_PER_PIXEL)
        .flat_map(|pixel| pixel[..USABLE_CHANNELS].iter_mut())
        .zip(bits)
        .for_each(|(channel, &bit)| *channel = (*channel & 0xFE) | u8::from(bit));

    Ok(doctored)
}

/// 按写入顺序逐位读取载体通道最低有效位的迭代器。
pub struct ChannelBits<'a> {
    pixels: &'a [u8],
    slot: usize,
    slots: usize,
}

impl Iterator for ChannelBits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.slot >= self.slots {
            return None;
        }

        let pixel = self.slot / USABLE_CHANNELS;
        let channel = self.slot % USABLE_CHANNELS;
        self.slot += 1;

        Some(self.pixels[pixel * CHANNELS_PER_PIXEL + channel] & 0x1 == 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.slots - self.slot;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChannelBits<'_> {}

/// 按需读取载体中隐藏的位。与 `Iterator::take` 组合即可读取指定数量的位。
pub fn read_bits(carrier: &Carrier) -> ChannelBits<'_> {
    ChannelBits {
        pixels: &carrier.pixels,
        slot: 0,
        slots: carrier.slots(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, value: u8) -> Carrier {
        let len = (width * height) as usize * CHANNELS_PER_PIXEL;
        Carrier::new(width, height, vec![value; len]).unwrap()
    }

    #[test]
    fn rejects_mismatched_buffer() {
        let err = Carrier::new(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            StegoError::InvalidCarrier {
                expected: 16,
                actual: 15,
                ..
            }
        ));
    }

    #[test]
    fn writes_rgb_in_raster_order_and_skips_alpha() {
        let carrier = solid(2, 1, 0b1010_1010);
        let bits = [true, false, true, true];
        let doctored = write_bits(&carrier, &bits).unwrap();

        assert_eq!(
            doctored.pixels(),
            &[
                0b1010_1011,
                0b1010_1010,
                0b1010_1011,
                0b1010_1010,
                0b1010_1011,
                0b1010_1010,
                0b1010_1010,
                0b1010_1010
            ]
        );
        // 原载体保持不变
        assert_eq!(carrier.pixels(), &[0b1010_1010; 8]);
    }

    #[test]
    fn read_bits_mirrors_write_bits() {
        let carrier = solid(3, 2, 0xFF);
        let bits: Vec<bool> = (0..18).map(|i| i % 3 == 0).collect();
        let doctored = write_bits(&carrier, &bits).unwrap();
        let read: Vec<bool> = read_bits(&doctored).collect();
        assert_eq!(read, bits);
    }

    #[test]
    fn read_bits_can_be_limited() {
        let carrier = solid(4, 4, 0x01);
        assert_eq!(read_bits(&carrier).count(), 48);
        assert!(read_bits(&carrier).take(5).all(|bit| bit));
    }

    #[test]
    fn overlong_bitstream_reports_payload_bytes() {
        // 20 个像素 = 60 个通道，扣除长度头后可放 3 字节
        let carrier = solid(5, 4, 0);
        let bits = crate::framer::frame(b"abcd").unwrap();
        let err = write_bits(&carrier, &bits).unwrap_err();
        assert!(matches!(
            err,
            StegoError::CapacityExceeded {
                required: 4,
                available: 3
            }
        ));
        assert_eq!(capacity(5, 4), 3);
    }

    #[test]
    fn converts_to_and_from_rgba_image() {
        let image = RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 4]));
        let carrier = Carrier::from(image.clone());
        assert_eq!((carrier.width(), carrier.height()), (3, 2));
        assert_eq!(RgbaImage::try_from(carrier).unwrap(), image);
    }

    #[test]
    fn oversized_image_buffer_is_trimmed_to_dimensions() {
        let image = RgbaImage::from_raw(1, 1, vec![0xFF; 160]).unwrap();
        let carrier = Carrier::from(image);

        assert_eq!(carrier.pixels().len(), 4);
        assert_eq!(carrier.slots(), 3);
        assert_eq!(read_bits(&carrier).count(), 3);
        assert!(matches!(
            crate::codec::decode_payload(&carrier, &crate::config::CodecPolicy::default()),
            Err(StegoError::Truncated { available: 3, .. })
        ));
    }
}
