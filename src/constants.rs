/// 长度头所占的位数。
/// 长度头是一个按 MSB 优先写入的 `u32`，记录的是载荷的**位数**而非字节数。
pub const HEADER_BITS: usize = 32;

/// 每个像素的通道数 (R, G, B, A)。
pub const CHANNELS_PER_PIXEL: usize = 4;

/// 每个像素中可用于隐写的通道数。只使用 R、G、B，Alpha 通道永远不会被修改。
pub const USABLE_CHANNELS: usize = 3;

/// 每个字节的位数。
pub const BITS_PER_BYTE: usize = 8;

/// 哈希载荷的标记前缀。以此开头的文本被识别为哈希，而不是普通消息。
pub const HASH_PREFIX: &str = "HASH:";

/// 默认的载荷大小上限 (字节)。
/// 解码时长度头超过 `DEFAULT_MAX_PAYLOAD_BYTES * 8` 位即视为无效。
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 1_000_000;

/// 流式计算文件哈希时每次读取的块大小 (字节)。
pub const HASH_BLOCK_SIZE: usize = 4096;

/// 未指定输出路径时，隐写结果图像的文件名前缀。
pub const DOCTORED_PREFIX: &str = "doctored_";

/// 未指定输出路径时，恢复出的文本文件的文件名前缀。
pub const RECOVERED_PREFIX: &str = "recovered_";
