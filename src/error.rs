use thiserror::Error;

/// 十六进制颜色解码失败的原因
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("invalid hex length {0} (expected #RGB or #RRGGBB)")]
    InvalidLength(usize),
    #[error("hex color must be ASCII")]
    NonAscii,
    #[error("hex color must start with '#'")]
    MissingHash,
    #[error("invalid hex digit {0:?}")]
    InvalidDigit(char),
}

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("palette asset not found: {0}")]
    MissingAsset(String),
    #[error("palette is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("palette entry {name:?} is neither a hex string nor a shade table")]
    InvalidEntry { name: String },
}
