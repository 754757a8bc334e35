use std::cmp::Ordering;
use std::sync::LazyLock;

use eframe::egui::Color32;

use crate::error::HexError;
use crate::palette::Palette;

// 颜色匹配：对整张命名调色板按与目标 RGB 的欧氏距离排序
// 不做感知加权（无 CIE Lab），距离即 RGB 空间直线距离

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// 编码为小写 `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for Color32 {
    fn from(c: Rgb) -> Self {
        Color32::from_rgb(c.r, c.g, c.b)
    }
}

/// 解码 `#RGB` / `#RRGGBB`（大小写不敏感；不去除空白，长度须恰为 4 或 7）
///
/// 解码器只报告失败，不做兜底；兜底策略由 [`match_palette`] 决定。
pub fn decode_hex(hex: &str) -> Result<Rgb, HexError> {
    use HexError::*;

    if !hex.is_ascii() {
        return Err(NonAscii);
    }
    let bytes = hex.as_bytes();
    if bytes.len() != 4 && bytes.len() != 7 {
        return Err(InvalidLength(bytes.len()));
    }
    if bytes[0] != b'#' {
        return Err(MissingHash);
    }

    let nibble = |c: u8| -> Result<u8, HexError> {
        match c {
            b'0'..=b'9' => Ok(c - b'0'),
            b'a'..=b'f' => Ok(c - b'a' + 10),
            b'A'..=b'F' => Ok(c - b'A' + 10),
            _ => Err(InvalidDigit(c as char)),
        }
    };

    let digits = &bytes[1..];
    if digits.len() == 3 {
        // #RGB：每位重复一次，a -> aa
        let r = nibble(digits[0])?;
        let g = nibble(digits[1])?;
        let b = nibble(digits[2])?;
        Ok(Rgb::new(r * 17, g * 17, b * 17))
    } else {
        let byte = |i: usize| -> Result<u8, HexError> {
            Ok(nibble(digits[i])? << 4 | nibble(digits[i + 1])?)
        };
        Ok(Rgb::new(byte(0)?, byte(2)?, byte(4)?))
    }
}

/// RGB 空间欧氏距离
pub fn distance(a: Rgb, b: Rgb) -> f64 {
    let dr = a.r as f64 - b.r as f64;
    let dg = a.g as f64 - b.g as f64;
    let db = a.b as f64 - b.b as f64;
    (dr * dr + dg * dg + db * db).sqrt()
}

/// 黑白之间的距离，约 441.67
pub static MAX_DISTANCE: LazyLock<f64> = LazyLock::new(|| distance(Rgb::BLACK, Rgb::WHITE));

/// 相似度百分比：100 = 完全相同，0 = 黑白距离；不做截断
pub fn percentage(distance: f64) -> f64 {
    (1.0 - distance / *MAX_DISTANCE) * 100.0
}

/// 排序后的一条匹配结果，可直接交给界面渲染
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedColor {
    pub name: String,
    pub hex: String,
    pub rgb: Rgb,
    pub distance: f64,
    pub percentage: f64,
    /// hex 解码失败时为 false（此时 rgb 为黑色，distance 为最大值）
    pub valid: bool,
}

impl MatchedColor {
    pub fn label(&self) -> String {
        format!("{} ({:.2}%)", self.name, self.percentage)
    }
}

/// 将调色板拍平并按与 `query` 的距离升序排列
///
/// 排序稳定：距离相同时合法条目排在解码失败的条目之前，其余保持调色板声明顺序。
/// 这只影响一种情况：声明在前的无效单色与恰好相距 `MAX_DISTANCE` 的合法条目并列时，合法条目排前。
pub fn match_palette(query: Rgb, palette: &Palette) -> Vec<MatchedColor> {
    let mut out: Vec<MatchedColor> = palette
        .flatten()
        .into_iter()
        .map(|candidate| {
            let (rgb, dist, valid) = match decode_hex(&candidate.hex) {
                Ok(rgb) => (rgb, distance(query, rgb), true),
                Err(_) => (Rgb::BLACK, *MAX_DISTANCE, false),
            };
            MatchedColor {
                name: candidate.name,
                hex: candidate.hex,
                rgb,
                distance: dist,
                percentage: percentage(dist),
                valid,
            }
        })
        .collect();

    out.sort_by(|a, b| match a.distance.total_cmp(&b.distance) {
        Ordering::Equal => b.valid.cmp(&a.valid),
        ord => ord,
    });
    tracing::trace!(query = %query.to_hex(), candidates = out.len(), "palette ranked");
    out
}
