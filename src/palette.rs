use rust_embed::RustEmbed;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::color_match::decode_hex;
use crate::error::PaletteError;

/// 内置调色板文件名（位于 `assets/`）
pub const BUILTIN_PALETTE: &str = "tailwind.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shade {
    pub label: String,
    pub hex: String,
}

/// 调色板条目：单色，或“色系 + 色阶”
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteEntry {
    Flat { name: String, hex: String },
    Family { family: String, shades: Vec<Shade> },
}

/// 拍平后的候选色
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub hex: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    pub entries: Vec<PaletteEntry>,
}

// JSON 中每个键的取值：hex 字符串或 色阶 -> hex 的表
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Flat(String),
    Family(Map<String, Value>),
}

impl Palette {
    pub fn new(entries: Vec<PaletteEntry>) -> Self {
        Self { entries }
    }

    /// 从 JSON 对象构建调色板，保持声明顺序
    pub fn from_json(bytes: &[u8]) -> Result<Self, PaletteError> {
        let root: Map<String, Value> = serde_json::from_slice(bytes)?;
        let mut entries = Vec::with_capacity(root.len());
        for (name, value) in root {
            let raw: RawEntry = serde_json::from_value(value)
                .map_err(|_| PaletteError::InvalidEntry { name: name.clone() })?;
            let entry = match raw {
                RawEntry::Flat(hex) => PaletteEntry::Flat { name, hex },
                RawEntry::Family(table) => {
                    let mut shades = Vec::with_capacity(table.len());
                    for (label, hex) in table {
                        match hex {
                            Value::String(hex) => shades.push(Shade { label, hex }),
                            _ => return Err(PaletteError::InvalidEntry { name: format!("{name}-{label}") }),
                        }
                    }
                    PaletteEntry::Family { family: name, shades }
                }
            };
            entries.push(entry);
        }
        Ok(Self { entries })
    }

    /// 编译进二进制的 Tailwind 调色板
    pub fn builtin() -> Result<Self, PaletteError> {
        let file = EmbeddedPalettes::get(BUILTIN_PALETTE)
            .ok_or_else(|| PaletteError::MissingAsset(BUILTIN_PALETTE.to_owned()))?;
        let palette = Self::from_json(file.data.as_ref())?;
        tracing::info!(entries = palette.entries.len(), candidates = palette.len(), "loaded builtin palette");
        Ok(palette)
    }

    /// 拍平：单色 -> 1 个候选；色系 -> 每个色阶一个，命名为 `<family>-<shade>`
    pub fn flatten(&self) -> Vec<Candidate> {
        let mut out = Vec::with_capacity(self.len());
        for entry in &self.entries {
            match entry {
                PaletteEntry::Flat { name, hex } => out.push(Candidate { name: name.clone(), hex: hex.clone() }),
                PaletteEntry::Family { family, shades } => {
                    out.extend(shades.iter().map(|s| Candidate {
                        name: format!("{}-{}", family, s.label),
                        hex: s.hex.clone(),
                    }));
                }
            }
        }
        out
    }

    /// 候选色数量（拍平后）
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .map(|e| match e {
                PaletteEntry::Flat { .. } => 1,
                PaletteEntry::Family { shades, .. } => shades.len(),
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 返回 hex 无法解码的候选名；单色与色阶同样校验
    pub fn validate(&self) -> Vec<String> {
        self.flatten()
            .into_iter()
            .filter_map(|c| match decode_hex(&c.hex) {
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!(name = %c.name, hex = %c.hex, error = %e, "palette entry will rank as maximally distant");
                    Some(c.name)
                }
            })
            .collect()
    }
}

#[derive(RustEmbed)]
#[folder = "assets"]
pub struct EmbeddedPalettes;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouped_entry_expands_per_shade() {
        let palette = Palette::from_json(br##"{"blue": {"500": "#3b82f6"}}"##).unwrap();
        let flat = palette.flatten();
        assert_eq!(flat, vec![Candidate { name: "blue-500".into(), hex: "#3b82f6".into() }]);
        assert_eq!(palette.len(), 1);
    }

    #[test]
    fn keeps_declaration_order() {
        let json = br##"{
            "white": "#fff",
            "zeta": {"900": "#111", "100": "#eee"},
            "alpha": "#000"
        }"##;
        let names: Vec<String> = Palette::from_json(json).unwrap().flatten().into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["white", "zeta-900", "zeta-100", "alpha"]);
    }

    #[test]
    fn rejects_unexpected_values() {
        let err = Palette::from_json(br#"{"count": 3}"#).unwrap_err();
        assert!(matches!(err, PaletteError::InvalidEntry { ref name } if name == "count"));

        let err = Palette::from_json(br#"{"blue": {"500": 1}}"#).unwrap_err();
        assert!(matches!(err, PaletteError::InvalidEntry { ref name } if name == "blue-500"));

        assert!(matches!(Palette::from_json(b"[]"), Err(PaletteError::Json(_))));
    }

    #[test]
    fn builtin_palette_loads() {
        let palette = Palette::builtin().unwrap();
        // 5 个单色 + 22 个色系 × 11 个色阶
        assert_eq!(palette.len(), 5 + 22 * 11);
        let flat = palette.flatten();
        assert_eq!(flat[0].name, "inherit");
        assert!(flat.iter().any(|c| c.name == "blue-500" && c.hex == "#3b82f6"));
    }

    #[test]
    fn validate_reports_css_keywords() {
        let palette = Palette::builtin().unwrap();
        assert_eq!(palette.validate(), ["inherit", "current", "transparent"]);
    }

    #[test]
    fn empty_palette() {
        let palette = Palette::default();
        assert!(palette.is_empty());
        assert!(palette.flatten().is_empty());
    }
}
