use crate::error::{GeneratorError, Result};
use image::Rgb;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccentColor {
    pub name: String,
    #[serde(deserialize_with = "hex_color::deserialize")]
    pub color: Rgb<u8>,
}

impl AccentColor {
    pub fn new(name: &str, r: u8, g: u8, b: u8) -> Self {
        Self {
            name: name.to_string(),
            color: Rgb([r, g, b]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<AccentColor>")]
pub struct Palette {
    colors: Vec<AccentColor>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![
                AccentColor::new("orange", 241, 90, 34),
                AccentColor::new("blue", 52, 152, 219),
                AccentColor::new("green", 46, 204, 113),
                AccentColor::new("violet", 155, 89, 182),
                AccentColor::new("red", 231, 76, 60),
                AccentColor::new("yellow", 241, 196, 15),
                AccentColor::new("dark blue", 44, 62, 80),
            ],
        }
    }
}

impl Palette {
    pub fn new(colors: Vec<AccentColor>) -> Result<Self> {
        if colors.is_empty() {
            return Err(GeneratorError::config("palette must contain at least one color"));
        }
        Ok(Self { colors })
    }

    pub fn colors(&self) -> impl Iterator<Item = &AccentColor> {
        self.colors.iter()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl TryFrom<Vec<AccentColor>> for Palette {
    type Error = GeneratorError;

    fn try_from(colors: Vec<AccentColor>) -> Result<Self> {
        Palette::new(colors)
    }
}

/// Parses `#rrggbb` (the leading `#` is optional).
pub fn parse_hex_color(value: &str) -> Result<Rgb<u8>> {
    let digits = value.strip_prefix('#').unwrap_or(value);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(GeneratorError::config(format!(
            "expected a #rrggbb color, got {:?}",
            value
        )));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|e| GeneratorError::config(format!("bad color {:?}: {}", value, e)))
    };

    Ok(Rgb([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
}

pub(crate) mod hex_color {
    use image::Rgb;
    use serde::{de, Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rgb<u8>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_hex_color(&raw).map_err(de::Error::custom)
    }

    pub mod option {
        use image::Rgb;
        use serde::{de, Deserialize, Deserializer};

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Rgb<u8>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => super::super::parse_hex_color(&raw)
                    .map(Some)
                    .map_err(de::Error::custom),
                None => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_order() {
        let palette = Palette::default();
        let rgb: Vec<[u8; 3]> = palette.colors().map(|c| c.color.0).collect();
        assert_eq!(
            rgb,
            vec![
                [241, 90, 34],
                [52, 152, 219],
                [46, 204, 113],
                [155, 89, 182],
                [231, 76, 60],
                [241, 196, 15],
                [44, 62, 80],
            ]
        );
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert!(matches!(Palette::new(vec![]), Err(GeneratorError::Config { .. })));
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#f15a22").unwrap(), Rgb([241, 90, 34]));
        assert_eq!(parse_hex_color("2C3E50").unwrap(), Rgb([44, 62, 80]));
        assert!(parse_hex_color("#fff").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
        assert!(parse_hex_color("").is_err());
    }

    #[test]
    fn test_empty_json_palette_rejected() {
        assert!(serde_json::from_str::<Palette>("[]").is_err());
    }

    #[test]
    fn test_palette_json() {
        let palette: Palette =
            serde_json::from_str(r##"[{"name": "teal", "color": "#008080"}]"##).unwrap();
        assert_eq!(palette.len(), 1);
        assert_eq!(palette.colors().next().unwrap().color, Rgb([0, 128, 128]));

        let bad = serde_json::from_str::<Palette>(r##"[{"name": "teal", "color": "teal"}]"##);
        assert!(bad.is_err());
    }
}
