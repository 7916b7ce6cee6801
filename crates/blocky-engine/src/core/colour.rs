use std::{fmt, str::FromStr};

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An RGB colour of a leaf block.
///
/// Boards generated by the engine only ever use the four [`Colour::PALETTE`]
/// colours, but any RGB triple can be stored, painted, and scored.
///
/// # Example
///
/// ```
/// use blocky_engine::Colour;
///
/// let red: Colour = "real red".parse().unwrap();
/// assert_eq!(red, Colour::REAL_RED);
/// assert_eq!(red.to_string(), "#c72c3a");
/// assert_eq!(red.name(), "real red");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Colour {
    r: u8,
    g: u8,
    b: u8,
}

impl Colour {
    pub const PACIFIC_POINT: Self = Self::new(1, 128, 181);
    pub const REAL_RED: Self = Self::new(199, 44, 58);
    pub const OLD_OLIVE: Self = Self::new(138, 151, 71);
    pub const DAFFODIL_DELIGHT: Self = Self::new(255, 211, 92);

    /// The colours used by board generation and goal generation, in a fixed order.
    pub const PALETTE: [Self; 4] = [
        Self::PACIFIC_POINT,
        Self::REAL_RED,
        Self::OLD_OLIVE,
        Self::DAFFODIL_DELIGHT,
    ];

    const PALETTE_NAMES: [&'static str; 4] =
        ["pacific point", "real red", "old olive", "daffodil delight"];
    const PALETTE_CHARS: [char; 4] = ['P', 'R', 'O', 'D'];

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub fn palette_index(self) -> Option<usize> {
        Self::PALETTE.iter().position(|c| *c == self)
    }

    /// Human-readable name: the palette name, or the hex form for other colours.
    #[must_use]
    pub fn name(self) -> String {
        match self.palette_index() {
            Some(i) => Self::PALETTE_NAMES[i].to_owned(),
            None => self.to_string(),
        }
    }

    /// Single-character tag used when printing flattened grids.
    ///
    /// Colours outside the palette are shown as `?`.
    #[must_use]
    pub fn as_char(self) -> char {
        self.palette_index()
            .map_or('?', |i| Self::PALETTE_CHARS[i])
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let num = u32::from_str_radix(hex, 16).ok()?;
        let [_, r, g, b] = num.to_be_bytes();
        Some(Self::new(r, g, b))
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid colour '{input}': expected '#rrggbb' or a palette colour name")]
pub struct ParseColourError {
    input: String,
}

impl FromStr for Colour {
    type Err = ParseColourError;

    /// Parses `#rrggbb`, or a palette name such as `real red`, `real_red` or `REAL-RED`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColourError {
            input: s.to_owned(),
        };
        if let Some(hex) = s.strip_prefix('#') {
            return Self::from_hex(hex).ok_or_else(err);
        }
        let normalized = s
            .trim()
            .chars()
            .map(|c| match c {
                '_' | '-' => ' ',
                c => c.to_ascii_lowercase(),
            })
            .collect::<String>();
        Self::PALETTE_NAMES
            .iter()
            .position(|name| *name == normalized)
            .map(|i| Self::PALETTE[i])
            .ok_or_else(err)
    }
}

impl Serialize for Colour {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Colour {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let hex = s.strip_prefix('#').ok_or_else(|| {
            serde::de::Error::custom(format!("expected colour format '#rrggbb', got '{s}'"))
        })?;
        Self::from_hex(hex)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid colour hex: '{s}'")))
    }
}

/// Samples uniformly from [`Colour::PALETTE`].
impl Distribution<Colour> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Colour {
        Colour::PALETTE[rng.random_range(0..Colour::PALETTE.len())]
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_colour_serialization() {
        let serialized = serde_json::to_string(&Colour::PACIFIC_POINT).unwrap();
        assert_eq!(serialized, "\"#0180b5\"");

        let deserialized: Colour = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, Colour::PACIFIC_POINT);
    }

    #[test]
    fn test_colour_deserialization_error_cases() {
        assert!(serde_json::from_str::<Colour>("\"0180b5\"").is_err());
        assert!(serde_json::from_str::<Colour>("\"#0180b\"").is_err());
        assert!(serde_json::from_str::<Colour>("\"#0180b5ff\"").is_err());
        assert!(serde_json::from_str::<Colour>("\"#01 0b5\"").is_err());
        assert!(serde_json::from_str::<Colour>("\"#+180b5\"").is_err());
        // Names are accepted on the command line, not in board files
        assert!(serde_json::from_str::<Colour>("\"real red\"").is_err());
    }

    #[test]
    fn test_parse_palette_names() {
        assert_eq!("pacific point".parse(), Ok(Colour::PACIFIC_POINT));
        assert_eq!("REAL_RED".parse(), Ok(Colour::REAL_RED));
        assert_eq!("old-olive".parse(), Ok(Colour::OLD_OLIVE));
        assert_eq!(" Daffodil Delight ".parse(), Ok(Colour::DAFFODIL_DELIGHT));
        assert_eq!("#ffd35c".parse(), Ok(Colour::DAFFODIL_DELIGHT));
        assert_eq!("#000000".parse(), Ok(Colour::new(0, 0, 0)));
        assert!("mauve".parse::<Colour>().is_err());
        assert!("#12345".parse::<Colour>().is_err());
    }

    #[test]
    fn test_names_and_chars() {
        assert_eq!(Colour::OLD_OLIVE.name(), "old olive");
        assert_eq!(Colour::new(1, 2, 3).name(), "#010203");
        assert_eq!(Colour::REAL_RED.as_char(), 'R');
        assert_eq!(Colour::new(1, 2, 3).as_char(), '?');
    }

    #[test]
    fn test_random_colours_come_from_palette() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let colour: Colour = rng.random();
            let index = colour.palette_index().unwrap();
            seen[index] = true;
        }
        assert_eq!(seen, [true; 4]);
    }
}
