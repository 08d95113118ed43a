use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ZodiacSign
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// The twelve signs in cyclic order starting at Aries. Moon and rising
/// lookups both index into this table.
pub const SIGNS: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    pub fn all() -> &'static [ZodiacSign] {
        &SIGNS
    }

    /// Position in [`SIGNS`], Aries = 0.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Sign at `index` modulo 12.
    pub fn from_index(index: usize) -> ZodiacSign {
        SIGNS[index % SIGNS.len()]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "♈",
            ZodiacSign::Taurus => "♉",
            ZodiacSign::Gemini => "♊",
            ZodiacSign::Cancer => "♋",
            ZodiacSign::Leo => "♌",
            ZodiacSign::Virgo => "♍",
            ZodiacSign::Libra => "♎",
            ZodiacSign::Scorpio => "♏",
            ZodiacSign::Sagittarius => "♐",
            ZodiacSign::Capricorn => "♑",
            ZodiacSign::Aquarius => "♒",
            ZodiacSign::Pisces => "♓",
        }
    }

    /// Elements repeat Fire, Earth, Air, Water around the wheel.
    pub fn element(self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    /// Modalities repeat Cardinal, Fixed, Mutable around the wheel.
    pub fn modality(self) -> Modality {
        match self.index() % 3 {
            0 => Modality::Cardinal,
            1 => Modality::Fixed,
            _ => Modality::Mutable,
        }
    }

    /// Traditional ruler.
    pub fn ruling_planet(self) -> &'static str {
        match self {
            ZodiacSign::Aries | ZodiacSign::Scorpio => "Mars",
            ZodiacSign::Taurus | ZodiacSign::Libra => "Venus",
            ZodiacSign::Gemini | ZodiacSign::Virgo => "Mercury",
            ZodiacSign::Cancer => "Moon",
            ZodiacSign::Leo => "Sun",
            ZodiacSign::Sagittarius | ZodiacSign::Pisces => "Jupiter",
            ZodiacSign::Capricorn | ZodiacSign::Aquarius => "Saturn",
        }
    }

    /// Inclusive sun-sign date range as `((start_month, start_day), (end_month, end_day))`.
    pub fn date_range(self) -> ((u32, u32), (u32, u32)) {
        match self {
            ZodiacSign::Aries => ((3, 21), (4, 19)),
            ZodiacSign::Taurus => ((4, 20), (5, 20)),
            ZodiacSign::Gemini => ((5, 21), (6, 20)),
            ZodiacSign::Cancer => ((6, 21), (7, 22)),
            ZodiacSign::Leo => ((7, 23), (8, 22)),
            ZodiacSign::Virgo => ((8, 23), (9, 22)),
            ZodiacSign::Libra => ((9, 23), (10, 22)),
            ZodiacSign::Scorpio => ((10, 23), (11, 21)),
            ZodiacSign::Sagittarius => ((11, 22), (12, 21)),
            ZodiacSign::Capricorn => ((12, 22), (1, 19)),
            ZodiacSign::Aquarius => ((1, 20), (2, 18)),
            ZodiacSign::Pisces => ((2, 19), (3, 20)),
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ZodiacSign {
    type Err = crate::error::NatalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SIGNS
            .iter()
            .copied()
            .find(|sign| sign.as_str() == s)
            .ok_or_else(|| crate::error::NatalError::InvalidSign(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Element / Modality
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Air => "Air",
            Element::Water => "Water",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Modality::Cardinal => "Cardinal",
            Modality::Fixed => "Fixed",
            Modality::Mutable => "Mutable",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
