//! Coordinate systems: `[frame] [refpos] [flavor]`

use std::fmt;
use std::str::FromStr;

use crate::parser::{ErrorCode, ParseError};

macro_rules! stc_enum {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident, [$($variant:ident => $text:literal),+ $(,)?]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const DEFAULT: $name = $name::$default;

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            /// Case-insensitive lookup
            pub fn parse(word: &str) -> Option<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|value| value.as_str().eq_ignore_ascii_case(word))
            }

            pub fn is_default(self) -> bool {
                self == Self::DEFAULT
            }

            /// `(A|B|C)`, as shown in syntax messages
            pub(crate) fn alternatives() -> String {
                let names: Vec<&str> = Self::ALL.iter().map(|v| v.as_str()).collect();
                format!("({})", names.join("|"))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::DEFAULT
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

stc_enum!(
    /// Reference frame
    Frame, default = UnknownFrame, [
        Ecliptic => "ECLIPTIC",
        Fk4 => "FK4",
        Fk5 => "FK5",
        J2000 => "J2000",
        Galactic => "GALACTIC",
        Icrs => "ICRS",
        UnknownFrame => "UNKNOWNFRAME",
    ]
);

stc_enum!(
    /// Reference position
    RefPos, default = UnknownRefPos, [
        Barycenter => "BARYCENTER",
        Geocenter => "GEOCENTER",
        Heliocenter => "HELIOCENTER",
        Lsr => "LSR",
        Topocenter => "TOPOCENTER",
        Relocatable => "RELOCATABLE",
        UnknownRefPos => "UNKNOWNREFPOS",
    ]
);

stc_enum!(
    /// Coordinate flavor
    Flavor, default = Spherical2, [
        Cartesian2 => "CARTESIAN2",
        Cartesian3 => "CARTESIAN3",
        Spherical2 => "SPHERICAL2",
    ]
);

impl Flavor {
    pub fn is_cartesian(self) -> bool {
        matches!(self, Self::Cartesian2 | Self::Cartesian3)
    }
}

/// A coordinate system
///
/// Only valid combinations can be built: a cartesian flavor always comes
/// with an unknown frame and an unknown reference position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordSys {
    frame: Frame,
    refpos: RefPos,
    flavor: Flavor,
}

impl CoordSys {
    pub fn new(frame: Frame, refpos: RefPos, flavor: Flavor) -> Result<Self, ParseError> {
        if flavor.is_cartesian() && (!frame.is_default() || !refpos.is_default()) {
            return Err(ParseError::new(
                format!(
                    "Invalid coordinate system \"{frame} {refpos} {flavor}\": a cartesian flavor MUST have an UNKNOWNFRAME and UNKNOWNREFPOS!"
                ),
                ErrorCode::E0402,
            ));
        }
        Ok(Self {
            frame,
            refpos,
            flavor,
        })
    }

    /// Parse `[frame] [refpos] [flavor]` (case-insensitive)
    ///
    /// An empty or blank string is the default coordinate system.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let (coord_sys, consumed) = Self::parse_prefix(&words)?;
        match words.get(consumed) {
            None => Ok(coord_sys),
            Some(word) => Err(ParseError::new(
                format!(
                    "Incorrect syntax: \"{word}\" was unexpected! Expected syntax: \"{}\" ; an empty string is also allowed and will be interpreted as \"{}\".",
                    Self::syntax(),
                    Self::default().to_full_stcs()
                ),
                ErrorCode::E0401,
            )),
        }
    }

    /// Longest leading sequence of `words` forming a coordinate system
    ///
    /// Returns the coordinate system and the number of words it uses. Used
    /// by the STC-S grammar, where the coordinate system is followed by
    /// numbers.
    pub(crate) fn parse_prefix(words: &[&str]) -> Result<(Self, usize), ParseError> {
        let mut index = 0;
        let frame = words.get(index).and_then(|w| Frame::parse(w));
        if frame.is_some() {
            index += 1;
        }
        let refpos = words.get(index).and_then(|w| RefPos::parse(w));
        if refpos.is_some() {
            index += 1;
        }
        let flavor = words.get(index).and_then(|w| Flavor::parse(w));
        if flavor.is_some() {
            index += 1;
        }

        let coord_sys = Self::new(
            frame.unwrap_or_default(),
            refpos.unwrap_or_default(),
            flavor.unwrap_or_default(),
        )?;
        Ok((coord_sys, index))
    }

    /// Expected syntax, listing every allowed value
    pub fn syntax() -> String {
        format!(
            "[{}] [{}] [{}]",
            Frame::alternatives(),
            RefPos::alternatives(),
            Flavor::alternatives()
        )
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn refpos(&self) -> RefPos {
        self.refpos
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn is_default(&self) -> bool {
        self.frame.is_default() && self.refpos.is_default() && self.flavor.is_default()
    }

    /// STC-S form without the default parts (empty for the default system)
    pub fn to_stcs(&self) -> String {
        let mut parts = Vec::with_capacity(3);
        if !self.frame.is_default() {
            parts.push(self.frame.as_str());
        }
        if !self.refpos.is_default() {
            parts.push(self.refpos.as_str());
        }
        if !self.flavor.is_default() {
            parts.push(self.flavor.as_str());
        }
        parts.join(" ")
    }

    /// STC-S form with all three parts
    pub fn to_full_stcs(&self) -> String {
        format!("{} {} {}", self.frame, self.refpos, self.flavor)
    }
}

impl FromStr for CoordSys {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CoordSys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_stcs())
    }
}
