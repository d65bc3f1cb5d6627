//! STC-S and DALI region grammars
//!
//! ```text
//! region       = POSITION [coordsys] pair
//!              | CIRCLE [coordsys] pair radius
//!              | BOX [coordsys] pair width height
//!              | POLYGON [coordsys] pair pair pair pair*
//!              | (UNION | INTERSECTION) [coordsys] ( region region region* )
//!              | NOT ( region )
//! dali         = x y | x y radius | x1 y1 x2 y2 x3 y3 (xn yn)*
//! ```
//!
//! A text that does not start with an STC-S keyword is read as DALI. The
//! coordinate system is the longest run of frame/refpos/flavor words after
//! the keyword; whatever follows must be numbers.

use super::number::parse_number;
use super::{CoordSys, Region, RegionType};
use crate::parser::{ErrorCode, ParseError};

pub(crate) fn parse_region(text: &str) -> Result<Region, ParseError> {
    let words = split(text);
    let starts_with_keyword = words
        .first()
        .is_some_and(|w| RegionType::from_keyword(w).is_some());
    if !starts_with_keyword {
        return parse_dali(&words);
    }

    let mut parser = StcsParser { words, pos: 0 };
    let region = parser.region()?;
    match parser.peek() {
        None => Ok(region),
        Some(word) => Err(stcs_error(format!(
            "Incorrect syntax: \"{word}\" was unexpected after the region \"{}\"!",
            region.to_stcs()
        ))),
    }
}

/// Words of an STC-S expression, parentheses apart
fn split(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    for chunk in text.split_whitespace() {
        let mut rest = chunk;
        while let Some(index) = rest.find(['(', ')']) {
            if index > 0 {
                words.push(&rest[..index]);
            }
            words.push(&rest[index..index + 1]);
            rest = &rest[index + 1..];
        }
        if !rest.is_empty() {
            words.push(rest);
        }
    }
    words
}

fn parse_dali(words: &[&str]) -> Result<Region, ParseError> {
    if words.is_empty() {
        return Err(ParseError::new(
            "Missing DALI expression to parse!",
            ErrorCode::E0502,
        ));
    }
    let numbers: Vec<f64> = words
        .iter()
        .map(|w| parse_number(w))
        .collect::<Option<_>>()
        .ok_or_else(dali_error)?;

    match numbers.as_slice() {
        [x, y] => Ok(Region::position(CoordSys::default(), *x, *y)),
        [x, y, radius] => Ok(Region::circle(CoordSys::default(), *x, *y, *radius)),
        _ if numbers.len() >= 6 && numbers.len() % 2 == 0 => Region::polygon(
            CoordSys::default(),
            numbers.chunks_exact(2).map(|c| [c[0], c[1]]).collect(),
        ),
        _ => Err(dali_error()),
    }
}

fn dali_error() -> ParseError {
    ParseError::new("Incorrect DALI region!", ErrorCode::E0502)
}

fn stcs_error(message: String) -> ParseError {
    ParseError::new(message, ErrorCode::E0501)
}

struct StcsParser<'a> {
    words: Vec<&'a str>,
    pos: usize,
}

impl<'a> StcsParser<'a> {
    fn peek(&self) -> Option<&'a str> {
        self.words.get(self.pos).copied()
    }

    fn region(&mut self) -> Result<Region, ParseError> {
        let Some(word) = self.peek() else {
            return Err(stcs_error(
                "Unexpected End Of Expression! A region was expected.".to_string(),
            ));
        };
        let Some(region_type) = RegionType::from_keyword(word) else {
            return Err(stcs_error(format!(
                "Incorrect syntax: \"{word}\" was unexpected! A region (POSITION, CIRCLE, BOX, POLYGON, UNION, INTERSECTION or NOT) was expected."
            )));
        };
        self.pos += 1;

        let coord_sys = if region_type == RegionType::Not {
            CoordSys::default()
        } else {
            self.coord_sys()?
        };
        match region_type {
            RegionType::Position => {
                let [x, y] = self.pair(region_type)?;
                Ok(Region::position(coord_sys, x, y))
            }
            RegionType::Circle => {
                let [x, y] = self.pair(region_type)?;
                let radius = self.number(region_type)?;
                Ok(Region::circle(coord_sys, x, y, radius))
            }
            RegionType::Box => {
                let [x, y] = self.pair(region_type)?;
                let width = self.number(region_type)?;
                let height = self.number(region_type)?;
                Ok(Region::rectangle(coord_sys, x, y, width, height))
            }
            RegionType::Polygon => {
                let mut vertices = vec![
                    self.pair(region_type)?,
                    self.pair(region_type)?,
                    self.pair(region_type)?,
                ];
                while self.peek().is_some_and(|w| parse_number(w).is_some()) {
                    vertices.push(self.pair(region_type)?);
                }
                Region::polygon(coord_sys, vertices)
            }
            RegionType::Union | RegionType::Intersection => {
                self.open(region_type)?;
                let mut regions = vec![self.region()?, self.region()?];
                while self.peek().is_some_and(|w| w != ")") {
                    regions.push(self.region()?);
                }
                self.close(region_type)?;
                if region_type == RegionType::Union {
                    Region::union(coord_sys, regions)
                } else {
                    Region::intersection(coord_sys, regions)
                }
            }
            RegionType::Not => {
                self.open(region_type)?;
                let inner = self.region()?;
                self.close(region_type)?;
                Ok(Region::negation(inner))
            }
        }
    }

    fn coord_sys(&mut self) -> Result<CoordSys, ParseError> {
        let (coord_sys, used) = CoordSys::parse_prefix(&self.words[self.pos..])?;
        self.pos += used;
        Ok(coord_sys)
    }

    fn pair(&mut self, region_type: RegionType) -> Result<[f64; 2], ParseError> {
        const PAIR: &str = "a coordinates pair (2 numerics separated by one or more spaces)";
        let x = self.expect_number(region_type, PAIR)?;
        let y = self.expect_number(region_type, PAIR)?;
        Ok([x, y])
    }

    fn number(&mut self, region_type: RegionType) -> Result<f64, ParseError> {
        self.expect_number(region_type, "a numeric")
    }

    fn expect_number(&mut self, region_type: RegionType, what: &str) -> Result<f64, ParseError> {
        let word = self.peek().ok_or_else(|| end_of_expression(region_type))?;
        let value = parse_number(word).ok_or_else(|| {
            stcs_error(format!(
                "Incorrect syntax: {what} was expected instead of \"{word}\"! Expected syntax: \"{}\".",
                region_type.syntax()
            ))
        })?;
        self.pos += 1;
        Ok(value)
    }

    fn open(&mut self, region_type: RegionType) -> Result<(), ParseError> {
        self.expect_word("(", region_type)
    }

    fn close(&mut self, region_type: RegionType) -> Result<(), ParseError> {
        self.expect_word(")", region_type)
    }

    fn expect_word(&mut self, expected: &str, region_type: RegionType) -> Result<(), ParseError> {
        match self.peek() {
            Some(word) if word == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(word) => Err(stcs_error(format!(
                "Incorrect syntax: \"{expected}\" was expected instead of \"{word}\"! Expected syntax: \"{}\".",
                region_type.syntax()
            ))),
            None => Err(end_of_expression(region_type)),
        }
    }
}

fn end_of_expression(region_type: RegionType) -> ParseError {
    stcs_error(format!(
        "Unexpected End Of Expression! Expected syntax: \"{}\".",
        region_type.syntax()
    ))
}
