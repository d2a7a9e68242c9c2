//! Class identifiers - the fixed catalogue of grade/section pairs.
//!
//! The school runs grades 7, 8 and 9, each split into sections A through G. A
//! [`ClassIdentifier`] can only be built from a pair in that catalogue, so the rest of the crate
//! never has to re-check raw grade numbers or section letters.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// School grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    /// Grade 7
    Seventh,
    /// Grade 8
    Eighth,
    /// Grade 9
    Ninth,
}

impl Grade {
    /// Every grade, lowest first.
    pub const ALL: [Self; 3] = [Self::Seventh, Self::Eighth, Self::Ninth];

    /// Numeric grade as stored in the database.
    #[must_use]
    pub const fn number(self) -> i32 {
        match self {
            Self::Seventh => 7,
            Self::Eighth => 8,
            Self::Ninth => 9,
        }
    }

    /// Looks up a grade by its number.
    #[must_use]
    pub const fn from_number(number: i32) -> Option<Self> {
        match number {
            7 => Some(Self::Seventh),
            8 => Some(Self::Eighth),
            9 => Some(Self::Ninth),
            _ => None,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Class section within a grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Section {
    /// Section A
    A,
    /// Section B
    B,
    /// Section C
    C,
    /// Section D
    D,
    /// Section E
    E,
    /// Section F
    F,
    /// Section G
    G,
}

impl Section {
    /// Every section in alphabetical order.
    pub const ALL: [Self; 7] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
    ];

    /// Section letter.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::F => 'F',
            Self::G => 'G',
        }
    }

    /// Looks up a section by letter, ignoring case.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|section| section.letter() == letter.to_ascii_uppercase())
    }

    /// Parses a one-letter section string such as `"g"` or `" B "`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let mut chars = raw.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Self::from_letter(letter),
            _ => None,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A class in the catalogue, e.g. `9G`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassIdentifier {
    /// Grade of the class
    pub grade: Grade,
    /// Section within the grade
    pub section: Section,
}

impl ClassIdentifier {
    /// Builds a class identifier from already validated parts.
    #[must_use]
    pub const fn new(grade: Grade, section: Section) -> Self {
        Self { grade, section }
    }

    /// Validates a raw grade number and section string against the catalogue.
    pub fn parse(grade: i32, section: &str) -> Result<Self> {
        let invalid = || Error::InvalidClass {
            grade: grade.to_string(),
            section: section.to_string(),
        };
        let grade = Grade::from_number(grade).ok_or_else(invalid)?;
        let section = Section::parse(section).ok_or_else(invalid)?;
        Ok(Self::new(grade, section))
    }

    /// Every class in the catalogue, ordered by grade then section.
    pub fn catalogue() -> impl Iterator<Item = Self> {
        Grade::ALL.into_iter().flat_map(|grade| {
            Section::ALL
                .into_iter()
                .map(move |section| Self::new(grade, section))
        })
    }
}

impl fmt::Display for ClassIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.grade, self.section)
    }
}
