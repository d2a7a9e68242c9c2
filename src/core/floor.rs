//! Floor assignment - which building floor each class sits on.
//!
//! Duty teachers supervise one floor at a time, so every class in the catalogue must map to
//! exactly one floor. The mapping is held as data in a [`FloorLayout`] (a list of
//! [`FloorRule`]s) rather than as conditionals; reassigning a class to another floor only
//! changes the table. [`FloorLayout::default`] is the school's current building layout:
//!
//! | Floor | Classes |
//! |---|---|
//! | 2 | 9A-9F |
//! | 3 | 8A-8F, 9G |
//! | 4 | 7A-7G, 8G |

use crate::{
    core::class::{ClassIdentifier, Grade, Section},
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// A building floor with a duty roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Floor {
    /// Floor 2
    Second,
    /// Floor 3
    Third,
    /// Floor 4
    Fourth,
}

impl Floor {
    /// Every duty floor, lowest first.
    pub const ALL: [Self; 3] = [Self::Second, Self::Third, Self::Fourth];

    /// Floor number as stored on duty sessions.
    #[must_use]
    pub const fn number(self) -> i32 {
        match self {
            Self::Second => 2,
            Self::Third => 3,
            Self::Fourth => 4,
        }
    }
}

impl TryFrom<i32> for Floor {
    type Error = Error;

    fn try_from(floor: i32) -> Result<Self> {
        match floor {
            2 => Ok(Self::Second),
            3 => Ok(Self::Third),
            4 => Ok(Self::Fourth),
            _ => Err(Error::InvalidFloor { floor }),
        }
    }
}

impl fmt::Display for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Places some sections of one grade on a floor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorRule {
    /// Floor the classes sit on
    pub floor: Floor,
    /// Grade the rule applies to
    pub grade: Grade,
    /// Sections of that grade on this floor
    pub sections: Vec<Section>,
}

impl FloorRule {
    /// Whether this rule places `class` on its floor.
    #[must_use]
    pub fn matches(&self, class: ClassIdentifier) -> bool {
        self.grade == class.grade && self.sections.contains(&class.section)
    }
}

const STANDARD_LAYOUT: [(Floor, Grade, &[Section]); 5] = [
    (
        Floor::Second,
        Grade::Ninth,
        &[
            Section::A,
            Section::B,
            Section::C,
            Section::D,
            Section::E,
            Section::F,
        ],
    ),
    (
        Floor::Third,
        Grade::Eighth,
        &[
            Section::A,
            Section::B,
            Section::C,
            Section::D,
            Section::E,
            Section::F,
        ],
    ),
    (Floor::Third, Grade::Ninth, &[Section::G]),
    (Floor::Fourth, Grade::Seventh, &Section::ALL),
    (Floor::Fourth, Grade::Eighth, &[Section::G]),
];

/// Class-to-floor table covering the whole class catalogue.
///
/// A layout is only constructible when its rules partition the catalogue: every class matches
/// exactly one rule. Lookups therefore never have to handle gaps or overlaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorLayout {
    rules: Vec<FloorRule>,
}

impl Default for FloorLayout {
    fn default() -> Self {
        Self {
            rules: STANDARD_LAYOUT
                .iter()
                .map(|(floor, grade, sections)| FloorRule {
                    floor: *floor,
                    grade: *grade,
                    sections: sections.to_vec(),
                })
                .collect(),
        }
    }
}

impl FloorLayout {
    /// Builds a layout from rules, checking that they partition the class catalogue.
    ///
    /// # Errors
    /// Returns [`Error::Config`] naming every class that is unassigned or assigned to more than
    /// one floor.
    pub fn new(rules: Vec<FloorRule>) -> Result<Self> {
        let mut assignments: BTreeMap<ClassIdentifier, Vec<Floor>> =
            ClassIdentifier::catalogue().map(|c| (c, Vec::new())).collect();

        for rule in &rules {
            for section in &rule.sections {
                let class = ClassIdentifier::new(rule.grade, *section);
                assignments.entry(class).or_default().push(rule.floor);
            }
        }

        let mut problems = Vec::new();
        for (class, floors) in &assignments {
            match floors.as_slice() {
                [_] => {}
                [] => problems.push(format!("{class} has no floor")),
                many => {
                    let listed: Vec<String> = many.iter().map(ToString::to_string).collect();
                    problems.push(format!("{class} is on floors {}", listed.join(", ")));
                }
            }
        }

        if !problems.is_empty() {
            return Err(Error::Config {
                message: format!("Invalid floor layout: {}", problems.join("; ")),
            });
        }

        Ok(Self { rules })
    }

    /// The rules making up this layout.
    #[must_use]
    pub fn rules(&self) -> &[FloorRule] {
        &self.rules
    }

    /// Rules placing classes on `floor`.
    pub fn rules_for(&self, floor: Floor) -> impl Iterator<Item = &FloorRule> {
        self.rules.iter().filter(move |rule| rule.floor == floor)
    }

    /// Floor of a catalogue class.
    #[must_use]
    pub fn floor_of(&self, class: ClassIdentifier) -> Option<Floor> {
        self.rules
            .iter()
            .find(|rule| rule.matches(class))
            .map(|rule| rule.floor)
    }

    /// Resolves a raw grade/section pair to its floor.
    ///
    /// # Errors
    /// Returns [`Error::InvalidClass`] if the pair is not in the catalogue.
    pub fn resolve(&self, grade: i32, section: &str) -> Result<Floor> {
        let class = ClassIdentifier::parse(grade, section)?;
        self.floor_of(class).ok_or_else(|| Error::InvalidClass {
            grade: grade.to_string(),
            section: section.to_string(),
        })
    }

    /// Whether `class` sits on `floor`.
    #[must_use]
    pub fn contains(&self, floor: Floor, class: ClassIdentifier) -> bool {
        self.rules_for(floor).any(|rule| rule.matches(class))
    }

    /// Roster predicate for `floor`: true for exactly the classes that resolve to it.
    pub fn on_floor(&self, floor: Floor) -> impl Fn(&ClassIdentifier) -> bool + '_ {
        move |class| self.contains(floor, *class)
    }

    /// Every class on `floor`, ordered by grade then section.
    #[must_use]
    pub fn classes_on(&self, floor: Floor) -> Vec<ClassIdentifier> {
        ClassIdentifier::catalogue()
            .filter(self.on_floor(floor))
            .collect()
    }
}

/// Resolves a grade/section pair to its floor using the standard building layout.
///
/// # Errors
/// Returns [`Error::InvalidClass`] if the pair is not in the catalogue.
pub fn resolve_floor(grade: i32, section: &str) -> Result<Floor> {
    FloorLayout::default().resolve(grade, section)
}

/// Roster predicate for `floor` under the standard building layout.
pub fn students_on_floor(floor: Floor) -> impl Fn(&ClassIdentifier) -> bool {
    let layout = FloorLayout::default();
    move |class| layout.contains(floor, *class)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_resolve_floor_known_classes() {
        assert_eq!(resolve_floor(9, "G").unwrap(), Floor::Third);
        assert_eq!(resolve_floor(8, "G").unwrap(), Floor::Fourth);
        assert_eq!(resolve_floor(7, "A").unwrap(), Floor::Fourth);
        assert_eq!(resolve_floor(9, "A").unwrap(), Floor::Second);
        assert_eq!(resolve_floor(8, "C").unwrap(), Floor::Third);
    }

    #[test]
    fn test_resolve_floor_out_of_catalogue() {
        assert!(matches!(
            resolve_floor(5, "A"),
            Err(Error::InvalidClass { .. })
        ));
        assert!(matches!(
            resolve_floor(7, "Z"),
            Err(Error::InvalidClass { .. })
        ));
    }

    #[test]
    fn test_predicates_partition_catalogue() {
        let predicates: Vec<(Floor, _)> = Floor::ALL
            .into_iter()
            .map(|floor| (floor, students_on_floor(floor)))
            .collect();

        for class in ClassIdentifier::catalogue() {
            let matching: Vec<Floor> = predicates
                .iter()
                .filter(|(_, on_floor)| on_floor(&class))
                .map(|(floor, _)| *floor)
                .collect();
            assert_eq!(matching.len(), 1, "{class} matched {matching:?}");

            let resolved = resolve_floor(class.grade.number(), &class.section.to_string());
            assert_eq!(resolved.unwrap(), matching[0]);
        }
    }

    #[test]
    fn test_classes_on_floor() {
        let layout = FloorLayout::default();
        let third: Vec<String> = layout
            .classes_on(Floor::Third)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(third, ["8A", "8B", "8C", "8D", "8E", "8F", "9G"]);

        assert_eq!(layout.classes_on(Floor::Second).len(), 6);
        assert_eq!(layout.classes_on(Floor::Fourth).len(), 8);
    }

    #[test]
    fn test_default_layout_passes_validation() {
        let layout = FloorLayout::default();
        let rebuilt = FloorLayout::new(layout.rules().to_vec()).unwrap();
        assert_eq!(rebuilt, layout);
    }

    #[test]
    fn test_layout_rejects_gaps_and_overlaps() {
        let mut rules = FloorLayout::default().rules().to_vec();
        // 9G moves to floor 2 as well as staying on floor 3, and 8G loses its floor
        rules[0].sections.push(Section::G);
        rules.pop();

        let message = match FloorLayout::new(rules) {
            Err(Error::Config { message }) => message,
            other => panic!("expected config error, got {other:?}"),
        };
        assert!(message.contains("8G has no floor"), "{message}");
        assert!(message.contains("9G is on floors 2, 3"), "{message}");
    }

    #[test]
    fn test_custom_layout_moves_class() {
        let mut rules = FloorLayout::default().rules().to_vec();
        // Move 9G from floor 3 to floor 2
        rules[0].sections.push(Section::G);
        rules.remove(2);
        let layout = FloorLayout::new(rules).unwrap();

        assert_eq!(layout.resolve(9, "G").unwrap(), Floor::Second);
        assert!(!layout.contains(Floor::Third, ClassIdentifier::parse(9, "G").unwrap()));
    }

    #[test]
    fn test_floor_try_from() {
        assert_eq!(Floor::try_from(3).unwrap(), Floor::Third);
        assert!(matches!(
            Floor::try_from(1),
            Err(Error::InvalidFloor { floor: 1 })
        ));
    }
}
