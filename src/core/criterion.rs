//! Validator criteria as data
//!
//! A criterion is a closed set of predicate kinds over a code, each carrying a
//! few small integer parameters. Every criterion has a canonical text form which
//! is used both for display and for catalog files:
//!
//! | Kind        | Examples                           |
//! |-------------|------------------------------------|
//! | comparison  | `t<s`, `t==1`, `t+s>6`             |
//! | parity      | `even(t)`, `odd(t+s+c)`            |
//! | count       | `count(3)==2`, `count(even)>=2`    |
//! | extreme     | `min(t)`, `max(c)`                 |
//! | repetition  | `triple`, `pair`, `distinct`       |

use super::code::{Code, Position};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Binary relation between two small integers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Less,
    LessOrEqual,
    Equal,
    NotEqual,
    GreaterOrEqual,
    Greater,
}

impl Relation {
    /// Longest symbols first so `<=` is not read as `<`
    const PARSE_ORDER: [Self; 6] = [
        Self::LessOrEqual,
        Self::GreaterOrEqual,
        Self::Equal,
        Self::NotEqual,
        Self::Less,
        Self::Greater,
    ];

    #[inline]
    #[must_use]
    pub fn holds(self, left: u8, right: u8) -> bool {
        match self {
            Self::Less => left < right,
            Self::LessOrEqual => left <= right,
            Self::Equal => left == right,
            Self::NotEqual => left != right,
            Self::GreaterOrEqual => left >= right,
            Self::Greater => left > right,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::GreaterOrEqual => ">=",
            Self::Greater => ">",
        }
    }

    /// Split `text` at the first relation symbol
    fn split(text: &str) -> Option<(&str, Self, &str)> {
        let start = text.find(['<', '>', '=', '!'])?;
        let rest = &text[start..];
        Self::PARSE_ORDER
            .into_iter()
            .find(|relation| rest.starts_with(relation.symbol()))
            .map(|relation| (&text[..start], relation, &rest[relation.symbol().len()..]))
    }
}

/// A numeric quantity derived from a code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Term {
    Digit(Position),
    Pair(Position, Position),
    Total,
    Constant(u8),
}

impl Term {
    #[inline]
    #[must_use]
    pub fn value(self, code: Code) -> u8 {
        match self {
            Self::Digit(position) => code.digit(position),
            Self::Pair(first, second) => code.digit(first) + code.digit(second),
            Self::Total => code.digits().iter().sum(),
            Self::Constant(value) => value,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(position) => write!(f, "{}", position.symbol()),
            Self::Pair(first, second) => write!(f, "{}+{}", first.symbol(), second.symbol()),
            Self::Total => f.write_str("t+s+c"),
            Self::Constant(value) => write!(f, "{value}"),
        }
    }
}

impl FromStr for Term {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            return s
                .parse()
                .map(Self::Constant)
                .map_err(|_| "constant out of range");
        }

        let positions = s
            .split('+')
            .map(|part| {
                let mut chars = part.trim().chars();
                match (chars.next(), chars.next()) {
                    (Some(symbol), None) => Position::from_symbol(symbol).ok_or("unknown digit"),
                    _ => Err("expected t, s or c"),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        match positions.as_slice() {
            &[position] => Ok(Self::Digit(position)),
            &[first, second] if first != second => Ok(Self::Pair(first, second)),
            &[a, b, c] if a != b && a != c && b != c => Ok(Self::Total),
            _ => Err("sums must name distinct digits"),
        }
    }
}

/// What a count criterion counts among the three digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Value(u8),
    Even,
}

impl Subject {
    #[inline]
    const fn matches(self, digit: u8) -> bool {
        match self {
            Self::Value(value) => digit == value,
            Self::Even => digit % 2 == 0,
        }
    }
}

/// How many digits repeat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Repetition {
    /// All three digits equal
    Triple,
    /// Exactly two digits equal
    Pair,
    /// No two digits equal
    Distinct,
}

/// A boolean predicate over a code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    Compare {
        left: Term,
        relation: Relation,
        right: Term,
    },
    Parity {
        term: Term,
        even: bool,
    },
    Count {
        subject: Subject,
        relation: Relation,
        count: u8,
    },
    /// The digit at `position` is strictly the largest (or smallest) of the three
    Extreme {
        position: Position,
        largest: bool,
    },
    Repeats(Repetition),
}

/// Error returned when criterion text cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid criterion '{text}': {reason}")]
pub struct ParseCriterionError {
    pub text: String,
    pub reason: &'static str,
}

impl Criterion {
    /// Shorthand for comparing a digit against a constant
    #[must_use]
    pub const fn digit(position: Position, relation: Relation, value: u8) -> Self {
        Self::Compare {
            left: Term::Digit(position),
            relation,
            right: Term::Constant(value),
        }
    }

    /// Evaluate the criterion for a code
    ///
    /// # Examples
    /// ```
    /// use turing_solver::core::{Code, Criterion};
    ///
    /// let smaller: Criterion = "t<s".parse().unwrap();
    /// assert!(smaller.holds(Code::new(1, 2, 5).unwrap()));
    /// assert!(!smaller.holds(Code::new(3, 2, 5).unwrap()));
    /// ```
    #[must_use]
    pub fn holds(&self, code: Code) -> bool {
        match *self {
            Self::Compare {
                left,
                relation,
                right,
            } => relation.holds(left.value(code), right.value(code)),
            Self::Parity { term, even } => (term.value(code) % 2 == 0) == even,
            Self::Count {
                subject,
                relation,
                count,
            } => {
                let matching = code
                    .digits()
                    .iter()
                    .filter(|&&d| subject.matches(d))
                    .count();
                relation.holds(matching as u8, count)
            }
            Self::Extreme { position, largest } => {
                let value = code.digit(position);
                Position::ALL
                    .into_iter()
                    .filter(|&other| other != position)
                    .all(|other| {
                        let other = code.digit(other);
                        if largest {
                            value > other
                        } else {
                            value < other
                        }
                    })
            }
            Self::Repeats(repetition) => {
                let [t, s, c] = code.digits();
                let equal_pairs = usize::from(t == s) + usize::from(t == c) + usize::from(s == c);
                match repetition {
                    Repetition::Triple => equal_pairs == 3,
                    Repetition::Pair => equal_pairs == 1,
                    Repetition::Distinct => equal_pairs == 0,
                }
            }
        }
    }

    fn parse_call<'a>(text: &'a str, name: &str) -> Option<&'a str> {
        text.strip_prefix(name)?
            .strip_prefix('(')?
            .strip_suffix(')')
    }

    fn parse_count(text: &str) -> Result<Self, &'static str> {
        let inner = text.strip_prefix("count(").ok_or("expected count(...)")?;
        let (subject, rest) = inner.split_once(')').ok_or("unclosed count(")?;
        let subject = match subject.trim() {
            "even" => Subject::Even,
            value => Subject::Value(value.parse().map_err(|_| "bad count subject")?),
        };
        let (left, relation, count) = Relation::split(rest).ok_or("expected a relation")?;
        if !left.trim().is_empty() {
            return Err("unexpected text before relation");
        }
        let count = count.trim().parse().map_err(|_| "bad count")?;
        Ok(Self::Count {
            subject,
            relation,
            count,
        })
    }

    fn parse_extreme(text: &str, largest: bool) -> Result<Self, &'static str> {
        match text.trim().parse::<Term>()? {
            Term::Digit(position) => Ok(Self::Extreme { position, largest }),
            _ => Err("min/max take a single digit"),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compare {
                left,
                relation,
                right,
            } => write!(f, "{left}{}{right}", relation.symbol()),
            Self::Parity { term, even } => {
                let name = if *even { "even" } else { "odd" };
                write!(f, "{name}({term})")
            }
            Self::Count {
                subject,
                relation,
                count,
            } => match subject {
                Subject::Value(value) => write!(f, "count({value}){}{count}", relation.symbol()),
                Subject::Even => write!(f, "count(even){}{count}", relation.symbol()),
            },
            Self::Extreme { position, largest } => {
                let name = if *largest { "max" } else { "min" };
                write!(f, "{name}({})", position.symbol())
            }
            Self::Repeats(repetition) => f.write_str(match repetition {
                Repetition::Triple => "triple",
                Repetition::Pair => "pair",
                Repetition::Distinct => "distinct",
            }),
        }
    }
}

impl FromStr for Criterion {
    type Err = ParseCriterionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text: String = s.chars().filter(|c| !c.is_whitespace()).collect();

        let parsed = match text.as_str() {
            "triple" => Ok(Self::Repeats(Repetition::Triple)),
            "pair" => Ok(Self::Repeats(Repetition::Pair)),
            "distinct" => Ok(Self::Repeats(Repetition::Distinct)),
            t if t.starts_with("count(") => Self::parse_count(t),
            t => {
                if let Some(inner) = Self::parse_call(t, "even") {
                    inner.parse().map(|term| Self::Parity { term, even: true })
                } else if let Some(inner) = Self::parse_call(t, "odd") {
                    inner.parse().map(|term| Self::Parity { term, even: false })
                } else if let Some(inner) = Self::parse_call(t, "min") {
                    Self::parse_extreme(inner, false)
                } else if let Some(inner) = Self::parse_call(t, "max") {
                    Self::parse_extreme(inner, true)
                } else {
                    Relation::split(t)
                        .ok_or("expected a comparison such as t<s")
                        .and_then(|(left, relation, right)| {
                            Ok(Self::Compare {
                                left: left.parse()?,
                                relation,
                                right: right.parse()?,
                            })
                        })
                }
            }
        };

        parsed.map_err(|reason| ParseCriterionError {
            text: s.trim().to_string(),
            reason,
        })
    }
}
