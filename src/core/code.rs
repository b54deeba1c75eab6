//! Secret code representation
//!
//! A code is three digits (triangle, square, circle), each in `1..=5`.
//! Every code has a dense index in `0..125` following lexicographic order,
//! which lets sets of codes live in a single `u128`.

use std::fmt;
use std::str::FromStr;

/// Smallest digit value
pub const MIN_DIGIT: u8 = 1;

/// Largest digit value
pub const MAX_DIGIT: u8 = 5;

/// Number of distinct digit values
pub const DIGIT_COUNT: usize = (MAX_DIGIT - MIN_DIGIT + 1) as usize;

/// Number of distinct codes (5³)
pub const CODE_COUNT: usize = DIGIT_COUNT * DIGIT_COUNT * DIGIT_COUNT;

/// One of the three digit slots of a code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    Triangle,
    Square,
    Circle,
}

impl Position {
    /// All positions in code order
    pub const ALL: [Self; 3] = [Self::Triangle, Self::Square, Self::Circle];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Triangle => 0,
            Self::Square => 1,
            Self::Circle => 2,
        }
    }

    /// Single-letter symbol used in criterion text (`t`, `s`, `c`)
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Triangle => 't',
            Self::Square => 's',
            Self::Circle => 'c',
        }
    }

    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            't' => Some(Self::Triangle),
            's' => Some(Self::Square),
            'c' => Some(Self::Circle),
            _ => None,
        }
    }
}

/// A candidate secret: triangle, square and circle digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code([u8; 3]);

/// Error type for invalid codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    InvalidLength(usize),
    DigitOutOfRange(u8),
    InvalidCharacter(char),
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => write!(f, "Code must have exactly 3 digits, got {len}"),
            Self::DigitOutOfRange(d) => {
                write!(f, "Digit {d} is outside {MIN_DIGIT}..={MAX_DIGIT}")
            }
            Self::InvalidCharacter(c) => write!(f, "Code contains invalid character '{c}'"),
        }
    }
}

impl std::error::Error for CodeError {}

impl Code {
    /// Create a code from its three digits
    ///
    /// # Errors
    /// Returns `CodeError::DigitOutOfRange` if any digit is outside `1..=5`.
    ///
    /// # Examples
    /// ```
    /// use turing_solver::core::Code;
    ///
    /// let code = Code::new(1, 3, 1).unwrap();
    /// assert_eq!(code.to_string(), "131");
    /// assert!(Code::new(0, 3, 1).is_err());
    /// ```
    pub fn new(triangle: u8, square: u8, circle: u8) -> Result<Self, CodeError> {
        for digit in [triangle, square, circle] {
            if !(MIN_DIGIT..=MAX_DIGIT).contains(&digit) {
                return Err(CodeError::DigitOutOfRange(digit));
            }
        }
        Ok(Self([triangle, square, circle]))
    }

    /// Build the code with the given dense index
    ///
    /// # Panics
    /// Panics in debug mode if `index >= CODE_COUNT`
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        debug_assert!(index < CODE_COUNT, "Code index must be < 125");
        let base = DIGIT_COUNT;
        Self([
            (index / (base * base)) as u8 + MIN_DIGIT,
            ((index / base) % base) as u8 + MIN_DIGIT,
            (index % base) as u8 + MIN_DIGIT,
        ])
    }

    /// Dense index in `0..125`, lexicographic with triangle most significant
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        let base = DIGIT_COUNT;
        let [t, s, c] = self.0;
        (t - MIN_DIGIT) as usize * base * base
            + (s - MIN_DIGIT) as usize * base
            + (c - MIN_DIGIT) as usize
    }

    /// Iterate every code in lexicographic order
    pub fn all() -> impl Iterator<Item = Self> {
        (0..CODE_COUNT).map(Self::from_index)
    }

    #[inline]
    #[must_use]
    pub const fn digits(self) -> [u8; 3] {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn digit(self, position: Position) -> u8 {
        self.0[position.index()]
    }

    #[inline]
    #[must_use]
    pub const fn triangle(self) -> u8 {
        self.0[0]
    }

    #[inline]
    #[must_use]
    pub const fn square(self) -> u8 {
        self.0[1]
    }

    #[inline]
    #[must_use]
    pub const fn circle(self) -> u8 {
        self.0[2]
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [t, s, c] = self.0;
        write!(f, "{t}{s}{c}")
    }
}

impl FromStr for Code {
    type Err = CodeError;

    /// Accepts `"123"`, `"1 2 3"` and `"1,2,3"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut digits = Vec::with_capacity(3);
        for ch in s.trim().chars() {
            match ch {
                ' ' | ',' => {}
                '0'..='9' => digits.push(ch as u8 - b'0'),
                _ => return Err(CodeError::InvalidCharacter(ch)),
            }
        }

        match digits.as_slice() {
            &[t, s, c] => Self::new(t, s, c),
            other => Err(CodeError::InvalidLength(other.len())),
        }
    }
}

/// A set of codes packed into 125 bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CodeSet(u128);

impl CodeSet {
    pub const EMPTY: Self = Self(0);

    /// Every code
    pub const FULL: Self = Self((1u128 << CODE_COUNT) - 1);

    /// Collect the codes satisfying a predicate
    pub fn from_predicate(predicate: impl Fn(Code) -> bool) -> Self {
        Code::all().filter(|&code| predicate(code)).collect()
    }

    #[inline]
    pub const fn insert(&mut self, code: Code) {
        self.0 |= 1u128 << code.index();
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, code: Code) -> bool {
        self.0 & (1u128 << code.index()) != 0
    }

    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Lowest code in lexicographic order
    #[must_use]
    pub const fn first(self) -> Option<Code> {
        if self.0 == 0 {
            None
        } else {
            Some(Code::from_index(self.0.trailing_zeros() as usize))
        }
    }

    /// The single member, if the set holds exactly one code
    #[must_use]
    pub const fn single(self) -> Option<Code> {
        if self.len() == 1 { self.first() } else { None }
    }

    /// Iterate members in lexicographic order
    pub fn iter(self) -> impl Iterator<Item = Code> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let index = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            Some(Code::from_index(index))
        })
    }
}

impl FromIterator<Code> for CodeSet {
    fn from_iter<I: IntoIterator<Item = Code>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for code in iter {
            set.insert(code);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_lexicographic_order() {
        let codes: Vec<Code> = Code::all().collect();
        assert_eq!(codes.len(), CODE_COUNT);
        assert_eq!(codes[0], Code::new(1, 1, 1).unwrap());
        assert_eq!(codes[1], Code::new(1, 1, 2).unwrap());
        assert_eq!(codes[5], Code::new(1, 2, 1).unwrap());
        assert_eq!(codes[124], Code::new(5, 5, 5).unwrap());

        for (i, code) in codes.iter().enumerate() {
            assert_eq!(code.index(), i);
        }
        assert!(codes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn digit_accessors() {
        let code = Code::new(2, 4, 5).unwrap();
        assert_eq!(code.triangle(), 2);
        assert_eq!(code.square(), 4);
        assert_eq!(code.circle(), 5);
        assert_eq!(code.digit(Position::Square), 4);
        assert_eq!(code.digits(), [2, 4, 5]);
    }

    #[test]
    fn code_rejects_out_of_range_digits() {
        assert_eq!(Code::new(0, 1, 1), Err(CodeError::DigitOutOfRange(0)));
        assert_eq!(Code::new(1, 6, 1), Err(CodeError::DigitOutOfRange(6)));
    }

    #[test]
    fn code_parsing() {
        let expected = Code::new(1, 3, 1).unwrap();
        assert_eq!("131".parse::<Code>(), Ok(expected));
        assert_eq!("1 3 1".parse::<Code>(), Ok(expected));
        assert_eq!(" 1,3,1 ".parse::<Code>(), Ok(expected));

        assert_eq!("13".parse::<Code>(), Err(CodeError::InvalidLength(2)));
        assert_eq!("1311".parse::<Code>(), Err(CodeError::InvalidLength(4)));
        assert_eq!("1x1".parse::<Code>(), Err(CodeError::InvalidCharacter('x')));
        assert_eq!("161".parse::<Code>(), Err(CodeError::DigitOutOfRange(6)));
    }

    #[test]
    fn code_display() {
        assert_eq!(Code::new(5, 3, 4).unwrap().to_string(), "534");
    }

    #[test]
    fn code_set_basics() {
        assert_eq!(CodeSet::FULL.len(), CODE_COUNT);
        assert!(CodeSet::EMPTY.is_empty());
        assert_eq!(CodeSet::EMPTY.first(), None);

        let odd_triangle = CodeSet::from_predicate(|c| c.triangle() % 2 == 1);
        assert_eq!(odd_triangle.len(), 75);
        assert_eq!(odd_triangle.first(), Some(Code::new(1, 1, 1).unwrap()));

        let ones = CodeSet::from_predicate(|c| c.digits() == [1, 1, 1]);
        assert_eq!(ones.single(), Some(Code::new(1, 1, 1).unwrap()));
        assert_eq!(odd_triangle.single(), None);
    }

    #[test]
    fn code_set_intersection_and_iteration() {
        let low_triangle = CodeSet::from_predicate(|c| c.triangle() == 1);
        let high_square = CodeSet::from_predicate(|c| c.square() == 5);
        let both = low_triangle.intersection(high_square);

        let members: Vec<String> = both.iter().map(|c| c.to_string()).collect();
        assert_eq!(members, vec!["151", "152", "153", "154", "155"]);
        assert!(both.contains(Code::new(1, 5, 3).unwrap()));
        assert!(!both.contains(Code::new(2, 5, 3).unwrap()));
    }
}
