//! The twenty standard validator cards

use crate::core::{Criterion, Position, Relation, Repetition, Subject, Term, ValidatorId};

use Position::{Circle as C, Square as S, Triangle as T};
use Relation::{Equal, Greater, GreaterOrEqual, Less};

const fn compare(left: Position, relation: Relation, right: Position) -> Criterion {
    Criterion::Compare {
        left: Term::Digit(left),
        relation,
        right: Term::Digit(right),
    }
}

const fn parity(term: Term, even: bool) -> Criterion {
    Criterion::Parity { term, even }
}

const fn count(subject: Subject, relation: Relation, count: u8) -> Criterion {
    Criterion::Count {
        subject,
        relation,
        count,
    }
}

const fn pair_sum(relation: Relation, value: u8) -> Criterion {
    Criterion::Compare {
        left: Term::Pair(T, S),
        relation,
        right: Term::Constant(value),
    }
}

fn occurrences(value: u8) -> Vec<Criterion> {
    (0..=3)
        .map(|n| count(Subject::Value(value), Equal, n))
        .collect()
}

fn ordering(left: Position, right: Position) -> Vec<Criterion> {
    vec![
        compare(left, Less, right),
        compare(left, Equal, right),
        compare(left, Greater, right),
    ]
}

fn threshold(position: Position, value: u8) -> Vec<Criterion> {
    vec![
        Criterion::digit(position, Less, value),
        Criterion::digit(position, Equal, value),
        Criterion::digit(position, Greater, value),
    ]
}

fn extremes(largest: bool) -> Vec<Criterion> {
    [T, S, C]
        .into_iter()
        .map(|position| Criterion::Extreme { position, largest })
        .collect()
}

/// Card definitions in id order
pub(super) fn cards() -> Vec<(ValidatorId, Vec<Criterion>)> {
    vec![
        (
            1,
            vec![
                Criterion::digit(T, Equal, 1),
                Criterion::digit(T, Greater, 1),
            ],
        ),
        (2, threshold(T, 3)),
        (3, threshold(S, 3)),
        (4, threshold(S, 4)),
        (5, vec![parity(Term::Digit(T), true), parity(Term::Digit(T), false)]),
        (6, vec![parity(Term::Digit(S), true), parity(Term::Digit(S), false)]),
        (7, vec![parity(Term::Digit(C), true), parity(Term::Digit(C), false)]),
        (8, occurrences(1)),
        (9, occurrences(3)),
        (10, occurrences(4)),
        (11, ordering(T, S)),
        (12, ordering(T, C)),
        (13, ordering(S, C)),
        (14, extremes(false)),
        (15, extremes(true)),
        (
            16,
            vec![
                count(Subject::Even, GreaterOrEqual, 2),
                count(Subject::Even, Less, 2),
            ],
        ),
        (17, (0..=3).map(|n| count(Subject::Even, Equal, n)).collect()),
        (18, vec![parity(Term::Total, true), parity(Term::Total, false)]),
        (19, vec![pair_sum(Less, 6), pair_sum(Equal, 6), pair_sum(Greater, 6)]),
        (
            20,
            vec![
                Criterion::Repeats(Repetition::Triple),
                Criterion::Repeats(Repetition::Pair),
                Criterion::Repeats(Repetition::Distinct),
            ],
        ),
    ]
}
