//! Calendar predicates for `StartCalendarInterval`.
//!
//! A predicate maps calendar fields to values and matches when every field
//! matches; a list of predicates matches when any of them does. The
//! generators here expand per-field value sets into the full cross product.

use crate::tree::{Composite, Element, Node, Pair, Tag, Wrap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

/// Calendar fields, in the order they appear in a rendered predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    Month,
    Day,
    Week,
    Weekday,
    Hour,
    Minute,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Month,
        Field::Day,
        Field::Week,
        Field::Weekday,
        Field::Hour,
        Field::Minute,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Month => "Month",
            Field::Day => "Day",
            Field::Week => "Week",
            Field::Weekday => "Weekday",
            Field::Hour => "Hour",
            Field::Minute => "Minute",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One AND-ed set of field constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Predicate(BTreeMap<Field, i64>);

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: Field, value: i64) -> Self {
        self.0.insert(field, value);
        self
    }

    pub fn get(&self, field: Field) -> Option<i64> {
        self.0.get(&field).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, i64)> + '_ {
        self.0.iter().map(|(f, v)| (*f, *v))
    }

    /// Union of both predicates; on a shared field `other` wins.
    pub fn merged(&self, other: &Predicate) -> Predicate {
        let mut out = self.clone();
        out.0.extend(other.0.iter().map(|(f, v)| (*f, *v)));
        out
    }
}

impl FromIterator<(Field, i64)> for Predicate {
    fn from_iter<I: IntoIterator<Item = (Field, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Per-field arguments for the generators. Unset fields take `T::default()`,
/// which every generator treats as "not constrained".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields<T> {
    pub month: T,
    pub day: T,
    pub week: T,
    pub weekday: T,
    pub hour: T,
    pub minute: T,
}

impl<T> Fields<T> {
    fn into_entries(self) -> [(Field, T); 6] {
        [
            (Field::Month, self.month),
            (Field::Day, self.day),
            (Field::Week, self.week),
            (Field::Weekday, self.weekday),
            (Field::Hour, self.hour),
            (Field::Minute, self.minute),
        ]
    }
}

/// A single predicate holding only the non-zero fields.
pub fn generate(fields: Fields<i64>) -> Predicate {
    fields
        .into_entries()
        .into_iter()
        .filter(|(_, v)| *v != 0)
        .collect()
}

/// Every combination of the supplied per-field values. Fields given an empty
/// list do not take part.
pub fn generate_mix(fields: Fields<Vec<i64>>) -> Vec<Predicate> {
    let lists: Vec<Vec<Predicate>> = fields
        .into_entries()
        .into_iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(field, values)| single_field(field, values))
        .collect();
    expand(&lists)
}

/// Every combination of the supplied half-open ranges.
pub fn generate_interval(fields: Fields<Option<Range<i64>>>) -> Vec<Predicate> {
    let lists: Vec<Vec<Predicate>> = fields
        .into_entries()
        .into_iter()
        .filter_map(|(field, range)| range.map(|r| single_field(field, r)))
        .collect();
    expand(&lists)
}

fn single_field(field: Field, values: impl IntoIterator<Item = i64>) -> Vec<Predicate> {
    values
        .into_iter()
        .map(|v| Predicate::new().with(field, v))
        .collect()
}

fn expand(lists: &[Vec<Predicate>]) -> Vec<Predicate> {
    let out = cross_combine(lists);
    tracing::debug!(fields = lists.len(), predicates = out.len(), "expanded calendar predicates");
    out
}

/// Cartesian product of predicate lists, merging one element from each.
///
/// The first list varies slowest. A single list comes back unchanged; no
/// lists at all yields nothing.
pub fn cross_combine(lists: &[Vec<Predicate>]) -> Vec<Predicate> {
    let Some((first, rest)) = lists.split_first() else {
        return Vec::new();
    };
    if rest.is_empty() {
        return first.clone();
    }

    let tail = cross_combine(rest);
    let mut out = Vec::with_capacity(first.len() * tail.len());
    for head in first {
        for combo in &tail {
            out.push(head.merged(combo));
        }
    }
    out
}

/// Inner `<dict>` per predicate, one integer pair per field.
pub struct CalendarEntries;

impl Wrap for CalendarEntries {
    type Item = Predicate;

    fn wrap(item: Predicate) -> Element {
        let pairs: Vec<Pair> = item
            .iter()
            .map(|(field, v)| Pair::integer(field.as_str(), v))
            .collect();
        Element::Node(Node::dict(pairs))
    }
}

pub type StartCalendarInterval = Composite<CalendarEntries>;

/// `StartCalendarInterval` option holding `predicates`. Empty predicates
/// are dropped; launchd would read one as "every minute".
pub fn start_calendar_interval(
    predicates: impl IntoIterator<Item = Predicate>,
) -> StartCalendarInterval {
    Composite::new("StartCalendarInterval", Tag::Array, predicates)
}
