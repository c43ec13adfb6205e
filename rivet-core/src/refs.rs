//! Descendants collected by their reference key.

use std::{mem, slice};

use indexmap::{map, IndexMap};

/// Elements sharing a reference key.
///
/// A key seen once is `Single`; it becomes `Many` as soon as a second element
/// carries it. `Many` always holds at least two elements, in document order.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RefValue<E> {
    Single(E),
    Many(Vec<E>),
}

impl<E> RefValue<E> {
    pub(crate) fn push(&mut self, element: E) {
        *self = match mem::replace(self, Self::Many(Vec::new())) {
            Self::Single(first) => Self::Many(vec![first, element]),
            Self::Many(mut elements) => {
                elements.push(element);
                Self::Many(elements)
            }
        };
    }

    pub fn first(&self) -> &E {
        &self.as_slice()[0]
    }

    pub fn as_slice(&self) -> &[E] {
        match self {
            Self::Single(element) => slice::from_ref(element),
            Self::Many(elements) => elements,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Self::Single(_))
    }

    pub fn iter(&self) -> slice::Iter<'_, E> {
        self.as_slice().iter()
    }

    pub fn into_vec(self) -> Vec<E> {
        match self {
            Self::Single(element) => vec![element],
            Self::Many(elements) => elements,
        }
    }
}

impl<'a, E> IntoIterator for &'a RefValue<E> {
    type Item = &'a E;
    type IntoIter = slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Reference key lookup for one root element, in order of first appearance.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Refs<E>(IndexMap<String, RefValue<E>>);

impl<E> Default for Refs<E> {
    fn default() -> Self {
        Self(IndexMap::new())
    }
}

impl<E> Refs<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, key: String, element: E) {
        match self.0.entry(key) {
            map::Entry::Vacant(entry) => {
                entry.insert(RefValue::Single(element));
            }
            map::Entry::Occupied(mut entry) => entry.get_mut().push(element),
        }
    }

    pub fn get(&self, key: &str) -> Option<&RefValue<E>> {
        self.0.get(key)
    }

    /// First element for `key`, whether it is single or repeated.
    pub fn one(&self, key: &str) -> Option<&E> {
        self.get(key).map(RefValue::first)
    }

    /// Every element for `key`; empty when the key is absent.
    pub fn all(&self, key: &str) -> &[E] {
        self.get(key).map(RefValue::as_slice).unwrap_or_default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> map::Iter<'_, String, RefValue<E>> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<String, RefValue<E>> {
        self.0
    }
}

impl<'a, E> IntoIterator for &'a Refs<E> {
    type Item = (&'a String, &'a RefValue<E>);
    type IntoIter = map::Iter<'a, String, RefValue<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E> IntoIterator for Refs<E> {
    type Item = (String, RefValue<E>);
    type IntoIter = map::IntoIter<String, RefValue<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<E> FromIterator<(String, E)> for Refs<E> {
    fn from_iter<T: IntoIterator<Item = (String, E)>>(iter: T) -> Self {
        iter.into_iter().fold(Self::new(), |mut refs, (key, element)| {
            refs.insert(key, element);
            refs
        })
    }
}
