//! A non-empty list with a focused center element.
//!
//! ## Learning: Making Illegal States Unrepresentable
//!
//! A carousel always has a current page and a segmented control always
//! has a selected segment. Storing `(left, center, right)` instead of
//! `(Vec<E>, usize)` means there is no way to build an empty list or a
//! selection index that points past the end.
//!
//! ```text
//!   left          center   right
//! [ 1, 2 ]   →     3    ← [ 4, 5 ]      center_index == left.len() == 2
//! ```

use std::fmt;
use std::ops::Index;

/// Direction and distance of a selection change.
///
/// `Left` moves the center towards the right-hand elements (the list
/// shifts left under a fixed viewport), `Right` moves it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftOperation {
    Left(usize),
    Right(usize),
}

/// Non-empty ordered collection with one distinguished element.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ZipList<E> {
    left: Vec<E>,
    center: E,
    right: Vec<E>,
}

impl<E> ZipList<E> {
    /// Creates a list from its three parts.
    pub fn new(left: Vec<E>, center: E, right: Vec<E>) -> Self {
        Self {
            left,
            center,
            right,
        }
    }

    /// Creates a single-element list.
    pub fn singleton(element: E) -> Self {
        Self::new(Vec::new(), element, Vec::new())
    }

    /// Splits `elements` around `center_index`.
    ///
    /// Returns `None` if `elements` is empty or the index is out of range.
    pub fn from_vec(mut elements: Vec<E>, center_index: usize) -> Option<Self> {
        if center_index >= elements.len() {
            return None;
        }
        let right = elements.split_off(center_index + 1);
        let center = elements.pop()?;
        Some(Self::new(elements, center, right))
    }

    /// Total number of elements, always at least one.
    pub fn len(&self) -> usize {
        self.left.len() + self.right.len() + 1
    }

    /// Always false; present for API symmetry with other collections.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Position of the center element.
    pub fn center_index(&self) -> usize {
        self.left.len()
    }

    pub fn center(&self) -> &E {
        &self.center
    }

    pub fn left(&self) -> &[E] {
        &self.left
    }

    pub fn right(&self) -> &[E] {
        &self.right
    }

    /// Returns the element at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&E> {
        let center_index = self.center_index();
        if index < center_index {
            self.left.get(index)
        } else if index == center_index {
            Some(&self.center)
        } else {
            self.right.get(index - center_index - 1)
        }
    }

    /// Iterates from the leftmost to the rightmost element.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.left
            .iter()
            .chain(std::iter::once(&self.center))
            .chain(self.right.iter())
    }

    /// Applies `transform` pointwise, keeping the center position.
    pub fn map<N>(self, mut transform: impl FnMut(E) -> N) -> ZipList<N> {
        let left = self.left.into_iter().map(&mut transform).collect();
        let center = transform(self.center);
        let right = self.right.into_iter().map(&mut transform).collect();
        ZipList::new(left, center, right)
    }

    /// Consumes the list, returning its elements in order.
    pub fn into_vec(self) -> Vec<E> {
        let mut elements = self.left;
        elements.push(self.center);
        elements.extend(self.right);
        elements
    }
}

impl<E: Clone> ZipList<E> {
    /// Moves the center to the first element on the right.
    ///
    /// Returns `None` at the rightmost position; there is no wraparound.
    pub fn shift_left(&self) -> Option<Self> {
        let (new_center, rest) = self.right.split_first()?;
        let mut left = self.left.clone();
        left.push(self.center.clone());
        Some(Self::new(left, new_center.clone(), rest.to_vec()))
    }

    /// Moves the center to the last element on the left.
    ///
    /// Returns `None` at the leftmost position; there is no wraparound.
    pub fn shift_right(&self) -> Option<Self> {
        let (new_center, rest) = self.left.split_last()?;
        let mut right = Vec::with_capacity(self.right.len() + 1);
        right.push(self.center.clone());
        right.extend(self.right.iter().cloned());
        Some(Self::new(rest.to_vec(), new_center.clone(), right))
    }

    /// Applies a shift operation step by step.
    ///
    /// Fails as a whole if any step crosses a boundary.
    pub fn shifted(&self, operation: ShiftOperation) -> Option<Self> {
        let (count, step): (usize, fn(&Self) -> Option<Self>) = match operation {
            ShiftOperation::Left(count) => (count, Self::shift_left),
            ShiftOperation::Right(count) => (count, Self::shift_right),
        };
        (0..count).try_fold(self.clone(), |list, _| step(&list))
    }
}

impl<E> Index<usize> for ZipList<E> {
    type Output = E;

    /// Panics when `index` is out of range; that is a caller bug.
    fn index(&self, index: usize) -> &E {
        match self.get(index) {
            Some(element) => element,
            None => panic!(
                "ZipList index {} out of bounds (len {})",
                index,
                self.len()
            ),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for ZipList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZipList")
            .field("left", &self.left)
            .field("center", &self.center)
            .field("right", &self.right)
            .finish()
    }
}

impl<E> IntoIterator for ZipList<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> ZipList<i32> {
        ZipList::new(vec![1, 2], 3, vec![4, 5])
    }

    #[test]
    fn test_center_index_and_shifts() {
        let list = sample();
        assert_eq!(list.center_index(), 2);
        assert_eq!(list.len(), 5);
        assert_eq!(*list.shift_left().unwrap().center(), 4);
        assert_eq!(*list.shift_right().unwrap().center(), 2);
    }

    #[test]
    fn test_shift_at_boundaries() {
        let leftmost = ZipList::new(vec![], 1, vec![2]);
        assert!(leftmost.shift_right().is_none());

        let rightmost = ZipList::new(vec![1], 2, vec![]);
        assert!(rightmost.shift_left().is_none());

        assert!(ZipList::singleton('x').shift_left().is_none());
    }

    #[test]
    fn test_indexing_covers_all_parts() {
        let list = sample();
        let collected: Vec<i32> = (0..list.len()).map(|i| list[i]).collect();
        assert_eq!(collected, vec![1, 2, 3, 4, 5]);
        assert_eq!(list.get(5), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_out_of_range_panics() {
        let list = sample();
        let _ = list[9];
    }

    #[test]
    fn test_from_vec() {
        let list = ZipList::from_vec(vec!['a', 'b', 'c'], 1).unwrap();
        assert_eq!(list.left(), &['a']);
        assert_eq!(*list.center(), 'b');
        assert_eq!(list.right(), &['c']);

        assert!(ZipList::<u8>::from_vec(vec![], 0).is_none());
        assert!(ZipList::from_vec(vec![1], 1).is_none());
    }

    #[test]
    fn test_map_keeps_center() {
        let list = sample().map(|n| n * 10);
        assert_eq!(list.center_index(), 2);
        assert_eq!(list.into_vec(), vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn test_shifted_by_count() {
        let list = sample();
        assert_eq!(*list.shifted(ShiftOperation::Left(2)).unwrap().center(), 5);
        assert_eq!(*list.shifted(ShiftOperation::Right(2)).unwrap().center(), 1);
        assert!(list.shifted(ShiftOperation::Left(3)).is_none());
        assert_eq!(list.shifted(ShiftOperation::Left(0)), Some(list.clone()));
    }

    fn zip_lists() -> impl Strategy<Value = ZipList<u16>> {
        (
            prop::collection::vec(any::<u16>(), 0..8),
            any::<u16>(),
            prop::collection::vec(any::<u16>(), 0..8),
        )
            .prop_map(|(left, center, right)| ZipList::new(left, center, right))
    }

    proptest! {
        #[test]
        fn prop_shift_left_then_right_round_trips(list in zip_lists()) {
            if let Some(shifted) = list.shift_left() {
                prop_assert_eq!(shifted.shift_right(), Some(list.clone()));
            } else {
                prop_assert!(list.right().is_empty());
            }
        }

        #[test]
        fn prop_count_invariant(list in zip_lists()) {
            prop_assert_eq!(list.len(), list.left().len() + list.right().len() + 1);
            prop_assert_eq!(list.iter().count(), list.len());
            if let Some(shifted) = list.shift_right() {
                prop_assert_eq!(shifted.len(), list.len());
                prop_assert_eq!(shifted.center_index() + 1, list.center_index());
            }
        }
    }
}
