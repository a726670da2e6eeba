//! Tag each record of an iterator with the outcome of a predicate.

use crate::predicate::CompiledPredicate;
use std::borrow::Borrow;

#[derive(Debug, Clone, PartialEq)]
pub enum FilterResult<R> {
    Pass(R),
    Skip(R),
}

impl<R> FilterResult<R> {
    pub fn is_pass(&self) -> bool { matches!(self, FilterResult::Pass(_)) }

    pub fn passed(self) -> Option<R> {
        match self {
            FilterResult::Pass(record) => Some(record),
            FilterResult::Skip(_) => None,
        }
    }

    pub fn into_inner(self) -> R {
        match self {
            FilterResult::Pass(record) | FilterResult::Skip(record) => record,
        }
    }
}

pub struct FilterIterator<I, T> {
    iter: I,
    predicate: CompiledPredicate<T>,
}

impl<I, T> FilterIterator<I, T>
where
    I: Iterator,
    I::Item: Borrow<T>,
{
    pub fn new(iter: I, predicate: CompiledPredicate<T>) -> Self { Self { iter, predicate } }
}

impl<I, T> Iterator for FilterIterator<I, T>
where
    T: 'static,
    I: Iterator,
    I::Item: Borrow<T>,
{
    type Item = FilterResult<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|item| if self.predicate.evaluate(item.borrow()) { FilterResult::Pass(item) } else { FilterResult::Skip(item) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.iter.size_hint() }
}
