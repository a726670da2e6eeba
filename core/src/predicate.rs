use crate::filter::{FilterIterator, FilterResult};
use sieveql::ast::CompositionOperator;
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// An immutable, thread-safe predicate over records of type `T`.
///
/// Cloning is cheap; clones share the same compiled function. Combinators capture their operands,
/// so a composed predicate owns everything it evaluates.
pub struct CompiledPredicate<T> {
    function: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T: 'static> CompiledPredicate<T> {
    pub fn new(function: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self { Self { function: Arc::new(function) } }

    pub fn evaluate(&self, record: &T) -> bool { (self.function)(record) }

    /// `self && other`, short-circuiting left to right.
    pub fn and(self, other: CompiledPredicate<T>) -> Self { Self::new(move |record| self.evaluate(record) && other.evaluate(record)) }

    /// `self || other`, short-circuiting left to right.
    pub fn or(self, other: CompiledPredicate<T>) -> Self { Self::new(move |record| self.evaluate(record) || other.evaluate(record)) }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self { Self::new(move |record| !self.evaluate(record)) }

    /// Combine with `other` using a query composition operator.
    pub fn compose(self, composition: CompositionOperator, other: CompiledPredicate<T>) -> Self {
        match composition {
            CompositionOperator::And => self.and(other),
            CompositionOperator::Or => self.or(other),
        }
    }

    /// The records that satisfy the predicate, in order.
    pub fn filter<I>(&self, records: I) -> impl Iterator<Item = I::Item>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        self.classify(records).filter_map(FilterResult::passed)
    }

    /// Every record, tagged with whether it passed.
    pub fn classify<I>(&self, records: I) -> FilterIterator<I::IntoIter, T>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        FilterIterator::new(records.into_iter(), self.clone())
    }
}

impl<T> Clone for CompiledPredicate<T> {
    fn clone(&self) -> Self { Self { function: self.function.clone() } }
}

impl<T> fmt::Debug for CompiledPredicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str("CompiledPredicate") }
}

pub fn and<T: 'static>(left: CompiledPredicate<T>, right: CompiledPredicate<T>) -> CompiledPredicate<T> { left.and(right) }

pub fn or<T: 'static>(left: CompiledPredicate<T>, right: CompiledPredicate<T>) -> CompiledPredicate<T> { left.or(right) }

pub fn not<T: 'static>(predicate: CompiledPredicate<T>) -> CompiledPredicate<T> { predicate.not() }

/// Fold clause predicates left to right. Each new predicate is the left operand and the running
/// accumulator the right one: `a, AND b, OR c` becomes `c || (b && a)`.
pub fn compose<T: 'static>(
    first: CompiledPredicate<T>,
    rest: impl IntoIterator<Item = (CompositionOperator, CompiledPredicate<T>)>,
) -> CompiledPredicate<T> {
    rest.into_iter().fold(first, |accumulator, (composition, next)| next.compose(composition, accumulator))
}
