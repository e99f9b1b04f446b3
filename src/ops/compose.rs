//! Transform and predicate values, and their composition.
//!
//! Combinators are generic over these traits instead of over `Fn` directly so
//! that a fused chain can hold a single composed value. Every closure with
//! the right signature implements the matching trait. The composition types
//! are local, so they never overlap with the closure impls.
//!
//! A composed value runs each part exactly once per element, first part first.

/* ===================== transforms ===================== */

/// One-argument transform.
pub trait Selector<In> {
    type Out;
    fn apply(&self, input: In) -> Self::Out;
}

impl<In, Out, F> Selector<In> for F
where
    F: Fn(In) -> Out,
{
    type Out = Out;

    #[inline]
    fn apply(&self, input: In) -> Out {
        self(input)
    }
}

/// Transform that also receives the element's zero-based position.
pub trait SelectorAt<In> {
    type Out;
    fn apply(&self, input: In, index: usize) -> Self::Out;
}

impl<In, Out, F> SelectorAt<In> for F
where
    F: Fn(In, usize) -> Out,
{
    type Out = Out;

    #[inline]
    fn apply(&self, input: In, index: usize) -> Out {
        self(input, index)
    }
}

/// `second(first(x))`.
#[derive(Debug, Clone, Copy)]
pub struct Compose<F, G> {
    first: F,
    second: G,
}

impl<F, G> Compose<F, G> {
    pub fn new(first: F, second: G) -> Self {
        Self { first, second }
    }
}

impl<In, F, G> Selector<In> for Compose<F, G>
where
    F: Selector<In>,
    G: Selector<F::Out>,
{
    type Out = G::Out;

    #[inline]
    fn apply(&self, input: In) -> G::Out {
        self.second.apply(self.first.apply(input))
    }
}

/// `second(first(x, i))`: indexed transform followed by a plain one.
#[derive(Debug, Clone, Copy)]
pub struct ComposeAt<F, G> {
    first: F,
    second: G,
}

impl<F, G> ComposeAt<F, G> {
    pub fn new(first: F, second: G) -> Self {
        Self { first, second }
    }
}

impl<In, F, G> SelectorAt<In> for ComposeAt<F, G>
where
    F: SelectorAt<In>,
    G: Selector<F::Out>,
{
    type Out = G::Out;

    #[inline]
    fn apply(&self, input: In, index: usize) -> G::Out {
        self.second.apply(self.first.apply(input, index))
    }
}

/// `second(first(x), i)`: plain transform followed by an indexed one.
#[derive(Debug, Clone, Copy)]
pub struct ComposeThenAt<F, G> {
    first: F,
    second: G,
}

impl<F, G> ComposeThenAt<F, G> {
    pub fn new(first: F, second: G) -> Self {
        Self { first, second }
    }
}

impl<In, F, G> SelectorAt<In> for ComposeThenAt<F, G>
where
    F: Selector<In>,
    G: SelectorAt<F::Out>,
{
    type Out = G::Out;

    #[inline]
    fn apply(&self, input: In, index: usize) -> G::Out {
        self.second.apply(self.first.apply(input), index)
    }
}

/// `second(first(x, i), i)`.
#[derive(Debug, Clone, Copy)]
pub struct ComposeAtAt<F, G> {
    first: F,
    second: G,
}

impl<F, G> ComposeAtAt<F, G> {
    pub fn new(first: F, second: G) -> Self {
        Self { first, second }
    }
}

impl<In, F, G> SelectorAt<In> for ComposeAtAt<F, G>
where
    F: SelectorAt<In>,
    G: SelectorAt<F::Out>,
{
    type Out = G::Out;

    #[inline]
    fn apply(&self, input: In, index: usize) -> G::Out {
        self.second.apply(self.first.apply(input, index), index)
    }
}

/// Dereferences `&T` into `T` for `Copy` elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct Copied;

impl<'a, T: Copy + 'a> Selector<&'a T> for Copied {
    type Out = T;

    #[inline]
    fn apply(&self, input: &'a T) -> T {
        *input
    }
}

/// Clones `&T` into `T`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cloned;

impl<'a, T: Clone + 'a> Selector<&'a T> for Cloned {
    type Out = T;

    #[inline]
    fn apply(&self, input: &'a T) -> T {
        input.clone()
    }
}

/* ===================== predicates ===================== */

/// Element test.
pub trait Predicate<T: ?Sized> {
    fn test(&self, item: &T) -> bool;
}

impl<T: ?Sized, F> Predicate<T> for F
where
    F: Fn(&T) -> bool,
{
    #[inline]
    fn test(&self, item: &T) -> bool {
        self(item)
    }
}

/// Element test that also receives the element's position in the source.
pub trait PredicateAt<T: ?Sized> {
    fn test(&self, item: &T, index: usize) -> bool;
}

impl<T: ?Sized, F> PredicateAt<T> for F
where
    F: Fn(&T, usize) -> bool,
{
    #[inline]
    fn test(&self, item: &T, index: usize) -> bool {
        self(item, index)
    }
}

/// Short-circuiting conjunction: `second` only runs when `first` accepts.
#[derive(Debug, Clone, Copy)]
pub struct And<P, Q> {
    first: P,
    second: Q,
}

impl<P, Q> And<P, Q> {
    pub fn new(first: P, second: Q) -> Self {
        Self { first, second }
    }
}

impl<T: ?Sized, P, Q> Predicate<T> for And<P, Q>
where
    P: Predicate<T>,
    Q: Predicate<T>,
{
    #[inline]
    fn test(&self, item: &T) -> bool {
        self.first.test(item) && self.second.test(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compositions_apply_in_order() {
        let plus_one = |x: i32| x + 1;
        let double = |x: i32| x * 2;
        assert_eq!(Compose::new(plus_one, double).apply(3), 8);
        assert_eq!(Compose::new(double, plus_one).apply(3), 7);

        let offset = |x: i32, i: usize| x + i as i32;
        assert_eq!(ComposeAt::new(offset, double).apply(3, 2), 10);
        assert_eq!(ComposeThenAt::new(double, offset).apply(3, 2), 8);
        assert_eq!(ComposeAtAt::new(offset, offset).apply(3, 2), 7);
    }

    #[test]
    fn and_short_circuits() {
        use std::cell::Cell;
        let calls = Cell::new(0);
        let never = |_: &i32| false;
        let counted = |_: &i32| {
            calls.set(calls.get() + 1);
            true
        };
        assert!(!And::new(never, counted).test(&1));
        assert_eq!(calls.get(), 0);
    }
}
