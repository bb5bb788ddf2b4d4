use ndarray::{ArrayBase, Data, Dimension, IntoDimension, Ix};

/// Asserts that two `f64` values, or two equally shaped collections of them, are equal within
/// a few ulps.
///
/// ```
/// use test_utils::assert_approx_eq;
/// // the lift of a rule with confidence 1 and consequent support 0.75
/// assert_approx_eq!(f64, 1. / 0.75, 4. / 3.);
/// ```
///
/// Slices, arrays, `Vec`s, `Option`s and ndarray arrays can be mixed as long as their elements
/// line up, e.g. a matrix of pairwise shelf distances:
///
/// ```
/// use ndarray::arr2;
/// use test_utils::assert_approx_eq;
/// let distances = arr2(&[[0., 5.], [5., 0.]]);
/// assert_approx_eq!(f64, distances, [[0., 25_f64.sqrt()], [5., 0.]], epsilon = 1e-12);
/// ```
///
/// Without an explicit tolerance `ulps = 2` and `epsilon = 0` apply. NaN equals NaN, so a
/// degenerate score still matches its expectation.
#[macro_export]
macro_rules! assert_approx_eq {
    ($t:ty, $left:expr, $right:expr $(,)?) => {
        $crate::assert_approx_eq!($t, $left, $right, epsilon = 0., ulps = 2)
    };
    ($t:ty, $left:expr, $right:expr, ulps = $ulps:expr $(,)?) => {
        $crate::assert_approx_eq!($t, $left, $right, epsilon = 0., ulps = $ulps)
    };
    ($t:ty, $left:expr, $right:expr, epsilon = $epsilon:expr $(,)?) => {
        $crate::assert_approx_eq!($t, $left, $right, epsilon = $epsilon, ulps = 2)
    };
    ($t:ty, $left:expr, $right:expr, epsilon = $epsilon:expr, ulps = $ulps:expr $(,)?) => {{
        let (epsilon, ulps) = ($epsilon, $ulps);
        let (left, right) = ($left, $right);
        let mut lefts = $crate::ApproxEqIter::indexed_iter_logical_order(&left, Vec::new());
        let mut rights = $crate::ApproxEqIter::indexed_iter_logical_order(&right, Vec::new());
        loop {
            match (lefts.next(), rights.next()) {
                (Some((lidx, lv)), Some((ridx, rv))) => {
                    std::assert_eq!(
                        lidx, ridx,
                        "Shape mismatch between the indices {:?} and {:?}",
                        lidx, ridx,
                    );
                    let both_nan = lv.is_nan() && rv.is_nan();
                    std::assert!(
                        both_nan || $crate::approx_eq!($t, lv, rv, ulps = ulps, epsilon = epsilon),
                        "approximated equal assertion failed (ulps={:?}, epsilon={:?}) at index {:?}: {:?} == {:?}",
                        ulps, epsilon, lidx, lv, rv,
                    );
                }
                (Some((idx, _)), None) => {
                    std::panic!("Left input is longer, it has an extra element at index {:?}", idx);
                }
                (None, Some((idx, _))) => {
                    std::panic!("Right input is longer, it has an extra element at index {:?}", idx);
                }
                (None, None) => break,
            }
        }
    }};
}

/// Flattens a value into its `f64` leaves for [`assert_approx_eq!`].
///
/// Implemented on references, the leaves are boxed iterators to keep the test code small.
pub trait ApproxEqIter<'a>: Copy {
    type LeafElement;

    /// Yields every leaf together with its index path, which extends `index_prefix` by one
    /// position per nesting level.
    fn indexed_iter_logical_order(
        self,
        index_prefix: Vec<Ix>,
    ) -> Box<dyn Iterator<Item = (Vec<Ix>, Self::LeafElement)> + 'a>;
}

impl<'a> ApproxEqIter<'a> for &'a f64 {
    type LeafElement = f64;

    fn indexed_iter_logical_order(
        self,
        prefix: Vec<Ix>,
    ) -> Box<dyn Iterator<Item = (Vec<Ix>, Self::LeafElement)> + 'a> {
        let iter = std::iter::once((prefix, *self));
        Box::new(iter)
    }
}

impl<'a, T> ApproxEqIter<'a> for &'a &'a T
where
    &'a T: ApproxEqIter<'a>,
    T: 'a + ?Sized,
{
    type LeafElement = <&'a T as ApproxEqIter<'a>>::LeafElement;

    fn indexed_iter_logical_order(
        self,
        prefix: Vec<Ix>,
    ) -> Box<dyn Iterator<Item = (Vec<Ix>, Self::LeafElement)> + 'a> {
        (*self).indexed_iter_logical_order(prefix)
    }
}

impl<'a, T: 'a> ApproxEqIter<'a> for &'a Option<T>
where
    &'a T: ApproxEqIter<'a>,
{
    type LeafElement = <&'a T as ApproxEqIter<'a>>::LeafElement;

    fn indexed_iter_logical_order(
        self,
        prefix: Vec<Ix>,
    ) -> Box<dyn Iterator<Item = (Vec<Ix>, Self::LeafElement)> + 'a> {
        let iter = self.iter().flat_map(move |el| {
            let mut new_prefix = prefix.clone();
            new_prefix.push(0);
            el.indexed_iter_logical_order(new_prefix)
        });

        Box::new(iter)
    }
}

impl<'a, T: 'a> ApproxEqIter<'a> for &'a Vec<T>
where
    &'a T: ApproxEqIter<'a>,
{
    type LeafElement = <&'a T as ApproxEqIter<'a>>::LeafElement;

    fn indexed_iter_logical_order(
        self,
        prefix: Vec<Ix>,
    ) -> Box<dyn Iterator<Item = (Vec<Ix>, Self::LeafElement)> + 'a> {
        self.as_slice().indexed_iter_logical_order(prefix)
    }
}

impl<'a, T, const N: usize> ApproxEqIter<'a> for &'a [T; N]
where
    &'a T: ApproxEqIter<'a>,
{
    type LeafElement = <&'a T as ApproxEqIter<'a>>::LeafElement;

    fn indexed_iter_logical_order(
        self,
        prefix: Vec<Ix>,
    ) -> Box<dyn Iterator<Item = (Vec<Ix>, Self::LeafElement)> + 'a> {
        self.as_ref().indexed_iter_logical_order(prefix)
    }
}

impl<'a, T: 'a> ApproxEqIter<'a> for &'a [T]
where
    &'a T: ApproxEqIter<'a>,
{
    type LeafElement = <&'a T as ApproxEqIter<'a>>::LeafElement;

    fn indexed_iter_logical_order(
        self,
        prefix: Vec<Ix>,
    ) -> Box<dyn Iterator<Item = (Vec<Ix>, Self::LeafElement)> + 'a> {
        let iter = self.iter().enumerate().flat_map(move |(idx, el)| {
            let mut new_prefix = prefix.clone();
            new_prefix.push(idx);
            el.indexed_iter_logical_order(new_prefix)
        });

        Box::new(iter)
    }
}

impl<'a, S, D> ApproxEqIter<'a> for &'a ArrayBase<S, D>
where
    S: Data,
    S::Elem: Copy,
    &'a S::Elem: ApproxEqIter<'a>,
    D: Dimension,
{
    type LeafElement = S::Elem;

    fn indexed_iter_logical_order(
        self,
        prefix: Vec<Ix>,
    ) -> Box<dyn Iterator<Item = (Vec<Ix>, Self::LeafElement)> + 'a> {
        let iter = self.indexed_iter().map(move |(idx, elm)| {
            let mut new_prefix = prefix.clone();
            new_prefix.extend(idx.into_dimension().as_array_view().iter());
            (new_prefix, *elm)
        });

        Box::new(iter)
    }
}
