//! Compile-time slot resolution.
//!
//! Slots are named by the index markers [`Here`] and [`There`], with the
//! aliases [`S0`] through [`S11`] for the common case. Both mappings below are
//! total: asking for a type that is not in the list, or a slot past its end,
//! is a compile error rather than an out-of-range index.

use crate::alternatives::{Alternatives, Cons};
use std::marker::PhantomData;

/// Index marker for the head of a list
pub struct Here;

/// Index marker for position `I` within the tail of a list
pub struct There<I>(PhantomData<I>);

/// Slot 0
pub type S0 = Here;
/// Slot 1
pub type S1 = There<S0>;
/// Slot 2
pub type S2 = There<S1>;
/// Slot 3
pub type S3 = There<S2>;
/// Slot 4
pub type S4 = There<S3>;
/// Slot 5
pub type S5 = There<S4>;
/// Slot 6
pub type S6 = There<S5>;
/// Slot 7
pub type S7 = There<S6>;
/// Slot 8
pub type S8 = There<S7>;
/// Slot 9
pub type S9 = There<S8>;
/// Slot 10
pub type S10 = There<S9>;
/// Slot 11
pub type S11 = There<S10>;

// The resolvers are trusted by the unsafe cell accesses in `Variant`, so only
// the structural impls below may exist. Each sealing impl mirrors exactly one
// public impl.
mod sealed {
    use super::{Here, There};
    use crate::alternatives::Cons;

    pub trait At<I> {}

    impl<H, T> At<Here> for Cons<H, T> {}
    impl<H, T: At<I>, I> At<There<I>> for Cons<H, T> {}

    pub trait Locate<T, I> {}

    impl<H, T> Locate<H, Here> for Cons<H, T> {}
    impl<H, T: Locate<U, I>, U, I> Locate<U, There<I>> for Cons<H, T> {}
}

/// Slot `I` of an alternative list.
///
/// Implemented for every list and in-range slot; it cannot be implemented
/// outside this crate.
pub trait At<I>: Alternatives + sealed::At<I> {
    /// The alternative stored at slot `I`
    type Output;

    /// Ordinal of slot `I`
    const SLOT: usize;

    #[doc(hidden)]
    fn slot_ptr(cell: *mut Self::Cell) -> *mut Self::Output;
}

impl<H, T: Alternatives> At<Here> for Cons<H, T> {
    type Output = H;

    const SLOT: usize = 0;

    fn slot_ptr(cell: *mut Self::Cell) -> *mut H {
        cell.cast()
    }
}

impl<H, T, I> At<There<I>> for Cons<H, T>
where
    T: At<I>,
{
    type Output = T::Output;

    const SLOT: usize = 1 + T::SLOT;

    fn slot_ptr(cell: *mut Self::Cell) -> *mut T::Output {
        T::slot_ptr(cell.cast())
    }
}

/// The slot holding exactly the type `T`.
///
/// `I` is inferred. When `T` appears more than once in the list the
/// inference is ambiguous and the caller has to name the slot through
/// [`At`] instead.
///
/// Only the list itself decides where a type lives. Downstream impls are
/// rejected:
///
/// ```compile_fail
/// use sovran_variant::{Cons, Locate, Nil};
///
/// struct Elsewhere;
///
/// impl Locate<[usize; 3], Elsewhere> for Cons<String, Nil> {
///     const SLOT: usize = 0;
///
///     fn slot_ptr(cell: *mut Self::Cell) -> *mut [usize; 3] {
///         cell.cast()
///     }
/// }
/// ```
pub trait Locate<T, I>: Alternatives + sealed::Locate<T, I> {
    /// Ordinal of `T`'s slot
    const SLOT: usize;

    #[doc(hidden)]
    fn slot_ptr(cell: *mut Self::Cell) -> *mut T;
}

impl<H, T: Alternatives> Locate<H, Here> for Cons<H, T> {
    const SLOT: usize = 0;

    fn slot_ptr(cell: *mut Self::Cell) -> *mut H {
        cell.cast()
    }
}

impl<H, T, U, I> Locate<U, There<I>> for Cons<H, T>
where
    T: Locate<U, I>,
{
    const SLOT: usize = 1 + T::SLOT;

    fn slot_ptr(cell: *mut Self::Cell) -> *mut U {
        T::slot_ptr(cell.cast())
    }
}
