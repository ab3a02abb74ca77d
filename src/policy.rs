//! How each alternative accepts incoming values.
//!
//! [`Admit`] answers "which slot does a `V` go to, and how does it become that
//! slot's type". It stands in for overload resolution: `I` (the slot) and `K`
//! (the conversion kind) are inferred, and an input that fits no slot, or fits
//! more than one, fails to compile.
//!
//! Conversion kinds:
//!
//! - [`Exact`]: the input is the alternative itself.
//! - [`Promote`]: an `f32` input is accepted by an `f64` alternative. The
//!   narrower float is not a slot of its own.
//! - [`Borrow`]: a `&str` input is accepted by a `String` alternative, and
//!   assigned by reusing the live string's buffer.
//! - [`Seal`]: a bare `T` is accepted by a [`Const<T>`] alternative. Sealed
//!   slots can be constructed and emplaced but never value-assigned.

use crate::alternatives::{Alternatives, Cons};
use crate::resolve::{Here, There};
use std::fmt;
use std::ops::Deref;

/// Conversion kind: the input is the alternative itself
pub struct Exact;
/// Conversion kind: an `f32` widened into an `f64` alternative
pub struct Promote;
/// Conversion kind: a `&str` copied into a `String` alternative
pub struct Borrow;
/// Conversion kind: a `T` wrapped into a `Const<T>` alternative
pub struct Seal;

// `Variant` writes admitted values through `slot_ptr` without checking, so the
// set of impls is closed. Each sealing impl mirrors exactly one public impl.
mod sealed {
    use super::{Borrow, Const, Exact, Promote, Seal};
    use crate::alternatives::Cons;
    use crate::resolve::{Here, There};

    pub trait Admit<V, I, K> {}

    impl<H, T> Admit<H, Here, Exact> for Cons<H, T> {}
    impl<T> Admit<f32, Here, Promote> for Cons<f64, T> {}
    impl<'a, T> Admit<&'a str, Here, Borrow> for Cons<String, T> {}
    impl<U, T> Admit<U, Here, Seal> for Cons<Const<U>, T> {}
    impl<H, T: Admit<V, I, K>, V, I, K> Admit<V, There<I>, K> for Cons<H, T> {}

    pub trait Assign<V, I, K> {}

    impl<H, T> Assign<H, Here, Exact> for Cons<H, T> {}
    impl<T> Assign<f32, Here, Promote> for Cons<f64, T> {}
    impl<'a, T> Assign<&'a str, Here, Borrow> for Cons<String, T> {}
    impl<H, T: Assign<V, I, K>, V, I, K> Assign<V, There<I>, K> for Cons<H, T> {}
}

/// An alternative that cannot be overwritten through value assignment.
///
/// A `Const<T>` slot is filled by constructing the variant from a `T` or by
/// emplacing a `T` at its slot. Only the inner value is guarded: a complete
/// `Const<T>` (cloned or moved out of another variant) still replaces the slot
/// like any other alternative, and `get_mut` hands out the wrapper.
/// `Variant::set` with a bare `T` does not compile:
///
/// ```compile_fail
/// use sovran_variant::{Const, Variant};
///
/// let mut v: Variant![Const<i32>, String] = Variant::new(1i32);
/// v.set(2i32);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Const<T>(T);

impl<T> Const<T> {
    /// Consumes the wrapper, returning the value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Const<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: fmt::Debug> fmt::Debug for Const<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Const").field(&self.0).finish()
    }
}

/// An input `V` that slot `I` accepts through conversion `K`.
///
/// The conversions are fixed by this crate; new ones cannot be added
/// downstream:
///
/// ```compile_fail
/// use sovran_variant::{Admit, Cons, Exact, Nil, S0};
///
/// struct Raw(u64);
///
/// impl Admit<Raw, S0, Exact> for Cons<String, Nil> {
///     type Target = String;
///
///     const SLOT: usize = 0;
///
///     fn admit(value: Raw) -> String {
///         value.0.to_string()
///     }
///
///     fn slot_ptr(cell: *mut Self::Cell) -> *mut String {
///         cell.cast()
///     }
/// }
/// ```
pub trait Admit<V, I, K>: Alternatives + sealed::Admit<V, I, K> {
    /// The alternative the input becomes
    type Target;

    /// Ordinal of the accepting slot
    const SLOT: usize;

    /// Converts the input into the alternative
    fn admit(value: V) -> Self::Target;

    #[doc(hidden)]
    fn slot_ptr(cell: *mut Self::Cell) -> *mut Self::Target;
}

/// Inputs that may also overwrite a live alternative of the same slot.
pub trait Assign<V, I, K>: Admit<V, I, K> + sealed::Assign<V, I, K> {
    /// Assigns onto the live alternative in place
    fn assign(live: &mut Self::Target, value: V);
}

impl<H, T: Alternatives> Admit<H, Here, Exact> for Cons<H, T> {
    type Target = H;

    const SLOT: usize = 0;

    fn admit(value: H) -> H {
        value
    }

    fn slot_ptr(cell: *mut Self::Cell) -> *mut H {
        cell.cast()
    }
}

impl<H, T: Alternatives> Assign<H, Here, Exact> for Cons<H, T> {
    fn assign(live: &mut H, value: H) {
        *live = value;
    }
}

impl<T: Alternatives> Admit<f32, Here, Promote> for Cons<f64, T> {
    type Target = f64;

    const SLOT: usize = 0;

    fn admit(value: f32) -> f64 {
        f64::from(value)
    }

    fn slot_ptr(cell: *mut Self::Cell) -> *mut f64 {
        cell.cast()
    }
}

impl<T: Alternatives> Assign<f32, Here, Promote> for Cons<f64, T> {
    fn assign(live: &mut f64, value: f32) {
        *live = f64::from(value);
    }
}

impl<'a, T: Alternatives> Admit<&'a str, Here, Borrow> for Cons<String, T> {
    type Target = String;

    const SLOT: usize = 0;

    fn admit(value: &'a str) -> String {
        value.to_owned()
    }

    fn slot_ptr(cell: *mut Self::Cell) -> *mut String {
        cell.cast()
    }
}

impl<'a, T: Alternatives> Assign<&'a str, Here, Borrow> for Cons<String, T> {
    fn assign(live: &mut String, value: &'a str) {
        live.clear();
        live.push_str(value);
    }
}

impl<U, T: Alternatives> Admit<U, Here, Seal> for Cons<Const<U>, T> {
    type Target = Const<U>;

    const SLOT: usize = 0;

    fn admit(value: U) -> Const<U> {
        Const(value)
    }

    fn slot_ptr(cell: *mut Self::Cell) -> *mut Const<U> {
        cell.cast()
    }
}

impl<H, T, V, I, K> Admit<V, There<I>, K> for Cons<H, T>
where
    T: Admit<V, I, K>,
{
    type Target = T::Target;

    const SLOT: usize = 1 + T::SLOT;

    fn admit(value: V) -> T::Target {
        T::admit(value)
    }

    fn slot_ptr(cell: *mut Self::Cell) -> *mut T::Target {
        T::slot_ptr(cell.cast())
    }
}

impl<H, T, V, I, K> Assign<V, There<I>, K> for Cons<H, T>
where
    T: Assign<V, I, K>,
{
    fn assign(live: &mut T::Target, value: V) {
        T::assign(live, value)
    }
}
