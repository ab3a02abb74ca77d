use crate::storage::Slots;
use std::any::type_name;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ptr;

/// End of an alternative list
pub struct Nil;

/// An alternative list with `H` at slot 0 followed by the alternatives of `T`
///
/// Lists are rarely spelled out by hand; use [`Alts!`](crate::Alts) or
/// [`Variant!`](crate::Variant) instead.
pub struct Cons<H, T>(PhantomData<(H, T)>);

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Nil {}
    impl<H, T: Sealed> Sealed for super::Cons<H, T> {}
}

/// A fixed, ordered list of alternative types.
///
/// Every operation that depends on the *runtime* active slot goes through
/// one of the recursive dispatch methods here (or on the extension traits
/// below). Each takes a raw pointer to the shared cell and the slot ordinal,
/// and walks the list until the ordinal reaches zero.
///
/// # Safety contract
///
/// The `unsafe` methods require that `slot < LEN` and that the alternative
/// at `slot` is live in the cell.
pub trait Alternatives: sealed::Sealed {
    /// Untagged storage able to hold any single alternative
    type Cell;

    /// Number of alternatives
    const LEN: usize;

    /// Type name of the alternative at `slot`
    fn type_name(slot: usize) -> &'static str;

    #[doc(hidden)]
    unsafe fn drop_slot(cell: *mut Self::Cell, slot: usize);
}

impl Alternatives for Nil {
    type Cell = ();

    const LEN: usize = 0;

    fn type_name(_slot: usize) -> &'static str {
        "<none>"
    }

    unsafe fn drop_slot(_cell: *mut (), _slot: usize) {}
}

impl<H, T: Alternatives> Alternatives for Cons<H, T> {
    type Cell = Slots<H, T::Cell>;

    const LEN: usize = 1 + T::LEN;

    fn type_name(slot: usize) -> &'static str {
        if slot == 0 {
            type_name::<H>()
        } else {
            T::type_name(slot - 1)
        }
    }

    unsafe fn drop_slot(cell: *mut Self::Cell, slot: usize) {
        if slot == 0 {
            ptr::drop_in_place(cell.cast::<H>());
        } else {
            T::drop_slot(cell.cast(), slot - 1);
        }
    }
}

/// Alternative lists whose members are all `Clone`
pub trait CloneAlternatives: Alternatives {
    #[doc(hidden)]
    unsafe fn clone_slot(src: *const Self::Cell, dst: *mut Self::Cell, slot: usize);

    /// Both cells must hold a live value at `slot`.
    #[doc(hidden)]
    unsafe fn clone_from_slot(src: *const Self::Cell, dst: *mut Self::Cell, slot: usize);
}

impl CloneAlternatives for Nil {
    unsafe fn clone_slot(_src: *const (), _dst: *mut (), _slot: usize) {}

    unsafe fn clone_from_slot(_src: *const (), _dst: *mut (), _slot: usize) {}
}

impl<H: Clone, T: CloneAlternatives> CloneAlternatives for Cons<H, T> {
    unsafe fn clone_slot(src: *const Self::Cell, dst: *mut Self::Cell, slot: usize) {
        if slot == 0 {
            dst.cast::<H>().write((*src.cast::<H>()).clone());
        } else {
            T::clone_slot(src.cast(), dst.cast(), slot - 1);
        }
    }

    unsafe fn clone_from_slot(src: *const Self::Cell, dst: *mut Self::Cell, slot: usize) {
        if slot == 0 {
            (*dst.cast::<H>()).clone_from(&*src.cast::<H>());
        } else {
            T::clone_from_slot(src.cast(), dst.cast(), slot - 1);
        }
    }
}

/// Alternative lists whose members are all `PartialEq`
pub trait EqAlternatives: Alternatives {
    #[doc(hidden)]
    unsafe fn eq_slot(lhs: *const Self::Cell, rhs: *const Self::Cell, slot: usize) -> bool;
}

impl EqAlternatives for Nil {
    unsafe fn eq_slot(_lhs: *const (), _rhs: *const (), _slot: usize) -> bool {
        false
    }
}

impl<H: PartialEq, T: EqAlternatives> EqAlternatives for Cons<H, T> {
    unsafe fn eq_slot(lhs: *const Self::Cell, rhs: *const Self::Cell, slot: usize) -> bool {
        if slot == 0 {
            *lhs.cast::<H>() == *rhs.cast::<H>()
        } else {
            T::eq_slot(lhs.cast(), rhs.cast(), slot - 1)
        }
    }
}

/// Alternative lists whose members are all `Debug`
pub trait DebugAlternatives: Alternatives {
    #[doc(hidden)]
    unsafe fn debug_slot(
        cell: *const Self::Cell,
        slot: usize,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result;
}

impl DebugAlternatives for Nil {
    unsafe fn debug_slot(_cell: *const (), _slot: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<none>")
    }
}

impl<H: fmt::Debug, T: DebugAlternatives> DebugAlternatives for Cons<H, T> {
    unsafe fn debug_slot(
        cell: *const Self::Cell,
        slot: usize,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if slot == 0 {
            fmt::Debug::fmt(&*cell.cast::<H>(), f)
        } else {
            T::debug_slot(cell.cast(), slot - 1, f)
        }
    }
}

/// Alternative lists whose members are all `Hash`
pub trait HashAlternatives: Alternatives {
    #[doc(hidden)]
    unsafe fn hash_slot<S: Hasher>(cell: *const Self::Cell, slot: usize, state: &mut S);
}

impl HashAlternatives for Nil {
    unsafe fn hash_slot<S: Hasher>(_cell: *const (), _slot: usize, _state: &mut S) {}
}

impl<H: Hash, T: HashAlternatives> HashAlternatives for Cons<H, T> {
    unsafe fn hash_slot<S: Hasher>(cell: *const Self::Cell, slot: usize, state: &mut S) {
        if slot == 0 {
            (*cell.cast::<H>()).hash(state);
        } else {
            T::hash_slot(cell.cast(), slot - 1, state);
        }
    }
}
