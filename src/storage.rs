use crate::alternatives::Alternatives;
use std::mem::{ManuallyDrop, MaybeUninit};

/// One level of the untagged storage: either the head alternative or the
/// storage of the remaining ones.
///
/// `repr(C)` places every field at offset zero, so a pointer to the cell is
/// also a pointer to any slot inside it. Fields are never named; slots are
/// reached by pointer casts in `Alternatives` and the resolvers.
#[repr(C)]
#[allow(dead_code)]
pub union Slots<H, C> {
    head: ManuallyDrop<H>,
    tail: ManuallyDrop<C>,
}

/// Finds the slot of a `T` inside a list's cell.
pub(crate) type Locator<L, T> = fn(*mut <L as Alternatives>::Cell) -> *mut T;

/// In-place storage for one alternative of `L` at a time.
///
/// The cell carries no discriminant. Which slot is live, if any, is tracked by
/// the owning `Variant`, and every method here trusts the caller on that
/// point.
pub(crate) struct Storage<L: Alternatives> {
    cell: MaybeUninit<L::Cell>,
}

impl<L: Alternatives> Storage<L> {
    pub(crate) const fn vacant() -> Self {
        Self {
            cell: MaybeUninit::uninit(),
        }
    }

    pub(crate) fn as_ptr(&self) -> *const L::Cell {
        self.cell.as_ptr()
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut L::Cell {
        self.cell.as_mut_ptr()
    }

    /// Moves `value` into its slot.
    ///
    /// # Safety
    ///
    /// No slot may be live. A live value would be overwritten without being
    /// dropped and the caller would lose track of which slot is live.
    pub(crate) unsafe fn put<T>(&mut self, locate: Locator<L, T>, value: T) -> &mut T {
        let slot = locate(self.as_mut_ptr());
        slot.write(value);
        &mut *slot
    }

    /// Default-constructs the alternative at `locate`.
    ///
    /// # Safety
    ///
    /// Same as [`put`](Self::put).
    pub(crate) unsafe fn put_default<T: Default>(&mut self, locate: Locator<L, T>) -> &mut T {
        self.put(locate, T::default())
    }

    /// Builds an alternative directly into its slot, passing any construction
    /// failure through untouched.
    ///
    /// # Safety
    ///
    /// Same as [`put`](Self::put). On failure the slot stays dead.
    pub(crate) unsafe fn emplace<T, E, F>(
        &mut self,
        locate: Locator<L, T>,
        make: F,
    ) -> Result<&mut T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let value = make()?;
        Ok(self.put(locate, value))
    }

    /// Ordinary assignment onto the live value; the old value is dropped in
    /// place.
    ///
    /// # Safety
    ///
    /// The slot must be live.
    pub(crate) unsafe fn assign<T>(&mut self, locate: Locator<L, T>, value: T) {
        *locate(self.as_mut_ptr()) = value;
    }

    /// # Safety
    ///
    /// The slot must be live.
    pub(crate) unsafe fn get<T>(&self, locate: Locator<L, T>) -> &T {
        &*locate(self.as_ptr() as *mut L::Cell)
    }

    /// # Safety
    ///
    /// The slot must be live.
    pub(crate) unsafe fn get_mut<T>(&mut self, locate: Locator<L, T>) -> &mut T {
        &mut *locate(self.as_mut_ptr())
    }

    /// Moves the live value out. The slot is dead afterwards.
    ///
    /// # Safety
    ///
    /// The slot must be live.
    pub(crate) unsafe fn take<T>(&mut self, locate: Locator<L, T>) -> T {
        locate(self.as_mut_ptr()).read()
    }

    /// Runs the destructor of the alternative at `slot`.
    ///
    /// # Safety
    ///
    /// `slot` must be live; it is dead afterwards.
    pub(crate) unsafe fn destroy(&mut self, slot: usize) {
        L::drop_slot(self.as_mut_ptr(), slot);
    }
}
