use crate::alternatives::{
    Alternatives, CloneAlternatives, Cons, DebugAlternatives, EqAlternatives, HashAlternatives,
};
use crate::error::VariantError;
use crate::policy::{Admit, Assign};
use crate::resolve::{At, Here, Locate};
use crate::storage::Storage;
use std::any::type_name;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;

/// Value of [`Variant::index`] while the variant is valueless
pub const VARIANT_NPOS: usize = usize::MAX;

/// A value of exactly one of the types in the alternative list `L`.
///
/// The value lives inline; a `Variant` never allocates. Which alternative is
/// live is tracked alongside the storage, and every read is checked against
/// it.
///
/// A variant becomes *valueless* when replacing its alternative destroyed the
/// old value and then failed to build the new one. While valueless, every
/// read fails with [`VariantError::Valueless`], [`holds_alternative`] is
/// false for every type, and [`index`](Self::index) returns
/// [`VARIANT_NPOS`].
///
/// # Examples
///
/// ```
/// use sovran_variant::{Variant, VariantError};
///
/// let mut v: Variant![i32, String, f64] = Variant::new(5i32);
/// assert_eq!(v.index(), 0);
/// assert_eq!(*v.get::<i32, _>()?, 5);
///
/// v.set("abc");
/// assert_eq!(v.index(), 1);
/// assert_eq!(v.get::<String, _>()?, "abc");
///
/// assert!(matches!(v.get::<f64, _>(), Err(VariantError::BadAccess { .. })));
/// # Ok::<(), VariantError>(())
/// ```
///
/// [`holds_alternative`]: Self::holds_alternative
pub struct Variant<L: Alternatives> {
    storage: Storage<L>,
    index: usize,
    valueless: bool,
}

impl<L: Alternatives> Variant<L> {
    /// Number of alternatives in the list
    pub const ALTERNATIVES: usize = L::LEN;

    fn vacant() -> Self {
        Self {
            storage: Storage::vacant(),
            index: 0,
            valueless: true,
        }
    }

    /// Creates a variant holding the alternative that `value` resolves to.
    ///
    /// The slot is chosen at compile time: an exact type match, an `f32` for
    /// an `f64` alternative, a `&str` for a `String` alternative, or a `T`
    /// for a `Const<T>` alternative. Inputs matching no slot, or more than
    /// one, do not compile.
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_variant::Variant;
    ///
    /// let v: Variant![i32, String, f64] = Variant::new(2.5f32);
    /// assert_eq!(v.index(), 2);
    /// assert_eq!(v.get::<f64, _>(), Ok(&2.5));
    /// ```
    pub fn new<V, I, K>(value: V) -> Self
    where
        L: Admit<V, I, K>,
    {
        let mut variant = Self::vacant();
        let value = <L as Admit<V, I, K>>::admit(value);
        unsafe {
            variant
                .storage
                .put(<L as Admit<V, I, K>>::slot_ptr, value);
        }
        variant.index = <L as Admit<V, I, K>>::SLOT;
        variant.valueless = false;
        variant
    }

    /// Slot of the live alternative, or [`VARIANT_NPOS`] while valueless
    pub fn index(&self) -> usize {
        if self.valueless {
            VARIANT_NPOS
        } else {
            self.index
        }
    }

    /// Returns true if a failed construction left the variant without a value
    pub fn valueless_by_exception(&self) -> bool {
        self.valueless
    }

    /// Returns true if the live alternative is `T`
    pub fn holds_alternative<T, I>(&self) -> bool
    where
        L: Locate<T, I>,
    {
        self.holds_slot(<L as Locate<T, I>>::SLOT)
    }

    /// Returns true if the live alternative is at slot `I`
    pub fn holds_at<I>(&self) -> bool
    where
        L: At<I>,
    {
        self.holds_slot(<L as At<I>>::SLOT)
    }

    fn holds_slot(&self, slot: usize) -> bool {
        !self.valueless && self.index == slot
    }

    fn check(&self, slot: usize, requested: &'static str) -> Result<(), VariantError> {
        if self.valueless {
            Err(VariantError::Valueless { requested })
        } else if self.index != slot {
            Err(VariantError::BadAccess {
                requested,
                active: L::type_name(self.index),
            })
        } else {
            Ok(())
        }
    }

    /// Destroys the live alternative, if any. The variant is valueless
    /// afterwards, including when the destructor panics.
    fn destroy(&mut self) {
        if !self.valueless {
            self.valueless = true;
            unsafe { self.storage.destroy(self.index) };
        }
    }

    /// Assigns a value to the variant.
    ///
    /// If `value` resolves to the alternative that is already live, it is
    /// assigned onto that value in place (a `&str` assigned to a live
    /// `String` reuses its buffer). Otherwise the live alternative is
    /// destroyed and the new one constructed in its place.
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_variant::Variant;
    ///
    /// let mut v: Variant![i32, String] = Variant::new(1i32);
    /// v.set(2i32).set("two");
    /// assert!(v.holds_alternative::<String, _>());
    /// ```
    pub fn set<V, I, K>(&mut self, value: V) -> &mut Self
    where
        L: Assign<V, I, K>,
    {
        let slot = <L as Admit<V, I, K>>::SLOT;
        if self.holds_slot(slot) {
            let live = unsafe { self.storage.get_mut(<L as Admit<V, I, K>>::slot_ptr) };
            <L as Assign<V, I, K>>::assign(live, value);
            return self;
        }

        let value = <L as Admit<V, I, K>>::admit(value);
        self.destroy();
        trace_event!(
            slot,
            alternative = L::type_name(slot),
            "replacing alternative"
        );
        unsafe {
            self.storage
                .put(<L as Admit<V, I, K>>::slot_ptr, value);
        }
        self.index = slot;
        self.valueless = false;
        self
    }

    /// Assigns the result of a fallible constructor to the variant.
    ///
    /// Failures are absorbed rather than returned:
    ///
    /// - If `T` is already live, `make` runs first and the live value is only
    ///   replaced on success. A failure leaves it untouched.
    /// - Otherwise the live alternative is destroyed before `make` runs. A
    ///   failure leaves the variant valueless.
    ///
    /// Use [`try_emplace`](Self::try_emplace) to get the failure back.
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_variant::Variant;
    ///
    /// let mut v: Variant![i32, String] = Variant::new(1i32);
    /// v.set_with(|| "x".parse::<i32>());
    /// assert!(v.holds_alternative::<i32, _>());
    ///
    /// v.set_with(|| Err::<String, _>("unavailable"));
    /// assert!(v.valueless_by_exception());
    /// ```
    pub fn set_with<T, I, E, F>(&mut self, make: F) -> &mut Self
    where
        L: Locate<T, I>,
        F: FnOnce() -> Result<T, E>,
    {
        let slot = <L as Locate<T, I>>::SLOT;
        if self.holds_slot(slot) {
            match make() {
                Ok(value) => unsafe {
                    self.storage.assign(<L as Locate<T, I>>::slot_ptr, value);
                },
                Err(_) => debug_event!(
                    slot,
                    alternative = type_name::<T>(),
                    "in-place assignment failed, previous value kept"
                ),
            }
            return self;
        }

        self.destroy();
        self.index = slot;
        match unsafe { self.storage.emplace(<L as Locate<T, I>>::slot_ptr, make) } {
            Ok(_) => self.valueless = false,
            Err(_) => debug_event!(
                slot,
                alternative = type_name::<T>(),
                "assignment failed, variant left valueless"
            ),
        }
        self
    }

    /// Replaces the live alternative with a `T` built from `args`.
    ///
    /// The old alternative is destroyed even if `T` was already live.
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_variant::Variant;
    ///
    /// let mut v: Variant![i32, Vec<i32>] = Variant::default();
    /// let items = v.emplace::<Vec<i32>, _, _>([1, 2, 3]);
    /// items.push(4);
    /// assert_eq!(v.get::<Vec<i32>, _>().map(Vec::len), Ok(4));
    /// ```
    pub fn emplace<T, I, A>(&mut self, args: A) -> &mut T
    where
        L: Locate<T, I>,
        T: From<A>,
    {
        match self.try_emplace::<T, I, Infallible, _>(|| Ok(T::from(args))) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Replaces the live alternative with the value `make` builds.
    ///
    /// The old alternative is destroyed before `make` runs. If `make` fails,
    /// the variant is left valueless and the error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_variant::Variant;
    ///
    /// let mut v: Variant![i32, String] = Variant::new(1i32);
    /// let failed = v.try_emplace::<i32, _, _, _>(|| "x".parse::<i32>());
    /// assert!(failed.is_err());
    /// assert!(v.valueless_by_exception());
    /// ```
    pub fn try_emplace<T, I, E, F>(&mut self, make: F) -> Result<&mut T, E>
    where
        L: Locate<T, I>,
        F: FnOnce() -> Result<T, E>,
    {
        let slot = <L as Locate<T, I>>::SLOT;
        self.emplace_slot(slot, <L as Locate<T, I>>::slot_ptr, make)
    }

    /// Replaces the live alternative with slot `I`, converting `value` the
    /// way [`new`](Self::new) does.
    ///
    /// This is the only way to overwrite a [`Const`](crate::Const) slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_variant::{Const, Variant, S0};
    ///
    /// let mut v: Variant![Const<i32>, String] = Variant::new(1i32);
    /// v.emplace_at::<S0, _, _>(5i32);
    /// assert_eq!(**v.get::<Const<i32>, _>()?, 5);
    /// # Ok::<(), sovran_variant::VariantError>(())
    /// ```
    pub fn emplace_at<I, V, K>(&mut self, value: V) -> &mut <L as Admit<V, I, K>>::Target
    where
        L: Admit<V, I, K>,
    {
        let slot = <L as Admit<V, I, K>>::SLOT;
        let made = self.emplace_slot(slot, <L as Admit<V, I, K>>::slot_ptr, || {
            Ok::<_, Infallible>(<L as Admit<V, I, K>>::admit(value))
        });
        match made {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Replaces the live alternative with slot `I`, built by `make`.
    ///
    /// Failure handling is the same as [`try_emplace`](Self::try_emplace).
    pub fn try_emplace_at<I, E, F>(&mut self, make: F) -> Result<&mut <L as At<I>>::Output, E>
    where
        L: At<I>,
        F: FnOnce() -> Result<<L as At<I>>::Output, E>,
    {
        let slot = <L as At<I>>::SLOT;
        self.emplace_slot(slot, <L as At<I>>::slot_ptr, make)
    }

    fn emplace_slot<T, E, F>(
        &mut self,
        slot: usize,
        locate: crate::storage::Locator<L, T>,
        make: F,
    ) -> Result<&mut T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        self.destroy();
        self.index = slot;
        trace_event!(slot, alternative = L::type_name(slot), "emplacing alternative");
        match unsafe { self.storage.emplace(locate, make) } {
            Ok(value) => {
                self.valueless = false;
                Ok(value)
            }
            Err(error) => {
                debug_event!(
                    slot,
                    alternative = L::type_name(slot),
                    "emplace failed, variant left valueless"
                );
                Err(error)
            }
        }
    }

    /// Returns the live `T`.
    ///
    /// # Errors
    ///
    /// - Returns `VariantError::BadAccess` if another alternative is live
    /// - Returns `VariantError::Valueless` if the variant is valueless
    pub fn get<T, I>(&self) -> Result<&T, VariantError>
    where
        L: Locate<T, I>,
    {
        self.check(<L as Locate<T, I>>::SLOT, type_name::<T>())?;
        Ok(unsafe { self.storage.get(<L as Locate<T, I>>::slot_ptr) })
    }

    /// Returns the live `T` mutably.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn get_mut<T, I>(&mut self) -> Result<&mut T, VariantError>
    where
        L: Locate<T, I>,
    {
        self.check(<L as Locate<T, I>>::SLOT, type_name::<T>())?;
        Ok(unsafe { self.storage.get_mut(<L as Locate<T, I>>::slot_ptr) })
    }

    /// Returns the alternative at slot `I`.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn get_at<I>(&self) -> Result<&<L as At<I>>::Output, VariantError>
    where
        L: At<I>,
    {
        self.check(<L as At<I>>::SLOT, type_name::<<L as At<I>>::Output>())?;
        Ok(unsafe { self.storage.get(<L as At<I>>::slot_ptr) })
    }

    /// Returns the alternative at slot `I` mutably.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn get_at_mut<I>(&mut self) -> Result<&mut <L as At<I>>::Output, VariantError>
    where
        L: At<I>,
    {
        self.check(<L as At<I>>::SLOT, type_name::<<L as At<I>>::Output>())?;
        Ok(unsafe { self.storage.get_mut(<L as At<I>>::slot_ptr) })
    }

    /// Returns the live `T`, or `None` if another alternative is live
    pub fn get_if<T, I>(&self) -> Option<&T>
    where
        L: Locate<T, I>,
    {
        self.get::<T, I>().ok()
    }

    /// Returns the live `T` mutably, or `None` if another alternative is live
    pub fn get_if_mut<T, I>(&mut self) -> Option<&mut T>
    where
        L: Locate<T, I>,
    {
        self.get_mut::<T, I>().ok()
    }

    /// Moves the live `T` out of the variant.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get). The variant is dropped either way.
    pub fn into_inner<T, I>(mut self) -> Result<T, VariantError>
    where
        L: Locate<T, I>,
    {
        self.check(<L as Locate<T, I>>::SLOT, type_name::<T>())?;
        self.valueless = true;
        Ok(unsafe { self.storage.take(<L as Locate<T, I>>::slot_ptr) })
    }

    /// Moves the whole variant out, leaving this one valueless.
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_variant::Variant;
    ///
    /// let mut source: Variant![i32, String] = Variant::new("moved");
    /// let target = source.take();
    /// assert!(source.valueless_by_exception());
    /// assert_eq!(target.get::<String, _>().map(String::as_str), Ok("moved"));
    /// ```
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::vacant())
    }

    /// Replaces this variant with the contents of `source`, leaving `source`
    /// valueless
    pub fn move_from(&mut self, source: &mut Self) {
        *self = source.take();
    }
}

impl<H: Default, T: Alternatives> Default for Variant<Cons<H, T>> {
    /// Default-constructs the alternative at slot 0
    fn default() -> Self {
        let mut variant = Self::vacant();
        unsafe {
            variant
                .storage
                .put_default(<Cons<H, T> as At<Here>>::slot_ptr);
        }
        variant.index = 0;
        variant.valueless = false;
        variant
    }
}

impl<L: Alternatives> Drop for Variant<L> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<L: CloneAlternatives> Clone for Variant<L> {
    fn clone(&self) -> Self {
        let mut copy = Self::vacant();
        if !self.valueless {
            unsafe {
                L::clone_slot(self.storage.as_ptr(), copy.storage.as_mut_ptr(), self.index);
            }
            copy.index = self.index;
            copy.valueless = false;
        }
        copy
    }

    /// Copies `source` into `self`. If both hold the same alternative the
    /// value is cloned onto the live one in place.
    fn clone_from(&mut self, source: &Self) {
        if source.valueless {
            self.destroy();
            return;
        }
        if self.holds_slot(source.index) {
            unsafe {
                L::clone_from_slot(source.storage.as_ptr(), self.storage.as_mut_ptr(), self.index);
            }
            return;
        }
        self.destroy();
        unsafe {
            L::clone_slot(source.storage.as_ptr(), self.storage.as_mut_ptr(), source.index);
        }
        self.index = source.index;
        self.valueless = false;
    }
}

impl<L: EqAlternatives> PartialEq for Variant<L> {
    fn eq(&self, other: &Self) -> bool {
        match (self.valueless, other.valueless) {
            (true, true) => true,
            (false, false) if self.index == other.index => unsafe {
                L::eq_slot(self.storage.as_ptr(), other.storage.as_ptr(), self.index)
            },
            _ => false,
        }
    }
}

impl<L: HashAlternatives> Hash for Variant<L> {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.index().hash(state);
        if !self.valueless {
            unsafe { L::hash_slot(self.storage.as_ptr(), self.index, state) };
        }
    }
}

struct Live<'a, L: Alternatives>(&'a Variant<L>);

impl<L: DebugAlternatives> fmt::Debug for Live<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        unsafe { L::debug_slot(self.0.storage.as_ptr(), self.0.index, f) }
    }
}

impl<L: DebugAlternatives> fmt::Debug for Variant<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valueless {
            return f.write_str("Variant(<valueless>)");
        }
        f.debug_struct("Variant")
            .field("index", &self.index)
            .field("value", &Live(self))
            .finish()
    }
}
