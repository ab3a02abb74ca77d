use sovran_variant::{
    get, get_at, get_if, holds_alternative, into_inner, Const, Variant, VariantError, S0, S1, S2,
    VARIANT_NPOS,
};

type Scalar = Variant![i32, String, f64];

#[test]
fn test_construct_from_value() -> Result<(), VariantError> {
    let v: Scalar = Variant::new(5i32);

    assert_eq!(v.index(), 0);
    assert!(!v.valueless_by_exception());
    assert!(v.holds_alternative::<i32, _>());
    assert_eq!(*v.get::<i32, _>()?, 5);
    assert_eq!(*get::<i32, _, _>(&v)?, 5);

    Ok(())
}

#[test]
fn test_assign_switches_and_updates() -> Result<(), VariantError> {
    let mut v: Scalar = Variant::new(5i32);

    // Switch to the string alternative
    v.set("abc");
    assert_eq!(v.index(), 1);
    assert_eq!(v.get::<String, _>()?, "abc");
    assert!(v.get::<i32, _>().is_err());

    // Same alternative again: updated in place
    let before = v.get::<String, _>()? as *const String;
    v.set("cde");
    assert_eq!(v.index(), 1);
    assert_eq!(v.get::<String, _>()?, "cde");
    assert_eq!(v.get::<String, _>()? as *const String, before);

    // Owned strings resolve to the same slot
    v.set(String::from("fgh"));
    assert_eq!(v.index(), 1);

    Ok(())
}

#[test]
fn test_float_promotion() -> Result<(), VariantError> {
    let mut v: Scalar = Variant::new(5i32);

    v.set(5.0f64);
    assert_eq!(v.index(), 2);
    assert_eq!(*v.get::<f64, _>()?, 5.0);

    v.set("text");
    v.set(1.5f32);
    assert_eq!(v.index(), 2);
    assert_eq!(*v.get::<f64, _>()?, 1.5);

    let promoted: Scalar = Variant::new(0.25f32);
    assert_eq!(promoted.get::<f64, _>(), Ok(&0.25));

    Ok(())
}

#[test]
fn test_copy_is_independent() -> Result<(), VariantError> {
    let mut first: Variant![String, Vec<i32>] = Variant::new("abcdefgh");
    let second = first.clone();

    first.emplace::<Vec<i32>, _, _>(vec![1, 2, 3]);

    assert_eq!(first.get::<Vec<i32>, _>()?, &vec![1, 2, 3]);
    assert_eq!(second.get::<String, _>()?, "abcdefgh");
    assert_eq!(second.get::<String, _>()?.len(), 8);

    Ok(())
}

#[test]
fn test_move_leaves_source_valueless() -> Result<(), VariantError> {
    let mut first: Variant![String, Vec<i32>] = Variant::new("abcdefgh");
    let third = first.take();

    assert!(first.valueless_by_exception());
    assert!(!first.holds_alternative::<String, _>());
    assert!(!first.holds_alternative::<Vec<i32>, _>());
    assert_eq!(first.index(), VARIANT_NPOS);
    assert_eq!(
        first.get::<String, _>(),
        Err(VariantError::Valueless {
            requested: "alloc::string::String"
        })
    );

    assert_eq!(third.get::<String, _>()?, "abcdefgh");

    Ok(())
}

#[test]
fn test_move_assignment() -> Result<(), VariantError> {
    let mut source: Scalar = Variant::new(2.0f64);
    let mut target: Scalar = Variant::new("old");

    target.move_from(&mut source);
    assert!(source.valueless_by_exception());
    assert_eq!(*target.get::<f64, _>()?, 2.0);

    // Moving a valueless variant makes the target valueless too
    target.move_from(&mut source);
    assert!(target.valueless_by_exception());

    Ok(())
}

#[test]
fn test_const_alternative() -> Result<(), VariantError> {
    let mut v: Variant![Const<i32>, String] = Variant::new(1i32);
    assert_eq!(v.index(), 0);
    assert_eq!(**v.get::<Const<i32>, _>()?, 1);

    // Emplacing reconstructs the slot
    v.emplace_at::<S0, _, _>(5i32);
    assert_eq!(**v.get_at::<S0>()?, 5);

    // Other alternatives stay assignable
    v.set("free");
    assert!(v.holds_at::<S1>());

    Ok(())
}

#[test]
fn test_const_slot_accepts_whole_value_only() -> Result<(), VariantError> {
    let mut v: Variant![Const<i32>, String] = Variant::new(1i32);
    let other: Variant![Const<i32>, String] = Variant::new(9i32);

    // A complete wrapper taken from another variant replaces the slot
    v.set(other.get::<Const<i32>, _>()?.clone());
    assert_eq!(**v.get::<Const<i32>, _>()?, 9);
    assert_eq!(**other.get::<Const<i32>, _>()?, 9);

    // The wrapper itself exposes no way to rewrite the inner value
    let wrapper = v.get_mut::<Const<i32>, _>()?;
    assert_eq!(**wrapper, 9);
    assert_eq!(v.into_inner::<Const<i32>, _>()?.into_inner(), 9);

    Ok(())
}

#[test]
fn test_bad_access_for_every_mismatch() {
    let values: [Scalar; 3] = [
        Variant::new(1i32),
        Variant::new("one"),
        Variant::new(1.0f64),
    ];

    for (slot, v) in values.iter().enumerate() {
        assert_eq!(v.index(), slot);
        assert_eq!(v.get::<i32, _>().is_ok(), slot == 0);
        assert_eq!(v.get::<String, _>().is_ok(), slot == 1);
        assert_eq!(v.get::<f64, _>().is_ok(), slot == 2);
        assert_eq!(v.get_at::<S2>().is_ok(), slot == 2);

        if slot != 0 {
            assert!(matches!(
                v.get::<i32, _>(),
                Err(VariantError::BadAccess { requested: "i32", .. })
            ));
        }
    }
}

#[test]
fn test_emplace_always_holds_target() -> Result<(), VariantError> {
    let mut v: Scalar = Variant::default();
    assert_eq!(v.index(), 0);
    assert_eq!(*v.get::<i32, _>()?, 0);

    // Emplacing the live alternative rebuilds it
    *v.emplace::<i32, _, _>(3i32) += 1;
    assert_eq!(*v.get::<i32, _>()?, 4);

    let text = v.emplace::<String, _, _>("built");
    text.push('!');
    assert!(v.holds_alternative::<String, _>());
    assert_eq!(v.get::<String, _>()?, "built!");

    let slot = v
        .try_emplace_at::<S2, (), _>(|| Ok(9.5))
        .expect("constructor cannot fail");
    assert_eq!(*slot, 9.5);
    assert_eq!(v.index(), 2);

    Ok(())
}

#[test]
fn test_mutation_through_accessors() -> Result<(), VariantError> {
    let mut v: Variant![Vec<i32>, String] = Variant::new(vec![1i32]);

    v.get_mut::<Vec<i32>, _>()?.push(2);
    v.get_at_mut::<S0>()?.push(3);
    if let Some(items) = v.get_if_mut::<Vec<i32>, _>() {
        items.push(4);
    }

    assert_eq!(v.get::<Vec<i32>, _>()?, &vec![1, 2, 3, 4]);
    assert!(v.get_if::<String, _>().is_none());
    assert!(v.get_mut::<String, _>().is_err());

    Ok(())
}

#[test]
fn test_free_accessors() {
    let v: Scalar = Variant::new("free");

    assert!(holds_alternative::<String, _, _>(&v));
    assert!(!holds_alternative::<f64, _, _>(&v));
    assert_eq!(get_if::<String, _, _>(&v).map(String::as_str), Some("free"));
    assert!(get_at::<S0, _>(&v).is_err());

    let inner: Result<String, _> = into_inner::<String, _, _>(v);
    assert_eq!(inner.as_deref(), Ok("free"));

    let wrong: Scalar = Variant::new(1i32);
    assert!(into_inner::<f64, _, _>(wrong).is_err());
}

#[test]
fn test_duplicate_alternatives_by_slot() -> Result<(), VariantError> {
    let mut v: Variant![u8, String, u8] = Variant::default();
    assert!(v.holds_at::<S0>());

    v.emplace_at::<S2, _, _>(7u8);
    assert!(v.holds_at::<S2>());
    assert!(!v.holds_at::<S0>());
    assert_eq!(*v.get_at::<S2>()?, 7);
    assert!(v.get_at::<S0>().is_err());

    Ok(())
}
