use super::*;
use exn_binder::model::ProgramModel;
use exn_binder::{BindOptions, BinderState};

/// Flat base table: `bases[i]` is the base of `TypeId(i)`.
struct Tree {
    bases: Vec<Option<TypeId>>,
}

impl TypeHierarchy for Tree {
    fn base_type_of(&self, ty: TypeId) -> Option<TypeId> {
        self.bases.get(ty.0 as usize).copied().flatten()
    }
}

// Exception
// ├── SystemException
// │   ├── FormatException
// │   └── ArgumentException
// │       └── ArgumentNullException
// └── IOException
//     └── FileNotFoundException
const EXCEPTION: TypeId = TypeId(0);
const SYSTEM: TypeId = TypeId(1);
const FORMAT: TypeId = TypeId(2);
const ARGUMENT: TypeId = TypeId(3);
const ARGUMENT_NULL: TypeId = TypeId(4);
const IO: TypeId = TypeId(5);
const FILE_NOT_FOUND: TypeId = TypeId(6);

fn tree() -> Tree {
    Tree {
        bases: vec![
            None,
            Some(EXCEPTION),
            Some(SYSTEM),
            Some(SYSTEM),
            Some(ARGUMENT),
            Some(EXCEPTION),
            Some(IO),
        ],
    }
}

fn set(db: &dyn TypeHierarchy, types: &[TypeId]) -> TypeSet {
    TypeSet::empty().add_all(db, types.iter().copied())
}

fn sorted(set: &TypeSet) -> Vec<TypeId> {
    let mut types = set.types().to_vec();
    types.sort();
    types
}

#[test]
fn test_empty_contains_nothing() {
    let db = tree();
    let empty = TypeSet::empty();
    assert!(empty.is_empty());
    for id in 0..7 {
        assert!(!empty.contains(&db, TypeId(id)));
    }
}

#[test]
fn test_universal_contains_everything_and_is_not_empty() {
    let db = tree();
    assert!(TypeSet::Universal.contains(&db, FILE_NOT_FOUND));
    assert!(!TypeSet::Universal.is_empty());
    assert_ne!(TypeSet::Universal, TypeSet::empty());
}

#[test]
fn test_add_to_universal_is_noop() {
    let db = tree();
    assert_eq!(TypeSet::Universal.add(&db, FORMAT), TypeSet::Universal);
}

#[test]
fn test_add_then_contains() {
    let db = tree();
    let s = TypeSet::empty().add(&db, ARGUMENT);
    assert!(s.contains(&db, ARGUMENT));
    assert!(s.contains(&db, ARGUMENT_NULL));
    assert!(!s.contains(&db, SYSTEM));
    assert!(!s.contains(&db, FORMAT));
}

#[test]
fn test_add_covered_type_is_noop() {
    let db = tree();
    let s = set(&db, &[SYSTEM]);
    assert_eq!(s.add(&db, FORMAT), s);
    assert_eq!(s.add(&db, SYSTEM), s);
}

#[test]
fn test_add_supertype_prunes_subtypes() {
    let db = tree();
    let s = set(&db, &[FORMAT, ARGUMENT_NULL, FILE_NOT_FOUND]).add(&db, SYSTEM);
    assert_eq!(sorted(&s), vec![SYSTEM, FILE_NOT_FOUND]);
}

#[test]
fn test_add_is_idempotent_and_order_independent() {
    let db = tree();
    let one = set(&db, &[ARGUMENT_NULL, IO, SYSTEM]);
    let two = set(&db, &[IO, SYSTEM, ARGUMENT_NULL, SYSTEM]);
    assert_eq!(sorted(&one), sorted(&two));
    assert_eq!(sorted(&one.add(&db, IO)), sorted(&one));
}

#[test]
fn test_specific_sets_stay_antichains() {
    let db = tree();
    let s = set(&db, &[FILE_NOT_FOUND, FORMAT, IO, ARGUMENT_NULL, ARGUMENT]);
    let types = s.types();
    for &x in types {
        for &y in types {
            if x != y {
                assert!(!db.is_subtype_of(x, y), "{x:?} <: {y:?} in antichain");
            }
        }
    }
}

#[test]
fn test_intersect_with_universal_returns_other() {
    let db = tree();
    let s = set(&db, &[FORMAT]);
    assert_eq!(TypeSet::intersect(&db, &TypeSet::Universal, &s), s);
    assert_eq!(TypeSet::intersect(&db, &s, &TypeSet::Universal), s);
    assert_eq!(
        TypeSet::intersect(&db, &TypeSet::Universal, &TypeSet::Universal),
        TypeSet::Universal
    );
}

#[test]
fn test_intersect_keeps_more_specific_of_related_pairs() {
    let db = tree();
    let a = set(&db, &[SYSTEM, IO]);
    let b = set(&db, &[ARGUMENT, FILE_NOT_FOUND, FORMAT]);
    let result = TypeSet::intersect(&db, &a, &b);
    assert_eq!(sorted(&result), vec![FORMAT, ARGUMENT, FILE_NOT_FOUND]);
}

#[test]
fn test_intersect_of_unrelated_sets_is_empty() {
    let db = tree();
    let a = set(&db, &[FORMAT]);
    let b = set(&db, &[IO]);
    assert!(TypeSet::intersect(&db, &a, &b).is_empty());
    assert!(TypeSet::intersect(&db, &a, &TypeSet::empty()).is_empty());
}

#[test]
fn test_intersect_is_commutative_on_membership() {
    let db = tree();
    let a = set(&db, &[SYSTEM, FILE_NOT_FOUND]);
    let b = set(&db, &[EXCEPTION]);
    let ab = TypeSet::intersect(&db, &a, &b);
    let ba = TypeSet::intersect(&db, &b, &a);
    for id in 0..7 {
        assert_eq!(ab.contains(&db, TypeId(id)), ba.contains(&db, TypeId(id)));
        assert_eq!(
            ab.contains(&db, TypeId(id)),
            a.contains(&db, TypeId(id)) && b.contains(&db, TypeId(id))
        );
    }
}

#[test]
fn test_intersection_over_three_constructor_sets() {
    // Three initializing constructors documenting {SystemException},
    // {ArgumentException, IOException} and {Exception}: only the argument
    // family is covered by all of them.
    let db = tree();
    let groups = [
        set(&db, &[SYSTEM]),
        set(&db, &[ARGUMENT, IO]),
        set(&db, &[EXCEPTION]),
    ];
    let all = groups
        .iter()
        .fold(TypeSet::Universal, |acc, s| TypeSet::intersect(&db, &acc, s));
    assert_eq!(sorted(&all), vec![ARGUMENT]);
    assert!(all.contains(&db, ARGUMENT_NULL));
    assert!(!all.contains(&db, FORMAT));
    assert!(!all.contains(&db, FILE_NOT_FOUND));
}

#[test]
fn test_subtype_walk_is_reflexive_and_bounded_on_cycles() {
    let cyclic = Tree {
        bases: vec![Some(TypeId(1)), Some(TypeId(0))],
    };
    assert!(cyclic.is_subtype_of(TypeId(0), TypeId(0)));
    assert!(cyclic.is_subtype_of(TypeId(0), TypeId(1)));
    assert!(!cyclic.is_subtype_of(TypeId(0), TypeId(2)));
}

#[test]
fn test_binder_state_hierarchy() {
    let binder = BinderState::bind(&ProgramModel::default(), BindOptions::default()).unwrap();
    let exception = binder.lookup_type("System.Exception").unwrap();
    let not_found = binder.lookup_type("System.IO.FileNotFoundException").unwrap();
    let format = binder.lookup_type("System.FormatException").unwrap();
    assert!(binder.is_subtype_of(not_found, exception));
    assert!(!binder.is_subtype_of(exception, not_found));
    assert!(!binder.is_subtype_of(format, not_found));
}
