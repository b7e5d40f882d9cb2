use std::collections::BTreeMap;
use std::hash::{BuildHasher, Hash, Hasher, RandomState};

use crate::filter::{
    All, And, CapabilityFilter, FILTER_CAPACITY, InvertSelf, Nop, Or, ShallowCapabilityFilter,
    TagFilter, TypeFilter, VisitBoth, VisitDesc, VisitSelf, and, or, type_filter, type_filter_of,
    validate_filter,
};
use crate::test_utils::{Label, STRINGER, Tagged};
use crate::{Decision, Error, Field, Filter, FilterRef, Reflect, Type, TypeKind, Typed};

fn decide(filter: &FilterRef, ty: Type) -> Decision {
    filter.visit(ty, &Field::NONE)
}

fn string() -> Type {
    String::type_of()
}

#[test]
fn constant_filters() {
    let ty = string();
    assert_eq!(decide(&Nop.into(), ty), Decision::NONE);
    assert_eq!(decide(&VisitSelf.into(), ty), Decision::SELF);
    assert_eq!(decide(&VisitDesc.into(), ty), Decision::DESC);
    assert_eq!(decide(&VisitBoth.into(), ty), Decision::BOTH);
    assert_eq!(decide(&All.into(), ty), Decision::ALL);
}

#[test]
fn type_filter_matches_exact_type() {
    let filter = FilterRef::new(TypeFilter::new(string()));

    assert_eq!(decide(&filter, string()), Decision::BOTH);
    assert_eq!(decide(&filter, u32::type_of()), Decision::DESC);
    assert_eq!(decide(&filter, Option::<String>::type_of()), Decision::DESC);
}

#[test]
fn type_filter_without_target_visits_nothing() {
    assert_eq!(decide(&TypeFilter(None).into(), string()), Decision::NONE);
}

#[test]
fn tag_filter_matches_exact_value() {
    let owner = Tagged::type_of();
    let name = Field::new(owner, 0);
    let note = Field::new(owner, 1);
    let plain = Field::new(owner, 2);

    let json_name = TagFilter::new("json", "name");
    assert_eq!(json_name.visit(string(), &name), Decision::BOTH);
    assert_eq!(json_name.visit(string(), &note), Decision::DESC);
    assert_eq!(json_name.visit(string(), &plain), Decision::DESC);
    assert_eq!(json_name.visit(owner, &Field::NONE), Decision::DESC);

    // Values compare whole, options included.
    let json_note = TagFilter::new("json", "note,omitempty");
    assert_eq!(json_note.visit(string(), &note), Decision::BOTH);
    assert_eq!(TagFilter::new("db", "-").visit(string(), &name), Decision::BOTH);
}

#[test]
fn tag_filter_with_empty_key_only_descends() {
    let name = Field::new(Tagged::type_of(), 0);
    assert_eq!(TagFilter::default().visit(string(), &name), Decision::DESC);
    assert_eq!(TagFilter::new("", "").visit(string(), &name), Decision::DESC);
}

#[test]
fn capability_filters() {
    let deep = CapabilityFilter(Some(STRINGER));
    let shallow = ShallowCapabilityFilter(Some(STRINGER));
    let label = Label::type_of();

    assert_eq!(deep.visit(label, &Field::NONE), Decision::BOTH);
    assert_eq!(shallow.visit(label, &Field::NONE), Decision::SELF);
    assert_eq!(deep.visit(string(), &Field::NONE), Decision::DESC);
    assert_eq!(shallow.visit(string(), &Field::NONE), Decision::DESC);
    assert_eq!(CapabilityFilter(None).visit(label, &Field::NONE), Decision::NONE);
    assert_eq!(ShallowCapabilityFilter(None).visit(label, &Field::NONE), Decision::NONE);
}

#[test]
fn invert_self_flips_only_the_self_bit() {
    let ty = string();
    assert_eq!(decide(&InvertSelf::new(VisitBoth).into(), ty), Decision::DESC);
    assert_eq!(decide(&InvertSelf::new(VisitDesc).into(), ty), Decision::BOTH);
    assert_eq!(decide(&InvertSelf::new(VisitSelf).into(), ty), Decision::NONE);
    assert_eq!(decide(&InvertSelf::new(Nop).into(), ty), Decision::SELF);
    assert_eq!(
        decide(&InvertSelf::new(All).into(), ty),
        Decision::from_bits(0xFE)
    );
}

#[test]
fn invert_self_without_inner_visits_nothing() {
    assert_eq!(decide(&InvertSelf(None).into(), string()), Decision::NONE);
}

#[test]
fn combinators_reduce_present_members() {
    let both = and([Some(VisitSelf.into()), Some(VisitBoth.into())])
        .unwrap()
        .unwrap();
    assert!(both.downcast_ref::<And>().is_some());
    assert_eq!(decide(&both, string()), Decision::SELF);

    let either = or([Some(VisitSelf.into()), None, Some(VisitDesc.into())])
        .unwrap()
        .unwrap();
    assert!(either.downcast_ref::<Or>().is_some());
    assert_eq!(decide(&either, string()), Decision::BOTH);
}

#[test]
fn empty_combinators_visit_nothing() {
    assert_eq!(decide(&And::default().into(), string()), Decision::NONE);
    assert_eq!(decide(&Or::default().into(), string()), Decision::NONE);
}

#[test]
fn smart_constructors_collapse() {
    let none: [Option<FilterRef>; 3] = [None, None, None];
    assert!(and(none.clone()).unwrap().is_none());
    assert!(or(Vec::<FilterRef>::new()).unwrap().is_none());

    let single = FilterRef::new(TagFilter::new("json", "name"));
    let anded = and([None, Some(single.clone()), None]).unwrap().unwrap();
    let ored = or([single.clone()]).unwrap().unwrap();
    assert!(FilterRef::ptr_eq(&anded, &single));
    assert!(FilterRef::ptr_eq(&ored, &single));
}

#[test]
fn capacity_is_enforced() {
    let full = vec![FilterRef::new(VisitSelf); FILTER_CAPACITY];
    assert!(and(full.clone()).is_ok());

    let mut over = full;
    over.push(VisitDesc.into());
    assert_eq!(or(over).unwrap_err(), Error::FilterCapacity);
    insta::assert_snapshot!(Error::FilterCapacity, @"exceeding filter capacity 8");
}

#[test]
fn filter_refs_compare_by_value() {
    let a = FilterRef::new(TypeFilter::new(string()));
    let b = FilterRef::new(TypeFilter::new(string()));
    let c = FilterRef::new(TypeFilter::new(u32::type_of()));

    assert!(!FilterRef::ptr_eq(&a, &b));
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(FilterRef::new(Nop), FilterRef::new(VisitSelf));

    let hasher = RandomState::new();
    assert_eq!(hasher.hash_one(&a), hasher.hash_one(&b));
}

#[test]
fn nested_filters_compare_by_value() {
    let a = InvertSelf::new(TagFilter::new("json", "name"));
    let b = InvertSelf::new(TagFilter::new("json", "name"));
    let c = InvertSelf::new(TagFilter::new("json", "note"));

    assert_eq!(FilterRef::new(a.clone()), FilterRef::new(b));
    assert_ne!(FilterRef::new(a), FilterRef::new(c));
}

#[test]
fn type_filter_is_shared() {
    let a = type_filter(string());
    let b = type_filter_of::<String>();

    assert!(FilterRef::ptr_eq(&a, &b));
    assert_eq!(a.downcast_ref::<TypeFilter>(), Some(&TypeFilter::new(string())));
}

#[test]
fn debug_shows_the_filter_value() {
    let filter = FilterRef::new(TagFilter::new("json", "name"));
    insta::assert_snapshot!(format!("{filter:?}"), @r#"TagFilter { key: "json", value: "name" }"#);
}

// ============================================================================
// Validation
// ============================================================================

#[derive(Reflect, Debug, PartialEq, Eq, Hash)]
struct ListFilter {
    pub names: Vec<String>,
}

impl Filter for ListFilter {
    fn visit(&self, _: Type, field: &Field) -> Decision {
        Decision::from(self.names.iter().any(|name| name == field.name()))
    }
}

#[derive(Reflect, Debug)]
struct CallbackFilter {
    pub pick: fn() -> u8,
}

// Compared by address, so fixtures stay free of fn pointer comparisons.
impl PartialEq for CallbackFilter {
    fn eq(&self, other: &Self) -> bool {
        self.pick as usize == other.pick as usize
    }
}

impl Eq for CallbackFilter {}

impl Hash for CallbackFilter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.pick as usize).hash(state);
    }
}

impl Filter for CallbackFilter {
    fn visit(&self, _: Type, _: &Field) -> Decision {
        Decision::from_bits((self.pick)())
    }
}

#[derive(Reflect, Debug, PartialEq, Eq, Hash)]
struct TableFilter {
    pub table: BTreeMap<String, u8>,
}

impl Filter for TableFilter {
    fn visit(&self, _: Type, field: &Field) -> Decision {
        Decision::from_bits(self.table.get(field.name()).copied().unwrap_or_default())
    }
}

#[derive(Reflect, Debug, PartialEq, Eq, Hash)]
struct OptionalNameFilter {
    pub name: Option<String>,
}

impl Filter for OptionalNameFilter {
    fn visit(&self, _: Type, field: &Field) -> Decision {
        Decision::from(self.name.as_deref() == Some(field.name()))
    }
}

fn rejected(filter: impl Into<FilterRef>) -> (Type, TypeKind) {
    match validate_filter(&filter.into()) {
        Err(Error::InvalidFilter { ty, kind, .. }) => (ty, kind),
        other => panic!("expected an invalid filter, got {other:?}"),
    }
}

fn noop() -> u8 {
    0
}

#[test]
fn stock_filters_are_valid() {
    let nested = and([
        Some(TypeFilter::new(string()).into()),
        Some(InvertSelf::new(TagFilter::new("json", "-")).into()),
        Some(CapabilityFilter(Some(STRINGER)).into()),
        or([Some(VisitSelf.into()), Some(All.into())]).unwrap(),
    ])
    .unwrap()
    .unwrap();

    assert!(validate_filter(&nested).is_ok());
    assert!(validate_filter(&InvertSelf(None).into()).is_ok());
    assert!(validate_filter(&TypeFilter(None).into()).is_ok());
    assert!(validate_filter(&ShallowCapabilityFilter(None).into()).is_ok());
}

#[test]
fn rejects_sequences() {
    let (ty, kind) = rejected(ListFilter {
        names: vec!["a".into()],
    });
    assert_eq!(ty, Vec::<String>::type_of());
    assert_eq!(kind, TypeKind::Slice);
}

#[test]
fn rejects_functions() {
    let (ty, kind) = rejected(CallbackFilter { pick: noop });
    assert_eq!(ty.name(), "fn() -> u8");
    assert_eq!(kind, TypeKind::Func);
}

#[test]
fn rejects_maps() {
    let (_, kind) = rejected(TableFilter {
        table: BTreeMap::new(),
    });
    assert_eq!(kind, TypeKind::Map);
}

#[test]
fn rejects_pointers_to_plain_values() {
    // The pointer type itself is rejected, empty or not.
    let (ty, kind) = rejected(OptionalNameFilter { name: None });
    assert_eq!(ty, Option::<String>::type_of());
    assert_eq!(kind, TypeKind::Pointer);
}

#[test]
fn rejects_invalid_members_of_combinators() {
    let filter = InvertSelf::new(ListFilter { names: Vec::new() });
    let (ty, _) = rejected(filter);
    assert_eq!(ty, Vec::<String>::type_of());
}

#[test]
fn invalid_filter_message() {
    let err = validate_filter(&ListFilter { names: Vec::new() }.into()).unwrap_err();
    insta::assert_snapshot!(err, @"invalid filter ListFilter { names: [] }: contains Vec<String> of kind slice");
}
