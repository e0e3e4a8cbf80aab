//! Tests for lowering program models into binder state.

use exn_binder::model::{CatchModel, MemberModel, MemberRef, OperationModel, ProgramModel, TypeModel};
use exn_binder::{
    BindError, BindOptions, BinderState, ConstructorInitializer, ModelBuilder, OperationKind,
    SymbolKind,
};
use exn_common::Span;

fn bind(model: &ProgramModel) -> BinderState {
    BinderState::bind(model, BindOptions::default()).expect("model should bind")
}

fn symbol_named(binder: &BinderState, type_name: &str, member: &str) -> exn_binder::SymbolId {
    let ty = binder.lookup_type(type_name).expect("type");
    binder
        .get_type(ty)
        .expect("type info")
        .members
        .iter()
        .copied()
        .find(|&id| binder.get_symbol(id).is_some_and(|s| s.name == member))
        .expect("member")
}

#[test]
fn test_default_library_is_linked() {
    let binder = bind(&ProgramModel::default());
    let format = binder.lookup_type("System.FormatException").unwrap();
    let system = binder.lookup_type("System.SystemException").unwrap();
    assert_eq!(binder.base_type(format), Some(system));
    assert_eq!(binder.type_name(format), "FormatException");
    assert!(binder.parameterless_instance_constructor(format).is_some());
}

#[test]
fn test_no_lib_skips_default_library() {
    let binder = BinderState::bind(&ProgramModel::default(), BindOptions { no_lib: true }).unwrap();
    assert!(binder.lookup_type("System.Exception").is_none());
    assert_eq!(binder.types().count(), 0);
}

#[test]
fn test_model_type_replaces_library_type() {
    let mut builder = ModelBuilder::new();
    builder.add_type(TypeModel::class("System.Exception").extends("System.Object"));
    let binder = bind(&builder.build());
    let count = binder
        .types()
        .filter(|(_, info)| info.full_name == "System.Exception")
        .count();
    assert_eq!(count, 1);
}

#[test]
fn test_duplicate_type_is_an_error() {
    let mut builder = ModelBuilder::new();
    builder
        .add_type(TypeModel::class("App.Foo"))
        .add_type(TypeModel::class("App.Foo"));
    let err = BinderState::bind(&builder.build(), BindOptions::default()).unwrap_err();
    assert_eq!(err, BindError::DuplicateType("App.Foo".to_string()));
}

#[test]
fn test_unknown_base_is_an_error() {
    let mut builder = ModelBuilder::new();
    builder.add_type(TypeModel::class("App.Foo").extends("App.Missing"));
    let err = BinderState::bind(&builder.build(), BindOptions::default()).unwrap_err();
    assert!(matches!(err, BindError::UnknownType { ref name, .. } if name == "App.Missing"));
    assert_eq!(
        err.to_string(),
        "unknown type 'App.Missing' referenced by base of 'App.Foo'"
    );
}

#[test]
fn test_unknown_call_target_is_an_error() {
    let mut builder = ModelBuilder::new();
    builder.add_type(TypeModel::class("App.Foo").member(MemberModel::method("Run").body(
        OperationModel::call(MemberRef::new("App.Foo", "Missing"), Span::DUMMY, Vec::new()),
    )));
    let err = BinderState::bind(&builder.build(), BindOptions::default()).unwrap_err();
    assert_eq!(
        err,
        BindError::UnknownMember {
            type_name: "App.Foo".to_string(),
            member: "Missing".to_string(),
        }
    );
}

#[test]
fn test_unknown_file_is_an_error() {
    let mut builder = ModelBuilder::new();
    builder.add_type(TypeModel::class("App.Foo").in_file(3, Span::DUMMY));
    let err = BinderState::bind(&builder.build(), BindOptions::default()).unwrap_err();
    assert_eq!(err, BindError::UnknownFile(3));
}

#[test]
fn test_implicit_constructor_is_synthesized() {
    let mut builder = ModelBuilder::new();
    let file = builder.file("foo.cs", "class Foo {}");
    builder.add_type(TypeModel::class("App.Foo").in_file(file, Span::at(6, 3)));
    let binder = bind(&builder.build());

    let foo = binder.lookup_type("App.Foo").unwrap();
    let ctor = binder.parameterless_instance_constructor(foo).unwrap();
    let symbol = binder.get_symbol(ctor).unwrap();
    assert!(symbol.is_implicit());
    assert_eq!(symbol.name_span, Span::at(6, 3));
    assert_eq!(binder.display_name(ctor), "Foo.Foo()");
    assert!(binder.initialization_constructors(foo).is_empty());
}

#[test]
fn test_interfaces_get_no_implicit_constructor() {
    let mut builder = ModelBuilder::new();
    builder.add_type(TypeModel::interface("App.IFoo"));
    let binder = bind(&builder.build());
    let ifoo = binder.lookup_type("App.IFoo").unwrap();
    assert!(binder.get_type(ifoo).unwrap().members.is_empty());
}

#[test]
fn test_initialization_constructors_exclude_this_chaining() {
    let mut builder = ModelBuilder::new();
    builder.add_type(
        TypeModel::class("App.Foo")
            .member(MemberModel::constructor("Foo"))
            .member(
                MemberModel::constructor("Foo")
                    .params(&["int"])
                    .chains(ConstructorInitializer::This),
            )
            .member(
                MemberModel::constructor("Foo")
                    .params(&["string"])
                    .chains(ConstructorInitializer::Base),
            )
            .member(MemberModel::static_constructor("Foo")),
    );
    let binder = bind(&builder.build());
    let foo = binder.lookup_type("App.Foo").unwrap();
    let group: Vec<String> = binder
        .initialization_constructors(foo)
        .into_iter()
        .map(|id| binder.display_name(id))
        .collect();
    assert_eq!(group, vec!["Foo.Foo()", "Foo.Foo(string)"]);
}

#[test]
fn test_accessors_link_to_their_property() {
    let mut builder = ModelBuilder::new();
    builder.add_type(
        TypeModel::class("App.Foo")
            .member(MemberModel::property("Value"))
            .member(MemberModel::property_accessor("get_Value", "Value")),
    );
    let binder = bind(&builder.build());
    let property = symbol_named(&binder, "App.Foo", "Value");
    let getter = symbol_named(&binder, "App.Foo", "get_Value");
    let getter = binder.get_symbol(getter).unwrap();
    assert_eq!(getter.kind, SymbolKind::PropertyAccessor { owner: property });
    assert_eq!(getter.associated_symbol(), Some(property));
}

#[test]
fn test_accessor_with_unknown_owner_is_an_error() {
    let mut builder = ModelBuilder::new();
    builder.add_type(
        TypeModel::class("App.Foo").member(MemberModel::event_accessor("add_Changed", "Changed")),
    );
    let err = BinderState::bind(&builder.build(), BindOptions::default()).unwrap_err();
    assert!(matches!(err, BindError::UnknownOwner { .. }));
}

#[test]
fn test_resolve_cref_strips_prefix_and_uses_simple_names() {
    let binder = bind(&ProgramModel::default());
    let io = binder.lookup_type("System.IO.IOException").unwrap();
    assert_eq!(binder.resolve_cref("T:System.IO.IOException"), Some(io));
    assert_eq!(binder.resolve_cref("IOException"), Some(io));
    assert_eq!(binder.resolve_cref("T:IOException"), Some(io));
    assert_eq!(binder.resolve_cref("NoSuchException"), None);
}

#[test]
fn test_ambiguous_simple_name_does_not_resolve() {
    let mut builder = ModelBuilder::new();
    builder
        .add_type(TypeModel::class("A.ParseException").extends("System.Exception"))
        .add_type(TypeModel::class("B.ParseException").extends("System.Exception"));
    let binder = bind(&builder.build());
    assert_eq!(binder.resolve_cref("ParseException"), None);
    assert!(binder.resolve_cref("A.ParseException").is_some());
}

#[test]
fn test_body_lowering_records_types_and_targets() {
    let mut builder = ModelBuilder::new();
    builder.add_type(
        TypeModel::class("App.Foo")
            .member(MemberModel::method("Helper"))
            .member(MemberModel::method("Run").body(OperationModel::block(vec![
                OperationModel::call(MemberRef::new("App.Foo", "Helper"), Span::at(10, 6), Vec::new()),
                OperationModel::try_catch(
                    OperationModel::throw_new(Span::at(20, 5), "System.FormatException", Span::at(30, 15)),
                    vec![CatchModel::catch_all(OperationModel::rethrow(Span::at(50, 5)))],
                    None,
                ),
            ]))),
    );
    let binder = bind(&builder.build());
    let run = binder.get_symbol(symbol_named(&binder, "App.Foo", "Run")).unwrap();
    let arena = binder.arena();
    let root = arena.get(run.body.unwrap()).unwrap();
    assert_eq!(root.children.len(), 2);

    let call = arena.get(root.children[0]).unwrap();
    let helper = symbol_named(&binder, "App.Foo", "Helper");
    assert_eq!(
        call.kind,
        OperationKind::Invocation { target: helper, name_span: Span::at(10, 6) }
    );

    let OperationKind::Try { body, catches, finally } = &arena.get(root.children[1]).unwrap().kind
    else {
        panic!("expected try");
    };
    assert!(finally.is_none());
    assert_eq!(catches.len(), 1);
    assert_eq!(catches[0].exception_type, None);

    let throw = arena.get(*body).unwrap();
    let thrown = throw.children[0];
    assert_eq!(
        arena.unconverted_type(thrown),
        binder.lookup_type("System.FormatException")
    );
}

#[test]
fn test_try_regions_are_lowered_into_their_slots() {
    let mut builder = ModelBuilder::new();
    builder.add_type(
        TypeModel::class("App.Foo").member(MemberModel::method("Run").body(
            OperationModel::try_catch(
                OperationModel::value("System.Int32", Span::at(1, 1)),
                vec![
                    CatchModel::new("System.FormatException", OperationModel::value("System.Int32", Span::at(3, 1)))
                        .when(OperationModel::value("System.Boolean", Span::at(2, 1))),
                    CatchModel::catch_all(OperationModel::value("System.Int32", Span::at(4, 1))),
                ],
                Some(OperationModel::value("System.Int32", Span::at(5, 1))),
            ),
        )),
    );
    let binder = bind(&builder.build());
    let run = binder.get_symbol(symbol_named(&binder, "App.Foo", "Run")).unwrap();
    let arena = binder.arena();
    let OperationKind::Try { body, catches, finally } = &arena.get(run.body.unwrap()).unwrap().kind
    else {
        panic!("expected try");
    };
    let start = |index| arena.get(index).unwrap().span.start;

    assert_eq!(start(*body), 1);
    assert_eq!(catches.len(), 2);
    assert_eq!(catches[0].exception_type, binder.lookup_type("System.FormatException"));
    assert_eq!(catches[0].filter.map(start), Some(2));
    assert_eq!(start(catches[0].handler), 3);
    assert_eq!(catches[1].filter, None);
    assert_eq!(start(catches[1].handler), 4);
    assert_eq!(finally.map(start), Some(5));
}

#[test]
fn test_deep_bodies_bind_without_recursion() {
    const DEPTH: usize = 50_000;
    let mut body = OperationModel::throw_new(Span::at(1, 5), "System.FormatException", Span::at(11, 15));
    for _ in 0..DEPTH {
        body = OperationModel::block(vec![body]);
    }
    let mut builder = ModelBuilder::new();
    builder.add_type(TypeModel::class("App.Foo").member(MemberModel::method("Run").body(body)));
    let model = builder.build();
    let binder = bind(&model);
    drop(model);

    let run = binder.get_symbol(symbol_named(&binder, "App.Foo", "Run")).unwrap();
    let arena = binder.arena();
    let mut node = run.body.unwrap();
    for _ in 0..DEPTH {
        let children = &arena.get(node).unwrap().children;
        assert_eq!(children.len(), 1);
        node = children[0];
    }
    assert!(matches!(arena.get(node).unwrap().kind, OperationKind::Throw { .. }));
}

#[test]
fn test_interface_implementation_lookup() {
    let mut builder = ModelBuilder::new();
    builder
        .add_type(
            TypeModel::interface("App.IRunner")
                .member(MemberModel::method("Run"))
                .member(MemberModel::method("Stop")),
        )
        .add_type(TypeModel::class("App.BaseRunner").member(MemberModel::method("Stop")))
        .add_type(
            TypeModel::class("App.Runner")
                .extends("App.BaseRunner")
                .implements("App.IRunner")
                .member(MemberModel::method("Run").into_static())
                .member(MemberModel::method("RunExplicitly"))
                .implementation(MemberRef::new("App.IRunner", "Run"), "RunExplicitly"),
        );
    let binder = bind(&builder.build());
    let runner = binder.lookup_type("App.Runner").unwrap();
    let run = symbol_named(&binder, "App.IRunner", "Run");
    let stop = symbol_named(&binder, "App.IRunner", "Stop");

    assert_eq!(
        binder.find_implementation_for_interface_member(runner, run),
        Some(symbol_named(&binder, "App.Runner", "RunExplicitly"))
    );
    assert_eq!(
        binder.find_implementation_for_interface_member(runner, stop),
        Some(symbol_named(&binder, "App.BaseRunner", "Stop"))
    );
}

#[test]
fn test_model_round_trips_through_json() {
    let mut builder = ModelBuilder::new();
    let file = builder.file("foo.cs", "class Foo {}");
    builder.add_type(
        TypeModel::class("App.Foo")
            .in_file(file, Span::at(6, 3))
            .member(
                MemberModel::method("Run")
                    .documented("/// <exception cref=\"FormatException\"/>", 0)
                    .body(OperationModel::throw_new(Span::at(1, 5), "System.FormatException", Span::at(11, 15))),
            ),
    );
    let model = builder.build();
    let json = serde_json::to_string(&model).unwrap();
    assert!(json.contains("\"op\":\"throw\""));
    let back: ProgramModel = serde_json::from_str(&json).unwrap();
    assert_eq!(back, model);
}
