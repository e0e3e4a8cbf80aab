//! Fluent construction of program models.
//!
//! ```
//! use exn_binder::builder::ModelBuilder;
//! use exn_binder::model::{MemberModel, OperationModel, TypeModel};
//! use exn_common::Span;
//!
//! let text = "class C { void M() { throw new FormatException(); } }";
//! let mut builder = ModelBuilder::new();
//! let file = builder.file("c.cs", text);
//! builder.add_type(
//!     TypeModel::class("C").in_file(file, Span::at(6, 1)).member(
//!         MemberModel::method("M").at(Span::at(15, 1)).body(OperationModel::block(vec![
//!             OperationModel::throw_new(Span::at(21, 5), "System.FormatException", Span::at(31, 15)),
//!         ])),
//!     ),
//! );
//! let model = builder.build();
//! assert_eq!(model.types.len(), 1);
//! ```

use exn_common::Span;

use crate::model::{
    CatchModel, DocCommentModel, ImplementationModel, MemberKindModel, MemberModel, MemberRef,
    OperationModel, ProgramModel, SourceFileModel, TypeModel,
};
use crate::symbols::ConstructorInitializer;
use crate::types::{TypeKind, simple_name};

#[derive(Debug, Default)]
pub struct ModelBuilder {
    model: ProgramModel,
}

impl ModelBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source file and return its index.
    pub fn file(&mut self, name: &str, text: &str) -> u32 {
        let index = self.model.files.len() as u32;
        self.model.files.push(SourceFileModel {
            name: name.to_string(),
            text: Some(text.to_string()),
        });
        index
    }

    pub fn add_type(&mut self, ty: TypeModel) -> &mut Self {
        self.model.types.push(ty);
        self
    }

    #[must_use]
    pub fn build(self) -> ProgramModel {
        self.model
    }
}

impl TypeModel {
    fn with_kind(name: &str, kind: TypeKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            base: None,
            interfaces: Vec::new(),
            file: None,
            name_span: Span::DUMMY,
            members: Vec::new(),
            implementations: Vec::new(),
        }
    }

    #[must_use]
    pub fn class(name: &str) -> Self {
        Self::with_kind(name, TypeKind::Class)
    }

    #[must_use]
    pub fn structure(name: &str) -> Self {
        Self::with_kind(name, TypeKind::Struct)
    }

    #[must_use]
    pub fn interface(name: &str) -> Self {
        Self::with_kind(name, TypeKind::Interface)
    }

    #[must_use]
    pub fn in_file(mut self, file: u32, name_span: Span) -> Self {
        self.file = Some(file);
        self.name_span = name_span;
        self
    }

    #[must_use]
    pub fn extends(mut self, base: &str) -> Self {
        self.base = Some(base.to_string());
        self
    }

    #[must_use]
    pub fn implements(mut self, interface: &str) -> Self {
        self.interfaces.push(interface.to_string());
        self
    }

    #[must_use]
    pub fn member(mut self, member: MemberModel) -> Self {
        self.members.push(member);
        self
    }

    /// Map `interface_member` to the member named `implementation` on this type.
    #[must_use]
    pub fn implementation(mut self, interface_member: MemberRef, implementation: &str) -> Self {
        self.implementations.push(ImplementationModel {
            interface_member,
            implementation: implementation.to_string(),
        });
        self
    }
}

impl MemberModel {
    #[must_use]
    pub fn new(name: &str, kind: MemberKindModel) -> Self {
        Self {
            name: name.to_string(),
            kind,
            is_static: false,
            parameters: Vec::new(),
            name_span: Span::DUMMY,
            declaration_start: None,
            documentation: None,
            overrides: None,
            chain: ConstructorInitializer::None,
            owner: None,
            body: None,
            initializer: None,
        }
    }

    #[must_use]
    pub fn method(name: &str) -> Self {
        Self::new(name, MemberKindModel::Method)
    }

    #[must_use]
    pub fn constructor(name: &str) -> Self {
        Self::new(name, MemberKindModel::Constructor)
    }

    #[must_use]
    pub fn static_constructor(name: &str) -> Self {
        Self::new(name, MemberKindModel::Constructor).into_static()
    }

    #[must_use]
    pub fn field(name: &str) -> Self {
        Self::new(name, MemberKindModel::Field)
    }

    #[must_use]
    pub fn property(name: &str) -> Self {
        Self::new(name, MemberKindModel::Property)
    }

    #[must_use]
    pub fn event(name: &str) -> Self {
        Self::new(name, MemberKindModel::Event)
    }

    #[must_use]
    pub fn property_accessor(name: &str, property: &str) -> Self {
        let mut member = Self::new(name, MemberKindModel::PropertyAccessor);
        member.owner = Some(property.to_string());
        member
    }

    #[must_use]
    pub fn event_accessor(name: &str, event: &str) -> Self {
        let mut member = Self::new(name, MemberKindModel::EventAccessor);
        member.owner = Some(event.to_string());
        member
    }

    #[must_use]
    pub fn into_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[must_use]
    pub fn at(mut self, name_span: Span) -> Self {
        self.name_span = name_span;
        self
    }

    #[must_use]
    pub fn declared_at(mut self, offset: u32) -> Self {
        self.declaration_start = Some(offset);
        self
    }

    #[must_use]
    pub fn params(mut self, parameters: &[&str]) -> Self {
        self.parameters = parameters.iter().map(|p| (*p).to_string()).collect();
        self
    }

    /// Attach a documentation comment starting at byte `offset`.
    #[must_use]
    pub fn documented(mut self, text: &str, offset: u32) -> Self {
        self.documentation = Some(DocCommentModel {
            text: text.to_string(),
            offset,
        });
        self
    }

    #[must_use]
    pub fn overrides(mut self, member: MemberRef) -> Self {
        self.overrides = Some(member);
        self
    }

    #[must_use]
    pub fn chains(mut self, initializer: ConstructorInitializer) -> Self {
        self.chain = initializer;
        self
    }

    #[must_use]
    pub fn body(mut self, body: OperationModel) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn initializer(mut self, initializer: OperationModel) -> Self {
        self.initializer = Some(initializer);
        self
    }
}

impl MemberRef {
    #[must_use]
    pub fn new(type_name: &str, member: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            member: member.to_string(),
            parameters: None,
        }
    }

    /// Reference to the constructor of `type_name` (named after the type).
    #[must_use]
    pub fn constructor(type_name: &str) -> Self {
        Self::new(type_name, simple_name(type_name))
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: &[&str]) -> Self {
        self.parameters = Some(parameters.iter().map(|p| (*p).to_string()).collect());
        self
    }
}

impl OperationModel {
    /// Untyped structural node.
    #[must_use]
    pub fn block(children: Vec<OperationModel>) -> Self {
        OperationModel::Node {
            span: Span::DUMMY,
            ty: None,
            children,
        }
    }

    /// Expression of a known type, e.g. a local variable reference.
    #[must_use]
    pub fn value(ty: &str, span: Span) -> Self {
        OperationModel::Node {
            span,
            ty: Some(ty.to_string()),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn throw(keyword: Span, exception: OperationModel) -> Self {
        OperationModel::Throw {
            keyword,
            span: keyword,
            exception: Some(Box::new(exception)),
        }
    }

    /// `throw;` inside a catch handler.
    #[must_use]
    pub fn rethrow(keyword: Span) -> Self {
        OperationModel::Throw {
            keyword,
            span: keyword,
            exception: None,
        }
    }

    /// `throw new T();`
    #[must_use]
    pub fn throw_new(keyword: Span, type_name: &str, type_span: Span) -> Self {
        Self::throw(keyword, Self::new_object(type_name, type_span, Vec::new()))
    }

    #[must_use]
    pub fn new_object(type_name: &str, type_span: Span, arguments: Vec<OperationModel>) -> Self {
        OperationModel::ObjectCreation {
            constructor: MemberRef::constructor(type_name),
            type_span,
            span: type_span,
            arguments,
        }
    }

    /// Invocation of `target`; `name_span` covers the callee name or the
    /// `this`/`base` keyword of a constructor initializer.
    #[must_use]
    pub fn call(target: MemberRef, name_span: Span, arguments: Vec<OperationModel>) -> Self {
        OperationModel::Invocation {
            target,
            name_span,
            span: name_span,
            ty: None,
            arguments,
        }
    }

    #[must_use]
    pub fn implicit_conversion(ty: &str, operand: OperationModel) -> Self {
        OperationModel::Conversion {
            implicit: true,
            span: Span::DUMMY,
            ty: Some(ty.to_string()),
            operand: Box::new(operand),
        }
    }

    #[must_use]
    pub fn try_catch(
        body: OperationModel,
        catches: Vec<CatchModel>,
        finally: Option<OperationModel>,
    ) -> Self {
        OperationModel::Try {
            span: Span::DUMMY,
            body: Box::new(body),
            catches,
            finally: finally.map(Box::new),
        }
    }
}

impl CatchModel {
    /// `catch (T) { handler }`
    #[must_use]
    pub fn new(exception_type: &str, handler: OperationModel) -> Self {
        Self {
            exception_type: Some(exception_type.to_string()),
            filter: None,
            handler: Box::new(handler),
        }
    }

    /// `catch { handler }`
    #[must_use]
    pub fn catch_all(handler: OperationModel) -> Self {
        Self {
            exception_type: None,
            filter: None,
            handler: Box::new(handler),
        }
    }

    /// Add a `when (...)` filter.
    #[must_use]
    pub fn when(mut self, filter: OperationModel) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }
}
