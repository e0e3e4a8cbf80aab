//! Binder state: the lowered program and the semantic queries the checker uses.

use exn_common::FileId;
use exn_common::limits::MAX_INHERITANCE_DEPTH;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::corlib;
use crate::docs::{Documentation, strip_type_prefix};
use crate::error::BindError;
use crate::model::{MemberKindModel, MemberModel, MemberRef, OperationModel, ProgramModel, TypeModel};
use crate::operations::{CatchClause, NodeIndex, Operation, OperationArena, OperationKind};
use crate::symbols::{ConstructorInitializer, Symbol, SymbolId, SymbolKind};
use crate::types::{TypeId, TypeInfo, TypeKind, simple_name};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub text: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BindOptions {
    /// Do not link the default library.
    pub no_lib: bool,
}

/// Work item of [`BinderState::lower_operation`].
enum Lowering<'m> {
    Enter(&'m OperationModel),
    /// All operands are lowered; the count says how many results to take.
    Exit(&'m OperationModel, usize),
}

/// Schedule `model`'s operands for lowering, first operand on top.
fn push_operands<'m>(work: &mut Vec<Lowering<'m>>, model: &'m OperationModel) {
    let operands: SmallVec<[&OperationModel; 4]> = model.operands().collect();
    for operand in operands.into_iter().rev() {
        work.push(Lowering::Exit(operand, operand.operands().count()));
        work.push(Lowering::Enter(operand));
    }
}

/// Immutable after [`BinderState::bind`]; shared read-only across checker threads.
#[derive(Debug, Default)]
pub struct BinderState {
    files: Vec<SourceFile>,
    types: Vec<TypeInfo>,
    symbols: Vec<Symbol>,
    arena: OperationArena,
    types_by_full_name: FxHashMap<String, TypeId>,
    types_by_simple_name: FxHashMap<String, SmallVec<[TypeId; 2]>>,
}

impl BinderState {
    /// Lower a program model, linking the default library unless `options.no_lib`.
    ///
    /// Library types redeclared by the model are taken from the model.
    pub fn bind(model: &ProgramModel, options: BindOptions) -> Result<Self, BindError> {
        let mut state = BinderState {
            files: model
                .files
                .iter()
                .map(|file| SourceFile {
                    name: file.name.clone(),
                    text: file.text.clone(),
                })
                .collect(),
            ..BinderState::default()
        };

        let library = if options.no_lib {
            Vec::new()
        } else {
            let declared: FxHashSet<&str> = model.types.iter().map(|t| t.name.as_str()).collect();
            corlib::corlib_types()
                .into_iter()
                .filter(|t| !declared.contains(t.name.as_str()))
                .collect()
        };
        let type_models: Vec<&TypeModel> = library.iter().chain(model.types.iter()).collect();

        for type_model in &type_models {
            state.declare_type(type_model)?;
        }
        let mut declared_members = Vec::with_capacity(type_models.len());
        for (index, type_model) in type_models.iter().enumerate() {
            declared_members.push(state.declare_members(TypeId(index as u32), type_model)?);
        }
        for (index, type_model) in type_models.iter().enumerate() {
            state.resolve_heritage(TypeId(index as u32), type_model)?;
        }
        for (index, (type_model, members)) in type_models.iter().zip(&declared_members).enumerate() {
            state.link_members(TypeId(index as u32), type_model, members)?;
        }

        debug!(
            files = state.files.len(),
            types = state.types.len(),
            symbols = state.symbols.len(),
            operations = state.arena.len(),
            "bound program model"
        );
        Ok(state)
    }

    // =========================================================================
    // Declaration
    // =========================================================================

    fn declare_type(&mut self, model: &TypeModel) -> Result<TypeId, BindError> {
        if self.types_by_full_name.contains_key(&model.name) {
            return Err(BindError::DuplicateType(model.name.clone()));
        }
        let file = match model.file {
            Some(index) if (index as usize) < self.files.len() => Some(FileId(index)),
            Some(index) => return Err(BindError::UnknownFile(index)),
            None => None,
        };
        let id = TypeId(self.types.len() as u32);
        let name = simple_name(&model.name).to_string();
        self.types_by_simple_name
            .entry(name.clone())
            .or_default()
            .push(id);
        self.types_by_full_name.insert(model.name.clone(), id);
        self.types.push(TypeInfo {
            name,
            full_name: model.name.clone(),
            kind: model.kind,
            base: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            file,
            name_span: model.name_span,
            interface_map: Vec::new(),
        });
        Ok(id)
    }

    /// Declare the members of `ty`. The result is parallel to `model.members`.
    fn declare_members(
        &mut self,
        ty: TypeId,
        model: &TypeModel,
    ) -> Result<Vec<SymbolId>, BindError> {
        let is_accessor = |m: &MemberModel| {
            matches!(
                m.kind,
                MemberKindModel::PropertyAccessor | MemberKindModel::EventAccessor
            )
        };
        let mut ids: Vec<Option<SymbolId>> = vec![None; model.members.len()];

        // Properties and events first; accessors look up their owner by name.
        for (index, member) in model.members.iter().enumerate() {
            if is_accessor(member) {
                continue;
            }
            let kind = match member.kind {
                MemberKindModel::Method => SymbolKind::Method,
                MemberKindModel::Constructor => SymbolKind::Constructor {
                    initializer: member.chain,
                    implicit: false,
                },
                MemberKindModel::Property => SymbolKind::Property,
                MemberKindModel::Event => SymbolKind::Event,
                MemberKindModel::Field => SymbolKind::Field,
                MemberKindModel::PropertyAccessor | MemberKindModel::EventAccessor => continue,
            };
            ids[index] = Some(self.declare_member(ty, member, kind));
        }

        for (index, member) in model.members.iter().enumerate() {
            if !is_accessor(member) {
                continue;
            }
            let owner_name = member.owner.as_deref().unwrap_or_default();
            let wanted = if member.kind == MemberKindModel::PropertyAccessor {
                SymbolKind::Property
            } else {
                SymbolKind::Event
            };
            let owner = self.types[ty.index()]
                .members
                .iter()
                .copied()
                .find(|&id| {
                    let candidate = &self.symbols[id.index()];
                    candidate.name == owner_name && candidate.kind == wanted
                })
                .ok_or_else(|| BindError::UnknownOwner {
                    type_name: model.name.clone(),
                    accessor: member.name.clone(),
                    owner: owner_name.to_string(),
                })?;
            let kind = if wanted == SymbolKind::Property {
                SymbolKind::PropertyAccessor { owner }
            } else {
                SymbolKind::EventAccessor { owner }
            };
            ids[index] = Some(self.declare_member(ty, member, kind));
        }

        let info = &self.types[ty.index()];
        let has_instance_constructor = info
            .members
            .iter()
            .any(|&id| self.symbols[id.index()].is_instance_constructor());
        if info.kind != TypeKind::Interface && !has_instance_constructor {
            let implicit = Symbol {
                name: info.name.clone(),
                kind: SymbolKind::Constructor {
                    initializer: ConstructorInitializer::None,
                    implicit: true,
                },
                declaring_type: ty,
                is_static: false,
                file: info.file,
                name_span: info.name_span,
                declaration_start: None,
                parameters: Vec::new(),
                documentation: Documentation::default(),
                overridden: None,
                body: None,
                initializer: None,
            };
            self.push_symbol(ty, implicit);
        }
        Ok(ids.into_iter().flatten().collect())
    }

    fn declare_member(&mut self, ty: TypeId, member: &MemberModel, kind: SymbolKind) -> SymbolId {
        let documentation = member
            .documentation
            .as_ref()
            .map(|doc| Documentation::parse(&doc.text, doc.offset))
            .unwrap_or_default();
        let symbol = Symbol {
            name: member.name.clone(),
            kind,
            declaring_type: ty,
            is_static: member.is_static,
            file: self.types[ty.index()].file,
            name_span: member.name_span,
            declaration_start: member.declaration_start,
            parameters: member.parameters.clone(),
            documentation,
            overridden: None,
            body: None,
            initializer: None,
        };
        self.push_symbol(ty, symbol)
    }

    fn push_symbol(&mut self, ty: TypeId, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(symbol);
        self.types[ty.index()].members.push(id);
        id
    }

    fn resolve_heritage(&mut self, ty: TypeId, model: &TypeModel) -> Result<(), BindError> {
        let base = match &model.base {
            Some(name) => Some(self.require_type(name, || format!("base of '{}'", model.name))?),
            None => None,
        };
        let interfaces = model
            .interfaces
            .iter()
            .map(|name| self.require_type(name, || format!("interface list of '{}'", model.name)))
            .collect::<Result<Vec<_>, _>>()?;
        let info = &mut self.types[ty.index()];
        info.base = base;
        info.interfaces = interfaces;
        Ok(())
    }

    /// Overrides, explicit implementations, bodies and initializers. Needs the
    /// full type graph, since member references may name inherited members.
    fn link_members(
        &mut self,
        ty: TypeId,
        model: &TypeModel,
        members: &[SymbolId],
    ) -> Result<(), BindError> {
        for implementation in &model.implementations {
            let interface_member = self.resolve_member_ref(&implementation.interface_member)?;
            let implementing = self
                .find_declared_member(ty, &implementation.implementation)
                .ok_or_else(|| BindError::UnknownMember {
                    type_name: model.name.clone(),
                    member: implementation.implementation.clone(),
                })?;
            self.types[ty.index()]
                .interface_map
                .push((interface_member, implementing));
        }

        for (member, &id) in model.members.iter().zip(members) {
            if let Some(reference) = &member.overrides {
                let overridden = self.resolve_member_ref(reference)?;
                self.symbols[id.index()].overridden = Some(overridden);
            }
            if let Some(body) = &member.body {
                let root = self.lower_operation(body)?;
                self.symbols[id.index()].body = Some(root);
            }
            if let Some(initializer) = &member.initializer {
                let root = self.lower_operation(initializer)?;
                self.symbols[id.index()].initializer = Some(root);
            }
        }
        Ok(())
    }

    fn require_type(
        &self,
        name: &str,
        context: impl FnOnce() -> String,
    ) -> Result<TypeId, BindError> {
        self.resolve_type_name(name)
            .ok_or_else(|| BindError::UnknownType {
                name: name.to_string(),
                context: context(),
            })
    }

    fn find_declared_member(&self, ty: TypeId, name: &str) -> Option<SymbolId> {
        self.types[ty.index()]
            .members
            .iter()
            .copied()
            .find(|&id| self.symbols[id.index()].name == name)
    }

    fn resolve_member_ref(&self, reference: &MemberRef) -> Result<SymbolId, BindError> {
        let ty = self.require_type(&reference.type_name, || {
            format!("member reference '{}'", reference.member)
        })?;
        let mut fallback = None;
        for current in self.base_chain(ty) {
            for &id in &self.types[current.index()].members {
                let symbol = &self.symbols[id.index()];
                if symbol.name != reference.member {
                    continue;
                }
                if let Some(parameters) = &reference.parameters
                    && &symbol.parameters != parameters
                {
                    continue;
                }
                // `new T()` names the type; prefer the instance constructor
                // over the static one.
                if symbol.is_constructor() && symbol.is_static {
                    fallback.get_or_insert(id);
                    continue;
                }
                return Ok(id);
            }
        }
        fallback.ok_or_else(|| BindError::UnknownMember {
            type_name: reference.type_name.clone(),
            member: reference.member.clone(),
        })
    }

    fn expression_type(&self, name: Option<&String>) -> Option<TypeId> {
        let name = name?;
        let resolved = self.resolve_type_name(name);
        if resolved.is_none() {
            trace!(name = %name, "expression type is not in the type table");
        }
        resolved
    }

    /// Lower an operation tree into the arena, children before their parent.
    ///
    /// Uses an explicit work stack so nesting depth is bounded only by memory.
    fn lower_operation(&mut self, root: &OperationModel) -> Result<NodeIndex, BindError> {
        let mut work: Vec<Lowering<'_>> = Vec::new();
        push_operands(&mut work, root);
        let mut lowered: Vec<NodeIndex> = Vec::new();
        while let Some(item) = work.pop() {
            match item {
                Lowering::Enter(model) => push_operands(&mut work, model),
                Lowering::Exit(model, count) => {
                    let operands = lowered.split_off(lowered.len() - count);
                    lowered.push(self.build_operation(model, &operands)?);
                }
            }
        }
        self.build_operation(root, &lowered)
    }

    /// Build one operation whose `operands` (in [`OperationModel::operands`]
    /// order) are already lowered.
    fn build_operation(
        &mut self,
        model: &OperationModel,
        operands: &[NodeIndex],
    ) -> Result<NodeIndex, BindError> {
        let operation = match model {
            OperationModel::Node { span, ty, .. } => {
                let mut op = Operation::new(OperationKind::Other, *span);
                op.ty = self.expression_type(ty.as_ref());
                op.children.extend_from_slice(operands);
                op
            }
            OperationModel::Throw { keyword, span, .. } => {
                let mut op = Operation::new(OperationKind::Throw { keyword: *keyword }, *span);
                op.children.extend_from_slice(operands);
                op
            }
            OperationModel::Conversion {
                implicit, span, ty, ..
            } => {
                let mut op = Operation::new(OperationKind::Conversion { implicit: *implicit }, *span);
                op.ty = self.expression_type(ty.as_ref());
                op.children.extend_from_slice(operands);
                op
            }
            OperationModel::Invocation {
                target,
                name_span,
                span,
                ty,
                ..
            } => {
                let target = self.resolve_member_ref(target)?;
                let mut op = Operation::new(
                    OperationKind::Invocation {
                        target,
                        name_span: *name_span,
                    },
                    *span,
                );
                op.ty = self.expression_type(ty.as_ref());
                op.children.extend_from_slice(operands);
                op
            }
            OperationModel::ObjectCreation {
                constructor,
                type_span,
                span,
                ..
            } => {
                let constructor = self.resolve_member_ref(constructor)?;
                let mut op = Operation::new(
                    OperationKind::ObjectCreation {
                        constructor,
                        type_span: *type_span,
                    },
                    *span,
                );
                op.ty = Some(self.symbols[constructor.index()].declaring_type);
                op.children.extend_from_slice(operands);
                op
            }
            OperationModel::Try {
                span,
                catches,
                finally,
                ..
            } => {
                let mut cursor = 0;
                let mut next = || {
                    cursor += 1;
                    operands[cursor - 1]
                };
                let body = next();
                let mut clauses = Vec::with_capacity(catches.len());
                for catch in catches {
                    let exception_type = match &catch.exception_type {
                        Some(name) => Some(self.require_type(name, || "catch clause".to_string())?),
                        None => None,
                    };
                    let filter = catch.filter.as_ref().map(|_| next());
                    clauses.push(CatchClause {
                        exception_type,
                        filter,
                        handler: next(),
                    });
                }
                let finally = finally.as_ref().map(|_| next());
                Operation::new(
                    OperationKind::Try {
                        body,
                        catches: clauses,
                        finally,
                    },
                    *span,
                )
            }
        };
        Ok(self.arena.add(operation))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[must_use]
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    #[must_use]
    pub fn file(&self, file: FileId) -> Option<&SourceFile> {
        self.files.get(file.index())
    }

    #[must_use]
    pub fn file_name(&self, file: FileId) -> &str {
        self.file(file).map_or("", |f| f.name.as_str())
    }

    #[must_use]
    pub fn arena(&self) -> &OperationArena {
        &self.arena
    }

    #[must_use]
    pub fn get_type(&self, id: TypeId) -> Option<&TypeInfo> {
        self.types.get(id.index())
    }

    #[must_use]
    pub fn get_symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    pub fn types(&self) -> impl Iterator<Item = (TypeId, &TypeInfo)> {
        self.types
            .iter()
            .enumerate()
            .map(|(index, info)| (TypeId(index as u32), info))
    }

    pub fn symbols(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(index, symbol)| (SymbolId(index as u32), symbol))
    }

    /// Exact fully-qualified lookup.
    #[must_use]
    pub fn lookup_type(&self, full_name: &str) -> Option<TypeId> {
        self.types_by_full_name.get(full_name).copied()
    }

    /// Fully-qualified name first, then a simple name that is unambiguous.
    #[must_use]
    pub fn resolve_type_name(&self, name: &str) -> Option<TypeId> {
        let name = name.trim();
        if let Some(id) = self.lookup_type(name) {
            return Some(id);
        }
        match self.types_by_simple_name.get(name).map(SmallVec::as_slice) {
            Some(&[only]) => Some(only),
            _ => None,
        }
    }

    /// Resolve the `cref` of a documentation `<exception>` element.
    #[must_use]
    pub fn resolve_cref(&self, cref: &str) -> Option<TypeId> {
        self.resolve_type_name(strip_type_prefix(cref))
    }

    #[must_use]
    pub fn base_type(&self, ty: TypeId) -> Option<TypeId> {
        self.get_type(ty)?.base
    }

    /// `ty` followed by its base classes, bounded and cycle-safe.
    pub fn base_chain(&self, ty: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        let mut next = self.get_type(ty).map(|_| ty);
        let mut remaining = MAX_INHERITANCE_DEPTH;
        std::iter::from_fn(move || {
            let current = next?;
            if remaining == 0 {
                return None;
            }
            remaining -= 1;
            next = self.base_type(current).filter(|&base| base != ty);
            Some(current)
        })
    }

    /// Simple name of a type, used in diagnostics.
    #[must_use]
    pub fn type_name(&self, ty: TypeId) -> &str {
        self.get_type(ty).map_or("", |info| info.name.as_str())
    }

    #[must_use]
    pub fn type_full_name(&self, ty: TypeId) -> &str {
        self.get_type(ty).map_or("", |info| info.full_name.as_str())
    }

    /// Display form of a member: `Type.Name(params)` for callables,
    /// `Type.Name` otherwise.
    #[must_use]
    pub fn display_name(&self, id: SymbolId) -> String {
        let Some(symbol) = self.get_symbol(id) else {
            return String::new();
        };
        let type_name = self.type_name(symbol.declaring_type);
        match symbol.kind {
            SymbolKind::Method | SymbolKind::Constructor { .. } => {
                format!("{type_name}.{}({})", symbol.name, symbol.parameters.join(", "))
            }
            _ => format!("{type_name}.{}", symbol.name),
        }
    }

    /// Parameterless instance constructor declared on `ty`.
    #[must_use]
    pub fn parameterless_instance_constructor(&self, ty: TypeId) -> Option<SymbolId> {
        self.get_type(ty)?.members.iter().copied().find(|&id| {
            self.get_symbol(id)
                .is_some_and(|s| s.is_instance_constructor() && s.parameters.is_empty())
        })
    }

    /// Declared instance constructors of `ty` that run instance member
    /// initializers: those that do not chain to another constructor of the
    /// same type. The implicit constructor has no declaration to document and
    /// is never part of the group.
    #[must_use]
    pub fn initialization_constructors(&self, ty: TypeId) -> Vec<SymbolId> {
        let Some(info) = self.get_type(ty) else {
            return Vec::new();
        };
        info.members
            .iter()
            .copied()
            .filter(|&id| {
                self.get_symbol(id).is_some_and(|s| {
                    s.is_instance_constructor()
                        && !s.is_implicit()
                        && s.constructor_initializer() != Some(ConstructorInitializer::This)
                })
            })
            .collect()
    }

    /// Member of `ty` (or a base class) implementing `interface_member`.
    ///
    /// Host-supplied explicit implementations win; otherwise the first
    /// non-static member with the same name, kind and parameters.
    #[must_use]
    pub fn find_implementation_for_interface_member(
        &self,
        ty: TypeId,
        interface_member: SymbolId,
    ) -> Option<SymbolId> {
        let wanted = self.get_symbol(interface_member)?;
        for current in self.base_chain(ty) {
            if let Some(&(_, implementation)) = self.types[current.index()]
                .interface_map
                .iter()
                .find(|(member, _)| *member == interface_member)
            {
                return Some(implementation);
            }
        }
        for current in self.base_chain(ty) {
            let found = self.types[current.index()].members.iter().copied().find(|&id| {
                let candidate = &self.symbols[id.index()];
                !candidate.is_static
                    && candidate.name == wanted.name
                    && candidate.same_member_kind(wanted)
                    && candidate.parameters == wanted.parameters
            });
            if found.is_some() {
                return found;
            }
        }
        None
    }
}
