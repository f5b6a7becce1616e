//! Member resolution for struct and contract declarations.
//!
//! The same code resolves user-authored declarations and the synthesized
//! built-in ones; only the [`TypeResolver`] differs.

use std::sync::Arc;

use rowan::TextRange;
use rustc_hash::FxHashMap;
use sol_parser::ast::item::{ContractDef, ContractItem, FnDef, Name, ParamList, StateVarDecl, StructDef, TypeRef};
use sol_parser::ast::AstNode;
use sol_parser::SyntaxKind;

use crate::error::{BuiltinError, TypeError};
use crate::ty::{Callable, ContractTy, Field, Member, Primitive, StructTy, Ty, Usage, Visibility};

/// Why a name the resolver knows could still not be turned into a type.
#[derive(Clone, Debug, PartialEq)]
pub enum LookupError {
    /// The named built-in failed to construct.
    Builtin(BuiltinError),
    /// The named built-in is constructed after the one being built, or is
    /// the one being built.
    ForwardReference,
}

/// Maps type names in declarations to types.
///
/// `Ok(None)` means the name is unknown.
pub trait TypeResolver {
    /// Resolve a non-elementary type name such as `Point` or `@Msg`.
    fn resolve_named(&self, name: &str) -> Result<Option<Arc<Ty>>, LookupError>;

    /// Elementary names resolve to primitives; everything else goes
    /// through [`TypeResolver::resolve_named`].
    fn resolve_type(&self, name: &str) -> Result<Option<Arc<Ty>>, LookupError> {
        match Primitive::from_elementary(name) {
            Some(p) => Ok(Some(Ty::primitive(p))),
            None => self.resolve_named(name),
        }
    }
}

/// A table of already resolved types, keyed by name.
impl TypeResolver for FxHashMap<String, Arc<Ty>> {
    fn resolve_named(&self, name: &str) -> Result<Option<Arc<Ty>>, LookupError> {
        Ok(self.get(name).cloned())
    }
}

pub fn resolve_struct(def: &StructDef, resolver: &dyn TypeResolver) -> Result<StructTy, TypeError> {
    let name = require_name(def.name(), "struct", def.syntax().text_range())?;

    let fields = def
        .fields()
        .map(|field| {
            let range = field.syntax().text_range();
            Ok(Field {
                name: require_name(field.name(), "struct field", range)?,
                ty: resolve_type_ref(field.type_ref(), resolver, range)?,
                visibility: Visibility::Public,
            })
        })
        .collect::<Result<Vec<_>, TypeError>>()?;

    Ok(StructTy::new(name, def.syntax().green().into_owned(), fields))
}

pub fn resolve_contract(def: &ContractDef, resolver: &dyn TypeResolver) -> Result<ContractTy, TypeError> {
    let name = require_name(def.name(), "contract", def.syntax().text_range())?;

    let members = def
        .items()
        .map(|item| match item {
            ContractItem::StateVar(var) => resolve_state_var(&var, resolver).map(Member::Field),
            ContractItem::Function(f) => resolve_function(&f, resolver).map(Member::Callable),
        })
        .collect::<Result<Vec<_>, TypeError>>()?;

    Ok(ContractTy::new(name, def.syntax().green().into_owned(), members))
}

fn resolve_state_var(var: &StateVarDecl, resolver: &dyn TypeResolver) -> Result<Field, TypeError> {
    let range = var.syntax().text_range();
    Ok(Field {
        name: require_name(var.name(), "state variable", range)?,
        ty: resolve_type_ref(var.type_ref(), resolver, range)?,
        visibility: var
            .visibility()
            .and_then(visibility_from_kind)
            .unwrap_or(Visibility::Internal),
    })
}

fn resolve_function(f: &FnDef, resolver: &dyn TypeResolver) -> Result<Callable, TypeError> {
    let range = f.syntax().text_range();
    let name = require_name(f.name(), "function", range)?;

    let params = match f.param_list() {
        Some(list) => resolve_params(&list, resolver)?,
        None => Vec::new(),
    };

    let returns = match f.returns_clause().and_then(|r| r.param_list()) {
        Some(list) => resolve_params(&list, resolver)?,
        None => Vec::new(),
    };
    if returns.len() > 1 {
        return Err(TypeError::MultipleReturns {
            function: name,
            count: returns.len(),
            range,
        });
    }

    Ok(Callable {
        name,
        params,
        return_type: returns.into_iter().next().map(|(_, ty)| ty),
        visibility: f
            .visibility()
            .and_then(visibility_from_kind)
            .unwrap_or(Visibility::Public),
        usage: Usage::Function,
    })
}

fn resolve_params(
    list: &ParamList,
    resolver: &dyn TypeResolver,
) -> Result<Vec<(Option<String>, Arc<Ty>)>, TypeError> {
    list.params()
        .map(|param| {
            let range = param.syntax().text_range();
            let ty = resolve_type_ref(param.type_ref(), resolver, range)?;
            Ok((param.name().and_then(|n| n.text()), ty))
        })
        .collect()
}

fn resolve_type_ref(
    type_ref: Option<TypeRef>,
    resolver: &dyn TypeResolver,
    owner: TextRange,
) -> Result<Arc<Ty>, TypeError> {
    let Some(type_ref) = type_ref else {
        return Err(TypeError::UnknownType {
            name: String::new(),
            range: owner,
        });
    };
    let name = type_ref.text();
    let range = type_ref.syntax().text_range();
    match resolver.resolve_type(&name) {
        Ok(Some(ty)) => Ok(ty),
        Ok(None) => Err(TypeError::UnknownType { name, range }),
        Err(LookupError::ForwardReference) => Err(TypeError::ForwardReference { name, range }),
        Err(LookupError::Builtin(error)) => Err(TypeError::Dependency {
            name,
            range,
            error: Box::new(error),
        }),
    }
}

fn require_name(name: Option<Name>, what: &'static str, range: TextRange) -> Result<String, TypeError> {
    name.and_then(|n| n.text())
        .ok_or(TypeError::MissingName { what, range })
}

fn visibility_from_kind(kind: SyntaxKind) -> Option<Visibility> {
    match kind {
        SyntaxKind::PUBLIC_KW => Some(Visibility::Public),
        SyntaxKind::PRIVATE_KW => Some(Visibility::Private),
        SyntaxKind::INTERNAL_KW => Some(Visibility::Internal),
        SyntaxKind::EXTERNAL_KW => Some(Visibility::External),
        _ => None,
    }
}
