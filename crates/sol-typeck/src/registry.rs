//! The built-in type registry.
//!
//! Every built-in owns a write-once cell. The first request runs its
//! construction (parsing and resolving the synthesized declaration, or
//! building the member table); concurrent first requests block on the cell
//! and all callers observe the same `Arc<Ty>`. A failed construction is
//! memoized like a successful one.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use rustc_hash::FxHashMap;
use sol_common::names::is_internal_name;
use tracing::{debug, trace};

use crate::builtins::{self, BuiltinKind, Templates};
use crate::error::BuiltinError;
use crate::members::{LookupError, TypeResolver};
use crate::synth::{synthesize_contract, synthesize_struct};
use crate::ty::{Member, Ty};

type Cell = OnceLock<Result<Arc<Ty>, BuiltinError>>;

pub struct BuiltinRegistry {
    templates: Templates,
    /// Indexed by `BuiltinKind as usize`.
    cells: [Cell; BuiltinKind::ALL.len()],
    /// Canonical names and implicit identifiers.
    names: FxHashMap<&'static str, BuiltinKind>,
    built: AtomicUsize,
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        Self::with_templates(Templates::default())
    }

    pub fn with_templates(templates: Templates) -> Self {
        let mut names = FxHashMap::default();
        for kind in BuiltinKind::ALL {
            names.insert(kind.canonical_name(), kind);
            if let Some(ident) = kind.implicit_identifier() {
                names.insert(ident, kind);
            }
        }

        Self {
            templates,
            cells: Default::default(),
            names,
            built: AtomicUsize::new(0),
        }
    }

    /// Resolve a canonical name (`@Msg`) or implicit identifier (`msg`).
    ///
    /// `Ok(None)` means the name is not a built-in; nothing is constructed.
    pub fn lookup(&self, name: &str) -> Result<Option<Arc<Ty>>, BuiltinError> {
        match self.names.get(name) {
            Some(&kind) => {
                trace!(name, canonical = kind.canonical_name(), "built-in lookup");
                self.get(kind).map(Some)
            }
            None => Ok(None),
        }
    }

    pub fn get(&self, kind: BuiltinKind) -> Result<Arc<Ty>, BuiltinError> {
        self.cell_value(kind).cloned()
    }

    pub fn msg_type(&self) -> Result<Arc<Ty>, BuiltinError> {
        self.get(BuiltinKind::Msg)
    }

    pub fn tx_type(&self) -> Result<Arc<Ty>, BuiltinError> {
        self.get(BuiltinKind::Tx)
    }

    pub fn block_type(&self) -> Result<Arc<Ty>, BuiltinError> {
        self.get(BuiltinKind::Block)
    }

    pub fn address_type(&self) -> Result<Arc<Ty>, BuiltinError> {
        self.get(BuiltinKind::Address)
    }

    pub fn array_type(&self) -> Result<Arc<Ty>, BuiltinError> {
        self.get(BuiltinKind::Array)
    }

    pub fn global_type(&self) -> Result<Arc<Ty>, BuiltinError> {
        self.get(BuiltinKind::Global)
    }

    /// Resolve an unqualified identifier against the global namespace.
    pub fn global_member(&self, name: &str) -> Result<Option<&Member>, BuiltinError> {
        Ok(self.cell_value(BuiltinKind::Global)?.member(name))
    }

    /// Every global member called `name`, e.g. all `require` overloads.
    pub fn global_members(&self, name: &str) -> Result<Vec<&Member>, BuiltinError> {
        let global = self.cell_value(BuiltinKind::Global)?;
        Ok(global.members().iter().filter(|m| m.name() == name).collect())
    }

    pub fn is_builtin_name(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn canonical_names(&self) -> impl Iterator<Item = &'static str> {
        BuiltinKind::ALL.into_iter().map(BuiltinKind::canonical_name)
    }

    /// How many built-ins have been constructed so far, failures included.
    pub fn built_count(&self) -> usize {
        self.built.load(Ordering::Acquire)
    }

    fn cell_value(&self, kind: BuiltinKind) -> Result<&Arc<Ty>, BuiltinError> {
        let cell = &self.cells[kind as usize];
        if cell.get().is_some() {
            trace!(canonical = kind.canonical_name(), "built-in cache hit");
        }
        cell.get_or_init(|| {
            let result = self.build(kind).map(Arc::new);
            self.built.fetch_add(1, Ordering::AcqRel);
            result
        })
        .as_ref()
        .map_err(Clone::clone)
    }

    fn build(&self, kind: BuiltinKind) -> Result<Ty, BuiltinError> {
        debug!(canonical = kind.canonical_name(), "constructing built-in");
        let plain = kind.plain_name();
        let t = &self.templates;
        let scope = BuildScope {
            registry: self,
            building: kind,
        };
        match kind {
            BuiltinKind::Msg => synthesize_struct(plain, &t.msg_fields, &scope),
            BuiltinKind::Tx => synthesize_struct(plain, &t.tx_fields, &scope),
            BuiltinKind::Block => Ok(builtins::block_type()),
            BuiltinKind::Address => synthesize_contract(plain, &t.address_members, &scope),
            BuiltinKind::Array => synthesize_contract(plain, &t.array_members, &scope),
            BuiltinKind::Global => {
                // The namespace embeds the rendered names of its dependencies,
                // so they must exist first. Their failure is ours.
                let block = self.block_type()?;
                let msg = self.msg_type()?;
                let tx = self.tx_type()?;
                let body = format!(
                    "{block} block;\n    {msg} msg;\n    {tx} tx;\n    uint now;\n\n    {}",
                    t.global_members
                );
                synthesize_contract(plain, &body, &scope)
            }
        }
    }
}

/// Elementary names resolve to primitives, canonical names to the memoized
/// built-ins. Implicit identifiers such as `msg` are values, not types, and
/// do not resolve here.
impl TypeResolver for BuiltinRegistry {
    fn resolve_named(&self, name: &str) -> Result<Option<Arc<Ty>>, LookupError> {
        if !is_internal_name(name) {
            return Ok(None);
        }
        match BuiltinKind::from_canonical(name) {
            Some(kind) => self.get(kind).map(Some).map_err(LookupError::Builtin),
            None => Ok(None),
        }
    }
}

/// The resolver a template sees while `building` is under construction.
///
/// Only built-ins constructed before `building` resolve. A construction can
/// therefore never wait on its own cell, directly or through another thread.
struct BuildScope<'r> {
    registry: &'r BuiltinRegistry,
    building: BuiltinKind,
}

impl TypeResolver for BuildScope<'_> {
    fn resolve_named(&self, name: &str) -> Result<Option<Arc<Ty>>, LookupError> {
        match BuiltinKind::from_canonical(name) {
            Some(kind) if !kind.precedes(self.building) => {
                trace!(
                    canonical = self.building.canonical_name(),
                    dependency = name,
                    "forward reference in built-in template"
                );
                Err(LookupError::ForwardReference)
            }
            _ => self.registry.resolve_named(name),
        }
    }
}

impl std::fmt::Debug for BuiltinRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let built: Vec<&str> = BuiltinKind::ALL
            .into_iter()
            .filter(|kind| self.cells[*kind as usize].get().is_some())
            .map(BuiltinKind::canonical_name)
            .collect();
        f.debug_struct("BuiltinRegistry").field("built", &built).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TypeError;
    use crate::ty::Usage;

    #[test]
    fn lookup_is_memoized() {
        let registry = BuiltinRegistry::new();
        assert_eq!(registry.built_count(), 0);
        let a = registry.lookup("@Msg").unwrap().unwrap();
        let b = registry.lookup("msg").unwrap().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.built_count(), 1);
    }

    #[test]
    fn unknown_names_construct_nothing() {
        let registry = BuiltinRegistry::new();
        assert!(registry.lookup("notABuiltin").unwrap().is_none());
        assert!(registry.lookup("Msg").unwrap().is_none());
        assert!(registry.lookup("global").unwrap().is_none());
        assert_eq!(registry.built_count(), 0);
    }

    #[test]
    fn global_forces_its_dependencies_only() {
        let registry = BuiltinRegistry::new();
        registry.global_type().unwrap();
        assert_eq!(registry.built_count(), 4);
        assert_eq!(format!("{registry:?}"), r#"BuiltinRegistry { built: ["@Msg", "@Tx", "@Block", "@Global"] }"#);
    }

    #[test]
    fn resolver_only_knows_canonical_names() {
        let registry = BuiltinRegistry::new();
        assert!(registry.resolve_type("@Tx").unwrap().is_some());
        assert!(registry.resolve_type("uint8").unwrap().is_some());
        assert!(registry.resolve_type("tx").unwrap().is_none());
        assert!(registry.resolve_type("Tx").unwrap().is_none());
    }

    #[test]
    fn dependents_report_the_dependency_error() {
        let registry = BuiltinRegistry::with_templates(Templates {
            msg_fields: "bytes data".into(),
            address_members: "@Msg m;".into(),
            ..Templates::default()
        });

        let msg = registry.msg_type().unwrap_err();
        let address = registry.address_type().unwrap_err();
        assert!(matches!(address, BuiltinError::Parse { .. }), "{address}");
        assert_eq!(address, msg);

        // The resolver hands out the same error for user declarations.
        assert_eq!(
            registry.resolve_type("@Msg"),
            Err(LookupError::Builtin(msg))
        );
    }

    #[test]
    fn templates_may_only_name_earlier_builtins() {
        for (templates, building, named) in [
            (
                Templates {
                    msg_fields: "@Global g;".into(),
                    ..Templates::default()
                },
                BuiltinKind::Msg,
                "@Global",
            ),
            (
                Templates {
                    tx_fields: "@Tx inner;".into(),
                    ..Templates::default()
                },
                BuiltinKind::Tx,
                "@Tx",
            ),
            (
                Templates {
                    address_members: "@Array items;".into(),
                    ..Templates::default()
                },
                BuiltinKind::Address,
                "@Array",
            ),
        ] {
            let registry = BuiltinRegistry::with_templates(templates);
            let err = registry.get(building).unwrap_err();
            match &err {
                BuiltinError::Resolve {
                    canonical,
                    error: TypeError::ForwardReference { name, .. },
                    ..
                } => {
                    assert_eq!(canonical, building.canonical_name());
                    assert_eq!(name, named);
                }
                other => panic!("unexpected error: {other:?}"),
            }
            // Memoized like any other failure.
            assert_eq!(registry.get(building).unwrap_err(), err);
        }
    }

    #[test]
    fn templates_may_name_earlier_builtins() {
        let registry = BuiltinRegistry::with_templates(Templates {
            array_members: "@Address owner;\n    function push(uint value);".into(),
            ..Templates::default()
        });
        let array = registry.array_type().unwrap();
        let owner = array.member("owner").and_then(Member::ty).unwrap();
        assert!(Arc::ptr_eq(owner, &registry.address_type().unwrap()));
    }

    #[test]
    fn failures_are_memoized() {
        let templates = Templates {
            msg_fields: "bytes data".into(),
            ..Templates::default()
        };
        let registry = BuiltinRegistry::with_templates(templates);

        let first = registry.msg_type().unwrap_err();
        let again = registry.lookup("msg").unwrap_err();
        assert_eq!(first, again);
        assert!(matches!(first, BuiltinError::Parse { .. }));

        // The global namespace depends on `@Msg` and reports its error.
        let global = registry.global_type().unwrap_err();
        assert_eq!(global, first);
        assert!(registry.global_member("require").is_err());

        // Unrelated built-ins are unaffected.
        assert!(registry.tx_type().is_ok());
        assert_eq!(
            registry.block_type().unwrap().member("number").map(Member::usage),
            Some(Usage::Variable)
        );
    }
}
