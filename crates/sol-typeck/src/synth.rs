//! Synthetic declarations: built-in structs and contracts are rendered as
//! source text, parsed with the real parser and resolved exactly like user
//! declarations.

use sol_common::names::internalise;
use sol_parser::ast::item::Item;
use sol_parser::parse_builtin;
use tracing::{debug, error};

use crate::error::{BuiltinError, TypeError};
use crate::members::{resolve_contract, resolve_struct, TypeResolver};
use crate::ty::Ty;

/// Synthesize `struct @Plain { body }`.
#[tracing::instrument(level = "debug", skip(body, resolver))]
pub fn synthesize_struct(
    plain: &str,
    body: &str,
    resolver: &dyn TypeResolver,
) -> Result<Ty, BuiltinError> {
    let canonical = internalise(plain);
    let text = format!("struct {canonical} {{\n    {body}\n}}\n");

    match parse_single(&canonical, &text)? {
        Item::Struct(def) => match resolve_struct(&def, resolver) {
            Ok(ty) => {
                debug!(fields = ty.fields().count(), "synthesized struct");
                Ok(Ty::Struct(ty))
            }
            Err(err) => Err(resolve_failure(canonical, text, err)),
        },
        Item::Contract(_) => Err(fail(BuiltinError::UnexpectedShape {
            canonical,
            text,
            found: "a contract".to_string(),
        })),
    }
}

/// Synthesize `contract @Plain { body }`.
#[tracing::instrument(level = "debug", skip(body, resolver))]
pub fn synthesize_contract(
    plain: &str,
    body: &str,
    resolver: &dyn TypeResolver,
) -> Result<Ty, BuiltinError> {
    let canonical = internalise(plain);
    let text = format!("contract {canonical} {{\n    {body}\n}}\n");

    match parse_single(&canonical, &text)? {
        Item::Contract(def) => match resolve_contract(&def, resolver) {
            Ok(ty) => {
                let ty = Ty::Contract(ty);
                debug!(members = ty.members().len(), "synthesized contract");
                Ok(ty)
            }
            Err(err) => Err(resolve_failure(canonical, text, err)),
        },
        Item::Struct(_) => Err(fail(BuiltinError::UnexpectedShape {
            canonical,
            text,
            found: "a struct".to_string(),
        })),
    }
}

/// Parse `text` and return its only declaration, which must be named
/// `canonical`.
fn parse_single(canonical: &str, text: &str) -> Result<Item, BuiltinError> {
    let parse = parse_builtin(text);
    if !parse.ok() {
        return Err(fail(BuiltinError::Parse {
            canonical: canonical.to_string(),
            text: text.to_string(),
            errors: parse.errors().to_vec(),
        }));
    }

    let items: Vec<Item> = parse.tree().map(|file| file.items().collect()).unwrap_or_default();
    let shape_error = |found: String| {
        fail(BuiltinError::UnexpectedShape {
            canonical: canonical.to_string(),
            text: text.to_string(),
            found,
        })
    };

    match <[Item; 1]>::try_from(items) {
        Ok([item]) => {
            let name = item.name().and_then(|n| n.text());
            if name.as_deref() == Some(canonical) {
                Ok(item)
            } else {
                Err(shape_error(format!(
                    "a declaration named `{}`",
                    name.unwrap_or_default()
                )))
            }
        }
        Err(items) => Err(shape_error(format!("{} declarations", items.len()))),
    }
}

/// A failed dependency is reported as itself; it was logged when it failed.
fn resolve_failure(canonical: String, text: String, err: TypeError) -> BuiltinError {
    match err {
        TypeError::Dependency { name, error, .. } => {
            debug!(
                canonical = canonical.as_str(),
                dependency = name.as_str(),
                "built-in dependency failed"
            );
            *error
        }
        error => fail(BuiltinError::Resolve {
            canonical,
            text,
            error,
        }),
    }
}

fn fail(err: BuiltinError) -> BuiltinError {
    let (line, col) = err.line_col().unwrap_or((1, 1));
    error!(canonical = err.canonical(), line, col, %err, "built-in declaration is malformed");
    err
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rustc_hash::FxHashMap;

    use super::*;
    use crate::members::LookupError;
    use crate::ty::{Member, Usage};

    fn no_types() -> FxHashMap<String, Arc<Ty>> {
        FxHashMap::default()
    }

    #[test]
    fn struct_from_body() {
        let ty = synthesize_struct("Tx", "uint gasprice; address origin;", &no_types()).unwrap();
        assert_eq!(ty.name(), "@Tx");
        assert!(matches!(ty, Ty::Struct(_)));
        let names: Vec<_> = ty.members().iter().map(Member::name).collect();
        assert_eq!(names, vec!["gasprice", "origin"]);
    }

    #[test]
    fn contract_from_body() {
        let ty = synthesize_contract(
            "Array",
            "function push(uint value);",
            &no_types(),
        )
        .unwrap();
        let push = ty.member("push").unwrap();
        assert_eq!(push.usage(), Usage::Function);
        if let Ty::Contract(c) = &ty {
            assert_eq!(c.syntax().unwrap().functions().count(), 1);
        } else {
            panic!("expected a contract type");
        }
    }

    #[test]
    fn parse_failure_is_reported() {
        let err = synthesize_struct("Broken", "uint x", &no_types()).unwrap_err();
        match &err {
            BuiltinError::Parse { canonical, errors, text } => {
                assert_eq!(canonical, "@Broken");
                assert_eq!(errors.len(), 1);
                assert!(text.starts_with("struct @Broken {"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn body_that_closes_the_declaration_early() {
        let err = synthesize_contract("Sneaky", "} contract Other {", &no_types()).unwrap_err();
        assert!(matches!(
            err,
            BuiltinError::UnexpectedShape { ref found, .. } if found == "2 declarations"
        ));
    }

    #[test]
    fn declaration_with_another_name_is_rejected() {
        let err = parse_single("@Msg", "struct @Other { uint x; }").unwrap_err();
        assert!(matches!(
            err,
            BuiltinError::UnexpectedShape { ref canonical, ref found, .. }
                if canonical == "@Msg" && found == "a declaration named `@Other`"
        ));
    }

    #[test]
    fn failed_dependency_is_passed_through() {
        struct Failing;
        impl TypeResolver for Failing {
            fn resolve_named(&self, name: &str) -> Result<Option<Arc<Ty>>, LookupError> {
                Err(LookupError::Builtin(BuiltinError::UnexpectedShape {
                    canonical: name.to_string(),
                    text: String::new(),
                    found: "2 declarations".into(),
                }))
            }
        }

        let err = synthesize_contract("Array", "@Msg m;", &Failing).unwrap_err();
        assert_eq!(err.canonical(), "@Msg");
        assert_eq!(err.to_string(), "built-in `@Msg` declares 2 declarations");
    }

    #[test]
    fn unknown_type_in_body() {
        let err = synthesize_struct("Msg", "Nope n;", &no_types()).unwrap_err();
        assert!(matches!(err, BuiltinError::Resolve { .. }));
        assert_eq!(err.to_string(), "built-in `@Msg` failed to resolve: unknown type `Nope`");
    }
}
