//! Type representation shared by built-in and user-declared types.
//!
//! Struct and contract types keep their declaration as a rowan `GreenNode`
//! (thread-safe, re-rooted on demand) alongside the members resolved from
//! it. Nominal types compare by canonical name; primitives compare
//! structurally.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rowan::GreenNode;
use sol_parser::ast::item::{ContractDef, StructDef};
use sol_parser::ast::AstNode;
use sol_parser::SyntaxNode;

// ── Primitives ─────────────────────────────────────────────────────────

/// Elementary scalar types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// `uintN`, N in 8..=256 step 8.
    Uint(u16),
    /// `intN`, N in 8..=256 step 8.
    Int(u16),
    Address,
    /// `bytesN`, N in 1..=32.
    FixedBytes(u8),
    /// Dynamically sized `bytes`.
    Bytes,
    String,
    Bool,
}

impl Primitive {
    pub const UINT256: Primitive = Primitive::Uint(256);

    /// Parse an elementary type name. `uint`/`int` are 256 bits wide,
    /// `byte` is `bytes1` and `trcToken` is an alias of `uint256`.
    pub fn from_elementary(name: &str) -> Option<Primitive> {
        match name {
            "uint" | "trcToken" => return Some(Primitive::UINT256),
            "int" => return Some(Primitive::Int(256)),
            "address" => return Some(Primitive::Address),
            "bool" => return Some(Primitive::Bool),
            "string" => return Some(Primitive::String),
            "bytes" => return Some(Primitive::Bytes),
            "byte" => return Some(Primitive::FixedBytes(1)),
            _ => {}
        }

        if let Some(bits) = name.strip_prefix("uint").and_then(int_width) {
            return Some(Primitive::Uint(bits));
        }
        if let Some(bits) = name.strip_prefix("int").and_then(int_width) {
            return Some(Primitive::Int(bits));
        }
        name.strip_prefix("bytes")
            .filter(|digits| !digits.starts_with('0'))
            .and_then(|digits| digits.parse::<u8>().ok())
            .filter(|n| (1..=32).contains(n))
            .map(Primitive::FixedBytes)
    }

    /// Implicit conversion from `self` to `target`.
    pub fn is_assignable_to(self, target: Primitive) -> bool {
        match (self, target) {
            (Primitive::Uint(a), Primitive::Uint(b)) => a <= b,
            (Primitive::Int(a), Primitive::Int(b)) => a <= b,
            // The target needs one extra bit for the sign.
            (Primitive::Uint(a), Primitive::Int(b)) => a < b,
            (Primitive::FixedBytes(a), Primitive::FixedBytes(b)) => a <= b,
            (a, b) => a == b,
        }
    }
}

fn int_width(digits: &str) -> Option<u16> {
    if digits.starts_with('0') {
        return None;
    }
    digits
        .parse::<u16>()
        .ok()
        .filter(|bits| (8..=256).contains(bits) && bits % 8 == 0)
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Uint(bits) => write!(f, "uint{bits}"),
            Primitive::Int(bits) => write!(f, "int{bits}"),
            Primitive::Address => write!(f, "address"),
            Primitive::FixedBytes(n) => write!(f, "bytes{n}"),
            Primitive::Bytes => write!(f, "bytes"),
            Primitive::String => write!(f, "string"),
            Primitive::Bool => write!(f, "bool"),
        }
    }
}

// ── Members ────────────────────────────────────────────────────────────

/// How a member is accessed: `block.number` vs `block.blockhash(n)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Usage {
    Variable,
    Function,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Private,
    Internal,
    External,
}

/// A struct field or contract state variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: Arc<Ty>,
    pub visibility: Visibility,
}

/// A named member with a signature.
///
/// Property-style members (`Usage::Variable`) have no parameters and carry
/// their value type as `return_type`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Callable {
    pub name: String,
    /// Parameter names are optional: `function revert(string)`.
    pub params: Vec<(Option<String>, Arc<Ty>)>,
    pub return_type: Option<Arc<Ty>>,
    pub visibility: Visibility,
    pub usage: Usage,
}

impl Callable {
    pub fn function(
        name: impl Into<String>,
        params: Vec<(Option<String>, Arc<Ty>)>,
        return_type: Option<Arc<Ty>>,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            return_type,
            visibility: Visibility::Public,
            usage: Usage::Function,
        }
    }

    pub fn variable(name: impl Into<String>, ty: Arc<Ty>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            return_type: Some(ty),
            visibility: Visibility::Public,
            usage: Usage::Variable,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Member {
    Field(Field),
    Callable(Callable),
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Field(field) => &field.name,
            Member::Callable(callable) => &callable.name,
        }
    }

    pub fn usage(&self) -> Usage {
        match self {
            Member::Field(_) => Usage::Variable,
            Member::Callable(callable) => callable.usage,
        }
    }

    pub fn visibility(&self) -> Visibility {
        match self {
            Member::Field(field) => field.visibility,
            Member::Callable(callable) => callable.visibility,
        }
    }

    /// The field type, or the callable's return type.
    pub fn ty(&self) -> Option<&Arc<Ty>> {
        match self {
            Member::Field(field) => Some(&field.ty),
            Member::Callable(callable) => callable.return_type.as_ref(),
        }
    }

    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Member::Callable(callable) => Some(callable),
            Member::Field(_) => None,
        }
    }
}

// ── Nominal types ──────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct StructTy {
    name: String,
    decl: GreenNode,
    members: Vec<Member>,
}

impl StructTy {
    pub(crate) fn new(name: String, decl: GreenNode, fields: Vec<Field>) -> Self {
        Self {
            name,
            decl,
            members: fields.into_iter().map(Member::Field).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declaration this type was resolved from.
    pub fn syntax(&self) -> Option<StructDef> {
        StructDef::cast(SyntaxNode::new_root(self.decl.clone()))
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.members.iter().filter_map(|m| match m {
            Member::Field(field) => Some(field),
            Member::Callable(_) => None,
        })
    }
}

#[derive(Clone, Debug)]
pub struct ContractTy {
    name: String,
    decl: GreenNode,
    members: Vec<Member>,
}

impl ContractTy {
    pub(crate) fn new(name: String, decl: GreenNode, members: Vec<Member>) -> Self {
        Self { name, decl, members }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn syntax(&self) -> Option<ContractDef> {
        ContractDef::cast(SyntaxNode::new_root(self.decl.clone()))
    }
}

/// A namespace built from an explicit member list, with no declaration.
#[derive(Clone, Debug)]
pub struct BuiltinTy {
    name: String,
    members: Vec<Member>,
}

impl BuiltinTy {
    pub fn new(name: impl Into<String>, callables: Vec<Callable>) -> Self {
        Self {
            name: name.into(),
            members: callables.into_iter().map(Member::Callable).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

// ── Ty ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub enum Ty {
    Struct(StructTy),
    Contract(ContractTy),
    Builtin(BuiltinTy),
    Primitive(Primitive),
}

impl Ty {
    pub fn uint256() -> Arc<Ty> {
        Arc::new(Ty::Primitive(Primitive::UINT256))
    }

    pub fn primitive(p: Primitive) -> Arc<Ty> {
        Arc::new(Ty::Primitive(p))
    }

    /// Canonical name; primitives render their elementary name.
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Ty::Struct(s) => Cow::Borrowed(s.name()),
            Ty::Contract(c) => Cow::Borrowed(c.name()),
            Ty::Builtin(b) => Cow::Borrowed(b.name()),
            Ty::Primitive(p) => Cow::Owned(p.to_string()),
        }
    }

    /// Members in declaration order. Primitives have none.
    pub fn members(&self) -> &[Member] {
        match self {
            Ty::Struct(s) => &s.members,
            Ty::Contract(c) => &c.members,
            Ty::Builtin(b) => &b.members,
            Ty::Primitive(_) => &[],
        }
    }

    /// First member called `name`.
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members().iter().find(|m| m.name() == name)
    }

    /// Whether a value of this type may be assigned to (or passed as) `target`.
    pub fn is_assignable_to(&self, target: &Ty) -> bool {
        match (self, target) {
            (Ty::Primitive(a), Ty::Primitive(b)) => a.is_assignable_to(*b),
            _ => self == target,
        }
    }
}

impl PartialEq for Ty {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Ty::Struct(a), Ty::Struct(b)) => a.name == b.name,
            (Ty::Contract(a), Ty::Contract(b)) => a.name == b.name,
            (Ty::Builtin(a), Ty::Builtin(b)) => a.name == b.name,
            (Ty::Primitive(a), Ty::Primitive(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Ty {}

impl Hash for Ty {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        self.name().hash(state);
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elementary_names() {
        assert_eq!(Primitive::from_elementary("uint"), Some(Primitive::Uint(256)));
        assert_eq!(Primitive::from_elementary("uint8"), Some(Primitive::Uint(8)));
        assert_eq!(Primitive::from_elementary("int128"), Some(Primitive::Int(128)));
        assert_eq!(Primitive::from_elementary("bytes32"), Some(Primitive::FixedBytes(32)));
        assert_eq!(Primitive::from_elementary("bytes"), Some(Primitive::Bytes));
        assert_eq!(Primitive::from_elementary("trcToken"), Some(Primitive::Uint(256)));
        assert_eq!(Primitive::from_elementary("uint7"), None);
        assert_eq!(Primitive::from_elementary("uint264"), None);
        assert_eq!(Primitive::from_elementary("uint08"), None);
        assert_eq!(Primitive::from_elementary("bytes33"), None);
        assert_eq!(Primitive::from_elementary("bytes0"), None);
        assert_eq!(Primitive::from_elementary("Msg"), None);
    }

    #[test]
    fn primitive_names_round_trip() {
        for name in ["uint256", "int8", "address", "bytes20", "bytes", "string", "bool"] {
            let p = Primitive::from_elementary(name).unwrap();
            assert_eq!(p.to_string(), name);
        }
    }

    #[test]
    fn integer_widening() {
        use Primitive::*;
        assert!(Uint(8).is_assignable_to(Uint(256)));
        assert!(!Uint(256).is_assignable_to(Uint(8)));
        assert!(Int(16).is_assignable_to(Int(16)));
        assert!(Uint(8).is_assignable_to(Int(16)));
        assert!(!Uint(16).is_assignable_to(Int(16)));
        assert!(!Int(8).is_assignable_to(Uint(256)));
        assert!(FixedBytes(4).is_assignable_to(FixedBytes(32)));
        assert!(!FixedBytes(32).is_assignable_to(FixedBytes(4)));
        assert!(!Address.is_assignable_to(Uint(256)));
        assert!(!Bytes.is_assignable_to(FixedBytes(32)));
        assert!(Bool.is_assignable_to(Bool));
    }

    #[test]
    fn builtin_namespace_members() {
        let ty = Ty::Builtin(BuiltinTy::new(
            "@Ns",
            vec![
                Callable::variable("x", Ty::uint256()),
                Callable::function("f", vec![], None),
                Callable::function("f", vec![(None, Ty::uint256())], None),
            ],
        ));
        assert_eq!(ty.name(), "@Ns");
        assert_eq!(ty.member("x").map(Member::usage), Some(Usage::Variable));
        assert_eq!(ty.members().iter().filter(|m| m.name() == "f").count(), 2);
        assert!(ty.member("g").is_none());
        assert!(ty.member("f").unwrap().ty().is_none());
    }

    #[test]
    fn nominal_types_compare_by_name() {
        let a = Ty::Builtin(BuiltinTy::new("@A", vec![]));
        let a2 = Ty::Builtin(BuiltinTy::new("@A", vec![Callable::variable("x", Ty::uint256())]));
        let b = Ty::Builtin(BuiltinTy::new("@B", vec![]));
        assert_eq!(a, a2);
        assert_ne!(a, b);
        assert!(a.is_assignable_to(&a2));
        assert!(!a.is_assignable_to(&b));
        assert!(!a.is_assignable_to(&Ty::Primitive(Primitive::Address)));
        assert_eq!(b.to_string(), "@B");
    }
}
