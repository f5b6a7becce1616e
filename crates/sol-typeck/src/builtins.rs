//! The built-in environment: canonical names, declaration templates and the
//! `@Block` member table.
//!
//! Struct and contract built-ins are written in ordinary declaration syntax
//! and synthesized through the parser (see [`crate::synth`]). `@Block` is
//! simple enough to be listed directly.

use std::borrow::Cow;
use std::sync::Arc;

use crate::ty::{BuiltinTy, Callable, Primitive, Ty};

pub const MSG: &str = "@Msg";
pub const TX: &str = "@Tx";
pub const BLOCK: &str = "@Block";
pub const ADDRESS: &str = "@Address";
pub const ARRAY: &str = "@Array";
pub const GLOBAL: &str = "@Global";

/// One of the fixed built-in types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    Msg,
    Tx,
    Block,
    Address,
    Array,
    Global,
}

impl BuiltinKind {
    /// Construction order: every kind only depends on kinds before it.
    pub const ALL: [BuiltinKind; 6] = [
        BuiltinKind::Msg,
        BuiltinKind::Tx,
        BuiltinKind::Block,
        BuiltinKind::Address,
        BuiltinKind::Array,
        BuiltinKind::Global,
    ];

    pub fn canonical_name(self) -> &'static str {
        match self {
            BuiltinKind::Msg => MSG,
            BuiltinKind::Tx => TX,
            BuiltinKind::Block => BLOCK,
            BuiltinKind::Address => ADDRESS,
            BuiltinKind::Array => ARRAY,
            BuiltinKind::Global => GLOBAL,
        }
    }

    pub fn from_canonical(name: &str) -> Option<BuiltinKind> {
        BuiltinKind::ALL
            .into_iter()
            .find(|kind| kind.canonical_name() == name)
    }

    /// Whether `self` is constructed before `other`.
    pub fn precedes(self, other: BuiltinKind) -> bool {
        (self as usize) < (other as usize)
    }

    /// The name without the reserved marker, as used in templates.
    pub fn plain_name(self) -> &'static str {
        sol_common::names::plain_name(self.canonical_name())
    }

    /// The implicit identifier that denotes this type in user code, if any.
    pub fn implicit_identifier(self) -> Option<&'static str> {
        match self {
            BuiltinKind::Msg => Some("msg"),
            BuiltinKind::Tx => Some("tx"),
            BuiltinKind::Block => Some("block"),
            _ => None,
        }
    }
}

pub const MSG_FIELDS: &str = "\
    bytes data;
    uint gas;
    address sender;
    uint value;
    uint tokenvalue;
    uint tokenid;";

pub const TX_FIELDS: &str = "\
    uint gasprice;
    address origin;";

pub const ADDRESS_MEMBERS: &str = "\
    uint256 public balance;
    function transfer(uint value);
    function send(uint value) returns (bool);
    function transferToken(uint256 tokenValue, trcToken tokenId);
    function tokenBalance(trcToken tokenId) returns (uint256);";

pub const ARRAY_MEMBERS: &str = "\
    uint256 public length;
    function push(uint value);";

/// Intrinsic functions of the global namespace. The state variables for
/// `block`, `msg`, `tx` and `now` are prepended when the namespace is
/// synthesized, using the rendered names of the already built types.
pub const GLOBAL_MEMBERS: &str = "\
    function assert(bool condition) private {}
    function require(bool condition) private {}
    function require(bool condition, string message) private {}
    function revert() private {}
    function revert(string) {}
    function keccak256() returns (bytes32) private {}
    function sha3() returns (bytes32) private {}
    function sha256() returns (bytes32) private {}
    function ripemd160() returns (bytes20) private {}
    function ecrecover(bytes32 hash, uint8 v, bytes32 r, bytes32 s) returns (address) private {}
    function addmod(uint x, uint y, uint k) returns (uint) private {}
    function mulmod(uint x, uint y, uint k) returns (uint) private {}
    function selfdestruct(address recipient) private {};
    function gasleft() returns (uint256) private {}
    function blockhash(uint256 blockNumber) returns (bytes32) private {}";

/// Declaration bodies for the synthesized built-ins.
///
/// The default set is the TRON-flavoured environment above.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Templates {
    pub msg_fields: Cow<'static, str>,
    pub tx_fields: Cow<'static, str>,
    pub address_members: Cow<'static, str>,
    pub array_members: Cow<'static, str>,
    pub global_members: Cow<'static, str>,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            msg_fields: Cow::Borrowed(MSG_FIELDS),
            tx_fields: Cow::Borrowed(TX_FIELDS),
            address_members: Cow::Borrowed(ADDRESS_MEMBERS),
            array_members: Cow::Borrowed(ARRAY_MEMBERS),
            global_members: Cow::Borrowed(GLOBAL_MEMBERS),
        }
    }
}

/// Build `@Block` from its member table.
pub fn block_type() -> Ty {
    let uint256 = Ty::uint256();
    Ty::Builtin(BuiltinTy::new(
        BLOCK,
        vec![
            Callable::variable("coinbase", Ty::primitive(Primitive::Address)),
            Callable::variable("number", Arc::clone(&uint256)),
            Callable::variable("timestamp", Arc::clone(&uint256)),
            Callable::function(
                "blockhash",
                vec![(Some("blockNumber".to_string()), uint256)],
                Some(Ty::primitive(Primitive::FixedBytes(32))),
            ),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ty::Usage;
    use sol_common::names::internalise;

    #[test]
    fn canonical_names_are_internalised_plain_names() {
        for kind in BuiltinKind::ALL {
            assert_eq!(internalise(kind.plain_name()), kind.canonical_name());
        }
    }

    #[test]
    fn construction_order_follows_declaration_order() {
        for pair in BuiltinKind::ALL.windows(2) {
            assert!(pair[0].precedes(pair[1]));
            assert!(!pair[1].precedes(pair[0]));
        }
        assert!(!BuiltinKind::Msg.precedes(BuiltinKind::Msg));
        assert_eq!(BuiltinKind::from_canonical("@Array"), Some(BuiltinKind::Array));
        assert_eq!(BuiltinKind::from_canonical("Array"), None);
    }

    #[test]
    fn block_member_table() {
        let block = block_type();
        let shape: Vec<_> = block
            .members()
            .iter()
            .map(|m| (m.name(), m.usage(), m.ty().map(|t| t.to_string())))
            .collect();
        assert_eq!(
            shape,
            vec![
                ("coinbase", Usage::Variable, Some("address".to_string())),
                ("number", Usage::Variable, Some("uint256".to_string())),
                ("timestamp", Usage::Variable, Some("uint256".to_string())),
                ("blockhash", Usage::Function, Some("bytes32".to_string())),
            ]
        );
        let blockhash = block.member("blockhash").and_then(|m| m.as_callable()).unwrap();
        assert_eq!(blockhash.params.len(), 1);
        assert_eq!(blockhash.params[0].0.as_deref(), Some("blockNumber"));
        assert_eq!(blockhash.params[0].1.to_string(), "uint256");
    }
}
