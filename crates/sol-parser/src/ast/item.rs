//! Typed AST nodes for declarations.

use crate::ast::{ast_node, child_node, child_nodes, child_token, significant_text, AstNode};
use crate::cst::{SyntaxNode, SyntaxToken};
use crate::syntax_kind::SyntaxKind;

// ── Source File ──────────────────────────────────────────────────────────

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.syntax.children().filter_map(Item::cast)
    }

    pub fn struct_defs(&self) -> impl Iterator<Item = StructDef> + '_ {
        child_nodes(&self.syntax)
    }

    pub fn contract_defs(&self) -> impl Iterator<Item = ContractDef> + '_ {
        child_nodes(&self.syntax)
    }
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Item {
    Struct(StructDef),
    Contract(ContractDef),
}

impl Item {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::STRUCT_DEF => Some(Item::Struct(StructDef { syntax: node })),
            SyntaxKind::CONTRACT_DEF => Some(Item::Contract(ContractDef { syntax: node })),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<Name> {
        match self {
            Item::Struct(def) => def.name(),
            Item::Contract(def) => def.name(),
        }
    }

    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            Item::Struct(def) => def.syntax(),
            Item::Contract(def) => def.syntax(),
        }
    }
}

// ── Struct ───────────────────────────────────────────────────────────────

ast_node!(StructDef, STRUCT_DEF);

impl StructDef {
    pub fn name(&self) -> Option<Name> {
        child_node(&self.syntax)
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = StructField> + '_ {
        child_nodes(&self.syntax)
    }
}

ast_node!(StructField, STRUCT_FIELD);

impl StructField {
    pub fn type_ref(&self) -> Option<TypeRef> {
        child_node(&self.syntax)
    }

    pub fn name(&self) -> Option<Name> {
        child_node(&self.syntax)
    }
}

// ── Contract ─────────────────────────────────────────────────────────────

ast_node!(ContractDef, CONTRACT_DEF);

impl ContractDef {
    pub fn name(&self) -> Option<Name> {
        child_node(&self.syntax)
    }

    /// State variables and functions in declaration order.
    pub fn items(&self) -> impl Iterator<Item = ContractItem> + '_ {
        self.syntax.children().filter_map(ContractItem::cast)
    }

    pub fn state_vars(&self) -> impl Iterator<Item = StateVarDecl> + '_ {
        child_nodes(&self.syntax)
    }

    pub fn functions(&self) -> impl Iterator<Item = FnDef> + '_ {
        child_nodes(&self.syntax)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContractItem {
    StateVar(StateVarDecl),
    Function(FnDef),
}

impl ContractItem {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::STATE_VAR_DECL => Some(ContractItem::StateVar(StateVarDecl { syntax: node })),
            SyntaxKind::FN_DEF => Some(ContractItem::Function(FnDef { syntax: node })),
            _ => None,
        }
    }
}

ast_node!(StateVarDecl, STATE_VAR_DECL);

impl StateVarDecl {
    pub fn type_ref(&self) -> Option<TypeRef> {
        child_node(&self.syntax)
    }

    pub fn name(&self) -> Option<Name> {
        child_node(&self.syntax)
    }

    pub fn modifiers(&self) -> impl Iterator<Item = Modifier> + '_ {
        child_nodes(&self.syntax)
    }

    /// The last visibility keyword, if any.
    pub fn visibility(&self) -> Option<SyntaxKind> {
        last_visibility(self.modifiers())
    }

    pub fn initializer(&self) -> Option<Initializer> {
        child_node(&self.syntax)
    }
}

ast_node!(Initializer, INITIALIZER);

impl Initializer {
    pub fn text(&self) -> String {
        significant_text(&self.syntax)
    }
}

// ── Functions ────────────────────────────────────────────────────────────

ast_node!(FnDef, FN_DEF);

impl FnDef {
    pub fn name(&self) -> Option<Name> {
        child_node(&self.syntax)
    }

    pub fn param_list(&self) -> Option<ParamList> {
        child_node(&self.syntax)
    }

    pub fn returns_clause(&self) -> Option<ReturnsClause> {
        child_node(&self.syntax)
    }

    /// Modifiers from both sides of the `returns` clause.
    pub fn modifiers(&self) -> impl Iterator<Item = Modifier> + '_ {
        child_nodes(&self.syntax)
    }

    pub fn visibility(&self) -> Option<SyntaxKind> {
        last_visibility(self.modifiers())
    }

    /// `None` for a declaration terminated by `;`.
    pub fn body(&self) -> Option<Block> {
        child_node(&self.syntax)
    }
}

ast_node!(ParamList, PARAM_LIST);

impl ParamList {
    pub fn params(&self) -> impl Iterator<Item = Param> + '_ {
        child_nodes(&self.syntax)
    }
}

ast_node!(Param, PARAM);

impl Param {
    pub fn type_ref(&self) -> Option<TypeRef> {
        child_node(&self.syntax)
    }

    /// Parameters may be unnamed, e.g. `(uint256)`.
    pub fn name(&self) -> Option<Name> {
        child_node(&self.syntax)
    }

    pub fn data_location(&self) -> Option<SyntaxToken> {
        self.syntax
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|tok| tok.kind().is_data_location())
    }
}

ast_node!(ReturnsClause, RETURNS_CLAUSE);

impl ReturnsClause {
    pub fn param_list(&self) -> Option<ParamList> {
        child_node(&self.syntax)
    }
}

ast_node!(Block, BLOCK);

// ── Leaves ───────────────────────────────────────────────────────────────

ast_node!(TypeRef, TYPE_REF);

impl TypeRef {
    /// The type name with trivia removed, e.g. `Lib.Point`.
    pub fn text(&self) -> String {
        significant_text(&self.syntax)
    }
}

ast_node!(Modifier, MODIFIER);

impl Modifier {
    pub fn keyword(&self) -> Option<SyntaxToken> {
        self.syntax
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|tok| tok.kind().is_modifier())
    }

    pub fn kind(&self) -> Option<SyntaxKind> {
        self.keyword().map(|tok| tok.kind())
    }
}

ast_node!(Name, NAME);

impl Name {
    pub fn text(&self) -> Option<String> {
        child_token(&self.syntax, SyntaxKind::IDENT).map(|tok| tok.text().to_string())
    }
}

fn last_visibility(modifiers: impl Iterator<Item = Modifier>) -> Option<SyntaxKind> {
    modifiers
        .filter_map(|m| m.kind())
        .filter(|kind| kind.is_visibility())
        .last()
}
