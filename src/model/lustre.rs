//! Dataflow (Lustre-style) programs: expressions, nodes and contracts.

use crate::base::tag_subset;

use super::data::{DataType, TypeDeclaration};

// ============================================================================
// EXPRESSIONS
// ============================================================================

tag_subset! {
    /// Discriminator of [`Expression`]; one key per expression form.
    pub enum ExpressionKind {
        Id => Id,
        IntLiteral => IntLiteral,
        RealLiteral => RealLiteral,
        BoolLiteral => BoolLiteral,
        Not => Not,
        Pre => Pre,
        Negative => Negative,
        ToReal => ToReal,
        ToInt => ToInt,
        Event => Event,
        Equal => Equal,
        NotEqual => NotEqual,
        And => And,
        Or => Or,
        Xor => Xor,
        Implies => Implies,
        Plus => Plus,
        Minus => Minus,
        Times => Times,
        Div => Div,
        IntDiv => IntDiv,
        Mod => Mod,
        LessThan => LessThan,
        LessThanOrEqualTo => LessThanOrEqualTo,
        GreaterThan => GreaterThan,
        GreaterThanOrEqualTo => GreaterThanOrEqualTo,
        Arrow => Arrow,
        Conditional => ConditionalExpr,
        RecordProjection => RecordProjection,
        RecordLiteral => RecordLiteral,
        Call => Call,
    }
}

tag_subset! {
    pub enum UnaryOp {
        Not => Not,
        Pre => Pre,
        Negative => Negative,
        ToReal => ToReal,
        ToInt => ToInt,
        Event => Event,
    }
}

tag_subset! {
    pub enum BinaryOp {
        Equal => Equal,
        NotEqual => NotEqual,
        And => And,
        Or => Or,
        Xor => Xor,
        Implies => Implies,
        Plus => Plus,
        Minus => Minus,
        Times => Times,
        Div => Div,
        IntDiv => IntDiv,
        Mod => Mod,
        LessThan => LessThan,
        LessThanOrEqualTo => LessThanOrEqualTo,
        GreaterThan => GreaterThan,
        GreaterThanOrEqualTo => GreaterThanOrEqualTo,
        Arrow => Arrow,
    }
}

/// A dataflow expression.
///
/// Operator precedence is already resolved by the producer, so the tree is
/// stored exactly as emitted.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Id(String),
    IntLiteral(i64),
    RealLiteral(f64),
    BoolLiteral(bool),
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    Conditional {
        condition: Box<Expression>,
        then_branch: Box<Expression>,
        else_branch: Box<Expression>,
    },
    RecordProjection {
        record: Box<Expression>,
        field: String,
    },
    RecordLiteral {
        record_type: String,
        fields: Vec<FieldDefinition>,
    },
    Call {
        node: String,
        arguments: Vec<Expression>,
    },
}

impl Expression {
    pub fn kind(&self) -> ExpressionKind {
        match self {
            Expression::Id(_) => ExpressionKind::Id,
            Expression::IntLiteral(_) => ExpressionKind::IntLiteral,
            Expression::RealLiteral(_) => ExpressionKind::RealLiteral,
            Expression::BoolLiteral(_) => ExpressionKind::BoolLiteral,
            Expression::Unary { op, .. } => op.kind(),
            Expression::Binary { op, .. } => op.kind(),
            Expression::Conditional { .. } => ExpressionKind::Conditional,
            Expression::RecordProjection { .. } => ExpressionKind::RecordProjection,
            Expression::RecordLiteral { .. } => ExpressionKind::RecordLiteral,
            Expression::Call { .. } => ExpressionKind::Call,
        }
    }

    pub fn id(name: impl Into<String>) -> Self {
        Expression::Id(name.into())
    }

    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, lhs: Expression, rhs: Expression) -> Self {
        Expression::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

impl Default for Expression {
    fn default() -> Self {
        Expression::BoolLiteral(true)
    }
}

impl UnaryOp {
    pub fn kind(self) -> ExpressionKind {
        match self {
            UnaryOp::Not => ExpressionKind::Not,
            UnaryOp::Pre => ExpressionKind::Pre,
            UnaryOp::Negative => ExpressionKind::Negative,
            UnaryOp::ToReal => ExpressionKind::ToReal,
            UnaryOp::ToInt => ExpressionKind::ToInt,
            UnaryOp::Event => ExpressionKind::Event,
        }
    }
}

impl BinaryOp {
    pub fn kind(self) -> ExpressionKind {
        match self {
            BinaryOp::Equal => ExpressionKind::Equal,
            BinaryOp::NotEqual => ExpressionKind::NotEqual,
            BinaryOp::And => ExpressionKind::And,
            BinaryOp::Or => ExpressionKind::Or,
            BinaryOp::Xor => ExpressionKind::Xor,
            BinaryOp::Implies => ExpressionKind::Implies,
            BinaryOp::Plus => ExpressionKind::Plus,
            BinaryOp::Minus => ExpressionKind::Minus,
            BinaryOp::Times => ExpressionKind::Times,
            BinaryOp::Div => ExpressionKind::Div,
            BinaryOp::IntDiv => ExpressionKind::IntDiv,
            BinaryOp::Mod => ExpressionKind::Mod,
            BinaryOp::LessThan => ExpressionKind::LessThan,
            BinaryOp::LessThanOrEqualTo => ExpressionKind::LessThanOrEqualTo,
            BinaryOp::GreaterThan => ExpressionKind::GreaterThan,
            BinaryOp::GreaterThanOrEqualTo => ExpressionKind::GreaterThanOrEqualTo,
            BinaryOp::Arrow => ExpressionKind::Arrow,
        }
    }
}

/// One `field = value` pair of a record literal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldDefinition {
    pub field: String,
    pub value: Expression,
}

// ============================================================================
// DECLARATIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConstantDeclaration {
    pub name: String,
    pub dtype: DataType,
    pub definition: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct VariableDeclaration {
    pub name: String,
    pub dtype: DataType,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeParameter {
    pub name: String,
    pub dtype: DataType,
    pub is_constant: bool,
}

// ============================================================================
// NODES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeEquation {
    pub lhs: Vec<String>,
    pub rhs: Expression,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeProperty {
    pub name: Option<String>,
    pub expression: Expression,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeBody {
    pub constant_declarations: Vec<ConstantDeclaration>,
    pub variable_declarations: Vec<VariableDeclaration>,
    pub assertions: Vec<Expression>,
    pub equations: Vec<NodeEquation>,
    pub properties: Vec<NodeProperty>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub name: String,
    pub is_function: bool,
    pub is_main: bool,
    pub inputs: Vec<NodeParameter>,
    pub outputs: Vec<NodeParameter>,
    pub contract: Option<ContractSpec>,
    pub body: Option<NodeBody>,
}

// ============================================================================
// CONTRACTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SymbolDefinition {
    pub name: String,
    pub is_constant: bool,
    pub dtype: DataType,
    pub definition: Expression,
}

/// An assumption, guarantee, requirement or ensured property.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContractItem {
    pub name: Option<String>,
    pub expression: Expression,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContractMode {
    pub name: String,
    pub requires: Vec<ContractItem>,
    pub ensures: Vec<ContractItem>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContractImport {
    pub contract: String,
    pub input_arguments: Vec<Expression>,
    pub output_arguments: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContractSpec {
    pub constants: Vec<SymbolDefinition>,
    pub variables: Vec<SymbolDefinition>,
    pub assumes: Vec<ContractItem>,
    pub guarantees: Vec<ContractItem>,
    pub modes: Vec<ContractMode>,
    pub imports: Vec<ContractImport>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Contract {
    pub name: String,
    pub inputs: Vec<NodeParameter>,
    pub outputs: Vec<NodeParameter>,
    pub specification: ContractSpec,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LustreProgram {
    pub type_declarations: Vec<TypeDeclaration>,
    pub constant_declarations: Vec<ConstantDeclaration>,
    pub contract_declarations: Vec<Contract>,
    pub node_declarations: Vec<Node>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::TagSubset;

    #[test]
    fn test_every_operator_has_its_own_kind() {
        for &op in UnaryOp::ALL {
            assert_eq!(op.kind().tag(), op.tag());
        }
        for &op in BinaryOp::ALL {
            assert_eq!(op.kind().tag(), op.tag());
        }
        assert_eq!(ExpressionKind::ALL.len(), 31);
    }

    #[test]
    fn test_conditional_kind_key() {
        assert_eq!(ExpressionKind::Conditional.key(), "ConditionalExpr");
    }
}
