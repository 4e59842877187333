//! The expression sub-grammar.
//!
//! ```text
//! Expression(e) ExpressionKind(kind) Plus(Plus)
//! Expression(e) BinaryOperation(operation)
//!     BinaryOperation(b) Expression(lhs_operand) <expression>
//!     BinaryOperation(b) Expression(rhs_operand) <expression>
//! ```
//!
//! Every production here is bounded: nested expressions share wrapper tags
//! with their parents, so a record stops the moment its fields are present.

use crate::base::{Tag, TagSubset};
use crate::model::{BinaryOp, Expression, ExpressionKind, FieldDefinition, UnaryOp};
use crate::parser::errors::{DecodeContext, ErrorCode};

use super::{DecodeResult, Decoder, IndexedBuffer};

/// An expression payload before it is joined with the expression's kind.
#[derive(Debug)]
enum Payload {
    Id(String),
    Int(i64),
    Real(f64),
    Bool(bool),
    Operand(Expression),
    Operation(Expression, Expression),
    Conditional(Expression, Expression, Expression),
    Projection(Expression, String),
    Literal(String, Vec<FieldDefinition>),
    Call(String, Vec<Expression>),
}

impl Payload {
    fn fits(&self, kind: ExpressionKind) -> bool {
        match self {
            Payload::Id(_) => kind == ExpressionKind::Id,
            Payload::Int(_) => kind == ExpressionKind::IntLiteral,
            Payload::Real(_) => kind == ExpressionKind::RealLiteral,
            Payload::Bool(_) => kind == ExpressionKind::BoolLiteral,
            Payload::Operand(_) => UnaryOp::from_tag(kind.tag()).is_some(),
            Payload::Operation(..) => BinaryOp::from_tag(kind.tag()).is_some(),
            Payload::Conditional(..) => kind == ExpressionKind::Conditional,
            Payload::Projection(..) => kind == ExpressionKind::RecordProjection,
            Payload::Literal(..) => kind == ExpressionKind::RecordLiteral,
            Payload::Call(..) => kind == ExpressionKind::Call,
        }
    }

    fn field(&self) -> Tag {
        match self {
            Payload::Id(_) => Tag::IdentifierField,
            Payload::Int(_) => Tag::IntLiteralField,
            Payload::Real(_) => Tag::RealLiteralField,
            Payload::Bool(_) => Tag::BoolLiteralField,
            Payload::Operand(_) => Tag::Operand,
            Payload::Operation(..) => Tag::Operation,
            Payload::Conditional(..) => Tag::Conditional,
            Payload::Projection(..) => Tag::Projection,
            Payload::Literal(..) => Tag::LiteralField,
            Payload::Call(..) => Tag::CallField,
        }
    }

    /// Join with the kind. Operators come from the kind; a payload that
    /// disagrees with it falls back to the first operator of its arity.
    fn build(self, kind: Option<ExpressionKind>) -> Expression {
        let op_tag = kind.map(ExpressionKind::tag);
        match self {
            Payload::Id(name) => Expression::Id(name),
            Payload::Int(v) => Expression::IntLiteral(v),
            Payload::Real(v) => Expression::RealLiteral(v),
            Payload::Bool(v) => Expression::BoolLiteral(v),
            Payload::Operand(operand) => {
                let op = op_tag.and_then(UnaryOp::from_tag).unwrap_or(UnaryOp::Not);
                Expression::unary(op, operand)
            }
            Payload::Operation(lhs, rhs) => {
                let op = op_tag.and_then(BinaryOp::from_tag).unwrap_or(BinaryOp::Equal);
                Expression::binary(op, lhs, rhs)
            }
            Payload::Conditional(condition, then_branch, else_branch) => Expression::Conditional {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            Payload::Projection(record, field) => Expression::RecordProjection {
                record: Box::new(record),
                field,
            },
            Payload::Literal(record_type, fields) => Expression::RecordLiteral { record_type, fields },
            Payload::Call(node, arguments) => Expression::Call { node, arguments },
        }
    }
}

impl Decoder<'_> {
    /// `Expression(f)` followed by the expression's entries.
    pub(super) fn expression_field(&mut self) -> DecodeResult<Expression> {
        self.cur.expect(Tag::Expression);
        self.expression()
    }

    pub(super) fn expression(&mut self) -> DecodeResult<Expression> {
        self.descend()?;
        self.enter(DecodeContext::Expression);
        let result = self.expression_entries();
        self.leave();
        self.ascend();
        result
    }

    fn expression_entries(&mut self) -> DecodeResult<Expression> {
        let mut kind = None;
        let mut payload: Option<Payload> = None;

        while self.at(Tag::Expression) && !(kind.is_some() && payload.is_some()) {
            let next = match self.entry() {
                Some(Tag::DataKind) => {
                    kind = self.enum_field::<ExpressionKind>(Tag::ExpressionKind);
                    continue;
                }
                Some(Tag::IdentifierField) => Payload::Id(self.identifier()),
                Some(Tag::IntLiteralField) => Payload::Int(self.int_field()),
                Some(Tag::RealLiteralField) => Payload::Real(self.real_field()),
                Some(Tag::BoolLiteralField) => Payload::Bool(self.bool_field()),
                Some(Tag::Operand) => Payload::Operand(self.expression_field()?),
                Some(Tag::Operation) => {
                    self.cur.expect(Tag::BinaryOperation);
                    let (lhs, rhs) = self.binary_operation()?;
                    Payload::Operation(lhs, rhs)
                }
                Some(Tag::Conditional) => {
                    self.cur.expect(Tag::IfThenElse);
                    let (c, t, e) = self.if_then_else()?;
                    Payload::Conditional(c, t, e)
                }
                Some(Tag::Projection) => {
                    self.cur.expect(Tag::RecordProjection);
                    let (record, field) = self.record_projection()?;
                    Payload::Projection(record, field)
                }
                Some(Tag::LiteralField) => {
                    self.cur.expect(Tag::RecordLiteral);
                    let (record_type, fields) = self.record_literal()?;
                    Payload::Literal(record_type, fields)
                }
                Some(Tag::CallField) => {
                    self.cur.expect(Tag::NodeCall);
                    let (node, arguments) = self.node_call()?;
                    Payload::Call(node, arguments)
                }
                _ => {
                    self.unknown_field(Tag::Expression);
                    continue;
                }
            };
            self.store_payload(&mut payload, kind, next);
        }

        if kind.is_none() {
            self.missing(Tag::DataKind);
        }
        Ok(match payload {
            Some(payload) => payload.build(kind),
            None => {
                self.missing(Tag::Expression);
                Expression::default()
            }
        })
    }

    fn store_payload(&mut self, slot: &mut Option<Payload>, kind: Option<ExpressionKind>, payload: Payload) {
        if slot.is_some() {
            self.cur.report(
                ErrorCode::E0302,
                format!("second expression payload '{}' ignored", payload.field().key()),
            );
            return;
        }
        if let Some(kind) = kind.filter(|kind| !payload.fits(*kind)) {
            self.cur.report(
                ErrorCode::E0303,
                format!(
                    "payload '{}' does not fit expression kind {}",
                    payload.field().key(),
                    kind.key()
                ),
            );
        }
        *slot = Some(payload);
    }

    fn binary_operation(&mut self) -> DecodeResult<(Expression, Expression)> {
        self.enter(DecodeContext::BinaryOperation);
        let mut lhs = None;
        let mut rhs = None;
        while self.at(Tag::BinaryOperation) && !(lhs.is_some() && rhs.is_some()) {
            match self.entry() {
                Some(Tag::LhsOperand) => lhs = Some(self.expression_field()?),
                Some(Tag::RhsOperand) => rhs = Some(self.expression_field()?),
                _ => self.unknown_field(Tag::BinaryOperation),
            }
        }
        let operands = (
            self.required(lhs, Tag::LhsOperand),
            self.required(rhs, Tag::RhsOperand),
        );
        self.leave();
        Ok(operands)
    }

    fn if_then_else(&mut self) -> DecodeResult<(Expression, Expression, Expression)> {
        self.enter(DecodeContext::IfThenElse);
        let mut condition = None;
        let mut then_branch = None;
        let mut else_branch = None;
        while self.at(Tag::IfThenElse)
            && !(condition.is_some() && then_branch.is_some() && else_branch.is_some())
        {
            match self.entry() {
                Some(Tag::Condition) => condition = Some(self.expression_field()?),
                Some(Tag::ThenBranch) => then_branch = Some(self.expression_field()?),
                Some(Tag::ElseBranch) => else_branch = Some(self.expression_field()?),
                _ => self.unknown_field(Tag::IfThenElse),
            }
        }
        let branches = (
            self.required(condition, Tag::Condition),
            self.required(then_branch, Tag::ThenBranch),
            self.required(else_branch, Tag::ElseBranch),
        );
        self.leave();
        Ok(branches)
    }

    fn record_projection(&mut self) -> DecodeResult<(Expression, String)> {
        self.enter(DecodeContext::RecordProjection);
        let mut record = None;
        let mut field = None;
        while self.at(Tag::RecordProjection) && !(record.is_some() && field.is_some()) {
            match self.entry() {
                Some(Tag::RecordReference) => record = Some(self.expression_field()?),
                Some(Tag::FieldId) => field = Some(self.identifier()),
                _ => self.unknown_field(Tag::RecordProjection),
            }
        }
        let projection = (
            self.required(record, Tag::RecordReference),
            self.required(field, Tag::FieldId),
        );
        self.leave();
        Ok(projection)
    }

    fn record_literal(&mut self) -> DecodeResult<(String, Vec<FieldDefinition>)> {
        self.enter(DecodeContext::RecordLiteral);
        let mut record_type = None;
        let mut fields = None;
        let mut buf = IndexedBuffer::new(Tag::FieldDefinitions);
        while self.at(Tag::RecordLiteral) && !(record_type.is_some() && fields.is_some()) {
            match self.entry() {
                Some(Tag::RecordTypeField) => record_type = Some(self.identifier()),
                Some(Tag::FieldDefinitions) => {
                    self.array_entry(&mut buf, |d| d.field_definition())?;
                    if let Some(done) = self.take_if_complete(&mut buf) {
                        fields = Some(done);
                    }
                }
                _ => self.unknown_field(Tag::RecordLiteral),
            }
        }
        if fields.is_none() && buf.len().is_some() {
            fields = Some(self.finish_array(buf));
        }
        let literal = (
            self.required(record_type, Tag::RecordTypeField),
            self.required(fields, Tag::FieldDefinitions),
        );
        self.leave();
        Ok(literal)
    }

    fn field_definition(&mut self) -> DecodeResult<FieldDefinition> {
        self.enter(DecodeContext::FieldDefinition);
        let mut field = None;
        let mut value = None;
        while self.at(Tag::FieldDefinition) && !(field.is_some() && value.is_some()) {
            match self.entry() {
                Some(Tag::FieldId) => field = Some(self.identifier()),
                Some(Tag::FieldValue) => value = Some(self.expression_field()?),
                _ => self.unknown_field(Tag::FieldDefinition),
            }
        }
        let definition = FieldDefinition {
            field: self.required(field, Tag::FieldId),
            value: self.required(value, Tag::FieldValue),
        };
        self.leave();
        Ok(definition)
    }

    fn node_call(&mut self) -> DecodeResult<(String, Vec<Expression>)> {
        self.enter(DecodeContext::NodeCall);
        let mut node = None;
        let mut arguments = None;
        let mut buf = IndexedBuffer::new(Tag::Arguments);
        while self.at(Tag::NodeCall) && !(node.is_some() && arguments.is_some()) {
            match self.entry() {
                Some(Tag::NodeName) => node = Some(self.identifier()),
                Some(Tag::Arguments) => {
                    self.array_entry(&mut buf, |d| d.expression())?;
                    if let Some(done) = self.take_if_complete(&mut buf) {
                        arguments = Some(done);
                    }
                }
                _ => self.unknown_field(Tag::NodeCall),
            }
        }
        if arguments.is_none() && buf.len().is_some() {
            arguments = Some(self.finish_array(buf));
        }
        let call = (
            self.required(node, Tag::NodeName),
            self.required(arguments, Tag::Arguments),
        );
        self.leave();
        Ok(call)
    }
}
