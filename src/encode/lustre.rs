//! Expressions and dataflow programs.

use crate::base::Tag;
use crate::model::{
    ConstantDeclaration, Contract, ContractImport, ContractItem, ContractMode, ContractSpec,
    Expression, FieldDefinition, LustreProgram, Node, NodeBody, NodeEquation, NodeParameter,
    NodeProperty, SymbolDefinition, VariableDeclaration,
};

use super::Encoder;

impl Encoder {
    pub(super) fn expression_field(&mut self, wrapper: Tag, field: Tag, expr: &Expression) {
        self.entry(wrapper, Tag::Expression, field);
        self.expression(expr);
    }

    pub(super) fn expression(&mut self, expr: &Expression) {
        let w = Tag::Expression;
        self.kind_entry(w, Tag::ExpressionKind, expr.kind());
        match expr {
            Expression::Id(name) => self.identifier_entry(w, Tag::IdentifierField, name),
            Expression::IntLiteral(v) => self.int_entry(w, Tag::IntLiteralField, *v),
            Expression::RealLiteral(v) => self.real_entry(w, Tag::RealLiteralField, *v),
            Expression::BoolLiteral(v) => self.bool_entry(w, Tag::BoolLiteralField, *v),
            Expression::Unary { operand, .. } => self.expression_field(w, Tag::Operand, operand),
            Expression::Binary { lhs, rhs, .. } => {
                self.entry(w, Tag::BinaryOperation, Tag::Operation);
                self.expression_field(Tag::BinaryOperation, Tag::LhsOperand, lhs);
                self.expression_field(Tag::BinaryOperation, Tag::RhsOperand, rhs);
            }
            Expression::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                let ite = Tag::IfThenElse;
                self.entry(w, ite, Tag::Conditional);
                self.expression_field(ite, Tag::Condition, condition);
                self.expression_field(ite, Tag::ThenBranch, then_branch);
                self.expression_field(ite, Tag::ElseBranch, else_branch);
            }
            Expression::RecordProjection { record, field } => {
                let rp = Tag::RecordProjection;
                self.entry(w, rp, Tag::Projection);
                self.expression_field(rp, Tag::RecordReference, record);
                self.identifier_entry(rp, Tag::FieldId, field);
            }
            Expression::RecordLiteral { record_type, fields } => {
                let rl = Tag::RecordLiteral;
                self.entry(w, rl, Tag::LiteralField);
                self.identifier_entry(rl, Tag::RecordTypeField, record_type);
                self.array(rl, Tag::FieldDefinitions, fields, Self::field_definition);
            }
            Expression::Call { node, arguments } => {
                let nc = Tag::NodeCall;
                self.entry(w, nc, Tag::CallField);
                self.identifier_entry(nc, Tag::NodeName, node);
                self.array(nc, Tag::Arguments, arguments, Self::expression);
            }
        }
    }

    fn field_definition(&mut self, definition: &FieldDefinition) {
        let w = Tag::FieldDefinition;
        self.identifier_entry(w, Tag::FieldId, &definition.field);
        self.expression_field(w, Tag::FieldValue, &definition.value);
    }

    // =========================================================================
    // Programs and declarations
    // =========================================================================

    pub(super) fn lustre_program(&mut self, program: &LustreProgram) {
        let w = Tag::LustreProgram;
        self.array(w, Tag::TypeDeclarations, &program.type_declarations, Self::type_declaration);
        self.array(
            w,
            Tag::ConstantDeclarations,
            &program.constant_declarations,
            Self::constant_declaration,
        );
        self.array(w, Tag::ContractDeclarations, &program.contract_declarations, Self::contract);
        self.array(w, Tag::NodeDeclarations, &program.node_declarations, Self::node);
    }

    fn constant_declaration(&mut self, constant: &ConstantDeclaration) {
        let w = Tag::ConstantDeclaration;
        self.string_entry(w, Tag::Name, &constant.name);
        self.data_type_field(w, Tag::Dtype, &constant.dtype);
        self.option_entry(w, Tag::Definition, constant.definition.as_ref(), Self::expression);
    }

    fn variable_declaration(&mut self, variable: &VariableDeclaration) {
        let w = Tag::VariableDeclaration;
        self.string_entry(w, Tag::Name, &variable.name);
        self.data_type_field(w, Tag::Dtype, &variable.dtype);
    }

    fn parameters(&mut self, wrapper: Tag, field: Tag, element: Tag, parameters: &[NodeParameter]) {
        self.array(wrapper, field, parameters, |e, p| {
            e.string_entry(element, Tag::Name, &p.name);
            e.data_type_field(element, Tag::Dtype, &p.dtype);
            e.bool_entry(element, Tag::IsConstant, p.is_constant);
        });
    }

    fn node(&mut self, node: &Node) {
        let w = Tag::Node;
        self.string_entry(w, Tag::Name, &node.name);
        self.bool_entry(w, Tag::IsFunction, node.is_function);
        self.bool_entry(w, Tag::IsMain, node.is_main);
        self.parameters(w, Tag::InputParameters, Tag::InputParameter, &node.inputs);
        self.parameters(w, Tag::OutputParameters, Tag::OutputParameter, &node.outputs);
        self.option_entry(w, Tag::ContractField, node.contract.as_ref(), Self::contract_spec);
        self.option_entry(w, Tag::Body, node.body.as_ref(), Self::node_body);
    }

    pub(super) fn node_body(&mut self, body: &NodeBody) {
        let w = Tag::NodeBody;
        self.array(
            w,
            Tag::ConstantDeclarations,
            &body.constant_declarations,
            Self::constant_declaration,
        );
        self.array(
            w,
            Tag::VariableDeclarations,
            &body.variable_declarations,
            Self::variable_declaration,
        );
        self.array(w, Tag::Assertions, &body.assertions, Self::expression);
        self.array(w, Tag::Equations, &body.equations, Self::node_equation);
        self.array(w, Tag::Properties, &body.properties, Self::node_property);
    }

    fn node_equation(&mut self, equation: &NodeEquation) {
        let w = Tag::NodeEquation;
        self.array(w, Tag::Lhs, &equation.lhs, |e, name| e.string(name));
        self.expression_field(w, Tag::Rhs, &equation.rhs);
    }

    fn node_property(&mut self, property: &NodeProperty) {
        let w = Tag::NodeProperty;
        self.option_string(w, Tag::Name, property.name.as_ref());
        self.expression_field(w, Tag::ExpressionField, &property.expression);
    }

    // =========================================================================
    // Contracts
    // =========================================================================

    fn contract(&mut self, contract: &Contract) {
        let w = Tag::Contract;
        self.string_entry(w, Tag::Name, &contract.name);
        self.parameters(w, Tag::InputParameters, Tag::InputParameter, &contract.inputs);
        self.parameters(w, Tag::OutputParameters, Tag::OutputParameter, &contract.outputs);
        self.entry(w, Tag::ContractSpec, Tag::SpecificationField);
        self.contract_spec(&contract.specification);
    }

    pub(super) fn contract_spec(&mut self, spec: &ContractSpec) {
        let w = Tag::ContractSpec;
        self.array(w, Tag::ConstantDeclarations, &spec.constants, Self::symbol_definition);
        self.array(w, Tag::VariableDeclarations, &spec.variables, Self::symbol_definition);
        self.array(w, Tag::Assumes, &spec.assumes, Self::contract_item);
        self.array(w, Tag::Guarantees, &spec.guarantees, Self::contract_item);
        self.array(w, Tag::Modes, &spec.modes, Self::contract_mode);
        self.array(w, Tag::Imports, &spec.imports, Self::contract_import);
    }

    fn symbol_definition(&mut self, symbol: &SymbolDefinition) {
        let w = Tag::SymbolDefinition;
        self.string_entry(w, Tag::Name, &symbol.name);
        self.bool_entry(w, Tag::IsConstant, symbol.is_constant);
        self.data_type_field(w, Tag::Dtype, &symbol.dtype);
        self.expression_field(w, Tag::Definition, &symbol.definition);
    }

    fn contract_item(&mut self, item: &ContractItem) {
        let w = Tag::ContractItem;
        self.option_string(w, Tag::Name, item.name.as_ref());
        self.expression_field(w, Tag::ExpressionField, &item.expression);
    }

    fn contract_mode(&mut self, mode: &ContractMode) {
        let w = Tag::ContractMode;
        self.string_entry(w, Tag::Name, &mode.name);
        self.array(w, Tag::Requires, &mode.requires, Self::contract_item);
        self.array(w, Tag::Ensures, &mode.ensures, Self::contract_item);
    }

    fn contract_import(&mut self, import: &ContractImport) {
        let w = Tag::ContractImport;
        self.string_entry(w, Tag::ContractField, &import.contract);
        self.array(w, Tag::InputArguments, &import.input_arguments, Self::expression);
        self.array(w, Tag::OutputArguments, &import.output_arguments, Self::expression);
    }
}
