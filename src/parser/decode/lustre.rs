//! Dataflow programs: declarations, nodes and contracts.

use crate::base::Tag;
use crate::model::{
    ConstantDeclaration, Contract, ContractImport, ContractItem, ContractMode, ContractSpec,
    LustreProgram, Node, NodeBody, NodeEquation, NodeParameter, NodeProperty, SymbolDefinition,
    VariableDeclaration,
};
use crate::parser::errors::DecodeContext;

use super::{DecodeResult, Decoder, IndexedBuffer};

impl Decoder<'_> {
    pub(super) fn lustre_program(&mut self) -> DecodeResult<LustreProgram> {
        self.enter(DecodeContext::LustreProgram);
        let mut types = IndexedBuffer::new(Tag::TypeDeclarations);
        let mut constants = IndexedBuffer::new(Tag::ConstantDeclarations);
        let mut contracts = IndexedBuffer::new(Tag::ContractDeclarations);
        let mut nodes = IndexedBuffer::new(Tag::NodeDeclarations);

        while self.at(Tag::LustreProgram) {
            match self.entry() {
                Some(Tag::TypeDeclarations) => {
                    self.array_entry(&mut types, |d| d.type_declaration())?;
                }
                Some(Tag::ConstantDeclarations) => {
                    self.array_entry(&mut constants, |d| d.constant_declaration())?;
                }
                Some(Tag::ContractDeclarations) => {
                    self.array_entry(&mut contracts, |d| d.contract())?;
                }
                Some(Tag::NodeDeclarations) => {
                    self.array_entry(&mut nodes, |d| d.node())?;
                }
                _ => self.unknown_field(Tag::LustreProgram),
            }
        }

        let program = LustreProgram {
            type_declarations: self.finish_array(types),
            constant_declarations: self.finish_array(constants),
            contract_declarations: self.finish_array(contracts),
            node_declarations: self.finish_array(nodes),
        };
        self.leave();
        Ok(program)
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn constant_declaration(&mut self) -> DecodeResult<ConstantDeclaration> {
        self.enter(DecodeContext::ConstantDeclaration);
        let mut name = None;
        let mut dtype = None;
        let mut definition = None;
        while self.at(Tag::ConstantDeclaration) {
            match self.entry() {
                Some(Tag::Name) => name = Some(self.string_field()),
                Some(Tag::Dtype) => dtype = Some(self.data_type_field()?),
                Some(Tag::Definition) => definition = self.option(|d| d.expression())?,
                _ => self.unknown_field(Tag::ConstantDeclaration),
            }
        }
        let declaration = ConstantDeclaration {
            name: self.required(name, Tag::Name),
            dtype: self.required(dtype, Tag::Dtype),
            definition,
        };
        self.leave();
        Ok(declaration)
    }

    fn variable_declaration(&mut self) -> DecodeResult<VariableDeclaration> {
        self.enter(DecodeContext::VariableDeclaration);
        let mut name = None;
        let mut dtype = None;
        while self.at(Tag::VariableDeclaration) {
            match self.entry() {
                Some(Tag::Name) => name = Some(self.string_field()),
                Some(Tag::Dtype) => dtype = Some(self.data_type_field()?),
                _ => self.unknown_field(Tag::VariableDeclaration),
            }
        }
        let declaration = VariableDeclaration {
            name: self.required(name, Tag::Name),
            dtype: self.required(dtype, Tag::Dtype),
        };
        self.leave();
        Ok(declaration)
    }

    /// A node or contract parameter. Inputs and outputs share a body but
    /// not a wrapper.
    fn node_parameter(&mut self, wrapper: Tag) -> DecodeResult<NodeParameter> {
        self.enter(DecodeContext::NodeParameter(wrapper));
        let mut name = None;
        let mut dtype = None;
        let mut is_constant = false;
        while self.at(wrapper) {
            match self.entry() {
                Some(Tag::Name) => name = Some(self.string_field()),
                Some(Tag::Dtype) => dtype = Some(self.data_type_field()?),
                Some(Tag::IsConstant) => is_constant = self.bool_field(),
                _ => self.unknown_field(wrapper),
            }
        }
        let parameter = NodeParameter {
            name: self.required(name, Tag::Name),
            dtype: self.required(dtype, Tag::Dtype),
            is_constant,
        };
        self.leave();
        Ok(parameter)
    }

    // =========================================================================
    // Nodes
    // =========================================================================

    fn node(&mut self) -> DecodeResult<Node> {
        self.enter(DecodeContext::Node);
        let mut node = Node::default();
        let mut name = None;
        let mut inputs = IndexedBuffer::new(Tag::InputParameters);
        let mut outputs = IndexedBuffer::new(Tag::OutputParameters);

        while self.at(Tag::Node) {
            match self.entry() {
                Some(Tag::Name) => name = Some(self.string_field()),
                Some(Tag::IsFunction) => node.is_function = self.bool_field(),
                Some(Tag::IsMain) => node.is_main = self.bool_field(),
                Some(Tag::InputParameters) => {
                    self.array_entry(&mut inputs, |d| d.node_parameter(Tag::InputParameter))?;
                }
                Some(Tag::OutputParameters) => {
                    self.array_entry(&mut outputs, |d| d.node_parameter(Tag::OutputParameter))?;
                }
                Some(Tag::ContractField) => node.contract = self.option(|d| d.contract_spec())?,
                Some(Tag::Body) => node.body = self.option(|d| d.node_body())?,
                _ => self.unknown_field(Tag::Node),
            }
        }

        node.name = self.required(name, Tag::Name);
        node.inputs = self.finish_array(inputs);
        node.outputs = self.finish_array(outputs);
        self.leave();
        Ok(node)
    }

    pub(super) fn node_body(&mut self) -> DecodeResult<NodeBody> {
        self.enter(DecodeContext::NodeBody);
        let mut constants = IndexedBuffer::new(Tag::ConstantDeclarations);
        let mut variables = IndexedBuffer::new(Tag::VariableDeclarations);
        let mut assertions = IndexedBuffer::new(Tag::Assertions);
        let mut equations = IndexedBuffer::new(Tag::Equations);
        let mut properties = IndexedBuffer::new(Tag::Properties);

        while self.at(Tag::NodeBody) {
            match self.entry() {
                Some(Tag::ConstantDeclarations) => {
                    self.array_entry(&mut constants, |d| d.constant_declaration())?;
                }
                Some(Tag::VariableDeclarations) => {
                    self.array_entry(&mut variables, |d| d.variable_declaration())?;
                }
                Some(Tag::Assertions) => {
                    self.array_entry(&mut assertions, |d| d.expression())?;
                }
                Some(Tag::Equations) => {
                    self.array_entry(&mut equations, |d| d.node_equation())?;
                }
                Some(Tag::Properties) => {
                    self.array_entry(&mut properties, |d| d.node_property())?;
                }
                _ => self.unknown_field(Tag::NodeBody),
            }
        }

        let body = NodeBody {
            constant_declarations: self.finish_array(constants),
            variable_declarations: self.finish_array(variables),
            assertions: self.finish_array(assertions),
            equations: self.finish_array(equations),
            properties: self.finish_array(properties),
        };
        self.leave();
        Ok(body)
    }

    fn node_equation(&mut self) -> DecodeResult<NodeEquation> {
        self.enter(DecodeContext::NodeEquation);
        let mut lhs = IndexedBuffer::new(Tag::Lhs);
        let mut rhs = None;
        while self.at(Tag::NodeEquation) {
            match self.entry() {
                Some(Tag::Lhs) => {
                    self.array_entry(&mut lhs, |d| Ok(d.string_lit()))?;
                }
                Some(Tag::Rhs) => rhs = Some(self.expression_field()?),
                _ => self.unknown_field(Tag::NodeEquation),
            }
        }
        let equation = NodeEquation {
            lhs: self.finish_array(lhs),
            rhs: self.required(rhs, Tag::Rhs),
        };
        self.leave();
        Ok(equation)
    }

    fn node_property(&mut self) -> DecodeResult<NodeProperty> {
        self.enter(DecodeContext::NodeProperty);
        let mut name = None;
        let mut expression = None;
        while self.at(Tag::NodeProperty) {
            match self.entry() {
                Some(Tag::Name) => name = self.option_string()?,
                Some(Tag::ExpressionField) => expression = Some(self.expression_field()?),
                _ => self.unknown_field(Tag::NodeProperty),
            }
        }
        let property = NodeProperty {
            name,
            expression: self.required(expression, Tag::ExpressionField),
        };
        self.leave();
        Ok(property)
    }

    // =========================================================================
    // Contracts
    // =========================================================================

    fn contract(&mut self) -> DecodeResult<Contract> {
        self.enter(DecodeContext::Contract);
        let mut name = None;
        let mut specification = None;
        let mut inputs = IndexedBuffer::new(Tag::InputParameters);
        let mut outputs = IndexedBuffer::new(Tag::OutputParameters);

        while self.at(Tag::Contract) {
            match self.entry() {
                Some(Tag::Name) => name = Some(self.string_field()),
                Some(Tag::InputParameters) => {
                    self.array_entry(&mut inputs, |d| d.node_parameter(Tag::InputParameter))?;
                }
                Some(Tag::OutputParameters) => {
                    self.array_entry(&mut outputs, |d| d.node_parameter(Tag::OutputParameter))?;
                }
                Some(Tag::SpecificationField) => {
                    self.cur.expect(Tag::ContractSpec);
                    specification = Some(self.contract_spec()?);
                }
                _ => self.unknown_field(Tag::Contract),
            }
        }

        let contract = Contract {
            name: self.required(name, Tag::Name),
            inputs: self.finish_array(inputs),
            outputs: self.finish_array(outputs),
            specification: self.required(specification, Tag::SpecificationField),
        };
        self.leave();
        Ok(contract)
    }

    pub(super) fn contract_spec(&mut self) -> DecodeResult<ContractSpec> {
        self.enter(DecodeContext::ContractSpec);
        let mut constants = IndexedBuffer::new(Tag::ConstantDeclarations);
        let mut variables = IndexedBuffer::new(Tag::VariableDeclarations);
        let mut assumes = IndexedBuffer::new(Tag::Assumes);
        let mut guarantees = IndexedBuffer::new(Tag::Guarantees);
        let mut modes = IndexedBuffer::new(Tag::Modes);
        let mut imports = IndexedBuffer::new(Tag::Imports);

        while self.at(Tag::ContractSpec) {
            match self.entry() {
                Some(Tag::ConstantDeclarations) => {
                    self.array_entry(&mut constants, |d| d.symbol_definition())?;
                }
                Some(Tag::VariableDeclarations) => {
                    self.array_entry(&mut variables, |d| d.symbol_definition())?;
                }
                Some(Tag::Assumes) => {
                    self.array_entry(&mut assumes, |d| d.contract_item())?;
                }
                Some(Tag::Guarantees) => {
                    self.array_entry(&mut guarantees, |d| d.contract_item())?;
                }
                Some(Tag::Modes) => {
                    self.array_entry(&mut modes, |d| d.contract_mode())?;
                }
                Some(Tag::Imports) => {
                    self.array_entry(&mut imports, |d| d.contract_import())?;
                }
                _ => self.unknown_field(Tag::ContractSpec),
            }
        }

        let spec = ContractSpec {
            constants: self.finish_array(constants),
            variables: self.finish_array(variables),
            assumes: self.finish_array(assumes),
            guarantees: self.finish_array(guarantees),
            modes: self.finish_array(modes),
            imports: self.finish_array(imports),
        };
        self.leave();
        Ok(spec)
    }

    fn symbol_definition(&mut self) -> DecodeResult<SymbolDefinition> {
        self.enter(DecodeContext::SymbolDefinition);
        let mut name = None;
        let mut is_constant = false;
        let mut dtype = None;
        let mut definition = None;
        while self.at(Tag::SymbolDefinition) {
            match self.entry() {
                Some(Tag::Name) => name = Some(self.string_field()),
                Some(Tag::IsConstant) => is_constant = self.bool_field(),
                Some(Tag::Dtype) => dtype = Some(self.data_type_field()?),
                Some(Tag::Definition) => definition = Some(self.expression_field()?),
                _ => self.unknown_field(Tag::SymbolDefinition),
            }
        }
        let symbol = SymbolDefinition {
            name: self.required(name, Tag::Name),
            is_constant,
            dtype: self.required(dtype, Tag::Dtype),
            definition: self.required(definition, Tag::Definition),
        };
        self.leave();
        Ok(symbol)
    }

    fn contract_item(&mut self) -> DecodeResult<ContractItem> {
        self.enter(DecodeContext::ContractItem);
        let mut name = None;
        let mut expression = None;
        while self.at(Tag::ContractItem) {
            match self.entry() {
                Some(Tag::Name) => name = self.option_string()?,
                Some(Tag::ExpressionField) => expression = Some(self.expression_field()?),
                _ => self.unknown_field(Tag::ContractItem),
            }
        }
        let item = ContractItem {
            name,
            expression: self.required(expression, Tag::ExpressionField),
        };
        self.leave();
        Ok(item)
    }

    fn contract_mode(&mut self) -> DecodeResult<ContractMode> {
        self.enter(DecodeContext::ContractMode);
        let mut name = None;
        let mut requires = IndexedBuffer::new(Tag::Requires);
        let mut ensures = IndexedBuffer::new(Tag::Ensures);
        while self.at(Tag::ContractMode) {
            match self.entry() {
                Some(Tag::Name) => name = Some(self.string_field()),
                Some(Tag::Requires) => {
                    self.array_entry(&mut requires, |d| d.contract_item())?;
                }
                Some(Tag::Ensures) => {
                    self.array_entry(&mut ensures, |d| d.contract_item())?;
                }
                _ => self.unknown_field(Tag::ContractMode),
            }
        }
        let mode = ContractMode {
            name: self.required(name, Tag::Name),
            requires: self.finish_array(requires),
            ensures: self.finish_array(ensures),
        };
        self.leave();
        Ok(mode)
    }

    fn contract_import(&mut self) -> DecodeResult<ContractImport> {
        self.enter(DecodeContext::ContractImport);
        let mut contract = None;
        let mut inputs = IndexedBuffer::new(Tag::InputArguments);
        let mut outputs = IndexedBuffer::new(Tag::OutputArguments);
        while self.at(Tag::ContractImport) {
            match self.entry() {
                Some(Tag::ContractField) => contract = Some(self.string_field()),
                Some(Tag::InputArguments) => {
                    self.array_entry(&mut inputs, |d| d.expression())?;
                }
                Some(Tag::OutputArguments) => {
                    self.array_entry(&mut outputs, |d| d.expression())?;
                }
                _ => self.unknown_field(Tag::ContractImport),
            }
        }
        let import = ContractImport {
            contract: self.required(contract, Tag::ContractField),
            input_arguments: self.finish_array(inputs),
            output_arguments: self.finish_array(outputs),
        };
        self.leave();
        Ok(import)
    }
}
