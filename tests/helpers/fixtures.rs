//! Model fixtures covering every construct the decoder knows.

use archmodel::base::TagSubset;
use archmodel::model::*;

pub fn port(name: &str, mode: PortMode, ptype: Option<DataType>) -> Port {
    Port {
        ptype,
        ..Port::new(name, mode)
    }
}

/// `Sensor`: ports `in1`/`out1` and one cyber relation `r1` from
/// `in1:Confidentiality` to `out1:Confidentiality`.
pub fn sensor_component() -> ComponentType {
    ComponentType {
        name: "Sensor".into(),
        ports: vec![
            Port::new("in1", PortMode::In),
            Port::new("out1", PortMode::Out),
        ],
        cyber_relations: vec![CyberRel {
            id: "r1".into(),
            output: CiaPort::new("out1", Cia::Confidentiality),
            inputs: Some(CyberExpr::Port(CiaPort::new("in1", Cia::Confidentiality))),
            ..Default::default()
        }],
        ..Default::default()
    }
}

pub fn sensor_model() -> Model {
    Model {
        name: "sensor".into(),
        component_types: vec![sensor_component()],
        ..Default::default()
    }
}

/// One expression of every kind, in `ExpressionKind::ALL` order.
pub fn all_expressions() -> Vec<Expression> {
    let x = || Expression::id("x");
    let y = || Expression::id("y");
    let mut exprs = vec![
        x(),
        Expression::IntLiteral(-42),
        Expression::RealLiteral(2.5),
        Expression::BoolLiteral(false),
    ];
    exprs.extend(UnaryOp::ALL.iter().map(|&op| Expression::unary(op, x())));
    exprs.extend(BinaryOp::ALL.iter().map(|&op| Expression::binary(op, x(), y())));
    exprs.push(Expression::Conditional {
        condition: Box::new(Expression::BoolLiteral(true)),
        then_branch: Box::new(x()),
        else_branch: Box::new(y()),
    });
    exprs.push(Expression::RecordProjection {
        record: Box::new(x()),
        field: "speed".into(),
    });
    exprs.push(Expression::RecordLiteral {
        record_type: "Reading".into(),
        fields: vec![
            FieldDefinition {
                field: "value".into(),
                value: Expression::RealLiteral(0.5),
            },
            FieldDefinition {
                field: "mode".into(),
                value: Expression::id("On"),
            },
        ],
    });
    exprs.push(Expression::Call {
        node: "filter".into(),
        arguments: vec![x(), Expression::IntLiteral(3)],
    });
    exprs
}

/// One data type of every kind. `UserDefined` points at type declaration 0.
pub fn all_data_types() -> Vec<DataType> {
    vec![
        DataType::Plain(PlainType::Real),
        DataType::Enum(vec!["Off".into(), "On".into()]),
        DataType::Subrange {
            lower: -5,
            upper: 10,
        },
        DataType::Record(vec![
            RecordField {
                name: "value".into(),
                dtype: DataType::Plain(PlainType::Real),
            },
            RecordField {
                name: "mode".into(),
                dtype: DataType::Enum(vec!["Off".into(), "On".into()]),
            },
        ]),
        DataType::UserDefined(TypeDeclId(0)),
    ]
}

fn guarded(name: &str) -> ContractItem {
    ContractItem {
        name: Some(name.into()),
        expression: Expression::binary(
            BinaryOp::GreaterThanOrEqualTo,
            Expression::id("x"),
            Expression::IntLiteral(0),
        ),
    }
}

pub fn contract_spec() -> ContractSpec {
    ContractSpec {
        constants: vec![SymbolDefinition {
            name: "limit".into(),
            is_constant: true,
            dtype: DataType::Plain(PlainType::Int),
            definition: Expression::IntLiteral(100),
        }],
        variables: vec![SymbolDefinition {
            name: "ok".into(),
            is_constant: false,
            dtype: DataType::Plain(PlainType::Bool),
            definition: Expression::binary(
                BinaryOp::LessThan,
                Expression::id("x"),
                Expression::id("limit"),
            ),
        }],
        assumes: vec![guarded("a1")],
        guarantees: vec![ContractItem {
            name: None,
            expression: Expression::id("ok"),
        }],
        modes: vec![ContractMode {
            name: "nominal".into(),
            requires: vec![guarded("r1")],
            ensures: vec![ContractItem {
                name: None,
                expression: Expression::BoolLiteral(true),
            }],
        }],
        imports: vec![ContractImport {
            contract: "Bounded".into(),
            input_arguments: vec![Expression::id("x")],
            output_arguments: vec![Expression::id("ok")],
        }],
    }
}

pub fn node_body() -> NodeBody {
    NodeBody {
        constant_declarations: vec![ConstantDeclaration {
            name: "gain".into(),
            dtype: DataType::Plain(PlainType::Real),
            definition: Some(Expression::RealLiteral(1.5)),
        }],
        variable_declarations: vec![VariableDeclaration {
            name: "acc".into(),
            dtype: DataType::Plain(PlainType::Real),
        }],
        assertions: vec![Expression::unary(UnaryOp::Not, Expression::id("fault"))],
        equations: vec![NodeEquation {
            lhs: vec!["acc".into(), "out".into()],
            rhs: Expression::binary(
                BinaryOp::Arrow,
                Expression::RealLiteral(0.0),
                Expression::unary(UnaryOp::Pre, Expression::id("acc")),
            ),
        }],
        properties: vec![NodeProperty {
            name: Some("bounded".into()),
            expression: Expression::id("ok"),
        }],
    }
}

fn parameter(name: &str, dtype: DataType) -> NodeParameter {
    NodeParameter {
        name: name.into(),
        dtype,
        is_constant: false,
    }
}

pub fn lustre_program() -> LustreProgram {
    LustreProgram {
        type_declarations: vec![TypeDeclaration {
            name: "Count".into(),
            definition: Some(DataType::Plain(PlainType::Int)),
        }],
        constant_declarations: vec![ConstantDeclaration {
            name: "N".into(),
            dtype: DataType::Plain(PlainType::Int),
            definition: None,
        }],
        contract_declarations: vec![Contract {
            name: "Bounded".into(),
            inputs: vec![parameter("x", DataType::Plain(PlainType::Int))],
            outputs: vec![parameter("ok", DataType::Plain(PlainType::Bool))],
            specification: ContractSpec {
                guarantees: vec![guarded("g1")],
                ..Default::default()
            },
        }],
        node_declarations: vec![Node {
            name: "filter".into(),
            is_function: false,
            is_main: true,
            inputs: vec![NodeParameter {
                is_constant: true,
                ..parameter("x", DataType::Plain(PlainType::Int))
            }],
            outputs: vec![parameter("y", DataType::Plain(PlainType::Int))],
            contract: Some(contract_spec()),
            body: Some(node_body()),
        }],
    }
}

fn instance_properties() -> InstanceProperties {
    let mut properties = InstanceProperties {
        component_kind: Some(ComponentKind::Software),
        manufacturer: Some(Manufacturer::ThirdParty),
        situated: Some(Situated::OnBoard),
        pedigree: Some(Pedigree::Cots),
        category: Some("controller".into()),
        adversarially_tested: Some(true),
        ..Default::default()
    };
    properties.flags.insert(InstanceFlag::HasSensitiveInfo, true);
    properties.flags.insert(InstanceFlag::InterceptionAttack, false);
    properties.flags.insert(InstanceFlag::SecureBoot, true);
    properties.dals.insert(DalProperty::SecureBoot, 7);
    properties.dals.insert(DalProperty::Encryption, 3);
    properties
}

fn connection(name: &str, source: ConnectionEnd, destination: ConnectionEnd) -> Connection {
    Connection {
        name: name.into(),
        source,
        destination,
        flow: None,
        conn_type: None,
        flags: Default::default(),
        encrypted_transmission_dal: None,
        attributes: Vec::new(),
    }
}

fn system_impl() -> ComponentImpl {
    let sensor = ComponentTypeId(0);
    let system = ComponentTypeId(1);
    let mut inbound = connection(
        "c1",
        ConnectionEnd::Component(PortRef {
            component: system,
            port: 0,
        }),
        ConnectionEnd::Subcomponent {
            instance: InstanceRef(0),
            port: PortRef {
                component: sensor,
                port: 0,
            },
        },
    );
    inbound.flow = Some(FlowType::Xdata);
    inbound.conn_type = Some(ConnectionType::Remote);
    inbound.flags.insert(ConnectionFlag::Authenticated, true);
    inbound.flags.insert(ConnectionFlag::EncryptedTransmission, false);
    inbound.encrypted_transmission_dal = Some(5);
    inbound.attributes.push(GenericAttribute {
        name: "latency".into(),
        atype: AttributeType::Real,
        value: "0.2".into(),
    });

    let outbound = connection(
        "c2",
        ConnectionEnd::Subcomponent {
            instance: InstanceRef(1),
            port: PortRef {
                component: sensor,
                port: 1,
            },
        },
        ConnectionEnd::Component(PortRef {
            component: system,
            port: 1,
        }),
    );

    ComponentImpl {
        name: "System_Impl".into(),
        component_type: system,
        body: ImplBody::Block(BlockImpl {
            subcomponents: vec![
                ComponentInstance {
                    name: "front".into(),
                    kind: InstanceKind::Specification(sensor),
                    properties: instance_properties(),
                    attributes: vec![GenericAttribute {
                        name: "rate".into(),
                        atype: AttributeType::Int,
                        value: "50".into(),
                    }],
                },
                // Points at an implementation decoded after this one.
                ComponentInstance {
                    name: "rear".into(),
                    kind: InstanceKind::Implementation(ComponentImplId(1)),
                    properties: InstanceProperties::default(),
                    attributes: Vec::new(),
                },
            ],
            connections: vec![inbound, outbound],
        }),
    }
}

/// A model using every list, option and reference shape.
pub fn full_model() -> Model {
    let mut sensor = sensor_component();
    sensor.ports[0].ptype = Some(DataType::UserDefined(TypeDeclId(0)));
    sensor.ports[1].is_event = true;
    sensor.ports[1].probe = true;
    sensor.contract = Some(contract_spec());
    sensor.category = Some("sensor".into());
    sensor.cyber_relations.push(CyberRel {
        id: "r2".into(),
        output: CiaPort::new("out1", Cia::Availability),
        inputs: None,
        comment: Some("no inputs".into()),
        description: Some("always available".into()),
        phases: Some("design".into()),
        extern_: Some("ext".into()),
    });
    sensor.safety_relations.push(SafetyRel {
        id: "sr1".into(),
        output: IaPort::new("out1", Ia::Integrity),
        fault_src: Some(SafetyExpr::Or(vec![
            SafetyExpr::Port(IaPort::new("in1", Ia::Integrity)),
            SafetyExpr::Fault("stuck".into()),
        ])),
        ..Default::default()
    });
    sensor.safety_events.push(SafetyEvent {
        id: "stuck".into(),
        probability: "1.0e-6".into(),
        comment: None,
        description: Some("sensor stuck at last value".into()),
    });

    let system = ComponentType {
        name: "System".into(),
        ports: vec![
            port("cmd", PortMode::In, Some(DataType::Plain(PlainType::Int))),
            port("status", PortMode::Out, None),
        ],
        ..Default::default()
    };

    Model {
        name: "vehicle".into(),
        type_declarations: vec![
            TypeDeclaration {
                name: "Speed".into(),
                definition: Some(DataType::Plain(PlainType::Real)),
            },
            TypeDeclaration {
                name: "Mode".into(),
                definition: Some(DataType::Enum(vec!["Off".into(), "On".into()])),
            },
            TypeDeclaration {
                name: "Level".into(),
                definition: Some(DataType::Subrange {
                    lower: 0,
                    upper: 10,
                }),
            },
            TypeDeclaration {
                name: "Reading".into(),
                definition: Some(DataType::Record(vec![
                    RecordField {
                        name: "value".into(),
                        dtype: DataType::UserDefined(TypeDeclId(0)),
                    },
                    RecordField {
                        name: "mode".into(),
                        dtype: DataType::UserDefined(TypeDeclId(1)),
                    },
                ])),
            },
            TypeDeclaration {
                name: "Opaque".into(),
                definition: None,
            },
        ],
        component_types: vec![sensor, system],
        component_impls: vec![
            system_impl(),
            ComponentImpl {
                name: "Sensor_Impl".into(),
                component_type: ComponentTypeId(0),
                body: ImplBody::Dataflow(node_body()),
            },
        ],
        cyber_requirements: vec![CyberReq {
            id: "req1".into(),
            cia: Cia::Integrity,
            severity: Severity::Major,
            condition: CyberExpr::And(vec![
                CyberExpr::Port(CiaPort::new("out1", Cia::Integrity)),
                CyberExpr::Not(Box::new(CyberExpr::Port(CiaPort::new(
                    "in1",
                    Cia::Availability,
                )))),
            ]),
            comment: Some("top level".into()),
            ..Default::default()
        }],
        safety_requirements: vec![SafetyReq {
            id: "sreq1".into(),
            condition: SafetyExpr::Not(Box::new(SafetyExpr::Fault("stuck".into()))),
            target_probability: Some("1e-9".into()),
            ..Default::default()
        }],
        missions: vec![Mission {
            id: "m1".into(),
            description: Some("keep moving".into()),
            comment: None,
            cyber_reqs: vec!["req1".into()],
        }],
        dataflow_code: Some(lustre_program()),
    }
}
