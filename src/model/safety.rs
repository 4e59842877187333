//! Safety relations, requirements and fault events.

use crate::base::tag_subset;

tag_subset! {
    pub enum Ia {
        Integrity => Integrity,
        Availability => Availability,
    }
}

tag_subset! {
    pub enum SafetyExprKind {
        Port => Port,
        Fault => Fault,
        And => And,
        Or => Or,
        Not => Not,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IaPort {
    pub name: String,
    pub ia: Ia,
}

impl IaPort {
    pub fn new(name: impl Into<String>, ia: Ia) -> Self {
        Self {
            name: name.into(),
            ia,
        }
    }
}

impl Default for IaPort {
    fn default() -> Self {
        Self::new(String::new(), Ia::Integrity)
    }
}

/// A safety condition. `Fault` names a [`SafetyEvent`] that happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SafetyExpr {
    Port(IaPort),
    Fault(String),
    And(Vec<SafetyExpr>),
    Or(Vec<SafetyExpr>),
    Not(Box<SafetyExpr>),
}

impl SafetyExpr {
    pub fn kind(&self) -> SafetyExprKind {
        match self {
            SafetyExpr::Port(_) => SafetyExprKind::Port,
            SafetyExpr::Fault(_) => SafetyExprKind::Fault,
            SafetyExpr::And(_) => SafetyExprKind::And,
            SafetyExpr::Or(_) => SafetyExprKind::Or,
            SafetyExpr::Not(_) => SafetyExprKind::Not,
        }
    }
}

impl Default for SafetyExpr {
    fn default() -> Self {
        SafetyExpr::And(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SafetyReq {
    pub id: String,
    pub condition: SafetyExpr,
    pub comment: Option<String>,
    pub description: Option<String>,
    pub phases: Option<String>,
    pub extern_: Option<String>,
    pub target_probability: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SafetyRel {
    pub id: String,
    pub output: IaPort,
    pub fault_src: Option<SafetyExpr>,
    pub comment: Option<String>,
    pub description: Option<String>,
    pub phases: Option<String>,
    pub extern_: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SafetyEvent {
    pub id: String,
    pub probability: String,
    pub comment: Option<String>,
    pub description: Option<String>,
}
