//! Cyber relations, cyber requirements and missions.

use crate::base::tag_subset;

tag_subset! {
    pub enum Cia {
        Confidentiality => Confidentiality,
        Integrity => Integrity,
        Availability => Availability,
    }
}

tag_subset! {
    pub enum Severity {
        None => None,
        Minor => Minor,
        Major => Major,
        Hazardous => Hazardous,
        Catastrophic => Catastrophic,
    }
}

tag_subset! {
    pub enum CyberExprKind {
        Port => Port,
        And => And,
        Or => Or,
        Not => Not,
    }
}

/// A port name qualified by the security property it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiaPort {
    pub name: String,
    pub cia: Cia,
}

impl CiaPort {
    pub fn new(name: impl Into<String>, cia: Cia) -> Self {
        Self {
            name: name.into(),
            cia,
        }
    }
}

impl Default for CiaPort {
    fn default() -> Self {
        Self::new(String::new(), Cia::Confidentiality)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CyberExpr {
    Port(CiaPort),
    And(Vec<CyberExpr>),
    Or(Vec<CyberExpr>),
    Not(Box<CyberExpr>),
}

impl CyberExpr {
    pub fn kind(&self) -> CyberExprKind {
        match self {
            CyberExpr::Port(_) => CyberExprKind::Port,
            CyberExpr::And(_) => CyberExprKind::And,
            CyberExpr::Or(_) => CyberExprKind::Or,
            CyberExpr::Not(_) => CyberExprKind::Not,
        }
    }
}

impl Default for CyberExpr {
    fn default() -> Self {
        CyberExpr::And(Vec::new())
    }
}

/// How a component's output depends on its inputs, security-wise.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CyberRel {
    pub id: String,
    pub output: CiaPort,
    pub inputs: Option<CyberExpr>,
    pub comment: Option<String>,
    pub description: Option<String>,
    pub phases: Option<String>,
    pub extern_: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyberReq {
    pub id: String,
    pub cia: Cia,
    pub severity: Severity,
    pub condition: CyberExpr,
    pub comment: Option<String>,
    pub description: Option<String>,
    pub phases: Option<String>,
    pub extern_: Option<String>,
}

impl Default for CyberReq {
    fn default() -> Self {
        Self {
            id: String::new(),
            cia: Cia::Confidentiality,
            severity: Severity::None,
            condition: CyberExpr::default(),
            comment: None,
            description: None,
            phases: None,
            extern_: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mission {
    pub id: String,
    pub description: Option<String>,
    pub comment: Option<String>,
    /// Ids of the cyber requirements that make up this mission.
    pub cyber_reqs: Vec<String>,
}
