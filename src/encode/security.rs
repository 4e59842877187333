//! Cyber and safety relations, requirements, missions and events.

use crate::base::Tag;
use crate::model::{
    CiaPort, CyberExpr, CyberRel, CyberReq, IaPort, Mission, SafetyEvent, SafetyExpr, SafetyRel,
    SafetyReq,
};

use super::Encoder;

/// The optional text fields shared by relations and requirements.
struct Annotations<'a> {
    comment: Option<&'a String>,
    description: Option<&'a String>,
    phases: Option<&'a String>,
    extern_: Option<&'a String>,
}

impl Encoder {
    fn annotations(&mut self, wrapper: Tag, notes: Annotations<'_>) {
        self.option_string(wrapper, Tag::Comment, notes.comment);
        self.option_string(wrapper, Tag::Description, notes.description);
        self.option_string(wrapper, Tag::Phases, notes.phases);
        self.option_string(wrapper, Tag::Extern, notes.extern_);
    }

    // =========================================================================
    // Cyber
    // =========================================================================

    fn cia_port_field(&mut self, wrapper: Tag, field: Tag, port: &CiaPort) {
        self.entry(wrapper, Tag::CiaPort, field);
        self.string_entry(Tag::CiaPort, Tag::Name, &port.name);
        self.enum_entry(Tag::CiaPort, Tag::CiaField, Tag::Cia, port.cia);
    }

    fn cyber_expr_field(&mut self, wrapper: Tag, field: Tag, expr: &CyberExpr) {
        self.entry(wrapper, Tag::CyberExpr, field);
        self.cyber_expr(expr);
    }

    fn cyber_expr(&mut self, expr: &CyberExpr) {
        let w = Tag::CyberExpr;
        self.kind_entry(w, Tag::CyberExprKind, expr.kind());
        match expr {
            CyberExpr::Port(port) => self.cia_port_field(w, Tag::PortField, port),
            CyberExpr::And(operands) => self.array(w, Tag::AndField, operands, Self::cyber_expr),
            CyberExpr::Or(operands) => self.array(w, Tag::OrField, operands, Self::cyber_expr),
            CyberExpr::Not(operand) => self.cyber_expr_field(w, Tag::NotField, operand),
        }
    }

    pub(super) fn cyber_rel(&mut self, rel: &CyberRel) {
        let w = Tag::CyberRel;
        self.string_entry(w, Tag::IdField, &rel.id);
        self.cia_port_field(w, Tag::Output, &rel.output);
        self.option_entry(w, Tag::Inputs, rel.inputs.as_ref(), Self::cyber_expr);
        self.annotations(
            w,
            Annotations {
                comment: rel.comment.as_ref(),
                description: rel.description.as_ref(),
                phases: rel.phases.as_ref(),
                extern_: rel.extern_.as_ref(),
            },
        );
    }

    pub(super) fn cyber_req(&mut self, req: &CyberReq) {
        let w = Tag::CyberReq;
        self.string_entry(w, Tag::IdField, &req.id);
        self.enum_entry(w, Tag::CiaField, Tag::Cia, req.cia);
        self.enum_entry(w, Tag::SeverityField, Tag::Severity, req.severity);
        self.cyber_expr_field(w, Tag::Condition, &req.condition);
        self.annotations(
            w,
            Annotations {
                comment: req.comment.as_ref(),
                description: req.description.as_ref(),
                phases: req.phases.as_ref(),
                extern_: req.extern_.as_ref(),
            },
        );
    }

    pub(super) fn mission(&mut self, mission: &Mission) {
        let w = Tag::Mission;
        self.string_entry(w, Tag::IdField, &mission.id);
        self.option_string(w, Tag::Description, mission.description.as_ref());
        self.option_string(w, Tag::Comment, mission.comment.as_ref());
        self.array(w, Tag::CyberReqs, &mission.cyber_reqs, |e, id| e.string(id));
    }

    // =========================================================================
    // Safety
    // =========================================================================

    fn ia_port_field(&mut self, wrapper: Tag, field: Tag, port: &IaPort) {
        self.entry(wrapper, Tag::IaPort, field);
        self.string_entry(Tag::IaPort, Tag::Name, &port.name);
        self.enum_entry(Tag::IaPort, Tag::IaField, Tag::Ia, port.ia);
    }

    fn safety_expr_field(&mut self, wrapper: Tag, field: Tag, expr: &SafetyExpr) {
        self.entry(wrapper, Tag::SafetyExpr, field);
        self.safety_expr(expr);
    }

    fn safety_expr(&mut self, expr: &SafetyExpr) {
        let w = Tag::SafetyExpr;
        self.kind_entry(w, Tag::SafetyExprKind, expr.kind());
        match expr {
            SafetyExpr::Port(port) => self.ia_port_field(w, Tag::PortField, port),
            SafetyExpr::Fault(event) => self.string_entry(w, Tag::FaultField, event),
            SafetyExpr::And(operands) => self.array(w, Tag::AndField, operands, Self::safety_expr),
            SafetyExpr::Or(operands) => self.array(w, Tag::OrField, operands, Self::safety_expr),
            SafetyExpr::Not(operand) => self.safety_expr_field(w, Tag::NotField, operand),
        }
    }

    pub(super) fn safety_req(&mut self, req: &SafetyReq) {
        let w = Tag::SafetyReq;
        self.string_entry(w, Tag::IdField, &req.id);
        self.safety_expr_field(w, Tag::Condition, &req.condition);
        self.annotations(
            w,
            Annotations {
                comment: req.comment.as_ref(),
                description: req.description.as_ref(),
                phases: req.phases.as_ref(),
                extern_: req.extern_.as_ref(),
            },
        );
        self.option_string(w, Tag::TargetProbability, req.target_probability.as_ref());
    }

    pub(super) fn safety_rel(&mut self, rel: &SafetyRel) {
        let w = Tag::SafetyRel;
        self.string_entry(w, Tag::IdField, &rel.id);
        self.ia_port_field(w, Tag::Output, &rel.output);
        self.option_entry(w, Tag::FaultSrc, rel.fault_src.as_ref(), Self::safety_expr);
        self.annotations(
            w,
            Annotations {
                comment: rel.comment.as_ref(),
                description: rel.description.as_ref(),
                phases: rel.phases.as_ref(),
                extern_: rel.extern_.as_ref(),
            },
        );
    }

    pub(super) fn safety_event(&mut self, event: &SafetyEvent) {
        let w = Tag::SafetyEvent;
        self.string_entry(w, Tag::IdField, &event.id);
        self.string_entry(w, Tag::Probability, &event.probability);
        self.option_string(w, Tag::Comment, event.comment.as_ref());
        self.option_string(w, Tag::Description, event.description.as_ref());
    }
}
