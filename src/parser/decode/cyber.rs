//! Cyber relations, requirements and missions.

use crate::base::Tag;
use crate::model::{Cia, CiaPort, CyberExpr, CyberExprKind, CyberRel, CyberReq, Mission, Severity};
use crate::parser::errors::DecodeContext;

use super::{DecodeResult, Decoder, IndexedBuffer};

/// The optional text fields every relation and requirement carries.
#[derive(Debug, Default)]
pub(super) struct Annotations {
    pub comment: Option<String>,
    pub description: Option<String>,
    pub phases: Option<String>,
    pub extern_: Option<String>,
}

impl Decoder<'_> {
    /// Try `field` as one of the shared annotation fields. Returns `false`
    /// without consuming anything when it is not one.
    pub(super) fn annotation(&mut self, notes: &mut Annotations, field: Option<Tag>) -> DecodeResult<bool> {
        let slot = match field {
            Some(Tag::Comment) => &mut notes.comment,
            Some(Tag::Description) => &mut notes.description,
            Some(Tag::Phases) => &mut notes.phases,
            Some(Tag::Extern) => &mut notes.extern_,
            _ => return Ok(false),
        };
        *slot = self.option_string()?;
        Ok(true)
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// `CIAPort(f)` followed by the port's entries.
    fn cia_port_field(&mut self) -> DecodeResult<CiaPort> {
        self.cur.expect(Tag::CiaPort);
        self.enter(DecodeContext::CiaPort);
        let mut name = None;
        let mut cia = None;
        while self.at(Tag::CiaPort) && !(name.is_some() && cia.is_some()) {
            match self.entry() {
                Some(Tag::Name) => name = Some(self.string_field()),
                Some(Tag::CiaField) => cia = self.enum_field::<Cia>(Tag::Cia),
                _ => self.unknown_field(Tag::CiaPort),
            }
        }
        let name = self.required(name, Tag::Name);
        let port = match cia {
            Some(cia) => CiaPort::new(name, cia),
            None => {
                self.missing(Tag::CiaField);
                CiaPort {
                    name,
                    ..CiaPort::default()
                }
            }
        };
        self.leave();
        Ok(port)
    }

    /// `CyberExpr(f)` followed by the expression's entries.
    fn cyber_expr_field(&mut self) -> DecodeResult<CyberExpr> {
        self.cur.expect(Tag::CyberExpr);
        self.cyber_expr()
    }

    fn cyber_expr(&mut self) -> DecodeResult<CyberExpr> {
        self.descend()?;
        self.enter(DecodeContext::CyberExpr);
        let result = self.cyber_expr_entries();
        self.leave();
        self.ascend();
        result
    }

    fn cyber_expr_entries(&mut self) -> DecodeResult<CyberExpr> {
        let mut kind = None;
        let mut expr = None;
        let mut and = IndexedBuffer::new(Tag::AndField);
        let mut or = IndexedBuffer::new(Tag::OrField);

        while self.at(Tag::CyberExpr) && !(kind.is_some() && expr.is_some()) {
            match self.entry() {
                Some(Tag::DataKind) => kind = self.enum_field::<CyberExprKind>(Tag::CyberExprKind),
                Some(Tag::PortField) => {
                    let port = self.cia_port_field()?;
                    self.set_payload(&mut expr, kind, CyberExprKind::Port, CyberExpr::Port(port));
                }
                Some(Tag::AndField) => {
                    self.array_entry(&mut and, |d| d.cyber_expr())?;
                    if let Some(operands) = self.take_if_complete(&mut and) {
                        self.set_payload(&mut expr, kind, CyberExprKind::And, CyberExpr::And(operands));
                    }
                }
                Some(Tag::OrField) => {
                    self.array_entry(&mut or, |d| d.cyber_expr())?;
                    if let Some(operands) = self.take_if_complete(&mut or) {
                        self.set_payload(&mut expr, kind, CyberExprKind::Or, CyberExpr::Or(operands));
                    }
                }
                Some(Tag::NotField) => {
                    let operand = self.cyber_expr_field()?;
                    self.set_payload(&mut expr, kind, CyberExprKind::Not, CyberExpr::Not(Box::new(operand)));
                }
                _ => self.unknown_field(Tag::CyberExpr),
            }
        }

        if kind.is_none() {
            self.missing(Tag::DataKind);
        }
        if expr.is_none() && and.len().is_some() {
            expr = Some(CyberExpr::And(self.finish_array(and)));
        } else if expr.is_none() && or.len().is_some() {
            expr = Some(CyberExpr::Or(self.finish_array(or)));
        }
        Ok(self.required(expr, Tag::CyberExpr))
    }

    // =========================================================================
    // Relations, requirements, missions
    // =========================================================================

    pub(super) fn cyber_rel(&mut self) -> DecodeResult<CyberRel> {
        self.enter(DecodeContext::CyberRel);
        let mut id = None;
        let mut output = None;
        let mut inputs = None;
        let mut notes = Annotations::default();
        while self.at(Tag::CyberRel) {
            let field = self.entry();
            if self.annotation(&mut notes, field)? {
                continue;
            }
            match field {
                Some(Tag::IdField) => id = Some(self.string_field()),
                Some(Tag::Output) => output = Some(self.cia_port_field()?),
                Some(Tag::Inputs) => inputs = self.option(|d| d.cyber_expr())?,
                _ => self.unknown_field(Tag::CyberRel),
            }
        }
        let rel = CyberRel {
            id: self.required(id, Tag::IdField),
            output: self.required(output, Tag::Output),
            inputs,
            comment: notes.comment,
            description: notes.description,
            phases: notes.phases,
            extern_: notes.extern_,
        };
        self.leave();
        Ok(rel)
    }

    pub(super) fn cyber_req(&mut self) -> DecodeResult<CyberReq> {
        self.enter(DecodeContext::CyberReq);
        let mut req = CyberReq::default();
        let mut id = None;
        let mut cia = None;
        let mut severity = None;
        let mut condition = None;
        let mut notes = Annotations::default();
        while self.at(Tag::CyberReq) {
            let field = self.entry();
            if self.annotation(&mut notes, field)? {
                continue;
            }
            match field {
                Some(Tag::IdField) => id = Some(self.string_field()),
                Some(Tag::CiaField) => cia = self.enum_field::<Cia>(Tag::Cia),
                Some(Tag::SeverityField) => severity = self.enum_field::<Severity>(Tag::Severity),
                Some(Tag::Condition) => condition = Some(self.cyber_expr_field()?),
                _ => self.unknown_field(Tag::CyberReq),
            }
        }
        req.id = self.required(id, Tag::IdField);
        match cia {
            Some(cia) => req.cia = cia,
            None => self.missing(Tag::CiaField),
        }
        match severity {
            Some(severity) => req.severity = severity,
            None => self.missing(Tag::SeverityField),
        }
        req.condition = self.required(condition, Tag::Condition);
        req.comment = notes.comment;
        req.description = notes.description;
        req.phases = notes.phases;
        req.extern_ = notes.extern_;
        self.leave();
        Ok(req)
    }

    pub(super) fn mission(&mut self) -> DecodeResult<Mission> {
        self.enter(DecodeContext::Mission);
        let mut mission = Mission::default();
        let mut id = None;
        let mut reqs = IndexedBuffer::new(Tag::CyberReqs);
        while self.at(Tag::Mission) {
            match self.entry() {
                Some(Tag::IdField) => id = Some(self.string_field()),
                Some(Tag::Description) => mission.description = self.option_string()?,
                Some(Tag::Comment) => mission.comment = self.option_string()?,
                Some(Tag::CyberReqs) => {
                    self.array_entry(&mut reqs, |d| Ok(d.string_lit()))?;
                }
                _ => self.unknown_field(Tag::Mission),
            }
        }
        mission.id = self.required(id, Tag::IdField);
        mission.cyber_reqs = self.finish_array(reqs);
        self.leave();
        Ok(mission)
    }
}
