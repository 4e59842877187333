//! Safety relations, requirements and events.

use crate::base::Tag;
use crate::model::{Ia, IaPort, SafetyEvent, SafetyExpr, SafetyExprKind, SafetyRel, SafetyReq};
use crate::parser::errors::DecodeContext;

use super::cyber::Annotations;
use super::{DecodeResult, Decoder, IndexedBuffer};

impl Decoder<'_> {
    fn ia_port_field(&mut self) -> DecodeResult<IaPort> {
        self.cur.expect(Tag::IaPort);
        self.enter(DecodeContext::IaPort);
        let mut name = None;
        let mut ia = None;
        while self.at(Tag::IaPort) && !(name.is_some() && ia.is_some()) {
            match self.entry() {
                Some(Tag::Name) => name = Some(self.string_field()),
                Some(Tag::IaField) => ia = self.enum_field::<Ia>(Tag::Ia),
                _ => self.unknown_field(Tag::IaPort),
            }
        }
        let name = self.required(name, Tag::Name);
        let port = match ia {
            Some(ia) => IaPort::new(name, ia),
            None => {
                self.missing(Tag::IaField);
                IaPort {
                    name,
                    ..IaPort::default()
                }
            }
        };
        self.leave();
        Ok(port)
    }

    fn safety_expr_field(&mut self) -> DecodeResult<SafetyExpr> {
        self.cur.expect(Tag::SafetyExpr);
        self.safety_expr()
    }

    fn safety_expr(&mut self) -> DecodeResult<SafetyExpr> {
        self.descend()?;
        self.enter(DecodeContext::SafetyExpr);
        let result = self.safety_expr_entries();
        self.leave();
        self.ascend();
        result
    }

    fn safety_expr_entries(&mut self) -> DecodeResult<SafetyExpr> {
        let mut kind = None;
        let mut expr = None;
        let mut and = IndexedBuffer::new(Tag::AndField);
        let mut or = IndexedBuffer::new(Tag::OrField);

        while self.at(Tag::SafetyExpr) && !(kind.is_some() && expr.is_some()) {
            match self.entry() {
                Some(Tag::DataKind) => kind = self.enum_field::<SafetyExprKind>(Tag::SafetyExprKind),
                Some(Tag::PortField) => {
                    let port = self.ia_port_field()?;
                    self.set_payload(&mut expr, kind, SafetyExprKind::Port, SafetyExpr::Port(port));
                }
                Some(Tag::FaultField) => {
                    let event = self.string_field();
                    self.set_payload(&mut expr, kind, SafetyExprKind::Fault, SafetyExpr::Fault(event));
                }
                Some(Tag::AndField) => {
                    self.array_entry(&mut and, |d| d.safety_expr())?;
                    if let Some(operands) = self.take_if_complete(&mut and) {
                        self.set_payload(&mut expr, kind, SafetyExprKind::And, SafetyExpr::And(operands));
                    }
                }
                Some(Tag::OrField) => {
                    self.array_entry(&mut or, |d| d.safety_expr())?;
                    if let Some(operands) = self.take_if_complete(&mut or) {
                        self.set_payload(&mut expr, kind, SafetyExprKind::Or, SafetyExpr::Or(operands));
                    }
                }
                Some(Tag::NotField) => {
                    let operand = self.safety_expr_field()?;
                    self.set_payload(
                        &mut expr,
                        kind,
                        SafetyExprKind::Not,
                        SafetyExpr::Not(Box::new(operand)),
                    );
                }
                _ => self.unknown_field(Tag::SafetyExpr),
            }
        }

        if kind.is_none() {
            self.missing(Tag::DataKind);
        }
        if expr.is_none() && and.len().is_some() {
            expr = Some(SafetyExpr::And(self.finish_array(and)));
        } else if expr.is_none() && or.len().is_some() {
            expr = Some(SafetyExpr::Or(self.finish_array(or)));
        }
        Ok(self.required(expr, Tag::SafetyExpr))
    }

    pub(super) fn safety_req(&mut self) -> DecodeResult<SafetyReq> {
        self.enter(DecodeContext::SafetyReq);
        let mut id = None;
        let mut condition = None;
        let mut target_probability = None;
        let mut notes = Annotations::default();
        while self.at(Tag::SafetyReq) {
            let field = self.entry();
            if self.annotation(&mut notes, field)? {
                continue;
            }
            match field {
                Some(Tag::IdField) => id = Some(self.string_field()),
                Some(Tag::Condition) => condition = Some(self.safety_expr_field()?),
                Some(Tag::TargetProbability) => target_probability = self.option_string()?,
                _ => self.unknown_field(Tag::SafetyReq),
            }
        }
        let req = SafetyReq {
            id: self.required(id, Tag::IdField),
            condition: self.required(condition, Tag::Condition),
            comment: notes.comment,
            description: notes.description,
            phases: notes.phases,
            extern_: notes.extern_,
            target_probability,
        };
        self.leave();
        Ok(req)
    }

    pub(super) fn safety_rel(&mut self) -> DecodeResult<SafetyRel> {
        self.enter(DecodeContext::SafetyRel);
        let mut id = None;
        let mut output = None;
        let mut fault_src = None;
        let mut notes = Annotations::default();
        while self.at(Tag::SafetyRel) {
            let field = self.entry();
            if self.annotation(&mut notes, field)? {
                continue;
            }
            match field {
                Some(Tag::IdField) => id = Some(self.string_field()),
                Some(Tag::Output) => output = Some(self.ia_port_field()?),
                Some(Tag::FaultSrc) => fault_src = self.option(|d| d.safety_expr())?,
                _ => self.unknown_field(Tag::SafetyRel),
            }
        }
        let rel = SafetyRel {
            id: self.required(id, Tag::IdField),
            output: self.required(output, Tag::Output),
            fault_src,
            comment: notes.comment,
            description: notes.description,
            phases: notes.phases,
            extern_: notes.extern_,
        };
        self.leave();
        Ok(rel)
    }

    pub(super) fn safety_event(&mut self) -> DecodeResult<SafetyEvent> {
        self.enter(DecodeContext::SafetyEvent);
        let mut event = SafetyEvent::default();
        let mut id = None;
        let mut probability = None;
        while self.at(Tag::SafetyEvent) {
            match self.entry() {
                Some(Tag::IdField) => id = Some(self.string_field()),
                Some(Tag::Probability) => probability = Some(self.string_field()),
                Some(Tag::Comment) => event.comment = self.option_string()?,
                Some(Tag::Description) => event.description = self.option_string()?,
                _ => self.unknown_field(Tag::SafetyEvent),
            }
        }
        event.id = self.required(id, Tag::IdField);
        event.probability = self.required(probability, Tag::Probability);
        self.leave();
        Ok(event)
    }
}
