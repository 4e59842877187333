//! Indirect references into lists decoded elsewhere.
//!
//! A reference is a path of tokens naming a list and an index:
//!
//! ```text
//! Model(m) ArrayList(type_declarations) null(element) int(i)
//! Model(m) ArrayList(component_types) null(element) int(i) ArrayList(ports) null(element) int(j)
//! BlockImpl(b) ArrayList(subcomponents) null(element) int(i)
//! ```
//!
//! The decoder resolves a path to a handle and checks it against what the
//! [`Scope`] knows: the declared length of each root list, the port count of
//! every component type decoded so far, and the sub-component count of each
//! block implementation being decoded. A handle to a slot that is declared
//! but not yet decoded is legal; the canonical node arrives later in the
//! same stream.

use rustc_hash::FxHashMap;

use crate::base::Tag;
use crate::model::{ComponentImplId, ComponentTypeId, InstanceRef, PortRef, TypeDeclId};
use crate::parser::errors::ErrorCode;

use super::Decoder;

/// Length bookkeeping for one list.
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct ListScope {
    declared: Option<usize>,
}

impl ListScope {
    pub fn declare(&mut self, len: usize) {
        self.declared = Some(len);
    }

    fn check(&self, index: usize) -> Result<(), ErrorCode> {
        match self.declared {
            None => Err(ErrorCode::E0501),
            Some(len) if index >= len => Err(ErrorCode::E0502),
            Some(_) => Ok(()),
        }
    }
}

/// What the decoder has seen so far that references may point at.
#[derive(Debug, Default)]
pub(super) struct Scope {
    pub type_declarations: ListScope,
    pub component_types: ListScope,
    pub component_impls: ListScope,
    /// Port count per decoded component type.
    ports: FxHashMap<usize, usize>,
    /// Sub-component lists of the block implementations being decoded,
    /// innermost last.
    blocks: Vec<ListScope>,
}

impl Scope {
    pub fn record_ports(&mut self, component: usize, count: usize) {
        self.ports.insert(component, count);
    }

    pub fn open_block(&mut self) {
        self.blocks.push(ListScope::default());
    }

    pub fn close_block(&mut self) {
        self.blocks.pop();
    }

    pub fn block_mut(&mut self) -> Option<&mut ListScope> {
        self.blocks.last_mut()
    }
}

impl Decoder<'_> {
    /// `ArrayList(list) null(element) int(i)`: one step of a reference path.
    fn list_index(&mut self, list: Tag) -> Option<usize> {
        let field = self.cur.semantic();
        if field != Some(list) && self.at(Tag::ArrayList) {
            let found = self.cur.current().name.clone();
            self.cur.report(
                ErrorCode::E0101,
                format!("expected reference into '{}', found '{}'", list.key(), found),
            );
        }
        self.cur.expect(Tag::ArrayList);
        self.cur.expect(Tag::Null);
        self.index_literal()
    }

    /// Report a failed reference check and fall back to the first slot.
    fn dangling(&mut self, code: ErrorCode, list: Tag, index: usize) -> usize {
        match code {
            ErrorCode::E0502 => self.cur.report(
                code,
                format!("reference {index} is out of range for '{}'", list.key()),
            ),
            _ => self.cur.report_hinted(
                code,
                format!(
                    "reference {index} into '{}' before its length is known",
                    list.key()
                ),
                "the reference precedes its target list",
            ),
        }
        0
    }

    fn root_reference(&mut self, list: Tag) -> usize {
        self.cur.expect(Tag::Model);
        let Some(index) = self.list_index(list) else {
            return 0;
        };
        let scope = match list {
            Tag::TypeDeclarations => self.scope.type_declarations,
            Tag::ComponentTypes => self.scope.component_types,
            _ => self.scope.component_impls,
        };
        match scope.check(index) {
            Ok(()) => index,
            Err(code) => self.dangling(code, list, index),
        }
    }

    pub(super) fn type_decl_ref(&mut self) -> TypeDeclId {
        TypeDeclId(self.root_reference(Tag::TypeDeclarations))
    }

    pub(super) fn component_type_ref(&mut self) -> ComponentTypeId {
        ComponentTypeId(self.root_reference(Tag::ComponentTypes))
    }

    pub(super) fn component_impl_ref(&mut self) -> ComponentImplId {
        ComponentImplId(self.root_reference(Tag::ComponentImpls))
    }

    /// A component-type reference followed by the port step.
    pub(super) fn port_ref(&mut self) -> PortRef {
        let component = self.component_type_ref();
        let Some(port) = self.list_index(Tag::Ports) else {
            return PortRef {
                component,
                port: 0,
            };
        };
        let port = match self.scope.ports.get(&component.0) {
            Some(&count) if port >= count => self.dangling(ErrorCode::E0502, Tag::Ports, port),
            _ => port,
        };
        PortRef { component, port }
    }

    /// A reference into the innermost block implementation's sub-components.
    pub(super) fn instance_ref(&mut self) -> InstanceRef {
        self.cur.expect(Tag::BlockImpl);
        let Some(index) = self.list_index(Tag::Subcomponents) else {
            return InstanceRef(0);
        };
        let Some(block) = self.scope.blocks.last().copied() else {
            self.cur.report(
                ErrorCode::E0503,
                format!("sub-component reference {index} outside a block implementation"),
            );
            return InstanceRef(0);
        };
        match block.check(index) {
            Ok(()) => InstanceRef(index),
            Err(code) => InstanceRef(self.dangling(code, Tag::Subcomponents, index)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_scope_checks() {
        let mut list = ListScope::default();
        assert_eq!(list.check(0), Err(ErrorCode::E0501));
        list.declare(2);
        assert_eq!(list.check(1), Ok(()));
        assert_eq!(list.check(2), Err(ErrorCode::E0502));
    }

    #[test]
    fn test_blocks_nest() {
        let mut scope = Scope::default();
        assert!(scope.block_mut().is_none());
        scope.open_block();
        scope.block_mut().unwrap().declare(1);
        scope.open_block();
        assert_eq!(scope.blocks.last().unwrap().check(0), Err(ErrorCode::E0501));
        scope.close_block();
        assert_eq!(scope.blocks.last().unwrap().check(0), Ok(()));
    }
}
