//! Group-structured storage for positional memoization.
//!
//! Every group owns an ordered list of slots (nested groups, remembered
//! values and emitted nodes). A pass walks the table with one cursor per open
//! group; whatever a group did not revisit before it closes is disposed.

use std::any::Any;

use crate::hash;
use crate::owned::Owned;
use crate::{Key, NodeId};

type GroupId = usize;

const ROOT: GroupId = 0;

enum Slot {
    Group(GroupId),
    Value(Box<dyn Any>),
    Node(NodeId),
}

struct Group {
    key: Key,
    slots: Vec<Slot>,
}

#[derive(Clone, Copy)]
struct GroupFrame {
    group: GroupId,
    cursor: usize,
}

pub(crate) struct SlotTable {
    groups: Vec<Option<Group>>,
    free: Vec<GroupId>,
    stack: Vec<GroupFrame>,
}

impl SlotTable {
    pub(crate) fn new() -> Self {
        Self {
            groups: vec![Some(Group {
                key: 0,
                slots: Vec::new(),
            })],
            free: Vec::new(),
            stack: Vec::new(),
        }
    }

    pub(crate) fn begin_pass(&mut self) {
        self.stack.clear();
        self.stack.push(GroupFrame {
            group: ROOT,
            cursor: 0,
        });
    }

    /// Closes any groups left open (including the root) and disposes the
    /// slots the pass did not reach.
    pub(crate) fn finish_pass(&mut self, disposed: &mut Vec<NodeId>) {
        while !self.stack.is_empty() {
            self.end_group(disposed);
        }
    }

    fn group(&self, id: GroupId) -> &Group {
        self.groups[id].as_ref().expect("slot table references a freed group")
    }

    fn group_mut(&mut self, id: GroupId) -> &mut Group {
        self.groups[id].as_mut().expect("slot table references a freed group")
    }

    fn frame(&self) -> GroupFrame {
        *self.stack.last().expect("slot table has no open group")
    }

    fn advance(&mut self) {
        if let Some(frame) = self.stack.last_mut() {
            frame.cursor += 1;
        }
    }

    fn alloc(&mut self, key: Key) -> GroupId {
        let group = Group {
            key,
            slots: Vec::new(),
        };
        match self.free.pop() {
            Some(id) => {
                self.groups[id] = Some(group);
                id
            }
            None => {
                self.groups.push(Some(group));
                self.groups.len() - 1
            }
        }
    }

    pub(crate) fn start_group(&mut self, key: Key) {
        let GroupFrame { group, cursor } = self.frame();
        let found = self.group(group).slots[cursor..]
            .iter()
            .enumerate()
            .find_map(|(offset, slot)| match slot {
                Slot::Group(id) if self.group(*id).key == key => Some((offset, *id)),
                _ => None,
            });
        let id = match found {
            Some((0, id)) => id,
            Some((offset, id)) => {
                log::trace!("moving group {key:#x} from {} to {cursor}", cursor + offset);
                let slots = &mut self.group_mut(group).slots;
                let slot = slots.remove(cursor + offset);
                slots.insert(cursor, slot);
                id
            }
            None => {
                let id = self.alloc(key);
                self.group_mut(group).slots.insert(cursor, Slot::Group(id));
                id
            }
        };
        self.advance();
        self.stack.push(GroupFrame {
            group: id,
            cursor: 0,
        });
    }

    pub(crate) fn end_group(&mut self, disposed: &mut Vec<NodeId>) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let removed: Vec<Slot> = self
            .group_mut(frame.group)
            .slots
            .drain(frame.cursor..)
            .collect();
        for slot in removed {
            self.dispose(slot, disposed);
        }
    }

    fn dispose(&mut self, slot: Slot, disposed: &mut Vec<NodeId>) {
        match slot {
            Slot::Group(id) => {
                if let Some(group) = self.groups[id].take() {
                    self.free.push(id);
                    for child in group.slots {
                        self.dispose(child, disposed);
                    }
                }
            }
            Slot::Value(value) => drop(value),
            Slot::Node(id) => disposed.push(id),
        }
    }

    /// Returns the value remembered at the cursor if it has type `T`.
    pub(crate) fn reuse_value<T: 'static>(&mut self) -> Option<Owned<T>> {
        let GroupFrame { group, cursor } = self.frame();
        let existing = match self.group(group).slots.get(cursor) {
            Some(Slot::Value(value)) => value.downcast_ref::<Owned<T>>().cloned(),
            _ => None,
        };
        if existing.is_some() {
            self.advance();
        }
        existing
    }

    pub(crate) fn store_value<T: 'static>(&mut self, value: Owned<T>, disposed: &mut Vec<NodeId>) {
        let slot = Slot::Value(Box::new(value));
        let replaced = self.put(slot, |existing| matches!(existing, Slot::Value(_)));
        if let Some(old) = replaced {
            self.dispose(old, disposed);
        }
    }

    pub(crate) fn peek_node(&self) -> Option<NodeId> {
        let GroupFrame { group, cursor } = self.frame();
        match self.group(group).slots.get(cursor) {
            Some(Slot::Node(id)) => Some(*id),
            _ => None,
        }
    }

    pub(crate) fn skip(&mut self) {
        self.advance();
    }

    pub(crate) fn store_node(&mut self, id: NodeId, disposed: &mut Vec<NodeId>) {
        let replaced = self.put(Slot::Node(id), |existing| matches!(existing, Slot::Node(_)));
        if let Some(old) = replaced {
            self.dispose(old, disposed);
        }
    }

    /// Writes `slot` at the cursor, replacing the current slot when
    /// `replaces` accepts it and inserting otherwise.
    fn put(&mut self, slot: Slot, replaces: impl Fn(&Slot) -> bool) -> Option<Slot> {
        let GroupFrame { group, cursor } = self.frame();
        let slots = &mut self.group_mut(group).slots;
        let replaced = match slots.get_mut(cursor) {
            Some(existing) if replaces(existing) => Some(std::mem::replace(existing, slot)),
            _ => {
                slots.insert(cursor, slot);
                None
            }
        };
        self.advance();
        replaced
    }

    /// Stable identity of the next slot: the chain of open group keys plus
    /// the cursor position in the innermost group.
    pub(crate) fn composite_key(&self) -> u64 {
        let path: Vec<Key> = self
            .stack
            .iter()
            .skip(1)
            .map(|frame| self.group(frame.group).key)
            .collect();
        hash::hash_one(&(path, self.frame().cursor))
    }

    pub(crate) fn group_count(&self) -> usize {
        self.groups.iter().filter(|group| group.is_some()).count()
    }
}

#[cfg(test)]
#[path = "tests/slot_table_tests.rs"]
mod tests;
