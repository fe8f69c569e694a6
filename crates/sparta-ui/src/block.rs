//! Application-wide input blocking for modal interaction.
//!
//! While a blocker is set, key and mouse events only reach the blocker and
//! its descendants. Only the blocker or one of its descendants may lift the
//! block.

use crate::widget::WidgetId;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BlockState {
    blocker: Option<WidgetId>,
}

impl BlockState {
    /// Sets `widget` as the blocker. Does nothing if a block is active.
    pub fn block(&mut self, widget: WidgetId) -> bool {
        if self.blocker.is_some() {
            return false;
        }
        self.blocker = Some(widget);
        true
    }

    pub fn is_block(&self) -> bool {
        self.blocker.is_some()
    }

    pub fn blocker(&self) -> Option<WidgetId> {
        self.blocker
    }

    /// Whether `widget` is the blocker or one of its descendants.
    /// `parent_of` walks the tree.
    pub fn is_blocker(
        &self,
        widget: WidgetId,
        parent_of: impl Fn(WidgetId) -> Option<WidgetId>,
    ) -> bool {
        let Some(blocker) = self.blocker else {
            return false;
        };
        let mut current = Some(widget);
        while let Some(w) = current {
            if w == blocker {
                return true;
            }
            current = parent_of(w);
        }
        false
    }

    /// Lifts the block if `requester` is the blocker or a descendant of it.
    pub fn unblock(
        &mut self,
        requester: WidgetId,
        parent_of: impl Fn(WidgetId) -> Option<WidgetId>,
    ) -> bool {
        if self.is_blocker(requester, parent_of) {
            self.blocker = None;
            return true;
        }
        false
    }

    /// Drops the block unconditionally, used when the blocker is destroyed.
    pub(crate) fn release(&mut self, widget: WidgetId) {
        if self.blocker == Some(widget) {
            self.blocker = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparta_core::alloc::SparseSet;

    /// root -> dialog -> ok, root -> other
    fn tree() -> (SparseSet<Option<WidgetId>>, [WidgetId; 4]) {
        let mut set = SparseSet::new();
        let root = WidgetId(set.push(None));
        let dialog = WidgetId(set.push(Some(root)));
        let ok = WidgetId(set.push(Some(dialog)));
        let other = WidgetId(set.push(Some(root)));
        (set, [root, dialog, ok, other])
    }

    #[test]
    fn test_block_is_idempotent() {
        let (_, [root, dialog, ..]) = tree();
        let mut state = BlockState::default();
        assert!(state.block(dialog));
        assert!(!state.block(root));
        assert_eq!(state.blocker(), Some(dialog));
    }

    #[test]
    fn test_descendants_are_blockers() {
        let (set, [root, dialog, ok, other]) = tree();
        let parent_of = |w: WidgetId| *set.get(w.0);
        let mut state = BlockState::default();
        state.block(dialog);

        assert!(state.is_blocker(dialog, parent_of));
        assert!(state.is_blocker(ok, parent_of));
        assert!(!state.is_blocker(root, parent_of));
        assert!(!state.is_blocker(other, parent_of));
    }

    #[test]
    fn test_unblock_requires_blocker_lineage() {
        let (set, [_, dialog, ok, other]) = tree();
        let parent_of = |w: WidgetId| *set.get(w.0);
        let mut state = BlockState::default();
        state.block(dialog);

        assert!(!state.unblock(other, parent_of));
        assert!(state.is_block());
        assert!(state.unblock(ok, parent_of));
        assert!(!state.is_block());
    }
}
