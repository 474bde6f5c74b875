//! Grid mode operations on the engine
//!
//! Acting on a slot always goes through the regular transitions, using the
//! live item the slot resolves to. The grid snapshot is only touched to mark
//! the acted slot consumed; it is rebuilt on filter changes and nowhere else.

use super::{ActionOutcome, Engine, NoOp, Result};
use crate::grid::{GridSession, GridState, PAGE_SIZE};
use crate::media::{Category, MediaItem};
use crate::store::MediaStore;
use tracing::debug;

impl<S: MediaStore> Engine<S> {
    /// Enter grid mode with a snapshot of the current view
    ///
    /// Does nothing if grid mode is already active.
    pub fn enter_grid(&mut self) {
        if self.grid.is_active() {
            return;
        }
        let session = GridSession::new(&self.view);
        debug!(
            "Entered grid mode: {} item(s) on {} page(s)",
            session.entries().len(),
            session.page_count()
        );
        self.grid = GridState::Active(session);
    }

    /// Leave grid mode, discarding the snapshot
    pub fn exit_grid(&mut self) {
        if self.grid.is_active() {
            debug!("Left grid mode");
        }
        self.grid = GridState::Inactive;
    }

    /// Flip grid mode, returns whether it is now active
    pub fn toggle_grid(&mut self) -> bool {
        if self.grid.is_active() {
            self.exit_grid();
        } else {
            self.enter_grid();
        }
        self.grid.is_active()
    }

    /// Live items behind the nine slots of the current page
    #[must_use]
    pub fn grid_slots(&self) -> Option<[Option<&MediaItem>; PAGE_SIZE]> {
        self.grid.session().map(|session| session.slots(&self.index))
    }

    pub fn grid_next_page(&mut self) {
        if let Some(session) = self.grid.session_mut() {
            session.next_page();
        }
    }

    pub fn grid_prev_page(&mut self) {
        if let Some(session) = self.grid.session_mut() {
            session.prev_page();
        }
    }

    /// Focus a slot (0-8) of the current page
    pub fn grid_target(&mut self, slot: usize) -> bool {
        self.grid
            .session_mut()
            .is_some_and(|session| session.target(slot))
    }

    /// Classify the item in the targeted slot
    ///
    /// On success the slot is consumed and renders empty; no other slot moves.
    ///
    /// # Errors
    ///
    /// Same as [`Engine::classify`].
    pub fn grid_classify(&mut self, target: Category) -> Result<ActionOutcome> {
        let (slot, name) = match self.targeted_item() {
            Ok(found) => found,
            Err(reason) => return Ok(ActionOutcome::NoOp(reason)),
        };
        let outcome = self.classify(&name, target)?;
        self.consume_if_applied(slot, &outcome);
        Ok(outcome)
    }

    /// Move the item in the targeted slot into a bucket
    ///
    /// # Errors
    ///
    /// Same as [`Engine::move_to_sub_bucket`].
    pub fn grid_move_to_sub_bucket(&mut self, n: u8) -> Result<ActionOutcome> {
        let (slot, name) = match self.targeted_item() {
            Ok(found) => found,
            Err(reason) => return Ok(ActionOutcome::NoOp(reason)),
        };
        let outcome = self.move_to_sub_bucket(&name, n)?;
        self.consume_if_applied(slot, &outcome);
        Ok(outcome)
    }

    /// Open the targeted slot in single-item mode
    ///
    /// Leaves grid mode and points the cursor at the slot's item, switching
    /// the category filter first if the item has since moved to another
    /// category. Returns `None` (and stays in grid mode) if the slot is empty.
    pub fn grid_select(&mut self) -> Option<MediaItem> {
        let (_, name) = self.targeted_item().ok()?;
        let item = self.index.get(&name).cloned()?;
        self.exit_grid();
        if !self.filter.matches(&item) {
            self.set_category(item.category());
        }
        if !self.cursor.focus(&self.view, &name) {
            debug!("Selected item {name} is not visible under {}", self.filter);
        }
        Some(item)
    }

    /// Item an action would apply to: the targeted slot in grid mode, the
    /// cursor item otherwise
    #[must_use]
    pub fn focused(&self) -> Option<&MediaItem> {
        match self.grid.session() {
            Some(session) => session
                .targeted()
                .and_then(|slot| session.resolve(slot, &self.index)),
            None => self.current(),
        }
    }

    fn targeted_item(&self) -> std::result::Result<(usize, String), NoOp> {
        let session = self.grid.session().ok_or(NoOp::GridInactive)?;
        let slot = session.targeted().ok_or(NoOp::EmptySlot)?;
        let item = session.resolve(slot, &self.index).ok_or(NoOp::EmptySlot)?;
        Ok((slot, item.name().to_string()))
    }

    fn consume_if_applied(&mut self, slot: usize, outcome: &ActionOutcome) {
        if outcome.is_applied()
            && let Some(session) = self.grid.session_mut()
        {
            session.consume(slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::{ActionOutcome, Engine, NoOp};
    use crate::filter::MediaFilter;
    use crate::grid::PAGE_SIZE;
    use crate::media::{Category, MediaItem};
    use crate::testing::TestTree;

    fn tree_with(count: usize) -> TestTree {
        (0..count).fold(TestTree::new(), |tree, i| {
            tree.with_file(&format!("item{i:02}.mp4"))
        })
    }

    fn slot_names(engine: &Engine) -> Vec<Option<String>> {
        engine
            .grid_slots()
            .unwrap()
            .iter()
            .map(|slot| slot.map(|item| item.name().to_string()))
            .collect()
    }

    #[test]
    fn test_enter_and_exit() {
        let tree = tree_with(3);
        let mut engine = Engine::open(tree.root()).unwrap();
        assert!(engine.grid_slots().is_none());

        assert!(engine.toggle_grid());
        assert_eq!(slot_names(&engine)[2].as_deref(), Some("item02.mp4"));

        assert!(!engine.toggle_grid());
        assert!(engine.grid_slots().is_none());
    }

    #[test]
    fn test_classify_slot_keeps_other_slots() {
        let tree = tree_with(9);
        let mut engine = Engine::open(tree.root()).unwrap();
        engine.enter_grid();
        let before = slot_names(&engine);

        assert!(engine.grid_target(4));
        let outcome = engine.grid_classify(Category::Liked).unwrap();
        assert!(outcome.is_applied());

        let after = slot_names(&engine);
        for slot in 0..PAGE_SIZE {
            if slot == 4 {
                assert_eq!(after[slot], None);
            } else {
                assert_eq!(after[slot], before[slot]);
            }
        }
        assert!(tree.exists("liked/item04.mp4"));
    }

    #[test]
    fn test_bucket_move_in_grid_consumes_slot() {
        let tree = TestTree::new()
            .with_file("liked/a.mp4")
            .with_file("liked/b.mp4");
        let mut engine = Engine::open(tree.root()).unwrap();
        engine.set_category(Category::Liked);
        engine.enter_grid();

        engine.grid_target(0);
        engine.grid_move_to_sub_bucket(2).unwrap();

        let slots = slot_names(&engine);
        assert_eq!(slots[0], None);
        assert_eq!(slots[1].as_deref(), Some("b.mp4"));
        assert!(tree.exists("liked/2/a.mp4"));
    }

    #[test]
    fn test_noop_does_not_consume() {
        let tree = TestTree::new().with_file("liked/a.mp4");
        let mut engine = Engine::open(tree.root()).unwrap();
        engine.set_category(Category::Liked);
        engine.enter_grid();
        engine.grid_target(0);

        let outcome = engine.grid_classify(Category::Liked).unwrap();

        assert_eq!(outcome, ActionOutcome::NoOp(NoOp::AlreadyInCategory));
        assert_eq!(slot_names(&engine)[0].as_deref(), Some("a.mp4"));
    }

    #[test]
    fn test_empty_slot_and_inactive_grid() {
        let tree = tree_with(2);
        let mut engine = Engine::open(tree.root()).unwrap();

        let outcome = engine.grid_classify(Category::Liked).unwrap();
        assert_eq!(outcome, ActionOutcome::NoOp(NoOp::GridInactive));

        engine.enter_grid();
        let outcome = engine.grid_classify(Category::Liked).unwrap();
        assert_eq!(outcome, ActionOutcome::NoOp(NoOp::EmptySlot));

        engine.grid_target(7);
        let outcome = engine.grid_classify(Category::Liked).unwrap();
        assert_eq!(outcome, ActionOutcome::NoOp(NoOp::EmptySlot));
    }

    #[test]
    fn test_slot_resolves_live_item() {
        let tree = TestTree::new()
            .with_file("liked/a.mp4")
            .with_file("liked/b.mp4");
        let mut engine = Engine::open(tree.root()).unwrap();
        engine.set_category(Category::Liked);
        engine.enter_grid();

        // moved outside the grid, the slot still shows the item at its new place
        engine.move_to_sub_bucket("b.mp4", 5).unwrap();

        let slots = engine.grid_slots().unwrap();
        let b = slots[1].unwrap();
        assert_eq!(b.dir(), tree.root().join("liked").join("5"));
    }

    #[test]
    fn test_filter_change_rebuilds_snapshot() {
        let tree = tree_with(3).with_file("photo.png");
        let mut engine = Engine::open(tree.root()).unwrap();
        engine.enter_grid();
        engine.grid_target(0);
        engine.grid_classify(Category::Super).unwrap();

        engine.set_media_filter(MediaFilter::Image);

        let slots = slot_names(&engine);
        assert_eq!(slots[0].as_deref(), Some("photo.png"));
        assert!(slots[1..].iter().all(Option::is_none));
    }

    #[test]
    fn test_select_exits_and_focuses() {
        let tree = tree_with(5);
        let mut engine = Engine::open(tree.root()).unwrap();
        engine.enter_grid();
        engine.grid_target(3);

        let selected = engine.grid_select().unwrap();

        assert_eq!(selected.name(), "item03.mp4");
        assert!(!engine.grid().is_active());
        assert_eq!(engine.current().map(MediaItem::name), Some("item03.mp4"));
    }

    #[test]
    fn test_select_empty_slot_stays_in_grid() {
        let tree = tree_with(2);
        let mut engine = Engine::open(tree.root()).unwrap();
        engine.enter_grid();
        engine.grid_target(8);

        assert!(engine.grid_select().is_none());
        assert!(engine.grid().is_active());
    }

    #[test]
    fn test_undo_in_grid_restores_slot() {
        let tree = tree_with(4);
        let mut engine = Engine::open(tree.root()).unwrap();
        engine.enter_grid();
        engine.grid_target(2);
        engine.grid_classify(Category::Disliked).unwrap();
        assert_eq!(slot_names(&engine)[2], None);

        engine.undo().unwrap();

        assert_eq!(slot_names(&engine)[2].as_deref(), Some("item02.mp4"));
        assert!(tree.exists("item02.mp4"));
    }

    #[test]
    fn test_select_item_moved_elsewhere_follows_it() {
        let tree = tree_with(3);
        let mut engine = Engine::open(tree.root()).unwrap();
        engine.enter_grid();
        engine.classify("item01.mp4", Category::Super).unwrap();
        engine.grid_target(1);

        let selected = engine.grid_select().unwrap();

        assert_eq!(selected.category(), Category::Super);
        assert!(!engine.grid().is_active());
        assert_eq!(engine.filter().category, Category::Super);
        assert_eq!(engine.current().map(MediaItem::name), Some("item01.mp4"));
    }

    #[test]
    fn test_undo_of_action_before_grid_shows_item() {
        let tree = tree_with(2);
        let mut engine = Engine::open(tree.root()).unwrap();
        engine.classify("item00.mp4", Category::Liked).unwrap();
        engine.enter_grid();
        assert_eq!(slot_names(&engine)[0].as_deref(), Some("item01.mp4"));

        engine.undo().unwrap();

        let slots = slot_names(&engine);
        assert_eq!(slots[0].as_deref(), Some("item00.mp4"));
        assert_eq!(slots[1].as_deref(), Some("item01.mp4"));
    }

    #[test]
    fn test_undo_to_other_category_rebuilds_grid() {
        let tree = tree_with(2).with_file("liked/z.mp4");
        let mut engine = Engine::open(tree.root()).unwrap();
        engine.classify("z.mp4", Category::Unsorted).unwrap();
        engine.enter_grid();
        assert_eq!(engine.grid().session().unwrap().entries().len(), 3);

        engine.undo().unwrap();

        assert_eq!(engine.filter().category, Category::Liked);
        assert_eq!(slot_names(&engine)[0].as_deref(), Some("z.mp4"));
    }

    #[test]
    fn test_focused_follows_mode() {
        let tree = tree_with(3);
        let mut engine = Engine::open(tree.root()).unwrap();
        assert_eq!(engine.focused().map(MediaItem::name), Some("item00.mp4"));

        engine.enter_grid();
        assert!(engine.focused().is_none());

        engine.grid_target(1);
        assert_eq!(engine.focused().map(MediaItem::name), Some("item01.mp4"));
    }

    #[test]
    fn test_paging_through_engine() {
        let tree = tree_with(10);
        let mut engine = Engine::open(tree.root()).unwrap();
        engine.enter_grid();

        engine.grid_next_page();
        assert_eq!(slot_names(&engine)[0].as_deref(), Some("item09.mp4"));

        engine.grid_next_page();
        assert_eq!(slot_names(&engine)[0].as_deref(), Some("item00.mp4"));

        engine.grid_prev_page();
        assert_eq!(engine.grid().session().unwrap().page(), 1);
    }
}
