//! Control and visual arena
//!
//! Controls and visuals live in slotmaps and refer to each other by key:
//! a control lists its children and visuals, a visual stores its owner.
//! Parent links never own anything, so removing a subtree is an explicit
//! walk rather than a drop cascade.

use std::ops::{Index, IndexMut};

use slotmap::SlotMap;

use crate::foundation::math::{Point, Rect};
use crate::input::InputSnapshot;
use crate::ui::controls::Control;
use crate::ui::visuals::{OwnerView, Visual};

slotmap::new_key_type! {
    /// Key of a control in a [`GuiTree`]
    pub struct ControlId;

    /// Key of a visual in a [`GuiTree`]
    pub struct VisualId;
}

/// Arena owning every control and visual of one window
#[derive(Debug, Default)]
pub struct GuiTree {
    controls: SlotMap<ControlId, Control>,
    visuals: SlotMap<VisualId, Visual>,
}

impl GuiTree {
    /// Empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a control under `parent` and compute its bounds
    pub fn insert_control(&mut self, mut control: Control, parent: Option<ControlId>) -> ControlId {
        let parent = parent.filter(|parent| self.controls.contains_key(*parent));
        control.core_mut().parent = parent;
        let id = self.controls.insert(control);
        if let Some(parent) = parent {
            self.controls[parent].core_mut().children.push(id);
        }
        self.recalculate_bounds(id);
        id
    }

    /// Remove a control, its visuals and its descendants
    pub fn remove_control(&mut self, id: ControlId) -> Option<Control> {
        let mut control = self.controls.remove(id)?;
        if let Some(parent) = control.core().parent {
            if let Some(parent) = self.controls.get_mut(parent) {
                parent.core_mut().children.retain(|child| *child != id);
            }
        }
        for visual in control.core_mut().visuals.drain(..) {
            self.visuals.remove(visual);
        }
        control.core_mut().named_visuals.clear();
        let children = std::mem::take(&mut control.core_mut().children);
        for child in children {
            self.remove_control(child);
        }
        control.core_mut().parent = None;
        Some(control)
    }

    /// Attach a visual to `owner`, after any it already has
    ///
    /// A named visual is registered for lookup unless the name is taken.
    pub fn attach_visual(&mut self, owner: ControlId, mut visual: Visual) -> Option<VisualId> {
        if !self.controls.contains_key(owner) {
            return None;
        }
        visual.owner = owner;
        let name = visual.name().to_string();
        let id = self.visuals.insert(visual);

        let core = self.controls[owner].core_mut();
        core.visuals.push(id);
        if !name.is_empty() {
            core.named_visuals.entry(name).or_insert(id);
        }
        Some(id)
    }

    /// Control by key
    pub fn control(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(id)
    }

    /// Mutable control by key
    pub fn control_mut(&mut self, id: ControlId) -> Option<&mut Control> {
        self.controls.get_mut(id)
    }

    /// Visual by key
    pub fn visual(&self, id: VisualId) -> Option<&Visual> {
        self.visuals.get(id)
    }

    /// Mutable visual by key
    pub fn visual_mut(&mut self, id: VisualId) -> Option<&mut Visual> {
        self.visuals.get_mut(id)
    }

    /// Number of live controls
    pub fn control_count(&self) -> usize {
        self.controls.len()
    }

    /// Number of live visuals
    pub fn visual_count(&self) -> usize {
        self.visuals.len()
    }

    /// Absolute location: parent's absolute location plus the local one
    pub fn absolute_location(&self, id: ControlId) -> Point {
        let mut location = Point::zeros();
        let mut current = Some(id);
        while let Some(control) = current.and_then(|id| self.controls.get(id)) {
            let offset = control.core().location;
            location = Point::new(location.x.saturating_add(offset.x), location.y.saturating_add(offset.y));
            current = control.core().parent;
        }
        location
    }

    /// Move a control, updating bounds of the whole subtree
    pub fn set_location(&mut self, id: ControlId, location: Point) {
        let Some(control) = self.controls.get_mut(id) else {
            return;
        };
        if control.core().location == location {
            return;
        }
        control.core_mut().location = location;
        self.recalculate_bounds(id);
    }

    /// Resize a control, updating bounds of the whole subtree
    pub fn set_size(&mut self, id: ControlId, size: Point) {
        let Some(control) = self.controls.get_mut(id) else {
            return;
        };
        if control.core().size == size {
            return;
        }
        control.core_mut().size = size;
        self.recalculate_bounds(id);
    }

    /// Recompute bounds and touch bounds for a control and its descendants
    pub fn recalculate_bounds(&mut self, id: ControlId) {
        let location = self.absolute_location(id);
        let Some(control) = self.controls.get_mut(id) else {
            return;
        };
        let core = control.core_mut();
        core.bounds = Rect::from_location_size(location, core.size);
        core.touch_bounds = core.bounds;

        let children = core.children.clone();
        for child in children {
            self.recalculate_bounds(child);
        }
    }

    /// Effective enabled flag: own flag AND every ancestor's
    pub fn is_enabled(&self, id: ControlId) -> bool {
        self.all_ancestors(id, |control| control.core().enabled)
    }

    /// Effective visible flag: own flag AND every ancestor's
    pub fn is_visible(&self, id: ControlId) -> bool {
        self.all_ancestors(id, |control| control.core().visible)
    }

    fn all_ancestors(&self, id: ControlId, flag: impl Fn(&Control) -> bool) -> bool {
        let mut current = Some(id);
        let mut seen = false;
        while let Some(control) = current.and_then(|id| self.controls.get(id)) {
            if !flag(control) {
                return false;
            }
            seen = true;
            current = control.core().parent;
        }
        seen
    }

    /// Set the focus flag on one control; returns whether it changed
    pub fn set_focus(&mut self, id: ControlId, focused: bool) -> bool {
        self.controls
            .get_mut(id)
            .is_some_and(|control| control.set_focus(focused))
    }

    /// Snapshot of a control for its visuals
    pub fn owner_view(&self, id: ControlId) -> Option<OwnerView> {
        let control = self.controls.get(id)?;
        let core = control.core();
        Some(OwnerView {
            location: core.bounds.location(),
            size: core.size,
            bounds: core.bounds,
            enabled: self.is_enabled(id),
            visible: self.is_visible(id),
            text: control.display_text(),
            value: core.value,
            checked: control.checked(),
            progress: control.progress(),
        })
    }

    /// Route input to one control
    pub fn handle_input(&mut self, id: ControlId, input: &InputSnapshot) {
        if let Some(control) = self.controls.get_mut(id) {
            control.handle_input(input);
        }
    }

    /// Run a control's left click reaction
    pub fn on_left_click(&mut self, id: ControlId) {
        if let Some(control) = self.controls.get_mut(id) {
            control.on_left_click();
        }
    }

    /// Run a control's right click reaction
    pub fn on_right_click(&mut self, id: ControlId) {
        if let Some(control) = self.controls.get_mut(id) {
            control.on_right_click();
        }
    }

    /// Update one control; visuals are updated by the render engine
    pub fn update(&mut self, id: ControlId, elapsed_seconds: f32) {
        if let Some(control) = self.controls.get_mut(id) {
            control.update(elapsed_seconds);
        }
    }
}

impl Index<ControlId> for GuiTree {
    type Output = Control;

    fn index(&self, id: ControlId) -> &Control {
        &self.controls[id]
    }
}

impl IndexMut<ControlId> for GuiTree {
    fn index_mut(&mut self, id: ControlId) -> &mut Control {
        &mut self.controls[id]
    }
}

impl Index<VisualId> for GuiTree {
    type Output = Visual;

    fn index(&self, id: VisualId) -> &Visual {
        &self.visuals[id]
    }
}

impl IndexMut<VisualId> for GuiTree {
    fn index_mut(&mut self, id: VisualId) -> &mut Visual {
        &mut self.visuals[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::controls::ControlKind;
    use crate::ui::visuals::{BarVisual, VisualKind};

    fn button(name: &str, x: i32, y: i32) -> Control {
        Control::new(name, ControlKind::Button).with_rect(Point::new(x, y), Point::new(50, 20))
    }

    #[test]
    fn test_bounds_follow_parent_chain() {
        let mut tree = GuiTree::new();
        let root = tree.insert_control(button("Root", 100, 100), None);
        let child = tree.insert_control(button("Child", 10, 5), Some(root));
        let grandchild = tree.insert_control(button("Grandchild", 1, 1), Some(child));

        assert_eq!(tree[grandchild].bounds(), Rect::new(111, 106, 50, 20));

        tree.set_location(root, Point::new(0, 0));
        assert_eq!(tree[child].bounds().location(), Point::new(10, 5));
        assert_eq!(tree[grandchild].touch_bounds().location(), Point::new(11, 6));
    }

    #[test]
    fn test_enabled_is_inherited() {
        let mut tree = GuiTree::new();
        let a = tree.insert_control(button("A", 0, 0), None);
        let b = tree.insert_control(button("B", 0, 0), Some(a));
        let c = tree.insert_control(button("C", 0, 0), Some(b));

        tree[b].core_mut().set_enabled(false);
        assert!(tree.is_enabled(a));
        assert!(!tree.is_enabled(b));
        assert!(!tree.is_enabled(c));
        assert!(tree[c].core().own_enabled());

        tree[b].core_mut().set_enabled(true);
        assert!(tree.is_enabled(c));

        tree[a].core_mut().set_enabled(false);
        assert!(!tree.is_enabled(a));
        assert!(!tree.is_enabled(b));
        assert!(!tree.is_enabled(c));
        assert!(tree[b].core().own_enabled());
        assert!(tree[c].core().own_enabled());

        tree[c].core_mut().set_enabled(false);
        tree[a].core_mut().set_enabled(true);
        assert!(tree.is_enabled(a));
        assert!(tree.is_enabled(b));
        assert!(!tree.is_enabled(c));
    }

    #[test]
    fn test_remove_control_drops_subtree_and_visuals() {
        let mut tree = GuiTree::new();
        let root = tree.insert_control(button("Root", 0, 0), None);
        let child = tree.insert_control(button("Child", 0, 0), Some(root));
        tree.insert_control(button("Leaf", 0, 0), Some(child));
        tree.attach_visual(child, Visual::new(VisualKind::Bar(BarVisual::default())));

        tree.remove_control(child);
        assert_eq!(tree.control_count(), 1);
        assert_eq!(tree.visual_count(), 0);
        assert!(tree[root].core().children().is_empty());
    }

    #[test]
    fn test_named_visual_first_wins() {
        let mut tree = GuiTree::new();
        let id = tree.insert_control(button("Root", 0, 0), None);
        let first = tree
            .attach_visual(id, Visual::new(VisualKind::Bar(BarVisual::default())).with_name("Fill"))
            .unwrap();
        tree.attach_visual(id, Visual::new(VisualKind::Bar(BarVisual::default())).with_name("Fill"));

        assert_eq!(tree[id].core().named_visual("Fill"), Some(first));
        assert_eq!(tree[first].owner(), id);
        assert_eq!(tree[id].core().visuals().len(), 2);
    }

    #[test]
    fn test_owner_view_reports_effective_flags() {
        let mut tree = GuiTree::new();
        let root = tree.insert_control(button("Root", 10, 10), None);
        let child = tree.insert_control(button("Child", 5, 5), Some(root));
        tree[root].core_mut().set_visible(false);

        let view = tree.owner_view(child).unwrap();
        assert_eq!(view.location, Point::new(15, 15));
        assert!(view.enabled);
        assert!(!view.visible);
        assert_eq!(view.checked, None);
    }
}
