//! Per-screen render engine
//!
//! Holds the screen's visuals in registration order and draws them inside one
//! immediate-mode batch, switching the clip rectangle per visual.

use crate::ui::content::ContentProvider;
use crate::ui::rendering::{BatchMode, DrawContext};
use crate::ui::{GuiError, GuiTree, VisualId};

/// Ordered list of registered visuals
#[derive(Debug, Default)]
pub struct RenderEngine {
    visuals: Vec<VisualId>,
}

impl RenderEngine {
    /// Create an empty engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a visual to the draw order
    pub fn register(&mut self, visual: VisualId) {
        self.visuals.push(visual);
    }

    /// Drop a visual from the draw order
    pub fn unregister(&mut self, visual: VisualId) {
        self.visuals.retain(|id| *id != visual);
    }

    /// Drop every visual
    pub fn clear(&mut self) {
        self.visuals.clear();
    }

    /// Registered visuals in draw order
    pub fn visuals(&self) -> &[VisualId] {
        &self.visuals
    }

    /// Number of registered visuals
    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }

    /// Resolve content for every registered visual
    pub fn load(&self, tree: &mut GuiTree, content: &dyn ContentProvider) -> Result<(), GuiError> {
        for id in &self.visuals {
            if let Some(visual) = tree.visual_mut(*id) {
                visual.load(content)?;
            }
        }
        log::debug!("Loaded {} visuals", self.visuals.len());
        Ok(())
    }

    /// Release content held by every registered visual
    pub fn unload(&self, tree: &mut GuiTree) {
        for id in &self.visuals {
            if let Some(visual) = tree.visual_mut(*id) {
                visual.unload();
            }
        }
    }

    /// Per-frame visual update
    pub fn update(&self, tree: &mut GuiTree, elapsed_seconds: f32) {
        for id in &self.visuals {
            if let Some(visual) = tree.visual_mut(*id) {
                visual.update(elapsed_seconds);
            }
        }
    }

    /// Draw every visible visual
    ///
    /// Visuals of invisible owners are skipped, then the visibility predicate
    /// is checked against the owner's effective enabled flag and checked state.
    /// Text visuals that allow parent resize grow their owner before placement.
    pub fn draw(&self, tree: &mut GuiTree, ctx: &mut DrawContext<'_>) -> Result<(), GuiError> {
        ctx.backend.begin_batch(BatchMode::Immediate)?;
        let saved_clip = ctx.backend.clip_rect();

        let result = self.draw_visuals(tree, ctx);

        ctx.backend.set_clip_rect(saved_clip);
        let ended = ctx.backend.end_batch();
        result?;
        Ok(ended?)
    }

    fn draw_visuals(&self, tree: &mut GuiTree, ctx: &mut DrawContext<'_>) -> Result<(), GuiError> {
        for id in &self.visuals {
            let Some(owner_id) = tree.visual(*id).map(|visual| visual.owner()) else {
                continue;
            };
            let Some(mut owner) = tree.owner_view(owner_id) else {
                continue;
            };
            if !owner.visible {
                continue;
            }

            let Some(visual) = tree.visual(*id) else {
                continue;
            };
            if !visual.visibility.should_draw(owner.enabled, owner.is_checked()) {
                continue;
            }

            if let Some(size) = visual.owner_growth(&owner, ctx.content) {
                tree.set_size(owner_id, size);
                match tree.owner_view(owner_id) {
                    Some(view) => owner = view,
                    None => continue,
                }
            }

            let Some(visual) = tree.visual(*id) else {
                continue;
            };
            let placement = visual.resolve(&owner, ctx.content);
            ctx.backend.set_clip_rect(visual.clip_rect(&owner, &placement));
            visual.draw(placement.rect(), &owner, ctx)?;
        }
        Ok(())
    }
}
