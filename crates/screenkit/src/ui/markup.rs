//! Window markup loader
//!
//! A window document has a `<Window>` root. Its children are:
//! - `<Visual>`: visuals attached to the window itself
//! - `<Templates>`: `<Template Name="...">` blocks of reusable visuals
//! - anything else: a control whose tag is a control registry key
//!
//! Inside a `<Visual>` container or a `<Template>`, each child element's tag
//! is a visual registry key.

use std::path::Path;

use roxmltree::{Document, Node};

use crate::config::GuiConfig;
use crate::foundation::math::Point;
use crate::ui::attributes::Attributes;
use crate::ui::controls::{Control, ControlRegistry};
use crate::ui::layout::{HorizontalAlignment, VerticalAlignment};
use crate::ui::visuals::{Visibility, Visual, VisualRegistry};
use crate::ui::window::Window;
use crate::ui::GuiError;

const VISUAL_CONTAINER: &str = "Visual";
const TEMPLATES_CONTAINER: &str = "Templates";
const TEMPLATE: &str = "Template";
const ROOT: &str = "Window";

/// Builds a [`Window`] from markup using the registries
#[derive(Debug, Clone, Copy)]
pub struct MarkupLoader<'a> {
    controls: &'a ControlRegistry,
    visuals: &'a VisualRegistry,
    config: &'a GuiConfig,
}

impl<'a> MarkupLoader<'a> {
    /// Loader over the given registries and configuration
    pub fn new(controls: &'a ControlRegistry, visuals: &'a VisualRegistry, config: &'a GuiConfig) -> Self {
        Self {
            controls,
            visuals,
            config,
        }
    }

    /// Read and build a window from a markup file
    pub fn load_file(&self, path: &Path, screen_size: Point) -> Result<Window, GuiError> {
        let text = std::fs::read_to_string(path).map_err(|source| GuiError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let window = self.load_str(&text, screen_size)?;
        log::info!(
            "Loaded window {} ({} controls, playlist {:?})",
            path.display(),
            window.control_ids().len(),
            window.playlist()
        );
        Ok(window)
    }

    /// Build a window from markup text
    pub fn load_str(&self, text: &str, screen_size: Point) -> Result<Window, GuiError> {
        let document = Document::parse(text)?;
        let root = document.root_element();
        if !root.tag_name().name().eq_ignore_ascii_case(ROOT) {
            return Err(GuiError::InvalidRoot(root.tag_name().name().to_string()));
        }

        let mut window = Window::new(screen_size, self.config.probe_size);
        let attrs = Attributes::from_node(root);
        window.set_playlist(parse_playlist(attrs.get("MUSIC").unwrap_or_default()));

        let root_id = window.root();
        let tree = window.tree_mut();
        tree[root_id].apply_attributes(&attrs, screen_size, screen_size)?;
        tree[root_id].process_attributes(&attrs, self.config)?;
        tree.recalculate_bounds(root_id);
        let window_size = tree[root_id].core().size();

        for visual in self.build_visuals(first_child(root, VISUAL_CONTAINER), window_size)? {
            window.add_root_visual(visual);
        }

        for node in root.children().filter(Node::is_element) {
            let tag = node.tag_name().name();
            if tag.eq_ignore_ascii_case(VISUAL_CONTAINER) || tag.eq_ignore_ascii_case(TEMPLATES_CONTAINER) {
                continue;
            }
            let (control, visuals) = self.build_control(&document, node, window_size)?;
            window.add_control(control, visuals)?;
        }

        Ok(window)
    }

    fn build_control(
        &self,
        document: &Document<'_>,
        node: Node<'_, '_>,
        window_size: Point,
    ) -> Result<(Control, Vec<Visual>), GuiError> {
        let kind = self.controls.create(node.tag_name().name())?;
        let mut control = Control::new("", kind);
        let attrs = Attributes::from_node(node);

        control.apply_attributes(&attrs, window_size, Point::zeros())?;
        let mut visuals = control.process_attributes(&attrs, self.config)?;
        let owner_size = control.core().size();

        if let Some(template) = attrs.get(TEMPLATE) {
            let Some(template_node) = find_template(document, template) else {
                log::error!("Control '{}' references unknown template '{template}'", control.name());
                return Err(GuiError::UnknownTemplate {
                    control: control.name().to_string(),
                    template: template.to_string(),
                });
            };
            visuals.extend(self.build_visuals(Some(template_node), owner_size)?);
        }

        visuals.extend(self.build_visuals(first_child(node, VISUAL_CONTAINER), owner_size)?);
        Ok((control, visuals))
    }

    fn build_visuals(&self, container: Option<Node<'_, '_>>, owner_size: Point) -> Result<Vec<Visual>, GuiError> {
        let Some(container) = container else {
            return Ok(Vec::new());
        };
        container
            .children()
            .filter(Node::is_element)
            .map(|node| self.build_visual(node, owner_size))
            .collect()
    }

    fn build_visual(&self, node: Node<'_, '_>, owner_size: Point) -> Result<Visual, GuiError> {
        let kind = self.visuals.create(node.tag_name().name())?;
        let attrs = Attributes::from_node(node);

        let location = attrs.point("Location", owner_size)?.unwrap_or_else(Point::zeros);
        let size = attrs.point("Size", owner_size)?.unwrap_or(owner_size);
        let mut visual = Visual::new(kind)
            .with_name(attrs.get("Name").unwrap_or_default())
            .with_rect(location, size)
            .with_alignment(
                attrs.parse_or("Align", HorizontalAlignment::None)?,
                attrs.parse_or("VAlign", VerticalAlignment::None)?,
            )
            .with_visibility(attrs.parse_or("Visibility", Visibility::EnabledDisabled)?);
        visual.process_attributes(&attrs, self.config)?;
        Ok(visual)
    }
}

fn first_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name().eq_ignore_ascii_case(tag))
}

fn find_template<'a, 'input>(document: &'a Document<'input>, name: &str) -> Option<Node<'a, 'input>> {
    document.descendants().find(|node| {
        node.is_element()
            && node.tag_name().name().eq_ignore_ascii_case(TEMPLATE)
            && node.attribute("Name") == Some(name)
    })
}

/// Split a `MUSIC` attribute into track names
pub fn parse_playlist(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|track| !track.is_empty())
        .map(str::to_string)
        .collect()
}
