//! Building windows from markup

use std::path::Path;

use super::{load, load_menu, screen_size};
use crate::config::GuiConfig;
use crate::foundation::math::Point;
use crate::ui::controls::{ControlKind, ControlRegistry};
use crate::ui::layout::{HorizontalAlignment, VerticalAlignment};
use crate::ui::markup::MarkupLoader;
use crate::ui::visuals::{Visibility, VisualKind, VisualRegistry};
use crate::ui::GuiError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_structure() {
        let window = load_menu();

        assert_eq!(window.playlist(), ["Theme", "Menu"]);
        let names: Vec<_> = window.controls().map(|c| c.name().to_string()).collect();
        assert_eq!(names, vec!["Play", "Quit", "Sound", "Player"]);

        let root = &window.tree()[window.root()];
        assert_eq!(root.core().size(), screen_size());
        assert_eq!(root.core().visuals().len(), 1);
    }

    #[test]
    fn test_template_visuals_are_spliced() {
        let window = load_menu();
        let play = window.control("Play").unwrap();
        assert_eq!(play.text(), "Play");
        assert_eq!(play.bounds().location(), Point::new(100, 100));

        let visuals: Vec<_> = play.core().visuals().iter().map(|id| &window.tree()[*id]).collect();
        assert_eq!(visuals.len(), 3);
        assert_eq!(visuals[0].visibility, Visibility::Enabled);
        assert_eq!(visuals[1].visibility, Visibility::Disabled);
        assert_eq!(visuals[2].key(), "TEXT");
        assert_eq!(visuals[2].layout.h_align, HorizontalAlignment::Center);
        assert_eq!(visuals[2].layout.v_align, VerticalAlignment::Middle);
        // Unsized visuals take the owner's size
        assert_eq!(visuals[0].layout.size, Point::new(200, 40));
    }

    #[test]
    fn test_variant_visuals_come_first() {
        let window = load_menu();
        let player = window.control("Player").unwrap();
        assert!(matches!(player.kind(), ControlKind::Input(_)));

        let keys: Vec<_> = player.core().visuals().iter().map(|id| window.tree()[*id].key()).collect();
        assert_eq!(keys, vec!["IMAGE", "TEXT"]);
        assert!(window.control("Sound").unwrap().checked() == Some(false));
    }

    #[test]
    fn test_percent_geometry_and_attributes() {
        let window = load(
            r#"<Window>
                <Button Name="Centre" Location="50%,50%" Size="10%,5%" Value="2.5" Enabled="false" Tag="main">
                    <Visual><Circle Location="50%,0" OuterRadius="8" /></Visual>
                </Button>
            </Window>"#,
        )
        .unwrap();

        let centre = window.control("Centre").unwrap();
        assert_eq!(centre.core().location(), Point::new(400, 300));
        assert_eq!(centre.core().size(), Point::new(80, 30));
        assert!((centre.core().value - 2.5).abs() < f32::EPSILON);
        assert!(!centre.core().own_enabled());
        assert_eq!(centre.core().tag, "main");

        let circle = &window.tree()[centre.core().visuals()[0]];
        assert_eq!(circle.layout.location, Point::new(40, 0));
        assert!(matches!(circle.kind(), VisualKind::Circle(_)));
    }

    #[test]
    fn test_unnamed_control_gets_index_name() {
        let window = load(
            r#"<Window>
                <Button Name="First"><Visual><Image Src="Box" /></Visual></Button>
                <Button><Visual><Image Src="Box" /></Visual></Button>
            </Window>"#,
        )
        .unwrap();
        assert!(window.control("1").is_some());
    }

    #[test]
    fn test_control_without_visuals_fails() {
        let result = load(r#"<Window><Button Name="Empty" /></Window>"#);
        assert!(matches!(result, Err(GuiError::NoVisuals(ref name)) if name == "Empty"));
    }

    #[test]
    fn test_unknown_template_fails() {
        let result = load(
            r#"<Window>
                <Templates><Template Name="Known"><Image Src="Box" /></Template></Templates>
                <Button Name="Play" Template="Unknown" />
            </Window>"#,
        );
        match result {
            Err(GuiError::UnknownTemplate { control, template }) => {
                assert_eq!(control, "Play");
                assert_eq!(template, "Unknown");
            }
            other => panic!("expected unknown template, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_keys_fail() {
        assert!(matches!(
            load(r#"<Window><Slider Name="S" /></Window>"#),
            Err(GuiError::UnknownControl(_))
        ));
        assert!(matches!(
            load(r#"<Window><Button Name="B"><Visual><Sparkle /></Visual></Button></Window>"#),
            Err(GuiError::UnknownVisual(_))
        ));
    }

    #[test]
    fn test_structural_errors() {
        assert!(matches!(load("<Screen />"), Err(GuiError::InvalidRoot(ref tag)) if tag == "Screen"));
        assert!(matches!(load("<Window>"), Err(GuiError::Xml(_))));
        assert!(matches!(
            load(r#"<Window><Button Name="A"><Visual><Text Font="Menu" /></Visual></Button></Window>"#),
            Err(GuiError::MissingAttribute { .. })
        ));
        assert!(matches!(
            load(r#"<Window><Button Name="A" Visible="sometimes"><Visual><Image /></Visual></Button></Window>"#),
            Err(GuiError::InvalidAttribute { .. })
        ));
        assert!(matches!(
            load(r#"<Window><Button Name="A" Location="1e10,0"><Visual><Image /></Visual></Button></Window>"#),
            Err(GuiError::InvalidAttribute { ref attribute, .. }) if attribute == "Location"
        ));
    }

    #[test]
    fn test_duplicate_names_fail() {
        let result = load(
            r#"<Window>
                <Button Name="Twin"><Visual><Image Src="Box" /></Visual></Button>
                <Button Name="Twin"><Visual><Image Src="Box" /></Visual></Button>
            </Window>"#,
        );
        assert!(matches!(result, Err(GuiError::DuplicateControl(_))));
    }

    #[test]
    fn test_custom_control_key() {
        let config = GuiConfig::default();
        let mut controls = ControlRegistry::with_builtins();
        controls.register("Panel", || ControlKind::Button);
        let visuals = VisualRegistry::with_builtins();

        let window = MarkupLoader::new(&controls, &visuals, &config)
            .load_str(
                r#"<Window><Panel Name="P"><Visual><Bar /></Visual></Panel></Window>"#,
                screen_size(),
            )
            .unwrap();
        assert!(window.control("P").is_some());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let config = GuiConfig::default();
        let controls = ControlRegistry::with_builtins();
        let visuals = VisualRegistry::with_builtins();
        let path = Path::new("does/not/exist.GUI");

        match MarkupLoader::new(&controls, &visuals, &config).load_file(path, screen_size()) {
            Err(GuiError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
