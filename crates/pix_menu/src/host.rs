use pix_font::{Rectangle, TextMeasure};

use crate::{LayoutOutcome, MenuBar, MenuLayoutEngine};

/// Owns the menu bar of an application and lays it out once per tick.
#[derive(Debug, Default)]
pub struct MenuHost {
    bar: Option<MenuBar>,
    engine: MenuLayoutEngine,
}

impl MenuHost {
    pub fn new(engine: MenuLayoutEngine) -> Self {
        Self { bar: None, engine }
    }

    /// Installs `bar`, returning the one it replaces.
    pub fn install(&mut self, bar: MenuBar) -> Option<MenuBar> {
        log::debug!("installing menu bar {}", bar.root.id);
        self.bar.replace(bar)
    }

    /// Takes the bar out, its dropdown background goes with it.
    pub fn remove(&mut self) -> Option<MenuBar> {
        self.bar.take()
    }

    pub fn bar(&self) -> Option<&MenuBar> {
        self.bar.as_ref()
    }

    pub fn bar_mut(&mut self) -> Option<&mut MenuBar> {
        self.bar.as_mut()
    }

    pub fn engine(&self) -> &MenuLayoutEngine {
        &self.engine
    }

    /// Call every tick; repeat while it returns `Incomplete`.
    pub fn layout(&mut self, viewport: Rectangle, measure: &impl TextMeasure) -> LayoutOutcome {
        self.engine.position_menu_bar(self.bar.as_mut(), viewport, measure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MenuDefinition;
    use pix_font::DrawCharResult;

    struct Fixed(Option<i32>);

    impl TextMeasure for Fixed {
        fn measure(&self, _text: &str) -> Option<DrawCharResult> {
            self.0.map(|w| DrawCharResult::new(w, w - 1, 9))
        }
    }

    #[test]
    fn test_host_lifecycle() {
        let mut host = MenuHost::default();
        let viewport = Rectangle::from(0, 0, 320, 200);
        assert!(host.layout(viewport, &Fixed(None)).is_complete());

        let bar = MenuBar::from_definition("main", &[MenuDefinition::new("a|A", &["x|X"])]).unwrap();
        assert!(host.install(bar).is_none());
        assert_eq!(host.layout(viewport, &Fixed(None)), LayoutOutcome::Incomplete);
        assert_eq!(host.layout(viewport, &Fixed(Some(10))), LayoutOutcome::Complete(()));
        assert_eq!(host.bar().unwrap().dropdowns[0].rect, Rectangle::from(8, 0, 28, 19));

        let removed = host.remove().unwrap();
        assert_eq!(removed.background.id, "main##dropdownBg");
        assert!(host.bar().is_none());
    }
}
