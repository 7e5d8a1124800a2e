//! Positions the headers of a menu bar and the items of its open dropdown.
//!
//! Layout is done in two steps. Planning measures every label and computes
//! all rectangles without touching the bar. Only a complete plan is applied,
//! so a tick where the font isn't loaded yet leaves the bar exactly as it was.

use pix_font::{Rectangle, TextMeasure};

use crate::{MenuBar, MenuConstants, MenuDropdown};

/// Result of a layout pass that may have to wait for fonts.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutOutcome<T = ()> {
    Complete(T),
    /// A label couldn't be measured yet, try again on the next tick.
    Incomplete,
}

impl<T> LayoutOutcome<T> {
    pub fn is_complete(&self) -> bool {
        matches!(self, LayoutOutcome::Complete(_))
    }
}

/// Rectangles of an open dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownPlan {
    /// The whole item column
    pub rect: Rectangle,
    pub background: Rectangle,
    pub items: Vec<Rectangle>,
}

/// Rectangles of a whole bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarPlan {
    pub root: Rectangle,
    pub headers: Vec<Rectangle>,
    pub expanded: Option<(usize, DropdownPlan)>,
}

#[derive(Debug, Clone, Default)]
pub struct MenuLayoutEngine {
    constants: MenuConstants,
}

impl MenuLayoutEngine {
    /// Panics on constants that didn't pass [`MenuConstants::check`].
    pub fn new(constants: MenuConstants) -> Self {
        if let Err(err) = constants.check() {
            panic!("{err}");
        }
        Self { constants }
    }

    pub fn constants(&self) -> &MenuConstants {
        &self.constants
    }

    /// Lays out the whole bar inside `viewport`. Nothing to do (and complete)
    /// without a bar, for a hidden one or one without dropdowns.
    pub fn position_menu_bar(&self, bar: Option<&mut MenuBar>, viewport: Rectangle, measure: &impl TextMeasure) -> LayoutOutcome {
        let Some(bar) = bar else {
            return LayoutOutcome::Complete(());
        };
        if !bar.root.visible || bar.dropdowns.is_empty() {
            return LayoutOutcome::Complete(());
        }
        match self.plan_menu_bar(bar, viewport, measure) {
            LayoutOutcome::Complete(plan) => {
                apply_bar(bar, plan);
                LayoutOutcome::Complete(())
            }
            LayoutOutcome::Incomplete => {
                log::debug!("menu bar {} waits for fonts", bar.root.id);
                LayoutOutcome::Incomplete
            }
        }
    }

    /// Opens or closes dropdown `index` below its already positioned header.
    pub fn position_dropdown(&self, bar: &mut MenuBar, index: usize, expanded: bool, viewport: Rectangle, measure: &impl TextMeasure) -> LayoutOutcome {
        assert!(
            index < bar.dropdowns.len(),
            "menu bar {} has no dropdown #{index}",
            bar.root.id
        );
        if !expanded {
            close_dropdown(&mut bar.dropdowns[index]);
            return LayoutOutcome::Complete(());
        }

        let dropdown = &bar.dropdowns[index];
        match self.plan_dropdown(dropdown, dropdown.rect, viewport, measure) {
            LayoutOutcome::Complete(plan) => {
                open_dropdown(bar, index, plan);
                LayoutOutcome::Complete(())
            }
            LayoutOutcome::Incomplete => {
                log::debug!("dropdown {} waits for fonts", bar.dropdowns[index].id);
                LayoutOutcome::Incomplete
            }
        }
    }

    pub fn plan_menu_bar(&self, bar: &MenuBar, viewport: Rectangle, measure: &impl TextMeasure) -> LayoutOutcome<BarPlan> {
        let c = &self.constants;
        let root = Rectangle::from(viewport.left(), viewport.top(), viewport.width(), c.bar_height - 1);

        // headers overlap: each rectangle reaches past the cursor of the next one
        let mut cursor = viewport.left() + c.top_header_margin;
        let mut headers = Vec::with_capacity(bar.dropdowns.len());
        for dropdown in &bar.dropdowns {
            let width = match dropdown.fixed_width {
                Some(width) => width,
                None => match measure.measure(&dropdown.label) {
                    Some(measured) => measured.new_logical_x + c.x_spacing,
                    None => return LayoutOutcome::Incomplete,
                },
            };
            if let Some(offset) = dropdown.fixed_offset {
                cursor = offset;
            }
            headers.push(Rectangle::from(
                cursor - c.header_inset,
                viewport.top(),
                width + c.header_grow,
                c.bar_height - 1,
            ));
            cursor += width;
        }

        let expanded = match bar.expanded() {
            Some(index) => match self.plan_dropdown(&bar.dropdowns[index], headers[index], viewport, measure) {
                LayoutOutcome::Complete(plan) => Some((index, plan)),
                LayoutOutcome::Incomplete => return LayoutOutcome::Incomplete,
            },
            None => None,
        };
        LayoutOutcome::Complete(BarPlan { root, headers, expanded })
    }

    /// Item column of `dropdown` hanging below `header`.
    pub fn plan_dropdown(&self, dropdown: &MenuDropdown, header: Rectangle, viewport: Rectangle, measure: &impl TextMeasure) -> LayoutOutcome<DropdownPlan> {
        let c = &self.constants;
        let mut widest = 0;
        for item in &dropdown.items {
            let Some(measured) = measure.measure(&item.label) else {
                return LayoutOutcome::Incomplete;
            };
            widest = widest.max(measured.new_logical_x + c.add_to_width);
        }

        let mut rect = Rectangle::from(header.left(), header.bottom(), widest, c.item_height * dropdown.items.len() as i32);
        if dropdown.is_right_anchored() {
            let overflow = rect.right() - viewport.right();
            if overflow > 0 {
                rect = rect.with_x(rect.left() - overflow);
            }
        }

        // the top line of the background hides under the bar
        let background = Rectangle::from(rect.left(), rect.top() - 1, rect.width(), rect.height() + 1 + c.shadow_size_bottom);
        let items = (0..dropdown.items.len() as i32)
            .map(|i| {
                Rectangle::from(
                    rect.left() + c.shadow_size_left,
                    rect.top() + c.item_height * i,
                    rect.width() - (c.shadow_size_left + c.shadow_size_right),
                    c.item_height,
                )
            })
            .collect();
        LayoutOutcome::Complete(DropdownPlan { rect, background, items })
    }
}

fn apply_bar(bar: &mut MenuBar, plan: BarPlan) {
    bar.root.rect = plan.root;
    for (dropdown, header) in bar.dropdowns.iter_mut().zip(plan.headers) {
        dropdown.rect = header;
        close_dropdown(dropdown);
    }
    bar.items_visible = false;
    if let Some((index, dropdown)) = plan.expanded {
        open_dropdown(bar, index, dropdown);
    }
}

fn close_dropdown(dropdown: &mut MenuDropdown) {
    dropdown.highlight_active = false;
    for item in &mut dropdown.items {
        item.visible = false;
    }
}

fn open_dropdown(bar: &mut MenuBar, index: usize, plan: DropdownPlan) {
    let dropdown = &mut bar.dropdowns[index];
    dropdown.highlight_active = true;
    for (item, rect) in dropdown.items.iter_mut().zip(plan.items) {
        item.rect = rect;
        item.visible = true;
    }
    bar.background.rect = plan.background;
    bar.items_visible = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MenuDefinition, MenuItem};
    use pix_font::DrawCharResult;
    use pretty_assertions::assert_eq;

    /// Every char is 5 pixels wide.
    struct FiveWide;

    impl TextMeasure for FiveWide {
        fn measure(&self, text: &str) -> Option<DrawCharResult> {
            let width = text.chars().count() as i32 * 5;
            Some(DrawCharResult::new(width, width - 1, 9))
        }
    }

    fn viewport() -> Rectangle {
        Rectangle::from(0, 0, 640, 480)
    }

    #[test]
    fn test_header_rects() {
        let mut bar = MenuBar::from_definition(
            "main",
            &[MenuDefinition::new("a|File", &[]), MenuDefinition::new("b|Edit", &[])],
        )
        .unwrap();
        let engine = MenuLayoutEngine::default();
        assert!(engine.position_menu_bar(Some(&mut bar), viewport(), &FiveWide).is_complete());

        assert_eq!(bar.root.rect, Rectangle::from(0, 0, 640, 19));
        // "File" = 20 + 13 spacing, starting at 12
        assert_eq!(bar.dropdowns[0].rect, Rectangle::from(8, 0, 38, 19));
        assert_eq!(bar.dropdowns[1].rect, Rectangle::from(41, 0, 38, 19));
        assert!(!bar.items_visible);
    }

    #[test]
    fn test_dropdown_rects() {
        let mut bar = MenuBar::new("main");
        let mut dropdown = MenuDropdown::new("a", "File");
        dropdown.push_item(MenuItem::new("x", "Open", ""));
        dropdown.push_item(MenuItem::new("y", "Close", ""));
        bar.push_dropdown(dropdown);
        bar.expand(0).unwrap();

        let engine = MenuLayoutEngine::default();
        assert!(engine.position_menu_bar(Some(&mut bar), viewport(), &FiveWide).is_complete());

        // widest = 25 + 30, header bottom = 19
        let dropdown = &bar.dropdowns[0];
        assert!(dropdown.highlight_active);
        assert_eq!(bar.background.rect, Rectangle::from(8, 18, 55, 35));
        assert_eq!(dropdown.items[0].rect, Rectangle::from(9, 19, 52, 16));
        assert_eq!(dropdown.items[1].rect, Rectangle::from(9, 35, 52, 16));
        assert!(dropdown.items.iter().all(|i| i.visible));
        assert!(bar.items_visible);
    }
}
