//! Page chrome around the visual: the overlay menu, scroll-tracked sections
//! and scattered navigation items.
//!
//! This module only decides *what* should change; `wasm::page` applies it to
//! the DOM.

/// Delay between consecutive menu items appearing.
pub const MENU_STAGGER_MS: u32 = 100;

/// Fraction of the viewport height where the section trigger line sits.
pub const SECTION_TRIGGER: f64 = 0.5;

/// Maximum nav-item offset, in percent, either side of centre.
pub const NAV_SPREAD_PERCENT: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemStyle {
    pub opacity: &'static str,
    pub transform: &'static str,
}

pub const ITEM_SHOWN: ItemStyle = ItemStyle {
    opacity: "1",
    transform: "translateY(0)",
};

pub const ITEM_HIDDEN: ItemStyle = ItemStyle {
    opacity: "0",
    transform: "translateY(20px)",
};

/// Style change for one `.menu-item`, applied after `delay_ms`
/// (`None` means immediately).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemTransition {
    pub index: usize,
    pub delay_ms: Option<u32>,
    pub style: ItemStyle,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the menu and return the per-item transitions to schedule.
    pub fn toggle(&mut self, item_count: usize) -> Vec<ItemTransition> {
        self.open = !self.open;
        (0..item_count)
            .map(|index| {
                if self.open {
                    ItemTransition {
                        index,
                        delay_ms: Some(index as u32 * MENU_STAGGER_MS),
                        style: ITEM_SHOWN,
                    }
                } else {
                    ItemTransition {
                        index,
                        delay_ms: None,
                        style: ITEM_HIDDEN,
                    }
                }
            })
            .collect()
    }

    pub fn closes_on_key(&self, key: &str) -> bool {
        self.open && key == "Escape"
    }
}

/// Vertical extent of a section in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionRect {
    pub top: f64,
    pub bottom: f64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SectionTracker {
    current: usize,
}

impl SectionTracker {
    pub fn current(&self) -> usize {
        self.current
    }

    /// Which sections hold the trigger line. The last match becomes current;
    /// with no match the current index is kept.
    pub fn update(&mut self, rects: &[SectionRect], viewport_height: f64) -> Vec<bool> {
        let trigger = viewport_height * SECTION_TRIGGER;
        let active: Vec<bool> = rects
            .iter()
            .map(|r| r.top <= trigger && r.bottom >= trigger)
            .collect();
        if let Some(idx) = active.iter().rposition(|&a| a) {
            self.current = idx;
        }
        active
    }
}

/// CSS transform for a nav item given two uniform samples in [0, 1).
pub fn nav_transform(rand_x: f64, rand_y: f64, rotation: Option<&str>) -> String {
    let x = (rand_x - 0.5) * NAV_SPREAD_PERCENT;
    let y = (rand_y - 0.5) * NAV_SPREAD_PERCENT;
    let rot = rotation
        .map(str::trim)
        .and_then(|r| r.parse::<f64>().ok())
        .unwrap_or(0.0);
    format!("translate({x}%, {y}%) rotate({rot}deg)")
}
