//! Static home screen: a grid of app tiles.
//!
//! Tapping a tile announces the launch as a toast; the Keyboard tile opens
//! the on-screen keyboard session instead.

use slate_core::backend::{text_height, text_width};
use slate_core::color::Color;
use slate_core::geom::Rect;
use slate_core::sdi::helpers::{ensure_panel, ensure_text};
use slate_core::sdi::SdiRegistry;
use slate_core::theme;

/// Tile that opens the keyboard demo instead of announcing a launch.
pub const KEYBOARD_TILE: &str = "Keyboard";

const TILE_NAMES: [&str; 6] = ["Files", "Notes", "Settings", "Store", "Chat", KEYBOARD_TILE];
const TILE_COLORS: [Color; 6] = [
    Color::rgb(52, 120, 186),
    Color::rgb(186, 140, 52),
    Color::rgb(110, 110, 120),
    Color::rgb(70, 150, 90),
    Color::rgb(150, 80, 150),
    Color::rgb(60, 60, 70),
];

/// One tappable tile.
#[derive(Debug, Clone)]
pub struct HomeTile {
    pub name: &'static str,
    pub rect: Rect,
    pub color: Color,
}

/// The home screen grid.
#[derive(Debug)]
pub struct HomeScreen {
    tiles: Vec<HomeTile>,
}

impl HomeScreen {
    /// Two-column grid below the top-bar region.
    pub fn new(screen_w: u32, screen_h: u32) -> Self {
        let cols = 2u32;
        let rows = TILE_NAMES.len() as u32 / cols;
        let margin = 24u32;
        let gap = 16u32;
        let top = 80u32;
        let tile_w = (screen_w - 2 * margin - (cols - 1) * gap) / cols;
        let avail_h = screen_h.saturating_sub(top + margin);
        let tile_h = ((avail_h - (rows - 1) * gap) / rows).min(tile_w);

        let tiles = TILE_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let col = i as u32 % cols;
                let row = i as u32 / cols;
                HomeTile {
                    name,
                    rect: Rect::new(
                        (margin + col * (tile_w + gap)) as i32,
                        (top + row * (tile_h + gap)) as i32,
                        tile_w,
                        tile_h,
                    ),
                    color: TILE_COLORS[i],
                }
            })
            .collect();
        Self { tiles }
    }

    pub fn tiles(&self) -> &[HomeTile] {
        &self.tiles
    }

    /// The tile under a point, if any.
    pub fn hit(&self, x: i32, y: i32) -> Option<&'static str> {
        self.tiles
            .iter()
            .find(|t| t.rect.contains(x, y))
            .map(|t| t.name)
    }

    /// Synchronize SDI objects.
    pub fn update_sdi(&self, sdi: &mut SdiRegistry) {
        let hint = ensure_text(
            sdi,
            "home_hint",
            "Pull down for notifications",
            24,
            48,
            theme::FONT_SM,
            theme::TEXT_DIM,
        );
        hint.z = theme::Z_HOME;

        for (i, tile) in self.tiles.iter().enumerate() {
            let bg = ensure_panel(
                sdi,
                &format!("home_tile_{i}"),
                tile.rect.x,
                tile.rect.y,
                tile.rect.w,
                tile.rect.h,
                12,
                tile.color,
            );
            bg.z = theme::Z_HOME;

            let label_w = text_width(tile.name, theme::FONT_SM);
            let label = ensure_text(
                sdi,
                &format!("home_tile_{i}_label"),
                tile.name,
                tile.rect.center_x() - label_w as i32 / 2,
                tile.rect.bottom() - text_height(theme::FONT_SM) as i32 - 8,
                theme::FONT_SM,
                theme::TEXT_PRIMARY,
            );
            label.z = theme::Z_HOME + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_one_tile_per_name() {
        let home = HomeScreen::new(360, 640);
        assert_eq!(home.tiles().len(), TILE_NAMES.len());
    }

    #[test]
    fn tiles_fit_the_screen() {
        let home = HomeScreen::new(360, 640);
        for tile in home.tiles() {
            assert!(tile.rect.x >= 0);
            assert!(tile.rect.right() <= 360);
            assert!(tile.rect.bottom() <= 640);
        }
    }

    #[test]
    fn hit_finds_the_right_tile() {
        let home = HomeScreen::new(360, 640);
        let first = &home.tiles()[0];
        assert_eq!(
            home.hit(first.rect.center_x(), first.rect.center_y()),
            Some(first.name)
        );
        assert_eq!(home.hit(0, 0), None);
    }

    #[test]
    fn keyboard_tile_is_present() {
        let home = HomeScreen::new(360, 640);
        assert!(home.tiles().iter().any(|t| t.name == KEYBOARD_TILE));
    }

    #[test]
    fn update_sdi_creates_tiles_and_labels() {
        let home = HomeScreen::new(360, 640);
        let mut sdi = SdiRegistry::new();
        home.update_sdi(&mut sdi);
        for i in 0..TILE_NAMES.len() {
            assert!(sdi.contains(&format!("home_tile_{i}")));
            assert!(sdi.contains(&format!("home_tile_{i}_label")));
        }
    }
}
