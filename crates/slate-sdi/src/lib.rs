//! Retained scene graph for SLATE_OS.
//!
//! UI state structs own no draw code; each frame they synchronize named
//! `SdiObject`s in a registry (`update_sdi` pattern), and the registry is
//! drawn once, back to front by z order. Objects persist across frames and
//! are toggled with their `visible` flag.

pub mod helpers;

use std::collections::BTreeMap;

use slate_types::backend::SdiBackend;
use slate_types::color::Color;
use slate_types::error::{Result, SlateError};

/// A single drawable: a (possibly rounded, possibly bordered) rectangle
/// and/or a line of text anchored at the object origin.
#[derive(Debug, Clone)]
pub struct SdiObject {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
    /// Draw order; higher z draws later (on top).
    pub z: i32,
    pub visible: bool,
    /// Fill color; fully transparent fills are skipped.
    pub color: Color,
    /// Corner radius for the fill and border.
    pub radius: u16,
    /// Optional border stroke.
    pub border_color: Option<Color>,
    pub border_width: u16,
    /// Optional text drawn at the object origin.
    pub text: Option<String>,
    pub font_size: u16,
    pub text_color: Color,
}

impl Default for SdiObject {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            w: 0,
            h: 0,
            z: 0,
            visible: true,
            color: Color::TRANSPARENT,
            radius: 0,
            border_color: None,
            border_width: 0,
            text: None,
            font_size: 8,
            text_color: Color::WHITE,
        }
    }
}

/// Named object registry, drawn in (z, name) order for determinism.
#[derive(Debug, Default)]
pub struct SdiRegistry {
    objects: BTreeMap<String, SdiObject>,
}

impl SdiRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an object with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    /// Create (or reset) an object and return it for initialization.
    pub fn create(&mut self, name: &str) -> &mut SdiObject {
        self.objects
            .insert(name.to_string(), SdiObject::default());
        self.obtain(name)
    }

    /// Get an object, creating a default one if missing.
    pub fn obtain(&mut self, name: &str) -> &mut SdiObject {
        self.objects.entry(name.to_string()).or_default()
    }

    pub fn get(&self, name: &str) -> Result<&SdiObject> {
        self.objects
            .get(name)
            .ok_or_else(|| SlateError::Backend(format!("no such SDI object: {name}")))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut SdiObject> {
        self.objects
            .get_mut(name)
            .ok_or_else(|| SlateError::Backend(format!("no such SDI object: {name}")))
    }

    /// Remove an object; missing names are ignored.
    pub fn remove(&mut self, name: &str) {
        self.objects.remove(name);
    }

    /// Number of registered objects (visible or not).
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Draw all visible objects back to front.
    pub fn draw(&self, backend: &mut dyn SdiBackend) -> Result<()> {
        let mut order: Vec<(&String, &SdiObject)> =
            self.objects.iter().filter(|(_, o)| o.visible).collect();
        // BTreeMap iteration is name-ordered; the stable sort keeps that
        // order within equal z.
        order.sort_by_key(|(_, o)| o.z);

        for (_, obj) in order {
            if obj.w > 0 && obj.h > 0 && obj.color.a > 0 {
                backend.fill_rounded_rect(obj.x, obj.y, obj.w, obj.h, obj.radius, obj.color)?;
            }
            if let Some(bc) = obj.border_color {
                if obj.border_width > 0 && obj.w > 0 && obj.h > 0 {
                    backend.stroke_rounded_rect(
                        obj.x,
                        obj.y,
                        obj.w,
                        obj.h,
                        obj.radius,
                        obj.border_width,
                        bc,
                    )?;
                }
            }
            if let Some(ref text) = obj.text {
                if obj.text_color.a > 0 {
                    backend.draw_text(text, obj.x, obj.y, obj.font_size, obj.text_color)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records draw calls for assertions.
    #[derive(Default)]
    struct RecordingBackend {
        calls: Vec<String>,
    }

    impl SdiBackend for RecordingBackend {
        fn init(&mut self, _w: u32, _h: u32) -> Result<()> {
            Ok(())
        }
        fn clear(&mut self, _color: Color) -> Result<()> {
            self.calls.push("clear".into());
            Ok(())
        }
        fn fill_rect(&mut self, _x: i32, _y: i32, _w: u32, _h: u32, _c: Color) -> Result<()> {
            self.calls.push("fill_rect".into());
            Ok(())
        }
        fn fill_rounded_rect(
            &mut self,
            x: i32,
            _y: i32,
            _w: u32,
            _h: u32,
            _r: u16,
            _c: Color,
        ) -> Result<()> {
            self.calls.push(format!("rect@{x}"));
            Ok(())
        }
        fn stroke_rounded_rect(
            &mut self,
            _x: i32,
            _y: i32,
            _w: u32,
            _h: u32,
            _r: u16,
            _sw: u16,
            _c: Color,
        ) -> Result<()> {
            self.calls.push("stroke".into());
            Ok(())
        }
        fn draw_line(
            &mut self,
            _x1: i32,
            _y1: i32,
            _x2: i32,
            _y2: i32,
            _w: u16,
            _c: Color,
        ) -> Result<()> {
            self.calls.push("line".into());
            Ok(())
        }
        fn draw_text(
            &mut self,
            text: &str,
            _x: i32,
            _y: i32,
            _fs: u16,
            _c: Color,
        ) -> Result<()> {
            self.calls.push(format!("text:{text}"));
            Ok(())
        }
        fn dim_screen(&mut self, _alpha: u8) -> Result<()> {
            self.calls.push("dim".into());
            Ok(())
        }
        fn swap_buffers(&mut self) -> Result<()> {
            Ok(())
        }
        fn shutdown(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn create_and_contains() {
        let mut sdi = SdiRegistry::new();
        assert!(!sdi.contains("a"));
        sdi.create("a");
        assert!(sdi.contains("a"));
        assert_eq!(sdi.len(), 1);
    }

    #[test]
    fn create_resets_existing() {
        let mut sdi = SdiRegistry::new();
        sdi.create("a").x = 50;
        sdi.create("a");
        assert_eq!(sdi.get("a").unwrap().x, 0);
    }

    #[test]
    fn get_missing_errors() {
        let sdi = SdiRegistry::new();
        assert!(sdi.get("nope").is_err());
    }

    #[test]
    fn get_mut_mutates() {
        let mut sdi = SdiRegistry::new();
        sdi.create("a");
        sdi.get_mut("a").unwrap().x = 7;
        assert_eq!(sdi.get("a").unwrap().x, 7);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut sdi = SdiRegistry::new();
        sdi.create("a");
        sdi.remove("a");
        sdi.remove("a");
        assert!(sdi.is_empty());
    }

    #[test]
    fn draw_skips_invisible() {
        let mut sdi = SdiRegistry::new();
        {
            let obj = sdi.create("hidden");
            obj.w = 10;
            obj.h = 10;
            obj.color = Color::WHITE;
            obj.visible = false;
        }
        let mut be = RecordingBackend::default();
        sdi.draw(&mut be).unwrap();
        assert!(be.calls.is_empty());
    }

    #[test]
    fn draw_orders_by_z() {
        let mut sdi = SdiRegistry::new();
        {
            let obj = sdi.create("top");
            obj.x = 2;
            obj.w = 1;
            obj.h = 1;
            obj.color = Color::WHITE;
            obj.z = 10;
        }
        {
            let obj = sdi.create("bottom");
            obj.x = 1;
            obj.w = 1;
            obj.h = 1;
            obj.color = Color::WHITE;
            obj.z = 0;
        }
        let mut be = RecordingBackend::default();
        sdi.draw(&mut be).unwrap();
        assert_eq!(be.calls, vec!["rect@1", "rect@2"]);
    }

    #[test]
    fn draw_skips_transparent_fill_but_draws_text() {
        let mut sdi = SdiRegistry::new();
        {
            let obj = sdi.create("label");
            obj.text = Some("hi".to_string());
        }
        let mut be = RecordingBackend::default();
        sdi.draw(&mut be).unwrap();
        assert_eq!(be.calls, vec!["text:hi"]);
    }

    #[test]
    fn draw_strokes_border() {
        let mut sdi = SdiRegistry::new();
        {
            let obj = sdi.create("panel");
            obj.w = 5;
            obj.h = 5;
            obj.color = Color::rgba(0, 0, 0, 200);
            obj.border_color = Some(Color::WHITE);
            obj.border_width = 2;
        }
        let mut be = RecordingBackend::default();
        sdi.draw(&mut be).unwrap();
        assert_eq!(be.calls, vec!["rect@0", "stroke"]);
    }
}
