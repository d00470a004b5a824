//! Convenience constructors for common SDI object shapes.
//!
//! Each `ensure_*` creates the object on first use and returns it positioned;
//! callers then tweak per-frame fields.

use slate_types::color::Color;

use crate::{SdiObject, SdiRegistry};

/// Ensure a filled (optionally rounded) panel object.
pub fn ensure_panel<'a>(
    sdi: &'a mut SdiRegistry,
    name: &str,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    radius: u16,
    color: Color,
) -> &'a mut SdiObject {
    let obj = sdi.obtain(name);
    obj.x = x;
    obj.y = y;
    obj.w = w;
    obj.h = h;
    obj.radius = radius;
    obj.color = color;
    obj.visible = true;
    obj
}

/// Ensure a text label object.
pub fn ensure_text<'a>(
    sdi: &'a mut SdiRegistry,
    name: &str,
    text: &str,
    x: i32,
    y: i32,
    font_size: u16,
    color: Color,
) -> &'a mut SdiObject {
    let obj = sdi.obtain(name);
    obj.x = x;
    obj.y = y;
    obj.w = 0;
    obj.h = 0;
    obj.color = Color::TRANSPARENT;
    obj.text = Some(text.to_string());
    obj.font_size = font_size;
    obj.text_color = color;
    obj.visible = true;
    obj
}

/// Hide a fixed set of objects; unknown names are ignored.
pub fn hide_objects(sdi: &mut SdiRegistry, names: &[&str]) {
    for name in names {
        if let Ok(obj) = sdi.get_mut(name) {
            obj.visible = false;
        }
    }
}

/// Hide every object whose name starts with `prefix`.
pub fn hide_prefix(sdi: &mut SdiRegistry, prefix: &str) {
    let names: Vec<String> = sdi
        .objects
        .keys()
        .filter(|k| k.starts_with(prefix))
        .cloned()
        .collect();
    for name in names {
        if let Ok(obj) = sdi.get_mut(&name) {
            obj.visible = false;
        }
    }
}
