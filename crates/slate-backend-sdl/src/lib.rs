//! SDL2 backend for SLATE_OS.
//!
//! Implements `SdiBackend` and `InputBackend` with the SDL2 renderer API.
//! Shapes are rasterized in software (midpoint-circle spans for rounded
//! corners); text is the shared 8x8 bitmap font drawn point by point.

mod font;
mod sdl_audio;

use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::rect::{Point, Rect};
use sdl2::render::Canvas;
use sdl2::video::Window;
use sdl2::EventPump;

use slate_types::backend::{InputBackend, SdiBackend};
use slate_types::color::Color;
use slate_types::error::{Result, SlateError};
use slate_types::input::{InputEvent, Key};

pub use sdl_audio::SdlSound;

/// SDL2 rendering and input backend.
pub struct SdlBackend {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    viewport_w: u32,
    viewport_h: u32,
}

impl SdlBackend {
    /// Create a new SDL2 backend with a window.
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self> {
        let sdl = sdl2::init().map_err(|e| SlateError::Backend(e.to_string()))?;
        let video = sdl
            .video()
            .map_err(|e| SlateError::Backend(e.to_string()))?;
        let window = video
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| SlateError::Backend(e.to_string()))?;
        let canvas = window
            .into_canvas()
            .accelerated()
            .present_vsync()
            .build()
            .map_err(|e| SlateError::Backend(e.to_string()))?;
        let event_pump = sdl
            .event_pump()
            .map_err(|e| SlateError::Backend(e.to_string()))?;

        log::info!("SDL2 backend initialized: {width}x{height}");

        Ok(Self {
            canvas,
            event_pump,
            viewport_w: width,
            viewport_h: height,
        })
    }

    /// Set the SDL draw color with blending for translucent colors.
    fn set_color(&mut self, color: Color) {
        if color.a < 255 {
            self.canvas.set_blend_mode(sdl2::render::BlendMode::Blend);
        } else {
            self.canvas.set_blend_mode(sdl2::render::BlendMode::None);
        }
        self.canvas.set_draw_color(sdl2::pixels::Color::RGBA(
            color.r, color.g, color.b, color.a,
        ));
    }
}

impl SdiBackend for SdlBackend {
    fn init(&mut self, _width: u32, _height: u32) -> Result<()> {
        Ok(())
    }

    fn clear(&mut self, color: Color) -> Result<()> {
        self.canvas.set_draw_color(sdl2::pixels::Color::RGBA(
            color.r, color.g, color.b, color.a,
        ));
        self.canvas.clear();
        Ok(())
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) -> Result<()> {
        self.set_color(color);
        self.canvas
            .fill_rect(Rect::new(x, y, w, h))
            .map_err(SlateError::Backend)?;
        Ok(())
    }

    fn fill_rounded_rect(
        &mut self,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        radius: u16,
        color: Color,
    ) -> Result<()> {
        if radius == 0 || w == 0 || h == 0 {
            return self.fill_rect(x, y, w, h, color);
        }
        let r = (radius as u32).min(w / 2).min(h / 2) as i32;
        self.set_color(color);

        // Center body.
        let _ = self
            .canvas
            .fill_rect(Rect::new(x, y + r, w, h - r as u32 * 2));

        // Corner rows as midpoint-circle horizontal spans.
        let mut cx = 0i32;
        let mut cy = r;
        let mut d = 1 - r;
        while cx <= cy {
            let _ = self.canvas.draw_line(
                Point::new(x + r - cy, y + r - cx),
                Point::new(x + w as i32 - 1 - r + cy, y + r - cx),
            );
            if cx != cy {
                let _ = self.canvas.draw_line(
                    Point::new(x + r - cx, y + r - cy),
                    Point::new(x + w as i32 - 1 - r + cx, y + r - cy),
                );
            }
            if cx != 0 {
                let _ = self.canvas.draw_line(
                    Point::new(x + r - cy, y + h as i32 - 1 - r + cx),
                    Point::new(x + w as i32 - 1 - r + cy, y + h as i32 - 1 - r + cx),
                );
            }
            let _ = self.canvas.draw_line(
                Point::new(x + r - cx, y + h as i32 - 1 - r + cy),
                Point::new(x + w as i32 - 1 - r + cx, y + h as i32 - 1 - r + cy),
            );

            cx += 1;
            if d < 0 {
                d += 2 * cx + 1;
            } else {
                cy -= 1;
                d += 2 * (cx - cy) + 1;
            }
        }
        Ok(())
    }

    fn stroke_rounded_rect(
        &mut self,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        radius: u16,
        stroke_width: u16,
        color: Color,
    ) -> Result<()> {
        if w == 0 || h == 0 {
            return Ok(());
        }
        let r = (radius as i32).min(w as i32 / 2).min(h as i32 / 2);
        self.set_color(color);

        let sw = (stroke_width as i32).max(1);
        for t in 0..sw {
            // Straight edges.
            let _ = self.canvas.draw_line(
                Point::new(x + r, y + t),
                Point::new(x + w as i32 - 1 - r, y + t),
            );
            let _ = self.canvas.draw_line(
                Point::new(x + r, y + h as i32 - 1 - t),
                Point::new(x + w as i32 - 1 - r, y + h as i32 - 1 - t),
            );
            let _ = self.canvas.draw_line(
                Point::new(x + t, y + r),
                Point::new(x + t, y + h as i32 - 1 - r),
            );
            let _ = self.canvas.draw_line(
                Point::new(x + w as i32 - 1 - t, y + r),
                Point::new(x + w as i32 - 1 - t, y + h as i32 - 1 - r),
            );

            // Corner arcs.
            let cr = r - t;
            if cr <= 0 {
                continue;
            }
            let mut cx = 0i32;
            let mut cy = cr;
            let mut d = 1 - cr;
            while cx <= cy {
                for (px, py) in [
                    (x + r - cy, y + r - cx),
                    (x + r - cx, y + r - cy),
                    (x + w as i32 - 1 - r + cy, y + r - cx),
                    (x + w as i32 - 1 - r + cx, y + r - cy),
                    (x + r - cy, y + h as i32 - 1 - r + cx),
                    (x + r - cx, y + h as i32 - 1 - r + cy),
                    (x + w as i32 - 1 - r + cy, y + h as i32 - 1 - r + cx),
                    (x + w as i32 - 1 - r + cx, y + h as i32 - 1 - r + cy),
                ] {
                    let _ = self.canvas.draw_point(Point::new(px, py));
                }
                cx += 1;
                if d < 0 {
                    d += 2 * cx + 1;
                } else {
                    cy -= 1;
                    d += 2 * (cx - cy) + 1;
                }
            }
        }
        Ok(())
    }

    fn draw_line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        width: u16,
        color: Color,
    ) -> Result<()> {
        self.set_color(color);
        if width <= 1 {
            let _ = self
                .canvas
                .draw_line(Point::new(x1, y1), Point::new(x2, y2));
        } else {
            let half = width as i32 / 2;
            let dx = (x2 - x1) as f32;
            let dy = (y2 - y1) as f32;
            let len = (dx * dx + dy * dy).sqrt().max(1.0);
            let nx = (-dy / len) as i32;
            let ny = (dx / len) as i32;
            for i in -half..=(width as i32 - half - 1) {
                let _ = self.canvas.draw_line(
                    Point::new(x1 + nx * i, y1 + ny * i),
                    Point::new(x2 + nx * i, y2 + ny * i),
                );
            }
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        font_size: u16,
        color: Color,
    ) -> Result<()> {
        let scale = slate_types::backend::font_scale(font_size) as i32;
        let glyph_w = font::GLYPH_WIDTH as i32 * scale;
        self.set_color(color);

        let mut cx = x;
        for ch in text.chars() {
            let glyph_data = font::glyph(ch);
            for (row, bits) in glyph_data.iter().enumerate() {
                for col in 0..8i32 {
                    if bits & (0x80 >> col) != 0 {
                        let px = cx + col * scale;
                        let py = y + row as i32 * scale;
                        if scale == 1 {
                            let _ = self.canvas.draw_point(Point::new(px, py));
                        } else {
                            let _ = self.canvas.fill_rect(Rect::new(
                                px,
                                py,
                                scale as u32,
                                scale as u32,
                            ));
                        }
                    }
                }
            }
            cx += glyph_w;
        }
        Ok(())
    }

    fn dim_screen(&mut self, alpha: u8) -> Result<()> {
        self.fill_rect(
            0,
            0,
            self.viewport_w,
            self.viewport_h,
            Color::rgba(0, 0, 0, alpha),
        )
    }

    fn swap_buffers(&mut self) -> Result<()> {
        self.canvas.present();
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        log::info!("SDL2 backend shut down");
        Ok(())
    }
}

impl InputBackend for SdlBackend {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        for event in self.event_pump.poll_iter() {
            if let Some(e) = map_sdl_event(event) {
                events.push(e);
            }
        }
        events
    }
}

/// Map an SDL2 event to a SLATE_OS input event.
fn map_sdl_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Quit { .. } => Some(InputEvent::Quit),
        Event::KeyDown {
            keycode: Some(key), ..
        } => map_key(key).map(InputEvent::KeyPress),
        Event::KeyUp {
            keycode: Some(key), ..
        } => map_key(key).map(InputEvent::KeyRelease),
        Event::MouseMotion { x, y, .. } => Some(InputEvent::PointerMove { x, y }),
        Event::MouseButtonDown { x, y, .. } => Some(InputEvent::PointerDown { x, y }),
        Event::MouseButtonUp { x, y, .. } => Some(InputEvent::PointerUp { x, y }),
        Event::MouseWheel { y, .. } => Some(InputEvent::Wheel { delta: y }),
        Event::Window {
            win_event: WindowEvent::FocusGained,
            ..
        } => Some(InputEvent::FocusGained),
        Event::Window {
            win_event: WindowEvent::FocusLost,
            ..
        } => Some(InputEvent::FocusLost),
        Event::TextInput { text, .. } => text.chars().next().map(InputEvent::TextInput),
        _ => None,
    }
}

/// Keys routed as logical key events. Character keys (including space) are
/// delivered through SDL's text input instead, so they are not mapped here
/// or they would arrive twice.
fn map_key(key: Keycode) -> Option<Key> {
    match key {
        Keycode::Up => Some(Key::Up),
        Keycode::Down => Some(Key::Down),
        Keycode::Left => Some(Key::Left),
        Keycode::Right => Some(Key::Right),
        Keycode::Return | Keycode::KpEnter => Some(Key::Enter),
        Keycode::Backspace => Some(Key::Backspace),
        Keycode::LShift | Keycode::RShift => Some(Key::Shift),
        Keycode::Tab => Some(Key::Tab),
        Keycode::Escape => Some(Key::Escape),
        _ => None,
    }
}
