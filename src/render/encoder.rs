// encoder.rs - Record draw calls into a flat buffer
//
// Output encoding (f32 words, for canvas playback in JS):
//   0 CLEAR   w h
//   1 ALPHA   a
//   2 GLOW    blur color
//   3 STROKE  color width
//   4 LINE    x1 y1 x2 y2
//   5 CIRCLE  x y r color
//   6 RESET
//
// `color` is an index into the frame palette (read with `color(i)`).
// The palette is emptied on every clear, so colours never outlive a frame.

use super::Surface;

const OP_CLEAR: f32 = 0.0;
const OP_ALPHA: f32 = 1.0;
const OP_GLOW: f32 = 2.0;
const OP_STROKE: f32 = 3.0;
const OP_LINE: f32 = 4.0;
const OP_CIRCLE: f32 = 5.0;
const OP_RESET: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    Clear { width: u32, height: u32 },
    Alpha(f64),
    Glow { blur: f64, color: u16 },
    Stroke { color: u16, width: f64 },
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Circle { x: f64, y: f64, r: f64, color: u16 },
    Reset,
}

pub struct CommandBuffer {
    ops: Vec<DrawOp>,
    palette: Vec<String>,
    out: Vec<f32>,
    w: u32,
    h: u32,
}

impl CommandBuffer {
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            ops: Vec::new(),
            palette: Vec::new(),
            out: Vec::new(),
            w,
            h,
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn color(&self, i: usize) -> Option<&str> {
        self.palette.get(i).map(String::as_str)
    }

    pub fn palette_len(&self) -> usize {
        self.palette.len()
    }

    pub fn circles(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Circle { .. })).count()
    }

    pub fn lines(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Line { .. })).count()
    }

    /// Flatten recorded ops into the f32 output buffer.
    pub fn encode(&mut self) {
        self.out.clear();
        for op in &self.ops {
            match *op {
                DrawOp::Clear { width, height } => {
                    self.out.extend([OP_CLEAR, width as f32, height as f32]);
                }
                DrawOp::Alpha(a) => self.out.extend([OP_ALPHA, a as f32]),
                DrawOp::Glow { blur, color } => {
                    self.out.extend([OP_GLOW, blur as f32, color as f32]);
                }
                DrawOp::Stroke { color, width } => {
                    self.out.extend([OP_STROKE, color as f32, width as f32]);
                }
                DrawOp::Line { x1, y1, x2, y2 } => {
                    self.out.extend([OP_LINE, x1 as f32, y1 as f32, x2 as f32, y2 as f32]);
                }
                DrawOp::Circle { x, y, r, color } => {
                    self.out.extend([OP_CIRCLE, x as f32, y as f32, r as f32, color as f32]);
                }
                DrawOp::Reset => self.out.push(OP_RESET),
            }
        }
    }

    pub fn ptr(&self) -> *const f32 {
        self.out.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn words(&self) -> &[f32] {
        &self.out
    }

    fn intern(&mut self, color: &str) -> u16 {
        if let Some(i) = self.palette.iter().position(|c| c == color) {
            return i as u16;
        }
        self.palette.push(color.to_string());
        (self.palette.len() - 1) as u16
    }
}

impl Surface for CommandBuffer {
    fn resize(&mut self, width: u32, height: u32) {
        self.w = width;
        self.h = height;
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.palette.clear();
        self.ops.push(DrawOp::Clear { width: self.w, height: self.h });
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.ops.push(DrawOp::Alpha(alpha));
    }

    fn set_glow(&mut self, blur: f64, color: &str) {
        let color = self.intern(color);
        self.ops.push(DrawOp::Glow { blur, color });
    }

    fn set_stroke(&mut self, color: &str, width: f64) {
        let color = self.intern(color);
        self.ops.push(DrawOp::Stroke { color, width });
    }

    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.ops.push(DrawOp::Line { x1, y1, x2, y2 });
    }

    fn fill_circle(&mut self, x: f64, y: f64, r: f64, color: &str) {
        let color = self.intern(color);
        self.ops.push(DrawOp::Circle { x, y, r, color });
    }

    fn reset(&mut self) {
        self.ops.push(DrawOp::Reset);
    }
}
