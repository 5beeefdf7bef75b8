//! 8-bit RGBA pixel buffer with the few compositing operations diagrams need.

/// Non-premultiplied 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Composites `self` over `dst` (Porter-Duff source-over).
    pub fn over(self, dst: Rgba) -> Rgba {
        let sa = self.a as u32;
        if sa == 255 {
            return self;
        }
        if sa == 0 {
            return dst;
        }
        let da = dst.a as u32 * (255 - sa) / 255;
        let out_a = sa + da;
        let mix = |s: u8, d: u8| ((s as u32 * sa + d as u32 * da + out_a / 2) / out_a) as u8;
        Rgba {
            r: mix(self.r, dst.r),
            g: mix(self.g, dst.g),
            b: mix(self.b, dst.b),
            a: out_a as u8,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// How copied pixels combine with the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    /// Replace destination pixels.
    Src,
    /// Alpha-composite over destination pixels.
    Over,
}

/// A rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A 2D RGBA buffer, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<Rgba>,
}

impl Canvas {
    /// Create a canvas filled with a color.
    pub fn new(width: u32, height: u32, fill: Rgba) -> Self {
        Self {
            width,
            height,
            data: vec![fill; (width as usize) * (height as usize)],
        }
    }

    /// Build a canvas from packed RGBA bytes. Returns `None` on a size mismatch.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        let data = bytes
            .chunks_exact(4)
            .map(|p| Rgba::new(p[0], p[1], p[2], p[3]))
            .collect();
        Some(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.data[self.index(x, y)])
        } else {
            None
        }
    }

    /// Sets a pixel; writes outside the canvas are dropped.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Rgba) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.data[i] = color;
        }
    }

    #[inline]
    pub fn blend(&mut self, x: u32, y: u32, color: Rgba, mode: Blend) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.data[i] = match mode {
                Blend::Src => color,
                Blend::Over => color.over(self.data[i]),
            };
        }
    }

    /// Fills `rect`, clipped to the canvas.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba, mode: Blend) {
        for y in rect.y..rect.y.saturating_add(rect.height).min(self.height) {
            for x in rect.x..rect.x.saturating_add(rect.width).min(self.width) {
                self.blend(x, y, color, mode);
            }
        }
    }

    /// Copies the block of `src` at `(sx, sy)` into `dst`, sized like `dst`.
    ///
    /// The copy is clipped to both buffers.
    pub fn draw(&mut self, dst: Rect, src: &Canvas, sx: u32, sy: u32, mode: Blend) {
        for row in 0..dst.height {
            let (Some(ty), Some(fy)) = (dst.y.checked_add(row), sy.checked_add(row)) else {
                break;
            };
            if ty >= self.height || fy >= src.height {
                break;
            }
            for col in 0..dst.width {
                let (tx, fx) = (dst.x + col, sx + col);
                if tx >= self.width || fx >= src.width {
                    break;
                }
                let color = src.data[src.index(fx, fy)];
                self.blend(tx, ty, color, mode);
            }
        }
    }

    /// Packed RGBA bytes, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 4);
        for color in &self.data {
            bytes.extend_from_slice(&color.to_array());
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_over_extremes() {
        let red = Rgba::opaque(255, 0, 0);
        assert_eq!(red.over(Rgba::WHITE), red);
        assert_eq!(Rgba::TRANSPARENT.over(red), red);
    }

    #[test]
    fn test_over_half_alpha_on_opaque() {
        let half_white = Rgba::new(255, 255, 255, 128);
        let out = half_white.over(Rgba::BLACK);
        assert_eq!(out.a, 255);
        assert!(out.r >= 127 && out.r <= 129, "got {}", out.r);
    }

    #[test]
    fn test_draw_clips_to_both_buffers() {
        let src = Canvas::new(4, 4, Rgba::WHITE);
        let mut dst = Canvas::new(3, 3, Rgba::BLACK);
        dst.draw(Rect::new(1, 1, 10, 10), &src, 2, 2, Blend::Src);
        assert_eq!(dst.get(0, 0), Some(Rgba::BLACK));
        assert_eq!(dst.get(1, 1), Some(Rgba::WHITE));
        assert_eq!(dst.get(2, 2), Some(Rgba::WHITE));
        // Above the target rectangle.
        assert_eq!(dst.get(1, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn test_draw_over_keeps_background_under_transparency() {
        let mut sprite = Canvas::new(2, 1, Rgba::TRANSPARENT);
        sprite.set(1, 0, Rgba::WHITE);
        let mut dst = Canvas::new(2, 1, Rgba::BLACK);
        dst.draw(Rect::new(0, 0, 2, 1), &sprite, 0, 0, Blend::Over);
        assert_eq!(dst.get(0, 0), Some(Rgba::BLACK));
        assert_eq!(dst.get(1, 0), Some(Rgba::WHITE));
    }

    #[test]
    fn test_rgba8_round_trip() {
        let mut canvas = Canvas::new(2, 2, Rgba::TRANSPARENT);
        canvas.set(1, 0, Rgba::new(1, 2, 3, 4));
        let bytes = canvas.to_rgba8();
        assert_eq!(&bytes[4..8], &[1, 2, 3, 4]);
        assert_eq!(Canvas::from_rgba8(2, 2, &bytes), Some(canvas));
        assert_eq!(Canvas::from_rgba8(3, 2, &bytes), None);
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut canvas = Canvas::new(1, 1, Rgba::BLACK);
        canvas.set(5, 5, Rgba::WHITE);
        assert_eq!(canvas.get(5, 5), None);
        canvas.fill_rect(Rect::new(0, 0, 100, 100), Rgba::WHITE, Blend::Src);
        assert_eq!(canvas.get(0, 0), Some(Rgba::WHITE));
    }
}
