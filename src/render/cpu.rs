use vello_cpu::kurbo::{Affine, BezPath, Rect, Stroke};

use crate::{
    foundation::core::{Point, Rgb8, Viewport},
    foundation::error::{ArchimedesError, ArchimedesResult},
    render::surface::{DrawSurface, FrameRGBA},
};

/// `vello_cpu` raster surface producing premultiplied RGBA8 frames.
pub struct CpuSurface {
    width: u16,
    height: u16,
    background: Option<Rgb8>,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl CpuSurface {
    /// `background: None` leaves cleared pixels transparent.
    pub fn new(viewport: Viewport, background: Option<Rgb8>) -> ArchimedesResult<Self> {
        let width: u16 = viewport
            .width
            .try_into()
            .map_err(|_| ArchimedesError::render("surface width exceeds u16"))?;
        let height: u16 = viewport
            .height
            .try_into()
            .map_err(|_| ArchimedesError::render("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(ArchimedesError::render("surface width/height must be > 0"));
        }
        Ok(Self {
            width,
            height,
            background,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: u32::from(self.width),
            height: u32::from(self.height),
        }
    }

    /// Rasterize everything painted since the last [`DrawSurface::clear`].
    pub fn finish(&mut self) -> ArchimedesResult<FrameRGBA> {
        clear_pixmap(&mut self.pixmap, [0, 0, 0, 0]);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

impl DrawSurface for CpuSurface {
    fn clear(&mut self) -> ArchimedesResult<()> {
        self.ctx = vello_cpu::RenderContext::new(self.width, self.height);
        if let Some(bg) = self.background {
            self.ctx.set_transform(Affine::IDENTITY);
            self.ctx.set_paint(paint(bg));
            self.ctx.fill_rect(&Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }
        Ok(())
    }

    fn stroke_polyline(
        &mut self,
        points: &[Point],
        color: Rgb8,
        width: f64,
    ) -> ArchimedesResult<()> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(());
        };
        if rest.is_empty() {
            return Ok(());
        }

        let mut path = BezPath::new();
        path.move_to(point_to_cpu(*first));
        for &p in rest {
            path.line_to(point_to_cpu(p));
        }

        self.ctx.set_transform(Affine::IDENTITY);
        self.ctx.set_paint(paint(color));
        self.ctx.set_stroke(Stroke::new(width));
        self.ctx.stroke_path(&path);
        Ok(())
    }

    fn fill_square(&mut self, origin: Point, side: f64, color: Rgb8) -> ArchimedesResult<()> {
        self.ctx.set_transform(Affine::IDENTITY);
        self.ctx.set_paint(paint(color));
        self.ctx.fill_rect(&Rect::new(
            origin.x,
            origin.y,
            origin.x + side,
            origin.y + side,
        ));
        Ok(())
    }
}

fn paint(c: Rgb8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
