use std::fmt::Write as _;

use crate::{
    foundation::core::{Point, Rgb8, Viewport},
    foundation::error::ArchimedesResult,
    render::surface::DrawSurface,
};

/// Vector surface that records the frame as an SVG document.
#[derive(Clone, Debug)]
pub struct SvgSurface {
    viewport: Viewport,
    background: Option<Rgb8>,
    body: String,
}

impl SvgSurface {
    pub fn new(viewport: Viewport, background: Option<Rgb8>) -> Self {
        Self {
            viewport,
            background,
            body: String::new(),
        }
    }

    /// Complete `<svg>` document for everything drawn since the last clear.
    pub fn to_svg_string(&self) -> String {
        let (w, h) = (self.viewport.width, self.viewport.height);
        let mut out = String::with_capacity(self.body.len() + 256);
        out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        out.push('\n');
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

impl DrawSurface for SvgSurface {
    fn clear(&mut self) -> ArchimedesResult<()> {
        self.body.clear();
        if let Some(bg) = self.background {
            let _ = writeln!(
                self.body,
                r#"<rect x="0" y="0" width="{}" height="{}" fill="{bg}"/>"#,
                self.viewport.width, self.viewport.height
            );
        }
        Ok(())
    }

    fn stroke_polyline(
        &mut self,
        points: &[Point],
        color: Rgb8,
        width: f64,
    ) -> ArchimedesResult<()> {
        if points.len() < 2 {
            return Ok(());
        }
        self.body.push_str(r#"<polyline fill="none" points=""#);
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                self.body.push(' ');
            }
            let _ = write!(self.body, "{:.2},{:.2}", p.x, p.y);
        }
        let _ = writeln!(
            self.body,
            r#"" stroke="{color}" stroke-width="{width}" stroke-linejoin="round" stroke-linecap="round"/>"#
        );
        Ok(())
    }

    fn fill_square(&mut self, origin: Point, side: f64, color: Rgb8) -> ArchimedesResult<()> {
        let _ = writeln!(
            self.body,
            r#"<rect x="{:.2}" y="{:.2}" width="{side}" height="{side}" fill="{color}"/>"#,
            origin.x, origin.y
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
