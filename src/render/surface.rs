use crate::{
    foundation::core::{Point, Rgb8},
    foundation::error::ArchimedesResult,
    project::frame::{ProjectedFrame, StyleConfig},
};

/// Raw output of a raster surface.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

/// Minimal painting interface the projected frame is drawn through.
pub trait DrawSurface {
    fn clear(&mut self) -> ArchimedesResult<()>;

    /// Stroke connected segments through `points` in one color.
    fn stroke_polyline(
        &mut self,
        points: &[Point],
        color: Rgb8,
        width: f64,
    ) -> ArchimedesResult<()>;

    /// Fill an axis-aligned square whose top-left corner is `origin`.
    fn fill_square(&mut self, origin: Point, side: f64, color: Rgb8) -> ArchimedesResult<()>;
}

/// Paint `frame` as a polyline or as point markers.
///
/// Polyline segments take the color of their end point; consecutive segments of the
/// same color are merged into one stroke.
pub fn draw_frame<S: DrawSurface + ?Sized>(
    surface: &mut S,
    frame: &ProjectedFrame,
    style: &StyleConfig,
) -> ArchimedesResult<()> {
    surface.clear()?;
    let width = style.effective_width();
    let pts = &frame.points;

    if style.points {
        for p in pts {
            surface.fill_square(p.point, width, p.color)?;
        }
        return Ok(());
    }

    if pts.len() < 2 {
        return Ok(());
    }

    let mut run = vec![pts[0].point];
    let mut run_color = pts[1].color;
    for pair in pts.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        if cur.color != run_color {
            surface.stroke_polyline(&run, run_color, width)?;
            run.clear();
            run.push(prev.point);
            run_color = cur.color;
        }
        run.push(cur.point);
    }
    surface.stroke_polyline(&run, run_color, width)
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
