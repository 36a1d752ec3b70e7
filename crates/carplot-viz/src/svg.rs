//! SVG backend: a top-down camera plus a string buffer.

use std::fmt::Write;

use carplot_core::{Scalar, Vec2};

use crate::primitive::{ArrowStyle, Color, Stroke};
use crate::scene::Scene;
use crate::surface::DrawSurface;

/// Screen mapping: `center` lands in the middle of the image, `ppm` pixels per metre, y up.
#[derive(Clone, Copy, Debug)]
pub struct Cam {
    pub center: Vec2,
    pub ppm: Scalar,
}

impl Cam {
    pub fn world_to_screen(&self, p: Vec2, w: u32, h: u32) -> Vec2 {
        let sx = (w as Scalar * 0.5) + (p.x - self.center.x) * self.ppm;
        let sy = (h as Scalar * 0.5) - (p.y - self.center.y) * self.ppm;
        Vec2::new(sx, sy)
    }
}

pub struct SvgSurface {
    cam: Cam,
    width: u32,
    height: u32,
    body: String,
}

fn css(c: Color) -> String {
    let [r, g, b] = c.rgb();
    format!("rgb({r},{g},{b})")
}

impl SvgSurface {
    pub fn new(cam: Cam, width: u32, height: u32) -> Self {
        Self { cam, width: width.max(1), height: height.max(1), body: String::new() }
    }

    /// Draws `scene` onto a fresh surface and returns the SVG document.
    pub fn render(scene: &Scene, cam: Cam, width: u32, height: u32) -> String {
        let mut s = Self::new(cam, width, height);
        scene.draw_on(&mut s);
        s.finish()
    }

    fn px(&self, p: Vec2) -> Vec2 { self.cam.world_to_screen(p, self.width, self.height) }

    fn stroke_px(&self, width: Scalar) -> Scalar { width.max(0.5) }

    fn points_attr(&self, points: &[Vec2]) -> String {
        let mut s = String::with_capacity(points.len() * 16);
        for p in points {
            let q = self.px(*p);
            let _ = write!(s, "{:.2},{:.2} ", q.x, q.y);
        }
        s.trim_end().to_string()
    }

    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n\
             <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n{body}</svg>\n",
            w = self.width, h = self.height, body = self.body
        )
    }
}

impl DrawSurface for SvgSurface {
    fn polyline(&mut self, points: &[Vec2], stroke: &Stroke) {
        let dash = if stroke.dashed { " stroke-dasharray=\"6,4\"" } else { "" };
        let line = format!(
            "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{:.2}\"{}/>\n",
            self.points_attr(points), css(stroke.color), self.stroke_px(stroke.width), dash
        );
        self.body.push_str(&line);
    }

    fn filled_polygon(&mut self, points: &[Vec2], color: Color) {
        let line = format!("<polygon points=\"{}\" fill=\"{}\"/>\n", self.points_attr(points), css(color));
        self.body.push_str(&line);
    }

    fn circle(&mut self, center: Vec2, radius: Scalar, stroke: &Stroke) {
        let c = self.px(center);
        let line = format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{:.2}\"/>\n",
            c.x, c.y, radius.abs() * self.cam.ppm, css(stroke.color), self.stroke_px(stroke.width)
        );
        self.body.push_str(&line);
    }

    fn arrow(&mut self, tail: Vec2, tip: Vec2, style: &ArrowStyle, color: Color) {
        let d = tip - tail;
        let len = d.length();
        if len <= Scalar::EPSILON { return; }
        let dir = d / len;
        let head_len = style.head_length.min(if style.includes_head { len } else { Scalar::INFINITY });
        let (base, point) = if style.includes_head {
            (tip - dir * head_len, tip)
        } else {
            (tip, tip + dir * head_len)
        };
        let side = dir.perp() * (style.head_width * 0.5);
        let shaft = format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{:.2}\"/>\n",
            self.px(tail).x, self.px(tail).y, self.px(base).x, self.px(base).y,
            css(color), (style.width * self.cam.ppm).max(1.0)
        );
        self.body.push_str(&shaft);
        self.filled_polygon(&[base + side, point, base - side], color);
    }

    fn text(&mut self, pos: Vec2, text: &str, color: Color, size: Scalar) {
        let p = self.px(pos);
        let escaped = text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;");
        let line = format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" fill=\"{}\" font-size=\"{:.1}\" font-style=\"italic\">{}</text>\n",
            p.x, p.y, css(color), size, escaped
        );
        self.body.push_str(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Primitive;
    use crate::scene::Tag;

    #[test]
    fn cam_centers_and_flips_y() {
        let cam = Cam { center: Vec2::ZERO, ppm: 10.0 };
        assert_eq!(cam.world_to_screen(Vec2::ZERO, 200, 100), Vec2::new(100.0, 50.0));
        assert_eq!(cam.world_to_screen(Vec2::new(1.0, 1.0), 200, 100), Vec2::new(110.0, 40.0));
    }

    #[test]
    fn renders_every_primitive_kind() {
        let mut scene = Scene::new();
        scene.push(Tag::BodyOutline, Primitive::Polyline {
            points: vec![Vec2::ZERO, Vec2::X], stroke: Stroke::dashed(Color::Blue),
        });
        scene.extend(Tag::CgMarker, crate::shapes::cg_sign(0.1));
        scene.extend(Tag::BodyVelocity, crate::shapes::vector_with_label(
            Vec2::ZERO, Vec2::new(1.0, 0.5), "V<1>", 0.3, 2.6, Color::Black,
        ));
        let svg = SvgSurface::render(&scene, Cam { center: Vec2::ZERO, ppm: 50.0 }, 400, 300);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("stroke-dasharray"));
        assert!(svg.contains("<circle"));
        assert!(svg.contains("<polygon"));
        assert!(svg.contains("V&lt;1&gt;"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
