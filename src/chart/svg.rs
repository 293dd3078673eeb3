//! Minimal SVG document builder
//!
//! Markup is accumulated into a `String`; write failures cannot occur on a
//! `String` sink, so the individual drawing calls are infallible.

use std::fmt::Write as _;

/// Horizontal text anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn attr(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// An SVG document under construction.
pub struct SvgCanvas {
    width: f64,
    height: f64,
    body: String,
}

impl SvgCanvas {
    /// Start a document with a white background.
    pub fn new(width: f64, height: f64) -> Self {
        let mut canvas = Self {
            width,
            height,
            body: String::new(),
        };
        canvas.rect(0.0, 0.0, width, height, "#ffffff");
        canvas
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str) {
        let _ = writeln!(
            self.body,
            "  <rect x='{x:.1}' y='{y:.1}' width='{w:.1}' height='{h:.1}' fill='{fill}'/>",
        );
    }

    pub fn frame(&mut self, x: f64, y: f64, w: f64, h: f64, stroke: &str) {
        let _ = writeln!(
            self.body,
            "  <rect x='{x:.1}' y='{y:.1}' width='{w:.1}' height='{h:.1}' fill='none' stroke='{stroke}' stroke-width='1'/>",
        );
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str, width: f64) {
        let _ = writeln!(
            self.body,
            "  <line x1='{x1:.1}' y1='{y1:.1}' x2='{x2:.1}' y2='{y2:.1}' stroke='{stroke}' stroke-width='{width:.1}'/>",
        );
    }

    pub fn dashed_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str, width: f64) {
        let _ = writeln!(
            self.body,
            "  <line x1='{x1:.1}' y1='{y1:.1}' x2='{x2:.1}' y2='{y2:.1}' stroke='{stroke}' stroke-width='{width:.1}' stroke-dasharray='6 4'/>",
        );
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str) {
        let _ = writeln!(
            self.body,
            "  <circle cx='{cx:.1}' cy='{cy:.1}' r='{r:.1}' fill='{fill}'/>",
        );
    }

    pub fn polyline(&mut self, points: &[(f64, f64)], stroke: &str, width: f64) {
        if points.len() < 2 {
            return;
        }
        let mut attr = String::new();
        for (x, y) in points {
            let _ = write!(attr, "{x:.1},{y:.1} ");
        }
        let _ = writeln!(
            self.body,
            "  <polyline points='{}' fill='none' stroke='{stroke}' stroke-width='{width:.1}' stroke-linejoin='round'/>",
            attr.trim_end(),
        );
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, size: f64, fill: &str, anchor: Anchor) {
        let _ = writeln!(
            self.body,
            "  <text x='{x:.1}' y='{y:.1}' font-size='{size:.0}' fill='{fill}' text-anchor='{}' font-family='sans-serif'>{}</text>",
            anchor.attr(),
            escape(content),
        );
    }

    pub fn bold_text(
        &mut self,
        x: f64,
        y: f64,
        content: &str,
        size: f64,
        fill: &str,
        anchor: Anchor,
    ) {
        let _ = writeln!(
            self.body,
            "  <text x='{x:.1}' y='{y:.1}' font-size='{size:.0}' fill='{fill}' text-anchor='{}' font-family='sans-serif' font-weight='bold'>{}</text>",
            anchor.attr(),
            escape(content),
        );
    }

    /// Close the document and return the markup.
    pub fn finish(self) -> String {
        format!(
            "<svg xmlns='http://www.w3.org/2000/svg' width='{:.0}' height='{:.0}' viewBox='0 0 {:.0} {:.0}' role='img'>\n{}</svg>\n",
            self.width, self.height, self.width, self.height, self.body,
        )
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
