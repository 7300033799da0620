//! Line-art monument traced with Bresenham segments
//!
//! Seven nested spires rise from a common base line. Each spire after the
//! first starts at an anchor picked while tracing the previous one, so the
//! layout has to be discovered by walking the lines pixel by pixel before
//! anything is drawn.

use glam::IVec2;

use crate::error::{Error, Result};
use crate::raster::{Canvas, Rgb, bold_pixel, bresenham};

/// Anchors are accepted within this many pixels of the target distance
const ANCHOR_TOLERANCE: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonumentParams {
    pub width: i32,
    pub height: i32,
    pub segments: i32,
}

impl Default for MonumentParams {
    fn default() -> Self {
        Self {
            width: 760,
            height: 500,
            segments: 9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    /// Left legs keep the lexicographically largest candidate, right legs the smallest
    fn prefer(self, current: Option<IVec2>, p: IVec2) -> Option<IVec2> {
        let key = |v: IVec2| (v.x, v.y);
        Some(match (self, current) {
            (_, None) => p,
            (Side::Left, Some(c)) => {
                if key(p) > key(c) {
                    p
                } else {
                    c
                }
            }
            (Side::Right, Some(c)) => {
                if key(p) < key(c) {
                    p
                } else {
                    c
                }
            }
        })
    }

    /// Middle bar slots written by this side: (6.5 segment mark, 7 segment mark)
    fn bar_slots(self) -> (usize, usize) {
        match self {
            Side::Left => (3, 0),
            Side::Right => (2, 1),
        }
    }
}

/// Geometry discovered by tracing the spires
#[derive(Debug, Clone, PartialEq)]
pub struct MonumentLayout {
    pub base_y: i32,
    pub top: IVec2,
    pub base_left: Vec<i32>,
    pub base_right: Vec<i32>,
    /// Start of each following spire, one per traced leg
    pub anchors_left: Vec<IVec2>,
    pub anchors_right: Vec<IVec2>,
    /// Upper bar (0, 1) and lower bar (3, 2) endpoints
    pub middle_bars: [IVec2; 4],
    pub bottom_apex: IVec2,
    pub upper_apex: IVec2,
}

struct Tracer {
    bar_gap: f32,
    first_seg: i32,
    middle_bars: [Option<IVec2>; 4],
}

impl Tracer {
    /// Walk one spire leg and return the next anchor
    fn trace_leg(&mut self, from: IVec2, to: IVec2, top: IVec2, side: Side) -> Result<IVec2> {
        let (slot_low, slot_high) = side.bar_slots();
        let mut near_end = None;
        let mut near_start = None;

        for p in bresenham(from, to) {
            let from_end = int_distance(to, p);
            if (from_end - self.bar_gap).abs() <= ANCHOR_TOLERANCE {
                near_end = side.prefer(near_end, p);
            }
            let from_start = int_distance(from, p);
            if (from_start - self.bar_gap).abs() <= ANCHOR_TOLERANCE {
                near_start = side.prefer(near_start, p);
            }
            if (from_start - self.first_seg as f32 * 6.5).abs() <= ANCHOR_TOLERANCE {
                self.middle_bars[slot_low].get_or_insert(p);
            }
            if (from_start - (self.first_seg * 7) as f32).abs() <= ANCHOR_TOLERANCE {
                self.middle_bars[slot_high].get_or_insert(p);
            }
        }

        match (near_end, near_start) {
            (Some(a), Some(b)) => Ok(if top.y - a.y < top.y - b.y { a } else { b }),
            (Some(a), None) | (None, Some(a)) => Ok(a),
            (None, None) => Err(Error::Layout(format!(
                "no anchor on {side:?} leg {from} -> {to}"
            ))),
        }
    }
}

/// Euclidean distance truncated to whole pixels
fn int_distance(a: IVec2, b: IVec2) -> f32 {
    let d = (a - b).abs();
    ((d.x * d.x + d.y * d.y) as f32).sqrt().trunc()
}

/// Trace every spire and derive the inner triangles
pub fn layout(params: &MonumentParams) -> Result<MonumentLayout> {
    if params.segments < 3 || params.width <= 0 || params.height <= 0 {
        return Err(Error::Layout(format!("unusable monument parameters {params:?}")));
    }

    let mid_x = params.width / 2;
    let base_y = params.height / 6;
    let top = IVec2::new(mid_x, base_y * 5);
    let gap_x = mid_x / params.segments;
    let legs = (params.segments - 2) as usize;

    let base_left: Vec<i32> = (1..=legs as i32).map(|i| mid_x - gap_x * i).collect();
    let base_right: Vec<i32> = (1..=legs as i32).map(|i| mid_x + gap_x * i).collect();

    let dy = top.y - base_y;
    let dx = top.x - base_left[0];
    let mut tracer = Tracer {
        bar_gap: (dy / 6 + 20) as f32,
        first_seg: (((dx * dx + dy * dy) as f32).sqrt() / 20.0) as i32,
        middle_bars: [None; 4],
    };

    let mut anchors_left = Vec::with_capacity(legs);
    let mut anchors_right = Vec::with_capacity(legs);
    anchors_left.push(tracer.trace_leg(IVec2::new(base_left[0], base_y), top, top, Side::Left)?);
    anchors_right.push(tracer.trace_leg(IVec2::new(base_right[0], base_y), top, top, Side::Right)?);
    for i in 1..legs {
        let (left_start, right_start) = (anchors_left[i - 1], anchors_right[i - 1]);
        anchors_left.push(tracer.trace_leg(
            left_start,
            IVec2::new(base_left[i], base_y),
            top,
            Side::Left,
        )?);
        anchors_right.push(tracer.trace_leg(
            right_start,
            IVec2::new(base_right[i], base_y),
            top,
            Side::Right,
        )?);
    }

    let mut middle_bars = [IVec2::ZERO; 4];
    for (slot, bar) in middle_bars.iter_mut().zip(tracer.middle_bars) {
        *slot = bar.ok_or_else(|| Error::Layout("middle bar anchor not found".into()))?;
    }

    let bottom_apex = IVec2::new(mid_x, base_y + dy / 12);
    let lower_tri_height = middle_bars[3].y - bottom_apex.y;
    let upper_mid_x = middle_bars[0].x + ((middle_bars[1].x - middle_bars[0].x) >> 1);
    let upper_apex = IVec2::new(upper_mid_x, middle_bars[0].y + lower_tri_height);

    Ok(MonumentLayout {
        base_y,
        top,
        base_left,
        base_right,
        anchors_left,
        anchors_right,
        middle_bars,
        bottom_apex,
        upper_apex,
    })
}

fn draw_bold(canvas: &mut Canvas, from: IVec2, to: IVec2) {
    for p in bresenham(from, to) {
        for q in bold_pixel(p) {
            canvas.put_pixel(q.x, q.y, Rgb::BLACK);
        }
    }
}

/// Black monument on a white canvas
pub fn render_monument(params: &MonumentParams) -> Result<Canvas> {
    let l = layout(params)?;
    let mut canvas = Canvas::new(params.width as u32, params.height as u32, Rgb::WHITE);
    let base = |x: i32| IVec2::new(x, l.base_y);

    draw_bold(&mut canvas, base(0), base(params.width));
    draw_bold(&mut canvas, base(l.base_left[0]), l.top);
    draw_bold(&mut canvas, base(l.base_right[0]), l.top);
    for i in 1..l.base_left.len() {
        draw_bold(&mut canvas, l.anchors_left[i - 1], base(l.base_left[i]));
        draw_bold(&mut canvas, l.anchors_right[i - 1], base(l.base_right[i]));
    }

    let [m0, m1, m2, m3] = l.middle_bars;
    let thin = [
        (base(l.base_left[0]), l.bottom_apex),
        (base(l.base_right[0]), l.bottom_apex),
        (m0, m1),
        (m2, m3),
        (m2, l.bottom_apex),
        (m3, l.bottom_apex),
        (m0, l.upper_apex),
        (m1, l.upper_apex),
        (l.top, l.upper_apex),
    ];
    for (from, to) in thin {
        canvas.draw_line(from, to, Rgb::BLACK);
    }

    log::debug!("Monument anchors L {:?} R {:?}", l.anchors_left, l.anchors_right);
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_constants() {
        let l = layout(&MonumentParams::default()).expect("layout");
        assert_eq!(l.base_y, 83);
        assert_eq!(l.top, IVec2::new(380, 415));
        assert_eq!(l.base_left, vec![338, 296, 254, 212, 170, 128, 86]);
        assert_eq!(l.base_right[6], 674);
        assert_eq!(l.bottom_apex, IVec2::new(380, 110));
        assert_eq!(l.anchors_left.len(), 7);
    }

    #[test]
    fn test_anchors_mirror_across_centre() {
        let l = layout(&MonumentParams::default()).expect("layout");
        for (a, b) in l.anchors_left.iter().zip(&l.anchors_right) {
            assert!(a.x < 380 && b.x > 380);
            // Tie-breaks differ per side, so allow a few pixels of drift
            assert!((380 - a.x - (b.x - 380)).abs() <= 2);
            assert!((a.y - b.y).abs() <= 4);
        }
    }

    #[test]
    fn test_middle_bars_sit_on_first_legs() {
        let l = layout(&MonumentParams::default()).expect("layout");
        let [m0, m1, m2, m3] = l.middle_bars;
        assert!(m0.x < 380 && m3.x < 380);
        assert!(m1.x > 380 && m2.x > 380);
        // The 7 segment mark is further up the leg than the 6.5 mark
        assert!(m0.y > m3.y);
        assert!(l.upper_apex.y > m0.y);
    }

    #[test]
    fn test_render_inks_base_and_top() {
        let canvas = render_monument(&MonumentParams::default()).expect("render");
        assert_eq!(canvas.get_pixel(5, 83), Some(Rgb::BLACK));
        assert_eq!(canvas.get_pixel(380, 415), Some(Rgb::BLACK));
        assert_eq!(canvas.get_pixel(380, 480), Some(Rgb::WHITE));
        assert!(canvas.to_ascii(76).contains('#'));
    }

    #[test]
    fn test_tiny_canvas_has_no_anchor() {
        let params = MonumentParams {
            width: 20,
            height: 12,
            segments: 9,
        };
        assert!(matches!(layout(&params), Err(Error::Layout(_))));
    }

    #[test]
    fn test_too_few_segments_rejected() {
        let params = MonumentParams {
            segments: 2,
            ..Default::default()
        };
        assert!(matches!(render_monument(&params), Err(Error::Layout(_))));
    }
}
