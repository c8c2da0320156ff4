//! Placement heuristics for notes on the board canvas.
//!
//! Overlap avoidance is advisory: it is applied when the app places a note
//! (add, duplicate, paste, arrange), never when a user drags one.

use crate::models::{Note, NotePatch, NoteUpdate};
use crate::util::title_sort_key;

/// Gap that must separate two notes on at least one axis.
pub(crate) const MIN_MARGIN: f64 = 20.0;
/// Side length of the square canvas.
pub(crate) const BOARD_SIZE: f64 = 2000.0;

const SCAN_STEP: f64 = 50.0;
const SCAN_INSET: f64 = 10.0;
const MAX_CANDIDATES: usize = 1000;

const ARRANGE_WIDTH: f64 = 1600.0;
const ARRANGE_PADDING: f64 = 20.0;

const VIEW_PADDING: f64 = 40.0;

pub(crate) const MIN_WIDTH: f64 = 120.0;
pub(crate) const MIN_HEIGHT: f64 = 80.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn at(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn of(note: &Note) -> Self {
        let f = &note.fields;
        Self::new(f.x, f.y, f.width, f.height)
    }

    fn right(&self) -> f64 {
        self.x + self.width
    }

    fn bottom(&self) -> f64 {
        self.y + self.height
    }

    fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True unless the two rectangles are more than `MIN_MARGIN` apart on some axis.
    pub fn collides(&self, other: &Rect) -> bool {
        !(self.right() + MIN_MARGIN < other.x
            || self.x - MIN_MARGIN > other.right()
            || self.bottom() + MIN_MARGIN < other.y
            || self.y - MIN_MARGIN > other.bottom())
    }

    fn is_free(&self, others: &[Rect]) -> bool {
        !others.iter().any(|o| self.collides(o))
    }
}

/// Scrolled window onto the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Viewport {
    pub scroll_left: f64,
    pub scroll_top: f64,
    pub client_width: f64,
    pub client_height: f64,
}

impl Viewport {
    pub fn from_element(el: &web_sys::Element) -> Self {
        Self {
            scroll_left: el.scroll_left() as f64,
            scroll_top: el.scroll_top() as f64,
            client_width: el.client_width() as f64,
            client_height: el.client_height() as f64,
        }
    }
}

pub(crate) fn note_rects(notes: &[Note]) -> Vec<Rect> {
    notes.iter().map(Rect::of).collect()
}

/// Row scan from `start`: step right, wrap to a new row when the note would
/// cross `right_edge`. Gives up after `MAX_CANDIDATES` positions.
fn scan(start: Point, size: Size, others: &[Rect], right_edge: f64) -> Option<Point> {
    let mut x = start.x;
    let mut row_y = start.y;

    for _ in 0..MAX_CANDIDATES {
        let candidate = Point::new(x, row_y);
        if Rect::at(candidate, size).is_free(others) {
            return Some(candidate);
        }

        x += SCAN_STEP;
        if x + size.width > right_edge {
            x = start.x;
            row_y += SCAN_STEP;
        }
    }

    None
}

/// First free spot inside the visible part of the board, or `None` when the board is full.
pub(crate) fn find_empty_spot(others: &[Rect], size: Size, viewport: Viewport) -> Option<Point> {
    let start = Point::new(
        viewport.scroll_left + SCAN_INSET,
        viewport.scroll_top + SCAN_INSET,
    );
    scan(
        start,
        size,
        others,
        viewport.scroll_left + viewport.client_width,
    )
}

/// Nearest collision-free position to `proposed`.
///
/// Candidates sit right of, below, left of and above each colliding note,
/// separated by the margin. When none of them is free, a row scan from the
/// proposed point is used.
pub(crate) fn resolve_collisions(proposed: Point, size: Size, others: &[Rect]) -> Option<Point> {
    let proposed = Point::new(proposed.x.max(0.0), proposed.y.max(0.0));
    let rect = Rect::at(proposed, size);
    if rect.is_free(others) {
        return Some(proposed);
    }

    let gap = MIN_MARGIN + 1.0;
    let best = others
        .iter()
        .filter(|o| rect.collides(o))
        .flat_map(|o| {
            [
                Point::new(o.right() + gap, proposed.y),
                Point::new(proposed.x, o.bottom() + gap),
                Point::new(o.x - size.width - gap, proposed.y),
                Point::new(proposed.x, o.y - size.height - gap),
            ]
        })
        .filter(|c| c.x >= 0.0 && c.y >= 0.0)
        .filter(|c| Rect::at(*c, size).is_free(others))
        .min_by(|a, b| {
            a.distance_sq(proposed)
                .total_cmp(&b.distance_sq(proposed))
        });

    best.or_else(|| scan(proposed, size, others, BOARD_SIZE.max(proposed.x + size.width)))
}

/// Place a batch of notes one after another, each avoiding the board and
/// the ones placed before it. Notes with no free spot keep their position.
pub(crate) fn place_batch(items: &[Rect], existing: &[Rect]) -> Vec<Point> {
    let mut occupied = existing.to_vec();
    items
        .iter()
        .map(|item| {
            let size = Size::new(item.width, item.height);
            let origin = Point::new(item.x, item.y);
            let placed = resolve_collisions(origin, size, &occupied).unwrap_or(origin);
            occupied.push(Rect::at(placed, size));
            placed
        })
        .collect()
}

/// Row packing sorted by title: one position patch per note.
pub(crate) fn arrange(notes: &[Note]) -> Vec<NotePatch> {
    let mut sorted: Vec<&Note> = notes.iter().collect();
    sorted.sort_by(|a, b| {
        title_sort_key(&a.fields.name)
            .cmp(&title_sort_key(&b.fields.name))
            .then(a.id.cmp(&b.id))
    });

    let mut x = ARRANGE_PADDING;
    let mut y = ARRANGE_PADDING;
    let mut row_height: f64 = 0.0;
    let mut patches = Vec::with_capacity(sorted.len());

    for note in sorted {
        let f = &note.fields;
        if x + f.width + ARRANGE_PADDING > ARRANGE_WIDTH && !patches.is_empty() {
            x = ARRANGE_PADDING;
            y += row_height + ARRANGE_PADDING;
            row_height = 0.0;
        }

        patches.push(NotePatch::new(note.id, NoteUpdate::position(x, y)));
        row_height = row_height.max(f.height);
        x += f.width + ARRANGE_PADDING;
    }

    patches
}

pub(crate) fn drag_target(origin: Point, pointer_start: Point, pointer_now: Point) -> Point {
    Point::new(
        (origin.x + pointer_now.x - pointer_start.x).max(0.0),
        (origin.y + pointer_now.y - pointer_start.y).max(0.0),
    )
}

pub(crate) fn resize_target(size: Size, delta: Point) -> Size {
    Size::new(
        (size.width + delta.x).max(MIN_WIDTH),
        (size.height + delta.y).max(MIN_HEIGHT),
    )
}

/// Scroll offset that centers the padded bounding box of all notes.
pub(crate) fn zoom_fit(rects: &[Rect], viewport: Viewport) -> Option<Point> {
    let first = rects.first()?;
    let (mut min_x, mut min_y) = (first.x, first.y);
    let (mut max_x, mut max_y) = (first.right(), first.bottom());
    for r in &rects[1..] {
        min_x = min_x.min(r.x);
        min_y = min_y.min(r.y);
        max_x = max_x.max(r.right());
        max_y = max_y.max(r.bottom());
    }

    let min_x = min_x - VIEW_PADDING;
    let min_y = min_y - VIEW_PADDING;
    let content_w = max_x + VIEW_PADDING - min_x;
    let content_h = max_y + VIEW_PADDING - min_y;

    Some(Point::new(
        (min_x - (viewport.client_width - content_w) / 2.0).max(0.0),
        (min_y - (viewport.client_height - content_h) / 2.0).max(0.0),
    ))
}

/// Scroll offset that puts the average note center in the middle of the view.
pub(crate) fn center_view(rects: &[Rect], viewport: Viewport) -> Point {
    if rects.is_empty() {
        return Point::default();
    }

    let n = rects.len() as f64;
    let (sum_x, sum_y) = rects.iter().fold((0.0, 0.0), |(sx, sy), r| {
        let c = r.center();
        (sx + c.x, sy + c.y)
    });

    Point::new(
        (sum_x / n - viewport.client_width / 2.0).max(0.0),
        (sum_y / n - viewport.client_height / 2.0).max(0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NoteFields, Weekday};

    fn note(id: i64, name: &str, x: f64, y: f64, w: f64, h: f64) -> Note {
        Note {
            id,
            fields: NoteFields {
                name: name.to_string(),
                ..NoteFields::blank(Weekday::Montag, x, y, w, h, false)
            },
        }
    }

    fn viewport() -> Viewport {
        Viewport {
            scroll_left: 0.0,
            scroll_top: 0.0,
            client_width: 1000.0,
            client_height: 800.0,
        }
    }

    #[test]
    fn test_collision_respects_margin() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(a.collides(&Rect::new(110.0, 0.0, 50.0, 50.0)));
        assert!(a.collides(&Rect::new(120.0, 0.0, 50.0, 50.0)));
        assert!(!a.collides(&Rect::new(121.0, 0.0, 50.0, 50.0)));
        assert!(!a.collides(&Rect::new(0.0, 121.0, 50.0, 50.0)));
    }

    #[test]
    fn test_find_empty_spot_on_empty_board() {
        let spot = find_empty_spot(&[], Size::new(240.0, 150.0), viewport());
        assert_eq!(spot, Some(Point::new(10.0, 10.0)));

        let scrolled = Viewport {
            scroll_left: 300.0,
            scroll_top: 200.0,
            ..viewport()
        };
        let spot = find_empty_spot(&[], Size::new(240.0, 150.0), scrolled);
        assert_eq!(spot, Some(Point::new(310.0, 210.0)));
    }

    #[test]
    fn test_find_empty_spot_steps_right_past_a_note() {
        let taken = [Rect::new(10.0, 10.0, 240.0, 150.0)];
        let spot = find_empty_spot(&taken, Size::new(240.0, 150.0), viewport())
            .expect("board has room");
        // 10 + 240 + 20 = 270 must be strictly exceeded.
        assert_eq!(spot, Point::new(310.0, 10.0));
    }

    #[test]
    fn test_find_empty_spot_wraps_rows() {
        let taken = [Rect::new(0.0, 0.0, 1000.0, 100.0)];
        let spot = find_empty_spot(&taken, Size::new(240.0, 150.0), viewport())
            .expect("board has room");
        assert_eq!(spot.x, 10.0);
        assert!(spot.y > 120.0);
    }

    #[test]
    fn test_find_empty_spot_full_board() {
        let taken = [Rect::new(0.0, 0.0, 5000.0, 100_000.0)];
        assert_eq!(
            find_empty_spot(&taken, Size::new(240.0, 150.0), viewport()),
            None
        );
    }

    #[test]
    fn test_resolve_collisions_keeps_free_position() {
        let others = [Rect::new(500.0, 500.0, 100.0, 100.0)];
        let p = resolve_collisions(Point::new(20.0, 20.0), Size::new(100.0, 100.0), &others);
        assert_eq!(p, Some(Point::new(20.0, 20.0)));
    }

    #[test]
    fn test_resolve_collisions_moves_to_nearest_side() {
        let others = [Rect::new(100.0, 100.0, 240.0, 150.0)];
        let size = Size::new(240.0, 150.0);
        let p = resolve_collisions(Point::new(120.0, 120.0), size, &others)
            .expect("free candidate");
        assert!(Rect::at(p, size).is_free(&others));
        // Below (y = 271) is closer than right (x = 361).
        assert_eq!(p, Point::new(120.0, 271.0));
    }

    #[test]
    fn test_resolve_collisions_never_negative() {
        let others = [Rect::new(0.0, 0.0, 240.0, 150.0)];
        let p = resolve_collisions(Point::new(-30.0, 5.0), Size::new(240.0, 150.0), &others)
            .expect("free candidate");
        assert!(p.x >= 0.0 && p.y >= 0.0);
    }

    #[test]
    fn test_place_batch_avoids_earlier_items() {
        let items = [
            Rect::new(10.0, 10.0, 100.0, 100.0),
            Rect::new(10.0, 10.0, 100.0, 100.0),
        ];
        let placed = place_batch(&items, &[]);
        assert_eq!(placed[0], Point::new(10.0, 10.0));
        assert_ne!(placed[1], placed[0]);
        assert!(!Rect::at(placed[1], Size::new(100.0, 100.0))
            .collides(&Rect::at(placed[0], Size::new(100.0, 100.0))));
    }

    #[test]
    fn test_arrange_sorts_by_plain_title_and_packs_rows() {
        let notes = vec![
            note(1, "<b>Zeichnen</b>", 0.0, 0.0, 700.0, 100.0),
            note(2, "apfel", 0.0, 0.0, 700.0, 200.0),
            note(3, "Mathe", 0.0, 0.0, 700.0, 150.0),
        ];
        let patches = arrange(&notes);
        let order: Vec<i64> = patches.iter().map(|p| p.id).collect();
        assert_eq!(order, vec![2, 3, 1]);

        let pos: Vec<(f64, f64)> = patches
            .iter()
            .map(|p| (p.update.x.unwrap_or(-1.0), p.update.y.unwrap_or(-1.0)))
            .collect();
        assert_eq!(pos[0], (20.0, 20.0));
        assert_eq!(pos[1], (740.0, 20.0));
        // Row height is the tallest note of the first row (200).
        assert_eq!(pos[2], (20.0, 240.0));
    }

    #[test]
    fn test_arrange_sorts_umlauts_with_base_letter() {
        let notes = vec![
            note(1, "Zeichnen", 0.0, 0.0, 240.0, 150.0),
            note(2, "Äpfel", 0.0, 0.0, 240.0, 150.0),
            note(3, "Mathe", 0.0, 0.0, 240.0, 150.0),
        ];
        let order: Vec<i64> = arrange(&notes).iter().map(|p| p.id).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn test_arrange_keeps_oversized_note_on_first_row() {
        let notes = vec![note(1, "a", 0.0, 0.0, 2000.0, 100.0)];
        let patches = arrange(&notes);
        assert_eq!(patches[0].update.x, Some(20.0));
        assert_eq!(patches[0].update.y, Some(20.0));
    }

    #[test]
    fn test_drag_and_resize_clamp() {
        let p = drag_target(
            Point::new(50.0, 50.0),
            Point::new(100.0, 100.0),
            Point::new(20.0, 130.0),
        );
        assert_eq!(p, Point::new(0.0, 80.0));

        let s = resize_target(Size::new(240.0, 150.0), Point::new(-200.0, 10.0));
        assert_eq!(s, Size::new(MIN_WIDTH, 160.0));
    }

    #[test]
    fn test_zoom_fit_and_center_view() {
        assert_eq!(zoom_fit(&[], viewport()), None);

        let rects = [Rect::new(1000.0, 1000.0, 200.0, 100.0)];
        let p = zoom_fit(&rects, viewport()).expect("non-empty");
        // Box 960..1240 x 960..1140, centered in 1000x800.
        assert_eq!(p, Point::new(600.0, 650.0));

        let c = center_view(&rects, viewport());
        assert_eq!(c, Point::new(600.0, 650.0));

        assert_eq!(center_view(&[], viewport()), Point::new(0.0, 0.0));
        let near_origin = [Rect::new(0.0, 0.0, 100.0, 100.0)];
        assert_eq!(center_view(&near_origin, viewport()), Point::new(0.0, 0.0));
    }
}
