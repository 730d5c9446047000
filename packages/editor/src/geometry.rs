//! # Page widget geometry
//!
//! Hit-testing shared by internal drags and incoming file drops: which page
//! widget is nearest to the pointer, and whether the pointer sits on its
//! leading or trailing half.
//!
//! All coordinates live in one space chosen by the host (usually screen
//! coordinates). The editor never converts between spaces.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn offset(self, by: Point) -> Point {
        Point::new(self.x + by.x, self.y + by.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

/// Provider of on-screen page widget bounds, indexed by page.
pub trait PageLayout {
    fn page_count(&self) -> usize;

    fn page_rect(&self, index: usize) -> Option<Rect>;

    /// Page whose widget contains `point` (lowest index when widgets overlap)
    fn page_at(&self, point: Point) -> Option<usize> {
        (0..self.page_count()).find(|&index| {
            self.page_rect(index)
                .is_some_and(|rect| rect.contains(point))
        })
    }
}

impl PageLayout for [Rect] {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn page_rect(&self, index: usize) -> Option<Rect> {
        self.get(index).copied()
    }
}

impl PageLayout for Vec<Rect> {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn page_rect(&self, index: usize) -> Option<Rect> {
        self.get(index).copied()
    }
}

/// Row-major grid of equally sized thumbnails.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridLayout {
    pub columns: usize,
    pub thumb_width: f64,
    pub thumb_height: f64,
    pub padding: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: 4,
            thumb_width: 120.0,
            thumb_height: 160.0,
            padding: 12.0,
        }
    }
}

impl GridLayout {
    /// Lay out `count` page widgets
    pub fn rects(&self, count: usize) -> Vec<Rect> {
        let columns = self.columns.max(1);
        let step_x = self.thumb_width + self.padding * 2.0;
        let step_y = self.thumb_height + self.padding * 2.0;

        (0..count)
            .map(|index| {
                let column = (index % columns) as f64;
                let row = (index / columns) as f64;
                Rect::new(
                    column * step_x + self.padding,
                    row * step_y + self.padding,
                    self.thumb_width,
                    self.thumb_height,
                )
            })
            .collect()
    }
}

/// Index of the widget whose center is closest to `point`.
///
/// Widgets are scanned in index order and only a strictly smaller distance
/// replaces the current best, so the lowest index wins ties.
pub fn nearest_page<L: PageLayout + ?Sized>(layout: &L, point: Point) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for index in 0..layout.page_count() {
        let Some(rect) = layout.page_rect(index) else {
            continue;
        };
        let distance = rect.center().distance_sq(point);
        match best {
            Some((_, closest)) if distance >= closest => {}
            _ => best = Some((index, distance)),
        }
    }

    best.map(|(index, _)| index)
}

/// Pointer on or right of the widget's horizontal center inserts after it.
pub fn is_insert_after(rect: &Rect, x: f64) -> bool {
    x >= rect.center().x
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    /// Page currently hovered
    pub target: usize,
    pub insert_after: bool,
}

impl DropTarget {
    /// Insertion slot: `target` or `target + 1`
    pub fn drop_index(&self) -> usize {
        if self.insert_after {
            self.target + 1
        } else {
            self.target
        }
    }
}

pub fn resolve_drop<L: PageLayout + ?Sized>(layout: &L, point: Point) -> Option<DropTarget> {
    let target = nearest_page(layout, point)?;
    let rect = layout.page_rect(target)?;
    Some(DropTarget {
        target,
        insert_after: is_insert_after(&rect, point.x),
    })
}

/// Vertical insertion line drawn beside the target widget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InsertionIndicator {
    pub x: f64,
    pub top: f64,
    pub bottom: f64,
}

impl InsertionIndicator {
    pub fn beside(rect: &Rect, insert_after: bool, gap: f64) -> Self {
        let x = if insert_after {
            rect.right() + gap
        } else {
            rect.left() - gap
        };
        Self {
            x,
            top: rect.top(),
            bottom: rect.bottom(),
        }
    }
}
