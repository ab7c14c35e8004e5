// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Region of interest value type.
//!
//! A `Roi` is a rectangle in image pixel coordinates. It only exists with a
//! positive width and height; "no ROI" is represented as `None`.

use std::fmt;

/// A point in image space (pixels).
pub type ImagePoint = (i32, i32);

/// Rectangular region of interest in image space.
///
/// Fields are private so a degenerate rectangle can never be built; use
/// [`Roi::new`] or [`Roi::from_corners`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Roi {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

/// Why a drag did not produce a `Roi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoiRejection {
    /// One of the drag endpoints fell outside the displayed image.
    OutsideImage,
    /// Zero width or height after mapping (a click without movement), or a
    /// size that does not fit in `i32`.
    Degenerate,
}

impl fmt::Display for RoiRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoiRejection::OutsideImage => write!(f, "drag endpoint outside image"),
            RoiRejection::Degenerate => write!(f, "zero width or height"),
        }
    }
}

impl Roi {
    /// Create a ROI from its top-left corner and size.
    ///
    /// Returns `None` unless both `w` and `h` are strictly positive and the
    /// bottom-right corner is representable.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Option<Self> {
        let fits = x.checked_add(w).is_some() && y.checked_add(h).is_some();
        (w > 0 && h > 0 && fits).then_some(Self { x, y, w, h })
    }

    /// Build the rectangle spanned by two opposite corners, in any order.
    pub fn from_corners(a: ImagePoint, b: ImagePoint) -> Result<Self, RoiRejection> {
        let (x0, y0) = a;
        let (x1, y1) = b;
        let w = x0.max(x1).checked_sub(x0.min(x1));
        let h = y0.max(y1).checked_sub(y0.min(y1));
        match (w, h) {
            (Some(w), Some(h)) => Self::new(x0.min(x1), y0.min(y1), w, h),
            _ => None,
        }
        .ok_or(RoiRejection::Degenerate)
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn w(&self) -> i32 {
        self.w
    }

    pub fn h(&self) -> i32 {
        self.h
    }

    /// Bottom-right corner (exclusive).
    pub fn max(&self) -> ImagePoint {
        (self.x + self.w, self.y + self.h)
    }
}

impl fmt::Display for Roi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x={} y={} w={} h={}", self.x, self.y, self.w, self.h)
    }
}
