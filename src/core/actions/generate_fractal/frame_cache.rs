use crate::core::data::frame::Frame;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::pixel_value::PixelValue;
use crate::core::data::viewport::Viewport;
use log::debug;
use thiserror::Error;

/// How far (in pixels) a pan may be from a whole number of pixels and still
/// count as an exact shift.
pub const SHIFT_TOLERANCE_PIXELS: f64 = 1e-3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheEntryError {
    #[error("cache entry holds {actual} values but the raster has {expected} pixels")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("cache entry marks {actual} rows but the raster has {expected}")]
    RowCountMismatch { expected: usize, actual: usize },
}

/// Raw values of the most recently completed frame.
///
/// Mirrored rows are only as exact as the reflection that produced them, so
/// they are never handed out as a source.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    viewport: Viewport,
    pixel_rect: PixelRect,
    values: Vec<PixelValue>,
    mirrored_rows: Vec<bool>,
}

impl CacheEntry {
    pub fn new(
        viewport: Viewport,
        pixel_rect: PixelRect,
        values: Vec<PixelValue>,
    ) -> Result<Self, CacheEntryError> {
        if values.len() != pixel_rect.size() {
            return Err(CacheEntryError::SizeMismatch {
                expected: pixel_rect.size(),
                actual: values.len(),
            });
        }

        Ok(Self {
            viewport,
            pixel_rect,
            values,
            mirrored_rows: vec![false; pixel_rect.height() as usize],
        })
    }

    /// Marks rows that were copied from their reflection instead of evaluated.
    pub fn with_mirrored_rows(mut self, mirrored_rows: Vec<bool>) -> Result<Self, CacheEntryError> {
        if mirrored_rows.len() != self.pixel_rect.height() as usize {
            return Err(CacheEntryError::RowCountMismatch {
                expected: self.pixel_rect.height() as usize,
                actual: mirrored_rows.len(),
            });
        }

        self.mirrored_rows = mirrored_rows;
        Ok(self)
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    #[must_use]
    pub fn values(&self) -> &[PixelValue] {
        &self.values
    }

    #[must_use]
    pub fn is_mirrored_row(&self, y: u32) -> bool {
        self.mirrored_rows.get(y as usize).copied().unwrap_or(false)
    }
}

impl From<&Frame> for CacheEntry {
    fn from(frame: &Frame) -> Self {
        Self {
            viewport: frame.viewport,
            pixel_rect: frame.pixel_rect,
            values: frame.values.clone(),
            mirrored_rows: frame.mirrored_rows.clone(),
        }
    }
}

/// Whole-pixel displacement between a cached frame and a new one. Destination
/// `(x, y)` reads source `(x - offset_x, y + offset_y)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CacheShift {
    pub offset_x: i64,
    pub offset_y: i64,
}

impl CacheShift {
    #[must_use]
    pub fn source_of(&self, x: u32, y: u32, pixel_rect: PixelRect) -> Option<(u32, u32)> {
        let source_x = i64::from(x) - self.offset_x;
        let source_y = i64::from(y) + self.offset_y;

        let inside = (0..i64::from(pixel_rect.width())).contains(&source_x)
            && (0..i64::from(pixel_rect.height())).contains(&source_y);

        inside.then_some((source_x as u32, source_y as u32))
    }
}

fn whole_pixels(distance: f64, pixel_size: f64) -> Option<i64> {
    let raw = distance / pixel_size;
    let rounded = raw.round();

    if !rounded.is_finite() || (raw - rounded).abs() > SHIFT_TOLERANCE_PIXELS {
        return None;
    }

    Some(rounded as i64)
}

/// Works out whether `entry` can seed a render of `viewport` on `pixel_rect`.
///
/// Only pure pans are reusable: the raster must be unchanged, the extent equal
/// within tolerance, and the centre displaced by whole pixels in both axes.
#[must_use]
pub fn try_reuse(viewport: &Viewport, pixel_rect: PixelRect, entry: &CacheEntry) -> Option<CacheShift> {
    if entry.pixel_rect != pixel_rect {
        debug!("cache miss: raster changed");
        return None;
    }
    if !viewport.has_same_scale(&entry.viewport) {
        debug!("cache miss: scale changed");
        return None;
    }

    let (dx, dy) = viewport.pixel_size(pixel_rect);
    let previous = entry.viewport.center();
    let current = viewport.center();

    let Some(offset_x) = whole_pixels(previous.real - current.real, dx) else {
        debug!("cache miss: horizontal pan is not a whole number of pixels");
        return None;
    };
    let Some(offset_y) = whole_pixels(previous.imag - current.imag, dy) else {
        debug!("cache miss: vertical pan is not a whole number of pixels");
        return None;
    };

    if offset_x.unsigned_abs() >= u64::from(pixel_rect.width())
        || offset_y.unsigned_abs() >= u64::from(pixel_rect.height())
    {
        debug!("cache miss: no overlap after shift ({offset_x}, {offset_y})");
        return None;
    }

    debug!("cache hit: shift ({offset_x}, {offset_y})");
    Some(CacheShift { offset_x, offset_y })
}

/// A cache entry paired with the shift that maps it onto the frame being rendered.
#[derive(Debug, Copy, Clone)]
pub struct CachedFrame<'a> {
    entry: &'a CacheEntry,
    shift: CacheShift,
}

impl<'a> CachedFrame<'a> {
    #[must_use]
    pub fn new(entry: &'a CacheEntry, shift: CacheShift) -> Self {
        Self { entry, shift }
    }

    #[must_use]
    pub fn shift(&self) -> CacheShift {
        self.shift
    }

    #[inline]
    #[must_use]
    pub fn lookup(&self, x: u32, y: u32) -> Option<PixelValue> {
        let pixel_rect = self.entry.pixel_rect;
        let (source_x, source_y) = self.shift.source_of(x, y, pixel_rect)?;
        if self.entry.is_mirrored_row(source_y) {
            return None;
        }

        let index = source_y as usize * pixel_rect.width() as usize + source_x as usize;

        Some(self.entry.values[index])
    }
}
