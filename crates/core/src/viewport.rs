/// Discrete zoom levels, ascending. `set_zoom` snaps to the nearest entry.
pub const ZOOM_LEVELS: [f32; 7] = [1.0, 1.25, 1.5, 1.75, 2.0, 2.5, 3.0];

/// The current page/zoom cursor over the externally rendered document.
///
/// Pixel-level rendering is delegated to an external paged renderer; this
/// type only decides which `(page, zoom)` pair to request. Page navigation
/// clamps silently, so callers drive control enablement off the boundary
/// flags rather than error returns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentViewport {
    current_page: u32,
    total_pages: u32,
    zoom_idx: usize,
}

impl DocumentViewport {
    /// Viewport over a document with the given page count (minimum one page).
    #[must_use]
    pub fn new(total_pages: u32) -> Self {
        Self {
            current_page: 1,
            total_pages: total_pages.max(1),
            zoom_idx: 0,
        }
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Current zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        ZOOM_LEVELS[self.zoom_idx]
    }

    /// Zoom as a display percentage (100 for 1.0).
    #[must_use]
    pub fn zoom_percent(&self) -> u32 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            (self.zoom() * 100.0).round() as u32
        }
    }

    /// The `(page, zoom)` pair to hand to the external renderer.
    #[must_use]
    pub fn render_request(&self) -> (u32, f32) {
        (self.current_page, self.zoom())
    }

    /// Jump to a page, clamping silently to `[1, total_pages]`.
    pub fn go_to_page(&mut self, page: u32) {
        self.current_page = page.clamp(1, self.total_pages);
    }

    /// Advance one page; no-op on the last page.
    pub fn next_page(&mut self) {
        if !self.at_last_page() {
            self.current_page += 1;
        }
    }

    /// Go back one page; no-op on the first page.
    pub fn prev_page(&mut self) {
        if !self.at_first_page() {
            self.current_page -= 1;
        }
    }

    #[must_use]
    pub fn at_first_page(&self) -> bool {
        self.current_page <= 1
    }

    #[must_use]
    pub fn at_last_page(&self) -> bool {
        self.current_page >= self.total_pages
    }

    /// Snap to the level in `ZOOM_LEVELS` closest to the given value.
    pub fn set_zoom(&mut self, level: f32) {
        self.zoom_idx = closest_zoom_index(level);
    }

    /// Step one level up; no-op at the maximum level.
    pub fn zoom_in(&mut self) {
        if !self.at_max_zoom() {
            self.zoom_idx += 1;
        }
    }

    /// Step one level down; no-op at the minimum level.
    pub fn zoom_out(&mut self) {
        if !self.at_min_zoom() {
            self.zoom_idx -= 1;
        }
    }

    /// Back to the default 1.0 level.
    pub fn reset_zoom(&mut self) {
        self.zoom_idx = 0;
    }

    #[must_use]
    pub fn at_min_zoom(&self) -> bool {
        self.zoom_idx == 0
    }

    #[must_use]
    pub fn at_max_zoom(&self) -> bool {
        self.zoom_idx + 1 == ZOOM_LEVELS.len()
    }
}

impl Default for DocumentViewport {
    fn default() -> Self {
        Self::new(1)
    }
}

fn closest_zoom_index(level: f32) -> usize {
    let mut closest = 0;
    let mut min_diff = (ZOOM_LEVELS[0] - level).abs();
    for (idx, &candidate) in ZOOM_LEVELS.iter().enumerate().skip(1) {
        let diff = (candidate - level).abs();
        if diff < min_diff {
            min_diff = diff;
            closest = idx;
        }
    }
    closest
}
