//! Per-contact stroke accumulation and gesture-start detection.
//!
//! A [`GestureStroke`] ingests raw `(x, y, time)` points for one contact and
//! keeps a decimated history of them:
//!
//! 1. **Sampling:** a point is kept only if it moved further than a
//!    key-width-derived distance from the last kept point (the first point
//!    is always kept).
//! 2. **Start detection:** the stroke counts as the start of a gesture once
//!    enough path length has accumulated over enough time.
//! 3. **Incremental release:** while the instantaneous speed stays below a
//!    threshold, everything sampled so far is marked stable enough to hand
//!    to a recognizer before the contact lifts.
//!
//! All thresholds derive from the key width of the active keyboard layout,
//! so the same tracker adapts to phone and tablet geometries.

use swipekit_common::config::GestureDefaults;

use crate::batch::PointerSink;

/// Default initial capacity of the sampled point buffers.
pub const DEFAULT_CAPACITY: usize = 128;

const MIN_GESTURE_LENGTH_RATIO_TO_KEY_WIDTH: f32 = 0.75;
const MIN_GESTURE_START_DURATION_MS: i32 = 100;
const MIN_GESTURE_RECOGNITION_TIME_MS: i64 = 100;
const MIN_GESTURE_SAMPLING_RATIO_TO_KEY_WIDTH: f32 = 1.0 / 6.0;
// keyWidth / sec
const GESTURE_RECOGNITION_SPEED_THRESHOLD_RATIO_TO_KEY_WIDTH: f32 = 5.5;
const MSEC_PER_SEC: i32 = 1000;

/// Whether enough time has passed since the last recognition attempt for a
/// caller to invoke the recognizer again. Stateless; both arguments are
/// milliseconds on the caller's event clock.
pub fn has_recognition_time_past(current_time_ms: i64, last_recognition_time_ms: i64) -> bool {
    current_time_ms > last_recognition_time_ms + MIN_GESTURE_RECOGNITION_TIME_MS
}

/// The decimated motion path of a single contact, from touch-down to
/// touch-up.
///
/// One instance per pointer id; reuse across consecutive gestures by calling
/// [`reset`](Self::reset) between them, which keeps the buffers allocated.
#[derive(Debug)]
pub struct GestureStroke {
    pointer_id: i32,
    event_times: Vec<i32>,
    x_coordinates: Vec<i32>,
    y_coordinates: Vec<i32>,
    /// Accumulated path length in pixels, measured against the last sampled
    /// point on every incoming raw point.
    length: f32,
    incremental_recognition_size: usize,
    last_incremental_batch_size: usize,
    last_point_time: i32,
    last_point_x: i32,
    last_point_y: i32,

    min_gesture_length: i32,          // pixel
    min_gesture_sample_length: i32,   // pixel
    gesture_recognition_threshold: i32, // pixel / sec
}

impl GestureStroke {
    /// Create a stroke for the given pointer id.
    ///
    /// All geometry thresholds start at zero; call
    /// [`set_keyboard_geometry`](Self::set_keyboard_geometry) before feeding
    /// points.
    pub fn new(pointer_id: i32) -> Self {
        Self {
            pointer_id,
            event_times: Vec::with_capacity(DEFAULT_CAPACITY),
            x_coordinates: Vec::with_capacity(DEFAULT_CAPACITY),
            y_coordinates: Vec::with_capacity(DEFAULT_CAPACITY),
            length: 0.0,
            incremental_recognition_size: 0,
            last_incremental_batch_size: 0,
            last_point_time: 0,
            last_point_x: 0,
            last_point_y: 0,
            min_gesture_length: 0,
            min_gesture_sample_length: 0,
            gesture_recognition_threshold: 0,
        }
    }

    /// Create a stroke with geometry seeded from configured defaults.
    pub fn from_defaults(pointer_id: i32, defaults: &GestureDefaults) -> Self {
        let mut stroke = Self::new(pointer_id);
        stroke.set_keyboard_geometry(defaults.key_width_px as i32);
        stroke
    }

    /// The pointer id this stroke belongs to.
    pub fn pointer_id(&self) -> i32 {
        self.pointer_id
    }

    /// Number of points currently in the sampled history.
    pub fn sampled_len(&self) -> usize {
        self.event_times.len()
    }

    /// Derive the sampling, start-detection, and speed thresholds from the
    /// key width of the active keyboard layout. Overwrites prior thresholds;
    /// re-call whenever the layout changes.
    pub fn set_keyboard_geometry(&mut self, key_width: i32) {
        self.min_gesture_length =
            (key_width as f32 * MIN_GESTURE_LENGTH_RATIO_TO_KEY_WIDTH) as i32;
        self.min_gesture_sample_length =
            (key_width as f32 * MIN_GESTURE_SAMPLING_RATIO_TO_KEY_WIDTH) as i32;
        self.gesture_recognition_threshold =
            (key_width as f32 * GESTURE_RECOGNITION_SPEED_THRESHOLD_RATIO_TO_KEY_WIDTH) as i32;
    }

    /// Whether the accumulated motion qualifies as the start of a gesture:
    /// the contact has been down longer than the minimum start duration and
    /// has traveled further than the minimum gesture length.
    ///
    /// The down duration is approximated by the timestamp of the last
    /// sampled point; the first raw point is always sampled, so the caller's
    /// time-origin convention carries through.
    pub fn is_start_of_a_gesture(&self) -> bool {
        let size = self.event_times.len();
        let down_duration = if size > 0 {
            self.event_times[size - 1]
        } else {
            0
        };
        down_duration > MIN_GESTURE_START_DURATION_MS
            && self.length > self.min_gesture_length as f32
    }

    /// Clear all accumulated sampling and recognition state, keeping the
    /// pointer id, the geometry thresholds, and the buffer allocations.
    /// Must be called between gestures on a reused instance.
    pub fn reset(&mut self) {
        self.length = 0.0;
        self.incremental_recognition_size = 0;
        self.last_incremental_batch_size = 0;
        self.last_point_time = 0;
        self.event_times.clear();
        self.x_coordinates.clear();
        self.y_coordinates.clear();
    }

    /// Feed one raw point. `time` is milliseconds on the caller's event
    /// clock and must not decrease within a stroke. Historical points
    /// (backfilled by event coalescing) take part in sampling but are
    /// excluded from velocity tracking.
    pub fn add_point(&mut self, x: i32, y: i32, time: i32, is_historical: bool) {
        let size = self.event_times.len();
        let needs_sampling = if size == 0 {
            true
        } else {
            let last_index = size - 1;
            let last_x = self.x_coordinates[last_index];
            let last_y = self.y_coordinates[last_index];
            let dist = distance(last_x, last_y, x, y);
            self.length += dist;
            dist > self.min_gesture_sample_length as f32
        };
        if needs_sampling {
            self.event_times.push(time);
            self.x_coordinates.push(x);
            self.y_coordinates.push(y);
        }
        if !is_historical {
            self.update_incremental_recognition_size(x, y, time);
        }
    }

    fn update_incremental_recognition_size(&mut self, x: i32, y: i32, time: i32) {
        let msecs = time - self.last_point_time;
        if msecs > 0 {
            let pixels = distance(self.last_point_x, self.last_point_y, x, y) as i32;
            // Equivalent to (pixels / msecs < threshold / MSEC_PER_SEC)
            if pixels * MSEC_PER_SEC < self.gesture_recognition_threshold * msecs {
                self.incremental_recognition_size = self.event_times.len();
            }
        }
        self.last_point_time = time;
        self.last_point_x = x;
        self.last_point_y = y;
    }

    /// Emit every sampled point that has not been emitted yet.
    pub fn append_all_batch_points(&mut self, out: &mut impl PointerSink) {
        self.append_batch_points(out, self.event_times.len());
    }

    /// Emit the not-yet-emitted prefix of sampled points that the speed
    /// gate has marked stable. No-op if the stable prefix has already been
    /// emitted in full.
    pub fn append_incremental_batch_points(&mut self, out: &mut impl PointerSink) {
        self.append_batch_points(out, self.incremental_recognition_size);
    }

    fn append_batch_points(&mut self, out: &mut impl PointerSink, size: usize) {
        if size <= self.last_incremental_batch_size {
            return;
        }
        let start = self.last_incremental_batch_size;
        out.append(
            self.pointer_id,
            &self.event_times[start..size],
            &self.x_coordinates[start..size],
            &self.y_coordinates[start..size],
        );
        self.last_incremental_batch_size = size;
    }
}

fn distance(x1: i32, y1: i32, x2: i32, y2: i32) -> f32 {
    let dx = (x1 - x2) as f32;
    let dy = (y1 - y2) as f32;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::PointerBuffer;

    // key_width 40: min_gesture_length 30, sample length 6, speed
    // threshold 220 px/sec.
    fn stroke_with_key_width(key_width: i32) -> GestureStroke {
        let mut stroke = GestureStroke::new(1);
        stroke.set_keyboard_geometry(key_width);
        stroke
    }

    #[test]
    fn test_first_point_is_always_sampled() {
        let mut stroke = stroke_with_key_width(40);
        stroke.add_point(3, 4, 0, false);
        assert_eq!(stroke.sampled_len(), 1);
    }

    #[test]
    fn test_points_below_sample_length_are_decimated() {
        let mut stroke = stroke_with_key_width(40);
        stroke.add_point(0, 0, 0, false);
        // 4 px from the last sampled point, under the 6 px threshold
        stroke.add_point(4, 0, 10, false);
        assert_eq!(stroke.sampled_len(), 1);
        // sqrt(5^2 + 3^2) ~ 5.83, still under
        stroke.add_point(5, 3, 20, false);
        assert_eq!(stroke.sampled_len(), 1);
        // 7 px, over the threshold
        stroke.add_point(7, 0, 30, false);
        assert_eq!(stroke.sampled_len(), 2);
    }

    #[test]
    fn test_decimated_points_still_accumulate_length() {
        let mut stroke = stroke_with_key_width(40);
        stroke.add_point(0, 0, 0, false);
        stroke.add_point(4, 0, 10, false);
        stroke.add_point(5, 0, 20, false);
        // Distance is re-measured against the last sampled point each time:
        // 4 + 5, not 4 + 1.
        assert!((stroke.length - 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_gesture_start_needs_duration_and_length() {
        let mut stroke = stroke_with_key_width(40);
        stroke.add_point(0, 0, 0, false);
        assert!(!stroke.is_start_of_a_gesture());
        // 35 px of sampled travel by 150 ms: both thresholds cleared
        stroke.add_point(35, 0, 150, false);
        assert!(stroke.is_start_of_a_gesture());
    }

    #[test]
    fn test_gesture_start_rejects_short_travel() {
        let mut stroke = stroke_with_key_width(40);
        stroke.add_point(0, 0, 0, false);
        stroke.add_point(20, 0, 150, false);
        // 20 px < min_gesture_length 30
        assert!(!stroke.is_start_of_a_gesture());
    }

    #[test]
    fn test_gesture_start_rejects_quick_travel() {
        let mut stroke = stroke_with_key_width(40);
        stroke.add_point(0, 0, 0, false);
        stroke.add_point(35, 0, 80, false);
        // 80 ms < min start duration 100 ms
        assert!(!stroke.is_start_of_a_gesture());
    }

    #[test]
    fn test_speed_exactly_at_threshold_does_not_advance() {
        // threshold 220 px/sec; 22 px over 100 ms is exactly 220
        let mut stroke = stroke_with_key_width(40);
        stroke.add_point(0, 0, 1, false);
        assert_eq!(stroke.incremental_recognition_size, 1);
        stroke.add_point(22, 0, 101, false);
        assert_eq!(stroke.sampled_len(), 2);
        // Strict inequality: 22 * 1000 is not < 220 * 100
        assert_eq!(stroke.incremental_recognition_size, 1);
    }

    #[test]
    fn test_slightly_slower_motion_advances() {
        let mut stroke = stroke_with_key_width(40);
        stroke.add_point(0, 0, 1, false);
        stroke.add_point(21, 0, 101, false);
        // 21 * 1000 < 220 * 100
        assert_eq!(stroke.incremental_recognition_size, 2);
    }

    #[test]
    fn test_fast_motion_does_not_retract() {
        let mut stroke = stroke_with_key_width(40);
        stroke.add_point(0, 0, 1, false);
        stroke.add_point(10, 0, 101, false); // slow, advances to 2
        assert_eq!(stroke.incremental_recognition_size, 2);
        stroke.add_point(300, 0, 111, false); // fast, withholds
        assert_eq!(stroke.sampled_len(), 3);
        assert_eq!(stroke.incremental_recognition_size, 2);
    }

    #[test]
    fn test_non_positive_elapsed_time_is_ignored() {
        let mut stroke = stroke_with_key_width(40);
        stroke.add_point(0, 0, 100, false);
        assert_eq!(stroke.incremental_recognition_size, 1);
        // Same timestamp: msecs == 0, the update is suppressed
        stroke.add_point(10, 0, 100, false);
        assert_eq!(stroke.incremental_recognition_size, 1);
    }

    #[test]
    fn test_historical_points_skip_velocity_tracking() {
        let mut stroke = stroke_with_key_width(40);
        stroke.add_point(0, 0, 1, false);
        assert_eq!(stroke.incremental_recognition_size, 1);
        // Sampled, but must not advance the stable prefix or move the
        // velocity reference point
        stroke.add_point(10, 0, 51, true);
        assert_eq!(stroke.sampled_len(), 2);
        assert_eq!(stroke.incremental_recognition_size, 1);
        assert_eq!(stroke.last_point_time, 1);
        assert_eq!(stroke.last_point_x, 0);
    }

    #[test]
    fn test_reset_clears_state_but_keeps_geometry() {
        let mut stroke = stroke_with_key_width(40);
        stroke.add_point(0, 0, 0, false);
        stroke.add_point(35, 0, 150, false);
        assert!(stroke.is_start_of_a_gesture());

        stroke.reset();
        assert_eq!(stroke.sampled_len(), 0);
        assert_eq!(stroke.length, 0.0);
        assert!(!stroke.is_start_of_a_gesture());
        let mut out = PointerBuffer::new();
        stroke.append_all_batch_points(&mut out);
        assert!(out.is_empty());

        // Geometry survives: the same motion starts a gesture again
        stroke.add_point(0, 0, 0, false);
        stroke.add_point(35, 0, 150, false);
        assert!(stroke.is_start_of_a_gesture());
    }

    #[test]
    fn test_from_defaults_seeds_geometry() {
        let defaults = swipekit_common::config::GestureDefaults { key_width_px: 40 };
        let mut stroke = GestureStroke::from_defaults(7, &defaults);
        assert_eq!(stroke.pointer_id(), 7);
        stroke.add_point(0, 0, 0, false);
        stroke.add_point(35, 0, 150, false);
        assert!(stroke.is_start_of_a_gesture());
    }

    #[test]
    fn test_recognition_throttle() {
        assert!(!has_recognition_time_past(150, 100));
        assert!(!has_recognition_time_past(200, 100));
        assert!(has_recognition_time_past(201, 100));
    }
}
