//! Pure master-stack geometry.
//!
//! The first window in the list is the master and gets `master_size` of the
//! working width at full height; the remaining windows form a single column
//! of equal-height slots on the other side. No host access happens here: the
//! caller supplies the screen rect and the ordered eligible windows, and gets
//! back one frame per window.

use tracing::trace;

use crate::common::config::{LayoutSettings, MasterPosition};
use crate::sys::geometry::Rect;

/// Computes a frame for every window, in input order. Deterministic and
/// stateless: the same inputs always produce the same frames.
///
/// Rounding policy: all arithmetic is integer pixels. The per-slot stack
/// height uses floor division and the last slot absorbs the remainder, so
/// the column exactly fills the working height and slots can never overlap.
/// Degenerate working areas clamp frames to zero size rather than failing;
/// every window always receives a frame.
pub fn compute<W: Copy>(
    screen: Rect,
    windows: &[W],
    settings: &LayoutSettings,
) -> Vec<(W, Rect)> {
    if windows.is_empty() {
        return Vec::new();
    }

    let padding = settings.padding;
    let area = screen.inset(padding);

    // A single window simply takes the whole working area.
    if let [window] = windows {
        trace!("single window takes the full working area");
        return vec![(*window, area)];
    }

    let stack_count = (windows.len() - 1) as i32;
    let master_width = ((area.width as f64) * settings.master_size) as i32;
    let stack_width = (area.width - master_width - padding).max(0);

    let usable_height = area.height - padding * (stack_count - 1);
    let slot_height = (usable_height / stack_count).max(0);
    let remainder = (usable_height - slot_height * stack_count).max(0);

    let (master_x, stack_x) = match settings.master_position {
        MasterPosition::Right => (area.x + stack_width + padding, area.x),
        MasterPosition::Left => (area.x, area.x + master_width + padding),
    };

    let mut frames = Vec::with_capacity(windows.len());
    frames.push((
        windows[0],
        Rect::new(master_x, area.y, master_width, area.height),
    ));
    trace!(width = master_width, "master window placed");

    let mut y = area.y;
    for (index, window) in windows[1..].iter().enumerate() {
        let mut height = slot_height;
        if index as i32 == stack_count - 1 {
            height += remainder;
        }
        frames.push((*window, Rect::new(stack_x, y, stack_width, height)));
        y += height + padding;
    }
    trace!(count = stack_count, "stack windows placed");

    frames
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::common::config::Config;

    fn settings() -> LayoutSettings { Config::default().layout }

    fn rects(frames: &[(u32, Rect)]) -> Vec<Rect> {
        frames.iter().map(|(_, rect)| *rect).collect()
    }

    fn overlaps(a: Rect, b: Rect) -> bool {
        a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
    }

    #[test]
    fn empty_list_produces_no_frames() {
        let frames = compute::<u32>(Rect::new(0, 0, 1000, 800), &[], &settings());
        assert!(frames.is_empty());
    }

    #[test]
    fn single_window_fills_working_area() {
        let frames = compute(Rect::new(0, 0, 1000, 800), &[1u32], &settings());
        assert_eq!(frames, vec![(1, Rect::new(10, 10, 980, 780))]);
    }

    #[test]
    fn two_windows_master_on_right() {
        let frames = compute(Rect::new(0, 0, 1000, 800), &[1u32, 2], &settings());
        // 0.65 * 980 truncates to 637; the stack gets the rest minus padding.
        assert_eq!(frames[0], (1, Rect::new(353, 10, 637, 780)));
        assert_eq!(frames[1], (2, Rect::new(10, 10, 333, 780)));
    }

    #[test]
    fn two_windows_master_on_left() {
        let mut settings = settings();
        settings.master_position = MasterPosition::Left;
        let frames = compute(Rect::new(0, 0, 1000, 800), &[1u32, 2], &settings);
        assert_eq!(frames[0], (1, Rect::new(10, 10, 637, 780)));
        assert_eq!(frames[1], (2, Rect::new(657, 10, 333, 780)));
    }

    #[test]
    fn stack_slots_are_separated_by_padding() {
        let frames = compute(Rect::new(0, 0, 1000, 800), &[1u32, 2, 3, 4], &settings());
        // Stack: usable height 780 - 2*10 = 760, three slots of 253 + remainder 1.
        assert_eq!(frames[1].1, Rect::new(10, 10, 333, 253));
        assert_eq!(frames[2].1, Rect::new(10, 273, 333, 253));
        assert_eq!(frames[3].1, Rect::new(10, 536, 333, 254));
        assert_eq!(frames[3].1.bottom(), 790);
    }

    #[test]
    fn last_slot_absorbs_rounding_remainder() {
        // Working height 781 with two stack slots: 771 / 2 = 385 rem 1.
        let frames = compute(Rect::new(0, 0, 1000, 801), &[1u32, 2, 3], &settings());
        assert_eq!(frames[1].1.height, 385);
        assert_eq!(frames[2].1.height, 386);
        assert_eq!(frames[2].1.bottom(), 791);
    }

    #[test]
    fn frames_stay_inside_working_area_and_never_overlap() {
        let screen = Rect::new(40, 20, 1003, 807);
        let settings = settings();
        let area = screen.inset(settings.padding);
        for n in 1..=9u32 {
            let windows: Vec<u32> = (1..=n).collect();
            let frames = compute(screen, &windows, &settings);
            assert_eq!(frames.len(), n as usize);
            for &(_, rect) in &frames {
                assert!(rect.x >= area.x && rect.y >= area.y);
                assert!(rect.right() <= area.right());
                assert!(rect.bottom() <= area.bottom());
            }
            for (i, &(_, a)) in frames.iter().enumerate() {
                for &(_, b) in &frames[i + 1..] {
                    assert!(!overlaps(a, b), "{a:?} overlaps {b:?} with {n} windows");
                }
            }
        }
    }

    #[test]
    fn compute_is_deterministic() {
        let screen = Rect::new(0, 0, 1366, 768);
        let windows = [1u32, 2, 3, 4, 5];
        let first = compute(screen, &windows, &settings());
        let second = compute(screen, &windows, &settings());
        assert_eq!(first, second);
    }

    #[test]
    fn degenerate_area_clamps_to_zero_size_frames() {
        // More stack slots than usable pixels: every window still gets a frame.
        let frames = compute(Rect::new(0, 0, 30, 30), &[1u32, 2, 3, 4], &settings());
        assert_eq!(frames.len(), 4);
        for &(_, rect) in &frames {
            assert!(rect.width >= 0 && rect.height >= 0);
        }
    }

    #[test]
    fn order_of_input_is_order_of_output() {
        let frames = compute(Rect::new(0, 0, 1000, 800), &[7u32, 3, 9], &settings());
        let ids: Vec<u32> = frames.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![7, 3, 9]);
    }
}
