//! Link statistics over a frame history window.

use crate::history::Frame;

/// Highest SNR in the window, 0 for an empty window
pub fn max_snr(frames: &[Frame]) -> f32 {
    frames
        .iter()
        .map(|f| f.snr)
        .reduce(f32::max)
        .unwrap_or(0.0)
}

/// Share of frames missing from the counter span, as a rounded percentage
///
/// Gaps are measured between the lowest and highest counter present, so
/// frames lost after the newest one are not visible until a later frame
/// arrives. Frames may be in any order.
pub fn loss_percentage(frames: &[Frame]) -> u8 {
    let (min, max) = match frames.iter().map(|f| f.f_cnt).fold(None, |acc, f_cnt| match acc {
        None => Some((f_cnt, f_cnt)),
        Some((lo, hi)) => Some((lo.min(f_cnt), hi.max(f_cnt))),
    }) {
        Some(span) => span,
        None => return 0,
    };

    let expected = u64::from(max - min) + 1;
    let missing = expected.saturating_sub(frames.len() as u64);
    ((missing as f64 / expected as f64) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Frames with a deterministic, uneven SNR per counter, newest first
    fn build_frames(f_cnts: &[u32]) -> Vec<Frame> {
        let mut f_cnts = f_cnts.to_vec();
        f_cnts.sort_unstable_by(|a, b| b.cmp(a));
        f_cnts
            .into_iter()
            .map(|f_cnt| {
                let snr = ((f_cnt as f64).sin() * 100.0).floor() / 10.0;
                Frame::new(f_cnt, snr as f32, 1)
            })
            .collect()
    }

    #[test]
    fn test_max_snr() {
        assert_eq!(max_snr(&build_frames(&[])), 0.0);
        assert_eq!(max_snr(&build_frames(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10])), 9.8);
    }

    #[test]
    fn test_max_snr_all_negative() {
        let frames = vec![Frame::new(1, -12.0, 1), Frame::new(2, -4.5, 1)];
        assert_eq!(max_snr(&frames), -4.5);
    }

    #[test]
    fn test_loss_percentage() {
        assert_eq!(loss_percentage(&build_frames(&[])), 0);
        assert_eq!(loss_percentage(&build_frames(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10])), 0);
        // 1 of 11 missing
        assert_eq!(loss_percentage(&build_frames(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 11])), 9);
        // 2 of 12 missing
        assert_eq!(loss_percentage(&build_frames(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 12])), 17);
        // 4 of 14 missing
        assert_eq!(loss_percentage(&build_frames(&[1, 2, 3, 6, 7, 8, 9, 12, 13, 14])), 29);
    }

    #[test]
    fn test_loss_percentage_ignores_order() {
        let mut frames = build_frames(&[1, 2, 3, 6, 7, 8, 9, 12, 13, 14]);
        frames.reverse();
        assert_eq!(loss_percentage(&frames), 29);
    }

    #[test]
    fn test_loss_percentage_duplicates_never_negative() {
        let frames = vec![Frame::new(5, 0.0, 1), Frame::new(5, 0.0, 2), Frame::new(6, 0.0, 1)];
        assert_eq!(loss_percentage(&frames), 0);
    }

    proptest! {
        #[test]
        fn prop_loss_percentage_bounded(f_cnts in proptest::collection::vec(0u32..100_000, 1..64)) {
            let frames: Vec<Frame> = f_cnts.iter().map(|&f| Frame::new(f, 0.0, 1)).collect();
            prop_assert!(loss_percentage(&frames) <= 100);
        }

        #[test]
        fn prop_contiguous_window_has_no_loss(start in 0u32..1_000_000, len in 1u32..64) {
            let frames: Vec<Frame> = (start..start + len).map(|f| Frame::new(f, 0.0, 1)).collect();
            prop_assert_eq!(loss_percentage(&frames), 0);
        }
    }
}
