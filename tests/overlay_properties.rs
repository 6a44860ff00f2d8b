// Property tests for the mask decoder and the compositor.

use mask_overlay::{BinaryMask, Error, OverlayMode, PixelBuffer, Rgba, composite, composite_with_mode, rle};
use proptest::prelude::*;

fn rle_text(runs: &[(u64, u64)]) -> String {
    runs.iter()
        .map(|(s, l)| format!("{s} {l}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Straightforward per-index reference for what a set of runs should mark.
fn expected_bits(runs: &[(u64, u64)], total: usize) -> Vec<u8> {
    let mut bits = vec![0u8; total];
    for &(s, l) in runs {
        if s == 0 {
            continue;
        }
        for i in (s - 1)..(s - 1).saturating_add(l) {
            if (i as usize) < total {
                bits[i as usize] = 1;
            } else {
                break;
            }
        }
    }
    bits
}

fn dims() -> impl Strategy<Value = (u32, u32)> {
    (0u32..24, 0u32..24)
}

fn runs() -> impl Strategy<Value = Vec<(u64, u64)>> {
    prop::collection::vec((0u64..700, 0u64..80), 0..12)
}

fn image(w: u32, h: u32) -> impl Strategy<Value = PixelBuffer> {
    prop::collection::vec(any::<u8>(), (w * h * 4) as usize)
        .prop_map(move |data| PixelBuffer::new(w, h, data).unwrap())
}

proptest! {
    #[test]
    fn decoded_mask_always_fills_grid((w, h) in dims(), runs in runs()) {
        let mask = rle::decode(&rle_text(&runs), w, h).unwrap();
        prop_assert_eq!(mask.len(), (w * h) as usize);
        prop_assert!(mask.bits().iter().all(|&b| b <= 1));
    }

    #[test]
    fn decoded_mask_matches_reference((w, h) in dims(), runs in runs()) {
        let mask = rle::decode(&rle_text(&runs), w, h).unwrap();
        let expected = expected_bits(&runs, (w * h) as usize);
        prop_assert_eq!(mask.bits(), expected.as_slice());
    }

    #[test]
    fn run_order_does_not_matter((w, h) in dims(), runs in runs()) {
        let mut reversed = runs.clone();
        reversed.reverse();
        let a = rle::decode(&rle_text(&runs), w, h).unwrap();
        let b = rle::decode(&rle_text(&reversed), w, h).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn runs_starting_past_the_grid_set_nothing((w, h) in dims(), extra in 1u64..1000, len in 0u64..50) {
        let start = (w * h) as u64 + extra; // 1-based, so index >= w*h
        let mask = rle::decode(&format!("{start} {len}"), w, h).unwrap();
        prop_assert_eq!(mask.count_set(), 0);
    }

    #[test]
    fn overlong_runs_stop_at_last_pixel(w in 1u32..24, h in 1u32..24, start in 1u64..50, over in 1u64..100) {
        let total = (w * h) as u64;
        prop_assume!(start <= total);
        let len = total - start + 1 + over;
        let mask = rle::decode(&format!("{start} {len}"), w, h).unwrap();
        prop_assert_eq!(mask.count_set() as u64, total - start + 1);
        prop_assert!(mask.get((total - 1) as usize));
    }

    #[test]
    fn odd_token_counts_are_rejected((w, h) in dims(), runs in runs(), tail in 0u64..100) {
        let text = format!("{} {tail}", rle_text(&runs));
        let is_malformed = matches!(rle::decode(&text, w, h), Err(Error::MalformedMask { .. }));
        prop_assert!(is_malformed);
    }

    #[test]
    fn composite_substitutes_exactly(
        (src, mask) in dims().prop_flat_map(|(w, h)| (image(w, h), runs().prop_map(move |r| (r, w, h))))
            .prop_map(|(img, (r, w, h))| (img, rle::decode(&rle_text(&r), w, h).unwrap())),
        color in any::<[u8; 4]>(),
    ) {
        let color = Rgba::new(color[0], color[1], color[2], color[3]);
        let before = src.clone();
        let out = composite(&src, &mask, color).unwrap();

        prop_assert_eq!(&src, &before);
        prop_assert_eq!(out.data().len(), src.data().len());
        for i in 0..mask.len() {
            if mask.get(i) {
                prop_assert_eq!(out.pixel(i), color);
            } else {
                prop_assert_eq!(out.pixel(i), src.pixel(i));
            }
        }
    }

    #[test]
    fn blend_leaves_unmasked_pixels_alone(
        (src, mask) in dims().prop_flat_map(|(w, h)| (image(w, h), runs().prop_map(move |r| (r, w, h))))
            .prop_map(|(img, (r, w, h))| (img, rle::decode(&rle_text(&r), w, h).unwrap())),
    ) {
        let out = composite_with_mode(&src, &mask, Rgba::HIGHLIGHT, OverlayMode::Blend).unwrap();
        for i in (0..mask.len()).filter(|&i| !mask.get(i)) {
            prop_assert_eq!(out.pixel(i), src.pixel(i));
        }
    }

    #[test]
    fn mismatched_sizes_never_composite((w, h) in dims(), dh in 1u32..4) {
        let src = PixelBuffer::filled(w.max(1), h, Rgba::new(1, 2, 3, 4)).unwrap();
        let mask = BinaryMask::zeroed(w.max(1), h + dh).unwrap();
        let is_mismatch = matches!(composite(&src, &mask, Rgba::HIGHLIGHT), Err(Error::DimensionMismatch { .. }));
        prop_assert!(is_mismatch);
    }
}

#[test]
fn worked_example_end_to_end() {
    let src = PixelBuffer::filled(4, 2, Rgba::new(10, 10, 10, 255)).unwrap();
    let mask = rle::decode("3 2", 4, 2).unwrap();
    assert_eq!(mask.bits(), &[0, 0, 1, 1, 0, 0, 0, 0]);

    let out = composite(&src, &mask, Rgba::new(255, 255, 0, 128)).unwrap();
    let pixels: Vec<Rgba> = (0..8).map(|i| out.pixel(i)).collect();
    let grey = Rgba::new(10, 10, 10, 255);
    let yellow = Rgba::new(255, 255, 0, 128);
    assert_eq!(pixels, vec![grey, grey, yellow, yellow, grey, grey, grey, grey]);
}

#[test]
fn clamped_run_sets_only_last_pixel() {
    let mask = rle::decode("8 5", 4, 2).unwrap();
    assert_eq!(mask.bits(), &[0, 0, 0, 0, 0, 0, 0, 1]);
}

#[test]
fn empty_rle_is_identity() {
    let src = PixelBuffer::new(2, 2, (0u8..16).collect()).unwrap();
    let mask = rle::decode("", 2, 2).unwrap();
    assert_eq!(mask.count_set(), 0);
    assert_eq!(composite(&src, &mask, Rgba::HIGHLIGHT).unwrap(), src);
}
