use super::*;

fn one_px(m: f64, e: Option<f64>, params: CompositeParams) -> [u8; 4] {
    let mut px = [10u8, 20, 30, 40];
    let expanded = e.map(|e| vec![e]);
    composite_scalar(
        &mut px,
        &[m],
        expanded.as_deref(),
        GridDims::new(1, 1).unwrap(),
        &params,
    )
    .unwrap();
    px
}

fn bordered() -> CompositeParams {
    CompositeParams {
        add_border: true,
        border_color: BorderColor::rgb(1, 2, 3),
    }
}

#[test]
fn thresholds_are_symmetric_around_center() {
    assert_eq!(THRESHOLD_LOW, 0.45);
    assert_eq!(THRESHOLD_HIGH, 0.55);
}

#[test]
fn midpoint_of_band_is_128_and_rgb_is_kept() {
    assert_eq!(
        one_px(0.5, None, CompositeParams::default()),
        [10, 20, 30, 128]
    );
}

#[test]
fn band_edges_and_interior_values() {
    assert_eq!(transition_alpha(THRESHOLD_LOW), 0);
    assert_eq!(transition_alpha(THRESHOLD_HIGH), 255);
    assert_eq!(transition_alpha(0.475), 64);
    assert_eq!(transition_alpha(0.525), 191);
    assert_eq!(transition_alpha(0.46), 26);
}

#[test]
fn transition_alpha_clamps() {
    assert_eq!(transition_alpha(-3.0), 0);
    assert_eq!(transition_alpha(9.0), 255);
}

#[test]
fn foreground_is_opaque_regardless_of_border() {
    for m in [0.551, 0.7, 1.0, 4.0] {
        assert_eq!(one_px(m, None, CompositeParams::default())[3], 255);
        assert_eq!(one_px(m, Some(1.0), bordered()), [10, 20, 30, 255]);
    }
}

#[test]
fn background_without_border_is_transparent() {
    for m in [0.449, 0.2, 0.0, -1.0] {
        assert_eq!(one_px(m, Some(1.0), CompositeParams::default()), [10, 20, 30, 0]);
    }
}

#[test]
fn border_overwrites_rgb_only_when_expanded_covers() {
    assert_eq!(one_px(0.1, Some(1.0), bordered()), [1, 2, 3, 255]);
    assert_eq!(one_px(0.1, Some(0.5), bordered()), [10, 20, 30, 0]);
    assert_eq!(one_px(0.1, Some(0.0), bordered()), [10, 20, 30, 0]);
}

#[test]
fn missing_expanded_mask_uses_raw_value() {
    // Raw values below 0.45 can never pass the 0.5 border test.
    assert_eq!(one_px(0.3, None, bordered()), [10, 20, 30, 0]);
}

#[test]
fn transition_ignores_border() {
    assert_eq!(one_px(0.5, Some(1.0), bordered()), [10, 20, 30, 128]);
}

#[test]
fn alpha_is_monotone_across_domain() {
    let mut prev = 0u8;
    let mut m = -0.2;
    while m <= 1.2 {
        let a = one_px(m, None, CompositeParams::default())[3];
        assert!(a >= prev, "alpha dropped at m={m}");
        prev = a;
        m += 0.0005;
    }
}

#[test]
fn classify_reports_bands() {
    assert_eq!(classify(0.9, 0.0, true), Band::Foreground);
    assert_eq!(classify(0.1, 0.9, true), Band::Border);
    assert_eq!(classify(0.1, 0.9, false), Band::Background);
    assert_eq!(classify(0.5, 0.0, false), Band::Transition(128));
}

#[test]
fn wrong_lengths_are_rejected_without_mutation() {
    let d = GridDims::new(2, 1).unwrap();
    let mut px = [7u8; 8];
    let p = CompositeParams::default();

    assert!(composite_scalar(&mut px, &[0.0], None, d, &p).is_err());
    assert!(composite_scalar(&mut px[..4], &[0.0, 0.0], None, d, &p).is_err());
    assert!(composite_scalar(&mut px, &[0.0, 0.0], Some(&[1.0][..]), d, &p).is_err());
    assert_eq!(px, [7u8; 8]);
}

#[test]
fn single_row_and_column_images_are_fully_written() {
    let mask = [0.0, 0.5, 1.0];
    for d in [GridDims::new(3, 1).unwrap(), GridDims::new(1, 3).unwrap()] {
        let mut px = [9u8; 12];
        composite_scalar(&mut px, &mask, None, d, &CompositeParams::default()).unwrap();
        assert_eq!(px, [9, 9, 9, 0, 9, 9, 9, 128, 9, 9, 9, 255]);
    }
}
