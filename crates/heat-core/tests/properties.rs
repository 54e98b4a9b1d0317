use proptest::prelude::*;

use stickheat_core::deadzone::DeadzoneFilter;
use stickheat_core::grid::DensityGrid;
use stickheat_core::kernel::StampKernel;
use stickheat_core::persist::{decode_grids, write_grids};
use stickheat_core::tone::{tone_map, HistogramLut};
use stickheat_core::{HeatSession, Stick, StickSnapshot, ToneMode, TuningParams};

const SIDE: usize = 48;

fn grid_strategy() -> impl Strategy<Value = DensityGrid> {
    prop::collection::vec(
        prop_oneof![
            3 => Just(0.0f32),
            5 => 0.0f32..2.0,
            1 => 0.0f32..1.0e6,
        ],
        SIDE * SIDE,
    )
    .prop_map(|cells| DensityGrid::from_cells(SIDE, SIDE, cells).expect("size matches"))
}

proptest! {
    #[test]
    fn stamp_contribution_follows_falloff(
        cx in -5i32..(SIDE as i32 + 5),
        cy in -5i32..(SIDE as i32 + 5),
        radius in 1i32..=20,
        scale in 0.1f32..10.0,
    ) {
        let mut grid = DensityGrid::new(SIDE, SIDE);
        StampKernel::new(radius, scale).stamp(&mut grid, cx, cy);

        for y in 0..SIDE as i32 {
            for x in 0..SIDE as i32 {
                let (kx, ky) = (x - cx, y - cy);
                let value = grid.cell(x, y).unwrap();
                if kx.abs() > radius || ky.abs() > radius {
                    prop_assert_eq!(value, 0.0);
                    continue;
                }
                let d = ((kx * kx + ky * ky) as f32).sqrt();
                let expected = (1.0 - d / radius as f32).max(0.0) * scale;
                prop_assert_eq!(value, expected);
                if d >= radius as f32 {
                    prop_assert_eq!(value, 0.0);
                }
            }
        }
    }

    #[test]
    fn repeated_stamps_never_decrease(
        cx in 0i32..SIDE as i32,
        cy in 0i32..SIDE as i32,
        radius in 1i32..=8,
        repeats in 1usize..6,
    ) {
        let kernel = StampKernel::new(radius, 0.3);
        let mut grid = DensityGrid::new(SIDE, SIDE);
        kernel.stamp(&mut grid, cx, cy);
        for _ in 0..repeats {
            let before = grid.clone();
            kernel.stamp(&mut grid, cx, cy);
            for (after, before) in grid.cells().iter().zip(before.cells()) {
                prop_assert!(after >= before);
            }
        }
        prop_assert!(grid.cell(cx, cy).unwrap() > 0.3 * repeats as f32);
    }

    #[test]
    fn persistence_round_trip_is_bit_identical(left in grid_strategy(), right in grid_strategy()) {
        let mut bytes = Vec::new();
        write_grids(&mut bytes, &left, &right).unwrap();
        let (l, r) = decode_grids(&bytes, SIDE, SIDE).unwrap();

        let bits = |g: &DensityGrid| g.cells().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        prop_assert_eq!(bits(&l), bits(&left));
        prop_assert_eq!(bits(&r), bits(&right));
    }

    #[test]
    fn histogram_output_is_unit_range_and_lut_monotonic(grid in grid_strategy()) {
        let lut = HistogramLut::from_grid(&grid);
        prop_assert!(lut.table().windows(2).all(|w| w[0] <= w[1]));

        let out = tone_map(&grid, ToneMode::HistogramEqualized, 1.0);
        prop_assert!(out.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn linear_and_log_are_non_negative(grid in grid_strategy(), saturation in 0.05f32..5.0) {
        for mode in [ToneMode::Linear, ToneMode::Logarithmic] {
            let out = tone_map(&grid, mode, saturation);
            prop_assert!(out.iter().all(|&v| v >= 0.0));
        }
    }

    #[test]
    fn neutral_ticks_leave_grids_empty(ticks in 1usize..40, radius in 1i32..=20) {
        let mut session = HeatSession::with_size(DeadzoneFilter::default(), 1000, 1000);
        let tuning = TuningParams::new(1.0, radius, 1.0, ToneMode::Linear);
        for _ in 0..ticks {
            session.tick(&StickSnapshot::NEUTRAL, &tuning);
        }
        for stick in Stick::ALL {
            prop_assert_eq!(session.grid(stick).stats().nonzero, 0);
        }
    }
}
