#[cfg(test)]
mod _tests_correlators {
    use super::super::correlators::*;
    use super::super::histogram::*;
    use crate::boo::{boo_product_row, QlmArray};
    use crate::error::BooError;
    use crate::interfaces::periodic_difference;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use num_complex::Complex64;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_positions(rng: &mut StdRng, n: usize, side: f64) -> Vec<Vector3<f64>> {
        (0..n)
            .map(|_| Vector3::from_fn(|_, _| rng.gen_range(0.0..side)))
            .collect()
    }

    fn random_qlm(rng: &mut StdRng, n: usize, l: usize) -> QlmArray {
        let rows: Vec<Vec<Complex64>> = (0..n)
            .map(|_| {
                (0..=l)
                    .map(|m| {
                        let im = if m == 0 { 0.0 } else { rng.gen_range(-0.3..0.3) };
                        Complex64::new(rng.gen_range(-0.3..0.3), im)
                    })
                    .collect()
            })
            .collect();
        QlmArray::from_rows(l, &rows).unwrap()
    }

    fn assert_histograms_close(a: &CorrelationHistogram, b: &CorrelationHistogram, scale: f64) {
        assert_eq!(a.n_channels(), b.n_channels());
        for (ca, cb) in a.counts().iter().zip(b.counts()) {
            assert_eq!(*ca as f64 * scale, *cb as f64);
        }
        for k in 0..a.n_channels() {
            for (sa, sb) in a.channel(k).iter().zip(b.channel(k)) {
                assert_relative_eq!(sa * scale, sb, epsilon = 1e-9, max_relative = 1e-9);
            }
        }
    }

    // ======================== PERIODIC ========================

    #[test]
    fn test_periodic_conservation_against_direct_enumeration() {
        let mut rng = StdRng::seed_from_u64(42);
        let side = 5.0;
        let n = 20;
        let positions = random_positions(&mut rng, n, side);
        let qlm = random_qlm(&mut rng, n, 6);
        let coarse = random_qlm(&mut rng, n, 6);
        let n_bins = 8;
        let hist = periodic_gg_l(&positions, side, &qlm, &coarse, n_bins).unwrap();

        let mut expected = CorrelationHistogram::new(Binning::new(n_bins, side / 2.0).unwrap(), 2);
        let mut within = 0u64;
        for i in 0..n {
            for j in (i + 1)..n {
                let d = (0..3)
                    .map(|k| periodic_difference(positions[i][k], positions[j][k], side).powi(2))
                    .sum::<f64>()
                    .sqrt();
                if d < side / 2.0 {
                    within += 1;
                    let values = [
                        boo_product_row(qlm.row(i), qlm.row(j)).unwrap(),
                        boo_product_row(coarse.row(i), coarse.row(j)).unwrap(),
                    ];
                    assert!(expected.record(d, &values));
                }
            }
        }
        assert_eq!(hist.total_pairs(), within);
        assert!(within > 0);
        assert_histograms_close(&expected, &hist, 1.0);
    }

    #[test]
    fn test_periodic_ignores_image_shifts() {
        let mut rng = StdRng::seed_from_u64(9);
        let side = 4.0;
        let positions = random_positions(&mut rng, 15, side);
        let shifted: Vec<_> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| p + Vector3::new(side * (i % 3) as f64, -side, side * 2.0))
            .collect();
        let qlm = random_qlm(&mut rng, 15, 4);
        let a = periodic_gg_l(&positions, side, &qlm, &qlm, 6).unwrap();
        let b = periodic_gg_l(&shifted, side, &qlm, &qlm, 6).unwrap();
        assert_eq!(a.counts(), b.counts());
    }

    #[test]
    fn test_periodic_matches_open_boundaries_in_large_box() {
        let mut rng = StdRng::seed_from_u64(1);
        let n = 30;
        let positions = random_positions(&mut rng, n, 4.0);
        let qlm = random_qlm(&mut rng, n, 6);
        let coarse = random_qlm(&mut rng, n, 6);
        let side = 100.0;
        let n_bins = 500;
        let periodic = periodic_gg_l(&positions, side, &qlm, &coarse, n_bins).unwrap();
        let binning = Binning::new(n_bins, side / 2.0).unwrap();
        let open = gg_l(&positions, &qlm, &coarse, &vec![true; n], &binning).unwrap();
        // Every unordered pair is seen from both centers in the open correlator
        assert_eq!(periodic.total_pairs(), (n * (n - 1) / 2) as u64);
        assert_histograms_close(&periodic, &open, 2.0);
    }

    #[test]
    fn test_periodic_rejects_bad_inputs() {
        let positions = vec![Vector3::zeros(); 3];
        let qlm = QlmArray::zeros(3, 6);
        assert_eq!(
            periodic_gg_l(&positions, 0.0, &qlm, &qlm, 10),
            Err(BooError::InvalidPeriod(0.0))
        );
        assert!(matches!(
            periodic_gg_l(&positions, 5.0, &qlm, &qlm, 0),
            Err(BooError::InvalidBinning { .. })
        ));
        assert!(matches!(
            periodic_gg_l(&positions, 5.0, &QlmArray::zeros(2, 6), &qlm, 10),
            Err(BooError::LengthMismatch { .. })
        ));
        assert_eq!(
            periodic_gg_l(&positions, 5.0, &qlm, &QlmArray::zeros(3, 4), 10),
            Err(BooError::DegreeMismatch { left: 6, right: 4 })
        );
    }

    // ======================== OPEN BOUNDARIES ========================

    #[test]
    fn test_gg_l_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(17);
        let n = 60;
        let positions = random_positions(&mut rng, n, 6.0);
        let qlm = random_qlm(&mut rng, n, 4);
        let coarse = random_qlm(&mut rng, n, 4);
        let is_center: Vec<bool> = (0..n).map(|_| rng.gen_bool(0.4)).collect();
        let binning = Binning::new(10, 1.7).unwrap();
        let hist = gg_l(&positions, &qlm, &coarse, &is_center, &binning).unwrap();

        let mut expected = CorrelationHistogram::new(binning, 2);
        for i in (0..n).filter(|&i| is_center[i]) {
            for j in (0..n).filter(|&j| j != i) {
                let values = [
                    boo_product_row(qlm.row(i), qlm.row(j)).unwrap(),
                    boo_product_row(coarse.row(i), coarse.row(j)).unwrap(),
                ];
                expected.record((positions[j] - positions[i]).norm(), &values);
            }
        }
        assert!(expected.total_pairs() > 0);
        assert_histograms_close(&expected, &hist, 1.0);
    }

    #[test]
    fn test_gg_l_excludes_self_pairs() {
        let positions = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.6, 0.0, 0.0),
        ];
        let qlm = QlmArray::zeros(3, 6);
        let binning = Binning::new(4, 1.0).unwrap();
        let hist = gg_l(&positions, &qlm, &qlm, &[true, false, false], &binning).unwrap();
        // Coincident partner lands in bin 0, the third particle in bin 2
        assert_eq!(hist.counts(), &[1, 0, 1, 0]);

        let empty = QlmArray::zeros(1, 6);
        let lonely = gg_l(&positions[..1], &empty, &empty, &[true], &binning).unwrap();
        assert_eq!(lonely.total_pairs(), 0);
    }

    #[test]
    fn test_gg_l_without_centers_is_empty() {
        let mut rng = StdRng::seed_from_u64(5);
        let positions = random_positions(&mut rng, 10, 2.0);
        let qlm = random_qlm(&mut rng, 10, 6);
        let binning = Binning::new(5, 1.0).unwrap();
        let hist = gg_l(&positions, &qlm, &qlm, &[false; 10], &binning).unwrap();
        assert_eq!(hist.total_pairs(), 0);
        assert!(gg_l(&positions, &qlm, &qlm, &[true; 9], &binning).is_err());
    }

    // ======================== BOND BASED ========================

    fn two_parallel_bonds() -> Vec<Vector3<f64>> {
        vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.3, 0.2, 0.1),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(1.3, 0.2, 0.1),
        ]
    }

    #[test]
    fn test_steinhardt_parallel_bonds() {
        let positions = two_parallel_bonds();
        let bonds = vec![(0, 1), (2, 3)];
        let binning = Binning::new(3, 2.0).unwrap();
        let hist = steinhardt_g_l(&positions, &bonds, &[true; 4], &binning, 6).unwrap();
        // Midpoints one unit apart, seen from both bonds
        assert_eq!(hist.counts(), &[0, 2, 0]);
        assert_eq!(hist.n_channels(), 1);
        assert_relative_eq!(hist.channel(0)[1], 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_steinhardt_requires_both_endpoints_valid() {
        let positions = two_parallel_bonds();
        let bonds = vec![(0, 1), (2, 3)];
        let binning = Binning::new(4, 2.0).unwrap();
        let centers = [true, true, true, false];
        let hist = steinhardt_g_l(&positions, &bonds, &centers, &binning, 6).unwrap();
        assert_eq!(hist.total_pairs(), 1);
        let centers = [false, true, true, false];
        let none = steinhardt_g_l(&positions, &bonds, &centers, &binning, 6).unwrap();
        assert_eq!(none.total_pairs(), 0);
    }

    #[test]
    fn test_steinhardt_skips_bond_self_pair() {
        let positions = two_parallel_bonds();
        let binning = Binning::new(4, 2.0).unwrap();
        let hist = steinhardt_g_l(&positions, &[(0, 1)], &[true; 4], &binning, 6).unwrap();
        assert_eq!(hist.total_pairs(), 0);
    }

    #[test]
    fn test_steinhardt_perpendicular_bonds() {
        // Bonds along x and along z, sharing particle 0
        let positions = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        ];
        let binning = Binning::new(2, 2.0).unwrap();
        let hist = steinhardt_g_l(&positions, &[(0, 1), (0, 2)], &[true; 3], &binning, 2).unwrap();
        // P2(cos 90°) = -1/2 per ordered pair
        assert_eq!(hist.counts(), &[2, 0]);
        assert_relative_eq!(hist.channel(0)[0], -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_steinhardt_validates_bonds() {
        let positions = two_parallel_bonds();
        let binning = Binning::new(4, 2.0).unwrap();
        assert!(matches!(
            steinhardt_g_l(&positions, &[(0, 4)], &[true; 4], &binning, 6),
            Err(BooError::BondIndexOutOfRange { .. })
        ));
        assert!(steinhardt_g_l(&positions, &[(0, 1)], &[true; 3], &binning, 6).is_err());
    }
}
