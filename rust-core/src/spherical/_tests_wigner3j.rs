#[cfg(test)]
mod _tests_wigner3j {
    use super::super::wigner3j::*;
    use crate::error::BooError;
    use approx::assert_abs_diff_eq;

    fn factorial(n: i64) -> f64 {
        (1..=n).map(|k| k as f64).product()
    }

    // Racah formula for (l l l; m1 m2 m3)
    fn racah(l: i64, m1: i64, m2: i64, m3: i64) -> f64 {
        let t1 = l - m1 - l;
        let t2 = l + m2 - l;
        let t3 = l;
        let t4 = l - m1;
        let t5 = l + m2;
        let tmin = 0.max(t1).max(t2);
        let tmax = t3.min(t4).min(t5);
        let mut sum = 0.0;
        for t in tmin..=tmax {
            let sign = if t % 2 == 0 { 1.0 } else { -1.0 };
            sum += sign
                / (factorial(t)
                    * factorial(t - t1)
                    * factorial(t - t2)
                    * factorial(t3 - t)
                    * factorial(t4 - t)
                    * factorial(t5 - t));
        }
        let triangle = factorial(l).powi(3) / factorial(3 * l + 1);
        let pre = (triangle
            * factorial(l + m1)
            * factorial(l - m1)
            * factorial(l + m2)
            * factorial(l - m2)
            * factorial(l + m3)
            * factorial(l - m3))
        .sqrt();
        let phase = if (-m3).rem_euclid(2) == 0 { 1.0 } else { -1.0 };
        phase * pre * sum
    }

    #[test]
    fn test_table_sizes() {
        let expected = [1, 4, 9, 16, 25, 36];
        for (k, &n) in expected.iter().enumerate() {
            assert_eq!(table_len(2 * k), Some(n));
        }
        assert_eq!(table_len(3), None);
        assert_eq!(table_len(12), None);
    }

    #[test]
    fn test_table_matches_racah_formula() {
        for l in (0..=10).step_by(2) {
            let li = l as i32;
            for m1 in -li..=li {
                for m2 in -li..=li {
                    let m3 = -m1 - m2;
                    if m3.abs() > li {
                        continue;
                    }
                    let stored = wigner3j(l, m1, m2, m3).unwrap();
                    let exact = racah(l as i64, m1 as i64, m2 as i64, m3 as i64);
                    assert_abs_diff_eq!(stored, exact, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_orthogonality_sum_rule() {
        // Σ_{m1,m2} (l l l; m1 m2 m3)² = 1/(2l+1) for each fixed m3
        for l in (0..=10).step_by(2) {
            let li = l as i32;
            for m3 in -li..=li {
                let mut sum = 0.0;
                for m1 in -li..=li {
                    let m2 = -m1 - m3;
                    if m2.abs() <= li {
                        sum += wigner3j(l, m1, m2, m3).unwrap().powi(2);
                    }
                }
                assert_abs_diff_eq!(sum, 1.0 / (2 * l + 1) as f64, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_known_values() {
        assert_abs_diff_eq!(wigner3j(0, 0, 0, 0).unwrap(), 1.0);
        assert_abs_diff_eq!(
            wigner3j(2, 0, 0, 0).unwrap(),
            -(2.0_f64 / 35.0).sqrt(),
            epsilon = 1e-15
        );
        // Permutations and global sign flips share one entry
        let a = wigner3j(6, 3, -1, -2).unwrap();
        assert_abs_diff_eq!(a, wigner3j(6, -2, 3, -1).unwrap());
        assert_abs_diff_eq!(a, wigner3j(6, -3, 1, 2).unwrap());
    }

    #[test]
    fn test_non_conserving_orders_vanish() {
        assert_eq!(wigner3j(4, 1, 1, 1), Ok(0.0));
    }

    #[test]
    fn test_out_of_domain() {
        assert_eq!(wigner3j(5, 0, 0, 0), Err(BooError::UnsupportedDegree(5)));
        assert_eq!(wigner3j(12, 0, 0, 0), Err(BooError::UnsupportedDegree(12)));
        assert_eq!(
            wigner3j(4, 5, -5, 0),
            Err(BooError::Wigner3jDomain { l: 4, m1: 5, m2: -5, m3: 0 })
        );
        assert!(!is_supported_degree(7));
        assert!(is_supported_degree(10));
    }
}
