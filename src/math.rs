use num::Float;

/// Similar to numpy.interp: piecewise-linear lookup of each `x_input` along `coords`,
/// saturating at the first/last y outside the covered range. A NaN `x` maps to NaN.
pub(crate) fn interp<F>(x_input: impl IntoIterator<Item = F>, coords: impl IntoIterator<Item = (F, F)>) -> Vec<F>
where
    F: Float,
{
    let coords: Vec<(F, F)> = coords.into_iter().collect();

    x_input
        .into_iter()
        .map(|x| {
            let Some(&(first_x, first_y)) = coords.first() else {
                return F::zero();
            };
            let Some(&(last_x, last_y)) = coords.last() else {
                return F::zero();
            };

            // Base cases
            if x.is_nan() {
                return F::nan();
            }
            if x <= first_x {
                return first_y;
            }
            if x >= last_x {
                return last_y;
            }

            // Actual interpolation
            for window in coords.windows(2) {
                let (x1, y1) = window[0];
                let (x2, y2) = window[1];

                if x1 <= x && x <= x2 {
                    if x2 == x1 {
                        return y2;
                    }
                    return y1 + (x - x1) * (y2 - y1) / (x2 - x1);
                }
            }

            last_y
        })
        .collect()
}

#[test]
fn test_interp() {
    let x = [0., 1., 1.5, 2.72, 3.24];
    let xs = [1., 2., 3.];
    let ys = [3., 2., 0.];

    let got = interp(x, xs.into_iter().zip(ys));
    let expected = [3., 3., 2.5, 0.56, 0.];

    for (g, e) in got.iter().zip(expected) {
        assert!((g - e).abs() < 1e-12, "{g} != {e}");
    }

    let x = [2.5, -1., 7.5];
    let xs = [0., 1., 2., 3., 4.5];
    let ys = [0., 2., 5., 3., 2.];

    assert_eq!(interp(x, xs.into_iter().zip(ys)), vec![4., 0., 2.]);

    let got = interp([f64::NAN], xs.into_iter().zip(ys));
    assert!(got[0].is_nan());
}
