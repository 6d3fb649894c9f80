/// Evenly spaced samples over `[min, max]`, both ends included.
pub(crate) struct Linspace {
    start: f64,
    end: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Linspace {
    pub(crate) fn new(min: f64, max: f64, n: usize) -> Self {
        let step = if n > 1 {
            let num_steps = (n - 1) as f64;
            (max - min) / num_steps
        } else {
            0.
        };
        Linspace {
            start: min,
            end: max,
            step,
            index: 0,
            len: n,
        }
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            None
        } else {
            let i = self.index;
            self.index += 1;
            // Pin the last sample so accumulated rounding never overshoots or undershoots max
            if i + 1 == self.len && self.len > 1 {
                return Some(self.end);
            }
            Some(self.start + self.step * i as f64)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Linspace {}

#[test]
fn test_linspace() {
    let points: Vec<f64> = Linspace::new(0., 7., 4).collect();

    assert_eq!(points.len(), 4);
    assert_eq!(points[0], 0.);
    assert!((points[1] - 7. / 3.).abs() < 1e-12);
    assert_eq!(points[3], 7.);

    assert_eq!(Linspace::new(2., 2., 1).collect::<Vec<_>>(), vec![2.]);
    assert_eq!(Linspace::new(0., 1., 0).count(), 0);
}
