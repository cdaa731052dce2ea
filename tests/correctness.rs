use approx::assert_relative_eq;
use num_complex::Complex64;
use rand::{rngs::StdRng, Rng, SeedableRng};
use strided_unchecked::{
    as_flat, as_flat_mut, first_ptr, first_unchecked, get_unchecked, get_unchecked_mut,
    make_enumeration, ptr_at, Array2, CursorState, Rect2View, Rect2ViewMut, RectBuffer,
};

fn make_markers(rows: usize, cols: usize) -> Array2<u64> {
    Array2::from_fn(rows, cols, |i, j| (i * cols + j) as u64 * 7 + 3).unwrap()
}

#[test]
fn test_scenario_2x3() {
    let data = [1, 2, 3, 4, 5, 6];
    let view = Rect2View::new(&data, 2, 3).unwrap();
    unsafe {
        assert_eq!(*get_unchecked(&view, 0, 0), 1);
        assert_eq!(*get_unchecked(&view, 1, 2), 6);
        assert_eq!(*first_unchecked(&view), 1);
    }
}

#[test]
fn test_scenario_enumerate_three() {
    let data = [10, 20, 30];
    let pairs: Vec<(usize, i32)> = make_enumeration(&data)
        .into_iter()
        .map(|(k, &v)| (k, v))
        .collect();
    assert_eq!(pairs, vec![(0, 10), (1, 20), (2, 30)]);
}

#[test]
fn test_unchecked_access_hits_row_major_marker() {
    for &(h, w) in &[(0, 0), (0, 5), (5, 0), (1, 1), (1, 9), (9, 1), (4, 7), (16, 16)] {
        let a = make_markers(h, w);
        for i in 0..h {
            for j in 0..w {
                let got = unsafe { *get_unchecked(&a, i, j) };
                assert_eq!(got, (i * w + j) as u64 * 7 + 3, "({i}, {j}) in {h}x{w}");
            }
        }
    }
}

#[test]
fn test_distinct_offsets_distinct_references() {
    let a = make_markers(5, 6);
    let mut addrs = Vec::new();
    for i in 0..5 {
        for j in 0..6 {
            addrs.push(unsafe { ptr_at(&a, i, j) } as usize);
        }
    }
    let mut dedup = addrs.clone();
    dedup.sort_unstable();
    dedup.dedup();
    assert_eq!(dedup.len(), addrs.len());
}

#[test]
fn test_first_equals_origin_random_shapes() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..32 {
        let h = rng.gen_range(1..20);
        let w = rng.gen_range(1..20);
        let a = make_markers(h, w);
        let first = unsafe { first_unchecked(&a) };
        let origin = unsafe { get_unchecked(&a, 0, 0) };
        assert!(std::ptr::eq(first, origin));
        assert_eq!(first_ptr(&a), origin as *const u64);
    }
}

#[test]
fn test_flat_matches_unchecked_random_shapes() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..32 {
        let h = rng.gen_range(0..12);
        let w = rng.gen_range(1..12);
        let a = Array2::from_fn(h, w, |_, _| rng.gen::<f64>()).unwrap();
        let flat = as_flat(&a);
        assert_eq!(flat.len(), h * w);
        for (k, x) in flat.iter().enumerate() {
            let y = unsafe { get_unchecked(&a, k / w, k % w) };
            assert_relative_eq!(*x, *y);
        }
    }
}

#[test]
fn test_enumerate_yields_every_index_once() {
    let mut rng = StdRng::seed_from_u64(7);
    for len in [0usize, 1, 2, 31, 128] {
        let data: Vec<i64> = (0..len).map(|_| rng.gen()).collect();
        let mut cursor = make_enumeration(&data).begin();
        let mut expected = 0;
        while cursor.advance() {
            let (k, v) = cursor.current();
            assert_eq!(k, expected);
            assert_eq!(*v, data[k]);
            expected += 1;
        }
        assert_eq!(expected, len);
        assert_eq!(cursor.state(), CursorState::Exhausted);
        assert!(!cursor.advance());
    }
}

#[test]
fn test_enumerable_restartable() {
    let data: Vec<Complex64> = (0..9)
        .map(|k| Complex64::new(k as f64, -(k as f64)))
        .collect();
    let e = make_enumeration(&data);
    let first: Vec<_> = e.begin().collect();
    let second: Vec<_> = e.begin().collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), data.len());
}

#[test]
fn test_enumerate_flattened_rect() {
    let a = make_markers(3, 4);
    let flat = as_flat(&a);
    for (k, v) in make_enumeration(flat) {
        assert_eq!(*v, unsafe { *get_unchecked(&a, k / 4, k % 4) });
    }
    assert_eq!(a.view().enumerate().into_iter().count(), 12);
}

#[test]
fn test_unchecked_mut_and_flat_mut() {
    let mut data = vec![0.0f64; 12];
    {
        let mut view = Rect2ViewMut::new(&mut data, 3, 4).unwrap();
        for i in 0..3 {
            for j in 0..4 {
                unsafe {
                    *get_unchecked_mut(&mut view, i, j) = (i * 4 + j) as f64 * 0.5;
                }
            }
        }
        as_flat_mut(&mut view).iter_mut().for_each(|x| *x += 1.0);
        assert_eq!(view.height(), RectBuffer::height(&view));
    }
    for (k, x) in data.iter().enumerate() {
        assert_relative_eq!(*x, k as f64 * 0.5 + 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_column_overrun_reaches_next_row() {
    let a = make_markers(3, 3);
    unsafe {
        assert_eq!(*get_unchecked(&a, 0, 3), *get_unchecked(&a, 1, 0));
        assert_eq!(*get_unchecked(&a, 0, 8), *get_unchecked(&a, 2, 2));
    }
}
