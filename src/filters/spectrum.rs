use std::f64::consts::PI;

use ndarray::{Array2, ArrayBase, Axis, Data, Dimension, Ix2};
use rustfft::{num_complex::Complex64, FftDirection, FftPlanner};

use super::FilterError;

/// Collapses a `rows x cols x channels` image to `rows x cols` by averaging
/// the channels. 2D input is returned as is.
pub fn to_grayscale<S, D>(image: &ArrayBase<S, D>) -> Result<Array2<f64>, FilterError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let image = image.view().into_dyn();
    match image.ndim() {
        2 => Ok(image.into_dimensionality::<Ix2>()?.to_owned()),
        3 => {
            let gray = image.mean_axis(Axis(2)).ok_or(FilterError::NoChannels)?;
            Ok(gray.into_dimensionality::<Ix2>()?)
        }
        n => Err(FilterError::Dimensionality(n)),
    }
}

/// Symmetric Hann window of length `n`, zero at both ends.
pub fn hann_window(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => (0..n)
            .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / (n - 1) as f64).cos())
            .collect(),
    }
}

/// Separable 2D Hann window scaled to a mean of one.
pub fn hann_window_2d(rows: usize, cols: usize) -> Array2<f64> {
    let row_window = hann_window(rows);
    let col_window = hann_window(cols);
    let window = Array2::from_shape_fn((rows, cols), |(i, j)| row_window[i] * col_window[j]);
    match window.mean() {
        Some(mean) if mean > 0.0 => window / mean,
        _ => window,
    }
}

pub fn fft2(data: &Array2<f64>) -> Array2<Complex64> {
    let mut spectrum = data.mapv(|x| Complex64::new(x, 0.0));
    transform(&mut spectrum, FftDirection::Forward);
    spectrum
}

/// Inverse of [`fft2`], including the `1 / (rows * cols)` normalization.
pub fn ifft2(spectrum: &Array2<Complex64>) -> Array2<Complex64> {
    let mut data = spectrum.clone();
    transform(&mut data, FftDirection::Inverse);
    let n = data.len();
    if n > 0 {
        data.mapv_inplace(|c| c / n as f64);
    }
    data
}

fn transform(data: &mut Array2<Complex64>, direction: FftDirection) {
    let (rows, cols) = data.dim();
    if rows == 0 || cols == 0 {
        return;
    }

    let mut planner = FftPlanner::new();
    let fft_row = planner.plan_fft(cols, direction);
    let fft_col = planner.plan_fft(rows, direction);

    let mut buf = Vec::with_capacity(rows.max(cols));
    for mut row in data.rows_mut() {
        buf.clear();
        buf.extend(row.iter().copied());
        fft_row.process(&mut buf);
        row.iter_mut().zip(&buf).for_each(|(dst, src)| *dst = *src);
    }
    for mut col in data.columns_mut() {
        buf.clear();
        buf.extend(col.iter().copied());
        fft_col.process(&mut buf);
        col.iter_mut().zip(&buf).for_each(|(dst, src)| *dst = *src);
    }
}

/// Moves the zero-frequency bin from `(0, 0)` to `(rows / 2, cols / 2)`.
pub fn fftshift<T: Clone>(a: &Array2<T>) -> Array2<T> {
    let (rows, cols) = a.dim();
    roll(a, rows / 2, cols / 2)
}

/// Undoes [`fftshift`], also for odd dimensions.
pub fn ifftshift<T: Clone>(a: &Array2<T>) -> Array2<T> {
    let (rows, cols) = a.dim();
    roll(a, rows - rows / 2, cols - cols / 2)
}

fn roll<T: Clone>(a: &Array2<T>, by_rows: usize, by_cols: usize) -> Array2<T> {
    let (rows, cols) = a.dim();
    if rows == 0 || cols == 0 {
        return a.clone();
    }
    let (by_rows, by_cols) = (by_rows % rows, by_cols % cols);
    Array2::from_shape_fn((rows, cols), |(i, j)| {
        a[[(i + rows - by_rows) % rows, (j + cols - by_cols) % cols]].clone()
    })
}

/// Centered magnitude spectrum of a Hann-windowed grayscale version of `image`.
pub fn fft_image<S, D>(image: &ArrayBase<S, D>) -> Result<Array2<f64>, FilterError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let gray = to_grayscale(image)?;
    let (rows, cols) = gray.dim();
    let windowed = gray * hann_window_2d(rows, cols);
    Ok(fftshift(&fft2(&windowed)).mapv(|c| c.norm()))
}
