use ndarray::{Array2, ArrayBase, Data, Dimension, Ix2, Zip};

use super::{
    spectrum::{fft2, fftshift, ifft2, ifftshift, to_grayscale},
    FilterError,
};

/// Gaussian low-pass mask for a center-shifted spectrum.
///
/// The peak sits at `(rows / 2, cols / 2)`, where [`fftshift`] puts the
/// zero-frequency bin, so it is exactly 1.0 for any shape.
pub fn create_gaussian_filter(rows: usize, cols: usize, sigma: f64) -> Array2<f64> {
    let (crow, ccol) = ((rows / 2) as f64, (cols / 2) as f64);
    Array2::from_shape_fn((rows, cols), |(u, v)| {
        let d2 = (u as f64 - crow).powi(2) + (v as f64 - ccol).powi(2);
        (-d2 / (2.0 * sigma * sigma)).exp()
    })
}

/// Filters the grayscale version of `image` in the frequency domain and
/// returns the magnitude of the result as bytes.
///
/// Magnitudes above 255 wrap around rather than saturate. Clip `image` first
/// if that matters.
pub fn apply_gaussian_filter<S, D, T>(
    image: &ArrayBase<S, D>,
    filt: &ArrayBase<T, Ix2>,
) -> Result<Array2<u8>, FilterError>
where
    S: Data<Elem = f64>,
    D: Dimension,
    T: Data<Elem = f64>,
{
    let gray = to_grayscale(image)?;
    if gray.dim() != filt.dim() {
        return Err(FilterError::ShapeMismatch {
            image: gray.dim(),
            filter: filt.dim(),
        });
    }

    let mut spectrum = fftshift(&fft2(&gray));
    Zip::from(&mut spectrum)
        .and(filt)
        .for_each(|c, &f| *c *= f);
    let filtered = ifft2(&ifftshift(&spectrum));
    Ok(filtered.mapv(|c| narrow_to_u8(c.norm())))
}

/// Truncates toward zero and keeps the low 8 bits, like an unchecked
/// float-to-uint8 cast. NaN maps to 0.
fn narrow_to_u8(v: f64) -> u8 {
    (v.trunc() as i64).rem_euclid(256) as u8
}
