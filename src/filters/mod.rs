//! Frequency-domain helpers for inspecting and low-pass filtering images.
//!
//! Images are `ndarray` arrays of `f64`, either `rows x cols` (grayscale) or
//! `rows x cols x channels`. [`convert`] moves between these arrays and the
//! `image` crate.

pub mod convert;
pub mod gaussian;
pub mod spectrum;

pub use convert::{gray_to_image, image_to_array, open_image, save_gray};
pub use gaussian::{apply_gaussian_filter, create_gaussian_filter};
pub use spectrum::{fft2, fft_image, fftshift, hann_window, ifft2, ifftshift, to_grayscale};

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("expected a 2D or 3D image, got {0} dimensions")]
    Dimensionality(usize),
    #[error("image has no channels")]
    NoChannels,
    #[error("filter shape {filter:?} does not match image shape {image:?}")]
    ShapeMismatch {
        image: (usize, usize),
        filter: (usize, usize),
    },
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
