use std::path::Path;

use image::{DynamicImage, GrayImage, Luma};
use ndarray::{Array2, Array3, ArrayD};

use super::FilterError;

/// `rows x cols` for grayscale images, `rows x cols x 3` for everything else.
/// Alpha is dropped.
pub fn image_to_array(img: &DynamicImage) -> ArrayD<f64> {
    if img.color().has_color() {
        let rgb = img.to_rgb8();
        let (w, h) = rgb.dimensions();
        Array3::from_shape_fn((h as usize, w as usize, 3), |(y, x, c)| {
            rgb.get_pixel(x as u32, y as u32)[c] as f64
        })
        .into_dyn()
    } else {
        let gray = img.to_luma8();
        let (w, h) = gray.dimensions();
        Array2::from_shape_fn((h as usize, w as usize), |(y, x)| {
            gray.get_pixel(x as u32, y as u32)[0] as f64
        })
        .into_dyn()
    }
}

pub fn open_image<P: AsRef<Path>>(path: P) -> Result<ArrayD<f64>, FilterError> {
    Ok(image_to_array(&image::open(path)?))
}

pub fn gray_to_image(pixels: &Array2<u8>) -> GrayImage {
    let (rows, cols) = pixels.dim();
    GrayImage::from_fn(cols as u32, rows as u32, |x, y| {
        Luma([pixels[[y as usize, x as usize]]])
    })
}

pub fn save_gray<P: AsRef<Path>>(pixels: &Array2<u8>, path: P) -> Result<(), FilterError> {
    gray_to_image(pixels).save(path)?;
    Ok(())
}
