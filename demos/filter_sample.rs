use patternnet_prep::{
    config::DataPaths,
    datasets::{DatasetSplit, ImageFolder, SplitDefinition},
    filters::{apply_gaussian_filter, create_gaussian_filter, fft_image, open_image, save_gray},
    logging,
};

fn main() {
    logging::init().unwrap();
    let paths = DataPaths::default();
    let classes = paths.class_names().unwrap();
    let splits = SplitDefinition::load(&paths.split_file).unwrap();
    let train = ImageFolder::new(&paths.dataset_dir, &classes, &splits, DatasetSplit::Train);

    for i in 0..4.min(train.len()) {
        let (path, lbl) = &train[i];
        let img = open_image(path).unwrap();
        let (rows, cols) = (img.shape()[0], img.shape()[1]);

        let spectrum = fft_image(&img).unwrap();
        let peak = spectrum.iter().cloned().fold(0.0, f64::max);
        // log scale so the spectrum is visible as an image
        let spectrum = spectrum.mapv(|m| (255.0 * (1.0 + m).ln() / (1.0 + peak).ln()) as u8);
        save_gray(&spectrum, format!("spectrum-{i}-{}.png", train.label_name(*lbl).unwrap())).unwrap();

        let filtered = apply_gaussian_filter(&img, &create_gaussian_filter(rows, cols, 20.0)).unwrap();
        save_gray(&filtered, format!("lowpass-{i}-{}.png", train.label_name(*lbl).unwrap())).unwrap();
    }
}
