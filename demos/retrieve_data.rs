use patternnet_prep::{archive::extract_archive, config::DataPaths, logging};

// PatternNet is downloaded by hand from https://sites.google.com/view/zhouwx/dataset
// and placed at the archive path before running this.
fn main() {
    logging::init().unwrap();
    let paths = DataPaths::default();
    let written = extract_archive(&paths.archive, &paths.extract_dir).unwrap();
    println!("Extracted {written} files to {}", paths.extract_dir.display());
}
