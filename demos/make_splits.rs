use patternnet_prep::{
    config::DataPaths,
    datasets::{display_counts_per_class, generate_splits, DatasetSplit},
    logging,
};
use rand::prelude::*;

fn main() {
    logging::init().unwrap();
    let paths = DataPaths::default();
    let classes = paths.class_names().unwrap();
    let mut rng = StdRng::seed_from_u64(0);

    let splits = generate_splits(&classes, &paths.dataset_dir, &paths.split_file, &mut rng).unwrap();
    if splits.is_stale(&classes, &paths.dataset_dir).unwrap() {
        println!("warning: {} no longer matches the dataset", paths.split_file.display());
    }

    for split in DatasetSplit::ALL {
        let per_class: Vec<(&str, Vec<&str>)> = classes
            .iter()
            .map(|class| {
                let files = splits
                    .get(split)
                    .iter()
                    .filter(|e| e.class() == class)
                    .map(|e| e.file_name())
                    .collect();
                (class.as_str(), files)
            })
            .collect();
        display_counts_per_class(split, per_class);
    }
}
