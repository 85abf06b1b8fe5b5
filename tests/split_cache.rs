use std::{collections::HashSet, fs};

use patternnet_prep::datasets::{generate_splits, DatasetSplit, FileEntry, SplitDefinition};
use rand::{rngs::StdRng, SeedableRng};
use tempfile::tempdir;

const CLASSES: [(&str, usize); 4] = [
    ("airplane", 10),
    ("baseball_field", 11),
    ("beach", 1),
    ("wastewater_treatment_plant", 32),
];

fn build_dataset(root: &std::path::Path) {
    for (class, n) in CLASSES {
        let dir = root.join(class);
        fs::create_dir_all(&dir).unwrap();
        for i in 0..n {
            fs::write(dir.join(format!("{class}{i:03}.jpg")), [0u8; 4]).unwrap();
        }
    }
}

#[test]
fn generated_split_is_persisted_and_reloaded_verbatim() {
    let temp = tempdir().unwrap();
    let data = temp.path().join("images");
    build_dataset(&data);
    let split_file = temp.path().join("processed/split_definition.json");
    let classes: Vec<&str> = CLASSES.iter().map(|(c, _)| *c).collect();

    let generated =
        generate_splits(&classes, &data, &split_file, &mut StdRng::seed_from_u64(2024)).unwrap();
    assert!(split_file.exists());
    assert_eq!(generated.len(), 54);

    let on_disk = SplitDefinition::load(&split_file).unwrap();
    assert_eq!(on_disk, generated);

    // different seed, same answer: the file wins
    let reloaded =
        generate_splits(&classes, &data, &split_file, &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(reloaded, generated);

    // the record is trusted even once the dataset is gone
    fs::remove_dir_all(&data).unwrap();
    let (train, val, test) =
        generate_splits(&classes, &data, &split_file, &mut StdRng::seed_from_u64(1))
            .unwrap()
            .into_parts();
    assert_eq!(train, generated.train);
    assert_eq!(val, generated.validation);
    assert_eq!(test, generated.test);
}

#[test]
fn groups_partition_every_file() {
    let temp = tempdir().unwrap();
    build_dataset(temp.path());
    let classes: Vec<String> = CLASSES.iter().map(|(c, _)| c.to_string()).collect();

    let splits = generate_splits(
        &classes,
        temp.path(),
        temp.path().join("split.json"),
        &mut StdRng::seed_from_u64(11),
    )
    .unwrap();

    let mut seen = HashSet::new();
    for split in DatasetSplit::ALL {
        for entry in splits.get(split) {
            assert!(seen.insert(entry.clone()), "{entry:?} is in two groups");
        }
    }
    let expected: HashSet<FileEntry> = CLASSES
        .iter()
        .flat_map(|&(class, n)| (0..n).map(move |i| FileEntry::new(class, format!("{class}{i:03}.jpg"))))
        .collect();
    assert_eq!(seen, expected);

    // 10 -> 6/2/2, 11 -> 6/2/3, 1 -> 0/0/1, 32 -> 19/6/7
    assert_eq!(splits.train.len(), 6 + 6 + 19);
    assert_eq!(splits.validation.len(), 2 + 2 + 6);
    assert_eq!(splits.test.len(), 2 + 3 + 1 + 7);
    assert!(!splits.train.iter().any(|e| e.class() == "beach"));
    assert!(splits
        .test
        .contains(&FileEntry::new("beach", "beach000.jpg")));
}
