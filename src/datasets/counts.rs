use std::{
    fmt::Display,
    io::{self, Write},
};

/// Prints the number of items per class, then `filename` with the total.
///
/// Classes are reported in iteration order, so pass an ordered collection
/// (a `Vec` of pairs, a `BTreeMap`, ...) when the order matters.
pub fn display_counts_per_class<F, I, K, V, T>(filename: F, class_dict: I)
where
    F: Display,
    I: IntoIterator<Item = (K, V)>,
    K: Display,
    V: AsRef<[T]>,
{
    let stdout = io::stdout();
    write_counts_per_class(&mut stdout.lock(), filename, class_dict)
        .expect("failed printing to stdout");
}

pub fn write_counts_per_class<W, F, I, K, V, T>(
    w: &mut W,
    filename: F,
    class_dict: I,
) -> io::Result<usize>
where
    W: Write,
    F: Display,
    I: IntoIterator<Item = (K, V)>,
    K: Display,
    V: AsRef<[T]>,
{
    let mut total = 0;
    for (class, items) in class_dict {
        let n = items.as_ref().len();
        writeln!(w, "{class}: {n}")?;
        total += n;
    }
    writeln!(w, "{filename}: {total}")?;
    Ok(total)
}
