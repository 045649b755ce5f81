/// Prints a left-aligned table with a title, a header row and a rule.
///
/// The first column is sized to its widest cell; the last column is left unpadded.
pub fn render_table(title: &str, headers: [&str; 2], rows: &[(String, String)]) {
    let width = rows
        .iter()
        .map(|(first, _)| first.chars().count())
        .chain(std::iter::once(headers[0].len()))
        .max()
        .unwrap_or_default()
        + 2;

    println!("\n{title}:\n");
    println!("{:<width$}{}", headers[0], headers[1]);
    println!("{:-<80}", "");
    for (first, second) in rows {
        println!("{first:<width$}{second}");
    }
    println!();
}
