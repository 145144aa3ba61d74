/// First `max_chars` characters of `text`
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Convert an article title to an image filename stem
///
/// Spaces become underscores and the result is cut to `max_chars`
/// characters. Path separators are replaced too so the file always lands in
/// the download directory.
pub fn title_to_filename(title: &str, max_chars: usize) -> String {
    let name = title.replace(' ', "_").replace(['/', '\\'], "_");
    preview(&name, max_chars).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_counts_characters() {
        assert_eq!(preview("Opinión pública", 7), "Opinión");
        assert_eq!(preview("corto", 50), "corto");
        assert_eq!(preview("", 3), "");
    }

    #[test]
    fn test_title_to_filename() {
        assert_eq!(
            title_to_filename("La mejor defensa", 50),
            "La_mejor_defensa"
        );
        assert_eq!(title_to_filename("Sí/No", 50), "Sí_No");

        let long = "Una frase muy larga que supera con creces el límite de cincuenta";
        let name = title_to_filename(long, 50);
        assert_eq!(name.chars().count(), 50);
        assert!(name.starts_with("Una_frase_muy_larga"));
    }
}
