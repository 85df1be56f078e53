use crate::domain::error::DomainError;
use crate::domain::target_format::TargetFormat;
use unicode_normalization::UnicodeNormalization as _;

pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

// secure_filename が空になった場合のファイル名
const FALLBACK_STEM: &str = "converted";

/// True when the text after the last `.` is one of [`ALLOWED_EXTENSIONS`].
pub fn allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => false,
    }
}

pub fn ensure_allowed_file(filename: &str) -> Result<(), DomainError> {
    if allowed_file(filename) {
        Ok(())
    } else {
        Err(DomainError::DisallowedExtension(filename.to_string()))
    }
}

/// Reduces an arbitrary client filename to something safe to join onto a
/// storage directory: ASCII only, no path separators, no leading/trailing
/// dots or underscores. The result may be empty.
///
/// Accented letters are NFKD-decomposed first so `ü` keeps its base `u`.
pub fn secure_filename(filename: &str) -> String {
    let flattened: String = filename
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// `<secure stem>.<target extension>`
pub fn converted_filename(original: &str, target: TargetFormat) -> String {
    let secure = secure_filename(original);
    let stem = match secure.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        Some(_) => FALLBACK_STEM,
        None if secure.is_empty() => FALLBACK_STEM,
        None => secure.as_str(),
    };
    format!("{}.{}", stem, target.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_file() {
        assert!(allowed_file("photo.png"));
        assert!(allowed_file("photo.JPG"));
        assert!(allowed_file("archive.tar.jpeg"));
        assert!(allowed_file("anim.gif"));
        assert!(!allowed_file("photo"));
        assert!(!allowed_file("photo.bmp"));
        assert!(!allowed_file("photo.png.exe"));
        assert!(!allowed_file(""));
    }

    #[test]
    fn test_ensure_allowed_file_reports_name() {
        match ensure_allowed_file("notes.txt") {
            Err(DomainError::DisallowedExtension(name)) => assert_eq!(name, "notes.txt"),
            other => panic!("Expected DisallowedExtension, got {:?}", other),
        }
        assert!(ensure_allowed_file("ok.gif").is_ok());
    }

    #[test]
    fn test_secure_filename() {
        assert_eq!(secure_filename("My cool movie.mov"), "My_cool_movie.mov");
        assert_eq!(secure_filename("../../../etc/passwd"), "etc_passwd");
        assert_eq!(secure_filename("..\\windows\\system32.png"), "windows_system32.png");
        assert_eq!(secure_filename("i contain cool \u{fc}ml\u{e4}uts.txt"), "i_contain_cool_umlauts.txt");
        assert_eq!(secure_filename("Caf\u{e9} \u{ff21}\u{ff22}.png"), "Cafe_AB.png");
        assert_eq!(secure_filename("_.hidden.png"), "hidden.png");
        assert_eq!(secure_filename("\u{65e5}\u{672c}"), "");
    }

    #[test]
    fn test_converted_filename_uses_target_extension() {
        assert_eq!(converted_filename("photo.png", TargetFormat::Jpeg), "photo.jpg");
        assert_eq!(converted_filename("my photo.JPEG", TargetFormat::Gif), "my_photo.gif");
        assert_eq!(converted_filename("archive.tar.gif", TargetFormat::Png), "archive.tar.png");
        assert_eq!(converted_filename("../up/x.gif", TargetFormat::Png), "up_x.png");
    }

    #[test]
    fn test_converted_filename_falls_back_when_stem_is_empty() {
        assert_eq!(converted_filename("\u{65e5}\u{672c}.png", TargetFormat::Png), "png.png");
        assert_eq!(converted_filename("\u{65e5}\u{672c}", TargetFormat::Gif), "converted.gif");
    }
}
