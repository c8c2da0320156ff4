use crate::models::{ClockTime, Weekday};

/// Largest image accepted for upload.
pub(crate) const MAX_IMAGE_BYTES: f64 = 5.0 * 1024.0 * 1024.0;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ImageError {
    #[error("Bitte nur Bilddateien hochladen!")]
    NotAnImage,
    #[error("Bild ist zu groß! Maximal 5MB erlaubt.")]
    TooLarge,
}

pub(crate) fn now_ms() -> i64 {
    js_sys::Date::now().round() as i64
}

/// Weekday of the browser's local date.
pub(crate) fn today_local() -> Weekday {
    let d = js_sys::Date::new_0();
    Weekday::from_index(d.get_day() as usize)
}

/// Current local wall-clock time, minute precision.
pub(crate) fn local_clock_time() -> ClockTime {
    let d = js_sys::Date::new_0();
    ClockTime::new(d.get_hours(), d.get_minutes()).unwrap_or_default()
}

/// Header clock text, `HH:MM:SS` as in `de-DE`.
pub(crate) fn local_clock_label() -> String {
    let d = js_sys::Date::new_0();
    format!(
        "{:02}:{:02}:{:02}",
        d.get_hours(),
        d.get_minutes(),
        d.get_seconds()
    )
}

/// Local date as `YYYY-MM-DD`.
pub(crate) fn today_iso_local() -> String {
    let d = js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        d.get_full_year(),
        d.get_month() + 1,
        d.get_date()
    )
}

/// Plain text of a rich-text field: tags dropped, common entities decoded.
pub(crate) fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Sort key used wherever notes are listed by title. Umlauts sort with their
/// base letter, as in German collation.
pub(crate) fn title_sort_key(html: &str) -> String {
    let mut key = String::new();
    for c in strip_html(html).trim().to_lowercase().chars() {
        match c {
            'ä' => key.push('a'),
            'ö' => key.push('o'),
            'ü' => key.push('u'),
            'ß' => key.push_str("ss"),
            _ => key.push(c),
        }
    }
    key
}

pub(crate) fn validate_image(mime: &str, size: f64) -> Result<(), ImageError> {
    if !mime.starts_with("image/") {
        return Err(ImageError::NotAnImage);
    }
    if size > MAX_IMAGE_BYTES {
        return Err(ImageError::TooLarge);
    }
    Ok(())
}

/// Object name for an uploaded image: `<note id>_<millis>.<ext>`.
pub(crate) fn image_file_name(note_id: i64, original: &str, millis: i64) -> String {
    let ext = original
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && !ext.contains('/'))
        .unwrap_or("png");
    format!("{note_id}_{millis}.{}", ext.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<b>Mathe</b> &amp; <i>Deutsch</i>"), "Mathe & Deutsch");
        assert_eq!(strip_html("<div>Pause<br/></div>"), "Pause");
        assert_eq!(strip_html("a&nbsp;b"), "a b");
        assert_eq!(strip_html(""), "");
    }

    #[test]
    fn test_title_sort_key_ignores_markup_and_case() {
        assert_eq!(title_sort_key("<b>  Zebra</b>"), "zebra");
        assert!(title_sort_key("apfel") < title_sort_key("<i>Birne</i>"));
    }

    #[test]
    fn test_title_sort_key_folds_umlauts() {
        assert_eq!(title_sort_key("Äpfel"), "apfel");
        assert_eq!(title_sort_key("Straße"), "strasse");
        assert!(title_sort_key("Übung") < title_sort_key("Zeichnen"));
        assert!(title_sort_key("Öl") < title_sort_key("Pause"));
    }

    #[test]
    fn test_validate_image() {
        assert_eq!(validate_image("image/png", 1024.0), Ok(()));
        assert_eq!(
            validate_image("application/pdf", 10.0),
            Err(ImageError::NotAnImage)
        );
        assert_eq!(
            validate_image("image/jpeg", MAX_IMAGE_BYTES + 1.0),
            Err(ImageError::TooLarge)
        );
        assert_eq!(validate_image("image/jpeg", MAX_IMAGE_BYTES), Ok(()));
    }

    #[test]
    fn test_image_file_name() {
        assert_eq!(image_file_name(12, "Foto.JPG", 1700), "12_1700.jpg");
        assert_eq!(image_file_name(3, "ohne_endung", 5), "3_5.png");
        assert_eq!(image_file_name(3, "archiv.tar.gz", 5), "3_5.gz");
    }
}
