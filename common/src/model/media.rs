/// Splits a stored `media_files` value into file names.
///
/// Entries are trimmed and empty entries are dropped, so `" a.jpg, ,b.mp4"`
/// yields `["a.jpg", "b.mp4"]`.
pub fn split_media_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_media_list<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}

/// Appends `added` after the entries already present in `existing`.
pub fn merge_media_list<S: AsRef<str>>(existing: &str, added: &[S]) -> String {
    let mut all = split_media_list(existing);
    all.extend(added.iter().map(|name| name.as_ref().to_string()));
    join_media_list(&all)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_trims_and_skips_blanks() {
        assert_eq!(
            split_media_list(" a.jpg, ,b.mp4 ,"),
            vec!["a.jpg".to_string(), "b.mp4".to_string()]
        );
        assert!(split_media_list("").is_empty());
    }

    #[test]
    fn merge_keeps_existing_entries_first() {
        let merged = merge_media_list("old1.jpg, old2.png", &["new1.mp4", "new2.gif"]);
        assert_eq!(merged, "old1.jpg,old2.png,new1.mp4,new2.gif");
    }

    #[test]
    fn merge_into_empty_list() {
        assert_eq!(merge_media_list("", &["x.webm"]), "x.webm");
    }
}
