use std::path::Path;

// Checked in this order, each against the already truncated name.
const RELEASE_TAGS: &[&str] = &[
    "blueray", "bluray", "dvdrip", "xvid", "cd1", "cd2", "cd3", "cd4", "cd5", "cd6", "vc1", "vc-1",
    "hdtv", "1080p", "720p", "1080i", "x264", "stv", "limited", "ac3", "xxx", "hddvd",
];

const BLANKED_CHARS: &[char] = &['[', ']', '.', '-', '#', '_', '=', '+', '<', '>', ','];

/// Search key for the lookup service: lowercased file name cut at the first
/// release tag, with separator punctuation turned into spaces.
pub fn short_name(path: &Path) -> String {
    let mut name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    for tag in RELEASE_TAGS {
        if let Some(idx) = name.find(tag) {
            name.truncate(idx);
        }
    }

    name.chars()
        .map(|c| if BLANKED_CHARS.contains(&c) { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuts_at_first_release_tag() {
        assert_eq!(
            short_name(Path::new("Movie.Name.2015.BluRay.1080p.x264.mkv")),
            "movie name 2015 "
        );
    }

    #[test]
    fn test_no_tag_keeps_extension() {
        assert_eq!(short_name(Path::new("Show_S01E02.mp4")), "show s01e02 mp4");
    }

    #[test]
    fn test_strips_directories() {
        assert_eq!(
            short_name(Path::new("/media/HDTV/Some-Show.[720p].avi")),
            "some show  "
        );
    }

    #[test]
    fn test_earliest_tag_in_name_wins() {
        assert_eq!(short_name(Path::new("a.hdtv.b.xvid.avi")), "a ");
        assert_eq!(short_name(Path::new("a.xvid.b.hdtv.avi")), "a ");
        assert_eq!(short_name(Path::new("film x264 cd1.avi")), "film ");
    }

    #[test]
    fn test_all_noise_yields_blank_key() {
        assert_eq!(short_name(Path::new("bluray.mkv")), "");
        assert_eq!(short_name(Path::new("[_].-")), "     ");
    }
}
