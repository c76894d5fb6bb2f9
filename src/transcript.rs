use regex::Regex;
use std::sync::LazyLock;

/// Header token that opens a WebVTT subtitle track.
const WEBVTT_MARKER: &str = "WEBVTT";

/// Cue timing line such as `00:00:00.140 --> 00:00:04.020`.
static CUE_TIMING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{2}:\d{2}:\d{2}\.\d{3}\s+-->\s+\d{2}:\d{2}:\d{2}\.\d{3}").unwrap()
});

/// Any WebVTT line terminator: CRLF, bare LF or bare CR.
static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r\n|\r|\n").unwrap());

/// Returns true when the text looks like a WebVTT subtitle track.
pub fn is_webvtt(text: &str) -> bool {
    text.trim_start()
        .get(..WEBVTT_MARKER.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(WEBVTT_MARKER))
}

/// Reduce a WebVTT track to the spoken text it carries.
///
/// Text that does not start with the `WEBVTT` header is returned unchanged.
/// For subtitle tracks, blank lines, the header line and cue timing lines are
/// dropped and the remaining lines are joined with single spaces.
pub fn normalize_transcript(text: &str) -> String {
    if !is_webvtt(text) {
        return text.to_string();
    }

    LINE_BREAK
        .split(text.trim_start())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.eq_ignore_ascii_case(WEBVTT_MARKER))
        .filter(|line| !CUE_TIMING.is_match(line))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_returned_unchanged() {
        let text = "  Add two eggs.\n\nMix well.  ";
        assert_eq!(normalize_transcript(text), text);
    }

    #[test]
    fn test_marker_must_lead_the_text() {
        let text = "Today we are making WEBVTT pancakes";
        assert!(!is_webvtt(text));
        assert_eq!(normalize_transcript(text), text);
    }

    #[test]
    fn test_strips_header_and_cue_timings() {
        let vtt = "WEBVTT\n\n00:00:00.000 --> 00:00:02.000\nAdd two eggs.\n\n00:00:02.000 --> 00:00:04.000\nMix well.";
        assert_eq!(normalize_transcript(vtt), "Add two eggs. Mix well.");
    }

    #[test]
    fn test_marker_is_case_insensitive_and_may_follow_whitespace() {
        let vtt = "\n  webvtt\n00:00:01.500 --> 00:00:03.250\nPreheat the oven";
        assert!(is_webvtt(vtt));
        assert_eq!(normalize_transcript(vtt), "Preheat the oven");
    }

    #[test]
    fn test_keeps_spoken_lines_in_order() {
        let vtt = "WEBVTT\n\n00:00:00.000 --> 00:00:01.000\n  first  \nsecond\n\n\n00:00:01.000 --> 00:00:02.000 align:start\nthird\r\n";
        assert_eq!(normalize_transcript(vtt), "first second third");
    }

    #[test]
    fn test_carriage_return_line_endings() {
        let vtt = "WEBVTT\r\r00:00:00.000 --> 00:00:02.000\rAdd two eggs.\r\r00:00:02.000 --> 00:00:04.000\rMix well.";
        assert_eq!(normalize_transcript(vtt), "Add two eggs. Mix well.");
    }

    #[test]
    fn test_malformed_timing_lines_are_kept_as_text() {
        let vtt = "WEBVTT\n0:00:01.000 --> 0:00:02.000\nStir";
        assert_eq!(normalize_transcript(vtt), "0:00:01.000 --> 0:00:02.000 Stir");
    }

    #[test]
    fn test_track_without_cues_yields_empty_text() {
        assert_eq!(normalize_transcript("WEBVTT\n\n00:00:00.000 --> 00:00:01.000\n"), "");
        assert_eq!(normalize_transcript(""), "");
    }
}
