//! Blank-line segmentation of generated text.

const FENCE: &str = "```";

/// Splits text into segments separated by one or more blank lines.
///
/// A lone newline never splits. Lines holding only spaces or tabs count as
/// blank. A ``` line that starts a segment opens a fence; blank lines inside
/// it belong to the fenced segment, and an unclosed fence runs to the end of
/// the input. A ``` line in the middle of a segment is ordinary text.
///
/// Every returned segment is trimmed and non-empty.
pub fn split_segments(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut in_fence = false;

    for line in text.lines() {
        let trimmed = line.trim();

        if in_fence {
            current.push(line);
            if trimmed.starts_with(FENCE) {
                in_fence = false;
            }
            continue;
        }

        if trimmed.is_empty() {
            flush(&mut current, &mut segments);
            continue;
        }

        if current.is_empty() && trimmed.starts_with(FENCE) && !closes_on_same_line(trimmed) {
            in_fence = true;
        }
        current.push(line);
    }
    flush(&mut current, &mut segments);

    segments
}

/// ```` ```code``` ```` opens and closes on one line.
fn closes_on_same_line(line: &str) -> bool {
    line.len() >= FENCE.len() * 2 && line[FENCE.len()..].ends_with(FENCE)
}

fn flush(current: &mut Vec<&str>, segments: &mut Vec<String>) {
    if current.is_empty() {
        return;
    }
    let segment = current.join("\n");
    current.clear();
    let segment = segment.trim();
    if !segment.is_empty() {
        segments.push(segment.to_string());
    }
}
