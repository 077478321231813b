//! Text-level extraction of a delimited block.

/// Return every line strictly between the first and second line equal to
/// `delimiter`, byte for byte.
///
/// Lines are compared after stripping their `\n` or `\r\n` terminator, so a
/// delimiter with trailing whitespace does not match. Extracted lines keep
/// the terminators they had in `text`. With fewer than two delimiter lines
/// the result is empty.
pub fn extract_delimited(text: &str, delimiter: &str) -> String {
    let mut lines = text.split_inclusive('\n');

    if !lines.by_ref().any(|line| bare(line) == delimiter) {
        return String::new();
    }

    let mut block = String::new();
    for line in lines {
        if bare(line) == delimiter {
            return block;
        }
        block.push_str(line);
    }

    // Opening marker without a closing one.
    String::new()
}

fn bare(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
