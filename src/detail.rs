//! Splitting of failure and error bodies into stack-trace lines.

/// Returns the lines of `text`, split on `\n`, `\r\n` or a lone `\r`.
///
/// Terminators are not included. Empty lines between two terminators are
/// kept, a trailing terminator does not produce a final empty line, and an
/// empty input yields nothing. The iterator is lazy and cheap to clone, so
/// the sequence can be walked again from the start.
pub fn split_lines(text: &str) -> DetailLines<'_> {
    DetailLines { remaining: text }
}

/// Iterator over the lines of a detail text block.
#[derive(Debug, Clone)]
pub struct DetailLines<'a> {
    remaining: &'a str,
}

impl<'a> Iterator for DetailLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }

        match self.remaining.find(['\n', '\r']) {
            Some(pos) => {
                let line = &self.remaining[..pos];
                let rest = &self.remaining[pos..];
                let skip = if rest.starts_with("\r\n") { 2 } else { 1 };
                self.remaining = &rest[skip..];
                Some(line)
            }
            None => {
                let line = self.remaining;
                self.remaining = "";
                Some(line)
            }
        }
    }
}

impl std::iter::FusedIterator for DetailLines<'_> {}
