use std::ops::Range;

/// Unit size for a text reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Granularity {
    Word,
    Line,
    Char,
}

/// A run of the source text: either an animatable unit or the whitespace
/// between units, kept verbatim so the browser wraps the text as before.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Piece {
    Unit(String),
    Gap(String),
}

impl Piece {
    pub fn text(&self) -> &str {
        match self {
            Piece::Unit(s) | Piece::Gap(s) => s,
        }
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Piece::Unit(_))
    }
}

/// Partition `text` into pieces. Concatenating every piece's text yields the
/// input exactly.
///
/// `Line` splits into words here; lines are recovered after layout with
/// [`group_lines`], because only the rendered text knows where it wrapped.
pub fn split(text: &str, granularity: Granularity) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut run = String::new();
    let mut run_is_space = false;
    for ch in text.chars() {
        let space = ch.is_whitespace();
        if granularity == Granularity::Char && !space {
            flush(&mut pieces, &mut run, run_is_space);
            pieces.push(Piece::Unit(ch.to_string()));
            continue;
        }
        if space != run_is_space {
            flush(&mut pieces, &mut run, run_is_space);
            run_is_space = space;
        }
        run.push(ch);
    }
    flush(&mut pieces, &mut run, run_is_space);
    pieces
}

fn flush(pieces: &mut Vec<Piece>, run: &mut String, is_space: bool) {
    if run.is_empty() {
        return;
    }
    let text = std::mem::take(run);
    pieces.push(if is_space {
        Piece::Gap(text)
    } else {
        Piece::Unit(text)
    });
}

pub fn unit_count(pieces: &[Piece]) -> usize {
    pieces.iter().filter(|p| p.is_unit()).count()
}

/// Group consecutive word units into lines from their rendered top offsets.
/// Words whose tops differ by at most `tolerance` pixels share a line.
pub fn group_lines(tops: &[f64], tolerance: f64) -> Vec<Range<usize>> {
    let mut lines = Vec::new();
    let mut start = 0;
    for i in 1..tops.len() {
        if (tops[i] - tops[start]).abs() > tolerance {
            lines.push(start..i);
            start = i;
        }
    }
    if !tops.is_empty() {
        lines.push(start..tops.len());
    }
    lines
}
