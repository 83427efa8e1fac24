/*! The shape of a paragraph: target width and indentation of each line. */

use crate::tex::numerics::Dim32;

/// Maps a line number (starting at 0) to `(target_width, indent)`.
#[derive(Clone,Debug,PartialEq,Eq)]
pub enum ParagraphShape {
    /// Every line `width` wide, unindented (`\hsize`).
    Fixed { width:Dim32 },
    /// `\hangindent=indent \hangafter=after`: if `after >= 0`, lines from `after` on are indented;
    /// otherwise the first `-after` lines are. A negative `indent` indents on the right.
    Hanging { hsize:Dim32, indent:Dim32, after:i32 },
    /// `\parshape`: pairs of `(indent, width)`; the last pair is repeated for all further lines.
    Explicit(Vec<(Dim32,Dim32)>)
}
impl ParagraphShape {
    /// `(target_width, indent)` of line `line`
    pub fn line(&self,line:usize) -> (Dim32,Dim32) {
        match self {
            ParagraphShape::Fixed { width } => (*width,Dim32::ZERO),
            ParagraphShape::Hanging { hsize, indent, after } => {
                let n = after.unsigned_abs() as usize;
                let hung = if *after >= 0 { line >= n } else { line < n };
                if !hung { return (*hsize,Dim32::ZERO) }
                let left = if *indent > Dim32::ZERO { *indent } else { Dim32::ZERO };
                (*hsize - indent.abs(),left)
            }
            ParagraphShape::Explicit(v) => match v.get(line).or(v.last()) {
                Some((indent,width)) => (*width,*indent),
                None => (Dim32::ZERO,Dim32::ZERO)
            }
        }
    }
    /// The number of lines with individual specifications; every line from this number on
    /// has the same width and indentation as this one.
    pub fn distinct_lines(&self) -> usize {
        match self {
            ParagraphShape::Fixed { .. } => 0,
            ParagraphShape::Hanging { after,.. } => after.unsigned_abs() as usize,
            ParagraphShape::Explicit(v) => v.len().saturating_sub(1)
        }
    }
}
