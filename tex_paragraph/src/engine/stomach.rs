/*! Closing a paragraph: resolving its shape, breaking it into lines, and packaging each line
   between `\leftskip` and `\rightskip`.
 */

use log::debug;
use crate::engine::state::State;
use crate::linebreak::LineBreaker;
use crate::linebreak::shape::ParagraphShape;
use crate::tex::nodes::{HNode, NodeTrait};
use crate::tex::numerics::{Dim32, GlueOrder, GlueValue};
use crate::utils::errors::HyphenationError;

/// How the glue of a line is set to reach its target width (B-Book §658).
#[derive(Clone,Copy,Eq,PartialEq,Debug)]
pub enum GlueSet {
    /// all glue at its natural width
    Rigid,
    /// glue of the given order stretches by `num/den` of its stretch
    Stretch { num:i32, den:i32, order:GlueOrder },
    /// glue of the given order shrinks by `num/den` of its shrink; never more than all of it
    Shrink { num:i32, den:i32, order:GlueOrder }
}
impl GlueSet {
    pub fn compute(natural:&GlueValue,target:Dim32) -> Self {
        let x = target.0 as i64 - natural.length.0 as i64;
        if x > 0 && !natural.stretch.is_zero() {
            GlueSet::Stretch {
                num:x.min(i32::MAX as i64) as i32,
                den:natural.stretch.magnitude.0,
                order:natural.stretch.order
            }
        } else if x < 0 && !natural.shrink.is_zero() {
            let shrink = natural.shrink.magnitude.0;
            let num = if natural.shrink.order.is_infinite() || -x < shrink as i64 {
                (-x).min(i32::MAX as i64) as i32
            } else { shrink };
            GlueSet::Shrink {num,den:shrink,order:natural.shrink.order}
        } else {
            GlueSet::Rigid
        }
    }
    /// The width that glue `g` receives in a line set like this
    pub fn set_width(&self,g:&GlueValue) -> Dim32 {
        match *self {
            GlueSet::Stretch {num,den,order} if g.stretch.order == order =>
                g.length + g.stretch.multiply(num,den).magnitude,
            GlueSet::Shrink {num,den,order} if g.shrink.order == order =>
                g.length - g.shrink.multiply(num,den).magnitude,
            _ => g.length
        }
    }
}

/// Target width, indentation and side skips of one line of a paragraph
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct ParLineSpec {
    pub target:Dim32,
    pub indent:Dim32,
    pub left_skip:GlueValue,
    pub right_skip:GlueValue
}

/// A line of a finished paragraph
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct ParLine {
    pub spec:ParLineSpec,
    /// the line's material, starting with `\leftskip` and ending with `\rightskip`
    pub children:Vec<HNode>,
    pub natural:GlueValue,
    pub glue_set:GlueSet
}
impl ParLine {
    pub fn new(spec:ParLineSpec,line:Vec<HNode>) -> Self {
        let mut children = Vec::with_capacity(line.len() + 2);
        children.push(HNode::HSkip(spec.left_skip));
        children.extend(line);
        children.push(HNode::HSkip(spec.right_skip));
        let natural = children.iter().map(|n| n.natural()).sum();
        let glue_set = GlueSet::compute(&natural,spec.target);
        Self{spec,children,natural,glue_set}
    }
    /// The width of the line after setting its glue
    pub fn width(&self) -> Dim32 {
        self.children.iter().map(|n| match n {
            HNode::HSkip(g) => self.glue_set.set_width(g),
            n => n.width()
        }).sum()
    }
}

/// Ends the current paragraph (`\par` in horizontal mode): breaks `nodes` into lines and resets
/// `\hangindent`, `\hangafter` and `\parshape`, also if hyphenation fails.
///
/// The last line ends with `\parfillskip`, followed by `\rightskip` like every line.
pub fn close_paragraph<S:State>(state:&mut S,nodes:Vec<HNode>) -> Result<Vec<ParLine>,HyphenationError> {
    let left_skip = state.get_primitive_skip("leftskip");
    let right_skip = state.get_primitive_skip("rightskip");
    let hsize = state.get_primitive_dim("hsize");
    let hangindent = state.get_primitive_dim("hangindent");
    let hangafter = state.get_primitive_int("hangafter");
    state.set_primitive_int("hangafter",1);
    state.set_primitive_dim("hangindent",Dim32::ZERO);
    if state.get_parshape().is_none() && hangindent != Dim32::ZERO {
        state.set_parshape(Some(ParagraphShape::Hanging {hsize,indent:hangindent,after:hangafter}));
    }
    let shape = state.get_parshape().cloned().unwrap_or(ParagraphShape::Fixed {width:hsize});
    let parfillskip = state.get_primitive_skip("parfillskip");
    let lines = LineBreaker::build(state,nodes)?;
    debug!("paragraph closed: {} lines",lines.len());
    let count = lines.len();
    Ok(lines.into_iter().enumerate().map(|(i,mut line)| {
        if i + 1 == count {
            line.push(HNode::HSkip(parfillskip));
        }
        let (target,indent) = shape.line(i);
        ParLine::new(ParLineSpec{target,indent,left_skip,right_skip},line)
    }).collect())
}
