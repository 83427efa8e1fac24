/*! Candidate positions for line breaks (B-Book §866). */

use log::trace;
use crate::tex::nodes::{HNode, MathKind, NodeTrait};
use crate::tex::numerics::GlueValue;

/// A penalty of this value or more forbids a break.
pub const INF_PENALTY:i32 = 10000;
/// A penalty of this value or less forces a break.
pub const EJECT_PENALTY:i32 = -10000;

/// A position in a horizontal list where a line may end.
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct BreakPoint {
    /// index of the node at which the break happens
    pub position:usize,
    /// the material between the previous breakpoint (and what it discards) and this one
    pub width:GlueValue,
    /// the material that disappears if the break is taken: the breaking node itself, if
    /// discardable, and the discardables following it. Stays on the line otherwise.
    pub point_width:GlueValue,
    /// the pre-break material of a discretionary, added to the line ending here
    pub pre_break:GlueValue,
    /// the post-break material of a discretionary, which starts the next line
    pub post_break:GlueValue,
    pub penalty:i32,
    /// whether this is a break at a discretionary
    pub hyphenated:bool
}
impl BreakPoint {
    fn new(position:usize,width:GlueValue,penalty:i32) -> Self {
        Self {
            position,width,penalty,
            point_width:GlueValue::ZERO,
            pre_break:GlueValue::ZERO,
            post_break:GlueValue::ZERO,
            hyphenated:false
        }
    }
    #[inline(always)]
    pub fn is_forced(&self) -> bool { self.penalty <= EJECT_PENALTY }

    /// Collects all breakpoints of a list in a single pass. Penalties for breaks at
    /// discretionaries are `hyphenpenalty` if the pre-break material is non-empty, and
    /// `exhyphenpenalty` otherwise.
    pub fn collect(nodes:&[HNode],hyphenpenalty:i32,exhyphenpenalty:i32) -> Vec<BreakPoint> {
        let mut ret = Vec::new();
        let mut width = GlueValue::ZERO;
        let mut in_math = false;
        let followed_by_glue = |i:usize| nodes.get(i + 1).is_some_and(|n| n.is_glue());
        let mut i = 0;
        while i < nodes.len() {
            let node = &nodes[i];
            let penalty = match node {
                HNode::HSkip(_) if i > 0 && !nodes[i - 1].discardable() => Some(0),
                HNode::HKern(_) if !in_math && followed_by_glue(i) => Some(0),
                HNode::Math { kind:MathKind::Before, .. } => {
                    in_math = true;
                    None
                }
                HNode::Math { kind:MathKind::After, .. } => {
                    in_math = false;
                    if followed_by_glue(i) { Some(0) } else { None }
                }
                HNode::Penalty(p) if *p < INF_PENALTY => Some(*p),
                HNode::Discretionary(d) if d.pre.is_empty() => Some(exhyphenpenalty),
                HNode::Discretionary(_) => Some(hyphenpenalty),
                _ => None
            };
            let Some(penalty) = penalty else {
                width += node.natural();
                i += 1;
                continue
            };
            let mut bp = BreakPoint::new(i,width,penalty);
            match node {
                HNode::Discretionary(d) => {
                    bp.point_width = d.nobreak_natural();
                    bp.pre_break = d.pre_natural();
                    bp.post_break = d.post_natural();
                    bp.hyphenated = true;
                }
                HNode::Math { .. } => bp.width += node.natural(),
                _ => bp.point_width = node.natural()
            }
            i += 1;
            // discardables following a break vanish with it; penalties are breakpoints of their own
            while let Some(n) = nodes.get(i) {
                match n {
                    HNode::Penalty(p) if *p < INF_PENALTY => break,
                    n if n.discardable() => {
                        bp.point_width += n.natural();
                        i += 1;
                    }
                    _ => break
                }
            }
            trace!("breakpoint at {} {}: width {}, point width {}, penalty {}",bp.position,node.readable(),bp.width,bp.point_width,bp.penalty);
            ret.push(bp);
            width = GlueValue::ZERO;
        }
        ret
    }
}
