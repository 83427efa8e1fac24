/*! Nodes of horizontal lists, i.e. the material a paragraph is built from.

   Characters arrive with their dimensions already looked up in the font; the line breaker only
   ever inspects a node's [type](NodeType), its [natural size](HNode::natural) and whether it is
   [discardable](NodeTrait::discardable).
*/

use std::fmt::{Debug, Display, Formatter, Write};
use crate::tex::numerics::{Dim32, GlueValue};

/// The TeX node types that can occur in a paragraph, numbered as in `\lastnodetype`.
#[derive(Clone,Copy,Eq,PartialEq,Debug)]
pub enum NodeType {
    Char = 0,
    Rule = 3,
    Discretionary = 8,
    Math = 10,
    Glue = 11,
    Kern = 12,
    Penalty = 13,
}

/// Common functionality of nodes
pub trait NodeTrait:Debug+Clone {
    fn height(&self) -> Dim32;
    fn depth(&self) -> Dim32;
    fn width(&self) -> Dim32;
    fn nodetype(&self) -> NodeType;
    /// Glue, kerns and penalties vanish at the start of a line and when a break is taken at them.
    fn discardable(&self) -> bool {
        matches!(self.nodetype(),NodeType::Glue | NodeType::Kern | NodeType::Penalty)
    }
    /// Human-readable representation, as in `\showlists`
    fn readable_fmt(&self, indent:usize, f:&mut Formatter<'_>) -> std::fmt::Result;
    fn readable_do_indent(indent:usize,f:&mut Formatter<'_>) -> std::fmt::Result {
        for _ in 0..indent {
            f.write_char(' ')?;
        }
        Ok(())
    }
    /// Returns a [`Display`]able human-readable representation of the node.
    fn readable(&self) -> Readable<'_,Self> {
        Readable(self)
    }
}

/// See [`NodeTrait::readable`].
pub struct Readable<'a,N:NodeTrait>(&'a N);
impl<N:NodeTrait> Display for Readable<'_,N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.readable_fmt(0,f)
    }
}

/// Whether a math node opens or closes inline math.
#[derive(Clone,Copy,Eq,PartialEq,Debug)]
pub enum MathKind { Before, After }

/// A discretionary: `\discretionary{pre}{post}{nobreak}`. If a line break is taken at this node,
/// `pre` ends the current line and `post` starts the next one; otherwise `nobreak` is typeset.
#[derive(Clone,Debug,PartialEq,Eq,Default)]
pub struct Discretionary {
    pub pre:Box<[HNode]>,
    pub post:Box<[HNode]>,
    pub nobreak:Box<[HNode]>
}
impl Discretionary {
    pub fn new(pre:Vec<HNode>,post:Vec<HNode>,nobreak:Vec<HNode>) -> Self {
        Self{pre:pre.into(),post:post.into(),nobreak:nobreak.into()}
    }
    /// `\-`: a discretionary hyphen with the given hyphen character.
    pub fn hyphen(hyphen:HNode) -> Self {
        Self{pre:vec!(hyphen).into(),post:Box::default(),nobreak:Box::default()}
    }
    pub fn pre_natural(&self) -> GlueValue { Self::sum(&self.pre) }
    pub fn post_natural(&self) -> GlueValue { Self::sum(&self.post) }
    pub fn nobreak_natural(&self) -> GlueValue { Self::sum(&self.nobreak) }
    fn sum(ls:&[HNode]) -> GlueValue {
        ls.iter().map(|n| n.natural()).sum()
    }
}

/// A node in a horizontal list
#[derive(Clone,Debug,PartialEq,Eq)]
pub enum HNode {
    Char { char:char, width:Dim32, height:Dim32, depth:Dim32 },
    HSkip(GlueValue),
    HKern(Dim32),
    Penalty(i32),
    Discretionary(Discretionary),
    /// A math boundary; `surround` is the `\mathsurround` kern it carries.
    Math { kind:MathKind, surround:Dim32 },
    VRule {
        width:Option<Dim32>,
        height:Option<Dim32>,
        depth:Option<Dim32>
    },
}
impl HNode {
    /// The default rule width, 0.4pt
    pub const RULE_WIDTH:Dim32 = Dim32(26214);

    /// The node's contribution to the width of a line: its width, plus the stretch and shrink of glue.
    pub fn natural(&self) -> GlueValue {
        match self {
            HNode::HSkip(g) => *g,
            HNode::Discretionary(d) => d.nobreak_natural(),
            _ => GlueValue::rigid(self.width())
        }
    }
    pub fn is_glue(&self) -> bool {
        matches!(self,HNode::HSkip(_))
    }
}

impl NodeTrait for HNode {
    fn height(&self) -> Dim32 {
        match self {
            HNode::Char { height,.. } => *height,
            HNode::VRule { height, .. } => height.unwrap_or_default(),
            HNode::Discretionary(d) => d.nobreak.iter().map(|n| n.height()).max().unwrap_or_default(),
            _ => Dim32::default(),
        }
    }
    fn width(&self) -> Dim32 {
        match self {
            HNode::Char { width,.. } => *width,
            HNode::VRule { width, .. } => width.unwrap_or(Self::RULE_WIDTH),
            HNode::HSkip(s) => s.length,
            HNode::HKern(d) => *d,
            HNode::Math { surround,.. } => *surround,
            HNode::Discretionary(d) => d.nobreak.iter().map(|n| n.width()).sum(),
            HNode::Penalty(_) => Dim32::default(),
        }
    }
    fn depth(&self) -> Dim32 {
        match self {
            HNode::Char { depth,.. } => *depth,
            HNode::VRule { depth, .. } => depth.unwrap_or_default(),
            HNode::Discretionary(d) => d.nobreak.iter().map(|n| n.depth()).max().unwrap_or_default(),
            _ => Dim32::default(),
        }
    }
    fn nodetype(&self) -> NodeType {
        match self {
            HNode::Char { .. } => NodeType::Char,
            HNode::HSkip(_) => NodeType::Glue,
            HNode::HKern(_) => NodeType::Kern,
            HNode::Penalty(_) => NodeType::Penalty,
            HNode::Discretionary(_) => NodeType::Discretionary,
            HNode::Math { .. } => NodeType::Math,
            HNode::VRule { .. } => NodeType::Rule,
        }
    }
    fn readable_fmt(&self, indent: usize, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            HNode::Char { char, .. } => f.write_char(*char),
            HNode::HSkip(s) => write!(f, "<hskip:{}>",s),
            HNode::HKern(d) => write!(f, "<hkern:{}>",d),
            HNode::Penalty(p) => write!(f, "<penalty:{}>",p),
            HNode::Math { kind:MathKind::Before, .. } => write!(f, "<mathon>"),
            HNode::Math { kind:MathKind::After, .. } => write!(f, "<mathoff>"),
            HNode::VRule { width, height, depth } => {
                write!(f, "<vrule")?;
                if let Some(w) = width {
                    write!(f, " width={}",w)?;
                }
                if let Some(h) = height {
                    write!(f, " height={}",h)?;
                }
                if let Some(d) = depth {
                    write!(f, " depth={}",d)?;
                }
                write!(f, ">")
            }
            HNode::Discretionary(d) => {
                Self::readable_do_indent(indent,f)?;
                write!(f,"<discretionary>")?;
                for (name,ls) in [("pre",&d.pre),("post",&d.post),("nobreak",&d.nobreak)] {
                    write!(f,"<{}>",name)?;
                    for c in ls.iter() {
                        c.readable_fmt(indent + 2,f)?;
                    }
                    write!(f,"</{}>",name)?;
                }
                write!(f,"</discretionary>")
            }
        }
    }
}
