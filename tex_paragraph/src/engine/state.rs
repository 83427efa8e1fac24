/*! The part of a TeX state that paragraph building depends on: integer, dimension and skip
   registers, the paragraph shape, and the hyphenation hook.

   Registers are addressed by their primitive names (`"tolerance"`, `"hsize"`, `"parfillskip"`...);
   [`DefaultState`] starts out with the values plain TeX assigns.
 */

use std::fmt::{Debug, Formatter};
use rustc_hash::FxHashMap;
use crate::linebreak::shape::ParagraphShape;
use crate::tex::nodes::HNode;
use crate::tex::numerics::{Dim32, GlueValue};
use crate::utils::errors::HyphenationError;

/// Inserts discretionaries into a paragraph's material (B-Book §891). Implementations may
/// mutate the list in place in any way that keeps its typeset content unchanged.
pub trait Hyphenator {
    fn hyphenate(&mut self,nodes:&mut Vec<HNode>) -> Result<(),HyphenationError>;
}
impl<F:FnMut(&mut Vec<HNode>) -> Result<(),HyphenationError>> Hyphenator for F {
    fn hyphenate(&mut self, nodes: &mut Vec<HNode>) -> Result<(), HyphenationError> {
        self(nodes)
    }
}

/// Options provider for the paragraph builder.
pub trait State {
    /// get the value of an integer primitive, e.g. `\tolerance`
    fn get_primitive_int(&self,name:&'static str) -> i32;
    /// set the value of an integer primitive
    fn set_primitive_int(&mut self,name:&'static str,v:i32);
    /// get the value of a dimension primitive, e.g. `\hsize`
    fn get_primitive_dim(&self,name:&'static str) -> Dim32;
    /// set the value of a dimension primitive
    fn set_primitive_dim(&mut self,name:&'static str,v:Dim32);
    /// get the value of a skip primitive, e.g. `\parfillskip`
    fn get_primitive_skip(&self,name:&'static str) -> GlueValue;
    /// set the value of a skip primitive
    fn set_primitive_skip(&mut self,name:&'static str,v:GlueValue);
    /// the current paragraph shape, if any
    fn get_parshape(&self) -> Option<&ParagraphShape>;
    fn set_parshape(&mut self,shape:Option<ParagraphShape>);
    /// Called once per paragraph, before the second pass of the line breaker.
    fn hyphenate(&mut self,_nodes:&mut Vec<HNode>) -> Result<(),HyphenationError> {
        Ok(())
    }
}

const PLAIN_INTS:&[(&str,i32)] = &[
    ("pretolerance",100),
    ("tolerance",200),
    ("hyphenpenalty",50),
    ("exhyphenpenalty",50),
    ("linepenalty",10),
    ("adjdemerits",10000),
    ("doublehyphendemerits",10000),
    ("finalhyphendemerits",5000),
    ("hangafter",1),
];
const PLAIN_DIMS:&[(&str,Dim32)] = &[
    ("hsize",Dim32(30785863)), // 6.5in
    ("hangindent",Dim32::ZERO),
    ("emergencystretch",Dim32::ZERO),
];

/// A [`State`] that stores registers in hash maps; unset registers are zero.
pub struct DefaultState {
    ints:FxHashMap<&'static str,i32>,
    dims:FxHashMap<&'static str,Dim32>,
    skips:FxHashMap<&'static str,GlueValue>,
    parshape:Option<ParagraphShape>,
    hyphenator:Option<Box<dyn Hyphenator>>
}
impl DefaultState {
    /// A state initialized with plain TeX's values
    pub fn new() -> Self {
        let mut skips = FxHashMap::default();
        skips.insert("parfillskip",GlueValue::fil());
        Self {
            ints:PLAIN_INTS.iter().copied().collect(),
            dims:PLAIN_DIMS.iter().copied().collect(),
            skips,
            parshape:None,
            hyphenator:None
        }
    }
    /// Installs the hook that is called at the start of the second pass.
    pub fn set_hyphenator<H:Hyphenator+'static>(&mut self,h:H) {
        self.hyphenator = Some(Box::new(h));
    }
}
impl Default for DefaultState {
    fn default() -> Self { Self::new() }
}
impl Debug for DefaultState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultState")
            .field("ints",&self.ints)
            .field("dims",&self.dims)
            .field("skips",&self.skips)
            .field("parshape",&self.parshape)
            .field("hyphenator",&self.hyphenator.is_some())
            .finish()
    }
}
impl State for DefaultState {
    fn get_primitive_int(&self, name: &'static str) -> i32 {
        self.ints.get(name).copied().unwrap_or_default()
    }
    fn set_primitive_int(&mut self, name: &'static str, v: i32) {
        self.ints.insert(name,v);
    }
    fn get_primitive_dim(&self, name: &'static str) -> Dim32 {
        self.dims.get(name).copied().unwrap_or_default()
    }
    fn set_primitive_dim(&mut self, name: &'static str, v: Dim32) {
        self.dims.insert(name,v);
    }
    fn get_primitive_skip(&self, name: &'static str) -> GlueValue {
        self.skips.get(name).copied().unwrap_or_default()
    }
    fn set_primitive_skip(&mut self, name: &'static str, v: GlueValue) {
        self.skips.insert(name,v);
    }
    fn get_parshape(&self) -> Option<&ParagraphShape> {
        self.parshape.as_ref()
    }
    fn set_parshape(&mut self, shape: Option<ParagraphShape>) {
        self.parshape = match shape {
            Some(ParagraphShape::Explicit(v)) if v.is_empty() => None,
            s => s
        };
    }
    fn hyphenate(&mut self, nodes: &mut Vec<HNode>) -> Result<(), HyphenationError> {
        match &mut self.hyphenator {
            Some(h) => h.hyphenate(nodes),
            None => Ok(())
        }
    }
}
