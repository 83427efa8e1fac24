#![forbid(unsafe_code)]
/*! TeX's paragraph builder: breaking a horizontal list into lines of a given
   [shape](linebreak::shape::ParagraphShape) with the least total demerits, the way
   `\par` does it in horizontal mode.
 */

pub mod utils;
pub mod tex;
pub mod engine;
pub mod linebreak;

#[doc(hidden)]
pub mod tests;

pub mod prelude {
    pub use crate::tex::numerics::{Dim32, GlueComponent, GlueOrder, GlueValue};
    pub use crate::tex::nodes::{HNode, NodeTrait, Discretionary};
    pub use crate::linebreak::LineBreaker;
    pub use crate::linebreak::breaks::Breaks;
    pub use crate::linebreak::shape::ParagraphShape;
    pub use crate::engine::state::{State, DefaultState, Hyphenator};
    pub use crate::engine::stomach::close_paragraph;
    pub use crate::utils::errors::HyphenationError;
}
