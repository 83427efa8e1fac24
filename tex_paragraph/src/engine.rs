/*! The parts of a TeX engine that the paragraph builder interacts with: the [state](state::State)
   it reads its parameters from, and [`close_paragraph`](stomach::close_paragraph), which turns
   the material of a paragraph into finished lines.
 */

pub mod state;
pub mod stomach;
