/*! Data structures for TeX's horizontal lists. */

pub mod numerics;
pub mod nodes;
