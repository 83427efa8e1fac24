use std::fmt::{Display, Formatter};

/// The chosen breaks of a paragraph: the sum of their penalties and the positions of the breaking
/// nodes, the last of which is the paragraph's final forced break.
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct Breaks {
    penalty:i64,
    positions:Box<[usize]>
}
impl Breaks {
    pub fn new(penalty:i64,positions:Vec<usize>) -> Self {
        Self{penalty,positions:positions.into()}
    }
    /// The total penalty of all breaks taken
    #[inline(always)]
    pub fn penalty(&self) -> i64 { self.penalty }
    #[inline(always)]
    pub fn positions(&self) -> &[usize] { &self.positions }
    /// The number of lines
    #[inline(always)]
    pub fn len(&self) -> usize { self.positions.len() }
    #[inline(always)]
    pub fn is_empty(&self) -> bool { self.positions.is_empty() }
}
impl Display for Breaks {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,"{} lines, p={}, @@",self.positions.len(),self.penalty)?;
        for (i,p) in self.positions.iter().enumerate() {
            if i > 0 { f.write_str(",")?; }
            write!(f,"{}",p)?;
        }
        Ok(())
    }
}
