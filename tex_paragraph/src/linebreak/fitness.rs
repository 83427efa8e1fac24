/*! [`Fitness`] classes and the [`Evaluation`] of a tentative line. */

use std::fmt::{Display, Formatter};
use crate::tex::numerics::{badness, Dim32, GlueValue};

/// How tightly a line is set. Adjacent lines whose classes are not [adjacent](Fitness::adjacent)
/// are visually jarring and cost `\adjdemerits`.
#[derive(Clone,Copy,Eq,PartialEq,Ord,PartialOrd,Debug,Hash)]
pub enum Fitness {
    VeryLoose = 0,
    Loose = 1,
    Decent = 2,
    Tight = 3
}
impl Fitness {
    pub fn adjacent(self,other:Self) -> bool {
        (self as i8 - other as i8).abs() <= 1
    }
    /// Class of a line that is stretched with the given badness
    pub fn stretched(badness:i32) -> Self {
        if badness < 12 { Fitness::Decent }
        else if badness < 99 { Fitness::Loose }
        else { Fitness::VeryLoose }
    }
    /// Class of a line that is shrunk with the given badness
    pub fn shrunk(badness:i32) -> Self {
        if badness <= 12 { Fitness::Decent } else { Fitness::Tight }
    }
}
impl Display for Fitness {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Fitness::VeryLoose => "very loose",
            Fitness::Loose => "loose",
            Fitness::Decent => "decent",
            Fitness::Tight => "tight"
        })
    }
}

/// Why a tentative line cannot be used.
#[derive(Clone,Copy,Eq,PartialEq,Debug)]
pub enum Infeasible {
    /// The shortfall does not fit into a dimension
    Overflow,
    /// The line is far too short for what little stretch it has; counts as [`Fitness::VeryLoose`]
    TooLoose,
    /// The line does not fit even when shrunk as much as possible
    Overfull,
    /// The badness is above the threshold of the current pass
    Threshold { badness:i32 }
}
impl Infeasible {
    pub fn fitness(self) -> Option<Fitness> {
        match self {
            Infeasible::TooLoose => Some(Fitness::VeryLoose),
            _ => None
        }
    }
}

/// Result of measuring a tentative line against its target width.
#[derive(Clone,Copy,Eq,PartialEq,Debug)]
pub enum Evaluation {
    Feasible { badness:i32, fitness:Fitness },
    Infeasible(Infeasible)
}
impl Evaluation {
    /// Evaluates a line of the given natural size against `target`; lines worse than `threshold`
    /// are [infeasible](Infeasible::Threshold).
    pub fn of_line(natural:&GlueValue,target:Dim32,threshold:i32) -> Self {
        let shortfall = target.0 as i64 - natural.length.0 as i64;
        let (badness,fitness) = if natural.stretch.order.is_infinite() {
            // infinite stretch absorbs any shortfall, of either sign
            (0,Fitness::Decent)
        } else if shortfall >= 0 {
            let Ok(shortfall) = i32::try_from(shortfall) else {
                return Evaluation::Infeasible(Infeasible::Overflow)
            };
            let stretch = natural.stretch.magnitude.0;
            if shortfall > 7230584 && stretch < 1663497 {
                return Evaluation::Infeasible(Infeasible::TooLoose)
            }
            let b = badness(shortfall,stretch);
            (b,Fitness::stretched(b))
        } else if natural.shrink.order.is_infinite() {
            (0,Fitness::Decent)
        } else {
            let excess = -shortfall;
            let shrink = natural.shrink.magnitude.0;
            if excess > shrink as i64 {
                return Evaluation::Infeasible(Infeasible::Overfull)
            }
            let b = badness(excess as i32,shrink);
            (b,Fitness::shrunk(b))
        };
        if badness > threshold {
            Evaluation::Infeasible(Infeasible::Threshold {badness})
        } else {
            Evaluation::Feasible {badness,fitness}
        }
    }
    pub fn is_feasible(&self) -> bool {
        matches!(self,Evaluation::Feasible{..})
    }
}
