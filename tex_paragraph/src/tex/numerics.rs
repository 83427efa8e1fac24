/*! Numerical values used in paragraph building: [dimensions](Dim32), [glue components](GlueComponent)
  with their [infinity order](GlueOrder), and [glue](GlueValue).

  All arithmetic is exact fixed-point arithmetic on scaled points; floating point never enters.
*/

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::ops::{Add, AddAssign, Neg, Sub};

/// Maximal badness; anything at least this bad is "infinitely bad".
pub const INF_BAD:i32 = 10000;

/// A plain TeX dimension, represented as a 32-bit integer in *scaled points (sp)*, where 65536sp = 1pt.
/// Arithmetic saturates at the bounds of `i32`.
#[derive(Clone,Copy,Eq,PartialEq,Ord,PartialOrd,Debug,Default,Hash)]
pub struct Dim32(pub i32);
impl Dim32 {
    pub const ZERO:Self = Dim32(0);
    /// `\maxdimen`
    pub const MAX:Self = Dim32(0x3FFF_FFFF);
    #[inline(always)]
    pub fn from_sp(sp:i32) -> Self { Self(sp) }
    #[inline(always)]
    pub fn from_pt(pt:i32) -> Self { Self(pt.saturating_mul(65536)) }
    /// `self * times / div`, with a 64-bit intermediate, truncating toward zero and saturating
    /// at the bounds of `i32`. A zero divisor yields zero.
    pub fn scale(&self,times:i32,div:i32) -> Self {
        match (self.0 as i64 * times as i64).checked_div(div as i64) {
            Some(r) => Self(r.clamp(i32::MIN as i64,i32::MAX as i64) as i32),
            None => Self::ZERO
        }
    }
    pub fn abs(self) -> Self { Self(self.0.saturating_abs()) }
    fn display_num(num:i32,unit:&str,f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut val = num as i64;
        if val < 0 {
            write!(f,"-")?;
            val = -val;
        }
        write!(f,"{}.",val/65536)?;
        val = 10*(val%65536) + 5;
        let mut delta = 10;
        if val < delta {
            return write!(f,"0{}",unit)
        }
        while val > delta {
            if delta > 65536 { val = val + 32768 - 50000; }
            write!(f,"{}",val/65536)?;
            val = 10*(val%65536);
            delta = delta*10;
        }
        write!(f,"{}",unit)
    }
    /// Prints with exactly [`GlueComponent::DECIMALS`] decimal digits, rounded to nearest.
    fn display_fixed(num:i32,unit:&str,f: &mut Formatter<'_>) -> std::fmt::Result {
        const SCALE:i64 = 10i64.pow(GlueComponent::DECIMALS as u32);
        let abs = (num as i64).abs();
        let total = (abs * SCALE + 32768) / 65536;
        write!(f,"{}{}.{:0width$}{}",
            if num < 0 {"-"} else {""},
            total / SCALE,total % SCALE,unit,
            width = GlueComponent::DECIMALS
        )
    }
}
impl Add for Dim32 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Dim32(self.0.saturating_add(rhs.0))
    }
}
impl Sub for Dim32 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Dim32(self.0.saturating_sub(rhs.0))
    }
}
impl Neg for Dim32 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Dim32(self.0.saturating_neg())
    }
}
impl std::iter::Sum for Dim32 {
    fn sum<I: Iterator<Item=Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |a, b| a + b)
    }
}
impl Display for Dim32 {
    // B-Book §103
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Self::display_num(self.0,"pt",f)
    }
}

/// The "infinity order" of a stretch or shrink component; a higher order dominates all lower ones.
#[derive(Clone,Copy,Eq,PartialEq,Ord,PartialOrd,Debug,Default,Hash)]
pub enum GlueOrder {
    /// finite, measured in points
    #[default]
    Normal = 0,
    Fil = 1,
    Fill = 2,
    Filll = 3
}
impl GlueOrder {
    #[inline(always)]
    pub fn is_infinite(self) -> bool { self != GlueOrder::Normal }
    pub fn unit(self) -> &'static str {
        match self {
            GlueOrder::Normal => "pt",
            GlueOrder::Fil => "fil",
            GlueOrder::Fill => "fill",
            GlueOrder::Filll => "filll",
        }
    }
}

/// A stretch or shrink amount: a magnitude together with its [`GlueOrder`].
///
/// Components of different orders are never summed: combining them keeps only the one of
/// higher order. A zero magnitude always carries [`GlueOrder::Normal`].
#[derive(Clone,Copy,Eq,PartialEq,Debug,Default,Hash)]
pub struct GlueComponent {
    pub magnitude:Dim32,
    pub order:GlueOrder
}
impl GlueComponent {
    pub const ZERO:Self = GlueComponent{magnitude:Dim32::ZERO,order:GlueOrder::Normal};
    /// Number of decimal digits used when formatting.
    pub const DECIMALS:usize = 5;

    pub fn new(magnitude:Dim32,order:GlueOrder) -> Self {
        if magnitude == Dim32::ZERO { Self::ZERO } else { Self{magnitude,order} }
    }
    #[inline(always)]
    pub fn finite(d:Dim32) -> Self { Self::new(d,GlueOrder::Normal) }
    /// `sp` units of `fil`, where 65536 = 1fil
    #[inline(always)]
    pub fn fil(sp:i32) -> Self { Self::new(Dim32(sp),GlueOrder::Fil) }
    #[inline(always)]
    pub fn fill(sp:i32) -> Self { Self::new(Dim32(sp),GlueOrder::Fill) }
    #[inline(always)]
    pub fn filll(sp:i32) -> Self { Self::new(Dim32(sp),GlueOrder::Filll) }
    #[inline(always)]
    pub fn is_zero(&self) -> bool { self.magnitude == Dim32::ZERO }
    /// `self * num / den`; the order is kept unless the magnitude vanishes.
    pub fn multiply(self,num:i32,den:i32) -> Self {
        Self::new(self.magnitude.scale(num,den),self.order)
    }
}
impl Add for GlueComponent {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        match self.order.cmp(&rhs.order) {
            Ordering::Equal => Self::new(self.magnitude + rhs.magnitude,self.order),
            Ordering::Greater => self,
            Ordering::Less => rhs
        }
    }
}
impl Sub for GlueComponent {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}
impl Neg for GlueComponent {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self{magnitude:-self.magnitude,order:self.order}
    }
}
impl PartialOrd for GlueComponent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for GlueComponent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order.cmp(&other.order).then(self.magnitude.cmp(&other.magnitude))
    }
}
impl Display for GlueComponent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Dim32::display_fixed(self.magnitude.0,self.order.unit(),f)
    }
}

/// A glue specification `length plus stretch minus shrink`, e.g. `3.33333pt plus 1.66666pt minus 1.11111pt`.
#[derive(Clone,Copy,Eq,PartialEq,Debug,Default,Hash)]
pub struct GlueValue {
    pub length:Dim32,
    pub stretch:GlueComponent,
    pub shrink:GlueComponent
}
impl GlueValue {
    pub const ZERO:Self = GlueValue{length:Dim32::ZERO,stretch:GlueComponent::ZERO,shrink:GlueComponent::ZERO};
    pub fn new(length:Dim32,stretch:GlueComponent,shrink:GlueComponent) -> Self {
        Self{length,stretch,shrink}
    }
    /// Glue without stretch or shrink; e.g. the contribution of a character or kern.
    #[inline(always)]
    pub fn rigid(length:Dim32) -> Self {
        Self{length,stretch:GlueComponent::ZERO,shrink:GlueComponent::ZERO}
    }
    /// `0pt plus 1fil`, the default `\parfillskip`
    pub fn fil() -> Self {
        Self{length:Dim32::ZERO,stretch:GlueComponent::fil(65536),shrink:GlueComponent::ZERO}
    }
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
    /// Scales all three components by `num/den`.
    pub fn multiply(self,num:i32,den:i32) -> Self {
        Self{
            length:self.length.scale(num,den),
            stretch:self.stretch.multiply(num,den),
            shrink:self.shrink.multiply(num,den)
        }
    }
}
impl Add for GlueValue {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self{
            length:self.length + rhs.length,
            stretch:self.stretch + rhs.stretch,
            shrink:self.shrink + rhs.shrink
        }
    }
}
impl AddAssign for GlueValue {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs
    }
}
impl Sub for GlueValue {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}
impl Neg for GlueValue {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self{length:-self.length,stretch:-self.stretch,shrink:-self.shrink}
    }
}
impl std::iter::Sum for GlueValue {
    fn sum<I: Iterator<Item=Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |a, b| a + b)
    }
}
impl Display for GlueValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Dim32::display_fixed(self.length.0,"pt",f)?;
        if !self.stretch.is_zero() {
            write!(f," plus {}",self.stretch)?;
        }
        if !self.shrink.is_zero() {
            write!(f," minus {}",self.shrink)?;
        }
        Ok(())
    }
}

/// The badness of a line that has to stretch (or shrink) by `t` given a total finite stretch
/// (or shrink) `s`: roughly `100(t/s)³`, capped at [`INF_BAD`] (B-Book §108).
pub fn badness(t:i32,s:i32) -> i32 {
    if t == 0 { return 0 }
    if s <= 0 { return INF_BAD }
    let t = t as i64;
    let s = s as i64;
    let r = if t <= 7230584 { (t * 297) / s }
    else if s >= 1663497 { t / (s / 297) }
    else { t };
    if r > 1290 { INF_BAD } else { ((r * r * r + 0x20000) / 0x40000) as i32 }
}
