/*! Breaking paragraphs into lines.

   The [`LineBreaker`] turns a horizontal list into a sequence of lines: it collects the
   [breakpoints](BreakPoint) of the list, finds the feasible combination of breaks with the least
   total penalty (see [`Evaluation`] for how a single line is judged), and cuts the list accordingly.
   Like TeX, it tries up to three passes (B-Book §863):

   1. without hyphenation, if `\pretolerance > 0`, accepting lines up to badness `\pretolerance`;
   2. after calling the [hyphenation hook](State::hyphenate), up to badness `\tolerance`;
   3. if `\emergencystretch > 0`, with that much extra stretch in every line.

   If all of them fail, the paragraph ends up as one single line; that is never an error.

   The search itself is an exhaustive backtracking over all breakpoints: every feasible line is
   tried, infeasible ones are pruned. Among all complete breakings it picks the one with the
   lowest sum of breakpoint penalties, preferring earlier breaks on ties. The demerits of each
   line (B-Book §859) are traced alongside, as `\tracingparagraphs` would show them.
   Since the best way to finish a paragraph depends only on where the previous line ended and
   on how (line number, fitness, hyphenation), completions are memoized, which keeps the search
   polynomial without changing its result.
 */

pub mod fitness;
pub mod breakpoint;
pub mod breaks;
pub mod shape;

use log::{debug, trace};
use rustc_hash::FxHashMap;
use crate::engine::state::State;
use crate::linebreak::breakpoint::{BreakPoint, EJECT_PENALTY, INF_PENALTY};
use crate::linebreak::breaks::Breaks;
use crate::linebreak::fitness::{Evaluation, Fitness};
use crate::linebreak::shape::ParagraphShape;
use crate::tex::nodes::{HNode, NodeTrait};
use crate::tex::numerics::{Dim32, GlueComponent, GlueValue};
use crate::utils::errors::HyphenationError;

/// The passes of the line breaker
#[derive(Clone,Copy,Eq,PartialEq,Debug)]
pub enum Pass {
    /// no hyphenation, threshold `\pretolerance`
    First,
    /// hyphenated, threshold `\tolerance`
    Second,
    /// hyphenated, threshold `\tolerance`, plus `\emergencystretch` in every line
    Emergency
}

/// The parameters of the line breaker, read from the [`State`] at the start of a paragraph.
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct LineBreakParams {
    pub pretolerance:i32,
    pub tolerance:i32,
    pub hyphenpenalty:i32,
    pub exhyphenpenalty:i32,
    pub linepenalty:i32,
    pub adjdemerits:i32,
    pub doublehyphendemerits:i32,
    pub finalhyphendemerits:i32,
    pub emergencystretch:Dim32,
    pub leftskip:GlueValue,
    pub rightskip:GlueValue,
    pub parfillskip:GlueValue
}
impl LineBreakParams {
    pub fn from_state<S:State>(state:&S) -> Self {
        Self {
            pretolerance:state.get_primitive_int("pretolerance"),
            tolerance:state.get_primitive_int("tolerance"),
            hyphenpenalty:state.get_primitive_int("hyphenpenalty"),
            exhyphenpenalty:state.get_primitive_int("exhyphenpenalty"),
            linepenalty:state.get_primitive_int("linepenalty"),
            adjdemerits:state.get_primitive_int("adjdemerits"),
            doublehyphendemerits:state.get_primitive_int("doublehyphendemerits"),
            finalhyphendemerits:state.get_primitive_int("finalhyphendemerits"),
            emergencystretch:state.get_primitive_dim("emergencystretch"),
            leftskip:state.get_primitive_skip("leftskip"),
            rightskip:state.get_primitive_skip("rightskip"),
            parfillskip:state.get_primitive_skip("parfillskip"),
        }
    }
}

/// Breaks paragraphs into lines; see the [module documentation](self).
#[derive(Clone,Debug)]
pub struct LineBreaker {
    pub params:LineBreakParams
}
impl LineBreaker {
    pub fn new(params:LineBreakParams) -> Self {
        Self{params}
    }

    /// Breaks `nodes` into lines according to the current parameters and paragraph shape of
    /// `state` (`\hsize` wide lines if there is none). The paragraph shape of `state` is reset
    /// afterwards, in any case.
    ///
    /// Returns one list per line, or the unbroken material as a single line if no breaking
    /// meets the tolerances. Fails only if the hyphenation hook does.
    pub fn build<S:State>(state:&mut S,nodes:Vec<HNode>) -> Result<Vec<Vec<HNode>>,HyphenationError> {
        let shape = match state.get_parshape() {
            Some(s) => s.clone(),
            None => ParagraphShape::Fixed {width:state.get_primitive_dim("hsize")}
        };
        state.set_parshape(Some(shape.clone()));
        let breaker = Self::new(LineBreakParams::from_state(state));
        let ret = breaker.break_paragraph(state,&shape,nodes);
        state.set_parshape(None);
        ret
    }

    fn break_paragraph<S:State>(&self,state:&mut S,shape:&ParagraphShape,mut nodes:Vec<HNode>) -> Result<Vec<Vec<HNode>>,HyphenationError> {
        if nodes.is_empty() { return Ok(vec!()) }
        let original = nodes.clone();
        if nodes.last().is_some_and(|n| n.is_glue()) {
            nodes.pop();
        }
        let len = nodes.len();
        if self.params.pretolerance > 0 {
            debug!("@firstpass");
            self.append_trailer(&mut nodes);
            if let Some(breaks) = self.find_breaks(&nodes,shape,Pass::First) {
                return Ok(Self::materialize(nodes,&breaks))
            }
            nodes.truncate(len);
        }
        debug!("@secondpass");
        state.hyphenate(&mut nodes)?;
        self.append_trailer(&mut nodes);
        if let Some(breaks) = self.find_breaks(&nodes,shape,Pass::Second) {
            return Ok(Self::materialize(nodes,&breaks))
        }
        if self.params.emergencystretch > Dim32::ZERO {
            debug!("@emergencypass");
            if let Some(breaks) = self.find_breaks(&nodes,shape,Pass::Emergency) {
                return Ok(Self::materialize(nodes,&breaks))
            }
        }
        debug!("No feasible line breaks; keeping the paragraph as a single line");
        Ok(vec!(original))
    }

    /// `\penalty10000\hskip\parfillskip\penalty-10000`
    fn append_trailer(&self,nodes:&mut Vec<HNode>) {
        nodes.push(HNode::Penalty(INF_PENALTY));
        nodes.push(HNode::HSkip(self.params.parfillskip));
        nodes.push(HNode::Penalty(EJECT_PENALTY));
    }

    /// Finds the best breaks of `nodes` in the given pass, if any. `nodes` should end with a
    /// forced break, i.e. the trailer appended by [`build`](Self::build).
    pub fn find_breaks(&self,nodes:&[HNode],shape:&ParagraphShape,pass:Pass) -> Option<Breaks> {
        let bps = BreakPoint::collect(nodes,self.params.hyphenpenalty,self.params.exhyphenpenalty);
        if bps.is_empty() { return None }
        let (threshold,emergency) = match pass {
            Pass::First => (self.params.pretolerance,Dim32::ZERO),
            Pass::Second => (self.params.tolerance,Dim32::ZERO),
            Pass::Emergency => (self.params.tolerance,self.params.emergencystretch)
        };
        let mut search = Search {
            bps:&bps,shape,params:&self.params,threshold,
            background:self.params.leftskip + self.params.rightskip +
                GlueValue::new(Dim32::ZERO,GlueComponent::finite(emergency),GlueComponent::ZERO),
            memo:FxHashMap::default()
        };
        match search.complete(Trial::START) {
            Some(c) => {
                let breaks = Breaks::new(c.cost,c.positions);
                debug!("@{:?}: {}, demerits {}",pass,breaks,c.demerits);
                Some(breaks)
            }
            None => {
                debug!("@{:?}: no feasible breaks",pass);
                None
            }
        }
    }

    /// Cuts `nodes` at the given breaks. Discardable nodes at a break and directly after it
    /// vanish; a discretionary contributes its pre-break material to the line it ends and its
    /// post-break material to the next one. Every line is trimmed of trailing discardables.
    pub fn materialize(nodes:Vec<HNode>,breaks:&Breaks) -> Vec<Vec<HNode>> {
        let mut lines = Vec::with_capacity(breaks.len());
        let mut iter = nodes.into_iter().enumerate().peekable();
        let mut current:Vec<HNode> = Vec::new();
        for &pos in breaks.positions() {
            while let Some((_,n)) = iter.next_if(|(i,_)| *i < pos) {
                current.push(n);
            }
            let mut next = Vec::new();
            match iter.next() {
                Some((_,HNode::Discretionary(d))) => {
                    current.extend(d.pre.into_vec());
                    next = d.post.into_vec();
                }
                Some((_,n@HNode::Math{..})) => current.push(n),
                _ => ()
            }
            while current.last().is_some_and(|n| n.discardable()) {
                current.pop();
            }
            lines.push(std::mem::replace(&mut current,next));
            while iter.next_if(|(_,n)| n.discardable() && !matches!(n,HNode::Penalty(p) if *p < INF_PENALTY)).is_some() {}
        }
        lines
    }
}

/// Where and how the previous line ended.
#[derive(Clone,Copy,Eq,PartialEq,Hash,Debug)]
struct Trial {
    /// index of the previous breakpoint; `None` at the start of the paragraph
    from:Option<usize>,
    /// the number of the line to be set next, or [`ParagraphShape::distinct_lines`] if that is smaller
    line:usize,
    fitness:Fitness,
    hyphenated:bool
}
impl Trial {
    const START:Self = Trial{from:None,line:0,fitness:Fitness::Decent,hyphenated:false};
}

#[derive(Clone,Debug)]
struct Completion {
    /// sum of the penalties of the breaks taken
    cost:i64,
    demerits:i64,
    positions:Vec<usize>
}

struct Search<'a> {
    bps:&'a [BreakPoint],
    shape:&'a ParagraphShape,
    params:&'a LineBreakParams,
    threshold:i32,
    /// material present in every line: `\leftskip`, `\rightskip` and the emergency stretch
    background:GlueValue,
    memo:FxHashMap<Trial,Option<Completion>>
}
impl Search<'_> {
    /// The cheapest way to set the rest of the paragraph after `trial`; the first one found
    /// among equally cheap ones.
    fn complete(&mut self,trial:Trial) -> Option<Completion> {
        if let Some(c) = self.memo.get(&trial) {
            return c.clone()
        }
        let ret = self.explore(trial);
        self.memo.insert(trial,ret.clone());
        ret
    }

    fn explore(&mut self,trial:Trial) -> Option<Completion> {
        let bps = self.bps;
        let start = trial.from.map_or(0,|a| a + 1);
        let (target,_) = self.shape.line(trial.line);
        let mut natural = self.background + trial.from.map_or(GlueValue::ZERO,|a| bps[a].post_break);
        let mut best:Option<Completion> = None;
        for (i,bp) in bps.iter().enumerate().skip(start) {
            if i > start {
                // the previous candidate was passed over, so its material stays on the line
                natural += bps[i - 1].point_width;
            }
            natural += bp.width;
            let last = i + 1 == bps.len();
            match Evaluation::of_line(&(natural + bp.pre_break),target,self.threshold) {
                Evaluation::Feasible {badness,fitness} => {
                    let d = self.demerits(&trial,bp,badness,fitness,last);
                    trace!("@ via @@{} b={} p={} d={} ({})",bp.position,badness,bp.penalty,d,fitness);
                    let penalty = bp.penalty as i64;
                    let candidate = if last {
                        Some(Completion{cost:penalty,demerits:d,positions:vec!(bp.position)})
                    } else {
                        let next = Trial {
                            from:Some(i),
                            line:(trial.line + 1).min(self.shape.distinct_lines()),
                            fitness,
                            hyphenated:bp.hyphenated
                        };
                        self.complete(next).map(|rest| {
                            let mut positions = Vec::with_capacity(rest.positions.len() + 1);
                            positions.push(bp.position);
                            positions.extend(rest.positions);
                            Completion{cost:penalty + rest.cost,demerits:d + rest.demerits,positions}
                        })
                    };
                    if let Some(c) = candidate {
                        if best.as_ref().map_or(true,|b| c.cost < b.cost) {
                            best = Some(c);
                        }
                    }
                }
                // a longer line may fit again: negative material, or infinite stretch further on
                Evaluation::Infeasible(why) => trace!("@ via @@{} infeasible: {:?}",bp.position,why)
            }
            if bp.is_forced() { break }
        }
        best
    }

    /// B-Book §859
    fn demerits(&self,trial:&Trial,bp:&BreakPoint,badness:i32,fitness:Fitness,last:bool) -> i64 {
        let mut d = self.params.linepenalty as i64 + badness as i64;
        d = if d.abs() >= 10000 { 100_000_000 } else { d * d };
        let p = bp.penalty as i64;
        if p > 0 {
            d += p * p;
        } else if p > EJECT_PENALTY as i64 {
            d -= p * p;
        }
        if trial.hyphenated && (bp.hyphenated || last) {
            let extra = if last { self.params.finalhyphendemerits } else { self.params.doublehyphendemerits };
            d += extra as i64;
        }
        if !fitness.adjacent(trial.fitness) {
            d += self.params.adjdemerits as i64;
        }
        d
    }
}
