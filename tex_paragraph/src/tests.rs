#[doc(hidden)]
#[cfg(any(test,doctest))]
#[allow(dead_code)]
pub mod test_utils {
    use crate::prelude::*;

    #[macro_export]
    macro_rules! measure {
        ($key:ident:$x:expr) => {{
            let measure_start = std::time::Instant::now();
            let ret = $x;
            log::warn!(target:stringify!($key),"Finished after {:?}",measure_start.elapsed());
            ret
        }};
    }

    #[allow(unused_must_use)]
    pub fn trace() {
        env_logger::builder().filter_level(log::LevelFilter::Trace).try_init();
    }
    #[allow(unused_must_use)]
    pub fn debug() {
        env_logger::builder().filter_level(log::LevelFilter::Debug).try_init();
    }
    #[allow(unused_must_use)]
    pub fn info() {
        env_logger::builder().filter_level(log::LevelFilter::Info).try_init();
    }
    #[allow(unused_must_use)]
    pub fn warn() {
        env_logger::builder().filter_level(log::LevelFilter::Warn).try_init();
    }
    #[allow(unused_must_use)]
    pub fn error() {
        env_logger::builder().filter_level(log::LevelFilter::Error).try_init();
    }

    pub fn pt(i:i32) -> Dim32 { Dim32::from_pt(i) }

    /// A 5pt wide character
    pub fn ch(c:char) -> HNode {
        HNode::Char{char:c,width:pt(5),height:pt(7),depth:Dim32::ZERO}
    }
    /// `5pt plus 5pt minus 2pt`
    pub fn space() -> HNode {
        HNode::HSkip(GlueValue::new(pt(5),GlueComponent::finite(pt(5)),GlueComponent::finite(pt(2))))
    }
    /// `5pt minus 2pt`
    pub fn rigid_space() -> HNode {
        HNode::HSkip(GlueValue::new(pt(5),GlueComponent::ZERO,GlueComponent::finite(pt(2))))
    }
    /// One [`ch`] per character, one `sp` per blank
    pub fn words_with(s:&str,sp:fn() -> HNode) -> Vec<HNode> {
        s.chars().map(|c| if c == ' ' { sp() } else { ch(c) }).collect()
    }
    pub fn words(s:&str) -> Vec<HNode> { words_with(s,space) }

    /// Plain TeX's parameters with `\hsize=50pt`
    pub fn state() -> DefaultState {
        let mut state = DefaultState::new();
        state.set_primitive_dim("hsize",pt(50));
        state
    }
    /// `0pt plus 50pt`: a `\parfillskip` without infinite stretch
    pub fn ragged_fill() -> GlueValue {
        GlueValue::new(Dim32::ZERO,GlueComponent::finite(pt(50)),GlueComponent::ZERO)
    }
    /// [`state`] with `\parfillskip=`[`ragged_fill`], so that the last line has to fit, too
    pub fn ragged_state() -> DefaultState {
        let mut state = state();
        state.set_primitive_skip("parfillskip",ragged_fill());
        state
    }
}


#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;
    use crate::tests::test_utils::*;
    use crate::prelude::*;
    use crate::measure;
    use crate::linebreak::{LineBreakParams, Pass};
    use crate::linebreak::breakpoint::{BreakPoint, EJECT_PENALTY, INF_PENALTY};
    use crate::engine::stomach::{GlueSet, ParLine};

    const FOUR_WORDS:&str = "aaaa bbbb cccc dddd";

    fn with_parfill(mut nodes:Vec<HNode>,parfillskip:GlueValue) -> Vec<HNode> {
        nodes.push(HNode::Penalty(INF_PENALTY));
        nodes.push(HNode::HSkip(parfillskip));
        nodes.push(HNode::Penalty(EJECT_PENALTY));
        nodes
    }
    fn with_trailer(nodes:Vec<HNode>) -> Vec<HNode> {
        with_parfill(nodes,GlueValue::fil())
    }
    fn breaker(state:&DefaultState) -> LineBreaker {
        LineBreaker::new(LineBreakParams::from_state(state))
    }
    fn counting_hook(state:&mut DefaultState) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        state.set_hyphenator(move |_:&mut Vec<HNode>| -> Result<(),HyphenationError> {
            c.set(c.get() + 1);
            Ok(())
        });
        count
    }

    #[test]
    fn empty_paragraph() {
        debug();
        let mut state = state();
        let count = counting_hook(&mut state);
        assert_eq!(LineBreaker::build(&mut state,vec!()), Ok(vec!()));
        assert_eq!(count.get(), 0);
        assert_eq!(state.get_parshape(), None);
    }

    #[test]
    fn single_line() {
        debug();
        let state = state();
        let nodes = with_trailer(words("aaaa bbbb"));
        let breaks = breaker(&state).find_breaks(&nodes,&ParagraphShape::Fixed {width:pt(50)},Pass::First);
        assert_eq!(breaks, Some(Breaks::new(EJECT_PENALTY as i64,vec!(11))));
        let mut state = state;
        assert_eq!(LineBreaker::build(&mut state,words("aaaa bbbb")), Ok(vec!(words("aaaa bbbb"))));
    }

    #[test]
    fn two_lines() { measure!(two_lines: {
        debug();
        let state = state();
        let nodes = with_trailer(words(FOUR_WORDS));
        // 45pt of 50pt with 5pt stretch: badness 100; then the parfillskip line. Setting all of it
        // in one line costs the same penalty, but the earlier break is found first.
        let breaks = breaker(&state).find_breaks(&nodes,&ParagraphShape::Fixed {width:pt(50)},Pass::First);
        assert_eq!(breaks, Some(Breaks::new(-10000,vec!(9,21))));
        assert_eq!(breaks.map(|b| b.to_string()).unwrap_or_default(), "2 lines, p=-10000, @@9,21");
        let mut state = state;
        let lines = LineBreaker::build(&mut state,words(FOUR_WORDS)).unwrap();
        assert_eq!(lines, vec!(words("aaaa bbbb"),words("cccc dddd")));
        assert_eq!(state.get_parshape(), None);
    });}

    #[test]
    fn deterministic() {
        let mut state = state();
        let a = LineBreaker::build(&mut state,words(FOUR_WORDS));
        let b = LineBreaker::build(&mut state,words(FOUR_WORDS));
        assert_eq!(a, b);
        let nodes = with_trailer(words(FOUR_WORDS));
        let shape = ParagraphShape::Fixed {width:pt(50)};
        let lb = breaker(&state);
        assert_eq!(lb.find_breaks(&nodes,&shape,Pass::Second), lb.find_breaks(&nodes,&shape,Pass::Second));
    }

    #[test]
    fn widths_are_conserved() {
        let mut nodes = words("aa bb");
        nodes.push(HNode::HKern(pt(1)));
        nodes.push(space());
        nodes.push(HNode::Penalty(-50));
        nodes.push(ch('c'));
        nodes.push(HNode::Discretionary(Discretionary::new(vec!(ch('-')),vec!(),vec!(ch('x')))));
        nodes.push(ch('d'));
        let nodes = with_trailer(nodes);
        let bps = BreakPoint::collect(&nodes,50,50);
        let total:GlueValue = nodes.iter().map(|n| n.natural()).sum();
        let collected:GlueValue = bps.iter().map(|b| b.width + b.point_width).sum();
        assert_eq!(collected, total);
        assert!(bps.windows(2).all(|w| w[0].position < w[1].position));
        assert_eq!(bps.last().map(|b| b.position), Some(nodes.len() - 1));
    }

    #[test]
    fn lines_reconstruct_the_paragraph() {
        let mut state = state();
        let original = words(FOUR_WORDS);
        let lines = LineBreaker::build(&mut state,original.clone()).unwrap();
        assert_eq!(lines.len(), 2);
        // only the space at the break is gone
        let mut expected = original;
        expected.remove(9);
        assert_eq!(lines.concat(), expected);
    }

    #[test]
    fn first_pass_skips_hyphenation() {
        let mut state = state();
        let count = counting_hook(&mut state);
        let lines = LineBreaker::build(&mut state,words(FOUR_WORDS)).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(count.get(), 0);

        state.set_primitive_int("pretolerance",0);
        let second = LineBreaker::build(&mut state,words(FOUR_WORDS)).unwrap();
        assert_eq!(second, lines);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn infinite_stretch_fits_overfull_lines() {
        let mut state = state();
        let count = counting_hook(&mut state);
        // 55pt in a 50pt line, but the parfillskip has infinite stretch
        let lines = LineBreaker::build(&mut state,words("aaaa bbbbbb")).unwrap();
        assert_eq!(lines, vec!(words("aaaa bbbbbb")));
        assert_eq!(count.get(), 0);
        let nodes = with_trailer(words("aaaa bbbbbb"));
        let breaks = breaker(&state).find_breaks(&nodes,&ParagraphShape::Fixed {width:pt(50)},Pass::First);
        assert_eq!(breaks, Some(Breaks::new(-10000,vec!(13))));
    }

    #[test]
    fn longer_lines_may_fit_again() {
        let state = ragged_state();
        let mut nodes = words("aaaaaa bbbbbb");
        nodes.push(HNode::HKern(pt(-50)));
        nodes.push(ch('c'));
        nodes.push(ch('c'));
        let nodes = with_parfill(nodes,ragged_fill());
        // "aaaaaa" alone is overfull in 25pt; with the negative kern, the whole paragraph fits exactly
        let breaks = breaker(&state).find_breaks(&nodes,&ParagraphShape::Fixed {width:pt(25)},Pass::First);
        assert_eq!(breaks, Some(Breaks::new(-10000,vec!(18))));
    }

    #[test]
    fn long_runs_do_not_overflow() {
        let mut state = state();
        let nodes:Vec<HNode> = (0..7000).map(|_| ch('a')).collect();
        let lines = LineBreaker::build(&mut state,nodes.clone()).unwrap();
        assert_eq!(lines, vec!(nodes.clone()));
        let lines = close_paragraph(&mut state,nodes).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].natural.length, Dim32(i32::MAX));
    }

    #[test]
    fn hyphenation() {
        debug();
        let mut state = ragged_state();
        // "bbbbbb" does not fit; the hook offers bbb\-bbb
        state.set_hyphenator(|ls:&mut Vec<HNode>| -> Result<(),HyphenationError> {
            ls.insert(8,HNode::Discretionary(Discretionary::hyphen(ch('-'))));
            Ok(())
        });
        let lines = LineBreaker::build(&mut state,words("aaaa bbbbbb")).unwrap();
        assert_eq!(lines, vec!(words("aaaa bbb-"),words("bbb")));

        let mut nodes = words("aaaa bbbbbb");
        nodes.insert(8,HNode::Discretionary(Discretionary::hyphen(ch('-'))));
        let nodes = with_parfill(nodes,ragged_fill());
        let breaks = breaker(&state).find_breaks(&nodes,&ParagraphShape::Fixed {width:pt(50)},Pass::Second);
        // \hyphenpenalty, then the final forced break
        assert_eq!(breaks, Some(Breaks::new(50 - 10000,vec!(8,14))));
    }

    #[test]
    fn hyphenation_failure() {
        let mut state = ragged_state();
        state.set_hyphenator(|_:&mut Vec<HNode>| -> Result<(),HyphenationError> { Err(HyphenationError::NoPatterns {language:0}) });
        state.set_parshape(Some(ParagraphShape::Explicit(vec!((Dim32::ZERO,pt(50))))));
        let ret = LineBreaker::build(&mut state,words("aaaa bbbbbb"));
        assert_eq!(ret, Err(HyphenationError::NoPatterns {language:0}));
        assert_eq!(state.get_parshape(), None);
    }

    #[test]
    fn no_feasible_breaks() {
        let mut state = ragged_state();
        let count = counting_hook(&mut state);
        state.set_primitive_dim("hsize",pt(10));
        let mut original = words("aaaa bbbb");
        original.push(space());
        let lines = LineBreaker::build(&mut state,original.clone()).unwrap();
        assert_eq!(lines, vec!(original));
        assert_eq!(count.get(), 1);
        assert_eq!(state.get_parshape(), None);
    }

    #[test]
    fn emergency_stretch() {
        debug();
        let mut state = ragged_state();
        let nodes = words_with(FOUR_WORDS,rigid_space);
        let lines = LineBreaker::build(&mut state,nodes.clone()).unwrap();
        assert_eq!(lines, vec!(nodes.clone()));

        state.set_primitive_dim("emergencystretch",pt(20));
        let lines = LineBreaker::build(&mut state,nodes.clone()).unwrap();
        assert_eq!(lines, vec!(words_with("aaaa bbbb",rigid_space),words_with("cccc dddd",rigid_space)));
        let breaks = breaker(&state).find_breaks(&with_parfill(nodes,ragged_fill()),&ParagraphShape::Fixed {width:pt(50)},Pass::Emergency);
        // badness 2, then 0
        assert_eq!(breaks, Some(Breaks::new(-10000,vec!(9,21))));
    }

    #[test]
    fn hanging_indentation() {
        debug();
        let mut state = state();
        state.set_primitive_dim("hangindent",pt(10));
        let lines = close_paragraph(&mut state,words("aaaa bbbb ccc dd")).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!((lines[0].spec.target,lines[0].spec.indent), (pt(50),Dim32::ZERO));
        assert_eq!((lines[1].spec.target,lines[1].spec.indent), (pt(40),pt(10)));
        assert!(lines.iter().all(|l| l.width() == l.spec.target));
        assert_eq!(state.get_primitive_dim("hangindent"), Dim32::ZERO);
        assert_eq!(state.get_primitive_int("hangafter"), 1);
        assert_eq!(state.get_parshape(), None);
    }

    #[test]
    fn explicit_shape() {
        let mut state = state();
        state.set_parshape(Some(ParagraphShape::Explicit(vec!((Dim32::ZERO,pt(50)),(pt(10),pt(40))))));
        state.set_primitive_dim("hangindent",pt(20));
        let lines = close_paragraph(&mut state,words("aaaa bbbb ccc dd")).unwrap();
        assert_eq!(lines.iter().map(|l| (l.spec.target,l.spec.indent)).collect::<Vec<_>>(),
            vec!((pt(50),Dim32::ZERO),(pt(40),pt(10))));
        assert_eq!(state.get_primitive_dim("hangindent"), Dim32::ZERO);
        assert_eq!(state.get_parshape(), None);
    }

    #[test]
    fn paragraph_lines() {
        let mut state = state();
        state.set_primitive_skip("leftskip",GlueValue::rigid(pt(2)));
        state.set_primitive_dim("hsize",pt(52));
        let lines:Vec<ParLine> = close_paragraph(&mut state,words(FOUR_WORDS)).unwrap();
        assert_eq!(lines.len(), 2);
        let first = &lines[0];
        assert_eq!(first.children.first(), Some(&HNode::HSkip(GlueValue::rigid(pt(2)))));
        assert_eq!(first.children.last(), Some(&HNode::HSkip(GlueValue::ZERO)));
        assert_eq!(first.natural.length, pt(47));
        assert_eq!(first.glue_set, GlueSet::Stretch {num:5 * 65536,den:5 * 65536,order:GlueOrder::Normal});
        assert_eq!(first.width(), pt(52));
        let last = &lines[1];
        assert_eq!(last.children[last.children.len() - 2], HNode::HSkip(GlueValue::fil()));
        assert_eq!(last.glue_set, GlueSet::Stretch {num:5 * 65536,den:65536,order:GlueOrder::Fil});
        assert_eq!(last.width(), pt(52));
    }

    #[test]
    fn close_empty_paragraph() {
        let mut state = state();
        state.set_primitive_int("hangafter",-3);
        state.set_primitive_dim("hangindent",pt(10));
        assert_eq!(close_paragraph(&mut state,vec!()), Ok(vec!()));
        assert_eq!(state.get_primitive_int("hangafter"), 1);
        assert_eq!(state.get_primitive_dim("hangindent"), Dim32::ZERO);
        assert_eq!(state.get_parshape(), None);
    }
}
