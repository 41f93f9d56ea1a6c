use super::*;
use crate::scene::model::{Group, Mask};
use crate::scene::timeline::{ValueType, DEFAULT_DURATION};

#[derive(Clone)]
struct Shape {
    d: &'static str,
    color: Option<&'static str>,
    alpha: Option<f64>,
}

fn s(d: &'static str) -> Shape {
    Shape {
        d,
        color: None,
        alpha: None,
    }
}

fn paths(role: &str, shapes: &[Shape], fill: bool) -> Group {
    let children = shapes
        .iter()
        .enumerate()
        .map(|(i, sh)| {
            let mut p = Path::new(format!("{role}-id-{i}"), format!("{role}-{i}"), sh.d).unwrap();
            if fill {
                p.fill_color = sh.color.map(str::to_owned);
                p.fill_alpha = sh.alpha;
            } else {
                p.stroke_color = sh.color.map(str::to_owned);
                p.stroke_alpha = sh.alpha;
            }
            Node::Path(p)
        })
        .collect();
    Group::new(format!("{role}-group"), role, children)
}

fn frame(fills: &[Shape], strokes: &[Shape]) -> Frame {
    Frame {
        fills: paths("fills", fills, true),
        strokes: paths("strokes", strokes, false),
    }
}

fn opts(frame_interval: i64, time_interval: i64) -> ConvertOpts {
    ConvertOpts::default()
        .with_frame_interval(frame_interval)
        .with_time_interval(time_interval)
}

#[test]
fn single_geometry_change_yields_one_path_block() {
    let a = frame(&[s("M0,0"), s("M5,5"), s("M0,0L1,1")], &[]);
    let b = frame(&[s("M0,0"), s("M5,5"), s("M0,0L2,2")], &[]);

    let out = synthesize(vec![a, b], 0, &opts(1, 50)).unwrap();
    let blocks = out.timeline.blocks();
    assert_eq!(blocks.len(), 1);
    let blk = &blocks[0];
    assert_eq!(blk.layer_id, out.frame_zero.fills.children[2].id());
    assert_eq!(blk.property_name, TimelineProperty::PathData);
    assert_eq!(blk.value_type, ValueType::Path);
    assert_eq!((blk.start_time, blk.end_time), (0, 50));
    assert_eq!(blk.from_value, Some(BlockValue::Text("M0,0L1,1".to_owned())));
    assert_eq!(blk.to_value, Some(BlockValue::Text("M0,0L2,2".to_owned())));
    assert_eq!(out.timeline.duration(), 50);
    assert!(out.skipped.is_empty());
}

#[test]
fn identical_frames_yield_no_blocks() {
    let f = frame(&[s("M0,0"), s("M1,1")], &[s("M2,2")]);
    let out = synthesize(vec![f.clone(), f.clone(), f], 0, &opts(1, 50)).unwrap();
    assert!(out.timeline.is_empty());
    assert_eq!(out.timeline.duration(), DEFAULT_DURATION);
}

#[test]
fn single_frame_yields_empty_timeline() {
    let out = synthesize(vec![frame(&[s("M0,0")], &[])], 0, &ConvertOpts::default()).unwrap();
    assert!(out.timeline.is_empty());
}

#[test]
fn no_frames_is_an_error() {
    assert!(synthesize(vec![], 0, &ConvertOpts::default()).is_err());
}

#[test]
fn blocks_target_frame_zero_ids_across_pairs() {
    let frames = vec![
        frame(&[s("A")], &[]),
        frame(&[s("B")], &[]),
        frame(&[s("C")], &[]),
    ];
    let out = synthesize(frames, 0, &opts(1, 10)).unwrap();
    let blocks = out.timeline.blocks();
    assert_eq!(blocks.len(), 2);
    let anchor = out.frame_zero.fills.children[0].id();
    assert!(blocks.iter().all(|b| b.layer_id == anchor));
    assert_eq!((blocks[1].start_time, blocks[1].end_time), (10, 20));
    assert_eq!(blocks[1].from_value, Some(BlockValue::Text("B".to_owned())));
}

#[test]
fn stride_skips_intermediate_frames_but_time_still_advances() {
    // 11 frames, stride 5: pairs (0,5) and (5,10); frames in between are never inspected.
    let mut frames = Vec::new();
    for i in 0..11 {
        // frame 3 differs but is never sampled
        let d = match i {
            3 => "SKIPPED",
            10 => "Z",
            _ => "A",
        };
        frames.push(frame(&[s(d)], &[]));
    }
    let out = synthesize(frames, 0, &opts(5, 50)).unwrap();
    let blocks = out.timeline.blocks();
    assert_eq!(blocks.len(), 1);
    // First pair emitted nothing but still consumed a slot.
    assert_eq!((blocks[0].start_time, blocks[0].end_time), (50, 100));
    assert_eq!(blocks[0].to_value, Some(BlockValue::Text("Z".to_owned())));
}

#[test]
fn trailing_frames_without_partner_are_ignored() {
    // 7 frames, stride 5: only (0,5) is compared; frame 6 is a different shape but unsampled.
    let mut frames: Vec<Frame> = (0..6).map(|_| frame(&[s("A")], &[])).collect();
    frames.push(frame(&[s("B")], &[]));
    let out = synthesize(frames, 0, &opts(5, 50)).unwrap();
    assert!(out.timeline.is_empty());
}

#[test]
fn start_times_are_spaced_by_time_interval() {
    let frames: Vec<Frame> = ["A", "B", "C", "D", "E"]
        .iter()
        .map(|d| frame(&[s(d)], &[s(d)]))
        .collect();
    let out = synthesize(frames, 120, &opts(1, 30)).unwrap();
    let blocks = out.timeline.blocks();
    assert_eq!(blocks.len(), 8);
    for b in blocks {
        assert_eq!(b.end_time, b.start_time + 30);
    }
    let starts: Vec<u64> = blocks.iter().map(|b| b.start_time).collect();
    assert!(starts.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(starts.first(), Some(&120));
    assert_eq!(starts.last(), Some(&210));
    assert_eq!(out.timeline.duration(), 240);
}

#[test]
fn time_past_u64_range_is_an_error() {
    let frames: Vec<Frame> = ["A", "B", "C", "D"]
        .iter()
        .map(|d| frame(&[s(d)], &[]))
        .collect();
    // Pairs start at 0, MAX and 2*MAX; the third cannot end.
    let err = synthesize(frames, 0, &opts(1, i64::MAX)).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::TimeOverflow { step, .. } if step == i64::MAX as u64
    ));
}

#[test]
fn color_and_alpha_changes_use_role_properties() {
    let a = frame(
        &[Shape {
            d: "M0",
            color: Some("#000000"),
            alpha: Some(1.0),
        }],
        &[Shape {
            d: "M1",
            color: Some("#111111"),
            alpha: Some(0.2),
        }],
    );
    let b = frame(
        &[Shape {
            d: "M0",
            color: Some("#FFFFFF"),
            alpha: Some(0.5),
        }],
        &[Shape {
            d: "M1",
            color: Some("#222222"),
            alpha: Some(0.2),
        }],
    );
    let out = synthesize(vec![a, b], 0, &opts(1, 50)).unwrap();
    let props: Vec<TimelineProperty> = out
        .timeline
        .blocks()
        .iter()
        .map(|b| b.property_name)
        .collect();
    assert_eq!(
        props,
        [
            TimelineProperty::FillColor,
            TimelineProperty::FillAlpha,
            TimelineProperty::StrokeColor
        ]
    );
    let alpha = &out.timeline.blocks()[1];
    assert_eq!(alpha.value_type, ValueType::Number);
    assert_eq!(alpha.from_value, Some(BlockValue::Number(1.0)));
    assert_eq!(alpha.to_value, Some(BlockValue::Number(0.5)));
    let stroke = &out.timeline.blocks()[2];
    assert_eq!(stroke.layer_id, out.frame_zero.strokes.children[0].id());
    assert_eq!(stroke.value_type, ValueType::Color);
}

#[test]
fn null_to_null_never_emits_but_value_to_null_does() {
    let none = frame(&[s("M0")], &[]);
    let out = synthesize(vec![none.clone(), none.clone()], 0, &opts(1, 50)).unwrap();
    assert!(out.timeline.is_empty());

    let colored = frame(
        &[Shape {
            d: "M0",
            color: Some("#ABCDEF"),
            alpha: None,
        }],
        &[],
    );
    let out = synthesize(vec![colored, none], 0, &opts(1, 50)).unwrap();
    let blocks = out.timeline.blocks();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].property_name, TimelineProperty::FillColor);
    assert_eq!(blocks[0].from_value, Some(BlockValue::Text("#ABCDEF".to_owned())));
    assert_eq!(blocks[0].to_value, None);
}

#[test]
fn shape_count_mismatch_is_fatal() {
    let a = frame(&[s("M0"), s("M1")], &[]);
    let b = frame(&[s("M0")], &[]);
    let err = synthesize(vec![a, b], 0, &opts(1, 50)).unwrap_err();
    match err {
        ConvertError::FrameMismatch {
            frame,
            role,
            expected,
            found,
        } => {
            assert_eq!((frame, role, expected, found), (1, "fills", 2, 1));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unexpected_variant_is_skipped_and_reported() {
    let a = frame(&[s("A"), s("X")], &[]);
    let mut b = frame(&[s("B"), s("Y")], &[]);
    b.fills.children[0] = Node::Mask(Mask::new("m", "mask", "M0").unwrap());

    let out = synthesize(vec![a, b], 0, &opts(1, 50)).unwrap();
    assert_eq!(out.skipped.len(), 1);
    let skip = &out.skipped[0];
    assert_eq!((skip.role, skip.index, skip.start_time), (Role::Fills, 0, 0));
    assert_eq!(
        skip.failure,
        IndexLookupFailure::NotAPath {
            frame: 1,
            kind: NodeKind::Mask
        }
    );
    // The next index is still diffed.
    assert_eq!(out.timeline.blocks().len(), 1);
    assert_eq!(
        out.timeline.blocks()[0].to_value,
        Some(BlockValue::Text("Y".to_owned()))
    );
}

#[test]
fn base_time_keeps_lead_in_from_frame_numbering() {
    assert_eq!(base_time(None), 0);
    assert_eq!(base_time(Some(1)), 0);
    assert_eq!(base_time(Some(9)), 0);
    assert_eq!(base_time(Some(10)), 100);
    assert_eq!(base_time(Some(25)), 250);
}
