use array_select::{
    stream_array, Encoding, SelectionError, SelectionOptions, SelectionOutput, TypedBuffer, Value,
    DEFAULT_CHUNK_SIZE,
};

fn collect(stream: impl Iterator<Item = Result<SelectionOutput, SelectionError>>) -> Vec<SelectionOutput> {
    stream.map(|chunk| chunk.unwrap()).collect()
}

#[test]
fn later_window_violating_commitment_degrades_without_revising_first() {
    let chunks = collect(stream_array([1, 2, 300, 4], 2, SelectionOptions::default()));

    assert_eq!(
        chunks,
        vec![
            SelectionOutput::Typed(TypedBuffer::UInt8(vec![1, 2])),
            SelectionOutput::Sequence(vec![Value::Int(300), Value::Int(4)]),
        ]
    );
}

#[test]
fn commitment_is_reapplied_after_a_degraded_window() {
    let chunks = collect(stream_array([1, 2, 300, 4, 5, 6], 2, SelectionOptions::default()));
    assert_eq!(chunks.len(), 3);
    assert!(!chunks[1].is_typed());
    assert_eq!(chunks[2], SelectionOutput::Typed(TypedBuffer::UInt8(vec![5, 6])));
}

#[test]
fn final_window_may_be_shorter() {
    let chunks = collect(stream_array(0..7, 3, SelectionOptions::default()));
    let lens: Vec<usize> = chunks.iter().map(SelectionOutput::len).collect();
    assert_eq!(lens, vec![3, 3, 1]);
    assert!(chunks.iter().all(|c| c.encoding() == Some(Encoding::UInt8)));
}

#[test]
fn empty_source_yields_no_chunks() {
    let mut stream = stream_array(Vec::<Value>::new(), 4, SelectionOptions::default());
    assert!(stream.next().is_none());
}

#[test]
fn sequence_first_window_means_sequences_forever() {
    let input = vec![
        Value::from("a"),
        Value::Int(1),
        Value::Int(2),
        Value::Int(3),
    ];
    let mut stream = stream_array(input, 2, SelectionOptions::default());
    let first = stream.next().unwrap().unwrap();
    assert!(!first.is_typed());
    assert_eq!(stream.committed(), None);

    // [2, 3] would fit uint8 on its own; there is no re-evaluation.
    let second = stream.next().unwrap().unwrap();
    assert_eq!(second, SelectionOutput::Sequence(vec![Value::Int(2), Value::Int(3)]));
    assert!(stream.next().is_none());
}

#[test]
fn commitment_is_never_widened() {
    // First window commits to int8; a later window of larger values stays a
    // sequence even though int16 would hold it.
    let input = [-1i64, 1, 1000, 2000];
    let mut stream = stream_array(input, 2, SelectionOptions::default());
    assert_eq!(stream.next().unwrap().unwrap().encoding(), Some(Encoding::Int8));
    assert_eq!(stream.committed(), Some(Encoding::Int8));
    assert!(!stream.next().unwrap().unwrap().is_typed());
    assert_eq!(stream.committed(), Some(Encoding::Int8));
}

#[test]
fn float_commitment_accepts_later_integers() {
    let input = vec![Value::Float(0.5), Value::Int(1), Value::Int(7), Value::Int(9)];
    let chunks = collect(stream_array(input, 2, SelectionOptions::default()));
    assert_eq!(chunks[0].encoding(), Some(Encoding::Float32));
    assert_eq!(chunks[1], SelectionOutput::Typed(TypedBuffer::Float32(vec![7.0, 9.0])));
}

#[test]
fn strict_violation_in_first_window_ends_stream() {
    let input = vec![Value::Int(1), Value::Float(1.5), Value::Int(2)];
    let opts = SelectionOptions::default().with_no_float(true).with_strict(true);
    let mut stream = stream_array(input, 2, opts);

    let err = stream.next().unwrap().unwrap_err();
    assert!(matches!(err, SelectionError::Violation { index: 1, .. }));
    assert!(stream.next().is_none());
}

#[test]
fn later_windows_never_raise_under_strict() {
    let opts = SelectionOptions::default().with_strict(true);
    let chunks = collect(stream_array([1, 2, 300, 4], 2, opts));
    assert_eq!(chunks.len(), 2);
    assert!(!chunks[1].is_typed());
}

#[test]
fn consumer_may_stop_early() {
    let source = (0..).map(|i| i % 100);
    let mut stream = stream_array(source, DEFAULT_CHUNK_SIZE, SelectionOptions::default());
    let first = stream.next().unwrap().unwrap();
    assert_eq!(first.len(), DEFAULT_CHUNK_SIZE);
    assert_eq!(first.encoding(), Some(Encoding::UInt8));
    drop(stream);
}
