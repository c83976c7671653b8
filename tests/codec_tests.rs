use swarm_bridge::common::SignalError;
use swarm_bridge::domains::signal::*;

#[test]
fn test_request_records_round_trip() {
    let records: Vec<[i32; REQUEST_LEN]> = vec![
        SignalRequest::get_state(0).unwrap().to_fields(),
        SignalRequest::get_state(i32::MAX).unwrap().to_fields(),
        SignalRequest::set_state(7, Motion::Right, LedColor::WHITE).unwrap().to_fields(),
        [i32::MIN, -1, 0, 1, 255, 65536],
    ];

    for record in records {
        let bytes = encode_ints(&record);
        assert_eq!(bytes.len(), REQUEST_LEN * INT_WIDTH);
        assert_eq!(decode_ints(&bytes).unwrap(), record.to_vec());
    }
}

#[test]
fn test_sentinel_is_distinct_from_valid_values() {
    let sentinel = encode_ints(&[SENTINEL]);
    for valid in 0..=LED_MAX {
        assert_ne!(encode_ints(&[valid]), sentinel);
    }
    assert_eq!(sentinel, vec![0xFF, 0xFF, 0xFF, 0xFF]);
}

#[test]
fn test_encoding_is_little_endian_fixed_width() {
    assert_eq!(encode_ints(&[1, 258]), vec![1, 0, 0, 0, 2, 1, 0, 0]);
    assert!(encode_ints(&[]).is_empty());
}

#[test]
fn test_decode_rejects_partial_integers() {
    for len in [1usize, 2, 3, 5, 7] {
        let err = decode_ints(&vec![0u8; len]).unwrap_err();
        assert!(matches!(err, SignalError::MalformedPayload { .. }), "len {}", len);
    }
    assert_eq!(decode_ints(&[]).unwrap(), Vec::<i32>::new());
}

#[test]
fn test_split_segments_recovers_joined_segments() {
    let cases: Vec<Vec<Vec<i32>>> = vec![
        vec![vec![5, 120]],
        vec![vec![]],
        vec![vec![5, 120], vec![1, 2]],
        vec![vec![], vec![]],
        vec![vec![5, 120], vec![1, 2], vec![10, 7]],
        vec![vec![2, 80], vec![], vec![]],
        vec![vec![-1, 3], vec![1000, 2000, 3000], vec![]],
    ];

    for segments in cases {
        let encoded: Vec<Vec<u8>> = segments.iter().map(|s| encode_ints(s)).collect();
        let payload = join_segments(&encoded, SEGMENT_DELIMITER);

        let split = split_segments(&payload, SEGMENT_DELIMITER);
        assert_eq!(split.len(), segments.len());
        let decoded: Vec<Vec<i32>> = split.iter().map(|s| decode_ints(s).unwrap()).collect();
        assert_eq!(decoded, segments);
    }
}

#[test]
fn test_split_segments_ignores_delimiter_bytes_inside_integers() {
    // 0x7C00 has a `|` as its second byte.
    let payload = join_segments(&[encode_ints(&[0x7C00, 1]), encode_ints(&[2])], SEGMENT_DELIMITER);
    let split = split_segments(&payload, SEGMENT_DELIMITER);
    assert_eq!(split.len(), 2);
    assert_eq!(decode_ints(split[0]).unwrap(), vec![0x7C00, 1]);
}

#[test]
fn test_reply_framing_handles_values_that_encode_as_delimiter() {
    // 124 encodes as `|` followed by zeros, which the generic splitter misreads.
    let payload = encode_reply(124, 124, &[124, 3], &[124, 9]);

    assert_ne!(split_segments(&payload, SEGMENT_DELIMITER).len(), REPLY_SEGMENTS);

    let [own, ids, distances] = split_reply(&payload).unwrap();
    assert_eq!(decode_ints(own).unwrap(), vec![124, 124]);
    assert_eq!(decode_ints(ids).unwrap(), vec![124, 3]);
    assert_eq!(decode_ints(distances).unwrap(), vec![124, 9]);
}

#[test]
fn test_reply_framing_with_no_neighbors() {
    let payload = encode_reply(2, 80, &[], &[]);
    assert_eq!(payload.len(), 10);

    let [own, ids, distances] = split_reply(&payload).unwrap();
    assert_eq!(decode_ints(own).unwrap(), vec![2, 80]);
    assert!(ids.is_empty());
    assert!(distances.is_empty());
}

#[test]
fn test_reply_framing_rejects_bad_shapes() {
    // Too short for the self-state segment.
    assert!(split_reply(&encode_ints(&[5])).is_err());

    // Unequal neighbor arrays cannot be framed.
    let uneven = join_segments(
        &[encode_ints(&[5, 1]), encode_ints(&[1, 2]), encode_ints(&[10])],
        SEGMENT_DELIMITER,
    );
    assert!(matches!(split_reply(&uneven), Err(SignalError::MalformedPayload { .. })));

    // Right length for one neighbor, delimiters missing.
    let zeros = vec![0u8; 18];
    assert!(matches!(split_reply(&zeros), Err(SignalError::MalformedPayload { .. })));
}

/// Values whose encodings cover both sign extremes, the sentinel and bytes
/// adjacent to the delimiter. 124 itself is left out: it encodes with a
/// leading `|` and is covered by the reply framing tests.
const SWEEP_VALUES: [i32; 7] = [i32::MIN, -1, 0, 3, 123, 125, i32::MAX];

fn sequences(max_len: usize) -> Vec<Vec<i32>> {
    let mut all = vec![Vec::new()];
    let mut current = vec![Vec::new()];
    for _ in 0..max_len {
        current = current
            .iter()
            .flat_map(|prefix: &Vec<i32>| {
                SWEEP_VALUES.iter().map(move |value| {
                    let mut next = prefix.clone();
                    next.push(*value);
                    next
                })
            })
            .collect();
        all.extend(current.iter().cloned());
    }
    all
}

#[test]
fn test_every_short_sequence_round_trips() {
    let all = sequences(REQUEST_LEN);
    assert_eq!(all.len(), (0..=REQUEST_LEN as u32).map(|n| 7usize.pow(n)).sum::<usize>());

    for values in all {
        let bytes = encode_ints(&values);
        assert_eq!(bytes.len(), values.len() * INT_WIDTH);
        assert_eq!(decode_ints(&bytes).unwrap(), values);
    }
}

#[test]
fn test_every_short_segment_layout_splits_back() {
    let pieces = sequences(2);

    let mut level: Vec<Vec<Vec<i32>>> = vec![Vec::new()];
    for count in 1..=REPLY_SEGMENTS {
        level = level
            .iter()
            .flat_map(|layout| {
                pieces.iter().map(move |piece| {
                    let mut next = layout.clone();
                    next.push(piece.clone());
                    next
                })
            })
            .collect();

        for segments in &level {
            let encoded: Vec<Vec<u8>> = segments.iter().map(|s| encode_ints(s)).collect();
            let payload = join_segments(&encoded, SEGMENT_DELIMITER);

            let split = split_segments(&payload, SEGMENT_DELIMITER);
            assert_eq!(split.len(), count);
            let decoded: Vec<Vec<i32>> = split.iter().map(|s| decode_ints(s).unwrap()).collect();
            assert_eq!(&decoded, segments);
        }
    }
}
