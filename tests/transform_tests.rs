//! End-to-end tests for the regression transform.
//!
//! ## Test Organization
//!
//! 1. **Reference Scenarios** - Exact outputs for small known datasets
//! 2. **Output Shape** - Frame counts, lengths, names and ordering
//! 3. **Prediction Domain** - Reuse of source x values vs. even spacing
//! 4. **Failures** - Invalid options and degenerate data
//! 5. **Serialization** - Frames in and out as JSON

use frame_regression::{
    assert_all_close, assert_close, frame,
    frame::{Field, FieldConfig, FieldType, FieldValue, Frame},
    transformer, Error, Model, RegressionOptions, RegressionTransform, Transform,
    TransformContext,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn source(values: &[f64]) -> Frame {
    let time: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
    Frame::new(vec![
        Field::time("time", time),
        Field::numbers("value", values.iter().copied()),
    ])
    .unwrap()
    .with_name("data")
    .with_ref_id("A")
}

fn numbers(field: &Field) -> Vec<f64> {
    field
        .values()
        .iter()
        .map(|v| v.as_number().expect("Expected a number"))
        .collect()
}

fn run(options: &RegressionOptions, frames: &[Frame]) -> Result<Vec<Frame>, Error> {
    transformer(options).unwrap()(frames)
}

// ============================================================================
// Reference Scenarios
// ============================================================================

#[test]
fn test_linear_fits_identity_exactly() {
    let options = RegressionOptions::linear()
        .with_fields("time", "value")
        .with_prediction_count(6);
    let input = [source(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0])];
    let output = run(&options, &input).unwrap();

    assert_eq!(output.len(), 2);
    assert_eq!(output[0], input[0]);

    let predicted = &output[1];
    assert_eq!(predicted.name(), Some("linear regression"));
    assert_eq!(predicted.ref_id(), None);
    assert_eq!(predicted.len(), 6);

    let [x, y] = predicted.fields() else {
        panic!("Expected two fields");
    };
    assert_eq!(x.name(), "time");
    assert_eq!(x.field_type(), FieldType::Time);
    assert_eq!(numbers(x), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);

    assert_eq!(y.name(), "value predicted");
    assert_eq!(y.field_type(), FieldType::Number);
    assert_all_close!(numbers(y), [0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);

    // Slope 1, intercept 0
    let fit = RegressionTransform::new(&options)
        .unwrap()
        .fit_frame(&input[0])
        .unwrap();
    assert_all_close!(fit.model.to_monomial(), [0.0, 1.0]);
}

#[test]
fn test_linear_flat_for_symmetric_data() {
    let options = RegressionOptions::linear()
        .with_fields("time", "value")
        .with_prediction_count(6);
    let output = run(&options, &[source(&[0.0, 1.0, 2.0, 2.0, 1.0, 0.0])]).unwrap();

    assert_all_close!(numbers(&output[1].fields()[1]), [1.0; 6]);
}

#[test]
fn test_quadratic() {
    let options = RegressionOptions::polynomial(2)
        .with_fields("time", "value")
        .with_prediction_count(6);
    let output = run(&options, &[source(&[0.0, 1.0, 2.0, 2.0, 1.0, 0.0])]).unwrap();

    let predicted = numbers(&output[1].fields()[1]);
    assert_all_close!(predicted, [-0.1, 1.2, 1.86, 1.86, 1.2, -0.1], 0.1);

    // Exact values of the least-squares parabola
    assert_close!(predicted[0], -1.0 / 14.0);
    assert_close!(predicted[2], 26.0 / 14.0);
}

// ============================================================================
// Output Shape
// ============================================================================

#[test]
fn test_output_is_originals_then_predictions() {
    let a = source(&[1.0, 2.0, 4.0, 8.0]);
    let b = source(&[3.0, 1.0, 4.0, 1.0, 5.0]).with_name("other").with_ref_id("B");
    let c = source(&[9.0, 7.0, 5.0]).with_ref_id("C");
    let input = [a, b, c];

    let options = RegressionOptions::linear().with_fields("time", "value");
    let output = run(&options, &input).unwrap();

    assert_eq!(output.len(), 2 * input.len());
    assert_eq!(&output[..3], &input);
    for predicted in &output[3..] {
        assert_eq!(predicted.name(), Some("linear regression"));
        assert_eq!(predicted.len(), 100);
    }

    // Third frame is a falling line: its prediction starts at the top
    let third = numbers(&output[5].fields()[1]);
    assert_close!(third[0], 9.0);
    assert_close!(third[99], 5.0);
}

#[test]
fn test_prediction_count_sets_length() {
    for count in [0, 1, 2, 7, 250] {
        let options = RegressionOptions::polynomial(3)
            .with_fields("time", "value")
            .with_prediction_count(count);
        let output = run(&options, &[source(&[0.0, 2.0, 1.0, 3.0, 5.0])]).unwrap();
        assert_eq!(output[1].len(), count as usize, "count = {count}");
        assert_eq!(output[1].fields().len(), 2);
    }
}

#[test]
fn test_zero_count_gives_empty_frame() {
    let options = RegressionOptions::linear()
        .with_fields("time", "value")
        .with_prediction_count(0);
    let output = run(&options, &[source(&[1.0, 2.0, 3.0])]).unwrap();

    let predicted = &output[1];
    assert!(predicted.is_empty());
    assert_eq!(predicted.fields()[0].name(), "time");
    assert_eq!(predicted.fields()[1].name(), "value predicted");
}

#[test]
fn test_source_config_is_preserved() {
    let mut config = FieldConfig::default();
    config.0.insert("unit".to_string(), "celsius".into());

    let input = [Frame::new(vec![
        Field::time("time", [0.0, 1.0, 2.0]),
        Field::numbers("value", [1.0, 2.0, 3.0]).with_config(config.clone()),
    ])
    .unwrap()];

    let options = RegressionOptions::linear().with_fields("time", "value");
    let output = run(&options, &input).unwrap();

    assert_eq!(output[0].fields()[1].config(), &config);
    assert!(output[1].fields()[1].config().is_empty());
}

#[test]
fn test_repeated_runs_are_identical() {
    let options = RegressionOptions::polynomial(4)
        .with_fields("time", "value")
        .with_prediction_count(33);
    let transform = transformer(&options).unwrap();
    let input = [source(&[0.3, 1.7, 2.2, 1.9, 1.1, -0.4, 0.8, 2.5])];

    let first = transform(&input).unwrap();
    let second = transform(&input).unwrap();

    let bits = |frames: &[Frame]| -> Vec<u64> {
        numbers(&frames[1].fields()[1])
            .into_iter()
            .map(f64::to_bits)
            .collect()
    };
    assert_eq!(bits(&first), bits(&second));
    assert_eq!(first, second);
}

#[test]
fn test_automatic_field_selection() {
    let input = [frame!(
        "label": String = ["a", "b", "c", "d"],
        "value": Number = [1.0, 3.0, 5.0, 7.0],
        "time": Time = [0.0, 1.0, 2.0, 3.0],
    )];

    let output = run(&RegressionOptions::linear().with_prediction_count(4), &input).unwrap();
    let predicted = &output[1];
    assert_eq!(predicted.fields()[0].name(), "time");
    assert_eq!(predicted.fields()[1].name(), "value predicted");
    assert_all_close!(numbers(&predicted.fields()[1]), [1.0, 3.0, 5.0, 7.0]);
}

#[test]
fn test_null_rows_are_skipped() {
    let input = [Frame::new(vec![
        Field::time("time", [0.0, 1.0, 3.0, 4.0, 10.0]),
        Field::new(
            "value",
            FieldType::Number,
            [1.0, f64::NAN, 7.0, 9.0, 21.0]
                .into_iter()
                .enumerate()
                .map(|(i, v)| if i == 3 { FieldValue::Null } else { FieldValue::from(v) }),
        )
        .unwrap(),
    ])
    .unwrap()];

    // Three usable rows remain; a count of 3 reuses their unevenly spaced x
    let options = RegressionOptions::linear()
        .with_fields("time", "value")
        .with_prediction_count(3);
    let output = run(&options, &input).unwrap();

    assert_eq!(numbers(&output[1].fields()[0]), vec![0.0, 3.0, 10.0]);
    assert_all_close!(numbers(&output[1].fields()[1]), [1.0, 7.0, 21.0]);
}

// ============================================================================
// Prediction Domain
// ============================================================================

#[test]
fn test_non_uniform_x_is_reused_when_count_matches() {
    let x = [0.0, 0.5, 3.0, 3.5, 10.0];
    let input = [Frame::new(vec![
        Field::numbers("x", x),
        Field::numbers("y", x.iter().map(|x| 2.0 * x + 1.0)),
    ])
    .unwrap()];

    let options = RegressionOptions::linear()
        .with_fields("x", "y")
        .with_prediction_count(5);
    let output = run(&options, &input).unwrap();

    assert_eq!(numbers(&output[1].fields()[0]), x.to_vec());
    assert_eq!(output[1].fields()[0].field_type(), FieldType::Number);
    assert_all_close!(numbers(&output[1].fields()[1]), [1.0, 2.0, 7.0, 8.0, 21.0]);

    // Any other count spaces points evenly over the source range
    let output = run(&options.clone().with_prediction_count(6), &input).unwrap();
    assert_all_close!(numbers(&output[1].fields()[0]), [0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
}

#[test]
fn test_single_point_domain_is_min_x() {
    let options = RegressionOptions::linear()
        .with_fields("time", "value")
        .with_prediction_count(1);
    let output = run(&options, &[source(&[4.0, 3.0, 2.0])]).unwrap();

    assert_eq!(numbers(&output[1].fields()[0]), vec![0.0]);
    assert_all_close!(numbers(&output[1].fields()[1]), [4.0]);
}

#[test]
fn test_millisecond_timestamps() {
    let start = 1_696_000_000_000.0;
    let time: Vec<f64> = (0..50).map(|i| start + f64::from(i) * 15_000.0).collect();
    let value: Vec<f64> = (0..50)
        .map(|i| {
            let t = f64::from(i);
            20.0 + 0.25 * t - 0.004 * t * t
        })
        .collect();

    let input = [Frame::new(vec![
        Field::time("time", time.clone()),
        Field::numbers("value", value.clone()),
    ])
    .unwrap()];

    let options = RegressionOptions::polynomial(2)
        .with_fields("time", "value")
        .with_prediction_count(50);
    let output = run(&options, &input).unwrap();

    assert_eq!(numbers(&output[1].fields()[0]), time);
    assert_all_close!(numbers(&output[1].fields()[1]), value, 1e-6);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_invalid_options_fail_before_any_frame() {
    assert!(matches!(
        transformer(&RegressionOptions::polynomial(0)).err(),
        Some(Error::InvalidOption { option: "degree", .. })
    ));
    for count in [-5, i64::MAX] {
        assert!(matches!(
            transformer(&RegressionOptions::linear().with_prediction_count(count)).err(),
            Some(Error::InvalidOption {
                option: "predictionCount",
                ..
            })
        ));
    }
}

#[test]
fn test_overflowing_x_range_is_singular() {
    // Every x is finite, but the range between them is not
    let input = [frame!(
        "x": Number = [-1.5e308, 0.0, 1.5e308],
        "y": Number = [1.0, 2.0, 3.0],
    )];
    let options = RegressionOptions::linear()
        .with_fields("x", "y")
        .with_prediction_count(3);
    let err = run(&options, &input).unwrap_err();

    assert!(matches!(err, Error::Frame { .. }));
    assert!(matches!(err.root(), Error::SingularMatrix { n: 3, k: 2 }));
}

#[test]
fn test_degree_at_least_rows_is_insufficient() {
    let options = RegressionOptions::polynomial(3).with_fields("time", "value");
    let err = run(&options, &[source(&[1.0, 2.0, 3.0])]).unwrap_err();

    assert!(matches!(
        err.root(),
        Error::InsufficientData {
            points: 3,
            required: 4
        }
    ));
    let Error::Frame { frame, model, .. } = &err else {
        panic!("Expected a frame error");
    };
    assert_eq!(frame.index, 0);
    assert_eq!(frame.ref_id.as_deref(), Some("A"));
    assert_eq!(*model, Model::Polynomial { degree: 3 });
}

#[test]
fn test_string_y_is_type_mismatch() {
    let input = [frame!(
        "time": Time = [0.0, 1.0, 2.0],
        "label": String = ["a", "b", "c"],
    )];
    let options = RegressionOptions::linear().with_fields("time", "label");
    let err = run(&options, &input).unwrap_err();

    assert!(matches!(
        err.root(),
        Error::TypeMismatch {
            found: FieldType::String,
            ..
        }
    ));
}

#[test]
fn test_missing_field() {
    let options = RegressionOptions::linear().with_fields("time", "nope");
    let err = run(&options, &[source(&[1.0, 2.0])]).unwrap_err();
    assert!(matches!(err.root(), Error::MissingField { field } if field == "nope"));
}

#[test]
fn test_duplicate_x_is_singular() {
    let input = [frame!(
        "x": Number = [1.0, 1.0, 2.0, 2.0, 2.0],
        "y": Number = [0.0, 1.0, 2.0, 3.0, 4.0],
    )];
    let options = RegressionOptions::polynomial(2).with_fields("x", "y");
    let err = run(&options, &input).unwrap_err();
    assert!(matches!(err.root(), Error::SingularMatrix { n: 5, k: 3 }));
}

#[test]
fn test_one_bad_frame_fails_the_batch() {
    let options = RegressionOptions::linear().with_fields("time", "value");
    let input = [source(&[1.0, 2.0, 3.0]), source(&[1.0])];
    let err = run(&options, &input).unwrap_err();

    let Error::Frame { frame, .. } = &err else {
        panic!("Expected a frame error");
    };
    assert_eq!(frame.index, 1);
    assert!(err.to_string().starts_with("linear regression failed for frame 1"));
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_json_in_json_out() {
    let frames = r#"[{
        "name": "data",
        "refId": "A",
        "fields": [
            { "name": "time", "type": "time", "values": [0, 1, 2, 3, 4, 5] },
            { "name": "value", "type": "number", "values": [0, 1, 2, 3, 4, 5] }
        ]
    }]"#;
    let options = r#"{ "modelType": "linear", "predictionCount": 6, "xFieldName": "time", "yFieldName": "value" }"#;

    let frames: Vec<Frame> = serde_json::from_str(frames).unwrap();
    let options: RegressionOptions = serde_json::from_str(options).unwrap();
    let transform = RegressionTransform::new(&options).unwrap();
    let output = transform.apply(&frames, &TransformContext::default()).unwrap();

    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json[1]["name"], "linear regression");
    assert!(json[1].get("refId").is_none());
    assert_eq!(json[1]["fields"][0]["type"], "time");
    assert_eq!(json[1]["fields"][1]["name"], "value predicted");
    assert_eq!(json[1]["fields"][1]["values"].as_array().unwrap().len(), 6);
}
