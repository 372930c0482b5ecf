use proptest::prelude::*;
use rstest::rstest;
use serde_json::json;

use super::*;

fn single(v: &str) -> RawValue {
	RawValue::Single(v.to_string())
}

fn multi(vs: &[&str]) -> RawValue {
	RawValue::Multi(vs.iter().map(|v| v.to_string()).collect())
}

#[rstest]
#[case("2", Some(2.0))]
#[case(" 2 ", Some(2.0))]
#[case("-3.5", Some(-3.5))]
#[case("1e3", Some(1000.0))]
#[case("", None)]
#[case("   ", None)]
#[case("abc", None)]
#[case("12px", None)]
#[case("NaN", None)]
#[case("inf", None)]
#[case("1e400", None)]
fn number_parsing(#[case] input: &str, #[case] expected: Option<f64>) {
	assert_eq!(parse_number(input), expected);
}

#[rstest]
#[case("true", Some(true))]
#[case("false", Some(false))]
#[case("TRUE", None)]
#[case("1", None)]
#[case("yes", None)]
#[case("", None)]
fn boolean_accepts_only_literals(#[case] input: &str, #[case] expected: Option<bool>) {
	assert_eq!(decode_value(&single(input), &ParamType::Boolean), expected.map(ParamValue::Bool));
}

#[test]
fn string_passes_through_numerals() {
	assert_eq!(
		decode_value(&single("123"), &ParamType::String),
		Some(ParamValue::String("123".into()))
	);
}

#[test]
fn scalar_types_reject_multi() {
	let raw = multi(&["1", "2"]);
	assert_eq!(decode_value(&raw, &ParamType::String), None);
	assert_eq!(decode_value(&raw, &ParamType::Number), None);
	assert_eq!(decode_value(&raw, &ParamType::Boolean), None);
}

#[test]
fn string_array_accepts_single() {
	assert_eq!(
		decode_value(&single("a"), &ParamType::StringArray),
		Some(ParamValue::StringArray(vec!["a".into()]))
	);
}

#[test]
fn number_array_is_all_or_nothing() {
	assert_eq!(
		decode_value(&multi(&["1", "2.5"]), &ParamType::NumberArray),
		Some(ParamValue::NumberArray(vec![1.0, 2.5]))
	);
	assert_eq!(decode_value(&multi(&["1", "x"]), &ParamType::NumberArray), None);
}

#[rstest]
#[case(single(""), ParamType::StringArray, None)]
#[case(multi(&["", ""]), ParamType::StringArray, None)]
#[case(multi(&["a", ""]), ParamType::StringArray, Some(ParamValue::StringArray(vec!["a".into()])))]
#[case(multi(&["", "1"]), ParamType::NumberArray, Some(ParamValue::NumberArray(vec![1.0])))]
#[case(multi(&[""]), ParamType::NumberArray, None)]
fn arrays_skip_empty_elements(#[case] raw: RawValue, #[case] ty: ParamType, #[case] expected: Option<ParamValue>) {
	assert_eq!(decode_value(&raw, &ty), expected);
}

#[test]
fn array_decode_matches_reserialized_form() {
	// Serialization drops empty elements; decoding must not see them either.
	let raw = multi(&["a", "", "b"]);
	let rewritten = ParamValue::StringArray(vec!["a".into(), "b".into()]).to_raw();
	assert_eq!(
		decode_value(&raw, &ParamType::StringArray),
		decode_value(&rewritten, &ParamType::StringArray)
	);
}

#[test]
fn custom_decoder_runs() {
	let range = ParamType::Custom(CustomDecoder::new(|raw| {
		let (from, to) = raw.as_single()?.split_once("..")?;
		Some(ParamValue::Custom(json!({ "from": from, "to": to })))
	}));
	assert_eq!(
		decode_value(&single("2024-01-01..2024-02-01"), &range),
		Some(ParamValue::Custom(json!({ "from": "2024-01-01", "to": "2024-02-01" })))
	);
	assert_eq!(decode_value(&single("garbage"), &range), None);
}

#[rstest]
#[case(single("true"), ParamValue::Bool(true))]
#[case(single("42"), ParamValue::Number(42.0))]
#[case(single("foo"), ParamValue::String("foo".into()))]
#[case(single(""), ParamValue::String(String::new()))]
#[case(multi(&["1", "2"]), ParamValue::NumberArray(vec![1.0, 2.0]))]
#[case(multi(&["1", "b"]), ParamValue::StringArray(vec!["1".into(), "b".into()]))]
#[case(multi(&["", "2"]), ParamValue::NumberArray(vec![2.0]))]
#[case(multi(&["", ""]), ParamValue::StringArray(vec![]))]
fn inference(#[case] raw: RawValue, #[case] expected: ParamValue) {
	assert_eq!(infer_value(&raw), expected);
}

#[test]
fn type_names_round_trip() {
	for name in ["string", "number", "boolean", "string[]", "number[]"] {
		assert_eq!(ParamType::from_name(name).map(|t| t.name()), Some(name));
	}
	assert!(ParamType::from_name("custom").is_none());
	assert!(ParamType::from_name("int").is_none());
}

#[test]
fn default_inference() {
	assert_eq!(ParamType::of_default(&ParamValue::from(1)).map(|t| t.name()), Some("number"));
	assert_eq!(ParamType::of_default(&ParamValue::from("")).map(|t| t.name()), Some("string"));
	assert_eq!(
		ParamType::of_default(&ParamValue::StringArray(vec![])).map(|t| t.name()),
		Some("string[]")
	);
	assert!(ParamType::of_default(&ParamValue::Custom(json!(null))).is_none());
}

#[test]
fn empty_arrays_are_blank() {
	assert!(ParamValue::StringArray(vec![]).is_blank());
	assert!(ParamValue::NumberArray(vec![]).is_blank());
	assert!(!ParamValue::StringArray(vec![String::new()]).is_blank());
	assert!(infer_value(&multi(&["", ""])).is_blank());
}

#[test]
fn number_formatting() {
	assert_eq!(ParamValue::from(2).to_raw(), single("2"));
	assert_eq!(ParamValue::from(0.5).to_raw(), single("0.5"));
	assert_eq!(ParamValue::from(-0.0).to_raw(), single("0"));
	assert_eq!(ParamValue::from(vec![1i64, 2]).to_raw(), multi(&["1", "2"]));
}

fn typed_value() -> impl Strategy<Value = (ParamValue, ParamType)> {
	prop_oneof![
		"[^\\s]{1,12}".prop_map(|s| (ParamValue::String(s), ParamType::String)),
		any::<f64>()
			.prop_filter("finite", |n| n.is_finite())
			.prop_map(|n| (ParamValue::Number(if n == 0.0 { 0.0 } else { n }), ParamType::Number)),
		any::<bool>().prop_map(|b| (ParamValue::Bool(b), ParamType::Boolean)),
		prop::collection::vec("[a-z0-9 ]{1,6}", 1..5).prop_map(|v| (ParamValue::StringArray(v), ParamType::StringArray)),
		prop::collection::vec(-1.0e9f64..1.0e9, 1..5).prop_map(|v| (ParamValue::NumberArray(v), ParamType::NumberArray)),
	]
}

proptest! {
	/// Encoding a value and decoding it with its own type gives it back.
	#[test]
	fn prop_encode_decode_agree((value, ty) in typed_value()) {
		let raw = value.to_raw();
		prop_assert_eq!(decode_value(&raw, &ty), Some(value));
	}
}
