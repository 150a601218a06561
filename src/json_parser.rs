/*

    Provide utilities to parse scene JSON files.

    The parser is lenient about number formatting, let <a> be
    integer or float type, in the JSON file <a> can be given both
    in quotes (string) or as is, e.g. both "C": "5" and "C": 5 work.

    Vector-like fields ("Position", "A", "ImageResolution" ...)
    accept a whitespace separated string "x y z" or an array
    [x, y, z] whose elements are numbers or numeric strings.

    @date: 2 Oct, 2025
    @author: bartu
*/

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Result, SceneError};
use crate::json_structs::{RootScene, TransformKind, Transformations};
use crate::numeric::{Float, Vector3};
use crate::transform::Transform;
use tracing::debug;

pub fn parse_json(path: &Path) -> Result<RootScene> {

    let span = tracing::span!(tracing::Level::INFO, "load_scene");
    let _enter = span.enter();

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    debug!("Reading file from {}", path.display());

    let root: RootScene = serde_json::from_reader(reader)?;
    Ok(root)
}

/// Numbers out of a JSON value: a number, a numeric string,
/// a whitespace separated string or an array of either.
fn value_to_floats(value: &Value) -> std::result::Result<Vec<Float>, String> {
    match value {
        Value::Number(n) => n.as_f64().map(|v| vec![v as Float]).ok_or_else(|| format!("Invalid number {n}")),
        Value::String(s) => s
            .split_whitespace()
            .map(|x| x.parse::<Float>().map_err(|e| format!("Failed to parse '{x}': {e}")))
            .collect(),
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Array(_) => return Err("Nested arrays are not allowed".to_string()),
                    _ => out.extend(value_to_floats(item)?),
                }
            }
            Ok(out)
        }
        t => Err(format!("Expected number, string or array, found {t}")),
    }
}

fn deser_fixed_floats<'de, D, const N: usize>(deserializer: D) -> std::result::Result<[Float; N], D::Error>
where
    D: Deserializer<'de>,
{
    let value: Value = Deserialize::deserialize(deserializer)?;
    let v = value_to_floats(&value).map_err(de::Error::custom)?;
    let len = v.len();
    v.try_into()
        .map_err(|_| de::Error::custom(format!("Expected {N} values, got {len}")))
}

pub(crate) fn deser_usize<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Value = Deserialize::deserialize(deserializer)?;
    match s {
        Value::Number(n) => n.as_u64()
            .map(|v| v as usize)
            .ok_or_else(|| de::Error::custom("Invalid unsigned integer")),
        Value::String(s) => s.trim().parse::<usize>()
            .map_err(|_| de::Error::custom("Failed to parse integer from string")),
        t => Err(de::Error::custom(format!("Expected int or string, found {t}"))),
    }
}

// Handles floats as string or number
pub(crate) fn deser_float<'de, D>(deserializer: D) -> std::result::Result<Float, D::Error>
where
    D: Deserializer<'de>,
{
    let [x] = deser_fixed_floats::<D, 1>(deserializer)?;
    Ok(x)
}

pub(crate) fn deser_bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Value = Deserialize::deserialize(deserializer)?;
    match s {
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|v| v != 0.0)),
        Value::String(s) => match s.to_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(de::Error::custom(format!("invalid bool '{s}'"))),
        },
        t => Err(de::Error::custom(format!("Expected bool, found {t}"))),
    }
}

pub(crate) fn deser_vec3<'de, D>(deserializer: D) -> std::result::Result<Vector3, D::Error>
where
    D: Deserializer<'de>,
{
    let [x, y, z] = deser_fixed_floats::<D, 3>(deserializer)?;
    Ok(Vector3::new(x, y, z))
}

pub(crate) fn deser_float_pair<'de, D>(deserializer: D) -> std::result::Result<[Float; 2], D::Error>
where
    D: Deserializer<'de>,
{
    deser_fixed_floats::<D, 2>(deserializer)
}

pub(crate) fn deser_usize_pair<'de, D>(deserializer: D) -> std::result::Result<[usize; 2], D::Error>
where
    D: Deserializer<'de>,
{
    let pair = deser_fixed_floats::<D, 2>(deserializer)?;
    if pair.iter().any(|v| *v < 0.0 || v.fract() != 0.0) {
        return Err(de::Error::custom(format!("Expected two non-negative integers, got {pair:?}")));
    }
    Ok(pair.map(|v| v as usize))
}

pub(crate) fn deser_float_vec<'de, D>(deserializer: D) -> std::result::Result<Vec<Float>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Value = Deserialize::deserialize(deserializer)?;
    value_to_floats(&value).map_err(de::Error::custom)
}

/// Compose a transformation expression like "t1 s2 r1".
/// Tokens apply left to right, i.e. each one pre-multiplies the result so far.
/// `owner` only names the referencing object in errors.
pub fn parse_transform_expression(
    expr: &str,
    global_transforms: &Transformations,
    owner: &str,
) -> Result<Transform> {

    let mut out = Transform::IDENTITY;

    for token in expr.split_whitespace() {
        debug!("Parsing token {}", token);
        let unknown = || SceneError::UnknownTransform { token: token.to_string(), owner: owner.to_string() };

        let mut chars = token.chars();
        let kind = match chars.next() {
            Some('t' | 'T') => TransformKind::Translation,
            Some('s' | 'S') => TransformKind::Scaling,
            Some('r' | 'R') => TransformKind::Rotation,
            _ => return Err(unknown()),
        };
        let id: usize = chars.as_str().parse().map_err(|_| unknown())?;

        let entry = global_transforms.find(kind, id).ok_or_else(unknown)?;
        debug!("Applying {} #{}", kind, id);
        out = entry.to_transform(kind)?.compose(&out);
    }

    if !out.inverse_matrix().is_finite() {
        return Err(SceneError::SingularTransform(expr.to_string()));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "deser_float")]
        f: Float,
        #[serde(deserialize_with = "deser_vec3")]
        v: Vector3,
        #[serde(deserialize_with = "deser_bool")]
        b: bool,
        #[serde(deserialize_with = "deser_usize_pair")]
        res: [usize; 2],
    }

    #[test]
    fn test_lenient_numbers() {
        let p: Probe = serde_json::from_str(r#"{"f": "2.5", "v": "1 2 3", "b": "True", "res": "640 480"}"#).unwrap();
        assert_eq!(p.f, 2.5);
        assert_eq!(p.v, Vector3::new(1.0, 2.0, 3.0));
        assert!(p.b);
        assert_eq!(p.res, [640, 480]);

        let p: Probe = serde_json::from_str(r#"{"f": 4, "v": [1, "2", 3.5], "b": 0, "res": [2, 2]}"#).unwrap();
        assert_eq!(p.f, 4.0);
        assert_eq!(p.v, Vector3::new(1.0, 2.0, 3.5));
        assert!(!p.b);
    }

    #[test]
    fn test_wrong_arity_is_rejected() {
        let r: serde_json::Result<Probe> = serde_json::from_str(r#"{"f": "1 2", "v": "1 2 3", "b": true, "res": "1 1"}"#);
        assert!(r.is_err());
        let r: serde_json::Result<Probe> = serde_json::from_str(r#"{"f": 1, "v": "1 2", "b": true, "res": "1 1"}"#);
        assert!(r.is_err());
        let r: serde_json::Result<Probe> = serde_json::from_str(r#"{"f": 1, "v": "1 2 3", "b": true, "res": "1.5 1"}"#);
        assert!(r.is_err());
    }

    fn transforms() -> Transformations {
        serde_json::from_str(
            r#"{
                "Translation": [{"_id": "1", "_data": "0 0 5"}, {"_id": 2, "_data": [1, 0, 0]}],
                "Scaling": {"_id": "1", "_data": "2 2 2"},
                "Rotation": [{"_id": "1", "_data": "90 0 0 1"}, {"_id": "2", "_data": "90 0 1"}]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_transform_expression_applies_left_to_right() {
        let t = parse_transform_expression("s1 t1", &transforms(), "plane #1").unwrap();
        // Scale first, then translate
        assert_eq!(t.apply_point(Vector3::new(1.0, 0.0, 0.0)), Vector3::new(2.0, 0.0, 5.0));

        let t = parse_transform_expression("t1 s1", &transforms(), "plane #1").unwrap();
        assert_eq!(t.apply_point(Vector3::new(1.0, 0.0, 0.0)), Vector3::new(2.0, 0.0, 10.0));

        let t = parse_transform_expression("", &transforms(), "plane #1").unwrap();
        assert!(t.is_identity());
    }

    #[test]
    fn test_transform_expression_errors() {
        let err = parse_transform_expression("t9", &transforms(), "box #3").unwrap_err();
        assert!(matches!(err, SceneError::UnknownTransform { .. }));
        assert!(err.to_string().contains("box #3"));

        assert!(parse_transform_expression("x1", &transforms(), "o").is_err());
        assert!(parse_transform_expression("t", &transforms(), "o").is_err());

        let err = parse_transform_expression("r2", &transforms(), "o").unwrap_err();
        assert!(matches!(err, SceneError::TransformArity { expected: 4, got: 3, .. }));
    }
}
