/*

    Declare data structs needed to parse JSON.

    - SingleOrVec
    - Transformations: global Translation / Scaling / Rotation tables
    - PlaneDesc, BoxDesc: object descriptions
    - SceneDescription, RootScene

    @date: 13 Oct, 2025
    @author: Bartu
*/

use std::fmt;

use serde::Deserialize;
use smart_default::SmartDefault;

use crate::camera::Camera;
use crate::error::{Result, SceneError};
use crate::json_parser::{deser_bool, deser_float, deser_float_pair, deser_float_vec, deser_usize, deser_vec3};
use crate::numeric::{Float, Vector3};
use crate::plane::{PlaneAxis, PlaneSampling};
use crate::transform::Transform;

// Allow either a single object or an array of them under the same key
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum SingleOrVec<T> {
    Empty,
    Single(T),
    Multiple(Vec<T>),
}

impl<T> SingleOrVec<T> {
    pub fn as_slice(&self) -> &[T] {
        match self {
            SingleOrVec::Empty => &[],
            SingleOrVec::Single(t) => std::slice::from_ref(t),
            SingleOrVec::Multiple(vec) => vec,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl<T> Default for SingleOrVec<T> {
    fn default() -> Self {
        SingleOrVec::Empty
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Translation,
    Scaling,
    Rotation,
}

impl TransformKind {
    fn arity(self) -> usize {
        match self {
            TransformKind::Translation | TransformKind::Scaling => 3,
            TransformKind::Rotation => 4,
        }
    }

    fn name(self) -> &'static str {
        match self {
            TransformKind::Translation => "Translation",
            TransformKind::Scaling => "Scaling",
            TransformKind::Rotation => "Rotation",
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TransformEntry {
    #[serde(rename = "_id", deserialize_with = "deser_usize")]
    pub id: usize,

    #[serde(rename = "_data", deserialize_with = "deser_float_vec")]
    pub data: Vec<Float>,
}

impl TransformEntry {
    /// Rotation data is "angle_degrees ax ay az"
    pub fn to_transform(&self, kind: TransformKind) -> Result<Transform> {
        if self.data.len() != kind.arity() {
            return Err(SceneError::TransformArity {
                kind: kind.name(),
                id: self.id,
                expected: kind.arity(),
                got: self.data.len(),
            });
        }
        let d = &self.data;
        Ok(match kind {
            TransformKind::Translation => Transform::translate(Vector3::new(d[0], d[1], d[2])),
            TransformKind::Scaling => Transform::scale(Vector3::new(d[0], d[1], d[2])),
            TransformKind::Rotation => Transform::rotate(d[0], Vector3::new(d[1], d[2], d[3])),
        })
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct Transformations {
    pub translation: SingleOrVec<TransformEntry>,
    pub scaling: SingleOrVec<TransformEntry>,
    pub rotation: SingleOrVec<TransformEntry>,
}

impl Transformations {
    pub fn find(&self, kind: TransformKind, id: usize) -> Option<&TransformEntry> {
        let table = match kind {
            TransformKind::Translation => &self.translation,
            TransformKind::Scaling => &self.scaling,
            TransformKind::Rotation => &self.rotation,
        };
        table.iter().find(|entry| entry.id == id)
    }
}


#[derive(Debug, Deserialize, Clone, SmartDefault)]
#[serde(default)]
pub struct PlaneDesc {
    #[serde(rename = "_id", deserialize_with = "deser_usize")]
    pub id: usize,

    #[serde(rename = "Axis")]
    pub axis: PlaneAxis,

    #[default([0.0, 1.0])]
    #[serde(rename = "A", deserialize_with = "deser_float_pair")]
    pub a: [Float; 2],

    #[default([0.0, 1.0])]
    #[serde(rename = "B", deserialize_with = "deser_float_pair")]
    pub b: [Float; 2],

    #[serde(rename = "C", deserialize_with = "deser_float")]
    pub c: Float,

    #[default(Vector3::splat(0.8))]
    #[serde(rename = "Albedo", deserialize_with = "deser_vec3")]
    pub albedo: Vector3,

    #[serde(rename = "Radiance", deserialize_with = "deser_vec3")]
    pub radiance: Vector3,

    #[serde(rename = "ReverseOrientation", deserialize_with = "deser_bool")]
    pub reverse_orientation: bool,

    #[serde(rename = "Sampling")]
    pub sampling: PlaneSampling,

    #[serde(rename = "Transformations")]
    pub transformation_names: Option<String>,
}

#[derive(Debug, Deserialize, Clone, SmartDefault)]
#[serde(default)]
pub struct BoxDesc {
    #[serde(rename = "_id", deserialize_with = "deser_usize")]
    pub id: usize,

    #[serde(rename = "Min", deserialize_with = "deser_vec3")]
    pub min: Vector3,

    #[default(Vector3::ONE)]
    #[serde(rename = "Max", deserialize_with = "deser_vec3")]
    pub max: Vector3,

    #[default(Vector3::splat(0.8))]
    #[serde(rename = "Albedo", deserialize_with = "deser_vec3")]
    pub albedo: Vector3,

    #[serde(rename = "Radiance", deserialize_with = "deser_vec3")]
    pub radiance: Vector3,

    #[serde(rename = "ReverseOrientation", deserialize_with = "deser_bool")]
    pub reverse_orientation: bool,

    #[serde(rename = "Sampling")]
    pub sampling: PlaneSampling,

    #[serde(rename = "Transformations")]
    pub transformation_names: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct Objects {
    pub plane: SingleOrVec<PlaneDesc>,
    #[serde(rename = "Box")]
    pub boxes: SingleOrVec<BoxDesc>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct SceneDescription {
    #[serde(deserialize_with = "deser_vec3")]
    pub background_color: Vector3,

    pub camera: Camera,

    pub transformations: Transformations,

    pub objects: Objects,
}

#[derive(Debug, Deserialize)]
pub struct RootScene {
    #[serde(rename = "Scene")]
    pub scene: SceneDescription,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_or_vec() {
        let one: SingleOrVec<TransformEntry> = serde_json::from_str(r#"{"_id": 1, "_data": "1 2 3"}"#).unwrap();
        assert_eq!(one.len(), 1);
        let many: SingleOrVec<TransformEntry> =
            serde_json::from_str(r#"[{"_id": 1, "_data": "1 2 3"}, {"_id": 2, "_data": "4 5 6"}]"#).unwrap();
        assert_eq!(many.len(), 2);
        assert_eq!(many.as_slice()[1].data, vec![4.0, 5.0, 6.0]);
        assert!(SingleOrVec::<TransformEntry>::default().is_empty());
    }

    #[test]
    fn test_plane_defaults() {
        let p: PlaneDesc = serde_json::from_str(r#"{"_id": "3", "Axis": "XZ", "C": "2"}"#).unwrap();
        assert_eq!(p.id, 3);
        assert_eq!(p.axis, PlaneAxis::XZ);
        assert_eq!(p.a, [0.0, 1.0]);
        assert_eq!(p.c, 2.0);
        assert_eq!(p.albedo, Vector3::splat(0.8));
        assert_eq!(p.radiance, Vector3::ZERO);
        assert!(!p.reverse_orientation);
        assert_eq!(p.sampling, PlaneSampling::ExtentFromOrigin);
        assert!(p.transformation_names.is_none());
    }

    #[test]
    fn test_full_description() {
        let root: RootScene = serde_json::from_str(
            r#"{ "Scene": {
                "BackgroundColor": "0.1 0.1 0.1",
                "Transformations": { "Translation": {"_id": 1, "_data": "0 1 0"} },
                "Objects": {
                    "Plane": [
                        {"_id": 1, "Axis": "xz", "A": "-1 1", "B": [-1, 1], "C": 0},
                        {"_id": 2, "Axis": "XZ", "A": "-0.2 0.2", "B": "-0.2 0.2", "C": 2,
                         "Radiance": "10 10 10", "Sampling": "anchored", "Transformations": "t1"}
                    ],
                    "Box": {"_id": 1, "Min": "-0.5 0 -0.5", "Max": "0.5 1 0.5", "ReverseOrientation": "true"}
                }
            } }"#,
        )
        .unwrap();
        let scene = root.scene;
        assert_eq!(scene.background_color, Vector3::splat(0.1));
        assert_eq!(scene.objects.plane.len(), 2);
        assert_eq!(scene.objects.boxes.len(), 1);
        let light = &scene.objects.plane.as_slice()[1];
        assert_eq!(light.sampling, PlaneSampling::Anchored);
        assert_eq!(light.transformation_names.as_deref(), Some("t1"));
        assert!(scene.objects.boxes.as_slice()[0].reverse_orientation);
        assert!(scene.transformations.find(TransformKind::Translation, 1).is_some());
        assert!(scene.transformations.find(TransformKind::Scaling, 1).is_none());
    }

    #[test]
    fn test_entry_arity() {
        let e = TransformEntry { id: 4, data: vec![1.0, 2.0] };
        let err = e.to_transform(TransformKind::Scaling).unwrap_err();
        assert!(matches!(err, SceneError::TransformArity { kind: "Scaling", id: 4, expected: 3, got: 2 }));
    }
}
