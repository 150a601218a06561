/*

    Declare Scene consisting of the camera and the objects
    (planes and boxes) built from a scene description.

    Objects referencing the same transformation expression share a
    single object_to_world / world_to_object pair.

    @date: 2 Oct, 2025
    @author: Bartu
*/

use std::collections::HashMap;
use std::path::Path;

use crate::bbox::BBox;
use crate::camera::Camera;
use crate::error::{Result, SceneError};
use crate::interaction::SurfaceInteraction;
use crate::json_parser::{parse_json, parse_transform_expression};
use crate::json_structs::{BoxDesc, PlaneDesc, SceneDescription, Transformations};
use crate::plane::{create_aabb_shape, create_plane_shape};
use crate::prelude::*;
use crate::ray::Ray;
use crate::shapes::HeapAllocatedShape;
use crate::transform::Transform;

type TransformPair = (Arc<Transform>, Arc<Transform>);

#[derive(Debug, Clone)]
pub struct SceneObject {
    pub shape: HeapAllocatedShape,
    pub albedo: Vector3,
    pub radiance: Vector3,
}

impl SceneObject {
    pub fn is_emissive(&self) -> bool {
        self.radiance.max_element() > 0.0
    }
}

pub struct SceneHit<'a> {
    pub t: Float,
    pub isect: SurfaceInteraction<'a>,
    pub object_index: usize,
}

#[derive(Debug)]
pub struct Scene {
    pub camera: Camera,
    pub background_color: Vector3,
    pub objects: Vec<SceneObject>,
    /// Indices into `objects` of everything with positive radiance
    pub emitters: Vec<usize>,
}

impl Scene {

    pub fn load(path: &Path) -> Result<Self> {
        let root = parse_json(path)?;
        Self::from_description(root.scene)
    }

    pub fn from_description(desc: SceneDescription) -> Result<Self> {
        let span = tracing::span!(tracing::Level::INFO, "build_scene");
        let _enter = span.enter();

        let mut camera = desc.camera;
        camera.setup()?;

        let mut builder = ObjectBuilder::new(&desc.transformations);
        for plane in desc.objects.plane.iter() {
            builder.add_plane(plane)?;
        }
        for aabb in desc.objects.boxes.iter() {
            builder.add_box(aabb)?;
        }
        let objects = builder.objects;

        let emitters: Vec<usize> = objects
            .iter()
            .enumerate()
            .filter(|(_, obj)| obj.is_emissive())
            .map(|(i, _)| i)
            .collect();

        info!("Scene has {} shapes, {} of them emissive.", objects.len(), emitters.len());
        if emitters.is_empty() {
            warn!("No emissive objects found, image will only show emission and background.");
        }

        Ok(Self {
            camera,
            background_color: desc.background_color,
            objects,
            emitters,
        })
    }

    /// Closest hit over all objects
    pub fn intersect(&self, ray: &Ray) -> Option<SceneHit<'_>> {
        let mut ray = *ray;
        let mut closest = None;
        for (object_index, obj) in self.objects.iter().enumerate() {
            if let Some((t, isect)) = obj.shape.intersect(&ray, false) {
                // Later shapes only count if strictly closer
                ray.t_max = t;
                closest = Some(SceneHit { t, isect, object_index });
            }
        }
        closest
    }

    /// True if anything except `ignore` blocks the ray
    pub fn occluded(&self, ray: &Ray, ignore: Option<usize>) -> bool {
        self.objects
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != ignore)
            .any(|(_, obj)| obj.shape.intersect_p(ray, false))
    }

    pub fn world_bound(&self) -> Option<BBox> {
        self.objects
            .iter()
            .map(|obj| obj.shape.world_bound())
            .reduce(|acc, b| acc.union(&b))
    }
}

struct ObjectBuilder<'a> {
    transforms: &'a Transformations,
    cache: HashMap<String, TransformPair>,
    objects: Vec<SceneObject>,
}

impl<'a> ObjectBuilder<'a> {
    fn new(transforms: &'a Transformations) -> Self {
        Self { transforms, cache: HashMap::new(), objects: Vec::new() }
    }

    fn transform_pair(&mut self, names: Option<&str>, owner: &str) -> Result<TransformPair> {
        // Normalize whitespace so "t1  s1" and "t1 s1" share a pair
        let key = names.unwrap_or("").split_whitespace().collect::<Vec<_>>().join(" ");
        if let Some(pair) = self.cache.get(&key) {
            return Ok(pair.clone());
        }
        let object_to_world = if key.is_empty() {
            debug!("No transformation found for {}, defaulting to identity...", owner);
            Transform::IDENTITY
        } else {
            parse_transform_expression(&key, self.transforms, owner)?
        };
        let world_to_object = object_to_world.inverse();
        let pair = (Arc::new(object_to_world), Arc::new(world_to_object));
        self.cache.insert(key, pair.clone());
        Ok(pair)
    }

    fn add_plane(&mut self, desc: &PlaneDesc) -> Result<()> {
        for (name, [min, max]) in [("A", desc.a), ("B", desc.b)] {
            if !(min < max) {
                return Err(SceneError::EmptyInterval { id: desc.id, name, min, max });
            }
        }
        let (o2w, w2o) = self.transform_pair(desc.transformation_names.as_deref(), &format!("plane #{}", desc.id))?;
        let plane = create_plane_shape(
            &o2w, &w2o,
            desc.reverse_orientation,
            desc.a[0], desc.a[1], desc.b[0], desc.b[1], desc.c,
            desc.axis,
        );
        let plane = Arc::unwrap_or_clone(plane).with_sampling(desc.sampling);
        debug!("Added plane #{} on {:?} at c={}", desc.id, desc.axis, desc.c);
        self.objects.push(SceneObject {
            shape: Arc::new(plane),
            albedo: desc.albedo,
            radiance: desc.radiance,
        });
        Ok(())
    }

    fn add_box(&mut self, desc: &BoxDesc) -> Result<()> {
        let extent = (desc.max - desc.min).abs();
        if approx_zero(extent.min_element()) {
            return Err(SceneError::DegenerateBox(desc.id));
        }
        let (o2w, w2o) = self.transform_pair(desc.transformation_names.as_deref(), &format!("box #{}", desc.id))?;
        let faces = create_aabb_shape(&o2w, &w2o, desc.reverse_orientation, desc.min, desc.max);
        debug!("Added box #{} with {} faces", desc.id, faces.len());
        for face in faces {
            let face = Arc::unwrap_or_clone(face).with_sampling(desc.sampling);
            self.objects.push(SceneObject {
                shape: Arc::new(face),
                albedo: desc.albedo,
                radiance: desc.radiance,
            });
        }
        Ok(())
    }
}
