/*

    Declare the Shape trait every primitive implements, and the
    ShapeBase data (transform pair + orientation flags) shared by
    all of them.

    Shapes are immutable once built and handed around as
    Arc<dyn Shape>, queries take &self only so the renderer can
    call them from any number of threads.

    @date: Oct, 2025
    @author: bartu
*/

use std::fmt::Debug;

use crate::bbox::BBox;
use crate::interaction::{Interaction, SurfaceInteraction};
use crate::prelude::*;
use crate::ray::Ray;
use crate::transform::Transform;

pub type HeapAllocatedShape = Arc<dyn Shape>;


#[derive(Debug, Clone)]
pub struct ShapeBase {
    pub object_to_world: Arc<Transform>,
    pub world_to_object: Arc<Transform>,
    pub reverse_orientation: bool,
    pub transform_swaps_handedness: bool,
}

impl ShapeBase {
    pub fn new(object_to_world: Arc<Transform>, world_to_object: Arc<Transform>, reverse_orientation: bool) -> Self {
        let transform_swaps_handedness = object_to_world.swaps_handedness();
        Self {
            object_to_world,
            world_to_object,
            reverse_orientation,
            transform_swaps_handedness,
        }
    }
}


// =======================================================================================================
// Shape Trait
// =======================================================================================================
pub trait Shape: Debug + Send + Sync {

    fn base(&self) -> &ShapeBase;

    /// Bounds in the shape's own coordinate system
    fn object_bound(&self) -> BBox;

    fn world_bound(&self) -> BBox {
        self.base().object_to_world.apply_bbox(&self.object_bound())
    }

    /// Closest hit along `ray` in (0, ray.t_max), with its parametric distance.
    /// `test_alpha_texture` is accepted for shapes that support masking.
    fn intersect(&self, ray: &Ray, test_alpha_texture: bool) -> Option<(Float, SurfaceInteraction<'_>)>;

    /// Occlusion-only variant of intersect
    fn intersect_p(&self, ray: &Ray, test_alpha_texture: bool) -> bool {
        self.intersect(ray, test_alpha_texture).is_some()
    }

    fn area(&self) -> Float;

    /// Point on the surface for `u` in [0,1)^2 and its pdf with respect to area
    fn sample(&self, u: Vector2) -> (Interaction, Float);

    /// Point on the surface as seen from `reference`, pdf with respect to solid angle.
    fn sample_ref(&self, reference: &Interaction, u: Vector2) -> (Interaction, Float) {
        let (intr, pdf) = self.sample(u);
        let wi = intr.p - reference.p;
        if wi.length_squared() == 0.0 {
            return (intr, 0.0);
        }
        let wi = wi.normalize();
        let pdf = pdf * reference.p.distance_squared(intr.p) / intr.n.dot(-wi).abs();
        if pdf.is_infinite() {
            return (intr, 0.0);
        }
        (intr, pdf)
    }

    /// Solid angle density of sample_ref producing direction `wi` from `reference`
    fn pdf_ref(&self, reference: &Interaction, wi: Vector3) -> Float {
        let ray = reference.spawn_ray(wi);
        let Some((_, isect_light)) = self.intersect(&ray, false) else {
            return 0.0;
        };
        let pdf = reference.p.distance_squared(isect_light.p) / (isect_light.n.dot(-wi).abs() * self.area());
        if pdf.is_infinite() { 0.0 } else { pdf }
    }
}
