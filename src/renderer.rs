/*

    Given a Scene, render a preview image.

    Currently supports:
        - Emission seen directly (two-sided)
        - Direct lighting from emissive shapes on Lambertian surfaces,
          one light sample per emitter per camera sample

    @date: Oct 11, 2025
    @author: Bartu
*/

use rayon::prelude::*;

use crate::image::ImageData;
use crate::interval::FloatConst;
use crate::prelude::*;
use crate::ray::Ray;
use crate::sampler::PixelSampler;
use crate::scene::{Scene, SceneHit};

/// Radiance arriving along `ray`
pub fn radiance(scene: &Scene, ray: &Ray, sampler: &mut PixelSampler) -> Vector3 {
    match scene.intersect(ray) {
        Some(hit) => shade(scene, &hit, sampler),
        None => scene.background_color,
    }
}

fn shade(scene: &Scene, hit: &SceneHit<'_>, sampler: &mut PixelSampler) -> Vector3 {
    let object = &scene.objects[hit.object_index];
    let mut color = object.radiance;
    if object.albedo.max_element() <= 0.0 {
        return color;
    }

    let reference = hit.isect.as_interaction();
    let n = hit.isect.shading.n;
    for &light_index in scene.emitters.iter() {
        if light_index == hit.object_index {
            continue;
        }
        let light = &scene.objects[light_index];
        let (light_point, pdf) = light.shape.sample_ref(&reference, sampler.get_2d());
        if pdf <= 0.0 || !pdf.is_finite() {
            continue;
        }

        let wi = (light_point.p - reference.p).normalize();
        let shadow_ray = hit.isect.spawn_ray_to(&light_point);
        if scene.occluded(&shadow_ray, Some(light_index)) {
            continue;
        }

        let brdf = object.albedo * Float::INV_PI;
        color += brdf * light.radiance * n.dot(wi).abs() / pdf;
    }
    color
}

pub fn render_pixel(scene: &Scene, col: usize, row: usize) -> Vector3 {
    let camera = &scene.camera;
    let (width, _) = camera.get_resolution();
    let mut sampler = PixelSampler::new((row * width + col) as u64);

    let mut color = Vector3::ZERO;
    for _ in 0..camera.num_samples {
        let jitter = sampler.get_2d();
        let ray = camera.generate_ray(col, row, jitter);
        color += radiance(scene, &ray, &mut sampler);
    }
    color / camera.num_samples as Float
}

pub fn render(scene: &Scene) -> ImageData {
    let camera = &scene.camera;
    let (width, height) = camera.get_resolution();
    info!("Rendering {}x{} image with {} samples per pixel...", width, height, camera.num_samples);

    let start = std::time::Instant::now();
    let colors: Vec<Vector3> = (0..width * height)
        .into_par_iter()
        .map(|i| render_pixel(scene, i % width, i / width))
        .collect();
    info!("Rendered {} in {:.2?}", camera.image_name, start.elapsed());

    ImageData::new(width, height, camera.image_name.clone(), colors)
}
