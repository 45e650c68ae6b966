//! Point viewers: the rendering sink for colored point clouds.

use cloudspin_core::{ColorTable, PointStyle, Shading, ViewerOptions};
use glam::{Vec2, Vec3, Vec4};
use image::RgbaImage;

use crate::camera::ViewerCamera;
use crate::error::{RenderError, RenderResult};
use crate::raster::{draw_disc, to_rgba8, DiscPaint};

/// A named set of points with per-point colors and a shared style.
#[derive(Debug, Clone)]
pub struct PointLayer {
    pub name: String,
    pub positions: Vec<Vec3>,
    pub colors: ColorTable,
    pub style: PointStyle,
}

impl PointLayer {
    /// Creates a layer, checking that there is one color per point.
    pub fn new(
        name: impl Into<String>,
        positions: Vec<Vec3>,
        colors: ColorTable,
        style: PointStyle,
    ) -> RenderResult<Self> {
        if positions.len() != colors.len() {
            return Err(RenderError::SizeMismatch {
                expected: positions.len(),
                actual: colors.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            positions,
            colors,
            style,
        })
    }

    /// Number of points in the layer.
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.positions.len()
    }

    fn world_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.positions.iter().map(|p| *p * self.style.scale)
    }
}

/// A viewer that can show point layers and render the current camera view.
///
/// Implementations own the camera; animation sinks mutate it between frames.
pub trait PointViewer {
    /// Adds a layer to the scene.
    fn add_points(&mut self, layer: PointLayer);

    /// Restores the default camera angles and fits the scene into view.
    fn reset_view(&mut self);

    /// The current camera.
    fn camera(&self) -> &ViewerCamera;

    /// Mutable access to the current camera.
    fn camera_mut(&mut self) -> &mut ViewerCamera;

    /// Canvas size in pixels (width, height).
    fn canvas_size(&self) -> (u32, u32);

    /// Renders the scene as seen by the current camera.
    fn render_frame(&self) -> RgbaImage;
}

/// CPU viewer drawing each point as a depth-sorted, anti-aliased disc under an
/// orthographic camera.
#[derive(Debug, Clone)]
pub struct SoftwareViewer {
    options: ViewerOptions,
    layers: Vec<PointLayer>,
    camera: ViewerCamera,
}

struct Splat {
    center: Vec2,
    depth: f32,
    radius: f32,
    color: Vec4,
    layer: usize,
}

impl SoftwareViewer {
    /// Creates an empty viewer.
    pub fn new(options: ViewerOptions) -> RenderResult<Self> {
        let [width, height] = options.window_size;
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidCanvas { width, height });
        }
        Ok(Self {
            options,
            layers: Vec::new(),
            camera: ViewerCamera::default(),
        })
    }

    /// The layers added so far.
    #[must_use]
    pub fn layers(&self) -> &[PointLayer] {
        &self.layers
    }

    /// Axis-aligned bounds of all layers in world units, if any point exists.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        self.layers
            .iter()
            .flat_map(PointLayer::world_positions)
            .fold(None, |bounds, p| match bounds {
                None => Some((p, p)),
                Some((min, max)) => Some((min.min(p), max.max(p))),
            })
    }

    fn collect_splats(&self) -> Vec<Splat> {
        let canvas = self.canvas_size();
        let rotation = self.camera.view_rotation();
        let mut splats = Vec::with_capacity(self.layers.iter().map(PointLayer::num_points).sum());

        for (index, layer) in self.layers.iter().enumerate() {
            let style = &layer.style;
            let size_scale = style.scale.abs().element_sum() / 3.0;
            let radius =
                (0.5 * style.point_size * size_scale * self.camera.pixels_per_unit()).max(0.5);

            for (world, color) in layer.world_positions().zip(&layer.colors) {
                let projected = self.camera.project(rotation, world, canvas);
                splats.push(Splat {
                    center: projected.truncate(),
                    depth: projected.z,
                    radius,
                    color: *color,
                    layer: index,
                });
            }
        }

        // Painter's order: farthest first.
        splats.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        splats
    }
}

impl PointViewer for SoftwareViewer {
    fn add_points(&mut self, layer: PointLayer) {
        log::debug!(
            "adding layer '{}' with {} points",
            layer.name,
            layer.num_points()
        );
        self.layers.push(layer);
    }

    fn reset_view(&mut self) {
        let canvas = self.canvas_size();
        match self.bounding_box() {
            Some((min, max)) => self.camera.fit_to_box(min, max, canvas),
            None => self.camera = ViewerCamera::default(),
        }
    }

    fn camera(&self) -> &ViewerCamera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut ViewerCamera {
        &mut self.camera
    }

    fn canvas_size(&self) -> (u32, u32) {
        let [width, height] = self.options.window_size;
        (width, height)
    }

    fn render_frame(&self) -> RgbaImage {
        let (width, height) = self.canvas_size();
        let background = to_rgba8(self.options.background_color.extend(1.0));
        let mut image = RgbaImage::from_pixel(width, height, background);

        for splat in self.collect_splats() {
            let style = &self.layers[splat.layer].style;
            let paint = DiscPaint {
                fill: Vec4::new(
                    splat.color.x,
                    splat.color.y,
                    splat.color.z,
                    splat.color.w * style.opacity,
                ),
                edge: style.edge_color.truncate().extend(style.edge_color.w * style.opacity),
                edge_fraction: style.edge_width,
                spherical: style.shading == Shading::Spherical,
            };
            draw_disc(&mut image, splat.center, splat.radius, &paint);
        }

        image
    }
}
