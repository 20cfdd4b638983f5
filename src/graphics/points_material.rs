use crate::prelude::*;
use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::render::{
    mesh::MeshVertexBufferLayoutRef,
    render_resource::{
        AsBindGroup, RenderPipelineDescriptor, ShaderRef, ShaderType,
        SpecializedMeshPipelineError,
    },
};
use bevy::{prelude::*, reflect::TypePath};
use bytemuck::{Pod, Zeroable};

const SHADER_ASSET_PATH: &str = "shaders/galaxy_points.wgsl";

// Duplicated in galaxy_points.wgsl, keep both in sync
#[derive(ShaderType, Pod, Zeroable, Clone, Copy, Debug, Default)]
#[repr(C)]
struct PointParams {
    size: f32, // world-space diameter
}

impl PointParams {
    fn read(style: PointStyle) -> Self {
        Self { size: style.size }
    }
}

/// Additive, vertex-colored billboards that never write depth
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct GalaxyPointsMaterial {
    #[uniform(0)]
    point_params: PointParams,
}

impl GalaxyPointsMaterial {
    pub fn new(style: PointStyle) -> Self {
        Self {
            point_params: PointParams::read(style),
        }
    }
}

impl Material for GalaxyPointsMaterial {
    fn vertex_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            Mesh::ATTRIBUTE_UV_0.at_shader_location(1),
            Mesh::ATTRIBUTE_COLOR.at_shader_location(2),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];

        // quads are built facing the camera, winding doesn't matter
        descriptor.primitive.cull_mode = None;
        if let Some(depth_stencil) = descriptor.depth_stencil.as_mut() {
            depth_stencil.depth_write_enabled = false;
        }
        Ok(())
    }
}
