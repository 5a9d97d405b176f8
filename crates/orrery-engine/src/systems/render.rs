use crate::components::entity::Entity;
use crate::renderer::instance::{NodeBuffer, NodeInstance, NODE_FLAG_EMISSIVE, NODE_FLAG_RINGS};

/// Build the node buffer from entities with mesh components.
/// Returns the number of nodes dropped because the buffer was full.
pub fn build_node_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    buffer: &mut NodeBuffer,
) -> usize {
    buffer.clear();
    let mut dropped = 0;
    for entity in entities {
        if !entity.active {
            continue;
        }
        let mesh = match &entity.mesh {
            Some(m) => m,
            None => continue,
        };
        let (radius, radius2) = mesh.shape.radii();
        let mut flags = 0u32;
        if mesh.rings {
            flags |= NODE_FLAG_RINGS;
        }
        if mesh.emissive {
            flags |= NODE_FLAG_EMISSIVE;
        }
        let pushed = buffer.push(NodeInstance {
            id: entity.id.0 as f32,
            kind: mesh.shape.kind(),
            x: entity.pos.x,
            y: entity.pos.y,
            z: entity.pos.z,
            rotation: entity.rotation,
            radius,
            radius2,
            scale: entity.scale,
            r: mesh.color.r,
            g: mesh.color.g,
            b: mesh.color.b,
            flags: flags as f32,
            _pad0: 0.0,
            _pad1: 0.0,
            _pad2: 0.0,
        });
        if !pushed {
            dropped += 1;
        }
    }
    if dropped > 0 {
        log::warn!("node buffer full, dropped {dropped} nodes");
    }
    dropped
}
