use bytemuck::{Pod, Zeroable};

/// Flag bit: sphere carries a ring adornment.
pub const NODE_FLAG_RINGS: u32 = 1;
/// Flag bit: self-lit material.
pub const NODE_FLAG_EMISSIVE: u32 = 1 << 1;

/// Per-node scene description written to SharedArrayBuffer for the JS renderer.
/// Must match the TypeScript protocol: 16 floats = 64 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct NodeInstance {
    /// Entity id (hit-test results are reported back with this value).
    pub id: f32,
    /// Mesh shape discriminant.
    pub kind: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Rotation about Y in radians.
    pub rotation: f32,
    /// Primary radius (sphere radius, orbit radius, hull radius).
    pub radius: f32,
    /// Secondary radius (orbit tube, saucer dome).
    pub radius2: f32,
    pub scale: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Bitset of `NODE_FLAG_*`.
    pub flags: f32,
    pub _pad0: f32,
    pub _pad1: f32,
    pub _pad2: f32,
}

impl NodeInstance {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Buffer of node instances rebuilt every frame.
pub struct NodeBuffer {
    instances: Vec<NodeInstance>,
    capacity: usize,
}

impl NodeBuffer {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
            capacity: max,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Push an instance. Returns false (and drops it) once the buffer is full.
    pub fn push(&mut self, instance: NodeInstance) -> bool {
        if self.instances.len() >= self.capacity {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn instances(&self) -> &[NodeInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for NodeBuffer {
    fn default() -> Self {
        Self::new()
    }
}
