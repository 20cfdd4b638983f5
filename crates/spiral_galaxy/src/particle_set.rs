/// Generated point cloud. `positions[i]` and `colors[i]` describe the same
/// particle; colors are linear RGB.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleSet {
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
}

impl ParticleSet {
    /// Zero-filled set of `count` particles
    pub fn zeroed(count: usize) -> Self {
        Self {
            positions: vec![[0.0; 3]; count],
            colors: vec![[0.0; 3]; count],
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    pub(crate) fn write(&mut self, index: usize, position: [f32; 3], color: [f32; 3]) {
        self.positions[index] = position;
        self.colors[index] = color;
    }

    /// Hands both buffers over to the renderer
    pub fn into_buffers(self) -> (Vec<[f32; 3]>, Vec<[f32; 3]>) {
        (self.positions, self.colors)
    }
}
