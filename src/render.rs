//! Renderer capability consumed by the world
//!
//! Drawing itself happens elsewhere; the simulation only needs to load model handles
//! and hand game objects over once per frame, after physics.

use std::cell::Cell;
use std::rc::Rc;

use crate::sim::GameObject;

/// Opaque handle to a loaded model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelHandle(pub u32);

pub trait Renderer {
    /// Load a model, returning `None` when it cannot be resolved or parsed
    fn load_model(&mut self, path: &str) -> Option<ModelHandle>;

    /// Draw an object with its current position, orientation and scaling
    fn render_game_object(&mut self, object: &dyn GameObject);

    fn render_text(&mut self, text: &str, pos: (i32, i32));

    fn render_background(&mut self);
}

/// Draw-call counters, shared with whoever created the renderer
#[derive(Debug, Clone, Default)]
pub struct RenderStats {
    objects: Rc<Cell<u64>>,
}

impl RenderStats {
    /// Objects handed over since creation
    pub fn objects(&self) -> u64 {
        self.objects.get()
    }
}

/// Renderer that draws nothing; used by the headless binary and tests
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    models: Vec<String>,
    stats: RenderStats,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loaded_models(&self) -> &[String] {
        &self.models
    }

    pub fn stats(&self) -> RenderStats {
        self.stats.clone()
    }
}

impl Renderer for HeadlessRenderer {
    fn load_model(&mut self, path: &str) -> Option<ModelHandle> {
        if !path.to_ascii_lowercase().ends_with(".3ds") {
            log::warn!("Unsupported model format: {}", path);
            return None;
        }
        let id = match self.models.iter().position(|m| m == path) {
            Some(i) => i,
            None => {
                self.models.push(path.to_string());
                self.models.len() - 1
            }
        };
        Some(ModelHandle(id as u32))
    }

    fn render_game_object(&mut self, _object: &dyn GameObject) {
        self.stats.objects.set(self.stats.objects.get() + 1);
    }

    fn render_text(&mut self, text: &str, _pos: (i32, i32)) {
        log::debug!("text: {}", text);
    }

    fn render_background(&mut self) {}
}
