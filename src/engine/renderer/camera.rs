// Camera and viewport bookkeeping for a side-scrolling view

use glam::Vec2;

/// 2D camera following the action along the x axis
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera centre in world space
    pub position: Vec2,
    /// Viewport width
    viewport_width: f32,
    /// Viewport height
    viewport_height: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: Vec2, viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            position,
            viewport_width,
            viewport_height,
        }
    }

    /// Camera centred on a viewport whose bottom-left corner is the origin
    pub fn centered(viewport_width: f32, viewport_height: f32) -> Self {
        Self::new(
            Vec2::new(viewport_width / 2.0, viewport_height / 2.0),
            viewport_width,
            viewport_height,
        )
    }

    /// Set camera position
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Track a horizontal world coordinate
    pub fn follow_x(&mut self, x: f32) {
        self.position.x = x;
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Get the viewport bounds in world coordinates
    pub fn viewport_bounds(&self) -> Viewport {
        let half = Vec2::new(self.viewport_width / 2.0, self.viewport_height / 2.0);
        Viewport {
            min: self.position - half,
            max: self.position + half,
        }
    }
}

/// Viewport bounds in world coordinates
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub min: Vec2,
    pub max: Vec2,
}

impl Viewport {
    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn bottom(&self) -> f32 {
        self.min.y
    }

    /// Check if a point is inside the viewport
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}
