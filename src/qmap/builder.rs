//! Working values the parser fills in token by token. Each builder is
//! finished into an immutable [`repr`](crate::qmap::repr) value when its
//! closing token arrives and then replaced with a fresh one.

use std::vec::Vec;

use crate::qmap::plane::Plane;
use crate::qmap::repr::{
    Alignment, BaseAlignment, Brush, Edict, Entity, Face, Point, SpawnType,
    TextureAxis, Vec2,
};

#[derive(Debug, Default)]
pub struct EntityBuilder {
    pub properties: Edict,
    pub brushes: Vec<Brush>,
}

impl EntityBuilder {
    pub fn finish(self) -> Entity {
        Entity {
            properties: self.properties,
            brushes: self.brushes,
            spawn_type: SpawnType::Entity,
        }
    }
}

#[derive(Debug, Default)]
pub struct BrushBuilder {
    pub faces: Vec<Face>,
}

impl BrushBuilder {
    pub fn finish(self) -> Brush {
        self.faces
    }
}

#[derive(Debug, Default)]
pub struct FaceBuilder {
    pub points: [Point; 3],
    pub texture_idx: usize,
    pub offset: Vec2,
    pub axes: [TextureAxis; 2],
    pub base: BaseAlignment,
    pub valve: bool,
}

impl FaceBuilder {
    /// Stores one coordinate of a plane point. Components past `z` are
    /// dropped.
    pub fn set_point_component(&mut self, point: usize, component: usize, value: f64) {
        if component < 3 {
            self.points[point][component] = value;
        }
    }

    /// Stores one Valve axis value: `x`, `y`, `z`, then the offset. Values
    /// past the offset are dropped.
    pub fn set_axis_component(&mut self, axis: usize, component: usize, value: f64) {
        let axis = &mut self.axes[axis];

        match component {
            0..=2 => axis.axis[component] = value,
            3 => axis.offset = value,
            _ => {}
        }
    }

    /// Computes the face's plane and fixes which alignment form it uses.
    pub fn finish(self) -> Face {
        let alignment = if self.valve {
            Alignment::Valve220 {
                axes: self.axes,
                base: self.base,
            }
        } else {
            Alignment::Standard {
                offset: self.offset,
                base: self.base,
            }
        };

        Face {
            plane_points: self.points,
            plane: Plane::from_points(self.points),
            texture_idx: self.texture_idx,
            alignment,
        }
    }
}
