use nalgebra::{point, Point3, Vector3};

use super::Ray;

/// Axis aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundBox {
    pub lower: Point3<f32>,
    pub upper: Point3<f32>,
}

impl BoundBox {
    pub fn new(lower: Point3<f32>, upper: Point3<f32>) -> BoundBox {
        BoundBox { lower, upper }
    }

    /// Box with center in the origin
    pub fn centered(dimensions: Vector3<f32>) -> BoundBox {
        let half = 0.5 * dimensions;
        BoundBox::new(point![-half.x, -half.y, -half.z], point![half.x, half.y, half.z])
    }

    pub fn dims(&self) -> Vector3<f32> {
        self.upper - self.lower
    }

    pub fn center(&self) -> Point3<f32> {
        self.lower + 0.5 * self.dims()
    }

    /// Map point inside the box to `<0;1>^3`
    pub fn normalize_point(&self, pos: &Point3<f32>) -> Point3<f32> {
        let rel = (*pos - self.lower).component_div(&self.dims());
        Point3::from(rel)
    }

    /// Returns ray parameters of entry and exit point.
    /// Entry is negative if ray origin is inside the box.
    pub fn intersect(&self, ray: &Ray) -> Option<(f32, f32)> {
        // Source: An Efficient and Robust Ray–Box Intersection Algorithm. Amy Williams et al. 2004.
        // http://citeseerx.ist.psu.edu/viewdoc/summary?doi=10.1.1.64.7663

        // t value of intersection with the 6 planes of a bounding box
        let t0 = (self.lower - ray.origin).component_div(&ray.direction);
        let t1 = (self.upper - ray.origin).component_div(&ray.direction);

        // [ (min,max) , (min,max) , (min,max) ]
        let t_minmax = t0.zip_map(&t1, |t0, t1| if t0 < t1 { (t0, t1) } else { (t1, t0) });

        let tmin = f32::max(f32::max(t_minmax.x.0, t_minmax.y.0), t_minmax.z.0);
        let tmax = f32::min(f32::min(t_minmax.x.1, t_minmax.y.1), t_minmax.z.1);

        // if tmax < 0, ray is intersecting AABB, but the whole AABB is behind us
        if tmax.is_sign_negative() {
            return None;
        }

        // if tmin > tmax, ray doesn't intersect AABB
        if tmin > tmax {
            return None;
        }

        Some((tmin, tmax))
    }
}
