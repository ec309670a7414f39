use nalgebra::{point, vector, Point3, Rotation3, Vector2, Vector3};

use crate::common::Ray;

/// Distance of orbiting camera from the origin, at zoom 1
pub const ORBIT_DISTANCE: f32 = 2.0;

/// Ray-casting camera
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Position of the camera in world coordinates
    position: Point3<f32>,
    /// Up direction from the camera's perspective
    up: Vector3<f32>,
    /// Right direction from the camera's perspective
    right: Vector3<f32>,
    /// Direction of camera, unit
    direction: Vector3<f32>,
    /// Aspect ratio of image plane
    aspect: f32,
    /// Vertical Field of View in degrees
    fov_y: f32,
    /// Size of image plane
    img_plane_size: Vector2<f32>, // Calculated from fov_y
    /// Direction of ray passing through pixel \[0,0\]
    dir_00: Vector3<f32>, // upper left corner, in line with buffer convention
    /// Vector offset between two horizontally neighbouring pixels (such as: \[0,0\] -> \[1,0\])
    du: Vector3<f32>,
    /// Vector offset between two vertically neighbouring pixels (such as: \[0,0\] -> \[0,1\])
    dv: Vector3<f32>,
}

impl PerspectiveCamera {
    /// Construct new camera
    ///
    /// # Arguments
    ///
    /// * `position` - Position of the camera in world coordinates
    /// * `direction` - Looking direction of the camera
    /// * `up` - Approximate up direction, must not be parallel with `direction`
    ///
    /// Default fov is 60 degrees, default aspect ratio is 1.
    pub fn new(
        position: Point3<f32>,
        direction: Vector3<f32>,
        up: Vector3<f32>,
    ) -> PerspectiveCamera {
        let fov_y = 60.0;
        let mut camera = PerspectiveCamera {
            position,
            up,
            right: Vector3::zeros(),
            direction,
            aspect: 1.0,
            fov_y,
            img_plane_size: Vector2::zeros(),
            dir_00: Vector3::zeros(),
            du: Vector3::zeros(),
            dv: Vector3::zeros(),
        };
        camera.recalc_plane_size();
        camera.recalc_plane();
        camera
    }

    /// Camera orbiting the origin
    ///
    /// Viewing the volume rotated by `xrot` degrees around the x axis,
    /// then by `yrot` degrees around the y axis and scaled by `zoom`
    /// is the same as viewing the still volume from a rotated camera
    /// moved closer by a factor of `zoom`.
    pub fn orbit(xrot: f32, yrot: f32, zoom: f32) -> PerspectiveCamera {
        let rot_x = Rotation3::from_axis_angle(&Vector3::x_axis(), xrot.to_radians());
        let rot_y = Rotation3::from_axis_angle(&Vector3::y_axis(), yrot.to_radians());
        // camera frame is the inverse of the object rotation
        let inverse = (rot_x * rot_y).inverse();

        let position = inverse * point![0.0, 0.0, ORBIT_DISTANCE / zoom];
        let direction = inverse * vector![0.0, 0.0, -1.0];
        let up = inverse * vector![0.0, 1.0, 0.0];

        PerspectiveCamera::new(position, direction, up)
    }

    /// Changes aspect ratio to match `(width, height)` resolution
    pub fn change_aspect_from_resolution(&mut self, width: u32, height: u32) {
        let aspect = (width as f32) / (height as f32);
        self.change_aspect(aspect);
    }

    /// Change aspect ratio of camera
    ///
    /// For example 1.7777 for 16:9 ratio
    pub fn change_aspect(&mut self, aspect_ratio: f32) {
        self.aspect = aspect_ratio;
        self.recalc_plane_size();
        self.recalc_dudv();
    }

    // Call when camera direction changed
    fn recalc_plane(&mut self) {
        self.direction = self.direction.normalize();
        self.right = self.direction.cross(&self.up).normalize();
        self.up = self.right.cross(&self.direction);
        self.recalc_dudv();
    }

    // Call when fov or aspect ratio changed
    fn recalc_plane_size(&mut self) {
        self.img_plane_size = vector![0.0, 2.0 * f32::tan(f32::to_radians(0.5 * self.fov_y))];
        self.img_plane_size.x = self.img_plane_size.y * self.aspect;
    }

    fn recalc_dudv(&mut self) {
        self.du = self.img_plane_size.x * self.right;
        self.dv = -self.img_plane_size.y * self.up; // Notice '-' sign, rows go down
        self.dir_00 = self.direction - 0.5 * self.du - 0.5 * self.dv;
    }

    /// Get ray originating in the camera position crossing view plane in coordinates `pixel_coord`
    ///
    /// # Arguments
    ///
    /// * pixel_coord - Coordinates in the range of `<0;1>x<0;1>`, point \[0,0\] being upper left corner
    pub fn get_ray(&self, pixel_coord: (f32, f32)) -> Ray {
        let dir = self.dir_00 + self.du * pixel_coord.0 + self.dv * pixel_coord.1;
        let dir = dir.normalize();
        Ray::new(self.position, dir)
    }

    pub fn get_dir(&self) -> Vector3<f32> {
        self.direction
    }

    pub fn get_pos(&self) -> Point3<f32> {
        self.position
    }

    pub fn get_up(&self) -> Vector3<f32> {
        self.up
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn compare_vec(actual: Vector3<f32>, expected: Vector3<f32>) {
        let err = (actual - expected).magnitude();
        assert!(err < 1e-5, "{actual:?} != {expected:?}");
    }

    #[test]
    fn camera_du_dv() {
        let cam = PerspectiveCamera::new(
            point![0.0, 0.0, 0.0],
            vector![1.0, 0.0, 0.0],
            vector![0.0, 1.0, 0.0],
        );

        assert_eq!(cam.right, vector![0.0, 0.0, 1.0]);
        assert_eq!(cam.up, vector![0.0, 1.0, 0.0]);

        assert_eq!(cam.du.normalize(), vector![0.0, 0.0, 1.0]);
        assert_eq!(cam.dv.normalize(), vector![0.0, -1.0, 0.0]);

        assert_eq!(cam.du.z, cam.img_plane_size.x);
        assert_eq!(cam.dv.y, -cam.img_plane_size.y); // notice '-' sign, dv points down
    }

    #[test]
    fn center_ray_follows_direction() {
        let cam = PerspectiveCamera::orbit(0.0, 0.0, 1.0);
        let ray = cam.get_ray((0.5, 0.5));
        compare_vec(ray.direction, vector![0.0, 0.0, -1.0]);
        compare_vec(ray.origin.coords, vector![0.0, 0.0, ORBIT_DISTANCE]);
    }

    #[test]
    fn corner_rays() {
        let cam = PerspectiveCamera::orbit(0.0, 0.0, 1.0);
        let upper_left = cam.get_ray((0.0, 0.0)).direction;
        let lower_right = cam.get_ray((1.0, 1.0)).direction;
        assert!(upper_left.x < 0.0 && upper_left.y > 0.0);
        assert!(lower_right.x > 0.0 && lower_right.y < 0.0);

        // 60 degree vertical fov
        let top = cam.get_ray((0.5, 0.0)).direction;
        let angle = top.angle(&cam.get_dir()).to_degrees();
        assert!((angle - 30.0).abs() < 1e-3);
    }

    #[test]
    fn orbit_around_y() {
        let cam = PerspectiveCamera::orbit(0.0, 90.0, 1.0);
        // object turned by 90 degrees is seen from a camera turned by -90 degrees
        compare_vec(cam.get_pos().coords, vector![-ORBIT_DISTANCE, 0.0, 0.0]);
        compare_vec(cam.get_dir(), vector![1.0, 0.0, 0.0]);
        compare_vec(cam.get_up(), vector![0.0, 1.0, 0.0]);
    }

    #[test]
    fn orbit_over_the_top() {
        // looking straight down does not degenerate
        let cam = PerspectiveCamera::orbit(90.0, 0.0, 1.0);
        compare_vec(cam.get_pos().coords, vector![0.0, ORBIT_DISTANCE, 0.0]);
        compare_vec(cam.get_dir(), vector![0.0, -1.0, 0.0]);
        assert!(cam.get_up().magnitude() > 0.99);
    }

    #[test]
    fn zoom_moves_closer() {
        let cam = PerspectiveCamera::orbit(0.0, 0.0, 2.0);
        compare_vec(cam.get_pos().coords, vector![0.0, 0.0, ORBIT_DISTANCE / 2.0]);
    }

    #[test]
    fn aspect_widens_plane() {
        let mut cam = PerspectiveCamera::orbit(0.0, 0.0, 1.0);
        cam.change_aspect_from_resolution(200, 100);
        assert!((cam.img_plane_size.x - 2.0 * cam.img_plane_size.y).abs() < 1e-6);
    }
}
