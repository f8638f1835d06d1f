const ROTATE_X_FACTOR: f64 = -8.0;
const ROTATE_Y_FACTOR: f64 = 10.0;
const HOVER_SCALE: f64 = 1.01;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Pointer offset from the center of `bounds`, each axis roughly in -0.5..0.5.
pub fn normalized_offset(bounds: Bounds, client_x: f64, client_y: f64) -> Option<(f64, f64)> {
    if bounds.width <= 0.0 || bounds.height <= 0.0 {
        return None;
    }

    let x = (client_x - bounds.left) / bounds.width - 0.5;
    let y = (client_y - bounds.top) / bounds.height - 0.5;
    Some((x, y))
}

/// CSS transform for a pointer at (`client_x`, `client_y`); `None` for a zero-sized box.
pub fn tilt_transform(bounds: Bounds, client_x: f64, client_y: f64) -> Option<String> {
    let (x, y) = normalized_offset(bounds, client_x, client_y)?;
    // `+ 0.0` turns -0.0 into 0.0 so the center prints as `0.00`.
    let rotate_x = y * ROTATE_X_FACTOR + 0.0;
    let rotate_y = x * ROTATE_Y_FACTOR + 0.0;

    Some(format!(
        "transform: rotateX({rotate_x:.2}deg) rotateY({rotate_y:.2}deg) scale({HOVER_SCALE});"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOX: Bounds = Bounds {
        left: 100.0,
        top: 50.0,
        width: 200.0,
        height: 100.0,
    };

    #[test]
    fn center_has_no_rotation() {
        assert_eq!(normalized_offset(BOX, 200.0, 100.0), Some((0.0, 0.0)));
        assert_eq!(
            tilt_transform(BOX, 200.0, 100.0).as_deref(),
            Some("transform: rotateX(0.00deg) rotateY(0.00deg) scale(1.01);")
        );
    }

    #[test]
    fn corners_hit_the_factor_limits() {
        assert_eq!(
            tilt_transform(BOX, 100.0, 50.0).as_deref(),
            Some("transform: rotateX(4.00deg) rotateY(-5.00deg) scale(1.01);")
        );
        assert_eq!(
            tilt_transform(BOX, 300.0, 150.0).as_deref(),
            Some("transform: rotateX(-4.00deg) rotateY(5.00deg) scale(1.01);")
        );
    }

    #[test]
    fn zero_sized_box_is_ignored() {
        let flat = Bounds { width: 0.0, ..BOX };
        assert!(tilt_transform(flat, 10.0, 10.0).is_none());
    }
}
