//! Distance metric and color bucketing shared by routing previews and the
//! gateway planner.

use serde::Serialize;

use crate::catalog::System;

/// Straight-line distance between two systems.
pub fn distance(a: &System, b: &System) -> f64 {
    a.position.distance_to(&b.position)
}

/// Render a distance with two decimal places, the precision shown to users.
pub fn format_distance(value: f64) -> String {
    format!("{value:.2}")
}

/// One of five ordered distance bands used to color gateway candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceBucket {
    Under10,
    Under15,
    Under20,
    Under25,
    Over25,
}

impl DistanceBucket {
    /// All buckets in ascending order.
    pub const ALL: [DistanceBucket; 5] = [
        DistanceBucket::Under10,
        DistanceBucket::Under15,
        DistanceBucket::Under20,
        DistanceBucket::Under25,
        DistanceBucket::Over25,
    ];

    /// Position of the bucket in ascending order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Fixed display color (Tol bright palette).
    pub fn color(self) -> &'static str {
        match self {
            DistanceBucket::Under10 => "#228833",
            DistanceBucket::Under15 => "#66CCEE",
            DistanceBucket::Under20 => "#CCBB44",
            DistanceBucket::Under25 => "#EE6677",
            DistanceBucket::Over25 => "#AA3377",
        }
    }

    /// Short legend label.
    pub fn label(self) -> &'static str {
        match self {
            DistanceBucket::Under10 => "<10",
            DistanceBucket::Under15 => "<15",
            DistanceBucket::Under20 => "<20",
            DistanceBucket::Under25 => "<25",
            DistanceBucket::Over25 => ">=25",
        }
    }
}

/// Classify a distance into its bucket.
///
/// Negative and NaN inputs land in the first bucket so the function stays total.
pub fn bucket(distance: f64) -> DistanceBucket {
    if distance >= 25.0 {
        DistanceBucket::Over25
    } else if distance >= 20.0 {
        DistanceBucket::Under25
    } else if distance >= 15.0 {
        DistanceBucket::Under20
    } else if distance >= 10.0 {
        DistanceBucket::Under15
    } else {
        DistanceBucket::Under10
    }
}

/// Green-to-red hue ramp for a normalized value; `t` is clamped to `[0, 1]`.
pub fn gradient_color(t: f64) -> String {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let hue = (1.0 - t) * 120.0;
    format!("hsl({hue:.0}, 100%, 50%)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SystemPosition;

    fn system_at(id: &str, x: f64, y: f64, z: f64) -> System {
        System {
            id: id.to_string(),
            name: id.to_string(),
            natural_id: String::new(),
            position: SystemPosition { x, y, z },
        }
    }

    #[test]
    fn three_four_five_triangle() {
        let origin = system_at("o", 0.0, 0.0, 0.0);
        let target = system_at("t", 3.0, 4.0, 0.0);
        assert_eq!(distance(&origin, &target), 5.0);
        assert_eq!(format_distance(distance(&origin, &target)), "5.00");
    }

    #[test]
    fn distance_is_symmetric_and_reflexive() {
        let a = system_at("a", 1.0, -7.5, 2.25);
        let b = system_at("b", -4.0, 3.0, 11.0);
        assert_eq!(distance(&a, &b), distance(&b, &a));
        assert_eq!(distance(&a, &a), 0.0);
    }

    #[test]
    fn bucket_thresholds_are_exclusive_upper_bounds() {
        assert_eq!(bucket(0.0), DistanceBucket::Under10);
        assert_eq!(bucket(9.999), DistanceBucket::Under10);
        assert_eq!(bucket(10.0), DistanceBucket::Under15);
        assert_eq!(bucket(15.0), DistanceBucket::Under20);
        assert_eq!(bucket(20.0), DistanceBucket::Under25);
        assert_eq!(bucket(25.0), DistanceBucket::Over25);
        assert_eq!(bucket(1.0e9), DistanceBucket::Over25);
    }

    #[test]
    fn bucket_is_monotonic() {
        let mut previous = bucket(0.0).index();
        let mut d = 0.0;
        while d < 40.0 {
            let current = bucket(d).index();
            assert!(current >= previous, "bucket decreased at {d}");
            previous = current;
            d += 0.25;
        }
    }

    #[test]
    fn bucket_is_total_for_odd_inputs() {
        assert_eq!(bucket(-3.0), DistanceBucket::Under10);
        assert_eq!(bucket(f64::NAN), DistanceBucket::Under10);
        assert_eq!(bucket(f64::INFINITY), DistanceBucket::Over25);
    }

    #[test]
    fn bucket_colors_are_distinct() {
        let mut colors: Vec<_> = DistanceBucket::ALL.iter().map(|b| b.color()).collect();
        colors.dedup();
        assert_eq!(colors.len(), 5);
    }

    #[test]
    fn gradient_runs_green_to_red() {
        assert_eq!(gradient_color(0.0), "hsl(120, 100%, 50%)");
        assert_eq!(gradient_color(1.0), "hsl(0, 100%, 50%)");
        assert_eq!(gradient_color(2.0), "hsl(0, 100%, 50%)");
        assert_eq!(gradient_color(f64::NAN), "hsl(120, 100%, 50%)");
    }
}
