//! Unit tests for vector helpers

use circlesim_core::vector::{add, dot, magnitude, scale, squared_magnitude, sub};
use circlesim_core::Vector2;

#[test]
fn test_basic_operations() {
    let a = Vector2::new(1.0, 2.0);
    let b = Vector2::new(3.0, -4.0);

    assert_eq!(add(a, b), Vector2::new(4.0, -2.0));
    assert_eq!(sub(a, b), Vector2::new(-2.0, 6.0));
    assert_eq!(scale(2.0, b), Vector2::new(6.0, -8.0));
    assert_eq!(dot(a, b), -5.0);
}

#[test]
fn test_magnitudes() {
    let v = Vector2::new(3.0, 4.0);
    assert_eq!(squared_magnitude(v), 25.0);
    assert_eq!(magnitude(v), 5.0);
}
