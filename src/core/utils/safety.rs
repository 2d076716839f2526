//! SoA lane access
//!
//! The particle buffers keep x and y in separate arrays. `lane!` reads or writes
//! both halves of one particle as a `Vec2`.
//!
//! Indexing is always checked, in release too: a bad index panics.
//!
//! ```rust
//! use murmur_engine::{lane, Vec2};
//!
//! let mut xs = vec![1.0f32, 2.0, 3.0];
//! let mut ys = vec![4.0f32, 5.0, 6.0];
//! let v = lane!(xs, ys, [1]);
//! assert_eq!(v, Vec2::new(2.0, 5.0));
//!
//! lane!(xs, ys, [2] = Vec2::new(9.0, 8.0));
//! assert_eq!((xs[2], ys[2]), (9.0, 8.0));
//! ```

#[macro_export]
macro_rules! lane {
    // Read pattern: lane!(xs, ys, [index])
    ($xs:expr, $ys:expr, [$index:expr]) => {{
        let i = $index;
        $crate::core::vec2::Vec2::new($xs[i], $ys[i])
    }};

    // Write pattern: lane!(xs, ys, [index] = vec2)
    ($xs:expr, $ys:expr, [$index:expr] = $val:expr) => {{
        let i = $index;
        let v: $crate::core::vec2::Vec2 = $val;
        $xs[i] = v.x;
        $ys[i] = v.y;
    }};
}
