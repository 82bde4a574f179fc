//! Compression level conversion.
//!
//! The user-facing scale is 1-9 for every format:
//!
//! - **1-3**: fast compression (lower CPU usage, larger files)
//! - **6**: default (balanced)
//! - **7-9**: best compression (higher CPU usage, smaller files)
//!
//! Each codec maps these levels onto its own internal scale.

/// Converts a user level to a flate2 level (gzip and zip deflate).
///
/// # Examples
///
/// ```
/// use arcprune_core::compression::level_to_flate2;
///
/// assert_eq!(level_to_flate2(None), flate2::Compression::default());
/// assert_eq!(level_to_flate2(Some(9)), flate2::Compression::best());
/// ```
#[must_use]
pub fn level_to_flate2(level: Option<u8>) -> flate2::Compression {
    match level {
        None | Some(6) => flate2::Compression::default(),
        Some(1..=3) => flate2::Compression::fast(),
        Some(7..=9) => flate2::Compression::best(),
        Some(n) => flate2::Compression::new(u32::from(n)),
    }
}

/// Converts a user level to a bzip2 level.
#[must_use]
pub fn level_to_bzip2(level: Option<u8>) -> bzip2::Compression {
    match level {
        None | Some(6) => bzip2::Compression::default(),
        Some(1) => bzip2::Compression::fast(),
        Some(7..=9) => bzip2::Compression::best(),
        Some(n) => bzip2::Compression::new(u32::from(n.min(9))),
    }
}

/// Converts a user level to an xz preset (0-9).
#[must_use]
pub fn level_to_xz(level: Option<u8>) -> u32 {
    level.map_or(6, |n| u32::from(n.min(9)))
}

/// Converts a user level to a zstd level.
///
/// Zstd accepts 1-22; the user scale is spread over the useful part of it.
///
/// # Examples
///
/// ```
/// use arcprune_core::compression::level_to_zstd;
///
/// assert_eq!(level_to_zstd(None), 3);
/// assert_eq!(level_to_zstd(Some(9)), 19);
/// ```
#[allow(clippy::match_same_arms)]
#[must_use]
pub fn level_to_zstd(level: Option<u8>) -> i32 {
    match level {
        None | Some(6) => 3,
        Some(1) => 1,
        Some(2) => 2,
        Some(7) => 10,
        Some(8) => 15,
        Some(9) => 19,
        _ => 3,
    }
}

/// Converts a user level to the deflate level stored in zip entry options.
#[must_use]
pub fn level_to_zip(level: Option<u8>) -> i64 {
    i64::from(level.unwrap_or(6).clamp(1, 9))
}
